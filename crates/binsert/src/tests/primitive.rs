use super::*;

use crate::{Bisector, Error, Function, InsertPrimitive, Result};

use mockall::*;

mock! {
    pub Insert {}
    impl InsertPrimitive for Insert {
        fn insert(&self, seq: &Value, index: usize, value: &Value) -> Result<()>;
    }
}

#[test]
fn primitive_receives_located_index() {
    let t = int_table(&[1, 3, 5]);
    let seq: Value = t.clone().into();

    let mut mock = MockInsert::new();
    mock.expect_insert()
        .withf(|seq, index, value| {
            seq.as_table().map_or(false, |s| s.len() == 3)
                && *index == 3
                && value.raw_equal(&Value::Integer(4))
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let bisector = Bisector::new(Box::new(mock));
    assert_eq!(bisector.insert(&seq, &4.into(), None).unwrap(), 3);
    // the mock does not shift anything
    assert_eq!(ints(&t), vec![1, 3, 5]);
}

#[test]
fn primitive_not_called_on_bad_arguments() {
    let mut mock = MockInsert::new();
    mock.expect_insert().never();

    let bisector = Bisector::new(Box::new(mock));
    let seq: Value = int_table(&[1, 2]).into();
    assert!(bisector.insert(&42.into(), &1.into(), None).is_err());
    assert!(bisector.insert(&seq, &Table::new().into(), None).is_err());
    assert!(bisector.insert(&seq, &1.into(), Some(&42.into())).is_err());
}

#[test]
fn primitive_not_called_on_comparator_error() {
    let mut mock = MockInsert::new();
    mock.expect_insert().never();

    let bisector = Bisector::new(Box::new(mock));
    let seq: Value = int_table(&[1, 2]).into();
    let err = bisector
        .insert(&seq, &1.into(), Some(&Function::new(|_| Err("nope".into())).into()))
        .unwrap_err();
    assert!(matches!(err, Error::Runtime(_)));
}

#[test]
fn primitive_error_propagates_unchanged() {
    let mut mock = MockInsert::new();
    let mut seq = Sequence::new();
    mock.expect_insert()
        .times(1)
        .returning(|_, _, _| Err(Error::Runtime("disk full".into())))
        .in_sequence(&mut seq);

    let bisector = Bisector::new(Box::new(mock));
    let err = bisector
        .insert(&int_table(&[1]).into(), &0.into(), None)
        .unwrap_err();
    assert!(matches!(err, Error::Runtime(ref msg) if msg == "disk full"));
}

#[test]
fn partial_mutation_is_visible() {
    // appends, then fails before placing the value
    let half: Function = Function::new(|args| {
        let t = args[0].as_table().unwrap();
        t.push(Value::Nil);
        Err("interrupted".into())
    });
    let bisector = Bisector::new(Box::new(half));
    let t = int_table(&[1, 2]);
    assert!(bisector.insert(&t.clone().into(), &3.into(), None).is_err());
    assert_eq!(t.len(), 3);
    assert!(matches!(t.get(3), Value::Nil));
}

#[test]
fn locate_never_inserts() {
    let mut mock = MockInsert::new();
    mock.expect_insert().never();

    let bisector = Bisector::new(Box::new(mock));
    let t: Value = int_table(&[1, 2, 3]).into();
    assert_eq!(bisector.locate(&t, &2.into(), None).unwrap(), 3);
}

#[test]
fn std_primitive_through_bisector() {
    let bisector = Bisector::new(Box::new(crate::table_insert()));
    let t = int_table(&[10, 20]);
    assert_eq!(bisector.insert(&t.clone().into(), &15.into(), None).unwrap(), 2);
    assert_eq!(ints(&t), vec![10, 15, 20]);
}
