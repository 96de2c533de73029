use stdx::bisect::Bisect;

use crate::{Comparable, Comparator, Error, Function, Result, Table, Value};

const BISECT: &str = "bisect";
const BINSERT: &str = "binsert";

/// Places `value` at `index` of `seq`, shifting the tail up.
pub trait InsertPrimitive {
    fn insert(&self, seq: &Value, index: usize, value: &Value) -> Result<()>;
}

impl InsertPrimitive for Function {
    fn insert(&self, seq: &Value, index: usize, value: &Value) -> Result<()> {
        self.call(&[seq.clone(), Value::Integer(index as i64), value.clone()])?;
        Ok(())
    }
}

impl Bisect for Table {
    type Elem = Value;

    fn elem_count(&self) -> usize {
        self.len()
    }

    fn elem(&self, idx: usize) -> Value {
        self.get(idx)
    }
}

pub struct Bisector {
    insert: Box<dyn InsertPrimitive>,
}

impl Bisector {
    pub fn new(insert: Box<dyn InsertPrimitive>) -> Self {
        Self { insert }
    }

    /// Index in `1..=#seq + 1` where `value` belongs. Does not touch `seq`.
    pub fn locate(&self, seq: &Value, value: &Value, compare: Option<&Value>) -> Result<usize> {
        self.locate_as(BISECT, seq, value, compare)
    }

    /// Locates `value`, hands it to the insert primitive and returns the
    /// index. Primitive errors are returned as-is, after whatever it did to
    /// `seq`.
    pub fn insert(&self, seq: &Value, value: &Value, compare: Option<&Value>) -> Result<usize> {
        let index = self.locate_as(BINSERT, seq, value, compare)?;
        log::debug!("inserting {:?} at {}", value, index);
        self.insert.insert(seq, index, value)?;
        Ok(index)
    }

    fn locate_as(
        &self,
        func: &'static str,
        seq: &Value,
        value: &Value,
        compare: Option<&Value>,
    ) -> Result<usize> {
        let table = seq.as_table().ok_or_else(|| Error::Type {
            arg: 1,
            func,
            expected: "table",
            got: seq.type_name(),
        })?;
        let value = Comparable::check(func, 2, value)?.value();
        let cmp = Comparator::resolve(func, 3, compare)?;

        // no borrow of the table is held while cmp runs
        let index = table.bisect_by(|elem| {
            log::trace!("{}: comparing {:?} with {:?}", func, value, elem);
            cmp.compare(value, &elem)
        })?;
        log::debug!("{}: {:?} belongs at {} of {}", func, value, index, table.len());
        Ok(index)
    }
}
