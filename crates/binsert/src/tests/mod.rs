mod primitive;

use crate::{stdlib, Table, Value};

use std::io::Write;

#[ctor::ctor]
fn init_logger() {
    let _ = env_logger::builder()
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .is_test(true)
        .try_init();
}

pub fn int_table(xs: &[i64]) -> Table {
    Table::from_values(xs.iter().map(|&x| Value::Integer(x)))
}

pub fn ints(t: &Table) -> Vec<i64> {
    t.values()
        .iter()
        .map(|v| v.as_integer().expect("integer element"))
        .collect()
}

pub fn std_module() -> crate::Module {
    let mut loaded = stdlib();
    crate::open(&mut loaded, &Default::default()).unwrap()
}

/// ceil(log2(len + 1))
pub fn probe_limit(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}
