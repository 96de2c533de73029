use std::collections::{BTreeMap, HashMap};

use crate::{Error, Function, Result, Value};

/// Named fields of a loaded library.
pub type Library = BTreeMap<String, Value>;

/// Registry of loaded libraries, keyed by name.
#[derive(Default)]
pub struct Loaded {
    libs: HashMap<String, Library>,
}

impl Loaded {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Library> {
        self.libs.get(name)
    }

    pub fn register(&mut self, name: impl Into<String>, lib: Library) {
        self.libs.insert(name.into(), lib);
    }

    pub fn remove(&mut self, name: &str) -> Option<Library> {
        self.libs.remove(name)
    }
}

/// The libraries every host starts with: just `table.insert` here.
pub fn stdlib() -> Loaded {
    let mut loaded = Loaded::new();
    let mut table = Library::new();
    table.insert("insert".to_string(), Value::Function(table_insert()));
    loaded.register("table", table);
    loaded
}

const INSERT: &str = "insert";

/// `table.insert(t, [pos,] v)`.
pub fn table_insert() -> Function {
    Function::named(INSERT, |args| {
        let t = args.get(0).cloned().unwrap_or(Value::Nil);
        let table = t.as_table().ok_or_else(|| Error::Type {
            arg: 1,
            func: INSERT,
            expected: "table",
            got: t.type_name(),
        })?;
        let end = table.len() + 1;
        match args.len() {
            2 => table.insert_raw(end, args[1].clone()),
            3 => {
                let pos = match args[1].as_integer() {
                    Some(pos) => pos,
                    None if matches!(args[1], Value::Number(_)) => {
                        return Err(Error::BadArgument {
                            arg: 2,
                            func: INSERT,
                            msg: "number has no integer representation",
                        })
                    }
                    None => {
                        return Err(Error::Type {
                            arg: 2,
                            func: INSERT,
                            expected: "number",
                            got: args[1].type_name(),
                        })
                    }
                };
                if pos < 1 || pos as u64 > end as u64 {
                    return Err(Error::BadArgument {
                        arg: 2,
                        func: INSERT,
                        msg: "position out of bounds",
                    });
                }
                table.insert_raw(pos as usize, args[2].clone());
            }
            _ => return Err(Error::Runtime("wrong number of arguments to 'insert'".into())),
        }
        Ok(Value::Nil)
    })
}
