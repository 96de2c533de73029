use std::rc::Rc;

use smart_default::SmartDefault;

use crate::{Bisector, Error, Function, Library, Loaded, Result, Value};

/// Where [`open`] finds the insert primitive and registers itself.
#[derive(SmartDefault, Debug, Clone)]
pub struct OpenOptions {
    #[default(_code = "\"table\".to_string()")]
    pub library: String,
    #[default(_code = "\"insert\".to_string()")]
    pub function: String,
    #[default(_code = "\"binsert\".to_string()")]
    pub name: String,
}

/// A loaded instance of the module.
#[derive(Clone)]
pub struct Module {
    bisector: Rc<Bisector>,
}

/// Resolves the insert primitive from `loaded`, binds it for the lifetime of
/// the returned module, and registers `bisect`/`binsert` under
/// `options.name`.
pub fn open(loaded: &mut Loaded, options: &OpenOptions) -> Result<Module> {
    let lib = loaded.get(&options.library).ok_or_else(|| {
        Error::Init(format!(
            "standard library '{}' is not loaded",
            options.library
        ))
    })?;
    let insert = match lib.get(&options.function) {
        Some(Value::Function(f)) => f.clone(),
        _ => {
            return Err(Error::Init(format!(
                "'{}.{}' is not a function",
                options.library, options.function
            )))
        }
    };
    log::debug!("bound {}.{} as insert primitive", options.library, options.function);

    let module = Module {
        bisector: Rc::new(Bisector::new(Box::new(insert))),
    };
    loaded.register(options.name.clone(), module.library());
    log::debug!("registered module '{}'", options.name);
    Ok(module)
}

impl Module {
    pub fn bisect(&self, t: &Value, v: &Value, cmp: Option<&Value>) -> Result<usize> {
        self.bisector.locate(t, v, cmp)
    }

    pub fn binsert(&self, t: &Value, v: &Value, cmp: Option<&Value>) -> Result<usize> {
        self.bisector.insert(t, v, cmp)
    }

    /// The module's functions in host-callable form. Missing arguments read
    /// as `nil`.
    pub fn library(&self) -> Library {
        let mut lib = Library::new();

        let bisector = self.bisector.clone();
        let bisect = Function::named("bisect", move |args| {
            let (t, v) = leading_args(args);
            let index = bisector.locate(&t, &v, args.get(2))?;
            Ok(Value::Integer(index as i64))
        });
        lib.insert("bisect".to_string(), bisect.into());

        let bisector = self.bisector.clone();
        let binsert = Function::named("binsert", move |args| {
            let (t, v) = leading_args(args);
            let index = bisector.insert(&t, &v, args.get(2))?;
            Ok(Value::Integer(index as i64))
        });
        lib.insert("binsert".to_string(), binsert.into());

        lib
    }
}

fn leading_args(args: &[Value]) -> (Value, Value) {
    let nth = |i: usize| args.get(i).cloned().unwrap_or(Value::Nil);
    (nth(0), nth(1))
}
