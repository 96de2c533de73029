use std::{
    cell::{Ref, RefCell},
    cmp::Ordering,
    fmt,
    rc::Rc,
};

use crate::{Error, Result};

/// A dynamically typed host value.
#[derive(Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(i64),
    Number(f64),
    String(Rc<str>),
    Table(Table),
    Function(Function),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) | Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Table(_) => "table",
            Value::Function(_) => "function",
        }
    }

    /// Only `nil` and `false` are false.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Boolean(false))
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match *self {
            Value::Integer(i) => Some(i),
            Value::Number(n) if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 => {
                Some(n as i64)
            }
            _ => None,
        }
    }

    pub fn metatable(&self) -> Option<Metatable> {
        self.as_table().and_then(Table::metatable)
    }

    /// Calls a function, or a table through its `__call` metamethod.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        match self {
            Value::Function(f) => f.call(args),
            _ => match self.metatable().and_then(|mt| mt.call) {
                Some(call) => {
                    let mut full = Vec::with_capacity(args.len() + 1);
                    full.push(self.clone());
                    full.extend_from_slice(args);
                    call.call(&full)
                }
                None => Err(Error::Call(self.type_name())),
            },
        }
    }

    /// Raw equality: numbers by value, strings by content, tables and
    /// functions by identity.
    pub fn raw_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Integer(a), Value::Number(b)) | (Value::Number(b), Value::Integer(a)) => {
                compare_int_float(*a, *b) == Some(Ordering::Equal)
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Exact ordering of an integer against a float; `None` for NaN.
pub(crate) fn compare_int_float(i: i64, f: f64) -> Option<Ordering> {
    // 2^63, the first float above i64::MAX
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return None;
    }
    if f >= LIMIT {
        return Some(Ordering::Less);
    }
    if f < -LIMIT {
        return Some(Ordering::Greater);
    }
    // floor(f) lies in i64 range here, so the cast is exact
    let floor = f.floor();
    match i.cmp(&(floor as i64)) {
        Ordering::Equal if f > floor => Some(Ordering::Less),
        ord => Some(ord),
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Table(t) => write!(f, "table: {:p}", Rc::as_ptr(&t.0)),
            Value::Function(func) => func.fmt(f),
        }
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(t)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

/// Optional capabilities attached to a table.
#[derive(Clone, Default)]
pub struct Metatable {
    pub lt: Option<Function>,
    pub le: Option<Function>,
    pub call: Option<Function>,
}

#[derive(Default)]
struct TableInner {
    array: RefCell<Vec<Value>>,
    metatable: RefCell<Option<Metatable>>,
}

/// Shared handle to a host table. Clones alias the same storage.
#[derive(Clone, Default)]
pub struct Table(Rc<TableInner>);

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let t = Self::new();
        t.0.array.borrow_mut().extend(values);
        t
    }

    pub fn with_metatable(mt: Metatable) -> Self {
        let t = Self::new();
        t.set_metatable(Some(mt));
        t
    }

    pub fn len(&self) -> usize {
        self.0.array.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw read of position `idx` (one-based); `nil` outside the array.
    pub fn get(&self, idx: usize) -> Value {
        idx.checked_sub(1)
            .and_then(|i| self.0.array.borrow().get(i).cloned())
            .unwrap_or(Value::Nil)
    }

    /// Inserts at `idx` in `1..=len + 1`, shifting the tail up.
    pub(crate) fn insert_raw(&self, idx: usize, value: Value) {
        self.0.array.borrow_mut().insert(idx - 1, value);
    }

    pub fn push(&self, value: Value) {
        self.0.array.borrow_mut().push(value);
    }

    pub fn values(&self) -> Ref<'_, Vec<Value>> {
        self.0.array.borrow()
    }

    pub fn metatable(&self) -> Option<Metatable> {
        self.0.metatable.borrow().clone()
    }

    pub fn set_metatable(&self, mt: Option<Metatable>) {
        *self.0.metatable.borrow_mut() = mt;
    }

    pub fn ptr_eq(&self, other: &Table) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Shared host callable.
#[derive(Clone)]
pub struct Function {
    name: Option<&'static str>,
    body: Rc<dyn Fn(&[Value]) -> Result<Value>>,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "function: {}", name),
            None => write!(f, "function: {:p}", Rc::as_ptr(&self.body)),
        }
    }
}

impl Function {
    pub fn new(body: impl Fn(&[Value]) -> Result<Value> + 'static) -> Self {
        Self {
            name: None,
            body: Rc::new(body),
        }
    }

    pub fn named(name: &'static str, body: impl Fn(&[Value]) -> Result<Value> + 'static) -> Self {
        Self {
            name: Some(name),
            body: Rc::new(body),
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.body)(args)
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}
