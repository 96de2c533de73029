use std::cmp::Ordering;

use crate::{value::compare_int_float, Capability, Error, Function, Result, Value};

/// A value that can stand on the left of a comparison.
#[derive(Debug)]
pub enum Comparable<'a> {
    Primitive(&'a Value),
    CustomOrdered(&'a Value),
}

impl<'a> Comparable<'a> {
    /// Numbers and strings are comparable as-is. Tables need an `__lt` or
    /// `__le` metamethod.
    pub fn check(func: &'static str, arg: usize, value: &'a Value) -> Result<Self> {
        match value {
            Value::Integer(_) | Value::Number(_) | Value::String(_) => {
                Ok(Comparable::Primitive(value))
            }
            _ => match value.metatable() {
                Some(mt) if mt.le.is_some() || mt.lt.is_some() => {
                    Ok(Comparable::CustomOrdered(value))
                }
                _ => Err(Error::Argument {
                    arg,
                    func,
                    kind: Capability::Comparable,
                    got: value.type_name(),
                }),
            },
        }
    }

    pub fn value(&self) -> &'a Value {
        match *self {
            Comparable::Primitive(v) | Comparable::CustomOrdered(v) => v,
        }
    }
}

/// A value that can be called as a comparator.
#[derive(Debug)]
pub enum Callable<'a> {
    Function(&'a Function),
    CustomCallable(&'a Value),
}

impl<'a> Callable<'a> {
    pub fn check(func: &'static str, arg: usize, value: &'a Value) -> Result<Self> {
        match value {
            Value::Function(f) => Ok(Callable::Function(f)),
            _ => match value.metatable() {
                Some(mt) if mt.call.is_some() => Ok(Callable::CustomCallable(value)),
                _ => Err(Error::Argument {
                    arg,
                    func,
                    kind: Capability::Callable,
                    got: value.type_name(),
                }),
            },
        }
    }
}

/// Comparison predicate resolved once before a search.
#[derive(Debug)]
pub enum Comparator<'a> {
    LessThan,
    Custom(Callable<'a>),
}

impl<'a> Comparator<'a> {
    /// An absent or `nil` comparator falls back to [`less_than`].
    pub fn resolve(func: &'static str, arg: usize, cmp: Option<&'a Value>) -> Result<Self> {
        match cmp {
            None | Some(Value::Nil) => Ok(Comparator::LessThan),
            Some(v) => Callable::check(func, arg, v).map(Comparator::Custom),
        }
    }

    /// `compare(a, b)`, with custom results read by truthiness.
    pub fn compare(&self, a: &Value, b: &Value) -> Result<bool> {
        match self {
            Comparator::LessThan => less_than(a, b),
            Comparator::Custom(Callable::Function(f)) => {
                Ok(f.call(&[a.clone(), b.clone()])?.is_truthy())
            }
            Comparator::Custom(Callable::CustomCallable(v)) => {
                Ok(v.call(&[a.clone(), b.clone()])?.is_truthy())
            }
        }
    }
}

fn compare_numbers(a: &Value, b: &Value) -> Option<Option<Ordering>> {
    let ord = match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => x.partial_cmp(y),
        (Value::Integer(x), Value::Number(y)) => compare_int_float(*x, *y),
        (Value::Number(x), Value::Integer(y)) => {
            compare_int_float(*y, *x).map(Ordering::reverse)
        }
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y),
        _ => return None,
    };
    Some(ord)
}

/// The host's `<`.
///
/// Numbers compare numerically and strings bytewise. Anything else goes
/// through `__lt` of `a`, then of `b`. `__le` is not consulted.
pub fn less_than(a: &Value, b: &Value) -> Result<bool> {
    if let Some(ord) = compare_numbers(a, b) {
        return Ok(ord == Some(Ordering::Less));
    }
    if let (Value::String(x), Value::String(y)) = (a, b) {
        return Ok(x.as_bytes() < y.as_bytes());
    }
    let lt = a
        .metatable()
        .and_then(|mt| mt.lt)
        .or_else(|| b.metatable().and_then(|mt| mt.lt));
    match lt {
        Some(f) => Ok(f.call(&[a.clone(), b.clone()])?.is_truthy()),
        None => {
            let (ta, tb) = (a.type_name(), b.type_name());
            Err(Error::Compare(if ta == tb {
                format!("two {} values", ta)
            } else {
                format!("{} with {}", ta, tb)
            }))
        }
    }
}
