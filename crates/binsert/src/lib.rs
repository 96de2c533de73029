//! Bisection and binary insertion on sorted, one-based host sequences.
//!
//! `bisect(t, v[, cmp])` finds where `v` belongs in the sorted table `t`;
//! `binsert(t, v[, cmp])` also puts it there through the host's
//! `table.insert`. Both return the index.

mod bisector;
mod capability;
mod module;
mod stdlib;
#[cfg(test)]
mod tests;
mod value;

use std::fmt;

use thiserror::Error;

// crate
pub use crate::{bisector::*, capability::*, module::*, stdlib::*, value::*};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Capability an argument was expected to expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Comparable,
    Callable,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Comparable => write!(f, "comparable"),
            Capability::Callable => write!(f, "callable"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("bad argument #{arg} to '{func}' ({expected} expected, got {got})")]
    Type {
        arg: usize,
        func: &'static str,
        expected: &'static str,
        got: &'static str,
    },
    #[error("bad argument #{arg} to '{func}' ({kind} expected, got {got})")]
    Argument {
        arg: usize,
        func: &'static str,
        kind: Capability,
        got: &'static str,
    },
    #[error("bad argument #{arg} to '{func}' ({msg})")]
    BadArgument {
        arg: usize,
        func: &'static str,
        msg: &'static str,
    },
    #[error("attempt to compare {0}")]
    Compare(String),
    #[error("attempt to call a {0} value")]
    Call(&'static str),
    #[error("{0}")]
    Runtime(String),
    #[error("module init failed: {0}")]
    Init(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Runtime(s.to_string())
    }
}
