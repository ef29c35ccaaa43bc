//! Host-implemented callable values.
//!
//! All misuse comes back as a `RuntimeError` value, never out-of-band.
//! `puts` writes to the output sink the interpreter's host injected,
//! which is threaded through every builtin call.

use std::io::prelude::*;

use crate::eval::RuntimeError;
use crate::value::{Builtin, Value};

/// Look a name up in the builtins table.
///
/// The evaluator consults this after the environment chain, so user
/// bindings may shadow builtins.
pub fn lookup(name: &str) -> Option<Builtin> {
    match name {
        "len" => Some(Builtin { name: "len", func: len }),
        "first" => Some(Builtin { name: "first", func: first }),
        "last" => Some(Builtin { name: "last", func: last }),
        "rest" => Some(Builtin { name: "rest", func: rest }),
        "push" => Some(Builtin { name: "push", func: push }),
        "puts" => Some(Builtin { name: "puts", func: puts }),
        _ => None,
    }
}

fn single(args: &[Value]) -> Result<&Value, RuntimeError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(RuntimeError::WrongArgumentCount {
            got: args.len(),
            want: 1,
        }),
    }
}

/// Byte length of a string or element count of an array.
fn len(_out: &mut dyn Write, args: &[Value]) -> Result<Value, RuntimeError> {
    match single(args)? {
        Value::Str(s) => Ok(Value::Integer(s.len() as i64)),
        Value::Array(elements) => Ok(Value::Integer(elements.len() as i64)),
        other => Err(RuntimeError::UnsupportedArgument("len", other.kind())),
    }
}

fn first(_out: &mut dyn Write, args: &[Value]) -> Result<Value, RuntimeError> {
    match single(args)? {
        Value::Array(elements) => Ok(elements.first().cloned().unwrap_or(Value::Null)),
        other => Err(RuntimeError::ArgumentMustBeArray("first", other.kind())),
    }
}

fn last(_out: &mut dyn Write, args: &[Value]) -> Result<Value, RuntimeError> {
    match single(args)? {
        Value::Array(elements) => Ok(elements.last().cloned().unwrap_or(Value::Null)),
        other => Err(RuntimeError::ArgumentMustBeArray("last", other.kind())),
    }
}

/// Newly allocated array holding everything but the first element;
/// `null` when the source is empty.
fn rest(_out: &mut dyn Write, args: &[Value]) -> Result<Value, RuntimeError> {
    match single(args)? {
        Value::Array(elements) => {
            if elements.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(Value::Array(elements[1..].to_vec()))
            }
        }
        other => Err(RuntimeError::ArgumentMustBeArray("rest", other.kind())),
    }
}

/// Newly allocated copy of the array with the second argument appended;
/// the original is untouched.
fn push(_out: &mut dyn Write, args: &[Value]) -> Result<Value, RuntimeError> {
    match args {
        [Value::Array(elements), item] => {
            let mut extended = elements.clone();
            extended.push(item.clone());
            Ok(Value::Array(extended))
        }
        [other, _] => Err(RuntimeError::ArgumentMustBeArray("push", other.kind())),
        _ => Err(RuntimeError::WrongArgumentCount {
            got: args.len(),
            want: 2,
        }),
    }
}

/// Print each argument's render form on its own line; yields `null`.
fn puts(out: &mut dyn Write, args: &[Value]) -> Result<Value, RuntimeError> {
    for arg in args {
        writeln!(out, "{}", arg)?;
    }
    Ok(Value::Null)
}
