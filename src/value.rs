//! Runtime values.

use std::collections::HashMap;
use std::fmt;
use std::io::prelude::*;
use std::rc::Rc;

use crate::ast::Block;
use crate::env::Env;
use crate::eval::RuntimeError;

/// A value produced by evaluation.
///
/// `Display` is the render form shown to the user: integers and booleans
/// as literals, strings unquoted, `null`, and composite values in their
/// literal syntax.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Str(String),
    Null,
    Array(Vec<Value>),
    Hash(HashMap<HashKey, HashPair>),
    Function(Rc<Function>),
    Builtin(Builtin),
}

/// Fieldless mirror of `Value`, used in error messages.
///
/// `Display` renders the uppercase kind name (`INTEGER`, `STRING`, ...).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ValueKind {
    Integer,
    Boolean,
    Str,
    Null,
    Array,
    Hash,
    Function,
    Builtin,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "INTEGER",
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::Str => "STRING",
            ValueKind::Null => "NULL",
            ValueKind::Array => "ARRAY",
            ValueKind::Hash => "HASH",
            ValueKind::Function => "FUNCTION",
            ValueKind::Builtin => "BUILTIN",
        };
        f.write_str(name)
    }
}

/// Key of a hash map entry: the value kind plus a 64-bit digest.
///
/// Only integers, booleans, and strings are hashable. Distinct kinds
/// never collide because the kind tag is part of the key.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct HashKey {
    kind: ValueKind,
    digest: u64,
}

/// A hash map entry. The original key value is kept next to the digest
/// so iteration can render it.
#[derive(Debug, PartialEq, Clone)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

/// A user-defined function together with the environment captured at the
/// point of its literal's evaluation.
#[derive(Debug)]
pub struct Function {
    pub params: Vec<String>,
    pub body: Block,
    pub env: Rc<Env>,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn({}) {{\n{}\n}}", self.params.join(", "), self.body)
    }
}

/// A host-implemented callable. The output sink is threaded through so
/// `puts` writes wherever the interpreter's host pointed it.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: fn(&mut dyn Write, &[Value]) -> Result<Value, RuntimeError>,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Str(_) => ValueKind::Str,
            Value::Null => ValueKind::Null,
            Value::Array(_) => ValueKind::Array,
            Value::Hash(_) => ValueKind::Hash,
            Value::Function(_) => ValueKind::Function,
            Value::Builtin(_) => ValueKind::Builtin,
        }
    }

    /// Truthiness in conditional position: `false` and `null` are falsy,
    /// every other value (including `0` and `""`) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            _ => true,
        }
    }

    /// The hashable-key capability. `None` for kinds that cannot be used
    /// as map keys.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(i) => Some(HashKey {
                kind: ValueKind::Integer,
                digest: *i as u64,
            }),
            Value::Boolean(b) => Some(HashKey {
                kind: ValueKind::Boolean,
                digest: *b as u64,
            }),
            Value::Str(s) => Some(HashKey {
                kind: ValueKind::Str,
                digest: fnv1a(s.as_bytes()),
            }),
            _ => None,
        }
    }
}

/// FNV-1a, 64-bit.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET_BASIS, |hash, &b| (hash ^ b as u64).wrapping_mul(PRIME))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(l), Value::Integer(r)) => l == r,
            (Value::Boolean(l), Value::Boolean(r)) => l == r,
            (Value::Str(l), Value::Str(r)) => l == r,
            (Value::Null, Value::Null) => true,
            (Value::Array(l), Value::Array(r)) => l == r,
            (Value::Hash(l), Value::Hash(r)) => l == r,
            (Value::Function(l), Value::Function(r)) => Rc::ptr_eq(l, r),
            (Value::Builtin(l), Value::Builtin(r)) => l == r,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{}", s),
            Value::Null => write!(f, "null"),
            Value::Array(elements) => {
                let elements = elements.iter().map(Value::to_string).collect::<Vec<_>>();
                write!(f, "[{}]", elements.join(", "))
            }
            Value::Hash(pairs) => {
                let pairs = pairs
                    .values()
                    .map(|p| format!("{}: {}", p.key, p.value))
                    .collect::<Vec<_>>();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Value::Function(func) => write!(f, "{}", func),
            Value::Builtin(_) => write!(f, "builtin function"),
        }
    }
}
