//! Decoding of variant-typed replies into plain Rust values.
//!
//! Properties and prompt results arrive as variants. Some daemons wrap them
//! once more, so every helper peels nested `Value::Value` layers first.

use secretbus_core::Attributes;
use secretbus_core::constants::ROOT_PATH;
use zvariant::{ObjectPath, OwnedObjectPath, Value};

use crate::error::{Error, Result};

fn peel<'v, 'a>(value: &'v Value<'a>) -> &'v Value<'a> {
    match value {
        Value::Value(inner) => peel(inner),
        other => other,
    }
}

fn unexpected(what: &str, expected: &str) -> Error {
    Error::Protocol(format!("{what} is not {expected}"))
}

pub(crate) fn to_bool(value: &Value<'_>, what: &str) -> Result<bool> {
    match peel(value) {
        Value::Bool(b) => Ok(*b),
        _ => Err(unexpected(what, "a boolean")),
    }
}

pub(crate) fn to_u64(value: &Value<'_>, what: &str) -> Result<u64> {
    match peel(value) {
        Value::U64(n) => Ok(*n),
        _ => Err(unexpected(what, "a u64")),
    }
}

pub(crate) fn to_string(value: &Value<'_>, what: &str) -> Result<String> {
    match peel(value) {
        Value::Str(s) => Ok(s.as_str().to_owned()),
        _ => Err(unexpected(what, "a string")),
    }
}

pub(crate) fn to_bytes(value: &Value<'_>, what: &str) -> Result<Vec<u8>> {
    match peel(value) {
        Value::Array(arr) => arr
            .iter()
            .map(|v| match v {
                Value::U8(b) => Ok(*b),
                _ => Err(unexpected(what, "a byte array")),
            })
            .collect(),
        _ => Err(unexpected(what, "a byte array")),
    }
}

pub(crate) fn to_object_path(value: &Value<'_>, what: &str) -> Result<OwnedObjectPath> {
    match peel(value) {
        Value::ObjectPath(path) => Ok(OwnedObjectPath::from(path.clone())),
        _ => Err(unexpected(what, "an object path")),
    }
}

pub(crate) fn to_object_paths(value: &Value<'_>, what: &str) -> Result<Vec<OwnedObjectPath>> {
    match peel(value) {
        Value::Array(arr) => arr
            .iter()
            .map(|v| to_object_path(v, what))
            .collect(),
        _ => Err(unexpected(what, "an object path array")),
    }
}

pub(crate) fn to_attributes(value: &Value<'_>, what: &str) -> Result<Attributes> {
    let Value::Dict(dict) = peel(value) else {
        return Err(unexpected(what, "a string dictionary"));
    };
    dict.iter()
        .map(|(k, v)| match (peel(k), peel(v)) {
            (Value::Str(k), Value::Str(v)) => Ok((k.as_str().to_owned(), v.as_str().to_owned())),
            _ => Err(unexpected(what, "a string dictionary")),
        })
        .collect()
}

/// `/` is the service's "no object" sentinel.
pub(crate) fn is_root(path: &ObjectPath<'_>) -> bool {
    path.as_str() == ROOT_PATH
}
