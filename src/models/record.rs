//! Parsed certdata objects

use std::collections::BTreeMap;

/// Attribute naming the object class
pub const CKA_CLASS: &str = "CKA_CLASS";
/// Attribute carrying the quoted object label
pub const CKA_LABEL: &str = "CKA_LABEL";
/// Attribute carrying the DER certificate bytes
pub const CKA_VALUE: &str = "CKA_VALUE";

/// Value of a single record attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Literal text after the type tag, quotes included
    Scalar(String),
    /// Bytes decoded from a `MULTILINE_OCTAL` block
    Binary(Vec<u8>),
}

impl Value {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(text) => Some(text),
            Value::Binary(_) => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(bytes) => Some(bytes),
            Value::Scalar(_) => None,
        }
    }
}

/// Kind of object, taken from `CKA_CLASS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectClass {
    Certificate,
    Trust,
    Other(String),
}

impl ObjectClass {
    pub fn from_token(token: &str) -> Self {
        match token {
            "CKO_CERTIFICATE" => ObjectClass::Certificate,
            "CKO_NSS_TRUST" => ObjectClass::Trust,
            other => ObjectClass::Other(other.to_string()),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            ObjectClass::Certificate => "CKO_CERTIFICATE",
            ObjectClass::Trust => "CKO_NSS_TRUST",
            ObjectClass::Other(token) => token,
        }
    }
}

impl std::fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// One object from the database: attribute name to value.
///
/// Records are only built by the parser and are never modified after they
/// are handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Scalar text of a field, `None` when absent or binary
    pub fn scalar(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_scalar)
    }

    /// Bytes of a field, `None` when absent or scalar
    pub fn binary(&self, field: &str) -> Option<&[u8]> {
        self.get(field).and_then(Value::as_binary)
    }

    /// Object class, `None` only for records the parser never hands out
    pub fn class(&self) -> Option<ObjectClass> {
        self.scalar(CKA_CLASS).map(ObjectClass::from_token)
    }

    pub fn label(&self) -> Option<&str> {
        self.scalar(CKA_LABEL)
    }

    pub fn is_certificate(&self) -> bool {
        self.class() == Some(ObjectClass::Certificate)
    }

    pub fn is_trust(&self) -> bool {
        self.class() == Some(ObjectClass::Trust)
    }
}
