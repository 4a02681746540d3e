use crate::error::{BillingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single value stored in a [`Bundle`].
///
/// Serialized untagged, so a bundle reads as a plain JSON object. An empty
/// JSON array deserializes as an empty `StringArray`. Any other JSON value
/// (`null`, floats, objects, mixed arrays) is kept as `Unsupported` and
/// rejected by every typed getter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BundleValue {
    Bool(bool),
    Int(i32),
    String(String),
    StringArray(Vec<String>),
    BundleArray(Vec<Bundle>),
    Unsupported(serde_json::Value),
}

impl BundleValue {
    fn type_name(&self) -> &'static str {
        match self {
            BundleValue::Bool(_) => "bool",
            BundleValue::Int(_) => "int",
            BundleValue::String(_) => "string",
            BundleValue::StringArray(_) => "string array",
            BundleValue::BundleArray(_) => "bundle array",
            BundleValue::Unsupported(_) => "unsupported value",
        }
    }
}

/// Flat key-value map carrying command arguments and responses across the
/// process boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle(BTreeMap<String, BundleValue>);

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&BundleValue> {
        self.0.get(key)
    }

    pub fn put_bool(&mut self, key: &str, value: bool) {
        self.0.insert(key.to_string(), BundleValue::Bool(value));
    }

    pub fn put_int(&mut self, key: &str, value: i32) {
        self.0.insert(key.to_string(), BundleValue::Int(value));
    }

    pub fn put_string(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), BundleValue::String(value.into()));
    }

    pub fn put_string_array(&mut self, key: &str, value: Vec<String>) {
        self.0.insert(key.to_string(), BundleValue::StringArray(value));
    }

    pub fn put_bundle_array(&mut self, key: &str, value: Vec<Bundle>) {
        self.0.insert(key.to_string(), BundleValue::BundleArray(value));
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        match self.require(key)? {
            BundleValue::Bool(value) => Ok(*value),
            other => Err(wrong_type(key, "bool", other)),
        }
    }

    pub fn get_int(&self, key: &str) -> Result<i32> {
        match self.require(key)? {
            BundleValue::Int(value) => Ok(*value),
            other => Err(wrong_type(key, "int", other)),
        }
    }

    pub fn get_string(&self, key: &str) -> Result<&str> {
        match self.require(key)? {
            BundleValue::String(value) => Ok(value.as_str()),
            other => Err(wrong_type(key, "string", other)),
        }
    }

    pub fn get_string_array(&self, key: &str) -> Result<&[String]> {
        match self.require(key)? {
            BundleValue::StringArray(value) => Ok(value.as_slice()),
            other => Err(wrong_type(key, "string array", other)),
        }
    }

    /// Nested bundles. An empty string array is accepted as an empty list,
    /// since the two are indistinguishable once serialized.
    pub fn get_bundle_array(&self, key: &str) -> Result<&[Bundle]> {
        match self.require(key)? {
            BundleValue::BundleArray(value) => Ok(value.as_slice()),
            BundleValue::StringArray(value) if value.is_empty() => Ok(&[][..]),
            other => Err(wrong_type(key, "bundle array", other)),
        }
    }

    fn require(&self, key: &str) -> Result<&BundleValue> {
        self.0
            .get(key)
            .ok_or_else(|| BillingError::MissingArgument(key.to_string()))
    }
}

fn wrong_type(key: &str, expected: &'static str, found: &BundleValue) -> BillingError {
    log::trace!("{} holds a {}, expected {}", key, found.type_name(), expected);
    BillingError::WrongArgumentType {
        key: key.to_string(),
        expected,
    }
}
