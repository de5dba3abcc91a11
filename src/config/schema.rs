//! Field schema structures

use crate::value::ValueKind;
use serde::Deserialize;

/// Requirement declaration for one document field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldSchema {
    pub key: String,
    pub kind: ValueKind,
    /// Requirement string, `-` when omitted
    #[serde(default = "default_requirement")]
    pub requirement: String,
    /// Group tags like `gr1min2`
    #[serde(default)]
    pub groups: Vec<String>,
    /// Nested fields of a `map` field
    #[serde(default)]
    pub inner: Vec<FieldSchema>,
}

fn default_requirement() -> String {
    "-".to_string()
}

/// A list of field declarations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Schema {
    pub fields: Vec<FieldSchema>,
}
