//! Configuration module for validators and field schemas
//!
//! This module handles deserialization of validator settings and of JSON
//! field schemas, and turns a schema plus a JSON document into validations.

mod schema;
mod validator;

pub use schema::*;
pub use validator::*;

use crate::error::{Result, ValidationError};
use crate::group::Group;
use crate::validation::{Validation, Validator};
use crate::value::{Value, ValueKind};
use serde_json::Map;

/// Deserialize validator settings
/// Expected format: {"cache_requirements": true}
pub fn deserialize_validator_config(json: &str) -> Result<ValidatorConfig> {
    Ok(serde_json::from_str(json)?)
}

/// Deserialize a field schema
/// Expected format: {"fields": [{"key": ..., "kind": ..., "requirement": ..., "groups": [...], "inner": [...]}]}
pub fn deserialize_schema(json: &str) -> Result<Schema> {
    let schema: Schema = serde_json::from_str(json)?;
    for field in &schema.fields {
        check_field_schema(field)?;
    }
    Ok(schema)
}

fn check_field_schema(field: &FieldSchema) -> Result<()> {
    if !field.inner.is_empty() && field.kind != ValueKind::Map {
        return Err(ValidationError::Config(format!(
            "field '{}' declares inner fields but is of kind {}",
            field.key, field.kind
        )));
    }
    for tag in &field.groups {
        Group::parse(tag).map_err(|e| e.for_field(field.key.clone()))?;
    }
    field.inner.iter().try_for_each(check_field_schema)
}

impl Schema {
    /// Build the validations for a JSON object document
    pub fn validations(&self, document: &serde_json::Value) -> Result<Vec<Validation>> {
        let object = document.as_object().ok_or_else(|| ValidationError::InvalidValue {
            kind: ValueKind::Map,
            reason: "document must be a JSON object".to_string(),
        })?;
        extract_fields(&self.fields, object)
    }

    /// Validate a JSON object document
    pub fn validate(&self, validator: &Validator, document: &serde_json::Value) -> Result<()> {
        let validations = self.validations(document)?;
        validator.validate(&validations)
    }
}

fn extract_fields(
    fields: &[FieldSchema],
    object: &Map<String, serde_json::Value>,
) -> Result<Vec<Validation>> {
    fields
        .iter()
        .map(|field| extract_field(field, object))
        .collect()
}

/// Absent or null fields take the zero value of their kind
fn extract_field(field: &FieldSchema, object: &Map<String, serde_json::Value>) -> Result<Validation> {
    let json = object.get(&field.key).filter(|json| !json.is_null());

    let value = match json {
        Some(json) => Value::from_json(json, field.kind).map_err(|e| e.for_field(field.key.clone()))?,
        None => Value::zero(field.kind),
    };

    let groups = field
        .groups
        .iter()
        .map(|tag| Group::parse(tag))
        .collect::<Result<Vec<_>>>()
        .map_err(|e| e.for_field(field.key.clone()))?;

    let inner = if field.inner.is_empty() {
        Vec::new()
    } else {
        let empty = Map::new();
        let nested = json.and_then(|json| json.as_object()).unwrap_or(&empty);
        extract_fields(&field.inner, nested).map_err(|e| e.for_field(field.key.clone()))?
    };

    Ok(Validation {
        key: field.key.clone(),
        value,
        requirement: field.requirement.clone(),
        groups,
        inner,
    })
}
