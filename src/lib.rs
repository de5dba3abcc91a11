//! reqtag - declarative field requirement validation
//!
//! Field values are checked against short requirement strings such as
//! `min3 && max10` or `(equ'a' || equ'b') frma,b,c`. A requirement is lexed,
//! parsed into a condition tree and evaluated with per-category semantics for
//! strings, numbers, bools, arrays, maps and times. Fields can also be tagged
//! with groups (`gr1min2`) that bound how many member fields must pass.
//!
//! ```
//! use reqtag::{check, Value};
//!
//! assert!(check(&Value::from("apple"), "min3 max10").is_ok());
//! assert!(check(&Value::from("apple"), "equ'banana' || equ'cherry'").is_err());
//! ```

pub mod checker;
pub mod condition;
pub mod config;
pub mod error;
pub mod group;
pub mod validation;
pub mod value;

pub use crate::condition::{parse, AstNode, AstValue, Condition, ConditionType, Operator, RootNode};
pub use crate::config::{Schema, ValidatorConfig};
pub use crate::error::{ParseError, ParseErrorKind, Result, ValidationError};
pub use crate::group::Group;
pub use crate::validation::{Validation, Validator};
pub use crate::value::{Value, ValueKind};

/// Check a value against a requirement with the default validator
pub fn check(value: &Value, requirement: &str) -> Result<()> {
    Validator::default().check(value, requirement)
}

/// Validate a set of fields with the default validator
pub fn validate(validations: &[Validation]) -> Result<()> {
    Validator::default().validate(validations)
}
