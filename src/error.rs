//! Error types for requirement parsing and validation

use crate::condition::{ConditionType, Operator};
use crate::value::ValueKind;
use std::fmt::Display;
use thiserror::Error;

/// Grammar violations found while parsing one requirement string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("illegal token '{0}'")]
    IllegalToken(String),

    #[error("expected '(' or condition type, got '{0}'")]
    ExpectedGroupOpen(String),

    #[error("malformed group near '{0}'")]
    MalformedGroup(String),

    #[error("unknown condition type '{0}'")]
    UnknownConditionType(String),

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("empty {0} value")]
    EmptyConditionValue(ConditionType),

    #[error("operator '{0}' before any condition in group")]
    LeadingOperator(Operator),

    #[error("operator '{0}' follows another operator")]
    ConsecutiveOperator(Operator),

    #[error("operator '{0}' is not followed by a condition")]
    DanglingOperator(Operator),

    #[error("unclosed group")]
    UnclosedGroup,

    #[error("empty group")]
    EmptyGroup,

    #[error("unexpected ')'")]
    UnexpectedGroupClose,
}

/// A single parse diagnostic with its byte range in the requirement
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {start}..{end}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub start: usize,
    pub end: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }
}

/// Main error type for requirement validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("invalid requirement '{requirement}': {}", join(.errors))]
    Parse {
        requirement: String,
        errors: Vec<ParseError>,
    },

    #[error("condition {condition} is not supported for {kind} values")]
    TypeMismatch {
        condition: ConditionType,
        kind: ValueKind,
    },

    #[error("invalid {condition} condition value '{value}': {reason}")]
    ConditionValue {
        condition: ConditionType,
        value: String,
        reason: String,
    },

    #[error("value does not satisfy {condition} '{value}'")]
    Failed {
        condition: ConditionType,
        value: String,
    },

    #[error("no condition fulfilled: [{}]", join(.0))]
    NoConditionFulfilled(Vec<ValidationError>),

    #[error(
        "group '{group}' requires {condition} {threshold} passing fields, got {passed}: [{}]",
        join(.errors)
    )]
    Quorum {
        group: String,
        condition: ConditionType,
        threshold: usize,
        passed: usize,
        errors: Vec<ValidationError>,
    },

    #[error("invalid group tag '{0}'")]
    InvalidGroupTag(String),

    #[error("group condition {0} is not supported, expected min or max")]
    UnsupportedGroupCondition(ConditionType),

    #[error("invalid {kind} value: {reason}")]
    InvalidValue { kind: ValueKind, reason: String },

    #[error("field '{key}': {source}")]
    Field {
        key: String,
        source: Box<ValidationError>,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ValidationError {
    /// Wrap this error with the key of the field it was raised for
    pub fn for_field(self, key: impl Into<String>) -> Self {
        ValidationError::Field {
            key: key.into(),
            source: Box::new(self),
        }
    }

    /// Strip any `Field` wrappers and return the underlying error
    pub fn root(&self) -> &ValidationError {
        match self {
            ValidationError::Field { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::Config(err.to_string())
    }
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for requirement validation
pub type Result<T> = std::result::Result<T, ValidationError>;
