//! Bool checker

use super::{ensure, invalid_payload, mismatch};
use crate::condition::{Condition, ConditionType};
use crate::error::Result;
use crate::value::ValueKind;

pub fn check_bool(value: bool, condition: &Condition) -> Result<()> {
    match condition.condition_type {
        ConditionType::None => Ok(()),
        ConditionType::Equal => ensure(value == parse_bool(condition)?, condition),
        ConditionType::NotEqual => ensure(value != parse_bool(condition)?, condition),
        _ => Err(mismatch(condition, ValueKind::Bool)),
    }
}

/// Accepts the usual spellings: `1 t T TRUE true True` and `0 f F FALSE false False`
fn parse_bool(condition: &Condition) -> Result<bool> {
    match condition.value.as_str() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(invalid_payload(
            condition,
            format!("'{}' is not a boolean", other),
        )),
    }
}
