//! Integer and float checkers

use super::{ensure, membership, mismatch, parse_list, parse_payload, regex_payload};
use crate::condition::{Condition, ConditionType};
use crate::error::Result;
use crate::value::ValueKind;
use std::fmt::Display;
use std::str::FromStr;

pub fn check_int(value: i64, condition: &Condition) -> Result<()> {
    check_number(value, condition, ValueKind::Int)
}

pub fn check_float(value: f64, condition: &Condition) -> Result<()> {
    check_number(value, condition, ValueKind::Float)
}

/// Shared numeric semantics; the payload is parsed as the value's own type
fn check_number<T>(value: T, condition: &Condition, kind: ValueKind) -> Result<()>
where
    T: FromStr + PartialOrd + Display + Copy,
    T::Err: ToString,
{
    match condition.condition_type {
        ConditionType::None => Ok(()),
        ConditionType::Equal => {
            let expected: T = parse_payload(condition)?;
            ensure(value == expected, condition)
        }
        ConditionType::NotEqual => {
            let expected: T = parse_payload(condition)?;
            ensure(value != expected, condition)
        }
        ConditionType::Min => {
            let min: T = parse_payload(condition)?;
            ensure(value >= min, condition)
        }
        ConditionType::Max => {
            let max: T = parse_payload(condition)?;
            ensure(value <= max, condition)
        }
        ConditionType::From | ConditionType::NotFrom => {
            let list: Vec<T> = parse_list(condition)?;
            let found = list.iter().any(|item| *item == value);
            ensure(membership(condition, found), condition)
        }
        ConditionType::Regex => {
            let re = regex_payload(condition)?;
            ensure(re.is_match(&value.to_string()), condition)
        }
        ConditionType::Contains | ConditionType::NotContains => Err(mismatch(condition, kind)),
    }
}
