//! Per value category condition checkers
//!
//! Every checker takes one concrete value and one condition and returns
//! `Ok(())` when the value satisfies it. A condition of type `-` or with an
//! empty payload always passes.

mod boolean;
mod collection;
mod number;
mod string;
mod time;

#[cfg(test)]
mod property_tests;

pub use boolean::check_bool;
pub use collection::{check_array, check_map};
pub use number::{check_float, check_int};
pub use string::check_string;
pub use time::{check_time, parse_time};

use crate::condition::cache;
use crate::condition::{Condition, ConditionType};
use crate::error::{Result, ValidationError};
use crate::value::{Value, ValueKind};
use regex::Regex;
use std::str::FromStr;

/// Check a value against a single condition, dispatching on its category
pub fn check(value: &Value, condition: &Condition) -> Result<()> {
    if condition.is_noop() {
        return Ok(());
    }

    match value {
        Value::String(s) => check_string(s, condition),
        Value::Int(i) => check_int(*i, condition),
        Value::Float(x) => check_float(*x, condition),
        Value::Bool(b) => check_bool(*b, condition),
        Value::Array(items) => check_array(items, condition),
        Value::Map(entries) => check_map(entries, condition),
        Value::Time(t) => check_time(t, condition),
    }
}

/// Turn a boolean outcome into a validation result
#[inline]
pub(crate) fn ensure(passed: bool, condition: &Condition) -> Result<()> {
    if passed {
        Ok(())
    } else {
        Err(ValidationError::Failed {
            condition: condition.condition_type,
            value: condition.value.clone(),
        })
    }
}

pub(crate) fn mismatch(condition: &Condition, kind: ValueKind) -> ValidationError {
    ValidationError::TypeMismatch {
        condition: condition.condition_type,
        kind,
    }
}

pub(crate) fn invalid_payload(condition: &Condition, reason: impl ToString) -> ValidationError {
    ValidationError::ConditionValue {
        condition: condition.condition_type,
        value: condition.value.clone(),
        reason: reason.to_string(),
    }
}

/// Parse the whole condition payload
pub(crate) fn parse_payload<T>(condition: &Condition) -> Result<T>
where
    T: FromStr,
    T::Err: ToString,
{
    condition
        .value
        .parse::<T>()
        .map_err(|e| invalid_payload(condition, e))
}

/// Parse the comma separated payload of `frm`/`nfr`
pub(crate) fn parse_list<T>(condition: &Condition) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: ToString,
{
    split_list(&condition.value)
        .map(|item| item.parse::<T>().map_err(|e| invalid_payload(condition, e)))
        .collect()
}

#[inline]
pub(crate) fn split_list(payload: &str) -> impl Iterator<Item = &str> {
    payload.split(',')
}

/// Compile the payload of a `rgx` condition, reusing cached patterns
pub(crate) fn regex_payload(condition: &Condition) -> Result<Regex> {
    cache::get_or_compile_regex(&condition.value).map_err(|e| invalid_payload(condition, e))
}

/// `frm`/`nfr` membership outcome for a single item
#[inline]
pub(crate) fn membership(condition: &Condition, found: bool) -> bool {
    match condition.condition_type {
        ConditionType::NotFrom => !found,
        _ => found,
    }
}
