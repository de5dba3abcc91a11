//! Array and map checkers
//!
//! `equ`/`neq`/`min`/`max` compare the collection length. Membership style
//! conditions compare the textual form of array elements, or map keys.

use super::{ensure, membership, mismatch, parse_payload, regex_payload, split_list};
use crate::condition::{Condition, ConditionType};
use crate::error::Result;
use crate::value::{Value, ValueKind};
use std::collections::BTreeMap;

pub fn check_array(items: &[Value], condition: &Condition) -> Result<()> {
    let len = items.len();

    match condition.condition_type {
        ConditionType::None => Ok(()),
        ConditionType::Equal => check_length(condition, |n| len == n),
        ConditionType::NotEqual => check_length(condition, |n| len != n),
        ConditionType::Min => check_length(condition, |n| len >= n),
        ConditionType::Max => check_length(condition, |n| len <= n),
        ConditionType::Contains | ConditionType::NotContains => {
            let found = items.iter().any(|item| item.to_string() == condition.value);
            ensure(contains_outcome(condition, found), condition)
        }
        ConditionType::From | ConditionType::NotFrom => {
            let all = items.iter().all(|item| {
                let text = item.to_string();
                membership(condition, split_list(&condition.value).any(|allowed| allowed == text))
            });
            ensure(all, condition)
        }
        ConditionType::Regex => {
            let re = regex_payload(condition)?;
            ensure(items.iter().all(|item| re.is_match(&item.to_string())), condition)
        }
    }
}

pub fn check_map(entries: &BTreeMap<String, Value>, condition: &Condition) -> Result<()> {
    let len = entries.len();

    match condition.condition_type {
        ConditionType::None => Ok(()),
        ConditionType::Equal => check_length(condition, |n| len == n),
        ConditionType::NotEqual => check_length(condition, |n| len != n),
        ConditionType::Min => check_length(condition, |n| len >= n),
        ConditionType::Max => check_length(condition, |n| len <= n),
        ConditionType::Contains | ConditionType::NotContains => {
            let found = entries.contains_key(&condition.value);
            ensure(contains_outcome(condition, found), condition)
        }
        ConditionType::From | ConditionType::NotFrom => {
            let all = entries.keys().all(|key| {
                membership(condition, split_list(&condition.value).any(|allowed| allowed == key))
            });
            ensure(all, condition)
        }
        ConditionType::Regex => Err(mismatch(condition, ValueKind::Map)),
    }
}

/// Compare the collection length against the numeric payload
fn check_length(condition: &Condition, compare: impl FnOnce(usize) -> bool) -> Result<()> {
    let n: usize = parse_payload(condition)?;
    ensure(compare(n), condition)
}

#[inline]
fn contains_outcome(condition: &Condition, found: bool) -> bool {
    match condition.condition_type {
        ConditionType::NotContains => !found,
        _ => found,
    }
}
