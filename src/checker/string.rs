//! String checker

use super::{ensure, membership, parse_payload, regex_payload, split_list};
use crate::condition::{Condition, ConditionType};
use crate::error::Result;

/// Check a string; `min`/`max` bound the character count of the trimmed string
pub fn check_string(value: &str, condition: &Condition) -> Result<()> {
    let expected = condition.value.as_str();

    match condition.condition_type {
        ConditionType::None => Ok(()),
        ConditionType::Equal => ensure(value == expected, condition),
        ConditionType::NotEqual => ensure(value != expected, condition),
        ConditionType::Min => {
            let min: usize = parse_payload(condition)?;
            ensure(value.trim().chars().count() >= min, condition)
        }
        ConditionType::Max => {
            let max: usize = parse_payload(condition)?;
            ensure(value.trim().chars().count() <= max, condition)
        }
        ConditionType::Contains => ensure(value.contains(expected), condition),
        ConditionType::NotContains => ensure(!value.contains(expected), condition),
        ConditionType::From | ConditionType::NotFrom => {
            let found = split_list(expected).any(|item| item == value);
            ensure(membership(condition, found), condition)
        }
        ConditionType::Regex => {
            let re = regex_payload(condition)?;
            ensure(re.is_match(value), condition)
        }
    }
}
