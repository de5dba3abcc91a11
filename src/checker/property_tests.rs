//! Property tests for the per-category checkers

use proptest::prelude::*;

use crate::checker::{check, parse_time};
use crate::condition::{Condition, ConditionType};
use crate::error::ValidationError;
use crate::value::Value;
use chrono::{DateTime, Utc};

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn word_list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word_strategy(), 1..6)
}

/// Unix seconds between 1970 and 2100
fn timestamp_strategy() -> impl Strategy<Value = i64> {
    0..4_102_444_800i64
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// `min`/`max` on strings agree with the trimmed character count
    #[test]
    fn prop_string_length_bounds(s in "[ a-zé]{0,12}", bound in 0..12usize) {
        let len = s.trim().chars().count();
        let value = Value::String(s);
        let min = check(&value, &Condition::new(ConditionType::Min, bound.to_string()));
        let max = check(&value, &Condition::new(ConditionType::Max, bound.to_string()));
        prop_assert_eq!(min.is_ok(), len >= bound);
        prop_assert_eq!(max.is_ok(), len <= bound);
    }

    /// `equ` and `neq` are complementary for every category that supports them
    #[test]
    fn prop_equal_not_equal_complementary(i in any::<i64>(), n in any::<i64>()) {
        let value = Value::Int(i);
        let equal = check(&value, &Condition::new(ConditionType::Equal, n.to_string())).is_ok();
        let not_equal = check(&value, &Condition::new(ConditionType::NotEqual, n.to_string())).is_ok();
        prop_assert_ne!(equal, not_equal);
        prop_assert_eq!(equal, i == n);
    }

    /// `frm` and `nfr` are complementary for scalars
    #[test]
    fn prop_from_not_from_complementary(word in word_strategy(), list in word_list_strategy()) {
        let payload = list.join(",");
        let value = Value::String(word.clone());
        let from = check(&value, &Condition::new(ConditionType::From, payload.clone())).is_ok();
        let not_from = check(&value, &Condition::new(ConditionType::NotFrom, payload)).is_ok();
        prop_assert_ne!(from, not_from);
        prop_assert_eq!(from, list.contains(&word));
    }

    /// Every array element drawn from the list passes `frm`
    #[test]
    fn prop_array_subset_passes_from(list in word_list_strategy(), picks in prop::collection::vec(any::<prop::sample::Index>(), 0..5)) {
        let items: Vec<Value> = picks
            .iter()
            .map(|index| Value::String(index.get(&list).clone()))
            .collect();
        let condition = Condition::new(ConditionType::From, list.join(","));
        prop_assert!(check(&Value::Array(items), &condition).is_ok());
    }

    /// Array length conditions agree with the element count
    #[test]
    fn prop_array_length(len in 0..10usize, bound in 0..10usize) {
        let value = Value::Array(vec![Value::Int(1); len]);
        let equal = check(&value, &Condition::new(ConditionType::Equal, bound.to_string())).is_ok();
        let min = check(&value, &Condition::new(ConditionType::Min, bound.to_string())).is_ok();
        prop_assert_eq!(equal, len == bound);
        prop_assert_eq!(min, len >= bound);
    }

    /// Unix seconds parse back to the same instant
    #[test]
    fn prop_unix_seconds_roundtrip(secs in timestamp_strategy()) {
        let parsed = parse_time(&secs.to_string()).unwrap();
        prop_assert_eq!(parsed.timestamp(), secs);
    }

    /// RFC 3339 output of any instant is accepted and compares equal
    #[test]
    fn prop_rfc3339_roundtrip(secs in timestamp_strategy(), millis in 0..1000u32) {
        let t = DateTime::<Utc>::from_timestamp(secs, millis * 1_000_000).unwrap();
        let text = t.to_rfc3339();
        prop_assert_eq!(parse_time(&text).unwrap(), t);
        prop_assert!(check(&Value::Time(t), &Condition::new(ConditionType::Equal, text)).is_ok());
    }

    /// Non numeric thresholds are condition value errors, never plain failures
    #[test]
    fn prop_bad_threshold_is_format_error(s in "[a-z]{0,6}", bad in "[a-z]{1,4}") {
        let err = check(&Value::String(s), &Condition::new(ConditionType::Min, bad)).unwrap_err();
        let is_format_error = matches!(err, ValidationError::ConditionValue { .. });
        prop_assert!(is_format_error);
    }
}
