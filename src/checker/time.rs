//! Time checker and time string parsing

use super::{ensure, invalid_payload, membership, mismatch, split_list};
use crate::condition::{Condition, ConditionType};
use crate::error::Result;
use crate::value::ValueKind;
use chrono::{DateTime, NaiveDateTime, Utc};

/// `YYYY-MM-DDTHH:MM:SS.ffffff`
const MICROS_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const MICROS_LAYOUT_LEN: usize = 26;
/// `YYYY-MM-DDTHH:MM:SS.fff`
const MILLIS_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f";
const MILLIS_LAYOUT_LEN: usize = 23;

/// Parse a time string
///
/// Formats are tried in order: all digits as Unix seconds, RFC 3339 with or
/// without fractional seconds, then the zone-less microsecond and millisecond
/// layouts, which are read as UTC.
pub fn parse_time(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        return s
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .ok_or_else(|| format!("unix time '{}' is out of range", s));
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }

    let layout = match s.len() {
        MICROS_LAYOUT_LEN => Some(MICROS_LAYOUT),
        MILLIS_LAYOUT_LEN => Some(MILLIS_LAYOUT),
        _ => None,
    };
    if let Some(layout) = layout {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return Ok(naive.and_utc());
        }
    }

    Err(format!("unsupported time format '{}'", s))
}

fn parse_time_payload(condition: &Condition, s: &str) -> Result<DateTime<Utc>> {
    parse_time(s).map_err(|reason| invalid_payload(condition, reason))
}

/// `min` means not before the bound and `max` means not after it
pub fn check_time(value: &DateTime<Utc>, condition: &Condition) -> Result<()> {
    match condition.condition_type {
        ConditionType::None => Ok(()),
        ConditionType::Equal => {
            let expected = parse_time_payload(condition, &condition.value)?;
            ensure(*value == expected, condition)
        }
        ConditionType::NotEqual => {
            let expected = parse_time_payload(condition, &condition.value)?;
            ensure(*value != expected, condition)
        }
        ConditionType::Min => {
            let bound = parse_time_payload(condition, &condition.value)?;
            ensure(*value >= bound, condition)
        }
        ConditionType::Max => {
            let bound = parse_time_payload(condition, &condition.value)?;
            ensure(*value <= bound, condition)
        }
        ConditionType::From | ConditionType::NotFrom => {
            let list = split_list(&condition.value)
                .map(|item| parse_time_payload(condition, item))
                .collect::<Result<Vec<_>>>()?;
            let found = list.contains(value);
            ensure(membership(condition, found), condition)
        }
        ConditionType::Contains | ConditionType::NotContains | ConditionType::Regex => {
            Err(mismatch(condition, ValueKind::Time))
        }
    }
}
