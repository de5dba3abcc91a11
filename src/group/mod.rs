//! Cross-field group quorum
//!
//! Fields can be tagged with groups like `gr1min2`: group `1` needs at least
//! two passing member fields. `max` bounds the number of passing members.

mod quorum;

#[cfg(test)]
mod property_tests;

pub use quorum::*;

use crate::condition::ConditionType;
use crate::error::{Result, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static GROUP_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^gr(?P<name>.+?)(?P<condition>min|max)(?P<threshold>[0-9]+)$")
        .unwrap_or_else(|e| unreachable!("group tag pattern is valid: {}", e))
});

/// A named group membership with its quorum rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub condition_type: ConditionType,
    pub threshold: usize,
}

impl Group {
    pub fn new(name: impl Into<String>, condition_type: ConditionType, threshold: usize) -> Self {
        Self {
            name: name.into(),
            condition_type,
            threshold,
        }
    }

    /// Parse a `gr<name><min|max><threshold>` tag
    pub fn parse(tag: &str) -> Result<Self> {
        let invalid = || ValidationError::InvalidGroupTag(tag.to_string());
        let caps = GROUP_TAG.captures(tag.trim()).ok_or_else(invalid)?;

        let condition_type = caps["condition"].parse::<ConditionType>().map_err(|_| invalid())?;
        let threshold = caps["threshold"].parse::<usize>().map_err(|_| invalid())?;

        Ok(Self::new(&caps["name"], condition_type, threshold))
    }

    /// Parse a whitespace separated list of group tags
    pub fn parse_all(tags: &str) -> Result<Vec<Self>> {
        tags.split_whitespace().map(Group::parse).collect()
    }

    /// Same quorum rule, ignoring the name
    pub fn same_rule(&self, other: &Group) -> bool {
        self.condition_type == other.condition_type && self.threshold == other.threshold
    }
}

impl FromStr for Group {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        Group::parse(s)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gr{}{}{}", self.name, self.condition_type, self.threshold)
    }
}
