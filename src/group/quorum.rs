//! Group quorum evaluation

use super::Group;
use crate::condition::ConditionType;
use crate::error::{Result, ValidationError};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Results collected for one group across its member fields
#[derive(Debug, Clone)]
pub struct GroupTally {
    pub group: Group,
    pub size: usize,
    pub errors: Vec<ValidationError>,
}

impl GroupTally {
    pub fn new(group: Group) -> Self {
        Self {
            group,
            size: 0,
            errors: Vec::new(),
        }
    }

    pub fn passed(&self) -> usize {
        self.size.saturating_sub(self.errors.len())
    }

    /// Check the quorum rule against the collected results
    pub fn check(&self) -> Result<()> {
        let passed = self.passed();
        let threshold = self.group.threshold;
        let failed = match self.group.condition_type {
            ConditionType::Min => passed < threshold,
            ConditionType::Max => passed > threshold,
            other => return Err(ValidationError::UnsupportedGroupCondition(other)),
        };

        if failed {
            tracing::debug!(
                group = %self.group.name,
                condition = %self.group.condition_type,
                threshold,
                passed,
                "group quorum not met"
            );
            return Err(ValidationError::Quorum {
                group: self.group.name.clone(),
                condition: self.group.condition_type,
                threshold,
                passed,
                errors: self.errors.clone(),
            });
        }

        Ok(())
    }
}

/// Per-group tallies, visited in group name order
#[derive(Debug, Clone, Default)]
pub struct Quorum {
    tallies: BTreeMap<String, GroupTally>,
}

impl Quorum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one member field's outcome in each of its groups
    ///
    /// A group named more than once by the same field counts that field once.
    pub fn record(&mut self, groups: &[Group], outcome: &Result<()>) {
        let mut seen: SmallVec<[&str; 4]> = SmallVec::new();

        for group in groups {
            if seen.contains(&group.name.as_str()) {
                continue;
            }
            seen.push(&group.name);

            let tally = self
                .tallies
                .entry(group.name.clone())
                .or_insert_with(|| GroupTally::new(group.clone()));

            if !tally.group.same_rule(group) {
                tracing::warn!(
                    group = %group.name,
                    kept = %tally.group,
                    ignored = %group,
                    "conflicting group rule, keeping the first declaration"
                );
            }

            tally.size += 1;
            if let Err(err) = outcome {
                tally.errors.push(err.clone());
            }
        }
    }

    pub fn tally(&self, name: &str) -> Option<&GroupTally> {
        self.tallies.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Check every group, returning the first failure in name order
    pub fn check(&self) -> Result<()> {
        for tally in self.tallies.values() {
            tally.check()?;
        }
        Ok(())
    }
}

/// Check quorum rules from precomputed group sizes and member errors
///
/// Groups missing from `sizes` count as empty.
pub fn check_groups(
    groups: &BTreeMap<String, Group>,
    sizes: &BTreeMap<String, usize>,
    errors: &BTreeMap<String, Vec<ValidationError>>,
) -> Result<()> {
    for (name, group) in groups {
        let tally = GroupTally {
            group: group.clone(),
            size: sizes.get(name).copied().unwrap_or(0),
            errors: errors.get(name).cloned().unwrap_or_default(),
        };
        tally.check()?;
    }
    Ok(())
}
