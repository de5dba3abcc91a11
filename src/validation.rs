//! Field validation: requirement checks per field plus the group quorum pass

use crate::condition::{cache, evaluate, parse, RootNode};
use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::group::{Group, Quorum};
use crate::value::Value;
use std::sync::Arc;

/// One field to validate
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub key: String,
    pub value: Value,
    pub requirement: String,
    pub groups: Vec<Group>,
    /// Validations of the fields nested in this one, checked as their own level
    pub inner: Vec<Validation>,
}

impl Validation {
    pub fn new(key: impl Into<String>, value: impl Into<Value>, requirement: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            requirement: requirement.into(),
            groups: Vec::new(),
            inner: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Add groups from a tag list like `gr1min2 gr2max1`
    pub fn with_group_tags(mut self, tags: &str) -> Result<Self> {
        self.groups.extend(Group::parse_all(tags)?);
        Ok(self)
    }

    pub fn with_inner(mut self, inner: Vec<Validation>) -> Self {
        self.inner = inner;
        self
    }
}

/// Runs requirement checks according to a [`ValidatorConfig`]
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    fn root_for(&self, requirement: &str) -> Result<Arc<RootNode>> {
        if self.config.cache_requirements {
            cache::get_or_parse(requirement)
        } else {
            parse(requirement).map(Arc::new)
        }
    }

    /// Check one value against one requirement
    pub fn check(&self, value: &Value, requirement: &str) -> Result<()> {
        let root = self.root_for(requirement)?;
        evaluate(value, &root)
    }

    /// Validate a set of fields, then the quorum of every group they belong to
    ///
    /// A field without groups fails the whole call on its first error. Fields
    /// with groups only contribute their outcome to the group tallies.
    pub fn validate(&self, validations: &[Validation]) -> Result<()> {
        let mut quorum = Quorum::new();

        for validation in validations {
            let outcome = self.validate_field(validation);

            if validation.groups.is_empty() {
                outcome?;
            } else {
                quorum.record(&validation.groups, &outcome);
            }
        }

        quorum.check()
    }

    fn validate_field(&self, validation: &Validation) -> Result<()> {
        let result = self
            .check(&validation.value, &validation.requirement)
            .and_then(|()| self.validate(&validation.inner));

        if let Err(err) = &result {
            tracing::debug!(key = %validation.key, error = %err, "field validation failed");
        }

        result.map_err(|err| err.for_field(validation.key.clone()))
    }
}
