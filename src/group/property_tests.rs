//! Property tests for group quorum

use proptest::prelude::*;

use crate::condition::ConditionType;
use crate::error::{Result, ValidationError};
use crate::group::{Group, Quorum};

/// A tally only exists once a member is recorded, so every group has one
fn outcomes_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 1..12)
}

fn outcome(passed: bool) -> Result<()> {
    if passed {
        Ok(())
    } else {
        Err(ValidationError::Failed {
            condition: ConditionType::Equal,
            value: "x".to_string(),
        })
    }
}

proptest! {
    /// Group tags round-trip through Display
    #[test]
    fn prop_group_tag_roundtrip(name in "[a-z0-9]{1,6}", is_min in any::<bool>(), threshold in 0..100usize) {
        let condition_type = if is_min { ConditionType::Min } else { ConditionType::Max };
        let group = Group::new(name, condition_type, threshold);
        prop_assert_eq!(Group::parse(&group.to_string()).unwrap(), group);
    }

    /// Quorum verdict follows passed = size - errors
    #[test]
    fn prop_quorum_verdict(outcomes in outcomes_strategy(), threshold in 0..12usize, is_min in any::<bool>()) {
        let condition_type = if is_min { ConditionType::Min } else { ConditionType::Max };
        let groups = vec![Group::new("g", condition_type, threshold)];
        let mut quorum = Quorum::new();
        for passed in &outcomes {
            quorum.record(&groups, &outcome(*passed));
        }

        let passed = outcomes.iter().filter(|p| **p).count();
        let expected_ok = if is_min { passed >= threshold } else { passed <= threshold };
        prop_assert_eq!(quorum.check().is_ok(), expected_ok);
    }
}
