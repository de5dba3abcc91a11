//! Condition evaluator
//!
//! Walks a parsed requirement and applies the AND/OR rules: a failing element
//! fails the whole group immediately unless the operator governing it is
//! `||` (its own operator for the first element, the previous element's for
//! the rest). OR-governed failures are deferred, and the group only fails when
//! every element failed.

use crate::checker;
use crate::condition::ast::{AstNode, AstValue, Operator, RootNode};
use crate::error::{Result, ValidationError};
use crate::value::Value;
use smallvec::SmallVec;

/// Evaluate a parsed requirement against a value
pub fn evaluate(value: &Value, root: &RootNode) -> Result<()> {
    evaluate_node(value, &root.value)
}

/// Evaluate a single AST element against a value
pub fn evaluate_node(value: &Value, node: &AstValue) -> Result<()> {
    match &node.node {
        AstNode::Empty => Ok(()),
        AstNode::Condition(condition) => checker::check(value, condition),
        AstNode::Group(children) => evaluate_group(value, children),
    }
}

fn evaluate_group(value: &Value, children: &[AstValue]) -> Result<()> {
    let mut deferred: SmallVec<[ValidationError; 4]> = SmallVec::new();

    for (i, child) in children.iter().enumerate() {
        let result = match &child.node {
            AstNode::Empty => return Ok(()),
            AstNode::Group(grandchildren) => evaluate_group(value, grandchildren),
            AstNode::Condition(condition) => checker::check(value, condition),
        };

        if let Err(err) = result {
            let governing = if i == 0 {
                child.operator
            } else {
                children[i - 1].operator
            };

            if governing == Some(Operator::Or) {
                tracing::trace!(index = i, error = %err, "deferring or-joined failure");
                deferred.push(err);
            } else {
                return Err(err);
            }
        }
    }

    if !children.is_empty() && deferred.len() >= children.len() {
        return Err(ValidationError::NoConditionFulfilled(deferred.into_vec()));
    }

    Ok(())
}
