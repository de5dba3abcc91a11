//! Requirement string parser
//!
//! Recursive descent over the lexer's token stream with two tokens of
//! lookahead:
//!
//! ```text
//! Validation := Group
//! Group      := GroupOpen GroupBody GroupClose | GroupBody
//! GroupBody  := Element (Operator Element)*
//! Element    := Group | Condition
//! Condition  := ConditionType ConditionValue
//! ```
//!
//! The top level is always an implicit group body. An operator is attached to
//! the element that precedes it, so it describes the link to the next sibling.

use crate::condition::ast::{AstNode, AstValue, Condition, ConditionType, Operator, RootNode};
use crate::condition::lexer::{Lexer, Token, TokenKind};
use crate::error::{ParseError, ParseErrorKind, Result, ValidationError};
use std::mem;

/// Parse a requirement string into an AST
///
/// Every diagnostic found during the parse is reported together.
pub fn parse(requirement: &str) -> Result<RootNode> {
    let mut parser = Parser::new(requirement);
    let root = parser.parse_validation();

    match root {
        Some(value) if parser.errors.is_empty() => Ok(RootNode::new(value)),
        _ => {
            tracing::debug!(
                requirement,
                errors = parser.errors.len(),
                "failed to parse requirement"
            );
            Err(ValidationError::Parse {
                requirement: requirement.to_string(),
                errors: parser.errors,
            })
        }
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(requirement: &'a str) -> Self {
        let mut lexer = Lexer::new(requirement);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current = mem::replace(&mut self.peek, next);
    }

    fn error(&mut self, kind: ParseErrorKind, start: usize, end: usize) {
        self.errors.push(ParseError::new(kind, start, end));
    }

    fn error_at_current(&mut self, kind: ParseErrorKind) {
        let (start, end) = (self.current.start, self.current.end);
        self.error(kind, start, end);
    }

    fn parse_validation(&mut self) -> Option<AstValue> {
        if self.current.kind == TokenKind::EmptyRequirement {
            let empty = AstValue::new(AstNode::Empty, self.current.start, self.current.end);
            self.advance();
            while self.current.kind != TokenKind::Eof {
                let literal = self.current.literal.clone();
                self.error_at_current(ParseErrorKind::MalformedGroup(literal));
                self.advance();
            }
            return Some(empty);
        }

        match self.current.kind {
            // Illegal tokens are reported by the group body
            TokenKind::GroupOpen
            | TokenKind::ConditionType
            | TokenKind::Operator
            | TokenKind::Illegal => {}
            _ => {
                let literal = self.current.literal.clone();
                self.error_at_current(ParseErrorKind::ExpectedGroupOpen(literal));
                self.advance();
            }
        }

        let start = self.current.start;
        self.parse_group_body(None, start)
    }

    /// Parse elements until the closing parenthesis, or the end of input when
    /// `open` is `None` (the implicit top level group)
    fn parse_group_body(&mut self, open: Option<&Token>, start: usize) -> Option<AstValue> {
        let mut children: Vec<AstValue> = Vec::new();
        let mut end = start;

        loop {
            match self.current.kind {
                TokenKind::Eof => {
                    if let Some(open) = open {
                        self.error(ParseErrorKind::UnclosedGroup, open.start, open.end);
                    }
                    end = children.last().map_or(end, |last| last.end);
                    break;
                }
                TokenKind::GroupClose => {
                    if open.is_some() {
                        end = self.current.end;
                        self.advance();
                        break;
                    }
                    self.error_at_current(ParseErrorKind::UnexpectedGroupClose);
                    self.advance();
                }
                TokenKind::GroupOpen => {
                    let open_token = self.current.clone();
                    self.advance();
                    if let Some(group) = self.parse_group_body(Some(&open_token), open_token.start) {
                        children.push(group);
                    }
                }
                TokenKind::ConditionType => {
                    if let Some(condition) = self.parse_condition() {
                        children.push(condition);
                    }
                }
                TokenKind::Operator => {
                    self.attach_operator(&mut children);
                    self.advance();
                }
                TokenKind::Illegal => {
                    let literal = self.current.literal.clone();
                    self.error_at_current(ParseErrorKind::IllegalToken(literal));
                    self.advance();
                }
                TokenKind::ConditionValue | TokenKind::EmptyRequirement => {
                    let literal = self.current.literal.clone();
                    self.error_at_current(ParseErrorKind::MalformedGroup(literal));
                    self.advance();
                }
            }
        }

        if let Some(last) = children.last_mut() {
            if let Some(operator) = last.operator.take() {
                let (last_start, last_end) = (last.start, last.end);
                self.error(ParseErrorKind::DanglingOperator(operator), last_start, last_end);
            }
        }

        if children.is_empty() {
            if open.is_some() {
                self.error(ParseErrorKind::EmptyGroup, start, end);
            }
            return None;
        }

        let start = if open.is_some() { start } else { children[0].start };
        Some(AstValue::new(AstNode::Group(children), start, end))
    }

    /// Attach the current operator token to the most recently appended element
    fn attach_operator(&mut self, children: &mut [AstValue]) {
        let operator = match self.current.literal.parse::<Operator>() {
            Ok(operator) => operator,
            Err(literal) => {
                self.error_at_current(ParseErrorKind::UnknownOperator(literal));
                return;
            }
        };

        match children.last_mut() {
            None => self.error_at_current(ParseErrorKind::LeadingOperator(operator)),
            Some(last) if last.operator.is_some() => {
                self.error_at_current(ParseErrorKind::ConsecutiveOperator(operator))
            }
            Some(last) => last.operator = Some(operator),
        }
    }

    fn parse_condition(&mut self) -> Option<AstValue> {
        let tag = self.current.clone();
        let condition_type = match tag.literal.parse::<ConditionType>() {
            Ok(condition_type) => Some(condition_type),
            Err(literal) => {
                self.error(ParseErrorKind::UnknownConditionType(literal), tag.start, tag.end);
                None
            }
        };

        if self.peek.kind != TokenKind::ConditionValue {
            if let Some(condition_type) = condition_type {
                self.error(
                    ParseErrorKind::EmptyConditionValue(condition_type),
                    tag.start,
                    tag.end,
                );
            }
            self.advance();
            return None;
        }

        self.advance();
        let value = self.current.clone();
        self.advance();

        condition_type.map(|condition_type| {
            AstValue::new(
                AstNode::Condition(Condition::new(condition_type, value.literal)),
                tag.start,
                value.end,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::ast::AstKind;

    fn parse_errors(requirement: &str) -> Vec<ParseErrorKind> {
        match parse(requirement) {
            Err(ValidationError::Parse { errors, .. }) => {
                errors.into_iter().map(|e| e.kind).collect()
            }
            other => panic!("Expected parse error for {}, got {:?}", requirement, other),
        }
    }

    fn condition_of(value: &AstValue) -> &Condition {
        match &value.node {
            AstNode::Condition(condition) => condition,
            other => panic!("Expected condition, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_condition() {
        let root = parse("equvalid").unwrap();
        assert_eq!(root.value.kind(), AstKind::Group);
        let children = root.value.children();
        assert_eq!(children.len(), 1);
        assert_eq!(
            condition_of(&children[0]),
            &Condition::new(ConditionType::Equal, "valid")
        );
        assert_eq!(root.to_string(), "equ'valid'");
    }

    #[test]
    fn test_implicit_top_level_group() {
        let root = parse("min3 max10").unwrap();
        let children = root.value.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].operator, None);
        assert_eq!(children[1].operator, None);
        assert_eq!(root.to_string(), "min'3' max'10'");
    }

    #[test]
    fn test_operator_links_to_next_sibling() {
        let root = parse("min1 || max2 && min3").unwrap();
        let children = root.value.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].operator, Some(Operator::Or));
        assert_eq!(children[1].operator, Some(Operator::And));
        assert_eq!(children[2].operator, None);
    }

    #[test]
    fn test_parse_nested_groups() {
        let root = parse("(min1 && (max2 || min3)) || (min4 && max5)").unwrap();
        let top = root.value.children();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].kind(), AstKind::Group);
        assert_eq!(top[0].operator, Some(Operator::Or));
        assert_eq!(top[1].kind(), AstKind::Group);
        assert_eq!(top[1].operator, None);

        let first = top[0].children();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].operator, Some(Operator::And));
        assert_eq!(first[1].kind(), AstKind::Group);
        assert_eq!(first[1].children()[0].operator, Some(Operator::Or));
        assert_eq!(
            condition_of(&first[1].children()[1]),
            &Condition::new(ConditionType::Min, "3")
        );

        assert_eq!(
            root.to_string(),
            "(min'1' && (max'2' || min'3')) || (min'4' && max'5')"
        );
    }

    #[test]
    fn test_parse_empty_requirement() {
        let root = parse("-").unwrap();
        assert_eq!(root.value.kind(), AstKind::Empty);
        assert_eq!(root.to_string(), "-");
    }

    #[test]
    fn test_parse_escaped_quote() {
        let root = parse("equ'O/'Brien'").unwrap();
        assert_eq!(
            condition_of(&root.value.children()[0]),
            &Condition::new(ConditionType::Equal, "O'Brien")
        );
        assert_eq!(root.to_string(), "equ'O/'Brien'");
    }

    #[test]
    fn test_parse_from_list() {
        let root = parse("frma,b,c").unwrap();
        assert_eq!(
            condition_of(&root.value.children()[0]),
            &Condition::new(ConditionType::From, "a,b,c")
        );
    }

    #[test]
    fn test_operator_before_condition_is_invalid() {
        assert_eq!(
            parse_errors("&& min3"),
            vec![ParseErrorKind::LeadingOperator(Operator::And)]
        );
        assert_eq!(
            parse_errors("min1 && (|| max2)"),
            vec![ParseErrorKind::LeadingOperator(Operator::Or)]
        );
    }

    #[test]
    fn test_unknown_condition_type() {
        assert_eq!(
            parse_errors("fun3"),
            vec![ParseErrorKind::UnknownConditionType("fun".to_string())]
        );
    }

    #[test]
    fn test_non_ascii_tag_is_unknown_condition_type() {
        assert_eq!(
            parse_errors("équ1"),
            vec![ParseErrorKind::UnknownConditionType("équ".to_string())]
        );
    }

    #[test]
    fn test_unknown_operator() {
        assert_eq!(
            parse_errors("min1 &| max2"),
            vec![ParseErrorKind::UnknownOperator("&|".to_string())]
        );
    }

    #[test]
    fn test_empty_condition_value() {
        assert_eq!(
            parse_errors("min"),
            vec![ParseErrorKind::EmptyConditionValue(ConditionType::Min)]
        );
        assert_eq!(
            parse_errors("(max) min1"),
            vec![
                ParseErrorKind::EmptyConditionValue(ConditionType::Max),
                ParseErrorKind::EmptyGroup,
            ]
        );
    }

    #[test]
    fn test_errors_are_accumulated() {
        let errors = parse_errors("fun1 && min # max");
        assert_eq!(
            errors,
            vec![
                ParseErrorKind::UnknownConditionType("fun".to_string()),
                ParseErrorKind::LeadingOperator(Operator::And),
                ParseErrorKind::EmptyConditionValue(ConditionType::Min),
                ParseErrorKind::IllegalToken("#".to_string()),
                ParseErrorKind::EmptyConditionValue(ConditionType::Max),
            ]
        );
    }

    #[test]
    fn test_unbalanced_groups() {
        assert_eq!(parse_errors("(min1"), vec![ParseErrorKind::UnclosedGroup]);
        assert_eq!(
            parse_errors("min1)"),
            vec![ParseErrorKind::UnexpectedGroupClose]
        );
        assert_eq!(parse_errors("()"), vec![ParseErrorKind::EmptyGroup]);
    }

    #[test]
    fn test_operator_misuse() {
        assert_eq!(
            parse_errors("min1 &&"),
            vec![ParseErrorKind::DanglingOperator(Operator::And)]
        );
        assert_eq!(
            parse_errors("min1 && || max2"),
            vec![ParseErrorKind::ConsecutiveOperator(Operator::Or)]
        );
    }

    #[test]
    fn test_empty_string_is_invalid() {
        assert_eq!(
            parse_errors(""),
            vec![ParseErrorKind::ExpectedGroupOpen(String::new())]
        );
    }

    #[test]
    fn test_trailing_slash_value_survives_reparse() {
        let first = parse("conhttp://").unwrap();
        assert_eq!(first.to_string(), "conhttp://");
        let second = parse(&first.to_string()).unwrap();
        assert!(first.same_shape(&second));
        assert_eq!(
            condition_of(&second.value.children()[0]),
            &Condition::new(ConditionType::Contains, "http://")
        );
    }

    #[test]
    fn test_spans() {
        let root = parse("min3 (max10)").unwrap();
        let children = root.value.children();
        assert_eq!((children[0].start, children[0].end), (0, 4));
        assert_eq!((children[1].start, children[1].end), (5, 12));
        assert_eq!((root.value.start, root.value.end), (0, 12));
    }

    #[test]
    fn test_reparse_is_structurally_identical() {
        for requirement in [
            "equvalid",
            "min3 max10",
            "(min1 || max2) && (min3 || max4)",
            "equ'a b' || nco'x/'y'",
            "rgx^[a-z]+$",
            "conhttp://",
            "(nco'x' || equa'b/) max9",
            "-",
        ] {
            let first = parse(requirement).unwrap();
            let second = parse(&first.to_string()).unwrap();
            assert!(
                first.same_shape(&second),
                "Re-parse changed shape for: {}",
                requirement
            );
            assert_eq!(first.to_string(), second.to_string());
        }
    }
}
