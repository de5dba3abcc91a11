//! Requirement string tokenizer
//!
//! The lexer is context sensitive: a character that directly follows a
//! condition type tag is always read as the start of a condition value, so
//! `equapple` lexes as the tag `equ` followed by the value `apple`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Illegal,
    Eof,
    GroupOpen,
    GroupClose,
    ConditionType,
    ConditionValue,
    Operator,
    EmptyRequirement,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Illegal => "illegal",
            TokenKind::Eof => "end of requirement",
            TokenKind::GroupOpen => "group open",
            TokenKind::GroupClose => "group close",
            TokenKind::ConditionType => "condition type",
            TokenKind::ConditionValue => "condition value",
            TokenKind::Operator => "operator",
            TokenKind::EmptyRequirement => "empty requirement",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: usize,
    /// Byte offsets into the requirement string
    pub start: usize,
    pub end: usize,
}

impl Token {
    fn new(kind: TokenKind, literal: impl Into<String>, line: usize, start: usize, end: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
            start,
            end,
        }
    }
}

/// Condition type tags are at most this many letters
const CONDITION_TYPE_LEN: usize = 3;

const QUOTE: char = '\'';
const ESCAPE: char = '/';

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    last_kind: Option<TokenKind>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
            last_kind: None,
            finished: false,
        }
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Produce the next token; returns `Eof` forever once the input is exhausted
    pub fn next_token(&mut self) -> Token {
        let token = self.read_token();
        self.last_kind = Some(token.kind);
        token
    }

    fn read_token(&mut self) -> Token {
        // Value mode only applies when the value is adjacent to its tag
        if self.last_kind == Some(TokenKind::ConditionType) {
            match self.peek_char() {
                Some(QUOTE) => return self.read_quoted_value(),
                Some(c) if !c.is_whitespace() && c != ')' => return self.read_value(),
                _ => {}
            }
        }

        self.skip_whitespace();

        let start = self.position;
        let Some(c) = self.bump() else {
            return Token::new(TokenKind::Eof, "", self.line, start, start);
        };

        match c {
            '-' => Token::new(TokenKind::EmptyRequirement, "-", self.line, start, self.position),
            '(' => Token::new(TokenKind::GroupOpen, "(", self.line, start, self.position),
            ')' => Token::new(TokenKind::GroupClose, ")", self.line, start, self.position),
            '&' | '|' => {
                if matches!(self.peek_char(), Some('&' | '|')) {
                    self.bump();
                }
                let literal = &self.input[start..self.position];
                Token::new(TokenKind::Operator, literal, self.line, start, self.position)
            }
            QUOTE => {
                // A quoted value that does not follow a tag is still read whole
                self.position = start;
                self.read_quoted_value()
            }
            c if c.is_alphabetic() => {
                let mut count = 1;
                while count < CONDITION_TYPE_LEN {
                    match self.peek_char() {
                        Some(next) if next.is_alphabetic() => {
                            self.bump();
                            count += 1;
                        }
                        _ => break,
                    }
                }
                let literal = &self.input[start..self.position];
                Token::new(TokenKind::ConditionType, literal, self.line, start, self.position)
            }
            _ => {
                let literal = &self.input[start..self.position];
                Token::new(TokenKind::Illegal, literal, self.line, start, self.position)
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !c.is_whitespace() {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.bump();
        }
    }

    fn read_value(&mut self) -> Token {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || c == ')' {
                break;
            }
            self.bump();
        }
        let literal = &self.input[start..self.position];
        Token::new(TokenKind::ConditionValue, literal, self.line, start, self.position)
    }

    /// Read `'...'`, unescaping `/'` to `'`; an unterminated quote runs to the end
    fn read_quoted_value(&mut self) -> Token {
        let start = self.position;
        let line = self.line;
        self.bump();

        let mut literal = String::new();
        while let Some(c) = self.bump() {
            match c {
                QUOTE => break,
                ESCAPE if self.peek_char() == Some(QUOTE) => {
                    self.bump();
                    literal.push(QUOTE);
                }
                '\n' => {
                    self.line += 1;
                    literal.push(c);
                }
                _ => literal.push(c),
            }
        }

        Token::new(TokenKind::ConditionValue, literal, line, start, self.position)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token up to and including the first `Eof`
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

/// Tokenize a whole requirement string
pub fn tokenize(requirement: &str) -> Vec<Token> {
    Lexer::new(requirement).collect()
}
