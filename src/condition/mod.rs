//! Requirement language: lexing, parsing and evaluation
//!
//! This module handles parsing requirement strings like "min3 && max10"
//! and evaluating them against typed field values.

mod ast;
pub mod cache;
mod evaluator;
pub mod lexer;
pub mod parser;


pub use ast::*;
pub use cache::*;
pub use evaluator::*;
pub use parser::*;
