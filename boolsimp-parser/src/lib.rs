//! Tokenizer and parser for boolean algebra expressions.
//!
//! Expressions use `.` (or `AND`, `&`, `*`) for conjunction, `+` (or `OR`, `|`) for disjunction,
//! and a prefix `!` (or `NOT`, `~`) for negation. Rewrite rule patterns additionally accept
//! repeating groups written in square brackets; see [`parser::Parser::new_pattern`].

pub mod parser;
pub mod tokenizer;

use parser::{ast::Expr, error::Error, Parser};

/// Parses a complete boolean expression.
pub fn parse(source: &str) -> Result<Expr, Error> {
    Parser::new(source).try_parse_full()
}

/// Parses a complete rewrite rule pattern, which may contain repeating groups.
pub fn parse_pattern(source: &str) -> Result<Expr, Error> {
    Parser::new_pattern(source).try_parse_full()
}
