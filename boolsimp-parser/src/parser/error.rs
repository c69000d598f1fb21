//! Error kinds produced while tokenizing and parsing.
//!
//! [`UnrecognizedSymbol`] is the only lexical error; every other kind describes a malformed
//! sequence of tokens.

use ariadne::Fmt;
use boolsimp_attrs::ErrorKind;
use boolsimp_error::EXPR;
use crate::tokenizer::TokenKind;

pub use boolsimp_error::Error;

/// A character that does not begin any token.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unrecognized symbol `{}`", self.symbol),
    labels = ["this symbol"],
    help = format!(
        "expressions are made of variables, {}, {}, and the operators `.` `+` `!` (or `AND` `OR` `NOT`)",
        "0".fg(EXPR),
        "1".fg(EXPR),
    ),
)]
pub struct UnrecognizedSymbol {
    /// The offending text.
    pub symbol: String,
}

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "operand".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An operator or closing delimiter appeared where an operand was expected, such as the dangling
/// operator in `A .` or the leading operator in `+ B`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected an operand",
    labels = [format!("I expected to see a variable, `0`, `1`, or a {} here", "group".fg(EXPR))],
)]
pub struct ExpectedOperand;

/// Two operands appeared next to each other, as in `A B`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operator between operands",
    labels = ["this operand follows another operand"],
    help = format!("add {} or {} before it", "`.` (AND)".fg(EXPR), "`+` (OR)".fg(EXPR)),
)]
pub struct MissingOperator;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", self.expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", self.found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if self.opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A repeating group `[` was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed repeating group",
    labels = ["this bracket is not closed"],
    help = "add a closing bracket `]` somewhere after this",
)]
pub struct UnclosedBracket;

/// There was no pattern inside a repeating group.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing pattern inside repeating group",
    labels = ["add a pattern here"],
)]
pub struct EmptyBracket;

/// A repeating group was used in a plain expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "repeating groups are only allowed in rule patterns",
    labels = ["this group"],
    help = format!("use {} to group an expression", "parentheses".fg(EXPR)),
)]
pub struct RepeatOutsidePattern;
