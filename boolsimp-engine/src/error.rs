//! Errors produced by the engine.
//!
//! None of these can be caused by user input. Pattern errors and [`CatalogError`] come from a
//! malformed rule definition and are reported when the catalog is built; [`EngineError`] is an
//! invariant violation found while substituting during a search.

use ariadne::Fmt;
use boolsimp_attrs::ErrorKind;
use boolsimp_error::{Error, EXPR};
use crate::expr::NaryKind;
use std::fmt;

/// An `Items` name was used outside of a repeating group.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`Items{}` used outside of a repeating group", self.name),
    labels = ["this name"],
    help = format!("wrap it in square brackets, like {}", format!("[Items{}]", self.name).fg(EXPR)),
)]
pub struct ItemsOutsideRepeat {
    /// The name of the repeating wildcard, without the `Items` prefix.
    pub name: String,
}

/// A wildcard identifier has no name after its prefix.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "wildcard has no name",
    labels = ["add a name after the prefix here"],
)]
pub struct UnnamedWildcard;

/// A repeating group does not use any `Items` name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "repeating group does not name its elements",
    labels = ["this group"],
    help = format!("use an `Items` name inside the group, like {}", "[ItemsA]".fg(EXPR)),
)]
pub struct RepeatWithoutItems;

/// A repeating group uses more than one distinct `Items` name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "repeating group names its elements more than once",
    labels = ["this group", "first name", "second name"],
)]
pub struct AmbiguousRepeat;

/// A repeating group is not an operand of an AND or OR operator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "repeating group must be an operand of `.` or `+`",
    labels = ["this group"],
)]
pub struct RepeatOutsideOperator;

/// Two repeating groups are operands of the same operator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an operator can only have one repeating group",
    labels = ["first group", "second group"],
)]
pub struct MultipleRepeats;

/// A plain wildcard shares its name with a repeating wildcard.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`Item{}` shares its name with a repeating group", self.name),
    labels = ["this wildcard", "this group"],
)]
pub struct RepeatNameReused {
    /// The shared name.
    pub name: String,
}

/// A repeating wildcard is declared twice in a left-hand pattern.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("repeating group `Items{}` is declared twice", self.name),
    labels = ["first declaration", "second declaration"],
)]
pub struct DuplicateRepeat {
    /// The repeated name.
    pub name: String,
}

/// A replacement pattern uses a wildcard the left-hand pattern never binds.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not bound by the left-hand pattern", self.name),
    labels = ["this wildcard"],
)]
pub struct UnboundRuleWildcard {
    /// The wildcard as written.
    pub name: String,
}

/// Which side of a rule an error was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The pattern that is matched against a tree.
    Left,

    /// The pattern a matched tree is rewritten to.
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left-hand"),
            Self::Right => write!(f, "right-hand"),
        }
    }
}

/// A built-in rule could not be built.
#[derive(Debug)]
pub struct CatalogError {
    /// The position of the rule in the catalog.
    pub index: usize,

    /// The description of the rule.
    pub description: &'static str,

    /// The side of the rule the error was found in.
    pub side: Side,

    /// The pattern source the spans of [`CatalogError::error`] point into.
    pub source: &'static str,

    /// The underlying error.
    pub error: Error,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule #{} ({}) has an invalid {} pattern `{}`",
            self.index, self.description, self.side, self.source,
        )
    }
}

impl std::error::Error for CatalogError {}

/// An invariant violation found while rebuilding a tree from a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A wildcard in the replacement has no binding in the match.
    UnboundWildcard(String),

    /// A repeating group appeared somewhere other than as an operand of an n-ary operator.
    MisplacedRepeating(String),

    /// An n-ary operator was left with no children at all.
    EmptyOperator(NaryKind),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundWildcard(name) => write!(f, "wildcard `{}` has no binding", name),
            Self::MisplacedRepeating(name) => {
                write!(f, "repeating group `{}` is not an operand of an operator", name)
            },
            Self::EmptyOperator(kind) => {
                write!(f, "`{}` operator has no operands after substitution", kind.symbol())
            },
        }
    }
}

impl std::error::Error for EngineError {}
