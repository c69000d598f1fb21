//! The expression tree every part of the simplifier operates on.
//!
//! The [`Expr`](boolsimp_parser::parser::ast::Expr) type from `boolsimp_parser` mirrors the
//! source text: binary operators are binary, parentheses are kept, and every node carries a span.
//! That is convenient for reporting errors, but not for rewriting.
//!
//! This module defines a separate [`Expr`] that **flattens** associative operators into a single
//! n-ary node. The expression `A . (B . C)` is one [`Expr::Nary`] node of kind [`NaryKind::And`]
//! with _three_ children. Variable names are normalized to uppercase during conversion.
//!
//! ```
//! use boolsimp_engine::expr::{Expr, NaryKind};
//!
//! let expr: Expr = "a . (b . c)".parse().unwrap();
//! assert_eq!(expr, Expr::Nary(NaryKind::And, vec![
//!     Expr::var("C"),
//!     Expr::var("A"),
//!     Expr::var("B"),
//! ]));
//! ```
//!
//! # Equality
//!
//! The children of an n-ary node form a **multiset**: the [`PartialEq`] and [`Hash`]
//! implementations ignore their order, so `A + B` and `B + A` are the same tree. The order is
//! still kept, and used when displaying the tree.

mod iter;

use boolsimp_error::Error;
use boolsimp_parser::parser::{
    ast::{Expr as AstExpr, Literal},
    token::op::BinOpKind,
};
use iter::ExprIter;
use std::{
    collections::{hash_map::DefaultHasher, BTreeSet, HashMap},
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The name of the constant `0` operand.
pub const FALSE: &str = "0";

/// The name of the constant `1` operand.
pub const TRUE: &str = "1";

/// The kind of an associative, commutative operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NaryKind {
    /// Conjunction, written `.`.
    And,

    /// Disjunction, written `+`.
    Or,
}

impl NaryKind {
    /// Returns the symbol used to write this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::And => ".",
            Self::Or => "+",
        }
    }

    /// Returns the binding strength of this operator; higher binds tighter.
    fn strength(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
        }
    }
}

impl From<BinOpKind> for NaryKind {
    fn from(kind: BinOpKind) -> Self {
        match kind {
            BinOpKind::And => Self::And,
            BinOpKind::Or => Self::Or,
        }
    }
}

/// A boolean expression.
///
/// A well-formed tree, as produced by [`Expr::compress`], upholds two invariants:
///
/// - every [`Expr::Nary`] node has at least two children, and
/// - no [`Expr::Nary`] node has an immediate child of the same kind.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A variable, or one of the constants [`FALSE`] and [`TRUE`].
    Operand(String),

    /// A negation.
    Not(Box<Expr>),

    /// A conjunction or disjunction of any number of children.
    Nary(NaryKind, Vec<Expr>),
}

impl Expr {
    /// Creates a variable operand. The name is used as given.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Operand(name.into())
    }

    /// Creates a constant operand.
    pub fn constant(value: bool) -> Self {
        Self::Operand(if value { TRUE } else { FALSE }.to_string())
    }

    /// Returns true if this is the constant `0` or `1`.
    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Operand(name) if name == FALSE || name == TRUE)
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter<'_> {
        ExprIter::new(self)
    }

    /// Returns the cost of the tree: the total number of nodes in it.
    pub fn cost(&self) -> usize {
        match self {
            Self::Operand(_) => 1,
            Self::Not(inner) => 1 + inner.cost(),
            Self::Nary(_, children) => 1 + children.iter().map(Self::cost).sum::<usize>(),
        }
    }

    /// Returns the number of symbols (operands, operators and parentheses) needed to write this
    /// tree, as it is displayed.
    ///
    /// `!(A + B)` has six symbols, while `!A . !B` has five.
    pub fn symbol_count(&self) -> usize {
        match self {
            Self::Operand(_) => 1,
            Self::Not(inner) => 1 + inner.symbol_count() + 2 * usize::from(inner.needs_parens_in_not()),
            Self::Nary(kind, children) => {
                let operators = children.len().saturating_sub(1);
                operators + children.iter()
                    .map(|child| child.symbol_count() + 2 * usize::from(child.needs_parens_in(*kind)))
                    .sum::<usize>()
            },
        }
    }

    /// Returns the variables used in this tree, excluding the constants.
    pub fn variables(&self) -> BTreeSet<&str> {
        self.post_order_iter()
            .filter_map(|expr| match expr {
                Self::Operand(name) if !expr.is_constant() => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Evaluates the tree under the given assignment of variables.
    ///
    /// Returns [`None`] if a variable in the tree has no value in the assignment.
    pub fn evaluate(&self, assignment: &HashMap<&str, bool>) -> Option<bool> {
        match self {
            Self::Operand(name) if name == FALSE => Some(false),
            Self::Operand(name) if name == TRUE => Some(true),
            Self::Operand(name) => assignment.get(name.as_str()).copied(),
            Self::Not(inner) => inner.evaluate(assignment).map(|value| !value),
            Self::Nary(NaryKind::And, children) => {
                let mut result = true;
                for child in children {
                    result &= child.evaluate(assignment)?;
                }
                Some(result)
            },
            Self::Nary(NaryKind::Or, children) => {
                let mut result = false;
                for child in children {
                    result |= child.evaluate(assignment)?;
                }
                Some(result)
            },
        }
    }

    /// Returns true if both trees have the same truth table over the union of their variables.
    ///
    /// This is an exhaustive check, exponential in the number of variables. Rows are numbered
    /// with a [`u64`], so [`None`] is returned if the trees have 64 or more variables between
    /// them.
    pub fn equivalent(&self, other: &Self) -> Option<bool> {
        let variables = self.variables()
            .union(&other.variables())
            .copied()
            .collect::<Vec<_>>();
        if variables.len() >= u64::BITS as usize {
            return None;
        }

        Some((0..1u64 << variables.len()).all(|row| {
            let assignment = variables.iter()
                .enumerate()
                .map(|(i, name)| (*name, row & (1 << i) != 0))
                .collect::<HashMap<_, _>>();
            self.evaluate(&assignment) == other.evaluate(&assignment)
        }))
    }

    /// Flattens nested operators of the same kind into their parent, and replaces n-ary
    /// operators left with a single child by that child.
    ///
    /// Compressing an already compressed tree returns it unchanged, in the same order.
    /// An n-ary operator with no children is left as is.
    pub fn compress(self) -> Self {
        match self {
            Self::Operand(_) => self,
            Self::Not(inner) => Self::Not(Box::new(inner.compress())),
            Self::Nary(kind, children) => {
                let mut flat = Vec::with_capacity(children.len());
                for child in children {
                    match child.compress() {
                        Self::Nary(child_kind, grandchildren) if child_kind == kind => {
                            flat.extend(grandchildren);
                        },
                        child => flat.push(child),
                    }
                }

                if flat.len() == 1 {
                    flat.remove(0)
                } else {
                    Self::Nary(kind, flat)
                }
            },
        }
    }

    /// Returns true if this tree must be parenthesized as a child of the given operator.
    fn needs_parens_in(&self, parent: NaryKind) -> bool {
        match self {
            Self::Nary(kind, _) => kind.strength() < parent.strength(),
            _ => false,
        }
    }

    /// Returns true if this tree must be parenthesized as the operand of a negation.
    fn needs_parens_in_not(&self) -> bool {
        matches!(self, Self::Nary(..))
    }
}

/// Returns true if the two slices hold the same elements, in any order.
fn multiset_eq(lhs: &[Expr], rhs: &[Expr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|left| {
        let found = rhs.iter()
            .enumerate()
            .position(|(i, right)| !used[i] && left == right);
        match found {
            Some(i) => {
                used[i] = true;
                true
            },
            None => false,
        }
    })
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Operand(lhs), Self::Operand(rhs)) => lhs == rhs,
            (Self::Not(lhs), Self::Not(rhs)) => lhs == rhs,
            (Self::Nary(lhs_kind, lhs), Self::Nary(rhs_kind, rhs)) => {
                lhs_kind == rhs_kind && multiset_eq(lhs, rhs)
            },
            _ => false,
        }
    }
}

/// [`Hash`] is implemented manually so that n-ary nodes hash the same regardless of the order of
/// their children, agreeing with [`PartialEq`].
impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Operand(name) => name.hash(state),
            Self::Not(inner) => inner.hash(state),
            Self::Nary(kind, children) => {
                kind.hash(state);
                let mut hashes = children.iter()
                    .map(|child| {
                        let mut hasher = DefaultHasher::new();
                        child.hash(&mut hasher);
                        hasher.finish()
                    })
                    .collect::<Vec<_>>();
                hashes.sort_unstable();
                hashes.hash(state);
            },
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand(name) => write!(f, "{}", name),
            Self::Not(inner) => {
                if inner.needs_parens_in_not() {
                    write!(f, "!({})", inner)
                } else {
                    write!(f, "!{}", inner)
                }
            },
            Self::Nary(kind, children) => {
                let mut iter = children.iter();
                if let Some(child) = iter.next() {
                    fmt_child(f, child, *kind)?;
                    for child in iter {
                        write!(f, " {} ", kind.symbol())?;
                        fmt_child(f, child, *kind)?;
                    }
                }
                Ok(())
            },
        }
    }
}

/// Writes a child of an n-ary operator, parenthesized if needed.
fn fmt_child(f: &mut fmt::Formatter<'_>, child: &Expr, parent: NaryKind) -> fmt::Result {
    if child.needs_parens_in(parent) {
        write!(f, "({})", child)
    } else {
        write!(f, "{}", child)
    }
}

/// Converts a parsed expression into a compressed tree, normalizing variable names to uppercase.
///
/// Repeating groups only appear in rule patterns; if one reaches this conversion, its contents are
/// treated as a parenthesized group.
impl From<AstExpr> for Expr {
    fn from(expr: AstExpr) -> Self {
        fn convert(expr: AstExpr) -> Expr {
            match expr {
                AstExpr::Literal(Literal::Bool(bool)) => Expr::constant(bool.value),
                AstExpr::Literal(Literal::Symbol(sym)) => Expr::Operand(sym.name.to_uppercase()),
                AstExpr::Paren(paren) => convert(*paren.expr),
                AstExpr::Repeat(repeat) => convert(*repeat.expr),
                AstExpr::Unary(unary) => Expr::Not(Box::new(convert(*unary.operand))),
                AstExpr::Binary(bin) => Expr::Nary(
                    bin.op.kind.into(),
                    vec![convert(*bin.lhs), convert(*bin.rhs)],
                ),
            }
        }

        convert(expr).compress()
    }
}

impl FromStr for Expr {
    type Err = Error;

    /// Parses and converts a boolean expression.
    fn from_str(source: &str) -> Result<Self, Self::Err> {
        boolsimp_parser::parse(source).map(Self::from)
    }
}
