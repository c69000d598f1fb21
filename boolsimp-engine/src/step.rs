//! Derivations: the steps the simplifier took to reach its result.

use crate::expr::Expr;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The reason given for the first step of every derivation.
pub const INITIAL_REASON: &str = "Initial expression";

/// A tree in a derivation, with the name of the law that produced it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// The tree after this step.
    pub expr: Expr,

    /// The law applied to the previous tree, or [`INITIAL_REASON`] for the input.
    pub reason: String,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.expr, self.reason)
    }
}

/// The steps from an input tree to its simplest found form.
///
/// A derivation always has at least one step: the input itself. Every following step is the
/// previous tree with one law applied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Derivation {
    steps: Vec<Step>,

    /// The number of trees explored to find this derivation.
    pub nodes_explored: usize,

    /// Whether the search was cut short by its node limit. If so, a simpler tree may exist.
    pub truncated: bool,
}

impl Derivation {
    /// Creates a derivation with no rewrites.
    pub fn trivial(expr: Expr) -> Self {
        Self {
            steps: vec![Step { expr, reason: INITIAL_REASON.to_string() }],
            nodes_explored: 1,
            truncated: false,
        }
    }

    /// Creates a derivation from its steps, or [`None`] if there are no steps.
    pub(crate) fn new(steps: Vec<Step>, nodes_explored: usize, truncated: bool) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        Some(Self { steps, nodes_explored, truncated })
    }

    /// Returns the input tree.
    pub fn initial(&self) -> &Expr {
        &self.steps[0].expr
    }

    /// Returns the simplest tree found.
    pub fn result(&self) -> &Expr {
        &self.steps[self.steps.len() - 1].expr
    }

    /// Returns every step, starting with the input.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the number of laws applied.
    pub fn len(&self) -> usize {
        self.steps.len() - 1
    }

    /// Returns true if no law was applied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.steps.len().to_string().len();
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "{:>width$}. {}", i + 1, step, width = width)?;
        }
        Ok(())
    }
}
