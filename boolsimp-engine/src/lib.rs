//! A rule-based boolean algebra simplifier.
//!
//! The simplifier rewrites an expression with the laws of boolean algebra, searching
//! breadth-first for the shortest way to write it, and reports every law it applied along the way.
//!
//! ```
//! use boolsimp_engine::Simplifier;
//!
//! let simplifier = Simplifier::new().unwrap();
//! let derivation = simplifier.simplify(&"A + 1".parse().unwrap());
//! assert_eq!(derivation.result().to_string(), "1");
//! assert_eq!(derivation.steps()[1].reason, "Annulment law");
//! ```
//!
//! The laws themselves are written as [`pattern::Pattern`]s, matched against trees with
//! [`matcher::matches`] and rebuilt with [`substitute::substitute`]. These are public so that
//! rules other than the built-in ones can be used; see [`Simplifier::with_catalog`].

pub mod error;
pub mod expr;
pub mod matcher;
pub mod options;
pub mod pattern;
pub mod rewrite;
pub mod rules;
pub mod search;
pub mod step;
pub mod substitute;

pub use error::{CatalogError, EngineError};
pub use expr::Expr;
pub use options::{SimplifyOptions, SimplifyOptionsBuilder};
pub use rules::RuleCatalog;
pub use step::{Derivation, Step};

/// Simplifies expressions with a catalog of rules.
#[derive(Debug, Clone)]
pub struct Simplifier {
    catalog: RuleCatalog,
    options: SimplifyOptions,
}

impl Simplifier {
    /// Creates a simplifier with the built-in laws and the default options.
    pub fn new() -> Result<Self, CatalogError> {
        Ok(Self::with_catalog(RuleCatalog::builtin()?))
    }

    /// Creates a simplifier with the given catalog and the default options.
    pub fn with_catalog(catalog: RuleCatalog) -> Self {
        Self { catalog, options: SimplifyOptions::default() }
    }

    /// Replaces the options of this simplifier.
    pub fn with_options(self, options: SimplifyOptions) -> Self {
        Self { options, ..self }
    }

    /// Returns the catalog of rules used by this simplifier.
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Returns the options of this simplifier.
    pub fn options(&self) -> &SimplifyOptions {
        &self.options
    }

    /// Simplifies the expression, returning the derivation of the simplest form found.
    ///
    /// If nothing simpler is found, the derivation holds only the input.
    pub fn simplify(&self, expr: &Expr) -> Derivation {
        let tree = search::explore(expr, &self.catalog, &self.options);
        let steps = tree.path(tree.best())
            .into_iter()
            .map(|node| Step { expr: node.expr.clone(), reason: node.reason.to_string() })
            .collect();

        Derivation::new(steps, tree.nodes().len(), tree.truncated)
            .unwrap_or_else(|| Derivation::trivial(expr.clone()))
    }
}
