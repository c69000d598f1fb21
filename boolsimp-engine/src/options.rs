//! Options that bound the derivation search.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options controlling how far the simplifier searches.
///
/// Every tree explored during a search must stay within a cost bound derived from the cost of the
/// input (see [`SimplifyOptions::cost_bound`]), so that laws that grow the tree, like the
/// distributive law, cannot be applied forever.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimplifyOptions {
    /// How many times larger than the input an explored tree may be.
    ///
    /// The default is `2.5`.
    pub growth_factor: f64,

    /// How many nodes larger than the input an explored tree may always be, regardless of
    /// [`growth_factor`].
    ///
    /// This gives small inputs room to be expanded before they are reduced. The default is `50`.
    ///
    /// [`growth_factor`]: SimplifyOptions::growth_factor
    pub growth_slack: usize,

    /// The maximum number of trees to explore. If [`None`], the search only stops once every tree
    /// within the cost bound has been explored.
    ///
    /// When the limit is reached, the best tree found so far is returned and the derivation is
    /// marked as truncated. The default is `Some(20_000)`, so by default a search is not
    /// exhaustive: on large inputs it can stop before reaching the simplest tree within the cost
    /// bound. Set this to [`None`] to always explore every such tree.
    pub node_limit: Option<usize>,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            growth_factor: 2.5,
            growth_slack: 50,
            node_limit: Some(20_000),
        }
    }
}

impl SimplifyOptions {
    /// Wraps the given [`SimplifyOptions`] into a builder for further customization.
    pub fn into_builder(self) -> SimplifyOptionsBuilder {
        SimplifyOptionsBuilder(self)
    }

    /// Returns the largest cost an explored tree may have, given the cost of the input.
    ///
    /// This is the larger of `root_cost * growth_factor` (rounded down) and
    /// `root_cost + growth_slack`.
    pub fn cost_bound(&self, root_cost: usize) -> usize {
        let scaled = (root_cost as f64 * self.growth_factor).floor().max(0.0) as usize;
        scaled.max(root_cost.saturating_add(self.growth_slack))
    }
}

/// A builder for [`SimplifyOptions`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SimplifyOptionsBuilder(SimplifyOptions);

impl SimplifyOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the growth factor. See [`SimplifyOptions::growth_factor`] for more information.
    pub fn growth_factor(mut self, growth_factor: f64) -> Self {
        self.0.growth_factor = growth_factor;
        self
    }

    /// Sets the growth slack. See [`SimplifyOptions::growth_slack`] for more information.
    pub fn growth_slack(mut self, growth_slack: usize) -> Self {
        self.0.growth_slack = growth_slack;
        self
    }

    /// Sets the maximum number of trees to explore. See [`SimplifyOptions::node_limit`] for more
    /// information.
    pub fn node_limit(mut self, node_limit: Option<usize>) -> Self {
        self.0.node_limit = node_limit;
        self
    }

    /// Builds the [`SimplifyOptions`] struct.
    pub fn build(self) -> SimplifyOptions {
        self.0
    }
}
