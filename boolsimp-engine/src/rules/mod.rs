//! Rewrite rules and the catalog of built-in laws.
//!
//! Each rule rewrites trees matching its left-hand [`Pattern`] into its right-hand one. Rules are
//! built once from the pattern notation (see [`crate::pattern`]) by [`RuleCatalog::builtin`],
//! and are read-only afterwards; a catalog can be shared freely between simplifications.

mod laws;

use boolsimp_error::Error;
use crate::{
    error::{CatalogError, DuplicateRepeat, Side, UnboundRuleWildcard},
    pattern::{parse_declared, Pattern, REPEATING_PREFIX, WILDCARD_PREFIX},
};
use laws::{Law, LAWS};
use std::collections::BTreeMap;

/// Where a rule is tried first when looking for a place to apply it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// The node itself, then its children.
    OutsideIn,

    /// The children of the node, then the node itself.
    InsideOut,
}

/// The phase of a rule.
///
/// Every search starts in [`Phase::Pre`]. A tree produced by a [`Phase::Post`] rule, and every
/// tree derived from it, only has [`Phase::Post`] rules applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Exploratory laws that may grow the tree, such as the distributive law.
    Pre,

    /// Closing laws that shrink the tree.
    Post,
}

/// A rewrite rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// The pattern the rule applies to.
    pub lhs: Pattern,

    /// The pattern the matched tree is rewritten to.
    pub rhs: Pattern,

    /// The name of the law, shown in derivations.
    pub description: &'static str,

    /// The priority group of the rule. Lower tiers are tried first.
    pub tier: u32,

    /// Where the rule is tried first.
    pub traversal: Traversal,

    /// The phase the rule belongs to.
    pub phase: Phase,

    /// Whether other rules in the same tier are still tried after this one applies.
    pub allow_multiple: bool,
}

impl Rule {
    /// Builds a rule from its pattern sources.
    ///
    /// Besides the checks done by [`Pattern::from_source`], the left-hand side may not declare a
    /// repeating group twice, and the right-hand side may only use names bound by the left-hand
    /// side.
    fn from_law(index: usize, law: &Law) -> Result<Self, CatalogError> {
        let fail = |side: Side, source: &'static str, error: Error| CatalogError {
            index,
            description: law.description,
            side,
            source,
            error,
        };

        let (lhs, lhs_names) = parse_declared(law.lhs).map_err(|err| fail(Side::Left, law.lhs, err))?;
        let (rhs, rhs_names) = parse_declared(law.rhs).map_err(|err| fail(Side::Right, law.rhs, err))?;

        for (i, (name, span)) in lhs_names.repeating.iter().enumerate() {
            if let Some((_, first)) = lhs_names.repeating[..i].iter().find(|(other, _)| other == name) {
                return Err(fail(Side::Left, law.lhs, Error::new(
                    vec![first.clone(), span.clone()],
                    DuplicateRepeat { name: name.clone() },
                )));
            }
        }

        let bound = lhs.wildcard_names();
        for (name, span) in &rhs_names.wildcards {
            if !bound.contains(name.as_str()) {
                return Err(fail(Side::Right, law.rhs, Error::new(
                    vec![span.clone()],
                    UnboundRuleWildcard { name: format!("{}{}", WILDCARD_PREFIX, name) },
                )));
            }
        }

        let groups = lhs.repeating_names();
        for (name, span) in &rhs_names.repeating {
            if !groups.contains(name.as_str()) {
                return Err(fail(Side::Right, law.rhs, Error::new(
                    vec![span.clone()],
                    UnboundRuleWildcard { name: format!("{}{}", REPEATING_PREFIX, name) },
                )));
            }
        }

        Ok(Self {
            lhs,
            rhs,
            description: law.description,
            tier: law.tier,
            traversal: law.traversal,
            phase: law.phase,
            allow_multiple: law.allow_multiple,
        })
    }
}

/// The indices of the rules sharing a tier, in catalog order.
type Tiers = Vec<(u32, Vec<usize>)>;

/// An ordered, immutable set of rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCatalog {
    rules: Vec<Rule>,

    /// The [`Phase::Pre`] rules grouped by tier, lowest tier first.
    pre: Tiers,

    /// The [`Phase::Post`] rules grouped by tier, lowest tier first.
    post: Tiers,
}

impl RuleCatalog {
    /// Builds the catalog of built-in laws.
    ///
    /// This only fails if a built-in law is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_laws(LAWS)
    }

    fn from_laws(laws: &[Law]) -> Result<Self, CatalogError> {
        let rules = laws.iter()
            .enumerate()
            .map(|(index, law)| Rule::from_law(index, law))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("built rule catalog with {} rules", rules.len());
        Ok(Self {
            pre: group_tiers(&rules, Phase::Pre),
            post: group_tiers(&rules, Phase::Post),
            rules,
        })
    }

    /// Returns every rule, in catalog order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the rules of the given phase grouped by tier, lowest tier first. Rules keep their
    /// catalog order within a tier.
    pub fn tiers(
        &self,
        phase: Phase,
    ) -> impl Iterator<Item = (u32, impl Iterator<Item = &Rule> + '_)> + '_ {
        let tiers = match phase {
            Phase::Pre => &self.pre,
            Phase::Post => &self.post,
        };
        tiers.iter()
            .map(move |(tier, indices)| (*tier, indices.iter().map(move |&i| &self.rules[i])))
    }
}

/// Groups the indices of the rules of one phase by tier.
fn group_tiers(rules: &[Rule], phase: Phase) -> Tiers {
    let mut tiers = BTreeMap::<u32, Vec<usize>>::new();
    for (i, rule) in rules.iter().enumerate().filter(|(_, rule)| rule.phase == phase) {
        tiers.entry(rule.tier).or_default().push(i);
    }
    tiers.into_iter().collect()
}
