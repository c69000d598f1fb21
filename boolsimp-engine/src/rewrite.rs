//! Finding the trees one rewrite away from a given tree.

use crate::{
    expr::Expr,
    matcher::matches,
    rules::{Phase, Rule, RuleCatalog, Traversal},
    substitute::substitute,
};
use log::{trace, warn};

/// A tree produced by applying one rule once.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    /// The rewritten tree.
    pub expr: Expr,

    /// The description of the rule that was applied.
    pub reason: &'static str,
}

/// Returns the trees that can be reached from `expr` by applying one rule of the given phase.
///
/// Tiers are tried in ascending order, and the first tier that rewrites anything is the only one
/// whose rewrites are returned. Within a tier, rules are tried in catalog order; a rule that
/// applies stops the tier unless it allows multiple rules to apply.
///
/// A rule is applied at the first position it matches, visiting positions in the order given by
/// its [`Traversal`]. Every way the rule matches at that position is returned. Duplicate trees and
/// trees equal to `expr` are left out.
pub fn one_step_rewrites(expr: &Expr, catalog: &RuleCatalog, phase: Phase) -> Vec<Rewrite> {
    for (tier, rules) in catalog.tiers(phase) {
        let mut rewrites = Vec::<Rewrite>::new();
        for rule in rules {
            let mut applied = false;
            for rewritten in apply_first(expr, rule) {
                if rewritten == *expr || rewrites.iter().any(|rewrite| rewrite.expr == rewritten) {
                    continue;
                }
                trace!("{:?} tier {}: {} => {}", phase, tier, rule.description, rewritten);
                rewrites.push(Rewrite { expr: rewritten, reason: rule.description });
                applied = true;
            }

            if applied && !rule.allow_multiple {
                break;
            }
        }

        if !rewrites.is_empty() {
            return rewrites;
        }
    }

    Vec::new()
}

/// Applies the rule at the first position of `expr` where it changes something, returning the
/// whole tree once for each way it applies there.
fn apply_first(expr: &Expr, rule: &Rule) -> Vec<Expr> {
    match rule.traversal {
        Traversal::OutsideIn => {
            let here = apply_here(expr, rule);
            if here.is_empty() {
                apply_in_children(expr, rule)
            } else {
                here
            }
        },
        Traversal::InsideOut => {
            let inside = apply_in_children(expr, rule);
            if inside.is_empty() {
                apply_here(expr, rule)
            } else {
                inside
            }
        },
    }
}

/// Applies the rule to the first child of `expr` where it applies, placing each result back into
/// a copy of `expr`.
fn apply_in_children(expr: &Expr, rule: &Rule) -> Vec<Expr> {
    match expr {
        Expr::Operand(_) => Vec::new(),
        Expr::Not(inner) => apply_first(inner, rule)
            .into_iter()
            .map(|rewritten| Expr::Not(Box::new(rewritten)))
            .collect(),
        Expr::Nary(kind, children) => {
            for (i, child) in children.iter().enumerate() {
                let rewritten = apply_first(child, rule);
                if rewritten.is_empty() {
                    continue;
                }

                return rewritten.into_iter()
                    .map(|rewritten| {
                        let mut children = children.clone();
                        children[i] = rewritten;
                        Expr::Nary(*kind, children).compress()
                    })
                    .collect();
            }
            Vec::new()
        },
    }
}

/// Applies the rule to `expr` itself, returning the distinct results that differ from `expr`.
fn apply_here(expr: &Expr, rule: &Rule) -> Vec<Expr> {
    let mut results = Vec::new();
    for bindings in matches(expr, &rule.lhs) {
        match substitute(&rule.rhs, &bindings) {
            Ok(rewritten) => {
                if rewritten != *expr && !results.contains(&rewritten) {
                    results.push(rewritten);
                }
            },
            Err(err) => warn!("skipping `{}` on `{}`: {}", rule.description, expr, err),
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::expr::NaryKind;

    fn parse(source: &str) -> Expr {
        source.parse().unwrap()
    }

    fn rewrites(source: &str, phase: Phase) -> Vec<(String, &'static str)> {
        let catalog = RuleCatalog::builtin().unwrap();
        one_step_rewrites(&parse(source), &catalog, phase)
            .into_iter()
            .map(|rewrite| (rewrite.expr.to_string(), rewrite.reason))
            .collect()
    }

    #[test]
    fn annulment() {
        assert_eq!(rewrites("A + 1", Phase::Post), vec![("1".to_string(), "Annulment law")]);
    }

    #[test]
    fn de_morgan_expansion() {
        let found = rewrites("!(A + B)", Phase::Pre);
        assert_eq!(found.len(), 1);
        assert_eq!(parse(&found[0].0), parse("!A . !B"));
        assert_eq!(found[0].1, "De Morgan's law");
    }

    #[test]
    fn nothing_applies() {
        assert_eq!(rewrites("A . B", Phase::Post), vec![]);
        assert_eq!(rewrites("A", Phase::Pre), vec![]);
    }

    #[test_log::test]
    fn lower_tier_wins() {
        // idempotence would also apply to the second term, but annulment is in a lower tier
        let found = one_step_rewrites(
            &parse("A . 0 + B . B"),
            &RuleCatalog::builtin().unwrap(),
            Phase::Post,
        );
        assert_eq!(found, vec![Rewrite {
            expr: parse("0 + B . B"),
            reason: "Annulment law",
        }]);
    }

    #[test]
    fn factoring_keeps_its_tier_open() {
        // factoring allows multiple rules, so the contraction after it in tier 3 is still tried
        let found = one_step_rewrites(
            &parse("A . B + A . C + !D . !E"),
            &RuleCatalog::builtin().unwrap(),
            Phase::Post,
        );
        assert_eq!(found, vec![
            Rewrite {
                expr: parse("A . (B + C) + !D . !E"),
                reason: "Distributive law",
            },
            Rewrite {
                expr: parse("A . B + A . C + !(D + E)"),
                reason: "De Morgan's law",
            },
        ]);
    }

    #[test]
    fn applied_rule_closes_its_tier() {
        // idempotence shares tier 1 with identity, but comes after it
        let found = one_step_rewrites(
            &parse("0 + A + A"),
            &RuleCatalog::builtin().unwrap(),
            Phase::Post,
        );
        assert_eq!(found, vec![Rewrite {
            expr: parse("A + A"),
            reason: "Identity law",
        }]);
    }

    #[test]
    fn every_assignment_at_first_position() {
        let found = one_step_rewrites(
            &parse("A . B + A . C + B . C"),
            &RuleCatalog::builtin().unwrap(),
            Phase::Post,
        );
        let found = found.into_iter().map(|rewrite| rewrite.expr).collect::<Vec<_>>();
        assert_eq!(found.len(), 3);
        for expected in ["A . (B + C) + B . C", "B . (A + C) + A . C", "C . (A + B) + A . B"] {
            assert!(found.contains(&parse(expected)), "missing {}", expected);
        }
    }

    fn rewritten_trees(source: &str, phase: Phase) -> Vec<Expr> {
        let catalog = RuleCatalog::builtin().unwrap();
        one_step_rewrites(&parse(source), &catalog, phase)
            .into_iter()
            .map(|rewrite| rewrite.expr)
            .collect()
    }

    #[test]
    fn inside_out_rewrites_innermost_first() {
        let found = rewritten_trees("A . (B + C . (D + E))", Phase::Pre);
        assert_eq!(found, vec![parse("A . (B + C . D + C . E)")]);
    }

    #[test]
    fn outside_in_rewrites_outermost_first() {
        // both negations could be expanded, the outer one is
        let found = rewritten_trees("!(A + !(B + C))", Phase::Pre);
        assert_eq!(found, vec![parse("!A . !!(B + C)")]);
    }

    #[test]
    fn rewritten_child_is_flattened_into_parent() {
        let found = rewritten_trees("A + !!(B + C)", Phase::Post);
        assert_eq!(found, vec![Expr::Nary(NaryKind::Or, vec![
            Expr::var("A"),
            Expr::var("B"),
            Expr::var("C"),
        ])]);
    }
}
