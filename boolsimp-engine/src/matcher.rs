//! Matching expression trees against patterns.
//!
//! Matching is non-deterministic: the children of `.` and `+` can be paired with the children of
//! a pattern in many ways, so [`matches`] produces every valid [`Match`], lazily.
//!
//! The children of an n-ary pattern are resolved in this order:
//!
//! 1. Literal operands, such as the `1` in `1 + [ItemsA]`, are paired with an equal child. This
//!    never branches.
//! 2. Wildcards that are already bound consume an equal child. This never branches either.
//! 3. Compound patterns, then unbound wildcards, are tried against each unused child in turn.
//! 4. The children left over are captured by the repeating group, if there is one. Otherwise the
//!    branch fails.

use crate::{expr::Expr, pattern::Pattern};
use std::{collections::HashMap, iter};

/// An assignment of wildcards to the subtrees they matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Match<'a> {
    /// The subtree bound to each single wildcard.
    pub direct: HashMap<&'a str, &'a Expr>,

    /// The subtrees captured by each repeating group. A group that captured nothing is bound to
    /// an empty list.
    pub repeating: HashMap<&'a str, Vec<&'a Expr>>,
}

/// A lazily produced sequence of matches.
pub type Matches<'a> = Box<dyn Iterator<Item = Match<'a>> + 'a>;

fn none<'a>() -> Matches<'a> {
    Box::new(iter::empty())
}

fn one(bindings: Match<'_>) -> Matches<'_> {
    Box::new(iter::once(bindings))
}

/// Returns every way the expression matches the pattern.
pub fn matches<'a>(expr: &'a Expr, pattern: &'a Pattern) -> Matches<'a> {
    match_with(expr, pattern, Match::default())
}

/// Returns every way the expression matches the pattern, extending the given partial match.
pub fn match_with<'a>(expr: &'a Expr, pattern: &'a Pattern, mut bindings: Match<'a>) -> Matches<'a> {
    match (pattern, expr) {
        (Pattern::Wildcard(name), _) => match bindings.direct.get(name.as_str()) {
            Some(bound) if *bound == expr => one(bindings),
            Some(_) => none(),
            None => {
                bindings.direct.insert(name, expr);
                one(bindings)
            },
        },
        (Pattern::Operand(name), Expr::Operand(other)) if name == other => one(bindings),
        (Pattern::Not(inner_pattern), Expr::Not(inner)) => match_with(inner, inner_pattern, bindings),
        (Pattern::Nary(kind, pattern_children), Expr::Nary(other, children)) if kind == other => {
            match_children(children, pattern_children, bindings)
        },
        _ => none(),
    }
}

/// Matches the children of an n-ary operator against the children of an n-ary pattern of the
/// same kind.
fn match_children<'a>(
    children: &'a [Expr],
    pattern_children: &'a [Pattern],
    bindings: Match<'a>,
) -> Matches<'a> {
    let mut used = vec![false; children.len()];
    let mut remaining = Vec::with_capacity(pattern_children.len());
    let mut repeating = None;

    for pattern in pattern_children {
        match pattern {
            Pattern::Operand(name) => {
                let found = children.iter()
                    .enumerate()
                    .position(|(i, child)| !used[i] && matches!(child, Expr::Operand(other) if other == name));
                match found {
                    Some(i) => used[i] = true,
                    None => return none(),
                }
            },
            Pattern::Repeating(name, inner) => repeating = Some((name.as_str(), &**inner)),
            _ => remaining.push(pattern),
        }
    }

    match_remaining(children, used, remaining, repeating, bindings)
}

/// Picks the pattern child to resolve next: a bound wildcard if there is one, then a compound
/// pattern, then an unbound wildcard.
fn pick_next(remaining: &[&Pattern], bindings: &Match) -> Option<usize> {
    let is_bound = |pattern: &Pattern| {
        matches!(pattern, Pattern::Wildcard(name) if bindings.direct.contains_key(name.as_str()))
    };
    let is_compound = |pattern: &Pattern| !matches!(pattern, Pattern::Wildcard(_));

    remaining.iter().position(|pattern| is_bound(*pattern))
        .or_else(|| remaining.iter().position(|pattern| is_compound(*pattern)))
        .or_else(|| if remaining.is_empty() { None } else { Some(0) })
}

fn match_remaining<'a>(
    children: &'a [Expr],
    used: Vec<bool>,
    mut remaining: Vec<&'a Pattern>,
    repeating: Option<(&'a str, &'a Pattern)>,
    bindings: Match<'a>,
) -> Matches<'a> {
    let Some(next) = pick_next(&remaining, &bindings) else {
        return capture_leftovers(children, &used, repeating, bindings);
    };
    let pattern = remaining.remove(next);

    if let Pattern::Wildcard(name) = pattern {
        if let Some(bound) = bindings.direct.get(name.as_str()) {
            let found = children.iter()
                .enumerate()
                .position(|(i, child)| !used[i] && child == *bound);
            return match found {
                Some(i) => {
                    let mut used = used;
                    used[i] = true;
                    match_remaining(children, used, remaining, repeating, bindings)
                },
                None => none(),
            };
        }
    }

    // children equal to one already tried would produce the same matches
    let mut candidates: Vec<usize> = Vec::new();
    for (i, child) in children.iter().enumerate() {
        if !used[i] && !candidates.iter().any(|&j| children[j] == *child) {
            candidates.push(i);
        }
    }

    Box::new(candidates.into_iter().flat_map(move |i| {
        let mut used = used.clone();
        used[i] = true;
        let remaining = remaining.clone();
        match_with(&children[i], pattern, bindings.clone())
            .flat_map(move |bindings| {
                match_remaining(children, used.clone(), remaining.clone(), repeating, bindings)
            })
    }))
}

/// Captures the unused children with the repeating group, if any.
fn capture_leftovers<'a>(
    children: &'a [Expr],
    used: &[bool],
    repeating: Option<(&'a str, &'a Pattern)>,
    bindings: Match<'a>,
) -> Matches<'a> {
    let leftovers = children.iter()
        .zip(used)
        .filter(|(_, used)| !**used)
        .map(|(child, _)| child)
        .collect::<Vec<_>>();

    match repeating {
        Some((name, inner)) => capture(leftovers, name, inner, bindings, Vec::new()),
        None if leftovers.is_empty() => one(bindings),
        None => none(),
    }
}

/// Matches each leftover child against the inner pattern of a repeating group, collecting the
/// subtree bound to the group's element wildcard.
fn capture<'a>(
    mut leftovers: Vec<&'a Expr>,
    name: &'a str,
    inner: &'a Pattern,
    mut bindings: Match<'a>,
    captured: Vec<&'a Expr>,
) -> Matches<'a> {
    if leftovers.is_empty() {
        bindings.repeating.insert(name, captured);
        return one(bindings);
    }

    let child = leftovers.remove(0);
    Box::new(match_with(child, inner, bindings).flat_map(move |mut bindings| {
        // the element wildcard is scoped to this one child
        match bindings.direct.remove(name) {
            Some(element) => {
                let mut captured = captured.clone();
                captured.push(element);
                capture(leftovers.clone(), name, inner, bindings, captured)
            },
            None => none(),
        }
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(source: &str) -> Expr {
        source.parse().unwrap()
    }

    fn pattern(source: &str) -> Pattern {
        Pattern::from_source(source).unwrap()
    }

    /// Formats each match as a sorted list of `name=value` pairs, for comparison.
    fn describe(matches: Matches) -> Vec<String> {
        let mut described = matches
            .map(|m| {
                let mut pairs = m.direct.iter()
                    .map(|(name, expr)| format!("{}={}", name, expr))
                    .chain(m.repeating.iter().map(|(name, exprs)| {
                        let mut values = exprs.iter().map(ToString::to_string).collect::<Vec<_>>();
                        values.sort();
                        format!("{}=[{}]", name, values.join(", "))
                    }))
                    .collect::<Vec<_>>();
                pairs.sort();
                pairs.join(" ")
            })
            .collect::<Vec<_>>();
        described.sort();
        described
    }

    #[test]
    fn wildcard_matches_anything() {
        let expr = parse("A . !B");
        let pattern = pattern("ItemX");
        assert_eq!(describe(matches(&expr, &pattern)), vec!["X=A . !B"]);
    }

    #[test]
    fn operand_must_be_equal() {
        let expr = parse("A");
        assert_eq!(matches(&expr, &pattern("1")).count(), 0);
        assert_eq!(matches(&parse("1"), &pattern("1")).count(), 1);
    }

    #[test]
    fn literal_removed_first() {
        let expr = parse("B + 1 + A");
        let pattern = pattern("1 + [ItemsA]");
        assert_eq!(describe(matches(&expr, &pattern)), vec!["A=[A, B]"]);
    }

    #[test]
    fn missing_literal_fails() {
        let expr = parse("A + B");
        assert_eq!(matches(&expr, &pattern("1 + [ItemsA]")).count(), 0);
    }

    #[test]
    fn named_wildcards_must_agree() {
        let pattern = pattern("ItemA + ItemA + [ItemsB]");
        assert_eq!(describe(matches(&parse("C + B + C"), &pattern)), vec!["A=C B=[B]"]);
        assert_eq!(matches(&parse("C + B"), &pattern).count(), 0);
    }

    #[test]
    fn leftovers_without_group_fail() {
        let pattern = pattern("ItemA + !ItemA");
        assert_eq!(matches(&parse("A + !A"), &pattern).count(), 1);
        assert_eq!(matches(&parse("A + !A + B"), &pattern).count(), 0);
    }

    #[test]
    fn empty_group_is_bound() {
        let pattern = pattern("ItemA + !ItemA + [ItemsB]");
        assert_eq!(describe(matches(&parse("!X + X"), &pattern)), vec!["A=X B=[]"]);
    }

    #[test]
    fn every_pairing_is_produced() {
        let pattern = pattern("ItemA + [ItemsB]");
        assert_eq!(describe(matches(&parse("X + Y + Z"), &pattern)), vec![
            "A=X B=[Y, Z]",
            "A=Y B=[X, Z]",
            "A=Z B=[X, Y]",
        ]);
    }

    #[test]
    fn equal_children_tried_once() {
        let pattern = pattern("ItemA + [ItemsB]");
        let expr = Expr::Nary(crate::expr::NaryKind::Or, vec![
            Expr::var("X"),
            Expr::var("X"),
            Expr::var("Y"),
        ]);
        assert_eq!(describe(matches(&expr, &pattern)), vec![
            "A=X B=[X, Y]",
            "A=Y B=[X, X]",
        ]);
    }

    #[test]
    fn group_applies_inner_pattern() {
        let pattern = pattern("!ItemA . [!ItemsB]");
        assert_eq!(describe(matches(&parse("!X . !Y . !(Z + W)"), &pattern)), vec![
            "A=X B=[Y, Z + W]",
            "A=Y B=[X, Z + W]",
            "A=Z + W B=[X, Y]",
        ]);
        assert_eq!(matches(&parse("!X . Y"), &pattern).count(), 0);
    }

    #[test]
    fn nested_operator_pattern() {
        let pattern = pattern("ItemA + ItemA . ItemB . [ItemsC] + [ItemsD]");
        let found = describe(matches(&parse("X + X . Y + Z"), &pattern));
        assert_eq!(found, vec!["A=X B=Y C=[] D=[Z]"]);
    }

    #[test]
    fn compound_children_bind_before_wildcards() {
        let pattern = pattern("ItemA . (ItemB + [ItemsC]) . [ItemsD]");
        let found = describe(matches(&parse("P . (Q + R)"), &pattern));
        assert_eq!(found, vec![
            "A=P B=Q C=[R] D=[]",
            "A=P B=R C=[Q] D=[]",
        ]);
    }

    #[test]
    fn kinds_must_agree() {
        assert_eq!(matches(&parse("A . B"), &pattern("ItemA + ItemB")).count(), 0);
        assert_eq!(matches(&parse("!A"), &pattern("ItemA . ItemB")).count(), 0);
    }

    #[test]
    fn not_descends() {
        let pattern = pattern("!!ItemA");
        assert_eq!(describe(matches(&parse("!!(A + B)"), &pattern)), vec!["A=A + B"]);
        assert_eq!(matches(&parse("!A"), &pattern).count(), 0);
    }

    #[test]
    fn group_inner_uses_outer_binding() {
        // every leftover must contain the factor bound outside the group
        let pattern = Pattern::Nary(crate::expr::NaryKind::Or, vec![
            Pattern::Wildcard("A".to_string()),
            Pattern::Repeating("B".to_string(), Box::new(Pattern::Nary(crate::expr::NaryKind::And, vec![
                Pattern::Wildcard("A".to_string()),
                Pattern::Wildcard("B".to_string()),
            ]))),
        ]);
        let found = describe(matches(&parse("X + X . Y + X . Z"), &pattern));
        assert_eq!(found, vec!["A=X B=[Y, Z]"]);
    }
}
