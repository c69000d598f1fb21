//! Rebuilding expression trees from a pattern and a [`Match`].

use crate::{
    error::EngineError,
    expr::{Expr, NaryKind},
    matcher::Match,
    pattern::Pattern,
};

/// Builds the tree described by the pattern, replacing each wildcard by its binding.
///
/// A repeating group expands to one operand per captured subtree: the inner pattern is
/// substituted with the group's element wildcard bound to that subtree, alongside every other
/// binding of the match. A group with no binding expands to nothing.
///
/// Each rebuilt operator is compressed. An operator left with no operands at all is an error.
pub fn substitute<'a>(pattern: &'a Pattern, bindings: &Match<'a>) -> Result<Expr, EngineError> {
    match pattern {
        Pattern::Operand(name) => Ok(Expr::Operand(name.clone())),
        Pattern::Wildcard(name) => bindings.direct
            .get(name.as_str())
            .map(|expr| (*expr).clone())
            .ok_or_else(|| EngineError::UnboundWildcard(name.clone())),
        Pattern::Not(inner) => Ok(Expr::Not(Box::new(substitute(inner, bindings)?))),
        Pattern::Nary(kind, children) => {
            let mut operands = Vec::with_capacity(children.len());
            for child in children {
                match child {
                    Pattern::Repeating(name, inner) => {
                        let elements = bindings.repeating
                            .get(name.as_str())
                            .map(Vec::as_slice)
                            .unwrap_or_default();
                        for element in elements {
                            let mut scoped = bindings.clone();
                            scoped.direct.insert(name, *element);
                            operands.push(substitute(inner, &scoped)?);
                        }
                    },
                    _ => operands.push(substitute(child, bindings)?),
                }
            }
            compress_operator(*kind, operands)
        },
        Pattern::Repeating(name, _) => Err(EngineError::MisplacedRepeating(name.clone())),
    }
}

/// Builds a compressed operator from its operands.
fn compress_operator(kind: NaryKind, operands: Vec<Expr>) -> Result<Expr, EngineError> {
    if operands.is_empty() {
        return Err(EngineError::EmptyOperator(kind));
    }
    Ok(Expr::Nary(kind, operands).compress())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::matcher::matches;

    fn parse(source: &str) -> Expr {
        source.parse().unwrap()
    }

    fn pattern(source: &str) -> Pattern {
        Pattern::from_source(source).unwrap()
    }

    #[test]
    fn replaces_wildcards() {
        let a = parse("X + Y");
        let mut bindings = Match::default();
        bindings.direct.insert("A", &a);

        let expr = substitute(&pattern("!ItemA . ItemA"), &bindings).unwrap();
        assert_eq!(expr, parse("!(X + Y) . (X + Y)"));
    }

    #[test]
    fn expands_group_through_inner_pattern() {
        let (a, b, c) = (parse("X"), parse("Y"), parse("Z . W"));
        let mut bindings = Match::default();
        bindings.direct.insert("A", &a);
        bindings.repeating.insert("B", vec![&b, &c]);

        let expr = substitute(&pattern("!ItemA + [!ItemsB]"), &bindings).unwrap();
        assert_eq!(expr, parse("!X + !Y + !(Z . W)"));
    }

    #[test]
    fn group_crosses_with_outer_binding() {
        let (a, b) = (parse("P"), parse("Q"));
        let (c1, c2) = (parse("R"), parse("S + T"));
        let mut bindings = Match::default();
        bindings.direct.insert("A", &a);
        bindings.direct.insert("B", &b);
        bindings.repeating.insert("C", vec![&c1, &c2]);

        let expr = substitute(&pattern("ItemA . ItemB + [ItemA . ItemsC]"), &bindings).unwrap();
        assert_eq!(expr, parse("P . Q + P . R + P . (S + T)"));
    }

    #[test]
    fn absent_group_is_empty() {
        let a = parse("X");
        let mut bindings = Match::default();
        bindings.direct.insert("A", &a);

        // the single remaining operand replaces the operator
        let expr = substitute(&pattern("ItemA + [ItemsB]"), &bindings).unwrap();
        assert_eq!(expr, parse("X"));
    }

    #[test]
    fn flattens_same_kind_bindings() {
        let (a, b) = (parse("X . Y"), parse("Z"));
        let mut bindings = Match::default();
        bindings.direct.insert("A", &a);
        bindings.direct.insert("B", &b);

        let expr = substitute(&pattern("ItemA . ItemB"), &bindings).unwrap();
        assert_eq!(expr, Expr::Nary(NaryKind::And, vec![
            Expr::var("X"),
            Expr::var("Y"),
            Expr::var("Z"),
        ]));
    }

    #[test]
    fn unbound_wildcard_fails() {
        let err = substitute(&pattern("ItemA + ItemB"), &Match::default()).unwrap_err();
        assert_eq!(err, EngineError::UnboundWildcard("A".to_string()));
    }

    #[test]
    fn empty_operator_fails() {
        let group = Pattern::Nary(NaryKind::And, vec![
            Pattern::Repeating("A".to_string(), Box::new(Pattern::Wildcard("A".to_string()))),
        ]);
        assert_eq!(
            substitute(&group, &Match::default()),
            Err(EngineError::EmptyOperator(NaryKind::And)),
        );
    }

    #[test]
    fn misplaced_group_fails() {
        let inner = Pattern::Wildcard("A".to_string());
        let group = Pattern::Repeating("A".to_string(), Box::new(inner));
        assert_eq!(
            substitute(&group, &Match::default()),
            Err(EngineError::MisplacedRepeating("A".to_string())),
        );
    }

    #[test]
    fn rebuilds_matched_tree() {
        let expr = parse("!X . !Y . !Z");
        let lhs = pattern("!ItemA . [!ItemsB]");
        let rhs = pattern("!(ItemA + [ItemsB])");
        for bindings in matches(&expr, &lhs) {
            assert_eq!(substitute(&lhs, &bindings).unwrap(), expr);
            assert_eq!(substitute(&rhs, &bindings).unwrap(), parse("!(X + Y + Z)"));
        }
    }
}
