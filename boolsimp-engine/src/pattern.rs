//! Patterns: expression trees with wildcards, used to write rewrite rules.
//!
//! Patterns are written in the same notation as expressions, with three additions:
//!
//! - An identifier starting with `Item` is a [`Pattern::Wildcard`] named by the rest of the
//!   identifier. `ItemA` matches any one subtree; every occurrence of `ItemA` in a rule must match
//!   the same subtree.
//! - Square brackets mark a [`Pattern::Repeating`] group, which must be an operand of `.` or `+`.
//!   It matches all the operands left over after the other operands of the operator are matched.
//! - Inside a group, an identifier starting with `Items` names the group. The bracketed pattern
//!   is the shape of each leftover operand, and `ItemsX` stands for the part of the operand that
//!   is captured.
//!
//! For example, `!ItemA . [!ItemsB]` matches a conjunction of negations, binding `A` to the
//! operand of one of them and capturing the operands of all the others as `B`.

use boolsimp_error::Error;
use boolsimp_parser::parser::{
    ast::{Expr as AstExpr, Literal},
    token::op::BinOpKind,
};
use crate::{
    error::{
        AmbiguousRepeat,
        ItemsOutsideRepeat,
        MultipleRepeats,
        RepeatNameReused,
        RepeatOutsideOperator,
        RepeatWithoutItems,
        UnnamedWildcard,
    },
    expr::NaryKind,
};
use std::{collections::BTreeSet, fmt, ops::Range};

/// The prefix of a single wildcard.
pub const WILDCARD_PREFIX: &str = "Item";

/// The prefix of the element of a repeating group.
pub const REPEATING_PREFIX: &str = "Items";

/// A pattern that expression trees can be matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Matches an operand with exactly this name.
    Operand(String),

    /// Matches a negation whose operand matches the inner pattern.
    Not(Box<Pattern>),

    /// Matches an operator of the same kind whose children match these children, in any order.
    Nary(NaryKind, Vec<Pattern>),

    /// Matches any single subtree.
    Wildcard(String),

    /// Matches the leftover children of the enclosing operator. Each of them must match the inner
    /// pattern, and the subtree bound to the wildcard with the same name is captured.
    Repeating(String, Box<Pattern>),
}

/// The wildcard names declared by a pattern, with the spans they were declared at.
#[derive(Debug, Default)]
pub(crate) struct Declarations {
    /// Every occurrence of a single wildcard, in order of appearance.
    pub wildcards: Vec<(String, Range<usize>)>,

    /// Every repeating group, in order of appearance.
    pub repeating: Vec<(String, Range<usize>)>,
}

/// Converts a parsed pattern into a [`Pattern`], validating its wildcards.
#[derive(Default)]
struct Builder {
    declarations: Declarations,

    /// The `Items` names found in each repeating group being converted; innermost last.
    groups: Vec<Vec<(String, Range<usize>)>>,
}

impl Builder {
    fn convert(&mut self, expr: &AstExpr, in_operator: bool) -> Result<Pattern, Error> {
        match expr {
            AstExpr::Literal(Literal::Bool(bool)) => {
                Ok(Pattern::Operand(if bool.value { "1" } else { "0" }.to_string()))
            },
            AstExpr::Literal(Literal::Symbol(sym)) => {
                if let Some(name) = sym.name.strip_prefix(REPEATING_PREFIX) {
                    if name.is_empty() {
                        return Err(Error::new(vec![sym.span.clone()], UnnamedWildcard));
                    }
                    match self.groups.last_mut() {
                        Some(group) => {
                            group.push((name.to_string(), sym.span.clone()));
                            Ok(Pattern::Wildcard(name.to_string()))
                        },
                        None => Err(Error::new(vec![sym.span.clone()], ItemsOutsideRepeat {
                            name: name.to_string(),
                        })),
                    }
                } else if let Some(name) = sym.name.strip_prefix(WILDCARD_PREFIX) {
                    if name.is_empty() {
                        return Err(Error::new(vec![sym.span.clone()], UnnamedWildcard));
                    }
                    self.declarations.wildcards.push((name.to_string(), sym.span.clone()));
                    Ok(Pattern::Wildcard(name.to_string()))
                } else {
                    Ok(Pattern::Operand(sym.name.to_uppercase()))
                }
            },
            AstExpr::Paren(paren) => self.convert(paren.innermost(), in_operator),
            AstExpr::Repeat(repeat) => {
                if !in_operator {
                    return Err(Error::new(vec![repeat.span()], RepeatOutsideOperator));
                }

                self.groups.push(Vec::new());
                let inner = self.convert(&repeat.expr, false)?;
                let names = self.groups.pop().unwrap_or_default();

                let Some((name, first_span)) = names.first().cloned() else {
                    return Err(Error::new(vec![repeat.span()], RepeatWithoutItems));
                };
                if let Some((_, other_span)) = names.iter().find(|(other, _)| *other != name) {
                    return Err(Error::new(
                        vec![repeat.span(), first_span, other_span.clone()],
                        AmbiguousRepeat,
                    ));
                }

                self.declarations.repeating.push((name.clone(), repeat.span()));
                Ok(Pattern::Repeating(name, Box::new(inner)))
            },
            AstExpr::Unary(unary) => Ok(Pattern::Not(Box::new(self.convert(&unary.operand, false)?))),
            AstExpr::Binary(bin) => {
                let mut operands = Vec::new();
                collect_operands(expr, bin.op.kind, &mut operands);

                let mut children = Vec::with_capacity(operands.len());
                let mut repeat_span: Option<Range<usize>> = None;
                for operand in operands {
                    let child = self.convert(operand, true)?;
                    if matches!(child, Pattern::Repeating(..)) {
                        if let Some(first) = repeat_span {
                            return Err(Error::new(vec![first, operand.span()], MultipleRepeats));
                        }
                        repeat_span = Some(operand.span());
                    }
                    children.push(child);
                }

                Ok(Pattern::Nary(bin.op.kind.into(), children))
            },
        }
    }
}

/// Collects the operands of a chain of binary operators of the same kind, looking through
/// parentheses.
fn collect_operands<'e>(expr: &'e AstExpr, kind: BinOpKind, out: &mut Vec<&'e AstExpr>) {
    match expr {
        AstExpr::Binary(bin) if bin.op.kind == kind => {
            collect_operands(&bin.lhs, kind, out);
            collect_operands(&bin.rhs, kind, out);
        },
        AstExpr::Paren(paren) => match paren.innermost() {
            inner @ AstExpr::Binary(bin) if bin.op.kind == kind => collect_operands(inner, kind, out),
            _ => out.push(expr),
        },
        _ => out.push(expr),
    }
}

/// Parses and validates a pattern, returning the names it declares.
pub(crate) fn parse_declared(source: &str) -> Result<(Pattern, Declarations), Error> {
    let ast = boolsimp_parser::parse_pattern(source)?;
    let mut builder = Builder::default();
    let pattern = builder.convert(&ast, false)?;
    let declarations = builder.declarations;

    for (name, span) in &declarations.wildcards {
        if let Some((_, group_span)) = declarations.repeating.iter().find(|(group, _)| group == name) {
            return Err(Error::new(vec![span.clone(), group_span.clone()], RepeatNameReused {
                name: name.clone(),
            }));
        }
    }

    Ok((pattern, declarations))
}

impl Pattern {
    /// Parses and validates a pattern.
    pub fn from_source(source: &str) -> Result<Self, Error> {
        parse_declared(source).map(|(pattern, _)| pattern)
    }

    /// Returns the names of the single wildcards in this pattern, excluding the elements of
    /// repeating groups.
    pub fn wildcard_names(&self) -> BTreeSet<&str> {
        fn walk<'p>(pattern: &'p Pattern, elements: &mut Vec<&'p str>, out: &mut BTreeSet<&'p str>) {
            match pattern {
                Pattern::Operand(_) => (),
                Pattern::Wildcard(name) => {
                    if !elements.contains(&name.as_str()) {
                        out.insert(name);
                    }
                },
                Pattern::Not(inner) => walk(inner, elements, out),
                Pattern::Nary(_, children) => children.iter().for_each(|child| walk(child, elements, out)),
                Pattern::Repeating(name, inner) => {
                    elements.push(name);
                    walk(inner, elements, out);
                    elements.pop();
                },
            }
        }

        let mut out = BTreeSet::new();
        walk(self, &mut Vec::new(), &mut out);
        out
    }

    /// Returns the names of the repeating groups in this pattern.
    pub fn repeating_names(&self) -> BTreeSet<&str> {
        match self {
            Self::Operand(_) | Self::Wildcard(_) => BTreeSet::new(),
            Self::Not(inner) => inner.repeating_names(),
            Self::Nary(_, children) => children.iter().flat_map(Self::repeating_names).collect(),
            Self::Repeating(name, inner) => {
                let mut names = inner.repeating_names();
                names.insert(name);
                names
            },
        }
    }

    /// Writes the pattern in the notation it is parsed from. `elements` holds the names of the
    /// enclosing repeating groups.
    fn fmt_with(&self, f: &mut fmt::Formatter<'_>, elements: &mut Vec<String>) -> fmt::Result {
        match self {
            Self::Operand(name) => write!(f, "{}", name),
            Self::Wildcard(name) if elements.contains(name) => write!(f, "{}{}", REPEATING_PREFIX, name),
            Self::Wildcard(name) => write!(f, "{}{}", WILDCARD_PREFIX, name),
            Self::Not(inner) => {
                if matches!(**inner, Self::Nary(..)) {
                    write!(f, "!(")?;
                    inner.fmt_with(f, elements)?;
                    write!(f, ")")
                } else {
                    write!(f, "!")?;
                    inner.fmt_with(f, elements)
                }
            },
            Self::Nary(kind, children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", kind.symbol())?;
                    }
                    let parens = matches!(
                        (kind, child),
                        (NaryKind::And, Self::Nary(NaryKind::Or, _)),
                    );
                    if parens {
                        write!(f, "(")?;
                    }
                    child.fmt_with(f, elements)?;
                    if parens {
                        write!(f, ")")?;
                    }
                }
                Ok(())
            },
            Self::Repeating(name, inner) => {
                elements.push(name.clone());
                write!(f, "[")?;
                inner.fmt_with(f, elements)?;
                elements.pop();
                write!(f, "]")
            },
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, &mut Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn wildcard(name: &str) -> Pattern {
        Pattern::Wildcard(name.to_string())
    }

    #[test]
    fn de_morgan_expansion() {
        let pattern = Pattern::from_source("!ItemA . [!ItemsB]").unwrap();
        assert_eq!(pattern, Pattern::Nary(NaryKind::And, vec![
            Pattern::Not(Box::new(wildcard("A"))),
            Pattern::Repeating("B".to_string(), Box::new(Pattern::Not(Box::new(wildcard("B"))))),
        ]));
        assert_eq!(pattern.to_string(), "!ItemA . [!ItemsB]");
    }

    #[test]
    fn repeat_with_outer_wildcard() {
        let pattern = Pattern::from_source("(ItemA . ItemB + [ItemA . ItemsC]) . [ItemsD]").unwrap();
        assert_eq!(pattern.wildcard_names().into_iter().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(pattern.repeating_names().into_iter().collect::<Vec<_>>(), vec!["C", "D"]);
        assert_eq!(pattern.to_string(), "(ItemA . ItemB + [ItemA . ItemsC]) . [ItemsD]");
    }

    #[test]
    fn parentheses_flatten() {
        let pattern = Pattern::from_source("ItemA + (ItemB + 1)").unwrap();
        assert_eq!(pattern, Pattern::Nary(NaryKind::Or, vec![
            wildcard("A"),
            wildcard("B"),
            Pattern::Operand("1".to_string()),
        ]));
    }

    #[test]
    fn items_outside_group() {
        let err = Pattern::from_source("ItemA + ItemsB").unwrap_err();
        assert!(err.is::<ItemsOutsideRepeat>());
        assert_eq!(err.spans, vec![8..14]);
    }

    #[test]
    fn group_without_items() {
        let err = Pattern::from_source("ItemA + [!ItemB]").unwrap_err();
        assert!(err.is::<RepeatWithoutItems>());
        assert_eq!(err.spans, vec![8..16]);
    }

    #[test]
    fn group_with_two_names() {
        let err = Pattern::from_source("ItemA + [ItemsB . ItemsC]").unwrap_err();
        assert!(err.is::<AmbiguousRepeat>());
    }

    #[test]
    fn group_outside_operator() {
        let err = Pattern::from_source("![ItemsA]").unwrap_err();
        assert!(err.is::<RepeatOutsideOperator>());

        let err = Pattern::from_source("[ItemsA]").unwrap_err();
        assert!(err.is::<RepeatOutsideOperator>());
    }

    #[test]
    fn two_groups_in_one_operator() {
        let err = Pattern::from_source("[ItemsA] + ItemB + [ItemsC]").unwrap_err();
        assert!(err.is::<MultipleRepeats>());
        assert_eq!(err.spans, vec![0..8, 19..27]);
    }

    #[test]
    fn group_name_reused_by_wildcard() {
        let err = Pattern::from_source("ItemA + [ItemsA]").unwrap_err();
        assert_eq!(err.downcast_ref::<RepeatNameReused>(), Some(&RepeatNameReused { name: "A".to_string() }));
    }

    #[test]
    fn duplicate_groups_are_declared() {
        // rejected when building a rule, since only the left-hand side forbids it
        let (_, declarations) = parse_declared("ItemA . [ItemsB] + [ItemsB]").unwrap();
        let names = declarations.repeating.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["B", "B"]);
    }

    #[test]
    fn unnamed_wildcard() {
        let err = Pattern::from_source("Item + 1").unwrap_err();
        assert!(err.is::<UnnamedWildcard>());
    }

    #[test]
    fn syntax_errors_pass_through() {
        let err = Pattern::from_source("ItemA + [ItemsB").unwrap_err();
        assert!(err.is::<boolsimp_parser::parser::error::UnclosedBracket>());
    }
}
