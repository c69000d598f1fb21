use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::Error,
    token::op::BinOp,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `A . B`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    ///
    /// If we are parsing the expression `A + B . C`, we will first parse the left-hand-side `A`,
    /// then the operator `+`, then the right-hand-side `B`. However, before we build the
    /// corresponding AST node, we should check if the operator after `B` has higher precedence
    /// than `+` (if it exists).
    ///
    /// If it does, we should parse the expression starting with `B` first, so that we get `B . C`
    /// as the right-hand-side to the `A +` node. This works by calling into [`Self::parse_expr`]
    /// again, but with `rhs` (`B` in this case) as the `lhs` argument.
    ///
    /// If it does not (such as in the expression `C . B + A`), we build the AST node `C . B`
    /// first. Then, [`Self::parse_expr`] will pick up the `+ A` part of the expression, and
    /// build the AST node `C . B + A`.
    fn complete_rhs(
        input: &mut Parser,
        lhs: Expr,
        op: BinOp,
        mut rhs: Expr,
    ) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            match input_ahead.try_parse::<BinOp>() {
                // both operators are left-associative, so only a tighter operator takes `rhs`
                Ok(next_op) if next_op.precedence() > precedence => {
                    rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
                },
                _ => break,
            }
        }

        let span = lhs.span().start..rhs.span().end;
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }))
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator of at least the given precedence and a right-hand-side.
    ///
    /// Returns `lhs` unchanged if no such operator follows it.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<Expr, Error> {
        loop {
            let mut input_ahead = input.clone();
            match input_ahead.try_parse::<BinOp>() {
                Ok(op) if op.precedence() >= precedence => {
                    input.set_cursor(&input_ahead);
                    let rhs = Unary::parse_or_lower(input)?;
                    lhs = Self::complete_rhs(input, lhs, op, rhs)?;
                },
                _ => break,
            }
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}
