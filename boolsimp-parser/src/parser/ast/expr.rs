use crate::{
    parser::{
        ast::{
            binary::Binary,
            literal::Literal,
            paren::Paren,
            repeat::Repeat,
            unary::Unary,
        },
        error::{Error, ExpectedOperand, UnclosedParenthesis, UnexpectedEof},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any kind of expression the parser can produce.
///
/// The tree mirrors the source closely: binary operators are binary and parentheses are kept as
/// [`Expr::Paren`] nodes. Flattening into n-ary operators happens downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A constant or a variable name.
    Literal(Literal),

    /// A parenthesized expression, such as `(A + B)`.
    Paren(Paren),

    /// A repeating group, such as `[ItemsB]`. Only produced in pattern mode.
    Repeat(Repeat),

    /// A negation, such as `!A`.
    Unary(Unary),

    /// A conjunction or disjunction, such as `A . B`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Repeat(repeat) => repeat.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Parses a primary expression: a literal, a parenthesized group, or a repeating group.
    ///
    /// The branch is chosen from the kind of the next token, so errors point at the token that
    /// could not begin an operand.
    pub fn parse_primary(input: &mut Parser) -> Result<Self, Error> {
        match input.peek_kind() {
            None => Err(input.error(UnexpectedEof)),
            Some(TokenKind::False | TokenKind::True | TokenKind::Name) => {
                input.try_parse::<Literal>().map(Expr::Literal)
            },
            Some(TokenKind::OpenParen) => input.try_parse::<Paren>().map(Expr::Paren),
            Some(TokenKind::OpenSquare) => input.try_parse::<Repeat>().map(Expr::Repeat),
            Some(TokenKind::CloseParen) if input.prev_token().is_none() => {
                Err(input.error(UnclosedParenthesis { opening: false }))
            },
            Some(_) => Err(input.error(ExpectedOperand)),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Repeat(repeat) => repeat.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
