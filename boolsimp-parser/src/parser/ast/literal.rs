use crate::{
    parser::{error::{Error, ExpectedOperand}, Parse, Parser},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A constant, `0` or `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitBool {
    /// The value of the constant.
    pub value: bool,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for LitBool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", if self.value { "1" } else { "0" })
    }
}

/// A variable name, such as `A` or `x1`. Names are kept as written; case normalization happens
/// when the tree is built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name as it appears in the source.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A literal value, the leaves of every expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    Bool(LitBool),
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Bool(bool) => bool.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match token.kind {
            TokenKind::False | TokenKind::True => Ok(Literal::Bool(LitBool {
                value: token.kind == TokenKind::True,
                span: token.span,
            })),
            TokenKind::Name => Ok(Literal::Symbol(LitSym {
                name: token.lexeme.to_owned(),
                span: token.span,
            })),
            _ => Err(Error::new(vec![token.span], ExpectedOperand)),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Bool(bool) => bool.fmt(f),
            Literal::Symbol(sym) => sym.fmt(f),
        }
    }
}
