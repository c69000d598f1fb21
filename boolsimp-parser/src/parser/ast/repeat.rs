use crate::{
    parser::{
        ast::expr::Expr,
        error::{
            EmptyBracket,
            Error,
            MissingOperator,
            RepeatOutsidePattern,
            UnclosedBracket,
            UnexpectedToken,
        },
        token::{CloseSquare, OpenSquare},
        Mode,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A repeating group in a rule pattern, such as `[!ItemsB]`. The group stands for any number of
/// operands of the enclosing operator, each of which has the shape of the inner expression.
///
/// Repeating groups are only accepted when the parser is in [`Mode::Pattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Repeat {
    /// The shape of each repeated operand.
    pub expr: Box<Expr>,

    /// The region of the source code that this group was parsed from, including the brackets.
    pub span: Range<usize>,
}

impl Repeat {
    /// Returns the span of the repeating group.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Repeat {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_square = input.try_parse::<OpenSquare>()?;
        if let Ok(close_square) = input.try_parse::<CloseSquare>() {
            return Err(Error::new(
                vec![open_square.span.start..close_square.span.end],
                EmptyBracket,
            ));
        }

        let expr = input.try_parse::<Expr>()?;
        let close_square = match input.peek_kind() {
            Some(TokenKind::CloseSquare) => input.try_parse::<CloseSquare>()?,
            None => return Err(Error::new(vec![open_square.span], UnclosedBracket)),
            Some(kind) if kind.starts_operand() => return Err(input.error(MissingOperator)),
            Some(found) => return Err(input.error(UnexpectedToken {
                expected: &[TokenKind::CloseSquare],
                found,
            })),
        };

        let span = open_square.span.start..close_square.span.end;
        if input.mode() != Mode::Pattern {
            return Err(Error::new(vec![span], RepeatOutsidePattern));
        }

        Ok(Self {
            expr: Box::new(expr),
            span,
        })
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        self.expr.fmt(f)?;
        write!(f, "]")
    }
}
