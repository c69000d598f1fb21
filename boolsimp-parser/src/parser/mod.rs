pub mod ast;
pub mod error;
pub mod token;

use error::{
    Error,
    ExpectedEof,
    MissingOperator,
    UnclosedParenthesis,
    UnexpectedEof,
    UnrecognizedSymbol,
};
use boolsimp_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// What the parser is parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A plain boolean expression, as typed by a user.
    Expression,

    /// A rewrite rule pattern. Repeating groups (`[...]`) are only accepted in this mode.
    Pattern,
}

/// A high-level parser for boolean expressions. This is the type to use to parse an arbitrary
/// piece of text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The non-whitespace tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// Whether repeating groups are allowed.
    mode: Mode,

    /// The lexical error found while tokenizing the source, if any. It is reported by the first
    /// call to [`Parser::try_parse_full`].
    lex_error: Option<(Range<usize>, UnrecognizedSymbol)>,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source, in [`Mode::Expression`].
    pub fn new(source: &'source str) -> Self {
        Self::with_mode(source, Mode::Expression)
    }

    /// Create a new parser for the given rule pattern source, in [`Mode::Pattern`].
    pub fn new_pattern(source: &'source str) -> Self {
        Self::with_mode(source, Mode::Pattern)
    }

    /// Create a new parser for the given source in the given mode.
    pub fn with_mode(source: &'source str, mode: Mode) -> Self {
        match tokenize_complete(source) {
            Ok(tokens) => Self {
                tokens: tokens
                    .into_vec()
                    .into_iter()
                    .filter(|token| !token.is_whitespace())
                    .collect(),
                cursor: 0,
                mode,
                lex_error: None,
            },
            Err(err) => {
                let symbol = err.downcast_ref::<UnrecognizedSymbol>()
                    .cloned()
                    .unwrap_or_else(|| UnrecognizedSymbol { symbol: String::new() });
                let span = err.spans.first().cloned().unwrap_or(0..0);
                Self {
                    tokens: Box::new([]),
                    cursor: 0,
                    mode,
                    lex_error: Some((span, symbol)),
                }
            },
        }
    }

    /// Returns the mode of this parser.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Set the cursor of this parser to the cursor of another parser. Both parsers must have been
    /// created from the same source.
    pub fn set_cursor(&mut self, other: &Self) {
        self.cursor = other.cursor;
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the kind of the current token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(UnexpectedEof)),
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    ///
    /// A lexical error found while tokenizing takes priority over any syntactic error.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        if let Some((span, kind)) = self.lex_error.take() {
            return Err(Error::new(vec![span], kind));
        }

        let value = T::parse(self)?;
        match self.peek_kind() {
            None => Ok(value),
            Some(kind) if kind.starts_operand() => Err(self.error(MissingOperator)),
            Some(TokenKind::CloseParen) => Err(self.error(UnclosedParenthesis { opening: false })),
            Some(_) => Err(self.error(ExpectedEof)),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of logical or (`+`, `OR`).
    Or,

    /// Precedence of logical and (`.`, `AND`).
    And,

    /// Precedence of logical not (`!`, `NOT`).
    Not,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{Binary, Expr, Literal, LitBool, LitSym, Paren, Repeat, Unary};
    use error::{
        EmptyBracket,
        EmptyParenthesis,
        ExpectedOperand,
        RepeatOutsidePattern,
        UnclosedBracket,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn sym(name: &str, span: Range<usize>) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span })))
    }

    fn parse_err(source: &str) -> Error {
        Parser::new(source).try_parse_full::<Expr>().unwrap_err()
    }

    #[test]
    fn literal_true() {
        let mut parser = Parser::new("1");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Literal(Literal::Bool(LitBool {
            value: true,
            span: 0..1,
        })));
    }

    #[test]
    fn literal_symbol() {
        let mut parser = Parser::new("  abc  ");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, *sym("abc", 2..5));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let mut parser = Parser::new("A + B . C");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: sym("A", 0..1),
            op: BinOp { kind: BinOpKind::Or, span: 2..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: sym("B", 4..5),
                op: BinOp { kind: BinOpKind::And, span: 6..7 },
                rhs: sym("C", 8..9),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn binary_left_associativity() {
        let mut parser = Parser::new("A and B and C");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: sym("A", 0..1),
                op: BinOp { kind: BinOpKind::And, span: 2..5 },
                rhs: sym("B", 6..7),
                span: 0..7,
            })),
            op: BinOp { kind: BinOpKind::And, span: 8..11 },
            rhs: sym("C", 12..13),
            span: 0..13,
        }));
    }

    #[test]
    fn not_binds_tighter_than_and() {
        let mut parser = Parser::new("!A . B");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Unary(Unary {
                operand: sym("A", 1..2),
                op: UnaryOp { kind: UnaryOpKind::Not, span: 0..1 },
                span: 0..2,
            })),
            op: BinOp { kind: BinOpKind::And, span: 3..4 },
            rhs: sym("B", 5..6),
            span: 0..6,
        }));
    }

    #[test]
    fn double_negation_of_group() {
        let mut parser = Parser::new("NOT !(A)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Unary(Unary {
                operand: Box::new(Expr::Paren(Paren {
                    expr: sym("A", 6..7),
                    span: 5..8,
                })),
                op: UnaryOp { kind: UnaryOpKind::Not, span: 4..5 },
                span: 4..8,
            })),
            op: UnaryOp { kind: UnaryOpKind::Not, span: 0..3 },
            span: 0..8,
        }));
    }

    #[test]
    fn grouping_overrides_precedence() {
        let expr = Parser::new("(A + B) . C").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr.to_string(), "(A + B) . C");
        assert_eq!(expr.span(), 0..11);
    }

    #[test]
    fn pattern_repeat() {
        let mut parser = Parser::new_pattern("ItemA + [!ItemsB]");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: sym("ItemA", 0..5),
            op: BinOp { kind: BinOpKind::Or, span: 6..7 },
            rhs: Box::new(Expr::Repeat(Repeat {
                expr: Box::new(Expr::Unary(Unary {
                    operand: sym("ItemsB", 10..16),
                    op: UnaryOp { kind: UnaryOpKind::Not, span: 9..10 },
                    span: 9..16,
                })),
                span: 8..17,
            })),
            span: 0..17,
        }));
    }

    #[test]
    fn lone_operator() {
        let err = parse_err(".");
        assert!(err.is::<ExpectedOperand>());
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn dangling_operator() {
        let err = parse_err("A +");
        assert!(err.is::<UnexpectedEof>());
        assert_eq!(err.spans, vec![3..3]);
    }

    #[test]
    fn adjacent_operands() {
        let err = parse_err("A B");
        assert!(err.is::<MissingOperator>());
        assert_eq!(err.spans, vec![2..3]);

        let err = parse_err("10");
        assert!(err.is::<MissingOperator>());
        assert_eq!(err.spans, vec![1..2]);
    }

    #[test]
    fn adjacent_operands_in_group() {
        let err = parse_err("(A B)");
        assert!(err.is::<MissingOperator>());
        assert_eq!(err.spans, vec![3..4]);
    }

    #[test]
    fn lexical_error_wins() {
        let err = parse_err("2");
        assert!(err.is::<UnrecognizedSymbol>());
        assert_eq!(err.spans, vec![0..1]);

        let err = parse_err(". $");
        assert!(err.is::<UnrecognizedSymbol>());
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn empty_input() {
        let err = parse_err("   ");
        assert!(err.is::<UnexpectedEof>());
    }

    #[test]
    fn unbalanced_parentheses() {
        let err = parse_err("(A + B");
        assert_eq!(err.downcast_ref::<UnclosedParenthesis>(), Some(&UnclosedParenthesis { opening: true }));
        assert_eq!(err.spans, vec![0..1]);

        let err = parse_err("A + B)");
        assert_eq!(err.downcast_ref::<UnclosedParenthesis>(), Some(&UnclosedParenthesis { opening: false }));
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn empty_parentheses() {
        let err = parse_err("A . ()");
        assert!(err.is::<EmptyParenthesis>());
        assert_eq!(err.spans, vec![4..6]);
    }

    #[test]
    fn operator_before_close() {
        let err = parse_err("(A + )");
        assert!(err.is::<ExpectedOperand>());
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn repeat_requires_pattern_mode() {
        let err = parse_err("A + [B]");
        assert!(err.is::<RepeatOutsidePattern>());
        assert_eq!(err.spans, vec![4..7]);
    }

    #[test]
    fn bracket_errors() {
        let err = Parser::new_pattern("ItemA + [ItemsB").try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<UnclosedBracket>());
        assert_eq!(err.spans, vec![8..9]);

        let err = Parser::new_pattern("ItemA + []").try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<EmptyBracket>());
    }
}
