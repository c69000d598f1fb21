pub mod token;

use boolsimp_error::Error;
use crate::parser::error::UnrecognizedSymbol;
use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Tokenization stops at the first character that does not begin any token, and an
/// [`UnrecognizedSymbol`] error pointing at that character is returned instead.
pub fn tokenize_complete(input: &str) -> Result<Box<[Token]>, Error> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(Token {
                span: lexer.span(),
                kind,
                lexeme: lexer.slice(),
            }),
            Err(()) => {
                return Err(Error::new(vec![lexer.span()], UnrecognizedSymbol {
                    symbol: lexer.slice().to_owned(),
                }));
            },
        }
    }

    Ok(tokens.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn symbolic_operators() {
        compare_tokens(
            "A . B + !C",
            [
                (TokenKind::Name, "A"),
                (TokenKind::Whitespace, " "),
                (TokenKind::And, "."),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "B"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Or, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Not, "!"),
                (TokenKind::Name, "C"),
            ],
        );
    }

    #[test]
    fn keyword_operators() {
        compare_tokens(
            "not a and (b Or 1)",
            [
                (TokenKind::Not, "not"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "a"),
                (TokenKind::Whitespace, " "),
                (TokenKind::And, "and"),
                (TokenKind::Whitespace, " "),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "b"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Or, "Or"),
                (TokenKind::Whitespace, " "),
                (TokenKind::True, "1"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn keyword_prefix_is_a_name() {
        compare_tokens(
            "ANDY ORB NOTE",
            [
                (TokenKind::Name, "ANDY"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "ORB"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "NOTE"),
            ],
        );
    }

    #[test]
    fn pattern_tokens() {
        compare_tokens(
            "ItemA+[!ItemsB]",
            [
                (TokenKind::Name, "ItemA"),
                (TokenKind::Or, "+"),
                (TokenKind::OpenSquare, "["),
                (TokenKind::Not, "!"),
                (TokenKind::Name, "ItemsB"),
                (TokenKind::CloseSquare, "]"),
            ],
        );
    }

    #[test]
    fn complete_keeps_spans() {
        let tokens = tokenize_complete("x1 | 0").unwrap();
        let kinds = tokens.iter().map(|t| (t.kind, t.span.clone())).collect::<Vec<_>>();
        assert_eq!(kinds, vec![
            (TokenKind::Name, 0..2),
            (TokenKind::Whitespace, 2..3),
            (TokenKind::Or, 3..4),
            (TokenKind::Whitespace, 4..5),
            (TokenKind::False, 5..6),
        ]);
    }

    #[test]
    fn unrecognized_digit() {
        let err = tokenize_complete("2").unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
        assert!(err.is::<UnrecognizedSymbol>());
    }

    #[test]
    fn unrecognized_symbol_mid_input() {
        let err = tokenize_complete("A + $B").unwrap_err();
        assert_eq!(err.spans, vec![4..5]);
        assert_eq!(err.downcast_ref::<UnrecognizedSymbol>().unwrap().symbol, "$");
    }
}
