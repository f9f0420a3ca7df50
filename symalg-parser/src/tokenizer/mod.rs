pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        // every character is matched by at least the catch-all `Symbol` token
        let kind = result.unwrap_or(TokenKind::Symbol);
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
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
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn implicit_product() {
        compare_tokens(
            "2x^2 + 3y",
            [
                (TokenKind::Int, "2"),
                (TokenKind::Name, "x"),
                (TokenKind::Caret, "^"),
                (TokenKind::Int, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "3"),
                (TokenKind::Name, "y"),
            ],
        );
    }

    #[test]
    fn power_and_factorials() {
        compare_tokens(
            "x**2 * 3!! - 4!",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "**"),
                (TokenKind::Int, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Mul, "*"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "3"),
                (TokenKind::DoubleFactorial, "!!"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sub, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "4"),
                (TokenKind::Factorial, "!"),
            ],
        );
    }

    #[test]
    fn float_forms() {
        compare_tokens(
            "1.5 .25 3. 1e5 2.5E-3",
            [
                (TokenKind::Float, "1.5"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, ".25"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, "3."),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, "1e5"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, "2.5E-3"),
            ],
        );
    }

    #[test]
    fn repeating_decimal() {
        compare_tokens(
            "0.1[6]",
            [
                (TokenKind::Float, "0.1"),
                (TokenKind::OpenSquare, "["),
                (TokenKind::Int, "6"),
                (TokenKind::CloseSquare, "]"),
            ],
        );
    }

    #[test]
    fn names_and_greek() {
        compare_tokens(
            "x_1 αβ sinx",
            [
                (TokenKind::Name, "x_1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "αβ"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "sinx"),
            ],
        );
    }

    #[test]
    fn unknown_characters() {
        compare_tokens(
            "3 $ x",
            [
                (TokenKind::Int, "3"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "x"),
            ],
        );
    }
}
