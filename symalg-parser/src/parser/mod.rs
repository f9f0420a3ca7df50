pub mod ast;
pub mod error;
pub mod names;
pub mod token;
pub mod transform;

use error::{Error, ExpectedEof, NestingTooDeep, UnclosedParenthesis, UnexpectedEof};
use std::{ops::Range, rc::Rc};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use symalg_error::ErrorKind;
pub use transform::{Transformations, TransformationsBuilder};

/// Returns the value contained in the [`Ok`] variant of the given [`Result`], returning it from
/// the enclosing function immediately. Otherwise, the error is returned as the value of the
/// macro, so that the caller can try another parsing strategy.
#[macro_export]
macro_rules! return_if_ok {
    ($e:expr) => {
        match $e {
            Ok(value) => return Ok(value),
            Err(err) => err,
        }
    };
}

/// The result of a parsing operation.
#[derive(Debug)]
pub enum ParseResult<T> {
    /// Parsing was successful.
    Ok(T),

    /// An error occurred while parsing, however the parser attempted to recover and has tried to
    /// continue parsing in order to find more errors. The recovered value is returned along with
    /// the errors.
    ///
    /// There are no guarantees on what the recovered value will be.
    Recoverable(T, Vec<Error>),

    /// An error occurred while parsing, and the parser was unable to recover. Parsing is aborted
    /// and the errors are returned.
    Unrecoverable(Vec<Error>),
}

impl<T> ParseResult<T> {
    /// Returns true if the result is [`ParseResult::Ok`] or [`ParseResult::Recoverable`].
    pub fn is_ok(&self) -> bool {
        !self.is_err()
    }

    /// Returns true if the result is [`ParseResult::Unrecoverable`].
    pub fn is_err(&self) -> bool {
        matches!(self, ParseResult::Unrecoverable(_))
    }

    /// Maps the value of the result, leaving any errors untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<U> {
        match self {
            ParseResult::Ok(value) => ParseResult::Ok(f(value)),
            ParseResult::Recoverable(value, errors) => ParseResult::Recoverable(f(value), errors),
            ParseResult::Unrecoverable(errors) => ParseResult::Unrecoverable(errors),
        }
    }

    /// Moves any recoverable errors into the given vector and returns the parsed value. For
    /// unrecoverable errors, the errors are returned as the [`Err`] variant.
    pub fn forward_errors(self, errors: &mut Vec<Error>) -> Result<T, Vec<Error>> {
        match self {
            ParseResult::Ok(value) => Ok(value),
            ParseResult::Recoverable(value, errs) => {
                errors.extend(errs);
                Ok(value)
            },
            ParseResult::Unrecoverable(errs) => Err(errs),
        }
    }
}

/// The deepest nesting of parentheses, calls, and operators the parser accepts.
pub const MAX_NESTING: usize = 100;

/// A high-level parser for math expressions. This is the type to use to parse an arbitrary
/// expression into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Rc<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The grammar rewrites applied while parsing.
    transformations: Transformations,

    /// How many nested constructs are currently being parsed.
    depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source, applying every grammar rewrite.
    pub fn new(source: &'source str) -> Self {
        Self::with_transformations(source, Transformations::default())
    }

    /// Create a new parser for the given source, applying the given grammar rewrites.
    pub fn with_transformations(source: &'source str, transformations: Transformations) -> Self {
        let tokens = tokenize_complete(source);
        let tokens: Rc<[Token<'source>]> = if transformations.split_symbols {
            split_symbols(tokens.into_vec()).into()
        } else {
            tokens.into()
        };

        Self {
            tokens,
            cursor: 0,
            transformations,
            depth: 0,
        }
    }

    /// Returns the grammar rewrites this parser applies.
    pub fn transformations(&self) -> &Transformations {
        &self.transformations
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

    /// Parses a nested construct with the given function. Fails with [`NestingTooDeep`] instead
    /// if [`MAX_NESTING`] constructs are already being parsed.
    pub fn nested<T, F>(&mut self, recoverable_errors: &mut Vec<Error>, f: F) -> Result<T, Vec<Error>>
    where
        F: FnOnce(&mut Parser<'source>, &mut Vec<Error>) -> Result<T, Vec<Error>>,
    {
        if self.depth >= MAX_NESTING {
            tracing::trace!(depth = self.depth, "nesting limit reached");
            return Err(vec![self.error(NestingTooDeep { limit: MAX_NESTING })]);
        }

        self.depth += 1;
        let result = f(self, recoverable_errors);
        self.depth -= 1;
        result
    }

    /// Set the cursor of this parser to the cursor of another parser. Both parsers must be
    /// parsing the same source.
    pub fn set_cursor(&mut self, other: &Self) {
        self.cursor = other.cursor;
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the next non-whitespace token, without moving the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Advances the cursor past whitespace tokens to the next non-whitespace token.
    pub fn advance_past_whitespace(&mut self) {
        while let Some(token) = self.current_token() {
            if token.is_whitespace() {
                self.cursor += 1;
            } else {
                break;
            }
        }
    }

    /// Returns the next token to be parsed, including whitespace tokens, then advances the
    /// cursor.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token_raw(&mut self) -> Result<Token<'source>, Error> {
        let token = self.current_token()
            .cloned()
            .ok_or_else(|| self.error(UnexpectedEof))?;
        self.cursor += 1;
        Ok(token)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.advance_past_whitespace();
        self.next_token_raw()
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::std_parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse<'source>>(&mut self) -> ParseResult<T> {
        self.try_parse_with_fn(T::std_parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. The cursor is restored if the function returns an error.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> ParseResult<T>
    where
        F: FnOnce(&mut Parser<'source>, &mut Vec<Error>) -> Result<T, Vec<Error>>,
    {
        let start = self.cursor;
        let mut errors = Vec::new();
        match f(self, &mut errors) {
            Ok(value) if errors.is_empty() => ParseResult::Ok(value),
            Ok(value) => ParseResult::Recoverable(value, errors),
            Err(unrecoverable) => {
                self.cursor = start;
                errors.extend(unrecoverable);
                ParseResult::Unrecoverable(errors)
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`ParseResult::Ok`]
    /// for this function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse<'source>, F>(&mut self, predicate: F) -> ParseResult<T>
    where
        F: FnOnce(&T, &Parser<'source>) -> ParseResult<()>,
    {
        self.try_parse_with_fn(|input, recoverable_errors| {
            let value = T::std_parse(input, recoverable_errors)?;
            predicate(&value, input).forward_errors(recoverable_errors)?;
            Ok(value)
        })
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser, and no errors may have been recovered from; if not, every error found is
    /// returned.
    pub fn try_parse_full<T: Parse<'source>>(&mut self) -> Result<T, Vec<Error>> {
        let mut errors = Vec::new();
        let value = match T::std_parse(self, &mut errors) {
            Ok(value) => value,
            Err(unrecoverable) => {
                errors.extend(unrecoverable);
                return Err(errors);
            },
        };

        self.advance_past_whitespace();
        if let Some(token) = self.current_token() {
            if token.kind == TokenKind::CloseParen {
                errors.push(Error::new(vec![token.span.clone()], UnclosedParenthesis { opening: false }));
            } else {
                errors.push(self.error(ExpectedEof));
            }
        }

        if errors.is_empty() {
            Ok(value)
        } else {
            Err(errors)
        }
    }
}

/// Replaces every splittable [`TokenKind::Name`] token with one token per piece of the name.
fn split_symbols(tokens: Vec<Token<'_>>) -> Vec<Token<'_>> {
    let mut result = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token.kind != TokenKind::Name || !names::is_splittable(token.lexeme) {
            result.push(token);
            continue;
        }

        let pieces = names::split_name(token.lexeme);
        tracing::trace!(name = token.lexeme, pieces = pieces.len(), "splitting symbol");
        for piece in pieces {
            result.push(Token {
                span: token.span.start + piece.start..token.span.start + piece.end,
                kind: TokenKind::Name,
                lexeme: &token.lexeme[piece],
            });
        }
    }
    result
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse<'source>: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// Errors that the parser recovered from are pushed into `recoverable_errors`. Errors that
    /// prevent parsing are returned as the [`Err`] variant.
    ///
    /// This function should be used by private parsing functions. Consumers of the library
    /// should use [`Parser::try_parse_full`].
    fn std_parse(
        input: &mut Parser<'source>,
        recoverable_errors: &mut Vec<Error>
    ) -> Result<Self, Vec<Error>>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{Binary, Call, Expr, LitInt, LitRepeating, LitSym, Literal, Unary};
    use token::op::{BinOp, BinOpKind, UnaryOpKind};

    /// Parses the source with every transformation.
    fn parse(source: &str) -> Expr {
        Parser::new(source).try_parse_full::<Expr>().unwrap()
    }

    /// Parses the source with only the standard grammar.
    fn parse_standard(source: &str) -> Result<Expr, Vec<Error>> {
        Parser::with_transformations(source, Transformations::standard()).try_parse_full::<Expr>()
    }

    /// Returns the debug representation of the kind of each error found in the source.
    fn error_kinds(source: &str) -> Vec<String> {
        Parser::new(source)
            .try_parse_full::<Expr>()
            .unwrap_err()
            .iter()
            .map(|err| format!("{:?}", err.kind))
            .collect()
    }

    fn int(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Integer(LitInt { value: value.to_string(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn binary(expr: Expr) -> Binary {
        match expr {
            Expr::Binary(binary) => binary,
            other => panic!("expected binary expression, found {:?}", other),
        }
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16"), int("16", 0..2));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse("3.14"), Expr::Literal(Literal::Float(ast::LitFloat {
            value: "3.14".to_string(),
            span: 0..4,
        })));
    }

    #[test]
    fn literal_repeating() {
        assert_eq!(parse("0.1[6]"), Expr::Literal(Literal::Repeating(LitRepeating {
            value: "0.1".to_string(),
            repetend: "6".to_string(),
            span: 0..6,
        })));
    }

    #[test]
    fn repeating_digits_must_be_adjacent() {
        assert!(Parser::new("0.1 [6]").try_parse_full::<Expr>().is_err());
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(parse("2x"), Expr::Binary(Binary {
            lhs: Box::new(int("2", 0..1)),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: Box::new(sym("x", 1..2)),
            span: 0..2,
        }));
    }

    #[test]
    fn implicit_multiplication_binds_tighter_than_add() {
        let expr = binary(parse("1 + 2x"));
        assert_eq!(expr.op.kind, BinOpKind::Add);

        let rhs = binary(*expr.rhs);
        assert_eq!(rhs.op.kind, BinOpKind::Mul);
        assert!(rhs.op.implicit);
    }

    #[test]
    fn implicit_multiplication_with_whitespace() {
        let expr = binary(parse("2 x^2"));
        assert!(expr.op.implicit);
        assert_eq!(binary(*expr.rhs).op.kind, BinOpKind::Exp);
    }

    #[test]
    fn symbol_times_paren() {
        let expr = binary(parse("x(y + 1)"));
        assert!(expr.op.implicit);
        assert!(matches!(*expr.rhs, Expr::Paren(_)));
    }

    #[test]
    fn caret_is_power() {
        let expr = binary(parse("x^2"));
        assert_eq!(expr.op.kind, BinOpKind::Exp);
        assert_eq!(expr.to_string(), "x**2");
    }

    #[test]
    fn power_is_right_associative() {
        let expr = binary(parse("2^3**4"));
        assert_eq!(expr.op.kind, BinOpKind::Exp);
        assert_eq!(*expr.lhs, int("2", 0..1));
        assert_eq!(binary(*expr.rhs).op.kind, BinOpKind::Exp);
    }

    #[test]
    fn negation_wraps_power() {
        let Expr::Unary(unary) = parse("-x^2") else {
            panic!("expected unary expression");
        };
        assert_eq!(unary.op.kind, UnaryOpKind::Neg);
        assert_eq!(binary(*unary.operand).op.kind, BinOpKind::Exp);
    }

    #[test]
    fn negation_does_not_wrap_product() {
        let expr = binary(parse("-2x"));
        assert!(expr.op.implicit);
        assert!(matches!(*expr.lhs, Expr::Unary(Unary { op: token::op::UnaryOp { kind: UnaryOpKind::Neg, .. }, .. })));
    }

    #[test]
    fn factorials() {
        let Expr::Unary(unary) = parse("n!!") else {
            panic!("expected unary expression");
        };
        assert_eq!(unary.op.kind, UnaryOpKind::DoubleFactorial);
        assert_eq!(unary.span, 0..3);

        let expr = binary(parse("x^2!"));
        assert!(matches!(*expr.rhs, Expr::Unary(_)));
    }

    #[test]
    fn split_symbols() {
        assert_eq!(parse("xy"), Expr::Binary(Binary {
            lhs: Box::new(sym("x", 0..1)),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: Box::new(sym("y", 1..2)),
            span: 0..2,
        }));
    }

    #[test]
    fn keep_names_with_digits() {
        assert_eq!(parse("x1"), sym("x1", 0..2));
        assert_eq!(parse("theta"), sym("theta", 0..5));
    }

    #[test]
    fn split_embedded_function() {
        assert_eq!(parse("sinx"), Expr::Call(Call {
            name: LitSym { name: "sin".to_string(), span: 0..3 },
            power: None,
            args: vec![sym("x", 3..4)],
            span: 0..4,
        }));
    }

    #[test]
    fn implicit_application() {
        let Expr::Call(call) = parse("sin x^2") else {
            panic!("expected call");
        };
        assert_eq!(call.name.name, "sin");
        assert_eq!(call.args.len(), 1);
        assert_eq!(binary(call.args[0].clone()).op.kind, BinOpKind::Exp);
    }

    #[test]
    fn implicit_application_takes_one_factor() {
        let expr = binary(parse("sin 2x"));
        assert!(expr.op.implicit);
        assert!(matches!(*expr.lhs, Expr::Call(_)));
        assert_eq!(*expr.rhs, sym("x", 6..7));
    }

    #[test]
    fn nested_application() {
        assert_eq!(parse("sin cos x").to_string(), "sin(cos(x))");
    }

    #[test]
    fn display_keeps_source_shape() {
        assert_eq!(parse("-(x + 1)!").to_string(), "-(x + 1)!");
        assert_eq!(parse("abs(-x)").to_string(), "abs(-x)");
    }

    #[test]
    fn function_exponentiation() {
        let Expr::Call(call) = parse("sin^2 x") else {
            panic!("expected call");
        };
        assert_eq!(call.power.as_deref(), Some(&int("2", 4..5)));
        assert_eq!(call.args, vec![sym("x", 6..7)]);
        assert_eq!(call.to_string(), "sin**2(x)");
    }

    #[test]
    fn multiple_arguments() {
        let Expr::Call(call) = parse("Max(x, 2, y)") else {
            panic!("expected call");
        };
        assert_eq!(call.args.len(), 3);
        assert_eq!(call.span, 0..12);
    }

    #[test]
    fn standard_grammar() {
        assert!(parse_standard("2x").is_err());
        assert!(parse_standard("sin x").is_err());

        let Ok(Expr::Call(call)) = parse_standard("f(y)") else {
            panic!("expected call");
        };
        assert_eq!(call.name.name, "f");

        assert_eq!(parse_standard("xy").unwrap(), sym("xy", 0..2));
    }

    #[test]
    fn xor_binds_loosest() {
        let expr = binary(parse_standard("a ^ b + c").unwrap());
        assert_eq!(expr.op.kind, BinOpKind::Xor);
        assert_eq!(binary(*expr.rhs).op.kind, BinOpKind::Add);
    }

    #[test]
    fn empty_input() {
        assert_eq!(error_kinds(""), vec!["UnexpectedEof"]);
    }

    #[test]
    fn unclosed_parenthesis() {
        assert_eq!(error_kinds("("), vec!["UnclosedParenthesis { opening: true }"]);
        assert_eq!(error_kinds("(x + 1"), vec!["UnclosedParenthesis { opening: true }"]);
        assert_eq!(error_kinds(")"), vec!["UnclosedParenthesis { opening: false }"]);
        assert_eq!(error_kinds("x + 1)"), vec!["UnclosedParenthesis { opening: false }"]);
    }

    #[test]
    fn empty_parenthesis() {
        assert_eq!(error_kinds("()"), vec!["EmptyParenthesis"]);
    }

    #[test]
    fn leading_zero() {
        assert_eq!(error_kinds("05"), vec![r#"InvalidIntegerLiteral { suggestion: "5" }"#]);
    }

    #[test]
    fn missing_function_argument() {
        assert_eq!(error_kinds("sin"), vec![r#"MissingFunctionArgument { name: "sin" }"#]);
        assert_eq!(error_kinds("sin()"), vec![r#"MissingFunctionArgument { name: "sin" }"#]);
    }

    #[test]
    fn dangling_operator() {
        assert_eq!(error_kinds("2 +"), vec!["UnexpectedEof"]);
    }

    #[test]
    fn unknown_character() {
        assert_eq!(error_kinds("2 $ 3"), vec!["ExpectedEof"]);
    }

    #[test]
    fn nesting_up_to_limit() {
        let source = format!("{}x{}", "(".repeat(MAX_NESTING - 1), ")".repeat(MAX_NESTING - 1));
        assert!(Parser::new(&source).try_parse_full::<Expr>().is_ok());
    }

    #[test]
    fn nesting_past_limit() {
        let source = format!("{}x{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(error_kinds(&source), vec!["NestingTooDeep { limit: 100 }"]);
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let n = 10_000;
        let sources = [
            format!("{}x{}", "(".repeat(n), ")".repeat(n)),
            format!("{}x", "-".repeat(n)),
            format!("x{}", "^x".repeat(n)),
            format!("{}x", "sin ".repeat(n)),
            format!("{}x{}", "sin(".repeat(n), ")".repeat(n)),
        ];
        for source in sources {
            assert!(Parser::new(&source).try_parse_full::<Expr>().is_err());
        }
    }

    #[test]
    fn repeating_decimal_needs_integer_digits() {
        assert!(Parser::new(".[3]").try_parse_full::<Expr>().is_err());
        assert_eq!(parse("0.[3]"), Expr::Literal(Literal::Repeating(LitRepeating {
            value: "0.".to_string(),
            repetend: "3".to_string(),
            span: 0..5,
        })));
    }
}
