use ariadne::Fmt;
use symalg_attrs::ErrorKind;
use symalg_error::EXPR;
use crate::tokenizer::TokenKind;

pub use symalg_error::Error;

/// An intentionally useless error. This should only be used for non-fatal errors, as it contains
/// no useful information.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an internal non-fatal error occurred while parsing",
    labels = ["here"],
    help = "you should never see this error; please report this as a bug"
)]
pub struct NonFatal;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of file",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of file",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", self.expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", self.found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if self.opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A repeating decimal was opened with `[` but not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed repeating digits",
    labels = ["this bracket is not closed"],
    help = format!("repeating digits are written like {}", "0.1[6]".fg(EXPR)),
)]
pub struct UnclosedRepetend;

/// An integer literal was written with a leading zero, such as `05`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "integer literal cannot start with zero",
    labels = ["this integer"],
    help = format!("remove the leading zeros: {}", self.suggestion.as_str().fg(EXPR)),
)]
pub struct InvalidIntegerLiteral {
    /// The literal with its leading zeros removed.
    pub suggestion: String,
}

/// A known function was used without an argument.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument to `{}`", self.name),
    labels = ["this function needs an argument"],
    help = format!("call the function with parentheses, such as {}", format!("{}(x)", self.name).fg(EXPR)),
)]
pub struct MissingFunctionArgument {
    /// The name of the function.
    pub name: String,
}

/// The expression is nested more deeply than the parser allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = [format!("nesting goes past {} levels here", self.limit)],
    help = "split the expression into smaller parts",
)]
pub struct NestingTooDeep {
    /// The deepest nesting allowed.
    pub limit: usize,
}
