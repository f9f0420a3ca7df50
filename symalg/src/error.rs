//! Errors produced while building a [`SymExpr`] from a parsed expression.
//!
//! [`SymExpr`]: crate::symbolic::SymExpr

use ariadne::Fmt;
use symalg_attrs::ErrorKind;
use symalg_error::EXPR;

/// A numeric literal could not be represented as a finite number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid number",
    labels = [format!("I could not read {} as a finite number", self.literal.as_str().fg(EXPR))],
    help = "numbers must fit in the range of a floating-point value",
)]
pub struct InvalidNumber {
    /// The literal as written in the source.
    pub literal: String,
}
