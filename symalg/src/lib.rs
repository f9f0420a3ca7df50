//! Parse human-written math, such as `2x^2 + 3y` or `sin^2 x`, into symbolic expression trees.
//!
//! The grammar accepts implicit multiplication (`2x`, `x(y + 1)`), implicit function
//! application (`sin x`), `^` as exponentiation, factorials, and repeating decimals. The result is
//! a [`SymExpr`], a flattened tree of sums, products, and powers that can be written back out as
//! text ([`std::fmt::Display`]) or LaTeX ([`fmt::Latex`]).
//!
//! ```
//! use symalg::parse_expression;
//!
//! let expr = parse_expression("2x^2 + 3y").unwrap();
//! assert_eq!(expr.to_string(), "2*x**2 + 3*y");
//! assert_eq!(expr, parse_expression("3*y + 2*x**2").unwrap());
//! ```

pub mod error;
pub mod fmt;
pub mod primitive;
pub mod symbolic;

pub use symalg_error::Error;
pub use symalg_parser::parser::{Transformations, TransformationsBuilder};
pub use symbolic::{Primary, SymExpr};

use symalg_parser::parser::{ast::Expr, Parser};

/// Parses the input with every grammar rewrite enabled and returns its symbolic tree.
///
/// Writing the returned tree with [`std::fmt::Display`] produces text that parses back into an
/// equal tree.
///
/// If the input is not a well-formed expression, every error found is returned. These are the
/// errors reported by the parser, unchanged.
pub fn parse_expression(input: &str) -> Result<SymExpr, Vec<Error>> {
    parse_expression_with(input, &Transformations::default())
}

/// Parses the input with the given grammar rewrites and returns its symbolic tree.
///
/// With [`Transformations::standard`], `2x` is an error and `^` is bitwise XOR, producing calls
/// to `Xor`.
pub fn parse_expression_with(
    input: &str,
    transformations: &Transformations,
) -> Result<SymExpr, Vec<Error>> {
    tracing::debug!(input, ?transformations, "parsing expression");

    let ast = Parser::with_transformations(input, *transformations)
        .try_parse_full::<Expr>()
        .map_err(|errs| {
            tracing::debug!(input, errors = errs.len(), "failed to parse expression");
            errs
        })?;

    SymExpr::try_from(ast).map_err(|err| {
        tracing::debug!(input, error = ?err.kind, "failed to build expression");
        vec![err]
    })
}
