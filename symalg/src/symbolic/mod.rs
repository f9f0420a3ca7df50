//! Symbolic representation of parsed expressions.
//!
//! A [`SymExpr`] is built from the tree produced by `symalg_parser`. Sums and products are
//! flattened, subtraction and division are rewritten in terms of addition, multiplication, and
//! powers, and numeric literals become arbitrary-precision numbers. No simplification happens;
//! `2 + 3` stays a sum of two integers.

pub mod expr;
pub mod fraction;

pub use expr::{ExprIter, Primary, SymExpr};
