//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](symalg_parser::parser::ast::Expr) type from `symalg_parser` keeps the exact shape
//! of the source, including parentheses and the difference between written and implicit
//! multiplication. This module defines [`SymExpr`], which instead records the terms and factors
//! that make up the expression, flattening nested sums and products into a single list.
//!
//! # Strict equality
//!
//! Deciding whether two expressions are mathematically equal requires simplification, which this
//! crate does not do. Instead, [`SymExpr`] compares by **strict equality**. Two expressions are
//! strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`SymExpr::Primary`], both
//! [`SymExpr::Add`], etc.).
//! - If both are [`SymExpr::Primary`], both expressions must have strictly equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
//! terms / factors, in any order, with the same number of repetitions.
//! - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! Strict equality can never report a false positive, so `2x` and `x*2` are equal, but `2x` and
//! `x + x` are not.

mod display;
mod iter;

use crate::{error::InvalidNumber, primitive::{float_from_str, int, int_from_str}};
use rug::{Float, Integer};
use std::{cmp::Ordering, collections::BTreeSet, ops::{Add, Mul, Neg}};
use super::fraction::{make_fraction, repeating_decimal};
use symalg_error::Error;
use symalg_parser::parser::{
    ast::{Expr as AstExpr, Literal},
    names::canonical_function,
    token::op::{BinOpKind, UnaryOpKind},
};

pub use iter::ExprIter;

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A variable, such as `x` or `θ`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `Max(x, y)`.
    Call(String, Vec<SymExpr>),
}

/// [`Eq`] is implemented manually to allow comparing [`Primary::Float`]s. This module never
/// produces non-finite [`Float`]s.
impl Eq for Primary {}

impl Primary {
    /// Returns true if the primary is a number.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Returns true if the primary is a number with a negative sign.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Integer(int) => int.cmp0() == Ordering::Less,
            Self::Float(float) => float.is_sign_negative(),
            Self::Symbol(_) | Self::Call(..) => false,
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// This type should be distinguished from the [`symalg_parser::parser::ast::Expr`] type. The main
/// difference is that this type **flattens** out the tree structure. For example, the
/// expression `x + (y + z)` is a single [`SymExpr::Add`] node with _three_ children, `x`, `y`,
/// and `z`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Creates a call to the function with the given name.
    fn call(name: &str, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(name.to_owned(), args))
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a [`Primary`], returns a reference to it.
    pub fn as_primary(&self) -> Option<&Primary> {
        match self {
            Self::Primary(primary) => Some(primary),
            _ => None,
        }
    }

    /// Returns true if the expression is a number.
    pub fn is_numeric(&self) -> bool {
        self.as_primary().is_some_and(Primary::is_numeric)
    }

    /// Returns true if the expression is a number with a negative sign.
    pub fn is_negative_numeric(&self) -> bool {
        self.as_primary().is_some_and(Primary::is_negative)
    }

    /// Returns true if the expression is exactly the integer -1.
    pub fn is_neg_one(&self) -> bool {
        self.as_integer().is_some_and(|int| *int == -1)
    }

    /// If the expression is some base raised to the power of -1, returns the base.
    pub fn as_reciprocal(&self) -> Option<&SymExpr> {
        match self {
            Self::Exp(base, exp) if exp.is_neg_one() => Some(base),
            _ => None,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// An [`SymExpr::Add`] with zero / one term, or a [`SymExpr::Mul`] with zero / one factor, is
    /// replaced by the single term / factor, or the integer 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) if terms.len() <= 1 => {
                terms.pop().unwrap_or(Self::Primary(Primary::Integer(int(0))))
            },
            Self::Mul(mut factors) if factors.len() <= 1 => {
                factors.pop().unwrap_or(Self::Primary(Primary::Integer(int(1))))
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the free symbols of the expression, including those in function arguments, in
    /// sorted order.
    pub fn symbols(&self) -> BTreeSet<&str> {
        let mut symbols = BTreeSet::new();
        for expr in self.post_order_iter() {
            match expr {
                Self::Primary(Primary::Symbol(sym)) => {
                    symbols.insert(sym.as_str());
                },
                Self::Primary(Primary::Call(_, args)) => {
                    symbols.extend(args.iter().flat_map(Self::symbols));
                },
                _ => {},
            }
        }
        symbols
    }

    /// Converts a literal into an expression.
    fn from_literal(literal: Literal) -> Result<Self, Error> {
        let invalid = |literal: &Literal| Error::new(vec![literal.span()], InvalidNumber {
            literal: literal.to_string(),
        });

        match &literal {
            Literal::Integer(lit) => int_from_str(&lit.value)
                .map(|int| Self::Primary(Primary::Integer(int)))
                .ok_or_else(|| invalid(&literal)),
            Literal::Float(lit) => float_from_str(&lit.value)
                .map(|float| Self::Primary(Primary::Float(float)))
                .ok_or_else(|| invalid(&literal)),
            Literal::Repeating(lit) => {
                let (integer, fraction) = lit.parts();
                repeating_decimal(integer, fraction, &lit.repetend).ok_or_else(|| invalid(&literal))
            },
            Literal::Symbol(lit) => Ok(Self::Primary(Primary::Symbol(lit.name.clone()))),
        }
    }
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                if lhs.len() != rhs.len() {
                    return false;
                }

                // every child of `lhs` must be matched with a distinct child of `rhs`
                let mut matched = vec![false; rhs.len()];
                lhs.iter().all(|lhs| {
                    let found = rhs.iter()
                        .enumerate()
                        .position(|(idx, rhs)| !matched[idx] && lhs == rhs);
                    match found {
                        Some(idx) => {
                            matched[idx] = true;
                            true
                        },
                        None => false,
                    }
                })
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Converts a parsed expression into a [`SymExpr`].
///
/// Parentheses are dropped and sums and products are flattened, keeping their children in source
/// order. Subtraction becomes addition of the negated right-hand side, and division becomes
/// multiplication by the reciprocal. Factorials and bitwise XOR become calls to `factorial`,
/// `factorial2`, and `Xor`.
///
/// Fails only if a numeric literal cannot be represented as a finite number.
impl TryFrom<AstExpr> for SymExpr {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        Ok(match expr {
            AstExpr::Literal(literal) => Self::from_literal(literal)?,
            AstExpr::Paren(paren) => Self::try_from(paren.into_innermost())?,
            AstExpr::Call(call) => {
                let args = call.args
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                let result = Self::call(canonical_function(&call.name.name), args);
                match call.power {
                    Some(power) => Self::Exp(Box::new(result), Box::new(Self::try_from(*power)?)),
                    None => result,
                }
            },
            AstExpr::Unary(unary) => {
                let operand = Self::try_from(*unary.operand)?;
                match unary.op.kind {
                    UnaryOpKind::Neg => -operand,
                    UnaryOpKind::Pos => operand,
                    UnaryOpKind::Factorial => Self::call("factorial", vec![operand]),
                    UnaryOpKind::DoubleFactorial => Self::call("factorial2", vec![operand]),
                }
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::try_from(*bin.lhs)?;
                let rhs = Self::try_from(*bin.rhs)?;
                match bin.op.kind {
                    BinOpKind::Exp => Self::Exp(Box::new(lhs), Box::new(rhs)),
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => make_fraction(lhs, rhs),
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs + -rhs,
                    BinOpKind::Xor => Self::call("Xor", vec![lhs, rhs]),
                }
            },
        })
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, numbers included; if either
/// operand is a [`SymExpr::Add`], its terms are spliced into the result in order (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, numbers included; if either
/// operand is a [`SymExpr::Mul`], its factors are spliced into the result in order (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Mul(mut factors), Self::Mul(rhs_factors)) => {
                factors.extend(rhs_factors);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Negates the expression. Numbers are negated directly; anything else gains a leading factor of
/// -1.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Primary(Primary::Integer(int)) => Self::Primary(Primary::Integer(-int)),
            Self::Primary(Primary::Float(float)) => Self::Primary(Primary::Float(-float)),
            Self::Mul(mut factors) => {
                factors.insert(0, Self::Primary(Primary::Integer(int(-1))));
                Self::Mul(factors)
            },
            other => Self::Mul(vec![Self::Primary(Primary::Integer(int(-1))), other]),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use symalg_parser::parser::Parser;

    fn convert(source: &str) -> SymExpr {
        let ast = Parser::new(source).try_parse_full::<AstExpr>().unwrap();
        SymExpr::try_from(ast).unwrap()
    }

    fn integer(n: i32) -> SymExpr {
        SymExpr::Primary(Primary::Integer(int(n)))
    }

    fn sym(name: &str) -> SymExpr {
        SymExpr::Primary(Primary::Symbol(name.to_string()))
    }

    fn recip(expr: SymExpr) -> SymExpr {
        SymExpr::Exp(Box::new(expr), Box::new(integer(-1)))
    }

    #[test]
    fn flatten_add() {
        let SymExpr::Add(terms) = convert("x + (y + z)") else {
            panic!("expected sum");
        };
        assert_eq!(terms, vec![sym("x"), sym("y"), sym("z")]);
    }

    #[test]
    fn flatten_mul_in_source_order() {
        let SymExpr::Mul(factors) = convert("2x(y z)") else {
            panic!("expected product");
        };
        assert_eq!(factors, vec![integer(2), sym("x"), sym("y"), sym("z")]);
    }

    #[test]
    fn subtraction() {
        assert_eq!(convert("x - y"), SymExpr::Add(vec![
            sym("x"),
            SymExpr::Mul(vec![integer(-1), sym("y")]),
        ]));
        assert_eq!(convert("x - 3"), SymExpr::Add(vec![sym("x"), integer(-3)]));
    }

    #[test]
    fn division() {
        assert_eq!(convert("x/y"), SymExpr::Mul(vec![sym("x"), recip(sym("y"))]));
        assert_eq!(convert("2x/(y + 1)"), SymExpr::Mul(vec![
            integer(2),
            sym("x"),
            recip(SymExpr::Add(vec![sym("y"), integer(1)])),
        ]));
    }

    #[test]
    fn negation() {
        assert_eq!(convert("-5"), integer(-5));
        assert_eq!(convert("-x"), SymExpr::Mul(vec![integer(-1), sym("x")]));
        assert_eq!(convert("-(2x)"), SymExpr::Mul(vec![integer(-1), integer(2), sym("x")]));
        assert_eq!(convert("+x"), sym("x"));
    }

    #[test]
    fn no_numeric_folding() {
        assert_eq!(convert("2 + 3"), SymExpr::Add(vec![integer(2), integer(3)]));
        assert_eq!(convert("2*3"), SymExpr::Mul(vec![integer(2), integer(3)]));
    }

    #[test]
    fn calls() {
        assert_eq!(convert("arcsin(x)"), SymExpr::call("asin", vec![sym("x")]));
        assert_eq!(convert("ln x"), SymExpr::call("log", vec![sym("x")]));
        assert_eq!(convert("Max(x, 2)"), SymExpr::call("Max", vec![sym("x"), integer(2)]));
    }

    #[test]
    fn function_power() {
        assert_eq!(convert("sin^2 x"), SymExpr::Exp(
            Box::new(SymExpr::call("sin", vec![sym("x")])),
            Box::new(integer(2)),
        ));
    }

    #[test]
    fn factorials() {
        assert_eq!(convert("n!"), SymExpr::call("factorial", vec![sym("n")]));
        assert_eq!(convert("n!!"), SymExpr::call("factorial2", vec![sym("n")]));
    }

    #[test]
    fn repeating_decimal_literal() {
        assert_eq!(convert("0.[3]"), make_fraction(integer(1), integer(3)));
    }

    #[test]
    fn strict_equality_ignores_order() {
        assert_eq!(convert("2x"), convert("x*2"));
        assert_eq!(convert("a + b + c"), convert("c + a + b"));
    }

    #[test]
    fn strict_equality_counts_repetitions() {
        assert_ne!(
            SymExpr::Add(vec![sym("x"), sym("x"), sym("y")]),
            SymExpr::Add(vec![sym("x"), sym("y"), sym("y")]),
        );
        assert_ne!(convert("x + x"), convert("2x"));
    }

    #[test]
    fn downgrade() {
        assert_eq!(SymExpr::Add(Vec::new()).downgrade(), integer(0));
        assert_eq!(SymExpr::Mul(Vec::new()).downgrade(), integer(1));
        assert_eq!(SymExpr::Mul(vec![sym("x")]).downgrade(), sym("x"));
        assert_eq!(convert("x y").downgrade(), convert("x*y"));
    }

    #[test]
    fn free_symbols() {
        let expr = convert("2x^2 + sin(θ y) + z!");
        assert_eq!(expr.symbols().into_iter().collect::<Vec<_>>(), vec!["x", "y", "z", "θ"]);
    }

    #[test]
    fn post_order() {
        let expr = convert("x + y^2");
        let visited = expr.post_order_iter().map(|expr| expr.to_string()).collect::<Vec<_>>();
        assert_eq!(visited, vec!["x", "y", "2", "y**2", "x + y**2"]);
    }

    #[test]
    fn huge_float_is_rejected() {
        let ast = Parser::new("1e99999999999999999999").try_parse_full::<AstExpr>().unwrap();
        let err = SymExpr::try_from(ast).unwrap_err();
        assert_eq!(format!("{:?}", err.kind), r#"InvalidNumber { literal: "1e99999999999999999999" }"#);
    }
}
