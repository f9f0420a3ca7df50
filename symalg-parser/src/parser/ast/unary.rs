use crate::{
    parser::{
        ast::{binary::Binary, expr::{Expr, Primary}},
        error::{Error, NonFatal},
        token::op::{Associativity, UnaryOp},
        Parser,
        ParseResult,
    },
    return_if_ok,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Attempt to parse a unary operator with the correct associativity. Returns a non-fatal error if
/// the operator is not of the correct associativity.
fn try_parse_unary_op(input: &mut Parser, associativity: Associativity) -> Result<UnaryOp, Vec<Error>> {
    input.try_parse_then::<UnaryOp, _>(|op, input| {
        if op.associativity() == associativity {
            ParseResult::Ok(())
        } else {
            ParseResult::Unrecoverable(vec![input.error(NonFatal)])
        }
    }).forward_errors(&mut Vec::new())
}

/// A unary expression, such as `-x` or `3!`. Unary expressions can include nested expressions.
///
/// Unary expressions do not directly implement [`Parse`]. Prefix operators are parsed with
/// [`Unary::parse_right`], and postfix operators with [`Unary::parse_left_or_operand`], which
/// returns the bare operand when no operator follows it.
///
/// [`Parse`]: crate::parser::Parse
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression (left or right, depending on the associativity).
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parse a prefix unary expression, such as `-x**2`.
    ///
    /// The operand extends over every operator that binds tighter than the prefix operator, so
    /// `-x**2` is `-(x**2)`, while `-2x` stops after `2`.
    pub fn parse_right(input: &mut Parser, recoverable_errors: &mut Vec<Error>) -> Result<Self, Vec<Error>> {
        let op = try_parse_unary_op(input, Associativity::Right)?;
        let op_precedence = op.precedence();
        let start_span = op.span.start;
        let operand = input.nested(recoverable_errors, |input, recoverable_errors| {
            let lhs = Unary::parse_or_lower(input, recoverable_errors)?;
            Ok(Binary::parse_expr(input, recoverable_errors, lhs, op_precedence)?.0)
        })?;
        let end_span = operand.span().end;
        Ok(Self {
            operand: Box::new(operand),
            op,
            span: start_span..end_span,
        })
    }

    /// Parse a postfix unary expression, such as `3!` or `n!!`.
    ///
    /// The operand must be parsed before we know whether an operator follows it. If there is no
    /// operator, the parsed [`Primary`] is returned as-is instead of backtracking.
    pub fn parse_left_or_operand(input: &mut Parser, recoverable_errors: &mut Vec<Error>) -> Result<Expr, Vec<Error>> {
        let operand = input.try_parse::<Primary>().forward_errors(recoverable_errors)?;
        let start_span = operand.span().start;

        let mut result = match try_parse_unary_op(input, Associativity::Left) {
            Ok(op) => Self {
                span: start_span..op.span.end,
                operand: Box::new(operand.into()),
                op,
            },
            Err(_) => return Ok(operand.into()),
        };

        while let Ok(next_op) = try_parse_unary_op(input, Associativity::Left) {
            result = Self {
                span: start_span..next_op.span.end,
                operand: Box::new(Expr::Unary(result)),
                op: next_op,
            };
        }

        Ok(Expr::Unary(result))
    }

    /// Parses a unary expression, or lower precedence expressions.
    pub fn parse_or_lower(
        input: &mut Parser,
        recoverable_errors: &mut Vec<Error>
    ) -> Result<Expr, Vec<Error>> {
        let _ = return_if_ok!(input
            .try_parse_with_fn(Self::parse_right)
            .map(Expr::Unary)
            .forward_errors(recoverable_errors));
        Self::parse_left_or_operand(input, recoverable_errors)
    }
}

impl std::fmt::Display for Unary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.op.associativity() {
            Associativity::Left => {
                self.operand.fmt(f)?;
                self.op.fmt(f)
            },
            Associativity::Right => {
                self.op.fmt(f)?;
                self.operand.fmt(f)
            },
        }
    }
}
