use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::{Error, NonFatal},
    token::op::{Associativity, BinOp, BinOpKind, Precedence},
    Parser,
    ParseResult,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary operator, written or implied.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BinOpExt {
    /// A binary operator, such as `+` or `*`.
    Op(BinOp),

    /// Implicit multiplication, such as `2x` or `x(x + 1)`.
    ///
    /// This is not a real operator, but it is treated as one for the purposes of parsing.
    ImplicitMultiplication,
}

impl BinOpExt {
    /// Returns the precedence of the binary operator.
    fn precedence(&self) -> Precedence {
        match self {
            BinOpExt::Op(op) => op.precedence(),
            BinOpExt::ImplicitMultiplication => Precedence::Factor,
        }
    }
}

impl From<BinOp> for BinOpExt {
    fn from(op: BinOp) -> Self {
        BinOpExt::Op(op)
    }
}

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    ///
    /// In `1 + 2 * 3`, the first right-hand-side is `2`. The operator after it, `*`, binds
    /// tighter than `+`, so [`Self::parse_expr`] is called again with `2` as its left-hand-side,
    /// producing `2 * 3` as the right-hand-side of `1 +`. In `3 * 2 + 1`, the following `+`
    /// binds looser, so `3 * 2` is built first and the outer loop of [`Self::parse_expr`] picks
    /// up `+ 1`.
    ///
    /// When no operator follows and implicit multiplication is enabled, a multiplication is
    /// assumed if the previous operator binds looser than multiplication, as in `1 + 2x`.
    ///
    /// Since that multiplication is created out of thin air, the loop must stop once
    /// [`Self::parse_expr`] hands back its left-hand-side unchanged. For `1 + 2x`, after `2x` is
    /// built there is still no operator, and another attempt would parse nothing at all. The
    /// `changed` flag returned by [`Self::parse_expr`] detects this.
    fn complete_rhs(
        input: &mut Parser,
        recoverable_errors: &mut Vec<Error>,
        lhs: Expr,
        op: BinOpExt,
        mut rhs: Expr
    ) -> Result<Expr, Vec<Error>> {
        let precedence = op.precedence();

        loop {
            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            if let Ok(next_op) = input_ahead.try_parse::<BinOp>().forward_errors(recoverable_errors) {
                if next_op.precedence() > precedence || next_op.associativity() == Associativity::Right {
                    rhs = input.nested(recoverable_errors, |input, recoverable_errors| {
                        Self::parse_expr(input, recoverable_errors, rhs, next_op.precedence())
                    })?.0;
                } else {
                    // lower precedence, or equal precedence and left-associative, as in
                    // `1 * 2 + 3` or `1 * 2 * 3`; `lhs` becomes `1 * 2`
                    break;
                }
            } else {
                if !input.transformations().implicit_multiplication
                    || precedence >= BinOpKind::Mul.precedence() {
                    break;
                }

                let (expr, changed) = input.nested(recoverable_errors, |input, recoverable_errors| {
                    Self::parse_expr(input, recoverable_errors, rhs, BinOpKind::Mul.precedence())
                })?;

                // `rhs` was moved into `Self::parse_expr` above
                rhs = expr;

                if !changed {
                    break;
                }
            }
        }

        let (start_span, end_span) = (lhs.span().start, rhs.span().end);
        let op = match op {
            BinOpExt::Op(op) => op,
            BinOpExt::ImplicitMultiplication => BinOp {
                kind: BinOpKind::Mul,
                implicit: true,
                span: lhs.span().end..rhs.span().start,
            },
        };
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span: start_span..end_span,
        }))
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator and a right-hand-side, consuming every operator that binds at
    /// least as tightly as `precedence`.
    ///
    /// The returned flag is true if anything was appended to `lhs`. See [`Self::complete_rhs`].
    pub fn parse_expr(
        input: &mut Parser,
        recoverable_errors: &mut Vec<Error>,
        mut lhs: Expr,
        precedence: Precedence
    ) -> Result<(Expr, bool), Vec<Error>> {
        let mut changed = false;
        loop {
            let mut input_ahead = input.clone();
            if let Ok(op) = input_ahead.try_parse_then::<BinOp, _>(|bin_op, input| {
                if bin_op.precedence() >= precedence {
                    ParseResult::Ok(())
                } else {
                    ParseResult::Unrecoverable(vec![input.error(NonFatal)])
                }
            }).forward_errors(recoverable_errors) {
                input.set_cursor(&input_ahead);
                let rhs = Unary::parse_or_lower(input, recoverable_errors)?;
                lhs = Self::complete_rhs(input, recoverable_errors, lhs, op.into(), rhs)?;
            } else if input.transformations().implicit_multiplication
                && BinOpKind::Mul.precedence() >= precedence {
                // stop if we got here because the next operator binds too loosely, rather than
                // because there is no operator at all
                if input_ahead.try_parse_then::<BinOp, _>(|op, input| {
                    if op.precedence() > BinOpKind::Mul.precedence() {
                        ParseResult::Unrecoverable(vec![input.error(NonFatal)])
                    } else {
                        ParseResult::Ok(())
                    }
                }).is_ok() {
                    break;
                }

                // no expression after `lhs` means no implicit multiplication
                let mut inner_recoverable_errors = Vec::new();
                let Ok(rhs) = Unary::parse_or_lower(&mut input_ahead, &mut inner_recoverable_errors) else {
                    break;
                };

                if rhs.is_implicit_mul_target() {
                    // this is the correct branch, so keep the errors found while parsing `rhs`
                    recoverable_errors.extend(inner_recoverable_errors);
                    input.set_cursor(&input_ahead);
                    lhs = Self::complete_rhs(input, recoverable_errors, lhs, BinOpExt::ImplicitMultiplication, rhs)?;
                } else {
                    break;
                }
            } else {
                break;
            }

            changed = true;
        }

        Ok((lhs, changed))
    }
}

impl std::fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.lhs.fmt(f)?;
        self.op.fmt(f)?;
        self.rhs.fmt(f)
    }
}
