use crate::parser::{
    ast::expr::Expr,
    error::{EmptyParenthesis, Error, UnclosedParenthesis},
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression, consuming the [`Paren`].
    pub fn into_innermost(self) -> Expr {
        let mut inner = self.expr;
        while let Expr::Paren(paren) = *inner {
            inner = paren.expr;
        }
        *inner
    }
}

impl<'source> Parse<'source> for Paren {
    fn std_parse(
        input: &mut Parser<'source>,
        recoverable_errors: &mut Vec<Error>
    ) -> Result<Self, Vec<Error>> {
        let open_paren = input.try_parse::<OpenParen>().forward_errors(recoverable_errors)?;

        if let Ok(close_paren) = input.try_parse::<CloseParen>().forward_errors(recoverable_errors) {
            return Err(vec![Error::new(
                vec![open_paren.span.start..close_paren.span.end],
                EmptyParenthesis,
            )]);
        }

        let expr = match input.try_parse::<Expr>().forward_errors(recoverable_errors) {
            Ok(expr) => expr,
            Err(_) if input.peek_token().is_none() => {
                return Err(vec![Error::new(
                    vec![open_paren.span],
                    UnclosedParenthesis { opening: true },
                )]);
            },
            Err(errs) => return Err(errs),
        };

        let end = match input.try_parse::<CloseParen>().forward_errors(recoverable_errors) {
            Ok(close_paren) => close_paren.span.end,
            Err(_) => {
                recoverable_errors.push(Error::new(
                    vec![open_paren.span.clone()],
                    UnclosedParenthesis { opening: true },
                ));
                expr.span().end
            },
        };

        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..end,
        })
    }
}

impl std::fmt::Display for Paren {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(")?;
        self.expr.fmt(f)?;
        write!(f, ")")
    }
}
