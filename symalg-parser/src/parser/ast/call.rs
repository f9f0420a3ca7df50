use crate::{
    parser::{
        ast::{binary::Binary, expr::Expr, helper::Delimited, literal::LitSym, unary::Unary},
        error::{Error, MissingFunctionArgument, NonFatal, UnclosedParenthesis},
        names,
        token::{op::Precedence, CloseParen, Comma, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call, such as `Max(x, 2)`, `sin x`, or `sin^2(x)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The power written directly after the function name, as in `sin^2 x`. The call is raised
    /// to this power.
    pub power: Option<Box<Expr>>,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses the power after a function name, if there is one.
    fn parse_power(
        input: &mut Parser,
        recoverable_errors: &mut Vec<Error>
    ) -> Result<Option<Expr>, Vec<Error>> {
        let is_power = match input.peek_token() {
            Some(token) => token.kind == TokenKind::Exp
                || (token.kind == TokenKind::Caret && input.transformations().convert_xor),
            None => false,
        };
        if !is_power {
            return Ok(None);
        }

        input.next_token().map_err(|e| vec![e])?;
        Unary::parse_or_lower(input, recoverable_errors).map(Some)
    }

    /// Parses the parenthesized, comma-separated arguments of the call. Returns the arguments
    /// and the end of the span.
    fn parse_paren_args(
        input: &mut Parser,
        recoverable_errors: &mut Vec<Error>
    ) -> Result<(Vec<Expr>, usize), Vec<Error>> {
        let open_paren = input.try_parse::<OpenParen>().forward_errors(recoverable_errors)?;
        let args = input.try_parse::<Delimited<Comma, Expr>>()
            .forward_errors(recoverable_errors)?
            .values;

        let end = match input.try_parse::<CloseParen>().forward_errors(recoverable_errors) {
            Ok(close_paren) => close_paren.span.end,
            Err(_) => {
                recoverable_errors.push(Error::new(
                    vec![open_paren.span.clone()],
                    UnclosedParenthesis { opening: true },
                ));
                args.last().map_or(open_paren.span.end, |arg| arg.span().end)
            },
        };

        Ok((args, end))
    }
}

impl<'source> Parse<'source> for Call {
    fn std_parse(
        input: &mut Parser<'source>,
        recoverable_errors: &mut Vec<Error>
    ) -> Result<Self, Vec<Error>> {
        let name = input.try_parse::<LitSym>().forward_errors(recoverable_errors)?;
        let transformations = *input.transformations();
        let known = names::is_function(&name.name);
        let paren_follows = input.peek_token().is_some_and(|token| token.kind == TokenKind::OpenParen);

        // with implicit multiplication, `x(y)` is `x*(y)` unless `x` names a function
        if !known && (transformations.implicit_multiplication || !paren_follows) {
            return Err(vec![Error::new(vec![name.span], NonFatal)]);
        }

        let power = if known && transformations.function_exponentiation {
            Self::parse_power(input, recoverable_errors)?
        } else {
            None
        };

        let paren_follows = input.peek_token().is_some_and(|token| token.kind == TokenKind::OpenParen);
        let mut end = power.as_ref().map_or(name.span.end, |power| power.span().end);
        let args = if paren_follows {
            let (args, paren_end) = Self::parse_paren_args(input, recoverable_errors)?;
            end = paren_end;
            args
        } else if transformations.implicit_application {
            // the argument is a single operand with any power chain, so `sin x^2` is
            // `sin(x^2)` while `sin 2x` is `sin(2)*x`
            let arg = input.try_parse_with_fn(|input, recoverable_errors| {
                let lhs = Unary::parse_left_or_operand(input, recoverable_errors)?;
                Ok(Binary::parse_expr(input, recoverable_errors, lhs, Precedence::Exp)?.0)
            }).forward_errors(recoverable_errors);
            match arg {
                Ok(arg) => {
                    end = arg.span().end;
                    vec![arg]
                },
                Err(_) => Vec::new(),
            }
        } else {
            Vec::new()
        };

        if args.is_empty() {
            recoverable_errors.push(Error::new(vec![name.span.clone()], MissingFunctionArgument {
                name: name.name.clone(),
            }));
        }

        tracing::trace!(name = %name.name, args = args.len(), has_power = power.is_some(), "parsed call");
        Ok(Self {
            span: name.span.start..end,
            name,
            power: power.map(Box::new),
            args,
        })
    }
}

impl std::fmt::Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.name.fmt(f)?;
        if let Some(power) = &self.power {
            write!(f, "**{}", power)?;
        }
        write!(f, "(")?;
        if let Some((last, args)) = self.args.split_last() {
            for arg in args {
                arg.fmt(f)?;
                write!(f, ", ")?;
            }
            last.fmt(f)?;
        }
        write!(f, ")")
    }
}
