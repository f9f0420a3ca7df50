use crate::{
    parser::{
        error::{Error, InvalidIntegerLiteral, NonFatal, UnclosedRepetend, UnexpectedToken},
        token::{Float, Int, Name},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
    return_if_ok,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An integer literal, represented as a [`String`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitInt {
    /// The value of the integer literal as a string.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl<'source> Parse<'source> for LitInt {
    fn std_parse(
        input: &mut Parser<'source>,
        recoverable_errors: &mut Vec<Error>
    ) -> Result<Self, Vec<Error>> {
        let int = input.try_parse::<Int>().forward_errors(recoverable_errors)?;

        if int.lexeme.len() > 1 && int.lexeme.starts_with('0') {
            let trimmed = int.lexeme.trim_start_matches('0');
            recoverable_errors.push(Error::new(vec![int.span.clone()], InvalidIntegerLiteral {
                suggestion: if trimmed.is_empty() { "0" } else { trimmed }.to_owned(),
            }));
        }

        Ok(Self {
            value: int.lexeme.to_owned(),
            span: int.span,
        })
    }
}

impl std::fmt::Display for LitInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A floating-point literal, represented as a [`String`]. The literal may use scientific
/// notation, such as `1.5e-3`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitFloat {
    /// The value of the floating-point literal as a string.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl<'source> Parse<'source> for LitFloat {
    fn std_parse(
        input: &mut Parser<'source>,
        recoverable_errors: &mut Vec<Error>
    ) -> Result<Self, Vec<Error>> {
        input
            .try_parse::<Float>()
            .map(|float| Self {
                value: float.lexeme.to_owned(),
                span: float.span,
            })
            .forward_errors(recoverable_errors)
    }
}

impl std::fmt::Display for LitFloat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A decimal with repeating digits, such as `0.1[6]` (one sixth) or `0.[3]` (one third).
///
/// The repeating digits directly follow a decimal point, with no whitespace in between. At least
/// one integer digit is required, since a lone `.` is not a number: `.[3]` is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitRepeating {
    /// The non-repeating part of the decimal, such as `0.1`.
    pub value: String,

    /// The digits that repeat forever, such as `6`.
    pub repetend: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl LitRepeating {
    /// Returns the integer part and the non-repeating fractional digits of the decimal.
    pub fn parts(&self) -> (&str, &str) {
        self.value.split_once('.').unwrap_or((&self.value, ""))
    }
}

impl<'source> Parse<'source> for LitRepeating {
    fn std_parse(
        input: &mut Parser<'source>,
        recoverable_errors: &mut Vec<Error>
    ) -> Result<Self, Vec<Error>> {
        let float = input.try_parse::<Float>().forward_errors(recoverable_errors)?;
        if !float.lexeme.contains('.') || float.lexeme.contains(['e', 'E']) {
            return Err(vec![Error::new(vec![float.span], NonFatal)]);
        }

        let open = input.next_token_raw().map_err(|e| vec![e])?;
        if open.kind != TokenKind::OpenSquare {
            return Err(vec![Error::new(vec![open.span], NonFatal)]);
        }

        let digits = input.next_token_raw().map_err(|e| vec![e])?;
        if digits.kind != TokenKind::Int {
            return Err(vec![Error::new(vec![digits.span], UnexpectedToken {
                expected: &[TokenKind::Int],
                found: digits.kind,
            })]);
        }

        let end = match input.current_token() {
            Some(close) if close.kind == TokenKind::CloseSquare => {
                let end = close.span.end;
                input.next_token_raw().map_err(|e| vec![e])?;
                end
            },
            _ => {
                recoverable_errors.push(Error::new(vec![open.span], UnclosedRepetend));
                digits.span.end
            },
        };

        Ok(Self {
            value: float.lexeme.to_owned(),
            repetend: digits.lexeme.to_owned(),
            span: float.span.start..end,
        })
    }
}

impl std::fmt::Display for LitRepeating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[{}]", self.value, self.repetend)
    }
}

/// A symbol / identifier literal. Symbols are used to represent variables and functions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl<'source> Parse<'source> for LitSym {
    fn std_parse(
        input: &mut Parser<'source>,
        recoverable_errors: &mut Vec<Error>
    ) -> Result<Self, Vec<Error>> {
        input.try_parse::<Name>()
            .map(|name| Self {
                name: name.lexeme.to_owned(),
                span: name.span,
            })
            .forward_errors(recoverable_errors)
    }
}

impl std::fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Represents a literal value.
///
/// A literal is any value that is written directly into the source code, such as the number `1`
/// or the symbol `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// An integer literal.
    Integer(LitInt),

    /// A floating-point literal.
    Float(LitFloat),

    /// A decimal with repeating digits.
    Repeating(LitRepeating),

    /// A symbol / identifier literal.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Integer(int) => int.span.clone(),
            Literal::Float(float) => float.span.clone(),
            Literal::Repeating(repeating) => repeating.span.clone(),
            Literal::Symbol(name) => name.span.clone(),
        }
    }
}

impl<'source> Parse<'source> for Literal {
    fn std_parse(
        input: &mut Parser<'source>,
        recoverable_errors: &mut Vec<Error>
    ) -> Result<Self, Vec<Error>> {
        let _ = return_if_ok!(input.try_parse().map(Literal::Integer).forward_errors(recoverable_errors));
        let _ = return_if_ok!(input.try_parse().map(Literal::Repeating).forward_errors(recoverable_errors));
        let _ = return_if_ok!(input.try_parse().map(Literal::Float).forward_errors(recoverable_errors));
        input.try_parse().map(Literal::Symbol).forward_errors(recoverable_errors)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(int) => int.fmt(f),
            Literal::Float(float) => float.fmt(f),
            Literal::Repeating(repeating) => repeating.fmt(f),
            Literal::Symbol(name) => name.fmt(f),
        }
    }
}
