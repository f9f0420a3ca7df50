//! Tools to build fractions.

use crate::primitive::{int, int_from_str};
use crate::symbolic::expr::{Primary, SymExpr};
use rug::Integer;

/// Create a [`SymExpr`] representing a fraction with the given numerator and denominator.
///
/// The representation is the numerator multiplied by the denominator raised to the power of -1.
/// If the numerator is already a [`SymExpr::Mul`], the reciprocal is appended to its factors.
pub fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    numerator *
        SymExpr::Exp(
            Box::new(denominator),
            Box::new(SymExpr::Primary(Primary::Integer(int(-1)))),
        )
}

/// Creates the exact rational value of a repeating decimal, in lowest terms.
///
/// The decimal is given as its integer digits, the fractional digits that do not repeat, and the
/// digits that repeat forever. For `0.1[6]`, these are `0`, `1`, and `6`, giving `1/6`.
///
/// Returns [`None`] if any of the parts is not a string of decimal digits.
pub fn repeating_decimal(integer: &str, fraction: &str, repetend: &str) -> Option<SymExpr> {
    let with_repetend = int_from_str(&format!("{}{}{}", integer, fraction, repetend))?;
    let without_repetend = int_from_str(&format!("0{}{}", integer, fraction))?;
    let mut numerator = with_repetend - without_repetend;

    let fraction_len = u32::try_from(fraction.len()).ok()?;
    let repetend_len = u32::try_from(repetend.len()).ok()?;
    let mut denominator = Integer::from(Integer::u_pow_u(10, fraction_len))
        * (Integer::from(Integer::u_pow_u(10, repetend_len)) - 1u32);

    let gcd = Integer::from(numerator.gcd_ref(&denominator));
    if gcd > 1 {
        numerator /= &gcd;
        denominator /= &gcd;
    }

    let numerator = SymExpr::Primary(Primary::Integer(numerator));
    if denominator == 1 {
        Some(numerator)
    } else {
        Some(make_fraction(numerator, SymExpr::Primary(Primary::Integer(denominator))))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn integer(n: i32) -> SymExpr {
        SymExpr::Primary(Primary::Integer(int(n)))
    }

    #[test]
    fn fraction_of_primaries() {
        assert_eq!(make_fraction(integer(1), integer(3)), SymExpr::Mul(vec![
            integer(1),
            SymExpr::Exp(Box::new(integer(3)), Box::new(integer(-1))),
        ]));
    }

    #[test]
    fn one_third() {
        assert_eq!(repeating_decimal("0", "", "3"), Some(make_fraction(integer(1), integer(3))));
    }

    #[test]
    fn one_sixth() {
        assert_eq!(repeating_decimal("0", "1", "6"), Some(make_fraction(integer(1), integer(6))));
    }

    #[test]
    fn mixed_repeating_decimal() {
        // 1.2343434... = 611/495
        assert_eq!(repeating_decimal("1", "2", "34"), Some(make_fraction(integer(611), integer(495))));
    }

    #[test]
    fn repeating_nines_are_whole() {
        assert_eq!(repeating_decimal("1", "", "9"), Some(integer(2)));
    }

    #[test]
    fn no_integer_digits() {
        assert_eq!(repeating_decimal("", "5", "0"), Some(make_fraction(integer(1), integer(2))));
    }
}
