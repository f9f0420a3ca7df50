//! Functions to construct [`Integer`]s and [`Float`]s from literals, and to write them back out.

use rug::{Float, Integer};

/// The number of bits of precision to use for [`Float`]s.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string of decimal digits.
pub fn int_from_str(s: &str) -> Option<Integer> {
    Integer::from_str_radix(s, 10).ok()
}

/// Creates a finite [`Float`] from a string slice, such as `1.5e-3`.
pub fn float_from_str(s: &str) -> Option<Float> {
    let float = Float::with_val(PRECISION, Float::parse(s).ok()?);
    float.is_finite().then_some(float)
}

/// Returns the shortest decimal representation of the [`Float`] that reads back as the same
/// value. The result always contains a decimal point, so it is never mistaken for an integer.
pub fn float_to_string(float: &Float) -> String {
    let max_digits = (f64::from(PRECISION) * std::f64::consts::LOG10_2).ceil() as usize + 1;
    let digits = (1..=max_digits)
        .map(|n| float.to_string_radix(10, Some(n)))
        .find(|s| float_from_str(s).is_some_and(|parsed| &parsed == float))
        .unwrap_or_else(|| float.to_string_radix(10, None));

    let (mantissa, exponent) = digits.split_at(digits.find(['e', 'E']).unwrap_or(digits.len()));
    let mut mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').to_owned()
    } else {
        format!("{}.", mantissa)
    };
    if mantissa.ends_with('.') {
        mantissa.push('0');
    }
    mantissa + exponent
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn parse_integers() {
        assert_eq!(int_from_str("144"), Some(int(144)));
        assert_eq!(
            int_from_str("123456789012345678901234567890").map(|n| n.to_string()),
            Some("123456789012345678901234567890".to_string()),
        );
        assert_eq!(int_from_str("1.5"), None);
    }

    #[test]
    fn parse_floats() {
        assert_eq!(float_from_str("0.5"), Some(Float::with_val(PRECISION, 0.5)));
        assert_eq!(float_from_str("1.5e1"), Some(Float::with_val(PRECISION, 15)));
        assert_eq!(float_from_str("abc"), None);
    }

    #[test]
    fn float_strings_read_back() {
        for literal in ["0.1", "3.14159", "2.5e-8", "1e30", "15.0", "-0.75"] {
            let float = float_from_str(literal).unwrap();
            let written = float_to_string(&float);
            assert!(written.contains('.'), "{} has no decimal point", written);
            assert_eq!(float_from_str(&written), Some(float));
        }
    }
}
