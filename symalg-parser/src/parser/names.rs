//! Names with a fixed meaning: known functions, Greek letters, and constants.
//!
//! Known functions are always parsed as function calls, and known names are never split into
//! single-letter symbols.

use std::ops::Range;

/// Functions recognized by the parser.
pub const FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc",
    "asin", "acos", "atan", "acot", "asec", "acsc",
    "arcsin", "arccos", "arctan",
    "sinh", "cosh", "tanh", "coth",
    "asinh", "acosh", "atanh",
    "exp", "log", "ln", "sqrt", "cbrt",
    "abs", "sign", "floor", "ceiling",
    "factorial", "factorial2", "gamma",
    "re", "im", "arg", "conjugate",
    "Min", "Max", "Xor",
];

/// Spelled-out Greek letters that are parsed as a single symbol. `gamma` is missing because it
/// names the gamma function.
pub const GREEK_LETTERS: &[&str] = &[
    "alpha", "beta", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa", "lambda", "mu",
    "nu", "xi", "omicron", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi", "omega",
];

/// Named constants.
pub const CONSTANTS: &[&str] = &["oo"];

/// Functions that are also recognized when embedded in a longer name, as in `sinx` or `2logy`.
const EMBEDDED_FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc",
    "asin", "acos", "atan", "acot", "asec", "acsc",
    "arcsin", "arccos", "arctan",
    "sinh", "cosh", "tanh", "coth",
    "asinh", "acosh", "atanh",
    "exp", "log", "ln", "sqrt", "cbrt",
];

/// Returns true if the name is a known function.
pub fn is_function(name: &str) -> bool {
    FUNCTIONS.contains(&name)
}

/// Returns true if the name is a known function, Greek letter, or constant.
pub fn is_known(name: &str) -> bool {
    is_function(name) || GREEK_LETTERS.contains(&name) || CONSTANTS.contains(&name)
}

/// Returns the canonical name of a function, resolving aliases such as `arcsin` and `ln`.
pub fn canonical_function(name: &str) -> &str {
    match name {
        "arcsin" => "asin",
        "arccos" => "acos",
        "arctan" => "atan",
        "ln" => "log",
        _ => name,
    }
}

/// Returns true if the name should be split into multiple symbols.
///
/// Names of one character, names containing a digit or underscore (such as `x1`, `x2y`, or
/// `x_a`), and known names are kept whole. A digit anywhere in the name marks it as a single
/// indexed symbol, so `x2y` is never read as `x*2*y`.
pub fn is_splittable(name: &str) -> bool {
    name.chars().nth(1).is_some()
        && !name.chars().any(|c| c.is_ascii_digit() || c == '_')
        && !is_known(name)
}

/// Splits a name into the byte ranges of its pieces.
///
/// At each position, the longest embedded function or Greek letter starting there becomes one
/// piece; otherwise the next character is a piece on its own. Splitting never breaks up a known
/// name, so `sinx` is `sin` applied to `x` rather than the product `s*i*n*x`.
pub fn split_name(name: &str) -> Vec<Range<usize>> {
    let mut pieces = Vec::new();
    let mut start = 0;

    while let Some(c) = name[start..].chars().next() {
        let rest = &name[start..];
        let len = EMBEDDED_FUNCTIONS
            .iter()
            .chain(GREEK_LETTERS)
            .filter(|known| rest.starts_with(*known))
            .map(|known| known.len())
            .max()
            .unwrap_or_else(|| c.len_utf8());
        pieces.push(start..start + len);
        start += len;
    }

    pieces
}
