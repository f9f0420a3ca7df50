//! Grammar transformations applied on top of the standard expression grammar.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The set of optional grammar rewrites the [`Parser`] applies.
///
/// The standard rules (automatic symbols and numbers, factorial notation, repeating decimals, and
/// `**` for exponentiation) are always applied. The [`Default`] value enables every rewrite,
/// which is the preset used by [`Parser::new`].
///
/// [`Parser`]: super::Parser
/// [`Parser::new`]: super::Parser::new
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transformations {
    /// Split multi-letter names that are not known functions or constants into several symbols,
    /// so that `xy` is read as `x y`.
    pub split_symbols: bool,

    /// Insert a multiplication between adjacent operands, so that `2x` is read as `2*x` and
    /// `x(y + 1)` as `x*(y + 1)`.
    pub implicit_multiplication: bool,

    /// Apply a known function to the operand that follows it when no parentheses are given, so
    /// that `sin x` is read as `sin(x)`.
    pub implicit_application: bool,

    /// Allow a power directly after a function name, so that `sin^2 x` is read as `sin(x)^2`.
    pub function_exponentiation: bool,

    /// Read `^` as exponentiation. Otherwise, `^` is bitwise XOR.
    pub convert_xor: bool,
}

impl Default for Transformations {
    fn default() -> Self {
        Self {
            split_symbols: true,
            implicit_multiplication: true,
            implicit_application: true,
            function_exponentiation: true,
            convert_xor: true,
        }
    }
}

impl Transformations {
    /// The standard grammar with no optional rewrites: `2x` is an error and `^` is XOR.
    pub fn standard() -> Self {
        Self {
            split_symbols: false,
            implicit_multiplication: false,
            implicit_application: false,
            function_exponentiation: false,
            convert_xor: false,
        }
    }

    /// Wraps the given [`Transformations`] into a builder for further customization.
    pub fn into_builder(self) -> TransformationsBuilder {
        TransformationsBuilder(self)
    }
}

/// Helper struct to build a [`Transformations`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformationsBuilder(Transformations);

impl TransformationsBuilder {
    /// Creates a new builder with every rewrite enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether multi-letter names are split into several symbols.
    pub fn split_symbols(mut self, split_symbols: bool) -> Self {
        self.0.split_symbols = split_symbols;
        self
    }

    /// Sets whether adjacent operands are multiplied.
    pub fn implicit_multiplication(mut self, implicit_multiplication: bool) -> Self {
        self.0.implicit_multiplication = implicit_multiplication;
        self
    }

    /// Sets whether known functions can be applied without parentheses.
    pub fn implicit_application(mut self, implicit_application: bool) -> Self {
        self.0.implicit_application = implicit_application;
        self
    }

    /// Sets whether a power can follow a function name.
    pub fn function_exponentiation(mut self, function_exponentiation: bool) -> Self {
        self.0.function_exponentiation = function_exponentiation;
        self
    }

    /// Sets whether `^` means exponentiation.
    pub fn convert_xor(mut self, convert_xor: bool) -> Self {
        self.0.convert_xor = convert_xor;
        self
    }

    /// Builds the [`Transformations`] struct.
    pub fn build(self) -> Transformations {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn builder_overrides_preset() {
        let transformations = TransformationsBuilder::new()
            .convert_xor(false)
            .split_symbols(false)
            .build();

        assert_eq!(transformations, Transformations {
            split_symbols: false,
            implicit_multiplication: true,
            implicit_application: true,
            function_exponentiation: true,
            convert_xor: false,
        });
    }

    #[test]
    fn standard_into_builder() {
        let transformations = Transformations::standard()
            .into_builder()
            .convert_xor(true)
            .build();

        assert!(transformations.convert_xor);
        assert!(!transformations.implicit_multiplication);
    }
}
