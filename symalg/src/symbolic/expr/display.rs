use crate::{fmt::Latex, primitive::float_to_string};
use std::fmt;
use super::{Primary, SymExpr};
use symalg_parser::parser::names::GREEK_LETTERS;

/// Functions with a dedicated LaTeX command, such as `\sin`.
const LATEX_FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc",
    "sinh", "cosh", "tanh", "coth",
    "exp", "log",
];

/// How a term after the first term of a sum is written.
enum Term<'a> {
    /// Added as-is: `a + term`.
    Plus(&'a SymExpr),

    /// A negative number, written as the subtraction of its absolute value: `a - 3`.
    MinusNumber(&'a Primary),

    /// A product led by a factor of -1, written as the subtraction of the remaining factors:
    /// `a - 2*x`.
    MinusProduct(&'a [SymExpr]),
}

impl<'a> Term<'a> {
    fn new(term: &'a SymExpr) -> Self {
        match term {
            SymExpr::Primary(primary) if primary.is_negative() => Term::MinusNumber(primary),
            // `x + -1*2` must not be written as `x - 2`, which reads back as `x + -2`
            SymExpr::Mul(factors) => match factors.split_first() {
                Some((first, rest)) if first.is_neg_one()
                    && !rest.is_empty()
                    && !(rest.len() == 1 && rest[0].is_numeric()) => Term::MinusProduct(rest),
                _ => Term::Plus(term),
            },
            _ => Term::Plus(term),
        }
    }
}

/// The factors of a product, sorted into how they are written.
struct Product<'a> {
    /// Whether the product is led by a factor of -1 that is written as a bare `-`.
    negated: bool,

    /// Factors written in the numerator.
    numerators: Vec<&'a SymExpr>,

    /// Factors of the form `base**-1`, paired with their base.
    reciprocals: Vec<(&'a SymExpr, &'a SymExpr)>,
}

impl<'a> Product<'a> {
    fn new(factors: &'a [SymExpr]) -> Self {
        // `-x*y` reads back as (-1)*x*y, but `-2` and `-1/x` do not
        let negated = match factors {
            [first, second, ..] => first.is_neg_one()
                && !second.is_numeric()
                && second.as_reciprocal().is_none(),
            _ => false,
        };
        let factors = if negated { &factors[1..] } else { factors };

        let mut numerators = Vec::new();
        let mut reciprocals = Vec::new();
        for factor in factors {
            match factor.as_reciprocal() {
                Some(base) => reciprocals.push((factor, base)),
                None => numerators.push(factor),
            }
        }

        Self { negated, numerators, reciprocals }
    }
}

/// Returns true if the expression must be parenthesized when used as the base of a power.
fn is_complex_base(expr: &SymExpr) -> bool {
    matches!(expr, SymExpr::Add(_) | SymExpr::Mul(_) | SymExpr::Exp(..)) || expr.is_negative_numeric()
}

/// Writes `expr` surrounded by parentheses if `paren` is true.
fn fmt_paren(f: &mut fmt::Formatter, expr: &SymExpr, paren: bool) -> fmt::Result {
    if paren {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Writes the factors of a product, separated by `*` and `/`.
fn fmt_product(f: &mut fmt::Formatter, factors: &[SymExpr]) -> fmt::Result {
    let product = Product::new(factors);
    if product.negated {
        write!(f, "-")?;
    }

    if product.numerators.is_empty() {
        // nothing to divide; write each reciprocal as a power
        let mut iter = product.reciprocals.iter();
        if let Some((factor, _)) = iter.next() {
            write!(f, "{}", factor)?;
            for (factor, _) in iter {
                write!(f, "*{}", factor)?;
            }
        }
        return Ok(());
    }

    for (idx, factor) in product.numerators.iter().enumerate() {
        if idx > 0 {
            write!(f, "*")?;
        }
        let paren = matches!(factor, SymExpr::Add(_)) || (idx > 0 && factor.is_negative_numeric());
        fmt_paren(f, factor, paren)?;
    }

    for (_, base) in &product.reciprocals {
        write!(f, "/")?;
        let paren = matches!(base, SymExpr::Add(_) | SymExpr::Mul(_)) || base.is_negative_numeric();
        fmt_paren(f, base, paren)?;
    }

    Ok(())
}

/// Writes the expression in a form that reads back as the same expression.
impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(int) => write!(f, "{}", int),
            Self::Float(float) => write!(f, "{}", float_to_string(float)),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

/// Writes the expression in a form that reads back as the same expression, using `**` for
/// powers and `*` for every multiplication.
impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let Some((first, rest)) = terms.split_first() else {
                    return write!(f, "0");
                };
                write!(f, "{}", first)?;
                for term in rest {
                    match Term::new(term) {
                        Term::Plus(term) => write!(f, " + {}", term)?,
                        Term::MinusNumber(number) => {
                            let number = number.to_string();
                            write!(f, " - {}", number.strip_prefix('-').unwrap_or(&number))?;
                        },
                        Term::MinusProduct(factors) => {
                            write!(f, " - ")?;
                            fmt_product(f, factors)?;
                        },
                    }
                }
                Ok(())
            },
            Self::Mul(factors) if factors.is_empty() => write!(f, "1"),
            Self::Mul(factors) => fmt_product(f, factors),
            Self::Exp(base, exp) => {
                fmt_paren(f, base, is_complex_base(base))?;
                write!(f, "**")?;
                fmt_paren(f, exp, matches!(**exp, Self::Add(_) | Self::Mul(_)))
            },
        }
    }
}

/// Writes `expr` as LaTeX, surrounded by parentheses if `paren` is true.
fn fmt_latex_paren(f: &mut fmt::Formatter, expr: &SymExpr, paren: bool) -> fmt::Result {
    if paren {
        write!(f, "\\left({}\\right)", expr.as_display())
    } else {
        expr.fmt_latex(f)
    }
}

/// Writes the factors of a product as LaTeX, separated by `\cdot`.
fn fmt_latex_factors(f: &mut fmt::Formatter, factors: &[&SymExpr]) -> fmt::Result {
    for (idx, factor) in factors.iter().enumerate() {
        if idx > 0 {
            write!(f, "\\cdot ")?;
        }
        let paren = (matches!(factor, SymExpr::Add(_)) && factors.len() > 1)
            || (idx > 0 && factor.is_negative_numeric());
        fmt_latex_paren(f, factor, paren)?;
    }
    Ok(())
}

/// Writes a product as LaTeX, collecting reciprocals into a single `\frac`.
fn fmt_latex_product(f: &mut fmt::Formatter, factors: &[SymExpr]) -> fmt::Result {
    let product = Product::new(factors);
    if product.negated {
        write!(f, "-")?;
    }

    if product.reciprocals.is_empty() {
        return fmt_latex_factors(f, &product.numerators);
    }

    write!(f, "\\frac{{")?;
    if product.numerators.is_empty() {
        write!(f, "1")?;
    } else {
        fmt_latex_factors(f, &product.numerators)?;
    }
    write!(f, "}}{{")?;
    let bases = product.reciprocals.iter().map(|(_, base)| *base).collect::<Vec<_>>();
    fmt_latex_factors(f, &bases)?;
    write!(f, "}}")
}

/// Writes a function call as LaTeX.
fn fmt_latex_call(f: &mut fmt::Formatter, name: &str, args: &[SymExpr]) -> fmt::Result {
    match (name, args) {
        ("sqrt", [arg]) => write!(f, "\\sqrt{{{}}}", arg.as_display()),
        ("cbrt", [arg]) => write!(f, "\\sqrt[3]{{{}}}", arg.as_display()),
        ("abs", [arg]) => write!(f, "\\left|{}\\right|", arg.as_display()),
        ("factorial", [arg]) | ("factorial2", [arg]) => {
            let is_atom = arg.as_symbol().is_some()
                || (arg.is_integer() && !arg.is_negative_numeric());
            fmt_latex_paren(f, arg, !is_atom)?;
            if name == "factorial" {
                write!(f, "!")
            } else {
                write!(f, "!!")
            }
        },
        _ => {
            if LATEX_FUNCTIONS.contains(&name) {
                write!(f, "\\{}", name)?;
            } else {
                write!(f, "\\operatorname{{{}}}", name)?;
            }
            write!(f, "\\left(")?;
            let mut iter = args.iter();
            if let Some(arg) = iter.next() {
                arg.fmt_latex(f)?;
                for arg in iter {
                    write!(f, ", {}", arg.as_display())?;
                }
            }
            write!(f, "\\right)")
        },
    }
}

impl Latex for Primary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Integer(int) => write!(f, "{}", int),
            Self::Float(float) => write!(f, "{}", float_to_string(float)),
            Self::Symbol(sym) if sym == "oo" => write!(f, "\\infty"),
            Self::Symbol(sym) if GREEK_LETTERS.contains(&sym.as_str()) => write!(f, "\\{}", sym),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => fmt_latex_call(f, name, args),
        }
    }
}

impl Latex for SymExpr {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Primary(primary) => primary.fmt_latex(f),
            Self::Add(terms) => {
                let Some((first, rest)) = terms.split_first() else {
                    return write!(f, "0");
                };
                first.fmt_latex(f)?;
                for term in rest {
                    match Term::new(term) {
                        Term::Plus(term) => write!(f, "+{}", term.as_display())?,
                        Term::MinusNumber(number) => {
                            let number = number.as_display().to_string();
                            write!(f, "-{}", number.strip_prefix('-').unwrap_or(&number))?;
                        },
                        Term::MinusProduct(factors) => {
                            write!(f, "-")?;
                            fmt_latex_product(f, factors)?;
                        },
                    }
                }
                Ok(())
            },
            Self::Mul(factors) if factors.is_empty() => write!(f, "1"),
            Self::Mul(factors) => fmt_latex_product(f, factors),
            Self::Exp(base, exp) => {
                fmt_latex_paren(f, base, is_complex_base(base))?;
                write!(f, "^{{{}}}", exp.as_display())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::primitive::{int, PRECISION};
    use rug::Float;

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
    fn display_sum() {
        let expr = SymExpr::Add(vec![
            SymExpr::Mul(vec![integer(2), SymExpr::Exp(Box::new(sym("x")), Box::new(integer(2)))]),
            SymExpr::Mul(vec![integer(3), sym("y")]),
        ]);
        assert_eq!(expr.to_string(), "2*x**2 + 3*y");
    }

    #[test]
    fn display_subtraction() {
        assert_eq!(SymExpr::Add(vec![sym("x"), integer(-3)]).to_string(), "x - 3");
        assert_eq!(
            SymExpr::Add(vec![sym("x"), SymExpr::Mul(vec![integer(-1), integer(2), sym("y")])]).to_string(),
            "x - 2*y",
        );
        assert_eq!(
            SymExpr::Add(vec![sym("x"), SymExpr::Mul(vec![integer(-1), integer(2)])]).to_string(),
            "x + -1*2",
        );
    }

    #[test]
    fn display_negated_product() {
        assert_eq!(SymExpr::Mul(vec![integer(-1), sym("x")]).to_string(), "-x");
        assert_eq!(SymExpr::Mul(vec![integer(-1), integer(2)]).to_string(), "-1*2");
        assert_eq!(SymExpr::Mul(vec![sym("x"), integer(-2)]).to_string(), "x*(-2)");
    }

    #[test]
    fn display_fraction() {
        assert_eq!(SymExpr::Mul(vec![sym("x"), recip(sym("y"))]).to_string(), "x/y");
        assert_eq!(
            SymExpr::Mul(vec![integer(-1), recip(sym("y"))]).to_string(),
            "-1/y",
        );
        assert_eq!(
            SymExpr::Mul(vec![sym("x"), recip(SymExpr::Add(vec![sym("y"), integer(1)]))]).to_string(),
            "x/(y + 1)",
        );
        assert_eq!(SymExpr::Mul(vec![recip(sym("x")), recip(sym("y"))]).to_string(), "x**-1*y**-1");
    }

    #[test]
    fn display_power() {
        let nested = SymExpr::Exp(
            Box::new(SymExpr::Exp(Box::new(sym("x")), Box::new(integer(2)))),
            Box::new(integer(3)),
        );
        assert_eq!(nested.to_string(), "(x**2)**3");
        assert_eq!(SymExpr::Exp(Box::new(integer(-2)), Box::new(sym("x"))).to_string(), "(-2)**x");
        assert_eq!(
            SymExpr::Exp(Box::new(sym("x")), Box::new(SymExpr::Mul(vec![integer(2), sym("y")]))).to_string(),
            "x**(2*y)",
        );
    }

    #[test]
    fn display_call() {
        let call = SymExpr::Primary(Primary::Call("Max".to_string(), vec![sym("x"), integer(2)]));
        assert_eq!(call.to_string(), "Max(x, 2)");
    }

    #[test]
    fn latex_symbols() {
        assert_eq!(sym("theta").as_display().to_string(), "\\theta");
        assert_eq!(sym("oo").as_display().to_string(), "\\infty");
        assert_eq!(sym("x1").as_display().to_string(), "x1");
    }

    #[test]
    fn latex_functions() {
        let call = |name: &str, args: Vec<SymExpr>| SymExpr::Primary(Primary::Call(name.to_string(), args));
        assert_eq!(call("sin", vec![sym("x")]).as_display().to_string(), "\\sin\\left(x\\right)");
        assert_eq!(call("cbrt", vec![sym("x")]).as_display().to_string(), "\\sqrt[3]{x}");
        assert_eq!(call("abs", vec![sym("x")]).as_display().to_string(), "\\left|x\\right|");
        assert_eq!(call("asin", vec![sym("x")]).as_display().to_string(), "\\operatorname{asin}\\left(x\\right)");
        assert_eq!(call("factorial", vec![sym("n")]).as_display().to_string(), "n!");
        assert_eq!(call("factorial", vec![integer(5)]).as_display().to_string(), "5!");
        let float = Float::with_val(PRECISION, 2.5);
        let written = call("factorial", vec![SymExpr::Primary(Primary::Float(float.clone()))])
            .as_display()
            .to_string();
        assert_eq!(written, format!("\\left({}\\right)!", float_to_string(&float)));
        assert_eq!(call("factorial", vec![integer(-3)]).as_display().to_string(), "\\left(-3\\right)!");
        assert_eq!(
            call("factorial2", vec![SymExpr::Add(vec![sym("n"), integer(1)])]).as_display().to_string(),
            "\\left(n+1\\right)!!",
        );
    }

    #[test]
    fn latex_fraction() {
        let expr = SymExpr::Mul(vec![integer(-1), sym("x"), recip(sym("y")), recip(sym("z"))]);
        assert_eq!(expr.as_display().to_string(), "-\\frac{x}{y\\cdot z}");
        assert_eq!(recip(sym("x")).as_display().to_string(), "x^{-1}");
        assert_eq!(SymExpr::Mul(vec![recip(sym("x"))]).as_display().to_string(), "\\frac{1}{x}");
    }
}
