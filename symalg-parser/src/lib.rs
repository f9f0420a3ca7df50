//! Tokenizer and parser for human-written math expressions, such as `2x^2 + 3y` or `sin^2 x`.
//!
//! The grammar is configured with [`parser::Transformations`], which toggles implicit
//! multiplication, implicit function application, symbol splitting, function exponentiation,
//! and whether `^` means exponentiation.

pub mod parser;
pub mod tokenizer;
