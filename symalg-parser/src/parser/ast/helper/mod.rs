//! Helper `struct`s for parsing AST nodes.

pub mod delimited;

pub use delimited::Delimited;
