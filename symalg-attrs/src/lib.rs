mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
///
/// ```
/// use ariadne::Source;
/// use symalg_attrs::ErrorKind;
/// use symalg_error::Error;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("unknown function `{}`", self.name),
///     labels = ["this function"],
///     help = "check the spelling of the function name",
/// )]
/// pub struct UnknownFunction {
///     pub name: String,
/// }
///
/// let err = Error::new(vec![0..3], UnknownFunction { name: "sen".to_string() });
/// let mut buf = Vec::new();
/// err.build_report("input").write(("input", Source::from("sen(x)")), &mut buf).unwrap();
/// assert!(!buf.is_empty());
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | An array of label texts, one for each span of the error, in order.           |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression. The expressions are evaluated inside
/// [`ErrorKind::build_report`], so fields of the struct can be accessed through `self`.
///
/// [`ErrorKind`]: https://docs.rs/symalg-error
/// [`ErrorKind::build_report`]: https://docs.rs/symalg-error
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    quote! { #target }.into()
}
