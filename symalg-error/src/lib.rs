//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that attaches an [`ErrorKind`] to regions of the input.

use ariadne::{Color, Report};
use std::{fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur while parsing an expression.
pub trait ErrorKind: Debug + Send + Sync {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

#[cfg(test)]
mod tests {
    use ariadne::{Label, ReportKind, Source};
    use super::*;

    #[derive(Debug)]
    struct Unbalanced;

    impl ErrorKind for Unbalanced {
        fn build_report<'a>(
            &self,
            src_id: &'a str,
            spans: &[Range<usize>],
        ) -> Report<(&'a str, Range<usize>)> {
            Report::build(ReportKind::Error, src_id, spans[0].start)
                .with_message("unbalanced input")
                .with_labels(spans.iter().map(|span| {
                    Label::new((src_id, span.clone()))
                        .with_color(EXPR)
                        .with_message("here")
                }))
                .finish()
        }
    }

    #[test]
    fn report_contains_message_and_label() {
        let source = "2x + (";
        let err = Error::new(vec![5..6], Unbalanced);

        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", Source::from(source)), &mut buf)
            .unwrap();
        let rendered = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();

        assert!(rendered.contains("unbalanced input"));
        assert!(rendered.contains("here"));
        assert!(rendered.contains("2x + ("));
    }

    #[test]
    fn errors_cross_threads() {
        fn assert_send<T: Send>() {}
        assert_send::<Error>();
    }
}
