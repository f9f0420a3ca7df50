use ariadne::Source;
use rustyline::error::ReadlineError;
use std::{fmt, io};

/// Utility enum to package errors that can occur while reading / parsing input.
#[derive(Debug)]
pub enum Error {
    /// Errors that occurred while parsing an expression.
    Parse(Vec<symalg::Error>),

    /// The input file or stdin could not be read.
    Io(io::Error),

    /// The line editor failed.
    Readline(ReadlineError),
}

impl Error {
    /// Report the errors in this [`Error`] to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not implement `Display`, so parse errors can
    /// only be written with its `eprint` method.
    ///
    /// [`Report`]: ariadne::Report
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Parse(errs) => errs.iter().for_each(|err| {
                let report = err.build_report("input");
                if let Err(io_err) = report.eprint(("input", Source::from(input))) {
                    eprintln!("failed to write error report: {}", io_err);
                }
            }),
            Self::Io(_) | Self::Readline(_) => eprintln!("{}", self),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(errs) => write!(f, "{} error(s) while parsing", errs.len()),
            Self::Io(err) => write!(f, "could not read input: {}", err),
            Self::Readline(err) => write!(f, "{}", err),
        }
    }
}

impl From<Vec<symalg::Error>> for Error {
    fn from(errs: Vec<symalg::Error>) -> Self {
        Self::Parse(errs)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ReadlineError> for Error {
    fn from(err: ReadlineError) -> Self {
        Self::Readline(err)
    }
}
