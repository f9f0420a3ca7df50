//! Interactive shell for `symalg`.
//!
//! Each line of input is parsed into a symbolic expression, which is printed back along with its
//! LaTeX form and its free symbols. Lines are read from the file given as the first argument,
//! from stdin when it is not a terminal, or interactively otherwise.
//!
//! Set `RUST_LOG=symalg=debug` to trace parsing.

mod error;

use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}};
use symalg::{fmt::Latex, parse_expression, SymExpr};
use tracing_subscriber::EnvFilter;

/// Prints the expression, its LaTeX form, and its free symbols.
fn print_expr(expr: &SymExpr) {
    println!("{}", expr);
    println!("  latex:   {}", expr.as_display());

    let symbols = expr.symbols();
    if symbols.is_empty() {
        println!("  symbols: (none)");
    } else {
        println!("  symbols: {}", symbols.into_iter().collect::<Vec<_>>().join(", "));
    }
}

/// Parses the given line, printing the resulting expression or reporting the errors.
fn read_eval(input: &str) {
    match parse_expression(input).map_err(Error::from) {
        Ok(expr) => print_expr(&expr),
        Err(err) => err.report_to_stderr(input),
    }
}

/// Parses every non-empty line of the given source.
fn read_eval_lines(source: &str) {
    source.lines()
        .filter(|line| !line.trim().is_empty())
        .for_each(read_eval);
}

/// Reads and parses lines interactively until the user exits.
fn repl() -> Result<(), Error> {
    let mut rl = DefaultEditor::new()?;

    fn process_line(rl: &mut DefaultEditor) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        read_eval(&input);
        Ok(())
    }

    loop {
        match process_line(&mut rl) {
            Ok(()) => (),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err.into()),
        }
    }
}

fn run() -> Result<(), Error> {
    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // parse each line of the file
        let mut file = BufReader::new(File::open(&filename)?);
        let mut input = String::new();
        file.read_to_string(&mut input)?;
        tracing::debug!(filename, lines = input.lines().count(), "read input file");

        read_eval_lines(&input);
        Ok(())
    } else if !io::stdin().is_terminal() {
        // read lines from stdin
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;

        read_eval_lines(&input);
        Ok(())
    } else {
        repl()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
