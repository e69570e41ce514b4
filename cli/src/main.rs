use std::error::Error;
use std::fmt::{self, Display, Formatter};

use clap::ArgAction::{Set, SetTrue};
use clap::Parser;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

mod calc;

use calc::{evaluate, CalcError, Operator};

/// Evaluate an operation on fixed-width two's-complement values and
/// show the result in binary, octal, decimal and hexadecimal.
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// Width of the values in bits.  By default, the narrowest width
    /// which holds the operands (and the result of + - or *) as signed
    /// values; binary, octal and hex literals then keep their numeric
    /// value instead of being read as bit patterns.
    #[clap(action = Set, short, long)]
    width: Option<usize>,

    /// Treat the values as unsigned.
    #[clap(action = SetTrue, short, long)]
    unsigned: bool,

    /// Left operand (a decimal number, or a 0b, 0o or 0x literal).
    #[clap(action = Set, allow_hyphen_values = true)]
    lhs: String,

    /// One of + - * / % ** & | ^ << >> == != < <= > >=
    #[clap(action = Set, allow_hyphen_values = true, requires = "rhs")]
    op: Option<String>,

    /// Right operand (the number of places, for a shift).
    #[clap(action = Set, allow_hyphen_values = true)]
    rhs: Option<String>,
}

#[derive(Debug)]
enum Fail {
    /// The expression could not be evaluated.
    Calc(CalcError),
    /// We were not able to correctly initialise the program.
    InitialisationFailure(String),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::Calc(e) => e.fmt(f),
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
        }
    }
}

impl Error for Fail {}

fn run_calculator() -> Result<(), Fail> {
    let cli = Cli::parse();

    // See
    // https://docs.rs/tracing-subscriber/0.3/tracing_subscriber/fmt/index.html#filtering-events-with-environment-variables
    // for instructions on how to select which trace messages get
    // printed.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let span = span!(Level::ERROR, "bitcalc", width=?cli.width, unsigned=cli.unsigned);
    let _enter = span.enter();
    let operator = match cli.op.as_deref() {
        None => None,
        Some(op) => Some(op.parse::<Operator>().map_err(Fail::Calc)?),
    };
    let operation = operator.zip(cli.rhs.as_deref());
    let outcome = evaluate(&cli.lhs, operation, cli.width, !cli.unsigned).map_err(Fail::Calc);
    match outcome {
        Ok(outcome) => {
            println!("{outcome}");
            Ok(())
        }
        Err(e) => {
            event!(Level::ERROR, "evaluation failed: {:?}", e);
            Err(e)
        }
    }
}

fn main() {
    match run_calculator() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
