//! Command-line lookup of the DolarToday bolivar rates.

use std::env;
use std::io::{self, BufRead, Write};

use log::debug;

pub mod config;
pub mod dispatch;
pub mod error;
pub mod fetch;
pub mod format;
pub mod snapshot;

pub use config::Config;
pub use dispatch::{Command, OptionToken};
pub use error::{Error, Result};
pub use fetch::{HttpSource, RateSource};
pub use format::dotf;
pub use snapshot::RateSnapshot;

/// Runs the program against the real endpoint and the process' own
/// arguments, stdout and stdin. Returns the exit status.
pub fn run() -> i32 {
    let source = HttpSource::new(Config::default());
    let stdin = io::stdin();
    let stdout = io::stdout();

    run_with(
        &source,
        env::args().skip(1),
        &mut stdout.lock(),
        &mut stdin.lock(),
    )
}

/// Runs one invocation with injected collaborators. Failures are reported on
/// `out` and turned into the exit status.
pub fn run_with<S, I, A, W, R>(source: &S, args: I, out: &mut W, input: &mut R) -> i32
where
    S: RateSource + ?Sized,
    I: IntoIterator<Item = A>,
    A: AsRef<str>,
    W: Write,
    R: BufRead,
{
    let command = Command::from_args(args);
    debug!("selected command {:?}", command);

    match execute(source, &command, out, input) {
        Ok(()) => 0,
        Err(err) => {
            // Nothing more can be reported if stdout itself is gone.
            let _ = writeln!(out, "{}", err);
            err.exit_code()
        }
    }
}

fn execute<S, W, R>(source: &S, command: &Command, out: &mut W, input: &mut R) -> Result<()>
where
    S: RateSource + ?Sized,
    W: Write,
    R: BufRead,
{
    let snapshot = if command.needs_snapshot() {
        RateSnapshot::decode(&source.fetch()?)
    } else {
        RateSnapshot::default()
    };

    match command {
        Command::Summary => dispatch::summary(out, input, &snapshot)?,
        Command::Show(token) => dispatch::show(out, *token, &snapshot)?,
        Command::Usage => dispatch::usage(out)?,
        Command::Invalid(token) => dispatch::invalid(out, token)?,
    }
    out.flush()?;
    Ok(())
}
