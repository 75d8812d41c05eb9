//! Interactive shell over a `RingDeque` of short text records.
//!
//! Reads one command per line from stdin, for example:
//!
//! ```text
//! $ ring-deque-shell --capacity 4
//! > pushb a
//! > pushf z
//! > popb
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use ring_deque::shell::{Session, Step, USAGE};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(about = "Drive a fixed-capacity ring deque from the terminal")]
struct Args {
    /// Number of records the deque can hold.
    #[arg(short, long, default_value_t = 5)]
    capacity: usize,

    /// Do not print the prompt (useful when piping commands in).
    #[arg(long)]
    no_prompt: bool,
}

const PROMPT: &str = "enter your command: ";

fn main() -> Result<()> {
    // Logs go to STDERR so they never interleave with the state printout.
    // Filtering follows RUST_LOG, defaulting to "warn".
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    let args = Args::parse();
    let mut session = Session::new(args.capacity)
        .with_context(|| format!("creating a deque with capacity {}", args.capacity))?;
    info!(capacity = args.capacity, "shell started");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{USAGE}")?;

    let mut line = String::new();
    loop {
        if !args.no_prompt {
            write!(stdout, "{PROMPT}")?;
            stdout.flush()?;
        }
        line.clear();
        if input.read_line(&mut line).context("reading a command")? == 0 {
            break;
        }
        match session.handle_line(&line) {
            Step::Continue(out) if out.is_empty() => {}
            Step::Continue(out) => writeln!(stdout, "{out}\n")?,
            Step::Quit => break,
        }
    }

    info!("shell finished");
    Ok(())
}
