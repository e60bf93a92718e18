use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use argot::global;
use tracing_subscriber::{EnvFilter, fmt};

/// Exit status for invalid command-line arguments.
const USAGE_ERROR: u8 = 2;

fn main() -> Result<ExitCode> {
    init_tracing();

    let help = global::flag(["-h", "--help"])?.help("print help and exit");
    let verbose = global::flag(["-v", "--verbose"])?.help("print verbose messages");
    let message = global::opt::<String, _>(["-m", "--message"])?
        .metavar("MESSAGE")
        .required()
        .help("message to print");
    let times = global::opt::<u32, _>("-n")?
        .metavar("N")
        .init(3)
        .help("number of times to repeat the message");
    let schema = global::flag("--schema")?.help("print the option schema as JSON and exit");

    // Counts are kept even when parsing fails, so --help works alongside
    // other mistakes.
    let outcome = global::parse_env();

    if help.is_set() {
        global::write_help(&mut io::stdout().lock()).context("failed to write help")?;
        return Ok(ExitCode::SUCCESS);
    }

    if schema.is_set() {
        let schema = global::with_parser(|p| p.schema());
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(ExitCode::SUCCESS);
    }

    let rest = match outcome {
        Ok(rest) => rest,
        Err(errors) => {
            let program = global::program_name();
            for err in &errors {
                eprintln!("{program}: {err}");
            }
            eprintln!("Run with --help to see available options.");
            return Ok(ExitCode::from(USAGE_ERROR));
        }
    };
    tracing::debug!(?rest, "ignoring positional arguments");

    let times = times.get().unwrap_or_default();
    let message = message.get().unwrap_or_default();

    if verbose.is_set() {
        eprintln!("I will now print the message {times} times");
    }

    let mut out = io::stdout().lock();
    for _ in 0..times {
        writeln!(out, "{message}").context("failed to write to stdout")?;
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}
