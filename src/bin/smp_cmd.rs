//! SoundMexPro command-line client
//!
//! Sends a single command to the native engine and prints the decoded reply.
//!
//! ```text
//! smp-cmd init driver=0 output=0,1
//! smp-cmd loadfile filename=../waves/eurovision.wav
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use soundmexpro::{Client, Command, Config, StatusPolicy};
use tracing_subscriber::{fmt, EnvFilter};

/// SoundMexPro command-line client
#[derive(Parser, Debug)]
#[command(name = "smp-cmd")]
#[command(about = "Send one command to the SoundMexPro engine")]
#[command(version)]
struct Args {
    /// Directory containing the engine library (default: next to this binary)
    #[arg(short, long)]
    library_dir: Option<PathBuf>,

    /// Response buffer capacity in bytes
    #[arg(short = 'c', long, default_value = "32768")]
    capacity: usize,

    /// Print failed responses instead of exiting with an error
    #[arg(short, long)]
    embed_errors: bool,

    /// Reject arguments containing protocol delimiters
    #[arg(short, long)]
    strict: bool,

    /// Command name
    command: String,

    /// Arguments as key=value (values are sent verbatim)
    args: Vec<String>,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,soundmexpro=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("smp-cmd v{}", soundmexpro::VERSION);

    let mut builder = Config::builder()
        .response_capacity(args.capacity)
        .strict_arguments(args.strict);
    if let Some(dir) = &args.library_dir {
        builder = builder.library_dir(dir);
    }
    if args.embed_errors {
        builder = builder.status_policy(StatusPolicy::Embed);
    }
    let config = builder.build();

    let mut command = Command::new(&args.command);
    for pair in &args.args {
        match pair.split_once('=') {
            Some((key, value)) => command.push(key, value),
            None => {
                tracing::error!("Argument '{}' is not of the form key=value", pair);
                return ExitCode::FAILURE;
            }
        }
    }

    let client = match Client::global(config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load engine: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match client.call(&command) {
        Ok(response) => {
            for (key, value) in response.iter() {
                println!("{}={}", key, value);
            }
            if response.status().is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
