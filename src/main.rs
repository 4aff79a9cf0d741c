use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::error;
use natqueue::console::Console;

/// Drives a string queue with commands read line by line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Capacity of the buffer `rh` removes values into
    #[arg(short, long, default_value_t = 1024)]
    buffer_size: usize,

    /// Echo every command before executing it
    #[arg(short, long)]
    echo: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let filter = if args.verbose { "debug" } else { "warn" };
    env_logger::init_from_env(Env::default().default_filter_or(filter));

    let mut console = Console::new(args.buffer_size);
    let out = io::stdout().lock();
    let failures = match &args.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            console.run(BufReader::new(file), out, args.echo)?
        }
        None => console.run(io::stdin().lock(), out, args.echo)?,
    };

    if failures > 0 {
        error!("{failures} command(s) failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
