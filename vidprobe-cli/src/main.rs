// vidprobe-cli/src/main.rs
//
// Command-line interface for vidprobe. Parses arguments, configures
// logging, runs the prober from vidprobe-core against the given file and
// prints the extracted metadata as a formatted report or as JSON.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use log::debug;
use owo_colors::OwoColorize;

use vidprobe_core::{probe_file, SystemProber};

mod output;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "vidprobe: media file inspection",
    long_about = "Runs avprobe (or ffmpeg as a fallback) against a media file and \
                  prints the duration, codec, resolution, frame rate, bitrate and \
                  audio parameters found in its diagnostic report."
)]
struct Cli {
    /// Media file to inspect
    #[arg(required = true, value_name = "FILE")]
    input: PathBuf,

    /// Print the metadata as JSON instead of the formatted report
    #[arg(long)]
    json: bool,

    /// Seconds to wait for the prober before giving up
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let prober = SystemProber::with_timeout(Duration::from_secs(cli.timeout));
    let metadata = probe_file(&prober, &cli.input)?;
    debug!("extracted metadata: {:?}", metadata);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    } else {
        let filename = cli.input.display().to_string();
        output::print_report(&filename, &metadata);
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{} {}", "Error:".bright_red().bold(), e);
        process::exit(1);
    }
}
