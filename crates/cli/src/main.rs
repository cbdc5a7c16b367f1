use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use png2c::commands::{convert_command, init_config_command, verify_command};
use png2c_core::config::DEFAULT_CONFIG_FILE;

/// Embed binary assets into C programs as byte-array headers.
///
/// This CLI is a thin wrapper around `png2c-core` (exposed in code as
/// `png2c_core`). Logging goes to stderr and is controlled by `RUST_LOG`.
#[derive(Parser, Debug)]
#[command(
    name = "png2c",
    version,
    about = "Convert PNG (or any binary) assets into C byte-array headers",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert assets into `.h` headers.
    ///
    /// Without arguments this reads `png2c.json` from the current directory,
    /// or falls back to the built-in asset list.
    Convert {
        /// Assets to convert. Replaces the configured input list.
        inputs: Vec<PathBuf>,

        /// Directory to write headers into. Defaults to next to each input.
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Config file (JSON, or YAML by `.yaml`/`.yml` extension).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of worker threads.
        #[arg(long, short = 'j')]
        jobs: Option<usize>,

        /// Emit a JSON summary instead of one line per header.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Check a generated header, optionally against its source asset.
    Verify {
        /// Header to check.
        header: PathBuf,

        /// Asset the header was generated from.
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Write the built-in configuration to a file.
    InitConfig {
        /// Destination (JSON, or YAML by extension).
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Default to converting the configured assets if no command is provided.
    let command = cli.command.unwrap_or(Command::Convert {
        inputs: Vec::new(),
        out_dir: None,
        config: None,
        jobs: None,
        json: false,
    });

    match command {
        Command::Convert { inputs, out_dir, config, jobs, json } => {
            convert_command(&inputs, out_dir.as_deref(), config.as_deref(), jobs, json)?;
        }
        Command::Verify { header, input } => {
            verify_command(&header, input.as_deref())?;
        }
        Command::InitConfig { path, force } => init_config_command(&path, force)?,
    }

    Ok(())
}
