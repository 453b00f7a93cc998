use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use pick_cli::commands::suggest_ops::{suggest_cmd, SuggestOptions};
use pick_cli::commands::{bulk_ops, config_ops, ModeArg};
use pick_engine::pick_core::settings;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "picktool", about = "Selection engine diagnostics")]
struct Cli {
    /// Settings TOML to use instead of the embedded defaults
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Write JSON trace logs to this directory (needs the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Type terms into a field and print the suggestions that surface
    Suggest {
        /// Terms typed in order (each is the full input box contents)
        #[arg(required = true)]
        terms: Vec<String>,
        /// Field identifier sent as `search_field`
        #[arg(long, default_value = "tags")]
        field: String,
        #[arg(long, value_enum, default_value = "tag")]
        mode: ModeArg,
        /// Suggestion endpoint (defaults to remote.endpoint)
        #[arg(long, conflicts_with = "offline")]
        endpoint: Option<String>,
        /// Serve these comma-separated labels from memory
        #[arg(long)]
        offline: Option<String>,
        /// Type all terms before waiting for replies
        #[arg(long)]
        burst: bool,
        /// How long to wait for each reply
        #[arg(long, default_value = "10000")]
        wait_ms: u64,
        /// Output JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Apply comma-separated bulk text and print the selection
    Bulk {
        raw: String,
        #[arg(long, value_enum, default_value = "tag")]
        mode: ModeArg,
    },
    /// Print the default settings, or validate a settings file
    Config {
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(dir) = &cli.trace_dir {
        pick_engine::init_tracing(dir);
    }
    if let Some(path) = &cli.settings {
        let content = die!(fs::read_to_string(path), "Error reading {}: {}", path.display());
        die!(settings::init_custom(content), "Error: {}");
    }

    match cli.command {
        Command::Suggest {
            terms,
            field,
            mode,
            endpoint,
            offline,
            burst,
            wait_ms,
            json,
        } => {
            let opts = SuggestOptions {
                field,
                mode: mode.into(),
                endpoint,
                offline,
                burst,
                json,
                wait_ms,
            };
            let mut out = io::stdout().lock();
            die!(suggest_cmd(&mut out, &opts, &terms), "Error: {}");
        }
        Command::Bulk { raw, mode } => bulk_ops::bulk_cmd(mode.into(), &raw),
        Command::Config { file: None } => config_ops::settings_export(),
        Command::Config { file: Some(file) } => {
            die!(config_ops::settings_validate(&file), "Error: {}");
        }
    }
}
