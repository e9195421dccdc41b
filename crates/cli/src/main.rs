mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use mirath_core::Language;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Mirath estate distribution calculator.
#[derive(Parser)]
#[command(name = "mirath", version, about = "Mirath estate distribution calculator")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Language of labels and justifications (en or ar); overrides the config file
    #[arg(long, global = true)]
    lang: Option<Language>,

    /// Currency suffix for text output; overrides the config file
    #[arg(long, global = true)]
    currency: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distribute an estate described by a JSON case file
    Distribute {
        /// Path to the case JSON file
        case: PathBuf,
    },

    /// Validate a JSON case file without distributing it
    Validate {
        /// Path to the case JSON file
        case: PathBuf,
    },

    /// List the heir relations the engine accepts
    Relations,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, cli.output, cli.quiet);
            process::exit(1);
        }
    };
    if let Some(lang) = cli.lang {
        config.language = lang;
    }
    if let Some(currency) = cli.currency {
        config.currency = currency;
    }

    match cli.command {
        Commands::Distribute { case } => {
            commands::distribute::cmd_distribute(&case, &config, cli.output, cli.quiet);
        }
        Commands::Validate { case } => {
            commands::validate::cmd_validate(&case, &config, cli.output, cli.quiet);
        }
        Commands::Relations => {
            commands::relations::cmd_relations(&config, cli.output, cli.quiet);
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mirath_core={},mirath={}", level, level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
