// xref CLI - batch cross-reference of two watchlist datasets

mod exit_codes;
mod job;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use xref_recon::config::{ExecutionConfig, InvalidRecordPolicy, OutputOrder, XrefConfig};

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE, EXIT_XREF_INVALID_CONFIG};
use job::{JobSpec, SourceSpec};

#[derive(Parser)]
#[command(name = "xref")]
#[command(about = "Cross-reference two watchlist datasets (all-pairs entity matching)")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a cross-reference job from a TOML config file
    #[command(after_help = "\
Examples:
  xref run gbr-ofac.toml
  xref run gbr-ofac.toml --json > summary.json")]
    Run {
        /// Path to the job config file
        config: PathBuf,

        /// Print the job summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Match two JSONL sources into one JSONL output, without a config file
    #[command(after_help = "\
Examples:
  xref match data/gbr.jsonl data/ofac.jsonl -o data/output.jsonl
  xref match gbr.jsonl ofac.jsonl -o out.jsonl --order ids --workers 4")]
    Match {
        /// List A (ids reported as gbr_id)
        left: PathBuf,

        /// List B (ids reported as ofac_id)
        right: PathBuf,

        /// Merged output file
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Output ordering
        #[arg(long, value_enum, default_value = "input")]
        order: OrderArg,

        /// Left records per shard
        #[arg(long, default_value_t = 256)]
        shard_size: usize,

        /// Worker threads (0 = one per core)
        #[arg(long, default_value_t = 0, env = "XREF_WORKERS")]
        workers: usize,

        /// What to do with lines that are not valid records
        #[arg(long, value_enum, default_value = "skip")]
        on_invalid: InvalidArg,

        /// Print the job summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Validate a job config without running it
    Validate {
        /// Path to the job config file
        config: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    /// Left-major input order
    Input,
    /// Sorted by (gbr_id, ofac_id)
    Ids,
}

impl From<OrderArg> for OutputOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Input => OutputOrder::Input,
            OrderArg::Ids => OutputOrder::Ids,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum InvalidArg {
    /// Report bad lines and continue
    Skip,
    /// Stop at the first bad line
    Abort,
}

impl From<InvalidArg> for InvalidRecordPolicy {
    fn from(arg: InvalidArg) -> Self {
        match arg {
            InvalidArg::Skip => InvalidRecordPolicy::Skip,
            InvalidArg::Abort => InvalidRecordPolicy::Abort,
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_XREF_INVALID_CONFIG, message: msg.into(), hint: None }
    }

    fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("XREF_COMMIT"), ")",
        "\nengine:  xref-recon ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("XREF_LOG", "info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, json } => cmd_run(config, json),
        Commands::Match { left, right, output, order, shard_size, workers, on_invalid, json } => {
            cmd_match(left, right, output, order, shard_size, workers, on_invalid, json)
        }
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn read_config(config_path: &Path) -> Result<XrefConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        CliError::usage(format!("cannot read config {}: {e}", config_path.display()))
    })?;
    XrefConfig::from_toml(&config_str).map_err(|e| CliError::config(e.to_string()))
}

fn finish(spec: &JobSpec, json: bool) -> Result<(), CliError> {
    let summary = job::execute(spec)?;
    if json {
        println!("{}", summary.to_json()?);
    }
    summary.print();
    Ok(())
}

fn cmd_run(config_path: PathBuf, json: bool) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    let spec = JobSpec::from_config(config, &config_path);
    finish(&spec, json)
}

#[allow(clippy::too_many_arguments)]
fn cmd_match(
    left: PathBuf,
    right: PathBuf,
    output: PathBuf,
    order: OrderArg,
    shard_size: usize,
    workers: usize,
    on_invalid: InvalidArg,
    json: bool,
) -> Result<(), CliError> {
    if shard_size == 0 {
        return Err(CliError::usage("--shard-size must be at least 1"));
    }

    let spec = JobSpec {
        name: "match".into(),
        left: SourceSpec { name: "gbr".into(), path: left },
        right: SourceSpec { name: "ofac".into(), path: right },
        output,
        order: order.into(),
        execution: ExecutionConfig { shard_size, workers },
        on_invalid: on_invalid.into(),
        skip_hint: "pass --on-invalid skip to report bad lines and continue",
    };
    finish(&spec, json)
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    eprintln!(
        "valid: job '{}' ({} x {}) -> {}, order {}, shard size {}, on_invalid {}",
        config.name,
        config.left.name,
        config.right.name,
        config.output.file,
        config.output.order,
        config.execution.shard_size,
        config.records.on_invalid,
    );
    Ok(())
}
