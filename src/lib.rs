//! Model refresh: keeps a draft-assistant site's model catalog in sync with
//! its upstream repository.
//!
//! A run fetches the remote data tracker, compares its most recent set with
//! the sets the site already lists, discovers which model variants exist
//! remotely, downloads the cards file and models, and prepends the set to the
//! site's catalog. Runs are idempotent and can be simulated with `--dry-run`.
//!
//! # Modules
//!
//! - [`refresh`]: The orchestrator and its report
//! - [`remote`]: Remote access (manifest, probes, downloads)
//! - [`catalog`]: Reading and patching the local catalog
//! - [`config`]: Run configuration and path conventions
//! - [`error`]: Error types for refresh runs

pub mod catalog;
pub mod config;
pub mod error;
mod persist;
pub mod refresh;
pub mod remote;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use config::RefreshConfig;
pub use error::RefreshError;
pub use refresh::{RefreshOptions, RefreshOutcome, RefreshReport, Refresher};

use catalog::MarkerCatalog;
use remote::HttpRemote;

/// The model-refresh CLI application.
#[derive(Parser)]
#[command(name = "model-refresh")]
#[command(version, about)]
#[command(long_about = "Refresh models from the statistical-drafting repository.\n\n\
    Pulls the latest set's cards file and ONNX models and adds the set to the \
    site's available sets. Does nothing when the set is already listed.")]
struct Cli {
    /// Show what would be done without making changes.
    #[arg(long)]
    dry_run: bool,

    /// Force update even if the set already exists or looks incomplete.
    #[arg(long)]
    force: bool,

    /// Base URL the data tracker, cards and models are fetched from.
    #[arg(
        long,
        env = "MODEL_REFRESH_REMOTE_BASE",
        default_value = config::DEFAULT_REMOTE_BASE,
        value_parser = parse_remote_base
    )]
    remote_base: String,

    /// Site root holding the catalog file and the data directory.
    #[arg(long, env = "MODEL_REFRESH_PROJECT_ROOT", default_value = ".")]
    project_root: PathBuf,

    /// Data directory (default: <project-root>/data).
    #[arg(long, env = "MODEL_REFRESH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// File embedding the availableSets list (default: <project-root>/script.js).
    #[arg(long, env = "MODEL_REFRESH_CATALOG_FILE")]
    catalog_file: Option<PathBuf>,

    /// User-Agent header sent with every request.
    #[arg(long, env = "MODEL_REFRESH_USER_AGENT", default_value = config::DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Output format for the final report ('text' or 'json').
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    output: String,
}

impl Cli {
    fn config(&self) -> RefreshConfig {
        let mut config = RefreshConfig::new(self.remote_base.clone(), &self.project_root)
            .with_user_agent(self.user_agent.clone());
        if let Some(data_dir) = &self.data_dir {
            config = config.with_data_dir(data_dir);
        }
        if let Some(catalog_file) = &self.catalog_file {
            config = config.with_catalog_file(catalog_file);
        }
        config
    }
}

fn parse_remote_base(value: &str) -> Result<String, String> {
    let url = url::Url::parse(value).map_err(|source| format!("invalid URL: {source}"))?;
    match url.scheme() {
        "http" | "https" => Ok(value.trim_end_matches('/').to_string()),
        other => Err(format!("expected an http(s) URL, found scheme '{other}'")),
    }
}

/// Installs the log subscriber: timestamped lines, `RUST_LOG` filtering,
/// `info` by default. Logs go to stderr when stdout carries JSON.
fn init_logging(to_stderr: bool) {
    let (writer, ansi) = if to_stderr {
        (
            BoxMakeWriter::new(std::io::stderr),
            std::io::stderr().is_terminal(),
        )
    } else {
        (
            BoxMakeWriter::new(std::io::stdout),
            std::io::stdout().is_terminal(),
        )
    };

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

/// On Ctrl-C, drops half-written temp files and exits with status 1.
fn install_interrupt_handler() {
    let installed = ctrlc::set_handler(|| {
        persist::discard_in_flight();
        eprintln!("\nOperation cancelled by user");
        std::process::exit(1);
    });
    if let Err(source) = installed {
        tracing::debug!("could not install Ctrl-C handler: {source}");
    }
}

/// Run the model-refresh CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), RefreshError> {
    let cli = Cli::parse();
    let json_output = cli.output == "json";
    init_logging(json_output);
    install_interrupt_handler();

    let config = cli.config();
    let options = RefreshOptions {
        dry_run: cli.dry_run,
        force: cli.force,
    };

    let remote = HttpRemote::new(config.user_agent.clone());
    let catalog = MarkerCatalog::new(config.catalog_file.clone());
    let report = Refresher::new(remote, catalog, config, options).run()?;

    if json_output {
        let json = serde_json::to_string_pretty(&report).map_err(|source| {
            RefreshError::Unexpected(format!("could not render report: {source}"))
        })?;
        println!("{json}");
    } else {
        print!("{report}");
    }

    Ok(())
}
