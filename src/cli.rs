//! CLI argument parsing and run setup

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use mini_weka_update::config::SyncConfig;
use mini_weka_update::output::{render_summary, OutputConfig};
use mini_weka_update::state::SyncState;
use mini_weka_update::svn::SvnClient;
use mini_weka_update::sync::{SyncOptions, SyncOrchestrator};

/// Analyzes the svn log from the specified revision on and then updates the
/// code accordingly. Stores the start/end svn revision in 'update.rev' after
/// execution.
#[derive(Parser, Debug)]
#[command(name = "mini-weka-update")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The directory with the Weka subversion checkout (HEAD)
    #[arg(short = 'w', long = "weka", value_name = "DIR")]
    weka: PathBuf,

    /// The svn revision to start from. Optional: when omitted, the end
    /// revision recorded in the state file (update.rev) of the output
    /// directory is used, and the run fails if there is none
    #[arg(short = 'r', long = "revision", value_name = "REV")]
    revision: Option<u64>,

    /// The svn executable to use if not on the path
    #[arg(short = 's', long = "svn", value_name = "EXECUTABLE", env = "SVN_EXECUTABLE")]
    svn: Option<PathBuf>,

    /// Perform a dry run, i.e., only simulate the update
    #[arg(short = 'n', long = "dry-run", alias = "dry_run")]
    dry_run: bool,

    /// Be verbose with the output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// The mini-weka project directory to update
    #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// YAML file overriding the built-in blacklist and markers
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); falls back to RUST_LOG
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    /// Run the update described by the arguments.
    pub fn execute(self) -> Result<()> {
        init_logging(self.log_level.as_deref(), self.verbose);

        let config = match &self.config {
            Some(path) => SyncConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => SyncConfig::default(),
        };

        let start_revision = match self.revision {
            Some(revision) => revision,
            None => {
                let state_path = self.output.join(&config.state_file);
                match SyncState::load(&state_path)? {
                    Some(state) => {
                        info!("Resuming from {} ({})", state_path.display(), state);
                        state.head_revision
                    }
                    None => bail!(
                        "No --revision given and no state file at {}",
                        state_path.display()
                    ),
                }
            }
        };

        let svn = SvnClient::new(self.svn.clone(), self.verbose);
        info!("svn executable: {}", svn.executable().display());

        let options = SyncOptions {
            checkout: self.weka.clone(),
            output: self.output.clone(),
            start_revision,
            dry_run: self.dry_run,
            verbose: self.verbose,
        };

        let report = SyncOrchestrator::new(&config, &svn).run(&options)?;

        let output_config = OutputConfig::from_env_and_flag(&self.color);
        println!("{}", render_summary(&report, &output_config));
        Ok(())
    }
}

/// `--verbose` lowers the default filter to `debug` so captured svn output
/// shows up; `--log-level` and `RUST_LOG` still take precedence.
fn init_logging(level: Option<&str>, verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.init();
}
