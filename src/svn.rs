//! # Subversion Access
//!
//! The update pipeline needs three things from the upstream checkout: bring
//! it up to date, report its revision, and print the verbose log since a
//! given revision. `VersionControl` captures those three operations so the
//! orchestrator can be driven by a scripted implementation in tests;
//! `SvnClient` is the real implementation that shells out to the `svn`
//! executable with the checkout as working directory.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use log::debug;

use crate::error::{Error, Result};

/// Trait for version control operations - allows mocking in tests
pub trait VersionControl {
    /// Update the checkout to the latest upstream state.
    fn update(&self, checkout: &Path) -> Result<()>;

    /// Current revision of the checkout.
    fn head_revision(&self, checkout: &Path) -> Result<u64>;

    /// Verbose log from `from_revision` through HEAD.
    fn log(&self, checkout: &Path, from_revision: u64) -> Result<String>;
}

/// Runs the `svn` command line client.
#[derive(Debug, Clone)]
pub struct SvnClient {
    executable: PathBuf,
    verbose: bool,
}

impl SvnClient {
    /// Create a client. `executable` defaults to `svn` on the `PATH`.
    pub fn new(executable: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            executable: executable.unwrap_or_else(|| PathBuf::from("svn")),
            verbose,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn run(&self, checkout: &Path, args: &[&str]) -> Result<String> {
        let command = format!("{} {}", self.executable.display(), args.join(" "));

        let output = Command::new(&self.executable)
            .args(args)
            .current_dir(checkout)
            .output()
            .map_err(|e| Error::VcsCommand {
                command: command.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::VcsCommand {
                command,
                stderr: format!(
                    "exit status: {}\nstdout:\n{}\nstderr:\n{}",
                    output.status,
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr)
                ),
            });
        }

        if self.verbose {
            log_process_output(&command, &output);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VersionControl for SvnClient {
    fn update(&self, checkout: &Path) -> Result<()> {
        self.run(checkout, &["update"]).map(|_| ())
    }

    fn head_revision(&self, checkout: &Path) -> Result<u64> {
        let info = self.run(checkout, &["info"])?;
        parse_revision(&info)
    }

    fn log(&self, checkout: &Path, from_revision: u64) -> Result<String> {
        let range = format!("{}:HEAD", from_revision);
        self.run(checkout, &["log", "-r", &range, "-v"])
    }
}

fn log_process_output(command: &str, output: &Output) {
    debug!("command: {}", command);
    if !output.stdout.is_empty() {
        debug!("stdout:\n{}", String::from_utf8_lossy(&output.stdout));
    }
    if !output.stderr.is_empty() {
        debug!("stderr:\n{}", String::from_utf8_lossy(&output.stderr));
    }
}

/// Extract the revision from `svn info` output.
///
/// Only lines of the form `<label>Revision: <n>` with a single colon count,
/// so `Last Changed Rev:` and similar lines are ignored. The last match wins.
pub fn parse_revision(info: &str) -> Result<u64> {
    let mut revision = None;
    for line in info.lines() {
        if !line.contains("Revision:") {
            continue;
        }
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() == 2 {
            if let Ok(value) = parts[1].trim().parse::<u64>() {
                revision = Some(value);
            }
        }
    }
    revision.ok_or_else(|| Error::RevisionNotFound {
        output: info.to_string(),
    })
}
