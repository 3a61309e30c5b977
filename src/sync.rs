//! # Update Orchestration
//!
//! Drives one update run through its stages:
//!
//! 1. **Update**: bring the upstream checkout to HEAD.
//! 2. **Head**: determine the revision the checkout now sits at.
//! 3. **Log**: fetch the verbose log from the start revision through HEAD.
//! 4. **Files**: filter, map and copy (or strip) every changed path.
//! 5. **Persist**: stamp the metadata files and write `update.rev`.
//!
//! A failure in stages 1-3 aborts the run before anything downstream is
//! touched. Failures on individual files in stage 4 are logged, recorded in
//! the report and skipped. In dry-run mode stage 4 only reports what would be
//! copied and stage 5 is skipped entirely.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, error, info, warn};

use crate::changelog;
use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::filter::{Classification, PathFilter};
use crate::mapper::{Mapping, PathMapper};
use crate::metadata;
use crate::state::SyncState;
use crate::svn::VersionControl;
use crate::transform::ContentTransformer;

/// Stages of a run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    UpdatedCheckout,
    HeadDetermined,
    LogFetched,
    FilesProcessed,
    StatePersisted,
}

/// Inputs for one run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Local upstream checkout.
    pub checkout: PathBuf,
    /// Downstream project root; target paths are relative to it.
    pub output: PathBuf,
    pub start_revision: u64,
    pub dry_run: bool,
    pub verbose: bool,
}

/// How a single file reached the downstream tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Copied,
    Filtered,
}

/// Summary of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub start_revision: u64,
    pub head_revision: u64,
    /// Paths that passed the blacklist, including ones that failed to copy.
    pub included: usize,
    pub excluded: usize,
    pub copied: usize,
    pub filtered: usize,
    /// `(upstream path, reason)` for every path that could not be written.
    pub failures: Vec<(String, String)>,
    pub dry_run: bool,
    pub stage: Stage,
}

impl SyncReport {
    fn new(options: &SyncOptions) -> Self {
        Self {
            start_revision: options.start_revision,
            head_revision: options.start_revision,
            included: 0,
            excluded: 0,
            copied: 0,
            filtered: 0,
            failures: Vec::new(),
            dry_run: options.dry_run,
            stage: Stage::Init,
        }
    }

    fn advance(&mut self, stage: Stage) {
        debug!("Stage {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }
}

/// Runs the update pipeline against a `VersionControl` backend.
pub struct SyncOrchestrator<'a, V: VersionControl> {
    config: &'a SyncConfig,
    vcs: &'a V,
}

impl<'a, V: VersionControl> SyncOrchestrator<'a, V> {
    pub fn new(config: &'a SyncConfig, vcs: &'a V) -> Self {
        Self { config, vcs }
    }

    /// Execute a full run.
    pub fn run(&self, options: &SyncOptions) -> Result<SyncReport> {
        let mut report = SyncReport::new(options);

        info!("Updating Weka code base: {}", options.checkout.display());
        self.vcs.update(&options.checkout)?;
        report.advance(Stage::UpdatedCheckout);

        info!("Determining revision of HEAD");
        let head = self.vcs.head_revision(&options.checkout)?;
        if head < options.start_revision {
            return Err(Error::State {
                path: self.state_path(options).display().to_string(),
                message: format!(
                    "start revision {} is newer than HEAD revision {}",
                    options.start_revision, head
                ),
            });
        }
        report.head_revision = head;
        report.advance(Stage::HeadDetermined);

        info!("SVN log since: {}", options.start_revision);
        let log = self.vcs.log(&options.checkout, options.start_revision)?;
        report.advance(Stage::LogFetched);

        for entry in changelog::parse(&log, &self.config.source_tree) {
            self.process_paths(&entry.paths, options, &mut report);
        }
        report.advance(Stage::FilesProcessed);
        info!("Number of files that needed updating: {}", report.included);

        if !options.dry_run {
            self.persist(options, head)?;
            report.advance(Stage::StatePersisted);
        }

        Ok(report)
    }

    /// Filter, map and transfer the paths of one log entry.
    fn process_paths(&self, paths: &[String], options: &SyncOptions, report: &mut SyncReport) {
        let filter = PathFilter::new(self.config);
        let mapper = PathMapper::new(self.config, &options.checkout);

        for path in paths {
            match filter.classify(path) {
                Classification::Included => {}
                Classification::OutsidePrefix => continue,
                rule @ (Classification::ExactMatch | Classification::PrefixMatch(_)) => {
                    if options.verbose {
                        info!("Blacklisted: {}", path);
                        debug!("Matched rule: {:?}", rule);
                    }
                    report.excluded += 1;
                    continue;
                }
            }

            let Some(mapping) = mapper.map(path) else {
                continue;
            };

            if options.dry_run {
                info!("Update required: {}", path);
            } else {
                info!("Updating: {}", path);
            }
            if options.verbose {
                info!(
                    "{}\n->{}",
                    mapping.source_absolute.display(),
                    mapping.target_relative
                );
            }
            report.included += 1;

            if options.dry_run {
                continue;
            }

            match self.transfer(&mapping, &options.output) {
                Ok(TransferKind::Copied) => report.copied += 1,
                Ok(TransferKind::Filtered) => report.filtered += 1,
                Err(e) => {
                    error!("{}", e);
                    report.failures.push((path.clone(), e.to_string()));
                }
            }
        }
    }

    /// Copy one file, stripping annotations when it carries any.
    pub fn transfer(&self, mapping: &Mapping, output: &Path) -> Result<TransferKind> {
        let target = output.join(&mapping.target_relative);
        let transfer_error = |message: String| Error::Transfer {
            src: mapping.source_absolute.display().to_string(),
            dst: target.display().to_string(),
            message,
        };

        if Path::new(&mapping.target_relative)
            .components()
            .any(|c| c == Component::ParentDir)
        {
            return Err(transfer_error(
                "target path leaves the output directory".to_string(),
            ));
        }

        let content = fs::read(&mapping.source_absolute).map_err(|e| transfer_error(e.to_string()))?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| transfer_error(e.to_string()))?;
        }

        let transformer = ContentTransformer::new(&self.config.annotations);
        match std::str::from_utf8(&content) {
            Ok(text) if transformer.requires_transform(text) => {
                let filtered = transformer.transform(text);
                if let Some(line) = filtered.unterminated_at() {
                    warn!(
                        "Unterminated annotation starting at line {} in {}, remainder of file dropped",
                        line,
                        mapping.source_absolute.display()
                    );
                }
                fs::write(&target, filtered.text).map_err(|e| transfer_error(e.to_string()))?;
                Ok(TransferKind::Filtered)
            }
            _ => {
                fs::write(&target, &content).map_err(|e| transfer_error(e.to_string()))?;
                Ok(TransferKind::Copied)
            }
        }
    }

    fn persist(&self, options: &SyncOptions, head: u64) -> Result<()> {
        // Metadata stamps are best-effort; the state record must still be written.
        for rule in &self.config.metadata {
            if let Err(e) = metadata::update_file(&options.output, rule, head) {
                warn!(
                    "Failed to update revision in {}: {}",
                    options.output.join(&rule.file).display(),
                    e
                );
            }
        }

        let state_path = self.state_path(options);
        info!("Storing revision information in: {}", state_path.display());
        SyncState::new(options.start_revision, head).save(&state_path)
    }

    fn state_path(&self, options: &SyncOptions) -> PathBuf {
        options.output.join(&self.config.state_file)
    }
}
