//! Blacklist matching for upstream paths.

use crate::config::SyncConfig;

/// Outcome of classifying an upstream path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    Included,
    /// Outside the configured upstream prefix.
    OutsidePrefix,
    /// Equal to a blacklisted file.
    ExactMatch,
    /// Below a blacklisted directory; carries the matching prefix.
    PrefixMatch(&'a str),
}

impl Classification<'_> {
    pub fn is_included(&self) -> bool {
        matches!(self, Classification::Included)
    }
}

/// Decides which upstream paths are mirrored.
#[derive(Debug, Clone, Copy)]
pub struct PathFilter<'a> {
    config: &'a SyncConfig,
}

impl<'a> PathFilter<'a> {
    pub fn new(config: &'a SyncConfig) -> Self {
        Self { config }
    }

    /// Classify `path`. Exact rules are checked before prefix rules.
    pub fn classify(&self, path: &str) -> Classification<'a> {
        if !path.starts_with(&self.config.prefix) {
            return Classification::OutsidePrefix;
        }
        let config: &'a SyncConfig = self.config;
        let rules = &config.rules;
        if rules.exact.contains(path) {
            return Classification::ExactMatch;
        }
        rules
            .prefixes
            .iter()
            .find(|prefix| path.starts_with(prefix.as_str()))
            .map_or(Classification::Included, |prefix| {
                Classification::PrefixMatch(prefix.as_str())
            })
    }
}
