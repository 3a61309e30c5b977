//! # Path Mapping
//!
//! Converts an upstream repository path into the file to read from the local
//! checkout and the file to write in the mini-weka tree.
//!
//! For `/trunk/weka/src/test/resources/wekarefs/weka/core/BarTest.ref` with
//! the checkout at `/home/dev/weka` this yields:
//!
//! - source: `/home/dev/weka/weka/src/test/resources/wekarefs/weka/core/BarTest.ref`
//! - target: `./src/test/resources/weka/core/BarTest.ref`
//!
//! The test-reference token is removed as a plain substring, not as a path
//! segment. A file or directory whose name merely contains the token loses
//! that part of its name too. This matches the layout produced by earlier
//! runs and is kept on purpose.
//!
//! Mapping is purely textual, so `..` segments in a log path survive into
//! the target. `SyncOrchestrator::transfer` refuses such targets.

use crate::config::SyncConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Source and target locations for one upstream path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub source_absolute: PathBuf,
    /// Always starts with `./`.
    pub target_relative: String,
}

/// Maps upstream paths onto the checkout and the downstream tree.
#[derive(Debug, Clone)]
pub struct PathMapper<'a> {
    config: &'a SyncConfig,
    checkout: &'a Path,
}

impl<'a> PathMapper<'a> {
    pub fn new(config: &'a SyncConfig, checkout: &'a Path) -> Self {
        Self { config, checkout }
    }

    /// Map `path`, or `None` when it is not under the upstream prefix.
    pub fn map(&self, path: &str) -> Option<Mapping> {
        let below_container = path.strip_prefix(self.config.container.as_str())?;
        let below_prefix = path.strip_prefix(self.config.prefix.as_str())?;

        // The checkout root stands in for the container segment.
        let mut source = OsString::from(self.checkout.as_os_str());
        source.push(below_container);

        let target = if self.config.test_ref_token.is_empty() {
            below_prefix.to_string()
        } else {
            below_prefix.replace(self.config.test_ref_token.as_str(), "")
        };

        Some(Mapping {
            source_absolute: PathBuf::from(source),
            target_relative: format!("./{}", target),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_main_source() {
        let config = SyncConfig::default();
        let mapper = PathMapper::new(&config, Path::new("/home/dev/weka"));
        let mapping = mapper
            .map("/trunk/weka/src/main/java/weka/core/Bar.java")
            .unwrap();
        assert_eq!(
            mapping.source_absolute,
            PathBuf::from("/home/dev/weka/weka/src/main/java/weka/core/Bar.java")
        );
        assert_eq!(mapping.target_relative, "./src/main/java/weka/core/Bar.java");
    }

    #[test]
    fn test_map_removes_test_ref_token() {
        let config = SyncConfig::default();
        let mapper = PathMapper::new(&config, Path::new("/home/dev/weka"));
        let mapping = mapper
            .map("/trunk/weka/src/test/resources/wekarefs/weka/core/BarTest.ref")
            .unwrap();
        assert_eq!(
            mapping.source_absolute,
            PathBuf::from("/home/dev/weka/weka/src/test/resources/wekarefs/weka/core/BarTest.ref")
        );
        assert_eq!(
            mapping.target_relative,
            "./src/test/resources/weka/core/BarTest.ref"
        );
    }

    #[test]
    fn test_map_removes_token_inside_names() {
        let config = SyncConfig::default();
        let mapper = PathMapper::new(&config, Path::new("/w"));
        let mapping = mapper
            .map("/trunk/weka/src/main/java/weka/core/mywekarefsHelper.java")
            .unwrap();
        assert_eq!(
            mapping.target_relative,
            "./src/main/java/weka/core/myHelper.java"
        );
    }

    #[test]
    fn test_map_outside_prefix() {
        let config = SyncConfig::default();
        let mapper = PathMapper::new(&config, Path::new("/w"));
        assert_eq!(mapper.map("/trunk/packages/foo.java"), None);
        assert_eq!(mapper.map("/branches/weka/src/foo.java"), None);
    }

    #[test]
    fn test_map_relative_checkout() {
        let config = SyncConfig::default();
        let mapper = PathMapper::new(&config, Path::new("../weka-trunk"));
        let mapping = mapper.map("/trunk/weka/src/main/java/A.java").unwrap();
        assert_eq!(
            mapping.source_absolute,
            PathBuf::from("../weka-trunk/weka/src/main/java/A.java")
        );
    }
}
