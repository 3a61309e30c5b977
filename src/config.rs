//! # Synchronization Policy
//!
//! This module defines the immutable policy that drives one update run: where
//! the Weka sources live in the subversion tree, which paths mini-weka never
//! tracks, which annotations force a file through the content filter, and how
//! the two downstream metadata files embed the upstream revision.
//!
//! ## Key Components
//!
//! - **`SyncConfig`**: The complete policy. `SyncConfig::default()` carries the
//!   historical Weka blacklist; `from_file` overlays a YAML document on top of
//!   those defaults.
//! - **`PathRuleSet`**: Exact-file and path-prefix exclusion rules.
//! - **`AnnotationMarkers`**: The two annotation tokens and the imports that
//!   define them.
//! - **`MetadataRule`**: A single in-place revision substitution for a
//!   downstream metadata file.
//!
//! The configuration is built once and passed by reference to every component.
//! Nothing in the crate mutates it after `validate` has succeeded.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Exclusion rules for upstream paths.
///
/// A rule set given in YAML replaces the built-in lists entirely; a missing
/// list is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRuleSet {
    /// Upstream paths that are never mirrored.
    #[serde(default)]
    pub exact: BTreeSet<String>,
    /// Upstream path prefixes that are never mirrored.
    #[serde(default)]
    pub prefixes: BTreeSet<String>,
}

impl PathRuleSet {
    /// Build a rule set from string slices.
    pub fn new<E, P>(exact: E, prefixes: P) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            exact: exact.into_iter().map(Into::into).collect(),
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for PathRuleSet {
    fn default() -> Self {
        Self::new(BLACKLISTED_FILES.iter().copied(), BLACKLISTED_PATHS.iter().copied())
    }
}

/// Annotation tokens that require a file to be filtered before mirroring.
///
/// `multi_line` may carry a parenthesized argument list spanning several
/// lines; `single_line` never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationMarkers {
    pub multi_line: String,
    pub single_line: String,
    /// Import statements that bring the annotations into scope.
    pub imports: Vec<String>,
}

impl Default for AnnotationMarkers {
    fn default() -> Self {
        Self {
            multi_line: "@FilePropertyMetadata".to_string(),
            single_line: "@ProgrammaticProperty".to_string(),
            imports: vec![
                "import weka.gui.FilePropertyMetadata;".to_string(),
                "import weka.gui.ProgrammaticProperty;".to_string(),
            ],
        }
    }
}

/// Substitutes the new head revision into a downstream metadata file.
///
/// Every line containing `marker` (or only the first, with `first_only`) is
/// matched against `pattern`; the text captured by the named group `rev` is
/// replaced with the revision number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRule {
    /// File relative to the downstream root.
    pub file: PathBuf,
    pub marker: String,
    pub pattern: String,
    #[serde(default)]
    pub first_only: bool,
}

impl MetadataRule {
    /// Compile `pattern`, checking that it carries the `rev` group.
    pub fn regex(&self) -> Result<Regex> {
        let regex = Regex::new(&self.pattern)?;
        if !regex.capture_names().flatten().any(|name| name == "rev") {
            return Err(Error::Config {
                message: format!(
                    "metadata pattern '{}' for {} has no 'rev' capture group",
                    self.pattern,
                    self.file.display()
                ),
            });
        }
        Ok(regex)
    }
}

/// Complete policy for one update run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Outermost repository segment, replaced by the checkout root.
    pub container: String,
    /// Upstream project prefix; paths outside it are never mirrored.
    pub prefix: String,
    /// Upstream source tree; only log lines mentioning it are considered.
    pub source_tree: String,
    /// Directory token deleted from target paths.
    pub test_ref_token: String,
    pub rules: PathRuleSet,
    pub annotations: AnnotationMarkers,
    pub metadata: Vec<MetadataRule>,
    /// State file relative to the downstream root.
    pub state_file: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            container: "/trunk".to_string(),
            prefix: "/trunk/weka/".to_string(),
            source_tree: "/trunk/weka/src".to_string(),
            test_ref_token: "wekarefs".to_string(),
            rules: PathRuleSet::default(),
            annotations: AnnotationMarkers::default(),
            metadata: default_metadata_rules(),
            state_file: PathBuf::from("update.rev"),
        }
    }
}

impl SyncConfig {
    /// Parse a YAML document, filling omitted fields from the defaults.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: SyncConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::parse(&content)
    }

    /// Check the structural relationships between the configured prefixes.
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() || self.source_tree.is_empty() {
            return Err(Error::Config {
                message: "prefix and source_tree must not be empty".to_string(),
            });
        }
        if !self.prefix.starts_with(&self.container) {
            return Err(Error::Config {
                message: format!(
                    "prefix '{}' is not under container '{}'",
                    self.prefix, self.container
                ),
            });
        }
        if !self.source_tree.starts_with(&self.prefix) {
            return Err(Error::Config {
                message: format!(
                    "source_tree '{}' is not under prefix '{}'",
                    self.source_tree, self.prefix
                ),
            });
        }
        for rule in &self.metadata {
            rule.regex()?;
        }
        Ok(())
    }
}

fn default_metadata_rules() -> Vec<MetadataRule> {
    vec![
        MetadataRule {
            file: PathBuf::from("pom.xml"),
            marker: "<version>".to_string(),
            pattern: r"<version>\d+\.\d+\.(?P<rev>\d+)".to_string(),
            first_only: true,
        },
        MetadataRule {
            file: PathBuf::from("README.md"),
            marker: "svn revision".to_string(),
            pattern: r"svn revision (?P<rev>\d+)".to_string(),
            first_only: false,
        },
        MetadataRule {
            file: PathBuf::from("README.md"),
            marker: "<version>".to_string(),
            pattern: r"<version>\d+\.\d+\.(?P<rev>\d+)".to_string(),
            first_only: false,
        },
    ]
}

const BLACKLISTED_FILES: &[&str] = &[
    // maven
    "/trunk/weka/pom.xml",
    // MTJ related changes
    "/trunk/weka/src/main/java/weka/attributeSelection/PrincipalComponents.java",
    "/trunk/weka/src/test/resources/wekarefs/weka/attributeSelection/PrincipalComponentsTest.ref",
    "/trunk/weka/src/main/java/weka/classifiers/functions/GaussianProcesses.java",
    "/trunk/weka/src/test/resources/wekarefs/weka/classifiers/functions/GaussianProcessesTest.ref",
    "/trunk/weka/src/main/java/weka/classifiers/functions/LinearRegression.java",
    "/trunk/weka/src/test/resources/wekarefs/weka/classifiers/functions/LinearRegressionTest.ref",
    "/trunk/weka/src/main/java/weka/estimators/MultivariateGaussianEstimator.java",
    "/trunk/weka/src/main/java/weka/filters/unsupervised/attribute/PrincipalComponents.java",
    "/trunk/weka/src/test/resources/wekarefs/weka/filters/unsupervised/attribute/PrincipalComponentsTest.ref",
    "/trunk/weka/src/test/resources/wekarefs/weka/classifiers/rules/M5RulesTest.ref",
    "/trunk/weka/src/test/resources/wekarefs/weka/classifiers/trees/M5PTest.ref",
    // package management
    "/trunk/weka/src/main/java/weka/core/Utils.java",
    "/trunk/weka/src/main/java/weka/core/ResourceUtils.java",
    "/trunk/weka/src/main/java/weka/core/WekaPackageLibIsolatingClassLoader.java",
    "/trunk/weka/src/main/java/weka/core/WekaPackageManager.java",
    "/trunk/weka/src/main/java/weka/core/WekaPackageClassLoaderManager.java",
    // javadoc
    "/trunk/weka/src/main/java/weka/core/AllJavadoc.java",
    "/trunk/weka/src/main/java/weka/core/Javadoc.java",
    "/trunk/weka/src/main/java/weka/core/TechnicalInformationHandlerJavadoc.java",
    "/trunk/weka/src/main/java/weka/core/OptionHandlerJavadoc.java",
    "/trunk/weka/src/main/java/weka/core/GlobalInfoJavadoc.java",
    // obsolete test suites
    "/trunk/weka/src/test/java/weka/test/WekaTestSuite.java",
    "/trunk/weka/src/test/java/weka/classifiers/AllTests.java",
    "/trunk/weka/src/test/java/weka/classifiers/functions/supportVector/AllTests.java",
    "/trunk/weka/src/test/java/weka/classifiers/pmml/consumer/AllTests.java",
    "/trunk/weka/src/test/java/weka/attributeSelection/AllTests.java",
    "/trunk/weka/src/test/java/weka/AllTests.java",
    "/trunk/weka/src/test/java/weka/filters/AllTests.java",
    "/trunk/weka/src/test/java/weka/filters/AllFilterTest.java",
    "/trunk/weka/src/test/java/weka/clusterers/AllTests.java",
    "/trunk/weka/src/test/java/weka/associations/AllTests.java",
    "/trunk/weka/src/test/java/weka/core/AllTests.java",
    "/trunk/weka/src/test/java/weka/core/OptionHandlersTests.java",
    "/trunk/weka/src/test/java/weka/core/tokenizers/AllTests.java",
    "/trunk/weka/src/test/java/weka/core/neighboursearch/AllTests.java",
    "/trunk/weka/src/test/java/weka/core/converters/AllTests.java",
    "/trunk/weka/src/test/java/weka/datagenerators/AllTests.java",
];

const BLACKLISTED_PATHS: &[&str] = &[
    // gui
    "/trunk/weka/src/main/java/weka/gui",
    // package management
    "/trunk/weka/src/main/java/weka/core/packageManagement",
    // scripts
    "/trunk/weka/src/main/scripts",
    // pmml
    "/trunk/weka/src/main/java/weka/classifiers/pmml",
    "/trunk/weka/src/main/java/weka/core/pmml",
    "/trunk/weka/src/test/java/weka/classifiers/pmml",
    "/trunk/weka/src/test/resources/wekarefs/weka/classifiers/pmml",
    // other
    "/trunk/weka/src/main/java/weka/core/json",
    "/trunk/weka/src/main/java/weka/core/logging",
    "/trunk/weka/src/main/java/weka/core/metastore",
    "/trunk/weka/src/main/java/weka/core/xml",
    "/trunk/weka/src/main/java/weka/classifiers/xml",
];
