//! # mini-weka update library
//!
//! Incrementally mirrors the parts of the Weka subversion tree that
//! mini-weka tracks. Starting from the last synchronized revision, a run
//! asks subversion which files changed, drops the ones mini-weka
//! deliberately leaves out, maps the rest into the downstream layout, strips
//! GUI annotations from sources that carry them, and finally records the new
//! revision.
//!
//! ## Quick Example
//!
//! ```
//! use mini_weka_update::config::SyncConfig;
//! use mini_weka_update::filter::PathFilter;
//! use mini_weka_update::mapper::PathMapper;
//! use std::path::Path;
//!
//! let config = SyncConfig::default();
//! let filter = PathFilter::new(&config);
//! assert!(!filter.classify("/trunk/weka/src/main/java/weka/gui/Foo.java").is_included());
//!
//! let mapper = PathMapper::new(&config, Path::new("/home/dev/weka"));
//! let mapping = mapper.map("/trunk/weka/src/main/java/weka/core/Bar.java").unwrap();
//! assert_eq!(mapping.target_relative, "./src/main/java/weka/core/Bar.java");
//! ```
//!
//! ## Pipeline
//!
//! - **`changelog`**: parses `svn log -v` output into per-revision path lists.
//! - **`filter`**: applies the exact-file and prefix blacklist.
//! - **`mapper`**: derives the checkout source and downstream target.
//! - **`transform`**: removes annotation constructs from Java sources.
//! - **`sync`**: runs the stages in order against a `svn::VersionControl`.
//! - **`metadata`** and **`state`**: record the new revision downstream.

pub mod changelog;
pub mod config;
pub mod error;
pub mod filter;
pub mod mapper;
pub mod metadata;
pub mod output;
pub mod state;
pub mod svn;
pub mod sync;
pub mod transform;

#[cfg(test)]
mod mapper_proptest;
