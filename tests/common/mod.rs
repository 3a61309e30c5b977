//! Shared test utilities for CLI end-to-end tests.
//!
//! The fixture lays out a fake Weka checkout, an empty mini-weka project
//! and a stand-in `svn` executable that answers `update`, `info` and `log`
//! from files inside the fixture.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = SvnFixture::new(120)
//!     .with_upstream("weka/src/main/java/weka/core/Bar.java", "class Bar {}")
//!     .with_log(&["/trunk/weka/src/main/java/weka/core/Bar.java"]);
//! fixture.command().arg("-r").arg("100").assert().success();
//! ```

#![allow(dead_code)]

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::{verbose_log, SvnFixture};
}

/// Horizontal rule used by `svn log`.
pub const SEPARATOR: &str =
    "------------------------------------------------------------------------";

/// Build `svn log -v` output with one revision block listing `paths`.
pub fn verbose_log(revision: u64, paths: &[&str]) -> String {
    let listing: Vec<String> = paths.iter().map(|p| format!("   M {}", p)).collect();
    format!(
        "{sep}\nr{rev} | dev | 2020-06-01 10:00:00 +1200 (Mon, 01 Jun 2020) | 1 line\nChanged paths:\n{list}\n\nupdate\n{sep}\n",
        sep = SEPARATOR,
        rev = revision,
        list = listing.join("\n")
    )
}

/// Temporary checkout, downstream project and fake `svn` executable.
pub struct SvnFixture {
    temp_dir: assert_fs::TempDir,
}

impl SvnFixture {
    /// Create a fixture whose `svn info` reports `head` as the revision.
    pub fn new(head: u64) -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("checkout")
            .create_dir_all()
            .expect("Failed to create checkout");
        temp_dir
            .child("project")
            .create_dir_all()
            .expect("Failed to create project");
        temp_dir
            .child("svn-data/info.txt")
            .write_str(&format!("Path: .\nRevision: {}\nNode Kind: directory\n", head))
            .expect("Failed to write info");
        temp_dir
            .child("svn-data/log.txt")
            .write_str("")
            .expect("Failed to write log");
        let fixture = Self { temp_dir };
        fixture.write_svn_script("0");
        fixture
    }

    /// Make every svn invocation exit with `status`.
    pub fn with_failing_svn(self, status: u8) -> Self {
        self.write_svn_script(&status.to_string());
        self
    }

    /// Add a file to the checkout, relative to the checkout root.
    pub fn with_upstream(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child("checkout")
            .child(path)
            .write_str(content)
            .expect("Failed to write upstream file");
        self
    }

    /// Add a file to the downstream project.
    pub fn with_project_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child("project")
            .child(path)
            .write_str(content)
            .expect("Failed to write project file");
        self
    }

    /// Set the log printed by `svn log` to a single block listing `paths`.
    pub fn with_log(self, paths: &[&str]) -> Self {
        self.with_raw_log(&verbose_log(101, paths))
    }

    pub fn with_raw_log(self, log: &str) -> Self {
        self.temp_dir
            .child("svn-data/log.txt")
            .write_str(log)
            .expect("Failed to write log");
        self
    }

    pub fn checkout(&self) -> PathBuf {
        self.temp_dir.path().join("checkout")
    }

    pub fn project(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    pub fn svn(&self) -> PathBuf {
        self.temp_dir.path().join("bin/svn")
    }

    /// Arguments the fake svn was called with, one invocation per line.
    pub fn svn_calls(&self) -> String {
        std::fs::read_to_string(self.temp_dir.path().join("svn-data/calls.txt")).unwrap_or_default()
    }

    pub fn project_file(&self, path: &str) -> PathBuf {
        self.project().join(path)
    }

    /// Command running the binary against this fixture.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("mini-weka-update");
        cmd.current_dir(self.project())
            .env_remove("SVN_EXECUTABLE")
            .env_remove("RUST_LOG")
            .arg("--weka")
            .arg(self.checkout())
            .arg("--svn")
            .arg(self.svn())
            .arg("--color")
            .arg("never");
        cmd
    }

    fn write_svn_script(&self, status: &str) {
        let data = self.temp_dir.path().join("svn-data");
        let script = format!(
            r#"#!/bin/sh
echo "$@" >> "{data}/calls.txt"
if [ "{status}" != "0" ]; then
  echo "svn: E170013: Unable to connect to a repository" >&2
  exit {status}
fi
case "$1" in
  update) echo "At revision." ;;
  info) cat "{data}/info.txt" ;;
  log) cat "{data}/log.txt" ;;
  *) exit 1 ;;
esac
"#,
            data = data.display(),
            status = status
        );
        let path = self.svn();
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create bin dir");
        std::fs::write(&path, script).expect("Failed to write svn script");
        make_executable(&path);
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make svn script executable");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
