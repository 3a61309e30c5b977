//! # Metadata Revision Stamps
//!
//! After a successful run the downstream `pom.xml` and `README.md` carry the
//! upstream revision they were built from. Each `MetadataRule` names a file, a
//! marker that identifies the line to rewrite, and a pattern whose `rev`
//! group is replaced by the new revision. Everything else on the line, and in
//! the file, is left untouched.
//!
//! A marker that matches nothing is not an error: the file is left as it was
//! and a warning is logged, since it usually means the file template drifted.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::config::MetadataRule;
use crate::error::Result;

/// Apply `rule` to `content`, returning the new text and the number of lines
/// rewritten.
pub fn stamp_revision(content: &str, rule: &MetadataRule, revision: u64) -> Result<(String, usize)> {
    let regex = rule.regex()?;
    let revision = revision.to_string();
    let mut output = String::with_capacity(content.len() + 8);
    let mut rewritten = 0;

    for line in content.split_inclusive('\n') {
        let eligible = !(rule.first_only && rewritten > 0) && line.contains(&rule.marker);
        let rev = eligible
            .then(|| regex.captures(line))
            .flatten()
            .and_then(|captures| captures.name("rev"));

        match rev {
            Some(rev) => {
                output.push_str(&line[..rev.start()]);
                output.push_str(&revision);
                output.push_str(&line[rev.end()..]);
                rewritten += 1;
            }
            None => output.push_str(line),
        }
    }

    Ok((output, rewritten))
}

/// Rewrite the file named by `rule` below `root` in place.
///
/// Returns the number of lines rewritten. A missing file counts as zero.
pub fn update_file(root: &Path, rule: &MetadataRule, revision: u64) -> Result<usize> {
    let path = root.join(&rule.file);
    if !path.exists() {
        warn!(
            "Metadata file {} does not exist, revision not recorded",
            path.display()
        );
        return Ok(0);
    }

    let content = fs::read_to_string(&path)?;
    let (updated, rewritten) = stamp_revision(&content, rule, revision)?;
    if rewritten == 0 {
        warn!(
            "No line with marker '{}' in {}, left unchanged",
            rule.marker,
            path.display()
        );
        return Ok(0);
    }

    if updated != content {
        fs::write(&path, updated)?;
    }
    info!(
        "Updated revision in {} ({} line(s), marker '{}')",
        path.display(),
        rewritten,
        rule.marker
    );
    Ok(rewritten)
}
