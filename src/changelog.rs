//! # Verbose Log Parsing
//!
//! Turns the text printed by `svn log -v` into one `LogEntry` per revision
//! block. A block looks like:
//!
//! ```text
//! ------------------------------------------------------------------------
//! r15123 | fracpete | 2020-04-02 10:11:12 +1300 (Thu, 02 Apr 2020) | 1 line
//! Changed paths:
//!    M /trunk/weka/src/main/java/weka/core/Instances.java
//!
//! fixed typo
//! ------------------------------------------------------------------------
//! ```
//!
//! Extraction is deliberately loose. Every non-blank line after the
//! `Changed paths:` marker that mentions the source tree contributes the text
//! from its first `/` onwards, so the `M`/`A`/`D` action column is dropped
//! but anything trailing (copy-from annotations, message lines that quote a
//! path) is kept as-is. Blocks that do not contain exactly one marker are
//! skipped.

/// Horizontal rule separating revision blocks.
pub const ENTRY_SEPARATOR: &str =
    "------------------------------------------------------------------------";

/// Marker introducing the changed-path listing of a block.
pub const CHANGED_PATHS: &str = "Changed paths:";

/// Changed paths of one revision block, in log order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub paths: Vec<String>,
}

/// Parse a verbose log, keeping only lines that mention `source_tree`.
///
/// Entries without qualifying paths are omitted. Paths are not deduplicated
/// across entries.
pub fn parse(log: &str, source_tree: &str) -> Vec<LogEntry> {
    log.split(ENTRY_SEPARATOR)
        .filter_map(|block| parse_block(block, source_tree))
        .collect()
}

fn parse_block(block: &str, source_tree: &str) -> Option<LogEntry> {
    let mut parts = block.split(CHANGED_PATHS);
    let _header = parts.next()?;
    let listing = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let paths: Vec<String> = listing
        .trim()
        .split('\n')
        .filter(|line| !line.trim().is_empty() && line.contains(source_tree))
        .filter_map(|line| line.find('/').map(|idx| line[idx..].to_string()))
        .collect();

    if paths.is_empty() {
        None
    } else {
        Some(LogEntry { paths })
    }
}
