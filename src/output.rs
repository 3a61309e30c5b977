//! # Run Summary Output
//!
//! Formats the end-of-run summary printed by the CLI. Colors and symbols
//! follow the usual terminal conventions:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use console::style;

use crate::sync::SyncReport;

/// Output configuration for controlling colors and symbols.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the `--color` flag against the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // Presence alone disables colors, even if empty
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Pick the decorated or plain variant of a status symbol.
pub fn symbol<'a>(config: &OutputConfig, fancy: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        fancy
    } else {
        plain
    }
}

/// Render the summary lines for a finished run.
pub fn render_summary(report: &SyncReport, config: &OutputConfig) -> String {
    let mut lines = Vec::new();

    let headline = format!(
        "Number of files that needed updating: {}",
        report.included
    );
    let ok = symbol(config, "✅", "[OK]");
    if config.use_color {
        lines.push(format!("{} {}", ok, style(headline).bold()));
    } else {
        lines.push(format!("{} {}", ok, headline));
    }

    lines.push(format!(
        "   revisions {}:{}, excluded {}, copied {}, filtered {}",
        report.start_revision, report.head_revision, report.excluded, report.copied, report.filtered
    ));

    if !report.failures.is_empty() {
        let warn = symbol(config, "⚠️ ", "[WARN]");
        let text = format!("{} file(s) could not be updated:", report.failures.len());
        if config.use_color {
            lines.push(format!("{} {}", warn, style(text).yellow()));
        } else {
            lines.push(format!("{} {}", warn, text));
        }
        for (path, _) in &report.failures {
            lines.push(format!("   {}", path));
        }
    }

    if report.dry_run {
        lines.push(format!(
            "{} Dry run mode - no files, metadata or state were written.",
            symbol(config, "ℹ️ ", "[INFO]")
        ));
    }

    lines.join("\n")
}
