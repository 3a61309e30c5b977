//! # Annotation Stripping
//!
//! mini-weka does not ship the `weka.gui` package, so sources that use the
//! GUI annotations must lose them before they compile downstream. The filter
//! is a line scanner with two states:
//!
//! - `Normal`: import lines for the annotations and single-line annotation
//!   lines are dropped. A multi-line annotation line is dropped and, unless
//!   it already ends in `)`, switches the scanner to `SkippingMultiline`.
//! - `SkippingMultiline`: every line is dropped until one ends in `)`.
//!
//! Every other line is copied unchanged, including its line terminator. If
//! the input ends while still skipping, the rest of the file is lost; the
//! result records where the unterminated construct started so callers can
//! report it.

use crate::config::AnnotationMarkers;

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Normal,
    /// Inside a multi-line annotation that started on the given 1-based line.
    SkippingMultiline { start_line: usize },
}

/// Result of filtering one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filtered {
    pub text: String,
    pub removed_lines: usize,
    /// State after the last line; anything but `Normal` means the input was
    /// malformed and its tail was discarded.
    pub final_state: ScanState,
}

impl Filtered {
    /// Start line of an annotation that never closed.
    pub fn unterminated_at(&self) -> Option<usize> {
        match self.final_state {
            ScanState::Normal => None,
            ScanState::SkippingMultiline { start_line } => Some(start_line),
        }
    }
}

/// Strips annotation markers from Java sources.
#[derive(Debug, Clone, Copy)]
pub struct ContentTransformer<'a> {
    markers: &'a AnnotationMarkers,
}

impl<'a> ContentTransformer<'a> {
    pub fn new(markers: &'a AnnotationMarkers) -> Self {
        Self { markers }
    }

    /// Whether `text` mentions either annotation anywhere.
    pub fn requires_transform(&self, text: &str) -> bool {
        text.lines().any(|line| {
            contains_token(line, &self.markers.multi_line)
                || contains_token(line, &self.markers.single_line)
        })
    }

    pub fn transform(&self, text: &str) -> Filtered {
        let mut output = String::with_capacity(text.len());
        let mut state = ScanState::Normal;
        let mut removed_lines = 0;

        for (idx, line) in text.split_inclusive('\n').enumerate() {
            let (next, keep) = self.step(state, line, idx + 1);
            state = next;
            if keep {
                output.push_str(line);
            } else {
                removed_lines += 1;
            }
        }

        Filtered {
            text: output,
            removed_lines,
            final_state: state,
        }
    }

    fn step(&self, state: ScanState, line: &str, line_no: usize) -> (ScanState, bool) {
        match state {
            ScanState::SkippingMultiline { .. } => {
                if closes_construct(line) {
                    (ScanState::Normal, false)
                } else {
                    (state, false)
                }
            }
            ScanState::Normal => {
                if self.is_annotation_import(line) {
                    (ScanState::Normal, false)
                } else if contains_token(line, &self.markers.multi_line) {
                    if closes_construct(line) {
                        (ScanState::Normal, false)
                    } else {
                        (ScanState::SkippingMultiline { start_line: line_no }, false)
                    }
                } else if contains_token(line, &self.markers.single_line) {
                    (ScanState::Normal, false)
                } else {
                    (ScanState::Normal, true)
                }
            }
        }
    }

    fn is_annotation_import(&self, line: &str) -> bool {
        self.markers
            .imports
            .iter()
            .any(|import| contains_token(line, import))
    }
}

fn contains_token(line: &str, token: &str) -> bool {
    !token.is_empty() && line.contains(token)
}

fn closes_construct(line: &str) -> bool {
    line.trim().ends_with(')')
}
