use std::collections::HashMap;
use std::path::Path;

use ratatui::style::Style;
use tree_sitter_highlight::{HighlightConfiguration, HighlightEvent, Highlighter};

use super::languages::detect_language;
use super::theme::{highlight_names_vec, style_for_highlight};
use crate::theme::SyntaxColors;

/// A span of styled text within a line, in byte offsets.
#[derive(Debug, Clone)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub style: Style,
}

/// Tree-sitter highlighter holding configurations for the languages in use.
pub struct HighlightEngine {
    configs: HashMap<&'static str, HighlightConfiguration>,
}

impl HighlightEngine {
    /// Build configurations only for the languages these paths need.
    pub fn for_paths<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        let highlight_names = highlight_names_vec();
        let mut configs = HashMap::new();

        for path in paths {
            let Some(entry) = detect_language(path) else {
                continue;
            };
            if configs.contains_key(entry.name) {
                continue;
            }
            match entry.config(&highlight_names) {
                Ok(config) => {
                    configs.insert(entry.name, config);
                }
                Err(e) => log::warn!("highlight config for {} failed: {e}", entry.name),
            }
        }

        Self { configs }
    }

    #[cfg(test)]
    pub fn language_count(&self) -> usize {
        self.configs.len()
    }

    /// Highlight `content` and return per-line spans.
    /// Returns None if the language is not recognized or highlighting fails.
    pub fn highlight_lines(
        &self,
        path: &Path,
        content: &str,
        syntax: &SyntaxColors,
    ) -> Option<Vec<Vec<HighlightSpan>>> {
        let entry = detect_language(path)?;
        let config = self.configs.get(entry.name)?;

        let mut highlighter = Highlighter::new();
        let events = highlighter
            .highlight(config, content.as_bytes(), None, |_| None)
            .ok()?;

        let lines: Vec<&str> = content.split('\n').collect();
        let mut result: Vec<Vec<HighlightSpan>> = vec![Vec::new(); lines.len()];

        let mut styles: Vec<Style> = Vec::new();

        for event in events {
            match event.ok()? {
                HighlightEvent::Source { start, end } => {
                    if let Some(&style) = styles.last() {
                        add_spans_for_range(&lines, &mut result, start, end, style);
                    }
                }
                HighlightEvent::HighlightStart(highlight) => {
                    styles.push(style_for_highlight(highlight.0, syntax));
                }
                HighlightEvent::HighlightEnd => {
                    styles.pop();
                }
            }
        }

        Some(result)
    }
}

/// Add highlight spans across line boundaries for a byte range.
fn add_spans_for_range(
    lines: &[&str],
    result: &mut [Vec<HighlightSpan>],
    start: usize,
    end: usize,
    style: Style,
) {
    if start >= end {
        return;
    }

    let mut line_start_byte = 0;
    for (line_idx, line) in lines.iter().enumerate() {
        let line_end_byte = line_start_byte + line.len();

        if start < line_end_byte + 1 && end > line_start_byte {
            let span_start = start.saturating_sub(line_start_byte).min(line.len());
            let span_end = (end - line_start_byte).min(line.len());

            if span_start < span_end && line_idx < result.len() {
                result[line_idx].push(HighlightSpan {
                    start: span_start,
                    end: span_end,
                    style,
                });
            }
        }

        if line_start_byte > end {
            break;
        }

        // +1 for the newline character
        line_start_byte = line_end_byte + 1;
    }
}
