//! Two-phase greedy text chunker.
//!
//! Chunk size is bounded in *approximate units* — whitespace-delimited
//! words, a coarse stand-in for token count that needs no tokenizer.
//! Phase one packs sentence/line fragments into line groups of at most
//! `max_line_units`; phase two merges whole line groups into paragraph
//! chunks of at most `max_paragraph_units`. Line groups are atomic in
//! phase two: a group is never split across two paragraphs, so an
//! oversized group simply becomes its own chunk. Both phases are pure
//! functions of their input.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Default line-group bound, in approximate units
pub const DEFAULT_MAX_LINE_UNITS: usize = 200;

/// Default paragraph-chunk bound, in approximate units
pub const DEFAULT_MAX_PARAGRAPH_UNITS: usize = 500;

/// Size bounds for the two chunking phases.
///
/// `max_paragraph_units` is expected to be >= `max_line_units`; that is
/// not enforced here (violating it only degrades grouping quality, it
/// cannot lose content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    pub max_line_units: usize,
    pub max_paragraph_units: usize,
}

impl ChunkConfig {
    /// Create a config, rejecting non-positive bounds.
    pub fn new(max_line_units: usize, max_paragraph_units: usize) -> Result<Self> {
        if max_line_units == 0 || max_paragraph_units == 0 {
            return Err(CoreError::Validation(
                "chunk bounds must be positive".into(),
            ));
        }
        Ok(Self {
            max_line_units,
            max_paragraph_units,
        })
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_line_units: DEFAULT_MAX_LINE_UNITS,
            max_paragraph_units: DEFAULT_MAX_PARAGRAPH_UNITS,
        }
    }
}

/// Chunk plain text into bounded paragraph chunks.
///
/// Empty input yields an empty sequence. Output order follows document
/// order, and concatenating the chunks reproduces the input text modulo
/// whitespace normalization at group boundaries.
pub fn chunk(text: &str, config: ChunkConfig) -> Vec<String> {
    let lines = split_lines(text, config.max_line_units);
    merge_paragraphs(&lines, config.max_paragraph_units)
}

/// Phase one: pack natural text fragments into line groups.
///
/// Fragments are sentences and physical lines — the preferred break
/// points. A fragment that alone exceeds the bound is split at word
/// boundaries instead (words themselves are never split).
pub fn split_lines(text: &str, max_units: usize) -> Vec<String> {
    let max_units = max_units.max(1);
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut current_units = 0usize;

    for fragment in fragments(text) {
        let units = unit_count(fragment);
        if units == 0 {
            continue;
        }

        if units > max_units {
            // Oversized fragment: close the open group, then fall back
            // to word-boundary packing for this fragment alone.
            close_group(&mut groups, &mut current, &mut current_units);
            pack_words(fragment, max_units, &mut groups);
            continue;
        }

        if current_units + units > max_units {
            close_group(&mut groups, &mut current, &mut current_units);
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(fragment);
        current_units += units;
    }

    close_group(&mut groups, &mut current, &mut current_units);
    groups
}

/// Phase two: greedily merge consecutive line groups into paragraph
/// chunks, treating each line group as atomic.
pub fn merge_paragraphs(line_groups: &[String], max_units: usize) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut current_units = 0usize;

    for group in line_groups {
        let units = unit_count(group);
        if units == 0 {
            continue;
        }

        if current_units > 0 && current_units + units > max_units {
            paragraphs.push(std::mem::take(&mut current));
            current_units = 0;
        }

        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(group);
        current_units += units;
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

/// Approximate unit count of a piece of text (whitespace-delimited words).
pub fn unit_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn close_group(groups: &mut Vec<String>, current: &mut String, current_units: &mut usize) {
    if !current.is_empty() {
        groups.push(std::mem::take(current));
        *current_units = 0;
    }
}

/// Split an oversized fragment at word boundaries into full groups.
fn pack_words(fragment: &str, max_units: usize, groups: &mut Vec<String>) {
    let words: Vec<&str> = fragment.split_whitespace().collect();
    for piece in words.chunks(max_units) {
        groups.push(piece.join(" "));
    }
}

/// Break text into natural fragments: physical lines, subdivided at
/// sentence-ending punctuation followed by whitespace.
fn fragments(text: &str) -> Vec<&str> {
    let mut out = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut start = 0;
        let mut after_terminator = false;
        for (idx, ch) in line.char_indices() {
            if after_terminator && ch.is_whitespace() {
                let piece = line[start..idx].trim();
                if !piece.is_empty() {
                    out.push(piece);
                }
                start = idx;
                after_terminator = false;
            } else {
                after_terminator = matches!(ch, '.' | '!' | '?');
            }
        }

        let tail = line[start..].trim();
        if !tail.is_empty() {
            out.push(tail);
        }
    }

    out
}
