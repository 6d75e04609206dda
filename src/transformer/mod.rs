// WHY: Main transformer interface tying segmentation, classification and cleanup together
// Pure and stateless per call so one instance can serve any number of callers

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

pub mod classifier;
pub mod coordinator;
pub mod diff;
pub mod normalization;
pub mod segmenter;

// Re-export core types
pub use classifier::{EmDashOccurrence, Replacement};
pub use coordinator::fix_coordinator_case;
pub use diff::{diff_spans, highlight_dashes, DiffSpan, SpanRole};
pub use normalization::{normalize_chunk, normalize_chunk_into};
pub use segmenter::{Chunk, Chunks, SentenceSegmenter};

/// The character being rewritten
pub const EM_DASH: char = '\u{2014}';

/// The lighter dash used for headings and asides with internal commas
pub const EN_DASH: char = '\u{2013}';

/// Replacement strategy chosen once per call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplacementMode {
    Comma,
    Semicolon,
    EnDash,
    Remove,
    /// Context-driven decision per dash
    #[default]
    Smart,
}

impl ReplacementMode {
    pub const ALL: [ReplacementMode; 5] = [
        ReplacementMode::Comma,
        ReplacementMode::Semicolon,
        ReplacementMode::EnDash,
        ReplacementMode::Remove,
        ReplacementMode::Smart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReplacementMode::Comma => "comma",
            ReplacementMode::Semicolon => "semicolon",
            ReplacementMode::EnDash => "en-dash",
            ReplacementMode::Remove => "remove",
            ReplacementMode::Smart => "smart",
        }
    }
}

impl fmt::Display for ReplacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplacementMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ReplacementMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown replacement mode '{s}' (expected one of: comma, semicolon, en-dash, remove, smart)"
                )
            })
    }
}

/// Outcome of a transformation, informational rather than an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformStatus {
    /// Input was empty or whitespace only
    EmptyInput,
    /// Input contained no em dash and is returned untouched
    NoOccurrence,
    /// At least one dash was rewritten
    Changed,
}

/// Result of [`EmDashTransformer::optimize`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
    pub mode: ReplacementMode,
    pub text: String,
    /// Em dashes found in the input
    pub occurrences: usize,
    /// Em dashes rewritten
    pub replaced: usize,
    pub status: TransformStatus,
}

impl Transformation {
    pub fn changed(&self) -> bool {
        self.status == TransformStatus::Changed
    }
}

/// Count em dashes in `text`
pub fn count_occurrences(text: &str) -> usize {
    text.matches(EM_DASH).count()
}

/// Rewrites em dashes chunk by chunk
#[derive(Debug)]
pub struct EmDashTransformer {
    segmenter: SentenceSegmenter,
}

impl EmDashTransformer {
    pub fn new() -> Result<Self> {
        info!("Initializing em dash transformer");
        Ok(Self {
            segmenter: SentenceSegmenter::new()?,
        })
    }

    /// Lazily split text into sentence chunks
    pub fn segment<'r, 'a>(&'r self, text: &'a str) -> Chunks<'r, 'a> {
        self.segmenter.segment(text)
    }

    /// Rewrite every em dash in `text` according to `mode`
    pub fn transform(&self, text: &str, mode: ReplacementMode) -> String {
        self.optimize(text, mode).text
    }

    /// Rewrite and report what happened
    pub fn optimize(&self, text: &str, mode: ReplacementMode) -> Transformation {
        let occurrences = count_occurrences(text);

        let status = if text.trim().is_empty() {
            TransformStatus::EmptyInput
        } else if occurrences == 0 {
            TransformStatus::NoOccurrence
        } else {
            TransformStatus::Changed
        };

        if status != TransformStatus::Changed {
            debug!(?status, "Nothing to transform");
            return Transformation {
                mode,
                text: text.to_string(),
                occurrences,
                replaced: 0,
                status,
            };
        }

        let mut result = String::with_capacity(text.len() + occurrences * 2);
        let mut buffer = String::new();
        let mut replaced = 0;
        let mut chunk_count = 0;

        for chunk in self.segment(text) {
            chunk_count += 1;
            if chunk.contains_dash() {
                replaced += self.transform_chunk_into(&chunk, mode, &mut buffer);
                result.push_str(&buffer);
            } else {
                result.push_str(chunk.body);
            }
            result.push_str(chunk.trailing_whitespace);
        }

        info!(
            %mode,
            chunks = chunk_count,
            occurrences,
            replaced,
            "Transformed text"
        );

        Transformation {
            mode,
            text: result,
            occurrences,
            replaced,
            status,
        }
    }

    /// Transform one chunk into `buffer`, returning the number of dashes replaced
    fn transform_chunk_into(&self, chunk: &Chunk<'_>, mode: ReplacementMode, buffer: &mut String) -> usize {
        let replacements = classifier::classify(chunk, mode);
        let rendered = classifier::render(chunk.body, &replacements);
        // WHY: case fixing runs before normalization while mark offsets are still exact
        let cased = coordinator::fix_coordinator_case_at(&rendered.text, &rendered.joining_marks);
        normalize_chunk_into(&cased, buffer);
        rendered.replaced
    }
}
