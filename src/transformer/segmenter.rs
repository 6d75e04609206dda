// WHY: sentence chunking decides which heuristics apply to each dash
// Borrowed chunks keep the original text intact so reconstruction is exact

use anyhow::Result;
use regex_automata::{meta::Regex, Input};
use tracing::debug;

/// Terminal punctuation followed by whitespace or end of input.
/// WHY: `\s+` is greedy so every whitespace run between sentences lands in the trailing slot
const BOUNDARY_PATTERN: &str = r"[.!?](?:\s+|\z)";

/// A sentence-like slice of the document plus the whitespace that followed it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Byte offset of `body` within the source text
    pub offset: usize,
    /// Chunk text, terminal punctuation included
    pub body: &'a str,
    /// Whitespace between this chunk and the next one
    pub trailing_whitespace: &'a str,
    /// False for an unterminated tail such as a heading line
    pub has_terminal_punctuation: bool,
}

impl<'a> Chunk<'a> {
    pub fn contains_dash(&self) -> bool {
        self.body.contains(super::EM_DASH)
    }
}

/// Splits text into chunks at `.`, `!` and `?` boundaries
#[derive(Debug)]
pub struct SentenceSegmenter {
    boundary: Regex,
}

impl SentenceSegmenter {
    pub fn new() -> Result<Self> {
        let boundary = Regex::new(BOUNDARY_PATTERN)?;
        debug!("Compiled chunk boundary pattern: {}", BOUNDARY_PATTERN);
        Ok(Self { boundary })
    }

    /// Lazily iterate over the chunks of `text`
    /// WHY: each call starts a fresh iterator so segmentation is restartable
    pub fn segment<'r, 'a>(&'r self, text: &'a str) -> Chunks<'r, 'a> {
        Chunks {
            boundary: &self.boundary,
            text,
            pos: 0,
        }
    }
}

/// Iterator returned by [`SentenceSegmenter::segment`]
#[derive(Debug)]
pub struct Chunks<'r, 'a> {
    boundary: &'r Regex,
    text: &'a str,
    pos: usize,
}

impl<'r, 'a> Iterator for Chunks<'r, 'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }

        let start = self.pos;
        let input = Input::new(self.text).span(start..self.text.len());

        match self.boundary.search(&input) {
            Some(m) => {
                // WHY: terminal marks are ASCII so the body always ends one byte into the match
                let body_end = m.start() + 1;
                self.pos = m.end();
                Some(Chunk {
                    offset: start,
                    body: &self.text[start..body_end],
                    trailing_whitespace: &self.text[body_end..m.end()],
                    has_terminal_punctuation: true,
                })
            }
            None => {
                self.pos = self.text.len();
                Some(Chunk {
                    offset: start,
                    body: &self.text[start..],
                    trailing_whitespace: "",
                    has_terminal_punctuation: false,
                })
            }
        }
    }
}

impl std::iter::FusedIterator for Chunks<'_, '_> {}
