// WHY: ordered per-chunk rules decide every dash once, so no pass re-reads text another pass produced
// Rendering is separate from deciding so non-smart modes share the same spacing repair

use tracing::debug;

use super::normalization::CLOSING_PUNCTUATION;
use super::segmenter::Chunk;
use super::{ReplacementMode, EM_DASH};

/// Marks after which an inserted comma or semicolon would double up
const SENTENCE_PUNCTUATION: &[char] = &[',', '.', ';', ':', '!', '?'];

/// How a single em dash is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    /// `", "`
    Comma,
    /// `"; "`
    Semicolon,
    /// `" – "`
    SpacedEnDash,
    /// `" "`
    Space,
}

impl Replacement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Replacement::Comma => ", ",
            Replacement::Semicolon => "; ",
            Replacement::SpacedEnDash => " \u{2013} ",
            Replacement::Space => " ",
        }
    }

    /// Comma and semicolon join clauses and may need the following conjunction lowercased
    pub fn is_joining_mark(&self) -> bool {
        matches!(self, Replacement::Comma | Replacement::Semicolon)
    }

    /// Fixed replacement for the non-smart modes
    pub fn for_mode(mode: ReplacementMode) -> Option<Self> {
        match mode {
            ReplacementMode::Comma => Some(Replacement::Comma),
            ReplacementMode::Semicolon => Some(Replacement::Semicolon),
            ReplacementMode::EnDash => Some(Replacement::SpacedEnDash),
            ReplacementMode::Remove => Some(Replacement::Space),
            ReplacementMode::Smart => None,
        }
    }
}

/// One em dash inside a chunk, with the context the rules look at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmDashOccurrence {
    /// Byte offset within the chunk body
    pub position: usize,
    /// Character immediately before the dash
    pub before: Option<char>,
    /// Character immediately after the dash
    pub after: Option<char>,
    /// A comma appears anywhere after the dash in the chunk
    pub comma_after: bool,
    /// A comma appears between this dash and the next one
    pub comma_before_next_dash: bool,
}

/// Locate every em dash in a chunk body
pub fn find_occurrences(body: &str) -> Vec<EmDashOccurrence> {
    let positions: Vec<usize> = body.match_indices(EM_DASH).map(|(i, _)| i).collect();

    positions
        .iter()
        .enumerate()
        .map(|(k, &position)| {
            let dash_end = position + EM_DASH.len_utf8();
            let rest = &body[dash_end..];
            let until_next = match positions.get(k + 1) {
                Some(&next) => &body[dash_end..next],
                None => "",
            };
            EmDashOccurrence {
                position,
                before: body[..position].chars().next_back(),
                after: rest.chars().next(),
                comma_after: rest.contains(','),
                comma_before_next_dash: until_next.contains(','),
            }
        })
        .collect()
}

/// Decide one replacement per dash, in order of appearance
pub fn classify(chunk: &Chunk<'_>, mode: ReplacementMode) -> Vec<Replacement> {
    let occurrences = find_occurrences(chunk.body);

    if let Some(fixed) = Replacement::for_mode(mode) {
        return vec![fixed; occurrences.len()];
    }

    let decisions = classify_smart(&occurrences, chunk.has_terminal_punctuation);
    debug!(
        chunk_offset = chunk.offset,
        dashes = occurrences.len(),
        ?decisions,
        "Classified chunk in smart mode"
    );
    decisions
}

/// Smart-mode rules, first match wins
fn classify_smart(occurrences: &[EmDashOccurrence], has_terminal_punctuation: bool) -> Vec<Replacement> {
    match occurrences {
        [] => Vec::new(),
        // Headings and titles keep a dash, just the lighter one
        [_] if !has_terminal_punctuation => vec![Replacement::SpacedEnDash],
        [single] => vec![single_dash_rule(single)],
        _ => {
            let mut decisions = Vec::with_capacity(occurrences.len());
            for pair in occurrences.chunks(2) {
                match pair {
                    [open, _close] => {
                        // WHY: commas inside the aside would blur into comma delimiters
                        let r = if open.comma_before_next_dash {
                            Replacement::SpacedEnDash
                        } else {
                            Replacement::Comma
                        };
                        decisions.push(r);
                        decisions.push(r);
                    }
                    [unpaired] => decisions.push(single_dash_rule(unpaired)),
                    _ => {}
                }
            }
            decisions
        }
    }
}

/// A comma later in the sentence makes another comma ambiguous, so use a semicolon
fn single_dash_rule(occurrence: &EmDashOccurrence) -> Replacement {
    if occurrence.comma_after {
        Replacement::Semicolon
    } else {
        Replacement::Comma
    }
}

/// Chunk text with dashes substituted, before spacing repair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChunk {
    pub text: String,
    /// Byte offsets of inserted commas and semicolons within `text`
    pub joining_marks: Vec<usize>,
    /// Dashes substituted
    pub replaced: usize,
}

/// Substitute each dash with its decided replacement
/// Whitespace on both sides of a dash is swallowed. A comma or semicolon is
/// dropped in favour of a plain space when it would touch other punctuation.
pub fn render(body: &str, replacements: &[Replacement]) -> RenderedChunk {
    let segments: Vec<&str> = body.split(EM_DASH).collect();
    let dash_count = segments.len() - 1;
    debug_assert_eq!(dash_count, replacements.len());

    let mut text = String::with_capacity(body.len() + dash_count * 2);
    let mut joining_marks = Vec::new();

    for (k, segment) in segments.iter().enumerate() {
        let mut segment = *segment;
        if k > 0 {
            segment = segment.trim_start();
        }
        if k < dash_count {
            segment = segment.trim_end();
        }
        text.push_str(segment);

        let Some(replacement) = replacements.get(k).copied().filter(|_| k < dash_count) else {
            continue;
        };

        if replacement.is_joining_mark() {
            let prev = text.trim_end_matches(' ').chars().next_back();
            let next = segments[k + 1].trim_start().chars().next();
            // WHY: a dash opening or closing the chunk has no clause to join on that side
            let collides = prev.map_or(true, |c| SENTENCE_PUNCTUATION.contains(&c))
                || next.map_or(true, |c| CLOSING_PUNCTUATION.contains(&c));
            if collides {
                text.push(' ');
                continue;
            }
            joining_marks.push(text.len());
        }
        text.push_str(replacement.as_str());
    }

    RenderedChunk {
        text,
        joining_marks,
        replaced: dash_count,
    }
}
