// WHY: UI layers need highlight positions without re-deriving what the transformer changed
// Alignment is greedy because the transformer only touches dashes, spaces, inserted marks and letter case

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::EM_DASH;

/// Characters the transformer may insert in place of a dash
const INSERTED_MARKS: &[char] = &[',', ';', '\u{2013}'];

/// What a span represents in the rendered comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanRole {
    /// Text carried over, including spacing changes
    Unchanged,
    /// An em dash from the original text
    RemovedDash,
    /// Punctuation that took a dash's place
    InsertedPunctuation,
}

/// Byte range plus role
/// `RemovedDash` ranges index the original text; the other roles index the transformed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSpan {
    pub start: usize,
    pub end: usize,
    pub role: SpanRole,
}

impl DiffSpan {
    /// Slice the span out of whichever text it indexes
    pub fn text<'a>(&self, original: &'a str, transformed: &'a str) -> &'a str {
        let source = match self.role {
            SpanRole::RemovedDash => original,
            _ => transformed,
        };
        source.get(self.start..self.end).unwrap_or("")
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Collects spans, merging contiguous ones that share a role
#[derive(Debug, Default)]
struct SpanBuilder {
    spans: Vec<DiffSpan>,
}

impl SpanBuilder {
    fn push(&mut self, role: SpanRole, range: Range<usize>) {
        if let Some(last) = self.spans.last_mut() {
            if last.role == role && last.end == range.start {
                last.end = range.end;
                return;
            }
        }
        self.spans.push(DiffSpan {
            start: range.start,
            end: range.end,
            role,
        });
    }

    fn finish(self) -> Vec<DiffSpan> {
        self.spans
    }
}

fn char_range((pos, ch): (usize, char)) -> Range<usize> {
    pos..pos + ch.len_utf8()
}

/// Align original and transformed text into highlight spans
/// Spans over the transformed text tile it completely and in order; removed
/// dashes are interleaved where they disappeared.
pub fn diff_spans(original: &str, transformed: &str) -> Vec<DiffSpan> {
    let before: Vec<(usize, char)> = original.char_indices().collect();
    let after: Vec<(usize, char)> = transformed.char_indices().collect();
    let mut builder = SpanBuilder::default();
    let (mut i, mut j) = (0, 0);

    while i < before.len() || j < after.len() {
        let o = before.get(i).map(|&(_, c)| c);
        let t = after.get(j).map(|&(_, c)| c);

        if o.is_some() && o == t {
            builder.push(SpanRole::Unchanged, char_range(after[j]));
            i += 1;
            j += 1;
            continue;
        }

        let mut progressed = false;

        // Dropped on the original side: dashes and the whitespace around them
        while let Some(&(pos, c)) = before.get(i) {
            if !(c.is_whitespace() || c == EM_DASH) || Some(c) == t {
                break;
            }
            if c == EM_DASH {
                builder.push(SpanRole::RemovedDash, char_range((pos, c)));
            }
            i += 1;
            progressed = true;
        }

        // Added on the transformed side: replacement marks and spacing
        let o = before.get(i).map(|&(_, c)| c);
        while let Some(&(pos, c)) = after.get(j) {
            if !(c.is_whitespace() || INSERTED_MARKS.contains(&c)) || Some(c) == o {
                break;
            }
            let role = if c.is_whitespace() {
                SpanRole::Unchanged
            } else {
                SpanRole::InsertedPunctuation
            };
            builder.push(role, char_range((pos, c)));
            j += 1;
            progressed = true;
        }

        if !progressed {
            // Substitution such as a lowercased conjunction
            if let Some(&entry) = after.get(j) {
                builder.push(SpanRole::Unchanged, char_range(entry));
                j += 1;
            }
            if i < before.len() {
                i += 1;
            }
        }
    }

    builder.finish()
}

/// Mark every em dash in `original`, for the "before" view
pub fn highlight_dashes(original: &str) -> Vec<DiffSpan> {
    let mut builder = SpanBuilder::default();
    for entry in original.char_indices() {
        let role = if entry.1 == EM_DASH {
            SpanRole::RemovedDash
        } else {
            SpanRole::Unchanged
        };
        builder.push(role, char_range(entry));
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize, role: SpanRole) -> DiffSpan {
        DiffSpan { start, end, role }
    }

    fn transformed_coverage(spans: &[DiffSpan], transformed: &str) -> String {
        spans
            .iter()
            .filter(|s| s.role != SpanRole::RemovedDash)
            .map(|s| &transformed[s.range()])
            .collect()
    }

    #[test]
    fn test_identical_text_is_one_unchanged_span() {
        let spans = diff_spans("no dashes here", "no dashes here");
        assert_eq!(spans, vec![span(0, 14, SpanRole::Unchanged)]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(diff_spans("", "").is_empty());
        assert!(highlight_dashes("").is_empty());
    }

    #[test]
    fn test_comma_replacement() {
        let original = "fast—really fast";
        let transformed = "fast, really fast";
        let spans = diff_spans(original, transformed);

        assert_eq!(
            spans,
            vec![
                span(0, 4, SpanRole::Unchanged),
                span(4, 7, SpanRole::RemovedDash),
                span(4, 5, SpanRole::InsertedPunctuation),
                span(5, 17, SpanRole::Unchanged),
            ]
        );
        assert_eq!(spans[1].text(original, transformed), "—");
        assert_eq!(spans[2].text(original, transformed), ",");
    }

    #[test]
    fn test_removal_keeps_space_unchanged() {
        let spans = diff_spans("x—y", "x y");
        assert_eq!(
            spans,
            vec![
                span(0, 1, SpanRole::Unchanged),
                span(1, 4, SpanRole::RemovedDash),
                span(1, 3, SpanRole::Unchanged),
            ]
        );
    }

    #[test]
    fn test_spaced_en_dash() {
        let transformed = "Section One \u{2013} Overview";
        let spans = diff_spans("Section One—Overview", transformed);
        let inserted: Vec<_> = spans
            .iter()
            .filter(|s| s.role == SpanRole::InsertedPunctuation)
            .map(|s| s.text("", transformed))
            .collect();
        assert_eq!(inserted, vec!["\u{2013}"]);
        assert_eq!(transformed_coverage(&spans, transformed), transformed);
    }

    #[test]
    fn test_lowercased_conjunction_stays_aligned() {
        let original = "It rained—And we stayed.";
        let transformed = "It rained, and we stayed.";
        let spans = diff_spans(original, transformed);

        assert_eq!(transformed_coverage(&spans, transformed), transformed);
        assert_eq!(spans.iter().filter(|s| s.role == SpanRole::RemovedDash).count(), 1);
        assert_eq!(
            spans.iter().filter(|s| s.role == SpanRole::InsertedPunctuation).count(),
            1
        );
    }

    #[test]
    fn test_highlight_dashes() {
        let spans = highlight_dashes("a—b—c");
        assert_eq!(
            spans,
            vec![
                span(0, 1, SpanRole::Unchanged),
                span(1, 4, SpanRole::RemovedDash),
                span(4, 5, SpanRole::Unchanged),
                span(5, 8, SpanRole::RemovedDash),
                span(8, 9, SpanRole::Unchanged),
            ]
        );
    }

    #[test]
    fn test_roles_serialize_kebab_case() {
        let json = serde_json::to_string(&span(0, 3, SpanRole::RemovedDash)).unwrap();
        assert_eq!(json, r#"{"start":0,"end":3,"role":"removed-dash"}"#);
    }
}
