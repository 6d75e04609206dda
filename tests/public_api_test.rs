// Tests for the collaborator-facing API: highlight spans and the clipboard session
// WHY: UI layers consume these directly, so their contracts must hold outside the crate

use undash::{
    diff_spans, highlight_dashes, DiffSpan, EmDashTransformer, MemoryClipboard, OptimizerSession,
    ReplacementMode, SessionConfig, SpanRole, StatusKind,
};

fn transformed_text(spans: &[DiffSpan], transformed: &str) -> String {
    spans
        .iter()
        .filter(|s| s.role != SpanRole::RemovedDash)
        .map(|s| &transformed[s.start..s.end])
        .collect()
}

#[test]
fn test_diff_spans_tile_transformed_text() {
    let transformer = EmDashTransformer::new().expect("Failed to create transformer");
    let samples = [
        "It was simple—a win—for everyone.",
        "The plan—bold, risky—worked.",
        "It rained—And we stayed. Section Two—Notes",
        "  spaced — dash  .",
        "no dashes at all",
    ];

    for original in samples {
        for mode in ReplacementMode::ALL {
            let transformed = transformer.transform(original, mode);
            let spans = diff_spans(original, &transformed);

            assert_eq!(
                transformed_text(&spans, &transformed),
                transformed,
                "spans do not cover output for {original:?} in {mode}"
            );

            let removed: Vec<_> = spans
                .iter()
                .filter(|s| s.role == SpanRole::RemovedDash)
                .map(|s| s.text(original, &transformed))
                .collect();
            assert_eq!(removed.len(), undash::count_occurrences(original));
            assert!(removed.iter().all(|d| *d == "\u{2014}"));
        }
    }
}

#[test]
fn test_inserted_punctuation_matches_mode() {
    let transformer = EmDashTransformer::new().expect("Failed to create transformer");
    let original = "He ran—tired, he stopped.";
    let transformed = transformer.transform(original, ReplacementMode::Smart);
    let spans = diff_spans(original, &transformed);

    let inserted: Vec<_> = spans
        .iter()
        .filter(|s| s.role == SpanRole::InsertedPunctuation)
        .map(|s| s.text(original, &transformed))
        .collect();
    assert_eq!(inserted, vec![";"]);
}

#[test]
fn test_highlight_dashes_marks_only_dashes() {
    let original = "a—b c—d";
    let spans = highlight_dashes(original);
    let dashes: Vec<_> = spans.iter().filter(|s| s.role == SpanRole::RemovedDash).collect();

    assert_eq!(dashes.len(), 2);
    assert_eq!(&original[dashes[0].start..dashes[0].end], "\u{2014}");
    assert_eq!(spans.last().map(|s| s.end), Some(original.len()));
}

#[test]
fn test_session_lifecycle() {
    let transformer = EmDashTransformer::new().expect("Failed to create transformer");
    let clipboard = MemoryClipboard::with_text("Cold—Yet, sunny.");
    let config = SessionConfig { mode: ReplacementMode::Smart };
    let mut session = OptimizerSession::new(&transformer, clipboard, config);

    let loaded = session.load();
    assert_eq!(loaded.kind, StatusKind::Info);
    assert_eq!(loaded.text, "Found 1 em dash");

    let optimized = session.optimize();
    assert_eq!(optimized.kind, StatusKind::Success);
    assert_eq!(session.preview(), "Cold; yet, sunny.");

    // A second optimize on already clean text is a no-op write
    let again = session.optimize();
    assert_eq!(again.kind, StatusKind::Success);
    assert!(!session.last_result().expect("result recorded").changed());

    let clipboard = session.close();
    assert_eq!(clipboard.contents(), Some("Cold; yet, sunny."));
}

#[test]
fn test_session_denied_clipboard() {
    let transformer = EmDashTransformer::new().expect("Failed to create transformer");
    let clipboard = MemoryClipboard::with_text("a—b").deny_reads();
    let mut session = OptimizerSession::new(&transformer, clipboard, SessionConfig::default());

    let status = session.optimize();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "Clipboard read blocked. Click and try again.");
    assert!(session.last_result().is_none());
}
