pub mod clipboard;
pub mod input;
pub mod session;
pub mod transformer;

// Re-export main types for convenient access
pub use transformer::{
    count_occurrences, diff_spans, fix_coordinator_case, highlight_dashes, normalize_chunk,
    DiffSpan, EmDashTransformer, ReplacementMode, SpanRole, TransformStatus, Transformation,
    EM_DASH, EN_DASH,
};

// Re-export clipboard session types
pub use clipboard::{ClipboardError, ClipboardProvider, MemoryClipboard, SystemClipboard};
pub use session::{OptimizerSession, SessionConfig, StatusKind, StatusMessage};
