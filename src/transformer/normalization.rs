// WHY: substitutions leave stray spaces around the inserted marks
// Single pass over the chunk so cleanup is idempotent by construction

/// Punctuation that never takes a space before it
pub const CLOSING_PUNCTUATION: &[char] = &[',', '.', ';', ':', '!', '?', ')', ']', '}'];

/// Brackets that never take a space after them
pub const OPENING_BRACKETS: &[char] = &['(', '[', '{'];

/// Normalize spacing within a single chunk
/// Removes spaces before closing punctuation and after opening brackets,
/// collapses space runs and trims the ends. Only U+0020 counts as a space;
/// spaces touching a line break are trimmed like chunk edges.
pub fn normalize_chunk(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_chunk_into(text, &mut result);
    result
}

/// Normalize into a supplied buffer to avoid allocation
pub fn normalize_chunk_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut pending_space = false;
    let mut last: Option<char> = None;

    for ch in text.chars() {
        if ch == ' ' {
            pending_space = true;
            continue;
        }

        if pending_space {
            let after_edge = last.is_some_and(|c| OPENING_BRACKETS.contains(&c) || is_line_break(c));
            // WHY: leading spaces are dropped because nothing was emitted yet
            if last.is_some() && !after_edge && !CLOSING_PUNCTUATION.contains(&ch) && !is_line_break(ch) {
                buffer.push(' ');
            }
            pending_space = false;
        }

        buffer.push(ch);
        last = Some(ch);
    }
    // A trailing pending space is trimmed by never being emitted
}

/// Spaces at the edges of a line are trimmed like chunk edges
fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r')
}
