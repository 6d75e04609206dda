// WHY: a clause that used to follow a dash was often capitalized as if it began a sentence
// Once joined by a comma or semicolon the conjunction is mid-sentence again

/// Coordinating conjunctions lowercased after joining punctuation
pub const COORDINATORS: &[&str] = &["And", "But", "Or", "Nor", "For", "So", "Yet"];

/// Marks that join clauses within one sentence
const JOINING_MARKS: &[char] = &[',', ';', ':'];

/// Lowercase a capitalized coordinator following any `,` `;` or `:` plus whitespace
pub fn fix_coordinator_case(text: &str) -> String {
    let marks: Vec<usize> = text
        .char_indices()
        .filter(|(_, c)| JOINING_MARKS.contains(c))
        .map(|(i, _)| i)
        .collect();
    fix_coordinator_case_at(text, &marks)
}

/// Lowercase coordinators only after the joining marks at the given byte offsets
/// WHY: the transformer records where it inserted punctuation so pre-existing text is left alone
pub fn fix_coordinator_case_at(text: &str, mark_offsets: &[usize]) -> String {
    let mut result = text.to_string();

    for &offset in mark_offsets {
        let Some(mark) = text.get(offset..).and_then(|tail| tail.chars().next()) else {
            continue;
        };
        if !JOINING_MARKS.contains(&mark) {
            continue;
        }

        let after_mark = offset + mark.len_utf8();
        let rest = &text[after_mark..];
        let word_start = rest.len() - rest.trim_start().len();
        // WHY: the conjunction must be separated from the mark by whitespace
        if word_start == 0 {
            continue;
        }

        let word_offset = after_mark + word_start;
        if starts_with_coordinator(&text[word_offset..]) {
            // Coordinators start with an ASCII capital so a one-byte swap keeps offsets stable
            result.replace_range(
                word_offset..word_offset + 1,
                &text[word_offset..word_offset + 1].to_ascii_lowercase(),
            );
        }
    }

    result
}

/// Whether `text` begins with a capitalized coordinator as a whole word
fn starts_with_coordinator(text: &str) -> bool {
    COORDINATORS.iter().any(|word| {
        text.starts_with(word)
            && !text[word.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_after_semicolon() {
        assert_eq!(fix_coordinator_case("done; And we left."), "done; and we left.");
    }

    #[test]
    fn test_every_coordinator() {
        for word in COORDINATORS {
            let input = format!("first, {word} second");
            let expected = format!("first, {} second", word.to_lowercase());
            assert_eq!(fix_coordinator_case(&input), expected);
        }
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(fix_coordinator_case("well, Andrew came."), "well, Andrew came.");
        assert_eq!(fix_coordinator_case("then: Soon after"), "then: Soon after");
        assert_eq!(fix_coordinator_case("wait, Or_else"), "wait, Or_else");
    }

    #[test]
    fn test_requires_whitespace_after_mark() {
        assert_eq!(fix_coordinator_case("odd,And spacing"), "odd,And spacing");
    }

    #[test]
    fn test_sentence_start_untouched() {
        assert_eq!(fix_coordinator_case("Done. And we left."), "Done. And we left.");
    }

    #[test]
    fn test_only_selected_marks() {
        let text = "one, But two; But three";
        let second_mark = text.find(';').unwrap();
        assert_eq!(
            fix_coordinator_case_at(text, &[second_mark]),
            "one, But two; but three"
        );
    }

    #[test]
    fn test_offsets_not_on_marks_are_ignored() {
        assert_eq!(fix_coordinator_case_at("x, And y", &[0, 99]), "x, And y");
    }
}
