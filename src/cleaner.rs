//! Text cleaning: emoji removal, space collapsing, and table cell normalization.
//!
//! Everything here is pure string manipulation; file access lives in `scanner`.

use crate::patterns::{is_cell_space, is_emoji, LEADING_BOLD, SPACE_RUN};

/// Remove every emoji character from `text`.
///
/// Characters are deleted outright, so a run of adjacent emoji disappears
/// without leaving a placeholder behind.
pub fn strip_emoji(text: &str) -> String {
    text.chars().filter(|&c| !is_emoji(c)).collect()
}

/// Clean a single line (without its terminator).
///
/// Applies, in order: emoji removal, collapsing of ASCII space runs, and
/// trimming of leading whitespace in front of a `**` bold marker. Emoji go
/// first because removing them can leave behind new double spaces.
pub fn clean_line(line: &str) -> String {
    let stripped = strip_emoji(line);
    let collapsed = SPACE_RUN.replace_all(&stripped, " ");
    LEADING_BOLD.replace(&collapsed, "$1").into_owned()
}

/// Normalize whitespace-only table cells: `|`, two or more whitespace
/// characters, `|` becomes `| |`.
///
/// Works on whole file content, so the whitespace may include line breaks.
/// The closing pipe is not consumed, which lets neighbouring empty cells
/// (`|  |  |`) all normalize in a single pass.
pub fn clean_table_cells(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(pos) = rest.find('|') {
        out.push_str(&rest[..=pos]);
        let after = &rest[pos + 1..];

        let gap: usize = after
            .chars()
            .take_while(|&c| is_cell_space(c))
            .map(char::len_utf8)
            .sum();
        let gap_chars = after[..gap].chars().count();

        if gap_chars >= 2 && after[gap..].starts_with('|') {
            out.push(' ');
            rest = &after[gap..];
        } else {
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

/// Split text into display lines.
///
/// Recognizes `\n`, `\r\n`, `\r`, vertical tab, form feed, the file/group/record
/// separators, NEL, and the Unicode line and paragraph separators. A terminator
/// at the very end does not produce an extra empty line; the returned flag
/// reports whether one was present.
pub fn split_lines(text: &str) -> (Vec<&str>, bool) {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..idx]);
        let mut end = idx + c.len_utf8();
        if c == '\r' {
            if let Some(&(next_idx, '\n')) = chars.peek() {
                chars.next();
                end = next_idx + 1;
            }
        }
        start = end;
    }

    let terminated = start == text.len() && !text.is_empty();
    if start < text.len() {
        lines.push(&text[start..]);
    }

    (lines, terminated)
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0B}'
            | '\u{0C}'
            | '\u{1C}'
            | '\u{1D}'
            | '\u{1E}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Clean a whole document.
///
/// Each line goes through [`clean_line`], lines are rejoined with `\n`, and
/// [`clean_table_cells`] runs over the result. A document that ended with a
/// line terminator ends with a single `\n`.
pub fn clean_content(text: &str) -> String {
    let (lines, terminated) = split_lines(text);

    let joined = lines
        .iter()
        .map(|line| clean_line(line))
        .collect::<Vec<_>>()
        .join("\n");

    let mut cleaned = clean_table_cells(&joined);
    if terminated {
        cleaned.push('\n');
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ clean_line tests ============

    #[test]
    fn test_clean_line_removes_emoji_and_collapses_spaces() {
        assert_eq!(
            clean_line("Great job! 🎉🎉 Nice  work"),
            "Great job! Nice work"
        );
    }

    #[test]
    fn test_clean_line_trims_before_bold() {
        assert_eq!(clean_line("   **Bold heading**"), "**Bold heading**");
        assert_eq!(clean_line("\t**Tabbed**"), "**Tabbed**");
    }

    #[test]
    fn test_clean_line_bold_with_other_rules() {
        // The bold marker is the first non-whitespace content, so only the
        // leading run is trimmed; the mid-line `**` and spacing are handled
        // by the other rules.
        assert_eq!(
            clean_line("  **Bold** but not  at start 🙂 either"),
            "**Bold** but not at start either"
        );
    }

    #[test]
    fn test_clean_line_trims_unit_separator_before_bold() {
        assert_eq!(clean_line("\u{1F} **Bold**"), "**Bold**");
    }

    #[test]
    fn test_clean_line_keeps_leading_space_without_bold() {
        assert_eq!(clean_line("  - item"), " - item");
        assert_eq!(clean_line("\ttext **bold**"), "\ttext **bold**");
        assert_eq!(clean_line("   *italic*"), " *italic*");
    }

    #[test]
    fn test_clean_line_leaves_tabs_alone() {
        assert_eq!(clean_line("a\t\tb"), "a\t\tb");
        assert_eq!(clean_line("a \t b"), "a \t b");
    }

    #[test]
    fn test_clean_line_unchanged_for_plain_text() {
        for line in [
            "",
            "Plain text with single spaces.",
            "| a | b |",
            "Café, naïve, 中文, — and …",
            "Some **bold** in the middle",
        ] {
            assert_eq!(clean_line(line), line);
        }
    }

    #[test]
    fn test_clean_line_emoji_only_line() {
        assert_eq!(clean_line("🚀✨"), "");
        assert_eq!(clean_line("  ✅ **Done**"), "**Done**");
    }

    #[test]
    fn test_clean_line_variation_selector_sequence() {
        assert_eq!(clean_line("Warning ⚠\u{FE0F} read this"), "Warning read this");
    }

    #[test]
    fn test_clean_line_is_idempotent() {
        for line in [
            "Great job! 🎉🎉 Nice  work",
            "   **Bold heading**",
            "  **Bold** but not  at start 🙂 either",
            " 🎉  **x**",
            "\t 🎉\t**y**",
            "a \u{A0} b",
            "🇺🇸 flag   and  ⭐ star",
        ] {
            let once = clean_line(line);
            assert_eq!(clean_line(&once), once, "not idempotent for {line:?}");
        }
    }

    // ============ clean_table_cells tests ============

    #[test]
    fn test_clean_table_cells_empty_cell() {
        assert_eq!(clean_table_cells("| text |    |\n"), "| text | |\n");
    }

    #[test]
    fn test_clean_table_cells_single_space_untouched() {
        assert_eq!(clean_table_cells("| a | |"), "| a | |");
        assert_eq!(clean_table_cells("||"), "||");
    }

    #[test]
    fn test_clean_table_cells_adjacent_empty_cells() {
        assert_eq!(clean_table_cells("|  |  |"), "| | |");
        assert_eq!(clean_table_cells("|\t\t|\t\t|\t\t|"), "| | | |");
    }

    #[test]
    fn test_clean_table_cells_unit_separator_counts_as_space() {
        assert_eq!(clean_table_cells("|\u{1F}\u{1F}|"), "| |");
        assert_eq!(clean_table_cells("| \u{1F}|"), "| |");
    }

    #[test]
    fn test_clean_table_cells_spans_lines() {
        assert_eq!(clean_table_cells("a |\n\n| b"), "a | | b");
    }

    #[test]
    fn test_clean_table_cells_requires_closing_pipe() {
        assert_eq!(clean_table_cells("|    text"), "|    text");
        assert_eq!(clean_table_cells("end |   "), "end |   ");
    }

    // ============ split_lines tests ============

    #[test]
    fn test_split_lines_terminators() {
        let (lines, terminated) = split_lines("a\nb\r\nc\rd\u{2028}e");
        assert_eq!(lines, vec!["a", "b", "c", "d", "e"]);
        assert!(!terminated);
    }

    #[test]
    fn test_split_lines_trailing_terminator() {
        assert_eq!(split_lines("a\n"), (vec!["a"], true));
        assert_eq!(split_lines("a\n\n"), (vec!["a", ""], true));
        assert_eq!(split_lines("a\r\n"), (vec!["a"], true));
    }

    #[test]
    fn test_split_lines_empty() {
        assert_eq!(split_lines(""), (Vec::<&str>::new(), false));
        assert_eq!(split_lines("\n"), (vec![""], true));
    }

    // ============ clean_content tests ============

    #[test]
    fn test_clean_content_clean_document_is_unchanged() {
        let doc = "# Title\n\nSome text.\n\n| a | b |\n| - | - |\n| 1 | |\n";
        assert_eq!(clean_content(doc), doc);
    }

    #[test]
    fn test_clean_content_rewrites_document() {
        let doc = "# Release 🚀\n\n  **Note:** all  good ✅\n| x |   |\n";
        assert_eq!(
            clean_content(doc),
            "# Release \n\n**Note:** all good \n| x | |\n"
        );
    }

    #[test]
    fn test_clean_content_normalizes_line_endings() {
        assert_eq!(clean_content("a\r\nb\r\n"), "a\nb\n");
    }

    #[test]
    fn test_clean_content_is_idempotent() {
        for doc in [
            "a\n\n\n",
            "a\r\n\r\n",
            "|\t\t|\t\t|\n",
            "x |\n\n| y\n",
            "  🎉  **a**  b\u{2029}c",
            "no newline at end",
        ] {
            let once = clean_content(doc);
            assert_eq!(clean_content(&once), once, "not idempotent for {doc:?}");
        }
    }
}
