//! Character and text patterns used by the markdown cleaner.

use regex::Regex;
use std::path::{Component, Path};
use std::sync::LazyLock;

/// Directory names that are never descended into. A markdown file is skipped
/// when any segment of its path (relative to the scan root) matches one of these.
pub const EXCLUDED_DIRS: &[&str] = &[".venv", "venv", "node_modules", ".git", ".cursor"];

/// File name suffix of the files the cleaner rewrites (case-sensitive).
pub const MARKDOWN_SUFFIX: &str = ".md";

/// Inclusive code-point ranges treated as emoji.
///
/// Ranges may overlap; membership is a plain union.
pub const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x2600, 0x26FF),   // Miscellaneous Symbols
    (0x2700, 0x27BF),   // Dingbats
    (0x2B50, 0x2B55),   // Stars and circles
    (0xFE00, 0xFE0F),   // Variation selectors
    (0x1F1E0, 0x1F1FF), // Regional indicators (flags)
    (0x1F300, 0x1F9FF), // Pictographs, emoticons, supplemental symbols
    (0x1F170, 0x1F251), // Enclosed alphanumeric and ideographic supplements
    // Emoji-presentation characters scattered between the blocks above
    (0x24C2, 0x24C2), // Circled M
    (0x25AA, 0x25AB), // Small squares
    (0x25B6, 0x25B6), // Play button
    (0x25C0, 0x25C0), // Reverse button
    (0x25FB, 0x25FE), // Medium squares
    (0x2934, 0x2935), // Curved arrows
    (0x2B05, 0x2B07), // Left, up, down arrows
    (0x2B1B, 0x2B1C), // Large squares
    (0x3030, 0x3030), // Wavy dash
    (0x303D, 0x303D), // Part alternation mark
    (0x3297, 0x3297), // Circled ideograph congratulation
    (0x3299, 0x3299), // Circled ideograph secret
];

/// Whitespace as the cleaning rules see it: Unicode whitespace plus the unit separator.
pub fn is_cell_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{1F}'
}

/// Two or more consecutive ASCII spaces. Tabs and other whitespace are not included.
pub static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("space run pattern is valid"));

/// Leading whitespace directly followed by a bold marker.
pub static LEADING_BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s\x1F]+(\*\*)").expect("leading bold pattern is valid")
});

/// Check whether a character falls in one of the emoji ranges
pub fn is_emoji(c: char) -> bool {
    let cp = u32::from(c);
    EMOJI_RANGES
        .iter()
        .any(|&(start, end)| start <= cp && cp <= end)
}

/// Check whether a file name carries the markdown suffix
pub fn is_markdown(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(MARKDOWN_SUFFIX))
}

/// Check if any component of `relative` exactly matches a built-in or extra excluded name
pub fn is_excluded(relative: &Path, extra: &[String]) -> bool {
    relative.components().any(|component| {
        if let Component::Normal(name) = component {
            let name = name.to_string_lossy();
            EXCLUDED_DIRS.contains(&name.as_ref())
                || extra.iter().any(|e| e.as_str() == name.as_ref())
        } else {
            false
        }
    })
}
