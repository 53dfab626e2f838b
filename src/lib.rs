//! mdscrub - Markdown Emoji and Whitespace Scrubber
//!
//! mdscrub walks a project tree, finds every `*.md` file outside of dependency
//! and tooling directories (`.venv`, `venv`, `node_modules`, `.git`, `.cursor`),
//! and rewrites it in place with emoji removed and a few whitespace patterns
//! normalized. Files whose cleaned text matches the original are never written.
//!
//! ## Layout
//!
//! - `patterns`: emoji code-point table, exclusion set, and line patterns
//! - `cleaner`: pure text transforms (per line and per document)
//! - `scanner`: file rewriting and tree traversal

pub mod cleaner;
pub mod patterns;
pub mod scanner;

// Re-export commonly used items
pub use cleaner::{clean_content, clean_line, clean_table_cells, split_lines, strip_emoji};
pub use patterns::{is_emoji, is_excluded, is_markdown, EMOJI_RANGES, EXCLUDED_DIRS};
pub use scanner::{
    clean_file, root_for_executable, scan_tree, CleanError, FileOutcome, ScanOptions, ScanReport,
};
