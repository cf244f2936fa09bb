//! Shared test utilities for the book-summary test suite.
//!
//! Provides fixture setup, small filesystem builders, and lookups over scanned
//! trees and rendered index documents.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! write_file(tmp.path(), "PartThree/Extra.md", "# Extra");
//!
//! let part = find_child(&tree, "PartOne");
//! assert!(part.has_cover_page);
//! ```

use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::scan::ContentNode;

// =========================================================================
// Fixture setup
// =========================================================================

/// A private copy of the sample book in `fixtures/book/`.
///
/// Filtering rewrites pages in place, so every test works on its own copy.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let book = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join("book");
    for entry in WalkDir::new(&book).min_depth(1) {
        let entry = entry.unwrap();
        let target = tmp.path().join(entry.path().strip_prefix(&book).unwrap());
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).unwrap();
        } else {
            std::fs::copy(entry.path(), &target).unwrap();
        }
    }
    tmp
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Read `root/rel` to a string. Panics if missing.
pub fn read_file(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel))
        .unwrap_or_else(|e| panic!("failed to read {rel}: {e}"))
}

// =========================================================================
// Tree lookups (panic with a clear message on miss)
// =========================================================================

/// Find a direct child by name. Panics if not found.
pub fn find_child<'a>(node: &'a ContentNode, name: &str) -> &'a ContentNode {
    node.children
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = node.children.iter().map(|c| c.name.as_str()).collect();
            panic!("entry '{name}' not found under '{}'. Available: {names:?}", node.name)
        })
}

// =========================================================================
// Index document helpers
// =========================================================================

/// Index lines of a rendered document, header removed.
pub fn index_lines(rendered: &str) -> Vec<&str> {
    rendered
        .lines()
        .filter(|l| !l.is_empty() && !l.starts_with("# "))
        .collect()
}

/// Assert that `line` appears exactly once in the rendered document.
pub fn assert_single_line(rendered: &str, line: &str) {
    let count = index_lines(rendered).iter().filter(|l| **l == line).count();
    assert_eq!(count, 1, "expected exactly one '{line}' in:\n{rendered}");
}
