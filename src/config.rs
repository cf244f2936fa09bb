//! Run configuration.
//!
//! A run is fully described by a [`GenConfig`]: where the book lives, whether
//! sources are filtered in place, and the [`BookLayout`] naming the special
//! files of the book. There is no config file; everything comes from the
//! command line and the defaults below.
//!
//! ## Book Layout
//!
//! ```text
//! book/
//! ├── README.md        # Cover page (root cover is expected, warns if absent)
//! ├── SUMMARY.md       # Generated index, overwritten on every run
//! ├── GLOSSARY.md      # Glossary, never indexed
//! ├── book.json        # Book metadata, never indexed
//! ├── regex.md         # Naming rules (optional)
//! ├── Introduction.md
//! └── PartOne/
//!     ├── README.md    # Cover page of "Part One"
//!     └── FirstSteps.md
//! ```
//!
//! Every file listed above except the chapter files is a reserved name. The
//! walker skips reserved and hidden (`.`-prefixed) entries at every level.

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("root path {0} does not exist")]
    InvalidRoot(PathBuf),
    #[error("root path {0} is not a directory")]
    NotADirectory(PathBuf),
}

/// Names of the special files that make up a book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookLayout {
    /// Cover page of the book and of each chapter directory.
    pub cover: String,
    /// Generated index document.
    pub summary: String,
    pub glossary: String,
    /// Book metadata file read by the renderer.
    pub metadata: String,
    /// Naming rule file, see [`crate::rules`].
    pub rules: String,
}

impl Default for BookLayout {
    fn default() -> Self {
        Self {
            cover: "README.md".to_string(),
            summary: "SUMMARY.md".to_string(),
            glossary: "GLOSSARY.md".to_string(),
            metadata: "book.json".to_string(),
            rules: "regex.md".to_string(),
        }
    }
}

impl BookLayout {
    /// Freeze the layout into the set of names excluded from traversal.
    pub fn reserved_names(&self) -> ReservedNames {
        ReservedNames {
            names: [
                &self.cover,
                &self.summary,
                &self.glossary,
                &self.metadata,
                &self.rules,
            ]
            .into_iter()
            .cloned()
            .collect(),
        }
    }
}

/// Immutable set of entry names the walker never visits.
#[derive(Debug, Clone)]
pub struct ReservedNames {
    names: HashSet<String>,
}

impl ReservedNames {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Whether an entry is excluded: reserved, or hidden by a leading dot.
    pub fn excludes(&self, name: &str) -> bool {
        name.starts_with('.') || self.contains(name)
    }
}

/// Everything a single run needs to know.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Content root of the book.
    pub root: PathBuf,
    /// Rewrite sources in place with [`crate::filter`].
    pub apply_filter: bool,
    /// Order entries by file name instead of directory listing order.
    pub sort_entries: bool,
    /// Render the index without writing or filtering anything.
    pub dry_run: bool,
    /// Also dump the scanned tree as JSON to this path.
    pub manifest: Option<PathBuf>,
    pub layout: BookLayout,
}

impl GenConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            apply_filter: false,
            sort_entries: false,
            dry_run: false,
            manifest: None,
            layout: BookLayout::default(),
        }
    }

    /// Reject roots that cannot be walked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.root.exists() {
            return Err(ConfigError::InvalidRoot(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(ConfigError::NotADirectory(self.root.clone()));
        }
        Ok(())
    }

    pub fn summary_path(&self) -> PathBuf {
        self.root.join(&self.layout.summary)
    }

    pub fn rules_path(&self) -> PathBuf {
        self.root.join(&self.layout.rules)
    }

    pub fn has_root_cover(&self) -> bool {
        has_cover(&self.root, &self.layout)
    }
}

/// Whether `dir` lists an entry named exactly like the layout's cover page.
///
/// Matches against the listing rather than probing the path, so a `readme.md`
/// on a case-insensitive filesystem is not taken for the cover page.
pub fn has_cover(dir: &Path, layout: &BookLayout) -> bool {
    std::fs::read_dir(dir).is_ok_and(|entries| {
        entries
            .flatten()
            .any(|entry| entry.file_name() == layout.cover.as_str())
    })
}

/// Interpret the textual filter toggle: `true` in any case enables filtering.
pub fn parse_filter_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_layout_names() {
        let layout = BookLayout::default();
        assert_eq!(layout.cover, "README.md");
        assert_eq!(layout.summary, "SUMMARY.md");
        assert_eq!(layout.glossary, "GLOSSARY.md");
        assert_eq!(layout.metadata, "book.json");
        assert_eq!(layout.rules, "regex.md");
    }

    #[test]
    fn reserved_names_cover_whole_layout() {
        let reserved = BookLayout::default().reserved_names();
        for name in ["README.md", "SUMMARY.md", "GLOSSARY.md", "book.json", "regex.md"] {
            assert!(reserved.contains(name), "{name} should be reserved");
        }
        assert!(!reserved.contains("Chapter.md"));
    }

    #[test]
    fn hidden_entries_are_excluded() {
        let reserved = BookLayout::default().reserved_names();
        assert!(reserved.excludes(".DS_Store"));
        assert!(reserved.excludes(".git"));
        assert!(!reserved.excludes("notes.md"));
    }

    #[test]
    fn reserved_names_are_case_sensitive() {
        let reserved = BookLayout::default().reserved_names();
        assert!(!reserved.excludes("readme.md"));
    }

    #[test]
    fn layout_serializes_for_manifest() {
        let json = serde_json::to_value(BookLayout::default()).unwrap();
        assert_eq!(json["cover"], "README.md");
        assert_eq!(json["rules"], "regex.md");
    }

    #[test]
    fn filter_flag_parsing() {
        assert!(parse_filter_flag(Some("true")));
        assert!(parse_filter_flag(Some("TRUE")));
        assert!(parse_filter_flag(Some("True")));
        assert!(!parse_filter_flag(Some("false")));
        assert!(!parse_filter_flag(Some("yes")));
        assert!(!parse_filter_flag(Some("1")));
        assert!(!parse_filter_flag(None));
    }

    #[test]
    fn validate_accepts_directory() {
        let tmp = TempDir::new().unwrap();
        assert!(GenConfig::new(tmp.path()).validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_root() {
        let tmp = TempDir::new().unwrap();
        let config = GenConfig::new(tmp.path().join("nope"));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRoot(_))));
    }

    #[test]
    fn validate_rejects_file_root() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("book.md");
        fs::write(&file, "# Book").unwrap();
        let config = GenConfig::new(&file);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotADirectory(_))
        ));
    }

    #[test]
    fn root_cover_detection() {
        let tmp = TempDir::new().unwrap();
        let config = GenConfig::new(tmp.path());
        assert!(!config.has_root_cover());
        fs::write(tmp.path().join("README.md"), "# Book").unwrap();
        assert!(config.has_root_cover());
    }

    #[test]
    fn cover_must_match_name_exactly() {
        let lower = TempDir::new().unwrap();
        fs::write(lower.path().join("readme.md"), "# lower").unwrap();
        assert!(!has_cover(lower.path(), &BookLayout::default()));

        let exact = TempDir::new().unwrap();
        fs::write(exact.path().join("README.md"), "# Book").unwrap();
        assert!(has_cover(exact.path(), &BookLayout::default()));
    }

    #[test]
    fn unreadable_dir_has_no_cover() {
        let tmp = TempDir::new().unwrap();
        assert!(!has_cover(&tmp.path().join("missing"), &BookLayout::default()));
    }

    #[test]
    fn paths_are_under_root() {
        let config = GenConfig::new("/books/rust");
        assert_eq!(config.summary_path(), Path::new("/books/rust/SUMMARY.md"));
        assert_eq!(config.rules_path(), Path::new("/books/rust/regex.md"));
    }
}
