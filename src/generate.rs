//! The end-to-end run: rules → scan → walk → `SUMMARY.md`.
//!
//! ```text
//! 1. Validate   GenConfig          (root must be a directory)
//! 2. Rules      regex.md           → RuleSet (default on absence)
//! 3. Scan       content root       → ContentNode tree
//! 4. Walk       ContentNode tree   → IndexDocument (+ in-place filtering)
//! 5. Write      IndexDocument      → SUMMARY.md (+ optional JSON manifest)
//! ```
//!
//! Everything before step 5 is read-only unless filtering is enabled. A filter
//! failure aborts the run before `SUMMARY.md` is touched, but files filtered
//! earlier in the walk stay rewritten.
//!
//! In a dry run nothing in the book is modified: filtering is skipped and the
//! index is returned without being written. An explicitly requested manifest
//! is still written.

use crate::config::{ConfigError, GenConfig};
use crate::filter::FilterError;
use crate::rules::load_rules;
use crate::scan::{self, Manifest, ScanError, ScanOptions};
use crate::walk::{IndexDocument, Walker};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("can't write to {path}: {source}")]
    WriteSummary {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("can't write manifest {path}: {source}")]
    WriteManifest {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// What a run produced, for the CLI report.
#[derive(Debug)]
pub struct Report {
    pub root: PathBuf,
    pub document: IndexDocument,
    /// Directories indexed.
    pub chapters: usize,
    /// Files indexed.
    pub pages: usize,
    pub filtered: Vec<PathBuf>,
    /// Where the index was written; `None` in a dry run.
    pub summary_path: Option<PathBuf>,
    pub manifest_path: Option<PathBuf>,
    pub has_root_cover: bool,
}

/// Run the whole pipeline for `config`.
pub fn generate(config: &GenConfig) -> Result<Report, GenerateError> {
    config.validate()?;

    let has_root_cover = config.has_root_cover();
    if !has_root_cover {
        warn!(
            root = %config.root.display(),
            cover = %config.layout.cover,
            "Book has no cover page. Create one before rendering the book"
        );
    }

    let rules = load_rules(&config.rules_path());
    let reserved = config.layout.reserved_names();
    let tree = scan::scan(
        &config.root,
        &config.layout,
        &reserved,
        ScanOptions {
            sort_entries: config.sort_entries,
        },
    )?;
    let (chapters, pages) = tree.count_descendants();
    debug!(chapters, pages, "Scanned content tree");

    let apply_filter = config.apply_filter && !config.dry_run;
    let outcome = Walker::new(&rules, &config.layout, apply_filter).walk(&tree)?;

    let manifest_path = match &config.manifest {
        Some(path) => {
            let json = serde_json::to_string_pretty(&Manifest::new(
                &config.root,
                &config.layout,
                &tree,
            ))?;
            std::fs::write(path, json).map_err(|source| GenerateError::WriteManifest {
                path: path.clone(),
                source,
            })?;
            Some(path.clone())
        }
        None => None,
    };

    let summary_path = if config.dry_run {
        None
    } else {
        let path = config.summary_path();
        std::fs::write(&path, outcome.document.render()).map_err(|source| {
            GenerateError::WriteSummary {
                path: path.clone(),
                source,
            }
        })?;
        debug!(path = %path.display(), entries = outcome.document.entries.len(), "Wrote index");
        Some(path)
    };

    Ok(Report {
        root: config.root.clone(),
        document: outcome.document,
        chapters,
        pages,
        filtered: outcome.filtered,
        summary_path,
        manifest_path,
        has_root_cover,
    })
}
