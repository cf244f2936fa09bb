//! Index generation over the scanned content tree.
//!
//! The walker visits the tree depth-first and emits one [`IndexEntry`] per
//! node below the root, directory entries ahead of their children:
//!
//! ```text
//! * [Introduction](Introduction.md)
//! * [Part One](Part One/README.md)
//!     * [First Steps](PartOne/FirstSteps.md)
//!     * [Deeper]()
//! ```
//!
//! ## Links
//!
//! - Files link to their path relative to the content root.
//! - Directories with a cover page link to `<parent path><title>/README.md`.
//!   Note the display title, not the directory name, forms the last segment.
//! - Directories without a cover page get an empty link.
//! - Cover pages get no entry of their own.
//!
//! The relative path and depth are passed down by value, so a subtree can
//! never leak state into its siblings, whether it returns normally or with
//! an error.
//!
//! When filtering is enabled each file is filtered as it is visited, and a
//! chapter's cover page is filtered right after the chapter's own entry. The
//! book's root cover page is left alone. The first filter failure aborts the
//! walk.

use crate::config::BookLayout;
use crate::filter::{self, FilterError};
use crate::naming::split_name;
use crate::rules::RuleSet;
use crate::scan::ContentNode;
use std::fmt;
use std::path::PathBuf;
use tracing::trace;

/// Header of every generated index.
pub const SUMMARY_HEADER: &str = "# Summary\n\n";

/// Indentation added per level of depth.
pub const INDENT_UNIT: &str = "    ";

/// One line of the index document.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    /// Nesting level, 0 for children of the content root.
    pub depth: usize,
    pub title: String,
    /// Root-relative link target, empty for directories without a cover page.
    pub link: String,
}

impl fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}* [{}]({})",
            INDENT_UNIT.repeat(self.depth),
            self.title,
            self.link
        )
    }
}

/// The generated table of contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexDocument {
    pub entries: Vec<IndexEntry>,
}

impl IndexDocument {
    /// Render as `SUMMARY.md` content.
    pub fn render(&self) -> String {
        let mut out = String::from(SUMMARY_HEADER);
        for entry in &self.entries {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }
}

/// Result of a full walk.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub document: IndexDocument,
    /// Files rewritten by the content filter, in visiting order.
    pub filtered: Vec<PathBuf>,
}

/// Depth-first index builder for one run.
pub struct Walker<'a> {
    rules: &'a RuleSet,
    layout: &'a BookLayout,
    apply_filter: bool,
    outcome: WalkOutcome,
}

impl<'a> Walker<'a> {
    pub fn new(rules: &'a RuleSet, layout: &'a BookLayout, apply_filter: bool) -> Self {
        Self {
            rules,
            layout,
            apply_filter,
            outcome: WalkOutcome::default(),
        }
    }

    /// Walk everything below `root`. The root itself gets no entry.
    pub fn walk(mut self, root: &ContentNode) -> Result<WalkOutcome, FilterError> {
        for child in &root.children {
            self.visit(child, "", 0)?;
        }
        Ok(self.outcome)
    }

    fn visit(&mut self, node: &ContentNode, parent: &str, depth: usize) -> Result<(), FilterError> {
        let title = split_name(&node.name, self.rules);
        trace!(name = %node.name, parent, depth, "Visiting");

        if node.is_dir() {
            let link = if node.has_cover_page {
                format!("{parent}{title}/{}", self.layout.cover)
            } else {
                String::new()
            };
            self.push(depth, title, link);
            if node.has_cover_page {
                self.filter(node.path.join(&self.layout.cover))?;
            }

            let path = format!("{parent}{}/", node.name);
            for child in &node.children {
                self.visit(child, &path, depth + 1)?;
            }
            return Ok(());
        }

        if node.name == self.layout.cover {
            // Filtered along with its directory
            return Ok(());
        }
        self.push(depth, title, format!("{parent}{}", node.name));
        self.filter(node.path.clone())
    }

    fn filter(&mut self, path: PathBuf) -> Result<(), FilterError> {
        if self.apply_filter {
            filter::filter_file(&path)?;
            self.outcome.filtered.push(path);
        }
        Ok(())
    }

    fn push(&mut self, depth: usize, title: String, link: String) {
        self.outcome
            .document
            .entries
            .push(IndexEntry { depth, title, link });
    }
}
