//! Content tree discovery.
//!
//! Lists the book's content root into a tree of [`ContentNode`]s. Hidden and
//! reserved entries are pruned at every level, so neither they nor anything
//! beneath them reaches the walker.
//!
//! ## Ordering
//!
//! Children keep the order of the directory listing, which depends on the
//! filesystem. [`ScanOptions::sort_entries`] orders them by file name instead,
//! for output that is stable across machines.
//!
//! ## Unreadable Entries
//!
//! Only a root that cannot be listed fails the scan. A dangling symlink below
//! it is kept as a file, the way a plain directory listing reports it. Other
//! unreadable entries are skipped with a warning.
//!
//! ## Manifest
//!
//! The scanned tree serializes to JSON (see [`Manifest`]) so that a run can be
//! inspected without reading the generated index.

use crate::config::{self, BookLayout, ReservedNames};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to list content tree: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

/// A file or directory under the content root.
#[derive(Debug, Clone, Serialize)]
pub struct ContentNode {
    pub name: String,
    pub kind: NodeKind,
    /// Location on disk, used to filter the file in place.
    #[serde(skip)]
    pub path: PathBuf,
    /// True iff this directory directly contains the cover page.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_cover_page: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    fn from_path(path: &Path, is_dir: bool, layout: &BookLayout) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            kind: if is_dir {
                NodeKind::Directory
            } else {
                NodeKind::File
            },
            path: path.to_path_buf(),
            has_cover_page: is_dir && config::has_cover(path, layout),
            children: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Count `(directories, files)` below this node, excluding itself.
    pub fn count_descendants(&self) -> (usize, usize) {
        self.children
            .iter()
            .fold((0, 0), |(dirs, files), child| {
                let (d, f) = child.count_descendants();
                if child.is_dir() {
                    (dirs + d + 1, files + f)
                } else {
                    (dirs + d, files + f + 1)
                }
            })
    }
}

/// JSON dump of one scan.
#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    pub root: String,
    pub layout: &'a BookLayout,
    pub tree: &'a [ContentNode],
}

impl<'a> Manifest<'a> {
    pub fn new(root: &Path, layout: &'a BookLayout, tree: &'a ContentNode) -> Self {
        Self {
            root: root.to_string_lossy().into_owned(),
            layout,
            tree: &tree.children,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub sort_entries: bool,
}

/// Scan `root` into a tree whose root node is the content root itself.
pub fn scan(
    root: &Path,
    layout: &BookLayout,
    reserved: &ReservedNames,
    options: ScanOptions,
) -> Result<ContentNode, ScanError> {
    let mut tree = ContentNode::from_path(root, true, layout);
    // stack[i] is the open node at depth i + 1
    let mut stack: Vec<ContentNode> = Vec::new();

    let mut walker = WalkDir::new(root).min_depth(1).follow_links(true);
    if options.sort_entries {
        walker = walker.sort_by_file_name();
    }

    let entries = walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !reserved.excludes(&e.file_name().to_string_lossy()));

    for entry in entries {
        let (node, depth) = match entry {
            Ok(entry) => (
                ContentNode::from_path(entry.path(), entry.file_type().is_dir(), layout),
                entry.depth(),
            ),
            Err(err) => match recover_entry(err, reserved)? {
                Some((path, depth)) => (ContentNode::from_path(&path, false, layout), depth),
                None => continue,
            },
        };
        while stack.len() >= depth {
            close_node(&mut tree, &mut stack);
        }
        trace!(path = %node.path.display(), depth, "Discovered entry");
        stack.push(node);
    }
    while !stack.is_empty() {
        close_node(&mut tree, &mut stack);
    }

    Ok(tree)
}

/// Turn an unreadable entry into a file node or drop it.
///
/// A dangling symlink is listed like any other file and keeps its place in the
/// tree. Other failures below the root (permissions, symlink loops) skip the
/// entry with a warning. Failing to list the root itself is fatal.
fn recover_entry(
    err: walkdir::Error,
    reserved: &ReservedNames,
) -> Result<Option<(PathBuf, usize)>, ScanError> {
    if err.depth() == 0 {
        return Err(err.into());
    }
    let Some(path) = err.path().map(Path::to_path_buf) else {
        warn!(error = %err, "Skipping unreadable entry");
        return Ok(None);
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if reserved.excludes(&name) {
        return Ok(None);
    }

    let not_found = err
        .io_error()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound);
    let is_symlink = std::fs::symlink_metadata(&path).is_ok_and(|m| m.file_type().is_symlink());
    if not_found && is_symlink {
        debug!(path = %path.display(), "Dangling symlink listed as a file");
        return Ok(Some((path, err.depth())));
    }

    warn!(path = %path.display(), error = %err, "Skipping unreadable entry");
    Ok(None)
}

/// Pop the deepest open node and attach it to its parent.
fn close_node(tree: &mut ContentNode, stack: &mut Vec<ContentNode>) {
    if let Some(node) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => tree.children.push(node),
        }
    }
}
