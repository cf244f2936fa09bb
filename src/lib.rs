//! # Book Summary
//!
//! Generates the `SUMMARY.md` table of contents of a GitBook/mdBook style book
//! from its directory tree. Your filesystem is the data source: directories
//! become chapters, files become pages, and names become titles.
//!
//! # Pipeline
//!
//! ```text
//! 1. Rules     regex.md        →  RuleSet        (naming rules, default on absence)
//! 2. Scan      content root    →  ContentNode    (hidden and reserved entries pruned)
//! 3. Walk      ContentNode     →  IndexDocument  (+ optional in-place filtering)
//! 4. Write     IndexDocument   →  SUMMARY.md
//! ```
//!
//! A single call to [`generate::generate`] runs all of it. There is no state
//! between runs; the index is rebuilt from scratch every time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Run configuration, book layout, reserved names |
//! | [`rules`] | Naming rules loaded from `regex.md` |
//! | [`naming`] | Display titles from file and directory names |
//! | [`scan`] | Content tree discovery and JSON manifest |
//! | [`walk`] | Depth-first index generation |
//! | [`filter`] | In-place markdown normalization |
//! | [`generate`] | The end-to-end run |
//! | [`output`] | CLI report formatting |
//!
//! # Design Decisions
//!
//! ## Reserved Names At Every Level
//!
//! The cover page, the index itself, the glossary, the book metadata and the
//! rule file are skipped wherever they appear, not only at the root. A stray
//! `SUMMARY.md` inside a chapter never shows up as a page. A chapter's cover
//! page still gets filtered along with the chapter; the book's own cover page
//! does not.
//!
//! ## Listing Order
//!
//! Entries appear in directory listing order unless `--sort` is given. The
//! order a filesystem returns is stable for one listing but differs across
//! filesystems, so reproducible output needs the flag.
//!
//! ## Filtering Is All Or Nothing
//!
//! Any read or write failure while filtering aborts the run before the index
//! is written. Files filtered earlier stay rewritten: writes are direct
//! overwrites, so keep the book under version control.

pub mod config;
pub mod filter;
pub mod generate;
pub mod naming;
pub mod output;
pub mod rules;
pub mod scan;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_helpers;
