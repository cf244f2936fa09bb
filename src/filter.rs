//! In-place normalization of markdown sources.
//!
//! When filtering is enabled every indexed file is read, rewritten line by
//! line, and written back over itself. Each line is trimmed, then:
//!
//! - a Dropbox share link on a line of its own becomes an `<img>` tag pointing
//!   at the direct (`?raw=1`) URL, with an optional width taken from the token
//!   after the URL:
//!
//!   ```text
//!   https://www.dropbox.com/s/abc123/pic.png?dl=0 400
//!   <img src="https://www.dropbox.com/s/abc123/pic.png?raw=1" width="400">
//!   ```
//!
//! - two trailing spaces are appended, forcing a hard line break in renderers
//!   that would otherwise join consecutive lines.
//!
//! Lines inside triple-backtick fences get neither treatment. Fence lines
//! themselves toggle the fence state before the line is processed, so the
//! opening fence is left bare and the closing fence gets the line break.
//!
//! Refiltering is a no-op: the trim removes the line break added by the
//! previous run before it is appended again, and rewritten links no longer
//! look like share links.
//!
//! Writes are direct overwrites. A crash mid-write can leave a truncated file.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Opens and closes a fenced code block.
pub const FENCE: &str = "```";

/// Appended to every line outside a fenced block.
pub const LINE_BREAK: &str = "  ";

/// A Dropbox link in share (`?dl=0`) or direct (`?raw=1`) form, alone on its line
/// apart from trailing tokens.
static SHARE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://www\.dropbox\.com.*(\?dl=0|\?raw=1).*$").unwrap()
});

const SHARE_QUERY: &str = "?dl=0";
const DIRECT_QUERY: &str = "?raw=1";

/// Line transformer carrying the fenced-block state across lines.
#[derive(Debug, Default)]
pub struct LineFilter {
    in_fence: bool,
}

impl LineFilter {
    #[cfg(test)]
    fn in_fence(&self) -> bool {
        self.in_fence
    }

    /// Transform one line. The result carries no line terminator.
    pub fn filter_line(&mut self, raw: &str) -> String {
        let line = raw.trim();
        if line.starts_with(FENCE) {
            self.in_fence = !self.in_fence;
        }
        if self.in_fence {
            return line.to_string();
        }

        let mut out = if SHARE_LINK_RE.is_match(line) {
            rewrite_share_link(line)
        } else {
            line.to_string()
        };
        out.push_str(LINE_BREAK);
        out
    }
}

/// Turn a share-link line into an `<img>` tag on the direct URL.
fn rewrite_share_link(line: &str) -> String {
    let direct = line.replace(SHARE_QUERY, DIRECT_QUERY);
    let mut tokens = direct.split_whitespace();
    let url = tokens.next().unwrap_or_default();
    let width = tokens.next().and_then(|token| match token.parse::<i32>() {
        Ok(width) => Some(width),
        Err(_) => {
            warn!(token, "Not a valid image width, ignored");
            None
        }
    });

    match width {
        Some(width) => format!(r#"<img src="{url}" width="{width}">"#),
        None => format!(r#"<img src="{url}">"#),
    }
}

/// Filter a whole document. Every output line ends with `\n`.
pub fn filter_text(content: &str) -> String {
    let mut filter = LineFilter::default();
    let mut out = String::with_capacity(content.len() + content.len() / 8);
    for line in content.lines() {
        out.push_str(&filter.filter_line(line));
        out.push('\n');
    }
    out
}

/// Filter the file at `path` in place.
pub fn filter_file(path: &Path) -> Result<(), FilterError> {
    let _span = tracing::debug_span!("filter", path = %path.display()).entered();

    let content = std::fs::read_to_string(path).map_err(|source| FilterError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let filtered = filter_text(&content);
    std::fs::write(path, &filtered).map_err(|source| FilterError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(bytes = filtered.len(), "Filtered file");
    Ok(())
}
