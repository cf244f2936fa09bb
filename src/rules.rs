//! Naming rules loaded from `regex.md`.
//!
//! The rule file is plain text made of alternating lines: a pattern, then the
//! separator that replaces every match of it.
//!
//! ```text
//! _
//!
//! (\d+)-
//! $1.
//! ```
//!
//! The first pair turns underscores into spaces, the second turns `01-Intro`
//! into `01. Intro`. A pattern on the last line with no separator after it uses
//! a single space.
//!
//! Separators are replacement templates: `$1` and `${name}` refer to capture
//! groups, `$$` is a literal dollar sign.
//!
//! Rules apply in file order and each one sees the output of the previous one.
//! A pattern listed twice keeps the position of its first occurrence and the
//! separator of its last one.
//!
//! Without a rule file (or with one that yields no usable rule) the default
//! camel-case rule is used: `TextOne` becomes `Text One`.

use regex::Regex;
use std::path::Path;
use tracing::{debug, info, warn};

/// Separator used when a pattern line has no separator line after it.
pub const DEFAULT_SEPARATOR: &str = " ";

/// Boundary between a non-uppercase, non-whitespace character and an uppercase
/// letter. Both sides are captured so the separator can be inserted between them.
const CAMEL_CASE_PATTERN: &str = r"([^A-Z\s])([A-Z])";

/// A compiled pattern and the replacement applied to its matches.
#[derive(Debug, Clone)]
pub struct NamingRule {
    pattern: Regex,
    replacement: String,
}

impl NamingRule {
    /// Compile a rule from a rule-file pattern and separator.
    pub fn new(pattern: &str, separator: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: separator.to_string(),
        })
    }

    /// The built-in rule inserting `separator` at camel-case boundaries.
    pub fn camel_case(separator: &str) -> Self {
        Self {
            pattern: Regex::new(CAMEL_CASE_PATTERN).expect("camel-case pattern must compile"),
            replacement: format!("${{1}}{}${{2}}", separator.replace('$', "$$")),
        }
    }

    #[cfg(test)]
    fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn apply(&self, name: &str) -> String {
        self.pattern
            .replace_all(name, self.replacement.as_str())
            .into_owned()
    }
}

/// Ordered naming rules for one run.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<NamingRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: vec![NamingRule::camel_case(DEFAULT_SEPARATOR)],
        }
    }
}

impl RuleSet {
    #[cfg(test)]
    fn rules(&self) -> &[NamingRule] {
        &self.rules
    }

    pub(crate) fn len(&self) -> usize {
        self.rules.len()
    }

    /// Run `name` through every rule in order.
    pub fn apply(&self, name: &str) -> String {
        self.rules
            .iter()
            .fold(name.to_string(), |acc, rule| rule.apply(&acc))
    }
}

/// Load the rule file, falling back to the default rule set.
///
/// Never fails: a missing or unreadable file and an unusable pattern are
/// reported and recovered from.
pub fn load_rules(path: &Path) -> RuleSet {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let rules = parse_rules(&content);
            debug!(path = %path.display(), count = rules.len(), "Loaded naming rules");
            rules
        }
        Err(e) => {
            info!(
                path = %path.display(),
                error = %e,
                "No naming rules supplied, using camel-case splitting"
            );
            RuleSet::default()
        }
    }
}

/// Parse rule-file content into a rule set.
pub fn parse_rules(content: &str) -> RuleSet {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut lines = content.lines();

    while let Some(pattern) = lines.next() {
        let separator = lines.next().unwrap_or(DEFAULT_SEPARATOR);
        match pairs.iter_mut().find(|(p, _)| p == pattern) {
            Some(existing) => {
                warn!(pattern, "Duplicated naming rule, the last separator wins");
                existing.1 = separator.to_string();
            }
            None => pairs.push((pattern.to_string(), separator.to_string())),
        }
    }

    let rules: Vec<NamingRule> = pairs
        .into_iter()
        .filter_map(|(pattern, separator)| match NamingRule::new(&pattern, &separator) {
            Ok(rule) => Some(rule),
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "Invalid naming rule pattern, skipped");
                None
            }
        })
        .collect();

    if rules.is_empty() {
        info!("Rule file has no usable rules, using camel-case splitting");
        return RuleSet::default();
    }
    RuleSet { rules }
}
