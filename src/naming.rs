//! Display titles derived from file and directory names.
//!
//! Every entry in the index is labelled with a title computed from its name:
//! the `.md` extension is dropped, then the naming rules rewrite what is left.
//! Under the default rules:
//! - `GettingStarted.md` → "Getting Started"
//! - `PartOne/` → "Part One"
//! - `notes.txt` → "notes.txt" (only markdown extensions are stripped)

use crate::rules::RuleSet;

/// Extension stripped from markdown file names before splitting.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Drop a trailing `.md` from `name`, if present.
pub fn strip_markdown_extension(name: &str) -> &str {
    name.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(name)
}

/// Turn a raw entry name into its display title.
pub fn split_name(name: &str, rules: &RuleSet) -> String {
    let title = rules.apply(strip_markdown_extension(name));
    tracing::trace!(name, title = %title, "Split name");
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::parse_rules;

    #[test]
    fn markdown_extension_is_stripped() {
        assert_eq!(split_name("Chapter.md", &RuleSet::default()), "Chapter");
    }

    #[test]
    fn other_extensions_are_kept() {
        assert_eq!(split_name("Chapter.txt", &RuleSet::default()), "Chapter.txt");
        assert_eq!(split_name("notes.markdown", &RuleSet::default()), "notes.markdown");
    }

    #[test]
    fn only_one_extension_is_stripped() {
        assert_eq!(strip_markdown_extension("draft.md.md"), "draft.md");
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        assert_eq!(strip_markdown_extension("LOUD.MD"), "LOUD.MD");
    }

    #[test]
    fn camel_case_file_name() {
        assert_eq!(
            split_name("GettingStarted.md", &RuleSet::default()),
            "Getting Started"
        );
    }

    #[test]
    fn already_separated_name_is_unchanged() {
        let rules = RuleSet::default();
        assert_eq!(split_name("Text One", &rules), "Text One");
        assert_eq!(split_name("Text One.md", &rules), "Text One");
    }

    #[test]
    fn splitting_is_idempotent() {
        let rules = RuleSet::default();
        let once = split_name("TextOne", &rules);
        assert_eq!(once, "Text One");
        assert_eq!(split_name(&once, &rules), once);
    }

    #[test]
    fn extension_is_stripped_before_rules_run() {
        // A rule matching the dot would otherwise mangle the extension
        let rules = parse_rules(r"\.");
        assert_eq!(split_name("v1.2.md", &rules), "v1 2");
    }

    #[test]
    fn no_matching_rule_returns_name() {
        let rules = parse_rules("zzz\n-\n");
        assert_eq!(split_name("Plain.md", &rules), "Plain");
    }
}
