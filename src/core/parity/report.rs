//! Plain-text rendering of a reconciliation result.

use std::fmt::Write;

use super::{AliasEntry, ReconciliationResult, ResolvedPair};
use crate::error::{Error, Result};

/// Render counts and categorized sections.
pub fn render_text(result: &ReconciliationResult, left: &str, right: &str) -> String {
    let mut out = String::new();
    let s = &result.summary;

    let _ = writeln!(out, "{} count: {}", left, s.left_count);
    let _ = writeln!(out, "{} count: {}", right, s.right_count);
    let _ = writeln!(out, "Matched: {}", s.matched);

    section(
        &mut out,
        &format!("Missing in {} (present in {})", right, left),
        &result.difference.missing,
    );
    section(
        &mut out,
        &format!("Extra in {} (not in {})", right, left),
        &result.difference.extra,
    );
    pair_section(&mut out, "Alias resolved", &result.alias_resolved);
    pair_section(&mut out, "Likely renames (fuzzy)", &result.fuzzy_resolved);
    section(&mut out, "Truly missing (unresolved)", &result.unresolved.missing);
    section(&mut out, "Unmatched extras", &result.unresolved.extra);

    out
}

fn section(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "\n--- {} ({}) ---", title, items.len());
    for item in items {
        let _ = writeln!(out, "{}", item);
    }
}

fn pair_section(out: &mut String, title: &str, pairs: &[ResolvedPair]) {
    let _ = writeln!(out, "\n--- {} ({}) ---", title, pairs.len());
    for pair in pairs {
        let marker = if pair.case_insensitive { " (ignoring case)" } else { "" };
        let _ = writeln!(out, "{} <--> {}{}", pair.source, pair.target, marker);
    }
}

/// Output format for alias suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionFormat {
    Json,
    Toml,
}

/// Render suggested aliases in the same shape the config file accepts.
pub fn render_suggestions(entries: &[AliasEntry], format: SuggestionFormat) -> Result<String> {
    #[derive(serde::Serialize)]
    struct Snippet<'a> {
        aliases: &'a [AliasEntry],
    }

    let snippet = Snippet { aliases: entries };
    match format {
        SuggestionFormat::Json => serde_json::to_string_pretty(&snippet).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize alias suggestions".to_string()))
        }),
        SuggestionFormat::Toml => toml::to_string(&snippet).map_err(|e| {
            Error::internal_unexpected(format!("serialize alias suggestions: {}", e))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parity::{reconcile_tokens, AliasTable, TokenSet};

    fn set(items: &[&str]) -> TokenSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> ReconciliationResult {
        let aliases: AliasTable = [("MysteryGiftDB", "mysterygiftdatabase")].into_iter().collect();
        reconcile_tokens(
            &set(&["BoxViewer", "MysteryGiftDB", "Link6", "FolderList"]),
            &set(&["BoxViewer", "MysteryGiftDatabase", "Link6Ed"]),
            &aliases,
            true,
        )
    }

    #[test]
    fn renders_counts_and_sections() {
        let text = render_text(&sample(), "WinForms", "Avalonia");

        assert!(text.starts_with("WinForms count: 4\nAvalonia count: 3\nMatched: 1\n"));
        assert!(text.contains("--- Missing in Avalonia (present in WinForms) (3) ---"));
        assert!(text.contains("MysteryGiftDB <--> MysteryGiftDatabase (ignoring case)"));
        assert!(text.contains("--- Likely renames (fuzzy) (1) ---\nLink6 <--> Link6Ed\n"));
        assert!(text.contains("--- Truly missing (unresolved) (1) ---\nFolderList\n"));
        assert!(text.contains("--- Unmatched extras (0) ---"));
    }

    #[test]
    fn suggestions_render_as_config_snippets() {
        let entries = vec![AliasEntry::new("Link6", "Link6Ed")];

        let toml = render_suggestions(&entries, SuggestionFormat::Toml).unwrap();
        assert!(toml.contains("[[aliases]]"));
        assert!(toml.contains("source = \"Link6\""));

        let json = render_suggestions(&entries, SuggestionFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["aliases"][0]["target"], "Link6Ed");
    }
}
