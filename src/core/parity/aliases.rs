//! Alias resolution: curated cross-convention renames.
//!
//! The alias table is the authoritative resolution mechanism. Entries are
//! processed in declaration order and each target can be claimed once per
//! pass, so a shared editor on one side cannot silently absorb several
//! editors from the other side.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ResolvedPair, TokenSet};
use crate::error::{Error, Result};

/// `source` (left convention) is known to correspond to `target` (right convention).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub source: String,
    pub target: String,
}

impl AliasEntry {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Parses the CLI form `SOURCE=TARGET`.
impl FromStr for AliasEntry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (source, target) = s.split_once('=').ok_or_else(|| {
            Error::validation_invalid_argument(
                "alias",
                format!("Expected SOURCE=TARGET, got '{}'", s),
                None,
                None,
            )
        })?;

        let source = source.trim();
        let target = target.trim();
        if source.is_empty() || target.is_empty() {
            return Err(Error::validation_invalid_argument(
                "alias",
                format!("Alias '{}' has an empty side", s),
                None,
                None,
            ));
        }

        Ok(AliasEntry::new(source, target))
    }
}

/// Ordered alias table with map semantics on `source`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<AliasEntry>", into = "Vec<AliasEntry>")]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update an entry. Re-declaring a source keeps its original
    /// position and takes the new target.
    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        let target = target.into();
        match self.entries.iter_mut().find(|e| e.source == source) {
            Some(existing) => existing.target = target,
            None => self.entries.push(AliasEntry { source, target }),
        }
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.source == source)
            .map(|e| e.target.as_str())
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `other` into this table; later entries override earlier targets.
    pub fn extend(&mut self, other: impl IntoIterator<Item = AliasEntry>) {
        for entry in other {
            self.insert(entry.source, entry.target);
        }
    }
}

impl From<Vec<AliasEntry>> for AliasTable {
    fn from(entries: Vec<AliasEntry>) -> Self {
        let mut table = AliasTable::new();
        table.extend(entries);
        table
    }
}

impl From<AliasTable> for Vec<AliasEntry> {
    fn from(table: AliasTable) -> Self {
        table.entries
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut table = AliasTable::new();
        for (source, target) in iter {
            table.insert(source, target);
        }
        table
    }
}

/// Outcome of the alias pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasOutcome {
    pub resolved: Vec<ResolvedPair>,
    pub still_only_in_a: TokenSet,
    pub still_only_in_b: TokenSet,
}

/// Resolve `only_in_a` against `only_in_b` through `table`.
///
/// Lookup is exact first, then case-insensitive over the remaining right-side
/// tokens in lexicographic order. Entries whose source or target is absent
/// are no-ops.
pub fn resolve_aliases(
    only_in_a: &TokenSet,
    only_in_b: &TokenSet,
    table: &AliasTable,
) -> AliasOutcome {
    let mut still_a = only_in_a.clone();
    let mut still_b = only_in_b.clone();
    let mut resolved = Vec::new();

    for entry in table.entries() {
        if !still_a.contains(&entry.source) {
            continue;
        }

        let hit = if still_b.contains(&entry.target) {
            Some((entry.target.clone(), false))
        } else {
            let wanted = entry.target.to_lowercase();
            still_b
                .iter()
                .find(|candidate| candidate.to_lowercase() == wanted)
                .map(|candidate| (candidate.clone(), true))
        };

        if let Some((target, case_insensitive)) = hit {
            still_a.remove(&entry.source);
            still_b.remove(&target);
            resolved.push(ResolvedPair {
                source: entry.source.clone(),
                target,
                case_insensitive,
            });
        }
    }

    AliasOutcome {
        resolved,
        still_only_in_a: still_a,
        still_only_in_b: still_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> TokenSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_exact_target() {
        let table: AliasTable = [("Trainer8", "TrainerEd")].into_iter().collect();
        let out = resolve_aliases(&set(&["Trainer8"]), &set(&["TrainerEd"]), &table);

        assert_eq!(out.resolved, vec![ResolvedPair::new("Trainer8", "TrainerEd")]);
        assert!(out.still_only_in_a.is_empty());
        assert!(out.still_only_in_b.is_empty());
    }

    #[test]
    fn resolves_without_any_substring_relation() {
        let table: AliasTable = [("PokedexXY", "Pokedex6Ed")].into_iter().collect();
        let out = resolve_aliases(&set(&["PokedexXY"]), &set(&["Pokedex6Ed"]), &table);
        assert_eq!(out.resolved, vec![ResolvedPair::new("PokedexXY", "Pokedex6Ed")]);
    }

    #[test]
    fn falls_back_to_case_insensitive_lookup() {
        let table: AliasTable = [("MysteryGiftDB", "MysteryGiftDatabase")].into_iter().collect();
        let out = resolve_aliases(
            &set(&["MysteryGiftDB"]),
            &set(&["MysterygiftDatabase"]),
            &table,
        );

        assert_eq!(out.resolved.len(), 1);
        assert_eq!(out.resolved[0].target, "MysterygiftDatabase");
        assert!(out.resolved[0].case_insensitive);
    }

    #[test]
    fn shared_target_is_first_come_first_served() {
        let table: AliasTable = [
            ("Trainer7", "TrainerEd"),
            ("Trainer8", "TrainerEd"),
            ("Trainer9", "TrainerEd"),
        ]
        .into_iter()
        .collect();
        let out = resolve_aliases(
            &set(&["Trainer7", "Trainer8", "Trainer9"]),
            &set(&["TrainerEd"]),
            &table,
        );

        assert_eq!(out.resolved, vec![ResolvedPair::new("Trainer7", "TrainerEd")]);
        assert_eq!(out.still_only_in_a, set(&["Trainer8", "Trainer9"]));
        assert!(out.still_only_in_b.is_empty());
    }

    #[test]
    fn declaration_order_decides_claims() {
        let table: AliasTable = [("Trainer9", "TrainerEd"), ("Trainer7", "TrainerEd")]
            .into_iter()
            .collect();
        let out = resolve_aliases(&set(&["Trainer7", "Trainer9"]), &set(&["TrainerEd"]), &table);
        assert_eq!(out.resolved[0].source, "Trainer9");
    }

    #[test]
    fn absent_source_or_target_is_a_noop() {
        let table: AliasTable = [("BoxViewer", "BoxViewer"), ("Raid8", "RaidEd")]
            .into_iter()
            .collect();
        let out = resolve_aliases(&set(&["Raid8"]), &set(&["Raid9Ed"]), &table);

        assert!(out.resolved.is_empty());
        assert_eq!(out.still_only_in_a, set(&["Raid8"]));
        assert_eq!(out.still_only_in_b, set(&["Raid9Ed"]));
    }

    #[test]
    fn tokens_without_entries_pass_through() {
        let out = resolve_aliases(&set(&["FolderList"]), &set(&["X"]), &AliasTable::new());
        assert_eq!(out.still_only_in_a, set(&["FolderList"]));
        assert_eq!(out.still_only_in_b, set(&["X"]));
    }

    #[test]
    fn rerunning_on_leftovers_resolves_nothing() {
        let table: AliasTable = [
            ("Trainer7", "TrainerEd"),
            ("Trainer8", "trainered"),
            ("Donut9a", "DonutEd"),
        ]
        .into_iter()
        .collect();
        let first = resolve_aliases(
            &set(&["Trainer7", "Trainer8", "Donut9a", "FolderList"]),
            &set(&["TrainerEd", "DonutEd", "Misc"]),
            &table,
        );
        let second = resolve_aliases(&first.still_only_in_a, &first.still_only_in_b, &table);

        assert!(second.resolved.is_empty());
        assert_eq!(second.still_only_in_a, first.still_only_in_a);
        assert_eq!(second.still_only_in_b, first.still_only_in_b);
    }

    #[test]
    fn redeclared_source_keeps_position_and_takes_new_target() {
        let mut table = AliasTable::new();
        table.insert("A", "X");
        table.insert("B", "Y");
        table.insert("A", "Z");

        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0], AliasEntry::new("A", "Z"));
        assert_eq!(table.get("A"), Some("Z"));
    }

    #[test]
    fn parses_cli_alias() {
        let entry: AliasEntry = "Wondercard = MysteryGiftEd".parse().unwrap();
        assert_eq!(entry, AliasEntry::new("Wondercard", "MysteryGiftEd"));

        assert!("Wondercard".parse::<AliasEntry>().is_err());
        assert!("=X".parse::<AliasEntry>().is_err());
    }

    #[test]
    fn table_round_trips_as_entry_list() {
        let json = r#"[{"source":"A","target":"X"},{"source":"A","target":"Y"}]"#;
        let table: AliasTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.entries(), &[AliasEntry::new("A", "Y")]);
    }
}
