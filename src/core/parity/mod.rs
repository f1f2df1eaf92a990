//! Editor parity reconciliation between two naming conventions.
//!
//! Runs four passes in strict order, each token ending in exactly one
//! category:
//!
//! 1. Normalize file names into two token sets (`naming`)
//! 2. Exact intersection and differences (`sets`)
//! 3. Curated alias resolution (`aliases`)
//! 4. Substring fallback as a discovery aid (`fuzzy`)
//!
//! `report` renders the result for humans.

pub mod aliases;
pub mod fuzzy;
pub mod naming;
pub mod report;
pub mod sets;

use std::collections::BTreeSet;

use serde::Serialize;

pub use aliases::{resolve_aliases, AliasEntry, AliasOutcome, AliasTable};
pub use fuzzy::{fuzzy_resolve, is_related, FuzzyOutcome};
pub use naming::{collect_tokens, normalize, AffixRule, ExactRule, NamingConvention, StripRule};
pub use sets::{reconcile, ExactSplit};

use crate::defaults::ParityConfig;

/// Unique tokens from one convention, iterated lexicographically.
pub type TokenSet = BTreeSet<String>;

/// A left token resolved against a right token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPair {
    pub source: String,
    pub target: String,
    /// Set when the alias target was only found ignoring case.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub case_insensitive: bool,
}

impl ResolvedPair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            case_insensitive: false,
        }
    }
}

/// Terminal category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Matched,
    AliasResolved,
    FuzzyResolved,
    Unresolved,
}

/// Counts for the reconciliation report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationSummary {
    pub left_count: usize,
    pub right_count: usize,
    pub matched: usize,
    pub missing: usize,
    pub extra: usize,
    pub alias_resolved: usize,
    pub fuzzy_resolved: usize,
    pub unresolved_missing: usize,
    pub unresolved_extra: usize,
}

/// Exact differences before any resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Difference {
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

/// Tokens left over after every pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Unresolved {
    /// Only in the left inventory.
    pub missing: Vec<String>,
    /// Only in the right inventory.
    pub extra: Vec<String>,
}

impl Unresolved {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Complete result of reconciling two inventories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    pub summary: ReconciliationSummary,
    pub matched: Vec<String>,
    pub difference: Difference,
    pub alias_resolved: Vec<ResolvedPair>,
    pub fuzzy_resolved: Vec<ResolvedPair>,
    pub unresolved: Unresolved,
}

impl ReconciliationResult {
    /// Category of `token`, or `None` when it was in neither inventory.
    pub fn category_of(&self, token: &str) -> Option<Category> {
        let in_pairs = |pairs: &[ResolvedPair]| {
            pairs.iter().any(|p| p.source == token || p.target == token)
        };

        if self.matched.iter().any(|t| t == token) {
            Some(Category::Matched)
        } else if in_pairs(&self.alias_resolved) {
            Some(Category::AliasResolved)
        } else if in_pairs(&self.fuzzy_resolved) {
            Some(Category::FuzzyResolved)
        } else if self.unresolved.missing.iter().any(|t| t == token)
            || self.unresolved.extra.iter().any(|t| t == token)
        {
            Some(Category::Unresolved)
        } else {
            None
        }
    }

    /// Fuzzy pairs as alias entries, ready to be curated into a config file.
    pub fn suggested_aliases(&self) -> Vec<AliasEntry> {
        self.fuzzy_resolved
            .iter()
            .map(|p| AliasEntry::new(&p.source, &p.target))
            .collect()
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Run every pass over two already-normalized token sets.
pub fn reconcile_tokens(
    left: &TokenSet,
    right: &TokenSet,
    aliases: &AliasTable,
    fuzzy: bool,
) -> ReconciliationResult {
    let split = sets::reconcile(left, right);
    let alias = aliases::resolve_aliases(&split.only_in_a, &split.only_in_b, aliases);

    let (fuzzy_resolved, unresolved_missing) = if fuzzy {
        let out = fuzzy::fuzzy_resolve(&alias.still_only_in_a, &alias.still_only_in_b);
        (out.resolved, out.unresolved_a)
    } else {
        (Vec::new(), alias.still_only_in_a.clone())
    };

    let fuzzy_targets: TokenSet = fuzzy_resolved.iter().map(|p| p.target.clone()).collect();
    let unresolved_extra: Vec<String> = alias
        .still_only_in_b
        .difference(&fuzzy_targets)
        .cloned()
        .collect();

    let summary = ReconciliationSummary {
        left_count: left.len(),
        right_count: right.len(),
        matched: split.matched.len(),
        missing: split.only_in_a.len(),
        extra: split.only_in_b.len(),
        alias_resolved: alias.resolved.len(),
        fuzzy_resolved: fuzzy_resolved.len(),
        unresolved_missing: unresolved_missing.len(),
        unresolved_extra: unresolved_extra.len(),
    };

    ReconciliationResult {
        summary,
        matched: split.matched.into_iter().collect(),
        difference: Difference {
            missing: split.only_in_a.into_iter().collect(),
            extra: split.only_in_b.into_iter().collect(),
        },
        alias_resolved: alias.resolved,
        fuzzy_resolved,
        unresolved: Unresolved {
            missing: unresolved_missing.into_iter().collect(),
            extra: unresolved_extra,
        },
    }
}

/// Normalize two raw file name inventories and reconcile them.
pub fn reconcile_inventories<L, R>(left: L, right: R, config: &ParityConfig) -> ReconciliationResult
where
    L: IntoIterator,
    L::Item: AsRef<str>,
    R: IntoIterator,
    R::Item: AsRef<str>,
{
    let left_tokens = naming::collect_tokens(left, &config.left.convention);
    let right_tokens = naming::collect_tokens(right, &config.right.convention);

    log_status!(
        "parity",
        "{} {} tokens, {} {} tokens",
        left_tokens.len(),
        config.left.convention.label,
        right_tokens.len(),
        config.right.convention.label
    );

    let result = reconcile_tokens(&left_tokens, &right_tokens, &config.aliases, config.fuzzy);

    log_status!(
        "parity",
        "Complete: {} matched, {} via alias, {} via fuzzy, {} unresolved",
        result.summary.matched,
        result.summary.alias_resolved,
        result.summary.fuzzy_resolved,
        result.summary.unresolved_missing + result.summary.unresolved_extra
    );

    result
}

// ============================================================================
// Tests
// ============================================================================
