//! Fallback substring matching between leftover tokens.
//!
//! This is a discovery aid for whoever maintains the alias table, not a
//! correctness mechanism. It over-matches tokens that merely share a
//! substring and misses renames with no shared substring (`Raid8` vs
//! `RaidEd`). There is no scoring: for each left token, the first right
//! token in lexicographic order with a containment relation wins.

use super::{ResolvedPair, TokenSet};

/// Outcome of the fuzzy pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuzzyOutcome {
    pub resolved: Vec<ResolvedPair>,
    pub unresolved_a: TokenSet,
}

/// Case-insensitive containment in either direction.
pub fn is_related(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Pair each left token with the first related right token.
///
/// Right tokens are not consumed, so several left tokens may pair with the
/// same right token.
pub fn fuzzy_resolve(still_only_in_a: &TokenSet, still_only_in_b: &TokenSet) -> FuzzyOutcome {
    let mut outcome = FuzzyOutcome::default();

    for missing in still_only_in_a {
        match still_only_in_b
            .iter()
            .find(|extra| is_related(missing, extra))
        {
            Some(extra) => outcome.resolved.push(ResolvedPair::new(missing, extra)),
            None => {
                outcome.unresolved_a.insert(missing.clone());
            }
        }
    }

    outcome
}
