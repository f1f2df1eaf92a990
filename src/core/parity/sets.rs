//! Exact set reconciliation between two token sets.

use super::TokenSet;

/// Outcome of the exact pass. All three sets are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExactSplit {
    pub matched: TokenSet,
    pub only_in_a: TokenSet,
    pub only_in_b: TokenSet,
}

/// Split `a` and `b` into their intersection and the two differences.
pub fn reconcile(a: &TokenSet, b: &TokenSet) -> ExactSplit {
    ExactSplit {
        matched: a.intersection(b).cloned().collect(),
        only_in_a: a.difference(b).cloned().collect(),
        only_in_b: b.difference(a).cloned().collect(),
    }
}
