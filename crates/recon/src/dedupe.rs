use std::collections::HashSet;

use crate::model::{Evidence, PairResult};

/// Drop evidence structurally equal to an earlier entry. First occurrences
/// keep their relative order.
pub fn dedupe(matches: Vec<Evidence>) -> Vec<Evidence> {
    let mut seen: HashSet<Evidence> = HashSet::with_capacity(matches.len());
    let mut unique = Vec::with_capacity(matches.len());

    for evidence in matches {
        if !seen.contains(&evidence) {
            seen.insert(evidence.clone());
            unique.push(evidence);
        }
    }

    unique
}

/// [`dedupe`] applied to one pair's result.
pub fn dedupe_result(result: PairResult) -> PairResult {
    PairResult {
        matches: dedupe(result.matches),
        ..result
    }
}
