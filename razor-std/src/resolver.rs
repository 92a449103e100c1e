//! Scoring, ranking and tie-breaking.
//!
//! Every adapter is scored against the call arguments. Matches are ranked by
//! descending [`ScoreVector`]; equal vectors keep registration order, which is
//! the order `all` reports them in. Selecting a single adapter refuses to
//! guess when the two best candidates share a score.

use razor_core::{Adapter, DispatchError, ScoreVector};
use serde_json::Value;

/// A matching adapter: its position in the registry and its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Position of the adapter in the registry slice that was resolved.
    pub position: usize,
    /// Score of the adapter against the call.
    pub score: ScoreVector,
}

/// Score every adapter, keeping only the matching ones, in registry order.
pub fn decorate_and_filter(args: &[Value], adapters: &[Adapter]) -> Vec<Candidate> {
    adapters
        .iter()
        .enumerate()
        .filter_map(|(position, adapter)| {
            adapter
                .score(args)
                .map(|score| Candidate { position, score })
        })
        .collect()
}

/// Sort candidates from most to least specific, stable on ties.
pub fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Every matching adapter, ranked. An empty result is not an error.
pub fn resolve_all(args: &[Value], adapters: &[Adapter]) -> Vec<Candidate> {
    let mut candidates = decorate_and_filter(args, adapters);
    rank(&mut candidates);
    candidates
}

/// The single most specific adapter.
///
/// # Errors
///
/// - [`DispatchError::NotFound`] if nothing matches
/// - [`DispatchError::AmbiguousMatch`] if the two best share a score
pub fn resolve_one(args: &[Value], adapters: &[Adapter]) -> Result<Candidate, DispatchError> {
    let mut candidates = resolve_all(args, adapters).into_iter();
    let best = candidates.next().ok_or(DispatchError::NotFound)?;
    let tied = candidates
        .take_while(|candidate| candidate.score == best.score)
        .count();
    if tied > 0 {
        return Err(DispatchError::AmbiguousMatch {
            score: best.score,
            candidates: tied + 1,
        });
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use razor_core::{Handler, Validator};
    use serde_json::json;

    fn scoring(score: u32) -> Validator {
        Validator::scored(format!("score{score}"), move |_| Some(score))
    }

    fn adapter(validators: Vec<Validator>, id: u32) -> Adapter {
        Adapter::new(validators, Handler::constant(id))
    }

    fn positions(candidates: &[Candidate]) -> Vec<usize> {
        candidates.iter().map(|c| c.position).collect()
    }

    #[test]
    fn ranks_by_descending_score() {
        let adapters = vec![
            adapter(vec![scoring(2)], 0),
            adapter(vec![scoring(3)], 1),
            adapter(vec![scoring(1)], 2),
        ];
        let ranked = resolve_all(&[json!("x")], &adapters);
        assert_eq!(positions(&ranked), [1, 0, 2]);
    }

    #[test]
    fn ties_keep_registration_order() {
        let adapters = vec![
            adapter(vec![scoring(1)], 0),
            adapter(vec![scoring(2)], 1),
            adapter(vec![scoring(1)], 2),
            adapter(vec![scoring(2)], 3),
        ];
        let ranked = resolve_all(&[json!("x")], &adapters);
        assert_eq!(positions(&ranked), [1, 3, 0, 2]);
    }

    #[test]
    fn compares_positions_lexicographically() {
        let adapters = vec![
            adapter(vec![scoring(1), scoring(9)], 0),
            adapter(vec![scoring(2), scoring(1)], 1),
            adapter(vec![scoring(2)], 2),
        ];
        let ranked = resolve_all(&[json!("a"), json!("b")], &adapters);
        assert_eq!(positions(&ranked), [1, 2, 0]);
    }

    #[test]
    fn filters_non_matching_adapters() {
        let adapters = vec![
            adapter(vec![Validator::from("a")], 0),
            adapter(vec![Validator::from("b")], 1),
            adapter(vec![Validator::from("a"), Validator::any()], 2),
        ];
        let ranked = resolve_all(&[json!("a")], &adapters);
        assert_eq!(positions(&ranked), [0]);
    }

    #[test]
    fn resolve_one_picks_the_most_specific() {
        let adapters = vec![adapter(vec![scoring(2)], 0), adapter(vec![scoring(3)], 1)];
        let best = resolve_one(&[json!("x")], &adapters).unwrap();
        assert_eq!(best.position, 1);
    }

    #[test]
    fn resolve_one_reports_ambiguity() {
        let adapters = vec![
            adapter(vec![scoring(1)], 0),
            adapter(vec![scoring(1)], 1),
            adapter(vec![scoring(1)], 2),
        ];
        let err = resolve_one(&[json!("x")], &adapters).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::AmbiguousMatch { candidates: 3, .. }
        ));
    }

    #[test]
    fn resolve_one_reports_not_found() {
        let err = resolve_one(&[json!("x")], &[]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn ties_below_the_top_are_fine() {
        let adapters = vec![
            adapter(vec![scoring(1)], 0),
            adapter(vec![scoring(1)], 1),
            adapter(vec![scoring(5)], 2),
        ];
        assert_eq!(resolve_one(&[json!("x")], &adapters).unwrap().position, 2);
    }
}
