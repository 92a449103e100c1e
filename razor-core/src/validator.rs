//! # Validators
//!
//! A [`Validator`] inspects a single argument and answers with a positive
//! specificity score, or `None` when the argument is not accepted.
//!
//! Validators compose by chaining: every link must accept the value and the
//! scores are summed, so a longer chain is a more specific validator.
//!
//! ```rust,ignore
//! let guitar = Validator::any().has(["instrument_name", "strings"]);
//! let electric = guitar.clone().has(["amplifier"]);
//!
//! assert!(electric.score(&electric_guitar) > guitar.score(&electric_guitar));
//! ```
//!
//! [`Validators`] is the ordered per-argument list attached to an adapter. It
//! combines its members into one function from the call arguments to a
//! [`ScoreVector`].

use serde_json::Value;
use std::{fmt, sync::Arc};

/// Specificity weight returned by a validator.
pub type Score = u32;

type ScoreFn = dyn Fn(&Value) -> Option<Score> + Send + Sync;

/// A predicate over one argument that reports how specifically it matches.
///
/// A score of `0` is treated the same as `None` (no match).
#[derive(Clone)]
pub struct Validator {
    name: Arc<str>,
    score_fn: Arc<ScoreFn>,
}

impl Validator {
    /// Create a validator from a boolean predicate. Accepted values score 1.
    pub fn new<F>(name: impl Into<Arc<str>>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::scored(name, move |value| predicate(value).then_some(1))
    }

    /// Create a validator from a function that computes the score itself.
    pub fn scored<F>(name: impl Into<Arc<str>>, score_fn: F) -> Self
    where
        F: Fn(&Value) -> Option<Score> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            score_fn: Arc::new(score_fn),
        }
    }

    /// A validator accepting every value with score 1.
    pub fn any() -> Self {
        Self::scored("anything", |_| Some(1))
    }

    /// Chain another validator: both must accept, scores are summed.
    pub fn chain(self, next: Validator) -> Self {
        let name = format!("{}.{}", self.name, next.name);
        Self::scored(name, move |value| {
            let head = self.score(value)?;
            let tail = next.score(value)?;
            Some(head.saturating_add(tail))
        })
    }

    /// Chain a named boolean predicate.
    pub fn check<F>(self, name: &str, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.chain(Validator::new(name, predicate))
    }

    /// Chain an equality check against `pattern`.
    ///
    /// Object patterns match partially: every key of the pattern must be
    /// present in the value and match recursively. Anything else compares
    /// with `==`.
    pub fn matching(self, pattern: impl Into<Value>) -> Self {
        let pattern = pattern.into();
        let name = format!("match({pattern})");
        self.chain(Validator::new(name, move |value| {
            matches_pattern(&pattern, value)
        }))
    }

    /// Chain a check that the value is an object holding every key.
    pub fn has<I, S>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let name = format!("has({})", keys.join(","));
        self.chain(Validator::new(name, move |value| {
            value
                .as_object()
                .is_some_and(|object| keys.iter().all(|key| object.contains_key(key)))
        }))
    }

    /// The display name of this validator.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Score `value`, returning `None` when it is not accepted.
    pub fn score(&self, value: &Value) -> Option<Score> {
        (self.score_fn)(value).filter(|score| *score > 0)
    }

    /// Returns `true` if `value` is accepted.
    pub fn validates(&self, value: &Value) -> bool {
        self.score(value).is_some()
    }
}

fn matches_pattern(pattern: &Value, value: &Value) -> bool {
    match (pattern, value) {
        (Value::Object(expected), Value::Object(actual)) => {
            expected.iter().all(|(key, expected)| {
                actual
                    .get(key)
                    .is_some_and(|actual| matches_pattern(expected, actual))
            })
        }
        (Value::Object(_), _) => false,
        _ => pattern == value,
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.name).finish()
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A missing validator accepts anything.
impl From<Option<Validator>> for Validator {
    fn from(validator: Option<Validator>) -> Self {
        validator.unwrap_or_else(Validator::any)
    }
}

// Plain values become `Validator::any().matching(value)` and score 2.
macro_rules! impl_matching_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Validator {
                fn from(pattern: $ty) -> Self {
                    Validator::any().matching(pattern)
                }
            }
        )*
    };
}

impl_matching_from!(Value, &str, String, bool, i32, i64, u32, u64, f64);

// ============================================================================
// ScoreVector
// ============================================================================

/// Per-argument scores of one adapter against one call.
///
/// Ordering is lexicographic; the greater vector is the more specific match.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScoreVector(Vec<Score>);

impl ScoreVector {
    /// Wrap a list of scores.
    pub fn new(scores: Vec<Score>) -> Self {
        Self(scores)
    }

    /// The scores, one per validated argument.
    pub fn as_slice(&self) -> &[Score] {
        &self.0
    }

    /// Number of validated arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no argument was validated (a catch-all adapter).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Score>> for ScoreVector {
    fn from(scores: Vec<Score>) -> Self {
        Self(scores)
    }
}

impl fmt::Display for ScoreVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

// ============================================================================
// Validators (the per-argument combinator)
// ============================================================================

/// Ordered per-argument validators of one adapter.
///
/// Position `i` validates argument `i`. Arguments beyond the list are not
/// inspected; a list longer than the arguments never matches.
#[derive(Clone, Default)]
pub struct Validators(Vec<Validator>);

impl Validators {
    /// An empty list, matching any call.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a validator for the next argument position.
    pub fn push(&mut self, validator: impl Into<Validator>) {
        self.0.push(validator.into());
    }

    /// Number of validated positions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no position is validated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the validators in position order.
    pub fn iter(&self) -> impl Iterator<Item = &Validator> {
        self.0.iter()
    }

    /// Score the call arguments, position by position.
    pub fn score(&self, args: &[Value]) -> Option<ScoreVector> {
        if self.0.len() > args.len() {
            return None;
        }
        self.0
            .iter()
            .zip(args)
            .map(|(validator, arg)| validator.score(arg))
            .collect::<Option<Vec<_>>>()
            .map(ScoreVector)
    }

    /// Returns `true` if the arguments are accepted.
    pub fn validates(&self, args: &[Value]) -> bool {
        self.score(args).is_some()
    }
}

impl fmt::Debug for Validators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(Validator::name))
            .finish()
    }
}

impl<V: Into<Validator>> FromIterator<V> for Validators {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<()> for Validators {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl From<Validator> for Validators {
    fn from(validator: Validator) -> Self {
        Self(vec![validator])
    }
}

impl<V: Into<Validator>, const N: usize> From<[V; N]> for Validators {
    fn from(validators: [V; N]) -> Self {
        validators.into_iter().collect()
    }
}

impl<V: Into<Validator>> From<Vec<V>> for Validators {
    fn from(validators: Vec<V>) -> Self {
        validators.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn is_instrument() -> Validator {
        Validator::any().has(["instrument_name"])
    }

    #[test]
    fn chained_validators_sum_their_scores() {
        let guitar = is_instrument().has(["strings"]);
        let electric = guitar.clone().has(["amplifier"]);
        let value = json!({"instrument_name": "strat", "strings": 6, "amplifier": "marshall"});

        assert_eq!(is_instrument().score(&value), Some(2));
        assert_eq!(guitar.score(&value), Some(3));
        assert_eq!(electric.score(&value), Some(4));
        assert_eq!(electric.score(&json!({"instrument_name": "drum"})), None);
    }

    #[test]
    fn zero_score_is_no_match() {
        let validator = Validator::scored("zero", |_| Some(0));
        assert!(!validator.validates(&json!(1)));
    }

    #[test]
    fn plain_values_match_by_equality() {
        let validator = Validator::from("match");
        assert_eq!(validator.score(&json!("match")), Some(2));
        assert_eq!(validator.score(&json!("other")), None);
        assert_eq!(validator.name(), "anything.match(\"match\")");
    }

    #[test]
    fn object_patterns_match_partially() {
        let validator = Validator::from(json!({"kind": "note", "meta": {"lang": "en"}}));
        assert!(validator.validates(&json!({"kind": "note", "id": 3, "meta": {"lang": "en", "v": 1}})));
        assert!(!validator.validates(&json!({"kind": "note", "meta": {"lang": "fr"}})));
        assert!(!validator.validates(&json!("note")));
    }

    #[test]
    fn missing_validator_matches_anything() {
        let validator = Validator::from(None);
        assert_eq!(validator.score(&json!(null)), Some(1));
    }

    #[test]
    fn shorter_lists_ignore_trailing_arguments() {
        let validators = Validators::from(["a"]);
        assert_eq!(
            validators.score(&[json!("a"), json!("extra")]),
            Some(ScoreVector::new(vec![2]))
        );
    }

    #[test]
    fn longer_lists_never_match() {
        let validators = Validators::from(["a", "b"]);
        assert_eq!(validators.score(&[json!("a")]), None);
    }

    #[test]
    fn empty_list_matches_with_empty_vector() {
        let validators = Validators::from(());
        let score = validators.score(&[json!(1)]).unwrap();
        assert!(score.is_empty());
    }

    #[test]
    fn score_vectors_order_lexicographically() {
        let low = ScoreVector::new(vec![2, 9]);
        let high = ScoreVector::new(vec![3, 1]);
        assert!(high > low);
        assert!(ScoreVector::new(vec![2, 1]) > ScoreVector::new(vec![2]));
        assert_eq!(high.to_string(), "[3, 1]");
    }
}
