//! Adapters: a handler plus the validators and lifecycle that guard it.

use crate::{
    handler::Handler,
    validator::{ScoreVector, Validators},
};
use serde_json::Value;
use std::sync::Arc;

/// Tag attached to adapters registered through a namespaced handle.
pub type Namespace = Arc<str>;

/// A registered handler with its per-argument validators.
///
/// `remaining_calls` is `None` for unlimited adapters. Once set it only
/// decreases; the owning registry drops the adapter when it reaches zero.
#[derive(Debug, Clone)]
pub struct Adapter {
    handler: Handler,
    validators: Validators,
    remaining_calls: Option<u32>,
    namespace: Option<Namespace>,
    consumes: bool,
}

impl Adapter {
    /// Create an unlimited, non-consuming adapter without namespace.
    pub fn new(validators: impl Into<Validators>, handler: impl Into<Handler>) -> Self {
        Self {
            handler: handler.into(),
            validators: validators.into(),
            remaining_calls: None,
            namespace: None,
            consumes: false,
        }
    }

    /// Limit the number of invocations.
    pub fn with_times(mut self, times: Option<u32>) -> Self {
        self.remaining_calls = times;
        self
    }

    /// Mark the adapter as consuming the sticky events it handles.
    pub fn with_consumes(mut self, consumes: bool) -> Self {
        self.consumes = consumes;
        self
    }

    /// Tag the adapter with a namespace.
    pub fn with_namespace(mut self, namespace: Option<Namespace>) -> Self {
        self.namespace = namespace;
        self
    }

    /// The handler run when this adapter is selected.
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// The per-argument validators.
    pub fn validators(&self) -> &Validators {
        &self.validators
    }

    /// Invocations left, `None` when unlimited.
    pub fn remaining_calls(&self) -> Option<u32> {
        self.remaining_calls
    }

    /// The namespace tag, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Whether sticky events handled by this adapter are consumed.
    pub fn consumes(&self) -> bool {
        self.consumes
    }

    /// Score the call arguments against this adapter's validators.
    pub fn score(&self, args: &[Value]) -> Option<ScoreVector> {
        self.validators.score(args)
    }

    /// Spend one invocation. Unlimited adapters are unaffected.
    pub fn countdown(&mut self) {
        if let Some(remaining) = self.remaining_calls.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
    }

    /// Returns `true` once a limited adapter has no invocations left.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_calls == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn countdown_exhausts_limited_adapters() {
        let mut adapter = Adapter::new(["x"], json!(1)).with_times(Some(2));
        adapter.countdown();
        assert!(!adapter.is_exhausted());
        adapter.countdown();
        assert!(adapter.is_exhausted());
        adapter.countdown();
        assert_eq!(adapter.remaining_calls(), Some(0));
    }

    #[test]
    fn unlimited_adapters_never_exhaust() {
        let mut adapter = Adapter::new((), json!(1));
        adapter.countdown();
        assert_eq!(adapter.remaining_calls(), None);
        assert!(!adapter.is_exhausted());
    }
}
