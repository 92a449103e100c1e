//! Ordered collection of registered adapters.

use razor_core::{Adapter, Handler};

/// The adapters of one registry, in registration order.
///
/// Positions handed out by the resolver are only valid until the next
/// mutation, so every dispatch pass resolves, counts down and prunes while
/// holding the registry lock.
#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
    adapters: Vec<Adapter>,
}

impl AdapterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from existing adapters, keeping their order.
    pub fn from_adapters(adapters: Vec<Adapter>) -> Self {
        Self { adapters }
    }

    /// Append an adapter.
    pub fn push(&mut self, adapter: Adapter) {
        self.adapters.push(adapter);
    }

    /// The adapters in registration order.
    pub fn as_slice(&self) -> &[Adapter] {
        &self.adapters
    }

    /// Number of adapters.
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns `true` if there are no adapters.
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Remove every adapter.
    pub fn clear(&mut self) {
        self.adapters.clear();
    }

    /// Spend one invocation on each adapter at `positions`, then drop the
    /// exhausted ones. Returns how many were dropped.
    pub fn countdown(&mut self, positions: impl IntoIterator<Item = usize>) -> usize {
        for position in positions {
            if let Some(adapter) = self.adapters.get_mut(position) {
                adapter.countdown();
            }
        }
        let before = self.adapters.len();
        self.adapters.retain(|adapter| !adapter.is_exhausted());
        before - self.adapters.len()
    }

    /// Remove adapters by handler identity and/or namespace.
    ///
    /// - neither given: clear everything
    /// - handler only: every adapter with that handler
    /// - namespace only: every adapter in that namespace
    /// - both: adapters with that handler inside that namespace
    ///
    /// Returns how many adapters were removed.
    pub fn remove(&mut self, handler: Option<&Handler>, namespace: Option<&str>) -> usize {
        let before = self.adapters.len();
        match (handler, namespace) {
            (None, None) => self.adapters.clear(),
            (Some(handler), None) => self
                .adapters
                .retain(|adapter| !adapter.handler().same_as(handler)),
            (None, Some(namespace)) => self
                .adapters
                .retain(|adapter| adapter.namespace() != Some(namespace)),
            (Some(handler), Some(namespace)) => self.adapters.retain(|adapter| {
                !adapter.handler().same_as(handler) || adapter.namespace() != Some(namespace)
            }),
        }
        before - self.adapters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use razor_core::Namespace;
    use serde_json::json;

    fn adapter(handler: &Handler, namespace: Option<&str>) -> Adapter {
        Adapter::new((), handler.clone()).with_namespace(namespace.map(Namespace::from))
    }

    #[test]
    fn countdown_drops_exhausted_adapters() {
        let handler = Handler::constant(1);
        let mut registry = AdapterRegistry::from_adapters(vec![
            adapter(&handler, None).with_times(Some(1)),
            adapter(&handler, None),
            adapter(&handler, None).with_times(Some(2)),
        ]);

        assert_eq!(registry.countdown([0, 1, 2]), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.as_slice()[1].remaining_calls(), Some(1));
    }

    #[test]
    fn remove_by_handler_and_namespace() {
        let first = Handler::from_fn(|_, _| json!(1));
        let second = Handler::from_fn(|_, _| json!(2));
        let mut registry = AdapterRegistry::from_adapters(vec![
            adapter(&first, None),
            adapter(&first, Some("ns")),
            adapter(&second, Some("ns")),
            adapter(&second, None),
        ]);

        assert_eq!(registry.remove(Some(&first), Some("ns")), 1);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.remove(None, Some("ns")), 1);
        assert_eq!(registry.remove(Some(&first), None), 1);
        assert_eq!(registry.len(), 1);
        assert!(registry.as_slice()[0].handler().same_as(&second));
        assert_eq!(registry.remove(None, None), 1);
        assert!(registry.is_empty());
    }
}
