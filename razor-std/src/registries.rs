//! Named registries of named dispatch functions.
//!
//! [`Registries`] is an explicit registry-of-registries: create one, pass it
//! to whatever needs to share dispatch functions by name, and look functions
//! up with `registries.registry("plugins").function("render")`. Functions are
//! created on first use. Every function shares the scheduler of the
//! `Registries` it came from, so one flush drives all of them.

use crate::{razor::Razor, scheduler::Scheduler};
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

/// Name of the registry returned by [`Registries::default_registry`].
pub const DEFAULT_REGISTRY: &str = "default";

type Functions = Arc<Mutex<HashMap<String, Razor>>>;

/// A set of named registries sharing one scheduler.
#[derive(Debug, Clone, Default)]
pub struct Registries {
    scheduler: Scheduler,
    registries: Arc<Mutex<HashMap<String, Functions>>>,
}

impl Registries {
    /// Create an empty set with its own scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set whose functions queue work on `scheduler`.
    pub fn with_scheduler(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            registries: Arc::default(),
        }
    }

    /// The registry called `name`, created on first use.
    pub fn registry(&self, name: &str) -> NamedRegistry {
        let functions = self
            .registries
            .lock()
            .entry(name.to_owned())
            .or_insert_with(|| {
                debug!(registry = name, "registry created");
                Functions::default()
            })
            .clone();
        NamedRegistry {
            name: name.into(),
            scheduler: self.scheduler.clone(),
            functions,
        }
    }

    /// The registry called [`DEFAULT_REGISTRY`].
    pub fn default_registry(&self) -> NamedRegistry {
        self.registry(DEFAULT_REGISTRY)
    }

    /// Names of the registries created so far, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registries.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// The scheduler shared by every function.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Run the deferred work of every function.
    pub fn flush(&self) -> usize {
        self.scheduler.run_pending()
    }
}

/// One named registry: a namespace of named dispatch functions.
#[derive(Debug, Clone)]
pub struct NamedRegistry {
    name: Arc<str>,
    scheduler: Scheduler,
    functions: Functions,
}

impl NamedRegistry {
    /// The registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The function called `name`, created on first use.
    ///
    /// Repeated lookups return handles to the same function.
    pub fn function(&self, name: &str) -> Razor {
        self.functions
            .lock()
            .entry(name.to_owned())
            .or_insert_with(|| {
                debug!(registry = %self.name, function = name, "function created");
                Razor::builder().scheduler(self.scheduler.clone()).build()
            })
            .clone()
    }

    /// Names of the functions created so far, sorted.
    pub fn functions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.lock().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn functions_are_shared_by_name() {
        let registries = Registries::new();
        registries
            .registry("shapes")
            .function("area")
            .on(["square"], json!("side * side"));

        let area = registries.registry("shapes").function("area");
        assert_eq!(area.adapt(&[json!("square")]).unwrap(), json!("side * side"));
        assert_eq!(registries.registry("other").function("area").size(), 0);
    }

    #[test]
    fn default_registry_name() {
        let registries = Registries::new();
        registries.default_registry().function("f");
        assert_eq!(registries.names(), [DEFAULT_REGISTRY]);
        assert_eq!(registries.default_registry().functions(), ["f"]);
    }

    #[test]
    fn one_flush_drives_every_function() {
        let registries = Registries::new();
        let first = registries.registry("a").function("f");
        let second = registries.registry("b").function("g");
        first.on((), json!(1));
        second.on((), json!(2));
        first.trigger(&[]);
        second.trigger(&[]);

        assert_eq!(registries.scheduler().pending(), 2);
        assert_eq!(registries.flush(), 2);
    }
}
