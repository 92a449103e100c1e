#![allow(dead_code)]

use razor::{Handler, Validator, Value, json};
use std::sync::{Arc, Mutex};

// ============================================================================
// Logging
// ============================================================================

/// Route `tracing` output to the test harness. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn is_instrument() -> Validator {
    Validator::any().has(["instrument_name"])
}

pub fn is_guitar() -> Validator {
    is_instrument().has(["n_strings"])
}

pub fn is_electric_guitar() -> Validator {
    is_guitar().has(["ampli"])
}

pub fn guitar() -> Value {
    json!({"instrument_name": "guitar", "n_strings": 6})
}

pub fn electric_guitar() -> Value {
    json!({"instrument_name": "electric guitar", "n_strings": 6, "ampli": "marshall"})
}

pub fn instrument_name(value: &Value) -> &str {
    value["instrument_name"].as_str().unwrap_or_default()
}

pub fn number(value: &Value) -> i64 {
    value.as_i64().unwrap_or_default()
}

// ============================================================================
// Journal
// ============================================================================

/// A shared log that handlers append marks to.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<String>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler appending `mark` on every call.
    pub fn writer(&self, mark: &'static str) -> Handler {
        let journal = self.0.clone();
        Handler::from_fn(move |_, _| {
            journal.lock().unwrap().push_str(mark);
            Value::Null
        })
    }

    /// A handler appending `mark` followed by its first argument.
    pub fn echo(&self, mark: &'static str) -> Handler {
        let journal = self.0.clone();
        Handler::from_fn(move |_, args| {
            let arg = args.first().map(Value::to_string).unwrap_or_default();
            journal.lock().unwrap().push_str(&format!("{mark}{arg}"));
            Value::Null
        })
    }

    pub fn read(&self) -> String {
        self.0.lock().unwrap().clone()
    }
}
