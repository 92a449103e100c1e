//! Test helpers: handlers that record how they were called.

use parking_lot::Mutex;
use razor_core::{Call, Handler};
use serde_json::Value;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// A handler that records every call and returns a fixed value.
///
/// [`RecordingHandler::handler`] always returns the same handler, so it can
/// be registered and later removed by identity.
#[derive(Debug, Clone)]
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<Call>>>,
    handler: Handler,
}

impl RecordingHandler {
    /// Record calls and return `null`.
    pub fn new() -> Self {
        Self::returning(Value::Null)
    }

    /// Record calls and return `value`.
    pub fn returning(value: impl Into<Value>) -> Self {
        let value = value.into();
        let calls: Arc<Mutex<Vec<Call>>> = Arc::default();
        let recorded = calls.clone();
        let handler = Handler::from_fn(move |context, args| {
            recorded
                .lock()
                .push(Call::with_context(context.clone(), args.to_vec()));
            value.clone()
        });
        Self { calls, handler }
    }

    /// The handler to register.
    pub fn handler(&self) -> Handler {
        self.handler.clone()
    }

    /// Snapshot of the recorded calls, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// The recorded argument lists, oldest first.
    pub fn args(&self) -> Vec<Vec<Value>> {
        self.calls.lock().iter().map(|call| call.args.clone()).collect()
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Forget the recorded calls.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl Default for RecordingHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// A handler that only counts its invocations.
#[derive(Debug, Clone)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
    handler: Handler,
}

impl CountingHandler {
    /// Count calls and return the running total.
    pub fn new() -> Self {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let handler = Handler::from_fn(move |_, _| counter.fetch_add(1, Ordering::SeqCst) + 1);
        Self { count, handler }
    }

    /// The handler to register.
    pub fn handler(&self) -> Handler {
        self.handler.clone()
    }

    /// Number of calls so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Default for CountingHandler {
    fn default() -> Self {
        Self::new()
    }
}
