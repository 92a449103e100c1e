//! Ordered buffering of calls dispatched in bulk.
//!
//! A [`Batch`] collects calls, keeps them sorted with the owning registry's
//! comparator (arrival order without one), and dispatches the whole buffer
//! at once. Every dispatch drains the buffer first, so a call is dispatched
//! by exactly one drain.

use crate::{ordering::binary_insert, razor::Razor};
use futures::{channel::oneshot, future::BoxFuture};
use parking_lot::Mutex;
use razor_core::{Call, DispatchError, RazorError};
use serde_json::Value;
use std::{fmt, mem, sync::Arc};
use tracing::{debug, warn};

/// An ordered buffer of pending calls bound to one registry.
#[derive(Clone)]
pub struct Batch {
    razor: Razor,
    queue: Arc<Mutex<Vec<Call>>>,
}

impl Batch {
    pub(crate) fn new(razor: Razor) -> Self {
        Self {
            razor,
            queue: Arc::default(),
        }
    }

    /// Buffer a call with a null context.
    pub fn queue(&self, args: Vec<Value>) -> &Self {
        self.queue_with(Value::Null, args)
    }

    /// Buffer a call, keeping the buffer sorted.
    pub fn queue_with(&self, context: Value, args: Vec<Value>) -> &Self {
        let call = Call::with_context(context, args);
        let mut queue = self.queue.lock();
        match self.razor.comparator() {
            Some(compare) => binary_insert(&mut *queue, call, Some(&**compare)),
            None => binary_insert(&mut *queue, call, None),
        };
        self
    }

    /// Snapshot of the buffered calls in dispatch order.
    pub fn pending(&self) -> Vec<Call> {
        self.queue.lock().clone()
    }

    /// Number of buffered calls.
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Returns `true` if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    fn drain(&self) -> Vec<Call> {
        let drained = mem::take(&mut *self.queue.lock());
        debug!(calls = drained.len(), "batch drained");
        drained
    }

    /// Drain the buffer and `adapt` every call, one result per call.
    ///
    /// # Errors
    ///
    /// Stops at the first failing call; the rest of the drained calls are
    /// dropped.
    pub fn adapt(&self) -> Result<Vec<Value>, DispatchError> {
        self.drain()
            .iter()
            .map(|call| self.razor.adapt_with(&call.context, &call.args))
            .collect()
    }

    /// Drain the buffer and run `all` for every call, flattening the results
    /// in buffer order.
    pub fn all(&self) -> Result<Vec<Value>, DispatchError> {
        dispatch_all(&self.razor, self.drain())
    }

    /// Alias of [`Batch::all`].
    pub fn trigger_sync(&self) -> Result<Vec<Value>, DispatchError> {
        self.all()
    }

    /// Schedule the batch and report the outcome to `callback`.
    ///
    /// The buffer is drained when the scheduled task runs. The callback is
    /// called exactly once, with dispatch errors passed in rather than raised.
    pub fn trigger<F>(&self, callback: F) -> &Self
    where
        F: FnOnce(Result<Vec<Value>, DispatchError>) + Send + 'static,
    {
        let batch = self.clone();
        self.razor.scheduler().schedule("batch", move || {
            let outcome = batch.all();
            if let Err(err) = &outcome {
                warn!(error = %err, "batch dispatch failed");
            }
            callback(outcome);
            Ok(())
        });
        self
    }

    /// Schedule the batch, returning a future for the outcome.
    ///
    /// The future resolves once the registry's scheduler has been flushed. If
    /// the task is dropped without running it resolves with
    /// [`RazorError::Custom`].
    pub fn triggered(&self) -> BoxFuture<'static, Result<Vec<Value>, RazorError>> {
        let (tx, rx) = oneshot::channel();
        self.trigger(move |outcome| {
            // The receiver may already be gone.
            let _ = tx.send(outcome);
        });
        Box::pin(async move {
            match rx.await {
                Ok(outcome) => outcome.map_err(RazorError::from),
                Err(_) => Err(RazorError::Custom("batch was never dispatched".into())),
            }
        })
    }

    /// Drain the buffer and `stick` every call.
    pub fn stick(&self) -> &Self {
        for call in self.drain() {
            self.razor.stick_with(&call.context, &call.args);
        }
        self
    }

    /// Alias of [`Batch::stick`].
    pub fn post(&self) -> &Self {
        self.stick()
    }
}

fn dispatch_all(razor: &Razor, calls: Vec<Call>) -> Result<Vec<Value>, DispatchError> {
    let mut results = Vec::new();
    for call in calls {
        results.extend(razor.all_with(&call.context, &call.args)?);
    }
    Ok(results)
}

impl fmt::Debug for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Batch")
            .field("pending", &self.len())
            .field("razor", &self.razor)
            .finish()
    }
}
