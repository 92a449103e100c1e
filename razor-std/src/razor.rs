//! The dispatch object.
//!
//! A [`Razor`] owns an ordered set of adapters and a sticky event store. It
//! selects the most specific adapter for a call (`adapt`), runs every match
//! in specificity order (`all`), defers them to the scheduler (`trigger`), or
//! records the call as a sticky event for later registrations (`stick`).
//!
//! ```rust,ignore
//! let area = Razor::new();
//! area.on([is_square()], Handler::from_fn(|_, args| side(&args[0]).powi(2)))
//!     .on([is_circle()], Handler::from_fn(|_, args| PI * radius(&args[0]).powi(2)));
//!
//! let value = area.adapt(&[json!({"shape": "square", "side": 2})])?;
//! ```
//!
//! # Sharing
//!
//! `Razor` is a cheap handle. Clones and [proxies](Razor::proxy) share the
//! same adapters, events and scheduler. Handlers are never invoked while the
//! registry is locked, so a handler may itself dispatch or register.
//!
//! # Deferred work
//!
//! `trigger`, the delivery half of `stick`, and the replay of sticky events
//! to new adapters are queued on the [`Scheduler`] and only run on
//! [`Razor::flush`]. Which adapters run is decided when the work is queued.

use crate::{
    adapters::AdapterRegistry,
    batch::Batch,
    events::EventStore,
    ordering::Comparator,
    resolver,
    scheduler::Scheduler,
};
use parking_lot::Mutex;
use razor_core::{
    Adapter, Call, DispatchError, Handler, Namespace, PostedEvent, Validators,
};
use serde_json::Value;
use std::{cmp::Ordering, fmt, sync::Arc};
use tracing::{debug, debug_span, trace};

struct State {
    adapters: AdapterRegistry,
    events: EventStore,
}

impl State {
    /// Resolve every match, then count down and prune in the same pass.
    fn take_all(&mut self, args: &[Value]) -> Vec<Adapter> {
        let candidates = resolver::resolve_all(args, self.adapters.as_slice());
        let selected = candidates
            .iter()
            .map(|candidate| self.adapters.as_slice()[candidate.position].clone())
            .collect();
        let exhausted = self
            .adapters
            .countdown(candidates.iter().map(|candidate| candidate.position));
        if exhausted > 0 {
            trace!(exhausted, "exhausted adapters removed");
        }
        selected
    }

    fn take_one(&mut self, args: &[Value]) -> Result<Adapter, DispatchError> {
        let winner = resolver::resolve_one(args, self.adapters.as_slice())?;
        let selected = self.adapters.as_slice()[winner.position].clone();
        trace!(score = %winner.score, "adapter selected");
        self.adapters.countdown([winner.position]);
        Ok(selected)
    }
}

struct Shared {
    state: Mutex<State>,
    scheduler: Scheduler,
    comparator: Option<Comparator>,
}

/// A registry of adapters and sticky events with multiple dispatch.
#[derive(Clone)]
pub struct Razor {
    shared: Arc<Shared>,
    namespace: Option<Namespace>,
}

impl Razor {
    /// Create an empty registry with its own scheduler and no ordering.
    pub fn new() -> Self {
        RazorBuilder::new().build()
    }

    /// Start configuring a registry.
    pub fn builder() -> RazorBuilder {
        RazorBuilder::new()
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Register an unlimited adapter.
    ///
    /// Sticky events already stored and accepted by `validators` are replayed
    /// to the new handler on the next flush.
    pub fn add(&self, validators: impl Into<Validators>, handler: impl Into<Handler>) -> &Self {
        self.register(validators.into(), handler.into(), None, false)
    }

    /// Alias of [`Razor::add`].
    pub fn on(&self, validators: impl Into<Validators>, handler: impl Into<Handler>) -> &Self {
        self.add(validators, handler)
    }

    /// Register an adapter that runs at most once.
    pub fn one(&self, validators: impl Into<Validators>, handler: impl Into<Handler>) -> &Self {
        self.register(validators.into(), handler.into(), Some(1), false)
    }

    /// Register an adapter that consumes the sticky events it handles.
    pub fn consume(
        &self,
        validators: impl Into<Validators>,
        handler: impl Into<Handler>,
    ) -> &Self {
        self.register(validators.into(), handler.into(), None, true)
    }

    /// Register a consuming adapter that runs at most once.
    pub fn consume_one(
        &self,
        validators: impl Into<Validators>,
        handler: impl Into<Handler>,
    ) -> &Self {
        self.register(validators.into(), handler.into(), Some(1), true)
    }

    /// Register a catch-all adapter, ranked below every validated one.
    pub fn not_found(&self, handler: impl Into<Handler>) -> &Self {
        self.register(Validators::new(), handler.into(), None, false)
    }

    fn register(
        &self,
        validators: Validators,
        handler: Handler,
        times: Option<u32>,
        consumes: bool,
    ) -> &Self {
        let mut adapter = Adapter::new(validators, handler.clone())
            .with_times(times)
            .with_consumes(consumes)
            .with_namespace(self.namespace.clone());

        let replayed = {
            let mut state = self.shared.state.lock();
            let replayed = state.events.replay(&mut adapter);
            if !adapter.is_exhausted() {
                state.adapters.push(adapter);
            }
            replayed
        };

        debug!(
            namespace = ?self.namespace,
            ?times,
            consumes,
            replayed = replayed.len(),
            "adapter registered"
        );
        for event in replayed {
            self.schedule_invocation("replay", handler.clone(), Arc::new(event));
        }
        self
    }

    // ------------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------------

    /// Remove adapters.
    ///
    /// With a handler, removes the adapters using it. Through a namespaced
    /// handle only that namespace is affected; `remove(None)` then empties the
    /// namespace, while on the root handle it empties the whole registry.
    pub fn remove(&self, handler: Option<&Handler>) -> &Self {
        let removed = self
            .shared
            .state
            .lock()
            .adapters
            .remove(handler, self.namespace.as_deref());
        debug!(namespace = ?self.namespace, removed, "adapters removed");
        self
    }

    /// Remove the adapters using `handler`.
    pub fn off(&self, handler: &Handler) -> &Self {
        self.remove(Some(handler))
    }

    /// Remove every adapter visible through this handle.
    pub fn clear(&self) -> &Self {
        self.remove(None)
    }

    /// Remove the handlers of every adapter matching `args`.
    ///
    /// Matching here is a pure lookup: no countdown, no consumption.
    pub fn remove_if(&self, args: &[Value]) -> &Self {
        let mut state = self.shared.state.lock();
        let handlers: Vec<Handler> = resolver::decorate_and_filter(args, state.adapters.as_slice())
            .iter()
            .map(|candidate| state.adapters.as_slice()[candidate.position].handler().clone())
            .collect();
        let removed: usize = handlers
            .iter()
            .map(|handler| {
                state
                    .adapters
                    .remove(Some(handler), self.namespace.as_deref())
            })
            .sum();
        debug!(namespace = ?self.namespace, removed, "adapters removed by match");
        self
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Invoke the most specific adapter with a null context.
    pub fn call(&self, args: &[Value]) -> Result<Value, DispatchError> {
        self.adapt_with(&Value::Null, args)
    }

    /// Invoke the most specific adapter with a null context.
    pub fn adapt(&self, args: &[Value]) -> Result<Value, DispatchError> {
        self.adapt_with(&Value::Null, args)
    }

    /// Invoke the most specific adapter.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::NotFound`] if no adapter matches
    /// - [`DispatchError::AmbiguousMatch`] if the best two share a score
    /// - [`DispatchError::Handler`] if the handler fails
    pub fn adapt_with(&self, context: &Value, args: &[Value]) -> Result<Value, DispatchError> {
        let _span = debug_span!("adapt", arity = args.len()).entered();
        let adapter = self.shared.state.lock().take_one(args)?;
        adapter
            .handler()
            .invoke(context, args)
            .map_err(DispatchError::Handler)
    }

    /// Invoke every matching adapter with a null context.
    pub fn all(&self, args: &[Value]) -> Result<Vec<Value>, DispatchError> {
        self.all_with(&Value::Null, args)
    }

    /// Invoke every matching adapter, most specific first, collecting results.
    ///
    /// # Errors
    ///
    /// Stops at the first failing handler with [`DispatchError::Handler`].
    pub fn all_with(&self, context: &Value, args: &[Value]) -> Result<Vec<Value>, DispatchError> {
        let _span = debug_span!("all", arity = args.len()).entered();
        let selected = self.shared.state.lock().take_all(args);
        trace!(matched = selected.len(), "adapters selected");
        selected
            .iter()
            .map(|adapter| {
                adapter
                    .handler()
                    .invoke(context, args)
                    .map_err(DispatchError::Handler)
            })
            .collect()
    }

    /// Alias of [`Razor::all_with`].
    pub fn trigger_sync(
        &self,
        context: &Value,
        args: &[Value],
    ) -> Result<Vec<Value>, DispatchError> {
        self.all_with(context, args)
    }

    /// Queue every matching adapter with a null context.
    pub fn trigger(&self, args: &[Value]) -> &Self {
        self.trigger_with(&Value::Null, args)
    }

    /// Queue every matching adapter on the scheduler, most specific first.
    ///
    /// Selection and countdown happen now; the handlers run on the next flush.
    pub fn trigger_with(&self, context: &Value, args: &[Value]) -> &Self {
        let selected = self.shared.state.lock().take_all(args);
        debug!(matched = selected.len(), "trigger queued");
        let call = Arc::new(Call::with_context(context.clone(), args.to_vec()));
        for adapter in selected {
            self.schedule_invocation("trigger", adapter.handler().clone(), call.clone());
        }
        self
    }

    fn schedule_invocation(&self, label: &'static str, handler: Handler, call: Arc<Call>) {
        self.shared.scheduler.schedule(label, move || {
            handler.invoke(&call.context, &call.args).map(drop)
        });
    }

    // ------------------------------------------------------------------------
    // Sticky events
    // ------------------------------------------------------------------------

    /// Post a sticky event with a null context.
    pub fn stick(&self, args: &[Value]) -> &Self {
        self.stick_with(&Value::Null, args)
    }

    /// Alias of [`Razor::stick`].
    pub fn post(&self, args: &[Value]) -> &Self {
        self.stick(args)
    }

    /// Post a sticky event and trigger the current matches.
    ///
    /// The event is stored unless a consuming adapter accepts it now; stored
    /// events are replayed to adapters registered later.
    pub fn stick_with(&self, context: &Value, args: &[Value]) -> &Self {
        let call = Call::with_context(context.clone(), args.to_vec());
        let (selected, consumed) = {
            let mut state = self.shared.state.lock();
            let selected = state.take_all(args);
            let consumed = selected.iter().any(Adapter::consumes);
            if !consumed {
                state.events.insert(call.clone(), self.shared.comparator.as_ref());
            }
            (selected, consumed)
        };
        debug!(matched = selected.len(), consumed, "event posted");

        let call = Arc::new(call);
        for adapter in selected {
            self.schedule_invocation("stick", adapter.handler().clone(), call.clone());
        }
        self
    }

    /// Remove the stored events whose arguments satisfy `validators`.
    pub fn unstick(&self, validators: impl Into<Validators>) -> &Self {
        let validators = validators.into();
        let removed = self.shared.state.lock().events.remove_matching(&validators);
        debug!(removed, "events unstuck");
        self
    }

    /// Alias of [`Razor::unstick`].
    pub fn unpost(&self, validators: impl Into<Validators>) -> &Self {
        self.unstick(validators)
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// Number of registered adapters.
    pub fn size(&self) -> usize {
        self.shared.state.lock().adapters.len()
    }

    /// Number of adapters that would match `args`.
    pub fn size_matching(&self, args: &[Value]) -> usize {
        let state = self.shared.state.lock();
        resolver::decorate_and_filter(args, state.adapters.as_slice()).len()
    }

    /// Snapshot of the adapters in registration order.
    pub fn adapters(&self) -> Vec<Adapter> {
        self.shared.state.lock().adapters.as_slice().to_vec()
    }

    /// Snapshot of the stored events in store order.
    pub fn events(&self) -> Vec<PostedEvent> {
        self.shared.state.lock().events.as_slice().to_vec()
    }

    /// The namespace of this handle, `None` on the root handle.
    pub fn namespace_id(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The ordering applied to stored events and batches.
    pub fn comparator(&self) -> Option<&Comparator> {
        self.shared.comparator.as_ref()
    }

    /// The scheduler running deferred invocations.
    pub fn scheduler(&self) -> &Scheduler {
        &self.shared.scheduler
    }

    /// Run every deferred invocation, returning how many ran.
    pub fn flush(&self) -> usize {
        self.shared.scheduler.run_pending()
    }

    // ------------------------------------------------------------------------
    // Derived handles
    // ------------------------------------------------------------------------

    /// A handle over the same registry that tags its registrations with `id`.
    ///
    /// A random id is generated when none is given.
    pub fn proxy(&self, id: Option<&str>) -> Razor {
        let namespace: Namespace = match id {
            Some(id) => id.into(),
            None => uuid::Uuid::new_v4().simple().to_string().into(),
        };
        Razor {
            shared: Arc::clone(&self.shared),
            namespace: Some(namespace),
        }
    }

    /// Alias of [`Razor::proxy`].
    pub fn namespace(&self, id: Option<&str>) -> Razor {
        self.proxy(id)
    }

    /// An ordered buffer of calls dispatched together through this handle.
    pub fn batch(&self) -> Batch {
        Batch::new(self.clone())
    }

    /// A new registry holding this registry's adapters and events followed by
    /// those of `others`. No operand is modified.
    ///
    /// The result shares this registry's scheduler and comparator.
    pub fn merge(&self, others: &[&Razor]) -> Razor {
        let mut adapters = self.adapters();
        let mut events = self.events();
        for other in others {
            adapters.extend(other.adapters());
            events.extend(other.events());
        }
        let mut builder = RazorBuilder::new()
            .adapters(adapters)
            .events(events)
            .scheduler(self.shared.scheduler.clone());
        builder.comparator = self.shared.comparator.clone();
        builder.build()
    }
}

impl Default for Razor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Razor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Razor")
            .field("namespace", &self.namespace)
            .field("adapters", &state.adapters.len())
            .field("events", &state.events.len())
            .field("ordered", &self.shared.comparator.is_some())
            .finish()
    }
}

// ============================================================================
// RazorBuilder
// ============================================================================

/// Builder for configuring a [`Razor`].
///
/// # Example
/// ```ignore
/// let scheduler = Scheduler::new();
/// let inbox = Razor::builder()
///     .comparator(|a, b| priority(a).cmp(&priority(b)))
///     .scheduler(scheduler.clone())
///     .build();
/// ```
#[derive(Default)]
pub struct RazorBuilder {
    adapters: Vec<Adapter>,
    events: Vec<PostedEvent>,
    comparator: Option<Comparator>,
    scheduler: Option<Scheduler>,
}

impl RazorBuilder {
    /// Create a builder with no adapters, no events and no ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep stored events and batches sorted with `compare`.
    pub fn comparator<F>(mut self, compare: F) -> Self
    where
        F: Fn(&Call, &Call) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(compare));
        self
    }

    /// Queue deferred work on `scheduler` instead of a private one.
    pub fn scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Seed the registry with adapters.
    pub fn adapters(mut self, adapters: Vec<Adapter>) -> Self {
        self.adapters = adapters;
        self
    }

    /// Seed the store with events, kept in the given order.
    pub fn events(mut self, events: Vec<PostedEvent>) -> Self {
        self.events = events;
        self
    }

    /// Build the registry.
    pub fn build(self) -> Razor {
        Razor {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    adapters: AdapterRegistry::from_adapters(self.adapters),
                    events: EventStore::from_events(self.events),
                }),
                scheduler: self.scheduler.unwrap_or_default(),
                comparator: self.comparator,
            }),
            namespace: None,
        }
    }
}
