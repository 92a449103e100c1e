//! # Handlers
//!
//! The terminal point of a dispatch: what runs once an adapter is selected.
//!
//! A handler is one of three explicit kinds:
//!
//! - [`Handler::Callable`] receives the call context and arguments
//! - [`Handler::Constant`] returns a fixed value for any call
//! - [`Handler::Factory`] builds a fresh value from the arguments alone
//!
//! Handlers are compared by identity: a handler and its clones are "the same"
//! handler, two handlers built from identical closures are not. Removal by
//! handler relies on this.

use crate::error::BoxError;
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Signature of a callable handler: `(context, args) -> result`.
pub type CallableFn = dyn Fn(&Value, &[Value]) -> Result<Value, BoxError> + Send + Sync;

/// Signature of a factory handler: `(args) -> new value`.
pub type FactoryFn = dyn Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync;

/// A registered handler.
#[derive(Clone)]
pub enum Handler {
    /// A function of the call context and arguments.
    Callable(Arc<CallableFn>),
    /// A constant returned as-is.
    Constant(Arc<Value>),
    /// A constructor of new values, ignoring the context.
    Factory(Arc<FactoryFn>),
}

impl Handler {
    /// Create a fallible callable handler.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Handler::Callable(Arc::new(f))
    }

    /// Create an infallible callable handler.
    pub fn from_fn<F, R>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        let callable = move |context: &Value, args: &[Value]| -> Result<Value, BoxError> {
            Ok(f(context, args).into())
        };
        Handler::Callable(Arc::new(callable))
    }

    /// Create a handler that always returns `value`.
    pub fn constant(value: impl Into<Value>) -> Self {
        Handler::Constant(Arc::new(value.into()))
    }

    /// Create a factory handler.
    pub fn factory<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Handler::Factory(Arc::new(f))
    }

    /// Returns `true` unless this is a constant.
    pub fn is_callable(&self) -> bool {
        !matches!(self, Handler::Constant(_))
    }

    /// Returns `true` if `other` is this handler or one of its clones.
    pub fn same_as(&self, other: &Handler) -> bool {
        match (self, other) {
            (Handler::Callable(a), Handler::Callable(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Handler::Constant(a), Handler::Constant(b)) => Arc::ptr_eq(a, b),
            (Handler::Factory(a), Handler::Factory(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }

    /// Run the handler.
    pub fn invoke(&self, context: &Value, args: &[Value]) -> Result<Value, BoxError> {
        match self {
            Handler::Callable(f) => f(context, args),
            Handler::Constant(value) => Ok(Value::clone(value)),
            Handler::Factory(f) => f(args),
        }
    }
}

impl From<Value> for Handler {
    fn from(value: Value) -> Self {
        Handler::Constant(Arc::new(value))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Callable(_) => f.write_str("Handler::Callable"),
            Handler::Constant(value) => {
                f.debug_tuple("Handler::Constant").field(value).finish()
            }
            Handler::Factory(_) => f.write_str("Handler::Factory"),
        }
    }
}
