//! # razor-core
//!
//! Core types for Razor, a runtime multiple dispatch engine.
//!
//! Calls carry a list of dynamic [`Value`]s. Candidate handlers are registered
//! as [`Adapter`]s, each guarded by one [`Validator`] per argument position.
//! Dispatch scores every adapter against the call, producing a
//! [`ScoreVector`], and ranks the matches from most to least specific.
//!
//! This crate has minimal dependencies and holds only the data model:
//!
//! - [`Validator`] / [`Validators`] - per-argument predicates and their combinator
//! - [`Handler`] - callable, constant or factory handlers
//! - [`Adapter`] - a handler with validators and lifecycle metadata
//! - [`Call`] / [`PostedEvent`] - context plus arguments
//!
//! The engine lives in `razor-std`.
//!
//! # Error Types
//!
//! - [`RazorError`] - Top-level error type
//! - [`DispatchError`] - Selection and invocation errors
//! - [`ValidatorError`] - Validator construction errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod adapter;
mod call;
mod error;
mod handler;
mod validator;

// Re-exports
pub use adapter::{Adapter, Namespace};
pub use call::{Call, PostedEvent};
pub use error::{BoxError, DispatchError, RazorError, ValidatorError};
pub use handler::{CallableFn, FactoryFn, Handler};
pub use serde_json::Value;
pub use validator::{Score, ScoreVector, Validator, Validators};
