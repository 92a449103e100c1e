//! # razor-std
//!
//! The dispatch engine for Razor.
//!
//! This crate provides:
//! - **Dispatch**: [`razor::Razor`] and its [`razor::RazorBuilder`]
//! - **Resolution**: scoring, ranking and tie detection in [`resolver`]
//! - **Storage**: [`adapters::AdapterRegistry`] and the sticky [`events::EventStore`]
//! - **Deferred work**: the cooperative [`scheduler::Scheduler`]
//! - **Batching**: ordered bulk dispatch with [`batch::Batch`]
//! - **Named functions**: [`registries::Registries`]
//! - **Built-in validators**: [`validators`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use razor_core;

// Modules
pub mod adapters;
pub mod batch;
pub mod events;
pub mod ordering;
pub mod razor;
pub mod registries;
pub mod resolver;
pub mod scheduler;
pub mod testing;
pub mod validators;
