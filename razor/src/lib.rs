//! # razor - Runtime Multiple Dispatch
//!
//! `razor` picks the most specific handler for a call at runtime. Handlers
//! are registered with one [`Validator`] per argument; every call is scored
//! against every registration and the best-scoring one wins. Ties at the top
//! are reported as [`DispatchError::AmbiguousMatch`] instead of being broken
//! by registration order.
//!
//! On top of dispatch it offers sticky events, replayed to handlers that are
//! registered later, and ordered batches of calls.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use razor::prelude::*;
//!
//! let area = Razor::new();
//! area.on([is_number()], Handler::from_fn(|_, args| {
//!     let side = args[0].as_f64().unwrap_or_default();
//!     side * side
//! }));
//! area.on(["unit"], json!(1.0));
//!
//! assert_eq!(area.adapt(&[json!(3.0)])?, json!(9.0));
//! assert_eq!(area.adapt(&[json!("unit")])?, json!(1.0));
//! ```
//!
//! ## Sticky events
//!
//! ```rust,ignore
//! let bus = Razor::new();
//! bus.stick(&[json!("ready")]);
//!
//! // Registered after the fact, still runs once on the next flush.
//! bus.on(["ready"], Handler::from_fn(|_, _| println!("ready!")));
//! bus.flush();
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use razor_core::{
    // Data model
    Adapter,
    // Error types
    BoxError,
    Call,
    CallableFn,
    DispatchError,
    FactoryFn,
    Handler,
    Namespace,
    PostedEvent,
    RazorError,
    Score,
    ScoreVector,
    Validator,
    ValidatorError,
    Validators,
    Value,
};

// Engine
pub use razor_std::{
    batch::Batch,
    ordering::{Comparator, binary_insert},
    razor::{Razor, RazorBuilder},
    registries::{DEFAULT_REGISTRY, NamedRegistry, Registries},
    scheduler::Scheduler,
};

pub use serde_json::json;

/// Resolution internals, for custom dispatch front-ends.
pub mod resolver {
    pub use razor_std::resolver::{
        Candidate, decorate_and_filter, rank, resolve_all, resolve_one,
    };
}

/// Built-in validators.
pub mod validators {
    pub use razor_std::validators::{
        is_array, is_bool, is_number, is_object, is_string, regex,
    };
}

/// Testing utilities.
pub mod testing {
    pub use razor_std::testing::{CountingHandler, RecordingHandler};
}

/// Prelude module - common imports for Razor.
///
/// # Usage
///
/// ```rust,ignore
/// use razor::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Batch,
        // Errors
        DispatchError,
        // Core types
        Handler,
        Razor,
        RazorError,
        Registries,
        Validator,
        Validators,
        Value,
        json,
        validators::{is_array, is_bool, is_number, is_object, is_string, regex},
    };
}
