//! Calls and posted events.

use serde_json::Value;

/// A call: the dynamic context plus the ordered arguments.
///
/// The context plays the role of a receiver. Handlers get it as their first
/// parameter; dispatch never inspects it.
///
/// # Example
///
/// ```rust,ignore
/// let call = Call::new(vec![json!("play"), json!({"instrument_name": "guitar"})]);
/// let with_context = Call::with_context(json!({"user": 42}), vec![json!("stop")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Call {
    /// The receiver of the call, `Value::Null` when none was given.
    pub context: Value,
    /// The call arguments.
    pub args: Vec<Value>,
}

impl Call {
    /// Create a call with a null context.
    pub fn new(args: Vec<Value>) -> Self {
        Self {
            context: Value::Null,
            args,
        }
    }

    /// Create a call with an explicit context.
    pub fn with_context(context: Value, args: Vec<Value>) -> Self {
        Self { context, args }
    }
}

/// A durable record of a past dispatch, replayed to late registrations.
pub type PostedEvent = Call;
