//! Ready-made validators for common argument shapes.
//!
//! Each one is `Validator::any()` chained with a type check, so they score 2
//! and outrank a bare `any()`.

use razor_core::{Validator, ValidatorError};
use regex::Regex;
use serde_json::Value;

/// Accepts numbers.
pub fn is_number() -> Validator {
    Validator::any().check("is_number", Value::is_number)
}

/// Accepts strings.
pub fn is_string() -> Validator {
    Validator::any().check("is_string", Value::is_string)
}

/// Accepts booleans.
pub fn is_bool() -> Validator {
    Validator::any().check("is_bool", Value::is_boolean)
}

/// Accepts arrays.
pub fn is_array() -> Validator {
    Validator::any().check("is_array", Value::is_array)
}

/// Accepts objects.
pub fn is_object() -> Validator {
    Validator::any().check("is_object", Value::is_object)
}

/// Accepts strings matching `pattern`.
///
/// # Errors
///
/// [`ValidatorError::InvalidCombination`] if `pattern` is not a valid regex.
pub fn regex(pattern: &str) -> Result<Validator, ValidatorError> {
    let compiled =
        Regex::new(pattern).map_err(|err| ValidatorError::InvalidCombination(err.to_string()))?;
    let name = format!("regex({pattern})");
    Ok(Validator::any().check(&name, move |value| {
        value.as_str().is_some_and(|text| compiled.is_match(text))
    }))
}
