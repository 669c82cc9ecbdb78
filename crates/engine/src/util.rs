//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use crate::{EngineError, MoneyCents, ResultEngine};

/// Trim a required name and reject it when empty.
pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trim optional free text, mapping blank strings to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Reject negative amounts and amounts above [`MoneyCents::MAX_STORED`].
pub(crate) fn require_non_negative(amount: MoneyCents, label: &str) -> ResultEngine<MoneyCents> {
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!("{label} must be >= 0")));
    }
    if amount > MoneyCents::MAX_STORED {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be <= {}",
            MoneyCents::MAX_STORED
        )));
    }
    Ok(amount)
}

/// Reject negative, NaN or infinite quantities (hours, hectares, yields).
pub(crate) fn require_quantity(value: f64, label: &str) -> ResultEngine<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be a finite number >= 0"
        )));
    }
    Ok(value)
}
