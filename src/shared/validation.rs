//! Validation Utilities

use validator::ValidationErrors;

use super::error::AppError;

/// Convert validation errors to AppError
///
/// Only the first field error is reported; fields are visited in name order
/// so the message is stable across runs.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.0.cmp(&b.0));

    let message = field_errors
        .first()
        .map(|(field, message)| format!("{}: {}", field, message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}
