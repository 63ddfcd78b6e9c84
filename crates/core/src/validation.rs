//! Input validation for child profiles and measurement records.
//!
//! Form fields are checked here before anything is persisted. Each function
//! returns a `CoreError::Validation` naming the offending field.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::growth::MeasurementType;

/// Maximum length of a child's display name.
pub const MAX_CHILD_NAME_LENGTH: usize = 100;

/// Plausible measurement range (inclusive) for each indicator.
pub fn plausible_range(measurement_type: MeasurementType) -> (f64, f64) {
    match measurement_type {
        MeasurementType::HeightForAge => (20.0, 150.0),
        MeasurementType::WeightForAge => (0.5, 50.0),
        MeasurementType::HeadCircumferenceForAge => (20.0, 70.0),
    }
}

/// Validate a measured value: finite and inside the plausible range.
pub fn validate_measurement_value(
    measurement_type: MeasurementType,
    value: f64,
) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(
            "value must be a finite number".to_string(),
        ));
    }
    let (min, max) = plausible_range(measurement_type);
    if value < min || value > max {
        return Err(CoreError::Validation(format!(
            "{measurement_type} value must be between {min} and {max} {}, got {value}",
            measurement_type.unit()
        )));
    }
    Ok(())
}

/// Validate a child's name: non-blank and at most [`MAX_CHILD_NAME_LENGTH`] characters.
pub fn validate_child_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("name must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_CHILD_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "name must be at most {MAX_CHILD_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate that a birth date is not in the future.
pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if birth_date > today {
        return Err(CoreError::Validation(format!(
            "birth_date {birth_date} is in the future"
        )));
    }
    Ok(())
}

/// Validate a record date: on or after birth, not in the future.
pub fn validate_record_date(
    birth_date: NaiveDate,
    recorded_date: NaiveDate,
    today: NaiveDate,
) -> Result<(), CoreError> {
    if recorded_date < birth_date {
        return Err(CoreError::Validation(format!(
            "recorded_date {recorded_date} is before birth date {birth_date}"
        )));
    }
    if recorded_date > today {
        return Err(CoreError::Validation(format!(
            "recorded_date {recorded_date} is in the future"
        )));
    }
    Ok(())
}

/// Map `validator` derive errors into a single `CoreError::Validation`.
pub fn from_validation_errors(errors: validator::ValidationErrors) -> CoreError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{field}: {}", reasons.join(", "))
        })
        .collect();
    fields.sort();
    CoreError::Validation(fields.join("; "))
}
