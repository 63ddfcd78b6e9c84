use crate::growth::{MeasurementType, Sex};
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// No growth standard reference values cover the requested combination.
    ///
    /// Recoverable: the caller should prompt a standards sync or report
    /// "not enough data" for this age.
    #[error("No standard data for {measurement_type} ({sex}) at {age_months} months")]
    NoStandardData {
        measurement_type: MeasurementType,
        sex: Sex,
        age_months: i32,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
