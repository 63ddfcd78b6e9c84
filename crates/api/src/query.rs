//! Shared query parameter types for API handlers.

use serde::Deserialize;
use tumbuh_core::growth::{AgePolicy, MeasurementType, Sex};

/// Optional `?age_policy=` selecting how ages without seeded rows are
/// resolved. Defaults to exact-age matching.
#[derive(Debug, Default, Deserialize)]
pub struct AgePolicyParams {
    #[serde(default)]
    pub age_policy: AgePolicy,
}

/// Filters for the standards listing (`?measurement_type=&sex=`).
#[derive(Debug, Default, Deserialize)]
pub struct StandardsFilter {
    pub measurement_type: Option<MeasurementType>,
    pub sex: Option<Sex>,
}
