//! Measurement kinds and child sex, as stored in text columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The anthropometric indicator a measurement or reference value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementType {
    /// Length (under 24 months) or standing height, in centimetres.
    HeightForAge,
    /// Body weight, in kilograms.
    WeightForAge,
    /// Occipitofrontal head circumference, in centimetres.
    HeadCircumferenceForAge,
}

/// All valid measurement type strings.
const VALID_MEASUREMENT_TYPES: &[&str] = &[
    "height_for_age",
    "weight_for_age",
    "head_circumference_for_age",
];

impl MeasurementType {
    pub const ALL: [MeasurementType; 3] = [
        Self::HeightForAge,
        Self::WeightForAge,
        Self::HeadCircumferenceForAge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeightForAge => "height_for_age",
            Self::WeightForAge => "weight_for_age",
            Self::HeadCircumferenceForAge => "head_circumference_for_age",
        }
    }

    /// Unit of the measured value.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::WeightForAge => "kg",
            Self::HeightForAge | Self::HeadCircumferenceForAge => "cm",
        }
    }
}

impl FromStr for MeasurementType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height_for_age" => Ok(Self::HeightForAge),
            "weight_for_age" => Ok(Self::WeightForAge),
            "head_circumference_for_age" => Ok(Self::HeadCircumferenceForAge),
            _ => Err(CoreError::Validation(format!(
                "Invalid measurement type '{s}'. Must be one of: {}",
                VALID_MEASUREMENT_TYPES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sex of the child; WHO standards are published separately for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Self::Male, Self::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(CoreError::Validation(format!(
                "Invalid sex '{s}'. Must be one of: male, female"
            ))),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
