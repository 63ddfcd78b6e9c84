//! WHO growth standard reference values and their in-memory index.
//!
//! A [`StandardEntry`] is one cell of the published tables: the expected
//! measurement at a given z-score for a (measurement type, sex, age) key.
//! [`StandardsTable`] indexes entries for lookup by the evaluator and for
//! drawing reference curves.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::measurement::{MeasurementType, Sex};
use crate::error::CoreError;

/// Youngest age covered by the WHO child growth standards.
pub const MIN_STANDARD_AGE_MONTHS: i32 = 0;

/// Oldest age covered by the WHO child growth standards.
pub const MAX_STANDARD_AGE_MONTHS: i32 = 60;

/// Z-scores published in the bundled dataset.
pub const STANDARD_Z_SCORES: [i16; 5] = [-3, -2, 0, 2, 3];

/// Bundled WHO reference dataset (subset of ages).
const BUNDLED_STANDARDS_JSON: &str = include_str!("who_standards.json");

/// One reference value from the standards table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardEntry {
    pub measurement_type: MeasurementType,
    pub age_months: i32,
    pub sex: Sex,
    pub z_score: i16,
    pub reference_value: f64,
}

/// How to resolve an age that has no rows of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgePolicy {
    /// Only rows seeded at exactly the requested age are used.
    #[default]
    Exact,
    /// Interpolate each z-line linearly between the nearest seeded ages on
    /// either side. Ages outside the seeded range still have no data.
    Interpolate,
}

/// A single z-score line across ages, ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCurve {
    pub z_score: i16,
    /// `(age_months, reference_value)` ordered by age.
    pub points: Vec<(i32, f64)>,
}

/// age -> z_score -> reference value
type AgeIndex = BTreeMap<i32, BTreeMap<i16, f64>>;

/// In-memory index over standard entries keyed by measurement type and sex.
///
/// Inserting an entry whose key already exists replaces the old value.
#[derive(Debug, Clone, Default)]
pub struct StandardsTable {
    index: HashMap<(MeasurementType, Sex), AgeIndex>,
}

impl StandardsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from the bundled WHO dataset.
    pub fn bundled() -> Result<Self, CoreError> {
        Ok(bundled_standards()?.into_iter().collect())
    }

    /// Insert or replace one entry.
    pub fn insert(&mut self, entry: StandardEntry) {
        self.index
            .entry((entry.measurement_type, entry.sex))
            .or_default()
            .entry(entry.age_months)
            .or_default()
            .insert(entry.z_score, entry.reference_value);
    }

    /// Total number of reference values held.
    pub fn len(&self) -> usize {
        self.index
            .values()
            .flat_map(|ages| ages.values())
            .map(BTreeMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Youngest and oldest seeded age for a measurement type and sex.
    pub fn age_range(&self, measurement_type: MeasurementType, sex: Sex) -> Option<(i32, i32)> {
        let ages = self.index.get(&(measurement_type, sex))?;
        let min = *ages.keys().next()?;
        let max = *ages.keys().next_back()?;
        Some((min, max))
    }

    /// Reference entries for the key, ordered by z-score ascending.
    ///
    /// Returns an empty vector when nothing covers the requested age under
    /// `policy`.
    pub fn lookup(
        &self,
        measurement_type: MeasurementType,
        sex: Sex,
        age_months: i32,
        policy: AgePolicy,
    ) -> Vec<StandardEntry> {
        let Some(ages) = self.index.get(&(measurement_type, sex)) else {
            return Vec::new();
        };

        let to_entries = |values: &BTreeMap<i16, f64>| -> Vec<StandardEntry> {
            values
                .iter()
                .map(|(&z_score, &reference_value)| StandardEntry {
                    measurement_type,
                    age_months,
                    sex,
                    z_score,
                    reference_value,
                })
                .collect()
        };

        if let Some(values) = ages.get(&age_months) {
            return to_entries(values);
        }

        if policy == AgePolicy::Exact {
            return Vec::new();
        }

        let below = ages.range(..age_months).next_back();
        let above = ages.range(age_months..).next();
        let (Some((&lo_age, lo)), Some((&hi_age, hi))) = (below, above) else {
            return Vec::new();
        };

        let fraction = f64::from(age_months - lo_age) / f64::from(hi_age - lo_age);
        let interpolated: BTreeMap<i16, f64> = lo
            .iter()
            .filter_map(|(z, &lo_value)| {
                hi.get(z)
                    .map(|&hi_value| (*z, lo_value + (hi_value - lo_value) * fraction))
            })
            .collect();
        to_entries(&interpolated)
    }

    /// One curve per z-score for the given measurement type and sex,
    /// ordered by z-score ascending.
    pub fn curves(&self, measurement_type: MeasurementType, sex: Sex) -> Vec<ReferenceCurve> {
        let Some(ages) = self.index.get(&(measurement_type, sex)) else {
            return Vec::new();
        };

        let mut lines: BTreeMap<i16, Vec<(i32, f64)>> = BTreeMap::new();
        for (&age, values) in ages {
            for (&z, &value) in values {
                lines.entry(z).or_default().push((age, value));
            }
        }

        lines
            .into_iter()
            .map(|(z_score, points)| ReferenceCurve { z_score, points })
            .collect()
    }

    /// All entries, ordered by measurement type, sex, age and z-score.
    pub fn entries(&self) -> Vec<StandardEntry> {
        let mut keys: Vec<_> = self.index.keys().copied().collect();
        keys.sort();

        let mut out = Vec::with_capacity(self.len());
        for (measurement_type, sex) in keys {
            for (&age_months, values) in &self.index[&(measurement_type, sex)] {
                for (&z_score, &reference_value) in values {
                    out.push(StandardEntry {
                        measurement_type,
                        age_months,
                        sex,
                        z_score,
                        reference_value,
                    });
                }
            }
        }
        out
    }
}

impl FromIterator<StandardEntry> for StandardsTable {
    fn from_iter<I: IntoIterator<Item = StandardEntry>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}

impl Extend<StandardEntry> for StandardsTable {
    fn extend<I: IntoIterator<Item = StandardEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

// ---------------------------------------------------------------------------
// Bundled dataset
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct BundledDataset {
    z_scores: Vec<i16>,
    tables: Vec<BundledTable>,
}

#[derive(Deserialize)]
struct BundledTable {
    measurement_type: MeasurementType,
    sex: Sex,
    rows: Vec<BundledRow>,
}

#[derive(Deserialize)]
struct BundledRow {
    age: i32,
    values: Vec<f64>,
}

/// Parse the bundled WHO dataset into flat entries.
pub fn bundled_standards() -> Result<Vec<StandardEntry>, CoreError> {
    let dataset: BundledDataset = serde_json::from_str(BUNDLED_STANDARDS_JSON)
        .map_err(|e| CoreError::Internal(format!("Bundled standards are malformed: {e}")))?;

    let mut entries = Vec::new();
    for table in &dataset.tables {
        for row in &table.rows {
            if row.values.len() != dataset.z_scores.len() {
                return Err(CoreError::Internal(format!(
                    "Bundled standards row for {} ({}) at {} months has {} values, expected {}",
                    table.measurement_type,
                    table.sex,
                    row.age,
                    row.values.len(),
                    dataset.z_scores.len()
                )));
            }
            entries.extend(dataset.z_scores.iter().zip(&row.values).map(
                |(&z_score, &reference_value)| StandardEntry {
                    measurement_type: table.measurement_type,
                    age_months: row.age,
                    sex: table.sex,
                    z_score,
                    reference_value,
                },
            ));
        }
    }
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
