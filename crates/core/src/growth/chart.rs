//! Growth chart data: a child's measurement points plus reference curves.

use serde::{Deserialize, Serialize};

use super::measurement::{MeasurementType, Sex};
use super::standards::{ReferenceCurve, StandardEntry, StandardsTable};

/// One plotted measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub age_months: i32,
    pub value: f64,
}

/// Everything a chart widget needs for one indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthChart {
    pub measurement_type: MeasurementType,
    pub sex: Sex,
    pub unit: &'static str,
    /// Child measurements ordered by age.
    pub points: Vec<ChartPoint>,
    /// Reference lines ordered by z-score.
    pub curves: Vec<ReferenceCurve>,
}

/// Assemble chart data from raw points and reference entries.
///
/// Entries for other measurement types or sexes are ignored. Points with the
/// same age keep their input order.
pub fn build_chart(
    measurement_type: MeasurementType,
    sex: Sex,
    mut points: Vec<ChartPoint>,
    references: &[StandardEntry],
) -> GrowthChart {
    points.sort_by_key(|p| p.age_months);

    let table: StandardsTable = references
        .iter()
        .filter(|e| e.measurement_type == measurement_type && e.sex == sex)
        .copied()
        .collect();

    GrowthChart {
        measurement_type,
        sex,
        unit: measurement_type.unit(),
        points,
        curves: table.curves(measurement_type, sex),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_sorted_and_curves_filtered() {
        let refs: Vec<StandardEntry> = [
            (Sex::Male, 0, 3.3),
            (Sex::Male, 12, 9.6),
            (Sex::Female, 0, 3.2),
        ]
        .into_iter()
        .map(|(sex, age_months, reference_value)| StandardEntry {
            measurement_type: MeasurementType::WeightForAge,
            age_months,
            sex,
            z_score: 0,
            reference_value,
        })
        .collect();

        let chart = build_chart(
            MeasurementType::WeightForAge,
            Sex::Male,
            vec![
                ChartPoint { age_months: 6, value: 7.5 },
                ChartPoint { age_months: 1, value: 4.4 },
            ],
            &refs,
        );

        assert_eq!(chart.unit, "kg");
        assert_eq!(chart.points[0].age_months, 1);
        assert_eq!(chart.curves.len(), 1);
        assert_eq!(chart.curves[0].points, vec![(0, 3.3), (12, 9.6)]);
    }
}
