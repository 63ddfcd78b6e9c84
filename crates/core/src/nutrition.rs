//! Nutrition intake meal types, validation and daily summaries.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Meal slot an intake entry was eaten in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

impl FromStr for MealType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            _ => Err(CoreError::Validation(format!(
                "Invalid meal type '{s}'. Must be one of: breakfast, lunch, dinner, snack"
            ))),
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nutrient amounts of one intake entry. Missing fields default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutrients {
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbohydrate_g: f64,
}

impl Nutrients {
    fn add(&mut self, other: &Nutrients) {
        self.energy_kcal += other.energy_kcal;
        self.protein_g += other.protein_g;
        self.fat_g += other.fat_g;
        self.carbohydrate_g += other.carbohydrate_g;
    }
}

/// Totals for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyIntakeSummary {
    pub date: NaiveDate,
    pub entry_count: usize,
    pub totals: Nutrients,
}

/// Validate a single nutrient amount: finite and non-negative.
pub fn validate_nutrient(name: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

/// Validate every nutrient amount and the optional portion size.
pub fn validate_nutrients(nutrients: &Nutrients, portion_grams: Option<f64>) -> Result<(), CoreError> {
    validate_nutrient("energy_kcal", nutrients.energy_kcal)?;
    validate_nutrient("protein_g", nutrients.protein_g)?;
    validate_nutrient("fat_g", nutrients.fat_g)?;
    validate_nutrient("carbohydrate_g", nutrients.carbohydrate_g)?;
    if let Some(portion) = portion_grams {
        validate_nutrient("portion_grams", portion)?;
    }
    Ok(())
}

/// Group `(date, nutrients)` pairs by day and sum them, oldest day first.
pub fn summarize_daily<I>(entries: I) -> Vec<DailyIntakeSummary>
where
    I: IntoIterator<Item = (NaiveDate, Nutrients)>,
{
    let mut by_day: BTreeMap<NaiveDate, (usize, Nutrients)> = BTreeMap::new();
    for (date, nutrients) in entries {
        let (count, totals) = by_day.entry(date).or_default();
        *count += 1;
        totals.add(&nutrients);
    }

    by_day
        .into_iter()
        .map(|(date, (entry_count, totals))| DailyIntakeSummary {
            date,
            entry_count,
            totals,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn nutrients(energy_kcal: f64, protein_g: f64) -> Nutrients {
        Nutrients {
            energy_kcal,
            protein_g,
            fat_g: 1.0,
            carbohydrate_g: 2.0,
        }
    }

    #[test]
    fn meal_type_parses() {
        assert_eq!("snack".parse::<MealType>().unwrap(), MealType::Snack);
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn summary_groups_by_day_in_order() {
        let summary = summarize_daily(vec![
            (date(2), nutrients(300.0, 10.0)),
            (date(1), nutrients(200.0, 5.0)),
            (date(2), nutrients(150.0, 2.5)),
        ]);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].date, date(1));
        assert_eq!(summary[0].entry_count, 1);
        assert_eq!(summary[1].entry_count, 2);
        assert_eq!(summary[1].totals.energy_kcal, 450.0);
        assert_eq!(summary[1].totals.protein_g, 12.5);
        assert_eq!(summary[1].totals.fat_g, 2.0);
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        assert!(summarize_daily(Vec::new()).is_empty());
    }

    #[test]
    fn negative_nutrients_are_rejected() {
        let mut bad = nutrients(100.0, 1.0);
        bad.fat_g = -0.1;
        assert!(validate_nutrients(&bad, None).is_err());
        assert!(validate_nutrients(&nutrients(100.0, 1.0), Some(-5.0)).is_err());
        assert!(validate_nutrients(&nutrients(100.0, 1.0), Some(120.0)).is_ok());
    }
}
