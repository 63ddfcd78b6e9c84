//! Recipe age suitability.

/// Whether a recipe for `[min_age_months, max_age_months]` suits a child of
/// `age_months`. An absent maximum means no upper bound.
pub fn is_suitable_for_age(min_age_months: i32, max_age_months: Option<i32>, age_months: i32) -> bool {
    age_months >= min_age_months && max_age_months.map_or(true, |max| age_months <= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(is_suitable_for_age(6, Some(12), 6));
        assert!(is_suitable_for_age(6, Some(12), 12));
        assert!(!is_suitable_for_age(6, Some(12), 5));
        assert!(!is_suitable_for_age(6, Some(12), 13));
    }

    #[test]
    fn open_ended_maximum() {
        assert!(is_suitable_for_age(12, None, 59));
        assert!(!is_suitable_for_age(12, None, 11));
    }
}
