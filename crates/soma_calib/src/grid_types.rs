//! Types for the calibration grid search.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use soma_model::PhaseModel;
use soma_search::SearchConfig;

/// Known full-moon instants per year, the read-only scoring input.
///
/// Within each year the instants are kept sorted ascending; scoring pairs
/// them positionally against computed events. Years with no data are simply
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceDataset {
    years: BTreeMap<i32, Vec<NaiveDateTime>>,
}

impl ReferenceDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the full-moon instants of one year. Unsorted input is sorted;
    /// an empty list is ignored, leaving the year absent.
    pub fn insert_year(&mut self, year: i32, mut full_moons: Vec<NaiveDateTime>) {
        if full_moons.is_empty() {
            return;
        }
        full_moons.sort_unstable();
        self.years.insert(year, full_moons);
    }

    /// Full moons of one year, sorted ascending.
    pub fn full_moons(&self, year: i32) -> Option<&[NaiveDateTime]> {
        self.years.get(&year).map(Vec::as_slice)
    }

    /// Iterate `(year, full moons)` within `[start, end]`, year ascending.
    pub fn years_in(
        &self,
        start: i32,
        end: i32,
    ) -> impl Iterator<Item = (i32, &[NaiveDateTime])> {
        self.years
            .range(start..=end)
            .map(|(year, list)| (*year, list.as_slice()))
    }

    /// Number of years with data.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Configuration for the two-dimensional parameter grid.
///
/// One axis shifts the reference new moon by whole hours around a base
/// instant; the other sweeps the synodic month length across a narrow band.
/// The default grid is 9 × 26 = 234 candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationConfig {
    /// Base reference new-moon instant the hour offsets are applied to.
    pub base_reference: NaiveDateTime,
    /// Smallest hour offset (inclusive), default −24.
    pub offset_hours_min: i64,
    /// Largest hour offset (inclusive), default +24.
    pub offset_hours_max: i64,
    /// Hour offset step, default 6.
    pub offset_step_hours: i64,
    /// Lower synodic month bound in days, default 29.528.
    pub synodic_min: f64,
    /// Upper synodic month bound in days (inclusive), default 29.533.
    pub synodic_max: f64,
    /// Synodic sweep step in days, default 0.0002.
    pub synodic_step: f64,
    /// Phase tolerance held fixed for every trial, default 0.03.
    pub tolerance_phase: f64,
    /// First calibration year (inclusive).
    pub start_year: i32,
    /// Last calibration year (inclusive).
    pub end_year: i32,
    /// Event search configuration used for every trial.
    pub search: SearchConfig,
}

impl CalibrationConfig {
    /// The standard grid around the calibrated production model, scored over
    /// `[start_year, end_year]`.
    pub fn standard(start_year: i32, end_year: i32) -> Self {
        Self {
            base_reference: PhaseModel::calibrated().reference_new_moon,
            offset_hours_min: -24,
            offset_hours_max: 24,
            offset_step_hours: 6,
            synodic_min: 29.528,
            synodic_max: 29.533,
            synodic_step: 0.0002,
            tolerance_phase: 0.03,
            start_year,
            end_year,
            search: SearchConfig::calibrated(),
        }
    }

    /// Validate the grid definition.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.offset_step_hours <= 0 {
            return Err("offset_step_hours must be positive");
        }
        if self.offset_hours_max < self.offset_hours_min {
            return Err("offset_hours_max must not precede offset_hours_min");
        }
        if !self.synodic_step.is_finite() || self.synodic_step <= 0.0 {
            return Err("synodic_step must be positive");
        }
        if !self.synodic_min.is_finite()
            || !self.synodic_max.is_finite()
            || self.synodic_max < self.synodic_min
        {
            return Err("synodic band must be finite and ordered");
        }
        if self.synodic_min <= 0.0 {
            return Err("synodic_min must be positive");
        }
        if !self.tolerance_phase.is_finite()
            || self.tolerance_phase <= 0.0
            || self.tolerance_phase >= 0.5
        {
            return Err("tolerance_phase must be in (0, 0.5)");
        }
        if self.end_year < self.start_year {
            return Err("end_year must not precede start_year");
        }
        self.search.validate()
    }
}

/// The winning parameter pair of a grid search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationResult {
    /// Best reference new-moon instant found.
    pub reference_new_moon: NaiveDateTime,
    /// Best synodic month length found, in days.
    pub synodic_month_days: f64,
    /// Mean absolute full-moon timing error of the winner, in days.
    pub avg_error_days: f64,
    /// Event pairs that contributed to the winner's error mean.
    pub comparisons: u32,
    /// Candidates that produced a score (comparable years > 0).
    pub candidates_tested: usize,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn dataset_sorts_on_insert() {
        let mut ds = ReferenceDataset::new();
        ds.insert_year(
            2025,
            vec![dt(2025, 2, 12, 13, 53), dt(2025, 1, 13, 22, 27)],
        );
        let fulls = ds.full_moons(2025).unwrap();
        assert!(fulls[0] < fulls[1]);
    }

    #[test]
    fn dataset_ignores_empty_year() {
        let mut ds = ReferenceDataset::new();
        ds.insert_year(2025, vec![]);
        assert!(ds.is_empty());
        assert_eq!(ds.full_moons(2025), None);
    }

    #[test]
    fn dataset_range_iteration() {
        let mut ds = ReferenceDataset::new();
        ds.insert_year(2023, vec![dt(2023, 1, 6, 23, 7)]);
        ds.insert_year(2025, vec![dt(2025, 1, 13, 22, 27)]);
        ds.insert_year(2030, vec![dt(2030, 1, 19, 15, 54)]);
        let years: Vec<i32> = ds.years_in(2024, 2030).map(|(y, _)| y).collect();
        assert_eq!(years, vec![2025, 2030]);
    }

    #[test]
    fn standard_config_valid() {
        let c = CalibrationConfig::standard(1900, 2080);
        assert!(c.validate().is_ok());
        assert_eq!(c.offset_hours_min, -24);
        assert_eq!(c.offset_hours_max, 24);
        assert!((c.synodic_step - 0.0002).abs() < 1e-12);
    }

    #[test]
    fn rejects_inverted_years() {
        let c = CalibrationConfig::standard(2080, 1900);
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_zero_offset_step() {
        let mut c = CalibrationConfig::standard(1900, 2080);
        c.offset_step_hours = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_inverted_synodic_band() {
        let mut c = CalibrationConfig::standard(1900, 2080);
        c.synodic_min = 29.6;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_bad_search_config() {
        let mut c = CalibrationConfig::standard(1900, 2080);
        c.search.coarse_step_hours = 0;
        assert!(c.validate().is_err());
    }
}
