//! Parallel grid scan with deterministic reduction.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Duration;
use rayon::prelude::*;
use soma_model::{Phase, PhaseModel};
use soma_search::{calculate_year, events_for_phase};
use tracing::{debug, trace};

use crate::error::CalibrationError;
use crate::grid_types::{CalibrationConfig, CalibrationResult, ReferenceDataset};

/// One point of the parameter grid. The index records enumeration order
/// (offset ascending, then synodic length ascending) so the parallel
/// reduction can tie-break by grid order instead of arrival order.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    model: PhaseModel,
}

#[derive(Debug, Clone, Copy)]
struct Scored {
    candidate: Candidate,
    avg_error_days: f64,
    comparisons: u32,
}

/// Run the full grid search.
pub fn calibrate(
    dataset: &ReferenceDataset,
    config: &CalibrationConfig,
) -> Result<CalibrationResult, CalibrationError> {
    calibrate_with_cancel(dataset, config, &AtomicBool::new(false))
}

/// Run the grid search with cooperative cancellation.
///
/// A candidate checks the flag before scoring; once the flag is set the
/// remaining candidates are skipped. Candidates scored before the signal
/// still participate in the reduction, so an aborted run either reports the
/// best of what completed or [`CalibrationError::NoComparableYears`].
pub fn calibrate_with_cancel(
    dataset: &ReferenceDataset,
    config: &CalibrationConfig,
    cancel: &AtomicBool,
) -> Result<CalibrationResult, CalibrationError> {
    config.validate().map_err(CalibrationError::InvalidConfig)?;
    if dataset.is_empty() {
        return Err(CalibrationError::NoComparableYears);
    }

    let candidates = enumerate_grid(config);
    debug!(
        grid_size = candidates.len(),
        start_year = config.start_year,
        end_year = config.end_year,
        reference_years = dataset.len(),
        "starting calibration grid scan"
    );

    let scored: Result<Vec<Option<Scored>>, CalibrationError> = candidates
        .par_iter()
        .map(|candidate| {
            if cancel.load(Ordering::Relaxed) {
                return Ok(None);
            }
            score_candidate(dataset, config, *candidate)
        })
        .collect();

    let scored: Vec<Scored> = scored?.into_iter().flatten().collect();
    let candidates_tested = scored.len();

    // Smallest mean error wins; equal errors keep the earliest grid index.
    let best = scored
        .into_iter()
        .min_by(|a, b| {
            a.avg_error_days
                .total_cmp(&b.avg_error_days)
                .then_with(|| a.candidate.index.cmp(&b.candidate.index))
        })
        .ok_or(CalibrationError::NoComparableYears)?;

    debug!(
        avg_error_days = best.avg_error_days,
        comparisons = best.comparisons,
        candidates_tested,
        "calibration finished"
    );

    Ok(CalibrationResult {
        reference_new_moon: best.candidate.model.reference_new_moon,
        synodic_month_days: best.candidate.model.synodic_month_days,
        avg_error_days: best.avg_error_days,
        comparisons: best.comparisons,
        candidates_tested,
    })
}

/// Enumerate the grid, offset-major then synodic ascending.
fn enumerate_grid(config: &CalibrationConfig) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut index = 0;

    let mut offset = config.offset_hours_min;
    while offset <= config.offset_hours_max {
        let reference = config.base_reference + Duration::hours(offset);

        let mut synodic = config.synodic_min;
        while synodic <= config.synodic_max + 1e-9 {
            candidates.push(Candidate {
                index,
                model: PhaseModel::new(reference, synodic, config.tolerance_phase),
            });
            index += 1;
            synodic += config.synodic_step;
        }

        offset += config.offset_step_hours;
    }

    candidates
}

/// Score one candidate: mean absolute full-moon timing error in days.
///
/// A year whose computed full-moon count differs from the reference count
/// contributes nothing — positional pairing would be meaningless. This keeps
/// the documented behavior even though it can flatter a candidate that
/// happens to produce fewer comparable years. Returns `None` when not a
/// single year was comparable.
fn score_candidate(
    dataset: &ReferenceDataset,
    config: &CalibrationConfig,
    candidate: Candidate,
) -> Result<Option<Scored>, CalibrationError> {
    let mut total_error_days = 0.0;
    let mut comparisons: u32 = 0;

    for (year, reference) in dataset.years_in(config.start_year, config.end_year) {
        let events = calculate_year(&candidate.model, year, &config.search)?;
        let computed = events_for_phase(&events, Phase::FullMoon);

        if computed.len() != reference.len() {
            trace!(
                year,
                computed = computed.len(),
                reference = reference.len(),
                "full-moon count mismatch, year skipped"
            );
            continue;
        }

        for (r, c) in reference.iter().zip(&computed) {
            let diff_days = (c.timestamp - *r).num_minutes().abs() as f64 / 1440.0;
            total_error_days += diff_days;
            comparisons += 1;
        }
    }

    if comparisons == 0 {
        return Ok(None);
    }

    Ok(Some(Scored {
        candidate,
        avg_error_days: total_error_days / comparisons as f64,
        comparisons,
    }))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn standard_grid_has_234_candidates() {
        let config = CalibrationConfig::standard(1900, 2080);
        let grid = enumerate_grid(&config);
        // 9 offsets × 26 synodic steps
        assert_eq!(grid.len(), 234);
    }

    #[test]
    fn grid_order_is_offset_major() {
        let config = CalibrationConfig::standard(1900, 2080);
        let grid = enumerate_grid(&config);
        assert_eq!(grid[0].index, 0);
        // First candidate: offset −24h, smallest synodic
        let first = grid[0].model;
        assert_eq!(
            first.reference_new_moon,
            config.base_reference - Duration::hours(24)
        );
        assert!((first.synodic_month_days - 29.528).abs() < 1e-9);
        // Second candidate: same offset, next synodic step
        assert_eq!(grid[1].model.reference_new_moon, first.reference_new_moon);
        assert!(grid[1].model.synodic_month_days > first.synodic_month_days);
        // Indices are dense and ascending
        for (i, c) in grid.iter().enumerate() {
            assert_eq!(c.index, i);
        }
    }

    #[test]
    fn grid_covers_calibrated_synodic() {
        let config = CalibrationConfig::standard(1900, 2080);
        let grid = enumerate_grid(&config);
        let hit = grid
            .iter()
            .any(|c| (c.model.synodic_month_days - 29.5306).abs() < 5e-5);
        assert!(hit, "grid misses the calibrated synodic length");
    }

    #[test]
    fn empty_dataset_is_explicit_failure() {
        let config = CalibrationConfig::standard(2024, 2025);
        let result = calibrate(&ReferenceDataset::new(), &config);
        assert_eq!(result, Err(CalibrationError::NoComparableYears));
    }

    #[test]
    fn invalid_config_rejected_before_scan() {
        let mut config = CalibrationConfig::standard(2024, 2025);
        config.offset_step_hours = 0;
        let mut ds = ReferenceDataset::new();
        ds.insert_year(
            2024,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 25)
                    .unwrap()
                    .and_hms_opt(17, 54, 0)
                    .unwrap(),
            ],
        );
        assert!(matches!(
            calibrate(&ds, &config),
            Err(CalibrationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn pre_set_cancel_scores_nothing() {
        let config = CalibrationConfig::standard(2024, 2024);
        let mut ds = ReferenceDataset::new();
        ds.insert_year(
            2024,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 25)
                    .unwrap()
                    .and_hms_opt(17, 54, 0)
                    .unwrap(),
            ],
        );
        let cancel = AtomicBool::new(true);
        assert_eq!(
            calibrate_with_cancel(&ds, &config, &cancel),
            Err(CalibrationError::NoComparableYears)
        );
    }
}
