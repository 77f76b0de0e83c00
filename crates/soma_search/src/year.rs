//! Coarse-scan + refinement event search.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use soma_model::{ALL_PHASES, MoonEvent, Phase, PhaseModel};

use crate::error::SearchError;
use crate::year_types::SearchConfig;

/// Search for all phase-crossing events in `[from, to]`.
///
/// Walks the window on the coarse grid; at each grid point every phase whose
/// distance falls within the model tolerance triggers a fine scan. The
/// result is sorted ascending and merged: same-phase detections closer than
/// the merge window collapse to their midpoint, so each physical crossing
/// appears once even though several adjacent coarse points trigger on it.
pub fn search_events(
    model: &PhaseModel,
    from: NaiveDateTime,
    to: NaiveDateTime,
    config: &SearchConfig,
) -> Result<Vec<MoonEvent>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    model.validate().map_err(SearchError::InvalidConfig)?;
    if to <= from {
        return Err(SearchError::InvalidConfig("window end must be after start"));
    }

    let coarse = Duration::hours(config.coarse_step_hours);
    let mut raw = Vec::new();

    let mut t = from;
    while t <= to {
        for phase in ALL_PHASES {
            let d = model.phase_distance(model.phase_value(t), phase.target());
            if d <= model.tolerance_phase {
                if let Some(best) = refine(model, t, phase.target(), config) {
                    raw.push(MoonEvent::new(best, phase));
                }
            }
        }
        t += coarse;
    }

    raw.sort_unstable_by_key(|e| e.timestamp);
    Ok(merge_adjacent(raw, config.merge_window_hours))
}

/// Search for all phase-crossing events of one calendar year.
///
/// The scan window is the year padded by `config.pad_days` on both sides, so
/// crossings that sit just past the strict boundary on the coarse grid are
/// still caught. Events in the pad are reported as-is; callers wanting a
/// strict year filter by date.
pub fn calculate_year(
    model: &PhaseModel,
    year: i32,
    config: &SearchConfig,
) -> Result<Vec<MoonEvent>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;

    let start = year_start(year).ok_or(SearchError::YearOutOfRange(year))?;
    let end = year_start(year + 1).ok_or(SearchError::YearOutOfRange(year))?;

    let pad = Duration::days(config.pad_days);
    let from = start
        .checked_sub_signed(pad)
        .ok_or(SearchError::YearOutOfRange(year))?;
    let to = end
        .checked_add_signed(pad)
        .ok_or(SearchError::YearOutOfRange(year))?;

    search_events(model, from, to, config)
}

/// Keep only the events of one phase, preserving order.
pub fn events_for_phase(events: &[MoonEvent], phase: Phase) -> Vec<MoonEvent> {
    events.iter().copied().filter(|e| e.phase == phase).collect()
}

fn year_start(year: i32) -> Option<NaiveDateTime> {
    Some(NaiveDate::from_ymd_opt(year, 1, 1)?.and_time(NaiveTime::MIN))
}

/// Fine scan around a coarse trigger: track the distance minimum over
/// `[around - window, around + window]` on the fine grid.
///
/// Returns `None` when even the best point exceeds the tolerance; that
/// rejects coarse-grid near-misses that do not hold up under finer sampling.
fn refine(
    model: &PhaseModel,
    around: NaiveDateTime,
    target: f64,
    config: &SearchConfig,
) -> Option<NaiveDateTime> {
    let window = Duration::days(config.refine_window_days);
    let step = Duration::minutes(config.refine_step_minutes);
    let to = around + window;

    let mut best_time = None;
    let mut best_dist = f64::MAX;

    let mut t = around - window;
    while t <= to {
        let d = model.phase_distance(model.phase_value(t), target);
        if d < best_dist {
            best_dist = d;
            best_time = Some(t);
        }
        t += step;
    }

    best_time.filter(|_| best_dist <= model.tolerance_phase)
}

/// Collapse adjacent same-phase detections of one physical crossing.
///
/// Input must be sorted ascending. An event within `merge_window_hours` of the
/// previously kept same-phase event replaces it with the midpoint of the two
/// instants instead of being appended.
fn merge_adjacent(sorted: Vec<MoonEvent>, merge_window_hours: i64) -> Vec<MoonEvent> {
    let mut cleaned: Vec<MoonEvent> = Vec::with_capacity(sorted.len());

    for event in sorted {
        match cleaned.last_mut() {
            Some(last)
                if last.phase == event.phase
                    && (event.timestamp - last.timestamp).num_hours().abs()
                        < merge_window_hours =>
            {
                let half = (event.timestamp - last.timestamp).num_seconds() / 2;
                last.timestamp += Duration::seconds(half);
            }
            _ => cleaned.push(event),
        }
    }

    cleaned
}
