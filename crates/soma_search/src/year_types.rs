//! Types for the year scan.

/// Configuration for the coarse-scan + refinement event search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Coarse grid step in hours.
    pub coarse_step_hours: i64,
    /// Fine scan step in minutes.
    pub refine_step_minutes: i64,
    /// Fine scan half-window in days around a coarse trigger.
    pub refine_window_days: i64,
    /// Padding in days on both sides of the year boundary. Catches crossings
    /// that sit just outside the strict year in the coarse grid but round
    /// into it after refinement.
    pub pad_days: i64,
    /// Two same-phase detections closer than this many hours collapse to
    /// their midpoint.
    pub merge_window_hours: i64,
}

impl SearchConfig {
    /// The calibrated production configuration: 3-hour coarse grid, 1-hour
    /// refinement over ±1 day, 2-day boundary pad, 6-hour merge window.
    pub fn calibrated() -> Self {
        Self {
            coarse_step_hours: 3,
            refine_step_minutes: 60,
            refine_window_days: 1,
            pad_days: 2,
            merge_window_hours: 6,
        }
    }

    /// Coarser 6-hour grid with no boundary pad. Roughly twice as fast and
    /// may miss or shift crossings near the year boundary; the calibrated
    /// variant is the one the default model parameters were fitted with.
    pub fn fast() -> Self {
        Self {
            coarse_step_hours: 6,
            refine_step_minutes: 60,
            refine_window_days: 1,
            pad_days: 0,
            merge_window_hours: 6,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.coarse_step_hours <= 0 {
            return Err("coarse_step_hours must be positive");
        }
        if self.refine_step_minutes <= 0 {
            return Err("refine_step_minutes must be positive");
        }
        if self.refine_window_days <= 0 {
            return Err("refine_window_days must be positive");
        }
        if self.pad_days < 0 {
            return Err("pad_days must not be negative");
        }
        if self.merge_window_hours < 0 {
            return Err("merge_window_hours must not be negative");
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::calibrated()
    }
}
