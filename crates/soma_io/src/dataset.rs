//! Reference dataset loading for calibration.

use std::fs;
use std::path::Path;

use soma_calib::ReferenceDataset;
use soma_model::Phase;
use tracing::warn;

use crate::error::IoError;
use crate::generate::year_file_path;
use crate::wire::parse_events;

/// Load reference full moons from a static-API tree.
///
/// Expects `<root>/moon-phase-data/<year>/index.json` per year and keeps
/// only full-moon records. A year whose file is missing is simply absent
/// from the dataset; one that cannot be read or parsed is logged and
/// excluded, never fatal.
pub fn load_reference_dataset(
    root: &Path,
    start_year: i32,
    end_year: i32,
) -> Result<ReferenceDataset, IoError> {
    if end_year < start_year {
        return Err(IoError::InvalidYearRange);
    }

    let mut dataset = ReferenceDataset::new();

    for year in start_year..=end_year {
        let path = year_file_path(root, year);
        if !path.exists() {
            continue;
        }

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) => {
                warn!(year, path = %path.display(), %err, "skipping unreadable reference year");
                continue;
            }
        };

        let events = match parse_events(&json) {
            Ok(events) => events,
            Err(err) => {
                warn!(year, path = %path.display(), %err, "skipping unparseable reference year");
                continue;
            }
        };

        let full_moons = events
            .into_iter()
            .filter(|e| e.phase == Phase::FullMoon)
            .map(|e| e.timestamp)
            .collect();
        dataset.insert_year(year, full_moons);
    }

    Ok(dataset)
}
