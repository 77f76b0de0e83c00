//! Static-API tree generation.

use std::path::{Path, PathBuf};

use soma_model::PhaseModel;
use soma_search::{SearchConfig, calculate_year};
use tracing::{info, warn};

use crate::error::IoError;
use crate::wire::write_year_events;

/// Path of one year file inside a static-API tree.
pub fn year_file_path(root: &Path, year: i32) -> PathBuf {
    root.join("moon-phase-data")
        .join(year.to_string())
        .join("index.json")
}

/// Compute and write the per-year event files for `[start_year, end_year]`.
///
/// Each year is computed with the given model and search configuration and
/// written to `<root>/moon-phase-data/<year>/index.json`. A year that fails
/// to compute or write is logged and skipped; the remaining years still run.
/// Returns the number of year files written.
pub fn generate_api(
    model: &PhaseModel,
    config: &SearchConfig,
    start_year: i32,
    end_year: i32,
    root: &Path,
) -> Result<usize, IoError> {
    if end_year < start_year {
        return Err(IoError::InvalidYearRange);
    }

    let mut written = 0;

    for year in start_year..=end_year {
        let events = match calculate_year(model, year, config) {
            Ok(events) => events,
            Err(err) => {
                warn!(year, %err, "skipping year: event search failed");
                continue;
            }
        };

        let path = year_file_path(root, year);
        match write_year_events(&path, &events) {
            Ok(()) => {
                info!(year, events = events.len(), path = %path.display(), "wrote year file");
                written += 1;
            }
            Err(err) => {
                warn!(year, path = %path.display(), %err, "skipping year: write failed");
            }
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use soma_model::Phase;

    use super::*;
    use crate::dataset::load_reference_dataset;
    use crate::wire::read_year_events;

    #[test]
    fn year_path_layout() {
        let path = year_file_path(Path::new("/api"), 2025);
        assert_eq!(path, Path::new("/api/moon-phase-data/2025/index.json"));
    }

    #[test]
    fn generates_readable_year_files() {
        let root =
            std::env::temp_dir().join(format!("soma_generate_{}", std::process::id()));
        let model = PhaseModel::calibrated();
        let config = SearchConfig::calibrated();

        let written = generate_api(&model, &config, 2024, 2025, &root).unwrap();
        assert_eq!(written, 2);

        let events = read_year_events(&year_file_path(&root, 2025)).unwrap();
        assert!((48..=50).contains(&events.len()));

        // The generated tree doubles as a reference dataset.
        let dataset = load_reference_dataset(&root, 2024, 2025).unwrap();
        let fulls = dataset.full_moons(2025).unwrap();
        assert_eq!(
            fulls.len(),
            events.iter().filter(|e| e.phase == Phase::FullMoon).count()
        );

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn rejects_inverted_range() {
        let root = std::env::temp_dir().join("soma_generate_inverted");
        let model = PhaseModel::calibrated();
        let config = SearchConfig::calibrated();
        assert!(matches!(
            generate_api(&model, &config, 2025, 2024, &root),
            Err(IoError::InvalidYearRange)
        ));
    }

    #[test]
    fn unrepresentable_year_is_skipped() {
        let root =
            std::env::temp_dir().join(format!("soma_generate_skip_{}", std::process::id()));
        let model = PhaseModel::calibrated();
        let config = SearchConfig::calibrated();

        // chrono cannot represent year 300000; the scan errors, the year is
        // skipped, and the count reflects zero written files.
        let written = generate_api(&model, &config, 300_000, 300_000, &root).unwrap();
        assert_eq!(written, 0);
    }
}
