//! Wire-format and file layer.
//!
//! The sole data contract between the engine and the outside world is an
//! array of `{ "Date": "YYYY-MM-DDTHH:MM:SS", "Phase": 0..3 }` records per
//! year, stored as `<root>/moon-phase-data/<year>/index.json`. This crate
//! reads and writes that shape, loads reference datasets for calibration,
//! and generates the static per-year file tree from a model.
//!
//! Robustness policy: a malformed individual record is dropped at the parse
//! boundary without aborting its batch; a missing or unparseable year file
//! is logged and excluded without failing the run.

pub mod dataset;
pub mod error;
pub mod generate;
pub mod wire;

pub use dataset::load_reference_dataset;
pub use error::IoError;
pub use generate::{generate_api, year_file_path};
pub use wire::{format_events, parse_events, read_year_events, write_year_events};
