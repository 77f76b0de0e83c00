//! The per-year event array wire format.

use std::fs;
use std::path::Path;

use serde_json::Value;
use soma_model::MoonEvent;
use tracing::debug;

use crate::error::IoError;

/// Parse a wire-format event array.
///
/// The outer document must be a JSON array; individual records that fail to
/// parse (bad date, out-of-range phase) are dropped silently apart from a
/// debug trace, per the boundary policy.
pub fn parse_events(json: &str) -> Result<Vec<MoonEvent>, IoError> {
    let records: Vec<Value> = serde_json::from_str(json)?;
    let mut events = Vec::with_capacity(records.len());

    for record in records {
        match serde_json::from_value::<MoonEvent>(record) {
            Ok(event) => events.push(event),
            Err(err) => debug!(%err, "dropping malformed event record"),
        }
    }

    Ok(events)
}

/// Render an event list as a wire-format document, one record per line,
/// preserving the given (chronological) order.
pub fn format_events(events: &[MoonEvent]) -> Result<String, IoError> {
    let mut out = String::from("[\n");

    for (i, event) in events.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        out.push_str("  ");
        out.push_str(&serde_json::to_string(event)?);
    }

    out.push_str("\n]\n");
    Ok(out)
}

/// Read and parse one year file.
pub fn read_year_events(path: &Path) -> Result<Vec<MoonEvent>, IoError> {
    parse_events(&fs::read_to_string(path)?)
}

/// Write one year file, creating parent directories as needed.
pub fn write_year_events(path: &Path, events: &[MoonEvent]) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format_events(events)?)?;
    Ok(())
}
