//! Phase-crossing event search engine.
//!
//! Enumerates the instants at which a [`soma_model::PhaseModel`] crosses the
//! four principal phase targets inside a time window.
//!
//! Algorithm: coarse grid walk over the window; any grid point whose phase
//! distance to a target falls within the model tolerance triggers a local
//! fine scan around it, keeping the distance minimum. Hits are sorted and
//! adjacent same-phase detections of one physical crossing are merged to
//! their midpoint. Pure computation, no I/O; identical inputs give
//! identical output.

pub mod error;
pub mod year;
pub mod year_types;

pub use error::SearchError;
pub use year::{calculate_year, events_for_phase, search_events};
pub use year_types::SearchConfig;
