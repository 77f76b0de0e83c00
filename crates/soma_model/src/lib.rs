//! Simplified periodic lunar phase model.
//!
//! The model reduces the Moon's cycle to two free parameters: a reference
//! new-moon instant and an assumed synodic month length in days. Position
//! within the cycle is a phase value on the ring [0, 1):
//!
//! - 0.00 — new moon
//! - 0.25 — first quarter
//! - 0.50 — full moon
//! - 0.75 — last quarter
//!
//! This trades sub-minute astronomical precision for simplicity; the model
//! is calibrated against reference full-moon data to calendar-day accuracy.
//!
//! All timestamps are `chrono::NaiveDateTime` and mean UTC. The wire format
//! carries no zone suffix, so a zone-free type keeps the contract honest.

pub mod event;
pub mod model;
pub mod phase;

pub use event::MoonEvent;
pub use model::PhaseModel;
pub use phase::{ALL_PHASES, Phase};
