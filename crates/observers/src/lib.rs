//! Recording sinks and reusable observers for actin membrane runs.
//!
//! This crate provides [`Observer`] implementations that consume the states a
//! composite emits and capability traits that let them work with any event
//! carrying a timed monomer state.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for observers ([`HasFrame`],
//!   [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`Recorder`] — keeps every frame in memory
//! - [`JsonLinesEmitter`] — writes one JSON frame per line
//! - [`LogObserver`] — logs particle and topology counts per frame
//!
//! [`Observer`]: actin_core::Observer
//! [`HasFrame`]: traits::HasFrame
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod frame;
mod json_lines;
mod logging;
mod recorder;

pub use frame::Frame;
pub use json_lines::{EmitError, JsonLinesEmitter, read_frames};
pub use logging::LogObserver;
pub use recorder::Recorder;
