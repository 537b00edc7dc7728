//! Test doubles shared by the integration tests.
//!
//! - [`toy_engine`] — a deterministic stand-in for a reaction-diffusion
//!   engine, with a call log and switchable faults
//! - [`toy_generator`] — straight filaments and square membrane patches

pub mod toy_engine;
pub mod toy_generator;
