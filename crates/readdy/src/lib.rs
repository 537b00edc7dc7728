//! A stepped process that drives a ReaDDy-style actin membrane model.
//!
//! The physics lives behind the [`Engine`] traits; this crate owns the
//! configuration, the per-update rebuild and inner-step loop, deterministic
//! seeding, and the correction of engine particle IDs before state is handed
//! back to the host.
//!
//! - [`ReaddyActinMembrane`] — the [`actin_core::Process`] implementation
//! - [`Config`] — the flat, fully defaulted model configuration
//! - [`Engine`], [`EngineSystem`], [`EngineSimulation`] — the engine seam
//! - [`MonomerGenerator`], [`initial_monomers`] — initial state assembly
//! - [`simulate`], [`inner_step_count`] — the inner-step loop
//! - [`id_offset`], [`current_monomers`] — ID correction
//!
//! # Example
//!
//! ```ignore
//! use actin_core::Process;
//! use actin_readdy::{Config, ReaddyActinMembrane};
//!
//! let mut process = ReaddyActinMembrane::new(Config::default(), engine, generator)?;
//! let state = process.initial_state()?;
//! let next = process.update(&state, 1.0)?;
//! ```

mod config;
mod engine;
mod error;
mod ids;
mod monomers;
mod process;
mod rng;
mod simulate;

pub use config::{Config, ConfigError};
pub use engine::{Engine, EngineParticle, EngineSimulation, EngineSystem, EngineTopology};
pub use error::Error;
pub use ids::{current_monomers, id_offset};
pub use monomers::{
    FREE_ACTIN_TOPOLOGY, FREE_ACTIN_TYPE, FiberData, FiberOptions, FixedMonomers, InitialLayout,
    MembranePatch, MonomerGenerator, free_actin_count, free_actin_monomers, initial_monomers,
};
pub use process::{ReaddyActinMembrane, StepReport};
pub use rng::{SeededRngs, SimRng};
pub use simulate::{inner_step_count, simulate};
