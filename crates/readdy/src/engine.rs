//! Traits at the seam between the adapter and a reaction-diffusion engine.
//!
//! An engine hands out two resources with different lifetimes:
//!
//! - a long-lived [`Engine::System`] holding particle types, potentials,
//!   reactions, box geometry, and any caches the engine keeps between runs
//! - a short-lived [`Engine::Simulation`] built from that system, loaded with
//!   monomers, stepped, read back, and dropped
//!
//! The adapter owns the system for its whole lifetime and creates a fresh
//! simulation on every update.

use actin_core::{MonomerState, ParticleId};

use crate::{Config, SeededRngs, SimRng};

/// Factory for engine systems and simulations.
pub trait Engine {
    type System: EngineSystem;
    type Simulation: EngineSimulation<Error = Self::Error>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the long-lived system from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the configuration cannot be realized, for
    /// example an unsatisfiable reaction network.
    fn create_system(
        &self,
        config: &Config,
        rngs: &mut SeededRngs,
    ) -> Result<Self::System, Self::Error>;

    /// Builds a fresh simulation on top of an existing system.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the simulation cannot be created.
    fn create_simulation(
        &self,
        system: &mut Self::System,
        config: &Config,
        rngs: &mut SeededRngs,
    ) -> Result<Self::Simulation, Self::Error>;
}

/// Read access to system-level properties the step loop needs.
pub trait EngineSystem {
    /// Largest interaction cutoff over all potentials and reactions.
    fn max_cutoff(&self) -> f64;
}

/// The imperative stepping API of one simulation instance.
///
/// Each method maps to one engine action. Ordering is the caller's job; see
/// [`crate::simulate`].
pub trait EngineSimulation {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Injects a full particle and topology mapping into the simulation.
    fn add_monomers(&mut self, monomers: &MonomerState) -> Result<(), Self::Error>;

    fn initialize_kernel(&mut self) -> Result<(), Self::Error>;

    fn create_neighbor_list(&mut self, cutoff: f64) -> Result<(), Self::Error>;

    fn update_neighbor_list(&mut self) -> Result<(), Self::Error>;

    fn calculate_forces(&mut self) -> Result<(), Self::Error>;

    /// Advances positions by one Euler Brownian dynamics step.
    fn integrate_brownian(&mut self, timestep: f64, rng: &mut SimRng) -> Result<(), Self::Error>;

    /// Runs the uncontrolled-approximation reaction handler for one step.
    fn react(&mut self, timestep: f64, rng: &mut SimRng) -> Result<(), Self::Error>;

    /// Returns the engine's current topologies in engine order.
    fn current_topologies(&self) -> Result<Vec<EngineTopology>, Self::Error>;
}

/// A topology as reported by the engine, with engine particle IDs.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineTopology {
    pub type_name: String,
    pub particles: Vec<EngineParticle>,
}

/// A particle as reported by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineParticle {
    pub id: ParticleId,
    pub type_name: String,
    pub position: [f64; 3],
    pub neighbor_ids: Vec<ParticleId>,
}
