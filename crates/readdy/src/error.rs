use std::error::Error as StdError;

use actin_core::{ParticleId, StateError};
use thiserror::Error;

use crate::ConfigError;

/// Errors raised by the actin membrane adapter.
///
/// Every variant is fatal to the current run. Engine and state-consistency
/// failures also leave the adapter unusable until it is rebuilt.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("interval must be finite and non-negative, got {interval}")]
    InvalidInterval { interval: f64 },

    #[error("engine error: {0}")]
    Engine(#[source] Box<dyn StdError + Send + Sync>),

    #[error("monomer generator error: {0}")]
    Generator(#[source] Box<dyn StdError + Send + Sync>),

    #[error("invalid monomer state: {0}")]
    State(#[from] StateError),

    #[error("engine reported no topologies to read the id offset from")]
    NoTopologies,

    #[error("first topology reported by the engine has no particles")]
    EmptyFirstTopology,

    #[error("particle id {id} is below the id offset {offset}")]
    IdBelowOffset { id: ParticleId, offset: ParticleId },

    #[error("engine reported particle {id} in more than one place")]
    DuplicateParticle { id: ParticleId },

    #[error("engine handle is unusable after a failed update; rebuild the adapter")]
    Poisoned,
}

impl Error {
    pub(crate) fn engine<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Engine(Box::new(err))
    }

    pub(crate) fn generator<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Generator(Box::new(err))
    }

    /// Whether the failure leaves the engine handle unusable.
    #[must_use]
    pub fn poisons(&self) -> bool {
        matches!(
            self,
            Self::Engine(_)
                | Self::NoTopologies
                | Self::EmptyFirstTopology
                | Self::IdBelowOffset { .. }
                | Self::DuplicateParticle { .. }
                | Self::Poisoned
        )
    }
}
