use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Framework-assigned key of a particle, unique within one mapping.
pub type ParticleId = u64;

/// Framework-assigned key of a topology, unique within one mapping.
pub type TopologyId = u64;

/// A single particle record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub type_name: String,
    pub position: [f64; 3],
    pub neighbor_ids: Vec<ParticleId>,
}

/// A bonded structure such as a filament or a membrane patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub type_name: String,
    pub particle_ids: Vec<ParticleId>,
}

/// The `{particles, topologies}` mapping exchanged with a host.
///
/// Maps are ordered by key so that iteration, serialization, and equality
/// are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonomerState {
    pub particles: BTreeMap<ParticleId, Particle>,
    pub topologies: BTreeMap<TopologyId, Topology>,
}

/// Errors raised when a [`MonomerState`] is malformed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("particle {id} appears in both states being merged")]
    DuplicateParticle { id: ParticleId },

    #[error("topology {id} appears in both states being merged")]
    DuplicateTopology { id: TopologyId },

    #[error("topology {topology} references missing particle {particle}")]
    MissingTopologyParticle {
        topology: TopologyId,
        particle: ParticleId,
    },

    #[error("particle {particle} has missing neighbor {neighbor}")]
    MissingNeighbor {
        particle: ParticleId,
        neighbor: ParticleId,
    },

    #[error("particle {id} has a non-finite position {position:?}")]
    NonFinitePosition { id: ParticleId, position: [f64; 3] },
}

impl MonomerState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of particles.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Returns the number of topologies.
    #[must_use]
    pub fn topology_count(&self) -> usize {
        self.topologies.len()
    }

    /// Returns the smallest particle key, or `None` for an empty state.
    #[must_use]
    pub fn min_particle_id(&self) -> Option<ParticleId> {
        self.particles.keys().next().copied()
    }

    /// Combines two states whose keys must not overlap.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first particle or topology key present in
    /// both states.
    pub fn merge(mut self, other: MonomerState) -> Result<Self, StateError> {
        for (id, particle) in other.particles {
            if self.particles.insert(id, particle).is_some() {
                return Err(StateError::DuplicateParticle { id });
            }
        }
        for (id, topology) in other.topologies {
            if self.topologies.insert(id, topology).is_some() {
                return Err(StateError::DuplicateTopology { id });
            }
        }
        Ok(self)
    }

    /// Checks that the state conforms to the particle and topology schemas.
    ///
    /// Every topology member and every neighbor must be an existing particle
    /// key, and every position must be finite.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, scanning particles before
    /// topologies in key order.
    pub fn validate(&self) -> Result<(), StateError> {
        for (&id, particle) in &self.particles {
            if particle.position.iter().any(|c| !c.is_finite()) {
                return Err(StateError::NonFinitePosition {
                    id,
                    position: particle.position,
                });
            }
            if let Some(&neighbor) = particle
                .neighbor_ids
                .iter()
                .find(|n| !self.particles.contains_key(n))
            {
                return Err(StateError::MissingNeighbor {
                    particle: id,
                    neighbor,
                });
            }
        }

        for (&id, topology) in &self.topologies {
            if let Some(&particle) = topology
                .particle_ids
                .iter()
                .find(|p| !self.particles.contains_key(p))
            {
                return Err(StateError::MissingTopologyParticle {
                    topology: id,
                    particle,
                });
            }
        }

        Ok(())
    }
}
