use std::collections::BTreeMap;

use actin_core::{MonomerState, Particle, ParticleId, Topology, TopologyId};
use serde::{Deserialize, Serialize};

use crate::traits::HasFrame;

/// One recorded `{particles, topologies, global_time}` snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub global_time: f64,
    pub particles: BTreeMap<ParticleId, Particle>,
    pub topologies: BTreeMap<TopologyId, Topology>,
}

impl Frame {
    /// Copies the state out of an event.
    pub fn from_event<E: HasFrame>(event: &E) -> Self {
        let monomers = event.monomers();
        Self {
            global_time: event.global_time(),
            particles: monomers.particles.clone(),
            topologies: monomers.topologies.clone(),
        }
    }

    /// Returns the frame's state without its time.
    #[must_use]
    pub fn into_monomers(self) -> MonomerState {
        MonomerState {
            particles: self.particles,
            topologies: self.topologies,
        }
    }
}

/// Borrowed form of [`Frame`] for serializing without copying the state.
#[derive(Serialize)]
pub(crate) struct FrameRef<'a> {
    pub global_time: f64,
    pub particles: &'a BTreeMap<ParticleId, Particle>,
    pub topologies: &'a BTreeMap<TopologyId, Topology>,
}

impl<'a> FrameRef<'a> {
    pub(crate) fn from_event<E: HasFrame>(event: &'a E) -> Self {
        let monomers = event.monomers();
        Self {
            global_time: event.global_time(),
            particles: &monomers.particles,
            topologies: &monomers.topologies,
        }
    }
}
