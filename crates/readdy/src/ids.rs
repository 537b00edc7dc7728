//! Engine-to-framework ID correction.
//!
//! An engine that is reused across runs may keep numbering particles from
//! where the previous run stopped. Passing those IDs through would make the
//! host treat every particle as new. The offset is read from the first
//! particle of the first topology and subtracted from every ID on the way
//! out. With a well-behaved engine the offset is zero and the correction is
//! a no-op.

use actin_core::{MonomerState, Particle, ParticleId, Topology, TopologyId};

use crate::{EngineTopology, Error};

/// Returns the ID of the first particle of the first topology.
///
/// # Errors
///
/// Returns [`Error::NoTopologies`] or [`Error::EmptyFirstTopology`] when
/// there is no particle to read the offset from.
pub fn id_offset(topologies: &[EngineTopology]) -> Result<ParticleId, Error> {
    let first = topologies.first().ok_or(Error::NoTopologies)?;
    let particle = first.particles.first().ok_or(Error::EmptyFirstTopology)?;
    Ok(particle.id)
}

/// Converts engine topologies into a framework mapping, shifting every
/// particle ID down by `offset`.
///
/// Topologies are keyed by their position in the engine's list. Particles
/// that belong to no topology are not reported by the engine and therefore
/// do not appear.
///
/// # Errors
///
/// Returns [`Error::IdBelowOffset`] if any particle or neighbor ID is smaller
/// than `offset`, or [`Error::DuplicateParticle`] if the engine reports one
/// particle ID twice.
pub fn current_monomers(
    topologies: &[EngineTopology],
    offset: ParticleId,
) -> Result<MonomerState, Error> {
    let shift = |id: ParticleId| {
        id.checked_sub(offset)
            .ok_or(Error::IdBelowOffset { id, offset })
    };

    let mut state = MonomerState::new();
    for (index, topology) in topologies.iter().enumerate() {
        let mut particle_ids = Vec::with_capacity(topology.particles.len());
        for particle in &topology.particles {
            let id = shift(particle.id)?;
            let neighbor_ids = particle
                .neighbor_ids
                .iter()
                .map(|&neighbor| shift(neighbor))
                .collect::<Result<Vec<_>, _>>()?;

            particle_ids.push(id);
            let record = Particle {
                type_name: particle.type_name.clone(),
                position: particle.position,
                neighbor_ids,
            };
            if state.particles.insert(id, record).is_some() {
                return Err(Error::DuplicateParticle { id: particle.id });
            }
        }

        state.topologies.insert(
            index as TopologyId,
            Topology {
                type_name: topology.type_name.clone(),
                particle_ids,
            },
        );
    }

    Ok(state)
}
