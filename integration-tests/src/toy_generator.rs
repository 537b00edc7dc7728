//! Straight filaments and square membrane patches.
//!
//! Filament monomers are laid along each fiber's control points at a fixed
//! spacing and bonded in a chain, pointed end first. Membrane particles sit on
//! a square grid in the patch's flat plane, bonded to their grid neighbors.

use actin_core::{MonomerState, Particle, ParticleId, Topology, TopologyId};
use actin_readdy::{FiberData, FiberOptions, FixedMonomers, MembranePatch, MonomerGenerator};
use thiserror::Error;

/// Distance between consecutive filament monomers, nm.
pub const MONOMER_SPACING: f64 = 2.76;

#[derive(Debug, Error)]
pub enum ToyGeneratorError {
    #[error("fiber {fiber} needs at least two control points")]
    TooFewPoints { fiber: u32 },

    #[error("membrane particle radius must be positive, got {radius}")]
    BadRadius { radius: f64 },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ToyGenerator;

impl MonomerGenerator for ToyGenerator {
    type Error = ToyGeneratorError;

    fn fiber_monomers(
        &self,
        fibers: &[FiberData],
        _options: &FiberOptions,
    ) -> Result<MonomerState, ToyGeneratorError> {
        let mut state = MonomerState::new();
        let mut next_id: ParticleId = 0;

        for (topology_id, fiber) in (0..).zip(fibers) {
            let positions = chain_positions(fiber)?;
            let count = positions.len() as u64;
            let first = next_id;
            let last = first + count - 1;

            for (id, position) in (first..).zip(positions) {
                let mut neighbor_ids = Vec::with_capacity(2);
                if id > first {
                    neighbor_ids.push(id - 1);
                }
                if id < last {
                    neighbor_ids.push(id + 1);
                }
                let number = (id - first) % 3 + 1;
                let type_name = if id == first {
                    format!("actin#pointed_ATP_{number}")
                } else if id == last {
                    format!("actin#barbed_ATP_{number}")
                } else {
                    format!("actin#ATP_{number}")
                };
                state.particles.insert(
                    id,
                    Particle {
                        type_name,
                        position,
                        neighbor_ids,
                    },
                );
            }

            state.topologies.insert(
                topology_id,
                Topology {
                    type_name: fiber.type_name.clone(),
                    particle_ids: (first..=last).collect(),
                },
            );
            next_id = last + 1;
        }
        Ok(state)
    }

    fn setup_fixed_monomers(
        &self,
        mut monomers: MonomerState,
        fixed: &FixedMonomers,
    ) -> Result<MonomerState, ToyGeneratorError> {
        for topology in monomers.topologies.values() {
            let ids = &topology.particle_ids;
            let pointed = ids.iter().take(fixed.n_pointed);
            let barbed = ids.iter().rev().take(fixed.n_barbed);
            for id in pointed.chain(barbed) {
                if let Some(particle) = monomers.particles.get_mut(id) {
                    if !particle.type_name.starts_with("actin#fixed_") {
                        particle.type_name = particle.type_name.replacen("actin#", "actin#fixed_", 1);
                    }
                }
            }
        }
        Ok(monomers)
    }

    fn membrane_monomers(
        &self,
        patch: &MembranePatch,
        start_particle_id: ParticleId,
        start_topology_id: TopologyId,
    ) -> Result<MonomerState, ToyGeneratorError> {
        let radius = patch.particle_radius;
        if !(radius > 0.0) {
            return Err(ToyGeneratorError::BadRadius { radius });
        }

        // The thinnest axis is the patch normal; the other two span the grid.
        let normal = (0..3)
            .min_by(|&a, &b| patch.size[a].total_cmp(&patch.size[b]))
            .unwrap_or(0);
        let [u, v] = match normal {
            0 => [1, 2],
            1 => [0, 2],
            _ => [0, 1],
        };
        let spacing = 2.0 * radius;
        let cells = |axis: usize| ((patch.size[axis] / spacing).floor() as u64).max(1);
        let (nu, nv) = (cells(u), cells(v));

        let id_of = |i: u64, j: u64| start_particle_id + i * nv + j;
        let mut state = MonomerState::new();
        for i in 0..nu {
            for j in 0..nv {
                let mut position = patch.center;
                position[u] += (i as f64 + 0.5) * spacing - patch.size[u] / 2.0;
                position[v] += (j as f64 + 0.5) * spacing - patch.size[v] / 2.0;

                let mut neighbor_ids = Vec::with_capacity(4);
                if i > 0 {
                    neighbor_ids.push(id_of(i - 1, j));
                }
                if i + 1 < nu {
                    neighbor_ids.push(id_of(i + 1, j));
                }
                if j > 0 {
                    neighbor_ids.push(id_of(i, j - 1));
                }
                if j + 1 < nv {
                    neighbor_ids.push(id_of(i, j + 1));
                }
                let type_name = if neighbor_ids.len() < 4 {
                    "membrane#edge"
                } else {
                    "membrane#inner"
                };

                state.particles.insert(
                    id_of(i, j),
                    Particle {
                        type_name: type_name.into(),
                        position,
                        neighbor_ids,
                    },
                );
            }
        }

        state.topologies.insert(
            start_topology_id,
            Topology {
                type_name: "Membrane".into(),
                particle_ids: (start_particle_id..start_particle_id + nu * nv).collect(),
            },
        );
        Ok(state)
    }
}

/// Monomer positions along a fiber's polyline, from its first point.
fn chain_positions(fiber: &FiberData) -> Result<Vec<[f64; 3]>, ToyGeneratorError> {
    if fiber.points.len() < 2 {
        return Err(ToyGeneratorError::TooFewPoints { fiber: fiber.id });
    }

    let mut positions = vec![fiber.points[0]];
    let mut carried = 0.0;
    for segment in fiber.points.windows(2) {
        let [start, end] = [segment[0], segment[1]];
        let delta: [f64; 3] = std::array::from_fn(|axis| end[axis] - start[axis]);
        let length = delta.iter().map(|d| d * d).sum::<f64>().sqrt();
        if length == 0.0 {
            continue;
        }

        let mut along = MONOMER_SPACING - carried;
        while along <= length {
            let t = along / length;
            positions.push(std::array::from_fn(|axis| start[axis] + t * delta[axis]));
            along += MONOMER_SPACING;
        }
        carried = length - (along - MONOMER_SPACING);
    }
    Ok(positions)
}
