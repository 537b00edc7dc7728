//! A small stand-in for a reaction-diffusion engine.
//!
//! Particles jitter uniformly each integration step and the first topology
//! changes by one monomer at its barbed end with probability
//! `1 - exp(-growth_rate * dt)` per reaction step. It grows by default; a
//! shrinking engine removes the barbed monomer instead, down to one monomer.
//! Every action is appended to a shared call log so tests can check the
//! order and number of engine calls.

use std::{cell::Cell, cell::RefCell, collections::BTreeMap, rc::Rc};

use actin_core::{MonomerState, ParticleId};
use actin_readdy::{
    Config, Engine, EngineParticle, EngineSimulation, EngineSystem, EngineTopology, SeededRngs,
    SimRng,
};
use rand::Rng;
use thiserror::Error;

/// Spacing between a grown monomer and its parent, nm.
const GROWTH_SPACING: f64 = 2.76;

/// IDs skipped per simulation when the engine caches its numbering.
pub const ID_DRIFT: ParticleId = 1000;

/// One engine action, as recorded in the call log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    CreateSystem,
    CreateSimulation,
    AddMonomers,
    InitializeKernel,
    CreateNeighborList(f64),
    UpdateNeighborList,
    CalculateForces,
    Integrate(f64),
    React(f64),
}

/// Failures a test can switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Every reaction step fails.
    React,
    /// The simulation reports no topologies.
    NoTopologies,
}

#[derive(Debug, Error)]
pub enum ToyError {
    #[error("actin box exceeds the simulation box along axis {axis}")]
    ActinBoxOutside { axis: usize },

    #[error("reaction step diverged")]
    Diverged,

    #[error("particle {id} references unknown neighbor {neighbor}")]
    UnknownNeighbor { id: ParticleId, neighbor: ParticleId },
}

/// Shared handles into a [`ToyEngine`].
#[derive(Debug, Clone, Default)]
pub struct Probe {
    calls: Rc<RefCell<Vec<Call>>>,
    fault: Rc<Cell<Option<Fault>>>,
}

impl Probe {
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Counts logged calls matching a predicate.
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| pred(call)).count()
    }

    pub fn set_fault(&self, fault: Option<Fault>) {
        self.fault.set(fault);
    }

    fn log(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

/// Builds [`ToySystem`]s and [`ToySimulation`]s.
#[derive(Debug, Clone)]
pub struct ToyEngine {
    pub growth_rate: f64,
    pub jitter: f64,
    /// Continue particle numbering across simulations built on one system.
    pub id_drift: bool,
    /// Remove barbed-end monomers instead of adding them.
    pub shrinking: bool,
    /// Values drawn from each generator while a simulation is set up.
    pub setup_draws: usize,
    probe: Probe,
}

impl Default for ToyEngine {
    fn default() -> Self {
        Self {
            growth_rate: 1.0,
            jitter: 0.5,
            id_drift: false,
            shrinking: false,
            setup_draws: 0,
            probe: Probe::default(),
        }
    }
}

impl ToyEngine {
    #[must_use]
    pub fn with_growth_rate(mut self, growth_rate: f64) -> Self {
        self.growth_rate = growth_rate;
        self
    }

    #[must_use]
    pub fn shrinking(mut self) -> Self {
        self.shrinking = true;
        self
    }

    /// Draws from both generators during setup, as an engine sampling
    /// initial velocities would.
    #[must_use]
    pub fn with_setup_draws(mut self, draws: usize) -> Self {
        self.setup_draws = draws;
        self
    }

    #[must_use]
    pub fn with_id_drift(mut self) -> Self {
        self.id_drift = true;
        self
    }

    #[must_use]
    pub fn probe(&self) -> Probe {
        self.probe.clone()
    }
}

/// Long-lived engine state.
#[derive(Debug)]
pub struct ToySystem {
    max_cutoff: f64,
    id_cursor: ParticleId,
}

impl EngineSystem for ToySystem {
    fn max_cutoff(&self) -> f64 {
        self.max_cutoff
    }
}

#[derive(Debug, Clone)]
struct ToyParticle {
    type_name: String,
    position: [f64; 3],
    neighbors: Vec<ParticleId>,
}

/// One simulation instance.
#[derive(Debug)]
pub struct ToySimulation {
    id_base: ParticleId,
    next_id: ParticleId,
    particles: BTreeMap<ParticleId, ToyParticle>,
    topologies: Vec<(String, Vec<ParticleId>)>,
    growth_rate: f64,
    jitter: f64,
    shrinking: bool,
    probe: Probe,
}

impl Engine for ToyEngine {
    type System = ToySystem;
    type Simulation = ToySimulation;
    type Error = ToyError;

    fn create_system(
        &self,
        config: &Config,
        _rngs: &mut SeededRngs,
    ) -> Result<ToySystem, ToyError> {
        self.probe.log(Call::CreateSystem);
        if config.use_box_actin {
            let actin = config.actin_box_size();
            if let Some(axis) = (0..3).find(|&axis| actin[axis] > config.box_size[axis]) {
                return Err(ToyError::ActinBoxOutside { axis });
            }
        }

        Ok(ToySystem {
            max_cutoff: config
                .reaction_distance
                .max(config.binding_site_reaction_distance),
            id_cursor: 0,
        })
    }

    fn create_simulation(
        &self,
        system: &mut ToySystem,
        _config: &Config,
        rngs: &mut SeededRngs,
    ) -> Result<ToySimulation, ToyError> {
        self.probe.log(Call::CreateSimulation);
        if self.id_drift {
            system.id_cursor += ID_DRIFT;
        }
        for _ in 0..self.setup_draws {
            rngs.general.r#gen::<u64>();
            rngs.numeric.r#gen::<u64>();
        }

        Ok(ToySimulation {
            id_base: system.id_cursor,
            next_id: system.id_cursor,
            particles: BTreeMap::new(),
            topologies: Vec::new(),
            growth_rate: self.growth_rate,
            jitter: self.jitter,
            shrinking: self.shrinking,
            probe: self.probe.clone(),
        })
    }
}

impl EngineSimulation for ToySimulation {
    type Error = ToyError;

    fn add_monomers(&mut self, monomers: &MonomerState) -> Result<(), ToyError> {
        self.probe.log(Call::AddMonomers);
        let base = self.id_base;
        let engine_id = |key: ParticleId| base + key;

        for (&key, particle) in &monomers.particles {
            let neighbors = particle
                .neighbor_ids
                .iter()
                .map(|&neighbor| {
                    if monomers.particles.contains_key(&neighbor) {
                        Ok(engine_id(neighbor))
                    } else {
                        Err(ToyError::UnknownNeighbor { id: key, neighbor })
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;

            self.particles.insert(
                engine_id(key),
                ToyParticle {
                    type_name: particle.type_name.clone(),
                    position: particle.position,
                    neighbors,
                },
            );
        }

        for topology in monomers.topologies.values() {
            let ids = topology.particle_ids.iter().map(|&p| engine_id(p)).collect();
            self.topologies.push((topology.type_name.clone(), ids));
        }

        self.next_id = self
            .particles
            .keys()
            .next_back()
            .map_or(self.id_base, |id| id + 1);
        Ok(())
    }

    fn initialize_kernel(&mut self) -> Result<(), ToyError> {
        self.probe.log(Call::InitializeKernel);
        Ok(())
    }

    fn create_neighbor_list(&mut self, cutoff: f64) -> Result<(), ToyError> {
        self.probe.log(Call::CreateNeighborList(cutoff));
        Ok(())
    }

    fn update_neighbor_list(&mut self) -> Result<(), ToyError> {
        self.probe.log(Call::UpdateNeighborList);
        Ok(())
    }

    fn calculate_forces(&mut self) -> Result<(), ToyError> {
        self.probe.log(Call::CalculateForces);
        Ok(())
    }

    fn integrate_brownian(&mut self, timestep: f64, rng: &mut SimRng) -> Result<(), ToyError> {
        self.probe.log(Call::Integrate(timestep));
        for particle in self.particles.values_mut() {
            for coordinate in &mut particle.position {
                *coordinate += (rng.r#gen::<f64>() - 0.5) * self.jitter;
            }
        }
        Ok(())
    }

    fn react(&mut self, timestep: f64, rng: &mut SimRng) -> Result<(), ToyError> {
        self.probe.log(Call::React(timestep));
        if self.probe.fault.get() == Some(Fault::React) {
            return Err(ToyError::Diverged);
        }

        let probability = 1.0 - (-self.growth_rate * timestep).exp();
        if rng.r#gen::<f64>() >= probability {
            return Ok(());
        }

        let Some((_, members)) = self.topologies.first_mut() else {
            return Ok(());
        };
        let Some(&barbed) = members.last() else {
            return Ok(());
        };

        if self.shrinking {
            if members.len() <= 1 {
                return Ok(());
            }
            members.pop();
            self.particles.remove(&barbed);
            if let Some(end) = members.last().and_then(|id| self.particles.get_mut(id)) {
                end.neighbors.retain(|&neighbor| neighbor != barbed);
            }
            return Ok(());
        }

        let Some(parent) = self.particles.get_mut(&barbed) else {
            return Ok(());
        };
        let id = self.next_id;
        self.next_id += 1;
        parent.neighbors.push(id);
        let mut position = parent.position;
        position[0] += GROWTH_SPACING;

        self.particles.insert(
            id,
            ToyParticle {
                type_name: "actin#barbed_ATP_1".into(),
                position,
                neighbors: vec![barbed],
            },
        );
        members.push(id);
        Ok(())
    }

    fn current_topologies(&self) -> Result<Vec<EngineTopology>, ToyError> {
        if self.probe.fault.get() == Some(Fault::NoTopologies) {
            return Ok(Vec::new());
        }

        let topologies = self
            .topologies
            .iter()
            .map(|(type_name, members)| EngineTopology {
                type_name: type_name.clone(),
                particles: members
                    .iter()
                    .map(|id| {
                        let particle = &self.particles[id];
                        EngineParticle {
                            id: *id,
                            type_name: particle.type_name.clone(),
                            position: particle.position,
                            neighbor_ids: particle.neighbors.clone(),
                        }
                    })
                    .collect(),
            })
            .collect();
        Ok(topologies)
    }
}
