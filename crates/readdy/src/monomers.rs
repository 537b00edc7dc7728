//! Initial monomer layout.
//!
//! The initial state combines three sources, each numbered after the last:
//!
//! 1. filaments built by a [`MonomerGenerator`], with fixed seed monomers
//! 2. a membrane patch from the same generator, when the config enables it
//! 3. free ATP-actin monomers scattered uniformly through the actin box

use actin_core::{MonomerState, Particle, ParticleId, Topology, TopologyId};
use rand::Rng;

use crate::{Config, Error, SimRng};

/// Avogadro's number, 1/mol.
const AVOGADRO: f64 = 6.022e23;

/// Converts µM · nm³ to a particle count.
const MICROMOLAR_NM3_TO_COUNT: f64 = 1e-30 * AVOGADRO;

pub const FREE_ACTIN_TYPE: &str = "actin#free_ATP";
pub const FREE_ACTIN_TOPOLOGY: &str = "Actin-Monomer-ATP";

/// A filament to generate, described by its control points.
#[derive(Debug, Clone, PartialEq)]
pub struct FiberData {
    pub id: u32,
    pub points: Vec<[f64; 3]>,
    pub type_name: String,
}

/// Options applied to every generated filament.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiberOptions {
    /// Direction the first monomer's normal points along.
    pub start_normal: [f64; 3],
    pub longitudinal_bonds: bool,
    pub barbed_binding_site: bool,
}

/// Which filament monomers are pinned in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMonomers {
    pub orthogonal_seed: bool,
    pub n_pointed: usize,
    pub n_barbed: usize,
}

/// A flat membrane patch of close-packed particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MembranePatch {
    pub center: [f64; 3],
    pub size: [f64; 3],
    pub particle_radius: f64,
}

/// Builds filament and membrane monomers with correct bonded topology.
///
/// Implementations own the biology: monomer types, bond geometry, and
/// neighbor links. Returned states must be internally consistent (see
/// [`MonomerState::validate`]).
pub trait MonomerGenerator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generates filaments with particle IDs starting at 0.
    fn fiber_monomers(
        &self,
        fibers: &[FiberData],
        options: &FiberOptions,
    ) -> Result<MonomerState, Self::Error>;

    /// Marks the configured number of pointed and barbed end monomers fixed.
    fn setup_fixed_monomers(
        &self,
        monomers: MonomerState,
        fixed: &FixedMonomers,
    ) -> Result<MonomerState, Self::Error>;

    /// Generates a membrane patch numbered from the given starting IDs.
    fn membrane_monomers(
        &self,
        patch: &MembranePatch,
        start_particle_id: ParticleId,
        start_topology_id: TopologyId,
    ) -> Result<MonomerState, Self::Error>;
}

/// The parts of the initial state that are not process configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialLayout {
    pub fibers: Vec<FiberData>,
    pub start_normal: [f64; 3],
    pub fixed: FixedMonomers,
    /// Free ATP-actin concentration in µM.
    pub free_actin_concentration: f64,
}

impl Default for InitialLayout {
    fn default() -> Self {
        Self {
            fibers: vec![FiberData {
                id: 28,
                points: vec![[-25.0, 0.0, 0.0], [25.0, 0.0, 0.0]],
                type_name: "Actin-Polymer".into(),
            }],
            start_normal: [0.0, 1.0, 0.0],
            fixed: FixedMonomers {
                orthogonal_seed: true,
                n_pointed: 3,
                n_barbed: 0,
            },
            free_actin_concentration: 500.0,
        }
    }
}

/// Number of monomers at `concentration` (µM) in a box of edge lengths `size` (nm).
#[must_use]
pub fn free_actin_count(concentration: f64, size: [f64; 3]) -> usize {
    let volume = size.iter().product::<f64>();
    let count = (concentration * MICROMOLAR_NM3_TO_COUNT * volume).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = count.max(0.0) as usize;
    count
}

/// Scatters free ATP-actin monomers uniformly through a box.
///
/// Each monomer is its own single-particle topology.
pub fn free_actin_monomers(
    concentration: f64,
    center: [f64; 3],
    size: [f64; 3],
    start_particle_id: ParticleId,
    start_topology_id: TopologyId,
    rng: &mut SimRng,
) -> MonomerState {
    let mut state = MonomerState::new();
    for i in 0..free_actin_count(concentration, size) as u64 {
        let position = std::array::from_fn(|axis| {
            center[axis] + (rng.r#gen::<f64>() - 0.5) * size[axis]
        });
        let id = start_particle_id + i;

        state.particles.insert(
            id,
            Particle {
                type_name: FREE_ACTIN_TYPE.into(),
                position,
                neighbor_ids: Vec::new(),
            },
        );
        state.topologies.insert(
            start_topology_id + i,
            Topology {
                type_name: FREE_ACTIN_TOPOLOGY.into(),
                particle_ids: vec![id],
            },
        );
    }
    state
}

/// Builds the full initial state for a configuration.
///
/// # Errors
///
/// Returns an error if the generator fails or the combined state does not
/// validate.
pub fn initial_monomers<G: MonomerGenerator>(
    generator: &G,
    config: &Config,
    layout: &InitialLayout,
    rng: &mut SimRng,
) -> Result<MonomerState, Error> {
    let options = FiberOptions {
        start_normal: layout.start_normal,
        longitudinal_bonds: config.longitudinal_bonds,
        barbed_binding_site: config.barbed_binding_site,
    };
    let actin = generator
        .fiber_monomers(&layout.fibers, &options)
        .map_err(Error::generator)?;
    let mut monomers = generator
        .setup_fixed_monomers(actin, &layout.fixed)
        .map_err(Error::generator)?;

    if config.add_membrane {
        let patch = MembranePatch {
            center: config.membrane_center(),
            size: config.membrane_size(),
            particle_radius: config.membrane_particle_radius,
        };
        let membrane = generator
            .membrane_monomers(
                &patch,
                next_particle_id(&monomers),
                next_topology_id(&monomers),
            )
            .map_err(Error::generator)?;
        monomers = monomers.merge(membrane)?;
    }

    let free = free_actin_monomers(
        layout.free_actin_concentration,
        config.actin_box_center(),
        config.actin_box_size(),
        next_particle_id(&monomers),
        next_topology_id(&monomers),
        rng,
    );
    monomers = monomers.merge(free)?;

    monomers.validate()?;
    Ok(monomers)
}

fn next_particle_id(state: &MonomerState) -> ParticleId {
    state.particles.keys().next_back().map_or(0, |id| id + 1)
}

fn next_topology_id(state: &MonomerState) -> TopologyId {
    state.topologies.keys().next_back().map_or(0, |id| id + 1)
}
