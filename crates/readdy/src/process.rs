use actin_core::{MonomerState, ParticleId, Ports, Process, TypeTag};

use crate::{
    Config, Engine, EngineSimulation, EngineSystem, Error, InitialLayout, MonomerGenerator,
    SeededRngs, current_monomers, id_offset, initial_monomers, inner_step_count, simulate,
};

/// Summary of the most recent successful update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub inner_steps: usize,
    /// Offset subtracted from every engine particle ID.
    pub id_offset: ParticleId,
    pub particle_count: usize,
    pub topology_count: usize,
}

/// Runs a coarse-grained actin filament and membrane model as a process.
///
/// The adapter keeps one engine system for its whole lifetime and builds a
/// fresh simulation from it on every update:
///
/// 1. reseed, create the simulation on the held system, reseed again
/// 2. load the input mapping into the simulation
/// 3. run `floor(interval / internal_timestep)` inner steps
/// 4. read the engine's topologies back and correct their IDs
///
/// The returned mapping replaces the input entirely.
///
/// If an update fails inside the engine, or the engine reports a state the
/// ID correction cannot handle, the system is dropped and every later update
/// returns [`Error::Poisoned`] until [`ReaddyActinMembrane::rebuild`]
/// succeeds.
pub struct ReaddyActinMembrane<E: Engine, G> {
    config: Config,
    layout: InitialLayout,
    engine: E,
    generator: G,
    system: Option<E::System>,
    last_step: Option<StepReport>,
}

impl<E: Engine, G: MonomerGenerator> ReaddyActinMembrane<E, G> {
    /// Creates the adapter with the default initial layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the engine rejects it.
    pub fn new(config: Config, engine: E, generator: G) -> Result<Self, Error> {
        Self::with_layout(config, InitialLayout::default(), engine, generator)
    }

    /// Creates the adapter with a custom initial layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the engine rejects it.
    pub fn with_layout(
        config: Config,
        layout: InitialLayout,
        engine: E,
        generator: G,
    ) -> Result<Self, Error> {
        config.validate()?;
        let mut process = Self {
            config,
            layout,
            engine,
            generator,
            system: None,
            last_step: None,
        };
        process.rebuild()?;
        Ok(process)
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &InitialLayout {
        &self.layout
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The held engine system, or `None` while poisoned.
    #[must_use]
    pub fn system(&self) -> Option<&E::System> {
        self.system.as_ref()
    }

    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.system.is_none()
    }

    #[must_use]
    pub fn last_step(&self) -> Option<&StepReport> {
        self.last_step.as_ref()
    }

    /// Discards the held system and builds a new one.
    ///
    /// A throwaway simulation is created as well so that configurations the
    /// engine cannot simulate fail here rather than on the first update.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails; the adapter stays poisoned.
    pub fn rebuild(&mut self) -> Result<(), Error> {
        self.system = None;
        let mut rngs = SeededRngs::new(self.config.random_seed);
        let mut system = self
            .engine
            .create_system(&self.config, &mut rngs)
            .map_err(Error::engine)?;
        self.engine
            .create_simulation(&mut system, &self.config, &mut rngs)
            .map_err(Error::engine)?;
        self.system = Some(system);
        Ok(())
    }

    /// Builds a fresh simulation on the held system.
    fn initialize(&mut self) -> Result<(E::Simulation, SeededRngs), Error> {
        let system = self.system.as_mut().ok_or(Error::Poisoned)?;
        log::debug!("rebuilding {} simulation", self.config.name);

        let mut rngs = SeededRngs::new(self.config.random_seed);
        let simulation = self
            .engine
            .create_simulation(system, &self.config, &mut rngs)
            .map_err(Error::engine)?;
        rngs.reseed();

        Ok((simulation, rngs))
    }

    fn step(&mut self, inputs: &MonomerState, interval: f64) -> Result<MonomerState, Error> {
        let n_steps = inner_step_count(interval, self.config.internal_timestep)?;
        inputs.validate()?;

        let (mut simulation, mut rngs) = self.initialize()?;
        simulation.add_monomers(inputs).map_err(Error::engine)?;

        let max_cutoff = self
            .system
            .as_ref()
            .ok_or(Error::Poisoned)?
            .max_cutoff();

        log::info!("running readdy for {n_steps} steps");
        simulate(
            &mut simulation,
            max_cutoff,
            self.config.internal_timestep,
            n_steps,
            &mut rngs.numeric,
        )
        .map_err(Error::engine)?;

        let topologies = simulation.current_topologies().map_err(Error::engine)?;
        let offset = id_offset(&topologies)?;
        if offset != 0 {
            log::warn!("engine numbered particles from {offset}, shifting ids back to 0");
        }
        let state = current_monomers(&topologies, offset)?;

        self.last_step = Some(StepReport {
            inner_steps: n_steps,
            id_offset: offset,
            particle_count: state.particle_count(),
            topology_count: state.topology_count(),
        });
        Ok(state)
    }
}

impl<E: Engine, G: MonomerGenerator> Process for ReaddyActinMembrane<E, G> {
    type State = MonomerState;
    type Error = Error;

    fn inputs(&self) -> Ports {
        monomer_ports()
    }

    fn outputs(&self) -> Ports {
        monomer_ports()
    }

    fn initial_state(&mut self) -> Result<MonomerState, Error> {
        let mut rngs = SeededRngs::new(self.config.random_seed);
        initial_monomers(&self.generator, &self.config, &self.layout, &mut rngs.general)
    }

    fn update(&mut self, inputs: &MonomerState, interval: f64) -> Result<MonomerState, Error> {
        if self.is_poisoned() {
            return Err(Error::Poisoned);
        }

        self.step(inputs, interval).inspect_err(|err| {
            if err.poisons() {
                log::error!("{} update failed, dropping engine system: {err}", self.config.name);
                self.system = None;
            }
        })
    }
}

fn monomer_ports() -> Ports {
    Ports::new()
        .with("topologies", TypeTag::map_of("topology"))
        .with("particles", TypeTag::map_of("particle"))
}
