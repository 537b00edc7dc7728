//! The fixed inner-step loop run on every update.
//!
//! ```text
//! initialize_kernel
//! create_neighbor_list(max_cutoff)
//! calculate_forces
//! update_neighbor_list
//! repeat n_steps:
//!     integrate_brownian(dt)
//!     update_neighbor_list
//!     react(dt)
//!     update_neighbor_list
//!     calculate_forces
//! ```
//!
//! Reactions see a neighbor list that reflects the latest positions, and the
//! forces used by the next integration include particles created or removed
//! by the preceding reaction step.

use crate::{EngineSimulation, Error, SimRng};

/// Number of whole inner steps that fit in an outer interval.
///
/// Computed as `floor(interval / internal_timestep)`; any fractional
/// remainder is dropped, never integrated.
///
/// # Errors
///
/// Returns [`Error::InvalidInterval`] if `interval` is negative or not
/// finite, or holds more inner steps than a `usize` can count.
pub fn inner_step_count(interval: f64, internal_timestep: f64) -> Result<usize, Error> {
    if !interval.is_finite() || interval < 0.0 {
        return Err(Error::InvalidInterval { interval });
    }
    let ratio = (interval / internal_timestep).floor();
    #[allow(clippy::cast_precision_loss)]
    let limit = usize::MAX as f64;
    if !(ratio < limit) {
        return Err(Error::InvalidInterval { interval });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n_steps = ratio as usize;
    Ok(n_steps)
}

/// Runs `n_steps` inner steps on a freshly loaded simulation.
///
/// # Errors
///
/// Propagates the first engine action that fails; the simulation is left in
/// whatever state that action produced.
pub fn simulate<S: EngineSimulation>(
    simulation: &mut S,
    max_cutoff: f64,
    internal_timestep: f64,
    n_steps: usize,
    rng: &mut SimRng,
) -> Result<(), S::Error> {
    simulation.initialize_kernel()?;
    simulation.create_neighbor_list(max_cutoff)?;
    simulation.calculate_forces()?;
    simulation.update_neighbor_list()?;

    for _ in 0..n_steps {
        simulation.integrate_brownian(internal_timestep, rng)?;
        simulation.update_neighbor_list()?;
        simulation.react(internal_timestep, rng)?;
        simulation.update_neighbor_list()?;
        simulation.calculate_forces()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use actin_core::MonomerState;
    use rand::SeedableRng;
    use thiserror::Error;

    use crate::EngineTopology;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Init,
        CreateNl(f64),
        UpdateNl,
        Forces,
        Integrate(f64),
        React(f64),
    }

    #[derive(Debug, Error)]
    #[error("reaction failed")]
    struct ReactionFailed;

    /// Records every action; optionally fails on the nth reaction.
    #[derive(Default)]
    struct Recording {
        calls: Vec<Call>,
        fail_on_react: Option<usize>,
    }

    impl EngineSimulation for Recording {
        type Error = ReactionFailed;

        fn add_monomers(&mut self, _monomers: &MonomerState) -> Result<(), Self::Error> {
            Ok(())
        }

        fn initialize_kernel(&mut self) -> Result<(), Self::Error> {
            self.calls.push(Call::Init);
            Ok(())
        }

        fn create_neighbor_list(&mut self, cutoff: f64) -> Result<(), Self::Error> {
            self.calls.push(Call::CreateNl(cutoff));
            Ok(())
        }

        fn update_neighbor_list(&mut self) -> Result<(), Self::Error> {
            self.calls.push(Call::UpdateNl);
            Ok(())
        }

        fn calculate_forces(&mut self) -> Result<(), Self::Error> {
            self.calls.push(Call::Forces);
            Ok(())
        }

        fn integrate_brownian(&mut self, dt: f64, _rng: &mut SimRng) -> Result<(), Self::Error> {
            self.calls.push(Call::Integrate(dt));
            Ok(())
        }

        fn react(&mut self, dt: f64, _rng: &mut SimRng) -> Result<(), Self::Error> {
            let reactions = self
                .calls
                .iter()
                .filter(|call| matches!(call, Call::React(_)))
                .count();
            if self.fail_on_react == Some(reactions) {
                return Err(ReactionFailed);
            }
            self.calls.push(Call::React(dt));
            Ok(())
        }

        fn current_topologies(&self) -> Result<Vec<EngineTopology>, Self::Error> {
            Ok(Vec::new())
        }
    }

    fn rng() -> SimRng {
        SimRng::seed_from_u64(0)
    }

    #[test]
    fn step_count_floors_the_ratio() {
        assert_eq!(inner_step_count(1.0, 0.1).unwrap(), 10);
        assert_eq!(inner_step_count(1.05, 0.1).unwrap(), 10);
        assert_eq!(inner_step_count(0.25, 0.1).unwrap(), 2);
        assert_eq!(inner_step_count(0.05, 0.1).unwrap(), 0);
        assert_eq!(inner_step_count(0.0, 0.1).unwrap(), 0);
    }

    #[test]
    fn invalid_intervals_are_rejected() {
        assert!(matches!(
            inner_step_count(-1.0, 0.1),
            Err(Error::InvalidInterval { .. })
        ));
        assert!(matches!(
            inner_step_count(f64::NAN, 0.1),
            Err(Error::InvalidInterval { .. })
        ));
        assert!(matches!(
            inner_step_count(f64::INFINITY, 0.1),
            Err(Error::InvalidInterval { .. })
        ));
    }

    #[test]
    fn step_count_beyond_usize_is_rejected() {
        assert!(matches!(
            inner_step_count(1e300, 0.1),
            Err(Error::InvalidInterval { .. })
        ));
        assert!(matches!(
            inner_step_count(1.0, 1e-320),
            Err(Error::InvalidInterval { .. })
        ));
        assert_eq!(inner_step_count(1e6, 0.5).unwrap(), 2_000_000);
    }

    #[test]
    fn actions_run_in_order() {
        let mut sim = Recording::default();
        simulate(&mut sim, 7.5, 0.1, 2, &mut rng()).expect("recording never fails");

        let step = [
            Call::Integrate(0.1),
            Call::UpdateNl,
            Call::React(0.1),
            Call::UpdateNl,
            Call::Forces,
        ];
        let mut expected = vec![Call::Init, Call::CreateNl(7.5), Call::Forces, Call::UpdateNl];
        expected.extend(step);
        expected.extend(step);

        assert_eq!(sim.calls, expected);
    }

    #[test]
    fn zero_steps_only_prepares_the_kernel() {
        let mut sim = Recording::default();
        simulate(&mut sim, 1.0, 0.1, 0, &mut rng()).expect("recording never fails");

        assert_eq!(
            sim.calls,
            vec![Call::Init, Call::CreateNl(1.0), Call::Forces, Call::UpdateNl]
        );
    }

    #[test]
    fn engine_failure_stops_the_loop() {
        let mut sim = Recording {
            fail_on_react: Some(1),
            ..Recording::default()
        };

        assert!(simulate(&mut sim, 1.0, 0.1, 5, &mut rng()).is_err());

        let integrations = sim
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Integrate(_)))
            .count();
        assert_eq!(integrations, 2);
        assert_eq!(sim.calls.last(), Some(&Call::UpdateNl));
    }
}
