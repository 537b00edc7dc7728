//! Composite run loop for stepped processes.
//!
//! A composite holds the current state, hands it to a [`Process`] together
//! with an outer interval, and replaces its copy with whatever the process
//! returns. Observers see every state the composite holds, starting with the
//! initial one.
//!
//! # Example
//!
//! ```ignore
//! use actin_composite::{RunConfig, run_unobserved};
//! use actin_core::TypeRegistry;
//!
//! let registry = TypeRegistry::with_monomer_types();
//! let config = RunConfig::new(1.0, 3.0)?;
//! let solution = run_unobserved(&mut process, &registry, &config)?;
//! println!("{} particles at t={}", solution.state.particle_count(), solution.global_time);
//! ```

mod action;
mod config;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use config::{ConfigError, RunConfig};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use actin_core::{Observer, Process, TypeRegistry};

/// Remaining time below this is treated as zero.
const TIME_EPSILON: f64 = 1e-12;

/// Runs a process from its initial state until `config.total_time()`.
///
/// # Algorithm
///
/// 1. Check the process ports against `registry`.
/// 2. Get the initial state and emit it as step 0 at time 0.
/// 3. While time remains:
///    - Update the process with `interval`, or with the remaining time when
///      less than a full interval is left.
///    - Replace the held state with the result.
///    - Advance the global time and emit an [`Event`].
///    - If the observer returns `StopEarly`, terminate.
///
/// # Errors
///
/// Returns an error if a port references an unregistered type or the process
/// fails. A process failure ends the run; there are no retries.
pub fn run<P, Obs>(
    process: &mut P,
    registry: &TypeRegistry,
    config: &RunConfig,
    mut observer: Obs,
) -> Result<Solution<P::State>, Error>
where
    P: Process,
    Obs: for<'a> Observer<Event<'a, P::State>, Action>,
{
    registry.check_ports(&process.inputs())?;
    registry.check_ports(&process.outputs())?;

    let mut state = process
        .initial_state()
        .map_err(|err| Error::process(0.0, err))?;
    let mut global_time = 0.0;
    let mut steps = 0;

    let event = Event {
        step: 0,
        global_time,
        state: &state,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            state,
            steps,
            global_time,
        });
    }

    while let Some(interval) = next_interval(config, global_time) {
        state = process
            .update(&state, interval)
            .map_err(|err| Error::process(global_time, err))?;
        global_time += interval;
        steps += 1;
        log::debug!("step {steps} reached t = {global_time}");

        let event = Event {
            step: steps,
            global_time,
            state: &state,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                state,
                steps,
                global_time,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        state,
        steps,
        global_time,
    })
}

/// Runs a process without observation.
///
/// This is a convenience wrapper around [`run`] that discards events.
///
/// # Errors
///
/// Returns an error if a port references an unregistered type or the process
/// fails.
pub fn run_unobserved<P: Process>(
    process: &mut P,
    registry: &TypeRegistry,
    config: &RunConfig,
) -> Result<Solution<P::State>, Error> {
    run(process, registry, config, ())
}

/// Interval for the next update, or `None` once the total time is reached.
fn next_interval(config: &RunConfig, global_time: f64) -> Option<f64> {
    let remaining = config.total_time() - global_time;
    if remaining <= TIME_EPSILON {
        None
    } else if remaining + TIME_EPSILON >= config.interval() {
        Some(config.interval())
    } else {
        Some(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use actin_core::{Ports, SchemaError, TypeTag};
    use approx::assert_relative_eq;
    use thiserror::Error;

    /// Accumulates the intervals it is updated with.
    #[derive(Default)]
    struct Clock {
        intervals: Vec<f64>,
    }

    impl Process for Clock {
        type State = f64;
        type Error = Infallible;

        fn inputs(&self) -> Ports {
            Ports::new().with("time", TypeTag::Float)
        }

        fn outputs(&self) -> Ports {
            Ports::new().with("time", TypeTag::Float)
        }

        fn initial_state(&mut self) -> Result<f64, Self::Error> {
            Ok(0.0)
        }

        fn update(&mut self, inputs: &f64, interval: f64) -> Result<f64, Self::Error> {
            self.intervals.push(interval);
            Ok(inputs + interval)
        }
    }

    #[derive(Debug, Error)]
    #[error("diverged")]
    struct Diverged;

    /// Fails on its second update.
    struct Fragile;

    impl Process for Fragile {
        type State = u32;
        type Error = Diverged;

        fn inputs(&self) -> Ports {
            Ports::new().with("particles", TypeTag::map_of("particle"))
        }

        fn outputs(&self) -> Ports {
            self.inputs()
        }

        fn initial_state(&mut self) -> Result<u32, Self::Error> {
            Ok(0)
        }

        fn update(&mut self, inputs: &u32, _interval: f64) -> Result<u32, Self::Error> {
            if *inputs >= 1 {
                return Err(Diverged);
            }
            Ok(inputs + 1)
        }
    }

    #[test]
    fn runs_whole_intervals() {
        let mut clock = Clock::default();
        let config = RunConfig::new(1.0, 3.0).unwrap();

        let solution = run_unobserved(&mut clock, &TypeRegistry::new(), &config).unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 3);
        assert_relative_eq!(solution.global_time, 3.0);
        assert_relative_eq!(solution.state, 3.0);
        assert_eq!(clock.intervals, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn last_update_uses_remaining_time() {
        let mut clock = Clock::default();
        let config = RunConfig::new(1.0, 2.5).unwrap();

        let solution = run_unobserved(&mut clock, &TypeRegistry::new(), &config).unwrap();

        assert_eq!(solution.steps, 3);
        assert_relative_eq!(clock.intervals[2], 0.5);
        assert_relative_eq!(solution.global_time, 2.5);
    }

    #[test]
    fn accumulated_rounding_does_not_add_a_step() {
        let mut clock = Clock::default();
        let config = RunConfig::new(0.1, 1.0).unwrap();

        let solution = run_unobserved(&mut clock, &TypeRegistry::new(), &config).unwrap();

        assert_eq!(solution.steps, 10);
        assert!(clock.intervals.iter().all(|&dt| dt == 0.1));
    }

    #[test]
    fn zero_total_time_emits_only_initial_state() {
        let mut clock = Clock::default();
        let config = RunConfig::new(1.0, 0.0).unwrap();

        let mut steps = Vec::new();
        let solution = run(
            &mut clock,
            &TypeRegistry::new(),
            &config,
            |event: &Event<'_, f64>| {
                steps.push(event.step);
                None
            },
        )
        .unwrap();

        assert_eq!(solution.steps, 0);
        assert_eq!(steps, vec![0]);
    }

    #[test]
    fn observer_sees_each_state_and_can_stop() {
        let mut clock = Clock::default();
        let config = RunConfig::new(1.0, 10.0).unwrap();

        let mut times = Vec::new();
        let solution = run(
            &mut clock,
            &TypeRegistry::new(),
            &config,
            |event: &Event<'_, f64>| {
                times.push((event.global_time, *event.state));
                (event.step == 2).then_some(Action::StopEarly)
            },
        )
        .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 2);
        assert_eq!(times, vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
    }

    #[test]
    fn unregistered_port_type_is_rejected() {
        let config = RunConfig::default();
        let err = run_unobserved(&mut Fragile, &TypeRegistry::new(), &config).unwrap_err();

        assert!(matches!(
            err,
            Error::Schema(SchemaError::UnknownType {
                port: "particles",
                ..
            })
        ));
    }

    #[test]
    fn process_failure_ends_the_run() {
        let config = RunConfig::new(1.0, 5.0).unwrap();
        let err = run_unobserved(&mut Fragile, &TypeRegistry::with_monomer_types(), &config)
            .unwrap_err();

        match err {
            Error::Process { global_time, .. } => assert_relative_eq!(global_time, 1.0),
            other => panic!("unexpected error: {other}"),
        }
    }
}
