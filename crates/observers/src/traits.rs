//! Capability traits for observers.
//!
//! These traits abstract over run-loop event and action types so observers
//! do not depend on a particular runner.
//!
//! # Example
//!
//! ```rust
//! use actin_core::Observer;
//! use actin_observers::traits::{CanStopEarly, HasFrame};
//!
//! struct ParticleCap {
//!     max_particles: usize,
//! }
//!
//! impl<E: HasFrame, A: CanStopEarly> Observer<E, A> for ParticleCap {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.monomers().particle_count() > self.max_particles).then(A::stop_early)
//!     }
//! }
//! ```

use actin_composite::{Action, Event};
use actin_core::MonomerState;

/// An event that carries a timed monomer state.
pub trait HasFrame {
    /// Simulated time of the state.
    fn global_time(&self) -> f64;

    /// The full particle and topology mapping.
    fn monomers(&self) -> &MonomerState;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the run early.
    fn stop_early() -> Self;
}

impl HasFrame for Event<'_, MonomerState> {
    fn global_time(&self) -> f64 {
        self.global_time
    }

    fn monomers(&self) -> &MonomerState {
        self.state
    }
}

impl CanStopEarly for Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
