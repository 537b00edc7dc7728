use actin_core::Observer;

use crate::traits::HasFrame;

/// Logs the size of every observed state at `info` level.
#[derive(Debug, Clone)]
pub struct LogObserver {
    name: String,
}

impl LogObserver {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl<E: HasFrame, A> Observer<E, A> for LogObserver {
    fn observe(&mut self, event: &E) -> Option<A> {
        let monomers = event.monomers();
        log::info!(
            "{} t = {}: {} particles in {} topologies",
            self.name,
            event.global_time(),
            monomers.particle_count(),
            monomers.topology_count(),
        );
        None
    }
}
