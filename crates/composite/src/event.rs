/// Event emitted by the run loop for each state the host holds.
///
/// Step 0 is the initial state at `global_time` 0.
/// Steps 1..N are emitted after each process update.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, S> {
    /// The step number (0 for initial, 1..N for updates).
    pub step: usize,

    /// Simulated time reached at this step.
    pub global_time: f64,

    /// The full state after this step.
    pub state: &'a S,
}
