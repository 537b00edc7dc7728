/// Indicates how the run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the requested total time.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a composite run.
#[derive(Debug, Clone)]
pub struct Solution<S> {
    /// How the run terminated.
    pub status: Status,

    /// The state after the last completed update.
    pub state: S,

    /// Number of process updates completed.
    pub steps: usize,

    /// Simulated time reached.
    pub global_time: f64,
}
