use crate::Ports;

/// A stepped simulation node hosted by a composite.
///
/// A process declares the shape of the state it reads and writes, supplies
/// an initial state, and advances that state by an outer interval. The value
/// returned from [`Process::update`] replaces the host's copy of the state
/// entirely; it is never a delta.
///
/// Updates take `&mut self` because processes typically wrap stateful
/// engines that must not be driven concurrently.
pub trait Process {
    type State;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Declares the ports this process reads from.
    fn inputs(&self) -> Ports;

    /// Declares the ports this process writes to.
    fn outputs(&self) -> Ports;

    /// Returns the full initial state for this process.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the initial state cannot be generated.
    fn initial_state(&mut self) -> Result<Self::State, Self::Error>;

    /// Advances `inputs` by `interval` and returns the next state.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the step fails. A failed step invalidates
    /// the run; callers should not retry.
    fn update(&mut self, inputs: &Self::State, interval: f64) -> Result<Self::State, Self::Error>;
}
