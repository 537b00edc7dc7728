/// Control actions supported by the composite run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run early and return the state reached so far.
    StopEarly,
}
