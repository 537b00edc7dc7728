/// Receives events during a run and optionally returns a control action.
///
/// Observers are how callers watch, record, or steer a run without the
/// runner knowing anything about them. Returning `None` lets the run
/// continue unchanged.
///
/// The unit type `()` is a no-op observer, and any
/// `FnMut(&E) -> Option<A>` closure is an observer.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}
