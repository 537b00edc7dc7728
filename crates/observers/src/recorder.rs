use actin_core::Observer;

use crate::{Frame, traits::HasFrame};

/// Keeps every observed frame in memory.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    frames: Vec<Frame>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[must_use]
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    #[must_use]
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl<E: HasFrame, A> Observer<E, A> for Recorder {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.frames.push(Frame::from_event(event));
        None
    }
}

impl<E: HasFrame, A> Observer<E, A> for &mut Recorder {
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
