use std::{
    fs::File,
    io::{self, BufRead, BufWriter, Write},
    path::Path,
};

use actin_core::Observer;
use thiserror::Error;

use crate::{
    Frame,
    frame::FrameRef,
    traits::{CanStopEarly, HasFrame},
};

/// Errors raised while writing or reading JSON-lines frames.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("json error on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Writes each observed frame as one line of JSON.
///
/// Observers cannot return errors, so the first write failure is logged,
/// kept, and answered with a stop-early action on this and every later
/// event. [`JsonLinesEmitter::finish`] reports it.
#[derive(Debug)]
pub struct JsonLinesEmitter<W: Write> {
    writer: W,
    lines: usize,
    error: Option<EmitError>,
}

impl JsonLinesEmitter<BufWriter<File>> {
    /// Creates an emitter writing to a new file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines: 0,
            error: None,
        }
    }

    /// Number of frames written so far.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flushes and returns the writer, or the first error encountered.
    ///
    /// # Errors
    ///
    /// Returns the stored write error, or a flush failure.
    pub fn finish(mut self) -> Result<W, EmitError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_frame<E: HasFrame>(&mut self, event: &E) -> Result<(), EmitError> {
        let line = self.lines + 1;
        serde_json::to_writer(&mut self.writer, &FrameRef::from_event(event))
            .map_err(|source| EmitError::Json { line, source })?;
        self.writer.write_all(b"\n")?;
        self.lines = line;
        Ok(())
    }
}

impl<W: Write, E: HasFrame, A: CanStopEarly> Observer<E, A> for JsonLinesEmitter<W> {
    fn observe(&mut self, event: &E) -> Option<A> {
        if self.error.is_some() {
            return Some(A::stop_early());
        }
        match self.write_frame(event) {
            Ok(()) => None,
            Err(err) => {
                log::error!("failed to emit frame at t = {}: {err}", event.global_time());
                self.error = Some(err);
                Some(A::stop_early())
            }
        }
    }
}

impl<W: Write, E: HasFrame, A: CanStopEarly> Observer<E, A> for &mut JsonLinesEmitter<W> {
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}

/// Reads back frames written by a [`JsonLinesEmitter`], skipping blank lines.
///
/// # Errors
///
/// Returns an error if a line cannot be read or parsed.
pub fn read_frames<R: BufRead>(reader: R) -> Result<Vec<Frame>, EmitError> {
    let mut frames = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame = serde_json::from_str(&line).map_err(|source| EmitError::Json {
            line: index + 1,
            source,
        })?;
        frames.push(frame);
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    use actin_composite::{Action, Event};
    use actin_core::{MonomerState, Particle, Topology};
    use approx::assert_relative_eq;

    use crate::Recorder;

    fn monomer_state() -> MonomerState {
        let mut state = MonomerState::new();
        state.particles.insert(
            0,
            Particle {
                type_name: "actin#free_ATP".into(),
                position: [1.0, 2.0, 3.0],
                neighbor_ids: vec![],
            },
        );
        state.topologies.insert(
            0,
            Topology {
                type_name: "Actin-Monomer-ATP".into(),
                particle_ids: vec![0],
            },
        );
        state
    }

    /// Accepts a fixed number of bytes, then fails.
    struct ShortWriter {
        remaining: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "disk full"));
            }
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn frames_read_back_as_written() {
        let state = monomer_state();
        let mut emitter = JsonLinesEmitter::new(Vec::new());
        let mut recorder = Recorder::new();

        for (step, global_time) in [(0, 0.0), (1, 1.0)] {
            let event = Event {
                step,
                global_time,
                state: &state,
            };
            let action: Option<Action> = emitter.observe(&event);
            assert_eq!(action, None);
            let _: Option<Action> = recorder.observe(&event);
        }
        assert_eq!(emitter.lines(), 2);

        let bytes = emitter.finish().expect("vec writer never fails");
        let frames = read_frames(bytes.as_slice()).expect("frames parse");

        assert_eq!(frames, recorder.into_frames());
        assert_relative_eq!(frames[1].global_time, 1.0);
        assert_eq!(frames[0].clone().into_monomers(), state);
    }

    #[test]
    fn positions_keep_every_digit() {
        let mut state = monomer_state();
        let positions = [
            [0.203_205_980_088_514_81, 20.095_327_980_500_798, -7.1e-17],
            [1.0 / 3.0, std::f64::consts::PI, 123_456.789_012_345_67],
        ];
        for (id, position) in (1..).zip(positions) {
            state.particles.insert(
                id,
                Particle {
                    type_name: "actin#ATP_1".into(),
                    position,
                    neighbor_ids: vec![],
                },
            );
        }
        let event = Event {
            step: 0,
            global_time: 0.1 + 0.2,
            state: &state,
        };

        let mut emitter = JsonLinesEmitter::new(Vec::new());
        let _: Option<Action> = emitter.observe(&event);
        let bytes = emitter.finish().expect("vec writer never fails");
        let frames = read_frames(bytes.as_slice()).expect("frames parse");

        assert_eq!(frames[0].global_time, 0.1 + 0.2);
        assert_eq!(frames[0].clone().into_monomers(), state);
    }

    #[test]
    fn write_failure_stops_the_run_and_is_reported() {
        let state = monomer_state();
        let event = Event {
            step: 0,
            global_time: 0.0,
            state: &state,
        };
        let mut emitter = JsonLinesEmitter::new(ShortWriter { remaining: 8 });

        let first: Option<Action> = emitter.observe(&event);
        let second: Option<Action> = emitter.observe(&event);

        assert_eq!(first, Some(Action::StopEarly));
        assert_eq!(second, Some(Action::StopEarly));
        assert_eq!(emitter.lines(), 0);
        assert!(emitter.finish().is_err());
    }

    #[test]
    fn malformed_line_names_its_position() {
        let input = "\n{\"global_time\": 0.0, \"particles\": {}, \"topologies\": {}}\nnot json\n";
        let err = read_frames(input.as_bytes()).unwrap_err();

        assert!(matches!(err, EmitError::Json { line: 3, .. }));
    }
}
