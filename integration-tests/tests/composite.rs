use std::io::BufReader;

use actin_composite::{Action, Event, RunConfig, Status, run};
use actin_core::{MonomerState, Observer, TypeRegistry};
use actin_observers::{JsonLinesEmitter, LogObserver, Recorder, read_frames};
use actin_readdy::{Config, ReaddyActinMembrane};
use approx::assert_relative_eq;
use integration_tests::{toy_engine::ToyEngine, toy_generator::ToyGenerator};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn process() -> ReaddyActinMembrane<ToyEngine, ToyGenerator> {
    let config = Config {
        add_membrane: false,
        ..Config::default()
    };
    ReaddyActinMembrane::new(config, ToyEngine::default(), ToyGenerator).unwrap()
}

#[test]
fn composite_records_and_emits_every_state() {
    init_logging();
    let mut process = process();
    let registry = TypeRegistry::with_monomer_types();
    let config = RunConfig::new(1.0, 3.0).unwrap();

    let mut recorder = Recorder::new();
    let mut emitter = JsonLinesEmitter::new(Vec::new());
    let mut log = LogObserver::new("toy");

    let solution = run(
        &mut process,
        &registry,
        &config,
        |event: &Event<'_, MonomerState>| -> Option<Action> {
            let _: Option<Action> = log.observe(event);
            let _: Option<Action> = recorder.observe(event);
            emitter.observe(event)
        },
    )
    .unwrap();

    assert_eq!(solution.status, Status::Complete);
    assert_eq!(solution.steps, 3);
    assert_relative_eq!(solution.global_time, 3.0);

    let frames = recorder.into_frames();
    assert_eq!(frames.len(), 4);
    assert_relative_eq!(frames[0].global_time, 0.0);
    assert_relative_eq!(frames[3].global_time, 3.0);
    assert_eq!(frames[3].clone().into_monomers(), solution.state);
    for frame in &frames {
        assert_eq!(frame.particles.keys().next(), Some(&0));
    }

    assert_eq!(emitter.lines(), 4);
    let bytes = emitter.finish().unwrap();
    let read_back = read_frames(BufReader::new(bytes.as_slice())).unwrap();
    assert_eq!(read_back, frames);
}

#[test]
fn observer_can_stop_a_growing_run() {
    init_logging();
    let mut process = process();
    let registry = TypeRegistry::with_monomer_types();
    let config = RunConfig::new(0.5, 100.0).unwrap();

    let solution = run(
        &mut process,
        &registry,
        &config,
        |event: &Event<'_, MonomerState>| (event.step == 4).then_some(Action::StopEarly),
    )
    .unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.steps, 4);
    assert_relative_eq!(solution.global_time, 2.0);
    assert_eq!(process.last_step().unwrap().inner_steps, 5);
}

#[test]
fn frames_can_be_written_to_a_file() {
    init_logging();
    let path = std::env::temp_dir().join(format!("actin-frames-{}.jsonl", std::process::id()));
    let mut process = process();
    let config = RunConfig::new(1.0, 2.0).unwrap();

    let mut emitter = JsonLinesEmitter::create(&path).unwrap();
    let solution = run(
        &mut process,
        &TypeRegistry::with_monomer_types(),
        &config,
        &mut emitter,
    )
    .unwrap();
    emitter.finish().unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let frames = read_frames(BufReader::new(file)).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(frames.len(), 3);
    assert_eq!(frames[2].clone().into_monomers(), solution.state);
}
