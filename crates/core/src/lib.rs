//! Core traits and types for actin membrane simulations.
//!
//! This crate defines the shared abstractions that processes, composites, and
//! observers build on:
//!
//! - [`Process`] — a stepped node that declares its ports, provides an initial
//!   state, and maps a state plus an interval to the next state
//! - [`Observer`] — receives run events and optionally returns control actions
//! - [`MonomerState`] — the `{particles, topologies}` mapping exchanged between
//!   a process and its host
//! - [`TypeTag`], [`TypeSchema`], [`Ports`], [`TypeRegistry`] — schema
//!   declarations for process ports and registered record types

mod observer;
mod process;
mod schema;
mod state;

pub use observer::Observer;
pub use process::Process;
pub use schema::{
    Apply, Ports, SchemaError, TypeRegistry, TypeSchema, TypeTag, particle_schema,
    topology_schema,
};
pub use state::{MonomerState, Particle, ParticleId, StateError, Topology, TopologyId};
