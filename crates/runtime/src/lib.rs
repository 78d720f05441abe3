//! Runtime orchestration for shared game worlds.
//!
//! This crate wires the rules core into a running session. Consumers start
//! a [`World`] to drive the curse cycle, subscribe to events, and resolve
//! player actions through [`WorldHandle`].
//!
//! Modules are organized by responsibility:
//! - [`world`] hosts the orchestrator and its configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod world;

mod workers;

pub use api::{ActionOutcome, ActionReport, Result, RuntimeError, WorldHandle};
pub use events::{CaptureEvent, CombatEvent, Event, EventBus, Topic};
pub use world::{World, WorldConfig};
