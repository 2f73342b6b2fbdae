//! `snake-agent` — what a snake is and how it decides where to go.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`body`]        | `BodyRing`, ring buffer of segments with write cursor  |
//! | [`agent`]       | `Agent`, `AgentSpec`, `length_factor`                   |
//! | [`controller`]  | `Controller` enum, `HumanController`, `AutoPilot`, `Keymap` |
//! | [`context`]     | `StepContext<'a>`, read-only view passed to controllers |
//!
//! # Design notes
//!
//! Controllers form a closed set, so they are an enum rather than a trait
//! object: the scheduler only needs `Controller::propose_direction`, and a
//! respawn needs `Controller::fresh` to build a clean copy of the same kind.

pub mod agent;
pub mod body;
pub mod context;
pub mod controller;

#[cfg(test)]
mod tests;

pub use agent::{Agent, AgentSpec, DEFAULT_LENGTH, DEFAULT_SPEED, length_factor};
pub use body::{BodyIter, BodyRing};
pub use context::StepContext;
pub use controller::{AutoPilot, Controller, ControllerKind, HumanController, Keymap};
