//! Input: discrete actions, continuous pointer/scroll events, per-frame polling.
//!
//! # Invariants
//! - Events are delivered synchronously, once per frame, through [`InputSource::poll`].
//! - No global callback registration: the windowing layer pushes into an owned queue.

pub mod action;
pub mod event;
pub mod queue;

pub use action::{Action, HeldActions};
pub use event::{FrameInput, InputEvent, InputSource};
pub use queue::InputQueue;

pub fn crate_info() -> &'static str {
    "gridwave-input v0.1.0"
}
