//! Capture legality and probability.
//!
//! Gameplay refusals are [`CaptureOutcome::Rejected`] values, never errors.

mod engine;
mod outcome;

pub use engine::{attempt_capture, capture_probability, check_preconditions};
pub use outcome::{CaptureOutcome, RejectReason};
