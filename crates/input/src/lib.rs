//! Input: actions and the per-frame snapshot the update step consumes.
//!
//! # Invariants
//! - Update logic never queries devices; it reads one `InputSnapshot` per frame.
//! - Mouse and scroll deltas are consumed by taking a snapshot, so each delta
//!   is applied exactly once.

pub mod action;
pub mod snapshot;

pub use action::Action;
pub use snapshot::{InputSnapshot, InputState};
