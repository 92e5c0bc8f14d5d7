//! Frame scheduler module
//!
//! Plays compiled schedules back onto the legs, one frame per tick, with
//! pause and resume.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod frame;
mod schedule;
mod state;
mod task_slot;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use frame::*;
pub use schedule::*;
pub use state::*;
pub use task_slot::*;
