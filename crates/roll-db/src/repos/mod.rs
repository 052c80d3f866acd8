//! Repository modules implementing the roster, audit, and attendance
//! operations.
//!
//! Each module adds methods to `RollService` via `impl RollService` blocks.

pub mod attendance;
pub mod audit;
pub mod enrollment;
pub mod roster;
pub mod section;
pub mod student;
