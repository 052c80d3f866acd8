//! Command handlers, one module per command family.

pub mod attendance;
pub mod audit;
pub mod enroll;
pub mod roster;
pub mod section;
pub mod student;
