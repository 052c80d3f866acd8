//! ID prefix constants.
//!
//! Rows created by Rollcall carry prefixed random IDs (e.g., `enr-a3f8b2c1`),
//! generated by `RollDb::generate_id`. Student identifiers are *not* prefixed:
//! the institutional username is the directory key and is stored verbatim.

pub const PREFIX_ENROLLMENT: &str = "enr";
pub const PREFIX_AUDIT: &str = "aud";
pub const PREFIX_SECTION: &str = "sec";

/// All prefixes minted by this system, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_ENROLLMENT, PREFIX_AUDIT, PREFIX_SECTION];
