//! # roll-core
//!
//! Core types, ID prefixes, and error types for Rollcall.
//!
//! This crate provides the foundational types shared across all Rollcall crates:
//! - Entity structs for the roster domain (sections, enrollments, audit entries,
//!   attendance records)
//! - Action/status enums with stable string representations
//! - ID prefix constants
//! - The `StudentDirectory` trait, the seam through which the reconciler
//!   validates enrollment candidates against the institution's directory
//! - Cross-cutting error types

pub mod directory;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
