//! memoria-core
//!
//! Pure domain types and storage key conventions for voice memorials.
//! No network or filesystem dependency. This is the shared vocabulary of
//! the Memoria system.

pub mod error;
pub mod models;
pub mod storage_keys;
