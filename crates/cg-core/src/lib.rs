//! Core types for CyberGuard: terminal scenarios and their virtual file system.
//!
//! This crate defines the data a CTF level is made of. It is independent of
//! the shell and the session controller: you can construct a
//! [`TerminalScenario`] programmatically or accept one from a generator as
//! JSON through [`TerminalScenario::from_generated_json`].

/// Error types used throughout the crate.
pub mod error;
/// Scenario definition and JSON intake.
pub mod scenario;
/// Difficulty tiers keyed by level number.
pub mod tier;
/// Read-only access to a scenario's files.
pub mod vfs;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export scenario types.
pub use scenario::{DEFAULT_BOOT_LINES, FileMap, TerminalScenario};
/// Re-export tier types.
pub use tier::DifficultyTier;
/// Re-export file system accessor types.
pub use vfs::{FileSystem, Listing};
