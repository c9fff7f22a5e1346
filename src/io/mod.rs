//! Input/output operations and the caller-facing surface
//!
//! This module contains everything outside the search core:
//! - Error types and result alias
//! - Runtime configuration defaults
//! - Command-line interface
//! - Text rendering of solved boards

/// Command-line interface for running solves
pub mod cli;
/// Solver constants and runtime configuration defaults
pub mod configuration;
/// Error types for solver operations
pub mod error;
/// Text rendering of board snapshots
pub mod render;
