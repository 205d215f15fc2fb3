//! tagver - Describe the current git commit as a version string
//!
//! tagver answers the question `git describe --tags` answers (the nearest
//! tag, how far HEAD is past it, and which commit HEAD is) and adds the
//! branch name, including for a detached HEAD, plus awareness of the values
//! CI systems export.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates one invocation: config, describe, branch, CI
//! - [`describe`] - Tag index, semver tie-break, history walk, branch resolution
//! - [`ci`] - CI environment probing
//! - [`core`] - Strong types, environment access, configuration
//! - [`git`] - Single interface for all repository reads
//! - [`ui`] - Output formatting
//!
//! # Invariants
//!
//! 1. Nothing writes to the repository
//! 2. Every structure the describe engine builds lives for one call
//! 3. All settings reach the engine as explicit values, never globals

pub mod ci;
pub mod cli;
pub mod core;
pub mod describe;
pub mod engine;
pub mod git;
pub mod ui;
