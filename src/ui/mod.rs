//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Identifier composition and terminal output
//!
//! # Design
//!
//! All output goes through this module so the quiet flag and the stdout /
//! stderr split are handled in one place.

pub mod output;
