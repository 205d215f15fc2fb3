//! core
//!
//! Core domain types, environment access, and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid, BranchName
//! - [`env`] - Environment variable lookup behind a trait
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing

pub mod config;
pub mod env;
pub mod types;
