//! `finops-cli` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod commands;
pub mod render;
pub mod settings;
