//! CLI command implementations.

pub mod chain;
pub mod common;
pub mod config;
pub mod devices;
pub mod generate;
pub mod info;
pub mod nodes;
pub mod play;
