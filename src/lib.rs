//! GE-Proton installer and updater
//!
//! This library provides the release lookup, version comparison, download and
//! cleanup steps behind the `protonug` CLI.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;
