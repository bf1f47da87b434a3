//! Kuaidu CLI library
//!
//! This library provides the command-line front end for the kuaidu
//! chunking and pacing engine.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::CliError;
