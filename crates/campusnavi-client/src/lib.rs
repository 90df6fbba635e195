//! CLI, configuration, account linking and schedule review.
//!
//! This crate provides the `campusnavi` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod review;
pub mod secret;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
