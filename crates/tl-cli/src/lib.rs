//! Teaching-load CLI library.
//!
//! This crate provides the command-line front end: configuration, reading
//! the schedule export and writing the generated files.

mod cli;
pub mod config;
pub mod ingest;
pub mod output;

pub use cli::Cli;
pub use config::Config;
