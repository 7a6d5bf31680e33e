//! memoria-cli
//!
//! Support code for the `memoria` binary: the config file, the terminal
//! audio sink and parsing of command-line training data.

pub mod config;
pub mod input;
pub mod sink;
