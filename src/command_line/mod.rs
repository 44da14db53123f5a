#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Command-line argument handling and subcommand dispatch.

pub mod cli;
