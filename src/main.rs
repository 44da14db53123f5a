#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! # `circuit_sat`
//!
//! A command-line Boolean circuit satisfiability tool. It parses a
//! parenthesized gate expression over named signals (e.g.
//! `(a & ~b) ^ net_4`), translates it to CNF with a Tseitin encoding,
//! decides satisfiability, and reports an input vector that drives the
//! circuit output true.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a circuit file
//! circuit_sat circuit.circ
//!
//! # Solve inline text and name the reported output net
//! circuit_sat text --input "(a & b) | ~c" --output c
//!
//! # Solve every .circ file under a directory
//! circuit_sat dir --path ./circuits
//!
//! # Export the encoded formula in DIMACS CNF format
//! circuit_sat file --path circuit.circ --export-dimacs
//! ```
//!
//! Exit codes: 0 satisfiable, 1 unsatisfiable, 2 malformed input,
//! 3 engine failure.

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the
/// memory usage figures in the statistics table.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    env_logger::init();
    std::process::exit(command_line::cli::run());
}
