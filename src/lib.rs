#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This crate translates parenthesized Boolean circuit expressions (gates
//! AND/OR/XOR/NOT over named signals) into CNF and drives a SAT engine to
//! find an input assignment that makes the circuit output true.

/// The `circuit` module implements the translation pipeline: signal
/// interning, expression parsing, Tseitin encoding, and result rendering.
pub mod circuit;

/// The `sat` module holds the CNF data types, the solver boundary trait,
/// and the default DPLL engine.
pub mod sat;
