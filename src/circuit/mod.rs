#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The circuit-to-CNF translation pipeline.
//!
//! A session runs text → parse (interning signals) → Tseitin encoding →
//! solve → report. [`Circuit`] holds the parsed tree and registry;
//! [`Circuit::compile`] consumes the tree into a [`CompiledCircuit`]
//! whose formula asserts the circuit output true; solving goes through
//! any [`SatEngine`] behind the adapter. Sessions share nothing: each
//! gets its own registry, formula, and engine.

pub mod encoder;
pub mod expr;
pub mod parser;
pub mod registry;
pub mod report;
pub mod token;

use crate::circuit::expr::Expr;
use crate::circuit::parser::ParseError;
use crate::circuit::registry::SignalRegistry;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::engine::{EngineError, Outcome, SatEngine, solve_formula};
use crate::sat::literal::Literal;
use log::debug;

/// A parsed circuit expression plus the signal registry it interned into.
#[derive(Debug, Clone)]
pub struct Circuit {
    registry: SignalRegistry,
    expr: Expr,
}

impl Circuit {
    /// Parses a circuit expression.
    ///
    /// # Errors
    ///
    /// [`ParseError`] for malformed input; no partial state survives.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut registry = SignalRegistry::new();
        let expr = parser::parse(text, &mut registry)?;
        debug!("parsed circuit with {} named signals", registry.num_named());
        Ok(Self { registry, expr })
    }

    /// Named input signals in first-sighting order.
    pub fn inputs(&self) -> impl Iterator<Item = &str> {
        self.registry.names()
    }

    #[must_use]
    pub const fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    /// Encodes the expression to CNF and asserts the circuit output true.
    /// Consumes the tree; the formula and grown registry live on.
    #[must_use]
    pub fn compile(self) -> CompiledCircuit {
        let Self { mut registry, expr } = self;
        let (root, mut cnf) = encoder::encode(&expr, &mut registry);
        cnf.add_clause(Clause::new([root]));
        CompiledCircuit {
            registry,
            cnf,
            root,
        }
    }
}

/// The encoded form of one circuit: a CNF formula whose satisfying
/// assignments are exactly the input vectors driving the output true.
#[derive(Debug, Clone)]
pub struct CompiledCircuit {
    registry: SignalRegistry,
    cnf: Cnf,
    root: Literal,
}

impl CompiledCircuit {
    #[must_use]
    pub const fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    #[must_use]
    pub const fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    /// The literal carrying the circuit's output value.
    #[must_use]
    pub const fn root(&self) -> Literal {
        self.root
    }

    /// Runs `engine` over the formula.
    ///
    /// # Errors
    ///
    /// Propagates [`EngineError`]; `Unsatisfiable` is an [`Outcome`], not
    /// an error.
    pub fn solve_with<E: SatEngine>(&self, engine: &mut E) -> Result<Outcome, EngineError> {
        solve_formula(&self.cnf, engine)
    }
}
