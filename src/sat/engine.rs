#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solver boundary.
//!
//! A [`SatEngine`] is an external decision procedure exposed through four
//! operations: variable allocation, incremental clause assertion, a solve
//! call, and model read-back. [`solve_formula`] drives an engine through
//! that contract for one formula and extracts the [`Model`] on success.
//! Nothing on this side of the boundary depends on how the engine decides
//! satisfiability.

use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use bit_vec::BitVec;
use core::fmt;
use log::debug;
use std::error::Error;

/// The engine's verdict for an asserted clause set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveResult {
    Sat,
    Unsat,
}

/// An engine-internal failure, distinct from an `Unsat` verdict. Fatal to
/// the session; never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The configured time budget ran out before the engine decided.
    DeadlineExceeded,
    /// Any other failure the engine reports.
    Failure(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeadlineExceeded => write!(f, "solve deadline exceeded"),
            Self::Failure(msg) => write!(f, "solver failure: {msg}"),
        }
    }
}

impl Error for EngineError {}

/// The contract a SAT engine must provide.
///
/// Variable slots and translator variable ids share the same positive,
/// 1-based, contiguous integer space: the adapter calls [`fresh_var`] once
/// per translator variable before asserting clauses, so slot `n` always
/// means variable `n`.
///
/// [`fresh_var`]: SatEngine::fresh_var
pub trait SatEngine {
    /// Allocates the next variable slot and returns its id.
    fn fresh_var(&mut self) -> Variable;

    /// Asserts one clause; the call boundary is the clause boundary.
    fn assert_clause(&mut self, literals: &[Literal]);

    /// Runs the decision procedure over everything asserted so far.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] when the engine fails internally. `Unsat`
    /// is a verdict, not an error.
    fn solve(&mut self) -> Result<SolveResult, EngineError>;

    /// The value of `var` in the satisfying assignment. Meaningful only
    /// after [`solve`](SatEngine::solve) returned [`SolveResult::Sat`].
    fn value(&self, var: Variable) -> bool;
}

/// A complete assignment covering every variable of a solved formula.
/// Immutable once extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    // Index 0 is unused so variable ids index directly.
    values: BitVec,
}

impl Model {
    /// Builds a model from per-variable values, `values[0]` being the
    /// value of variable 1.
    #[must_use]
    pub fn from_values(values: &[bool]) -> Self {
        let mut bits = BitVec::from_elem(values.len() + 1, false);
        for (i, &v) in values.iter().enumerate() {
            bits.set(i + 1, v);
        }
        Self { values: bits }
    }

    /// Number of variables the model covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The boolean assigned to `var`.
    ///
    /// # Panics
    ///
    /// If `var` is outside the solved formula's variable range.
    #[must_use]
    pub fn value(&self, var: Variable) -> bool {
        self.values
            .get(var as usize)
            .expect("variable id outside the model range")
    }

    /// The truth value of `lit` under this model.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> bool {
        self.value(lit.variable()) == lit.polarity()
    }
}

/// The result of one solving session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Satisfiable(Model),
    Unsatisfiable,
}

impl Outcome {
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    #[must_use]
    pub const fn model(&self) -> Option<&Model> {
        match self {
            Self::Satisfiable(model) => Some(model),
            Self::Unsatisfiable => None,
        }
    }
}

/// Asserts `cnf` into `engine`, solves, and extracts the model when
/// satisfiable.
///
/// One engine slot is allocated per formula variable so the two id spaces
/// coincide, every clause is asserted in formula order, and on `Sat` one
/// boolean per variable in `[1, num_vars]` is read back.
///
/// # Errors
///
/// Propagates any [`EngineError`]; the session is over at that point.
pub fn solve_formula<E: SatEngine>(cnf: &Cnf, engine: &mut E) -> Result<Outcome, EngineError> {
    for _ in 0..cnf.num_vars {
        engine.fresh_var();
    }
    for clause in cnf.iter() {
        engine.assert_clause(clause.as_slice());
    }

    debug!(
        "asserted {} clauses over {} variables",
        cnf.len(),
        cnf.num_vars
    );

    match engine.solve()? {
        SolveResult::Sat => {
            let values: Vec<bool> = (1..=cnf.num_vars)
                .map(|v| engine.value(Variable::try_from(v).expect("variable count overflowed")))
                .collect();
            Ok(Outcome::Satisfiable(Model::from_values(&values)))
        }
        SolveResult::Unsat => Ok(Outcome::Unsatisfiable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::clause::Clause;
    use crate::sat::dpll::Dpll;

    fn clause(lits: &[i32]) -> Clause {
        lits.iter().map(|&l| Literal::from_i32(l)).collect()
    }

    #[test]
    fn test_model_values() {
        let model = Model::from_values(&[true, false, true]);
        assert_eq!(model.len(), 3);
        assert!(model.value(1));
        assert!(!model.value(2));
        assert!(model.literal_value(Literal::from_i32(-2)));
        assert!(!model.literal_value(Literal::from_i32(-3)));
    }

    #[test]
    fn test_solve_formula_sat_reads_every_variable() {
        let cnf = Cnf::new(vec![clause(&[1]), clause(&[-2])], 3);
        let mut engine = Dpll::new();

        let outcome = solve_formula(&cnf, &mut engine).expect("engine failed");
        let model = outcome.model().expect("expected a model");
        assert_eq!(model.len(), 3);
        assert!(model.value(1));
        assert!(!model.value(2));
    }

    #[test]
    fn test_solve_formula_unsat() {
        let cnf = Cnf::new(vec![clause(&[1]), clause(&[-1])], 1);
        let mut engine = Dpll::new();

        let outcome = solve_formula(&cnf, &mut engine).expect("engine failed");
        assert_eq!(outcome, Outcome::Unsatisfiable);
        assert!(outcome.model().is_none());
    }
}
