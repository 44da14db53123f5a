#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The default [`SatEngine`]: a classic DPLL procedure.
//!
//! Unit propagation to a fixpoint, then branch on the first unassigned
//! variable, trying `true` before `false`. Branching works on cloned
//! assignments, so backtracking is implicit in the recursion. This is a
//! correctness-first engine; anything cleverer belongs behind the same
//! trait.

use crate::sat::clause::Clause;
use crate::sat::engine::{EngineError, SatEngine, SolveResult};
use crate::sat::literal::{Literal, Variable};
use log::trace;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

/// Partial assignment indexed by variable id; index 0 is unused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Assignment(Vec<VarState>);

impl Assignment {
    fn new(num_vars: usize) -> Self {
        Self(vec![VarState::Unassigned; num_vars + 1])
    }

    fn set(&mut self, var: Variable, value: bool) {
        self.0[var as usize] = VarState::Assigned(value);
    }

    fn var_value(&self, var: Variable) -> Option<bool> {
        match self.0.get(var as usize) {
            Some(VarState::Assigned(b)) => Some(*b),
            _ => None,
        }
    }

    fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.var_value(lit.variable())
            .map(|b| b == lit.polarity())
    }

    fn first_unassigned(&self) -> Option<Variable> {
        self.0
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, state)| **state == VarState::Unassigned)
            .map(|(i, _)| Variable::try_from(i).expect("variable count overflowed"))
    }
}

/// A DPLL engine. One instance per solving session.
#[derive(Debug, Clone, Default)]
pub struct Dpll {
    num_vars: usize,
    clauses: Vec<Clause>,
    assignment: Assignment,
    time_budget: Option<Duration>,
}

impl Dpll {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the solve call; exceeding the budget surfaces as
    /// [`EngineError::DeadlineExceeded`].
    #[must_use]
    pub const fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}

impl SatEngine for Dpll {
    fn fresh_var(&mut self) -> Variable {
        self.num_vars += 1;
        Variable::try_from(self.num_vars).expect("variable count overflowed")
    }

    fn assert_clause(&mut self, literals: &[Literal]) {
        self.clauses.push(Clause::from(literals));
    }

    fn solve(&mut self) -> Result<SolveResult, EngineError> {
        let deadline = self.time_budget.map(|budget| Instant::now() + budget);
        let initial = Assignment::new(self.num_vars);

        match search(&self.clauses, initial, deadline)? {
            Some(assignment) => {
                self.assignment = assignment;
                Ok(SolveResult::Sat)
            }
            None => Ok(SolveResult::Unsat),
        }
    }

    fn value(&self, var: Variable) -> bool {
        // Variables left unassigned by the search are don't-cares.
        self.assignment.var_value(var).unwrap_or(false)
    }
}

fn search(
    clauses: &[Clause],
    mut assignment: Assignment,
    deadline: Option<Instant>,
) -> Result<Option<Assignment>, EngineError> {
    if let Some(limit) = deadline {
        if Instant::now() >= limit {
            return Err(EngineError::DeadlineExceeded);
        }
    }

    propagate_units(clauses, &mut assignment);

    if is_falsified(clauses, &assignment) {
        return Ok(None);
    }
    if is_satisfied(clauses, &assignment) {
        return Ok(Some(assignment));
    }

    let Some(var) = assignment.first_unassigned() else {
        return Ok(None);
    };
    trace!("branching on variable {var}");

    let mut true_branch = assignment.clone();
    true_branch.set(var, true);
    if let Some(model) = search(clauses, true_branch, deadline)? {
        return Ok(Some(model));
    }

    assignment.set(var, false);
    search(clauses, assignment, deadline)
}

/// Assigns the sole unassigned literal of every otherwise-false clause,
/// repeating until no clause is unit.
fn propagate_units(clauses: &[Clause], assignment: &mut Assignment) {
    loop {
        let mut changed = false;

        for clause in clauses {
            if clause
                .iter()
                .any(|&lit| assignment.literal_value(lit) == Some(true))
            {
                continue;
            }

            let mut unassigned = clause
                .iter()
                .filter(|&&lit| assignment.literal_value(lit).is_none());

            if let (Some(&lit), None) = (unassigned.next(), unassigned.next()) {
                assignment.set(lit.variable(), lit.polarity());
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }
}

fn is_satisfied(clauses: &[Clause], assignment: &Assignment) -> bool {
    clauses.iter().all(|clause| {
        clause
            .iter()
            .any(|&lit| assignment.literal_value(lit) == Some(true))
    })
}

fn is_falsified(clauses: &[Clause], assignment: &Assignment) -> bool {
    clauses.iter().any(|clause| {
        clause
            .iter()
            .all(|&lit| assignment.literal_value(lit) == Some(false))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_clause(engine: &mut Dpll, lits: &[i32]) {
        let lits: Vec<Literal> = lits.iter().map(|&l| Literal::from_i32(l)).collect();
        engine.assert_clause(&lits);
    }

    fn engine_with_vars(n: usize) -> Dpll {
        let mut engine = Dpll::new();
        for _ in 0..n {
            engine.fresh_var();
        }
        engine
    }

    #[test]
    fn test_unit_propagation_chain() {
        let mut engine = engine_with_vars(3);
        assert_clause(&mut engine, &[1]);
        assert_clause(&mut engine, &[-1, 2]);
        assert_clause(&mut engine, &[-2, 3]);

        assert_eq!(engine.solve(), Ok(SolveResult::Sat));
        assert!(engine.value(1));
        assert!(engine.value(2));
        assert!(engine.value(3));
    }

    #[test]
    fn test_unsat_pair() {
        let mut engine = engine_with_vars(1);
        assert_clause(&mut engine, &[1]);
        assert_clause(&mut engine, &[-1]);

        assert_eq!(engine.solve(), Ok(SolveResult::Unsat));
    }

    #[test]
    fn test_branching_required() {
        let mut engine = engine_with_vars(3);
        assert_clause(&mut engine, &[1, 2, 3]);
        assert_clause(&mut engine, &[-1, -2, 3]);
        assert_clause(&mut engine, &[-2, -3]);

        assert_eq!(engine.solve(), Ok(SolveResult::Sat));
        let value = |v| engine.value(v);
        assert!(value(1) || value(2) || value(3));
        assert!(!value(1) || !value(2) || value(3));
        assert!(!value(2) || !value(3));
    }

    #[test]
    fn test_empty_clause_is_unsat() {
        let mut engine = engine_with_vars(1);
        engine.assert_clause(&[]);

        assert_eq!(engine.solve(), Ok(SolveResult::Unsat));
    }

    #[test]
    fn test_no_clauses_is_sat() {
        let mut engine = engine_with_vars(2);
        assert_eq!(engine.solve(), Ok(SolveResult::Sat));
    }

    #[test]
    fn test_zero_time_budget_reports_deadline() {
        let mut engine = engine_with_vars(2).with_time_budget(Duration::ZERO);
        assert_clause(&mut engine, &[1, 2]);
        assert_clause(&mut engine, &[-1, -2]);

        // Already past the deadline on entry, before any work happens.
        assert_eq!(engine.solve(), Err(EngineError::DeadlineExceeded));
    }
}
