#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Tseitin encoding of expression trees into CNF.
//!
//! Every binary gate gets a fresh variable constrained to be equivalent
//! to the gate's output, so nested gates compose by literal and the
//! clause count stays linear in the expression size. NOT needs neither a
//! fresh variable nor clauses: it is literal negation. Clauses are
//! emitted children-first, left before right, so identical expressions
//! always encode to identical formulas.

use crate::circuit::expr::Expr;
use crate::circuit::registry::SignalRegistry;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use log::debug;

/// Encodes `expr`, returning the literal that carries the expression's
/// truth value together with the clauses constraining it.
///
/// The returned formula does not yet assert the expression; callers that
/// want "the circuit output is true" add the root literal as a unit
/// clause. An expression that is a single atom (or negations of one)
/// yields no clauses at all.
pub fn encode(expr: &Expr, registry: &mut SignalRegistry) -> (Literal, Cnf) {
    let mut clauses = Vec::new();
    let root = encode_gate(expr, registry, &mut clauses);
    debug!(
        "encoded expression into {} clauses over {} variables",
        clauses.len(),
        registry.count()
    );
    (root, Cnf::new(clauses, registry.count()))
}

fn encode_gate(expr: &Expr, registry: &mut SignalRegistry, clauses: &mut Vec<Clause>) -> Literal {
    match expr {
        Expr::Atom(var) => Literal::from(*var),
        Expr::Not(e) => -encode_gate(e, registry, clauses),
        Expr::And(lhs, rhs) => {
            let a = encode_gate(lhs, registry, clauses);
            let b = encode_gate(rhs, registry, clauses);
            let z = Literal::from(registry.fresh());
            // z <=> a & b
            clauses.push(Clause::new([-z, a]));
            clauses.push(Clause::new([-z, b]));
            clauses.push(Clause::new([z, -a, -b]));
            z
        }
        Expr::Or(lhs, rhs) => {
            let a = encode_gate(lhs, registry, clauses);
            let b = encode_gate(rhs, registry, clauses);
            let z = Literal::from(registry.fresh());
            // z <=> a | b
            clauses.push(Clause::new([-z, a, b]));
            clauses.push(Clause::new([z, -a]));
            clauses.push(Clause::new([z, -b]));
            z
        }
        Expr::Xor(lhs, rhs) => {
            let a = encode_gate(lhs, registry, clauses);
            let b = encode_gate(rhs, registry, clauses);
            let z = Literal::from(registry.fresh());
            // z <=> a ^ b
            clauses.push(Clause::new([-z, a, b]));
            clauses.push(Clause::new([-z, -a, -b]));
            clauses.push(Clause::new([z, -a, b]));
            clauses.push(Clause::new([z, a, -b]));
            z
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::parser::parse;

    fn encode_text(text: &str) -> (Literal, Cnf, SignalRegistry) {
        let mut registry = SignalRegistry::new();
        let expr = parse(text, &mut registry).expect("parse failed");
        let (root, cnf) = encode(&expr, &mut registry);
        (root, cnf, registry)
    }

    fn clause(lits: &[i32]) -> Clause {
        lits.iter().map(|&l| Literal::from_i32(l)).collect()
    }

    #[test]
    fn test_atom_encodes_to_its_variable() {
        let (root, cnf, _) = encode_text("a");
        assert_eq!(root, Literal::from_i32(1));
        assert!(cnf.is_empty());
        assert_eq!(cnf.num_vars, 1);
    }

    #[test]
    fn test_not_is_literal_negation() {
        let (root, cnf, registry) = encode_text("~a");
        assert_eq!(root, Literal::from_i32(-1));
        assert!(cnf.is_empty());
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_double_negation_cancels() {
        let (root, cnf, _) = encode_text("~~a");
        assert_eq!(root, Literal::from_i32(1));
        assert!(cnf.is_empty());
    }

    #[test]
    fn test_and_clause_set() {
        // a=1, b=2, gate output z=3
        let (root, cnf, _) = encode_text("a & b");
        assert_eq!(root, Literal::from_i32(3));
        assert_eq!(
            cnf.clauses,
            vec![clause(&[-3, 1]), clause(&[-3, 2]), clause(&[3, -1, -2])]
        );
    }

    #[test]
    fn test_or_clause_set() {
        let (root, cnf, _) = encode_text("a | b");
        assert_eq!(root, Literal::from_i32(3));
        assert_eq!(
            cnf.clauses,
            vec![clause(&[-3, 1, 2]), clause(&[3, -1]), clause(&[3, -2])]
        );
    }

    #[test]
    fn test_xor_clause_set() {
        let (root, cnf, _) = encode_text("a ^ b");
        assert_eq!(root, Literal::from_i32(3));
        assert_eq!(
            cnf.clauses,
            vec![
                clause(&[-3, 1, 2]),
                clause(&[-3, -1, -2]),
                clause(&[3, -1, 2]),
                clause(&[3, 1, -2]),
            ]
        );
    }

    #[test]
    fn test_nested_gates_compose_through_fresh_variables() {
        // a=1, b=2, c=3; inner AND output 4, outer OR output 5.
        let (root, cnf, registry) = encode_text("(a & b) | c");
        assert_eq!(root, Literal::from_i32(5));
        assert_eq!(registry.count(), 5);
        assert_eq!(
            cnf.clauses,
            vec![
                clause(&[-4, 1]),
                clause(&[-4, 2]),
                clause(&[4, -1, -2]),
                clause(&[-5, 4, 3]),
                clause(&[5, -4]),
                clause(&[5, -3]),
            ]
        );
    }

    #[test]
    fn test_negated_gate_feeds_negated_literal() {
        // ~(a & b) contributes -4 as the outer operand.
        let (root, cnf, _) = encode_text("~(a & b) | c");
        assert_eq!(root, Literal::from_i32(5));
        assert_eq!(cnf.clauses[3], clause(&[-5, -4, 3]));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let (root_a, cnf_a, _) = encode_text("(a ^ b) & ~(c | a)");
        let (root_b, cnf_b, _) = encode_text("(a ^ b) & ~(c | a)");
        assert_eq!(root_a, root_b);
        assert_eq!(cnf_a, cnf_b);
    }
}
