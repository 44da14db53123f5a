#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The expression AST.
//!
//! An owned tree built by one parse and consumed by one encoding pass;
//! atoms hold the variable id their signal name was interned to, so the
//! tree never carries strings.

use crate::circuit::token::GateOp;
use crate::sat::literal::Variable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Atom(Variable),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Xor(Box<Expr>, Box<Expr>),
}

impl Expr {
    #[must_use]
    pub fn not(operand: Self) -> Self {
        Self::Not(Box::new(operand))
    }

    #[must_use]
    pub fn binary(op: GateOp, lhs: Self, rhs: Self) -> Self {
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            GateOp::And => Self::And(lhs, rhs),
            GateOp::Or => Self::Or(lhs, rhs),
            GateOp::Xor => Self::Xor(lhs, rhs),
        }
    }

    /// Evaluates the expression under the variable valuation `value_of`.
    pub fn evaluate(&self, value_of: &impl Fn(Variable) -> bool) -> bool {
        match self {
            Self::Atom(var) => value_of(*var),
            Self::Not(e) => !e.evaluate(value_of),
            Self::And(a, b) => a.evaluate(value_of) && b.evaluate(value_of),
            Self::Or(a, b) => a.evaluate(value_of) || b.evaluate(value_of),
            Self::Xor(a, b) => a.evaluate(value_of) != b.evaluate(value_of),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_gates() {
        let a = || Expr::Atom(1);
        let b = || Expr::Atom(2);
        let tt = |expr: Expr, va: bool, vb: bool| {
            expr.evaluate(&|v| if v == 1 { va } else { vb })
        };

        assert!(tt(Expr::binary(GateOp::And, a(), b()), true, true));
        assert!(!tt(Expr::binary(GateOp::And, a(), b()), true, false));
        assert!(tt(Expr::binary(GateOp::Or, a(), b()), false, true));
        assert!(!tt(Expr::binary(GateOp::Or, a(), b()), false, false));
        assert!(tt(Expr::binary(GateOp::Xor, a(), b()), true, false));
        assert!(!tt(Expr::binary(GateOp::Xor, a(), b()), true, true));
        assert!(tt(Expr::not(a()), false, false));
    }

    #[test]
    fn test_evaluate_nested() {
        // ~(a & b) ^ a
        let expr = Expr::binary(
            GateOp::Xor,
            Expr::not(Expr::binary(GateOp::And, Expr::Atom(1), Expr::Atom(2))),
            Expr::Atom(1),
        );
        // All-true: the AND holds, its negation fails, XOR with a=1 holds.
        assert!(expr.evaluate(&|_| true));
        // a=1, b=0: the negated AND holds, XOR of two trues fails.
        assert!(!expr.evaluate(&|v| v == 1));
    }
}
