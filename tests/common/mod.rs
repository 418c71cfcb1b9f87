//! Helpers shared by the integration tests

#![allow(dead_code)]

use cardsat::{
    solvers::{SolveIncremental, SolverResult},
    types::{Lit, Var},
};

/// Solves under assumptions and asserts that the result is as given
pub fn test_assignment<S: SolveIncremental>(solver: &mut S, assumps: &[Lit], expected: SolverResult) {
    let res = solver.solve_assumps(assumps).unwrap();
    assert_eq!(res, expected, "wrong result under assumptions {assumps:?}");
}

/// Iterates through all assignments of the variables of `inputs` and checks
/// that the solver agrees with `holds` on the number of true input literals.
/// Assignments are enumerated from all-true to all-false, with the first
/// variable as the most significant bit.
pub fn test_all_counts<S, F>(solver: &mut S, inputs: &[Lit], holds: F)
where
    S: SolveIncremental,
    F: Fn(usize) -> bool,
{
    let mut vars: Vec<Var> = inputs.iter().map(|l| l.var()).collect();
    vars.sort_unstable();
    vars.dedup();
    assert!(vars.len() < 16, "too many variables for exhaustive testing");
    let n_vars = vars.len();
    for mask in (0..1usize << n_vars).rev() {
        let value = |var: Var| {
            let pos = vars.iter().position(|&v| v == var).unwrap();
            mask >> (n_vars - 1 - pos) & 1 == 1
        };
        let assumps: Vec<Lit> = vars
            .iter()
            .map(|&v| if value(v) { v.pos_lit() } else { v.neg_lit() })
            .collect();
        let count = inputs
            .iter()
            .filter(|l| value(l.var()) != l.is_neg())
            .count();
        let expected = if holds(count) {
            SolverResult::Sat
        } else {
            SolverResult::Unsat
        };
        test_assignment(solver, &assumps, expected);
    }
}

/// Positive literals of the first `n` variables
pub fn inputs(n: u32) -> Vec<Lit> {
    (0..n).map(Lit::positive).collect()
}
