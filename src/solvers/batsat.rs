//! # Interface to the BatSat SAT Solver
//!
//! Interface to the [BatSat](https://github.com/c-cube/batsat) incremental
//! SAT solver. BatSat is fully implemented in Rust and therefore needs no
//! native toolchain.
//!
//! # BatSat Version
//!
//! The version of BatSat used is 0.6.0.

use std::time::Duration;

use batsat::{lbool, BasicCallbacks, Callbacks, SolverInterface};
use cpu_time::ProcessTime;

use super::{Solve, SolveIncremental, SolveStats, SolverResult, SolverStats};
use crate::types::{Clause, Lit, TernaryVal, Var};

/// Wrapper for a [`batsat::Solver`] with the default callbacks
pub type BatsatSolver = Solver<BasicCallbacks>;

/// Wrapper for a [`batsat::Solver`]
#[derive(Default)]
pub struct Solver<Cb: Callbacks> {
    internal: batsat::Solver<Cb>,
    /// The result of the last query, reset when clauses are added
    state: Option<SolverResult>,
    n_sat: usize,
    n_unsat: usize,
    n_terminated: usize,
    avg_clause_len: f32,
    cpu_time: Duration,
}

impl<Cb: Callbacks> Solver<Cb> {
    /// Gets a reference to the internal BatSat solver
    #[must_use]
    pub fn batsat_ref(&self) -> &batsat::Solver<Cb> {
        &self.internal
    }

    #[allow(clippy::cast_precision_loss)]
    #[inline]
    fn update_avg_clause_len(&mut self, clause: &Clause) {
        let n_clauses = self.n_clauses();
        self.avg_clause_len = (self.avg_clause_len * (n_clauses as f32) + clause.len() as f32)
            / (n_clauses + 1) as f32;
    }

    /// Translates a literal, creating the BatSat variable if necessary. BatSat
    /// variable `0` is never used, variable index `i` maps to BatSat
    /// variable `i + 1`.
    fn to_batsat(&mut self, lit: Lit) -> batsat::Lit {
        batsat::Lit::new(self.internal.var_of_int(lit.vidx32() + 1), lit.is_pos())
    }

    fn add_clause_internal(&mut self, clause: &Clause) {
        self.update_avg_clause_len(clause);
        let mut c: Vec<_> = clause.iter().map(|&l| self.to_batsat(l)).collect();
        self.internal.add_clause_reuse(&mut c);
        self.state = None;
    }

    fn solve_track_stats(&mut self, assumps: &[Lit]) -> SolverResult {
        let a: Vec<_> = assumps.iter().map(|&l| self.to_batsat(l)).collect();

        let start = ProcessTime::now();
        let ret = match self.internal.solve_limited(&a) {
            x if x == lbool::TRUE => {
                self.n_sat += 1;
                SolverResult::Sat
            }
            x if x == lbool::FALSE => {
                self.n_unsat += 1;
                SolverResult::Unsat
            }
            _ => {
                self.n_terminated += 1;
                SolverResult::Interrupted
            }
        };
        self.cpu_time += start.elapsed();
        self.state = Some(ret);
        log::trace!("batsat query with {} assumptions: {ret}", assumps.len());
        ret
    }
}

impl<Cb: Callbacks> Extend<Clause> for Solver<Cb> {
    fn extend<T: IntoIterator<Item = Clause>>(&mut self, iter: T) {
        iter.into_iter()
            .for_each(|cl| self.add_clause_internal(&cl));
    }
}

impl<Cb: Callbacks> Solve for Solver<Cb> {
    fn signature(&self) -> &'static str {
        "BatSat 0.6.0"
    }

    fn solve(&mut self) -> anyhow::Result<SolverResult> {
        Ok(self.solve_track_stats(&[]))
    }

    fn lit_val(&self, lit: Lit) -> anyhow::Result<TernaryVal> {
        anyhow::ensure!(
            self.state == Some(SolverResult::Sat),
            "solver needs to be in the satisfied state to query values"
        );
        let model = self.internal.get_model();
        let val = match model.get(lit.vidx() + 1) {
            Some(&x) if x == lbool::TRUE => TernaryVal::True,
            Some(&x) if x == lbool::FALSE => TernaryVal::False,
            _ => TernaryVal::DontCare,
        };
        Ok(if lit.is_neg() { !val } else { val })
    }

    fn add_clause(&mut self, clause: Clause) -> anyhow::Result<()> {
        self.add_clause_internal(&clause);
        Ok(())
    }
}

impl<Cb: Callbacks> SolveIncremental for Solver<Cb> {
    fn solve_assumps(&mut self, assumps: &[Lit]) -> anyhow::Result<SolverResult> {
        Ok(self.solve_track_stats(assumps))
    }

    fn core(&mut self) -> anyhow::Result<Vec<Lit>> {
        anyhow::ensure!(
            self.state == Some(SolverResult::Unsat),
            "solver needs to be in the unsatisfied state to extract a core"
        );
        Ok(self
            .internal
            .unsat_core()
            .iter()
            .filter_map(|l| {
                let idx = l.var().idx().checked_sub(1)?;
                Some(Lit::new(idx, !l.sign()))
            })
            .collect())
    }
}

impl<Cb: Callbacks> SolveStats for Solver<Cb> {
    fn stats(&self) -> SolverStats {
        SolverStats {
            n_sat: self.n_sat,
            n_unsat: self.n_unsat,
            n_terminated: self.n_terminated,
            n_clauses: self.n_clauses(),
            max_var: self.max_var(),
            avg_clause_len: self.avg_clause_len,
            cpu_solve_time: self.cpu_time,
        }
    }

    fn n_clauses(&self) -> usize {
        usize::try_from(self.internal.num_clauses()).unwrap_or(usize::MAX)
    }

    fn max_var(&self) -> Option<Var> {
        // BatSat counts the unused variable 0
        self.internal
            .num_vars()
            .checked_sub(2)
            .and_then(|idx| Var::new_with_error(idx).ok())
    }
}
