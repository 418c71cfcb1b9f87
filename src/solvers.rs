//! # Interfaces to SAT Solvers
//!
//! This module holds the boundary to SAT solvers. Compiled clause sets are
//! handed to anything implementing [`Solve`] and the model comes back as an
//! [`Assignment`]. The search itself is entirely the solver's business.
//!
//! ## Available Solvers
//!
//! ### BatSat
//!
//! [BatSat](https://github.com/c-cube/batsat) is an incremental SAT solver
//! implemented in pure Rust. It is available as `BatsatSolver` with the
//! `batsat` feature, which is enabled by default.
//!
//! ### External Solvers
//!
//! Any other solver can be used by writing the CNF in DIMACS format
//! ([`Cnf::write_dimacs`]) and parsing its output with
//! [`parse_sat_solver_output`](crate::instances::fio::parse_sat_solver_output).

use core::time::Duration;
use std::fmt;

use crate::{
    clause,
    encodings::CollectClauses,
    instances::Cnf,
    types::{Assignment, Clause, Lit, TernaryVal, Var},
};

#[cfg(feature = "batsat")]
mod batsat;
#[cfg(feature = "batsat")]
pub use self::batsat::BatsatSolver;

/// Trait for all SAT solvers in this library.
/// Solvers outside of this library can also implement this trait to be able
/// to use them with this library.
pub trait Solve: Extend<Clause> {
    /// Gets the signature of the solver implementation
    fn signature(&self) -> &'static str;

    /// Solves the internal CNF formula without any assumptions.
    ///
    /// # Errors
    ///
    /// If the solver fails internally.
    fn solve(&mut self) -> anyhow::Result<SolverResult>;

    /// Gets a solution found by the solver up to a specified highest variable.
    ///
    /// # Errors
    ///
    /// If the solver is not in the satisfied state.
    fn solution(&self, high_var: Var) -> anyhow::Result<Assignment> {
        let len = high_var.idx32() + 1;
        let mut assignment = Vec::with_capacity(len as usize);
        for idx in 0..len {
            assignment.push(self.lit_val(Lit::positive(idx))?);
        }
        Ok(Assignment::from(assignment))
    }

    /// Same as [`Solve::lit_val`], but for variables.
    ///
    /// # Errors
    ///
    /// If the solver is not in the satisfied state.
    fn var_val(&self, var: Var) -> anyhow::Result<TernaryVal> {
        self.lit_val(var.pos_lit())
    }

    /// Gets an assignment of a literal in the solution.
    ///
    /// # Errors
    ///
    /// If the solver is not in the satisfied state.
    fn lit_val(&self, lit: Lit) -> anyhow::Result<TernaryVal>;

    /// Adds a clause to the solver.
    ///
    /// # Errors
    ///
    /// If the solver rejects the clause.
    fn add_clause(&mut self, clause: Clause) -> anyhow::Result<()>;

    /// Like [`Solve::add_clause`] but for unit clauses (clauses with one literal).
    ///
    /// # Errors
    ///
    /// If the solver rejects the clause.
    fn add_unit(&mut self, lit: Lit) -> anyhow::Result<()> {
        self.add_clause(clause![lit])
    }

    /// Like [`Solve::add_clause`] but for clauses with two literals.
    ///
    /// # Errors
    ///
    /// If the solver rejects the clause.
    fn add_binary(&mut self, lit1: Lit, lit2: Lit) -> anyhow::Result<()> {
        self.add_clause(clause![lit1, lit2])
    }

    /// Adds all clauses from a [`Cnf`] instance.
    ///
    /// # Errors
    ///
    /// If the solver rejects a clause.
    fn add_cnf(&mut self, cnf: Cnf) -> anyhow::Result<()> {
        cnf.into_iter().try_for_each(|cl| self.add_clause(cl))
    }
}

/// Trait for all SAT solvers in this library that support solving under
/// assumptions.
pub trait SolveIncremental: Solve {
    /// Solves the internal CNF formula under assumptions.
    ///
    /// # Errors
    ///
    /// If the solver fails internally.
    fn solve_assumps(&mut self, assumps: &[Lit]) -> anyhow::Result<SolverResult>;

    /// Gets a core found by an unsatisfiable query.
    /// A core is a clause entailed by the formula that contains only inverted
    /// literals of the assumptions.
    ///
    /// # Errors
    ///
    /// If the solver is not in the unsatisfied state.
    fn core(&mut self) -> anyhow::Result<Vec<Lit>>;
}

/// Solver statistics
#[derive(Clone, PartialEq, Default, Debug)]
pub struct SolverStats {
    /// The number of satisfiable queries executed
    pub n_sat: usize,
    /// The number of unsatisfiable queries executed
    pub n_unsat: usize,
    /// The number of terminated queries executed
    pub n_terminated: usize,
    /// The number of clauses in the solver
    pub n_clauses: usize,
    /// The highest variable in the solver
    pub max_var: Option<Var>,
    /// The average length of the clauses added to the solver
    pub avg_clause_len: f32,
    /// The total CPU time spent solving
    pub cpu_solve_time: Duration,
}

/// Trait for solvers that track certain statistics.
pub trait SolveStats {
    /// Gets the available statistics from the solver
    fn stats(&self) -> SolverStats;

    /// Gets the number of satisfiable queries executed.
    fn n_sat_solves(&self) -> usize {
        self.stats().n_sat
    }

    /// Gets the number of unsatisfiable queries executed.
    fn n_unsat_solves(&self) -> usize {
        self.stats().n_unsat
    }

    /// Gets the number of queries that were prematurely terminated.
    fn n_terminated(&self) -> usize {
        self.stats().n_terminated
    }

    /// Gets the total number of queries executed.
    fn n_solves(&self) -> usize {
        self.n_sat_solves() + self.n_unsat_solves() + self.n_terminated()
    }

    /// Gets the number of clauses in the solver.
    fn n_clauses(&self) -> usize {
        self.stats().n_clauses
    }

    /// Gets the variable with the highest index in the solver, if any.
    fn max_var(&self) -> Option<Var> {
        self.stats().max_var
    }

    /// Gets the average length of all clauses added to the solver.
    fn avg_clause_len(&self) -> f32 {
        self.stats().avg_clause_len
    }

    /// Gets the total CPU time spent solving.
    fn cpu_solve_time(&self) -> Duration {
        self.stats().cpu_solve_time
    }
}

/// Return value for solving queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverResult {
    /// The query was found satisfiable.
    Sat,
    /// The query was found unsatisfiable.
    Unsat,
    /// The query was prematurely interrupted.
    Interrupted,
}

impl fmt::Display for SolverResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverResult::Sat => write!(f, "SAT"),
            SolverResult::Unsat => write!(f, "UNSAT"),
            SolverResult::Interrupted => write!(f, "Interrupted"),
        }
    }
}

impl<S: Solve + SolveStats> CollectClauses for S {
    fn n_clauses(&self) -> usize {
        SolveStats::n_clauses(self)
    }
}
