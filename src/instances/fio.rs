//! # File IO for Clause Sets and Solver Output
//!
//! Writing compiled clause sets as DIMACS CNF and reading back the output of
//! an external SAT solver in the SAT competition format.

use std::io::BufRead;

use nom::{
    character::complete::{char, i32, space0, space1},
    combinator::{all_consuming, opt},
    multi::separated_list0,
    sequence::{preceded, terminated},
    IResult,
};
use thiserror::Error;

use crate::types::{Assignment, Lit, TernaryVal, Var};

pub mod dimacs;

/// The outcome reported by an external SAT solver
#[derive(Debug, PartialEq, Eq)]
pub enum SolverOutput {
    /// The instance is satisfiable, with the model collected from the value
    /// lines
    Sat(Assignment),
    /// The instance is unsatisfiable
    Unsat,
    /// The solver gave up
    Unknown,
}

/// Errors in the overall structure of solver output
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SatSolverOutputError {
    /// No `s` line was found
    #[error("no solution line found in the output")]
    NoSline,
    /// The solver claimed satisfiability but printed no `v` line
    #[error("no value line found in the output")]
    NoVline,
    /// The `s` line has an unknown status
    #[error("invalid solution line found in the output")]
    InvalidSLine,
}

/// Errors within a single value line
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidVLine {
    /// The line could not be read as a list of literals
    #[error("malformed value line: `{0}`")]
    Malformed(String),
    /// A variable is assigned both values
    #[error("the solver assigned {0} both values")]
    ConflictingAssignment(Var),
}

/// Parses the output of a SAT solver.
///
/// Lines other than `s` and `v` lines are ignored. A model may be split over
/// several `v` lines, the terminating `0` may appear on any of them.
/// `INDETERMINATE` and `UNKNOWN` are both reported as
/// [`SolverOutput::Unknown`].
///
/// The assignment grows with the highest variable in the output. For output
/// from an untrusted source, use [`parse_sat_solver_output_upto`].
///
/// # Errors
///
/// IO errors from the reader, [`SatSolverOutputError`] if the output is
/// incomplete and [`InvalidVLine`] if a value line is malformed.
pub fn parse_sat_solver_output<R: BufRead>(reader: R) -> anyhow::Result<SolverOutput> {
    parse_output(reader, None)
}

/// Same as [`parse_sat_solver_output`], but only keeps the values of
/// variables up to `max_var`. Values of higher variables are checked for
/// syntax and otherwise skipped, so the assignment never covers more than
/// `max_var`.
///
/// # Errors
///
/// See [`parse_sat_solver_output`].
pub fn parse_sat_solver_output_upto<R: BufRead>(
    reader: R,
    max_var: Var,
) -> anyhow::Result<SolverOutput> {
    parse_output(reader, Some(max_var))
}

fn parse_output<R: BufRead>(reader: R, max_var: Option<Var>) -> anyhow::Result<SolverOutput> {
    let mut is_sat = false;
    let mut solution: Option<Assignment> = None;

    for line in reader.lines() {
        let line = line?;

        if let Some(status) = line.strip_prefix("s ") {
            match status.trim() {
                s if s.starts_with("UNSATISFIABLE") => return Ok(SolverOutput::Unsat),
                s if s.starts_with("UNKNOWN") || s.starts_with("INDETERMINATE") => {
                    return Ok(SolverOutput::Unknown)
                }
                s if s.starts_with("SATISFIABLE") => is_sat = true,
                _ => anyhow::bail!(SatSolverOutputError::InvalidSLine),
            }
            continue;
        }

        if line == "v" || line.starts_with("v ") {
            let lits = parse_vline(&line)?;
            let assign = solution.get_or_insert_with(Assignment::default);
            for lit in lits
                .into_iter()
                .filter(|l| max_var.map_or(true, |max| l.var() <= max))
            {
                match assign.var_value(lit.var()) {
                    TernaryVal::DontCare => assign.assign_lit(lit),
                    val if val == TernaryVal::from(lit.is_pos()) => (),
                    _ => anyhow::bail!(InvalidVLine::ConflictingAssignment(lit.var())),
                }
            }
        }
    }

    if !is_sat {
        anyhow::bail!(SatSolverOutputError::NoSline);
    }
    match solution {
        Some(solution) => Ok(SolverOutput::Sat(solution)),
        None => anyhow::bail!(SatSolverOutputError::NoVline),
    }
}

/// Parses a single value line into its literals, dropping the terminating
/// zero if present
fn parse_vline(line: &str) -> Result<Vec<Lit>, InvalidVLine> {
    let (_, vals) = all_consuming(vline)(line.trim_end())
        .map_err(|_| InvalidVLine::Malformed(line.to_string()))?;
    vals.into_iter()
        .take_while(|&v| v != 0)
        .map(|v| Lit::from_ipasir(v).map_err(|_| InvalidVLine::Malformed(line.to_string())))
        .collect()
}

fn vline(input: &str) -> IResult<&str, Vec<i32>> {
    preceded(
        terminated(char('v'), opt(space1)),
        terminated(separated_list0(space1, i32), space0),
    )(input)
}
