//! # N-Queens Constraint Compiler and Model Decoder
//!
//! Compiles the N-Queens placement problem to CNF by applying cardinality
//! encodings to the rows, columns and diagonals of a board of variables,
//! and maps solver models back onto the board.
//!
//! Rows and columns are encoded with exactly-1 constraints, diagonals with
//! at-most-1 constraints. The encoding used for each of the two families is
//! configured separately in [`QueensConfig`].
//!
//! ## Example Usage
//!
//! ```
//! # #[cfg(feature = "batsat")]
//! # {
//! use cardsat::{
//!     encodings::am1::Strategy,
//!     queens::{solve_queens, QueensConfig},
//!     solvers::BatsatSolver,
//! };
//!
//! let config = QueensConfig::uniform(6, Strategy::Product);
//! let mut solver = BatsatSolver::default();
//! let board = solve_queens(&config, &mut solver).unwrap().unwrap();
//! assert!(board.is_valid_queens());
//! println!("{board}");
//! # }
//! ```

use std::{fmt, io};

use itertools::Itertools;
use thiserror::Error;

use crate::{
    encodings::{self, am1::Strategy},
    instances::{BasicVarManager, Cnf, ManageVars},
    solvers::{Solve, SolverResult},
    types::{Assignment, Lit, TypeError, Var},
};

/// Errors from compiling or solving a placement problem
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration cannot be compiled
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// An encoder rejected a constraint group
    #[error("encoding failed: {0}")]
    Encoding(#[from] encodings::Error),
    /// The solver failed or gave no answer
    #[error("solver failed: {0}")]
    Solver(#[from] anyhow::Error),
}

/// Configuration of an N-Queens compilation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueensConfig {
    /// The board size
    pub n: usize,
    /// The encoding for the exactly-1 constraints on rows and columns
    pub lines: Strategy,
    /// The encoding for the at-most-1 constraints on diagonals
    pub diagonals: Strategy,
}

impl Default for QueensConfig {
    fn default() -> Self {
        Self {
            n: 8,
            lines: Strategy::Binomial,
            diagonals: Strategy::Binomial,
        }
    }
}

impl QueensConfig {
    /// Uses the same encoding for all constraint groups
    #[must_use]
    pub fn uniform(n: usize, strategy: Strategy) -> Self {
        Self {
            n,
            lines: strategy,
            diagonals: strategy,
        }
    }

    /// Commander encoding on rows and columns, binomial encoding on
    /// diagonals
    #[must_use]
    pub fn classic_commander(n: usize, group_size: usize) -> Self {
        Self {
            n,
            lines: Strategy::Commander { group_size },
            diagonals: Strategy::Binomial,
        }
    }

    /// Sets the board size
    #[must_use]
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Sets the encoding for rows and columns
    #[must_use]
    pub fn with_lines(mut self, strategy: Strategy) -> Self {
        self.lines = strategy;
        self
    }

    /// Sets the encoding for diagonals
    #[must_use]
    pub fn with_diagonals(mut self, strategy: Strategy) -> Self {
        self.diagonals = strategy;
        self
    }

    /// Checks the configuration
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] for an empty board, or a board with more
    /// cells than representable variables. [`Error::Encoding`] if one of the
    /// strategies is invalid.
    pub fn validate(&self) -> Result<(), Error> {
        if self.n == 0 {
            return Err(Error::InvalidConfig("board size must be at least 1"));
        }
        if Grid::n_cells(self.n).is_none() {
            return Err(Error::InvalidConfig("board has too many cells"));
        }
        self.lines.validate()?;
        self.diagonals.validate()?;
        Ok(())
    }
}

/// The `n x n` matrix of board variables. Cell `(row, col)` is variable
/// index `row * n + col`, i.e., identifier `row * n + col + 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    n: usize,
}

impl Grid {
    /// Creates the grid for an `n x n` board
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] if `n` is zero or the board has too many
    /// cells.
    pub fn new(n: usize) -> Result<Self, Error> {
        if n == 0 {
            return Err(Error::InvalidConfig("board size must be at least 1"));
        }
        Self::n_cells(n).ok_or(Error::InvalidConfig("board has too many cells"))?;
        Ok(Self { n })
    }

    /// The number of cells if all of them can be represented as variables
    fn n_cells(n: usize) -> Option<u32> {
        let cells = u32::try_from(n.checked_mul(n)?).ok()?;
        (cells <= Var::MAX_IDX).then_some(cells)
    }

    /// Gets the board size
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Gets the variable of a cell
    ///
    /// # Panics
    ///
    /// If the cell is outside of the board.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn cell(&self, row: usize, col: usize) -> Var {
        assert!(row < self.n && col < self.n, "cell outside of the board");
        // the grid is only constructed if all cells fit
        Var::new_unchecked((row * self.n + col) as u32)
    }

    /// Gets the highest board variable
    #[must_use]
    pub fn max_var(&self) -> Var {
        self.cell(self.n - 1, self.n - 1)
    }

    /// Gets the first variable that is not a board variable
    #[must_use]
    pub fn next_free(&self) -> Var {
        self.max_var() + 1
    }

    /// Gets the rows as groups of positive literals
    pub fn rows(&self) -> impl Iterator<Item = Vec<Lit>> + '_ {
        (0..self.n).map(move |row| {
            (0..self.n)
                .map(|col| self.cell(row, col).pos_lit())
                .collect::<Vec<_>>()
        })
    }

    /// Gets the columns as groups of positive literals
    pub fn cols(&self) -> impl Iterator<Item = Vec<Lit>> + '_ {
        (0..self.n).map(move |col| {
            (0..self.n)
                .map(|row| self.cell(row, col).pos_lit())
                .collect::<Vec<_>>()
        })
    }

    /// Gets every maximal diagonal in both directions, each exactly once and
    /// starting from its top cell. Diagonals consisting of a corner cell only
    /// are included.
    pub fn diagonals(&self) -> impl Iterator<Item = Vec<Lit>> + '_ {
        let n = self.n;
        // down-right diagonals start in the first row or the first column
        let down_right = (0..n)
            .map(|col| (0, col))
            .chain((1..n).map(|row| (row, 0)))
            .map(move |(row, col)| {
                (0..n - row.max(col))
                    .map(|k| self.cell(row + k, col + k).pos_lit())
                    .collect::<Vec<_>>()
            });
        // down-left diagonals start in the first row or the last column
        let down_left = (0..n)
            .map(|col| (0, col))
            .chain((1..n).map(move |row| (row, n - 1)))
            .map(move |(row, col)| {
                (0..(n - row).min(col + 1))
                    .map(|k| self.cell(row + k, col - k).pos_lit())
                    .collect::<Vec<_>>()
            });
        down_right.chain(down_left)
    }
}

/// The result of compiling a placement problem
#[derive(Debug)]
pub struct Compilation {
    /// The board variables
    pub grid: Grid,
    /// The compiled clauses
    pub cnf: Cnf,
    /// The allocator state after compilation
    pub var_manager: BasicVarManager,
}

impl Compilation {
    /// Writes the clauses as DIMACS CNF, announcing all board and auxiliary
    /// variables
    ///
    /// # Errors
    ///
    /// If writing fails, returns [`io::Error`].
    pub fn write_dimacs<W: io::Write>(&self, writer: W) -> Result<(), io::Error> {
        self.cnf.write_dimacs(writer, self.var_manager.n_used())
    }
}

/// Applies one encoding to one constraint group. A rejected group leaves no
/// clauses and no allocated variables behind.
pub(crate) fn encode_group(
    strategy: Strategy,
    lits: &[Lit],
    exactly: bool,
    cnf: &mut Cnf,
    var_manager: &mut dyn ManageVars,
) -> Result<(), encodings::Error> {
    let n_clauses = cnf.len();
    let next_free = var_manager.next_free();
    let res = if exactly {
        strategy.encode_eo(lits, cnf, var_manager)
    } else {
        strategy.encode_amo(lits, cnf, var_manager)
    };
    if let Err(err) = res {
        log::debug!("rolling back rejected {strategy} group of {} lits: {err}", lits.len());
        cnf.truncate(n_clauses);
        var_manager.forget_from(next_free);
        return Err(err);
    }
    Ok(())
}

/// Encodes one family of constraint groups. Groups with a single literal
/// only matter for exactly-1.
fn encode_family<Groups>(
    name: &str,
    groups: Groups,
    strategy: Strategy,
    exactly: bool,
    cnf: &mut Cnf,
    var_manager: &mut BasicVarManager,
) -> Result<(), encodings::Error>
where
    Groups: Iterator<Item = Vec<Lit>>,
{
    let (prev_clauses, prev_vars) = (cnf.len(), var_manager.n_used());
    let mut n_groups = 0;
    for group in groups.filter(|g| exactly || g.len() > 1) {
        encode_group(strategy, &group, exactly, cnf, var_manager)?;
        n_groups += 1;
    }
    log::debug!(
        "{name}: {n_groups} groups with {strategy}, {} clauses, {} vars",
        cnf.len() - prev_clauses,
        var_manager.n_used() - prev_vars
    );
    Ok(())
}

/// Compiles an N-Queens instance
///
/// # Errors
///
/// If the configuration is invalid or an encoding fails.
pub fn compile(config: &QueensConfig) -> Result<Compilation, Error> {
    config.validate()?;
    let grid = Grid::new(config.n)?;
    let mut var_manager = BasicVarManager::from_next_free(grid.next_free());
    let mut cnf = Cnf::new();

    encode_family(
        "rows",
        grid.rows(),
        config.lines,
        true,
        &mut cnf,
        &mut var_manager,
    )?;
    encode_family(
        "columns",
        grid.cols(),
        config.lines,
        true,
        &mut cnf,
        &mut var_manager,
    )?;
    encode_family(
        "diagonals",
        grid.diagonals(),
        config.diagonals,
        false,
        &mut cnf,
        &mut var_manager,
    )?;

    log::info!(
        "compiled {n}-queens: {} clauses over {} vars",
        cnf.len(),
        var_manager.n_used(),
        n = config.n
    );
    Ok(Compilation {
        grid,
        cnf,
        var_manager,
    })
}

/// An `n x n` board of queens
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    n: usize,
    cells: Vec<bool>,
}

impl Board {
    /// Decodes a board from an assignment. Auxiliary variables are ignored
    /// and unassigned cells are empty.
    #[must_use]
    pub fn decode(grid: &Grid, assignment: &Assignment) -> Self {
        let n = grid.n();
        let cells = (0..n)
            .flat_map(|row| (0..n).map(move |col| (row, col)))
            .map(|(row, col)| {
                assignment
                    .var_value(grid.cell(row, col))
                    .to_bool_with_def(false)
            })
            .collect();
        Self { n, cells }
    }

    /// Decodes a board from a solver model of signed integers. Values of
    /// variables beyond the board are skipped.
    ///
    /// # Errors
    ///
    /// [`TypeError`] if the model contains zero or out-of-range values.
    pub fn from_ipasir_model(grid: &Grid, model: &[i32]) -> Result<Self, TypeError> {
        let assignment = Assignment::from_ipasir_upto(model, grid.max_var())?;
        Ok(Self::decode(grid, &assignment))
    }

    /// Gets the board size
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Checks whether a cell holds a queen
    ///
    /// # Panics
    ///
    /// If the cell is outside of the board.
    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        assert!(row < self.n && col < self.n, "cell outside of the board");
        self.cells[row * self.n + col]
    }

    /// Gets the positions of all queens in row-major order
    pub fn queens(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &q)| q)
            .map(|(idx, _)| (idx / self.n, idx % self.n))
    }

    /// Gets the board as 0/1 occupancy rows
    #[must_use]
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.n)
            .map(|row| row.iter().map(|&q| u8::from(q)).collect())
            .collect()
    }

    /// Checks that every row and column holds exactly one queen and every
    /// diagonal at most one
    #[must_use]
    pub fn is_valid_queens(&self) -> bool {
        let n = self.n;
        let mut rows = vec![0usize; n];
        let mut cols = vec![0usize; n];
        let mut down_right = vec![0usize; 2 * n - 1];
        let mut down_left = vec![0usize; 2 * n - 1];
        for (row, col) in self.queens() {
            rows[row] += 1;
            cols[col] += 1;
            down_right[row + n - 1 - col] += 1;
            down_left[row + col] += 1;
        }
        rows.iter().chain(&cols).all(|&c| c == 1)
            && down_right.iter().chain(&down_left).all(|&c| c <= 1)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .cells
            .chunks(self.n)
            .map(|row| row.iter().map(|&q| if q { 'Q' } else { '.' }).join(" "));
        write!(f, "{}", rows.format("\n"))
    }
}

/// Compiles an N-Queens instance, solves it and decodes the board.
/// Returns `Ok(None)` if the instance has no solution.
///
/// # Errors
///
/// If compilation fails, the solver fails or the solver is interrupted.
pub fn solve_queens<S: Solve>(config: &QueensConfig, solver: &mut S) -> Result<Option<Board>, Error> {
    let Compilation { grid, cnf, .. } = compile(config)?;
    solver.add_cnf(cnf)?;
    let res = solver.solve()?;
    log::info!("{}: {n}-queens is {res}", solver.signature(), n = config.n);
    match res {
        SolverResult::Sat => {
            let solution = solver.solution(grid.max_var())?;
            Ok(Some(Board::decode(&grid, &solution)))
        }
        SolverResult::Unsat => Ok(None),
        SolverResult::Interrupted => Err(anyhow::anyhow!("solver was interrupted").into()),
    }
}
