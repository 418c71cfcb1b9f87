//! # Variable Allocation and Clause Sets
//!
//! The two pieces of shared state every encoder is threaded through: a
//! variable manager handing out fresh auxiliary variables and a [`Cnf`]
//! collecting the produced clauses.

use thiserror::Error;

use crate::types::{Lit, Var};

mod sat;
pub use sat::Cnf;

pub mod fio;

/// Errors from allocating new variables
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum AllocError {
    /// Zero variables were requested
    #[error("cannot allocate zero variables")]
    EmptyRequest,
    /// The request would exceed the highest representable variable
    #[error("allocating {requested} variables from {next} exceeds the maximum variable index {max}")]
    Exhausted {
        /// The next free variable at the time of the request
        next: Var,
        /// The number of requested variables
        requested: u32,
        /// The highest representable variable index
        max: u32,
    },
}

/// Trait for variable managers keeping track of used variables
///
/// The state of a variable manager is the next free variable. It never
/// decreases through allocation and a variable is never handed out twice,
/// unless it is explicitly released with [`ManageVars::forget_from`].
pub trait ManageVars {
    /// Gets the next variable that will be allocated
    fn next_free(&self) -> Var;

    /// Uses up the next free variable
    ///
    /// # Errors
    ///
    /// [`AllocError::Exhausted`] if no more variables can be represented.
    fn new_var(&mut self) -> Result<Var, AllocError>;

    /// Uses up the next free variable and returns its positive literal
    ///
    /// # Errors
    ///
    /// [`AllocError::Exhausted`] if no more variables can be represented.
    fn new_lit(&mut self) -> Result<Lit, AllocError> {
        Ok(self.new_var()?.pos_lit())
    }

    /// Uses up `count` consecutive fresh variables. The request is checked
    /// before any variable is used up, so a failed request leaves the
    /// manager unchanged.
    ///
    /// # Errors
    ///
    /// [`AllocError::EmptyRequest`] if `count` is zero,
    /// [`AllocError::Exhausted`] if the variables cannot be represented.
    fn new_vars(&mut self, count: u32) -> Result<Vec<Var>, AllocError> {
        if count == 0 {
            return Err(AllocError::EmptyRequest);
        }
        let next = self.next_free();
        let fits = Var::MAX_IDX
            .checked_sub(count - 1)
            .is_some_and(|last_start| next.idx32() <= last_start);
        if !fits {
            return Err(AllocError::Exhausted {
                next,
                requested: count,
                max: Var::MAX_IDX,
            });
        }
        (0..count).map(|_| self.new_var()).collect()
    }

    /// Same as [`ManageVars::new_vars`] but returning positive literals
    ///
    /// # Errors
    ///
    /// See [`ManageVars::new_vars`].
    fn new_lits(&mut self, count: u32) -> Result<Vec<Lit>, AllocError> {
        Ok(self
            .new_vars(count)?
            .into_iter()
            .map(Var::pos_lit)
            .collect())
    }

    /// Gets the used variable with the highest index
    fn max_var(&self) -> Option<Var>;

    /// Increases the next free variable index if the provided variable has a
    /// higher index than the next variable in the manager.
    /// Returns true if the next free index has been increased and false otherwise.
    fn increase_next_free(&mut self, v: Var) -> bool;

    /// Marks variables up to the given one as used. Returns true if the next
    /// free index has been increased and false otherwise.
    fn mark_used(&mut self, v: Var) -> bool {
        self.increase_next_free(v + 1)
    }

    /// Combines two variable managers.
    fn combine(&mut self, other: Self)
    where
        Self: Sized;

    /// Gets the number of used variables. Typically this is just the index of
    /// the next free variable.
    fn n_used(&self) -> u32;

    /// Forget variables `>= min_var`
    fn forget_from(&mut self, min_var: Var);
}

/// Simple counting variable manager
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicVarManager {
    next_var: Var,
}

impl BasicVarManager {
    /// Creates a new variable manager from a next free variable
    #[must_use]
    pub fn from_next_free(next_var: Var) -> BasicVarManager {
        BasicVarManager { next_var }
    }
}

impl ManageVars for BasicVarManager {
    fn next_free(&self) -> Var {
        self.next_var
    }

    fn new_var(&mut self) -> Result<Var, AllocError> {
        let v = self.next_var;
        if v.idx32() > Var::MAX_IDX {
            return Err(AllocError::Exhausted {
                next: v,
                requested: 1,
                max: Var::MAX_IDX,
            });
        }
        self.next_var += 1;
        Ok(v)
    }

    fn max_var(&self) -> Option<Var> {
        if self.next_var == Var::new(0) {
            None
        } else {
            Some(self.next_var - 1)
        }
    }

    fn increase_next_free(&mut self, v: Var) -> bool {
        if v > self.next_var {
            self.next_var = v;
            return true;
        };
        false
    }

    fn combine(&mut self, other: Self) {
        if other.next_var > self.next_var {
            self.next_var = other.next_var;
        };
    }

    fn n_used(&self) -> u32 {
        self.next_var.idx32()
    }

    fn forget_from(&mut self, min_var: Var) {
        self.next_var = std::cmp::min(self.next_var, min_var);
    }
}

impl Default for BasicVarManager {
    fn default() -> Self {
        Self {
            next_var: Var::new(0),
        }
    }
}
