//! # Encodings for Cardinality Constraints to CNF
//!
//! CNF encodings for at-most-one, exactly-one and at-most/at-least-k
//! constraints. Every encoder owns its input literals, writes its clauses
//! into a [`CollectClauses`] and draws auxiliary variables from a
//! [`ManageVars`](crate::instances::ManageVars).

use thiserror::Error;

use crate::{instances::AllocError, types::Clause};

pub mod am1;
pub mod atomics;
pub mod card;

/// Trait for collecting clauses. Mainly used when generating encodings and implemented by
/// [`instances::Cnf`](crate::instances::Cnf).
pub trait CollectClauses: Extend<Clause> {
    /// Gets the number of clauses in the collection
    fn n_clauses(&self) -> usize;
}

/// Errors from encodings
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// At-least-one or exactly-one over no literals is unsatisfiable
    #[error("cannot require a true literal in an empty group")]
    EmptyGroup,
    /// A commander group size of zero was requested
    #[error("commander group size must be at least 1")]
    InvalidGroupSize,
    /// Fresh variables could not be allocated
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

/// Trait for encodings that track statistics.
pub trait EncodeStats {
    /// Gets the number of clauses in the encoding
    fn n_clauses(&self) -> usize;

    /// Gets the number of variables in the encoding
    fn n_vars(&self) -> u32;
}

/// Trait for encodings that allow iterating over their input literals
pub trait IterInputs {
    /// The iterator type
    type Iter<'a>: Iterator<Item = crate::types::Lit>
    where
        Self: 'a;

    /// Gets an iterator over the input literals
    fn iter(&self) -> Self::Iter<'_>;
}
