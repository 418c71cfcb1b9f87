//! # CNF Encodings for Cardinality Constraints
//!
//! The module contains implementations of CNF encodings for cardinality
//! constraints of the forms `sum of lits <= k`, `sum of lits >= k` and
//! `sum of lits = k`.
//!
//! ## Example Usage
//!
//! ```
//! use cardsat::{
//!     encodings::card::{BoundBoth, SequentialCounter},
//!     instances::{BasicVarManager, Cnf, ManageVars},
//!     lit, var,
//! };
//!
//! let mut var_manager = BasicVarManager::from_next_free(var![4]);
//!
//! let mut enc = SequentialCounter::from(vec![lit![0], lit![1], lit![2], lit![3]]);
//! let mut encoding = Cnf::new();
//! enc.encode_both(2, &mut encoding, &mut var_manager).unwrap();
//! ```
//!
//! When using at-most-1 and cardinality encodings at the same time, it is
//! recommended to import only the modules or rename the traits, e.g., `use
//! card::Encode as EncodeCard`.

use super::{CollectClauses, EncodeStats, Error, IterInputs};
use crate::{instances::ManageVars, types::Lit};

mod sequential;
pub use sequential::SequentialCounter;

/// Trait for all cardinality encodings of form `sum of lits <> k`
pub trait Encode: Extend<Lit> + IterInputs + EncodeStats {
    /// Gets the number of input literals in the encoding
    fn n_lits(&self) -> usize;
}

/// Trait for cardinality encodings that enforce upper bounds of the form
/// `sum of lits <= k`
pub trait BoundUpper: Encode {
    /// Encodes and enforces `sum of lits <= k`. A bound of at least the
    /// number of inputs holds trivially and produces no clauses.
    ///
    /// # Errors
    ///
    /// If auxiliary variables cannot be allocated.
    fn encode_ub<Col>(
        &mut self,
        k: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses;
}

/// Trait for cardinality encodings that enforce lower bounds of the form
/// `sum of lits >= k`
pub trait BoundLower: Encode {
    /// Encodes and enforces `sum of lits >= k`. A bound of zero holds
    /// trivially and produces no clauses. A bound larger than the number of
    /// inputs produces an unsatisfiable clause set.
    ///
    /// # Errors
    ///
    /// If auxiliary variables cannot be allocated.
    fn encode_lb<Col>(
        &mut self,
        k: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses;
}

/// Trait for cardinality encodings that enforce both bounds
pub trait BoundBoth: BoundUpper + BoundLower {
    /// Encodes and enforces `sum of lits = k`
    ///
    /// # Errors
    ///
    /// See [`BoundUpper::encode_ub`] and [`BoundLower::encode_lb`].
    fn encode_both<Col>(
        &mut self,
        k: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        self.encode_ub(k, collector, var_manager)?;
        self.encode_lb(k, collector, var_manager)
    }
}
