//! # Binary (Bitwise) At-Most-1 Encoding
//!
//! ## References
//!
//! - Steven D. Prestwich: _Finding large Cliques using SAT Local Search_, in Trends in Constraint
//!   Programming 2007.
//! - Steven D. Prestwich: _CNF Encodings_, in Handbook of Satisfiability 2021.

use super::Encode;
use crate::{
    encodings::{atomics, CollectClauses, EncodeStats, Error, IterInputs},
    instances::ManageVars,
    types::Lit,
    utils,
};

/// Implementation of the binary at-most-1 encoding.
///
/// For `m` inputs, `ceil(log2(m))` selector bits are allocated and input `i`
/// forces the selector bits to the binary code of `i`, most significant bit
/// first. Two true inputs would force different codes.
///
/// # References
///
/// - Steven D. Prestwich: _Finding large Cliques using SAT Local Search_, in Trends in Constraint
///   Programming 2007.
/// - Steven D. Prestwich: _CNF Encodings_, in Handbook of Satisfiability 2021.
#[derive(Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binary {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl Binary {
    /// The number of selector bits needed for `n_lits` inputs
    #[must_use]
    pub fn n_bits(n_lits: usize) -> u32 {
        if n_lits <= 1 {
            return 0;
        }
        utils::digits(n_lits - 1, 2)
    }
}

impl Encode for Binary {
    fn n_lits(&self) -> usize {
        self.in_lits.len()
    }

    fn encode_amo<Col>(
        &mut self,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let n_bits = Self::n_bits(self.in_lits.len());
        if n_bits == 0 {
            return Ok(());
        }
        let prev_clauses = collector.n_clauses();

        let selectors = var_manager.new_vars(n_bits)?;
        let width = selectors.len();

        let clause = |idx: usize, bit: usize| {
            let set = (idx >> (width - 1 - bit)) & 1 == 1;
            atomics::lit_impl_lit(self.in_lits[idx], selectors[bit].lit(!set))
        };
        collector.extend(
            (0..self.in_lits.len()).flat_map(|idx| (0..width).map(move |bit| clause(idx, bit))),
        );

        self.n_clauses += collector.n_clauses() - prev_clauses;
        self.n_vars += n_bits;
        Ok(())
    }
}

impl IterInputs for Binary {
    type Iter<'a> = std::iter::Copied<std::slice::Iter<'a, Lit>>;

    fn iter(&self) -> Self::Iter<'_> {
        self.in_lits.iter().copied()
    }
}

impl EncodeStats for Binary {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}

impl From<Vec<Lit>> for Binary {
    fn from(lits: Vec<Lit>) -> Self {
        Self {
            in_lits: lits,
            n_clauses: 0,
            n_vars: 0,
        }
    }
}

impl FromIterator<Lit> for Binary {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self::from(Vec::from_iter(iter))
    }
}

impl Extend<Lit> for Binary {
    fn extend<T: IntoIterator<Item = Lit>>(&mut self, iter: T) {
        self.in_lits.extend(iter);
    }
}
