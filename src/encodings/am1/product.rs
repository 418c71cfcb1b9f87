//! # Product At-Most-1 Encoding
//!
//! ## References
//!
//! - Jingchao Chen: _A New SAT Encoding of the At-Most-One Constraint_, ModRef 2010.

use std::marker::PhantomData;

use super::Encode;
use crate::{
    encodings::{atomics, CollectClauses, EncodeStats, Error, IterInputs},
    instances::ManageVars,
    types::{Lit, Var},
    utils,
};

/// Implementation of the two-dimensional product at-most-1 encoding.
///
/// The `m` inputs are laid out row-major on a `p x q` grid with
/// `p = ceil(sqrt(m))` and `q = ceil(m / p)`. Each input implies its row and
/// its column variable and `Sub` enforces at-most-1 over the rows and over
/// the columns.
///
/// # Generics
///
/// - `Sub`: the sub encoding for the row and column variables
///
/// # References
///
/// - Jingchao Chen: _A New SAT Encoding of the At-Most-One Constraint_, ModRef 2010.
#[derive(Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Product<Sub = super::Binomial> {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
    _sub: PhantomData<Sub>,
}

impl<Sub> Product<Sub> {
    /// The grid dimensions `(rows, columns)` used for `n_lits` inputs
    #[must_use]
    pub fn dimensions(n_lits: usize) -> (usize, usize) {
        if n_lits == 0 {
            return (0, 0);
        }
        let rows = utils::ceil_sqrt(n_lits);
        (rows, n_lits.div_ceil(rows))
    }
}

impl<Sub> Encode for Product<Sub>
where
    Sub: Encode + From<Vec<Lit>>,
{
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
        if self.in_lits.len() <= 1 {
            return Ok(());
        }
        let prev_clauses = collector.n_clauses();

        let (p, q) = Self::dimensions(self.in_lits.len());
        let n_aux = u32::try_from(p + q).unwrap_or(u32::MAX);
        let mut aux: Vec<Lit> = var_manager
            .new_vars(n_aux)?
            .into_iter()
            .map(Var::pos_lit)
            .collect();
        let cols = aux.split_off(p);
        let rows = aux;

        for (idx, &lit) in self.in_lits.iter().enumerate() {
            collector.extend([
                atomics::lit_impl_lit(lit, rows[idx / q]),
                atomics::lit_impl_lit(lit, cols[idx % q]),
            ]);
        }

        let mut row_enc = Sub::from(rows);
        row_enc.encode_amo(collector, var_manager)?;
        let mut col_enc = Sub::from(cols);
        col_enc.encode_amo(collector, var_manager)?;

        self.n_clauses += collector.n_clauses() - prev_clauses;
        self.n_vars += n_aux + row_enc.n_vars() + col_enc.n_vars();
        Ok(())
    }
}

impl<Sub> IterInputs for Product<Sub> {
    type Iter<'a> = std::iter::Copied<std::slice::Iter<'a, Lit>> where Sub: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.in_lits.iter().copied()
    }
}

impl<Sub> EncodeStats for Product<Sub> {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}

impl<Sub> From<Vec<Lit>> for Product<Sub> {
    fn from(lits: Vec<Lit>) -> Self {
        Self {
            in_lits: lits,
            n_clauses: 0,
            n_vars: 0,
            _sub: PhantomData,
        }
    }
}

impl<Sub> FromIterator<Lit> for Product<Sub> {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self::from(Vec::from_iter(iter))
    }
}

impl<Sub> Extend<Lit> for Product<Sub> {
    fn extend<T: IntoIterator<Item = Lit>>(&mut self, iter: T) {
        self.in_lits.extend(iter);
    }
}
