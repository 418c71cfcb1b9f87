//! # Sequential Counter Cardinality Encoding
//!
//! ## References
//!
//! - Carsten Sinz: _Towards an Optimal CNF Encoding of Boolean Cardinality Constraints_, CP 2005.

use std::cmp;

use super::{BoundBoth, BoundLower, BoundUpper, Encode};
use crate::{
    clause,
    encodings::{am1, atomics, CollectClauses, EncodeStats, Error, IterInputs},
    instances::ManageVars,
    types::Lit,
};

/// Implementation of the sequential counter (running sum) encoding.
///
/// For an upper bound `k`, input `i` gets a count register of
/// `min(i + 1, k + 1)` bits. Bit `j` (1-based) of register `i` is
/// equivalent to at least `j` of the inputs `0..=i` being true, so fixing
/// the inputs fixes every register bit. The bound is the unit clause
/// forbidding bit `k + 1` of the last register.
///
/// Lower bounds are encoded as upper bounds on the negated inputs.
///
/// # References
///
/// - Carsten Sinz: _Towards an Optimal CNF Encoding of Boolean Cardinality Constraints_, CP 2005.
#[derive(Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequentialCounter {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The count registers of the last upper bound encoding
    registers: Vec<Vec<Lit>>,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl SequentialCounter {
    /// Gets the count registers built by the last call to
    /// [`BoundUpper::encode_ub`] that produced clauses. `registers()[i][j]`
    /// is equivalent to at least `j + 1` of the first `i + 1` inputs being
    /// true.
    #[must_use]
    pub fn registers(&self) -> &[Vec<Lit>] {
        &self.registers
    }
}

impl Encode for SequentialCounter {
    fn n_lits(&self) -> usize {
        self.in_lits.len()
    }
}

impl BoundUpper for SequentialCounter {
    fn encode_ub<Col>(
        &mut self,
        k: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let n = self.in_lits.len();
        if k >= n {
            return Ok(());
        }
        let prev_clauses = collector.n_clauses();

        let width = |idx: usize| cmp::min(idx + 1, k + 1);
        let n_aux: usize = (0..n).map(width).sum();
        let n_aux = u32::try_from(n_aux).unwrap_or(u32::MAX);
        let mut aux = var_manager.new_lits(n_aux)?.into_iter();
        let registers: Vec<Vec<Lit>> = (0..n)
            .map(|idx| aux.by_ref().take(width(idx)).collect())
            .collect();

        let x = &self.in_lits;
        // register bit `j` lives at index `j - 1`
        collector.extend([
            atomics::lit_impl_lit(x[0], registers[0][0]),
            atomics::lit_impl_lit(registers[0][0], x[0]),
        ]);
        for idx in 1..n {
            let prev = &registers[idx - 1];
            let cur = &registers[idx];
            // carry: the count never decreases
            collector.extend(
                prev.iter()
                    .zip(cur)
                    .map(|(&p, &c)| atomics::lit_impl_lit(p, c)),
            );
            // increment: a true input bumps the count
            collector.extend([atomics::lit_impl_lit(x[idx], cur[0])]);
            collector.extend(
                (1..cur.len()).map(|j| atomics::cube_impl_lit(&[x[idx], prev[j - 1]], cur[j])),
            );
            // tightness: a set bit is explained by the input or the previous count
            collector.extend(
                prev.iter()
                    .zip(cur)
                    .map(|(&p, &c)| atomics::lit_impl_clause(c, &[x[idx], p])),
            );
            // converse carry
            collector.extend((1..cur.len()).map(|j| atomics::lit_impl_lit(cur[j], prev[j - 1])));
            if cur.len() > prev.len() {
                collector.extend([atomics::lit_impl_lit(cur[cur.len() - 1], x[idx])]);
            }
        }
        collector.extend([clause![!registers[n - 1][k]]]);

        self.registers = registers;
        self.n_clauses += collector.n_clauses() - prev_clauses;
        self.n_vars += n_aux;
        Ok(())
    }
}

impl BoundLower for SequentialCounter {
    fn encode_lb<Col>(
        &mut self,
        k: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let n = self.in_lits.len();
        if k > n {
            // no assignment reaches the bound
            let prev_clauses = collector.n_clauses();
            let aux = var_manager.new_lit()?;
            collector.extend([clause![aux], clause![!aux]]);
            self.n_clauses += collector.n_clauses() - prev_clauses;
            self.n_vars += 1;
            return Ok(());
        }
        if k == 0 {
            return Ok(());
        }
        let mut negated: SequentialCounter = self.in_lits.iter().map(|&l| !l).collect();
        negated.encode_ub(n - k, collector, var_manager)?;
        self.n_clauses += negated.n_clauses;
        self.n_vars += negated.n_vars;
        Ok(())
    }
}

impl BoundBoth for SequentialCounter {}

impl am1::Encode for SequentialCounter {
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
        self.encode_ub(1, collector, var_manager)
    }
}

impl IterInputs for SequentialCounter {
    type Iter<'a> = std::iter::Copied<std::slice::Iter<'a, Lit>>;

    fn iter(&self) -> Self::Iter<'_> {
        self.in_lits.iter().copied()
    }
}

impl EncodeStats for SequentialCounter {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}

impl From<Vec<Lit>> for SequentialCounter {
    fn from(lits: Vec<Lit>) -> Self {
        Self {
            in_lits: lits,
            ..Default::default()
        }
    }
}

impl FromIterator<Lit> for SequentialCounter {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self::from(Vec::from_iter(iter))
    }
}

impl Extend<Lit> for SequentialCounter {
    fn extend<T: IntoIterator<Item = Lit>>(&mut self, iter: T) {
        self.in_lits.extend(iter);
    }
}
