//! # Binomial (Pairwise) At-Most-1 Encoding
//!
//! ## References
//!
//! - Steven D. Prestwich: _CNF Encodings_, in Handbook of Satisfiability 2021.

use super::Encode;
use crate::{
    clause,
    encodings::{CollectClauses, EncodeStats, Error, IterInputs},
    instances::ManageVars,
    types::Lit,
};

/// Implementation of the binomial at-most-1 encoding: one binary clause
/// `(!a | !b)` per unordered pair of inputs and no auxiliary variables.
///
/// # References
///
/// - Steven D. Prestwich: _CNF Encodings_, in Handbook of Satisfiability 2021.
#[derive(Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binomial {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The number of clauses in the encoding
    n_clauses: usize,
}

impl Encode for Binomial {
    fn n_lits(&self) -> usize {
        self.in_lits.len()
    }

    fn encode_amo<Col>(
        &mut self,
        collector: &mut Col,
        _var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let prev_clauses = collector.n_clauses();
        let lits = &self.in_lits;
        let clause_iter = (0..lits.len()).flat_map(|first| {
            (first + 1..lits.len()).map(move |second| clause![!lits[first], !lits[second]])
        });
        collector.extend(clause_iter);
        self.n_clauses += collector.n_clauses() - prev_clauses;
        Ok(())
    }
}

impl IterInputs for Binomial {
    type Iter<'a> = std::iter::Copied<std::slice::Iter<'a, Lit>>;

    fn iter(&self) -> Self::Iter<'_> {
        self.in_lits.iter().copied()
    }
}

impl EncodeStats for Binomial {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        0
    }
}

impl From<Vec<Lit>> for Binomial {
    fn from(lits: Vec<Lit>) -> Self {
        Self {
            in_lits: lits,
            n_clauses: 0,
        }
    }
}

impl FromIterator<Lit> for Binomial {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self::from(Vec::from_iter(iter))
    }
}

impl Extend<Lit> for Binomial {
    fn extend<T: IntoIterator<Item = Lit>>(&mut self, iter: T) {
        self.in_lits.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::Binomial;
    use crate::{
        clause,
        encodings::{am1::Encode, EncodeStats},
        instances::{BasicVarManager, Cnf, ManageVars},
        lit, var,
    };

    #[test]
    fn basic() {
        let mut enc: Binomial = [lit![0], lit![1], lit![2], lit![3]].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![4]);
        enc.encode_amo(&mut cnf, &mut vm).unwrap();
        assert_eq!(vm.n_used(), 4);
        assert_eq!(cnf.len(), 6);
        assert_eq!(enc.n_clauses(), 6);
        assert_eq!(enc.n_vars(), 0);
    }

    #[test]
    fn clause_order() {
        let mut enc = Binomial::from(vec![lit![0], lit![1], lit![2]]);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![3]);
        enc.encode_eo(&mut cnf, &mut vm).unwrap();
        let cls: Vec<_> = cnf.into_iter().collect();
        assert_eq!(
            cls,
            vec![
                clause![lit![0], lit![1], lit![2]],
                clause![!lit![0], !lit![1]],
                clause![!lit![0], !lit![2]],
                clause![!lit![1], !lit![2]],
            ]
        );
    }
}
