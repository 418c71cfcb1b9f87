//! # Commander At-Most-1 Encoding
//!
//! ## References
//!
//! - Will Klieber and Gihwon Kwon: _Efficient CNF Encoding for Selecting 1 from N Objects_, CFV
//!   2007.

use std::marker::PhantomData;

use super::Encode;
use crate::{
    encodings::{atomics, CollectClauses, EncodeStats, Error, IterInputs},
    instances::ManageVars,
    types::{Lit, Var},
};

/// Implementation of the commander at-most-1 and exactly-1 encoding.
///
/// The inputs are split into consecutive groups of `group_size` literals.
/// Every group gets a commander variable implied by each of its members and
/// the `Sub` encoding enforces at-most-1 within each group and over the
/// commanders.
///
/// # Generics
///
/// - `Sub`: the sub encoding to use within the groups and over the commanders
///
/// # References
///
/// - Will Klieber and Gihwon Kwon: _Efficient CNF Encoding for Selecting 1 from N Objects_, CFV
///   2007.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Commander<Sub = super::Binomial> {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The maximum number of input literals per commander
    group_size: usize,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
    _sub: PhantomData<Sub>,
}

impl<Sub> Commander<Sub> {
    /// The group size used by [`Default`] and the [`From`] conversions
    pub const DEFAULT_GROUP_SIZE: usize = 4;

    /// Creates a new, empty commander encoding with a given group size
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGroupSize`] if `group_size` is zero.
    pub fn new(group_size: usize) -> Result<Self, Error> {
        if group_size == 0 {
            return Err(Error::InvalidGroupSize);
        }
        Ok(Self {
            in_lits: vec![],
            group_size,
            n_clauses: 0,
            n_vars: 0,
            _sub: PhantomData,
        })
    }

    /// Gets the group size
    #[must_use]
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// The number of commander variables the encoding allocates
    fn n_groups(&self) -> usize {
        self.in_lits.len().div_ceil(self.group_size)
    }

    /// Allocates one commander per group, adds the member-implies-commander
    /// clauses and at-most-1 within each group. If `reified`, also adds the
    /// commander-implies-some-member clauses.
    fn encode_groups<Col>(
        &mut self,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
        reified: bool,
    ) -> Result<Vec<Lit>, Error>
    where
        Sub: Encode + From<Vec<Lit>>,
        Col: CollectClauses,
    {
        let n_groups = u32::try_from(self.n_groups()).unwrap_or(u32::MAX);
        let commanders: Vec<Lit> = var_manager
            .new_vars(n_groups)?
            .into_iter()
            .map(Var::pos_lit)
            .collect();

        for (group, &commander) in self.in_lits.chunks(self.group_size).zip(&commanders) {
            collector.extend(atomics::clause_impl_lit(group, commander));
            if reified {
                collector.extend([atomics::lit_impl_clause(commander, group)]);
            }
            let mut sub = Sub::from(group.to_vec());
            sub.encode_amo(collector, var_manager)?;
            self.n_vars += sub.n_vars();
        }
        self.n_vars += n_groups;
        Ok(commanders)
    }
}

impl<Sub> Encode for Commander<Sub>
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

        let commanders = self.encode_groups(collector, var_manager, false)?;
        let mut sub = Sub::from(commanders);
        sub.encode_amo(collector, var_manager)?;
        self.n_vars += sub.n_vars();

        self.n_clauses += collector.n_clauses() - prev_clauses;
        Ok(())
    }

    /// Exactly-1 with commanders that are equivalent to their group
    /// containing a true literal, and exactly-1 over the commanders
    fn encode_eo<Col>(
        &mut self,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        if self.in_lits.is_empty() {
            return Err(Error::EmptyGroup);
        }
        let prev_clauses = collector.n_clauses();

        let commanders = self.encode_groups(collector, var_manager, true)?;
        let mut sub = Sub::from(commanders);
        sub.encode_eo(collector, var_manager)?;
        self.n_vars += sub.n_vars();

        self.n_clauses += collector.n_clauses() - prev_clauses;
        Ok(())
    }
}

impl<Sub> Default for Commander<Sub> {
    fn default() -> Self {
        Self::from(vec![])
    }
}

impl<Sub> IterInputs for Commander<Sub> {
    type Iter<'a> = std::iter::Copied<std::slice::Iter<'a, Lit>> where Sub: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.in_lits.iter().copied()
    }
}

impl<Sub> EncodeStats for Commander<Sub> {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}

impl<Sub> From<Vec<Lit>> for Commander<Sub> {
    fn from(lits: Vec<Lit>) -> Self {
        Self {
            in_lits: lits,
            group_size: Self::DEFAULT_GROUP_SIZE,
            n_clauses: 0,
            n_vars: 0,
            _sub: PhantomData,
        }
    }
}

impl<Sub> FromIterator<Lit> for Commander<Sub> {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self::from(Vec::from_iter(iter))
    }
}

impl<Sub> Extend<Lit> for Commander<Sub> {
    fn extend<T: IntoIterator<Item = Lit>>(&mut self, iter: T) {
        self.in_lits.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::Commander;
    use crate::{
        clause,
        encodings::{am1::Encode, EncodeStats, Error},
        instances::{BasicVarManager, Cnf, ManageVars},
        lit, var,
    };

    #[test]
    fn zero_group_size() {
        assert!(matches!(
            Commander::<crate::encodings::am1::Binomial>::new(0),
            Err(Error::InvalidGroupSize)
        ));
    }

    #[test]
    fn amo_counts() {
        let mut enc: Commander = Commander::new(2).unwrap();
        enc.extend([lit![0], lit![1], lit![2], lit![3], lit![4]]);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![5]);
        enc.encode_amo(&mut cnf, &mut vm).unwrap();
        // 3 commanders, 5 implications, 2 in-group exclusions, 3 commander exclusions
        assert_eq!(vm.n_used(), 8);
        assert_eq!(enc.n_vars(), 3);
        assert_eq!(cnf.len(), 10);
        assert_eq!(enc.n_clauses(), 10);
    }

    #[test]
    fn eo_counts() {
        let mut enc: Commander = Commander::new(3).unwrap();
        enc.extend([lit![0], lit![1], lit![2], lit![3], lit![4], lit![5]]);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![6]);
        enc.encode_eo(&mut cnf, &mut vm).unwrap();
        // per group: 3 implications, 1 reification, 3 exclusions
        // over the 2 commanders: 1 at-least-one, 1 exclusion
        assert_eq!(vm.n_used(), 8);
        assert_eq!(cnf.len(), 16);
    }

    #[test]
    fn single_group_eo() {
        let mut enc: Commander = Commander::new(4).unwrap();
        enc.extend([lit![0], lit![1]]);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![2]);
        enc.encode_eo(&mut cnf, &mut vm).unwrap();
        let cls: Vec<_> = cnf.into_iter().collect();
        assert_eq!(
            cls,
            vec![
                clause![!lit![0], lit![2]],
                clause![!lit![1], lit![2]],
                clause![lit![0], lit![1], !lit![2]],
                clause![!lit![0], !lit![1]],
                clause![lit![2]],
            ]
        );
    }

    #[test]
    fn empty_eo() {
        let mut enc: Commander = Commander::default();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::default();
        assert_eq!(enc.encode_eo(&mut cnf, &mut vm), Err(Error::EmptyGroup));
        assert!(cnf.is_empty());
        assert_eq!(vm.n_used(), 0);
    }
}
