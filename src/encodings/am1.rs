//! # CNF Encodings for At-Most-1 and Exactly-1 Constraints
//!
//! The module contains implementations of CNF encodings for at-most-1
//! constraints and their exactly-1 extensions.
//!
//! ## Example Usage
//!
//! ```
//! use cardsat::{
//!     encodings::am1::{Binary, Encode},
//!     instances::{BasicVarManager, Cnf, ManageVars},
//!     lit, var,
//! };
//!
//! let mut var_manager = BasicVarManager::from_next_free(var![3]);
//!
//! let mut encoder: Binary = [lit![0], lit![1], lit![2]].into_iter().collect();
//! let mut encoding = Cnf::new();
//! encoder.encode_eo(&mut encoding, &mut var_manager).unwrap();
//! assert_eq!(var_manager.n_used(), 5);
//! ```

use std::fmt;

use super::{CollectClauses, EncodeStats, Error, IterInputs};
use crate::{
    instances::ManageVars,
    types::{Clause, Lit},
};

mod binomial;
pub use binomial::Binomial;

mod binary;
pub use binary::Binary;

mod commander;
pub use commander::Commander;

mod product;
pub use product::Product;

pub use super::card::SequentialCounter;

/// Trait for all at-most-1 encodings
pub trait Encode: Extend<Lit> + IterInputs + EncodeStats {
    /// Gets the number of literals in the encoding
    fn n_lits(&self) -> usize;

    /// Encodes and enforces that at most one input literal is true. Groups
    /// with at most one literal produce no clauses.
    ///
    /// # Errors
    ///
    /// If auxiliary variables cannot be allocated.
    fn encode_amo<Col>(
        &mut self,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses;

    /// Enforces that at least one input literal is true with a single
    /// clause over all inputs
    ///
    /// # Errors
    ///
    /// [`Error::EmptyGroup`] if there are no input literals.
    fn encode_alo<Col>(
        &mut self,
        collector: &mut Col,
        _var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        if self.n_lits() == 0 {
            return Err(Error::EmptyGroup);
        }
        collector.extend([self.iter().collect::<Clause>()]);
        Ok(())
    }

    /// Encodes and enforces that exactly one input literal is true
    ///
    /// # Errors
    ///
    /// [`Error::EmptyGroup`] if there are no input literals, or if auxiliary
    /// variables cannot be allocated.
    fn encode_eo<Col>(
        &mut self,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        self.encode_alo(collector, var_manager)?;
        self.encode_amo(collector, var_manager)
    }
}

/// Selection of an at-most-1 encoding at runtime. Sub-encodings of
/// [`Commander`] and [`Product`] are [`Binomial`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// See [`Binomial`]
    #[default]
    Binomial,
    /// See [`Binary`]
    Binary,
    /// See [`Commander`]
    Commander {
        /// The maximum number of literals per commander
        group_size: usize,
    },
    /// See [`Product`]
    Product,
    /// See [`SequentialCounter`]
    SequentialCounter,
}

impl Strategy {
    /// Checks that the strategy can be instantiated
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGroupSize`] for a commander group size of zero.
    pub fn validate(self) -> Result<(), Error> {
        match self {
            Strategy::Commander { group_size: 0 } => Err(Error::InvalidGroupSize),
            _ => Ok(()),
        }
    }

    /// Encodes at-most-1 over `lits` with the selected encoding
    ///
    /// # Errors
    ///
    /// See [`Encode::encode_amo`] and [`Strategy::validate`].
    pub fn encode_amo<Col>(
        self,
        lits: &[Lit],
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        self.dispatch(lits, collector, var_manager, false)
    }

    /// Encodes exactly-1 over `lits` with the selected encoding
    ///
    /// # Errors
    ///
    /// See [`Encode::encode_eo`] and [`Strategy::validate`].
    pub fn encode_eo<Col>(
        self,
        lits: &[Lit],
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        self.dispatch(lits, collector, var_manager, true)
    }

    fn dispatch<Col>(
        self,
        lits: &[Lit],
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
        exactly: bool,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        fn run<Enc, Col>(
            mut enc: Enc,
            collector: &mut Col,
            var_manager: &mut dyn ManageVars,
            exactly: bool,
        ) -> Result<(), Error>
        where
            Enc: Encode,
            Col: CollectClauses,
        {
            let res = if exactly {
                enc.encode_eo(collector, var_manager)
            } else {
                enc.encode_amo(collector, var_manager)
            };
            log::trace!(
                "am1 encoding over {} lits added {} clauses and {} vars",
                enc.n_lits(),
                enc.n_clauses(),
                enc.n_vars()
            );
            res
        }

        let lits = lits.to_vec();
        match self {
            Strategy::Binomial => run(Binomial::from(lits), collector, var_manager, exactly),
            Strategy::Binary => run(Binary::from(lits), collector, var_manager, exactly),
            Strategy::Commander { group_size } => {
                let mut enc = Commander::<Binomial>::new(group_size)?;
                enc.extend(lits);
                run(enc, collector, var_manager, exactly)
            }
            Strategy::Product => run(
                Product::<Binomial>::from(lits),
                collector,
                var_manager,
                exactly,
            ),
            Strategy::SequentialCounter => run(
                SequentialCounter::from(lits),
                collector,
                var_manager,
                exactly,
            ),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Binomial => write!(f, "binomial"),
            Strategy::Binary => write!(f, "binary"),
            Strategy::Commander { group_size } => write!(f, "commander({group_size})"),
            Strategy::Product => write!(f, "product"),
            Strategy::SequentialCounter => write!(f, "sequential-counter"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Strategy;
    use crate::{
        encodings::Error,
        instances::{BasicVarManager, Cnf, ManageVars},
        lit, var,
    };

    const ALL: [Strategy; 5] = [
        Strategy::Binomial,
        Strategy::Binary,
        Strategy::Commander { group_size: 2 },
        Strategy::Product,
        Strategy::SequentialCounter,
    ];

    #[test]
    fn empty_eo_is_rejected() {
        for strat in ALL {
            let mut cnf = Cnf::new();
            let mut vm = BasicVarManager::from_next_free(var![4]);
            assert_eq!(
                strat.encode_eo(&[], &mut cnf, &mut vm),
                Err(Error::EmptyGroup),
                "{strat}"
            );
            assert!(cnf.is_empty());
            assert_eq!(vm.next_free(), var![4]);
        }
    }

    #[test]
    fn trivial_amo_is_empty() {
        for strat in ALL {
            let mut cnf = Cnf::new();
            let mut vm = BasicVarManager::from_next_free(var![4]);
            strat.encode_amo(&[], &mut cnf, &mut vm).unwrap();
            strat.encode_amo(&[lit![0]], &mut cnf, &mut vm).unwrap();
            assert!(cnf.is_empty(), "{strat}");
            assert_eq!(vm.next_free(), var![4], "{strat}");
        }
    }

    #[test]
    fn singleton_eo_is_unit() {
        for strat in [Strategy::Binomial, Strategy::Binary, Strategy::Product] {
            let mut cnf = Cnf::new();
            let mut vm = BasicVarManager::from_next_free(var![1]);
            strat.encode_eo(&[lit![0]], &mut cnf, &mut vm).unwrap();
            assert_eq!(cnf.len(), 1, "{strat}");
            assert_eq!(vm.next_free(), var![1], "{strat}");
        }
    }

    #[test]
    fn zero_group_size() {
        let strat = Strategy::Commander { group_size: 0 };
        assert_eq!(strat.validate(), Err(Error::InvalidGroupSize));
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![2]);
        assert_eq!(
            strat.encode_amo(&[lit![0], lit![1]], &mut cnf, &mut vm),
            Err(Error::InvalidGroupSize)
        );
        assert!(cnf.is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(Strategy::Commander { group_size: 3 }.to_string(), "commander(3)");
        assert_eq!(Strategy::SequentialCounter.to_string(), "sequential-counter");
    }
}
