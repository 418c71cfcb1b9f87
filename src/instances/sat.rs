//! # Clause Sets

use std::io;

use crate::{
    clause,
    encodings::CollectClauses,
    types::{Assignment, Clause, Lit, TernaryVal},
};

use super::fio;

/// Simple type representing a CNF formula: an append-only sequence of
/// clauses. The insertion order has no logical meaning but is preserved, so
/// identical encoder call sequences produce identical clause sets.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl Cnf {
    /// Creates a new [`Cnf`]
    #[must_use]
    pub fn new() -> Cnf {
        Cnf::default()
    }

    /// Creates a new [`Cnf`] with a given capacity of clauses
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Cnf {
        Cnf {
            clauses: Vec::with_capacity(capacity),
        }
    }

    /// Adds a clause to the CNF
    #[inline]
    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Adds a unit clause to the CNF
    pub fn add_unit(&mut self, unit: Lit) {
        self.add_clause(clause![unit]);
    }

    /// Adds a binary clause to the CNF
    pub fn add_binary(&mut self, lit1: Lit, lit2: Lit) {
        self.add_clause(clause![lit1, lit2]);
    }

    /// Adds a ternary clause to the CNF
    pub fn add_ternary(&mut self, lit1: Lit, lit2: Lit, lit3: Lit) {
        self.add_clause(clause![lit1, lit2, lit3]);
    }

    /// Checks if the CNF is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns the number of clauses in the instance
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Drops all clauses after the first `len`. Only used to roll back a
    /// rejected encoding.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.clauses.truncate(len);
    }

    /// Returns an iterator over references to the clauses
    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Evaluates the CNF under a given assignment. The result is
    /// [`TernaryVal::False`] if some clause is falsified,
    /// [`TernaryVal::True`] if all clauses are satisfied and
    /// [`TernaryVal::DontCare`] otherwise.
    #[must_use]
    pub fn evaluate(&self, assignment: &Assignment) -> TernaryVal {
        let mut val = TernaryVal::True;
        for cl in &self.clauses {
            match cl.evaluate(assignment) {
                TernaryVal::False => return TernaryVal::False,
                TernaryVal::DontCare => val = TernaryVal::DontCare,
                TernaryVal::True => (),
            }
        }
        val
    }

    /// Normalizes the CNF. This includes normalizing and sorting the clauses,
    /// removing duplicates and tautologies. Comparing two normalized CNFs
    /// is equal to comparing sets of sets of literals.
    #[must_use]
    pub fn normalize(self) -> Self {
        let mut norm_clauses: Vec<Clause> =
            self.into_iter().filter_map(Clause::normalize).collect();
        norm_clauses.sort_unstable();
        norm_clauses.dedup();
        Self {
            clauses: norm_clauses,
        }
    }

    /// Writes the CNF to DIMACS CNF with a given number of variables
    ///
    /// # Errors
    ///
    /// If writing fails, returns [`io::Error`].
    pub fn write_dimacs<W: io::Write>(&self, writer: W, n_vars: u32) -> Result<(), io::Error> {
        fio::dimacs::write_cnf_annotated(writer, self, n_vars)
    }
}

impl CollectClauses for Cnf {
    fn n_clauses(&self) -> usize {
        self.clauses.len()
    }
}

impl IntoIterator for Cnf {
    type Item = Clause;

    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl<'a> IntoIterator for &'a Cnf {
    type Item = &'a Clause;

    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl Extend<Clause> for Cnf {
    fn extend<Iter: IntoIterator<Item = Clause>>(&mut self, iter: Iter) {
        self.clauses.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::Cnf;
    use crate::{
        clause,
        encodings::CollectClauses,
        lit,
        types::{Assignment, TernaryVal},
    };

    #[test]
    fn preserves_insertion_order() {
        let mut cnf = Cnf::new();
        cnf.add_binary(lit![1], lit![0]);
        cnf.add_unit(!lit![2]);
        cnf.extend([clause![lit![3]]]);
        let clauses: Vec<_> = cnf.iter().cloned().collect();
        assert_eq!(
            clauses,
            vec![clause![lit![1], lit![0]], clause![!lit![2]], clause![lit![3]]]
        );
        assert_eq!(cnf.n_clauses(), 3);
    }

    #[test]
    fn evaluate() {
        let cnf: Cnf = [clause![lit![0], lit![1]], clause![!lit![0], !lit![1]]]
            .into_iter()
            .collect();
        let xor = Assignment::from_iter([lit![0], !lit![1]]);
        assert_eq!(cnf.evaluate(&xor), TernaryVal::True);
        let both = Assignment::from_iter([lit![0], lit![1]]);
        assert_eq!(cnf.evaluate(&both), TernaryVal::False);
        let partial = Assignment::from_iter([lit![0]]);
        assert_eq!(cnf.evaluate(&partial), TernaryVal::DontCare);
    }

    #[test]
    fn normalize() {
        let cnf: Cnf = [
            clause![lit![1], lit![0]],
            clause![lit![0], lit![1]],
            clause![lit![2], !lit![2]],
        ]
        .into_iter()
        .collect();
        let norm = cnf.normalize();
        assert_eq!(norm.len(), 1);
    }

    #[test]
    fn truncate_rolls_back() {
        let mut cnf = Cnf::new();
        cnf.add_unit(lit![0]);
        cnf.add_unit(lit![1]);
        cnf.truncate(1);
        assert_eq!(cnf.len(), 1);
    }
}
