//! # Common Types for Cardinality Encodings
//!
//! Common types used throughout the library to guarantee type safety.

use std::{fmt, ops};

use thiserror::Error;

pub mod constraints;
pub use constraints::Clause;

/// Type representing boolean variables. Variable indexing starts from 0.
///
/// The externally visible identifier of a variable (the one used in DIMACS
/// files and solver models) is its index plus one, see [`Var::to_ipasir`].
/// The maximum index is chosen such that this identifier still fits into an
/// `i32`.
#[derive(Hash, Eq, PartialEq, PartialOrd, Clone, Copy, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Var {
    idx: u32,
}

impl Var {
    /// The maximum index that can be represented. Its identifier is
    /// `i32::MAX`.
    pub const MAX_IDX: u32 = i32::MAX.unsigned_abs() - 1;

    /// Creates a new variable with a given index.
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[must_use]
    pub fn new(idx: u32) -> Var {
        assert!(idx <= Var::MAX_IDX, "variable index too high");
        Var { idx }
    }

    /// Creates a new variable with a given index.
    ///
    /// # Errors
    ///
    /// [`TypeError::IdxTooHigh`] if `idx > Var::MAX_IDX`.
    pub fn new_with_error(idx: u32) -> Result<Var, TypeError> {
        if idx > Var::MAX_IDX {
            return Err(TypeError::IdxTooHigh(idx, Var::MAX_IDX));
        }
        Ok(Var { idx })
    }

    /// Creates a new variable without checking the index.
    /// Only use this if you are sure that `idx <= Var::MAX_IDX`.
    #[inline]
    #[must_use]
    pub(crate) fn new_unchecked(idx: u32) -> Var {
        Var { idx }
    }

    /// Creates a literal that is not negated.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardsat::types::{Lit, Var};
    ///
    /// let var = Var::new(5);
    /// let lit = Lit::positive(5);
    ///
    /// assert_eq!(lit, var.pos_lit());
    /// ```
    #[inline]
    #[must_use]
    pub fn pos_lit(self) -> Lit {
        Lit::new_unchecked(self.idx, false)
    }

    /// Creates a negated literal.
    #[inline]
    #[must_use]
    pub fn neg_lit(self) -> Lit {
        Lit::new_unchecked(self.idx, true)
    }

    /// Creates a literal with a given polarity, `negated == false` gives
    /// [`Var::pos_lit`].
    #[inline]
    #[must_use]
    pub fn lit(self, negated: bool) -> Lit {
        Lit::new_unchecked(self.idx, negated)
    }

    /// Returns the index of the variable as a `usize` for indexing data
    /// structures.
    #[inline]
    #[must_use]
    pub fn idx(self) -> usize {
        self.idx as usize
    }

    /// Returns the 32 bit index of the variable.
    #[inline]
    #[must_use]
    pub fn idx32(self) -> u32 {
        self.idx
    }

    /// Converts the variable to its positive integer identifier as used in
    /// DIMACS and the IPASIR API. The identifier is `idx + 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardsat::var;
    ///
    /// assert_eq!(var![0].to_ipasir(), 1);
    /// ```
    #[must_use]
    pub fn to_ipasir(self) -> u32 {
        self.idx + 1
    }

    /// Creates a variable from its positive integer identifier.
    ///
    /// # Errors
    ///
    /// [`TypeError::IpasirZero`] for `0`, [`TypeError::IdxTooHigh`] if the
    /// identifier exceeds the representable range.
    pub fn from_ipasir(id: u32) -> Result<Var, TypeError> {
        if id == 0 {
            return Err(TypeError::IpasirZero);
        }
        Var::new_with_error(id - 1)
    }
}

/// Incrementing variables
impl ops::Add<u32> for Var {
    type Output = Var;

    fn add(self, rhs: u32) -> Self::Output {
        Var {
            idx: self.idx + rhs,
        }
    }
}

impl ops::AddAssign<u32> for Var {
    fn add_assign(&mut self, rhs: u32) {
        self.idx += rhs;
    }
}

/// Decrementing variables
impl ops::Sub<u32> for Var {
    type Output = Var;

    fn sub(self, rhs: u32) -> Self::Output {
        Var {
            idx: self.idx - rhs,
        }
    }
}

/// Variables are printed by their identifier
impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.to_ipasir())
    }
}

/// More easily creates variables. Mainly used in tests.
///
/// # Examples
///
/// ```
/// use cardsat::{types::Var, var};
///
/// assert_eq!(var![42], Var::new(42));
/// ```
#[macro_export]
macro_rules! var {
    ($v:expr) => {
        $crate::types::Var::new($v)
    };
}

/// Type representing literals, possibly negated boolean variables.
#[derive(Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Lit {
    /// Literal representation is `idx << 1` with the last bit representing
    /// whether the literal is negated or not.
    lidx: u32,
}

impl Lit {
    #[inline]
    fn represent(idx: u32, negated: bool) -> u32 {
        (idx << 1) + u32::from(negated)
    }

    /// Creates a new (negated or not) literal with a given index.
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[must_use]
    pub fn new(idx: u32, negated: bool) -> Lit {
        assert!(idx <= Var::MAX_IDX, "variable index too high");
        Lit {
            lidx: Lit::represent(idx, negated),
        }
    }

    /// Creates a new (negated or not) literal with a given index.
    ///
    /// # Errors
    ///
    /// [`TypeError::IdxTooHigh`] if `idx > Var::MAX_IDX`.
    pub fn new_with_error(idx: u32, negated: bool) -> Result<Lit, TypeError> {
        if idx > Var::MAX_IDX {
            return Err(TypeError::IdxTooHigh(idx, Var::MAX_IDX));
        }
        Ok(Lit {
            lidx: Lit::represent(idx, negated),
        })
    }

    #[inline]
    #[must_use]
    fn new_unchecked(idx: u32, negated: bool) -> Lit {
        Lit {
            lidx: Lit::represent(idx, negated),
        }
    }

    /// Creates a new positive literal with a given index.
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[inline]
    #[must_use]
    pub fn positive(idx: u32) -> Lit {
        Lit::new(idx, false)
    }

    /// Creates a new negated literal with a given index.
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[inline]
    #[must_use]
    pub fn negative(idx: u32) -> Lit {
        Lit::new(idx, true)
    }

    /// Creates a literal from an IPASIR integer value.
    ///
    /// # Errors
    ///
    /// [`TypeError::IpasirZero`] if the value is zero,
    /// [`TypeError::IdxTooHigh`] if the index is too high.
    pub fn from_ipasir(val: i32) -> Result<Lit, TypeError> {
        if val == 0 {
            return Err(TypeError::IpasirZero);
        }
        let negated = val < 0;
        let idx = val.unsigned_abs();
        Lit::new_with_error(idx - 1, negated)
    }

    /// Gets the variable index of the literal
    #[inline]
    #[must_use]
    pub fn vidx(self) -> usize {
        (self.lidx >> 1) as usize
    }

    /// Gets the 32bit variable index of the literal
    #[inline]
    #[must_use]
    pub fn vidx32(self) -> u32 {
        self.lidx >> 1
    }

    /// Gets the variable that the literal corresponds to.
    #[inline]
    #[must_use]
    pub fn var(self) -> Var {
        Var::new_unchecked(self.vidx32())
    }

    /// True if the literal is positive.
    #[inline]
    #[must_use]
    pub fn is_pos(self) -> bool {
        (self.lidx & 1u32) == 0
    }

    /// True if the literal is negated.
    #[inline]
    #[must_use]
    pub fn is_neg(self) -> bool {
        (self.lidx & 1u32) == 1
    }

    /// Converts the literal to the signed integer form used by DIMACS and
    /// the IPASIR API: the variable identifier, negative if the literal is
    /// negated. Never zero.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn to_ipasir(self) -> i32 {
        // at most `i32::MAX` since the index is at most `Var::MAX_IDX`
        let idx = (self.vidx32() + 1) as i32;
        if self.is_neg() {
            -idx
        } else {
            idx
        }
    }
}

/// Negating literals with the `!` operator.
impl ops::Not for Lit {
    type Output = Lit;

    #[inline]
    fn not(self) -> Lit {
        Lit {
            lidx: self.lidx ^ 1u32,
        }
    }
}

/// Negating literals with the unary `-` operator.
impl ops::Neg for Lit {
    type Output = Lit;

    #[inline]
    fn neg(self) -> Lit {
        Lit {
            lidx: self.lidx ^ 1u32,
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_neg() {
            write!(f, "~{}", self.var())
        } else {
            write!(f, "{}", self.var())
        }
    }
}

/// More easily creates literals. Mainly used in tests.
///
/// # Examples
///
/// ```
/// use cardsat::{lit, types::Lit};
///
/// assert_eq!(lit![42], Lit::positive(42));
/// assert_eq!(!lit![42], Lit::negative(42));
/// ```
#[macro_export]
macro_rules! lit {
    ($l:expr) => {
        $crate::types::Lit::positive($l)
    };
}

/// More easily creates literals with IPASIR indexing (starts from 1) and
/// negation (negative value is negation). Mainly used in tests.
///
/// # Examples
///
/// ```
/// use cardsat::{ipasir_lit, lit};
///
/// assert_eq!(ipasir_lit![42], lit![41]);
/// assert_eq!(ipasir_lit![-42], !lit![41]);
/// ```
#[macro_export]
macro_rules! ipasir_lit {
    ($l:expr) => {
        $crate::types::Lit::from_ipasir($l).unwrap()
    };
}

/// Ternary value assigned to a literal or variable, including possible "don't care"
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TernaryVal {
    /// Positive assignment.
    True,
    /// Negative assignment.
    False,
    /// Formula is satisfied, no matter the assignment.
    #[default]
    DontCare,
}

impl TernaryVal {
    /// Converts a [`TernaryVal`] to a bool with a default value for "don't cares"
    #[must_use]
    pub fn to_bool_with_def(self, def: bool) -> bool {
        match self {
            TernaryVal::True => true,
            TernaryVal::False => false,
            TernaryVal::DontCare => def,
        }
    }
}

impl fmt::Display for TernaryVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TernaryVal::True => write!(f, "1"),
            TernaryVal::False => write!(f, "0"),
            TernaryVal::DontCare => write!(f, "_"),
        }
    }
}

impl fmt::Debug for TernaryVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<bool> for TernaryVal {
    fn from(value: bool) -> Self {
        if value {
            return TernaryVal::True;
        }
        TernaryVal::False
    }
}

impl ops::Not for TernaryVal {
    type Output = TernaryVal;

    fn not(self) -> TernaryVal {
        match self {
            TernaryVal::True => TernaryVal::False,
            TernaryVal::False => TernaryVal::True,
            TernaryVal::DontCare => TernaryVal::DontCare,
        }
    }
}

/// Type representing an assignment of variables.
#[derive(Clone, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct Assignment {
    assignment: Vec<TernaryVal>,
}

impl Assignment {
    /// Builds an assignment from a solver model given as signed integers,
    /// one literal per variable, the sign encoding the value.
    ///
    /// The assignment grows with the highest variable in the model. For
    /// models from an untrusted source, use [`Assignment::from_ipasir_upto`].
    ///
    /// # Errors
    ///
    /// If any of the values is zero or out of range.
    pub fn from_ipasir(model: &[i32]) -> Result<Assignment, TypeError> {
        model
            .iter()
            .map(|&val| Lit::from_ipasir(val))
            .collect::<Result<Assignment, _>>()
    }

    /// Like [`Assignment::from_ipasir`], but skips values of variables
    /// above `max_var`.
    ///
    /// # Errors
    ///
    /// If any of the values is zero or out of range.
    pub fn from_ipasir_upto(model: &[i32], max_var: Var) -> Result<Assignment, TypeError> {
        let mut assignment = Assignment::default();
        for &val in model {
            let lit = Lit::from_ipasir(val)?;
            if lit.var() <= max_var {
                assignment.assign_lit(lit);
            }
        }
        Ok(assignment)
    }

    /// Gets the value that the assignment assigns to a variable.
    /// If the variable is not included, returns [`TernaryVal::DontCare`].
    #[must_use]
    pub fn var_value(&self, var: Var) -> TernaryVal {
        self.assignment
            .get(var.idx())
            .copied()
            .unwrap_or(TernaryVal::DontCare)
    }

    /// Same as [`Assignment::var_value`], but for literals.
    #[must_use]
    pub fn lit_value(&self, lit: Lit) -> TernaryVal {
        if lit.is_neg() {
            !self.var_value(lit.var())
        } else {
            self.var_value(lit.var())
        }
    }

    /// Replaces all "don't care" values with a default
    pub fn replace_dont_care(&mut self, def: bool) {
        for tv in &mut self.assignment {
            if *tv == TernaryVal::DontCare {
                *tv = def.into();
            }
        }
    }

    /// Assigns a variable in the assignment
    pub fn assign_var(&mut self, var: Var, val: TernaryVal) {
        if self.assignment.len() < var.idx() + 1 {
            self.assignment.resize(var.idx() + 1, TernaryVal::DontCare);
        }
        self.assignment[var.idx()] = val;
    }

    /// Assigns a literal to true
    pub fn assign_lit(&mut self, lit: Lit) {
        self.assign_var(lit.var(), lit.is_pos().into());
    }

    /// Gets the maximum variable in the assignment
    #[must_use]
    pub fn max_var(&self) -> Option<Var> {
        let len = u32::try_from(self.assignment.len()).ok()?;
        len.checked_sub(1).map(Var::new_unchecked)
    }

    /// Gets the number of variables covered by the assignment
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Checks whether the assignment covers no variables
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Converts the assignment to a signed-integer model with one entry per
    /// assigned variable. "Don't care" values are left out.
    #[must_use]
    pub fn to_ipasir_model(&self) -> Vec<i32> {
        self.iter().map(Lit::to_ipasir).collect()
    }

    /// Gets an iterator over the literals that are true in the assignment
    pub fn iter(&self) -> impl Iterator<Item = Lit> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .filter_map(|(idx, tv)| {
                let var = Var::new_unchecked(u32::try_from(idx).ok()?);
                match tv {
                    TernaryVal::True => Some(var.pos_lit()),
                    TernaryVal::False => Some(var.neg_lit()),
                    TernaryVal::DontCare => None,
                }
            })
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.assignment
            .iter()
            .try_for_each(|tv| write!(f, "{tv}"))
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromIterator<Lit> for Assignment {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        let mut assignment = Assignment::default();
        iter.into_iter().for_each(|l| assignment.assign_lit(l));
        assignment
    }
}

impl From<Vec<TernaryVal>> for Assignment {
    fn from(assignment: Vec<TernaryVal>) -> Self {
        Self { assignment }
    }
}

/// Errors related to types
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum TypeError {
    /// The requested index is too high.
    /// Contains the requested and the maximum index.
    #[error("index {0} is too high (maximum {1})")]
    IdxTooHigh(u32, u32),
    /// IPASIR index is zero
    #[error("zero is an invalid IPASIR literal")]
    IpasirZero,
}

#[cfg(test)]
mod tests {
    use std::mem::size_of;

    use super::{Assignment, Lit, TernaryVal, TypeError, Var};

    #[test]
    fn var_index() {
        let var = Var::new(5);
        assert_eq!(var.idx(), 5);
        assert_eq!(var.idx32(), 5);
        assert_eq!(var.to_ipasir(), 6);
    }

    #[test]
    fn var_from_ipasir() {
        assert_eq!(Var::from_ipasir(6), Ok(Var::new(5)));
        assert_eq!(Var::from_ipasir(0), Err(TypeError::IpasirZero));
    }

    #[test]
    fn var_too_high() {
        assert_eq!(
            Var::new_with_error(Var::MAX_IDX + 1),
            Err(TypeError::IdxTooHigh(Var::MAX_IDX + 1, Var::MAX_IDX))
        );
    }

    #[test]
    fn max_var_fits_ipasir() {
        let lit = Lit::positive(Var::MAX_IDX);
        assert_eq!(lit.to_ipasir(), i32::MAX);
        assert_eq!((!lit).to_ipasir(), -i32::MAX);
        assert_eq!(Lit::from_ipasir(i32::MAX), Ok(lit));
        assert_eq!(Lit::from_ipasir(-i32::MAX), Ok(!lit));
        assert!(Lit::from_ipasir(i32::MIN).is_err());
        assert_eq!(Var::new(Var::MAX_IDX).to_ipasir(), i32::MAX.unsigned_abs());
    }

    #[test]
    fn lit_representation() {
        assert_eq!(Lit::represent(5, true), 0b1011);
    }

    #[test]
    fn lit_polarity() {
        let lit = Lit::positive(0);
        assert!(lit.is_pos());
        assert!(!lit.is_neg());
        let lit = !lit;
        assert!(lit.is_neg());
        assert_eq!(lit.var(), Var::new(0));
        assert_eq!(-lit, Lit::positive(0));
    }

    #[test]
    fn ipasir_lit_round_trip() {
        let lit = Lit::positive(5);
        assert_eq!(lit.to_ipasir(), 6);
        assert_eq!((!lit).to_ipasir(), -6);
        assert_eq!(Lit::from_ipasir(-6), Ok(!lit));
        assert_eq!(Lit::from_ipasir(0), Err(TypeError::IpasirZero));
    }

    #[test]
    fn lit_display() {
        assert_eq!(format!("{}", !lit![2]), "~x3");
    }

    #[test]
    fn ternary_val_not() {
        assert_eq!(!TernaryVal::True, TernaryVal::False);
        assert_eq!(!TernaryVal::DontCare, TernaryVal::DontCare);
        assert!(TernaryVal::DontCare.to_bool_with_def(true));
        assert!(!TernaryVal::DontCare.to_bool_with_def(false));
    }

    #[test]
    fn assignment_lit_val() {
        let sol = Assignment::from(vec![
            TernaryVal::True,
            TernaryVal::False,
            TernaryVal::DontCare,
        ]);
        assert_eq!(sol.lit_value(Lit::negative(0)), TernaryVal::False);
        assert_eq!(sol.lit_value(Lit::positive(1)), TernaryVal::False);
        assert_eq!(sol.lit_value(Lit::negative(1)), TernaryVal::True);
        assert_eq!(sol.lit_value(Lit::positive(2)), TernaryVal::DontCare);
        assert_eq!(sol.lit_value(Lit::positive(7)), TernaryVal::DontCare);
    }

    #[test]
    fn assignment_from_ipasir() {
        let sol = Assignment::from_ipasir(&[1, -2, 3]).unwrap();
        assert_eq!(sol, Assignment::from_iter([lit![0], !lit![1], lit![2]]));
        assert_eq!(sol.to_ipasir_model(), vec![1, -2, 3]);
        assert_eq!(sol.max_var(), Some(var![2]));
        assert!(Assignment::from_ipasir(&[1, 0]).is_err());
    }

    #[test]
    fn assignment_from_ipasir_upto() {
        let sol = Assignment::from_ipasir_upto(&[1, 2_000_000_000, -2, -i32::MAX, 4], var![1])
            .unwrap();
        assert_eq!(sol.len(), 2);
        assert_eq!(sol, Assignment::from_iter([lit![0], !lit![1]]));
        assert!(Assignment::from_ipasir_upto(&[9, 0], var![1]).is_err());
    }

    #[test]
    fn assignment_replace_dont_care() {
        let mut sol = Assignment::from(vec![TernaryVal::DontCare, TernaryVal::False]);
        sol.replace_dont_care(true);
        assert_eq!(sol.var_value(var![0]), TernaryVal::True);
        assert_eq!(sol.var_value(var![1]), TernaryVal::False);
    }

    #[test]
    fn mem_sizes() {
        assert_eq!(size_of::<Var>(), size_of::<u32>());
        assert_eq!(size_of::<Lit>(), size_of::<u32>());
        assert_eq!(size_of::<TernaryVal>(), 1);
    }
}
