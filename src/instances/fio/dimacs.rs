//! # Writing DIMACS CNF Files
//!
//! ## References
//!
//! - [DIMACS CNF](http://www.satcompetition.org/2011/format-benchmarks2011.html)

use std::io::{self, Write};

use crate::{instances::Cnf, types::Clause};

/// Writes a CNF to a DIMACS CNF file. `n_vars` is the number of variables
/// announced in the problem line, normally
/// [`ManageVars::n_used`](crate::instances::ManageVars::n_used) of the
/// allocator the CNF was built with.
///
/// # Errors
///
/// If writing fails, returns [`io::Error`].
pub fn write_cnf_annotated<W: Write>(
    mut writer: W,
    cnf: &Cnf,
    n_vars: u32,
) -> Result<(), io::Error> {
    writeln!(writer, "c CNF file written by cardsat")?;
    writeln!(writer, "p cnf {} {}", n_vars, cnf.len())?;
    cnf.iter().try_for_each(|cl| write_clause(&mut writer, cl))?;
    writer.flush()
}

/// Writes a single clause as one zero-terminated line
fn write_clause<W: Write>(writer: &mut W, clause: &Clause) -> Result<(), io::Error> {
    clause
        .iter()
        .try_for_each(|l| write!(writer, "{} ", l.to_ipasir()))?;
    writeln!(writer, "0")
}

#[cfg(test)]
mod tests {
    use super::write_cnf_annotated;
    use crate::{
        clause,
        instances::{BasicVarManager, Cnf, ManageVars},
        lit,
        types::Var,
    };

    #[test]
    fn write_small_cnf() {
        let mut cnf = Cnf::new();
        cnf.add_clause(clause![lit![0], !lit![1]]);
        cnf.add_unit(lit![2]);
        let mut out = Vec::new();
        write_cnf_annotated(&mut out, &cnf, 3).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "c CNF file written by cardsat\np cnf 3 2\n1 -2 0\n3 0\n"
        );
    }

    #[test]
    fn write_empty_cnf() {
        let mut out = Vec::new();
        write_cnf_annotated(&mut out, &Cnf::new(), 0).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "c CNF file written by cardsat\np cnf 0 0\n"
        );
    }

    #[test]
    fn write_through_cnf() {
        let mut cnf = Cnf::new();
        cnf.add_binary(!lit![0], !lit![1]);
        let mut out = Vec::new();
        cnf.write_dimacs(&mut out, 2).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("-1 -2 0\n"));
    }

    #[test]
    fn write_highest_var() {
        let mut vm = BasicVarManager::from_next_free(Var::new(Var::MAX_IDX - 1));
        let lits = vm.new_lits(2).unwrap();
        assert!(vm.new_var().is_err());
        let mut cnf = Cnf::new();
        cnf.add_binary(lits[0], !lits[1]);
        let mut out = Vec::new();
        cnf.write_dimacs(&mut out, vm.n_used()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "c CNF file written by cardsat\np cnf 2147483647 1\n2147483646 -2147483647 0\n"
        );
    }
}
