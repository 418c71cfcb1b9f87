#![cfg(feature = "batsat")]

use cardsat::{
    encodings::{
        am1::{self, Binary, Binomial, Commander, Encode, Product, Strategy},
        EncodeStats, Error, IterInputs,
    },
    instances::{BasicVarManager, Cnf, ManageVars},
    lit,
    solvers::{
        BatsatSolver, Solve,
        SolverResult::{Sat, Unsat},
    },
    types::Lit,
    var,
};

mod common;
use common::{inputs, test_all_counts, test_assignment};

macro_rules! gen_tests {
    ($mod:ident, $enc:ty) => {
        mod $mod {
            #[test]
            fn basic() {
                super::test_am1::<$enc>();
            }
            #[test]
            fn duplicate() {
                super::test_am1_duplicate::<$enc>();
            }
            #[test]
            fn negated() {
                super::test_am1_negated::<$enc>();
            }
            #[test]
            fn single_none() {
                super::test_am1_single_none::<$enc>();
            }
            #[test]
            fn stats() {
                super::test_am1_stats::<$enc>();
            }
            #[test]
            fn exactly_one() {
                super::test_eo::<$enc>();
            }
            #[test]
            fn empty_exactly_one() {
                super::test_empty_eo::<$enc>();
            }
        }
    };
}

fn encode_into_solver<AM1: am1::Encode + From<Vec<Lit>>>(
    lits: Vec<Lit>,
    next_free: u32,
    exactly: bool,
) -> BatsatSolver {
    let mut var_manager = BasicVarManager::from_next_free(var![next_free]);
    let mut enc = AM1::from(lits);
    let mut cnf = Cnf::new();
    if exactly {
        enc.encode_eo(&mut cnf, &mut var_manager).unwrap();
    } else {
        enc.encode_amo(&mut cnf, &mut var_manager).unwrap();
    }
    println!("{cnf:?}");
    let mut solver = BatsatSolver::default();
    solver.add_cnf(cnf).unwrap();
    solver
}

fn test_am1<AM1: am1::Encode + From<Vec<Lit>>>() {
    let mut solver = encode_into_solver::<AM1>(inputs(3), 3, false);
    test_assignment(&mut solver, &[lit![0], lit![1], lit![2]], Unsat);
    test_assignment(&mut solver, &[lit![0], lit![1], !lit![2]], Unsat);
    test_assignment(&mut solver, &[lit![0], !lit![1], lit![2]], Unsat);
    test_assignment(&mut solver, &[lit![0], !lit![1], !lit![2]], Sat);
    test_assignment(&mut solver, &[!lit![0], lit![1], lit![2]], Unsat);
    test_assignment(&mut solver, &[!lit![0], lit![1], !lit![2]], Sat);
    test_assignment(&mut solver, &[!lit![0], !lit![1], lit![2]], Sat);
    test_assignment(&mut solver, &[!lit![0], !lit![1], !lit![2]], Sat);

    for n in 2..=10 {
        let mut solver = encode_into_solver::<AM1>(inputs(n), n, false);
        test_all_counts(&mut solver, &inputs(n), |count| count <= 1);
    }
}

fn test_am1_duplicate<AM1: am1::Encode + From<Vec<Lit>>>() {
    let lits = vec![lit![0], lit![1], lit![2], lit![1]];
    let mut solver = encode_into_solver::<AM1>(lits.clone(), 3, false);
    test_all_counts(&mut solver, &lits, |count| count <= 1);
    test_assignment(&mut solver, &[!lit![0], lit![1], !lit![2]], Unsat);
    test_assignment(&mut solver, &[lit![0], !lit![1], !lit![2]], Sat);
}

fn test_am1_negated<AM1: am1::Encode + From<Vec<Lit>>>() {
    let lits = vec![!lit![0], lit![1], !lit![2], lit![3]];
    let mut solver = encode_into_solver::<AM1>(lits.clone(), 4, false);
    test_all_counts(&mut solver, &lits, |count| count <= 1);
    test_assignment(&mut solver, &[lit![0], !lit![1], lit![2], !lit![3]], Sat);
    test_assignment(&mut solver, &[!lit![0], !lit![1], !lit![2], !lit![3]], Unsat);
}

fn test_am1_single_none<AM1: am1::Encode + From<Vec<Lit>>>() {
    let mut var_manager = BasicVarManager::from_next_free(var![1]);
    let mut cnf = Cnf::new();
    let mut enc = AM1::from(vec![lit![0]]);
    enc.encode_amo(&mut cnf, &mut var_manager).unwrap();
    assert!(cnf.is_empty());
    assert_eq!(var_manager.n_used(), 1);

    let mut enc = AM1::from(vec![]);
    enc.encode_amo(&mut cnf, &mut var_manager).unwrap();
    assert!(cnf.is_empty());
    assert_eq!(var_manager.n_used(), 1);
}

fn test_am1_stats<AM1: am1::Encode + EncodeStats + IterInputs + From<Vec<Lit>>>() {
    let mut var_manager = BasicVarManager::from_next_free(var![7]);
    let lits: Vec<Lit> = inputs(7);
    let mut enc = AM1::from(lits.clone());
    assert_eq!(enc.n_lits(), 7);
    assert_eq!(enc.iter().collect::<Vec<_>>(), lits);

    let mut cnf = Cnf::new();
    enc.encode_amo(&mut cnf, &mut var_manager).unwrap();
    assert_eq!(enc.n_clauses(), cnf.len());
    assert_eq!(enc.n_vars(), var_manager.n_used() - 7);
}

fn test_eo<AM1: am1::Encode + From<Vec<Lit>>>() {
    for n in 1..=9 {
        let mut solver = encode_into_solver::<AM1>(inputs(n), n, true);
        test_all_counts(&mut solver, &inputs(n), |count| count == 1);
    }
}

fn test_empty_eo<AM1: am1::Encode + From<Vec<Lit>>>() {
    let mut var_manager = BasicVarManager::from_next_free(var![4]);
    let mut cnf = Cnf::new();
    cnf.add_unit(lit![0]);
    let mut enc = AM1::from(vec![]);
    assert_eq!(
        enc.encode_eo(&mut cnf, &mut var_manager),
        Err(Error::EmptyGroup)
    );
    assert_eq!(cnf.len(), 1);
    assert_eq!(var_manager.n_used(), 4);
}

gen_tests!(binomial, cardsat::encodings::am1::Binomial);
gen_tests!(binary, cardsat::encodings::am1::Binary);
gen_tests!(commander, cardsat::encodings::am1::Commander);
gen_tests!(product, cardsat::encodings::am1::Product);
gen_tests!(sequential, cardsat::encodings::am1::SequentialCounter);
gen_tests!(
    commander_binary,
    cardsat::encodings::am1::Commander<cardsat::encodings::am1::Binary>
);
gen_tests!(
    product_product,
    cardsat::encodings::am1::Product<cardsat::encodings::am1::Product>
);

#[test]
fn binary_bit_counts() {
    for (n, bits) in [(1, 0), (2, 1), (3, 2), (4, 2), (5, 3), (8, 3), (9, 4)] {
        assert_eq!(Binary::n_bits(n), bits, "{n} lits");
        let mut var_manager = BasicVarManager::from_next_free(var![16]);
        let mut enc = Binary::from(inputs(u32::try_from(n).unwrap()));
        let mut cnf = Cnf::new();
        enc.encode_amo(&mut cnf, &mut var_manager).unwrap();
        assert_eq!(var_manager.n_used(), 16 + bits);
        assert_eq!(cnf.len(), if bits == 0 { 0 } else { n * bits as usize });
    }
}

#[test]
fn commander_group_sizes() {
    for n in 1u32..=10 {
        for group_size in [1, 2, n as usize, n as usize + 1] {
            let mut var_manager = BasicVarManager::from_next_free(var![n]);
            let mut enc: Commander = Commander::new(group_size).unwrap();
            enc.extend(inputs(n));
            let mut cnf = Cnf::new();
            enc.encode_eo(&mut cnf, &mut var_manager).unwrap();
            let n_commanders = (n as usize).div_ceil(group_size);
            assert_eq!(enc.n_vars() as usize, n_commanders);
            assert_eq!(var_manager.n_used() as usize, n as usize + n_commanders);

            let mut solver = BatsatSolver::default();
            solver.add_cnf(cnf).unwrap();
            test_all_counts(&mut solver, &inputs(n), |count| count == 1);
        }
    }
}

#[test]
fn product_dimensions_cover() {
    for n in 1..=12 {
        let (p, q) = Product::<Binomial>::dimensions(n);
        assert!(p * q >= n, "{p}x{q} does not cover {n}");
        assert!(p * (q - 1) < n, "{p}x{q} is too large for {n}");
    }
}

#[test]
fn strategies_agree() {
    let strategies = [
        Strategy::Binomial,
        Strategy::Binary,
        Strategy::Commander { group_size: 3 },
        Strategy::Product,
        Strategy::SequentialCounter,
    ];
    for strategy in strategies {
        for n in 1..=7 {
            let mut var_manager = BasicVarManager::from_next_free(var![n]);
            let mut cnf = Cnf::new();
            strategy
                .encode_eo(&inputs(n), &mut cnf, &mut var_manager)
                .unwrap();
            let mut solver = BatsatSolver::default();
            solver.add_cnf(cnf).unwrap();
            test_all_counts(&mut solver, &inputs(n), |count| count == 1);
        }
    }
}

#[test]
fn strategy_rejects_zero_group_size() {
    let mut var_manager = BasicVarManager::from_next_free(var![3]);
    let mut cnf = Cnf::new();
    assert_eq!(
        Strategy::Commander { group_size: 0 }.encode_amo(&inputs(3), &mut cnf, &mut var_manager),
        Err(Error::InvalidGroupSize)
    );
    assert!(cnf.is_empty());
}
