//! # cardsat - Cardinality Constraints to CNF
//!
//! `cardsat` compiles boolean cardinality constraints ("exactly one of these
//! literals is true", "at most k", "at least k") into conjunctive normal form
//! that any SAT solver can consume. It provides five encodings that trade
//! clause count, auxiliary variables and propagation strength against each
//! other:
//!
//! - [`Binomial`](encodings::am1::Binomial): pairwise exclusion, no auxiliary variables
//! - [`Binary`](encodings::am1::Binary): logarithmic selector bits
//! - [`Commander`](encodings::am1::Commander): hierarchical commander variables
//! - [`Product`](encodings::am1::Product): two-dimensional row/column variables
//! - [`SequentialCounter`](encodings::card::SequentialCounter): running sum
//!   registers for at-most-k, at-least-k and exactly-k
//!
//! The [`queens`] module uses the encodings to compile and solve the N-Queens
//! placement problem.
//!
//! ## Features
//!
//! | Feature name | Description |
//! | --- | --- |
//! | `batsat` | Include the pure-Rust BatSat solver as [`solvers::BatsatSolver`]. Enabled by default. |
//! | `serde` | Derive `Serialize` and `Deserialize` for types, encodings and configurations. |

#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod encodings;
pub mod instances;
pub mod queens;
pub mod solvers;
pub mod types;

mod utils;
