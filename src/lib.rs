//! An embeddable incremental CDCL SAT engine.
//!
//! ```
//! use bsat::*;
//!
//! let mut s = Solver::new(3);
//! s.add_clause(&[1, 2]).expect("consistent");
//! s.add_clause(&[-1, 2]).expect("consistent");
//! let h = s.add_clause(&[-2]).expect_err("inconsistent");
//! assert_eq!(h, SolverError::Inconsistent);
//! assert_eq!(s.solve(), Ok(Certificate::UNSAT(vec![])));
//!
//! let mut s = Solver::new(2);
//! s.add_clause(&[1, 2]).expect("consistent");
//! assert!(matches!(s.solve_with(&[-1], None), Ok(Certificate::SAT(v)) if v[1] == 2));
//! assert_eq!(s.variable_value(2), Some(true));
//! ```

/// Module `assign` implements Boolean Constraint Propagation and decision var selection.
pub mod assign;
/// Module `cdb` provides [`Clause`](`crate::cdb::Clause`) object and its manager [`ClauseDB`](`crate::cdb::ClauseDB`).
pub mod cdb;
/// Module `config` provides solver's configuration.
pub mod config;
/// Module `primitive` provides the Luby series.
pub mod primitive;
/// Module `solver` provides the top-level API as a SAT solver.
pub mod solver;
/// Module `state` is a collection of internal data.
pub mod state;
/// Module `types` provides various building blocks, including some common traits.
pub mod types;

pub use {
    config::{Config, RestartSchedule},
    solver::{Budget, Certificate, SatSolverIF, SolveIF, Solver, SolverResult, Stats},
    types::{ClauseHandle, SolverError},
};
