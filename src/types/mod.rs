//! Module `types' provides various building blocks, including
//! some common traits.

/// methods on CNF file
pub mod cnf;
/// methods on flags used in Var and Clause
pub mod flags;
/// methods on literals
pub mod lit;

pub use self::{cnf::*, flags::*, lit::*};

pub use crate::{
    assign::AssignReason,
    cdb::{ClauseHandle, ClauseId},
    config::Config,
    solver::SolverEvent,
};

/// Variable as Index is `usize`; index zero is reserved.
pub type VarId = usize;

/// Decision Level Representation
pub type DecisionLevel = u32;

/// API for accessing internal data in a module.
/// For example, `Solver::stats` needs to access counters,
/// which, however, should be used locally in the defining modules.
/// To avoid to make them public, we define a generic accessor or exporter here.
pub trait PropertyDereference<I, O: Sized> {
    fn derefer(&self, key: I) -> O;
}

/// API for object instantiation based on `Configuration` and `CNFDescription`.
/// This is implemented by *all the modules* except `Configuration` and `CNFDescription`.
///
/// # Example
///
/// ```
/// use bsat::{cdb::ClauseDB, config::Config, solver::Solver, types::*};
/// let _ = ClauseDB::instantiate(&Config::default(), &CNFDescription::default());
/// let _ = Solver::instantiate(&Config::default(), &CNFDescription::default());
///```
pub trait Instantiate {
    /// make and return an object from `Config` and `CNFDescription`.
    fn instantiate(conf: &Config, cnf: &CNFDescription) -> Self;
    /// update by a solver event.
    fn handle(&mut self, _e: SolverEvent) {}
}

/// Capture a conflict: a falsified literal and the clause containing it
pub type ConflictContext = (Lit, AssignReason);

/// Return type of unit propagation
pub type PropagationResult = Result<(), ConflictContext>;

/// Errors returned by solver functions.
/// Note: unsatisfiability under assumptions and budget exhaustion are
/// results, see [`Certificate`](`crate::solver::Certificate`).
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SolverError {
    /// A clause contains a literal out of the range defined in its header.
    /// '0' is an example.
    #[error("a literal out of the declared variable range")]
    InvalidLiteral,
    /// A handle doesn't point to a live clause.
    #[error("a stale or unknown clause handle")]
    InvalidHandle,
    /// Exceptions caused by file operations
    #[error("an I/O error")]
    IOError,
    /// the permanent clause set is unsatisfiable at the root level
    #[error("the clause set became inconsistent")]
    Inconsistent,
    /// the clause store reached its soft limit
    #[error("out of clause memory")]
    OutOfMemory,
    /// broken internal invariant
    #[error("solver bug")]
    SolverBug,
}

impl From<std::io::Error> for SolverError {
    fn from(_: std::io::Error) -> Self {
        SolverError::IOError
    }
}

/// A Return type used by solver functions.
pub type MaybeInconsistent = Result<(), SolverError>;
