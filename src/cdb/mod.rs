/// methods on `ClauseId` and `ClauseHandle`
mod cid;
/// methods on `Clause`
mod clause;
/// methods on `ClauseDB`
mod db;
/// methods on `Watch` and `WatchDB`
mod watch;

pub use self::{
    cid::{ClauseHandle, ClauseId},
    clause::ClauseIF,
    property::*,
    watch::{Watch, WatchDBIF},
};

use {
    crate::{assign::AssignIF, types::*},
    std::{ops::IndexMut, slice::Iter},
};

/// API for clause management like [`reduce`](`crate::cdb::ClauseDBIF::reduce`), [`new_clause`](`crate::cdb::ClauseDBIF::new_clause`), [`garbage_collect`](`crate::cdb::ClauseDBIF::garbage_collect`), and so on.
pub trait ClauseDBIF:
    IndexMut<ClauseId, Output = Clause> + Instantiate + PropertyDereference<property::Tusize, u64>
{
    /// return the length of `clause`, including dead slots.
    fn len(&self) -> usize;
    /// return true if it's empty.
    fn is_empty(&self) -> bool;
    /// return an iterator.
    fn iter(&self) -> Iter<'_, Clause>;
    /// allocate a new clause and return its id.
    /// * If `learnt` is on, register `v` as a learnt; `v[0]` and `v[1]` become the watches.
    /// * Otherwise, register `v` as a permanent clause after moving two un-falsified
    ///   literals (under the current assignment) to the watch positions if possible.
    ///   A permanent clause gets a [`ClauseHandle`].
    fn new_clause<A>(&mut self, asg: &A, v: &mut Vec<Lit>, learnt: bool) -> ClauseId
    where
        A: AssignIF;
    /// make a clause dead. Its slot is reclaimed by the next `garbage_collect`.
    fn remove_clause(&mut self, cid: ClauseId);
    /// kill all learnt clauses.
    fn remove_learnts(&mut self);
    /// return the current id of the clause named by `handle`.
    fn resolve(&self, handle: ClauseHandle) -> Option<ClauseId>;
    /// return `true` if the clause is the reason of its first literal.
    fn locked<A>(&self, asg: &A, cid: ClauseId) -> bool
    where
        A: AssignIF;
    /// bump the activity of a learnt clause used in conflict analysis.
    fn bump_activity(&mut self, cid: ClauseId);
    /// increase the bump step, which is equivalent to decaying all activities.
    fn decay_activity(&mut self);
    /// check the condition to reduce, and reduce learnts if so.
    /// * return `true` if reduction is done.
    /// * Otherwise return `false`.
    fn reduce<A>(&mut self, asg: &mut A, nc: u64) -> bool
    where
        A: AssignIF;
    /// reclaim slots of *dead* clauses, which are made by:
    /// * `reduce`
    /// * `remove_clause`
    /// * `remove_learnts`
    ///
    /// Surviving clauses are packed to the front and get new ids; every watch,
    /// handle, and assignment reason is renamed in the same pass.
    fn garbage_collect<A>(&mut self, asg: &mut A)
    where
        A: AssignIF;
    /// check the number of clauses
    /// * `Err(SolverError::OutOfMemory)` -- the db size is over the limit.
    /// * `Ok(())` -- enough small
    fn check_size(&self) -> MaybeInconsistent;
    /// returns None if the given assignment is a model of a problem.
    /// Otherwise returns an original clause which is not satisfiable under a given assignment.
    fn validate(&self, model: &[Option<bool>]) -> Option<ClauseId>;
    /// return the watching literals of a clause; check the watcher lists in debug builds.
    fn watches(&self, cid: ClauseId, message: &str) -> (Lit, Lit);
}

/// A representation of 'clause'
#[derive(Clone, Debug)]
pub struct Clause {
    /// The literals in a clause.
    pub(crate) lits: Vec<Lit>,
    /// A dynamic clause evaluation criterion based on the number of references.
    pub(crate) activity: f64,
    /// The stable name given to the caller; `None` for learnts
    pub(crate) handle: Option<ClauseHandle>,
    /// Flags
    pub(crate) flags: FlagClause,
}

/// Clause database
///
///```
/// use bsat::{cdb::*, config::Config, types::*};
/// let cdb = ClauseDB::instantiate(&Config::default(), &CNFDescription::default());
/// assert!(cdb.is_empty());
///```
#[derive(Clone, Debug)]
pub struct ClauseDB {
    /// container of clauses; index zero is a dummy.
    pub(crate) clause: Vec<Clause>,
    /// container of watch literals for binary clauses
    pub(crate) bin_watcher: Vec<Vec<Watch>>,
    /// container of watch literals
    pub(crate) watcher: Vec<Vec<Watch>>,
    /// map from handle serials to current clause ids
    pub(crate) handle_table: Vec<ClauseId>,
    /// a number of clauses to emit out-of-memory exception
    soft_limit: usize,
    /// propagate binary clauses through `bin_watcher`
    use_bin_shortcut: bool,

    //
    //## clause rewarding
    //
    activity_inc: f64,
    activity_decay: f64,

    //
    //## reduction
    //
    /// disable reduction
    without_reduce: bool,
    /// increment step of reduction threshold
    inc_step: usize,
    /// the interval to the next reduction, growing by `inc_step`
    reduction_span: u64,
    next_reduction: u64,
    reduction_ratio: f64,

    //
    //## statistics
    //
    /// the number of active (not DEAD) clauses.
    num_clause: u64,
    /// the number of binary clauses.
    num_bi_clause: u64,
    /// the present number of learnt clauses.
    num_learnt: u64,
    /// the number of learnt clauses ever generated.
    num_learnt_total: u64,
    /// the number of reductions.
    num_reduction: u64,
    /// the number of garbage collections.
    num_gc: u64,
    /// the number of dead slots waiting for garbage collection.
    num_dead: usize,
}

pub mod property {
    use super::ClauseDB;
    use crate::types::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    pub enum Tusize {
        NumBiClause,
        NumClause,
        NumGC,
        NumLearnt,
        NumLearntTotal,
        NumReduction,
    }

    impl PropertyDereference<Tusize, u64> for ClauseDB {
        #[inline]
        fn derefer(&self, k: Tusize) -> u64 {
            match k {
                Tusize::NumClause => self.num_clause,
                Tusize::NumBiClause => self.num_bi_clause,
                Tusize::NumGC => self.num_gc,
                Tusize::NumLearnt => self.num_learnt,
                Tusize::NumLearntTotal => self.num_learnt_total,
                Tusize::NumReduction => self.num_reduction,
            }
        }
    }
}
