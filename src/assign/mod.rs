// Module `assign` implements Boolean Constraint Propagation and decision var selection.

/// ```ignore
/// let x: Option<bool> = var_assign!(self, lit.vi());
/// ```
macro_rules! var_assign {
    ($asg: expr, $var: expr) => {
        $asg.assign[$var]
    };
}

macro_rules! lit_assign {
    ($asg: expr, $lit: expr) => {
        match $lit {
            l => match $asg.assign[l.vi()] {
                Some(x) if !bool::from(l) => Some(!x),
                x => x,
            },
        }
    };
}

macro_rules! set_assign {
    ($asg: expr, $lit: expr) => {
        match $lit {
            l => {
                let vi = l.vi();
                $asg.assign[vi] = Some(bool::from(l));
            }
        }
    };
}

macro_rules! unset_assign {
    ($asg: expr, $var: expr) => {
        $asg.assign[$var] = None;
    };
}

/// Var rewarding based on VSIDS
mod evsids;
/// Heap
mod heap;
/// Boolean constraint propagation
mod propagate;
/// Decision var selection
mod select;
/// assignment management
mod stack;
/// Var struct
mod var;

pub use self::{
    evsids::VarActivityIF,
    heap::{VarHeapIF, VarIdHeap, VarOrderIF},
    propagate::PropagateIF,
    property::*,
    select::VarSelectIF,
    stack::AssignStack,
    var::Var,
};

use {
    crate::types::*,
    std::{fmt, slice::Iter},
};

/// API about assignment like
/// [`decision_level`](`crate::assign::AssignIF::decision_level`),
/// [`stack`](`crate::assign::AssignIF::stack`),
/// [`assigned`](`crate::assign::AssignIF::assigned`), and so on.
pub trait AssignIF: Instantiate + PropertyDereference<property::Tusize, u64> {
    /// return root level.
    fn root_level(&self) -> DecisionLevel;
    /// return a literal in the stack.
    fn stack(&self, i: usize) -> Lit;
    /// return the number of assignments.
    fn stack_len(&self) -> usize;
    /// return the number of assignments at a given decision level `u`.
    ///
    /// ## Caveat
    /// - it emits a panic by out of index range.
    /// - it emits a panic if the level is 0.
    fn len_upto(&self, n: DecisionLevel) -> usize;
    /// return `true` if there's no assignment.
    fn stack_is_empty(&self) -> bool;
    /// return an iterator over assignment stack.
    fn stack_iter(&self) -> Iter<'_, Lit>;
    /// return the current decision level.
    fn decision_level(&self) -> DecisionLevel;
    /// return `true` if there are un-propagated assignments.
    fn remains(&self) -> bool;
    /// open a new decision level without assigning anything.
    fn level_up(&mut self);
    /// return the assignment of var.
    fn assign(&self, vi: VarId) -> Option<bool>;
    /// return *the value* of a literal.
    fn assigned(&self, l: Lit) -> Option<bool>;
    /// return the assign level of var.
    fn level(&self, vi: VarId) -> DecisionLevel;
    /// return the reason of assignment.
    fn reason(&self, vi: VarId) -> AssignReason;
    /// return the var.
    fn var(&self, vi: VarId) -> &Var;
    /// return the var.
    fn var_mut(&mut self, vi: VarId) -> &mut Var;
    /// return the current assignment of all vars, indexed by `VarId`.
    fn assign_ref(&self) -> &[Option<bool>];
    /// rename clause ids in reasons after garbage collection.
    fn relocate_reasons(&mut self, table: &[ClauseId]);
}

/// Reasons of assignments
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum AssignReason {
    /// Implication by binary clause; holds the other, falsified literal.
    BinaryLink(Lit),
    /// Assigned by decision, or asserted at level zero.
    Decision(DecisionLevel),
    /// Assigned by a clause.
    Implication(ClauseId),
    /// None of the above.
    None,
}

impl fmt::Display for AssignReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &AssignReason::BinaryLink(_) => write!(f, "Implied by a binary clause"),
            AssignReason::Decision(0) => write!(f, "Asserted"),
            AssignReason::Decision(lvl) => write!(f, "Decided at level {lvl}"),
            AssignReason::Implication(cid) => write!(f, "Implied by {cid}"),
            AssignReason::None => write!(f, "Not assigned"),
        }
    }
}

pub mod property {
    use super::AssignStack;
    use crate::types::*;

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum Tusize {
        NumConflict,
        NumDecision,
        NumPropagation,
        NumRestart,
        //
        //## var stat
        //
        NumVar,
        NumAssertedVar,
        NumUnassignedVar,
        RootLevel,
    }

    impl PropertyDereference<Tusize, u64> for AssignStack {
        #[inline]
        fn derefer(&self, k: Tusize) -> u64 {
            match k {
                Tusize::NumConflict => self.num_conflict,
                Tusize::NumDecision => self.num_decision,
                Tusize::NumPropagation => self.num_propagation,
                Tusize::NumRestart => self.num_restart,
                Tusize::NumVar => self.num_vars as u64,
                Tusize::NumAssertedVar => self.num_asserted_vars as u64,
                Tusize::NumUnassignedVar => (self.num_vars - self.trail.len()) as u64,
                Tusize::RootLevel => self.root_level as u64,
            }
        }
    }
}
