/// main struct AssignStack
use {
    super::{AssignIF, Var, VarHeapIF, VarIdHeap, VarOrderIF},
    crate::types::*,
    std::{fmt, slice::Iter},
};

/// A record of assignment. It's called 'trail' in Glucose.
#[derive(Clone, Debug)]
pub struct AssignStack {
    /// assigns of vars
    pub(super) assign: Vec<Option<bool>>,
    /// levels of vars
    pub(super) level: Vec<DecisionLevel>,
    /// reason of assignment
    pub(super) reason: Vec<AssignReason>,
    /// vars
    pub(super) var: Vec<Var>,
    /// record of assignment
    pub(crate) trail: Vec<Lit>,
    pub(crate) trail_lim: Vec<usize>,
    /// the-number-of-assigned-and-propagated-vars + 1
    pub(crate) q_head: usize,
    /// the level below which no restart backjumps, i.e. the number of assumptions
    pub(crate) root_level: DecisionLevel,
    /// var order
    pub(super) var_order: VarIdHeap,

    //
    //## VSIDS
    //
    pub(super) activity_inc: f64,
    pub(super) activity_decay: f64,
    pub(super) use_phase_saving: bool,

    //
    //## Statistics
    //
    /// the number of vars.
    pub num_vars: usize,
    /// the number of asserted vars.
    pub num_asserted_vars: usize,
    pub(crate) num_conflict: u64,
    pub(crate) num_decision: u64,
    pub(crate) num_propagation: u64,
    pub(crate) num_restart: u64,
}

impl Default for AssignStack {
    fn default() -> AssignStack {
        AssignStack {
            assign: vec![None],
            level: vec![0],
            reason: vec![AssignReason::None],
            var: Var::new_vars(0),
            trail: Vec::new(),
            trail_lim: Vec::new(),
            q_head: 0,
            root_level: 0,
            var_order: VarIdHeap::new(0, 0),
            activity_inc: 1.0,
            activity_decay: 0.95,
            use_phase_saving: true,
            num_vars: 0,
            num_asserted_vars: 0,
            num_conflict: 0,
            num_decision: 0,
            num_propagation: 0,
            num_restart: 0,
        }
    }
}

impl Instantiate for AssignStack {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> AssignStack {
        let nv = cnf.num_of_variables;
        AssignStack {
            assign: vec![None; 1 + nv],
            level: vec![DecisionLevel::default(); nv + 1],
            reason: vec![AssignReason::None; nv + 1],
            var: Var::new_vars(nv),
            trail: Vec::with_capacity(nv),
            var_order: VarIdHeap::new(nv, nv),
            activity_decay: config.var_decay,
            use_phase_saving: config.use_phase_saving,
            num_vars: nv,
            ..AssignStack::default()
        }
    }
    #[inline]
    fn handle(&mut self, e: SolverEvent) {
        match e {
            SolverEvent::NewVar => {
                self.num_vars += 1;
                let vi = self.num_vars;
                self.assign.push(None);
                self.level.push(DecisionLevel::default());
                self.reason.push(AssignReason::None);
                self.var.push(Var::default());
                self.var_order.push_var(vi);
                self.insert_heap(vi);
            }
            SolverEvent::Restart => {
                self.num_restart += 1;
            }
            SolverEvent::Reinitialize => {
                // forget everything including the root level assignments
                for l in self.trail.iter() {
                    let vi = l.vi();
                    unset_assign!(self, vi);
                    self.reason[vi] = AssignReason::None;
                    self.level[vi] = DecisionLevel::default();
                }
                self.trail.clear();
                self.trail_lim.clear();
                self.q_head = 0;
                self.num_asserted_vars = 0;
                self.var_order.clear();
                for vi in 1..=self.num_vars {
                    self.insert_heap(vi);
                }
            }
            _ => (),
        }
    }
}

impl AssignIF for AssignStack {
    fn root_level(&self) -> DecisionLevel {
        self.root_level
    }
    fn stack(&self, i: usize) -> Lit {
        self.trail[i]
    }
    fn stack_len(&self) -> usize {
        self.trail.len()
    }
    fn len_upto(&self, n: DecisionLevel) -> usize {
        self.trail_lim.get(n as usize).map_or(self.trail.len(), |n| *n)
    }
    fn stack_is_empty(&self) -> bool {
        self.trail.is_empty()
    }
    fn stack_iter(&self) -> Iter<'_, Lit> {
        self.trail.iter()
    }
    fn decision_level(&self) -> DecisionLevel {
        self.trail_lim.len() as DecisionLevel
    }
    fn remains(&self) -> bool {
        self.q_head < self.trail.len()
    }
    fn level_up(&mut self) {
        self.trail_lim.push(self.trail.len());
    }
    #[inline]
    fn assign(&self, vi: VarId) -> Option<bool> {
        var_assign!(self, vi)
    }
    #[inline]
    fn assigned(&self, l: Lit) -> Option<bool> {
        lit_assign!(self, l)
    }
    #[inline]
    fn level(&self, vi: VarId) -> DecisionLevel {
        self.level[vi]
    }
    #[inline]
    fn reason(&self, vi: VarId) -> AssignReason {
        self.reason[vi]
    }
    fn var(&self, vi: VarId) -> &Var {
        &self.var[vi]
    }
    fn var_mut(&mut self, vi: VarId) -> &mut Var {
        &mut self.var[vi]
    }
    fn assign_ref(&self) -> &[Option<bool>] {
        &self.assign
    }
    fn relocate_reasons(&mut self, table: &[ClauseId]) {
        for l in self.trail.iter() {
            if let AssignReason::Implication(cid) = &mut self.reason[l.vi()] {
                *cid = table[usize::from(*cid)];
                debug_assert!(!cid.is_none(), "a reason clause was reclaimed");
            }
        }
    }
}

impl fmt::Display for AssignStack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let v = self.trail.iter().map(|l| i32::from(*l)).collect::<Vec<_>>();
        let levels = self.decision_level();
        let c = |i: DecisionLevel| {
            let from = if i == 0 { 0 } else { self.len_upto(i - 1) };
            (i, &v[from..self.len_upto(i)])
        };
        write!(
            f,
            "ASG:: trail({}):{:?}\n      stats: level: {}, asserted: {}",
            self.trail.len(),
            (0..=levels).map(c).collect::<Vec<_>>(),
            levels,
            self.num_asserted_vars,
        )
    }
}
