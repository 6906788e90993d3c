/// Module `state` is a collection of internal data for a search.
use {
    crate::{solver::Budget, types::*},
    std::fmt,
};

#[cfg(feature = "platform_wasm")]
use instant::Instant;
#[cfg(not(feature = "platform_wasm"))]
use std::time::Instant;

/// Data storage for `Solver`.
#[derive(Clone, Debug)]
pub struct State {
    /// solver configuration
    pub config: Config,
    /// description of the given CNF
    pub target: CNFDescription,
    /// assumptions of the current (or last) solve call
    pub(crate) assumptions: Vec<Lit>,
    /// the failed assumptions found by the last solve call
    pub(crate) conflicts: Vec<Lit>,
    /// working place to build learnt clauses
    pub(crate) new_learnt: Vec<Lit>,
    /// the model found by the last successful solve call, indexed by `VarId`
    pub(crate) model: Vec<Option<bool>>,
    /// the permanent clause set is unsatisfiable
    pub(crate) inconsistent: bool,
    /// a permanent clause was removed; root level facts are stale
    pub(crate) need_rebuild: bool,

    //
    //## budget
    //
    pub(crate) conflict_limit: Option<u64>,
    pub(crate) propagation_limit: Option<u64>,
    pub(crate) time_limit: Option<f64>,
    pub(crate) start: Instant,

    //
    //## statistics
    //
    pub(crate) num_solve: u64,
    pub(crate) num_indeterminate: u64,
}

impl Default for State {
    fn default() -> State {
        State {
            config: Config::default(),
            target: CNFDescription::default(),
            assumptions: Vec::new(),
            conflicts: Vec::new(),
            new_learnt: Vec::new(),
            model: vec![None],
            inconsistent: false,
            need_rebuild: false,
            conflict_limit: None,
            propagation_limit: None,
            time_limit: None,
            start: Instant::now(),
            num_solve: 0,
            num_indeterminate: 0,
        }
    }
}

impl Instantiate for State {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> State {
        State {
            config: config.clone(),
            target: cnf.clone(),
            model: vec![None; cnf.num_of_variables + 1],
            ..State::default()
        }
    }
    fn handle(&mut self, e: SolverEvent) {
        match e {
            SolverEvent::NewVar => {
                self.target.num_of_variables += 1;
                self.model.push(None);
            }
            SolverEvent::Reinitialize => {
                self.model.iter_mut().for_each(|v| *v = None);
                self.assumptions.clear();
                self.need_rebuild = false;
            }
            _ => (),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}, #solve: {}, #assumption: {}",
            self.target,
            self.num_solve,
            self.assumptions.len()
        )
    }
}

impl State {
    /// set up the budget of a solve call; limits are relative to the given counters.
    pub(crate) fn start_budget(
        &mut self,
        budget: Option<Budget>,
        num_conflict: u64,
        num_propagation: u64,
    ) {
        let budget = budget.unwrap_or_default();
        self.conflict_limit = budget.conflicts.map(|n| num_conflict.saturating_add(n));
        self.propagation_limit = budget
            .propagations
            .map(|n| num_propagation.saturating_add(n));
        self.time_limit = budget
            .timeout
            .or((0.0 < self.config.timeout).then_some(self.config.timeout));
        self.start = Instant::now();
    }
    /// return `true` if the budget is used up.
    pub(crate) fn is_out_of_budget(&self, num_conflict: u64, num_propagation: u64) -> bool {
        self.conflict_limit.is_some_and(|limit| limit <= num_conflict)
            || self
                .propagation_limit
                .is_some_and(|limit| limit <= num_propagation)
            || self
                .time_limit
                .is_some_and(|limit| limit <= self.start.elapsed().as_secs_f64())
    }
}
