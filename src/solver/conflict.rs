//! Conflict Analysis
use {
    super::restart::Restarter,
    crate::{
        assign::{AssignIF, AssignStack, PropagateIF, VarActivityIF},
        cdb::{ClauseDB, ClauseDBIF, ClauseIF},
        state::State,
        types::*,
    },
    tracing::trace,
};

/// learn a clause from a conflict and backjump.
///
/// # Errors
///
/// * `SolverError::Inconsistent` if the conflict occurred at level zero.
/// * `SolverError::OutOfMemory` if the clause store hit its limit.
pub fn handle_conflict(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    rst: &mut Restarter,
    state: &mut State,
    cc: &ConflictContext,
) -> MaybeInconsistent {
    if asg.decision_level() == 0 {
        return Err(SolverError::Inconsistent);
    }
    rst.handle(SolverEvent::Conflict);
    let use_bin_shortcut = state.config.use_bin_shortcut;
    let assign_level = conflict_analyze(asg, cdb, state, cc);
    let new_learnt = &mut state.new_learnt;
    debug_assert!(!new_learnt.is_empty());
    let l0 = new_learnt[0];
    if new_learnt.len() == 1 {
        //
        //## A NEW ASSERTION by UNIT LEARNT CLAUSE GENERATION
        //
        trace!("learnt an assertion {l0}");
        asg.cancel_until(0);
        asg.assign_at_root_level(l0)?;
    } else {
        asg.cancel_until(assign_level);
        let l1 = new_learnt[1];
        let binary = new_learnt.len() == 2;
        let cid = cdb.new_clause(asg, new_learnt, true);
        let reason = if binary && use_bin_shortcut {
            AssignReason::BinaryLink(l1)
        } else {
            AssignReason::Implication(cid)
        };
        asg.assign_by_implication(l0, reason);
    }
    asg.decay_activity();
    cdb.decay_activity();
    cdb.check_size()
}

/// flag the var of a false literal `q` found in a reason clause.
/// Return `true` if it sits at the conflicting level `dl`; otherwise it goes to `learnt`.
fn visit(asg: &mut AssignStack, learnt: &mut Vec<Lit>, q: Lit, dl: DecisionLevel) -> bool {
    let vi = q.vi();
    let lvl = asg.level(vi);
    if lvl == 0 || asg.var(vi).is(FlagVar::CA_SEEN) {
        return false;
    }
    debug_assert_eq!(asg.assigned(q), Some(false));
    asg.var_mut(vi).turn_on(FlagVar::CA_SEEN);
    asg.bump_activity(vi);
    if lvl == dl {
        true
    } else {
        debug_assert!(lvl < dl);
        learnt.push(q);
        false
    }
}

///
/// ## Conflict Analysis
///
/// Build the first-UIP clause into `state.new_learnt` and return the backjump level.
fn conflict_analyze(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    state: &mut State,
    cc: &ConflictContext,
) -> DecisionLevel {
    let learnt = &mut state.new_learnt;
    learnt.clear();
    learnt.push(Lit::default());
    let dl = asg.decision_level();
    let mut path_cnt = 0;
    let (mut p, mut reason) = *cc;
    if visit(asg, learnt, p, dl) {
        path_cnt += 1;
    }
    let mut ti = asg.stack_len() - 1; // trail index
    loop {
        match reason {
            AssignReason::BinaryLink(l) => {
                if visit(asg, learnt, l, dl) {
                    path_cnt += 1;
                }
            }
            AssignReason::Implication(cid) => {
                cdb.bump_activity(cid);
                let c = &cdb[cid];
                debug_assert!(!c.is_dead());
                for q in &c[1..] {
                    if visit(asg, learnt, *q, dl) {
                        path_cnt += 1;
                    }
                }
            }
            AssignReason::Decision(_) | AssignReason::None => {
                unreachable!("conflict_analyze: {p} has no antecedent at level {dl}");
            }
        }
        // set the index of the next literal to ti
        while {
            let vi = asg.stack(ti).vi();
            !asg.var(vi).is(FlagVar::CA_SEEN) || asg.level(vi) != dl
        } {
            ti -= 1;
        }
        p = asg.stack(ti);
        asg.var_mut(p.vi()).turn_off(FlagVar::CA_SEEN);
        path_cnt -= 1;
        if path_cnt == 0 {
            break;
        }
        debug_assert!(0 < ti);
        ti -= 1;
        reason = asg.reason(p.vi());
    }
    debug_assert!(learnt.iter().all(|l| *l != !p));
    debug_assert_eq!(asg.level(p.vi()), dl);
    learnt[0] = !p;
    trace!("learnt {:?} by the UIP {p}", i32s(learnt));
    state.minimize_learnt(asg, cdb)
}

impl State {
    /// drop redundant literals from `new_learnt`, move the literal at the
    /// backjump level to the second position, and return that level.
    fn minimize_learnt(&mut self, asg: &mut AssignStack, cdb: &ClauseDB) -> DecisionLevel {
        let State {
            ref mut new_learnt, ..
        } = self;
        let mut to_clear: Vec<Lit> = vec![new_learnt[0]];
        let mut levels = vec![false; asg.decision_level() as usize + 1];
        for l in &new_learnt[1..] {
            to_clear.push(*l);
            levels[asg.level(l.vi()) as usize] = true;
        }
        let l0 = new_learnt[0];
        new_learnt.retain(|l| *l == l0 || !l.is_redundant(asg, cdb, &mut to_clear, &levels));
        // find correct backtrack level from remaining literals
        let mut level_to_return = 0;
        if 1 < new_learnt.len() {
            let mut max_i = 1;
            level_to_return = asg.level(new_learnt[max_i].vi());
            for (i, l) in new_learnt.iter().enumerate().skip(2) {
                let lv = asg.level(l.vi());
                if level_to_return < lv {
                    level_to_return = lv;
                    max_i = i;
                }
            }
            new_learnt.swap(1, max_i);
        }
        for l in &to_clear {
            asg.var_mut(l.vi()).turn_off(FlagVar::CA_SEEN);
        }
        level_to_return
    }
}

impl Lit {
    /// return `true` if the `lit` is redundant, which is defined by
    /// any leaf of implication graph for it isn't an asserted var nor a decision var.
    /// The graph is walked with an explicit stack; `levels` marks the levels
    /// occurring in the learnt, outside which no leaf can be redundant.
    fn is_redundant(
        self,
        asg: &mut AssignStack,
        cdb: &ClauseDB,
        clear: &mut Vec<Lit>,
        levels: &[bool],
    ) -> bool {
        if let AssignReason::Decision(_) = asg.reason(self.vi()) {
            return false;
        }
        let mut stack = vec![self];
        let top = clear.len();
        while let Some(sl) = stack.pop() {
            let reason = asg.reason(sl.vi());
            let antecedents: &[Lit] = match &reason {
                AssignReason::BinaryLink(l) => std::slice::from_ref(l),
                AssignReason::Implication(cid) => &cdb[*cid][1..],
                AssignReason::Decision(_) | AssignReason::None => {
                    unreachable!("is_redundant: {sl} has no antecedent")
                }
            };
            for q in antecedents {
                let vi = q.vi();
                let lv = asg.level(vi);
                if lv == 0 || asg.var(vi).is(FlagVar::CA_SEEN) {
                    continue;
                }
                if matches!(
                    asg.reason(vi),
                    AssignReason::BinaryLink(_) | AssignReason::Implication(_)
                ) && levels[lv as usize]
                {
                    asg.var_mut(vi).turn_on(FlagVar::CA_SEEN);
                    stack.push(*q);
                    clear.push(*q);
                } else {
                    // one of the roots is a decision var at an unchecked level.
                    for l in &clear[top..] {
                        asg.var_mut(l.vi()).turn_off(FlagVar::CA_SEEN);
                    }
                    clear.truncate(top);
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{assign::PropagateIF, cdb::ClauseIF},
    };

    fn lit(i: i32) -> Lit {
        Lit::from(i)
    }

    fn setup(nv: usize, config: &Config) -> (AssignStack, ClauseDB, Restarter, State) {
        let cnf = CNFDescription::from(nv);
        (
            AssignStack::instantiate(config, &cnf),
            ClauseDB::instantiate(config, &cnf),
            Restarter::instantiate(config, &cnf),
            State::instantiate(config, &cnf),
        )
    }

    #[test]
    fn test_first_uip() {
        for use_bin_shortcut in [true, false] {
            let config = Config {
                use_bin_shortcut,
                ..Config::default()
            };
            let (mut asg, mut cdb, mut rst, mut state) = setup(6, &config);
            // 1 -> 3, 2 & 3 -> 4, 4 -> 5, 4 -> 6, 2 & 5 & 6 -> conflict
            cdb.new_clause(&asg, &mut vec![lit(-1), lit(3)], false);
            cdb.new_clause(&asg, &mut vec![lit(-2), lit(-3), lit(4)], false);
            cdb.new_clause(&asg, &mut vec![lit(-4), lit(5)], false);
            cdb.new_clause(&asg, &mut vec![lit(-4), lit(6)], false);
            cdb.new_clause(&asg, &mut vec![lit(-5), lit(-6), lit(-2)], false);
            asg.assign_by_decision(lit(2));
            assert!(asg.propagate(&mut cdb).is_ok());
            asg.assign_by_decision(lit(1));
            let cc = asg.propagate(&mut cdb).expect_err("a conflict");
            assert!(handle_conflict(&mut asg, &mut cdb, &mut rst, &mut state, &cc).is_ok());
            // the UIP is 4; 2 stays as the level-1 literal
            assert_eq!(state.new_learnt, vec![lit(-4), lit(-2)]);
            assert_eq!(asg.decision_level(), 1);
            assert_eq!(asg.assigned(lit(-4)), Some(true));
            assert_eq!(asg.level(4), 1);
            assert!(asg.var_iter_is_clean());
            assert_eq!(cdb.derefer(crate::cdb::property::Tusize::NumLearnt), 1);
        }
    }

    #[test]
    fn test_unit_learnt_is_asserted() {
        let (mut asg, mut cdb, mut rst, mut state) = setup(3, &Config::default());
        cdb.new_clause(&asg, &mut vec![lit(-1), lit(2)], false);
        cdb.new_clause(&asg, &mut vec![lit(-1), lit(-2)], false);
        asg.assign_by_decision(lit(3));
        assert!(asg.propagate(&mut cdb).is_ok());
        asg.assign_by_decision(lit(1));
        let cc = asg.propagate(&mut cdb).expect_err("a conflict");
        assert!(handle_conflict(&mut asg, &mut cdb, &mut rst, &mut state, &cc).is_ok());
        assert_eq!(state.new_learnt, vec![lit(-1)]);
        assert_eq!(asg.decision_level(), 0);
        assert_eq!(asg.assigned(lit(-1)), Some(true));
        assert_eq!(asg.reason(1), AssignReason::Decision(0));
        // no clause is stored for an assertion
        assert_eq!(cdb.derefer(crate::cdb::property::Tusize::NumLearnt), 0);
    }

    #[test]
    fn test_minimization() {
        let (mut asg, mut cdb, mut rst, mut state) = setup(5, &Config::default());
        // 1 -> 2 at level 1; 3 at level 2 with 1 & 2 & 3 -> 4 and 2 & 3 -> -4
        cdb.new_clause(&asg, &mut vec![lit(-1), lit(2)], false);
        cdb.new_clause(&asg, &mut vec![lit(-1), lit(-2), lit(-3), lit(4)], false);
        cdb.new_clause(&asg, &mut vec![lit(-1), lit(-3), lit(-4), lit(-2)], false);
        asg.assign_by_decision(lit(1));
        assert!(asg.propagate(&mut cdb).is_ok());
        assert_eq!(asg.assigned(lit(2)), Some(true));
        asg.assign_by_decision(lit(3));
        let cc = asg.propagate(&mut cdb).expect_err("a conflict");
        assert!(handle_conflict(&mut asg, &mut cdb, &mut rst, &mut state, &cc).is_ok());
        // -2 is implied by -1, so it is dropped
        assert_eq!(state.new_learnt, vec![lit(-3), lit(-1)]);
        assert_eq!(asg.decision_level(), 1);
        assert!(asg.var_iter_is_clean());
        let learnt = cdb
            .iter()
            .find(|c| c.is(FlagClause::LEARNT) && !c.is_dead())
            .expect("a learnt");
        assert_eq!(learnt.len(), 2);
    }

    #[test]
    fn test_root_level_conflict() {
        let (mut asg, mut cdb, mut rst, mut state) = setup(2, &Config::default());
        cdb.new_clause(&asg, &mut vec![lit(1), lit(2)], false);
        cdb.new_clause(&asg, &mut vec![lit(1), lit(-2)], false);
        asg.assign_at_root_level(lit(-1)).expect("consistent");
        let cc = asg.propagate(&mut cdb).expect_err("a conflict");
        assert_eq!(
            handle_conflict(&mut asg, &mut cdb, &mut rst, &mut state, &cc),
            Err(SolverError::Inconsistent)
        );
    }

    impl AssignStack {
        fn var_iter_is_clean(&self) -> bool {
            (1..=self.num_vars).all(|vi| !self.var(vi).is(FlagVar::CA_SEEN))
        }
    }
}
