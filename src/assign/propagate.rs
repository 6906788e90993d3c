/// implement boolean constraint propagation, backjump
use {
    super::{AssignIF, AssignStack, VarHeapIF},
    crate::{
        cdb::{ClauseDB, ClauseIF, Watch, WatchDBIF},
        types::*,
    },
    std::mem,
    tracing::trace,
};

/// API for Boolean Constraint Propagation like [`propagate`](`crate::assign::PropagateIF::propagate`), [`assign_by_decision`](`crate::assign::PropagateIF::assign_by_decision`), [`cancel_until`](`crate::assign::PropagateIF::cancel_until`), and so on.
pub trait PropagateIF {
    /// add an assignment at root level as a precondition.
    ///
    /// # Errors
    ///
    /// emit `SolverError::Inconsistent` exception if solver becomes inconsistent.
    fn assign_at_root_level(&mut self, l: Lit) -> MaybeInconsistent;
    /// unsafe enqueue (assign by implication); doesn't emit an exception.
    /// An implication at level zero is recorded as an assertion.
    ///
    /// ## Warning
    /// Callers must assure the consistency after this assignment.
    fn assign_by_implication(&mut self, l: Lit, reason: AssignReason);
    /// unsafe assume (assign by decision); doesn't emit an exception.
    /// ## Caveat
    /// Callers have to assure the consistency after this assignment.
    fn assign_by_decision(&mut self, l: Lit);
    /// execute *backjump*.
    fn cancel_until(&mut self, lv: DecisionLevel);
    /// execute *boolean constraint propagation* or *unit propagation*.
    /// Return the falsified literal and its clause on conflict.
    fn propagate(&mut self, cdb: &mut ClauseDB) -> PropagationResult;
}

impl PropagateIF for AssignStack {
    fn assign_at_root_level(&mut self, l: Lit) -> MaybeInconsistent {
        let vi = l.vi();
        debug_assert!(vi < self.var.len());
        debug_assert!(self.trail_lim.is_empty());
        match var_assign!(self, vi) {
            None => {
                set_assign!(self, l);
                self.level[vi] = 0;
                self.reason[vi] = AssignReason::Decision(0);
                debug_assert!(!self.trail.contains(&!l));
                self.trail.push(l);
                self.num_asserted_vars += 1;
                Ok(())
            }
            Some(x) if x == bool::from(l) => Ok(()),
            _ => Err(SolverError::Inconsistent),
        }
    }
    fn assign_by_implication(&mut self, l: Lit, reason: AssignReason) {
        debug_assert!(usize::from(l) != 0, "Null literal is about to be enqueued");
        debug_assert!(l.vi() < self.var.len());
        let vi = l.vi();
        debug_assert!(var_assign!(self, vi).is_none());
        let lv = self.decision_level();
        set_assign!(self, l);
        self.level[vi] = lv;
        if lv == 0 {
            self.reason[vi] = AssignReason::Decision(0);
            self.num_asserted_vars += 1;
        } else {
            self.reason[vi] = reason;
        }
        debug_assert!(!self.trail.contains(&!l));
        self.trail.push(l);
    }
    fn assign_by_decision(&mut self, l: Lit) {
        debug_assert!(var_assign!(self, l.vi()).is_none());
        debug_assert!(l.vi() < self.var.len());
        debug_assert!(
            !self.trail.contains(&!l),
            "asg.trail contains a strange literal",
        );
        self.level_up();
        let dl = self.trail_lim.len() as DecisionLevel;
        let vi = l.vi();
        self.level[vi] = dl;
        set_assign!(self, l);
        self.reason[vi] = AssignReason::Decision(dl);
        self.trail.push(l);
        self.num_decision += 1;
        debug_assert!(self.remains());
    }
    fn cancel_until(&mut self, lv: DecisionLevel) {
        if self.trail_lim.len() as u32 <= lv {
            return;
        }
        trace!("backtrack from {} to {}", self.trail_lim.len(), lv);
        let lim = self.trail_lim[lv as usize];
        for i in (lim..self.trail.len()).rev() {
            let vi = self.trail[i].vi();
            debug_assert!(
                var_assign!(self, vi).is_some(),
                "cancel_until found unassigned var in trail {vi}",
            );
            if self.use_phase_saving {
                let phase = var_assign!(self, vi) == Some(true);
                self.var[vi].set(FlagVar::PHASE, phase);
            }
            unset_assign!(self, vi);
            self.reason[vi] = AssignReason::None;
            self.insert_heap(vi);
        }
        self.trail.truncate(lim);
        self.trail_lim.truncate(lv as usize);
        self.q_head = self.q_head.min(lim);
    }
    /// UNIT PROPAGATION.
    /// Note:
    ///  - Dead clauses may stay in watcher lists until the next garbage collection;
    ///    their watches are dropped here.
    ///  - The implied literal of a long clause is moved to `lits[0]`.
    fn propagate(&mut self, cdb: &mut ClauseDB) -> PropagationResult {
        while let Some(&p) = self.trail.get(self.q_head) {
            self.num_propagation += 1;
            self.q_head += 1;
            let false_lit = !p;
            //
            //## binary loop
            //
            for i in 0..cdb.bin_watcher[p].len() {
                let Watch { blocker, c } = cdb.bin_watcher[p][i];
                if cdb[c].is_dead() {
                    continue;
                }
                debug_assert_ne!(blocker, false_lit);
                match lit_assign!(self, blocker) {
                    Some(true) => (),
                    Some(false) => {
                        self.num_conflict += 1;
                        return Err((blocker, AssignReason::BinaryLink(false_lit)));
                    }
                    None => {
                        self.assign_by_implication(blocker, AssignReason::BinaryLink(false_lit))
                    }
                }
            }
            //
            //## normal clause loop
            //
            let mut ws = mem::take(&mut cdb.watcher[p]);
            let mut conflict: Option<ConflictContext> = None;
            let mut n = 0;
            let mut i = 0;
            'next_clause: while i < ws.len() {
                let w = ws[i];
                i += 1;
                if lit_assign!(self, w.blocker) == Some(true) {
                    ws[n] = w;
                    n += 1;
                    continue;
                }
                let c = &mut cdb.clause[usize::from(w.c)];
                if c.is_dead() {
                    continue;
                }
                if c.lits[0] == false_lit {
                    c.lits.swap(0, 1);
                }
                debug_assert_eq!(c.lits[1], false_lit);
                let first = c.lits[0];
                let first_value = lit_assign!(self, first);
                if first != w.blocker && first_value == Some(true) {
                    ws[n] = Watch {
                        blocker: first,
                        c: w.c,
                    };
                    n += 1;
                    continue;
                }
                //
                //## Search an un-falsified literal
                //
                for k in 2..c.lits.len() {
                    if lit_assign!(self, c.lits[k]) != Some(false) {
                        c.lits.swap(1, k);
                        let new_watch = c.lits[1];
                        cdb.watcher[!new_watch].register(first, w.c);
                        continue 'next_clause;
                    }
                }
                ws[n] = Watch {
                    blocker: first,
                    c: w.c,
                };
                n += 1;
                if first_value == Some(false) {
                    while i < ws.len() {
                        ws[n] = ws[i];
                        n += 1;
                        i += 1;
                    }
                    conflict = Some((first, AssignReason::Implication(w.c)));
                } else {
                    self.assign_by_implication(first, AssignReason::Implication(w.c));
                }
            }
            ws.truncate(n);
            debug_assert!(cdb.watcher[p].is_empty());
            cdb.watcher[p] = ws;
            if let Some(cc) = conflict {
                self.num_conflict += 1;
                return Err(cc);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::cdb::ClauseDBIF};

    fn lit(i: i32) -> Lit {
        Lit::from(i)
    }

    fn setup(nv: usize, config: &Config) -> (AssignStack, ClauseDB) {
        let cnf = CNFDescription::from(nv);
        (
            AssignStack::instantiate(config, &cnf),
            ClauseDB::instantiate(config, &cnf),
        )
    }

    #[test]
    fn test_propagation_through_long_and_binary_clauses() {
        let (mut asg, mut cdb) = setup(5, &Config::default());
        let long = cdb.new_clause(&asg, &mut vec![lit(1), lit(2), lit(3)], false);
        cdb.new_clause(&asg, &mut vec![lit(-3), lit(4)], false);
        asg.assign_by_decision(lit(-1));
        assert!(asg.propagate(&mut cdb).is_ok());
        assert_eq!(asg.assigned(lit(3)), None);
        asg.assign_by_decision(lit(-2));
        assert!(asg.propagate(&mut cdb).is_ok());
        assert_eq!(asg.assigned(lit(3)), Some(true));
        assert_eq!(asg.reason(3), AssignReason::Implication(long));
        // the implied literal sits at the first position
        assert_eq!(cdb[long].lit0(), lit(3));
        assert_eq!(asg.assigned(lit(4)), Some(true));
        assert_eq!(asg.reason(4), AssignReason::BinaryLink(lit(-3)));
        assert_eq!(asg.level(4), 2);
        assert!(cdb.locked(&asg, long));
        asg.cancel_until(0);
        assert!(!cdb.locked(&asg, long));
        assert_eq!(asg.q_head, 0);
    }

    #[test]
    fn test_conflict_detection() {
        for use_bin_shortcut in [true, false] {
            let config = Config {
                use_bin_shortcut,
                ..Config::default()
            };
            let (mut asg, mut cdb) = setup(3, &config);
            cdb.new_clause(&asg, &mut vec![lit(1), lit(2)], false);
            let c2 = cdb.new_clause(&asg, &mut vec![lit(1), lit(-2)], false);
            asg.assign_by_decision(lit(-1));
            match asg.propagate(&mut cdb) {
                Err((l, AssignReason::BinaryLink(other))) => {
                    assert!(use_bin_shortcut);
                    assert_eq!(l.vi(), 2);
                    assert_eq!(other, lit(1));
                }
                Err((l, AssignReason::Implication(cid))) => {
                    assert!(!use_bin_shortcut);
                    assert_eq!(cid, c2);
                    assert_eq!(l.vi(), 2);
                }
                _ => panic!("missed a conflict"),
            }
            assert_eq!(asg.num_conflict, 1);
            // the watcher lists survive a conflict
            asg.cancel_until(0);
            asg.assign_by_decision(lit(-1));
            assert!(asg.propagate(&mut cdb).is_err());
        }
    }

    #[test]
    fn test_root_level_implication_is_an_assertion() {
        let (mut asg, mut cdb) = setup(3, &Config::default());
        let cid = cdb.new_clause(&asg, &mut vec![lit(1), lit(2), lit(3)], false);
        asg.assign_at_root_level(lit(-1)).expect("consistent");
        asg.assign_at_root_level(lit(-2)).expect("consistent");
        assert!(asg.propagate(&mut cdb).is_ok());
        assert_eq!(asg.assigned(lit(3)), Some(true));
        assert_eq!(asg.reason(3), AssignReason::Decision(0));
        assert!(!cdb.locked(&asg, cid));
        assert_eq!(asg.num_asserted_vars, 3);
    }

    #[test]
    fn test_phase_saving() {
        let (mut asg, mut cdb) = setup(2, &Config::default());
        asg.assign_by_decision(lit(2));
        assert!(asg.propagate(&mut cdb).is_ok());
        asg.cancel_until(0);
        assert!(asg.var(2).is(FlagVar::PHASE));
        assert!(!asg.var(1).is(FlagVar::PHASE));

        let config = Config {
            use_phase_saving: false,
            ..Config::default()
        };
        let (mut asg, _) = setup(2, &config);
        asg.assign_by_decision(lit(2));
        asg.cancel_until(0);
        assert!(!asg.var(2).is(FlagVar::PHASE));
    }
}
