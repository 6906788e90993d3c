use {
    super::{Clause, ClauseDB, ClauseDBIF, ClauseHandle, ClauseIF, ClauseId, WatchDBIF},
    crate::{assign::AssignIF, types::*},
    std::{
        ops::{Index, IndexMut},
        slice::Iter,
    },
    tracing::debug,
};

/// activities are scaled down when one of them exceeds this.
const ACTIVITY_MAX: f64 = 1e20;

impl Default for ClauseDB {
    fn default() -> ClauseDB {
        ClauseDB {
            clause: vec![Clause::default()],
            bin_watcher: vec![Vec::new(); 2],
            watcher: vec![Vec::new(); 2],
            handle_table: Vec::new(),
            soft_limit: 0,
            use_bin_shortcut: true,
            activity_inc: 1.0,
            activity_decay: 0.999,
            without_reduce: false,
            inc_step: 300,
            next_reduction: 2000,
            reduction_span: 2000,
            reduction_ratio: 0.5,
            num_clause: 0,
            num_bi_clause: 0,
            num_learnt: 0,
            num_learnt_total: 0,
            num_reduction: 0,
            num_gc: 0,
            num_dead: 0,
        }
    }
}

impl Index<ClauseId> for ClauseDB {
    type Output = Clause;
    #[inline]
    fn index(&self, cid: ClauseId) -> &Clause {
        &self.clause[usize::from(cid)]
    }
}

impl IndexMut<ClauseId> for ClauseDB {
    #[inline]
    fn index_mut(&mut self, cid: ClauseId) -> &mut Clause {
        &mut self.clause[usize::from(cid)]
    }
}

impl Instantiate for ClauseDB {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> ClauseDB {
        let nv = cnf.num_of_variables;
        let nc = cnf.num_of_clauses;
        let mut clause = Vec::with_capacity(1 + nc);
        clause.push(Clause::default());
        ClauseDB {
            clause,
            bin_watcher: vec![Vec::new(); 2 * (nv + 1)],
            watcher: vec![Vec::new(); 2 * (nv + 1)],
            handle_table: Vec::with_capacity(nc),
            soft_limit: config.clause_limit,
            use_bin_shortcut: config.use_bin_shortcut,
            activity_decay: config.cla_decay,
            without_reduce: config.without_reduce,
            inc_step: config.cdb_reduce_inc,
            next_reduction: config.cdb_reduce_first as u64,
            reduction_span: config.cdb_reduce_first as u64,
            reduction_ratio: config.cdb_reduce_ratio.clamp(0.0, 1.0),
            ..ClauseDB::default()
        }
    }
    fn handle(&mut self, e: SolverEvent) {
        match e {
            SolverEvent::NewVar => {
                // for negated literal
                self.bin_watcher.push(Vec::new());
                self.watcher.push(Vec::new());
                // for positive literal
                self.bin_watcher.push(Vec::new());
                self.watcher.push(Vec::new());
            }
            SolverEvent::Reinitialize => {
                self.remove_learnts();
            }
            _ => (),
        }
    }
}

impl ClauseDBIF for ClauseDB {
    fn len(&self) -> usize {
        self.clause.len()
    }
    fn is_empty(&self) -> bool {
        self.clause.len() <= 1
    }
    fn iter(&self) -> Iter<'_, Clause> {
        self.clause.iter()
    }
    fn new_clause<A>(&mut self, asg: &A, vec: &mut Vec<Lit>, learnt: bool) -> ClauseId
    where
        A: AssignIF,
    {
        if !learnt {
            // pick watches: satisfied literals first, then unassigned ones.
            let rank = |l: Lit| match asg.assigned(l) {
                Some(true) => 0,
                None => 1,
                Some(false) => 2,
            };
            for i in 0..vec.len().min(2) {
                if let Some(best) = (i..vec.len()).min_by_key(|k| rank(vec[*k])) {
                    vec.swap(i, best);
                }
            }
        }
        let cid = ClauseId::from(self.clause.len());
        let handle = (!learnt).then(|| {
            let h = ClauseHandle {
                serial: self.handle_table.len() as u32,
            };
            self.handle_table.push(cid);
            h
        });
        let mut c = Clause::new(vec.clone(), learnt, handle);
        if learnt {
            c.activity = self.activity_inc;
            self.num_learnt += 1;
            self.num_learnt_total += 1;
        }
        if 2 <= c.len() {
            let l0 = c.lit0();
            let l1 = c.lit1();
            if c.len() == 2 {
                self.num_bi_clause += 1;
            }
            if c.len() == 2 && self.use_bin_shortcut {
                self.bin_watcher[!l0].register(l1, cid);
                self.bin_watcher[!l1].register(l0, cid);
            } else {
                self.watcher[!l0].register(l1, cid);
                self.watcher[!l1].register(l0, cid);
            }
        }
        self.clause.push(c);
        self.num_clause += 1;
        cid
    }
    fn remove_clause(&mut self, cid: ClauseId) {
        let c = &mut self.clause[usize::from(cid)];
        debug_assert!(!cid.is_none());
        if c.is_dead() {
            return;
        }
        c.turn_on(FlagClause::DEAD);
        self.num_clause -= 1;
        if c.len() == 2 {
            self.num_bi_clause -= 1;
        }
        if c.is(FlagClause::LEARNT) {
            self.num_learnt -= 1;
        }
        if let Some(h) = c.handle {
            self.handle_table[h.serial as usize] = ClauseId::default();
        }
        self.num_dead += 1;
    }
    fn remove_learnts(&mut self) {
        let targets = self
            .clause
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, c)| c.is(FlagClause::LEARNT) && !c.is_dead())
            .map(|(i, _)| ClauseId::from(i))
            .collect::<Vec<_>>();
        for cid in targets {
            self.remove_clause(cid);
        }
    }
    fn resolve(&self, handle: ClauseHandle) -> Option<ClauseId> {
        self.handle_table
            .get(handle.serial as usize)
            .copied()
            .filter(|cid| !cid.is_none())
    }
    fn locked<A>(&self, asg: &A, cid: ClauseId) -> bool
    where
        A: AssignIF,
    {
        let c = &self[cid];
        if c.is_empty() {
            return false;
        }
        let l0 = c.lit0();
        asg.assigned(l0) == Some(true) && asg.reason(l0.vi()) == AssignReason::Implication(cid)
    }
    fn bump_activity(&mut self, cid: ClauseId) {
        let c = &mut self.clause[usize::from(cid)];
        if !c.is(FlagClause::LEARNT) {
            return;
        }
        c.turn_on(FlagClause::USED);
        c.activity += self.activity_inc;
        if ACTIVITY_MAX < c.activity {
            for c in self.clause.iter_mut().skip(1) {
                if c.is(FlagClause::LEARNT) {
                    c.activity *= 1.0 / ACTIVITY_MAX;
                }
            }
            self.activity_inc *= 1.0 / ACTIVITY_MAX;
        }
    }
    fn decay_activity(&mut self) {
        self.activity_inc /= self.activity_decay;
    }
    fn reduce<A>(&mut self, asg: &mut A, nc: u64) -> bool
    where
        A: AssignIF,
    {
        if self.without_reduce || nc < self.next_reduction {
            return false;
        }
        self.reduction_span += self.inc_step as u64;
        self.next_reduction = nc + self.reduction_span;
        let mut perm: Vec<ClauseId> = Vec::with_capacity(self.num_learnt as usize);
        for (i, c) in self.clause.iter_mut().enumerate().skip(1) {
            if !c.is(FlagClause::LEARNT) || c.is_dead() {
                continue;
            }
            if c.is(FlagClause::USED) {
                c.turn_off(FlagClause::USED);
                continue;
            }
            if 2 < c.len() {
                perm.push(ClauseId::from(i));
            }
        }
        perm.retain(|cid| !self.locked(&*asg, *cid));
        perm.sort_by(|a, b| self[*a].activity.total_cmp(&self[*b].activity).then(a.cmp(b)));
        let target = (perm.len() as f64 * self.reduction_ratio) as usize;
        for cid in perm.iter().take(target) {
            self.remove_clause(*cid);
        }
        self.num_reduction += 1;
        debug!(
            "reduction #{}: {} learnts removed, {} remain, next at {}",
            self.num_reduction, target, self.num_learnt, self.next_reduction
        );
        self.garbage_collect(asg);
        true
    }
    fn garbage_collect<A>(&mut self, asg: &mut A)
    where
        A: AssignIF,
    {
        if self.num_dead == 0 {
            return;
        }
        let ClauseDB {
            ref mut clause,
            ref mut bin_watcher,
            ref mut watcher,
            ref mut handle_table,
            ..
        } = self;
        // build the relocation table: old id -> new id, the null id for reclaimed slots.
        let mut table: Vec<ClauseId> = vec![ClauseId::default(); clause.len()];
        let mut next = 1;
        for (i, c) in clause.iter().enumerate().skip(1) {
            if !c.is_dead() {
                table[i] = ClauseId::from(next);
                next += 1;
            }
        }
        clause.retain(|c| !c.is_dead());
        debug_assert_eq!(clause.len(), next);
        for ws in watcher.iter_mut().chain(bin_watcher.iter_mut()) {
            ws.relocate(&table);
        }
        for cid in handle_table.iter_mut().filter(|cid| !cid.is_none()) {
            *cid = table[usize::from(*cid)];
        }
        asg.relocate_reasons(&table);
        debug!(
            "garbage collection: {} slots reclaimed, {} clauses remain",
            self.num_dead,
            self.clause.len() - 1
        );
        self.num_dead = 0;
        self.num_gc += 1;
        #[cfg(feature = "boundary_check")]
        for (i, c) in self.clause.iter().enumerate().skip(1) {
            if 2 <= c.len() {
                let _ = self.watches(ClauseId::from(i), "garbage_collect");
            }
        }
    }
    fn check_size(&self) -> MaybeInconsistent {
        if self.soft_limit == 0 || self.num_clause < self.soft_limit as u64 {
            Ok(())
        } else {
            Err(SolverError::OutOfMemory)
        }
    }
    fn validate(&self, model: &[Option<bool>]) -> Option<ClauseId> {
        for (i, c) in self.clause.iter().enumerate().skip(1) {
            if c.is_dead() || c.is(FlagClause::LEARNT) {
                continue;
            }
            if !c.is_satisfied_under(model) {
                return Some(ClauseId::from(i));
            }
        }
        None
    }
    fn watches(&self, cid: ClauseId, message: &str) -> (Lit, Lit) {
        let c = &self[cid];
        assert!(2 <= c.len(), "{message}: {cid} has no watches");
        let l0 = c.lit0();
        let l1 = c.lit1();
        let list = if c.len() == 2 && self.use_bin_shortcut {
            &self.bin_watcher
        } else {
            &self.watcher
        };
        debug_assert!(
            list[!l0].iter().any(|w| w.c == cid),
            "{message}: {cid}{c} isn't watched by {l0}"
        );
        debug_assert!(
            list[!l1].iter().any(|w| w.c == cid),
            "{message}: {cid}{c} isn't watched by {l1}"
        );
        (l0, l1)
    }
}

impl ClauseDB {
    /// return `true` if the clause set holds a live empty clause.
    pub fn has_empty_clause(&self) -> bool {
        self.clause
            .iter()
            .skip(1)
            .any(|c| c.is_empty() && !c.is_dead())
    }
    /// return an iterator over live permanent clauses.
    pub fn originals(&self) -> impl Iterator<Item = &Clause> {
        self.clause
            .iter()
            .skip(1)
            .filter(|c| !c.is_dead() && !c.is(FlagClause::LEARNT))
    }
}
