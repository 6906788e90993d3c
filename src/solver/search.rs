//! Conflict-Driven Clause Learning Search engine
use {
    super::{
        conflict::handle_conflict,
        restart::{RestartIF, Restarter},
        Budget, Certificate, Solver, SolverEvent, SolverResult,
    },
    crate::{
        assign::{self, AssignIF, AssignStack, PropagateIF, VarSelectIF},
        cdb::{ClauseDB, ClauseDBIF},
        state::State,
        types::*,
    },
    tracing::{debug, info},
};

/// API to [`solve`](`crate::solver::SolveIF::solve`) SAT problems.
pub trait SolveIF {
    /// search an assignment.
    ///
    /// # Errors
    ///
    /// if solver becomes inconsistent by an internal error.
    fn solve(&mut self) -> SolverResult;
    /// search an assignment which makes all `assumptions` true, giving up
    /// when `budget` runs out.
    /// Learnt clauses, var activities and phases survive across calls;
    /// assumptions don't.
    ///
    /// # Errors
    ///
    /// * `SolverError::InvalidLiteral` if an assumption is out of the var range.
    /// * `SolverError::OutOfMemory` if the clause store hit its limit.
    ///
    /// # Example
    ///
    /// ```
    /// use bsat::*;
    ///
    /// let mut s = Solver::new(2);
    /// s.add_clause(&[1, 2]).expect("consistent");
    /// assert_eq!(s.solve_with(&[-1, -2], None), Ok(Certificate::UNSAT(vec![-2, -1])));
    /// assert!(matches!(s.solve_with(&[-1], None), Ok(Certificate::SAT(v)) if v == vec![-1, 2]));
    /// assert_eq!(s.solve_with(&[3], None), Err(SolverError::InvalidLiteral));
    /// ```
    fn solve_with(&mut self, assumptions: &[i32], budget: Option<Budget>) -> SolverResult;
}

impl SolveIF for Solver {
    fn solve(&mut self) -> SolverResult {
        self.solve_with(&[], None)
    }
    fn solve_with(&mut self, assumptions: &[i32], budget: Option<Budget>) -> SolverResult {
        if self.state.need_rebuild {
            self.rebuild();
        }
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut rst,
            ref mut state,
        } = self;
        let nv = asg.num_vars;
        if assumptions
            .iter()
            .any(|l| *l == 0 || nv < l.unsigned_abs() as usize)
        {
            return Err(SolverError::InvalidLiteral);
        }
        debug_assert_eq!(asg.decision_level(), 0);
        state.num_solve = state.num_solve.saturating_add(1);
        state.assumptions = assumptions.iter().map(|l| Lit::from(*l)).collect();
        state.conflicts.clear();
        state.model.iter_mut().for_each(|v| *v = None);
        if state.inconsistent {
            return Ok(Certificate::UNSAT(Vec::new()));
        }
        state.start_budget(
            budget,
            asg.derefer(assign::property::Tusize::NumConflict),
            asg.derefer(assign::property::Tusize::NumPropagation),
        );
        asg.root_level = state.assumptions.len() as DecisionLevel;
        info!(
            "solve #{}: {} vars, {} clauses, {} assumptions",
            state.num_solve,
            nv,
            cdb.derefer(crate::cdb::property::Tusize::NumClause),
            state.assumptions.len(),
        );

        //
        //## Search
        //
        let answer = search(asg, cdb, rst, state);
        asg.cancel_until(0);
        asg.root_level = 0;
        match answer {
            Ok(Certificate::SAT(_)) => info!("solve #{}: SAT", state.num_solve),
            Ok(Certificate::UNSAT(ref failed)) => info!(
                "solve #{}: UNSAT with {} failed assumptions",
                state.num_solve,
                failed.len()
            ),
            Ok(Certificate::Indeterminate) => {
                state.num_indeterminate += 1;
                info!("solve #{}: gave up by the budget", state.num_solve);
            }
            Err(ref e) => info!("solve #{}: aborted by {e}", state.num_solve),
        }
        answer
    }
}

/// main loop; returns a certificate before rewinding the trail.
fn search(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    rst: &mut Restarter,
    state: &mut State,
) -> SolverResult {
    loop {
        match asg.propagate(cdb) {
            Err(cc) => {
                match handle_conflict(asg, cdb, rst, state, &cc) {
                    Ok(()) => (),
                    Err(SolverError::Inconsistent) => {
                        state.inconsistent = true;
                        return Ok(Certificate::UNSAT(Vec::new()));
                    }
                    Err(e) => return Err(e),
                }
                if rst.restart() {
                    debug!("restart at conflict #{} ({rst})", asg.num_conflict);
                    asg.cancel_until(asg.root_level());
                    asg.handle(SolverEvent::Restart);
                    rst.handle(SolverEvent::Restart);
                }
                let nc = asg.num_conflict;
                cdb.reduce(asg, nc);
                if state.is_out_of_budget(asg.num_conflict, asg.num_propagation) {
                    return Ok(Certificate::Indeterminate);
                }
            }
            Ok(()) => {
                if state.is_out_of_budget(asg.num_conflict, asg.num_propagation) {
                    return Ok(Certificate::Indeterminate);
                }
                // re-establish assumptions first
                let mut next: Option<Lit> = None;
                while (asg.decision_level() as usize) < state.assumptions.len() {
                    let a = state.assumptions[asg.decision_level() as usize];
                    match asg.assigned(a) {
                        Some(true) => asg.level_up(),
                        Some(false) => {
                            analyze_final(asg, cdb, state, a);
                            return Ok(Certificate::UNSAT(i32s(&state.conflicts)));
                        }
                        None => {
                            next = Some(a);
                            break;
                        }
                    }
                }
                match next.or_else(|| asg.select_decision_literal()) {
                    Some(l) => asg.assign_by_decision(l),
                    None => return build_model(asg, cdb, state),
                }
            }
        }
    }
}

/// save the current full assignment as the model after checking it.
fn build_model(asg: &AssignStack, cdb: &ClauseDB, state: &mut State) -> SolverResult {
    if let Some(cid) = cdb.validate(asg.assign_ref()) {
        debug!("the assignment falsifies {cid}");
        return Err(SolverError::SolverBug);
    }
    let mut vals = Vec::with_capacity(asg.num_vars);
    for vi in 1..=asg.num_vars {
        let b = asg.assign(vi);
        debug_assert!(b.is_some());
        state.model[vi] = b;
        vals.push(i32::from(Lit::from_assign(vi, b == Some(true))));
    }
    Ok(Certificate::SAT(vals))
}

/// collect the assumptions responsible for the falsified assumption `p` into
/// `state.conflicts`: `p` itself, then the assumption decisions it depends on.
fn analyze_final(asg: &AssignStack, cdb: &ClauseDB, state: &mut State, p: Lit) {
    let failed = &mut state.conflicts;
    failed.clear();
    failed.push(p);
    if asg.level(p.vi()) == 0 {
        return;
    }
    let mut seen = vec![false; asg.num_vars + 1];
    seen[p.vi()] = true;
    for l in asg.stack_iter().skip(asg.len_upto(0)).rev() {
        let vi = l.vi();
        if !seen[vi] {
            continue;
        }
        match asg.reason(vi) {
            AssignReason::Decision(_) => failed.push(*l),
            AssignReason::BinaryLink(q) => {
                if 0 < asg.level(q.vi()) {
                    seen[q.vi()] = true;
                }
            }
            AssignReason::Implication(cid) => {
                for q in &cdb[cid][1..] {
                    if 0 < asg.level(q.vi()) {
                        seen[q.vi()] = true;
                    }
                }
            }
            AssignReason::None => (),
        }
    }
}
