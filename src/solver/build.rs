//! Solver Builder
use {
    super::{restart::Restarter, Certificate, Solver, SolverEvent, SolverResult},
    crate::{
        assign::{AssignIF, AssignStack, PropagateIF},
        cdb::{ClauseDB, ClauseDBIF, ClauseIF},
        state::State,
        types::*,
    },
    std::{
        fs::File,
        io::{BufWriter, Write},
        path::Path,
    },
    tracing::{debug, info},
};

/// API for SAT solver creation and modification.
pub trait SatSolverIF: Instantiate {
    /// add a clause to Solver and return its handle.
    /// Duplicated literals are merged; a tautology is kept as it is.
    ///
    /// # Errors
    ///
    /// * `SolverError::InvalidLiteral` if a literal in it is out of range for var index.
    /// * `SolverError::OutOfMemory` if the clause store is full.
    /// * `SolverError::Inconsistent` if the clause set has no model now.
    ///   The clause is stored anyway.
    ///
    /// # Example
    ///```
    /// use bsat::*;
    ///
    /// let mut s = Solver::new(8);
    /// assert!(s.add_clause(&[1, -2]).is_ok());
    /// assert!(s.add_clause(&[2, -3]).is_ok());
    /// assert!(s.add_clause(&[3, 4]).is_ok());
    /// assert!(s.add_clause(&[-2, 4]).is_ok());
    /// assert!(s.add_clause(&[-4, 5]).is_ok());
    /// assert!(s.add_clause(&[-5, 6]).is_ok());
    /// assert!(s.add_clause(&[-7, 8]).is_ok());
    /// assert!(matches!(s.add_clause(&[10, 11]), Err(SolverError::InvalidLiteral)));
    /// assert!(matches!(s.add_clause(&[0, 8]), Err(SolverError::InvalidLiteral)));
    /// // -6 forces -5, -4, 3, and -2, which falsifies [2, -3].
    /// assert!(matches!(s.add_clause(&[-6]), Err(SolverError::Inconsistent)));
    /// assert_eq!(s.solve(), Ok(Certificate::UNSAT(vec![])));
    ///```
    fn add_clause<V>(&mut self, vec: V) -> Result<ClauseHandle, SolverError>
    where
        V: AsRef<[i32]>;
    /// add a var to solver and return the number of vars.
    ///
    /// # Example
    /// ```
    /// use bsat::*;
    ///
    /// let mut s = Solver::new(2);
    /// assert!(matches!(s.add_clause(&[3]), Err(SolverError::InvalidLiteral)));
    /// assert_eq!(s.add_var(), 3);
    /// assert!(s.add_clause(&[3]).is_ok());
    /// assert_eq!(s.solve(), Ok(Certificate::SAT(vec![-1, -2, 3])));
    /// ```
    fn add_var(&mut self) -> VarId;
    /// remove a permanent clause. All learnt clauses go with it, and
    /// the root level facts are recomputed before the next use.
    ///
    /// # Errors
    ///
    /// * `SolverError::InvalidHandle` if the clause was deleted already.
    ///
    /// # Example
    /// ```
    /// use bsat::*;
    ///
    /// let mut s = Solver::new(2);
    /// s.add_clause(&[1, 2]).expect("consistent");
    /// let h = s.add_clause(&[-1]).expect("consistent");
    /// let _ = s.add_clause(&[-2]);
    /// assert_eq!(s.solve(), Ok(Certificate::UNSAT(vec![])));
    /// assert!(s.delete_clause(h).is_ok());
    /// assert_eq!(s.solve(), Ok(Certificate::SAT(vec![1, -2])));
    /// assert_eq!(s.delete_clause(h), Err(SolverError::InvalidHandle));
    /// ```
    fn delete_clause(&mut self, handle: ClauseHandle) -> MaybeInconsistent;
    /// return the value of a var in the last model, or its value at the root level.
    /// A model is forgotten when a clause is added or deleted.
    fn variable_value(&self, vi: VarId) -> Option<bool>;
    /// return the values of `vars` in the last model; `None` for vars out of
    /// range or when there's no model.
    ///
    /// # Example
    /// ```
    /// use bsat::*;
    ///
    /// let mut s = Solver::new(3);
    /// s.add_clause(&[-1, 3]).expect("consistent");
    /// assert_eq!(s.model_of(&[3, 1]), vec![None, None]);
    /// assert!(matches!(s.solve_with(&[1], None), Ok(Certificate::SAT(_))));
    /// assert_eq!(s.model_of(&[3, 1, 4]), vec![Some(true), Some(true), None]);
    /// ```
    fn model_of(&self, vars: &[VarId]) -> Vec<Option<bool>>;
    /// return the literals of the first permanent clause falsified by `model`.
    fn validate(&self, model: &[i32]) -> Option<Vec<i32>>;
    /// write the permanent clauses, root level facts and the assumptions of
    /// the last solve as a CNF file. Assumptions are dropped from the dump once
    /// the clause set changes.
    ///
    /// # Errors
    ///
    /// * `SolverError::IOError` if it failed to write.
    fn dump_cnf(&mut self, path: &Path, increment: bool) -> MaybeInconsistent;
    /// write the same content as `dump_cnf` to `out`.
    /// With `increment`, vars are written 1-based and clauses end with `0`;
    /// otherwise vars are written 0-based without terminators.
    ///
    /// ```
    /// use bsat::*;
    ///
    /// let mut s = Solver::new(3);
    /// s.add_clause(&[1, -2]).expect("consistent");
    /// s.add_clause(&[3]).expect("consistent");
    /// s.solve_with(&[-1], None).expect("no error");
    /// let mut buf: Vec<u8> = Vec::new();
    /// s.write_dimacs(&mut buf, true).expect("no error");
    /// assert_eq!(String::from_utf8_lossy(&buf), "p cnf 3 3\n1 -2 0\n3 0\n-1 0\n\n");
    /// ```
    fn write_dimacs<W: Write>(&mut self, out: &mut W, increment: bool) -> MaybeInconsistent;
}

impl Instantiate for Solver {
    /// ```
    /// use bsat::{config::Config, types::*};
    /// use bsat::solver::Solver;
    /// let s = Solver::instantiate(&Config::default(), &CNFDescription::default());
    ///```
    fn instantiate(config: &Config, cnf: &CNFDescription) -> Solver {
        Solver {
            asg: AssignStack::instantiate(config, cnf),
            cdb: ClauseDB::instantiate(config, cnf),
            rst: Restarter::instantiate(config, cnf),
            state: State::instantiate(config, cnf),
        }
    }
}

impl<V> TryFrom<(Config, &[V])> for Solver
where
    V: AsRef<[i32]>,
{
    type Error = SolverResult;
    fn try_from((config, vec): (Config, &[V])) -> Result<Self, Self::Error> {
        let cnf = CNFDescription::from(vec);
        let mut s = Solver::instantiate(&config, &cnf);
        for clause in vec {
            match s.add_clause(clause) {
                Ok(_) => (),
                Err(SolverError::Inconsistent) => return Err(Ok(Certificate::UNSAT(Vec::new()))),
                Err(e) => return Err(Err(e)),
            }
        }
        Ok(s)
    }
}

impl TryFrom<&Path> for Solver {
    type Error = SolverError;
    /// return a new solver build for a CNF file.
    /// An inconsistent CNF makes a solver which answers UNSAT.
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let mut reader = CNFReader::try_from(path)?;
        let mut s = Solver::instantiate(&Config::default(), &reader.cnf);
        while let Some(clause) = reader.next_clause()? {
            match s.add_clause(&clause) {
                Ok(_) | Err(SolverError::Inconsistent) => (),
                Err(e) => return Err(e),
            }
        }
        Ok(s)
    }
}

impl SatSolverIF for Solver {
    fn add_clause<V>(&mut self, vec: V) -> Result<ClauseHandle, SolverError>
    where
        V: AsRef<[i32]>,
    {
        if self.state.need_rebuild {
            self.rebuild();
        }
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut state,
            ..
        } = self;
        let nv = asg.num_vars;
        if vec
            .as_ref()
            .iter()
            .any(|i| *i == 0 || nv < i.unsigned_abs() as usize)
        {
            return Err(SolverError::InvalidLiteral);
        }
        cdb.check_size()?;
        debug_assert_eq!(asg.decision_level(), 0);
        let mut lits = vec
            .as_ref()
            .iter()
            .map(|i| Lit::from(*i))
            .collect::<Vec<Lit>>();
        lits.sort_unstable();
        lits.dedup();
        // the last model and assumptions belong to the old clause set
        state.model.iter_mut().for_each(|v| *v = None);
        state.assumptions.clear();
        let cid = cdb.new_clause(asg, &mut lits, false);
        let handle = cdb[cid].handle.ok_or(SolverError::SolverBug)?;
        if state.inconsistent {
            return Err(SolverError::Inconsistent);
        }
        // `lits` are reordered: un-falsified literals come first.
        let consistent = match lits.len() {
            0 => false,
            1 => asg.assign_at_root_level(lits[0]).is_ok(),
            _ => match (asg.assigned(lits[0]), asg.assigned(lits[1])) {
                (Some(false), _) => false,
                (None, Some(false)) => asg.assign_at_root_level(lits[0]).is_ok(),
                _ => true,
            },
        };
        if !consistent || asg.propagate(cdb).is_err() {
            info!("the clause set became inconsistent by {}", cdb[cid]);
            state.inconsistent = true;
            return Err(SolverError::Inconsistent);
        }
        Ok(handle)
    }
    fn add_var(&mut self) -> VarId {
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut state,
            ..
        } = self;
        asg.handle(SolverEvent::NewVar);
        cdb.handle(SolverEvent::NewVar);
        state.handle(SolverEvent::NewVar);
        asg.num_vars
    }
    fn delete_clause(&mut self, handle: ClauseHandle) -> MaybeInconsistent {
        let cid = self.cdb.resolve(handle).ok_or(SolverError::InvalidHandle)?;
        debug!("delete {handle}: {}", self.cdb[cid]);
        self.cdb.remove_clause(cid);
        self.cdb.remove_learnts();
        self.state.need_rebuild = true;
        Ok(())
    }
    fn variable_value(&self, vi: VarId) -> Option<bool> {
        if vi == 0 || self.asg.num_vars < vi {
            return None;
        }
        if let Some(b) = self.state.model[vi] {
            return Some(b);
        }
        if self.state.need_rebuild {
            return None;
        }
        self.asg.assign(vi)
    }
    fn model_of(&self, vars: &[VarId]) -> Vec<Option<bool>> {
        // slot 0 is never set
        vars.iter()
            .map(|vi| self.state.model.get(*vi).copied().flatten())
            .collect()
    }
    fn validate(&self, model: &[i32]) -> Option<Vec<i32>> {
        let mut assign: Vec<Option<bool>> = vec![None; self.asg.num_vars + 1];
        for l in model.iter() {
            if let Some(slot) = assign.get_mut(l.unsigned_abs() as usize) {
                *slot = Some(0 < *l);
            }
        }
        self.cdb
            .originals()
            .find(|c| !c.is_satisfied_under(&assign))
            .map(Vec::<i32>::from)
    }
    fn dump_cnf(&mut self, path: &Path, increment: bool) -> MaybeInconsistent {
        let mut buf = BufWriter::new(File::create(path)?);
        self.write_dimacs(&mut buf, increment)?;
        buf.flush()?;
        Ok(())
    }
    fn write_dimacs<W: Write>(&mut self, out: &mut W, increment: bool) -> MaybeInconsistent {
        if self.state.need_rebuild {
            self.rebuild();
        }
        let Solver {
            ref asg,
            ref cdb,
            ref state,
            ..
        } = self;
        let mut clauses: Vec<Vec<Lit>> = Vec::new();
        for c in cdb.originals() {
            // units holding at the root level are written as facts below
            if c.len() == 1 && asg.assigned(c.lit0()) == Some(true) {
                continue;
            }
            clauses.push(c.iter().copied().collect());
        }
        for l in asg.stack_iter().take(asg.len_upto(0)) {
            clauses.push(vec![*l]);
        }
        for l in state.assumptions.iter() {
            clauses.push(vec![*l]);
        }
        writeln!(out, "p cnf {} {}", asg.num_vars, clauses.len())?;
        for c in clauses.iter() {
            for l in c.iter() {
                let sign = if bool::from(*l) { "" } else { "-" };
                let index = if increment { l.vi() } else { l.vi() - 1 };
                write!(out, "{sign}{index} ")?;
            }
            if increment {
                writeln!(out, "0")?;
            } else {
                writeln!(out)?;
            }
        }
        writeln!(out)?;
        Ok(())
    }
}

impl Solver {
    /// make a solver on `num_vars` vars with the default configuration.
    ///
    /// ```
    /// use bsat::*;
    /// let mut s = Solver::new(2);
    /// assert!(s.add_clause(&[1, 2]).is_ok());
    /// assert!(matches!(s.solve_with(&[-1], None), Ok(Certificate::SAT(v)) if v[1] == 2));
    /// ```
    pub fn new(num_vars: usize) -> Solver {
        Solver::instantiate(&Config::default(), &CNFDescription::from(num_vars))
    }
    /// forget all assignments and learnts, reclaim dead clauses, and
    /// derive the root level facts again from the live permanent clauses.
    pub(super) fn rebuild(&mut self) {
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut state,
            ..
        } = self;
        asg.handle(SolverEvent::Reinitialize);
        cdb.handle(SolverEvent::Reinitialize);
        state.handle(SolverEvent::Reinitialize);
        cdb.garbage_collect(asg);
        let units = cdb
            .originals()
            .filter(|c| c.len() == 1)
            .map(|c| c.lit0())
            .collect::<Vec<Lit>>();
        state.inconsistent = cdb.has_empty_clause()
            || units.iter().any(|l| asg.assign_at_root_level(*l).is_err())
            || asg.propagate(cdb).is_err();
        debug!(
            "rebuild: {} clauses, {} root level facts, inconsistent: {}",
            cdb.derefer(crate::cdb::property::Tusize::NumClause),
            asg.stack_len(),
            state.inconsistent
        );
    }
}
