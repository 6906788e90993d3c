/// Module `solver` provides the top-level API as a SAT solver.
/// API to instantiate and modify
mod build;
/// Module 'conflict' handles conflicts.
mod conflict;
/// Module `restart` provides restart heuristics.
pub mod restart;
/// CDCL search engine
mod search;

pub use self::{
    build::SatSolverIF,
    restart::{RestartIF, Restarter},
    search::SolveIF,
};

use {
    crate::{
        assign::{self, AssignStack},
        cdb::{self, ClauseDB},
        state::State,
        types::*,
    },
    std::fmt,
};

/// Normal results returned by Solver.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Certificate {
    /// It is satisfiable; `vec` is such an assignment sorted by var order.
    SAT(Vec<i32>),
    /// It is unsatisfiable under the assumptions; `vec` holds the assumptions
    /// responsible, as given. An empty `vec` means unsatisfiable without any.
    UNSAT(Vec<i32>),
    /// The budget ran out before an answer was found.
    Indeterminate,
}

/// The return type of `Solver::solve`.
/// This captures the following four cases:
/// * `Certificate::SAT` -- solved with a satisfiable assignment set,
/// * `Certificate::UNSAT` -- proved that it's an unsatisfiable problem (under assumptions),
/// * `Certificate::Indeterminate` -- gave up by the budget, and
/// * `SolverError::*` -- caused by a bug or resource exhaustion
pub type SolverResult = Result<Certificate, SolverError>;

/// define sub-modules' responsibilities
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolverEvent {
    /// conflict by unit propagation.
    Conflict,
    /// increment the number of vars.
    NewVar,
    /// forget every assignment, including the root level ones, and all learnts.
    Reinitialize,
    /// restart
    Restart,
}

/// Resource limits of a solve call. Each limit is relative to the start of the call.
///
/// ```
/// use bsat::*;
/// let mut s = Solver::new(2);
/// s.add_clause(&[1, 2]).expect("consistent");
/// let budget = Budget {
///     conflicts: Some(1000),
///     ..Budget::default()
/// };
/// assert!(matches!(s.solve_with(&[], Some(budget)), Ok(Certificate::SAT(_))));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Budget {
    /// the number of conflicts
    pub conflicts: Option<u64>,
    /// the number of propagated literals
    pub propagations: Option<u64>,
    /// wall-clock time in seconds
    pub timeout: Option<f64>,
}

/// Counters over the lifetime of a solver. They never wrap.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// the number of solve calls
    pub num_solve: u64,
    pub num_restart: u64,
    pub num_conflict: u64,
    pub num_decision: u64,
    pub num_propagation: u64,
    /// the number of learnt clauses ever generated
    pub num_learnt: u64,
    pub num_reduction: u64,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "c {:<14}{:>14}", "starts", self.num_solve)?;
        writeln!(f, "c {:<14}{:>14}", "restarts", self.num_restart)?;
        writeln!(f, "c {:<14}{:>14}", "conflicts", self.num_conflict)?;
        writeln!(f, "c {:<14}{:>14}", "decisions", self.num_decision)?;
        writeln!(f, "c {:<14}{:>14}", "propagations", self.num_propagation)?;
        writeln!(f, "c {:<14}{:>14}", "learnts", self.num_learnt)?;
        write!(f, "c {:<14}{:>14}", "reductions", self.num_reduction)
    }
}

/// The SAT solver object consisting of 4 sub modules.
/// ```
/// use bsat::*;
///
/// let mut s = Solver::new(3);
/// s.add_clause(&[1, 2]).expect("consistent");
/// s.add_clause(&[-1, 2]).expect("consistent");
/// s.add_clause(&[-2, 3]).expect("consistent");
/// assert_eq!(s.solve_with(&[-3], None), Ok(Certificate::UNSAT(vec![-3])));
/// if let Ok(Certificate::SAT(v)) = s.solve() {
///     assert_eq!(v.len(), 3);
///     assert_eq!(&v[1..], &[2, 3]);
/// } else {
///     panic!("It should be satisfied!");
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Solver {
    /// assignment management
    pub asg: AssignStack,
    /// clause container
    pub cdb: ClauseDB,
    /// restart management
    pub rst: Restarter,
    /// misc data holder
    pub state: State,
}

impl Solver {
    /// return the counters.
    ///
    /// ```
    /// use bsat::*;
    /// let mut s = Solver::new(1);
    /// assert_eq!(s.solve(), Ok(Certificate::SAT(vec![-1])));
    /// assert_eq!(s.stats().num_solve, 1);
    /// ```
    pub fn stats(&self) -> Stats {
        Stats {
            num_solve: self.state.num_solve,
            num_restart: self.asg.derefer(assign::property::Tusize::NumRestart),
            num_conflict: self.asg.derefer(assign::property::Tusize::NumConflict),
            num_decision: self.asg.derefer(assign::property::Tusize::NumDecision),
            num_propagation: self.asg.derefer(assign::property::Tusize::NumPropagation),
            num_learnt: self.cdb.derefer(cdb::property::Tusize::NumLearntTotal),
            num_reduction: self.cdb.derefer(cdb::property::Tusize::NumReduction),
        }
    }
}

/// Example
///```
/// use bsat::*;
///
/// let v: Vec<Vec<i32>> = vec![];
/// assert!(matches!(
///     Certificate::try_from(v),
///     Ok(Certificate::SAT(_))
/// ));
/// assert!(matches!(
///     Certificate::try_from(vec![vec![0_i32]]),
///     Err(SolverError::InvalidLiteral)
/// ));
/// assert_eq!(
///     Certificate::try_from(vec![vec![1], vec![-1]]),
///     Ok(Certificate::UNSAT(vec![]))
/// );
///
/// // `Solver` has another interface.
/// assert!(matches!(
///     Solver::try_from((Config::default(), vec![vec![0_i32]].as_slice())),
///     Err(Err(SolverError::InvalidLiteral))
/// ));
///```
impl<V: AsRef<[i32]>> TryFrom<Vec<V>> for Certificate {
    type Error = SolverError;
    fn try_from(vec: Vec<V>) -> SolverResult {
        Solver::try_from((Config::default(), vec.as_ref()))
            .map_or_else(|e: SolverResult| e, |mut solver| solver.solve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! run {
        ($vec: expr) => {
            let v = $vec;
            println!(
                "{:>46} =| {:?}",
                format!("{:?}", v),
                match Solver::try_from((Config::default(), v.as_slice())).map(|mut s| s.solve()) {
                    Err(e) => e,
                    Ok(s) => s,
                }
            );
        };
    }

    macro_rules! sat {
        ($vec: expr, $should_be: pat) => {
            println!("{:>46} =| ", format!("{:?}", $vec));
            let result = Certificate::try_from($vec);
            println!("{:?}", result);
            assert!(matches!(result, $should_be));
        };
        ($vec: expr) => {
            println!(
                "{:>46} =| {:?}",
                format!("{:?}", $vec),
                Certificate::try_from($vec)
            );
        };
    }

    #[test]
    fn test_on_memory_solving() {
        let mut v: Vec<Vec<i32>> = Vec::new();
        run!(v.clone());
        v.push(Vec::new());
        run!(v);
        run!(vec![vec![1]]);
        run!(vec![vec![1], vec![-1]]);
        run!(vec![vec![1, 2], vec![-1, 3], vec![1, -3], vec![-1, 2]]);
        run!(vec![
            vec![1, 2],
            vec![-1, 3],
            vec![1, -3],
            vec![-1, -2],
            vec![-2, -3]
        ]);
        run!(vec![
            vec![1, 2],
            vec![-1, 3],
            vec![-1, -3],
            vec![-1, -2],
            vec![1, -2]
        ]);

        // any `AsRef<[i32]>` element works
        let (v1, v2, v3, v4, v5) = (vec![1, 2], vec![-1, 3], vec![1, -3], vec![-1, 2], vec![-3]);
        run!(vec![&v1, &v2, &v3, &v4, &v5]); // : Vec<&[i32]>
        run!(vec![v1, v2, v3, v4, v5]); // : Vec<Vec<i32>>
        run!(vec![vec![1, 2], vec![-1, 3], vec![1, -3], vec![-1, 2], vec![-3]]);
        run!(vec![&[1, 2][..], &[-1, 3], &[1, -3], &[-1, 2], &[-3]]); // : Vec<&[i32]>
    }

    #[test]
    fn test_certificates() {
        sat!(Vec::<Vec<i32>>::new(), Ok(Certificate::SAT(_)));
        sat!(vec![Vec::<i32>::new()], Ok(Certificate::UNSAT(_)));
        sat!(vec![vec![1i32]], Ok(Certificate::SAT(_)));
        sat!(vec![vec![1i32], vec![-1]], Ok(Certificate::UNSAT(_)));
        sat!(vec![vec![1i32, 2], vec![-1, 2], vec![-2]], Ok(Certificate::UNSAT(_)));
        sat!(
            vec![vec![1i32, 2], vec![-1, 3], vec![1, -3], vec![-1, 2]],
            Ok(Certificate::SAT(_))
        );
        sat!(vec![vec![1i32, 2], vec![-3]], Ok(Certificate::SAT(_)));
        sat!(vec![vec![1i32, 4]], Ok(Certificate::SAT(_)));
        sat!(vec![vec![0i32]], Err(SolverError::InvalidLiteral));
        sat!(vec![vec![1i32, 2], vec![-1, -2]]);
    }

    #[test]
    fn test_sat_model_layout() {
        let result = Certificate::try_from(vec![vec![1i32, 2], vec![-1], vec![3, -2]]);
        assert_eq!(result, Ok(Certificate::SAT(vec![-1, 2, 3])));
    }

    #[test]
    fn test_stats_display() {
        let stats = Stats {
            num_solve: 2,
            num_conflict: 12,
            ..Stats::default()
        };
        let report = format!("{stats}");
        assert!(report.starts_with("c starts"));
        assert!(report.lines().any(|l| l.starts_with("c conflicts") && l.ends_with("12")));
        assert_eq!(report.lines().count(), 7);
    }
}
