//! Property-based tests comparing the solver with exhaustive enumeration
//! on small random formulas.

use {
    bsat::{
        assign::AssignIF,
        cdb::{ClauseDBIF, ClauseIF},
        types::{FlagClause, FlagIF, Instantiate},
        *,
    },
    proptest::prelude::*,
};

const MAX_VARS: usize = 8;

/// a random formula: the number of vars and clauses over them
fn formula() -> impl Strategy<Value = (usize, Vec<Vec<i32>>)> {
    (1..=MAX_VARS).prop_flat_map(|nv| {
        let lit = (1..=nv as i32, any::<bool>()).prop_map(|(v, b)| if b { v } else { -v });
        (
            Just(nv),
            prop::collection::vec(prop::collection::vec(lit, 1..=4), 0..=28),
        )
    })
}

fn formula_with_assumptions() -> impl Strategy<Value = (usize, Vec<Vec<i32>>, Vec<i32>)> {
    formula().prop_flat_map(|(nv, clauses)| {
        let lit = (1..=nv as i32, any::<bool>()).prop_map(|(v, b)| if b { v } else { -v });
        (
            Just(nv),
            Just(clauses),
            prop::collection::vec(lit, 0..=4),
        )
    })
}

fn satisfies(clauses: &[Vec<i32>], model: &[i32]) -> bool {
    clauses
        .iter()
        .all(|c| c.iter().any(|l| model[l.unsigned_abs() as usize - 1] == *l))
}

/// return `true` if some assignment satisfies `clauses` and all of `units`.
fn brute_force(nv: usize, clauses: &[Vec<i32>], units: &[i32]) -> bool {
    (0..1u32 << nv).any(|bits| {
        let model = (1..=nv as i32)
            .map(|v| if bits & (1 << (v - 1)) != 0 { v } else { -v })
            .collect::<Vec<i32>>();
        satisfies(clauses, &model) && units.iter().all(|u| model.contains(u))
    })
}

fn build(config: Config, nv: usize, clauses: &[Vec<i32>]) -> Solver {
    let mut s = Solver::instantiate(&config, &types::CNFDescription::from(nv));
    for c in clauses {
        match s.add_clause(c) {
            Ok(_) | Err(SolverError::Inconsistent) => (),
            Err(e) => panic!("{e:?}"),
        }
    }
    s
}

/// check a certificate against the oracle; return `Ok(true)` for SAT.
fn check(
    nv: usize,
    clauses: &[Vec<i32>],
    assumptions: &[i32],
    result: SolverResult,
) -> Result<bool, TestCaseError> {
    match result {
        Ok(Certificate::SAT(model)) => {
            prop_assert_eq!(model.len(), nv);
            prop_assert!(satisfies(clauses, &model));
            prop_assert!(assumptions.iter().all(|a| model.contains(a)));
            Ok(true)
        }
        Ok(Certificate::UNSAT(failed)) => {
            prop_assert!(failed.iter().all(|l| assumptions.contains(l)));
            prop_assert!(!brute_force(nv, clauses, &failed));
            Ok(false)
        }
        other => Err(TestCaseError::fail(format!("unexpected {other:?}"))),
    }
}

fn small_steps(schedule: RestartSchedule) -> Config {
    Config {
        rst_schedule: schedule,
        rst_step: 2,
        rst_inc: 2.0,
        cdb_reduce_first: 4,
        cdb_reduce_inc: 2,
        ..Config::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_verdict_matches_enumeration((nv, clauses) in formula()) {
        let mut s = build(Config::default(), nv, &clauses);
        let sat = check(nv, &clauses, &[], s.solve())?;
        prop_assert_eq!(sat, brute_force(nv, &clauses, &[]));
    }

    #[test]
    fn prop_assumptions_are_sound((nv, clauses, assumptions) in formula_with_assumptions()) {
        let mut s = build(Config::default(), nv, &clauses);
        let sat = check(nv, &clauses, &assumptions, s.solve_with(&assumptions, None))?;
        prop_assert_eq!(sat, brute_force(nv, &clauses, &assumptions));
        // nothing leaks into the next call
        prop_assert_eq!(s.asg.decision_level(), 0);
        let sat = check(nv, &clauses, &[], s.solve())?;
        prop_assert_eq!(sat, brute_force(nv, &clauses, &[]));
    }

    #[test]
    fn prop_resolving_is_stable((nv, clauses, assumptions) in formula_with_assumptions()) {
        let mut s = build(Config::default(), nv, &clauses);
        let first = check(nv, &clauses, &assumptions, s.solve_with(&assumptions, None))?;
        let second = check(nv, &clauses, &assumptions, s.solve_with(&assumptions, None))?;
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_configurations_agree((nv, clauses, assumptions) in formula_with_assumptions()) {
        let expected = brute_force(nv, &clauses, &assumptions);
        let configs = [
            small_steps(RestartSchedule::Luby),
            small_steps(RestartSchedule::Geometric),
            small_steps(RestartSchedule::Fixed),
            Config {
                without_restart: true,
                without_reduce: true,
                ..Config::default()
            },
            Config {
                use_bin_shortcut: false,
                use_phase_saving: false,
                ..small_steps(RestartSchedule::Luby)
            },
        ];
        for config in configs {
            let mut s = build(config, nv, &clauses);
            let sat = check(nv, &clauses, &assumptions, s.solve_with(&assumptions, None))?;
            prop_assert_eq!(sat, expected);
        }
    }

    #[test]
    fn prop_learnts_are_implied((nv, clauses, assumptions) in formula_with_assumptions()) {
        let mut s = build(small_steps(RestartSchedule::Luby), nv, &clauses);
        check(nv, &clauses, &assumptions, s.solve_with(&assumptions, None))?;
        for c in s.cdb.iter().skip(1) {
            if !c.is(FlagClause::LEARNT) || c.is_dead() {
                continue;
            }
            let learnt = Vec::<i32>::from(c);
            // no model of the permanent clauses falsifies a learnt
            let negated = learnt.iter().map(|l| -l).collect::<Vec<i32>>();
            prop_assert!(
                !brute_force(nv, &clauses, &negated),
                "{:?} isn't implied",
                learnt
            );
        }
    }

    #[test]
    fn prop_deletion_matches_remaining_clauses(
        (nv, clauses) in formula(),
        mask in prop::collection::vec(any::<bool>(), 28),
    ) {
        let mut s = Solver::new(nv);
        let mut handles = Vec::new();
        for c in clauses.iter() {
            match s.add_clause(c) {
                Ok(h) => handles.push(Some(h)),
                Err(SolverError::Inconsistent) => handles.push(None),
                Err(e) => panic!("{e:?}"),
            }
        }
        // warm up learnts before deletion
        let _ = s.solve();
        let mut remaining: Vec<Vec<i32>> = Vec::new();
        for (i, c) in clauses.iter().enumerate() {
            match handles[i] {
                Some(h) if mask[i] => prop_assert!(s.delete_clause(h).is_ok()),
                // a clause added after the inconsistency has no handle; keep it
                _ => remaining.push(c.clone()),
            }
        }
        let sat = check(nv, &remaining, &[], s.solve())?;
        prop_assert_eq!(sat, brute_force(nv, &remaining, &[]));
    }

    #[test]
    fn prop_budget_never_lies((nv, clauses) in formula(), limit in 0u64..4) {
        let mut s = build(small_steps(RestartSchedule::Fixed), nv, &clauses);
        let budget = Budget {
            conflicts: Some(limit),
            ..Budget::default()
        };
        match s.solve_with(&[], Some(budget)) {
            Ok(Certificate::Indeterminate) => (),
            result => {
                let sat = check(nv, &clauses, &[], result)?;
                prop_assert_eq!(sat, brute_force(nv, &clauses, &[]));
            }
        }
        let sat = check(nv, &clauses, &[], s.solve())?;
        prop_assert_eq!(sat, brute_force(nv, &clauses, &[]));
    }
}
