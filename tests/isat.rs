/// Incremental solving: enumerate all models by blocking clauses, under
/// growing prefixes of assumptions, and compare counts with brute force.
///```ignore
/// cargo test --test isat --release -- --nocapture --test-threads=1
///```
use bsat::*;

/// a fixed random-looking 3-SAT instance on 8 vars
fn uf8() -> Vec<Vec<i32>> {
    vec![
        vec![-4, 1, -8],
        vec![-3, 7, 2],
        vec![8, -5, 6],
        vec![-2, -7, 4],
        vec![5, 3, -1],
        vec![-6, -8, 2],
        vec![7, 4, -3],
        vec![-1, 6, 5],
        vec![2, -4, -6],
        vec![-5, 8, 1],
        vec![3, -2, 7],
        vec![-7, -1, -5],
    ]
}

fn satisfies(clauses: &[Vec<i32>], model: &[i32]) -> bool {
    clauses
        .iter()
        .all(|c| c.iter().any(|l| model[l.unsigned_abs() as usize - 1] == *l))
}

fn brute_force_count(clauses: &[Vec<i32>], nv: usize, assumptions: &[i32]) -> usize {
    (0..1u32 << nv)
        .map(|bits| {
            (1..=nv as i32)
                .map(|v| if bits & (1 << (v - 1)) != 0 { v } else { -v })
                .collect::<Vec<i32>>()
        })
        .filter(|m| satisfies(clauses, m) && assumptions.iter().all(|a| m.contains(a)))
        .count()
}

#[test_log::test]
fn all_solutions_of_uf8() {
    drive(&uf8(), vec![4, 5, -6, 7, 8]);
}

#[test_log::test]
fn all_solutions_without_bin_shortcut() {
    let config = Config {
        use_bin_shortcut: false,
        rst_schedule: RestartSchedule::Fixed,
        rst_step: 2,
        ..Config::default()
    };
    for i in 0..=3 {
        let assumptions = &[-1, 2, 3][0..i];
        assert_eq!(
            run(config.clone(), &uf8(), assumptions),
            brute_force_count(&uf8(), 8, assumptions)
        );
    }
}

fn drive(cnf: &[Vec<i32>], mother: Vec<i32>) {
    for i in 0..=mother.len() {
        let assumptions = &mother[0..i];
        let ns = run(Config::default(), cnf, assumptions);
        println!("#solution: {ns} under {assumptions:?}");
        assert_eq!(ns, brute_force_count(cnf, 8, assumptions));
    }
}

fn run(config: Config, cnf: &[Vec<i32>], assumptions: &[i32]) -> usize {
    println!("-------------------- {assumptions:?}");
    let mut solver = Solver::try_from((config, cnf)).expect("consistent");
    let mut count = 0;
    loop {
        match solver.solve_with(assumptions, None) {
            Ok(Certificate::SAT(ans)) => {
                count += 1;
                println!("s SATISFIABLE({count}): {ans:?}");

                //
                // Run an external validator
                //
                assert!(satisfies(cnf, &ans), "It's an invalid assignment.");
                assert_eq!(solver.validate(&ans), None);
                assert!(assumptions.iter().all(|a| ans.contains(a)));

                // block it by a clause which literals are flipped.
                let block = ans.iter().map(|i| -i).collect::<Vec<i32>>();
                match solver.add_clause(block) {
                    Err(SolverError::Inconsistent) => {
                        println!("c no (more) answer due to level zero conflict");
                        break;
                    }
                    Err(e) => panic!("s UNKNOWN; {e:?}"),
                    Ok(_) => (),
                }
            }
            Ok(Certificate::UNSAT(failed)) => {
                println!("s UNSATISFIABLE by {failed:?}");
                assert!(failed.iter().all(|l| assumptions.contains(l)));
                break;
            }
            other => panic!("s UNKNOWN; {other:?}"),
        }
    }
    count
}
