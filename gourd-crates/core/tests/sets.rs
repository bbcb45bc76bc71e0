mod common;

use gourd_core::constraints;
use gourd_core::predicate;
use gourd_core::predicates::Predicate;
use gourd_core::rand::rngs::SmallRng;
use gourd_core::rand::Rng;
use gourd_core::rand::SeedableRng;
use gourd_core::results::ProblemSolution;
use gourd_core::termination::Indefinite;
use gourd_core::variables::DomainId;
use gourd_core::variables::SetVariable;
use gourd_core::Solver;

struct SetModel {
    solver: Solver,
    x: SetVariable,
    y: SetVariable,
    intersection: SetVariable,
    union: SetVariable,
    size: DomainId,
}

/// `x, y ⊆ {1, 2, 3}` with their intersection, their union and the cardinality of the union.
fn set_model() -> SetModel {
    let mut solver = Solver::default();
    let x = solver.new_set_variable([], 1..=3).expect("valid bounds");
    let y = solver.new_set_variable([], 1..=3).expect("valid bounds");
    let intersection = solver.new_set_variable([], 1..=3).expect("valid bounds");
    let union = solver.new_set_variable([], 1..=3).expect("valid bounds");
    let size = solver.new_bounded_integer(0, 3).expect("non-empty");

    solver
        .add_constraint(constraints::intersection(x, y, intersection))
        .expect("feasible");
    solver
        .add_constraint(constraints::union(x, y, union))
        .expect("feasible");
    solver
        .add_constraint(constraints::set_cardinality(union, size))
        .expect("feasible");

    SetModel {
        solver,
        x,
        y,
        intersection,
        union,
        size,
    }
}

fn elements(mask: u32) -> Vec<i32> {
    (1..=3).filter(|element| mask & (1 << element) != 0).collect()
}

#[test]
fn random_root_posts_keep_the_bounds_consistent() {
    common::init_logging();

    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let SetModel {
            mut solver,
            x,
            y,
            intersection,
            union,
            size,
        } = set_model();
        let sets = [x, y, intersection, union];

        for _ in 0..6 {
            let predicate: Predicate = if rng.gen_bool(0.2) {
                let bound = rng.gen_range(0..=3);
                if rng.gen_bool(0.5) {
                    predicate![size >= bound]
                } else {
                    predicate![size <= bound]
                }
            } else {
                let set = sets[rng.gen_range(0..sets.len())];
                let element = rng.gen_range(1..=3);
                if rng.gen_bool(0.5) {
                    predicate![set contains element]
                } else {
                    predicate![set excludes element]
                }
            };

            if solver.post(predicate).is_err() {
                assert!(solver.is_infeasible());
                break;
            }

            for set in sets {
                assert!(solver.glb(set).is_subset_of(solver.lub(set)), "seed {seed}");
            }
            let glb_size = solver.glb(union).len() as i32;
            let lub_size = solver.lub(union).len() as i32;
            assert!(glb_size <= solver.lower_bound(&size));
            assert!(solver.upper_bound(&size) <= lub_size);
            assert!(solver
                .glb(intersection)
                .is_subset_of(&solver.glb(x).intersection(solver.glb(y))));
            assert!(solver
                .glb(x)
                .union(solver.glb(y))
                .is_subset_of(solver.glb(union)));
        }
    }
}

#[test]
fn all_solutions_match_a_brute_force_enumeration() {
    common::init_logging();
    let SetModel {
        mut solver,
        x,
        y,
        intersection,
        union,
        size,
    } = set_model();
    solver
        .add_constraint(constraints::lex_less_than_or_equals(x, y))
        .expect("feasible");
    solver.post(predicate![size == 2]).expect("feasible");

    let mut expected = vec![];
    for x_mask in (0..16).step_by(2) {
        for y_mask in (0..16).step_by(2) {
            let (x_value, y_value) = (elements(x_mask), elements(y_mask));
            if elements(x_mask | y_mask).len() == 2 && x_value.iter().le(y_value.iter()) {
                expected.push((x_value, y_value));
            }
        }
    }
    expected.sort();

    let mut brancher = solver.default_brancher();
    let all_solutions = solver.all_solutions(&mut brancher, &mut Indefinite);
    assert!(all_solutions.is_complete);

    let mut found = all_solutions
        .solutions
        .iter()
        .map(|solution| {
            let value = |set| solution.get_set_value(set).values().collect::<Vec<_>>();
            let (x_value, y_value) = (value(x), value(y));

            let mut union_value = x_value.clone();
            union_value.extend(y_value.iter().filter(|element| !x_value.contains(element)));
            union_value.sort();
            assert_eq!(value(union), union_value);
            assert_eq!(
                value(intersection),
                x_value
                    .iter()
                    .copied()
                    .filter(|element| y_value.contains(element))
                    .collect::<Vec<_>>()
            );
            assert_eq!(solution.get_integer_value(size), 2);

            (x_value, y_value)
        })
        .collect::<Vec<_>>();
    found.sort();

    assert_eq!(expected, found);
}
