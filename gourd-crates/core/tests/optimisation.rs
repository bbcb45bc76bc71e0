//! Minimise and maximise `z = x + y` subject to `x < y` and `y > 5`, with every variable in
//! `[0, 10]`.
mod common;

use std::time::Duration;

use gourd_core::constraints;
use gourd_core::results::OptimisationResult;
use gourd_core::results::ProblemSolution;
use gourd_core::termination::Combinator;
use gourd_core::termination::Indefinite;
use gourd_core::termination::SolutionBudget;
use gourd_core::termination::TimeBudget;
use gourd_core::variables::DomainId;
use gourd_core::Solver;

struct Model {
    solver: Solver,
    x: DomainId,
    y: DomainId,
    z: DomainId,
}

fn model() -> Model {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(0, 10).expect("non-empty");
    let y = solver.new_bounded_integer(0, 10).expect("non-empty");
    let z = solver.new_bounded_integer(0, 10).expect("non-empty");

    solver
        .add_constraint(constraints::binary_less_than(x, y))
        .expect("feasible");
    solver
        .add_constraint(constraints::plus(x, y, z))
        .expect("feasible");
    solver
        .add_constraint(constraints::greater_than([y], 5))
        .expect("feasible");

    Model { solver, x, y, z }
}

/// The objective values of all solutions, found by enumeration.
fn all_objective_values() -> Vec<i32> {
    let Model { mut solver, x, y, z } = model();
    let mut brancher = solver.default_brancher();
    let all_solutions = solver.all_solutions(&mut brancher, &mut Indefinite);
    assert!(all_solutions.is_complete);

    all_solutions
        .solutions
        .iter()
        .map(|solution| {
            let (x, y, z) = (
                solution.get_integer_value(x),
                solution.get_integer_value(y),
                solution.get_integer_value(z),
            );
            assert!(x < y && y > 5 && x + y == z);
            z
        })
        .collect()
}

#[test]
fn minimising_finds_the_smallest_sum() {
    common::init_logging();
    let Model { mut solver, x, y, z } = model();

    let mut brancher = solver.default_brancher();
    let OptimisationResult::Optimal(solution) =
        solver.minimise(&mut brancher, &mut Indefinite, z)
    else {
        panic!("the model has an optimum");
    };

    let best = all_objective_values().into_iter().min();
    assert_eq!(best, Some(6));
    assert_eq!(Some(solution.get_integer_value(z)), best);
    assert_eq!(solution.get_integer_value(x), 0);
    assert_eq!(solution.get_integer_value(y), 6);
}

#[test]
fn maximising_finds_the_largest_sum() {
    common::init_logging();
    let Model { mut solver, z, .. } = model();

    let mut brancher = solver.default_brancher();
    let OptimisationResult::Optimal(solution) =
        solver.maximise(&mut brancher, &mut Indefinite, z)
    else {
        panic!("the model has an optimum");
    };

    let best = all_objective_values().into_iter().max();
    assert_eq!(best, Some(10));
    assert_eq!(Some(solution.get_integer_value(z)), best);
}

#[test]
fn an_exhausted_solution_budget_returns_the_incumbent_from_the_root() {
    common::init_logging();
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(0, 10).expect("non-empty");
    let y = solver.new_bounded_integer(0, 10).expect("non-empty");
    solver
        .add_constraint(constraints::greater_than_or_equals([x, y], 3))
        .expect("feasible");

    let mut brancher = solver.default_brancher();
    let result = solver.maximise(&mut brancher, &mut SolutionBudget::new(1), x);

    let OptimisationResult::Satisfiable(solution) = result else {
        panic!("the budget allows exactly one solution, which cannot be proven optimal");
    };
    let (x_value, y_value) = (solution.get_integer_value(x), solution.get_integer_value(y));
    assert!(x_value + y_value >= 3);

    assert_eq!(solver.lower_bound(&x), 0);
    assert_eq!(solver.upper_bound(&x), 10);
    assert_eq!(solver.lower_bound(&y), 0);
}

#[test]
fn a_combined_budget_stops_after_the_second_incumbent() {
    common::init_logging();
    let Model { mut solver, z, .. } = model();

    let root_bounds = (solver.lower_bound(&z), solver.upper_bound(&z));

    let mut brancher = solver.default_brancher();
    let mut termination = Combinator::new(
        SolutionBudget::new(2),
        TimeBudget::starting_now(Duration::from_secs(60)),
    );
    let result = solver.minimise(&mut brancher, &mut termination, z);

    match result {
        OptimisationResult::Satisfiable(solution) | OptimisationResult::Optimal(solution) => {
            assert!(solution.get_integer_value(z) >= 6);
        }
        _ => panic!("the model has solutions"),
    }
    assert_eq!((solver.lower_bound(&z), solver.upper_bound(&z)), root_bounds);
}
