mod common;

use gourd_core::constraints;
use gourd_core::predicate;
use gourd_core::results::ProblemSolution;
use gourd_core::results::SatisfactionResult;
use gourd_core::termination::Indefinite;
use gourd_core::DeclarationError;
use gourd_core::Solver;

#[test]
fn counting_four_twos_fixes_every_variable() {
    common::init_logging();
    let mut solver = Solver::default();
    let variables = (0..4)
        .map(|_| solver.new_bounded_integer(1, 3).expect("non-empty"))
        .collect::<Vec<_>>();
    let count = solver.new_bounded_integer(0, 4).expect("non-empty");

    solver
        .add_constraint(constraints::count(variables.clone(), 2, count))
        .expect("feasible");
    assert_eq!(solver.domain_values(&count), vec![0, 1, 2, 3, 4]);

    solver.post(predicate![count == 4]).expect("feasible");
    for variable in variables.iter() {
        assert_eq!(solver.domain_values(variable), vec![2]);
    }
}

#[test]
fn an_element_outside_the_superset_is_infeasible() {
    common::init_logging();
    let mut solver = Solver::default();
    let x = solver.new_set_variable([], [1, 2, 3]).expect("valid bounds");
    let y = solver.new_set_variable([], [2, 3, 4]).expect("valid bounds");

    solver
        .add_constraint(constraints::subset(x, y))
        .expect("feasible");
    assert!(!solver.lub(x).contains_value(1));

    assert_eq!(
        solver.post(predicate![x contains 1]),
        Err(DeclarationError::InfeasibleConstraint)
    );
    assert!(solver.is_infeasible());

    let mut brancher = solver.default_brancher();
    assert!(matches!(
        solver.satisfy(&mut brancher, &mut Indefinite),
        SatisfactionResult::Unsatisfiable
    ));
}

#[test]
fn a_union_forces_its_elements_into_one_of_the_operands() {
    common::init_logging();
    let mut solver = Solver::default();
    let x = solver.new_set_variable([], [1, 2]).expect("valid bounds");
    let y = solver.new_set_variable([], [2, 3]).expect("valid bounds");
    let union = solver.new_set_variable([1, 3], 1..=4).expect("valid bounds");

    solver
        .add_constraint(constraints::union(x, y, union))
        .expect("feasible");

    assert!(solver.glb(x).contains_value(1));
    assert!(solver.glb(y).contains_value(3));
    assert!(!solver.lub(union).contains_value(4));

    let mut brancher = solver.default_brancher();
    let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut brancher, &mut Indefinite)
    else {
        panic!("the model has solutions");
    };
    let union_value = solution.get_set_value(union).values().collect::<Vec<_>>();
    let mut expected = solution
        .get_set_value(x)
        .union(solution.get_set_value(y))
        .values()
        .collect::<Vec<_>>();
    expected.sort();
    assert_eq!(union_value, expected);
}
