//! The regular constraint admits exactly the words its automaton accepts.
mod common;

use common::all_words;
use common::no_consecutive_ones;
use gourd_core::constraints;
use gourd_core::options::RegularOptions;
use gourd_core::options::SupportStrategy;
use gourd_core::predicate;
use gourd_core::predicates::Predicate;
use gourd_core::results::ProblemSolution;
use gourd_core::results::SatisfactionResult;
use gourd_core::termination::Indefinite;
use gourd_core::variables::DomainId;
use gourd_core::Solver;

const STRATEGIES: [SupportStrategy; 3] = [
    SupportStrategy::Rescan,
    SupportStrategy::CachedSupport,
    SupportStrategy::Automatic { threshold: 0 },
];

fn model(strategy: SupportStrategy) -> (Solver, Vec<DomainId>) {
    let mut solver = Solver::default();
    let variables = (0..4)
        .map(|_| solver.new_bounded_integer(0, 1).expect("non-empty"))
        .collect::<Vec<_>>();

    solver
        .add_constraint(constraints::regular(
            variables.clone(),
            no_consecutive_ones(),
            RegularOptions {
                support_strategy: strategy,
            },
        ))
        .expect("feasible");

    (solver, variables)
}

fn assigning(variables: &[DomainId], word: &[i32]) -> Vec<Predicate> {
    variables
        .iter()
        .zip(word)
        .map(|(&variable, &value)| predicate![variable == value])
        .collect()
}

#[test]
fn all_solutions_are_the_accepted_words() {
    common::init_logging();
    let automaton = no_consecutive_ones();
    let mut expected = all_words(&[0, 1], 4)
        .into_iter()
        .filter(|word| automaton.accepts(word))
        .collect::<Vec<_>>();
    expected.sort();
    assert_eq!(expected.len(), 8);

    for strategy in STRATEGIES {
        let (mut solver, variables) = model(strategy);
        let mut brancher = solver.default_brancher();
        let all_solutions = solver.all_solutions(&mut brancher, &mut Indefinite);
        assert!(all_solutions.is_complete);

        let mut words = all_solutions
            .solutions
            .iter()
            .map(|solution| {
                variables
                    .iter()
                    .map(|&variable| solution.get_integer_value(variable))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        words.sort();

        assert_eq!(expected, words, "{strategy:?}");
    }
}

#[test]
fn every_word_is_decided_before_and_after_a_reverted_restriction() {
    common::init_logging();
    let automaton = no_consecutive_ones();

    for strategy in STRATEGIES {
        let (mut solver, variables) = model(strategy);
        let mut brancher = solver.default_brancher();

        for word in all_words(&[0, 1], 4) {
            let accepted = automaton.accepts(&word);
            let mut assumptions = assigning(&variables, &word);

            let result =
                solver.satisfy_under_assumptions(&mut brancher, &mut Indefinite, &assumptions);
            assert_eq!(
                matches!(result, SatisfactionResult::Satisfiable(_)),
                accepted,
                "{word:?}"
            );

            // Restricting the last variable to 0 keeps only the words ending in 0.
            let last = variables[3];
            assumptions.push(predicate![last <= 0]);
            let result =
                solver.satisfy_under_assumptions(&mut brancher, &mut Indefinite, &assumptions);
            assert_eq!(
                matches!(result, SatisfactionResult::Satisfiable(_)),
                accepted && word[3] == 0,
                "{word:?} with the last symbol restricted"
            );

            let _ = assumptions.pop();
            let result =
                solver.satisfy_under_assumptions(&mut brancher, &mut Indefinite, &assumptions);
            assert_eq!(
                matches!(result, SatisfactionResult::Satisfiable(_)),
                accepted,
                "{word:?} after lifting the restriction"
            );
        }

        for &variable in variables.iter() {
            assert_eq!(solver.domain_values(&variable), vec![0, 1]);
        }
    }
}
