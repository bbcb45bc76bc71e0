use super::Constraint;
pub use crate::propagators::regular::Automaton;
use crate::propagators::regular::RegularOptions;
use crate::propagators::regular::RegularPropagatorArgs;
use crate::variables::IntegerVariable;

/// Creates the [`Constraint`] that `variables`, read in order, spell a word accepted by
/// `automaton`.
///
/// # Example
/// ```
/// # use gourd_core::constraints;
/// # use gourd_core::constraints::Automaton;
/// # use gourd_core::domains::IntervalDomain;
/// # use gourd_core::options::RegularOptions;
/// # use gourd_core::Solver;
/// // Words over {0, 1} in which every 1 is followed by a 0.
/// let mut automaton = Automaton::new(2, 0, [0])?;
/// automaton.add_transition(0, 0, IntervalDomain::from_values([0]))?;
/// automaton.add_transition(0, 1, IntervalDomain::from_values([1]))?;
/// automaton.add_transition(1, 0, IntervalDomain::from_values([0]))?;
///
/// let mut solver = Solver::default();
/// let variables = (0..3)
///     .map(|_| solver.new_bounded_integer(0, 1))
///     .collect::<Result<Vec<_>, _>>()?;
///
/// solver.add_constraint(constraints::regular(
///     variables.clone(),
///     automaton,
///     RegularOptions::default(),
/// ))?;
///
/// // The last symbol cannot be a 1.
/// assert_eq!(solver.upper_bound(&variables[2]), 0);
/// # Ok::<(), gourd_core::DeclarationError>(())
/// ```
pub fn regular<Var: IntegerVariable + 'static>(
    variables: impl Into<Box<[Var]>>,
    automaton: Automaton,
    options: RegularOptions,
) -> impl Constraint {
    RegularPropagatorArgs {
        variables: variables.into(),
        automaton,
        options,
    }
}
