use crate::basic_types::DeclarationError;
use crate::containers::HashSet;
use crate::engine::domains::IntervalDomain;

/// A (possibly non-deterministic) finite automaton over integer values.
///
/// States are numbered `0..num_states`. A transition is labelled with the set of values which
/// allow it to be taken, so a single transition can cover a whole range of values.
///
/// # Example
/// ```rust
/// # use gourd_core::constraints::Automaton;
/// # use gourd_core::domains::IntervalDomain;
/// // Binary strings without two consecutive ones; state 1 means the last symbol was a one.
/// let mut automaton = Automaton::new(2, 0, [0, 1])?;
/// automaton.add_transition(0, 0, IntervalDomain::from_values([0]))?;
/// automaton.add_transition(0, 1, IntervalDomain::from_values([1]))?;
/// automaton.add_transition(1, 0, IntervalDomain::from_values([0]))?;
///
/// assert!(automaton.accepts(&[1, 0, 1, 0]));
/// assert!(!automaton.accepts(&[0, 1, 1, 0]));
/// # Ok::<(), gourd_core::DeclarationError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Automaton {
    num_states: usize,
    initial_state: usize,
    final_states: Vec<usize>,
    transitions: Vec<Transition>,
}

/// A transition `from -> to` which can be taken with any of `values`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Transition {
    pub(crate) from: usize,
    pub(crate) to: usize,
    pub(crate) values: IntervalDomain,
}

impl Automaton {
    /// Creates an automaton without transitions.
    pub fn new(
        num_states: usize,
        initial_state: usize,
        final_states: impl IntoIterator<Item = usize>,
    ) -> Result<Automaton, DeclarationError> {
        if num_states == 0 {
            return Err(DeclarationError::InvalidAutomaton(
                "an automaton needs at least one state".to_owned(),
            ));
        }

        let automaton = Automaton {
            num_states,
            initial_state,
            final_states: final_states.into_iter().collect(),
            transitions: vec![],
        };

        automaton.check_state(initial_state)?;
        for &state in automaton.final_states.iter() {
            automaton.check_state(state)?;
        }

        Ok(automaton)
    }

    /// Adds a transition from `from` to `to` which can be taken with any of `values`.
    pub fn add_transition(
        &mut self,
        from: usize,
        to: usize,
        values: IntervalDomain,
    ) -> Result<(), DeclarationError> {
        self.check_state(from)?;
        self.check_state(to)?;

        if values.is_empty() {
            return Err(DeclarationError::InvalidAutomaton(format!(
                "the transition {from} -> {to} has no values"
            )));
        }

        self.transitions.push(Transition { from, to, values });
        Ok(())
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn initial_state(&self) -> usize {
        self.initial_state
    }

    pub fn is_final(&self, state: usize) -> bool {
        self.final_states.contains(&state)
    }

    /// Whether the automaton accepts `word`, by simulating every run at once.
    pub fn accepts(&self, word: &[i32]) -> bool {
        let mut current: HashSet<usize> = HashSet::default();
        let _ = current.insert(self.initial_state);

        for &symbol in word {
            current = self
                .transitions
                .iter()
                .filter(|transition| {
                    current.contains(&transition.from) && transition.values.contains_value(symbol)
                })
                .map(|transition| transition.to)
                .collect();

            if current.is_empty() {
                return false;
            }
        }

        current.into_iter().any(|state| self.is_final(state))
    }

    pub(crate) fn transitions_from(&self, state: usize) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions
            .iter()
            .filter(move |transition| transition.from == state)
    }

    fn check_state(&self, state: usize) -> Result<(), DeclarationError> {
        if state < self.num_states {
            Ok(())
        } else {
            Err(DeclarationError::InvalidAutomaton(format!(
                "state {state} does not exist in an automaton with {} states",
                self.num_states
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_deterministic_runs_are_explored_together() {
        // Accepts words ending in 1, guessing where the last symbol is.
        let mut automaton = Automaton::new(2, 0, [1]).expect("valid");
        automaton
            .add_transition(0, 0, IntervalDomain::new(0, 1))
            .expect("valid");
        automaton
            .add_transition(0, 1, IntervalDomain::from_values([1]))
            .expect("valid");

        assert!(automaton.accepts(&[0, 0, 1]));
        assert!(automaton.accepts(&[1]));
        assert!(!automaton.accepts(&[1, 0]));
        assert!(!automaton.accepts(&[]));
    }

    #[test]
    fn states_outside_the_automaton_are_rejected() {
        assert!(matches!(
            Automaton::new(2, 2, [0]),
            Err(DeclarationError::InvalidAutomaton(_))
        ));

        let mut automaton = Automaton::new(2, 0, [0]).expect("valid");
        assert!(automaton
            .add_transition(0, 5, IntervalDomain::from_values([1]))
            .is_err());
        assert!(automaton
            .add_transition(0, 1, IntervalDomain::empty())
            .is_err());
    }
}
