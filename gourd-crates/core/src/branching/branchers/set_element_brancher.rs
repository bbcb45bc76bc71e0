//! A [`Brancher`] for set variables.

use log::warn;

use crate::branching::Brancher;
use crate::branching::ChoicePoint;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::propagation::ReadDomains;
use crate::variables::SetVariable;

/// Branches on the first set variable (in input order) which is not bound, by deciding its
/// smallest undecided element: the element is first included in the set and otherwise excluded.
#[derive(Debug, Clone)]
pub struct SetElementBrancher {
    sets: Vec<SetVariable>,
    include_first: bool,
}

impl SetElementBrancher {
    pub fn new(sets: &[SetVariable]) -> Self {
        if sets.is_empty() {
            warn!("The SetElementBrancher was not provided with any variables");
        }
        SetElementBrancher {
            sets: sets.to_vec(),
            include_first: true,
        }
    }

    /// Tries to exclude the undecided element before including it.
    pub fn excluding_first(mut self) -> Self {
        self.include_first = false;
        self
    }
}

impl Brancher for SetElementBrancher {
    fn next_choice_point(&mut self, context: &mut SelectionContext) -> Option<ChoicePoint> {
        self.sets.iter().find_map(|&set| {
            let glb = context.glb(set);
            let element = context
                .lub(set)
                .values()
                .find(|&element| !glb.contains_value(element))?;

            let decision = if self.include_first {
                predicate![set contains element]
            } else {
                predicate![set excludes element]
            };
            Some(ChoicePoint::binary(decision))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::domains::IntervalDomain;
    use crate::engine::State;

    #[test]
    fn the_smallest_undecided_element_is_decided() {
        let mut state = State::default();
        let bound = state.new_set_variable(
            IntervalDomain::from_values([1]),
            IntervalDomain::from_values([1]),
        );
        let set = state.new_set_variable(
            IntervalDomain::from_values([2]),
            IntervalDomain::from_values([1, 2, 3]),
        );

        let mut brancher = SetElementBrancher::new(&[bound, set]);
        let choice_point = brancher
            .next_choice_point(&mut SelectionContext::new(&state))
            .expect("set is not bound");

        assert_eq!(
            &[predicate![set contains 1], predicate![set excludes 1]],
            choice_point.alternatives()
        );
    }

    #[test]
    fn bound_sets_need_no_decision() {
        let mut state = State::default();
        let set = state.new_set_variable(
            IntervalDomain::from_values([1, 2]),
            IntervalDomain::from_values([1, 2]),
        );

        let mut brancher = SetElementBrancher::new(&[set]).excluding_first();

        assert!(brancher
            .next_choice_point(&mut SelectionContext::new(&state))
            .is_none());
    }
}
