#![cfg(test)]
//! This module exposes helpers that aid testing of propagators. The [`TestSolver`] allows setting
//! up specific scenarios under which to test the various operations of a propagator.
use crate::basic_types::PropagationStatusCP;
use crate::engine::domains::IntervalDomain;
use crate::engine::predicates::Predicate;
use crate::engine::State;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorHandle;
use crate::propagation::ReadDomains;
use crate::variables::DomainId;
use crate::variables::IntegerVariable;
use crate::variables::RealVariable;
use crate::variables::SetVariable;

/// A container for variables and propagators, which can be used to test propagators.
#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    pub(crate) state: State,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        self.state.new_interval_variable(lb, ub)
    }

    pub(crate) fn new_set_variable(&mut self, glb: &[i32], lub: &[i32]) -> SetVariable {
        self.state.new_set_variable(
            IntervalDomain::from_values(glb.iter().copied()),
            IntervalDomain::from_values(lub.iter().copied()),
        )
    }

    pub(crate) fn new_real_variable(&mut self, lb: f64, ub: f64) -> RealVariable {
        self.state.new_real_variable(lb, ub, 1e-6)
    }

    /// Adds the propagator and propagates to a fixed point.
    pub(crate) fn new_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, crate::basic_types::Contradiction>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        let handle = self.state.add_propagator(constructor);
        self.state.propagate_to_fixed_point()?;
        Ok(handle)
    }

    /// Makes `predicate` true and propagates to a fixed point.
    pub(crate) fn post(&mut self, predicate: Predicate) -> PropagationStatusCP {
        let _ = self.state.post(predicate)?;
        self.state.propagate_to_fixed_point()
    }

    pub(crate) fn lower_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        self.state.lower_bound(&var)
    }

    pub(crate) fn upper_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        self.state.upper_bound(&var)
    }

    pub(crate) fn contains<Var: IntegerVariable>(&self, var: Var, value: i32) -> bool {
        self.state.contains(&var, value)
    }

    pub(crate) fn glb(&self, set: SetVariable) -> Vec<i32> {
        self.state.glb(set).values().collect()
    }

    pub(crate) fn lub(&self, set: SetVariable) -> Vec<i32> {
        self.state.lub(set).values().collect()
    }

    pub(crate) fn real_bounds(&self, real: RealVariable) -> (f64, f64) {
        let domain = self.state.real_domain(real);
        (domain.min(), domain.max())
    }

    pub(crate) fn assert_bounds<Var: IntegerVariable>(&self, var: Var, lb: i32, ub: i32) {
        let actual_lb = self.lower_bound(var.clone());
        let actual_ub = self.upper_bound(var);

        assert_eq!(
            (lb, ub), (actual_lb, actual_ub),
            "The expected bounds [{lb}..{ub}] did not match the actual bounds [{actual_lb}..{actual_ub}]"
        );
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.state.new_checkpoint();
    }

    pub(crate) fn synchronise(&mut self, checkpoint: usize) {
        self.state.restore_to(checkpoint);
    }
}
