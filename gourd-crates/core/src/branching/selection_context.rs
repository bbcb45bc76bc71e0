#[cfg(doc)]
use crate::branching::Brancher;
use crate::engine::cp::Assignments;
use crate::engine::State;
use crate::propagation::HasAssignments;
#[cfg(doc)]
use crate::propagation::ReadDomains;
use crate::variables::DomainId;

/// The information a [`Brancher`] can use to make its next decision.
///
/// Domains are read through [`ReadDomains`]; in addition the context exposes the statistics the
/// state keeps per variable.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    state: &'a State,
}

impl<'a> SelectionContext<'a> {
    pub fn new(state: &'a State) -> Self {
        SelectionContext { state }
    }

    /// One plus the number of times a propagator watching `domain_id` failed.
    pub fn weight(&self, domain_id: DomainId) -> u64 {
        self.state.weight(domain_id)
    }

    /// The number of propagators watching `domain_id`.
    pub fn degree(&self, domain_id: DomainId) -> usize {
        self.state.degree(domain_id)
    }

    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> + 'a {
        self.state.assignments.get_domains()
    }
}

impl HasAssignments for SelectionContext<'_> {
    fn assignments(&self) -> &Assignments {
        &self.state.assignments
    }
}
