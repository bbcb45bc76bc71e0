use log::trace;

use crate::basic_types::PropagationStatusCP;
use crate::containers::KeyedVec;
use crate::create_statistics_struct;
use crate::engine::cp::Assignments;
use crate::engine::cp::PropagatorQueue;
use crate::engine::cp::TrailedValues;
use crate::engine::cp::WatchList;
use crate::engine::domains::Domain;
use crate::engine::domains::DomainEvent;
use crate::engine::domains::EmptyDomain;
use crate::engine::domains::IntegerDomain;
use crate::engine::domains::IntervalDomain;
use crate::engine::domains::RealDomain;
use crate::engine::domains::SetDomain;
use crate::engine::predicates::Predicate;
use crate::engine::QueueOrder;
use crate::gourd_assert_eq_simple;
use crate::gourd_assert_simple;
use crate::propagation::store::PropagatorStore;
use crate::propagation::EnqueueDecision;
use crate::propagation::HasAssignments;
use crate::propagation::NotificationContext;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorHandle;
use crate::propagation::PropagatorId;
use crate::propagation::PropagatorVarId;
use crate::statistics::log_statistic;
use crate::statistics::StatisticLogger;
use crate::variables::DomainId;
use crate::variables::RealVariable;
use crate::variables::SetVariable;

/// The [`State`] is the container of variables and propagators.
///
/// It owns the domains of all variables and the trail used to restore them, the propagators, and
/// the queue which drives propagation to a fixed point.
#[derive(Debug)]
pub struct State {
    /// The list of propagators; propagators live here and are queried when events (domain changes)
    /// happen.
    pub(crate) propagators: PropagatorStore,
    /// The domains of all variables.
    pub(crate) assignments: Assignments,
    /// Keep track of trailed values (i.e. values which automatically backtrack).
    pub(crate) trailed_values: TrailedValues,
    /// Dictates the order in which propagators will be called to propagate.
    pub(crate) propagator_queue: PropagatorQueue,
    /// Which propagators to notify of which event on which domain.
    pub(crate) watch_list: WatchList,
    /// Incremented for every variable in the scope of a propagator that fails.
    weights: KeyedVec<DomainId, u64>,
    /// Buffer for the events that are processed by [`State::notify_propagators`].
    event_buffer: Vec<(DomainEvent, DomainId)>,

    statistics: StateStatistics,
}

create_statistics_struct!(StateStatistics {
    num_propagator_calls: u64,
    num_contradictions: u64,
});

impl Default for State {
    fn default() -> Self {
        State::new(QueueOrder::default())
    }
}

impl State {
    pub(crate) fn new(queue_order: QueueOrder) -> State {
        State {
            propagators: PropagatorStore::default(),
            assignments: Assignments::default(),
            trailed_values: TrailedValues::default(),
            propagator_queue: PropagatorQueue::new(4, queue_order),
            watch_list: WatchList::default(),
            weights: KeyedVec::default(),
            event_buffer: vec![],
            statistics: StateStatistics::default(),
        }
    }

    pub(crate) fn log_statistics(&self, verbose: bool) {
        log_statistic("variables", self.assignments.num_domains());
        log_statistic("propagators", self.propagators.len());
        log_statistic("propagatorCalls", self.statistics.num_propagator_calls);
        log_statistic("contradictions", self.statistics.num_contradictions);
        if verbose {
            for (index, propagator) in self.propagators.iter().enumerate() {
                propagator.log_statistics(StatisticLogger::new([
                    propagator.name(),
                    "number",
                    index.to_string().as_str(),
                ]));
            }
        }
    }

    pub(crate) fn num_propagator_calls(&self) -> u64 {
        self.statistics.num_propagator_calls
    }
}

// Variables.
impl State {
    /// Creates a new variable with the given domain.
    pub(crate) fn new_variable(&mut self, domain: Domain) -> DomainId {
        let domain_id = self.assignments.grow(domain);
        self.watch_list.grow();
        let _ = self.weights.push(1);

        domain_id
    }

    /// Creates an integer variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_interval_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        gourd_assert_simple!(lower_bound <= upper_bound, "the domain must not be empty");
        self.new_variable(Domain::Integer(IntegerDomain::Interval(IntervalDomain::new(
            lower_bound,
            upper_bound,
        ))))
    }

    /// Creates a set variable with the domain `[glb, lub]`.
    pub fn new_set_variable(&mut self, glb: IntervalDomain, lub: IntervalDomain) -> SetVariable {
        SetVariable::new(self.new_variable(Domain::Set(SetDomain::new(glb, lub))))
    }

    /// Creates a real variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_real_variable(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        precision: f64,
    ) -> RealVariable {
        RealVariable::new(self.new_variable(Domain::Real(RealDomain::new(
            lower_bound,
            upper_bound,
            precision,
        ))))
    }

    /// The weight of a variable: one plus the number of failures of propagators watching it.
    pub fn weight(&self, domain_id: DomainId) -> u64 {
        self.weights[domain_id]
    }

    /// The number of propagator registrations on a variable.
    pub fn degree(&self, domain_id: DomainId) -> usize {
        self.watch_list.num_watchers(domain_id)
    }

    pub fn get_checkpoint(&self) -> usize {
        self.assignments.get_checkpoint()
    }

    pub fn truth_value(&self, predicate: Predicate) -> Option<bool> {
        self.assignments.evaluate_predicate(predicate)
    }
}

// Propagators.
impl State {
    /// Adds a propagator to the state, which is enqueued so it runs during the next call to
    /// [`State::propagate_to_fixed_point`].
    pub fn add_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> PropagatorHandle<Constructor::PropagatorImpl>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        let propagator_id = self.propagators.next_id();
        let constructor_context = PropagatorConstructorContext::new(propagator_id, self);
        let propagator = constructor.create(constructor_context);

        let priority = propagator.priority();
        let handle = self.propagators.push(propagator);
        gourd_assert_eq_simple!(propagator_id, handle.propagator_id());

        self.propagator_queue
            .enqueue_propagator(handle.propagator_id(), priority);

        handle
    }

    pub fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self.propagators.get(handle)
    }

    pub fn get_propagator_mut<P: Propagator>(
        &mut self,
        handle: PropagatorHandle<P>,
    ) -> Option<&mut P> {
        self.propagators.get_mut(handle)
    }

    /// Whether every propagator reports its relation to hold under the current domains.
    pub(crate) fn all_propagators_satisfied(&self) -> bool {
        let context = PropagationContext::new(&self.assignments);
        self.propagators
            .iter()
            .all(|propagator| propagator.is_satisfied(context))
    }
}

// Checkpoints and propagation.
impl State {
    /// Makes `predicate` true, returning whether a domain changed. The propagators watching the
    /// changed domain are notified in the next call to [`State::propagate_to_fixed_point`].
    pub fn post(&mut self, predicate: Predicate) -> Result<bool, EmptyDomain> {
        self.assignments.post_predicate(predicate)
    }

    pub fn new_checkpoint(&mut self) {
        gourd_assert_simple!(
            self.propagator_queue.is_empty(),
            "Can only create a new checkpoint when all propagation has occurred"
        );
        self.assignments.new_checkpoint();
        self.trailed_values.new_checkpoint();
    }

    /// Restores the state at `checkpoint`: all domains and trailed values are restored to what
    /// they were when `checkpoint` was the current checkpoint, and every propagator is
    /// synchronised.
    pub fn restore_to(&mut self, checkpoint: usize) {
        gourd_assert_simple!(checkpoint <= self.get_checkpoint());

        if checkpoint == self.get_checkpoint() {
            return;
        }

        self.assignments.synchronise(checkpoint);
        self.trailed_values.synchronise(checkpoint);
        self.propagator_queue.clear();

        for propagator in self.propagators.iter_mut() {
            propagator.synchronise(PropagationContext::new(&self.assignments));
        }
    }

    /// Propagates until no propagator can remove any further values, or until a propagator
    /// detects an inconsistency. A contradiction does not backtrack; that is up to the caller.
    pub fn propagate_to_fixed_point(&mut self) -> PropagationStatusCP {
        // The initial domain events are due to decisions or posted predicates.
        self.notify_propagators();

        while let Some(propagator_id) = self.propagator_queue.pop() {
            self.propagate(propagator_id)?;
        }

        Ok(())
    }

    fn propagate(&mut self, propagator_id: PropagatorId) -> PropagationStatusCP {
        self.statistics.num_propagator_calls += 1;

        let propagator = &mut self.propagators[propagator_id];
        trace!("propagating {} ({propagator_id})", propagator.name());

        let context = PropagationContextMut::new(
            &mut self.trailed_values,
            &mut self.assignments,
            propagator_id,
        );

        match propagator.propagate(context) {
            Ok(()) => {
                self.notify_propagators();
                Ok(())
            }
            Err(contradiction) => {
                trace!("{contradiction}");
                self.statistics.num_contradictions += 1;

                for &domain_id in self.watch_list.scope(propagator_id) {
                    self.weights[domain_id] += 1;
                }

                Err(contradiction)
            }
        }
    }

    /// Notifies the watchers of every domain event that happened since the last call, enqueueing
    /// the propagators that ask for it.
    fn notify_propagators(&mut self) {
        self.event_buffer
            .extend(self.assignments.drain_domain_events());

        for (event, domain_id) in self.event_buffer.drain(..) {
            for &PropagatorVarId {
                propagator,
                variable,
            } in self.watch_list.get_affected_propagators(event, domain_id)
            {
                let context = NotificationContext::new(&mut self.trailed_values, &self.assignments);
                let decision = self.propagators[propagator].notify(context, variable, event);

                if decision == EnqueueDecision::Enqueue {
                    let priority = self.propagators[propagator].priority();
                    self.propagator_queue
                        .enqueue_propagator(propagator, priority);
                }
            }
        }
    }
}

impl HasAssignments for State {
    fn assignments(&self) -> &Assignments {
        &self.assignments
    }
}
