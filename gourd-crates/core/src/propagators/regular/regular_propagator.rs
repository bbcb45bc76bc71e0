use log::trace;

use super::layered_graph::EdgeId;
use super::layered_graph::LayeredGraph;
use super::Automaton;
use super::RegularOptions;
use super::SupportStrategy;
use crate::basic_types::PropagationStatusCP;
use crate::containers::HashMap;
use crate::create_statistics_struct;
use crate::engine::domains::DomainEvent;
use crate::engine::domains::IntervalDomain;
use crate::engine::variables::IntegerVariable;
use crate::propagation::DomainEvents;
use crate::propagation::EnqueueDecision;
use crate::propagation::LocalId;
use crate::propagation::NotificationContext;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Priority;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// The [`PropagatorConstructor`] for the [`RegularPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct RegularPropagatorArgs<Var> {
    pub(crate) variables: Box<[Var]>,
    pub(crate) automaton: Automaton,
    pub(crate) options: RegularOptions,
}

impl<Var> PropagatorConstructor for RegularPropagatorArgs<Var>
where
    Var: IntegerVariable + 'static,
{
    type PropagatorImpl = RegularPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let RegularPropagatorArgs {
            variables,
            automaton,
            options,
        } = self;

        let domains = variables
            .iter()
            .enumerate()
            .map(|(i, variable)| {
                context.register(variable.clone(), DomainEvents::ANY_INT, LocalId::from(i as u32));
                IntervalDomain::from_values(context.iterate_domain(variable))
            })
            .collect::<Vec<_>>();

        let graph = LayeredGraph::new(&automaton, &domains);

        let use_cached_supports = match options.support_strategy {
            SupportStrategy::Rescan => false,
            SupportStrategy::CachedSupport => true,
            SupportStrategy::Automatic { threshold } => graph.num_nodes() > threshold,
        };
        let supports = if use_cached_supports {
            Supports::Cached(vec![HashMap::default(); variables.len()])
        } else {
            Supports::Rescan
        };

        // The first propagation checks every layer against the current domains.
        let dirty_layers = (0..variables.len()).collect();
        let is_dirty = vec![true; variables.len()];

        RegularPropagator {
            variables,
            automaton,
            graph,
            supports,
            dirty_layers,
            is_dirty,
            statistics: RegularStatistics::default(),
        }
    }
}

create_statistics_struct!(RegularStatistics {
    num_edges_removed: u64,
    num_nodes_disabled: u64,
    num_values_removed: u64,
});

/// The per-layer bookkeeping of the [`SupportStrategy`] in use.
#[derive(Clone, Debug)]
enum Supports {
    Rescan,
    /// For every layer, the last edge found to support each value.
    Cached(Vec<HashMap<i32, EdgeId>>),
}

impl Supports {
    /// The values of `domain` without an active edge labelled with them in `layer`.
    fn unsupported_values(
        &mut self,
        graph: &LayeredGraph,
        layer: usize,
        domain: &[i32],
    ) -> Vec<i32> {
        match self {
            Supports::Rescan => {
                let supported = graph.supported_values(layer);
                domain
                    .iter()
                    .copied()
                    .filter(|&value| !supported.contains_value(value))
                    .collect()
            }
            Supports::Cached(cache) => domain
                .iter()
                .copied()
                .filter(|&value| {
                    if cache[layer]
                        .get(&value)
                        .is_some_and(|&edge| graph.is_active(edge))
                    {
                        return false;
                    }

                    let new_support = graph.layer(layer).iter().copied().find(|&edge| {
                        graph.is_active(edge) && graph.label(edge).contains_value(value)
                    });

                    match new_support {
                        Some(edge) => {
                            let _ = cache[layer].insert(value, edge);
                            false
                        }
                        None => true,
                    }
                })
                .collect(),
        }
    }
}

/// Propagator for the constraint `automaton accepts [variables[0], ..., variables[n - 1]]`.
///
/// The propagator is domain consistent. Changes to a domain only cause the edges of the
/// corresponding layer to be checked; removed edges are swept through the graph and only the
/// layers in which edges disappeared have their domains pruned.
#[derive(Clone, Debug)]
pub(crate) struct RegularPropagator<Var> {
    variables: Box<[Var]>,
    automaton: Automaton,
    graph: LayeredGraph,
    supports: Supports,

    /// The layers whose variables changed since the last propagation.
    dirty_layers: Vec<usize>,
    is_dirty: Vec<bool>,

    statistics: RegularStatistics,
}

impl<Var: IntegerVariable + 'static> RegularPropagator<Var> {
    fn domain(&self, context: &PropagationContextMut, layer: usize) -> Vec<i32> {
        context.iterate_domain(&self.variables[layer]).collect()
    }
}

impl<Var: IntegerVariable + 'static> Propagator for RegularPropagator<Var> {
    fn name(&self) -> &str {
        "Regular"
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }

    fn notify(
        &mut self,
        _context: NotificationContext,
        local_id: LocalId,
        _event: DomainEvent,
    ) -> EnqueueDecision {
        let layer = local_id.unpack() as usize;
        if !self.is_dirty[layer] {
            self.is_dirty[layer] = true;
            self.dirty_layers.push(layer);
        }

        EnqueueDecision::Enqueue
    }

    fn synchronise(&mut self, context: PropagationContext) {
        self.graph.synchronise(context.get_checkpoint());
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if !self.graph.is_feasible() {
            return Err(context.contradiction());
        }

        self.graph.align_to(context.get_checkpoint());

        let mut touched_layers = vec![false; self.variables.len()];
        let dirty_layers = std::mem::take(&mut self.dirty_layers);

        for &layer in dirty_layers.iter() {
            self.is_dirty[layer] = false;
            touched_layers[layer] = true;

            let domain = self.domain(&context, layer);
            let invalid_edges = self
                .graph
                .layer(layer)
                .iter()
                .copied()
                .filter(|&edge| {
                    self.graph.is_active(edge)
                        && !domain
                            .iter()
                            .any(|&value| self.graph.label(edge).contains_value(value))
                })
                .collect::<Vec<_>>();

            for edge in invalid_edges {
                self.statistics.num_edges_removed += 1;
                let num_disabled = self.graph.remove_edge(edge, &mut touched_layers);
                self.statistics.num_nodes_disabled += num_disabled as u64;
            }
        }

        if !self.graph.is_feasible() {
            trace!("no accepting path is left in the unfolded automaton");
            return Err(context.contradiction());
        }

        for layer in 0..self.variables.len() {
            if !touched_layers[layer] {
                continue;
            }

            let domain = self.domain(&context, layer);
            let unsupported = self
                .supports
                .unsupported_values(&self.graph, layer, &domain);

            for value in unsupported {
                self.statistics.num_values_removed += 1;
                context.remove(&self.variables[layer], value)?;
            }
        }

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        if !self.variables.iter().all(|variable| context.is_fixed(variable)) {
            return false;
        }

        let word = self
            .variables
            .iter()
            .map(|variable| context.lower_bound(variable))
            .collect::<Vec<_>>();
        self.automaton.accepts(&word)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::Rng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::cp::test_solver::TestSolver;
    use crate::predicate;
    use crate::variables::DomainId;

    /// Accepts binary strings without two consecutive ones.
    fn no_consecutive_ones() -> Automaton {
        let mut automaton = Automaton::new(2, 0, [0, 1]).expect("valid");
        automaton
            .add_transition(0, 0, IntervalDomain::from_values([0]))
            .expect("valid");
        automaton
            .add_transition(0, 1, IntervalDomain::from_values([1]))
            .expect("valid");
        automaton
            .add_transition(1, 0, IntervalDomain::from_values([0]))
            .expect("valid");
        automaton
    }

    fn regular(
        solver: &mut TestSolver,
        length: usize,
        strategy: SupportStrategy,
    ) -> Vec<DomainId> {
        let variables = (0..length)
            .map(|_| solver.new_variable(0, 2))
            .collect::<Vec<_>>();

        let _ = solver
            .new_propagator(RegularPropagatorArgs {
                variables: variables.clone().into(),
                automaton: no_consecutive_ones(),
                options: RegularOptions {
                    support_strategy: strategy,
                },
            })
            .expect("feasible");

        variables
    }

    #[test]
    fn values_without_a_transition_are_removed() {
        for strategy in [SupportStrategy::Rescan, SupportStrategy::CachedSupport] {
            let mut solver = TestSolver::default();
            let variables = regular(&mut solver, 4, strategy);

            for &variable in variables.iter() {
                solver.assert_bounds(variable, 0, 1);
            }
        }
    }

    #[test]
    fn a_one_forces_zeros_around_it() {
        for strategy in [SupportStrategy::Rescan, SupportStrategy::CachedSupport] {
            let mut solver = TestSolver::default();
            let variables = regular(&mut solver, 4, strategy);

            solver.new_checkpoint();
            solver.post(predicate![variables[1] == 1]).expect("feasible");
            solver.assert_bounds(variables[0], 0, 0);
            solver.assert_bounds(variables[2], 0, 0);
            solver.assert_bounds(variables[3], 0, 1);

            solver.synchronise(0);
            for &variable in variables.iter() {
                solver.assert_bounds(variable, 0, 1);
            }

            solver.post(predicate![variables[2] == 1]).expect("feasible");
            solver.assert_bounds(variables[1], 0, 0);
            solver.assert_bounds(variables[3], 0, 0);
            solver.assert_bounds(variables[0], 0, 1);
        }
    }

    #[test]
    fn an_unreachable_final_state_is_a_contradiction() {
        let mut solver = TestSolver::default();
        let variables = [solver.new_variable(1, 1), solver.new_variable(1, 1)];

        let result = solver.new_propagator(RegularPropagatorArgs {
            variables: variables.into(),
            automaton: no_consecutive_ones(),
            options: RegularOptions::default(),
        });

        assert!(result.is_err());
    }

    #[test]
    fn two_adjacent_ones_fail_after_posting() {
        let mut solver = TestSolver::default();
        let variables = regular(&mut solver, 3, SupportStrategy::Rescan);

        solver.new_checkpoint();
        solver.post(predicate![variables[0] == 1]).expect("feasible");
        assert!(solver.post(predicate![variables[1] == 1]).is_err());

        solver.synchronise(0);
        solver.post(predicate![variables[1] == 1]).expect("feasible");
        solver.assert_bounds(variables[0], 0, 0);
    }

    /// Over `{0, 1, 2}`: a 1 is followed by a 1 or by a 0 or 2 which ends the block, and a block
    /// end is followed by anything.
    fn blocks() -> Automaton {
        let mut automaton = Automaton::new(3, 0, [0, 2]).expect("valid");
        for (from, to, values) in [
            (0, 0, vec![0]),
            (0, 1, vec![1]),
            (1, 1, vec![1]),
            (1, 2, vec![0, 2]),
            (2, 0, vec![0, 1, 2]),
        ] {
            automaton
                .add_transition(from, to, IntervalDomain::from_values(values))
                .expect("valid");
        }
        automaton
    }

    #[test]
    fn both_support_strategies_prune_the_same_values() {
        for seed in 0..30 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut solvers = [SupportStrategy::Rescan, SupportStrategy::CachedSupport].map(
                |strategy| {
                    let mut solver = TestSolver::default();
                    let variables = (0..6)
                        .map(|_| solver.new_variable(0, 2))
                        .collect::<Vec<_>>();
                    let _ = solver
                        .new_propagator(RegularPropagatorArgs {
                            variables: variables.clone().into(),
                            automaton: blocks(),
                            options: RegularOptions {
                                support_strategy: strategy,
                            },
                        })
                        .expect("feasible");
                    (solver, variables)
                },
            );

            let mut depth = 0;
            for _ in 0..20 {
                if depth > 0 && rng.gen_bool(0.3) {
                    depth -= 1;
                    for (solver, _) in solvers.iter_mut() {
                        solver.synchronise(depth);
                    }
                    continue;
                }

                let layer = rng.gen_range(0..6);
                let value = rng.gen_range(0..=2);
                let [(rescan, variables), (cached, _)] = &mut solvers;
                let variable = variables[layer];
                if !rescan.contains(variable, value)
                    || rescan.lower_bound(variable) == rescan.upper_bound(variable)
                {
                    continue;
                }

                depth += 1;
                rescan.new_checkpoint();
                cached.new_checkpoint();
                let rescan_result = rescan.post(predicate![variable != value]);
                let cached_result = cached.post(predicate![variable != value]);
                assert_eq!(rescan_result.is_ok(), cached_result.is_ok(), "seed {seed}");

                if rescan_result.is_err() {
                    depth -= 1;
                    rescan.synchronise(depth);
                    cached.synchronise(depth);
                }

                for &variable in variables.iter() {
                    for value in 0..=2 {
                        assert_eq!(
                            rescan.contains(variable, value),
                            cached.contains(variable, value),
                            "seed {seed}"
                        );
                    }
                }
            }
        }
    }
}
