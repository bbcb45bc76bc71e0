use super::Automaton;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::domains::IntervalDomain;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId {
    id: u32,
}

impl StorageKey for NodeId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        Self { id: index as u32 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EdgeId {
    id: u32,
}

impl StorageKey for EdgeId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        Self { id: index as u32 }
    }
}

/// An automaton state at a position in the sequence.
#[derive(Clone, Debug)]
struct Node {
    layer: usize,
    in_edges: Vec<EdgeId>,
    out_edges: Vec<EdgeId>,
    /// The number of active edges entering the node.
    in_degree: u32,
    /// The number of active edges leaving the node.
    out_degree: u32,
    is_active: bool,
}

/// A transition between two consecutive layers, labelled with the values of the variable at the
/// layer of `from` which allow it.
#[derive(Clone, Debug)]
struct Edge {
    from: NodeId,
    to: NodeId,
    label: IntervalDomain,
    is_active: bool,
}

/// A change to the graph which is undone when backtracking.
#[derive(Clone, Copy, Debug)]
enum Change {
    EdgeRemoved(EdgeId),
    NodeDisabled(NodeId),
}

/// The unfolding of an automaton over a sequence of `n` variables.
///
/// Layer `i` holds the states in which the automaton can be before reading variable `i`; layer
/// `n` holds the final states. Only nodes which lie on a path from the initial state to a final
/// state are created.
///
/// While the graph shrinks, every active node except the source has an active incoming edge and
/// every active node except those in the last layer has an active outgoing edge. Removing an edge
/// restores this by disabling nodes, sweeping forwards and backwards. Every change is recorded on
/// a [`Trail`] so the graph can be restored together with the domains.
#[derive(Clone, Debug)]
pub(crate) struct LayeredGraph {
    nodes: KeyedVec<NodeId, Node>,
    edges: KeyedVec<EdgeId, Edge>,
    /// The edges leaving each layer, i.e. the edges labelled with values of that variable.
    layers: Vec<Vec<EdgeId>>,
    source: Option<NodeId>,
    trail: Trail<Change>,
}

impl LayeredGraph {
    /// Unfolds `automaton` over variables with the given initial domains.
    pub(crate) fn new(automaton: &Automaton, domains: &[IntervalDomain]) -> LayeredGraph {
        let num_layers = domains.len() + 1;
        let num_states = automaton.num_states();

        let label = |layer: usize, values: &IntervalDomain| values.intersection(&domains[layer]);

        let mut reachable = vec![vec![false; num_states]; num_layers];
        reachable[0][automaton.initial_state()] = true;
        for layer in 0..domains.len() {
            for state in 0..num_states {
                if !reachable[layer][state] {
                    continue;
                }
                for transition in automaton.transitions_from(state) {
                    if !label(layer, &transition.values).is_empty() {
                        reachable[layer + 1][transition.to] = true;
                    }
                }
            }
        }

        let mut useful = vec![vec![false; num_states]; num_layers];
        for state in 0..num_states {
            useful[domains.len()][state] =
                reachable[domains.len()][state] && automaton.is_final(state);
        }
        for layer in (0..domains.len()).rev() {
            for state in 0..num_states {
                useful[layer][state] = reachable[layer][state]
                    && automaton.transitions_from(state).any(|transition| {
                        useful[layer + 1][transition.to]
                            && !label(layer, &transition.values).is_empty()
                    });
            }
        }

        let mut graph = LayeredGraph {
            nodes: KeyedVec::default(),
            edges: KeyedVec::default(),
            layers: vec![vec![]; domains.len()],
            source: None,
            trail: Trail::default(),
        };

        if !useful[0][automaton.initial_state()] {
            return graph;
        }

        let mut node_ids = vec![vec![None; num_states]; num_layers];
        for (layer, states) in useful.iter().enumerate() {
            for (state, &is_useful) in states.iter().enumerate() {
                if is_useful {
                    node_ids[layer][state] = Some(graph.nodes.push(Node {
                        layer,
                        in_edges: vec![],
                        out_edges: vec![],
                        in_degree: 0,
                        out_degree: 0,
                        is_active: true,
                    }));
                }
            }
        }
        graph.source = node_ids[0][automaton.initial_state()];

        for layer in 0..domains.len() {
            for state in 0..num_states {
                let Some(from) = node_ids[layer][state] else {
                    continue;
                };

                for transition in automaton.transitions_from(state) {
                    let Some(to) = node_ids[layer + 1][transition.to] else {
                        continue;
                    };
                    let edge_label = label(layer, &transition.values);
                    if edge_label.is_empty() {
                        continue;
                    }

                    let edge = graph.edges.push(Edge {
                        from,
                        to,
                        label: edge_label,
                        is_active: true,
                    });
                    graph.layers[layer].push(edge);
                    graph.nodes[from].out_edges.push(edge);
                    graph.nodes[from].out_degree += 1;
                    graph.nodes[to].in_edges.push(edge);
                    graph.nodes[to].in_degree += 1;
                }
            }
        }

        graph
    }

    /// Whether there is still a path from the initial state to a final state.
    pub(crate) fn is_feasible(&self) -> bool {
        self.source.is_some_and(|source| self.nodes[source].is_active)
    }

    pub(crate) fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn layer(&self, layer: usize) -> &[EdgeId] {
        &self.layers[layer]
    }

    pub(crate) fn is_active(&self, edge: EdgeId) -> bool {
        self.edges[edge].is_active
    }

    pub(crate) fn label(&self, edge: EdgeId) -> &IntervalDomain {
        &self.edges[edge].label
    }

    /// The union of the labels of the active edges in `layer`.
    pub(crate) fn supported_values(&self, layer: usize) -> IntervalDomain {
        self.layers[layer]
            .iter()
            .filter(|&&edge| self.is_active(edge))
            .fold(IntervalDomain::empty(), |supported, &edge| {
                supported.union(self.label(edge))
            })
    }

    /// Removes `edge` together with every node and edge which no longer lies on a path from the
    /// source to the last layer. Every layer in which an edge is removed is flagged in
    /// `touched_layers`.
    ///
    /// Returns the number of disabled nodes.
    pub(crate) fn remove_edge(&mut self, edge: EdgeId, touched_layers: &mut [bool]) -> usize {
        let mut num_disabled = 0;
        let mut to_remove = vec![edge];

        while let Some(edge) = to_remove.pop() {
            if !self.edges[edge].is_active {
                continue;
            }

            self.edges[edge].is_active = false;
            self.trail.push(Change::EdgeRemoved(edge));

            let Edge { from, to, .. } = self.edges[edge];
            touched_layers[self.nodes[from].layer] = true;

            self.nodes[from].out_degree -= 1;
            if self.nodes[from].out_degree == 0 && self.nodes[from].is_active {
                // Backward sweep: nothing can be reached from `from` anymore.
                num_disabled += 1;
                self.disable(from);
                to_remove.extend(self.nodes[from].in_edges.iter().copied());
            }

            self.nodes[to].in_degree -= 1;
            if self.nodes[to].in_degree == 0 && self.nodes[to].is_active {
                // Forward sweep: `to` cannot be reached anymore.
                num_disabled += 1;
                self.disable(to);
                to_remove.extend(self.nodes[to].out_edges.iter().copied());
            }
        }

        num_disabled
    }

    fn disable(&mut self, node: NodeId) {
        gourd_assert_simple!(self.nodes[node].is_active);
        self.nodes[node].is_active = false;
        self.trail.push(Change::NodeDisabled(node));
    }

    /// Opens checkpoints until the graph is at `checkpoint`, so changes made from now on are
    /// undone when backtracking below it.
    pub(crate) fn align_to(&mut self, checkpoint: usize) {
        while self.trail.get_checkpoint() < checkpoint {
            self.trail.new_checkpoint();
        }
    }

    /// Undoes every change made after `checkpoint`.
    pub(crate) fn synchronise(&mut self, checkpoint: usize) {
        if self.trail.get_checkpoint() <= checkpoint {
            return;
        }

        for change in self.trail.synchronise(checkpoint) {
            match change {
                Change::EdgeRemoved(edge) => {
                    let Edge { from, to, .. } = self.edges[edge];
                    self.edges[edge].is_active = true;
                    self.nodes[from].out_degree += 1;
                    self.nodes[to].in_degree += 1;
                }
                Change::NodeDisabled(node) => self.nodes[node].is_active = true,
            }
        }

        gourd_assert_moderate!(self.degrees_match_active_edges());
    }

    fn degrees_match_active_edges(&self) -> bool {
        self.nodes.iter().all(|node| {
            let count = |edges: &[EdgeId]| {
                edges
                    .iter()
                    .filter(|&&edge| self.edges[edge].is_active)
                    .count() as u32
            };
            count(&node.in_edges) == node.in_degree && count(&node.out_edges) == node.out_degree
        })
    }
}
