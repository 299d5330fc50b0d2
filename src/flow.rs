//! This module provides a generic implementation of the successive shortest path algorithm for
//! minimum cost flow problems.
//!
//! The basic idea is to repeatedly search a shortest path (in terms of arc costs) from source to
//! sink in the residual graph and push as much flow as possible along it, until the sink is not
//! reachable anymore. To allow the use of Dijkstra's algorithm for the path searches, even though
//! the residual graph contains negative-cost reverse arcs after the first augmentation, each node
//! carries a potential and the search runs on the reduced arc costs
//! `cost + potential[from] - potential[to]` (Johnson's technique). After every augmentation the
//! calculated distances are added onto the potentials, which keeps all reduced costs non-negative.
//!
//! Since all arc capacities are integers and each augmentation pushes an integral amount of flow,
//! the resulting flow is integral. On a transportation network this makes the flow directly
//! decodable into an assignment.

use num_traits::{PrimInt, Signed};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Index of a node in a `Graph`
pub type NodeId = usize;
/// Index of an arc in a `Graph`, as returned by `Graph::add_edge()`
pub type EdgeId = usize;
/// Capacity of an arc. u32 is plenty: unit arcs dominate our networks and the largest capacities
/// are the per-topic limits.
pub type Capacity = u32;

/// A single arc of the residual graph. Every arc added via `add_edge()` is stored as a pair of an
/// arc with the full capacity and a reverse arc with capacity 0 and negated cost. Pushing flow
/// moves capacity from one arc of the pair to the other.
struct Edge<C> {
    to: NodeId,
    cap: Capacity,
    cost: C,
    /// Index of the paired reverse arc in `Graph::edges`
    rev: EdgeId,
}

/// A directed flow network with arc costs, stored as adjacency lists into a single arc vector.
///
/// The cost type is generic over the signed primitive integer types, so users can pick a width
/// that surely fits the length of the most expensive possible path.
pub struct Graph<C> {
    adjacency: Vec<Vec<EdgeId>>,
    edges: Vec<Edge<C>>,
}

/// Entry of the Dijkstra priority queue. Ordered by distance first, node id second, to make the
/// search order (and thereby the chosen path among equally short ones) deterministic.
#[derive(Clone, Copy, PartialEq, Eq)]
struct State<C> {
    dist: C,
    node: NodeId,
}

impl<C: Ord> Ord for State<C> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.dist
            .cmp(&other.dist)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl<C: Ord> PartialOrd for State<C> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: PrimInt + Signed> Graph<C> {
    /// Create a new graph with `num_nodes` nodes and no arcs
    pub fn new(num_nodes: usize) -> Self {
        Graph {
            adjacency: vec![Vec::new(); num_nodes],
            edges: Vec::new(),
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of stored arcs, including the implicitly created reverse arcs
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Add an arc from `from` to `to` with the given capacity and cost, together with its reverse
    /// arc. Returns the id of the (forward) arc, to be used with `flow()` after optimization.
    ///
    /// Arcs are scanned in insertion order during the shortest path searches, so the insertion
    /// order of parallel-cost arcs decides which one is used first.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, cap: Capacity, cost: C) -> EdgeId {
        let id = self.edges.len();
        self.edges.push(Edge {
            to,
            cap,
            cost,
            rev: id + 1,
        });
        self.adjacency[from].push(id);
        self.edges.push(Edge {
            to: from,
            cap: 0,
            cost: -cost,
            rev: id,
        });
        self.adjacency[to].push(id + 1);
        id
    }

    /// The cost of the given arc
    pub fn cost(&self, edge: EdgeId) -> C {
        self.edges[edge].cost
    }

    /// The remaining (residual) capacity of the given arc
    pub fn residual(&self, edge: EdgeId) -> Capacity {
        self.edges[edge].cap
    }

    /// The amount of flow currently routed through the given forward arc, i.e. the capacity that
    /// moved over to its reverse arc
    pub fn flow(&self, edge: EdgeId) -> Capacity {
        self.edges[self.edges[edge].rev].cap
    }

    /// Route the maximum possible flow from `source` to `sink` at minimum total cost.
    ///
    /// Returns the achieved flow value and its total cost. The caller has to compare the flow
    /// value against the demanded one to detect infeasibility; the graph is left in its saturated
    /// state, so saturated arcs can be read back via `flow()`.
    pub fn min_cost_flow(&mut self, source: NodeId, sink: NodeId) -> (Capacity, C) {
        let num_nodes = self.adjacency.len();
        // Half of the maximum value, so a relaxation sum cannot overflow
        let inf = C::max_value() >> 1;

        let mut potential = vec![C::zero(); num_nodes];
        let mut dist = vec![inf; num_nodes];
        let mut prev_node = vec![0 as NodeId; num_nodes];
        let mut prev_edge = vec![0 as EdgeId; num_nodes];
        let mut total_flow: Capacity = 0;
        let mut total_cost = C::zero();

        loop {
            // Dijkstra on the reduced costs
            dist.iter_mut().for_each(|d| *d = inf);
            dist[source] = C::zero();
            let mut queue = BinaryHeap::new();
            queue.push(Reverse(State {
                dist: C::zero(),
                node: source,
            }));
            while let Some(Reverse(State { dist: d, node: v })) = queue.pop() {
                if dist[v] < d {
                    continue;
                }
                for &edge_id in self.adjacency[v].iter() {
                    let edge = &self.edges[edge_id];
                    if edge.cap == 0 {
                        continue;
                    }
                    let new_dist = d + edge.cost + potential[v] - potential[edge.to];
                    if new_dist < dist[edge.to] {
                        dist[edge.to] = new_dist;
                        prev_node[edge.to] = v;
                        prev_edge[edge.to] = edge_id;
                        queue.push(Reverse(State {
                            dist: new_dist,
                            node: edge.to,
                        }));
                    }
                }
            }

            // Sink not reachable anymore: the maximum flow is routed
            if dist[sink] >= inf {
                break;
            }

            for v in 0..num_nodes {
                if dist[v] < inf {
                    potential[v] = potential[v] + dist[v];
                }
            }

            // Find the bottleneck capacity of the path and push that much flow along it
            let mut push = Capacity::MAX;
            let mut v = sink;
            while v != source {
                push = push.min(self.edges[prev_edge[v]].cap);
                v = prev_node[v];
            }
            let mut v = sink;
            while v != source {
                let edge_id = prev_edge[v];
                let rev = self.edges[edge_id].rev;
                self.edges[edge_id].cap -= push;
                self.edges[rev].cap += push;
                v = prev_node[v];
            }

            total_flow += push;
            // With zero-initialized potentials and non-negative costs, potential[sink] equals the
            // real (non-reduced) cost of the path used in this iteration.
            total_cost = total_cost + potential[sink] * C::from(push).unwrap();
        }

        (total_flow, total_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::Graph;

    #[test]
    fn test_single_path() {
        // 0 --(2)--> 1 --(1)--> 2, plus a direct, more expensive arc 0 --(5)--> 2
        let mut graph = Graph::<i64>::new(3);
        let cheap_a = graph.add_edge(0, 1, 1, 2);
        let cheap_b = graph.add_edge(1, 2, 1, 1);
        let expensive = graph.add_edge(0, 2, 1, 5);

        let (flow, cost) = graph.min_cost_flow(0, 2);
        assert_eq!(flow, 2);
        assert_eq!(cost, 8);
        assert_eq!(graph.flow(cheap_a), 1);
        assert_eq!(graph.flow(cheap_b), 1);
        assert_eq!(graph.flow(expensive), 1);
    }

    #[test]
    fn test_prefers_cheapest_path() {
        let mut graph = Graph::<i64>::new(4);
        let cheap = graph.add_edge(0, 1, 1, 1);
        let expensive = graph.add_edge(0, 2, 1, 3);
        graph.add_edge(1, 3, 1, 0);
        graph.add_edge(2, 3, 1, 0);

        let (flow, cost) = graph.min_cost_flow(0, 3);
        assert_eq!(flow, 2);
        assert_eq!(cost, 4);
        assert_eq!(graph.flow(cheap), 1);
        assert_eq!(graph.flow(expensive), 1);
        assert_eq!(graph.residual(cheap), 0);
    }

    #[test]
    fn test_augmentation_through_reverse_arc() {
        // The first augmentation routes a via x. The only arc of b also leads to x, so the second
        // augmentation must displace a onto y through the reverse arc of a->x.
        let mut graph = Graph::<i64>::new(6);
        let (s, a, b, x, y, t) = (0, 1, 2, 3, 4, 5);
        graph.add_edge(s, a, 1, 0);
        graph.add_edge(s, b, 1, 0);
        let a_x = graph.add_edge(a, x, 1, 1);
        let a_y = graph.add_edge(a, y, 1, 2);
        let b_x = graph.add_edge(b, x, 1, 4);
        graph.add_edge(x, t, 1, 0);
        graph.add_edge(y, t, 1, 0);

        let (flow, cost) = graph.min_cost_flow(s, t);
        assert_eq!(flow, 2);
        assert_eq!(cost, 6);
        assert_eq!(graph.flow(a_x), 0);
        assert_eq!(graph.flow(a_y), 1);
        assert_eq!(graph.flow(b_x), 1);
    }

    #[test]
    fn test_unreachable_sink() {
        let mut graph = Graph::<i64>::new(4);
        graph.add_edge(0, 1, 1, 1);
        graph.add_edge(2, 3, 1, 1);

        let (flow, cost) = graph.min_cost_flow(0, 3);
        assert_eq!(flow, 0);
        assert_eq!(cost, 0);
    }

    #[test]
    fn test_partial_flow() {
        // Source offers two units, but only one can reach the sink
        let mut graph = Graph::<i64>::new(3);
        graph.add_edge(0, 1, 2, 1);
        graph.add_edge(1, 2, 1, 1);

        let (flow, _) = graph.min_cost_flow(0, 2);
        assert_eq!(flow, 1);
    }

    #[test]
    fn test_bottleneck_capacity() {
        let mut graph = Graph::<i64>::new(3);
        let first = graph.add_edge(0, 1, 3, 1);
        let second = graph.add_edge(1, 2, 2, 1);

        let (flow, cost) = graph.min_cost_flow(0, 2);
        assert_eq!(flow, 2);
        assert_eq!(cost, 4);
        assert_eq!(graph.flow(first), 2);
        assert_eq!(graph.residual(first), 1);
        assert_eq!(graph.flow(second), 2);
    }
}
