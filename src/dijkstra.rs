use crate::frontier::Frontier;
use crate::graph::{Cost, Edge, Graph, VertexId};

/// Per-vertex search state of one run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchNode {
    pub cost: Cost,
    pub parent: Option<VertexId>,
    pub visited: bool,
}

impl Default for SearchNode {
    fn default() -> Self {
        Self {
            cost: Cost::INFINITY,
            parent: None,
            visited: false,
        }
    }
}

/// Reported to the observer whenever a strictly cheaper path to `edge.to` is found.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathImproved<'a> {
    pub edge: &'a Edge,
    pub old_cost: Cost,
    pub new_cost: Cost,
    pub old_parent: Option<VertexId>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub extracted: usize,
    pub stale: usize,
    pub relaxed: usize,
}

/// Shortest path tree from one source, kept beside the graph rather than in its vertices.
#[derive(Clone, Debug, Default)]
pub struct SearchTree {
    source: Option<VertexId>,
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<VertexId> {
        self.source
    }

    pub fn node(&self, vertex: VertexId) -> Option<&SearchNode> {
        self.nodes.get(vertex)
    }

    /// Cost from the source, infinite if unreachable or unknown.
    pub fn cost(&self, vertex: VertexId) -> Cost {
        self.nodes.get(vertex).map_or(Cost::INFINITY, |n| n.cost)
    }

    pub fn parent(&self, vertex: VertexId) -> Option<VertexId> {
        self.nodes.get(vertex).and_then(|n| n.parent)
    }

    // Resets in place so the allocation survives between runs.
    fn reset(&mut self, source: VertexId, len: usize) {
        self.source = Some(source);
        self.nodes.clear();
        self.nodes.resize(len, SearchNode::default());
    }

    /// Vertices from the source to `goal`, empty if `goal` was not reached.
    pub fn path_to(&self, goal: VertexId) -> Vec<VertexId> {
        if !self.cost(goal).is_finite() {
            return Vec::new();
        }
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}

/// Dijkstra from `source` to all vertices of `graph`, writing costs and parents into `tree`.
///
/// `observer` is called on every strict improvement, before the tree is updated, so it
/// still sees the previous cost and parent.
pub fn shortest_paths<P, F>(
    graph: &Graph<P>,
    source: VertexId,
    queue: &mut dyn Frontier,
    tree: &mut SearchTree,
    mut observer: F,
) -> SearchStats
where
    F: FnMut(PathImproved<'_>),
{
    let mut stats = SearchStats::default();
    tree.reset(source, graph.len());
    queue.clear();

    tree.nodes[source].cost = 0.0;
    queue.update(source, 0.0);

    while let Some((u, _)) = queue.extract_min() {
        stats.extracted += 1;
        // A stale copy can survive a decrease-key; u is already settled then.
        if tree.nodes[u].visited {
            stats.stale += 1;
            continue;
        }
        tree.nodes[u].visited = true;
        let u_cost = tree.nodes[u].cost;

        for edge in graph.get(u).outgoing_edges() {
            assert!(
                edge.cost >= 0.0,
                "negative edge cost {} from {} to {}",
                edge.cost,
                edge.from,
                edge.to
            );
            let v = edge.to;
            let alt_cost = u_cost + edge.cost;
            if alt_cost < tree.nodes[v].cost {
                observer(PathImproved {
                    edge,
                    old_cost: tree.nodes[v].cost,
                    new_cost: alt_cost,
                    old_parent: tree.nodes[v].parent,
                });
                tree.nodes[v].cost = alt_cost;
                tree.nodes[v].parent = Some(u);
                queue.update(v, alt_cost);
                stats.relaxed += 1;
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::{LazyFrontier, QueueKind};
    use ordered_float::OrderedFloat;
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;

    // Never removes on update, so superseded entries stay queued.
    #[derive(Default)]
    struct PushOnlyFrontier {
        heap: BinaryHeap<Reverse<(OrderedFloat<Cost>, VertexId)>>,
    }

    impl Frontier for PushOnlyFrontier {
        fn update(&mut self, vertex: VertexId, cost: Cost) {
            self.heap.push(Reverse((OrderedFloat(cost), vertex)));
        }

        fn extract_min(&mut self) -> Option<(VertexId, Cost)> {
            self.heap.pop().map(|Reverse((cost, v))| (v, cost.into_inner()))
        }

        fn contains(&self, vertex: VertexId) -> bool {
            self.heap.iter().any(|Reverse((_, v))| *v == vertex)
        }

        fn len(&self) -> usize {
            self.heap.len()
        }

        fn clear(&mut self) {
            self.heap.clear();
        }
    }

    fn shortcuts() -> Graph<()> {
        let mut g = Graph::new();
        for key in ["S", "A", "B", "C", "D"] {
            g.add_vertex(key, ()).unwrap();
        }
        g.add_edge("S", "A", 1.0).unwrap();
        g.add_edge("S", "B", 10.0).unwrap();
        g.add_edge("S", "C", 20.0).unwrap();
        g.add_edge("A", "B", 1.0).unwrap();
        g.add_edge("A", "C", 15.0).unwrap();
        g.add_edge("B", "C", 1.0).unwrap();
        g.add_edge("C", "D", 1.0).unwrap();
        g
    }

    fn triangle() -> Graph<()> {
        let mut g = Graph::new();
        for key in ["A", "B", "C"] {
            g.add_vertex(key, ()).unwrap();
        }
        g.add_edge("A", "B", 5.0).unwrap();
        g.add_edge("B", "C", 3.0).unwrap();
        g.add_edge("A", "C", 10.0).unwrap();
        g
    }

    #[test]
    fn it_works() {
        let g = triangle();
        let mut tree = SearchTree::new();
        shortest_paths(&g, 0, &mut LazyFrontier::new(), &mut tree, |_| {});
        assert_eq!(tree.cost(0), 0.0);
        assert_eq!(tree.cost(1), 5.0);
        assert_eq!(tree.cost(2), 8.0);
        assert_eq!(tree.path_to(2), vec![0, 1, 2]);
        assert_eq!(tree.path_to(0), vec![0]);
        assert!(tree.nodes.iter().all(|n| n.visited));
    }

    #[test]
    fn unreachable_keeps_infinity() {
        let mut g = triangle();
        g.add_vertex("D", ()).unwrap();
        let mut tree = SearchTree::new();
        shortest_paths(&g, 0, &mut LazyFrontier::new(), &mut tree, |_| {});
        assert_eq!(tree.cost(3), Cost::INFINITY);
        assert_eq!(tree.parent(3), None);
        assert!(tree.path_to(3).is_empty());
    }

    #[test]
    fn observer_sees_improvements() {
        let g = triangle();
        let mut tree = SearchTree::new();
        let mut seen = Vec::new();
        let stats = shortest_paths(&g, 0, &mut LazyFrontier::new(), &mut tree, |p| {
            seen.push((p.edge.from, p.edge.to, p.old_cost, p.new_cost));
        });
        // A reaches B (5) and C (10) first, then B improves C to 8.
        assert_eq!(
            seen,
            vec![
                (0, 1, Cost::INFINITY, 5.0),
                (0, 2, Cost::INFINITY, 10.0),
                (1, 2, 10.0, 8.0),
            ]
        );
        assert_eq!(stats.relaxed, 3);
        assert_eq!(stats.extracted, 3);
        assert_eq!(stats.stale, 0);
    }

    #[test]
    fn tree_is_reset_between_runs() {
        let g = triangle();
        let mut tree = SearchTree::new();
        let mut queue = QueueKind::Indexed.create();
        shortest_paths(&g, 0, queue.as_mut(), &mut tree, |_| {});
        shortest_paths(&g, 2, queue.as_mut(), &mut tree, |_| {});
        assert_eq!(tree.source(), Some(2));
        assert_eq!(tree.cost(2), 0.0);
        assert_eq!(tree.cost(0), 8.0);
        assert_eq!(tree.path_to(0), vec![2, 1, 0]);
    }

    #[test]
    fn zero_cost_edges() {
        let mut g: Graph<()> = Graph::new();
        for key in ["A", "B", "C"] {
            g.add_vertex(key, ()).unwrap();
        }
        g.add_edge("A", "B", 0.0).unwrap();
        g.add_edge("B", "C", 0.0).unwrap();
        let mut tree = SearchTree::new();
        shortest_paths(&g, 0, &mut LazyFrontier::new(), &mut tree, |_| {});
        assert_eq!(tree.path_to(2), vec![0, 1, 2]);
        assert_eq!(tree.cost(2), 0.0);
    }

    #[test]
    fn stale_entries_are_skipped() {
        let g = shortcuts();
        let improvements = |queue: &mut dyn Frontier| {
            let mut tree = SearchTree::new();
            let mut seen = Vec::new();
            let stats = shortest_paths(&g, 0, queue, &mut tree, |p| seen.push((p.edge.from, p.edge.to, p.new_cost)));
            (tree, stats, seen)
        };
        let (lazy_tree, lazy_stats, lazy_seen) = improvements(&mut LazyFrontier::new());
        let (tree, stats, seen) = improvements(&mut PushOnlyFrontier::default());

        // B at 10, C at 20 and C at 16 are left behind by cheaper paths.
        assert_eq!(stats.stale, 3);
        assert_eq!(stats.extracted, 5 + 3);
        assert_eq!(lazy_stats.stale, 0);
        assert_eq!(stats.relaxed, lazy_stats.relaxed);
        assert_eq!(seen, lazy_seen);

        for v in 0..g.len() {
            assert_eq!(tree.cost(v), lazy_tree.cost(v));
            assert_eq!(tree.path_to(v), lazy_tree.path_to(v));
        }
        assert_eq!(tree.cost(4), 4.0);
        assert_eq!(tree.path_to(4), vec![0, 1, 2, 3, 4]);
    }
}
