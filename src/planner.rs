use log::{info, trace};

use crate::dijkstra::{shortest_paths, PathImproved, SearchStats, SearchTree};
use crate::frontier::{Frontier, QueueKind};
use crate::graph::{Cost, Graph, Labeled, VertexId};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RouteStop {
    pub vertex: VertexId,
    /// Cost from the start of the route, not from the previous stop.
    pub cost: Cost,
}

/// Ordered stops from source to goal. Empty when there is no route.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    stops: Vec<RouteStop>,
}

impl Route {
    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn total_cost(&self) -> Option<Cost> {
        self.stops.last().map(|s| s.cost)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteStop> {
        self.stops.iter()
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a RouteStop;
    type IntoIter = std::slice::Iter<'a, RouteStop>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.iter()
    }
}

/// Answers route queries on a fixed graph, rerunning Dijkstra only when the source changes.
pub struct RoutePlanner<'g, P> {
    graph: &'g Graph<P>,
    queue: Box<dyn Frontier>,
    tree: SearchTree,
    runs: usize,
    last_stats: SearchStats,
}

impl<'g, P> RoutePlanner<'g, P> {
    pub fn new(graph: &'g Graph<P>) -> Self {
        Self::with_queue(graph, QueueKind::default())
    }

    pub fn with_queue(graph: &'g Graph<P>, kind: QueueKind) -> Self {
        Self {
            graph,
            queue: kind.create(),
            tree: SearchTree::new(),
            runs: 0,
            last_stats: SearchStats::default(),
        }
    }

    pub fn graph(&self) -> &'g Graph<P> {
        self.graph
    }

    /// Number of full Dijkstra runs so far.
    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn last_stats(&self) -> SearchStats {
        self.last_stats
    }

    /// Cost of `vertex` in the current search tree.
    pub fn cost(&self, vertex: VertexId) -> Cost {
        self.tree.cost(vertex)
    }

    pub fn compute_route(&mut self, source_key: &str, goal_key: &str) -> Route {
        let source = self.graph.vertex_id(source_key);
        let goal = self.graph.vertex_id(goal_key);
        self.compute_route_between(source, goal)
    }

    pub fn compute_route_between(&mut self, source: Option<VertexId>, goal: Option<VertexId>) -> Route {
        let (Some(source), Some(goal)) = (source, goal) else {
            return Route::default();
        };
        if source >= self.graph.len() || goal >= self.graph.len() {
            return Route::default();
        }
        if self.tree.source() != Some(source) {
            self.run_from(source);
        }
        let stops = self
            .tree
            .path_to(goal)
            .into_iter()
            .map(|vertex| RouteStop {
                vertex,
                cost: self.tree.cost(vertex),
            })
            .collect();
        Route { stops }
    }

    fn run_from(&mut self, source: VertexId) {
        let graph = self.graph;
        info!(
            "*** Compute shortest paths from {} using Dijkstra's algorithm",
            graph.get(source).key()
        );
        self.last_stats = shortest_paths(graph, source, self.queue.as_mut(), &mut self.tree, |p| {
            trace_improvement(graph, &p)
        });
        self.runs += 1;
    }
}

impl<P: Labeled> RoutePlanner<'_, P> {
    /// Like [`RoutePlanner::compute_route`], with vertices looked up by label.
    pub fn compute_route_by_name(&mut self, source_name: &str, goal_name: &str) -> Route {
        let source = self.graph.find(source_name);
        let goal = self.graph.find(goal_name);
        self.compute_route_between(source, goal)
    }
}

fn trace_improvement<P>(graph: &Graph<P>, p: &PathImproved<'_>) {
    let to = graph.get(p.edge.to).key();
    let via = graph.get(p.edge.from).key();
    match p.old_parent {
        None => trace!("First path to {} ({:.1} km) via {}", to, p.new_cost, via),
        Some(old) => trace!(
            "Shorter path to {} ({:.1} km via {} instead of {:.1} km via {})",
            to,
            p.new_cost,
            via,
            p.old_cost,
            graph.get(old).key()
        ),
    }
}
