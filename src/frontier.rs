/*
Frontier of a Dijkstra run: vertices not yet settled, keyed by tentative cost.

Two backings are provided. `LazyFrontier` realizes decrease-key by removing the old
entry and pushing it again. `IndexedFrontier` keeps a position map and decreases the
key in place.
*/

use std::cmp::Reverse;

use clap::ValueEnum;
use log::trace;
use ordered_float::OrderedFloat;
use orx_priority_queue::{BinaryHeapWithMap, PriorityQueue as _, PriorityQueueDecKey as _, ResDecreaseKeyOrPush};
use priority_queue::PriorityQueue;

use crate::graph::{Cost, VertexId};

pub trait Frontier {
    /// Queues `vertex` with `cost`, replacing any entry it already has.
    /// A queued vertex may only get a lower cost.
    fn update(&mut self, vertex: VertexId, cost: Cost);

    /// Removes the vertex with the smallest cost, `None` when empty.
    fn extract_min(&mut self) -> Option<(VertexId, Cost)>;

    fn contains(&self, vertex: VertexId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum QueueKind {
    /// Binary heap, decrease-key as remove and reinsert.
    #[default]
    Lazy,
    /// Binary heap with a position map and native decrease-key.
    Indexed,
}

impl QueueKind {
    pub fn create(self) -> Box<dyn Frontier> {
        match self {
            QueueKind::Lazy => Box::new(LazyFrontier::new()),
            QueueKind::Indexed => Box::new(IndexedFrontier::new()),
        }
    }
}

// Max-heap priority, so reverse it. Equal costs pop the lower vertex id first.
type LazyPriority = Reverse<(OrderedFloat<Cost>, VertexId)>;

#[derive(Debug, Default)]
pub struct LazyFrontier {
    pq: PriorityQueue<VertexId, LazyPriority>,
}

impl LazyFrontier {
    pub fn new() -> Self {
        Self {
            pq: PriorityQueue::new(),
        }
    }
}

impl Frontier for LazyFrontier {
    fn update(&mut self, vertex: VertexId, cost: Cost) {
        if let Some((_, Reverse((old, _)))) = self.pq.remove(&vertex) {
            trace!("Remove: {} ({})", vertex, old);
        }
        self.pq.push(vertex, Reverse((OrderedFloat(cost), vertex)));
        trace!("Insert: {} ({})", vertex, cost);
    }

    fn extract_min(&mut self) -> Option<(VertexId, Cost)> {
        let (vertex, Reverse((cost, _))) = self.pq.pop()?;
        trace!("Extract min: {} ({})", vertex, cost);
        Some((vertex, cost.into_inner()))
    }

    fn contains(&self, vertex: VertexId) -> bool {
        self.pq.get(&vertex).is_some()
    }

    fn len(&self) -> usize {
        self.pq.len()
    }

    fn clear(&mut self) {
        self.pq.clear();
    }
}

#[derive(Debug)]
pub struct IndexedFrontier {
    pq: BinaryHeapWithMap<VertexId, Cost>,
}

impl Default for IndexedFrontier {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexedFrontier {
    pub fn new() -> Self {
        Self {
            pq: BinaryHeapWithMap::new(),
        }
    }
}

impl Frontier for IndexedFrontier {
    fn update(&mut self, vertex: VertexId, cost: Cost) {
        let pushed = matches!(self.pq.decrease_key_or_push(&vertex, cost), ResDecreaseKeyOrPush::Pushed);
        trace!("{}: {} ({})", if pushed { "Insert" } else { "Decrease" }, vertex, cost);
    }

    fn extract_min(&mut self) -> Option<(VertexId, Cost)> {
        let (vertex, cost) = self.pq.pop()?;
        trace!("Extract min: {} ({})", vertex, cost);
        Some((vertex, cost))
    }

    fn contains(&self, vertex: VertexId) -> bool {
        self.pq.contains(&vertex)
    }

    fn len(&self) -> usize {
        self.pq.len()
    }

    fn clear(&mut self) {
        self.pq.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(q: &mut dyn Frontier) -> Vec<(VertexId, Cost)> {
        let mut out = Vec::new();
        while let Some(entry) = q.extract_min() {
            out.push(entry);
        }
        out
    }

    fn check_decrease_key(q: &mut dyn Frontier) {
        q.update(0, 10.0);
        q.update(3, 5.0);
        q.update(2, 7.5);
        q.update(4, 8.0);
        q.update(4, 2.5);
        assert_eq!(q.len(), 4);
        assert!(q.contains(4));
        assert_eq!(drain(q), vec![(4, 2.5), (3, 5.0), (2, 7.5), (0, 10.0)]);
        assert!(q.is_empty());
        assert!(!q.contains(4));
    }

    #[test]
    fn lazy_decrease_key() {
        check_decrease_key(&mut LazyFrontier::new());
    }

    #[test]
    fn indexed_decrease_key() {
        check_decrease_key(&mut IndexedFrontier::new());
    }

    #[test]
    fn extract_from_empty() {
        for kind in [QueueKind::Lazy, QueueKind::Indexed] {
            let mut q = kind.create();
            assert_eq!(q.extract_min(), None);
        }
    }

    #[test]
    fn lazy_ties_break_on_vertex_id() {
        let mut q = LazyFrontier::new();
        q.update(7, 1.0);
        q.update(2, 1.0);
        q.update(5, 1.0);
        assert_eq!(drain(&mut q), vec![(2, 1.0), (5, 1.0), (7, 1.0)]);
    }

    #[test]
    fn clear_empties() {
        for kind in [QueueKind::Lazy, QueueKind::Indexed] {
            let mut q = kind.create();
            q.update(1, 1.0);
            q.update(2, 2.0);
            q.clear();
            assert!(q.is_empty());
            assert_eq!(q.extract_min(), None);
        }
    }
}
