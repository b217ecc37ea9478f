/*
Undirected road graph stored as per-vertex adjacency lists of directed edges.

Vertices are kept in insertion order and addressed by a dense `VertexId`, with a
key index on the side. A road between two vertices is two mirrored directed edges.
*/

use hashbrown::HashMap;
use thiserror::Error;

pub type VertexId = usize;
pub type Cost = f64;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("vertex with key '{0}' already exists")]
    DuplicateKey(String),

    #[error("edge from '{0}' to '{1}' already exists")]
    DuplicateEdge(String, String),

    #[error("invalid edge cost {0}: must be a finite, non-negative number")]
    InvalidCost(Cost),

    #[error("no vertex with key '{0}'")]
    UnknownVertex(String),
}

/// Payloads that carry a human readable label, e.g. a location name.
pub trait Labeled {
    fn label(&self) -> &str;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub cost: Cost,
}

#[derive(Debug)]
pub struct Vertex<P> {
    id: VertexId,
    key: String,
    payload: P,
    outgoing: Vec<Edge>,
}

impl<P> Vertex<P> {
    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn outgoing_edges(&self) -> &[Edge] {
        &self.outgoing
    }

    fn has_edge_to(&self, to: VertexId) -> bool {
        self.outgoing.iter().any(|e| e.to == to)
    }
}

#[derive(Debug)]
pub struct Graph<P> {
    vertices: Vec<Vertex<P>>,
    index: HashMap<String, VertexId>,
}

impl<P> Default for Graph<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Graph<P> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.outgoing.len()).sum()
    }

    pub fn add_vertex(&mut self, key: &str, payload: P) -> Result<VertexId, GraphError> {
        if self.index.contains_key(key) {
            return Err(GraphError::DuplicateKey(key.to_string()));
        }
        let id = self.vertices.len();
        self.vertices.push(Vertex {
            id,
            key: key.to_string(),
            payload,
            outgoing: Vec::new(),
        });
        self.index.insert(key.to_string(), id);
        Ok(id)
    }

    pub fn vertex(&self, key: &str) -> Option<&Vertex<P>> {
        self.vertex_id(key).map(|id| &self.vertices[id])
    }

    pub fn vertex_id(&self, key: &str) -> Option<VertexId> {
        self.index.get(key).copied()
    }

    /// Panics if `id` was not handed out by this graph.
    pub fn get(&self, id: VertexId) -> &Vertex<P> {
        &self.vertices[id]
    }

    /// Adds the road `a <-> b` as two directed edges. Either both are inserted or neither.
    pub fn add_edge(&mut self, a: &str, b: &str, cost: Cost) -> Result<(), GraphError> {
        let (from, to) = self.checked_endpoints(a, b, cost)?;
        if from != to && self.vertices[to].has_edge_to(from) {
            return Err(GraphError::DuplicateEdge(b.to_string(), a.to_string()));
        }
        self.vertices[from].outgoing.push(Edge { from, to, cost });
        if from != to {
            self.vertices[to].outgoing.push(Edge { from: to, to: from, cost });
        }
        Ok(())
    }

    pub fn add_directed_edge(&mut self, a: &str, b: &str, cost: Cost) -> Result<(), GraphError> {
        let (from, to) = self.checked_endpoints(a, b, cost)?;
        self.vertices[from].outgoing.push(Edge { from, to, cost });
        Ok(())
    }

    // Validates cost and keys and rejects an existing a -> b edge.
    fn checked_endpoints(&self, a: &str, b: &str, cost: Cost) -> Result<(VertexId, VertexId), GraphError> {
        if !cost.is_finite() || cost < 0.0 {
            return Err(GraphError::InvalidCost(cost));
        }
        let from = self
            .vertex_id(a)
            .ok_or_else(|| GraphError::UnknownVertex(a.to_string()))?;
        let to = self
            .vertex_id(b)
            .ok_or_else(|| GraphError::UnknownVertex(b.to_string()))?;
        if self.vertices[from].has_edge_to(to) {
            return Err(GraphError::DuplicateEdge(a.to_string(), b.to_string()));
        }
        Ok((from, to))
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<P>> + Clone + '_ {
        self.vertices.iter()
    }

    /// All directed edges, grouped by source vertex in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + Clone + '_ {
        self.vertices.iter().flat_map(|v| v.outgoing.iter())
    }
}

impl<P: Labeled> Graph<P> {
    /// First vertex (in insertion order) whose payload carries `label`.
    pub fn find(&self, label: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|v| v.payload.label() == label)
            .map(|v| v.id)
    }
}
