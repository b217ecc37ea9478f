//! Shortest routes between named locations of a road map.
//!
//! A [`Graph`] is filled once through the construction API, then a [`RoutePlanner`]
//! answers route queries with Dijkstra's algorithm, keeping the search tree of the
//! last source around until a query with a different source comes in.

pub mod dijkstra;
pub mod frontier;
pub mod geo;
pub mod graph;
pub mod planner;
pub mod reader;
pub mod roadmap;

pub use dijkstra::{shortest_paths, PathImproved, SearchNode, SearchStats, SearchTree};
pub use frontier::{Frontier, IndexedFrontier, LazyFrontier, QueueKind};
pub use geo::{GeoCoord, GeoError};
pub use graph::{Cost, Edge, Graph, GraphError, Labeled, Vertex, VertexId};
pub use planner::{Route, RoutePlanner, RouteStop};
pub use reader::{read_map, read_map_file, ReadError, ReadReport};
pub use roadmap::{Location, RoadMap, RoadMapError};
