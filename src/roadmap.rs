use std::fmt;

use ordered_float::OrderedFloat;
use thiserror::Error;

use crate::geo::{GeoCoord, GeoError};
use crate::graph::{Cost, Edge, Graph, GraphError, Labeled, Vertex, VertexId};
use crate::planner::{Route, RoutePlanner};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoadMapError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Geo(#[from] GeoError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub name: String,
    pub coord: GeoCoord,
}

impl Labeled for Location {
    fn label(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.coord)
    }
}

/// Named locations connected by roads measured in kilometers.
#[derive(Debug, Default)]
pub struct RoadMap {
    graph: Graph<Location>,
}

impl RoadMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &Graph<Location> {
        &self.graph
    }

    pub fn create_location(
        &mut self,
        key: &str,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<VertexId, RoadMapError> {
        let coord = GeoCoord::new(latitude, longitude)?;
        let location = Location {
            name: name.to_string(),
            coord,
        };
        Ok(self.graph.add_vertex(key, location)?)
    }

    pub fn connect(&mut self, key_a: &str, key_b: &str, km: Cost) -> Result<(), RoadMapError> {
        Ok(self.graph.add_edge(key_a, key_b, km)?)
    }

    pub fn location(&self, vertex: VertexId) -> &Location {
        self.graph.get(vertex).payload()
    }

    /// Locations ordered by name.
    pub fn locations(&self) -> impl Iterator<Item = &Vertex<Location>> {
        let mut sorted: Vec<&Vertex<Location>> = self.graph.vertices().collect();
        sorted.sort_by(|u, v| u.payload().name.cmp(&v.payload().name));
        sorted.into_iter()
    }

    pub fn location_names(&self) -> Vec<&str> {
        self.locations().map(|v| v.payload().name.as_str()).collect()
    }

    pub fn planner(&self) -> RoutePlanner<'_, Location> {
        RoutePlanner::new(&self.graph)
    }

    pub fn describe_edge(&self, edge: &Edge) -> String {
        format!(
            "[{} -> {} {:.1} km]",
            self.location(edge.from).name,
            self.location(edge.to).name,
            edge.cost
        )
    }

    /// One `"name 12.3 km"` entry per stop.
    pub fn describe(&self, route: &Route) -> Vec<String> {
        route
            .iter()
            .map(|stop| format!("{} {:.1} km", self.location(stop.vertex).name, stop.cost))
            .collect()
    }

    /// Straight-line distance between the ends of `route`.
    pub fn crow_flies_km(&self, route: &Route) -> Option<f64> {
        let first = route.stops().first()?;
        let last = route.stops().last()?;
        Some(
            self.location(first.vertex)
                .coord
                .distance_km(&self.location(last.vertex).coord),
        )
    }

    /// Prints every location, then every road leaving it, in name order.
    pub fn print(&self, mut printer: impl FnMut(&str)) {
        for v in self.locations() {
            printer(&v.payload().to_string());
        }
        for v in self.locations() {
            let mut edges: Vec<&Edge> = v.outgoing_edges().iter().collect();
            edges.sort_by_key(|e| OrderedFloat(e.cost));
            for edge in edges {
                printer(&self.describe_edge(edge));
            }
        }
    }

    /// Prints the map followed by the route between every ordered pair of locations.
    pub fn print_all_routes(&self, planner: &mut RoutePlanner<'_, Location>, mut printer: impl FnMut(&str)) {
        self.print(&mut printer);
        let names = self.location_names();
        for start in &names {
            for goal in &names {
                let route = planner.compute_route_by_name(start, goal);
                printer(&format!(
                    "{} to {}: [{}]",
                    start,
                    goal,
                    self.describe(&route).join(", ")
                ));
            }
        }
    }
}
