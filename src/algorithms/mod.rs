pub mod dijkstra;
pub mod floyd_warshall;

use crate::RouterId;
use crate::config::RouteStrategy;
use crate::network::TopologyGraph;
use crate::protocol::RoutingTable;

/// Shortest distance and next hop to every router reachable from a source.
///
/// Both strategies produce the same table for the same graph. Among
/// equal-cost paths the one whose next hop has the lowest router id wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutePlanner {
    strategy: RouteStrategy,
}

impl RoutePlanner {
    pub fn new(strategy: RouteStrategy) -> Self {
        Self { strategy }
    }

    pub fn compute(&self, topology: &TopologyGraph, source: RouterId) -> RoutingTable {
        match self.strategy {
            RouteStrategy::Dijkstra => dijkstra::calculate_routes(topology, source),
            RouteStrategy::FloydWarshall => floyd_warshall::calculate_routes(topology, source),
        }
    }
}
