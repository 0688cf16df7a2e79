use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Cost, LinkId, RouterId};

/// One entry of a router's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjacency {
    pub peer: RouterId,
    pub link_id: LinkId,
    pub cost: Cost,
}

/// An undirected link between two routers, produced once both halves are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub a: RouterId,
    pub b: RouterId,
    pub link_id: LinkId,
    pub cost: Cost,
}

impl Edge {
    pub fn new(a: RouterId, b: RouterId, link_id: LinkId, cost: Cost) -> Self {
        Self { a, b, link_id, cost }
    }
}

/// The router's accumulated view of the network.
///
/// Edges are only ever added, always in both directions at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyGraph {
    adjacency: BTreeMap<RouterId, Vec<Adjacency>>,
}

impl TopologyGraph {
    pub fn new(origin: RouterId) -> Self {
        let mut adjacency = BTreeMap::new();
        adjacency.insert(origin, Vec::new());
        Self { adjacency }
    }

    /// Inserts `a <-> b` over `link_id`. Returns `false` and leaves the graph
    /// untouched for a self-loop or a link id `a` already has.
    pub fn add_edge(&mut self, a: RouterId, b: RouterId, link_id: LinkId, cost: Cost) -> bool {
        if a == b {
            return false;
        }
        if self.neighbors(a).iter().any(|adj| adj.link_id == link_id) {
            return false;
        }

        self.adjacency.entry(a).or_default().push(Adjacency {
            peer: b,
            link_id,
            cost,
        });
        self.adjacency.entry(b).or_default().push(Adjacency {
            peer: a,
            link_id,
            cost,
        });
        true
    }

    pub fn neighbors(&self, router: RouterId) -> &[Adjacency] {
        self.adjacency
            .get(&router)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, router: RouterId) -> bool {
        self.adjacency.contains_key(&router)
    }

    /// Router ids in ascending order.
    pub fn routers(&self) -> impl Iterator<Item = RouterId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn router_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Every undirected edge once, lower router id first, sorted.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .adjacency
            .iter()
            .flat_map(|(&router, adjs)| {
                adjs.iter()
                    .filter(move |adj| router < adj.peer)
                    .map(move |adj| Edge::new(router, adj.peer, adj.link_id, adj.cost))
            })
            .collect();
        edges.sort();
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_only_the_origin() {
        let graph = TopologyGraph::new(1);
        assert!(graph.contains(1));
        assert_eq!(graph.router_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors(1).is_empty());
    }

    #[test]
    fn add_edge_is_symmetric() {
        let mut graph = TopologyGraph::new(1);
        assert!(graph.add_edge(2, 3, 40, 7));

        assert_eq!(
            graph.neighbors(2),
            &[Adjacency { peer: 3, link_id: 40, cost: 7 }]
        );
        assert_eq!(
            graph.neighbors(3),
            &[Adjacency { peer: 2, link_id: 40, cost: 7 }]
        );
        assert_eq!(graph.router_count(), 3);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn duplicate_link_and_self_loop_are_ignored() {
        let mut graph = TopologyGraph::new(1);
        assert!(graph.add_edge(1, 2, 10, 1));
        assert!(!graph.add_edge(2, 1, 10, 1));
        assert!(!graph.add_edge(3, 3, 11, 1));

        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.contains(3));
    }

    #[test]
    fn parallel_links_are_kept_apart() {
        let mut graph = TopologyGraph::new(1);
        assert!(graph.add_edge(1, 2, 10, 5));
        assert!(graph.add_edge(1, 2, 11, 2));
        assert_eq!(graph.neighbors(1).len(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn edges_lists_each_link_once() {
        let mut graph = TopologyGraph::new(1);
        graph.add_edge(3, 1, 20, 4);
        graph.add_edge(2, 1, 10, 2);

        assert_eq!(
            graph.edges(),
            vec![Edge::new(1, 2, 10, 2), Edge::new(1, 3, 20, 4)]
        );
    }
}
