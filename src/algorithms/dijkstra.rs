use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::network::TopologyGraph;
use crate::protocol::{RouteEntry, RoutingTable};
use crate::{Distance, RouterId};

/// Tentative route label. Ordered by distance, then next hop, so equal-cost
/// paths settle on the lowest next-hop id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct State {
    distance: Distance,
    next_hop: RouterId,
    router: RouterId,
}

impl State {
    fn label(&self) -> (Distance, RouterId) {
        (self.distance, self.next_hop)
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        (other.distance, other.next_hop, other.router).cmp(&(
            self.distance,
            self.next_hop,
            self.router,
        ))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn relax(
    state: State,
    best: &mut HashMap<RouterId, (Distance, RouterId)>,
    heap: &mut BinaryHeap<State>,
) {
    let improves = best
        .get(&state.router)
        .is_none_or(|current| state.label() < *current);
    if improves {
        best.insert(state.router, state.label());
        heap.push(state);
    }
}

/// Single-source shortest paths from `source`, propagating the first hop.
///
/// Neighbors of `source` are their own next hop; everything further away
/// inherits the next hop of the router it was reached through. Paths never
/// pass back through `source`.
pub fn calculate_routes(topology: &TopologyGraph, source: RouterId) -> RoutingTable {
    let mut best: HashMap<RouterId, (Distance, RouterId)> = HashMap::new();
    let mut settled: HashSet<RouterId> = HashSet::new();
    let mut heap = BinaryHeap::new();

    for adj in topology.neighbors(source) {
        if adj.peer == source {
            continue;
        }
        relax(
            State {
                distance: Distance::from(adj.cost),
                next_hop: adj.peer,
                router: adj.peer,
            },
            &mut best,
            &mut heap,
        );
    }

    while let Some(state) = heap.pop() {
        // Skip stale entries and routers already settled
        if best.get(&state.router) != Some(&state.label()) || !settled.insert(state.router) {
            continue;
        }

        for adj in topology.neighbors(state.router) {
            if adj.peer == source || settled.contains(&adj.peer) {
                continue;
            }
            relax(
                State {
                    distance: state.distance + Distance::from(adj.cost),
                    next_hop: state.next_hop,
                    router: adj.peer,
                },
                &mut best,
                &mut heap,
            );
        }
    }

    best.into_iter()
        .map(|(router, (distance, next_hop))| (router, RouteEntry { distance, next_hop }))
        .collect()
}
