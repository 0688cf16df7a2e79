use std::collections::HashMap;

use crate::network::TopologyGraph;
use crate::protocol::{RouteEntry, RoutingTable};
use crate::{Distance, RouterId};

/// All-pairs distances between every router except `excluded`.
///
/// `dist[i][j]` is `None` when `j` cannot be reached from `i`.
fn all_pairs(
    topology: &TopologyGraph,
    excluded: RouterId,
) -> (HashMap<RouterId, usize>, Vec<Vec<Option<Distance>>>) {
    let index: HashMap<RouterId, usize> = topology
        .routers()
        .filter(|&router| router != excluded)
        .enumerate()
        .map(|(i, router)| (router, i))
        .collect();
    let n = index.len();

    let mut dist = vec![vec![None; n]; n];
    for (&router, &i) in &index {
        dist[i][i] = Some(0);
        for adj in topology.neighbors(router) {
            let Some(&j) = index.get(&adj.peer) else {
                continue;
            };
            let cost = Distance::from(adj.cost);
            if dist[i][j].is_none_or(|current| cost < current) {
                dist[i][j] = Some(cost);
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            let Some(ik) = dist[i][k] else {
                continue;
            };
            for j in 0..n {
                if let Some(kj) = dist[k][j] {
                    let through = ik + kj;
                    if dist[i][j].is_none_or(|current| through < current) {
                        dist[i][j] = Some(through);
                    }
                }
            }
        }
    }

    (index, dist)
}

/// Routes from `source` derived from all-pairs distances.
///
/// No predecessor or `next[i][j]` matrix is kept, so first hops are not
/// reconstructed by walking paths back from each destination. Instead,
/// distances are computed over the graph without `source` and every route
/// is scored as `cost(source, n) + dist[n][dest]` for each neighbor `n` of
/// `source`. A route therefore leaves `source` through exactly one of its
/// links and never comes back, and the next hop is the lowest-id neighbor
/// that starts a shortest path. That is the same choice Dijkstra makes with
/// its `(distance, next_hop)` labels.
pub fn calculate_routes(topology: &TopologyGraph, source: RouterId) -> RoutingTable {
    let (index, dist) = all_pairs(topology, source);
    let mut best: HashMap<RouterId, (Distance, RouterId)> = HashMap::new();

    for adj in topology.neighbors(source) {
        let Some(&first) = index.get(&adj.peer) else {
            continue;
        };
        for (&dest, &j) in &index {
            let Some(rest) = dist[first][j] else {
                continue;
            };
            let candidate = (Distance::from(adj.cost) + rest, adj.peer);
            if best.get(&dest).is_none_or(|current| candidate < *current) {
                best.insert(dest, candidate);
            }
        }
    }

    best.into_iter()
        .map(|(router, (distance, next_hop))| (router, RouteEntry { distance, next_hop }))
        .collect()
}
