use lsr_router::config::{EnginePolicy, RouteStrategy};
use lsr_router::network::{Adjacency, DirectLink, Edge};
use lsr_router::protocol::{LsaMessage, RouteEntry, RouterEvent, RoutingTable};
use lsr_router::{ConsistencyError, LinkId, RouterId, RouterState};

/// Half-link announcement from `origin`, relayed to us by `sender` over `via`.
fn lsa(sender: RouterId, via: LinkId, origin: RouterId, link: LinkId, cost: u32) -> LsaMessage {
    LsaMessage::new(sender, via, origin, link, cost)
}

fn bootstrapped(id: RouterId, links: &[(LinkId, u32)]) -> RouterState {
    let mut state = RouterState::new(id);
    state
        .bootstrap(links.iter().map(|&(l, c)| DirectLink::new(l, c)).collect())
        .unwrap();
    state
}

fn route(distance: u64, next_hop: RouterId) -> RouteEntry {
    RouteEntry { distance, next_hop }
}

/// 4-node network seen from router 1:
///
/// ```text
///   1 --10(2)-- 2 --14(1)-- 4
///   |           |           |
///  11(1)       12(3)       13(4)
///   |           |           |
///   3 ----------+-----------+
/// ```
fn four_node_announcements() -> Vec<LsaMessage> {
    vec![
        lsa(2, 10, 2, 10, 2),
        lsa(2, 10, 2, 12, 3),
        lsa(2, 10, 2, 14, 1),
        lsa(3, 11, 3, 11, 1),
        lsa(3, 11, 3, 12, 3),
        lsa(3, 11, 3, 13, 4),
        lsa(3, 11, 4, 13, 4),
        lsa(2, 10, 4, 14, 1),
    ]
}

fn converge(order: &[LsaMessage]) -> RouterState {
    let mut state = bootstrapped(1, &[(10, 2), (11, 1)]);
    for msg in order {
        state.process_lsa(msg);
    }
    state
}

#[test]
fn line_topology_routes_in_either_order() {
    let halves = [
        lsa(2, 12, 2, 12, 2),
        lsa(2, 12, 2, 23, 3),
        lsa(2, 12, 3, 23, 3),
    ];
    let orders = [[0, 1, 2], [2, 1, 0], [1, 0, 2], [2, 0, 1]];

    for order in orders {
        let mut state = bootstrapped(1, &[(12, 2)]);
        for i in order {
            state.process_lsa(&halves[i]);
        }

        let mut expected = RoutingTable::new();
        expected.add_route(2, 2, 2);
        expected.add_route(3, 5, 2);
        assert_eq!(state.routing_table, expected, "order {:?}", order);
    }
}

#[test]
fn delivery_order_does_not_change_final_graph() {
    let announcements = four_node_announcements();
    let baseline = converge(&announcements);
    assert_eq!(baseline.topology.edge_count(), 5);

    let mut reversed = announcements.clone();
    reversed.reverse();

    let interleaved: Vec<LsaMessage> = [6, 0, 3, 7, 1, 4, 2, 5]
        .iter()
        .map(|&i| announcements[i])
        .collect();

    // Deterministic shuffle via a small LCG
    let mut shuffled = announcements.clone();
    let mut seed: u64 = 0x5eed;
    for i in (1..shuffled.len()).rev() {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        shuffled.swap(i, (seed >> 33) as usize % (i + 1));
    }

    for order in [reversed, interleaved, shuffled] {
        let state = converge(&order);
        assert_eq!(state.topology.edges(), baseline.topology.edges());
        assert_eq!(state.routing_table, baseline.routing_table);
    }

    assert_eq!(baseline.routing_table.get_route(2), Some(&route(2, 2)));
    assert_eq!(baseline.routing_table.get_route(3), Some(&route(1, 3)));
    assert_eq!(baseline.routing_table.get_route(4), Some(&route(3, 2)));
}

#[test]
fn both_strategies_converge_to_the_same_table() {
    let announcements = four_node_announcements();
    let policy = EnginePolicy {
        route_strategy: RouteStrategy::FloydWarshall,
        ..EnginePolicy::default()
    };

    let mut fw = RouterState::with_policy(1, policy);
    fw.bootstrap(vec![DirectLink::new(10, 2), DirectLink::new(11, 1)])
        .unwrap();
    for msg in &announcements {
        fw.process_lsa(msg);
    }

    assert_eq!(fw.routing_table, converge(&announcements).routing_table);
}

#[test]
fn reprocessing_an_lsa_changes_nothing() {
    let mut state = bootstrapped(1, &[(10, 2)]);
    let first = state.process_lsa(&lsa(2, 10, 2, 10, 2));
    assert_eq!(first.events.len(), 2);

    let edges = state.topology.edges();
    let table = state.routing_table.clone();
    let seen = state.flood.seen_count();

    // Same key relayed by a different neighbor is still a duplicate
    for dup in [lsa(2, 10, 2, 10, 2), lsa(5, 10, 2, 10, 2)] {
        let again = state.process_lsa(&dup);
        assert!(again.is_empty());
    }
    assert_eq!(state.topology.edges(), edges);
    assert_eq!(state.routing_table, table);
    assert_eq!(state.flood.seen_count(), seen);
}

#[test]
fn matched_edges_are_symmetric() {
    let state = converge(&four_node_announcements());

    for edge in state.topology.edges() {
        assert!(state.topology.neighbors(edge.a).contains(&Adjacency {
            peer: edge.b,
            link_id: edge.link_id,
            cost: edge.cost,
        }));
        assert!(state.topology.neighbors(edge.b).contains(&Adjacency {
            peer: edge.a,
            link_id: edge.link_id,
            cost: edge.cost,
        }));
    }
}

#[test]
fn single_half_never_reaches_topology() {
    let mut state = bootstrapped(1, &[(10, 2)]);
    state.process_lsa(&lsa(2, 10, 2, 10, 2));
    let transition = state.process_lsa(&lsa(2, 10, 3, 23, 3));

    assert!(transition.events.is_empty());
    assert!(!state.topology.contains(3));
    assert!(state.routing_table.get_route(3).is_none());
    assert_eq!(state.registry.pending_count(), 1);
}

#[test]
fn novel_lsa_is_flooded_once_per_direct_link() {
    let mut state = bootstrapped(4, &[(40, 1), (41, 1), (42, 3)]);
    let transition = state.process_lsa(&lsa(7, 41, 9, 90, 5));

    assert_eq!(
        transition.outbound,
        vec![
            lsa(4, 40, 9, 90, 5),
            lsa(4, 41, 9, 90, 5),
            lsa(4, 42, 9, 90, 5),
        ]
    );
}

#[test]
fn topology_change_without_route_change_is_not_reported() {
    let mut state = bootstrapped(1, &[(10, 1)]);
    state.process_lsa(&lsa(2, 10, 2, 10, 1));
    state.process_lsa(&lsa(2, 10, 2, 23, 1));
    state.process_lsa(&lsa(2, 10, 3, 23, 1));
    let before = state.routing_table.clone();

    // An expensive parallel link between 2 and 3 alters no shortest path
    state.process_lsa(&lsa(2, 10, 2, 99, 50));
    let transition = state.process_lsa(&lsa(2, 10, 3, 99, 50));

    assert_eq!(
        transition.events,
        vec![RouterEvent::TopologyChanged(vec![
            Edge::new(1, 2, 10, 1),
            Edge::new(2, 3, 23, 1),
            Edge::new(2, 3, 99, 50),
        ])]
    );
    assert_eq!(state.routing_table, before);
}

#[test]
fn rematch_of_known_link_is_rejected_without_events() {
    let mut state = bootstrapped(1, &[(10, 2)]);
    state.process_lsa(&lsa(2, 10, 2, 10, 2));

    // Router 3 claims the already-matched link 10 with a different cost
    let transition = state.process_lsa(&lsa(2, 10, 3, 10, 7));
    assert_eq!(
        transition.rejected,
        Some(ConsistencyError::LinkAlreadyMatched {
            link_id: 10,
            router_id: 3
        })
    );
    assert!(transition.events.is_empty());
    assert_eq!(transition.outbound.len(), 1);
    assert_eq!(state.topology.edge_count(), 1);
}
