pub mod events;
pub mod flood;
pub mod link_registry;
pub mod messages;
pub mod routing_table;

pub use events::{RouterEvent, RouterObserver};
pub use flood::FloodController;
pub use link_registry::{HalfLink, LinkRegistry};
pub use messages::{LsaKey, LsaMessage, ProtocolMessage};
pub use routing_table::{RouteEntry, RoutingTable};

use log::{debug, info, warn};

use crate::algorithms::RoutePlanner;
use crate::config::FloodScope;
use crate::error::{ConsistencyError, Result, RouterError};
use crate::network::DirectLink;
use crate::{LinkId, RouterState};

/// What one step of the protocol asks the host to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// LSAs to hand to the fabric, each already stamped with its egress link.
    pub outbound: Vec<LsaMessage>,
    /// Changes for the observer, in the order they happened.
    pub events: Vec<RouterEvent>,
    /// Set when the announcement was flooded but could not be applied.
    pub rejected: Option<ConsistencyError>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty() && self.events.is_empty() && self.rejected.is_none()
    }

    pub fn dispatch<O: RouterObserver + ?Sized>(&self, observer: &mut O) {
        for event in &self.events {
            event.dispatch(observer);
        }
    }
}

impl RouterState {
    /// Enters steady state with the direct links enumerated by the fabric.
    ///
    /// Each link becomes a pending half-link from this router and its LSA is
    /// marked seen and flooded on every direct link.
    pub fn bootstrap(&mut self, links: Vec<DirectLink>) -> Result<Transition> {
        if self.bootstrapped {
            return Err(RouterError::AlreadyBootstrapped(self.id));
        }
        self.bootstrapped = true;
        self.links = links;

        let mut transition = Transition::default();
        for link in self.links.clone() {
            let lsa = LsaMessage::originate(self.id, link);
            if !self.flood.should_process(lsa.key()) {
                debug!("Router {} lists link {} twice", self.id, link.link_id);
                continue;
            }

            transition.outbound.extend(self.flood_copies(&lsa, None));
            if let Err(e) = self
                .registry
                .record_announcement(self.id, link.link_id, link.cost)
            {
                warn!("Ignoring direct link {}: {}", link.link_id, e);
                transition.rejected.get_or_insert(e);
            }
        }

        info!(
            "Router {} bootstrapped with {} direct links",
            self.id,
            self.links.len()
        );
        Ok(transition)
    }

    /// Runs one inbound LSA through dedup, flooding, matching and routing.
    pub fn process_lsa(&mut self, lsa: &LsaMessage) -> Transition {
        if !self.flood.should_process(lsa.key()) {
            debug!("Duplicate LSA {:?} via link {}", lsa.key(), lsa.sender_link);
            return Transition::default();
        }

        let mut transition = Transition {
            outbound: self.flood_copies(lsa, Some(lsa.sender_link)),
            ..Transition::default()
        };

        match self
            .registry
            .record_announcement(lsa.origin_router, lsa.origin_link, lsa.cost)
        {
            Ok(Some(edge)) => {
                if self.topology.add_edge(edge.a, edge.b, edge.link_id, edge.cost) {
                    info!(
                        "Link {} up between {} and {} (cost {})",
                        edge.link_id, edge.a, edge.b, edge.cost
                    );
                    transition
                        .events
                        .push(RouterEvent::TopologyChanged(self.topology.edges()));
                    transition.events.extend(self.recompute_routes());
                }
            }
            Ok(None) => {
                debug!(
                    "Half-link {} from {} pending",
                    lsa.origin_link, lsa.origin_router
                );
            }
            Err(e) => {
                warn!("Dropping LSA from {}: {}", lsa.origin_router, e);
                transition.rejected = Some(e);
            }
        }

        transition
    }

    /// Recomputes the routing table and reports it only if it changed.
    pub fn recompute_routes(&mut self) -> Option<RouterEvent> {
        let table = RoutePlanner::new(self.policy.route_strategy).compute(&self.topology, self.id);
        if table == self.routing_table {
            return None;
        }

        info!("Routing table changed: {} destinations", table.len());
        self.routing_table = table.clone();
        Some(RouterEvent::RoutingTableChanged(table))
    }

    fn flood_copies(&self, lsa: &LsaMessage, ingress: Option<LinkId>) -> Vec<LsaMessage> {
        self.links
            .iter()
            .filter(|link| match self.policy.flood_scope {
                FloodScope::AllLinks => true,
                FloodScope::SplitHorizon => Some(link.link_id) != ingress,
            })
            .map(|link| lsa.relayed(self.id, link.link_id))
            .collect()
    }
}
