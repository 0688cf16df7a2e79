pub mod algorithms;
pub mod config;
pub mod error;
pub mod network;
pub mod protocol;
pub mod router;
pub mod snapshot;

pub use error::{ConsistencyError, ProtocolError, Result, RouterError};

/// Identity of a virtual router, fixed at startup.
pub type RouterId = u32;
/// Physical link id; both endpoints of a link share the same value.
pub type LinkId = u32;
pub type Cost = u32;
/// Accumulated path cost.
pub type Distance = u64;

/// Everything one router knows, owned by whoever drives the protocol.
///
/// The pipeline operations live in [`protocol`]; they take `&mut RouterState`
/// and hand back what must be sent and observed rather than doing I/O.
#[derive(Debug, Clone)]
pub struct RouterState {
    pub id: RouterId,
    pub links: Vec<network::DirectLink>,
    pub flood: protocol::FloodController,
    pub registry: protocol::LinkRegistry,
    pub topology: network::TopologyGraph,
    pub routing_table: protocol::RoutingTable,
    pub policy: config::EnginePolicy,
    pub(crate) bootstrapped: bool,
}

impl RouterState {
    pub fn new(id: RouterId) -> Self {
        Self::with_policy(id, config::EnginePolicy::default())
    }

    pub fn with_policy(id: RouterId, policy: config::EnginePolicy) -> Self {
        Self {
            id,
            links: Vec::new(),
            flood: protocol::FloodController::new(),
            registry: protocol::LinkRegistry::new(policy.cost_mismatch),
            topology: network::TopologyGraph::new(id),
            routing_table: protocol::RoutingTable::new(),
            policy,
            bootstrapped: false,
        }
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }
}
