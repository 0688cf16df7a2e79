use crate::network::Edge;

use super::routing_table::RoutingTable;

/// Something the host may want to persist or display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    /// Full edge set after a new link was added.
    TopologyChanged(Vec<Edge>),
    /// Full routing table after it differed from the previous one.
    RoutingTableChanged(RoutingTable),
}

/// Callbacks invoked synchronously, in pipeline order, for each event.
pub trait RouterObserver {
    fn on_topology_changed(&mut self, edges: &[Edge]);
    fn on_routing_table_changed(&mut self, table: &RoutingTable);
}

impl RouterEvent {
    pub fn dispatch<O: RouterObserver + ?Sized>(&self, observer: &mut O) {
        match self {
            RouterEvent::TopologyChanged(edges) => observer.on_topology_changed(edges),
            RouterEvent::RoutingTableChanged(table) => observer.on_routing_table_changed(table),
        }
    }
}

/// Keeps every event it is handed, mostly for tests and embedding hosts.
impl RouterObserver for Vec<RouterEvent> {
    fn on_topology_changed(&mut self, edges: &[Edge]) {
        self.push(RouterEvent::TopologyChanged(edges.to_vec()));
    }

    fn on_routing_table_changed(&mut self, table: &RoutingTable) {
        self.push(RouterEvent::RoutingTableChanged(table.clone()));
    }
}
