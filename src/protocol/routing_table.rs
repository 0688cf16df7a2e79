use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Distance, RouterId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub distance: Distance,
    pub next_hop: RouterId,
}

/// Best known route to every reachable router other than ourselves.
///
/// Compared by value to decide whether a recomputation changed anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingTable {
    entries: BTreeMap<RouterId, RouteEntry>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_route(&mut self, destination: RouterId, distance: Distance, next_hop: RouterId) {
        self.entries.insert(destination, RouteEntry { distance, next_hop });
    }

    pub fn get_route(&self, destination: RouterId) -> Option<&RouteEntry> {
        self.entries.get(&destination)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Routes ordered by destination id.
    pub fn iter(&self) -> impl Iterator<Item = (RouterId, &RouteEntry)> {
        self.entries.iter().map(|(&dest, entry)| (dest, entry))
    }
}

impl FromIterator<(RouterId, RouteEntry)> for RoutingTable {
    fn from_iter<I: IntoIterator<Item = (RouterId, RouteEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_value() {
        let mut a = RoutingTable::new();
        a.add_route(3, 5, 2);
        a.add_route(2, 2, 2);

        let b: RoutingTable = [
            (2, RouteEntry { distance: 2, next_hop: 2 }),
            (3, RouteEntry { distance: 5, next_hop: 2 }),
        ]
        .into_iter()
        .collect();

        assert_eq!(a, b);
        b.iter().for_each(|(dest, entry)| assert_eq!(a.get_route(dest), Some(entry)));
    }

    #[test]
    fn next_hop_change_is_a_difference() {
        let mut a = RoutingTable::new();
        a.add_route(3, 5, 2);
        let mut b = a.clone();
        b.add_route(3, 5, 4);
        assert_ne!(a, b);
    }

    #[test]
    fn iterates_in_destination_order() {
        let mut table = RoutingTable::new();
        table.add_route(9, 1, 9);
        table.add_route(4, 3, 9);
        let order: Vec<RouterId> = table.iter().map(|(dest, _)| dest).collect();
        assert_eq!(order, vec![4, 9]);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }
}
