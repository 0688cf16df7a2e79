use log::warn;
use std::collections::{HashMap, HashSet};

use crate::config::CostMismatch;
use crate::error::ConsistencyError;
use crate::network::Edge;
use crate::{Cost, LinkId, RouterId};

/// One endpoint's announcement of a link, waiting for the other endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfLink {
    pub router_id: RouterId,
    pub cost: Cost,
}

/// Pairs the two unilateral announcements of each physical link.
///
/// A link id lives in `pending` until its reciprocal half arrives, then moves
/// to `matched` in the same call that yields its edge. It never goes back.
#[derive(Debug, Clone)]
pub struct LinkRegistry {
    pending: HashMap<LinkId, HalfLink>,
    matched: HashSet<LinkId>,
    cost_mismatch: CostMismatch,
}

impl LinkRegistry {
    pub fn new(cost_mismatch: CostMismatch) -> Self {
        Self {
            pending: HashMap::new(),
            matched: HashSet::new(),
            cost_mismatch,
        }
    }

    /// Records that `router_id` reports `link_id` at `cost`.
    ///
    /// Returns the edge when this completes a pending half-link. The edge
    /// carries the incoming cost in both directions unless the policy is
    /// [`CostMismatch::Reject`].
    pub fn record_announcement(
        &mut self,
        router_id: RouterId,
        link_id: LinkId,
        cost: Cost,
    ) -> Result<Option<Edge>, ConsistencyError> {
        if self.matched.contains(&link_id) {
            return Err(ConsistencyError::LinkAlreadyMatched { link_id, router_id });
        }

        let Some(first) = self.pending.get(&link_id).copied() else {
            self.pending.insert(link_id, HalfLink { router_id, cost });
            return Ok(None);
        };

        if first.router_id == router_id {
            return Err(ConsistencyError::SelfMatch { link_id, router_id });
        }

        if first.cost != cost {
            match self.cost_mismatch {
                CostMismatch::Reject => {
                    return Err(ConsistencyError::CostMismatch {
                        link_id,
                        first: first.cost,
                        second: cost,
                    });
                }
                CostMismatch::PreferLatest => {
                    warn!(
                        "Link {} announced at cost {} by {} and {} by {}, using {}",
                        link_id, first.cost, first.router_id, cost, router_id, cost
                    );
                }
            }
        }

        self.pending.remove(&link_id);
        self.matched.insert(link_id);
        Ok(Some(Edge::new(router_id, first.router_id, link_id, cost)))
    }

    pub fn pending(&self, link_id: LinkId) -> Option<HalfLink> {
        self.pending.get(&link_id).copied()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_matched(&self, link_id: LinkId) -> bool {
        self.matched.contains(&link_id)
    }
}
