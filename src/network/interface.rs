use serde::{Deserialize, Serialize};

use crate::{Cost, LinkId};

/// One of this router's own links, as enumerated by the fabric at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectLink {
    pub link_id: LinkId,
    pub cost: Cost,
}

impl DirectLink {
    pub fn new(link_id: LinkId, cost: Cost) -> Self {
        Self { link_id, cost }
    }
}
