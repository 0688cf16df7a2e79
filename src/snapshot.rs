use chrono::Local;
use log::error;
use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::RouterId;
use crate::network::Edge;
use crate::protocol::{RouterObserver, RoutingTable};

/// Appends every topology and routing-table change to per-router log files.
///
/// Files are `topology_<id>.out` and `routingtable_<id>.out` under the
/// configured directory; each snapshot is a timestamped block.
#[derive(Debug, Clone)]
pub struct SnapshotLog {
    topology_path: PathBuf,
    routing_path: PathBuf,
}

impl SnapshotLog {
    pub fn new(log_dir: impl AsRef<Path>, router_id: RouterId) -> io::Result<Self> {
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir)?;
        Ok(Self {
            topology_path: log_dir.join(format!("topology_{}.out", router_id)),
            routing_path: log_dir.join(format!("routingtable_{}.out", router_id)),
        })
    }

    pub fn topology_path(&self) -> &Path {
        &self.topology_path
    }

    pub fn routing_path(&self) -> &Path {
        &self.routing_path
    }

    fn append(path: &Path, block: &str) {
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(block.as_bytes()));
        if let Err(e) = result {
            error!("Failed to write snapshot to {}: {}", path.display(), e);
        }
    }

    fn header(title: &str) -> String {
        format!("[{}] {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"), title)
    }
}

pub fn format_topology(edges: &[Edge]) -> String {
    let mut out = String::new();
    for edge in edges {
        let _ = writeln!(
            out,
            "router {} <-> router {} link {} cost {}",
            edge.a, edge.b, edge.link_id, edge.cost
        );
    }
    out
}

pub fn format_routing_table(table: &RoutingTable) -> String {
    let mut out = String::new();
    for (destination, route) in table.iter() {
        let _ = writeln!(
            out,
            "{} via {} distance {}",
            destination, route.next_hop, route.distance
        );
    }
    out
}

impl RouterObserver for SnapshotLog {
    fn on_topology_changed(&mut self, edges: &[Edge]) {
        let mut block = Self::header(&format!("TOPOLOGY ({} links)", edges.len()));
        block.push_str(&format_topology(edges));
        block.push('\n');
        Self::append(&self.topology_path, &block);
    }

    fn on_routing_table_changed(&mut self, table: &RoutingTable) {
        let mut block = Self::header(&format!("ROUTING ({} destinations)", table.len()));
        block.push_str(&format_routing_table(table));
        block.push('\n');
        Self::append(&self.routing_path, &block);
    }
}
