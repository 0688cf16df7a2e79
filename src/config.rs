use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::RouterId;

/// Which direct links a novel LSA is re-flooded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloodScope {
    /// Every direct link, including the one the LSA arrived on.
    #[default]
    AllLinks,
    /// Every direct link except the ingress link.
    SplitHorizon,
}

/// What to do when the two halves of a link disagree on its cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMismatch {
    /// Use the cost carried by the second half to arrive.
    #[default]
    PreferLatest,
    /// Refuse the match; the first half stays pending.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RouteStrategy {
    #[default]
    Dijkstra,
    FloydWarshall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginePolicy {
    pub flood_scope: FloodScope,
    pub cost_mismatch: CostMismatch,
    pub route_strategy: RouteStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    pub router_id: RouterId,
    pub fabric_addr: SocketAddr,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default)]
    pub policy: EnginePolicy,
    #[serde(default = "default_recv_buffer")]
    pub recv_buffer: usize,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_recv_buffer() -> usize {
    4096
}

impl RouterConfig {
    pub fn new(router_id: RouterId, fabric_addr: SocketAddr) -> Self {
        Self {
            router_id,
            fabric_addr,
            bind_addr: default_bind_addr(),
            log_dir: default_log_dir(),
            policy: EnginePolicy::default(),
            recv_buffer: default_recv_buffer(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: RouterConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
