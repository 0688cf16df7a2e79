use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tokio::runtime::Builder;
use tracing::{error, info};

use lsr_router::config::{FloodScope, RouteStrategy, RouterConfig};
use lsr_router::network::UdpTransport;
use lsr_router::router::Router;
use lsr_router::snapshot::SnapshotLog;
use lsr_router::{RouterId, RouterState};

#[derive(Parser)]
#[command(name = "lsr-router", about = "Virtual link-state router")]
struct Cli {
    /// IP address the network fabric listens on
    fabric_ip: IpAddr,

    /// UDP port the network fabric listens on
    fabric_port: u16,

    /// Router id assigned to this instance
    router_id: RouterId,

    /// JSON configuration; positional arguments override its id and fabric address
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for topology and routing table snapshots
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Do not re-flood an LSA on the link it arrived on
    #[arg(long)]
    split_horizon: bool,

    #[arg(long, value_enum)]
    strategy: Option<RouteStrategy>,
}

impl Cli {
    fn into_config(self) -> Result<RouterConfig> {
        let fabric_addr = SocketAddr::new(self.fabric_ip, self.fabric_port);
        let mut config = match &self.config {
            Some(path) => {
                let mut config = RouterConfig::load(path)
                    .with_context(|| format!("loading {}", path.display()))?;
                config.router_id = self.router_id;
                config.fabric_addr = fabric_addr;
                config
            }
            None => RouterConfig::new(self.router_id, fabric_addr),
        };

        if let Some(log_dir) = self.log_dir {
            config.log_dir = log_dir;
        }
        if self.split_horizon {
            config.policy.flood_scope = FloodScope::SplitHorizon;
        }
        if let Some(strategy) = self.strategy {
            config.policy.route_strategy = strategy;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let config = Cli::parse().into_config()?;
    info!(
        router_id = config.router_id,
        fabric = %config.fabric_addr,
        "Starting virtual router"
    );

    let rt = Builder::new_current_thread().enable_all().build()?;

    rt.block_on(async {
        let transport = UdpTransport::bind(config.bind_addr, config.fabric_addr)
            .await
            .context("binding fabric socket")?;
        let snapshots = SnapshotLog::new(&config.log_dir, config.router_id)
            .context("preparing snapshot directory")?;
        let state = RouterState::with_policy(config.router_id, config.policy);

        let mut router =
            Router::new(state, transport, snapshots).with_recv_buffer(config.recv_buffer);
        if let Err(e) = router.run().await {
            error!(router_id = config.router_id, "Router stopped: {}", e);
            return Err(e.into());
        }
        Ok::<_, anyhow::Error>(())
    })
}
