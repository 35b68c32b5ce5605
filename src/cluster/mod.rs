//! Bring-up of a ZooKeeper test ensemble.
//!
//! ## Start sequence
//! 1. create every configured network (sequential)
//! 2. start all nodes as one parallel batch, each waiting for its client port
//! 3. resolve the host port of every node's client port
//! 4. for more than one node, poll `srvr` until the ensemble answers
//!
//! Any failure aborts the sequence and no [`StartedCluster`] is returned.
//! Containers that were already started are left to the caller.
//!
//! ## Example
//! ```ignore
//! let cancel = CancellationToken::new();
//! let cluster = ZooKeeperCluster::with_options([with_node_count(3)])
//!     .start_with_docker(&cancel)
//!     .await?;
//! let leader = cluster.leader().await?;
//! ```

mod launcher;
mod ports;
mod prober;
pub use prober::*;


use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::launch_requests;
use crate::utils::net::address_str;
use crate::ClusterConfig;
use crate::ClusterOption;
use crate::ContainerHandle;
use crate::ContainerRuntime;
use crate::DockerRuntime;
use crate::Error;
use crate::LaunchRequest;
use crate::Result;
use crate::ServerStats;
use crate::SrvrClient;
use crate::StatusProbe;

/// A resolved, not yet started ensemble
#[derive(Debug, Clone)]
pub struct ZooKeeperCluster {
    config: ClusterConfig,
    requests: Vec<LaunchRequest>,
}

impl ZooKeeperCluster {
    pub fn new(config: ClusterConfig) -> Self {
        let requests = launch_requests(&config);
        Self { config, requests }
    }

    /// Shorthand for `new(ClusterConfig::with_options(options))`
    pub fn with_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ClusterOption>,
    {
        Self::new(ClusterConfig::with_options(options))
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    pub fn requests(&self) -> &[LaunchRequest] {
        &self.requests
    }

    /// Starts on the local Docker daemon and probes with `srvr` over TCP
    pub async fn start_with_docker(
        self,
        cancel: &CancellationToken,
    ) -> Result<StartedCluster> {
        let runtime = DockerRuntime::connect(self.config.probe_host.clone())
            .await
            .map_err(Error::Runtime)?;
        self.start(&runtime, Arc::new(SrvrClient), cancel).await
    }

    pub async fn start(
        self,
        runtime: &dyn ContainerRuntime,
        probe: Arc<dyn StatusProbe>,
        cancel: &CancellationToken,
    ) -> Result<StartedCluster> {
        info!(
            nodes = self.requests.len(),
            image = %self.config.image,
            "Starting ZooKeeper cluster"
        );

        launcher::ensure_networks(runtime, &self.config.networks, cancel).await?;
        let containers = launcher::start_all(runtime, &self.requests, cancel).await?;
        let client_ports = ports::resolve_client_ports(runtime, &containers, self.config.client_port).await?;

        let servers = client_ports
            .iter()
            .map(|p| address_str(&self.config.probe_host, *p))
            .collect();
        let prober = ConvergenceProber::new(probe, servers, self.config.convergence.probe_timeout());

        if self.requests.len() > 1 {
            prober.wait_for_convergence(&self.config.convergence, cancel).await?;
        }

        info!(client_ports = ?client_ports, "ZooKeeper cluster started");
        Ok(StartedCluster {
            config: self.config,
            requests: self.requests,
            containers,
            client_ports,
            prober,
        })
    }
}

/// A running ensemble. Stopping the containers is left to the caller.
pub struct StartedCluster {
    config: ClusterConfig,
    requests: Vec<LaunchRequest>,
    containers: Vec<ContainerHandle>,
    client_ports: Vec<u16>,
    prober: ConvergenceProber,
}

impl StartedCluster {
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    pub fn requests(&self) -> &[LaunchRequest] {
        &self.requests
    }

    pub fn containers(&self) -> &[ContainerHandle] {
        &self.containers
    }

    /// Host port of each node's client port, in ordinal order
    pub fn client_ports(&self) -> &[u16] {
        &self.client_ports
    }

    /// `host:port` connect strings, in ordinal order
    pub fn client_addresses(&self) -> &[String] {
        self.prober.servers()
    }

    /// Comma separated connect string for ZooKeeper clients
    pub fn connect_string(&self) -> String {
        self.client_addresses().join(",")
    }

    pub async fn probe(&self) -> Result<Vec<ServerStats>> {
        self.prober.probe().await
    }

    pub async fn leader(&self) -> Result<Option<String>> {
        self.prober.leader().await
    }

    pub async fn followers(&self) -> Result<Vec<String>> {
        self.prober.followers().await
    }
}
