use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use super::ClusterOption;
use super::ConvergencePolicy;
use crate::constants::DEFAULT_CLIENT_PORT;
use crate::constants::DEFAULT_ELECTION_PORT;
use crate::constants::DEFAULT_HOSTNAME_PREFIX;
use crate::constants::DEFAULT_IMAGE;
use crate::constants::DEFAULT_NETWORK;
use crate::constants::DEFAULT_NODE_COUNT;
use crate::constants::DEFAULT_PEER_PORT;
use crate::constants::DEFAULT_PROBE_HOST;
use crate::constants::DEFAULT_STARTUP_TIMEOUT_MS;

/// Fully resolved topology of a test ensemble.
///
/// Nothing here is validated: duplicate ports or an empty network list are
/// accepted and only fail once the runtime tries to use them.
#[derive(Debug, Deserialize, Clone)]
pub struct ClusterConfig {
    #[serde(default = "default_node_count")]
    pub node_count: usize,

    /// Lowercased before use; node `n` is reachable as `{prefix}-{n}`
    #[serde(default = "default_hostname_prefix")]
    pub hostname_prefix: String,

    #[serde(default = "default_client_port")]
    pub client_port: u16,

    /// Quorum (follower to leader) port
    #[serde(default = "default_peer_port")]
    pub peer_port: u16,

    #[serde(default = "default_election_port")]
    pub election_port: u16,

    /// Every node joins every network listed here
    #[serde(default = "default_networks")]
    pub networks: Vec<String>,

    #[serde(default = "default_image")]
    pub image: String,

    /// Extra container environment; never overrides the server id, client
    /// port or server list
    #[serde(skip)]
    pub env: BTreeMap<String, String>,

    /// Host the mapped client ports are reachable on
    #[serde(default = "default_probe_host")]
    pub probe_host: String,

    /// How long a container may take to open its client port (unit: milliseconds)
    #[serde(default = "default_startup_timeout_ms")]
    pub startup_timeout_ms: u64,

    #[serde(default)]
    pub convergence: ConvergencePolicy,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            node_count: default_node_count(),
            hostname_prefix: default_hostname_prefix(),
            client_port: default_client_port(),
            peer_port: default_peer_port(),
            election_port: default_election_port(),
            networks: default_networks(),
            image: default_image(),
            env: BTreeMap::new(),
            probe_host: default_probe_host(),
            startup_timeout_ms: default_startup_timeout_ms(),
            convergence: ConvergencePolicy::default(),
        }
    }
}

impl ClusterConfig {
    /// Applies `options` in order over a fresh default config
    pub fn with_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ClusterOption>,
    {
        Self::default().apply(options)
    }

    /// Applies `options` in order; a later option wins over an earlier one
    pub fn apply<I>(
        mut self,
        options: I,
    ) -> Self
    where
        I: IntoIterator<Item = ClusterOption>,
    {
        for option in options {
            option(&mut self);
        }
        self
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }
}

fn default_node_count() -> usize {
    DEFAULT_NODE_COUNT
}
fn default_hostname_prefix() -> String {
    DEFAULT_HOSTNAME_PREFIX.to_string()
}
fn default_client_port() -> u16 {
    DEFAULT_CLIENT_PORT
}
fn default_peer_port() -> u16 {
    DEFAULT_PEER_PORT
}
fn default_election_port() -> u16 {
    DEFAULT_ELECTION_PORT
}
fn default_networks() -> Vec<String> {
    vec![DEFAULT_NETWORK.to_string()]
}
fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}
fn default_probe_host() -> String {
    DEFAULT_PROBE_HOST.to_string()
}
fn default_startup_timeout_ms() -> u64 {
    DEFAULT_STARTUP_TIMEOUT_MS
}
