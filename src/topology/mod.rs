//! Deterministic per-node identity derived from a [`ClusterConfig`].
//!
//! Node `n` (1-based) is named `{prefix}-{n}` and announces itself to its
//! peers as `{prefix}-{n}:{peer_port}:{election_port}`. Every node receives
//! the same `;`-joined list of all entries, in ordinal order.

mod launch;
pub use launch::*;


use crate::ClusterConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    /// 1-based position in the ensemble, also used as ZooKeeper server id
    pub ordinal: usize,
    pub hostname: String,
    /// `hostname:peer_port:election_port`
    pub peer_entry: String,
}

impl NodeSpec {
    /// Server id as rendered into the container environment
    pub fn server_id(&self) -> String {
        self.ordinal.to_string()
    }
}

pub fn node_specs(config: &ClusterConfig) -> Vec<NodeSpec> {
    let prefix = config.hostname_prefix.to_lowercase();
    let suffix = format!(":{}:{}", config.peer_port, config.election_port);

    (1..=config.node_count)
        .map(|ordinal| {
            let hostname = format!("{}-{}", prefix, ordinal);
            let peer_entry = format!("{}{}", hostname, suffix);
            NodeSpec {
                ordinal,
                hostname,
                peer_entry,
            }
        })
        .collect()
}

/// Full server list handed to every node
pub fn peer_list(specs: &[NodeSpec]) -> String {
    specs
        .iter()
        .map(|s| s.peer_entry.as_str())
        .collect::<Vec<_>>()
        .join(";")
}
