use std::collections::BTreeMap;
use std::time::Duration;

use super::node_specs;
use super::peer_list;
use crate::constants::ENV_CLIENT_PORT;
use crate::constants::ENV_SERVERS;
use crate::constants::ENV_SERVER_ID;
use crate::ClusterConfig;

/// Condition a started container must meet before the batch start returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitStrategy {
    /// The container port, once mapped to the host, answers `srvr`
    HostPort { port: u16, timeout: Duration },
}

/// Everything the runtime needs to launch one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub image: String,
    pub hostname: String,
    pub env: BTreeMap<String, String>,
    /// TCP ports in client, peer, election order
    pub exposed_ports: Vec<u16>,
    pub networks: Vec<String>,
    pub wait_for: WaitStrategy,
}

/// One request per node, in ordinal order
pub fn launch_requests(config: &ClusterConfig) -> Vec<LaunchRequest> {
    let specs = node_specs(config);
    let servers = peer_list(&specs);
    let exposed_ports = vec![config.client_port, config.peer_port, config.election_port];

    specs
        .into_iter()
        .map(|spec| {
            let mut env = config.env.clone();
            env.insert(ENV_SERVER_ID.to_string(), spec.server_id());
            env.insert(ENV_CLIENT_PORT.to_string(), config.client_port.to_string());
            env.insert(ENV_SERVERS.to_string(), servers.clone());

            LaunchRequest {
                image: config.image.clone(),
                hostname: spec.hostname,
                env,
                exposed_ports: exposed_ports.clone(),
                networks: config.networks.clone(),
                wait_for: WaitStrategy::HostPort {
                    port: config.client_port,
                    timeout: config.startup_timeout(),
                },
            }
        })
        .collect()
}
