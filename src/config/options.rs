//! Option mutators applied over [`ClusterConfig`] defaults.
//!
//! ```ignore
//! let config = ClusterConfig::with_options([
//!     with_node_count(3),
//!     with_retry_interval(Duration::from_millis(500)),
//! ]);
//! ```

use std::time::Duration;

use super::ClusterConfig;

/// One step of cluster configuration
pub type ClusterOption = Box<dyn FnOnce(&mut ClusterConfig) + Send>;

pub fn with_node_count(count: usize) -> ClusterOption {
    Box::new(move |c| c.node_count = count)
}

pub fn with_hostname_prefix(prefix: impl Into<String>) -> ClusterOption {
    let prefix = prefix.into();
    Box::new(move |c| c.hostname_prefix = prefix)
}

pub fn with_client_port(port: u16) -> ClusterOption {
    Box::new(move |c| c.client_port = port)
}

pub fn with_peer_port(port: u16) -> ClusterOption {
    Box::new(move |c| c.peer_port = port)
}

pub fn with_election_port(port: u16) -> ClusterOption {
    Box::new(move |c| c.election_port = port)
}

/// Replaces the network list
pub fn with_networks<I, S>(networks: I) -> ClusterOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let networks: Vec<String> = networks.into_iter().map(Into::into).collect();
    Box::new(move |c| c.networks = networks)
}

pub fn with_retry_count(count: usize) -> ClusterOption {
    Box::new(move |c| c.convergence.retry_count = count)
}

pub fn with_retry_interval(interval: Duration) -> ClusterOption {
    let ms = millis(interval);
    Box::new(move |c| c.convergence.retry_interval_ms = ms)
}

pub fn with_probe_timeout(timeout: Duration) -> ClusterOption {
    let ms = millis(timeout);
    Box::new(move |c| c.convergence.probe_timeout_ms = ms)
}

pub fn with_image(image: impl Into<String>) -> ClusterOption {
    let image = image.into();
    Box::new(move |c| c.image = image)
}

/// Adds one extra container environment variable
pub fn with_env(
    key: impl Into<String>,
    value: impl Into<String>,
) -> ClusterOption {
    let (key, value) = (key.into(), value.into());
    Box::new(move |c| {
        c.env.insert(key, value);
    })
}

pub fn with_startup_timeout(timeout: Duration) -> ClusterOption {
    let ms = millis(timeout);
    Box::new(move |c| c.startup_timeout_ms = ms)
}

pub fn with_probe_host(host: impl Into<String>) -> ClusterOption {
    let host = host.into();
    Box::new(move |c| c.probe_host = host)
}

/// Whole milliseconds, saturating at `u64::MAX`
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
