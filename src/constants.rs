// -
// Container image

/// Image every node is launched from unless overridden
pub const DEFAULT_IMAGE: &str = "confluentinc/cp-zookeeper:7.3.2";

// -
// Environment keys read by the image entrypoint

pub const ENV_SERVER_ID: &str = "ZOOKEEPER_SERVER_ID";
pub const ENV_CLIENT_PORT: &str = "ZOOKEEPER_CLIENT_PORT";
pub const ENV_SERVERS: &str = "ZOOKEEPER_SERVERS";

// -
// Topology defaults

pub(crate) const DEFAULT_NODE_COUNT: usize = 1;
pub(crate) const DEFAULT_HOSTNAME_PREFIX: &str = "zookeeper";
pub(crate) const DEFAULT_CLIENT_PORT: u16 = 2181;
pub(crate) const DEFAULT_PEER_PORT: u16 = 2888;
pub(crate) const DEFAULT_ELECTION_PORT: u16 = 3888;
pub(crate) const DEFAULT_NETWORK: &str = "testcontainers";
pub(crate) const DEFAULT_PROBE_HOST: &str = "localhost";
pub(crate) const DEFAULT_STARTUP_TIMEOUT_MS: u64 = 60_000;

// -
// Convergence defaults

pub(crate) const DEFAULT_RETRY_COUNT: usize = 30;
pub(crate) const DEFAULT_RETRY_INTERVAL_MS: u64 = 2_000;
pub(crate) const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2_000;

/// Prefix for `ClusterConfig::from_env` overrides, e.g.
/// `ZK_CLUSTER__CONVERGENCE__RETRY_COUNT=5`
pub(crate) const ENV_PREFIX: &str = "ZK_CLUSTER";

/// Label attached to networks created by the Docker runtime
pub(crate) const OWNER_LABEL: &str = "zk-testcluster.owner";

/// Interval between readiness checks on a freshly started container
pub(crate) const READINESS_POLL_INTERVAL_MS: u64 = 250;

/// Bound on one readiness check, connect included
pub(crate) const READINESS_CHECK_TIMEOUT_MS: u64 = 1_000;

/// Four-letter-word status command
pub(crate) const SRVR_COMMAND: &[u8] = b"srvr";
