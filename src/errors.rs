//! Test Cluster Error Hierarchy
//!
//! Errors are grouped by the bring-up stage that raised them. Every variant
//! carries enough context (network name, hostname, server address) to tell
//! which resource failed without reading logs.

use std::time::Duration;

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Environment overrides could not be parsed into a cluster config
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The container runtime could not be reached at all
    #[error("container runtime unavailable")]
    Runtime(#[source] RuntimeError),

    /// A Docker network required by the topology could not be created
    #[error("failed to create network {name:?}")]
    NetworkCreation {
        name: String,
        #[source]
        source: RuntimeError,
    },

    /// The parallel container batch failed as a unit
    #[error("failed to start ZooKeeper containers")]
    ContainerStart(#[source] RuntimeError),

    /// The runtime could not report the host port for a node's client port
    #[error("failed to get mapped port {port} for ZooKeeper container {hostname:?}")]
    PortMapping {
        hostname: String,
        port: u16,
        #[source]
        source: RuntimeError,
    },

    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// A leader/follower query failed because the underlying probe failed
    #[error("failed to identify ZooKeeper {query}")]
    Query {
        query: &'static str,
        #[source]
        source: ProbeError,
    },

    /// The ensemble never answered a status probe within the retry budget
    #[error("failed to start ZooKeeper cluster within {attempts} attempts: {last_error}")]
    ClusterStartTimeout { attempts: usize, last_error: String },

    /// The start sequence was abandoned through its cancellation token
    #[error("cluster start cancelled during {stage}")]
    Cancelled { stage: &'static str },
}

/// Failures reported by a [`ContainerRuntime`](crate::ContainerRuntime)
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Docker(#[from] bollard::errors::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Readiness port never accepted a connection
    #[error("container {container} did not open port {port} within {timeout:?}")]
    NotReady {
        container: String,
        port: u16,
        timeout: Duration,
    },

    #[error("container {container} has no host binding for {port}/tcp")]
    PortNotMapped { container: String, port: u16 },

    #[error("{0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Batch failed and at least one server carried its own error
    #[error("failed to probe ZooKeeper, server {server:?} raised an error")]
    Server {
        server: String,
        #[source]
        source: StatusError,
    },

    /// Batch failed without any per-server cause
    #[error("failed to probe ZooKeeper")]
    Batch,
}

/// Per-server failure embedded in a [`ServerStats`](crate::ServerStats)
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("no response from {server} within {timeout:?}")]
    Timeout { server: String, timeout: Duration },

    #[error("server is not currently serving requests")]
    NotServing,

    #[error("malformed srvr response: {0}")]
    Malformed(String),
}
