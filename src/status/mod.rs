//! ZooKeeper status protocol boundary.
//!
//! A status probe sends the `srvr` four-letter word to each server of a
//! batch and reports what every server said about itself. [`SrvrClient`] is
//! the TCP implementation; tests use `MockStatusProbe`.

mod srvr;
pub use srvr::*;

#[cfg(test)]
mod srvr_test;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::StatusError;

/// Role a server reports in its `Mode:` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerMode {
    Leader,
    Follower,
    Observer,
    Standalone,
    #[default]
    Unknown,
}

impl From<&str> for ServerMode {
    fn from(mode: &str) -> Self {
        match mode.trim() {
            "leader" => ServerMode::Leader,
            "follower" => ServerMode::Follower,
            "observer" => ServerMode::Observer,
            "standalone" => ServerMode::Standalone,
            _ => ServerMode::Unknown,
        }
    }
}

impl fmt::Display for ServerMode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = match self {
            ServerMode::Leader => "leader",
            ServerMode::Follower => "follower",
            ServerMode::Observer => "observer",
            ServerMode::Standalone => "standalone",
            ServerMode::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// One server's answer to `srvr`; recomputed on every probe
#[derive(Debug, Default)]
pub struct ServerStats {
    /// `host:port` the query was sent to
    pub server: String,
    pub version: Option<String>,
    pub min_latency: u64,
    pub avg_latency: f64,
    pub max_latency: u64,
    pub received: u64,
    pub sent: u64,
    pub connections: u64,
    pub outstanding: u64,
    /// High 32 bits of the last zxid
    pub epoch: u32,
    /// Low 32 bits of the last zxid
    pub counter: u32,
    pub mode: ServerMode,
    pub node_count: u64,
    /// Set when this server could not be queried or answered garbage
    pub error: Option<StatusError>,
}

impl ServerStats {
    pub fn failed(
        server: impl Into<String>,
        error: StatusError,
    ) -> Self {
        Self {
            server: server.into(),
            error: Some(error),
            ..Default::default()
        }
    }
}

/// Result of one batch status query
#[derive(Debug, Default)]
pub struct SrvrBatch {
    /// One entry per queried server, in query order
    pub stats: Vec<ServerStats>,
    /// False when the batch as a whole failed
    pub ok: bool,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatusProbe: Send + Sync + 'static {
    /// Queries every `host:port` in `servers`, each bounded by `timeout`
    async fn srvr(
        &self,
        servers: &[String],
        timeout: Duration,
    ) -> SrvrBatch;
}
