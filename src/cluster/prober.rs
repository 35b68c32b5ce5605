use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::utils::async_task::run_cancellable;
use crate::ConvergencePolicy;
use crate::Error;
use crate::ProbeError;
use crate::Result;
use crate::ServerMode;
use crate::ServerStats;
use crate::StatusProbe;

/// Leader/follower queries over a fixed client port table
pub struct ConvergenceProber {
    probe: Arc<dyn StatusProbe>,
    /// `host:port` per node, in ordinal order
    servers: Vec<String>,
    timeout: Duration,
}

impl ConvergenceProber {
    pub fn new(
        probe: Arc<dyn StatusProbe>,
        servers: Vec<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            probe,
            servers,
            timeout,
        }
    }

    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    /// Status of every node, in ordinal order
    pub async fn probe(&self) -> Result<Vec<ServerStats>> {
        Ok(self.probe_batch().await?)
    }

    async fn probe_batch(&self) -> std::result::Result<Vec<ServerStats>, ProbeError> {
        let batch = self.probe.srvr(&self.servers, self.timeout).await;
        if batch.ok {
            return Ok(batch.stats);
        }

        let cause = self
            .servers
            .iter()
            .zip(batch.stats)
            .find_map(|(server, stats)| stats.error.map(|source| (server.clone(), source)));

        Err(match cause {
            Some((server, source)) => ProbeError::Server { server, source },
            None => ProbeError::Batch,
        })
    }

    /// First leader in ordinal order; `None` while no node claims leadership
    pub async fn leader(&self) -> Result<Option<String>> {
        let stats = self
            .probe_batch()
            .await
            .map_err(|source| Error::Query { query: "leader", source })?;

        Ok(stats
            .into_iter()
            .find(|s| s.mode == ServerMode::Leader)
            .map(|s| s.server))
    }

    pub async fn followers(&self) -> Result<Vec<String>> {
        let stats = self
            .probe_batch()
            .await
            .map_err(|source| Error::Query {
                query: "followers",
                source,
            })?;

        Ok(stats
            .into_iter()
            .filter(|s| s.mode == ServerMode::Follower)
            .map(|s| s.server)
            .collect())
    }

    /// Polls [`leader`](Self::leader) until one call succeeds.
    ///
    /// Makes at most `retry_count` attempts and sleeps `retry_interval` only
    /// between two attempts, never after the last one.
    pub async fn wait_for_convergence(
        &self,
        policy: &ConvergencePolicy,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let mut last_error = None;
        debug!(
            retry_count = policy.retry_count,
            max_wait = ?policy.max_wait(),
            "Waiting for ZooKeeper ensemble to converge"
        );

        for attempt in 1..=policy.retry_count {
            match run_cancellable(cancel, "convergence wait", || self.leader()).await {
                Ok(leader) => {
                    info!(attempt, leader = ?leader, "ZooKeeper ensemble converged");
                    return Ok(());
                }
                Err(e @ Error::Cancelled { .. }) => return Err(e),
                Err(e) => {
                    warn!(attempt, retry_count = policy.retry_count, error = %error_chain(&e), "Ensemble not converged yet");
                    last_error = Some(e);
                }
            }

            if attempt < policy.retry_count {
                debug!(interval = ?policy.retry_interval(), "Waiting before next probe");
                run_cancellable(cancel, "convergence wait", || async move {
                    sleep(policy.retry_interval()).await;
                    Ok(())
                })
                .await?;
            }
        }

        Err(Error::ClusterStartTimeout {
            attempts: policy.retry_count,
            last_error: last_error
                .map(|e| error_chain(&e))
                .unwrap_or_else(|| "no probe attempted".to_string()),
        })
    }
}

/// `outer: inner: root` rendering of an error and its sources
pub(crate) fn error_chain(e: &dyn std::error::Error) -> String {
    let mut rendered = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        rendered.push_str(": ");
        rendered.push_str(&s.to_string());
        source = s.source();
    }
    rendered
}
