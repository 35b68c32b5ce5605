use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use super::ServerMode;
use super::ServerStats;
use super::SrvrBatch;
use super::StatusProbe;
use crate::constants::SRVR_COMMAND;
use crate::StatusError;

/// Sends `srvr` over a fresh TCP connection per server
#[derive(Debug, Default, Clone, Copy)]
pub struct SrvrClient;

impl SrvrClient {
    async fn query(
        server: &str,
        duration: Duration,
    ) -> Result<ServerStats, StatusError> {
        let response = timeout(duration, Self::exchange(server))
            .await
            .map_err(|_| StatusError::Timeout {
                server: server.to_string(),
                timeout: duration,
            })??;

        parse_srvr(server, &response)
    }

    async fn exchange(server: &str) -> Result<String, StatusError> {
        let mut stream = TcpStream::connect(server).await?;
        stream.write_all(SRVR_COMMAND).await?;

        // the server closes the connection once the answer is written
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[async_trait]
impl StatusProbe for SrvrClient {
    async fn srvr(
        &self,
        servers: &[String],
        timeout: Duration,
    ) -> SrvrBatch {
        let mut batch = SrvrBatch {
            stats: Vec::with_capacity(servers.len()),
            ok: true,
        };

        for server in servers {
            match Self::query(server, timeout).await {
                Ok(stats) => {
                    debug!(server = %server, mode = %stats.mode, "srvr answered");
                    batch.stats.push(stats);
                }
                Err(e) => {
                    debug!(server = %server, error = %e, "srvr failed");
                    batch.ok = false;
                    batch.stats.push(ServerStats::failed(server.as_str(), e));
                }
            }
        }

        batch
    }
}

/// Parses the `key: value` lines of a `srvr` answer.
///
/// Unknown keys are ignored; a missing `Mode:` line is an error.
pub fn parse_srvr(
    server: &str,
    response: &str,
) -> Result<ServerStats, StatusError> {
    if response.contains("not currently serving requests") {
        return Err(StatusError::NotServing);
    }

    let mut stats = ServerStats {
        server: server.to_string(),
        ..Default::default()
    };
    let mut mode = None;

    for line in response.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "Zookeeper version" => stats.version = Some(value.to_string()),
            "Latency min/avg/max" => {
                let parts: Vec<&str> = value.split('/').collect();
                let [min, avg, max] = parts.as_slice() else {
                    return Err(malformed(key, value));
                };
                stats.min_latency = parse_number(key, min)?;
                stats.avg_latency = avg.parse().map_err(|_| malformed(key, value))?;
                stats.max_latency = parse_number(key, max)?;
            }
            "Received" => stats.received = parse_number(key, value)?,
            "Sent" => stats.sent = parse_number(key, value)?,
            "Connections" => stats.connections = parse_number(key, value)?,
            "Outstanding" => stats.outstanding = parse_number(key, value)?,
            "Zxid" => {
                let zxid = u64::from_str_radix(value.trim_start_matches("0x"), 16)
                    .map_err(|_| malformed(key, value))?;
                stats.epoch = (zxid >> 32) as u32;
                stats.counter = zxid as u32;
            }
            "Mode" => mode = Some(ServerMode::from(value)),
            "Node count" => stats.node_count = parse_number(key, value)?,
            _ => {}
        }
    }

    stats.mode = mode.ok_or_else(|| StatusError::Malformed(format!("no Mode line in answer from {}", server)))?;
    Ok(stats)
}

fn parse_number(
    key: &str,
    value: &str,
) -> Result<u64, StatusError> {
    value.trim().parse().map_err(|_| malformed(key, value))
}

fn malformed(
    key: &str,
    value: &str,
) -> StatusError {
    StatusError::Malformed(format!("{}: {:?}", key.trim(), value))
}
