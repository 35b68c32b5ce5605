//! Mock collaborators for cluster bring-up tests.
//!
//! The runtime and status probe are [mockall] mocks, so no Docker daemon is
//! needed; the `srvr` client is tested against real in-process TCP listeners
//! that answer like a ZooKeeper server would.
//!
//! [mockall]: https://docs.rs/mockall/latest/mockall/

use std::net::SocketAddr;

use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use crate::ContainerHandle;
use crate::LaunchRequest;
use crate::MockContainerRuntime;
use crate::ServerStats;
use crate::SrvrBatch;

/// Host port the mocked runtime maps node `ordinal`'s client port to
pub const MOCK_HOST_PORT_BASE: u16 = 49150;

pub fn handle_for(
    ordinal: usize,
    request: &LaunchRequest,
) -> ContainerHandle {
    ContainerHandle {
        id: format!("container-{}", ordinal),
        hostname: request.hostname.clone(),
    }
}

/// Runtime on which every network, container and port lookup succeeds
pub fn mock_runtime_all_ok() -> MockContainerRuntime {
    let mut runtime = MockContainerRuntime::new();
    runtime.expect_create_network().returning(|_| Ok(()));
    runtime.expect_start_containers().returning(|requests| {
        Ok(requests
            .iter()
            .enumerate()
            .map(|(i, r)| handle_for(i + 1, r))
            .collect())
    });
    runtime.expect_mapped_port().returning(|container, _| {
        let ordinal: u16 = container.id.trim_start_matches("container-").parse().unwrap();
        Ok(MOCK_HOST_PORT_BASE + ordinal)
    });
    runtime
}

pub fn batch(
    stats: Vec<ServerStats>,
    ok: bool,
) -> SrvrBatch {
    SrvrBatch { stats, ok }
}

/// Listener that answers every `srvr` with `response` and closes
pub async fn spawn_srvr_server(response: impl Into<String>) -> SocketAddr {
    let response = response.into();
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind srvr listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let response = response.clone();
            tokio::spawn(async move {
                let mut command = [0u8; 4];
                if socket.read_exact(&mut command).await.is_ok() && &command == b"srvr" {
                    let _ = socket.write_all(response.as_bytes()).await;
                }
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Listener that accepts connections but never answers
pub async fn spawn_silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind silent listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// Listener that accepts and immediately closes, like Docker's port proxy
/// when nothing listens inside the container yet
pub async fn spawn_closing_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind closing listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });

    addr
}
