use tokio_util::sync::CancellationToken;
use tracing::error;
use tracing::info;

use crate::utils::async_task::run_cancellable;
use crate::ContainerHandle;
use crate::ContainerRuntime;
use crate::Error;
use crate::LaunchRequest;
use crate::Result;

/// Creates every network in order; the first failure aborts the start
pub(crate) async fn ensure_networks(
    runtime: &dyn ContainerRuntime,
    networks: &[String],
    cancel: &CancellationToken,
) -> Result<()> {
    for name in networks {
        run_cancellable(cancel, "network creation", || async move {
            runtime.create_network(name).await.map_err(|source| {
                error!(network = %name, error = %source, "Failed to create network");
                Error::NetworkCreation {
                    name: name.clone(),
                    source,
                }
            })
        })
        .await?;
    }

    info!(networks = ?networks, "Networks ready");
    Ok(())
}

/// Starts all nodes as one batch; handles come back in ordinal order
pub(crate) async fn start_all(
    runtime: &dyn ContainerRuntime,
    requests: &[LaunchRequest],
    cancel: &CancellationToken,
) -> Result<Vec<ContainerHandle>> {
    let containers = run_cancellable(cancel, "container start", || async move {
        runtime.start_containers(requests).await.map_err(|source| {
            error!(nodes = requests.len(), error = %source, "Failed to start ZooKeeper containers");
            Error::ContainerStart(source)
        })
    })
    .await?;

    info!(nodes = containers.len(), "ZooKeeper containers started");
    Ok(containers)
}
