use tracing::debug;
use tracing::error;

use crate::ContainerHandle;
use crate::ContainerRuntime;
use crate::Error;
use crate::Result;

/// Host port of each container's client port, index-aligned with `containers`
pub(crate) async fn resolve_client_ports(
    runtime: &dyn ContainerRuntime,
    containers: &[ContainerHandle],
    client_port: u16,
) -> Result<Vec<u16>> {
    let mut ports = Vec::with_capacity(containers.len());

    for container in containers {
        let host_port = runtime
            .mapped_port(container, client_port)
            .await
            .map_err(|source| {
                error!(container = %container.hostname, error = %source, "No mapped client port");
                Error::PortMapping {
                    hostname: container.hostname.clone(),
                    port: client_port,
                    source,
                }
            })?;

        debug!(container = %container.hostname, client_port, host_port, "Resolved client port");
        ports.push(host_port);
    }

    Ok(ports)
}
