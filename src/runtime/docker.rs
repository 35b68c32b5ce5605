//! [`ContainerRuntime`] backed by the local Docker daemon (via bollard).

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bollard::container::Config;
use bollard::container::CreateContainerOptions;
use bollard::container::NetworkingConfig;
use bollard::container::StartContainerOptions;
use bollard::errors::Error as DockerError;
use bollard::image::CreateImageOptions;
use bollard::models::EndpointSettings;
use bollard::models::HostConfig;
use bollard::models::PortMap;
use bollard::network::ConnectNetworkOptions;
use bollard::network::CreateNetworkOptions;
use bollard::network::ListNetworksOptions;
use bollard::Docker;
use futures::future::try_join_all;
use futures::StreamExt;
use tokio::time::sleep;
use tokio::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::ContainerHandle;
use super::ContainerRuntime;
use crate::constants::OWNER_LABEL;
use crate::constants::READINESS_CHECK_TIMEOUT_MS;
use crate::constants::READINESS_POLL_INTERVAL_MS;
use crate::utils::net::address_str;
use crate::utils::net::is_server_ready;
use crate::LaunchRequest;
use crate::RuntimeError;
use crate::WaitStrategy;

pub struct DockerRuntime {
    docker: Docker,
    /// Host published ports are reachable on
    host: String,
}

impl DockerRuntime {
    /// Connects with the platform defaults (`DOCKER_HOST` or the local socket)
    pub async fn connect(host: impl Into<String>) -> Result<Self, RuntimeError> {
        let docker = Docker::connect_with_local_defaults()?;
        docker.ping().await?;

        let host = host.into();
        info!(host = %host, "Connected to Docker daemon");
        Ok(Self::with_client(docker, host))
    }

    pub fn with_client(
        docker: Docker,
        host: impl Into<String>,
    ) -> Self {
        Self {
            docker,
            host: host.into(),
        }
    }

    /// Pulls `image` unless it is already present locally
    async fn pull_image(
        &self,
        image: &str,
    ) -> Result<(), RuntimeError> {
        if self.docker.inspect_image(image).await.is_ok() {
            debug!(image = %image, "Image present locally");
            return Ok(());
        }

        info!(image = %image, "Pulling image");
        let options = CreateImageOptions {
            from_image: image,
            ..Default::default()
        };
        let mut stream = self.docker.create_image(Some(options), None, None);
        while let Some(progress) = stream.next().await {
            if let Some(status) = progress?.status {
                debug!(status = %status, "Pull progress");
            }
        }
        Ok(())
    }

    async fn start_one(
        &self,
        request: &LaunchRequest,
    ) -> Result<ContainerHandle, RuntimeError> {
        let name = container_name(&request.hostname);
        let options = CreateContainerOptions {
            name: name.as_str(),
            platform: None,
        };
        let response = self
            .docker
            .create_container(Some(options), container_config(request))
            .await?;

        // Only the first network can be given at creation time
        for network in request.networks.iter().skip(1) {
            let options = ConnectNetworkOptions {
                container: response.id.as_str(),
                endpoint_config: endpoint(&request.hostname),
            };
            self.docker.connect_network(network, options).await?;
        }

        self.docker
            .start_container(&response.id, None::<StartContainerOptions<String>>)
            .await?;
        info!(container = %name, id = %response.id, "Started container");

        let handle = ContainerHandle {
            id: response.id,
            hostname: request.hostname.clone(),
        };
        self.wait_until_ready(&handle, &request.wait_for).await?;
        Ok(handle)
    }

    async fn wait_until_ready(
        &self,
        container: &ContainerHandle,
        strategy: &WaitStrategy,
    ) -> Result<(), RuntimeError> {
        let WaitStrategy::HostPort { port, timeout } = strategy;
        let started = Instant::now();

        loop {
            let answered = match self.mapped_port(container, *port).await {
                Ok(host_port) => {
                    let addr = address_str(&self.host, host_port);
                    is_server_ready(&addr, Duration::from_millis(READINESS_CHECK_TIMEOUT_MS)).await
                }
                Err(_) => false,
            };

            match readiness(container, *port, answered, started.elapsed(), *timeout)? {
                Readiness::Ready => return Ok(()),
                Readiness::Pending => sleep(Duration::from_millis(READINESS_POLL_INTERVAL_MS)).await,
            }
        }
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn create_network(
        &self,
        name: &str,
    ) -> Result<(), RuntimeError> {
        let filters = HashMap::from([("name".to_string(), vec![name.to_string()])]);
        let existing = self
            .docker
            .list_networks(Some(ListNetworksOptions { filters }))
            .await?;

        // the name filter matches substrings
        if existing.iter().any(|n| n.name.as_deref() == Some(name)) {
            debug!(network = %name, "Using existing network");
            return Ok(());
        }

        let options = CreateNetworkOptions {
            name,
            driver: "bridge",
            labels: HashMap::from([(OWNER_LABEL, "true")]),
            ..Default::default()
        };
        match self.docker.create_network(options).await {
            Ok(response) => {
                info!(network = %name, id = ?response.id, "Created network");
                Ok(())
            }
            // lost a race with a concurrent creator
            Err(DockerError::DockerResponseServerError { status_code: 409, .. }) => {
                debug!(network = %name, "Network created concurrently");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn start_containers(
        &self,
        requests: &[LaunchRequest],
    ) -> Result<Vec<ContainerHandle>, RuntimeError> {
        let images: BTreeSet<&str> = requests.iter().map(|r| r.image.as_str()).collect();
        for image in images {
            self.pull_image(image).await?;
        }

        try_join_all(requests.iter().map(|r| self.start_one(r))).await
    }

    async fn mapped_port(
        &self,
        container: &ContainerHandle,
        port: u16,
    ) -> Result<u16, RuntimeError> {
        let inspect = self.docker.inspect_container(&container.id, None).await?;
        let ports = inspect.network_settings.and_then(|s| s.ports);

        host_port(ports.as_ref(), port).ok_or_else(|| RuntimeError::PortNotMapped {
            container: container.hostname.clone(),
            port,
        })
    }
}

/// Outcome of one readiness check
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Readiness {
    Ready,
    Pending,
}

/// Decides what a readiness check means once `elapsed` of `timeout` is used
pub(crate) fn readiness(
    container: &ContainerHandle,
    port: u16,
    answered: bool,
    elapsed: Duration,
    timeout: Duration,
) -> Result<Readiness, RuntimeError> {
    if answered {
        debug!(container = %container.hostname, port, ?elapsed, "Container ready");
        return Ok(Readiness::Ready);
    }

    if elapsed >= timeout {
        warn!(container = %container.hostname, port, "Container never became ready");
        return Err(RuntimeError::NotReady {
            container: container.hostname.clone(),
            port,
            timeout,
        });
    }

    Ok(Readiness::Pending)
}

/// Unique per start so repeated test runs never collide on names
pub(crate) fn container_name(hostname: &str) -> String {
    let suffix = nanoid::nanoid!(8, &nanoid::alphabet::SAFE);
    format!("{}-{}", hostname, suffix.to_lowercase())
}

pub(crate) fn container_config(request: &LaunchRequest) -> Config<String> {
    let env: Vec<String> = request.env.iter().map(|(k, v)| format!("{}={}", k, v)).collect();

    let exposed_ports: HashMap<String, HashMap<(), ()>> = request
        .exposed_ports
        .iter()
        .map(|p| (format!("{}/tcp", p), HashMap::new()))
        .collect();

    let first_network = request.networks.first().cloned();
    let host_config = HostConfig {
        publish_all_ports: Some(true),
        network_mode: first_network.clone(),
        ..Default::default()
    };
    let networking_config = first_network.map(|network| NetworkingConfig {
        endpoints_config: HashMap::from([(network, endpoint(&request.hostname))]),
    });

    Config {
        image: Some(request.image.clone()),
        hostname: Some(request.hostname.clone()),
        env: Some(env),
        exposed_ports: Some(exposed_ports),
        labels: Some(HashMap::from([(OWNER_LABEL.to_string(), "true".to_string())])),
        host_config: Some(host_config),
        networking_config,
        ..Default::default()
    }
}

/// Peers resolve each other by hostname through this alias
fn endpoint(hostname: &str) -> EndpointSettings {
    EndpointSettings {
        aliases: Some(vec![hostname.to_string()]),
        ..Default::default()
    }
}

pub(crate) fn host_port(
    ports: Option<&PortMap>,
    port: u16,
) -> Option<u16> {
    ports?
        .get(&format!("{}/tcp", port))?
        .as_ref()?
        .iter()
        .filter_map(|b| b.host_port.as_deref())
        .find_map(|p| p.parse().ok())
}
