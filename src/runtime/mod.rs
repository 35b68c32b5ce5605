//! Container runtime boundary.
//!
//! The cluster only ever needs three things from a runtime: make sure a
//! network exists, start a batch of containers, and report which host port a
//! container port was published on. [`DockerRuntime`] is the production
//! implementation; tests use `MockContainerRuntime`.

mod docker;
pub use docker::*;


use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::LaunchRequest;
use crate::RuntimeError;

/// Opaque reference to a started container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHandle {
    pub id: String,
    /// Hostname the container was launched under
    pub hostname: String,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContainerRuntime: Send + Sync + 'static {
    /// Creates `name`, or succeeds if it already exists
    async fn create_network(
        &self,
        name: &str,
    ) -> Result<(), RuntimeError>;

    /// Starts every request concurrently and waits until each one meets its
    /// readiness condition.
    ///
    /// Handles are returned in request order. If any container fails the
    /// whole call fails; containers that already started are left running.
    async fn start_containers(
        &self,
        requests: &[LaunchRequest],
    ) -> Result<Vec<ContainerHandle>, RuntimeError>;

    /// Host port that `port/tcp` of `container` is published on
    async fn mapped_port(
        &self,
        container: &ContainerHandle,
        port: u16,
    ) -> Result<u16, RuntimeError>;
}
