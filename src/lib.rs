//! Ephemeral ZooKeeper ensembles in Docker containers, for integration tests.
//!
//! ```ignore
//! use tokio_util::sync::CancellationToken;
//! use zk_testcluster::config::with_node_count;
//! use zk_testcluster::ZooKeeperCluster;
//!
//! let cluster = ZooKeeperCluster::with_options([with_node_count(3)])
//!     .start_with_docker(&CancellationToken::new())
//!     .await?;
//! println!("connect to {}", cluster.connect_string());
//! ```

mod cluster;
pub mod config;
mod constants;
mod errors;
mod runtime;
mod status;
mod topology;
pub(crate) mod utils;

pub use cluster::*;
pub use config::*;
pub use constants::DEFAULT_IMAGE;
pub use constants::ENV_CLIENT_PORT;
pub use constants::ENV_SERVERS;
pub use constants::ENV_SERVER_ID;
pub use errors::*;
pub use runtime::*;
pub use status::*;
pub use topology::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
