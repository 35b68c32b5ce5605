//! Configuration of a test ensemble.
//!
//! A config is resolved from, in increasing priority:
//! 1. Default values (hardcoded)
//! 2. Environment variables prefixed with `ZK_CLUSTER__` (only through
//!    [`ClusterConfig::from_env`])
//! 3. Option mutators, applied in the order given
//!

mod cluster;
mod options;
mod retry;
pub use cluster::*;
pub use options::*;
pub use retry::*;


//---
use config::Config;
use config::Environment;

use crate::constants::ENV_PREFIX;
use crate::Result;

impl ClusterConfig {
    /// Defaults overridden by `ZK_CLUSTER__*` environment variables.
    ///
    /// Nested fields use `__` as separator, e.g.
    /// `ZK_CLUSTER__CONVERGENCE__RETRY_COUNT=5`; `ZK_CLUSTER__NETWORKS` takes
    /// a comma separated list.
    pub fn from_env() -> Result<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("networks"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// [`from_env`](Self::from_env) followed by `options`
    pub fn from_env_with_options<I>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = ClusterOption>,
    {
        Ok(Self::from_env()?.apply(options))
    }
}
