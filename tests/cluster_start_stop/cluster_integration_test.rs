use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;
use zk_testcluster::config::with_hostname_prefix;
use zk_testcluster::config::with_networks;
use zk_testcluster::config::with_node_count;
use zk_testcluster::config::with_retry_interval;
use zk_testcluster::Error;
use zk_testcluster::ServerMode;
use zk_testcluster::ZooKeeperCluster;

const NETWORK: &str = "zk-testcluster-it";

/// Case 1: a 3 node ensemble elects exactly one leader and two followers
#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn test_three_node_ensemble_case1() -> Result<(), Error> {
    crate::enable_logger();

    let cluster = ZooKeeperCluster::with_options([
        with_node_count(3),
        with_hostname_prefix("case1-zk"),
        with_networks([NETWORK]),
        with_retry_interval(Duration::from_millis(1000)),
    ])
    .start_with_docker(&CancellationToken::new())
    .await?;
    info!(connect = %cluster.connect_string(), "ensemble started");

    assert_eq!(cluster.containers().len(), 3);
    assert_eq!(cluster.client_ports().len(), 3);

    let leader = cluster.leader().await?;
    assert!(leader.is_some());
    let followers = cluster.followers().await?;
    assert_eq!(followers.len(), 2);
    assert!(!followers.contains(leader.as_ref().unwrap()));

    Ok(())
}

/// Case 2: a single node is reachable without a convergence wait
#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn test_single_node_case2() -> Result<(), Error> {
    crate::enable_logger();

    let cluster = ZooKeeperCluster::with_options([
        with_hostname_prefix("case2-zk"),
        with_networks([NETWORK]),
    ])
    .start_with_docker(&CancellationToken::new())
    .await?;

    let stats = cluster.probe().await?;
    assert_eq!(stats.len(), 1);
    assert!(stats[0].error.is_none());
    assert!(matches!(stats[0].mode, ServerMode::Standalone | ServerMode::Leader));

    Ok(())
}
