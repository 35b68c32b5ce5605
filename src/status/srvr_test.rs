use std::time::Duration;

use super::*;
use crate::test_utils::enable_logger;
use crate::test_utils::spawn_silent_server;
use crate::test_utils::spawn_srvr_server;
use crate::test_utils::srvr_response;
use crate::test_utils::NOT_SERVING_RESPONSE;
use crate::StatusError;

const TIMEOUT: Duration = Duration::from_millis(500);

#[test]
fn parse_srvr_should_read_every_known_field() {
    let stats = parse_srvr("localhost:2181", &srvr_response("leader")).unwrap();

    assert_eq!(stats.server, "localhost:2181");
    assert!(stats.version.as_deref().unwrap().starts_with("3.6.3"));
    assert_eq!(stats.min_latency, 0);
    assert_eq!(stats.avg_latency, 0.5);
    assert_eq!(stats.max_latency, 3);
    assert_eq!(stats.received, 12);
    assert_eq!(stats.sent, 11);
    assert_eq!(stats.connections, 1);
    assert_eq!(stats.outstanding, 0);
    assert_eq!(stats.epoch, 1);
    assert_eq!(stats.counter, 2);
    assert_eq!(stats.mode, ServerMode::Leader);
    assert_eq!(stats.node_count, 5);
    assert!(stats.error.is_none());
}

#[test]
fn parse_srvr_should_map_modes() {
    let cases = [
        ("follower", ServerMode::Follower),
        ("observer", ServerMode::Observer),
        ("standalone", ServerMode::Standalone),
        ("read-only", ServerMode::Unknown),
    ];
    for (raw, expected) in cases {
        let stats = parse_srvr("s", &srvr_response(raw)).unwrap();
        assert_eq!(stats.mode, expected, "mode {raw}");
    }
}

#[test]
fn parse_srvr_should_ignore_unknown_lines() {
    let response = format!("Proposal sizes last/min/max: -1/-1/-1\n{}", srvr_response("leader"));

    assert!(parse_srvr("s", &response).is_ok());
}

#[test]
fn parse_srvr_should_reject_not_serving_answer() {
    let result = parse_srvr("s", NOT_SERVING_RESPONSE);

    assert!(matches!(result, Err(StatusError::NotServing)));
}

#[test]
fn parse_srvr_should_reject_answer_without_mode() {
    let result = parse_srvr("s", "srvr is not executed because it is not in the whitelist.\n");

    assert!(matches!(result, Err(StatusError::Malformed(_))));
}

#[test]
fn parse_srvr_should_reject_garbage_numbers() {
    let response = srvr_response("leader").replace("Received: 12", "Received: many");

    assert!(matches!(parse_srvr("s", &response), Err(StatusError::Malformed(_))));
}

#[tokio::test]
async fn srvr_should_report_every_server_in_order() {
    enable_logger();
    let leader = spawn_srvr_server(srvr_response("leader")).await;
    let follower = spawn_srvr_server(srvr_response("follower")).await;
    let servers = vec![follower.to_string(), leader.to_string()];

    let batch = SrvrClient.srvr(&servers, TIMEOUT).await;

    assert!(batch.ok);
    assert_eq!(batch.stats.len(), 2);
    assert_eq!(batch.stats[0].server, follower.to_string());
    assert_eq!(batch.stats[0].mode, ServerMode::Follower);
    assert_eq!(batch.stats[1].mode, ServerMode::Leader);
}

#[tokio::test]
async fn srvr_should_embed_per_server_errors_and_fail_batch() {
    enable_logger();
    let healthy = spawn_srvr_server(srvr_response("follower")).await;
    let starting = spawn_srvr_server(NOT_SERVING_RESPONSE).await;
    let servers = vec![healthy.to_string(), starting.to_string()];

    let batch = SrvrClient.srvr(&servers, TIMEOUT).await;

    assert!(!batch.ok);
    assert!(batch.stats[0].error.is_none());
    assert!(matches!(batch.stats[1].error, Some(StatusError::NotServing)));
    assert_eq!(batch.stats[1].server, starting.to_string());
}

#[tokio::test]
async fn srvr_should_time_out_silent_servers() {
    let silent = spawn_silent_server().await;
    let servers = vec![silent.to_string()];

    let batch = SrvrClient.srvr(&servers, Duration::from_millis(50)).await;

    assert!(!batch.ok);
    assert!(matches!(
        batch.stats[0].error,
        Some(StatusError::Timeout { .. })
    ));
}

#[tokio::test]
async fn srvr_should_report_connection_errors() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let batch = SrvrClient.srvr(&[addr.to_string()], TIMEOUT).await;

    assert!(!batch.ok);
    assert!(matches!(batch.stats[0].error, Some(StatusError::Io(_))));
}

#[tokio::test]
async fn srvr_with_no_servers_should_succeed_empty() {
    let batch = SrvrClient.srvr(&[], TIMEOUT).await;

    assert!(batch.ok);
    assert!(batch.stats.is_empty());
}
