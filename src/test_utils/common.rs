use crate::ServerMode;
use crate::ServerStats;

static LOGGER_INIT: once_cell::sync::Lazy<()> = once_cell::sync::Lazy::new(|| {
    env_logger::init();
});

pub fn enable_logger() {
    *LOGGER_INIT;
    println!("setup logger for unit test.");
}

/// `srvr` answer of a healthy server in `mode`
pub fn srvr_response(mode: &str) -> String {
    format!(
        "Zookeeper version: 3.6.3--6401e4ad2087061bc6b9f80dec2d69f2e3c8660a, built on 04/08/2021 16:35 GMT\n\
         Latency min/avg/max: 0/0.5/3\n\
         Received: 12\n\
         Sent: 11\n\
         Connections: 1\n\
         Outstanding: 0\n\
         Zxid: 0x100000002\n\
         Mode: {}\n\
         Node count: 5\n",
        mode
    )
}

pub const NOT_SERVING_RESPONSE: &str = "This ZooKeeper instance is not currently serving requests\n";

/// Successful stats for `server` reporting `mode`
pub fn stats(
    server: &str,
    mode: ServerMode,
) -> ServerStats {
    ServerStats {
        server: server.to_string(),
        mode,
        ..Default::default()
    }
}
