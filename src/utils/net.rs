use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::constants::SRVR_COMMAND;

/// accept `host:port` where host is an ip like 127.0.0.1 or a name like localhost
///
/// Ready means the server answered `srvr` with at least one byte within
/// `duration`. An accepted connection alone does not count: Docker's port
/// proxy accepts on the host side before anything listens in the container.
pub(crate) async fn is_server_ready(
    addr: &str,
    duration: Duration,
) -> bool {
    matches!(timeout(duration, first_answer(addr)).await, Ok(Ok(n)) if n > 0)
}

async fn first_answer(addr: &str) -> std::io::Result<usize> {
    let mut stream = TcpStream::connect(addr).await?;
    stream.write_all(SRVR_COMMAND).await?;

    let mut buf = [0u8; 1];
    stream.read(&mut buf).await
}

/// `host:port` string the status protocol expects
pub(crate) fn address_str(
    host: &str,
    port: u16,
) -> String {
    format!("{}:{}", host, port)
}
