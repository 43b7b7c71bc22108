//! End-to-end integration tests for the relay
//!
//! Each test stands up a real TCP server, runs the relay against it with a
//! unique pipe name, and drives the pipe side as a client, verifying the
//! byte-level relay properties across both directions.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

use pipe2tcp::relay::{self, transport};
use pipe2tcp::RelayConfig;

static PIPE_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Pipe name unique to this process and test
fn unique_pipe_name(tag: &str) -> String {
    let n = PIPE_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("test-{}-{}-{}", tag, std::process::id(), n)
}

/// Start a TCP echo server on an ephemeral port; echoes every connection
async fn spawn_echo_server() -> (u16, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind echo server");
    let port = listener.local_addr().expect("local addr").port();

    let handle = tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let (mut rd, mut wr) = stream.split();
                let _ = tokio::io::copy(&mut rd, &mut wr).await;
            });
        }
    });

    (port, handle)
}

/// Start the relay for the given pipe name and remote port
fn spawn_relay(pipe_name: &str, port: u16) -> JoinHandle<pipe2tcp::Result<()>> {
    let config = RelayConfig {
        host: "127.0.0.1".to_string(),
        port,
        pipe_name: pipe_name.to_string(),
    };
    tokio::spawn(relay::run(config))
}

/// Connect to the relay's pipe endpoint, retrying until the listener is up
async fn connect_pipe(pipe_name: &str) -> transport::Stream {
    let deadline = Duration::from_secs(5);
    timeout(deadline, async {
        loop {
            match transport::connect(pipe_name).await {
                Ok(stream) => return stream,
                Err(_) => sleep(Duration::from_millis(10)).await,
            }
        }
    })
    .await
    .expect("pipe endpoint never came up")
}

async fn read_exact(stream: &mut (impl AsyncReadExt + Unpin), len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    timeout(Duration::from_secs(5), stream.read_exact(&mut buf))
        .await
        .expect("read timed out")
        .expect("read failed");
    buf
}

#[tokio::test(flavor = "multi_thread")]
async fn ping_round_trips_through_echo_server() {
    let (port, _server) = spawn_echo_server().await;
    let pipe_name = unique_pipe_name("ping");
    let relay = spawn_relay(&pipe_name, port);

    let mut client = connect_pipe(&pipe_name).await;
    client.write_all(b"ping").await.expect("write ping");

    assert_eq!(read_exact(&mut client, 4).await, b"ping");

    relay.abort();
}

#[tokio::test(flavor = "multi_thread")]
async fn chunked_writes_arrive_in_order_and_byte_exact() {
    let (port, _server) = spawn_echo_server().await;
    let pipe_name = unique_pipe_name("order");
    let relay = spawn_relay(&pipe_name, port);

    let mut client = connect_pipe(&pipe_name).await;

    // Irregular chunk sizes, including ones larger than the 4096-byte read
    // chunk, so the relay re-chunks on the way through.
    let mut sent = Vec::new();
    for i in 0..100u32 {
        let len = 1 + ((i * 379) % 6000) as usize;
        let chunk: Vec<u8> = (0..len).map(|j| ((i as usize + j) % 251) as u8).collect();
        client.write_all(&chunk).await.expect("write chunk");
        sent.extend_from_slice(&chunk);
        if i % 7 == 0 {
            // Give the relay a chance to drain mid-stream sometimes
            sleep(Duration::from_millis(1)).await;
        }
    }

    let echoed = read_exact(&mut client, sent.len()).await;
    assert_eq!(echoed, sent, "echoed bytes differ from sent bytes");

    relay.abort();
}

#[tokio::test(flavor = "multi_thread")]
async fn relay_survives_tcp_disconnect_and_resumes() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind tcp server");
    let port = listener.local_addr().expect("local addr").port();

    let server = tokio::spawn(async move {
        // First session: swallow one read, then hang up on the relay.
        let (mut first, _) = listener.accept().await.expect("first accept");
        let mut buf = [0u8; 64];
        let _ = first.read(&mut buf).await;
        drop(first);

        // The relay reconnects on its own; echo the second session.
        let (mut second, _) = listener.accept().await.expect("second accept");
        let (mut rd, mut wr) = second.split();
        let _ = tokio::io::copy(&mut rd, &mut wr).await;
    });

    let pipe_name = unique_pipe_name("reconnect");
    let relay = spawn_relay(&pipe_name, port);

    let mut client = connect_pipe(&pipe_name).await;
    client.write_all(b"before-drop").await.expect("first write");

    // Wait for the server to have dropped the first connection and the
    // relay to have re-established before sending the payload we verify.
    sleep(Duration::from_millis(200)).await;

    client.write_all(b"after-drop").await.expect("second write");
    assert_eq!(read_exact(&mut client, 10).await, b"after-drop");

    // Nothing may be delivered twice: the stream must be quiet now.
    let mut extra = [0u8; 16];
    let quiet = timeout(Duration::from_millis(200), client.read(&mut extra)).await;
    assert!(quiet.is_err(), "unexpected extra bytes after resumption");

    relay.abort();
    server.abort();
}

#[tokio::test(flavor = "multi_thread")]
async fn second_pipe_client_does_not_corrupt_active_session() {
    let (port, _server) = spawn_echo_server().await;
    let pipe_name = unique_pipe_name("single");
    let relay = spawn_relay(&pipe_name, port);

    let mut active = connect_pipe(&pipe_name).await;
    active.write_all(b"hello").await.expect("write hello");
    assert_eq!(read_exact(&mut active, 5).await, b"hello");

    // A second client connecting and writing must not reach the relay while
    // the first session is still being serviced.
    let mut intruder = connect_pipe(&pipe_name).await;
    let _ = intruder.write_all(b"JUNKJUNKJUNK").await;

    active.write_all(b"again").await.expect("write again");
    assert_eq!(read_exact(&mut active, 5).await, b"again");

    relay.abort();
}
