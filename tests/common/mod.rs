//! Shared utilities for integration testing.

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use retry_interceptor::auth::FaultInjector;
use retry_interceptor::config::ServerConfig;
use retry_interceptor::{AuthServer, Shutdown};

/// Read one HTTP/1.1 request and return its body.
#[allow(dead_code)]
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return String::new(),
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    String::from_utf8_lossy(&buf[header_end..]).into_owned()
}

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` receives the request body and returns the status and body to answer.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let body = read_request(&mut socket).await;
                        let (status, body) = f(body).await;
                        let status = StatusCode::from_u16(status).unwrap();

                        let response_str = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status.as_u16(),
                            status.canonical_reason().unwrap_or(""),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Backend replaying `script` in order and recording every request body.
/// Once the script runs out it answers 200 `null`.
#[allow(dead_code)]
pub async fn start_scripted_backend(script: Vec<(u16, &'static str)>) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let script = Arc::new(Mutex::new(VecDeque::from(script)));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    let addr = start_programmable_backend(move |body| {
        log.lock().unwrap().push(body);
        let (status, body) = script.lock().unwrap().pop_front().unwrap_or((200, "null"));
        async move { (status, body.to_string()) }
    })
    .await;

    (addr, seen)
}

/// Fault injector replaying a fixed sequence, then never faulting.
#[allow(dead_code)]
pub struct FaultSequence(Mutex<VecDeque<bool>>);

#[allow(dead_code)]
impl FaultSequence {
    pub fn new(sequence: Vec<bool>) -> Self {
        Self(Mutex::new(VecDeque::from(sequence)))
    }
}

impl FaultInjector for FaultSequence {
    fn should_fault(&self) -> bool {
        self.0.lock().unwrap().pop_front().unwrap_or(false)
    }
}

/// Spawn the auth server on an ephemeral port.
#[allow(dead_code)]
pub async fn start_auth_server(faults: Arc<dyn FaultInjector>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = AuthServer::new(ServerConfig::default(), faults);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
