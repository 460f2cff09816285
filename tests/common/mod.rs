//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use framegate::{AppConfig, HttpServer, Shutdown};

/// A mock target application listening on a fixed address.
///
/// Every received request is recorded verbatim (head + body) so tests can
/// assert on exactly what was forwarded — or that nothing was.
pub struct MockUpstream {
    pub requests: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> String {
        self.requests.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

/// Start a mock upstream that answers every request with a fixed body.
pub async fn start_upstream(
    addr: SocketAddr,
    content_type: &'static str,
    body: &'static str,
    extra_headers: &'static [(&'static str, &'static str)],
) -> MockUpstream {
    let listener = TcpListener::bind(addr).await.unwrap();
    let requests: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let log = requests.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let log = log.clone();
                    tokio::spawn(async move {
                        let request = match read_request(&mut socket).await {
                            Some(request) => request,
                            None => return,
                        };
                        log.lock().unwrap().push(request);

                        let mut response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                            content_type,
                            body.len()
                        );
                        for (name, value) in extra_headers {
                            response.push_str(&format!("{}: {}\r\n", name, value));
                        }
                        response.push_str("\r\n");
                        response.push_str(body);

                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockUpstream { requests }
}

/// Read one HTTP/1.1 request (head plus content-length body) as a string.
async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_head_end(&buf) {
            break pos;
        }
        if buf.len() > 1024 * 1024 {
            return None;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    let body_start = head_end + 4;
    while buf.len() < body_start + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(String::from_utf8_lossy(&buf).to_string())
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Write a proxy-definition file and start the gateway on `proxy_addr`.
///
/// Records are `(id, target_url, enabled)`; the returned `Shutdown` stops
/// the server when triggered (hold on to it for the test's lifetime).
pub async fn spawn_gateway(
    test_name: &str,
    proxy_addr: SocketAddr,
    records: &[(&str, &str, bool)],
) -> Shutdown {
    let store_dir = std::env::temp_dir().join(format!(
        "framegate-it-{}-{}",
        test_name,
        std::process::id()
    ));
    std::fs::create_dir_all(&store_dir).unwrap();
    let store_path = store_dir.join("proxies.json");

    let definitions: Vec<serde_json::Value> = records
        .iter()
        .map(|(id, target_url, enabled)| {
            serde_json::json!({
                "id": id,
                "name": id,
                "target_url": target_url,
                "description": "",
                "enabled": enabled,
            })
        })
        .collect();
    std::fs::write(&store_path, serde_json::to_string_pretty(&definitions).unwrap()).unwrap();

    let mut config = AppConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.store.path = store_path.to_string_lossy().to_string();
    config.upstream.connect_secs = 2;
    config.upstream.timeout_secs = 5;
    config.timeouts.request_secs = 10;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let listener = TcpListener::bind(proxy_addr).await.unwrap();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(300)).await;
    shutdown
}

/// A client that never reuses connections, so each request exercises the
/// full accept path.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
