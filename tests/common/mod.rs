//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use hvs_mapper::MapperConfig;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[allow(dead_code)]
impl MockResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn json(value: &Value) -> Self {
        Self::new(200, value.to_string()).with_header("Content-Type", "application/json")
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` receives the request target (path and query) of each request.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MockResponse> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        handle(socket, f.as_ref()).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn handle<F, Fut>(mut socket: TcpStream, f: &F)
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = MockResponse>,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }

    let head = String::from_utf8_lossy(&buf);
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let response = f(target).await;
    let status_text = match response.status {
        200 => "200 OK",
        400 => "400 Bad Request",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        other => return write_response(&mut socket, &format!("{other} Unknown"), &response).await,
    };
    write_response(&mut socket, status_text, &response).await;
}

async fn write_response(socket: &mut TcpStream, status_text: &str, response: &MockResponse) {
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        status_text,
        response.body.len()
    );
    for (name, value) in &response.headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str("\r\n");

    let _ = socket.write_all(head.as_bytes()).await;
    let _ = socket.write_all(response.body.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// A LineString road feature.
#[allow(dead_code)]
pub fn line_feature(id: &str, name: &str, coords: &[[f64; 2]]) -> Value {
    json!({
        "type": "Feature",
        "properties": { "ROAD": id, "ROAD_NAME": name },
        "geometry": { "type": "LineString", "coordinates": coords }
    })
}

/// A MultiLineString road feature.
#[allow(dead_code)]
pub fn multi_line_feature(id: &str, name: &str, parts: &[Vec<[f64; 2]>]) -> Value {
    json!({
        "type": "Feature",
        "properties": { "ROAD": id, "ROAD_NAME": name },
        "geometry": { "type": "MultiLineString", "coordinates": parts }
    })
}

#[allow(dead_code)]
pub fn feature_collection(features: Vec<Value>) -> String {
    json!({ "type": "FeatureCollection", "features": features }).to_string()
}

/// OSRM body with one route; `legs` holds the node list of each leg.
#[allow(dead_code)]
pub fn osrm_route(legs: &[Vec<u64>], coords: &[[f64; 2]]) -> Value {
    let legs: Vec<Value> = legs
        .iter()
        .map(|nodes| json!({ "annotation": { "nodes": nodes }, "steps": [] }))
        .collect();
    json!({
        "code": "Ok",
        "routes": [{
            "legs": legs,
            "geometry": { "type": "LineString", "coordinates": coords },
            "distance": 120.5,
            "duration": 9.1
        }],
        "waypoints": []
    })
}

/// File-sourced config pointing OSRM at `osrm`.
#[allow(dead_code)]
pub fn test_config(osrm: SocketAddr, input: &Path, output: &Path) -> MapperConfig {
    let mut config = MapperConfig::default();
    config.source.path = Some(input.display().to_string());
    config.osrm.server = format!("http://{osrm}/");
    config.output.filename = output.display().to_string();
    config.observability.progress = false;
    config.retries.base_delay_ms = 1;
    config.retries.max_delay_ms = 10;
    config.timeouts.request_secs = 10;
    config
}
