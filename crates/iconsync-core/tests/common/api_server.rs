//! Minimal HTTP/1.1 server imitating the design API for curl-backed tests.
//!
//! Routes:
//! - `GET /v1/files/KEY/nodes?ids=...` → a fixed node tree (token required)
//! - `GET /v1/images/KEY?ids=...&format=svg` → URLs under `/svg/` (token required);
//!   the first request answers 429 when `throttle_first_images` is set
//! - `GET /svg/<id>.svg` → markup; ids containing `broken` answer 500

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

pub const TOKEN: &str = "test-token";
pub const FILE_KEY: &str = "KEY";

#[derive(Debug, Default)]
pub struct ServerState {
    pub throttle_first_images: bool,
    pub image_hits: AtomicUsize,
    pub svg_hits: AtomicUsize,
    /// Requests to `/svg/` that carried the API token (should stay 0).
    pub leaked_tokens: AtomicUsize,
}

/// Starts the server; returns the API base URL (`http://127.0.0.1:PORT/v1`) and shared state.
pub fn start(state: ServerState) -> (String, Arc<ServerState>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let state = Arc::new(state);
    let shared = Arc::clone(&state);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let state = Arc::clone(&shared);
            thread::spawn(move || handle(stream, port, &state));
        }
    });
    (format!("http://127.0.0.1:{}/v1", port), state)
}

fn handle(mut stream: std::net::TcpStream, port: u16, state: &ServerState) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let target = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let has_token = request
        .lines()
        .any(|l| l.to_ascii_lowercase().starts_with("x-figma-token:") && l.contains(TOKEN));

    let (status, content_type, body) = route(&target, has_token, port, state);
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body.as_bytes());
}

fn route(target: &str, has_token: bool, port: u16, state: &ServerState) -> (&'static str, &'static str, String) {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    if path.starts_with("/v1/") && !has_token {
        return ("403 Forbidden", "application/json", r#"{"status":403,"err":"Invalid token"}"#.to_string());
    }
    if path == format!("/v1/files/{}/nodes", FILE_KEY) {
        return ("200 OK", "application/json", nodes_body());
    }
    if path == format!("/v1/images/{}", FILE_KEY) {
        let hit = state.image_hits.fetch_add(1, Ordering::SeqCst);
        if state.throttle_first_images && hit == 0 {
            return ("429 Too Many Requests", "application/json", r#"{"status":429}"#.to_string());
        }
        return ("200 OK", "application/json", images_body(query, port));
    }
    if let Some(name) = path.strip_prefix("/svg/") {
        state.svg_hits.fetch_add(1, Ordering::SeqCst);
        if has_token {
            state.leaked_tokens.fetch_add(1, Ordering::SeqCst);
        }
        if name.contains("broken") {
            return ("500 Internal Server Error", "text/plain", "boom".to_string());
        }
        let svg = format!(
            "<svg width=\"24\" height=\"24\" fill=\"none\" xmlns=\"http://www.w3.org/2000/svg\">\n<path d=\"M{}\" fill=\"black\"/>\n</svg>\n",
            name.trim_end_matches(".svg")
        );
        return ("200 OK", "image/svg+xml", svg);
    }
    ("404 Not Found", "text/plain", String::new())
}

fn nodes_body() -> String {
    r#"{
        "name": "Icons",
        "nodes": {
            "10:1": {
                "document": {
                    "id": "10:1", "name": "toggle", "type": "FRAME",
                    "children": [
                        { "id": "10:2", "name": "check_box", "type": "INSTANCE" },
                        { "id": "10:3", "name": "row", "type": "FRAME", "children": [
                            { "id": "10:4", "name": "radio-button", "type": "INSTANCE" },
                            { "id": "10:5", "name": "broken-star", "type": "INSTANCE" }
                        ] },
                        { "id": "10:6", "name": "caption", "type": "TEXT" }
                    ]
                }
            }
        }
    }"#
    .to_string()
}

/// Echo every requested id with a URL on this server.
fn images_body(query: &str, port: u16) -> String {
    let ids = url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == "ids")
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default();
    let entries: Vec<String> = ids
        .split(',')
        .filter(|id| !id.is_empty())
        .map(|id| {
            let file = if id == "10:5" { "broken".to_string() } else { id.replace(':', "-") };
            format!("\"{}\": \"http://127.0.0.1:{}/svg/{}.svg\"", id, port, file)
        })
        .collect();
    format!("{{\"err\": null, \"images\": {{{}}}}}", entries.join(","))
}
