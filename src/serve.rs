//! Development server.
//!
//! A lightweight HTTP server built on `tiny_http`:
//!
//! - the index document at its configured path (`/search-index.json`)
//! - a `/search?q=` endpoint evaluating queries server-side
//! - static files from the output directory
//! - file watching with automatic index rebuild (via `watch` module)
//! - graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (File Monitor)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//!    Handle requests         Rebuild index
//!    Serve index/files       Swap ArcSwap copy
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The in-memory index lives behind `ArcSwap`: requests read it lock-free
//! while the watcher replaces it atomically after each rebuild.

use crate::{
    config::{SiteConfig, cfg},
    index::{IndexEntry, build_index, write_index},
    log,
    search::{apply_query, url_state::query_from_search},
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use std::{fs, io::Cursor, net::SocketAddr, path::Path, sync::Arc};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Shared, atomically replaceable index.
type SharedIndex = Arc<ArcSwap<Vec<IndexEntry>>>;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Build the index, then serve it until Ctrl+C.
pub fn serve_site() -> Result<()> {
    let c = cfg();

    let entries = build_index(&c);
    write_index(&entries, &c)?;
    log!("index"; "{} entries", entries.len());
    let index: SharedIndex = Arc::new(ArcSwap::from_pointee(entries));

    let interface: std::net::IpAddr = c.serve.interface.parse()?;
    let (server, addr) = try_bind_port(interface, c.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}{}", addr, c.index_url_path());

    // Spawn file watcher thread
    if c.serve.watch {
        let index_for_watch = Arc::clone(&index);
        std::thread::spawn(move || {
            let swap = move |entries: Vec<IndexEntry>| {
                index_for_watch.store(Arc::new(entries));
            };
            if let Err(err) = watch_for_changes_blocking(swap) {
                log!("watch"; "{err}");
            }
        });
    }

    // Handle requests in main thread (blocks until Ctrl+C)
    for request in server.incoming_requests() {
        // Re-load config on each request to pick up hot-reloaded changes
        if let Err(e) = handle_request(request, &cfg(), &index) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < max_retries => {
                // Will retry silently
                continue;
            }
            Err(e) => {
                // Last attempt failed
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    max_retries,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Request resolution order:
/// 1. Index document path → in-memory index as JSON
/// 2. `/search?q=...` → filtered entries as JSON
/// 3. Exact file match under the output dir → serve file
/// 4. Directory with index.html → serve index.html
/// 5. Nothing found → 404
fn handle_request(request: Request, config: &SiteConfig, index: &SharedIndex) -> Result<()> {
    let url = request.url();
    let (raw_path, search) = url.split_once('?').unwrap_or((url, ""));

    // Decode URL-encoded characters (e.g., %20 → space)
    let path = urlencoding::decode(raw_path)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| raw_path.to_owned());

    if path == config.index_url_path() {
        let json = serde_json::to_string(&**index.load())?;
        return serve_json(request, json);
    }

    if path == "/search" {
        let query = query_from_search(search).unwrap_or_default();
        let snapshot = index.load();
        let results = apply_query(&query, &snapshot);
        let json = serde_json::to_string(&results)?;
        return serve_json(request, json);
    }

    let serve_root = &config.index.output;
    let local_path = serve_root.join(path.trim_matches('/'));

    // Try to serve the file directly
    if local_path.is_file() {
        return serve_file(request, &local_path);
    }

    // If it's a directory, try index.html
    if local_path.is_dir() {
        let index_path = local_path.join("index.html");
        if index_path.is_file() {
            return serve_file(request, &index_path);
        }
    }

    // 404 Not Found
    serve_not_found(request)
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Serve a JSON response.
fn serve_json(request: Request, json: String) -> Result<()> {
    let response = Response::from_string(json).with_header(
        Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap(),
    );
    request.respond(response)?;
    Ok(())
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = guess_content_type(path);

    let response = Response::from_data(content)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());

    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::new(
        StatusCode(404),
        vec![Header::from_bytes("Content-Type", "text/plain").unwrap()],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        Some("md") => "text/markdown; charset=utf-8",
        _ => "application/octet-stream",
    }
}
