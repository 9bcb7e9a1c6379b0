//! Development server for the built portfolio.
//!
//! A small `tiny_http` loop over `config.build.output`:
//!
//! - files are served by extension-derived content type
//! - directories resolve to their `index.html`
//! - anything else gets the embedded 404 page
//! - Ctrl+C unblocks the loop and returns
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (File Monitor)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          ▼                       ▼
//!    serve output/           rebuild page / copy asset
//! ```

use crate::{
    config::{SiteConfig, cfg},
    log,
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    io::Read,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

const NOT_FOUND_TEMPLATE: &str = include_str!("embed/serve/not_found.html");

/// Ports tried after the configured one is taken.
const MAX_PORT_RETRIES: u16 = 10;

/// Start the server and block until Ctrl+C.
pub fn serve_site() -> Result<()> {
    let c = cfg();
    let interface = c.serve.ip()?;

    let (server, addr) = try_bind_port(interface, c.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    if c.serve.watch {
        std::thread::spawn(move || {
            if let Err(err) = watch_for_changes_blocking() {
                log!("watch"; "{err:#}");
            }
        });
    }

    for request in server.incoming_requests() {
        // cfg() per request picks up a reloaded folio.toml
        if let Err(e) = handle_request(request, &cfg()) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

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
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    match resolve(&config.build.output, request.url()) {
        Some(path) => serve_file(request, &path),
        None => serve_not_found(request),
    }
}

/// Map a request URL onto a file under `root`.
///
/// The URL is percent-decoded and stripped of its query string. Directories
/// resolve to their `index.html`. Paths that climb out of `root` never
/// resolve.
fn resolve(root: &Path, url: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(url).ok()?;
    let path = decoded.split(['?', '#']).next().unwrap_or_default();
    let relative = Path::new(path.trim_matches('/'));

    if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
        return None;
    }

    let local = root.join(relative);
    if local.is_file() {
        return Some(local);
    }
    let index = local.join("index.html");
    index.is_file().then_some(index)
}

// ============================================================================
// Response Helpers
// ============================================================================

fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response = with_content_type(Response::from_data(content), guess_content_type(path));
    request.respond(response)?;
    Ok(())
}

fn serve_not_found(request: Request) -> Result<()> {
    let path = crate::utils::html::escape(request.url().trim_start_matches('/'));
    #[allow(clippy::literal_string_with_formatting_args)]
    let page = NOT_FOUND_TEMPLATE
        .replace("{path}", &path)
        .replace("{version}", env!("CARGO_PKG_VERSION"));

    let response = Response::from_data(page.into_bytes()).with_status_code(StatusCode(404));
    request.respond(with_content_type(response, "text/html; charset=utf-8"))?;
    Ok(())
}

fn with_content_type<R: Read>(response: Response<R>, content_type: &str) -> Response<R> {
    match Header::from_bytes("Content-Type", content_type) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

/// MIME type by file extension, `application/octet-stream` when unknown.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",

        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn output() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        fs::create_dir_all(dir.path().join("_data")).unwrap();
        fs::write(dir.path().join("_data/catalog.json"), "{}").unwrap();
        fs::create_dir_all(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/my avatar.png"), "png").unwrap();
        dir
    }

    #[test]
    fn test_resolve_root_to_index() {
        let dir = output();
        assert_eq!(resolve(dir.path(), "/"), Some(dir.path().join("index.html")));
        assert_eq!(resolve(dir.path(), ""), Some(dir.path().join("index.html")));
    }

    #[test]
    fn test_resolve_strips_query_and_fragment() {
        let dir = output();
        let expected = Some(dir.path().join("_data/catalog.json"));
        assert_eq!(resolve(dir.path(), "/_data/catalog.json?t=123"), expected);
        assert_eq!(resolve(dir.path(), "/_data/catalog.json#top"), expected);
    }

    #[test]
    fn test_resolve_decodes_percent_escapes() {
        let dir = output();
        assert_eq!(
            resolve(dir.path(), "/img/my%20avatar.png"),
            Some(dir.path().join("img/my avatar.png"))
        );
    }

    #[test]
    fn test_resolve_missing_and_bare_directory() {
        let dir = output();
        assert_eq!(resolve(dir.path(), "/nope.html"), None);
        // directory without index.html
        assert_eq!(resolve(dir.path(), "/img/"), None);
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = output();
        let inner = dir.path().join("site");
        fs::create_dir_all(&inner).unwrap();
        assert_eq!(resolve(&inner, "/../index.html"), None);
        assert_eq!(resolve(&inner, "/%2E%2E/index.html"), None);
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("a/b.json")), "application/json; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("avatar.webp")), "image/webp");
        assert_eq!(guess_content_type(Path::new("font.woff2")), "font/woff2");
        assert_eq!(guess_content_type(Path::new("LICENSE")), "application/octet-stream");
    }

    #[test]
    fn test_bind_gives_up_after_retries() {
        let localhost: IpAddr = "127.0.0.1".parse().unwrap();
        let (first, _) = try_bind_port(localhost, 0, 1).unwrap();
        let taken = first.server_addr().to_ip().unwrap().port();

        let Err(err) = try_bind_port(localhost, taken, 1) else {
            panic!("port {taken} should still be taken");
        };
        assert!(err.to_string().contains("Failed to bind after 1 attempts"));
    }
}
