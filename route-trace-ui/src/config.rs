use std::sync::OnceLock;

/// Backend base URL baked in at build time, e.g.
/// `ROUTE_TRACE_API_BASE=https://trace.example.net dx build --release`.
const BUILD_API_BASE: Option<&str> = option_env!("ROUTE_TRACE_API_BASE");

const DEV_API_BASE: &str = "http://localhost:8000";

/// Resolve the API base URL for the current environment
/// - Build-time override wins
/// - In development (localhost): the backend on port 8000
/// - In production: same origin
fn resolve_api_base() -> String {
    let hostname = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();
    api_base_for(BUILD_API_BASE, &hostname)
}

fn api_base_for(build_override: Option<&str>, hostname: &str) -> String {
    if let Some(base) = build_override.map(str::trim).filter(|b| !b.is_empty()) {
        return base.trim_end_matches('/').to_string();
    }
    if hostname == "localhost" || hostname == "127.0.0.1" {
        DEV_API_BASE.to_string()
    } else {
        String::new()
    }
}

static API_BASE_CACHE: OnceLock<String> = OnceLock::new();

/// Cached API base URL; empty means same origin.
pub fn api_base() -> &'static str {
    API_BASE_CACHE.get_or_init(resolve_api_base).as_str()
}
