//! Shared helpers for the client binaries.

/// Server base URL: flag value if given, else QUADSIM_URL, else localhost.
pub fn base_url(flag: Option<&str>) -> String {
    flag.map(str::to_string)
        .or_else(|| std::env::var("QUADSIM_URL").ok())
        .unwrap_or_else(|| "http://localhost:9990".to_string())
}

/// WebSocket URL of the command endpoint for a given base URL.
pub fn command_ws_url(base: &str) -> String {
    let base = base.trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("https") {
        format!("wss{}", rest)
    } else if let Some(rest) = base.strip_prefix("http") {
        format!("ws{}", rest)
    } else {
        base.to_string()
    };
    format!("{}/v1/command", ws_base)
}
