// --- File: crates/salon_common/src/http.rs ---
use serde_json::Value;

// Include the client module
pub mod client;

/// Extracts the human readable error text from a backend error body.
///
/// The salon API answers failures with `{"error": "..."}`; some endpoints use
/// `message` instead. Anything else (HTML error pages, empty bodies) yields `None`.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Joins the API base URL and an endpoint path without doubling slashes.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
