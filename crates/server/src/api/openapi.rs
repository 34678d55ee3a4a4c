use std::path::Path;

/// Placeholder replaced with the configured public base URL.
const BASE_URL_PLACEHOLDER: &str = "{{server_base_url}}";

/// Read an OpenAPI document and fill in the server base URL.
pub fn load_openapi_document(path: &Path, server_base_url: &str) -> std::io::Result<String> {
    let raw = std::fs::read_to_string(path)?;
    Ok(render_openapi_document(&raw, server_base_url))
}

pub fn render_openapi_document(raw: &str, server_base_url: &str) -> String {
    raw.replace(BASE_URL_PLACEHOLDER, server_base_url.trim_end_matches('/'))
}
