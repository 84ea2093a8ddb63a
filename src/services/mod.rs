//! Outbound HTTP services.
//!
//! Services contain the egress logic separated from HTTP handlers:
//! the OpenRouter client used by the API server and the API client used
//! by the frontends.

use url::Url;

pub mod api_client;
pub mod openrouter;

/// A base URL that could not be used to build a client.
#[derive(Debug, thiserror::Error)]
#[error("invalid base URL `{0}`: must be an absolute http(s) URL")]
pub struct InvalidBaseUrl(pub String);

/// Validate a configured base URL and strip any trailing slash.
///
/// # Rules
///
/// - Must parse as an absolute URL
/// - Must use HTTP or HTTPS
pub(crate) fn normalize_base_url(raw: &str) -> Result<String, InvalidBaseUrl> {
    let parsed = Url::parse(raw).map_err(|_| InvalidBaseUrl(raw.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        _ => Err(InvalidBaseUrl(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://localhost:8000/").unwrap(),
            "http://localhost:8000"
        );
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(normalize_base_url("ftp://example.com").is_err());
        assert!(normalize_base_url("not a url").is_err());
    }
}
