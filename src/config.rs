use std::env;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Process-wide configuration, fixed for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let raw = env::var("ESTATE_SCOUT_API_URL").unwrap_or_default();
        Self {
            api_url: normalize_base_url(&raw),
        }
    }
}

pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Join a server-relative path onto the API origin. Only ever used for paths
/// the backend hands out relative to its static mount (screenshots, listing
/// folders); fully-qualified URLs must never pass through here.
pub fn join_origin(origin: &str, relative: &str) -> String {
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_base_url() {
        assert_eq!(normalize_base_url("http://x:1/"), "http://x:1");
        assert_eq!(normalize_base_url("  http://x:1  "), "http://x:1");
        assert_eq!(normalize_base_url(""), DEFAULT_API_URL);
    }

    #[test]
    fn joins_relative_paths_onto_origin() {
        assert_eq!(join_origin("http://x", "img/1.png"), "http://x/img/1.png");
        assert_eq!(join_origin("http://x/", "/img/1.png"), "http://x/img/1.png");
    }
}
