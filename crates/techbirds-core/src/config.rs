//! Configuration module
//!
//! Client configuration for the admin API: backend origin, the API base path,
//! the bearer token for a static session, timeouts and the media endpoint layout.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::models::DEFAULT_PAGE_SIZE;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_API_PREFIX: &str = "/api";
const HTTP_TIMEOUT_SECS: u64 = 60;

/// HTTP method used for metadata updates. Backends differ on PATCH vs PUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMethod {
    #[default]
    Patch,
    Put,
}

impl fmt::Display for UpdateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateMethod::Patch => f.write_str("PATCH"),
            UpdateMethod::Put => f.write_str("PUT"),
        }
    }
}

impl FromStr for UpdateMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PATCH" => Ok(UpdateMethod::Patch),
            "PUT" => Ok(UpdateMethod::Put),
            other => Err(anyhow::anyhow!(
                "Invalid update method '{}'. Must be PATCH or PUT",
                other
            )),
        }
    }
}

/// Media endpoint layout relative to the API base path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaEndpoints {
    /// Collection path, e.g. "/media"
    pub collection: String,
    /// Appended to the item path for permanent deletion
    pub permanent_suffix: String,
    /// Appended to the item path for the generated thumbnail
    pub thumbnail_suffix: String,
    /// Appended to the item path for the raw file
    pub file_suffix: String,
}

impl Default for MediaEndpoints {
    fn default() -> Self {
        Self {
            collection: "/media".to_string(),
            permanent_suffix: "/permanent".to_string(),
            thumbnail_suffix: "/thumbnail".to_string(),
            file_suffix: "/file".to_string(),
        }
    }
}

/// Client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_prefix: String,
    pub api_token: Option<String>,
    pub http_timeout_secs: u64,
    pub page_size: u32,
    pub update_method: UpdateMethod,
    pub endpoints: MediaEndpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            api_token: None,
            http_timeout_secs: HTTP_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            update_method: UpdateMethod::default(),
            endpoints: MediaEndpoints::default(),
        }
    }
}

impl ClientConfig {
    /// Load from the process environment (and `.env` when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Unparseable numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("TECHBIRDS_API_URL")
            .or_else(|| lookup("API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "TECHBIRDS_API_URL must start with http:// or https://, got '{}'",
                api_url
            ));
        }

        let api_prefix = normalize_prefix(
            &lookup("TECHBIRDS_API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
        );

        let api_token = lookup("TECHBIRDS_API_TOKEN")
            .or_else(|| lookup("API_TOKEN"))
            .filter(|t| !t.trim().is_empty());

        let http_timeout_secs = lookup("TECHBIRDS_HTTP_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(HTTP_TIMEOUT_SECS);

        let page_size = lookup("TECHBIRDS_PAGE_SIZE")
            .and_then(|s| s.parse().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let update_method = match lookup("TECHBIRDS_UPDATE_METHOD") {
            Some(method) => method.parse()?,
            None => UpdateMethod::default(),
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_prefix,
            api_token,
            http_timeout_secs,
            page_size,
            update_method,
            endpoints: MediaEndpoints::default(),
        })
    }

    /// Origin plus API base path, without a trailing slash.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), self.api_prefix)
    }
}

/// "api/" -> "/api", "/" -> ""
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.api_base(), "http://localhost:3000/api");
        assert_eq!(config.api_token, None);
        assert_eq!(config.page_size, 24);
        assert_eq!(config.update_method, UpdateMethod::Patch);
        assert_eq!(config.endpoints, MediaEndpoints::default());
    }

    #[test]
    fn test_overrides_and_fallbacks() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("API_URL", "https://cms.techbirds.example/"),
            ("TECHBIRDS_API_PREFIX", "admin/api/"),
            ("API_TOKEN", "secret"),
            ("TECHBIRDS_PAGE_SIZE", "not-a-number"),
            ("TECHBIRDS_HTTP_TIMEOUT_SECS", "5"),
            ("TECHBIRDS_UPDATE_METHOD", "put"),
        ]))
        .unwrap();
        assert_eq!(config.api_base(), "https://cms.techbirds.example/admin/api");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.page_size, 24);
        assert_eq!(config.http_timeout_secs, 5);
        assert_eq!(config.update_method, UpdateMethod::Put);
    }

    #[test]
    fn test_invalid_update_method_is_rejected() {
        let result = ClientConfig::from_lookup(lookup_from(&[("TECHBIRDS_UPDATE_METHOD", "POST")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = ClientConfig::from_lookup(lookup_from(&[("TECHBIRDS_API_URL", "localhost")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_prefix() {
        let config = ClientConfig::from_lookup(lookup_from(&[("TECHBIRDS_API_PREFIX", "/")])).unwrap();
        assert_eq!(config.api_base(), "http://localhost:3000");
    }
}
