//! Authentication headers derived from client configuration.
//!
//! Header values are validated once when the builder is created, so
//! producing headers for a request can never fail.

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

pub const CLIENT_ID_HEADER: &str = "Client-ID";

/// Builds the per-request authentication headers.
#[derive(Debug, Clone, Default)]
pub struct AuthHeaderBuilder {
    client_id: Option<HeaderValue>,
    authorization: Option<HeaderValue>,
}

impl AuthHeaderBuilder {
    /// Validate the configured credentials.
    ///
    /// Blank values count as not configured.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client_id = non_blank(config.client_id.as_deref())
            .map(|id| {
                HeaderValue::from_str(id).map_err(|e| ApiError::InvalidHeader {
                    header: CLIENT_ID_HEADER,
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let authorization = non_blank(config.bearer_token.as_deref())
            .map(|token| {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(
                    |e| ApiError::InvalidHeader {
                        header: "Authorization",
                        reason: e.to_string(),
                    },
                )?;
                value.set_sensitive(true);
                Ok::<_, ApiError>(value)
            })
            .transpose()?;

        Ok(Self {
            client_id,
            authorization,
        })
    }

    /// Header mapping for one request: `Client-ID` and `Authorization`
    /// when configured, nothing else.
    pub fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(client_id) = &self.client_id {
            headers.insert(HeaderName::from_static("client-id"), client_id.clone());
        }

        if let Some(authorization) = &self.authorization {
            headers.insert(AUTHORIZATION, authorization.clone());
        }

        headers
    }

    pub fn has_credentials(&self) -> bool {
        self.client_id.is_some() || self.authorization.is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(client_id: Option<&str>, token: Option<&str>) -> ClientConfig {
        let mut config = ClientConfig::new("https://api.example.com");
        config.client_id = client_id.map(String::from);
        config.bearer_token = token.map(String::from);
        config
    }

    #[test]
    fn test_no_credentials_produces_no_headers() {
        let builder = AuthHeaderBuilder::new(&config(None, None)).unwrap();
        assert!(builder.build_headers().is_empty());
        assert!(!builder.has_credentials());
    }

    #[test]
    fn test_client_id_only() {
        let headers = AuthHeaderBuilder::new(&config(Some("abc123"), None))
            .unwrap()
            .build_headers();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get(CLIENT_ID_HEADER).unwrap(), "abc123");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_bearer_token_only() {
        let headers = AuthHeaderBuilder::new(&config(None, Some("tok")))
            .unwrap()
            .build_headers();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
    }

    #[test]
    fn test_both_headers() {
        let headers = AuthHeaderBuilder::new(&config(Some("id"), Some("tok")))
            .unwrap()
            .build_headers();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("client-id").unwrap(), "id");
        assert_eq!(headers.get("authorization").unwrap(), "Bearer tok");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let builder = AuthHeaderBuilder::new(&config(Some("  "), Some(""))).unwrap();
        assert!(builder.build_headers().is_empty());
    }

    #[test]
    fn test_invalid_header_value_is_rejected() {
        let err = AuthHeaderBuilder::new(&config(Some("bad\nid"), None)).unwrap_err();
        assert!(matches!(
            err,
            ApiError::InvalidHeader { header: CLIENT_ID_HEADER, .. }
        ));
    }
}
