//! Reqwest adapters for the remote Teaching Buddy API.
//!
//! [`HttpAuthGateway`] covers the sign-in and sign-up endpoints and
//! [`HttpTeachingRecordQuery`] the per-user record listing. Both share one
//! [`ApiEndpoint`] so the base URL and timeout are configured once.

mod auth_gateway;
mod dto;
mod record_query;

use std::time::Duration;

use reqwest::{Client, Url};
use thiserror::Error;

pub use auth_gateway::HttpAuthGateway;
pub use record_query::HttpTeachingRecordQuery;

/// Failures while preparing an API client.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The base URL cannot carry path segments, e.g. `mailto:` URLs.
    #[error("API base URL '{url}' cannot be used as a base")]
    CannotBeABase { url: String },
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// Base URL plus a client with the configured request timeout.
#[derive(Debug, Clone)]
pub struct ApiEndpoint {
    client: Client,
    base: Url,
}

impl ApiEndpoint {
    /// Build a client for `base` with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when `base` cannot take path segments or the reqwest
    /// client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ApiClientError> {
        if base.cannot_be_a_base() {
            return Err(ApiClientError::CannotBeABase {
                url: base.to_string(),
            });
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    pub(crate) const fn client(&self) -> &Client {
        &self.client
    }

    /// `segments` appended to the base path, each percent-encoded.
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Whitespace-collapsed, truncated response body for error messages.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn endpoint(base: &str) -> ApiEndpoint {
        ApiEndpoint::new(Url::parse(base).expect("url"), Duration::from_secs(5)).expect("client")
    }

    #[rstest]
    #[case("https://teach-buddy-be.vercel.app")]
    #[case("https://teach-buddy-be.vercel.app/")]
    fn joins_segments_onto_bare_host(#[case] base: &str) {
        assert_eq!(
            endpoint(base).url(&["api", "users", "signin"]).as_str(),
            "https://teach-buddy-be.vercel.app/api/users/signin"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        assert_eq!(
            endpoint("http://localhost:8080/v1/")
                .url(&["api", "teaching-records", "user", "42"])
                .as_str(),
            "http://localhost:8080/v1/api/teaching-records/user/42"
        );
    }

    #[test]
    fn encodes_ids_as_single_segments() {
        let url = endpoint("https://api.test").url(&["api", "teaching-records", "user", "a/b c"]);
        assert_eq!(url.path(), "/api/teaching-records/user/a%2Fb%20c");
    }

    #[test]
    fn rejects_non_base_urls() {
        let err = ApiEndpoint::new(
            Url::parse("mailto:ops@example.com").expect("url"),
            Duration::from_secs(1),
        )
        .expect_err("mailto cannot be a base");
        assert!(matches!(err, ApiClientError::CannotBeABase { .. }));
    }

    #[test]
    fn previews_are_compacted_and_truncated() {
        assert_eq!(body_preview(b"  not \n found "), "not found");
        let long = "x".repeat(200);
        let preview = body_preview(long.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }
}
