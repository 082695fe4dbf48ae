//! HTTP forwarder that posts user IDs to the configured script endpoint.
//!
//! One attempt per call. There is no timeout, retry or backoff: a hung
//! target stalls the caller until the connection resolves. Redirects are
//! not followed; a 3xx is returned as the result of the POST.

use chrono::Utc;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use tracing::{error, info};
use url::Url;

use super::types::{ForwardError, ForwardPayload, ForwardResult};

/// Something that can forward a user ID and report the target's response.
///
/// Intake is written against this trait so tests can substitute a
/// recording double for the HTTP forwarder.
#[allow(async_fn_in_trait)]
pub trait Forward {
    async fn forward(&self, user_id: &str) -> Result<ForwardResult, ForwardError>;
}

/// Forwarder backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    url: Url,
}

impl Forwarder {
    /// Create a forwarder for `url`.
    ///
    /// Only `http` and `https` targets are accepted.
    pub fn new(url: &str) -> Result<Self, ForwardError> {
        let url = Url::parse(url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ForwardError::UnsupportedScheme(url.scheme().to_string()));
        }

        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(ForwardError::Client)?;

        Ok(Self { client, url })
    }
}

impl Forward for Forwarder {
    async fn forward(&self, user_id: &str) -> Result<ForwardResult, ForwardError> {
        let payload = ForwardPayload::new(user_id, Utc::now());

        info!(user_id = %user_id, host = ?self.url.host_str(), "forward_starting");

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(user_id = %user_id, error = %e, "forward_transport_error");
                ForwardError::Transport(e)
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            error!(user_id = %user_id, status_code = status, error = %e, "forward_body_error");
            ForwardError::Body(e)
        })?;

        info!(
            user_id = %user_id,
            status_code = status,
            body_length = body.len(),
            "forward_complete"
        );

        Ok(ForwardResult { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarder_accepts_https() {
        let forwarder = Forwarder::new("https://script.example.com/exec?x=1").unwrap();
        assert_eq!(forwarder.url.host_str(), Some("script.example.com"));
        assert_eq!(forwarder.url.query(), Some("x=1"));
    }

    #[test]
    fn test_forwarder_rejects_bad_url() {
        assert!(matches!(
            Forwarder::new("not a url"),
            Err(ForwardError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_forwarder_rejects_other_schemes() {
        match Forwarder::new("ftp://example.com/exec") {
            Err(ForwardError::UnsupportedScheme(scheme)) => assert_eq!(scheme, "ftp"),
            other => panic!("Expected UnsupportedScheme, got {:?}", other),
        }
    }
}
