// Shared transport configuration for building reqwest::Client instances.
//
// The backend uses bearer-token auth over plain HTTPS, so the only knobs
// are the request timeout and the token injected as a default header.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub bearer_token: Option<SecretString>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            bearer_token: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// If a bearer token is present it is injected as a default
    /// `Authorization` header and marked sensitive so it never appears
    /// in debug output.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut headers = HeaderMap::new();
        if let Some(ref token) = self.bearer_token {
            let value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&value).map_err(|_| {
                crate::error::Error::Api {
                    message: "bearer token contains invalid header characters".into(),
                    status: 0,
                }
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("larder/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?)
    }

    /// Set the bearer token used for authentication.
    pub fn with_bearer_token(mut self, token: SecretString) -> Self {
        self.bearer_token = Some(token);
        self
    }
}
