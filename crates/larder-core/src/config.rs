// ── Runtime session configuration ──
//
// Describes *how* to reach the backend for an authenticated session.
// Carries credential data and connection tuning, but never touches disk;
// the presentation layer constructs a `SessionConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Configuration for a [`Session`](crate::session::Session).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// API root, e.g. `https://api.larder.app/v1/`.
    pub base_url: Url,
    /// Bearer token for the authenticated user.
    pub token: SecretString,
    /// Request timeout.
    pub timeout: Duration,
    /// Where the suggestion cache mirrors itself on disk.
    /// `None` keeps the cache memory-only.
    pub suggestion_mirror: Option<PathBuf>,
}

impl SessionConfig {
    pub fn new(base_url: Url, token: SecretString) -> Self {
        Self {
            base_url,
            token,
            timeout: Duration::from_secs(30),
            suggestion_mirror: None,
        }
    }

    /// Enable the file-backed suggestion-cache mirror at the platform
    /// data directory (`suggestions.json` under the app's data dir).
    pub fn with_default_suggestion_mirror(mut self) -> Self {
        self.suggestion_mirror = default_suggestion_mirror_path();
        self
    }

    pub fn with_suggestion_mirror(mut self, path: PathBuf) -> Self {
        self.suggestion_mirror = Some(path);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Platform data-dir location for the suggestion-cache mirror.
pub fn default_suggestion_mirror_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("app", "larder", "larder")
        .map(|dirs| dirs.data_dir().join("suggestions.json"))
}
