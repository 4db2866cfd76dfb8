use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::NaverError;

/// Default Naver Open API base URL
pub const NAVER_DEFAULT_BASE: &str = "https://openapi.naver.com";
/// Header carrying the application client id
pub const HDR_CLIENT_ID: &str = "x-naver-client-id";
/// Header carrying the application client secret
pub const HDR_CLIENT_SECRET: &str = "x-naver-client-secret";

/// Environment variable for the client id
pub const ENV_CLIENT_ID: &str = "NAVER_CLIENT_ID";
/// Environment variable for the client secret
pub const ENV_CLIENT_SECRET: &str = "NAVER_CLIENT_SECRET";
/// Environment variable for a custom API base URL
pub const ENV_API_BASE: &str = "NAVER_API_BASE";

/// Configuration for the Naver client.
///
/// Debug output redacts both credentials via [`SecretString`].
#[derive(Clone, Debug)]
pub struct NaverConfig {
    api_base: String,
    client_id: Option<SecretString>,
    client_secret: Option<SecretString>,
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for NaverConfig {
    fn default() -> Self {
        Self {
            api_base: env_non_empty(ENV_API_BASE).unwrap_or_else(|| NAVER_DEFAULT_BASE.into()),
            client_id: env_non_empty(ENV_CLIENT_ID).map(SecretString::from),
            client_secret: env_non_empty(ENV_CLIENT_SECRET).map(SecretString::from),
        }
    }
}

impl NaverConfig {
    /// Creates a configuration from the environment.
    ///
    /// Reads `NAVER_CLIENT_ID`, `NAVER_CLIENT_SECRET` and `NAVER_API_BASE`.
    /// Values are trimmed; empty values count as unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets both application credentials
    #[must_use]
    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(SecretString::from(client_id.into()));
        self.client_secret = Some(SecretString::from(client_secret.into()));
        self
    }

    /// Drops any configured credentials
    #[must_use]
    pub fn without_credentials(mut self) -> Self {
        self.client_id = None;
        self.client_secret = None;
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Whether both credentials are present and non-blank
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.validate_auth().is_ok()
    }

    /// Joins `path` onto the API base.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Checks that both credentials are configured.
    ///
    /// # Errors
    ///
    /// Returns [`NaverError::Config`] naming the missing variables.
    pub fn validate_auth(&self) -> Result<(), NaverError> {
        let present = |s: &Option<SecretString>| {
            s.as_ref()
                .is_some_and(|v| !v.expose_secret().trim().is_empty())
        };
        let mut missing = vec![];
        if !present(&self.client_id) {
            missing.push(ENV_CLIENT_ID);
        }
        if !present(&self.client_secret) {
            missing.push(ENV_CLIENT_SECRET);
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(NaverError::Config(format!(
                "Missing Naver credentials: set {}",
                missing.join(" and ")
            )))
        }
    }

    /// Builds the two credential headers.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is missing or contains invalid header characters.
    pub fn credential_headers(&self) -> Result<HeaderMap, NaverError> {
        self.validate_auth()?;

        let mut h = HeaderMap::new();
        for (name, secret) in [
            (HDR_CLIENT_ID, &self.client_id),
            (HDR_CLIENT_SECRET, &self.client_secret),
        ] {
            if let Some(secret) = secret {
                let value = HeaderValue::from_str(secret.expose_secret().trim())
                    .map_err(|_| NaverError::Config(format!("Invalid {name} value")))?;
                h.insert(name, value);
            }
        }
        Ok(h)
    }
}
