use std::env;

use super::errors::OAuth2Error;

const GITHUB_AUTH_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_EMAILS_URL: &str = "https://api.github.com/user/emails";

/// The single scope needed to read the user's email addresses.
const DEFAULT_SCOPE: &str = "user:email";

/// Provider credentials, endpoints, and redirect targets.
///
/// Constructed once at startup and shared read-only across all request
/// handlers; there is deliberately no mutable process-wide configuration.
#[derive(Debug, Clone)]
pub struct OAuth2Config {
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
    pub emails_url: String,
    /// Redirect location after successful authorization (and after logout).
    pub success_url: String,
    /// Redirect location after authorization failure.
    pub failure_url: String,
}

impl OAuth2Config {
    /// Configuration for GitHub with the default email-read scope.
    pub fn github(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        success_url: impl Into<String>,
        failure_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes: vec![DEFAULT_SCOPE.to_string()],
            auth_url: GITHUB_AUTH_URL.to_string(),
            token_url: GITHUB_TOKEN_URL.to_string(),
            emails_url: GITHUB_EMAILS_URL.to_string(),
            success_url: success_url.into(),
            failure_url: failure_url.into(),
        }
    }

    /// GitHub configuration from the environment:
    /// `OAUTH2_GITHUB_CLIENT_ID`, `OAUTH2_GITHUB_CLIENT_SECRET` (required),
    /// `OAUTH2_SUCCESS_URL`, `OAUTH2_FAILURE_URL` (default `/`), and
    /// `OAUTH2_SCOPE` (space-separated, default `user:email`).
    pub fn github_from_env() -> Result<Self, OAuth2Error> {
        let client_id = require_env("OAUTH2_GITHUB_CLIENT_ID")?;
        let client_secret = require_env("OAUTH2_GITHUB_CLIENT_SECRET")?;
        let success_url = env::var("OAUTH2_SUCCESS_URL").unwrap_or_else(|_| "/".to_string());
        let failure_url = env::var("OAUTH2_FAILURE_URL").unwrap_or_else(|_| "/".to_string());

        let mut config = Self::github(client_id, client_secret, success_url, failure_url);
        if let Ok(scope) = env::var("OAUTH2_SCOPE") {
            config.scopes = scope.split_whitespace().map(str::to_string).collect();
        }
        Ok(config)
    }
}

fn require_env(name: &str) -> Result<String, OAuth2Error> {
    env::var(name).map_err(|_| OAuth2Error::Config(format!("{name} must be set")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_defaults() {
        let config = OAuth2Config::github("id", "secret", "/success", "/failure");
        assert_eq!(config.scopes, vec!["user:email".to_string()]);
        assert_eq!(config.auth_url, GITHUB_AUTH_URL);
        assert_eq!(config.token_url, GITHUB_TOKEN_URL);
        assert_eq!(config.emails_url, GITHUB_EMAILS_URL);
        assert_eq!(config.success_url, "/success");
        assert_eq!(config.failure_url, "/failure");
    }
}
