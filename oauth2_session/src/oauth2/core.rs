use http::header::HeaderMap;
use url::Url;

use crate::session::{
    Authenticator, Principal, SessionConfig, TokenError, clear_session_cookie, set_session_cookie,
};

use super::config::OAuth2Config;
use super::errors::OAuth2Error;
use super::github::{exchange_code_for_token, fetch_user_emails, primary_verified_email};
use super::state::generate_state;
use super::types::AuthResponse;

/// Stateless GitHub OAuth2 login flow.
///
/// Everything here is fixed at construction and only ever read, so one
/// instance serves concurrent logins without any coordination: there is no
/// session store, no cache, no counter. The only suspension points are the
/// provider network calls, and cancelling a request mid-exchange simply
/// drops the in-flight calls without a cookie being written.
pub struct GithubOAuth2 {
    oauth2: OAuth2Config,
    session: SessionConfig,
    authenticator: Authenticator,
    client: reqwest::Client,
}

impl GithubOAuth2 {
    pub fn new(oauth2: OAuth2Config, session: SessionConfig, authenticator: Authenticator) -> Self {
        Self {
            oauth2,
            session,
            authenticator,
            client: reqwest::Client::new(),
        }
    }

    pub fn success_url(&self) -> &str {
        &self.oauth2.success_url
    }

    pub fn failure_url(&self) -> &str {
        &self.oauth2.failure_url
    }

    pub fn cookie_name(&self) -> &str {
        &self.session.cookie_name
    }

    /// Build the provider authorization URL with a freshly minted CSRF
    /// state token. Fails only when the state cannot be signed; the caller
    /// must then answer with an internal error and must not redirect.
    pub fn prepare_auth_request(&self) -> Result<String, OAuth2Error> {
        let state = generate_state(&self.authenticator)
            .map_err(|e| OAuth2Error::IssuerFailure(e.to_string()))?;

        let mut auth_url = Url::parse(&self.oauth2.auth_url)
            .map_err(|e| OAuth2Error::Config(format!("invalid authorization endpoint: {e}")))?;
        auth_url
            .query_pairs_mut()
            .append_pair("client_id", &self.oauth2.client_id)
            .append_pair("scope", &self.oauth2.scopes.join(" "))
            .append_pair("state", &state)
            .append_pair("response_type", "code")
            .append_pair("access_type", "online");

        tracing::debug!("Auth URL: {}", auth_url.as_str());
        Ok(auth_url.into())
    }

    /// Run the callback protocol:
    ///
    /// `AwaitingState -> StateValidated -> CodeExchanged -> IdentityFetched
    /// -> SessionIssued`
    ///
    /// Each `?` below is the transition into the terminal `Failed` state.
    /// No cookie is produced on any failure path; the returned header map
    /// on success carries exactly the session `Set-Cookie`.
    pub async fn handle_callback(&self, response: &AuthResponse) -> Result<HeaderMap, OAuth2Error> {
        self.validate_state(&response.state)?;
        let access_token =
            exchange_code_for_token(&self.client, &self.oauth2, &response.code).await?;
        let principal = self.fetch_identity(&access_token).await?;
        self.issue_session(&principal)
    }

    // AwaitingState -> StateValidated. An absent state arrives as the
    // empty string and fails verification like any forged token.
    fn validate_state(&self, state: &str) -> Result<(), OAuth2Error> {
        self.authenticator
            .verify(state)
            .map(|_| ())
            .map_err(|e| OAuth2Error::StateMismatch(format!("{e:?}")))
    }

    // CodeExchanged -> IdentityFetched
    async fn fetch_identity(&self, access_token: &str) -> Result<Principal, OAuth2Error> {
        let emails = fetch_user_emails(&self.client, &self.oauth2, access_token).await?;
        primary_verified_email(&emails)
    }

    // IdentityFetched -> SessionIssued
    fn issue_session(&self, principal: &Principal) -> Result<HeaderMap, OAuth2Error> {
        let auth_token = self
            .authenticator
            .issue(principal, self.session.cookie_max_age)
            .map_err(|e| OAuth2Error::IssuerFailure(e.to_string()))?;
        let headers = set_session_cookie(&self.session, &auth_token)?;
        tracing::info!(%principal, "user is authenticated");
        Ok(headers)
    }

    /// Headers expiring the session cookie. Safe to call whether or not a
    /// session exists; there is nothing server-side to tear down.
    pub fn prepare_logout_response(&self) -> Result<HeaderMap, OAuth2Error> {
        Ok(clear_session_cookie(&self.session)?)
    }

    /// The verification entry point for downstream request handlers: hand
    /// in the cookie value, get back the authenticated principal.
    pub fn verify_session(&self, token: &str) -> Result<Principal, TokenError> {
        self.authenticator.verify(token)
    }
}
