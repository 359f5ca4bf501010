use thiserror::Error;

use crate::utils::UtilError;

/// Failures of the login/callback protocol. Everything except
/// `IssuerFailure` during the login redirect is recovered into a redirect
/// to the failure URL; the client never sees which variant occurred.
#[derive(Debug, Error, Clone)]
pub enum OAuth2Error {
    #[error("invalid oauth2 state: {0}")]
    StateMismatch(String),

    #[error("token exchange failed: {0}")]
    ExchangeFailed(String),

    #[error("identity unavailable: {0}")]
    IdentityUnavailable(String),

    #[error("no verified primary email")]
    NoPrimaryVerifiedEmail,

    #[error("token issuer failure: {0}")]
    IssuerFailure(String),

    #[error("cookie error: {0}")]
    Cookie(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<UtilError> for OAuth2Error {
    fn from(err: UtilError) -> Self {
        match err {
            UtilError::Cookie(msg) => OAuth2Error::Cookie(msg),
            UtilError::Crypto(msg) => OAuth2Error::IssuerFailure(msg),
        }
    }
}
