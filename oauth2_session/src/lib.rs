//! oauth2-session - Stateless OAuth2 login, callback, and session handling
//!
//! This crate implements the authorization-code flow against GitHub and
//! issues self-contained signed session tokens, so no server-side session
//! store is needed. CSRF protection for the callback uses the same signed
//! tokens: the `state` parameter is a random nonce wrapped in a short-lived
//! token that the callback verifies cryptographically instead of looking it
//! up anywhere.

mod oauth2;
mod session;
mod utils;

pub use oauth2::{AuthResponse, GithubOAuth2, OAuth2Config, OAuth2Error, ProviderEmail};

pub use session::{Authenticator, DEFAULT_COOKIE_NAME, Principal, SessionConfig, TokenError};
