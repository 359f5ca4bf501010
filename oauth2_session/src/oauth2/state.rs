use chrono::Duration;

use crate::session::{Authenticator, Principal, TokenError};
use crate::utils::gen_random_string;

/// How long the user has to finish typing their provider password. The
/// verifier enforces this window at callback time; there is no separate
/// timer and nothing stored server-side.
pub(crate) const STATE_TTL_SECS: i64 = 600;

/// Mint the OAuth2 `state` value: 32 bytes from a CSPRNG, base64url
/// encoded, wrapped as the principal of a short-lived signed token. A
/// forged or replayed (post-expiry) state fails closed under plain
/// `Authenticator::verify`.
pub(crate) fn generate_state(authenticator: &Authenticator) -> Result<String, TokenError> {
    let nonce = gen_random_string(32).map_err(|e| TokenError::Issuer(e.to_string()))?;
    authenticator.issue(&Principal::new(nonce), Duration::seconds(STATE_TTL_SECS))
}
