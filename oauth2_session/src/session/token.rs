use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use super::errors::TokenError;
use super::types::Principal;

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    exp: i64,
}

/// Issues and verifies compact signed tokens binding a principal to an
/// expiration instant.
///
/// Verification is a pure function of the token, the current time, and the
/// process secret; no external state is read or written. A single instance
/// is safe for unsynchronized concurrent use.
pub struct Authenticator {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Authenticator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        let mut validation = Validation::new(Algorithm::HS256);
        // The CSRF state window must be exact; no clock-skew grace.
        validation.leeway = 0;
        Self {
            header: Header::new(Algorithm::HS256),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign a token carrying `principal` that expires `ttl` from now.
    pub fn issue(&self, principal: &Principal, ttl: Duration) -> Result<String, TokenError> {
        let claims = SessionClaims {
            sub: principal.as_str().to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::Issuer(e.to_string()))
    }

    /// Validate signature and expiry, returning the embedded principal.
    /// Any malformed or tampered token is `Invalid`; a well-formed token
    /// past its expiry is `Expired` regardless of signature validity.
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            },
        )?;
        Ok(Principal::new(data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(b"test-signing-secret")
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let auth = authenticator();
        let principal = Principal::new("a@x.com");
        let token = auth.issue(&principal, Duration::minutes(10)).unwrap();
        assert_eq!(auth.verify(&token).unwrap(), principal);
    }

    #[test]
    fn test_expired_token_rejected() {
        let auth = authenticator();
        let principal = Principal::new("a@x.com");
        // A token whose expiry already passed, equivalent to verifying
        // after the TTL window.
        let token = auth.issue(&principal, Duration::seconds(-1)).unwrap();
        assert_eq!(auth.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_from_different_secret_rejected() {
        let auth = authenticator();
        let other = Authenticator::new(b"another-signing-secret");
        let token = other
            .issue(&Principal::new("a@x.com"), Duration::minutes(10))
            .unwrap();
        assert_eq!(auth.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let auth = authenticator();
        let token = auth
            .issue(&Principal::new("a@x.com"), Duration::minutes(10))
            .unwrap();

        // Flip the last signature character to a different base64url char.
        let mut tampered: Vec<char> = token.chars().collect();
        let last = tampered.len() - 1;
        tampered[last] = if tampered[last] == 'A' { 'B' } else { 'A' };
        let tampered: String = tampered.into_iter().collect();

        assert_ne!(tampered, token);
        assert_eq!(auth.verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let auth = authenticator();
        for garbage in ["", "abc", "a.b", "a.b.c", "....."] {
            assert_eq!(auth.verify(garbage), Err(TokenError::Invalid), "{garbage:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_roundtrip_returns_original_principal(
            sub in "[a-zA-Z0-9._+-]{1,40}@[a-z0-9.-]{1,20}",
            ttl_secs in 1i64..86_400,
        ) {
            let auth = authenticator();
            let principal = Principal::new(sub);
            let token = auth.issue(&principal, Duration::seconds(ttl_secs)).unwrap();
            prop_assert_eq!(auth.verify(&token).unwrap(), principal);
        }
    }
}
