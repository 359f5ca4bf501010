use crate::session::Principal;

use super::config::OAuth2Config;
use super::errors::OAuth2Error;
use super::types::{AccessTokenResponse, ProviderEmail};

/// GitHub's API rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("oauth2-session/", env!("CARGO_PKG_VERSION"));

pub(super) async fn exchange_code_for_token(
    client: &reqwest::Client,
    config: &OAuth2Config,
    code: &str,
) -> Result<String, OAuth2Error> {
    let response = client
        .post(&config.token_url)
        // GitHub answers form-encoded unless JSON is requested explicitly
        .header(http::header::ACCEPT, "application/json")
        .form(&[
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| OAuth2Error::ExchangeFailed(e.to_string()))?;

    match response.status() {
        reqwest::StatusCode::OK => {}
        status => {
            tracing::debug!("Token exchange response: {:#?}", response);
            return Err(OAuth2Error::ExchangeFailed(status.to_string()));
        }
    }

    let response_body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::ExchangeFailed(e.to_string()))?;
    let token: AccessTokenResponse = serde_json::from_str(&response_body).map_err(|e| {
        OAuth2Error::ExchangeFailed(format!("Failed to deserialize response body: {e}"))
    })?;

    Ok(token.access_token)
}

pub(super) async fn fetch_user_emails(
    client: &reqwest::Client,
    config: &OAuth2Config,
    access_token: &str,
) -> Result<Vec<ProviderEmail>, OAuth2Error> {
    let response = client
        .get(&config.emails_url)
        .bearer_auth(access_token)
        .header(http::header::ACCEPT, "application/vnd.github+json")
        .header(http::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .map_err(|e| OAuth2Error::IdentityUnavailable(e.to_string()))?;

    match response.status() {
        reqwest::StatusCode::OK => {}
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
            // Typically a missing or revoked email-read scope
            return Err(OAuth2Error::IdentityUnavailable(format!(
                "access to email addresses forbidden: {}",
                response.status()
            )));
        }
        status => return Err(OAuth2Error::IdentityUnavailable(status.to_string())),
    }

    let response_body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::IdentityUnavailable(e.to_string()))?;
    let emails: Vec<ProviderEmail> = serde_json::from_str(&response_body).map_err(|e| {
        OAuth2Error::IdentityUnavailable(format!("Failed to deserialize response body: {e}"))
    })?;

    tracing::debug!("Provider returned {} email entries", emails.len());
    Ok(emails)
}

/// Select the unique address that is both verified and primary. Zero
/// candidates and an ambiguous listing both fail; no silent pick.
pub(super) fn primary_verified_email(emails: &[ProviderEmail]) -> Result<Principal, OAuth2Error> {
    let mut candidates = emails.iter().filter(|e| e.verified && e.primary);
    match (candidates.next(), candidates.next()) {
        (Some(email), None) => Ok(Principal::new(email.email.clone())),
        _ => Err(OAuth2Error::NoPrimaryVerifiedEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(address: &str, verified: bool, primary: bool) -> ProviderEmail {
        ProviderEmail {
            email: address.to_string(),
            verified,
            primary,
        }
    }

    #[test]
    fn test_primary_verified_email_selected() {
        let emails = vec![
            email("a@x.com", true, true),
            email("b@x.com", true, false),
        ];
        let principal = primary_verified_email(&emails).unwrap();
        assert_eq!(principal.as_str(), "a@x.com");
    }

    #[test]
    fn test_no_candidate_fails() {
        let emails = vec![
            email("a@x.com", false, true),
            email("b@x.com", true, false),
        ];
        assert!(matches!(
            primary_verified_email(&emails),
            Err(OAuth2Error::NoPrimaryVerifiedEmail)
        ));
    }

    #[test]
    fn test_empty_listing_fails() {
        assert!(matches!(
            primary_verified_email(&[]),
            Err(OAuth2Error::NoPrimaryVerifiedEmail)
        ));
    }

    #[test]
    fn test_ambiguous_listing_fails() {
        let emails = vec![email("a@x.com", true, true), email("b@x.com", true, true)];
        assert!(matches!(
            primary_verified_email(&emails),
            Err(OAuth2Error::NoPrimaryVerifiedEmail)
        ));
    }
}
