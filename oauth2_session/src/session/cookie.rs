use chrono::{Duration, Utc};
use http::header::HeaderMap;

use crate::utils::{UtilError, header_set_cookie};

use super::config::SessionConfig;

/// Sentinel written on logout; the past `Expires` forces browser deletion.
const CLEARED_VALUE: &str = "none";

/// Build the `Set-Cookie` header delivering a freshly issued session token.
/// No other component writes this cookie.
pub(crate) fn set_session_cookie(
    config: &SessionConfig,
    token: &str,
) -> Result<HeaderMap, UtilError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        &config.cookie_name,
        token,
        Utc::now() + config.cookie_max_age,
    )?;
    Ok(headers)
}

/// Build the `Set-Cookie` header that expires the session cookie, with
/// `Expires` one hour in the past.
pub(crate) fn clear_session_cookie(config: &SessionConfig) -> Result<HeaderMap, UtilError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        &config.cookie_name,
        CLEARED_VALUE,
        Utc::now() - Duration::hours(1),
    )?;
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use http::header::SET_COOKIE;

    fn cookie_value(headers: &HeaderMap) -> &str {
        headers
            .get(SET_COOKIE)
            .expect("Set-Cookie header should be present")
            .to_str()
            .unwrap()
    }

    fn expires_of(cookie: &str) -> DateTime<chrono::FixedOffset> {
        let raw = cookie
            .split("; ")
            .find_map(|attr| attr.strip_prefix("Expires="))
            .expect("Expires attribute should be present");
        DateTime::parse_from_rfc2822(raw).expect("Expires should be a valid HTTP date")
    }

    #[test]
    fn test_set_session_cookie_expires_in_the_future() {
        let config = SessionConfig::default();
        let headers = set_session_cookie(&config, "signed-token").unwrap();
        let cookie = cookie_value(&headers);

        assert!(cookie.starts_with("session=signed-token; "));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(expires_of(cookie) > Utc::now());
    }

    #[test]
    fn test_clear_session_cookie_expires_in_the_past() {
        let config = SessionConfig::default();
        let headers = clear_session_cookie(&config).unwrap();
        let cookie = cookie_value(&headers);

        assert!(cookie.starts_with("session=none; "));
        assert!(expires_of(cookie) < Utc::now());
    }

    #[test]
    fn test_cookie_name_is_configurable() {
        let config = SessionConfig::new("chronos", Duration::days(7));
        let headers = set_session_cookie(&config, "signed-token").unwrap();
        assert!(cookie_value(&headers).starts_with("chronos=signed-token; "));
    }
}
