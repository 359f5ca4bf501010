use chrono::Duration;

/// Default name of the cookie carrying the session token.
pub const DEFAULT_COOKIE_NAME: &str = "session";

const DEFAULT_COOKIE_DAYS: i64 = 30;

/// Cookie name and lifetime for issued session credentials.
///
/// Read-only after construction; the browser is the storage medium, so this
/// is the whole server-side session "state".
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_max_age: Duration,
}

impl SessionConfig {
    pub fn new(cookie_name: impl Into<String>, cookie_max_age: Duration) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            cookie_max_age,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COOKIE_NAME, Duration::days(DEFAULT_COOKIE_DAYS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_config() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "session");
        assert_eq!(config.cookie_max_age, Duration::days(30));
    }
}
