use serde::{Deserialize, Serialize};

/// The authenticated identity carried inside a session credential, in
/// practice a verified primary email address. Opaque and immutable once
/// extracted; never persisted server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(inner: impl Into<String>) -> Self {
        Self(inner.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_roundtrip() {
        let principal = Principal::new("a@x.com");
        assert_eq!(principal.as_str(), "a@x.com");
        assert_eq!(principal.to_string(), "a@x.com");
        assert_eq!(principal.into_inner(), "a@x.com");
    }

    #[test]
    fn test_principal_serde_transparent() {
        let principal = Principal::new("a@x.com");
        let json = serde_json::to_string(&principal).unwrap();
        assert_eq!(json, "\"a@x.com\"");
        let back: Principal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, principal);
    }
}
