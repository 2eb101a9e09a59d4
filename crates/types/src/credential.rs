use core::fmt;

/// A session credential for the relayer service.
///
/// The secret is only ever forwarded with outbound requests. It is never
/// serialized, and its [`Debug`] output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Access the raw secret, for placing it on an outbound request.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// True if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl From<String> for Credential {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for Credential {
    fn from(secret: &str) -> Self {
        Self(secret.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_redacted() {
        let credential = Credential::new("super-secret-key");
        let debug = format!("{credential:?}");
        assert!(!debug.contains("super-secret-key"));
        assert_eq!(credential.expose_secret(), "super-secret-key");
    }

    #[test]
    fn blank_is_empty() {
        assert!(Credential::from("  ").is_empty());
        assert!(!Credential::from("k").is_empty());
    }
}
