use std::fmt;

/// Opaque bearer token. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Trimmed token, or `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_rejects_blank() {
        assert_eq!(Credential::parse("  abc \n").unwrap().as_str(), "abc");
        assert!(Credential::parse("   ").is_none());
    }

    #[test]
    fn test_debug_hides_token() {
        let credential = Credential::new("secret-token");
        assert!(!format!("{:?}", credential).contains("secret"));
    }
}
