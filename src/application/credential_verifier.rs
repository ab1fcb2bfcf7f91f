// Credential verifier - plaintext comparison against two configured secrets
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    username: Option<String>,
    password: Option<String>,
}

impl CredentialVerifier {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        if username.is_none() || password.is_none() {
            tracing::warn!("Admin credentials are not configured; every login will be rejected");
        }
        Self { username, password }
    }

    /// Succeeds iff both fields exactly equal the configured values.
    /// Unset configuration never matches, even against absent fields.
    pub fn verify(&self, credentials: &Credentials) -> Verdict {
        let matches = |given: &Option<String>, expected: &Option<String>| match (given, expected) {
            (Some(g), Some(e)) => g == e,
            _ => false,
        };

        if matches(&credentials.username, &self.username)
            && matches(&credentials.password, &self.password)
        {
            Verdict {
                success: true,
                message: "Authentication successful".to_string(),
            }
        } else {
            Verdict {
                success: false,
                message: "Invalid credentials".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(u: Option<&str>, p: Option<&str>) -> Credentials {
        Credentials {
            username: u.map(str::to_string),
            password: p.map(str::to_string),
        }
    }

    fn verifier() -> CredentialVerifier {
        CredentialVerifier::new(Some("admin".into()), Some("s3cret".into()))
    }

    #[test]
    fn test_exact_match_succeeds() {
        let verdict = verifier().verify(&creds(Some("admin"), Some("s3cret")));
        assert!(verdict.success);
        assert_eq!(verdict.message, "Authentication successful");
    }

    #[test]
    fn test_any_difference_fails() {
        let v = verifier();
        assert!(!v.verify(&creds(Some("admin"), Some("s3cret "))).success);
        assert!(!v.verify(&creds(Some("Admin"), Some("s3cret"))).success);
        assert!(!v.verify(&creds(Some("admin"), None)).success);
        assert!(!v.verify(&creds(None, None)).success);
        assert_eq!(v.verify(&creds(None, None)).message, "Invalid credentials");
    }

    #[test]
    fn test_unconfigured_never_matches() {
        let v = CredentialVerifier::new(None, None);
        assert!(!v.verify(&creds(None, None)).success);
        assert!(!v.verify(&creds(Some(""), Some(""))).success);
    }
}
