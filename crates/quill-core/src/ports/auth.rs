//! Authentication ports.

/// Decides whether a Basic Auth username/password pair may write.
pub trait AuthChecker: Send + Sync {
    fn check(&self, user: &str, password: &str) -> bool;
}

/// Password hash verification.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Malformed authorization header: {0}")]
    MalformedHeader(String),

    #[error("Credentials file unreadable: {0}")]
    CredentialsFile(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
