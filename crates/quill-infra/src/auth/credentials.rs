//! Credential list for Basic Auth on write routes.
//!
//! The file holds one `user:password` pair per line. Blank lines and lines
//! starting with `#` are ignored. A password that is an Argon2 PHC string is
//! verified as a hash; anything else is compared as plain text.

use std::path::Path;

use subtle::ConstantTimeEq;

use quill_core::ports::{AuthChecker, AuthError, PasswordService};

use super::password::Argon2PasswordService;

/// Compare two strings in constant time with respect to their contents.
///
/// Both sides are padded to the longer length with different filler bytes,
/// so a length mismatch still walks the full input and never compares equal.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let max_len = a.len().max(b.len());

    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];
    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);
    (lengths_equal & contents_equal).into()
}

/// One `user:password` entry.
#[derive(Debug, Clone)]
pub struct Credential {
    pub user: String,
    pub secret: String,
}

/// Loaded-once list of users allowed to write.
pub struct CredentialList {
    entries: Vec<Credential>,
    passwords: Argon2PasswordService,
}

impl CredentialList {
    pub fn new(entries: Vec<Credential>) -> Self {
        Self {
            entries,
            passwords: Argon2PasswordService::new(),
        }
    }

    /// A list that rejects everyone.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Parse the `user:password` line format.
    pub fn parse(contents: &str) -> Self {
        let entries = contents
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| {
                let line = line.trim_end_matches('\r');
                if line.trim().is_empty() || line.starts_with('#') {
                    return None;
                }
                match line.split_once(':') {
                    Some((user, secret)) if !user.is_empty() => Some(Credential {
                        user: user.to_string(),
                        secret: secret.to_string(),
                    }),
                    _ => {
                        tracing::warn!(line = idx + 1, "Ignoring malformed credentials line");
                        None
                    }
                }
            })
            .collect();

        Self::new(entries)
    }

    /// Read and parse a credentials file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AuthError::CredentialsFile(format!("{}: {}", path.display(), e)))?;

        let list = Self::parse(&contents);
        tracing::info!(path = %path.display(), users = list.len(), "Loaded credentials");
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn verify_secret(&self, password: &str, secret: &str) -> bool {
        if !Argon2PasswordService::is_hash(secret) {
            return constant_time_eq(password, secret);
        }

        self.passwords
            .verify(password, secret)
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Stored credential hash is malformed");
                false
            })
    }
}

impl AuthChecker for CredentialList {
    fn check(&self, user: &str, password: &str) -> bool {
        // The first entry with a matching name decides.
        self.entries
            .iter()
            .find(|entry| constant_time_eq(user, &entry.user))
            .is_some_and(|entry| self.verify_secret(password, &entry.secret))
    }
}
