//! Authentication implementations.

mod credentials;
mod password;

pub use credentials::{Credential, CredentialList, constant_time_eq};
pub use password::Argon2PasswordService;
