//! User and host identity for the header row
//!
//! The header is the one place where missing data is fatal: a display that
//! cannot say whose machine it describes is not rendered at all.

use thiserror::Error;

/// Which half of the identity could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// No user name from the environment or the password database
    #[error("could not determine the current user name")]
    User,
    /// `gethostname` failed or returned an empty name
    #[error("could not determine the host name")]
    Host,
}

/// Resolved `user@host` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Login name
    pub user: String,
    /// Host name
    pub host: String,
}

impl Identity {
    /// Create an identity from parts
    pub fn new(user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
        }
    }
}

/// Capability for looking up the invoking user and the local host
pub trait IdentitySource {
    /// Login name of the invoking user
    fn user(&self) -> Option<String>;

    /// Local host name
    fn host(&self) -> Option<String>;

    /// Resolve both names or report which one is missing
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] naming the part that could not be resolved.
    fn resolve(&self) -> Result<Identity, IdentityError> {
        let user = self
            .user()
            .filter(|u| !u.is_empty())
            .ok_or(IdentityError::User)?;
        let host = self
            .host()
            .filter(|h| !h.is_empty())
            .ok_or(IdentityError::Host)?;
        Ok(Identity { user, host })
    }
}

impl IdentitySource for Identity {
    fn user(&self) -> Option<String> {
        Some(self.user.clone())
    }

    fn host(&self) -> Option<String> {
        Some(self.host.clone())
    }
}

/// Identity of the running process
///
/// The user comes from `$USER`, falling back to the password entry of the
/// real uid. The host comes from `gethostname(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdentity;

impl IdentitySource for SystemIdentity {
    fn user(&self) -> Option<String> {
        if let Ok(user) = std::env::var("USER") {
            if !user.is_empty() {
                return Some(user);
            }
        }

        let uid = nix::unistd::getuid();
        match nix::unistd::User::from_uid(uid) {
            Ok(Some(entry)) => Some(entry.name),
            Ok(None) => {
                tracing::debug!(uid = uid.as_raw(), "No password entry for uid");
                None
            }
            Err(e) => {
                tracing::debug!(uid = uid.as_raw(), error = %e, "Password lookup failed");
                None
            }
        }
    }

    fn host(&self) -> Option<String> {
        match nix::unistd::gethostname() {
            Ok(name) => Some(name.to_string_lossy().into_owned()),
            Err(e) => {
                tracing::debug!(error = %e, "gethostname failed");
                None
            }
        }
    }
}
