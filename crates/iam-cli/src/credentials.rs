//! Credential resolution.
//!
//! A call is authorized either by an access key pair given on the command
//! line or by the default profile store (`~/.aws/credentials`). The two
//! sources never mix: a partial command-line override is rejected rather
//! than completed from the file.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::CredentialError;
use crate::output::warning;

/// Profile store key holding the access key id.
pub const ACCESS_KEY_ID_KEY: &str = "aws_access_key_id";
/// Profile store key holding the secret key.
pub const SECRET_KEY_KEY: &str = "aws_secret_access_key";
/// Profile store key holding an optional session token.
pub const TOKEN_KEY: &str = "token";

/// Secret material authorizing one invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_key: String,
    session_token: Option<String>,
}

impl Credentials {
    /// Creates credentials from a key pair and optional session token.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_key: secret_key.into(),
            session_token,
        }
    }

    /// Access key id.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Secret key.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Session token, present for temporary credentials.
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

/// Credential values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    /// `--access-key-id`.
    pub access_key_id: Option<String>,
    /// `--secret-key`.
    pub secret_key: Option<String>,
    /// `--session-token`.
    pub session_token: Option<String>,
}

/// Chooses the credentials for a run from overrides or the profile store.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    profile_path: Option<PathBuf>,
}

impl CredentialResolver {
    /// Creates a resolver reading the given profile store.
    pub fn new(profile_path: impl Into<PathBuf>) -> Self {
        Self {
            profile_path: Some(profile_path.into()),
        }
    }

    /// Creates a resolver reading `~/.aws/credentials`.
    pub fn from_home() -> Self {
        Self::from_home_dir(dirs_next::home_dir())
    }

    /// Creates a resolver reading `<home>/.aws/credentials`.
    ///
    /// Without a home directory only command-line credentials resolve; the
    /// failure surfaces when the profile store is actually needed.
    pub fn from_home_dir(home: Option<PathBuf>) -> Self {
        Self {
            profile_path: home.map(|home| home.join(".aws").join("credentials")),
        }
    }

    /// Profile store path, if one could be determined.
    pub fn profile_path(&self) -> Option<&Path> {
        self.profile_path.as_deref()
    }

    /// Resolves credentials.
    ///
    /// Both halves of the key pair on the command line are used verbatim
    /// (with the token, if given). Neither half falls back to the profile
    /// store. Exactly one half is an error.
    pub fn resolve(&self, overrides: &CredentialOverrides) -> Result<Credentials, CredentialError> {
        match (&overrides.access_key_id, &overrides.secret_key) {
            (Some(access_key_id), Some(secret_key)) => {
                debug!(access_key_id = %access_key_id, "using command line credentials");
                Ok(Credentials::new(
                    access_key_id.clone(),
                    secret_key.clone(),
                    overrides.session_token.clone(),
                ))
            }
            (None, None) => {
                if overrides.session_token.is_some() {
                    warn!("session token given without an access key pair; ignoring it");
                }
                self.read_profile()
            }
            _ => Err(CredentialError::MismatchedArgs),
        }
    }

    fn read_profile(&self) -> Result<Credentials, CredentialError> {
        let path = self
            .profile_path
            .as_deref()
            .ok_or(CredentialError::NoHomeDirectory)?;
        if !path.exists() {
            warning(
                "Credentials file missing. Provide the credentials as command line arguments \
                 or create the credentials file.",
            );
        }

        let content = std::fs::read_to_string(path).map_err(|source| {
            CredentialError::ProfileUnreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let mut entries = parse_profile(&content);

        let mut take = |key: &'static str| {
            entries.remove(key).ok_or_else(|| CredentialError::MissingKey {
                path: path.to_path_buf(),
                key,
            })
        };
        let access_key_id = take(ACCESS_KEY_ID_KEY)?;
        let secret_key = take(SECRET_KEY_KEY)?;
        let session_token = entries.remove(TOKEN_KEY);

        debug!(
            path = %path.display(),
            access_key_id = %access_key_id,
            with_token = session_token.is_some(),
            "using profile store credentials"
        );
        Ok(Credentials::new(access_key_id, secret_key, session_token))
    }
}

/// Parses `key=value` lines.
///
/// Each line is split once on the first `=`; neither side is trimmed or
/// unescaped. Lines without `=` are skipped and later keys replace earlier
/// ones.
pub fn parse_profile(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
