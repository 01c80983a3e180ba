//! Results returned by the identity and token services.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tabled::Tabled;

/// Renders an optional column value.
fn display_optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// An IAM user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct User {
    /// User ID.
    #[tabled(rename = "Id")]
    pub id: String,
    /// User name.
    #[tabled(rename = "User Name")]
    pub name: String,
    /// User path.
    #[tabled(rename = "Path")]
    pub path: String,
    /// Creation timestamp.
    #[tabled(rename = "Create Date")]
    pub created_at: String,
}

/// Access key status accepted by `UpdateAccessKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessKeyStatus {
    /// The key can sign requests.
    Active,
    /// The key is disabled.
    Inactive,
}

impl AccessKeyStatus {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for AccessKeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessKeyStatus {
    type Err = crate::CliError;

    /// Only the exact values `Active` and `Inactive` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            other => Err(crate::CliError::usage(format!(
                "Invalid status '{other}'. Expected Active or Inactive."
            ))),
        }
    }
}

/// An access key.
///
/// The secret key is only present in the result of `CreateAccessKey`; it
/// cannot be retrieved afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct AccessKey {
    /// Owning user.
    #[tabled(rename = "User Name")]
    pub user_name: String,
    /// Access key id.
    #[tabled(rename = "Access Key Id")]
    pub access_key_id: String,
    /// Secret key, returned once at creation.
    #[tabled(rename = "Secret Key", display_with = "display_optional")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    /// Status as reported by the service.
    #[tabled(rename = "Status")]
    pub status: String,
    /// Creation timestamp.
    #[tabled(rename = "Create Date", display_with = "display_optional")]
    pub created_at: Option<String>,
}

/// A SAML federation provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct SamlProvider {
    /// Provider ARN.
    #[tabled(rename = "ARN")]
    pub arn: String,
    /// Expiry of the provider metadata.
    #[tabled(rename = "Valid Until", display_with = "display_optional")]
    pub valid_until: Option<String>,
    /// Creation timestamp.
    #[tabled(rename = "Create Date", display_with = "display_optional")]
    pub created_at: Option<String>,
}

/// Temporary credentials issued by the token service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct FederatedCredentials {
    /// Access key id.
    #[tabled(rename = "Access Key Id")]
    pub access_key_id: String,
    /// Secret key.
    #[tabled(rename = "Secret Key")]
    pub secret_key: String,
    /// Session token.
    #[tabled(rename = "Session Token")]
    pub session_token: String,
    /// Expiration timestamp.
    #[tabled(rename = "Expiration")]
    pub expiration: String,
}

/// Root user credentials returned when an account is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct AccountBootstrapResult {
    /// Root user name.
    #[tabled(rename = "Root User")]
    pub root_user_name: String,
    /// Root access key id.
    #[tabled(rename = "Access Key Id")]
    pub access_key_id: String,
    /// Access key status.
    #[tabled(rename = "Status")]
    pub status: String,
    /// Root secret key.
    #[tabled(rename = "Secret Key")]
    pub secret_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accepts_exact_values_only() {
        assert_eq!("Active".parse::<AccessKeyStatus>().unwrap(), AccessKeyStatus::Active);
        assert_eq!("Inactive".parse::<AccessKeyStatus>().unwrap(), AccessKeyStatus::Inactive);

        for rejected in ["active", "INACTIVE", " Active", "Disabled", ""] {
            let err = rejected.parse::<AccessKeyStatus>().unwrap_err();
            assert!(matches!(err, crate::CliError::Usage(_)), "{rejected:?}");
        }
    }

    #[test]
    fn listed_access_keys_omit_secret_in_json() {
        let key = AccessKey {
            user_name: "alice".to_string(),
            access_key_id: "AKIA1".to_string(),
            secret_key: None,
            status: "Active".to_string(),
            created_at: None,
        };
        let json = serde_json::to_value(&key).unwrap();
        assert!(json.get("secret_key").is_none());
        assert_eq!(json["access_key_id"], "AKIA1");
    }
}
