//! CLI argument parsing.

use clap::Parser;

use crate::config::OutputFormat;
use crate::credentials::CredentialOverrides;
use crate::registry::{ArgKey, CommandInvocation};

/// IAM CLI - Administration tool for IAM/STS compatible identity services.
///
/// The action name is matched case-insensitively, e.g. `CreateUser` or
/// `createuser`.
#[derive(Debug, Parser)]
#[command(name = "iamcli")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Action to perform (CreateAccount, CreateUser, ListUsers, ...).
    pub action: String,

    /// Access key id (requires --secret-key).
    #[arg(short = 'x', long)]
    pub access_key_id: Option<String>,

    /// Secret key (requires --access-key-id).
    #[arg(short = 'y', long)]
    pub secret_key: Option<String>,

    /// Session token of temporary credentials.
    #[arg(short = 't', long)]
    pub session_token: Option<String>,

    /// Account name.
    #[arg(short, long)]
    pub account: Option<String>,

    /// User name.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Federation token duration in seconds.
    #[arg(short, long)]
    pub duration: Option<String>,

    /// Access key id the action applies to.
    #[arg(short = 'k', long = "access-key")]
    pub access_key: Option<String>,

    /// Name or ARN (SAML provider name/ARN, new user name).
    #[arg(short, long)]
    pub name: Option<String>,

    /// Access key status (Active or Inactive).
    #[arg(short, long)]
    pub status: Option<String>,

    /// User path (new path for UpdateUser).
    #[arg(short, long)]
    pub path: Option<String>,

    /// Input file (SAML metadata document).
    #[arg(short, long)]
    pub file: Option<String>,

    /// SAML provider ARN for AssumeRoleWithSaml.
    #[arg(long)]
    pub principal_arn: Option<String>,

    /// Role ARN for AssumeRoleWithSaml.
    #[arg(long)]
    pub role_arn: Option<String>,

    /// File holding the SAML assertion for AssumeRoleWithSaml.
    #[arg(long)]
    pub saml_assertion: Option<String>,

    /// Identity service URL (overrides config).
    #[arg(long, env = "IAMCLI_IAM_ENDPOINT")]
    pub iam_endpoint: Option<String>,

    /// Token service URL (overrides config).
    #[arg(long, env = "IAMCLI_STS_ENDPOINT")]
    pub sts_endpoint: Option<String>,

    /// Signing region (overrides config).
    #[arg(long, env = "IAMCLI_REGION")]
    pub region: Option<String>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Treats empty values as absent.
fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

impl Cli {
    /// Builds the command invocation from the parsed options.
    pub fn invocation(&self) -> CommandInvocation {
        let slots = [
            (ArgKey::User, &self.user),
            (ArgKey::Account, &self.account),
            (ArgKey::AccessKeyId, &self.access_key),
            (ArgKey::Status, &self.status),
            (ArgKey::Name, &self.name),
            (ArgKey::Path, &self.path),
            (ArgKey::File, &self.file),
            (ArgKey::Duration, &self.duration),
            (ArgKey::PrincipalArn, &self.principal_arn),
            (ArgKey::RoleArn, &self.role_arn),
            (ArgKey::SamlAssertion, &self.saml_assertion),
        ];

        let mut invocation = CommandInvocation::new(self.action.clone());
        for (key, value) in slots {
            if let Some(value) = present(value) {
                invocation.args.insert(key, value);
            }
        }
        invocation
    }

    /// Credential values given on the command line.
    pub fn credential_overrides(&self) -> CredentialOverrides {
        CredentialOverrides {
            access_key_id: present(&self.access_key_id),
            secret_key: present(&self.secret_key),
            session_token: present(&self.session_token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_flags_map_to_argument_slots() {
        let cli = Cli::try_parse_from([
            "iamcli",
            "updateaccesskey",
            "-k",
            "AKIA1",
            "-s",
            "Inactive",
            "-u",
            "alice",
        ])
        .unwrap();

        let invocation = cli.invocation();
        assert_eq!(invocation.name, "updateaccesskey");
        assert_eq!(invocation.get(ArgKey::AccessKeyId), Some("AKIA1"));
        assert_eq!(invocation.get(ArgKey::Status), Some("Inactive"));
        assert_eq!(invocation.get(ArgKey::User), Some("alice"));
        assert_eq!(invocation.args.len(), 3);
    }

    #[test]
    fn empty_values_are_absent() {
        let cli = Cli::try_parse_from(["iamcli", "CreateUser", "-u", "", "-x", "", "-y", "S"])
            .unwrap();

        assert_eq!(cli.invocation().get(ArgKey::User), None);
        let overrides = cli.credential_overrides();
        assert_eq!(overrides.access_key_id, None);
        assert_eq!(overrides.secret_key.as_deref(), Some("S"));
    }

    #[test]
    fn unknown_action_still_parses() {
        let cli = Cli::try_parse_from(["iamcli", "CreateBucket"]).unwrap();
        assert_eq!(cli.invocation().name, "CreateBucket");
    }

    #[test]
    fn saml_options_are_long_only() {
        let cli = Cli::try_parse_from([
            "iamcli",
            "AssumeRoleWithSaml",
            "--principal-arn",
            "arn:aws:iam::123:saml-provider/ADFS",
            "--role-arn",
            "arn:aws:iam::123:role/ADFS-Dev",
            "--saml-assertion",
            "assertion.b64",
            "-o",
            "json",
        ])
        .unwrap();

        let invocation = cli.invocation();
        assert_eq!(invocation.get(ArgKey::SamlAssertion), Some("assertion.b64"));
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }
}
