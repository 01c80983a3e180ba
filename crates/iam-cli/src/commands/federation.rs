//! Temporary credential commands.

use std::borrow::Cow;

use base64::Engine;

use crate::client::TokenService;
use crate::config::OutputFormat;
use crate::output::{output_single, success};
use crate::registry::{parse_duration, ArgKey, CommandInvocation};

use super::saml::read_input_file;

/// Issues a federation token for `--user`.
pub async fn get_federation_token(
    client: &impl TokenService,
    invocation: &CommandInvocation,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let name = invocation.require(ArgKey::User)?;
    let duration = invocation
        .get(ArgKey::Duration)
        .map(parse_duration)
        .transpose()?;
    let credentials = client.get_federation_token(name, duration).await?;

    success(&format!("Federation token issued for '{}'.", name));
    output_single(&credentials, format.visible())
}

/// Exchanges the SAML assertion in `--saml-assertion` for credentials of
/// `--role-arn`.
pub async fn assume_role_with_saml(
    client: &impl TokenService,
    invocation: &CommandInvocation,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let principal_arn = invocation.require(ArgKey::PrincipalArn)?;
    let role_arn = invocation.require(ArgKey::RoleArn)?;
    let contents = read_input_file(invocation.require(ArgKey::SamlAssertion)?, "SAML assertion")?;
    let assertion = encode_saml_assertion(&contents);

    let credentials = client
        .assume_role_with_saml(principal_arn, role_arn, &assertion)
        .await?;

    success(&format!("Assumed role '{}'.", role_arn));
    output_single(&credentials, format.visible())
}

/// Encodes a SAML assertion for the token service.
///
/// Assertion files normally hold the base64 form already; a raw XML
/// assertion is encoded first.
#[must_use]
pub fn encode_saml_assertion(contents: &str) -> Cow<'_, str> {
    let trimmed = contents.trim();
    if trimmed.starts_with('<') {
        Cow::Owned(base64::engine::general_purpose::STANDARD.encode(trimmed))
    } else {
        Cow::Borrowed(trimmed)
    }
}
