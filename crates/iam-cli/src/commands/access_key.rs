//! Access key management commands.

use crate::client::IdentityService;
use crate::config::OutputFormat;
use crate::model::AccessKeyStatus;
use crate::output::{output, output_single, success, warning};
use crate::registry::{ArgKey, CommandInvocation};

/// Creates an access key for `--user`, or for the caller.
///
/// The secret key is printed even with quiet output since the service
/// never returns it again.
pub async fn create_access_key(
    client: &impl IdentityService,
    invocation: &CommandInvocation,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let key = client
        .create_access_key(invocation.get(ArgKey::User))
        .await?;

    success(&format!("Access key '{}' created.", key.access_key_id));
    output_single(&key, format.visible())?;
    warning("Store the secret key now; it cannot be retrieved later.");
    Ok(())
}

/// Deletes an access key.
pub async fn delete_access_key(
    client: &impl IdentityService,
    invocation: &CommandInvocation,
) -> crate::CliResult<()> {
    let access_key_id = invocation.require(ArgKey::AccessKeyId)?;
    client
        .delete_access_key(access_key_id, invocation.get(ArgKey::User))
        .await?;

    success(&format!("Access key '{}' deleted.", access_key_id));
    Ok(())
}

/// Lists access keys of `--user`, or of the caller.
pub async fn list_access_keys(
    client: &impl IdentityService,
    invocation: &CommandInvocation,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let keys = client
        .list_access_keys(invocation.get(ArgKey::User))
        .await?;
    output(&keys, format)
}

/// Activates or deactivates an access key.
pub async fn update_access_key(
    client: &impl IdentityService,
    invocation: &CommandInvocation,
) -> crate::CliResult<()> {
    let access_key_id = invocation.require(ArgKey::AccessKeyId)?;
    let status: AccessKeyStatus = invocation.require(ArgKey::Status)?.parse()?;
    client
        .update_access_key(access_key_id, status, invocation.get(ArgKey::User))
        .await?;

    success(&format!("Access key '{}' is now {}.", access_key_id, status));
    Ok(())
}
