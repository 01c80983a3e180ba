//! User management commands.

use crate::client::IdentityService;
use crate::config::OutputFormat;
use crate::output::{output, output_single, success};
use crate::registry::{ArgKey, CommandInvocation};

/// Creates a user.
pub async fn create_user(
    client: &impl IdentityService,
    invocation: &CommandInvocation,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let name = invocation.require(ArgKey::User)?;
    let user = client
        .create_user(name, invocation.get(ArgKey::Path))
        .await?;

    success(&format!("User '{}' created.", user.name));
    output_single(&user, format)
}

/// Deletes a user.
pub async fn delete_user(
    client: &impl IdentityService,
    invocation: &CommandInvocation,
) -> crate::CliResult<()> {
    let name = invocation.require(ArgKey::User)?;
    client.delete_user(name).await?;

    success(&format!("User '{}' deleted.", name));
    Ok(())
}

/// Renames a user (`--name`) and/or moves it (`--path`).
pub async fn update_user(
    client: &impl IdentityService,
    invocation: &CommandInvocation,
) -> crate::CliResult<()> {
    let name = invocation.require(ArgKey::User)?;
    let new_name = invocation.get(ArgKey::Name);
    let new_path = invocation.get(ArgKey::Path);
    client.update_user(name, new_name, new_path).await?;

    success(&format!("User '{}' updated.", new_name.unwrap_or(name)));
    Ok(())
}

/// Lists users.
pub async fn list_users(
    client: &impl IdentityService,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let users = client.list_users().await?;
    output(&users, format)
}
