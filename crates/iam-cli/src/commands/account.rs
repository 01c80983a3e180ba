//! Account bootstrap command.

use crate::bootstrap::AccountBootstrap;
use crate::config::OutputFormat;
use crate::output::{output_single, success, warning};
use crate::registry::{ArgKey, CommandInvocation};

/// Creates the account named by `--account` and prints its root
/// credentials.
pub async fn create_account(
    client: &impl AccountBootstrap,
    invocation: &CommandInvocation,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let name = invocation.require(ArgKey::Account)?;
    let result = client.create_account(name).await?;

    success(&format!("Account '{}' created.", name));
    output_single(&result, format.visible())?;
    warning("Store the root secret key now; it cannot be retrieved later.");
    Ok(())
}
