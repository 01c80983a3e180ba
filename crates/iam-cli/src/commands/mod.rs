//! Command implementations and dispatch.

pub mod access_key;
pub mod account;
pub mod federation;
pub mod saml;
pub mod user;

use tracing::debug;

use crate::client::ClientFactory;
use crate::config::OutputFormat;
use crate::credentials::{CredentialOverrides, CredentialResolver};
use crate::output::{error, info};
use crate::registry::{usage, Command, CommandInvocation};

/// Runs one invocation.
///
/// Unknown command names print usage and succeed. Argument and credential
/// failures are returned before any client is built. Failures reported by
/// the remote services are printed here and do not fail the run.
pub async fn dispatch<F: ClientFactory>(
    invocation: &CommandInvocation,
    resolver: &CredentialResolver,
    overrides: &CredentialOverrides,
    factory: &F,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let Some(command) = Command::from_name(&invocation.name) else {
        info(&format!(
            "Incorrect format or operation '{}' not supported.",
            invocation.name
        ));
        println!("{}", usage());
        return Ok(());
    };

    command.spec().validate(invocation)?;
    debug!(
        command = %command,
        authenticated = command.requires_credentials(),
        "dispatching"
    );

    let credentials = || resolver.resolve(overrides);
    let identity = || -> crate::CliResult<F::Identity> { factory.identity(&credentials()?) };
    let token = || -> crate::CliResult<F::Token> { factory.token(&credentials()?) };

    let result = match command {
        Command::CreateAccount => {
            account::create_account(&factory.bootstrap()?, invocation, format).await
        }
        Command::CreateUser => user::create_user(&identity()?, invocation, format).await,
        Command::DeleteUser => user::delete_user(&identity()?, invocation).await,
        Command::UpdateUser => user::update_user(&identity()?, invocation).await,
        Command::ListUsers => user::list_users(&identity()?, format).await,
        Command::CreateAccessKey => {
            access_key::create_access_key(&identity()?, invocation, format).await
        }
        Command::DeleteAccessKey => access_key::delete_access_key(&identity()?, invocation).await,
        Command::ListAccessKeys => {
            access_key::list_access_keys(&identity()?, invocation, format).await
        }
        Command::UpdateAccessKey => access_key::update_access_key(&identity()?, invocation).await,
        Command::CreateSamlProvider => {
            saml::create_saml_provider(&identity()?, invocation, format).await
        }
        Command::DeleteSamlProvider => saml::delete_saml_provider(&identity()?, invocation).await,
        Command::ListSamlProviders => saml::list_saml_providers(&identity()?, format).await,
        Command::GetFederationToken => {
            federation::get_federation_token(&token()?, invocation, format).await
        }
        Command::AssumeRoleWithSaml => {
            federation::assume_role_with_saml(&token()?, invocation, format).await
        }
    };

    match result {
        Err(e) if !e.is_fatal() => {
            error(&e.to_string());
            Ok(())
        }
        other => other,
    }
}
