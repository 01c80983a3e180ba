//! SAML provider management commands.

use std::path::Path;

use tracing::debug;

use crate::client::IdentityService;
use crate::config::OutputFormat;
use crate::output::{output, output_single, success};
use crate::registry::{ArgKey, CommandInvocation};
use crate::CliError;

/// Reads a local input file as text.
///
/// A path that does not exist is an argument error, so the remote call is
/// never attempted.
pub(crate) fn read_input_file(path: &str, what: &str) -> crate::CliResult<String> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(CliError::usage(format!(
            "{} file '{}' does not exist.",
            what,
            path.display()
        )));
    }
    debug!(path = %path.display(), "reading {}", what);
    Ok(std::fs::read_to_string(path)?)
}

/// Registers a SAML provider from the metadata document in `--file`.
pub async fn create_saml_provider(
    client: &impl IdentityService,
    invocation: &CommandInvocation,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let name = invocation.require(ArgKey::Name)?;
    let metadata = read_input_file(invocation.require(ArgKey::File)?, "Metadata")?;
    let provider = client.create_saml_provider(name, &metadata).await?;

    success(&format!("SAML provider '{}' created.", name));
    output_single(&provider, format)
}

/// Deletes the SAML provider whose ARN is given in `--name`.
pub async fn delete_saml_provider(
    client: &impl IdentityService,
    invocation: &CommandInvocation,
) -> crate::CliResult<()> {
    let arn = invocation.require(ArgKey::Name)?;
    client.delete_saml_provider(arn).await?;

    success(&format!("SAML provider '{}' deleted.", arn));
    Ok(())
}

/// Lists SAML providers.
pub async fn list_saml_providers(
    client: &impl IdentityService,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let providers = client.list_saml_providers().await?;
    output(&providers, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_file_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.xml");

        let err = read_input_file(path.to_str().unwrap(), "Metadata").unwrap_err();
        assert!(matches!(err, CliError::Usage(ref m) if m.starts_with("Metadata file")));
    }

    #[test]
    fn input_file_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.xml");
        std::fs::write(&path, "<EntityDescriptor>\n  x\n</EntityDescriptor>\n").unwrap();

        let contents = read_input_file(path.to_str().unwrap(), "Metadata").unwrap();
        assert_eq!(contents, "<EntityDescriptor>\n  x\n</EntityDescriptor>\n");
    }
}
