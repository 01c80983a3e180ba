//! Signed identity and token service clients.
//!
//! The handlers only see the [`IdentityService`] and [`TokenService`]
//! traits. [`SdkClientFactory`] builds the AWS SDK backed implementations,
//! which sign every call with SigV4 against the configured endpoints.

use aws_sdk_iam::error::DisplayErrorContext;
use aws_sdk_iam::primitives::{DateTime, DateTimeFormat};
use tracing::debug;

use crate::bootstrap::{AccountBootstrap, AccountBootstrapClient};
use crate::config::Endpoints;
use crate::credentials::Credentials;
use crate::error::{CliError, CliResult};
use crate::model::{AccessKey, AccessKeyStatus, FederatedCredentials, SamlProvider, User};

/// Provider name reported to the SDK for static credentials.
const PROVIDER_NAME: &str = "iamcli";

/// Identity service operations.
#[allow(async_fn_in_trait)]
pub trait IdentityService {
    /// Creates a user.
    async fn create_user(&self, name: &str, path: Option<&str>) -> CliResult<User>;

    /// Deletes a user.
    async fn delete_user(&self, name: &str) -> CliResult<()>;

    /// Renames a user and/or changes its path.
    async fn update_user(
        &self,
        name: &str,
        new_name: Option<&str>,
        new_path: Option<&str>,
    ) -> CliResult<()>;

    /// Lists users (one page).
    async fn list_users(&self) -> CliResult<Vec<User>>;

    /// Creates an access key for `user`, or for the caller when `None`.
    ///
    /// The returned key carries the secret key, which the service never
    /// returns again.
    async fn create_access_key(&self, user: Option<&str>) -> CliResult<AccessKey>;

    /// Deletes an access key. `None` leaves the user out of the request.
    async fn delete_access_key(&self, access_key_id: &str, user: Option<&str>) -> CliResult<()>;

    /// Lists access keys (one page, no secret keys).
    async fn list_access_keys(&self, user: Option<&str>) -> CliResult<Vec<AccessKey>>;

    /// Changes an access key's status.
    async fn update_access_key(
        &self,
        access_key_id: &str,
        status: AccessKeyStatus,
        user: Option<&str>,
    ) -> CliResult<()>;

    /// Registers a SAML provider from its metadata document.
    async fn create_saml_provider(&self, name: &str, metadata: &str) -> CliResult<SamlProvider>;

    /// Deletes a SAML provider.
    async fn delete_saml_provider(&self, arn: &str) -> CliResult<()>;

    /// Lists SAML providers.
    async fn list_saml_providers(&self) -> CliResult<Vec<SamlProvider>>;
}

/// Token service operations.
#[allow(async_fn_in_trait)]
pub trait TokenService {
    /// Issues a federation token. `None` uses the service default duration.
    async fn get_federation_token(
        &self,
        name: &str,
        duration_seconds: Option<i32>,
    ) -> CliResult<FederatedCredentials>;

    /// Exchanges a base64 SAML assertion for role credentials.
    async fn assume_role_with_saml(
        &self,
        principal_arn: &str,
        role_arn: &str,
        saml_assertion: &str,
    ) -> CliResult<FederatedCredentials>;
}

/// Builds the clients for one invocation.
pub trait ClientFactory {
    /// Identity service client.
    type Identity: IdentityService;
    /// Token service client.
    type Token: TokenService;
    /// Account bootstrap client.
    type Bootstrap: AccountBootstrap;

    /// Builds an identity service client signing with `credentials`.
    fn identity(&self, credentials: &Credentials) -> CliResult<Self::Identity>;

    /// Builds a token service client signing with `credentials`.
    fn token(&self, credentials: &Credentials) -> CliResult<Self::Token>;

    /// Builds the unauthenticated bootstrap client.
    fn bootstrap(&self) -> CliResult<Self::Bootstrap>;
}

/// Factory for the SDK backed clients.
///
/// Retries are disabled: each run performs exactly one call, and a
/// repeated `CreateAccessKey` would lose the first secret.
#[derive(Debug, Clone)]
pub struct SdkClientFactory {
    endpoints: Endpoints,
}

impl SdkClientFactory {
    /// Creates a factory targeting `endpoints`.
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }
}

impl ClientFactory for SdkClientFactory {
    type Identity = SdkIdentityClient;
    type Token = SdkTokenClient;
    type Bootstrap = AccountBootstrapClient;

    fn identity(&self, credentials: &Credentials) -> CliResult<SdkIdentityClient> {
        debug!(endpoint = %self.endpoints.iam, "building identity service client");
        let config = aws_sdk_iam::Config::builder()
            .behavior_version(aws_sdk_iam::config::BehaviorVersion::latest())
            .region(aws_sdk_iam::config::Region::new(self.endpoints.region.clone()))
            .endpoint_url(&self.endpoints.iam)
            .retry_config(aws_sdk_iam::config::retry::RetryConfig::disabled())
            .credentials_provider(aws_sdk_iam::config::Credentials::new(
                credentials.access_key_id(),
                credentials.secret_key(),
                credentials.session_token().map(str::to_string),
                None,
                PROVIDER_NAME,
            ))
            .build();
        Ok(SdkIdentityClient {
            client: aws_sdk_iam::Client::from_conf(config),
        })
    }

    fn token(&self, credentials: &Credentials) -> CliResult<SdkTokenClient> {
        debug!(endpoint = %self.endpoints.sts, "building token service client");
        let config = aws_sdk_sts::Config::builder()
            .behavior_version(aws_sdk_sts::config::BehaviorVersion::latest())
            .region(aws_sdk_sts::config::Region::new(self.endpoints.region.clone()))
            .endpoint_url(&self.endpoints.sts)
            .retry_config(aws_sdk_sts::config::retry::RetryConfig::disabled())
            .credentials_provider(aws_sdk_sts::config::Credentials::new(
                credentials.access_key_id(),
                credentials.secret_key(),
                credentials.session_token().map(str::to_string),
                None,
                PROVIDER_NAME,
            ))
            .build();
        Ok(SdkTokenClient {
            client: aws_sdk_sts::Client::from_conf(config),
        })
    }

    fn bootstrap(&self) -> CliResult<AccountBootstrapClient> {
        AccountBootstrapClient::new(&self.endpoints.iam)
    }
}

/// Maps a transport failure to a service error with the full diagnostic.
fn service_error(operation: &'static str, err: impl std::error::Error) -> CliError {
    CliError::service(operation, DisplayErrorContext(err).to_string())
}

fn format_date(date: &DateTime) -> String {
    date.fmt(DateTimeFormat::DateTime)
        .unwrap_or_else(|_| date.secs().to_string())
}

fn user_from_sdk(user: &aws_sdk_iam::types::User) -> User {
    User {
        id: user.user_id().to_string(),
        name: user.user_name().to_string(),
        path: user.path().to_string(),
        created_at: format_date(user.create_date()),
    }
}

/// Identity service client backed by `aws-sdk-iam`.
#[derive(Debug, Clone)]
pub struct SdkIdentityClient {
    client: aws_sdk_iam::Client,
}

impl IdentityService for SdkIdentityClient {
    async fn create_user(&self, name: &str, path: Option<&str>) -> CliResult<User> {
        let output = self
            .client
            .create_user()
            .user_name(name)
            .set_path(path.map(str::to_string))
            .send()
            .await
            .map_err(|e| service_error("CreateUser", e))?;

        output
            .user()
            .map(user_from_sdk)
            .ok_or_else(|| CliError::ResponseParse("CreateUser returned no user".to_string()))
    }

    async fn delete_user(&self, name: &str) -> CliResult<()> {
        self.client
            .delete_user()
            .user_name(name)
            .send()
            .await
            .map_err(|e| service_error("DeleteUser", e))?;
        Ok(())
    }

    async fn update_user(
        &self,
        name: &str,
        new_name: Option<&str>,
        new_path: Option<&str>,
    ) -> CliResult<()> {
        self.client
            .update_user()
            .user_name(name)
            .set_new_user_name(new_name.map(str::to_string))
            .set_new_path(new_path.map(str::to_string))
            .send()
            .await
            .map_err(|e| service_error("UpdateUser", e))?;
        Ok(())
    }

    async fn list_users(&self) -> CliResult<Vec<User>> {
        let output = self
            .client
            .list_users()
            .send()
            .await
            .map_err(|e| service_error("ListUsers", e))?;
        Ok(output.users().iter().map(user_from_sdk).collect())
    }

    async fn create_access_key(&self, user: Option<&str>) -> CliResult<AccessKey> {
        let output = self
            .client
            .create_access_key()
            .set_user_name(user.map(str::to_string))
            .send()
            .await
            .map_err(|e| service_error("CreateAccessKey", e))?;

        let key = output.access_key().ok_or_else(|| {
            CliError::ResponseParse("CreateAccessKey returned no access key".to_string())
        })?;
        Ok(AccessKey {
            user_name: key.user_name().to_string(),
            access_key_id: key.access_key_id().to_string(),
            secret_key: Some(key.secret_access_key().to_string()),
            status: key.status().as_str().to_string(),
            created_at: key.create_date().map(format_date),
        })
    }

    async fn delete_access_key(&self, access_key_id: &str, user: Option<&str>) -> CliResult<()> {
        self.client
            .delete_access_key()
            .access_key_id(access_key_id)
            .set_user_name(user.map(str::to_string))
            .send()
            .await
            .map_err(|e| service_error("DeleteAccessKey", e))?;
        Ok(())
    }

    async fn list_access_keys(&self, user: Option<&str>) -> CliResult<Vec<AccessKey>> {
        let output = self
            .client
            .list_access_keys()
            .set_user_name(user.map(str::to_string))
            .send()
            .await
            .map_err(|e| service_error("ListAccessKeys", e))?;

        Ok(output
            .access_key_metadata()
            .iter()
            .map(|key| AccessKey {
                user_name: key.user_name().unwrap_or_default().to_string(),
                access_key_id: key.access_key_id().unwrap_or_default().to_string(),
                secret_key: None,
                status: key
                    .status()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_default(),
                created_at: key.create_date().map(format_date),
            })
            .collect())
    }

    async fn update_access_key(
        &self,
        access_key_id: &str,
        status: AccessKeyStatus,
        user: Option<&str>,
    ) -> CliResult<()> {
        self.client
            .update_access_key()
            .access_key_id(access_key_id)
            .status(aws_sdk_iam::types::StatusType::from(status.as_str()))
            .set_user_name(user.map(str::to_string))
            .send()
            .await
            .map_err(|e| service_error("UpdateAccessKey", e))?;
        Ok(())
    }

    async fn create_saml_provider(&self, name: &str, metadata: &str) -> CliResult<SamlProvider> {
        let output = self
            .client
            .create_saml_provider()
            .name(name)
            .saml_metadata_document(metadata)
            .send()
            .await
            .map_err(|e| service_error("CreateSAMLProvider", e))?;

        Ok(SamlProvider {
            arn: output.saml_provider_arn().unwrap_or_default().to_string(),
            valid_until: None,
            created_at: None,
        })
    }

    async fn delete_saml_provider(&self, arn: &str) -> CliResult<()> {
        self.client
            .delete_saml_provider()
            .saml_provider_arn(arn)
            .send()
            .await
            .map_err(|e| service_error("DeleteSAMLProvider", e))?;
        Ok(())
    }

    async fn list_saml_providers(&self) -> CliResult<Vec<SamlProvider>> {
        let output = self
            .client
            .list_saml_providers()
            .send()
            .await
            .map_err(|e| service_error("ListSAMLProviders", e))?;

        Ok(output
            .saml_provider_list()
            .iter()
            .map(|entry| SamlProvider {
                arn: entry.arn().unwrap_or_default().to_string(),
                valid_until: entry.valid_until().map(format_date),
                created_at: entry.create_date().map(format_date),
            })
            .collect())
    }
}

fn federated_from_sdk(
    operation: &'static str,
    credentials: Option<&aws_sdk_sts::types::Credentials>,
) -> CliResult<FederatedCredentials> {
    let credentials = credentials
        .ok_or_else(|| CliError::ResponseParse(format!("{operation} returned no credentials")))?;
    Ok(FederatedCredentials {
        access_key_id: credentials.access_key_id().to_string(),
        secret_key: credentials.secret_access_key().to_string(),
        session_token: credentials.session_token().to_string(),
        expiration: format_date(credentials.expiration()),
    })
}

/// Token service client backed by `aws-sdk-sts`.
#[derive(Debug, Clone)]
pub struct SdkTokenClient {
    client: aws_sdk_sts::Client,
}

impl TokenService for SdkTokenClient {
    async fn get_federation_token(
        &self,
        name: &str,
        duration_seconds: Option<i32>,
    ) -> CliResult<FederatedCredentials> {
        let output = self
            .client
            .get_federation_token()
            .name(name)
            .set_duration_seconds(duration_seconds)
            .send()
            .await
            .map_err(|e| service_error("GetFederationToken", e))?;
        federated_from_sdk("GetFederationToken", output.credentials())
    }

    async fn assume_role_with_saml(
        &self,
        principal_arn: &str,
        role_arn: &str,
        saml_assertion: &str,
    ) -> CliResult<FederatedCredentials> {
        let output = self
            .client
            .assume_role_with_saml()
            .principal_arn(principal_arn)
            .role_arn(role_arn)
            .saml_assertion(saml_assertion)
            .send()
            .await
            .map_err(|e| service_error("AssumeRoleWithSAML", e))?;
        federated_from_sdk("AssumeRoleWithSAML", output.credentials())
    }
}
