//! Signed identity and token service calls against a local stub server.

mod common;

use iam_cli::client::{ClientFactory, IdentityService, SdkClientFactory, TokenService};
use iam_cli::config::Endpoints;
use iam_cli::{CliError, Credentials};

use common::StubServer;

const INTERNAL_FAILURE: &str = "<ErrorResponse>\
    <Error><Type>Receiver</Type><Code>InternalFailure</Code><Message>boom</Message></Error>\
    <RequestId>0000</RequestId>\
    </ErrorResponse>";

const ACCESS_KEY_DELETED: &str = "<DeleteAccessKeyResponse>\
    <ResponseMetadata><RequestId>0000</RequestId></ResponseMetadata>\
    </DeleteAccessKeyResponse>";

fn factory(server: &StubServer) -> SdkClientFactory {
    SdkClientFactory::new(Endpoints {
        iam: server.url.clone(),
        sts: server.url.clone(),
        region: "us-east-1".to_string(),
    })
}

fn credentials() -> Credentials {
    Credentials::new("AKIATEST", "SECRETTEST", None)
}

#[tokio::test]
async fn failed_identity_call_is_sent_once() {
    let server = StubServer::start("500 Internal Server Error", INTERNAL_FAILURE);
    let client = factory(&server).identity(&credentials()).unwrap();

    let err = client.delete_user("bob").await.unwrap_err();

    assert!(matches!(err, CliError::Service { operation: "DeleteUser", .. }));
    assert_eq!(server.bodies().len(), 1);
}

#[tokio::test]
async fn failed_create_access_key_is_not_repeated() {
    let server = StubServer::start("500 Internal Server Error", INTERNAL_FAILURE);
    let client = factory(&server).identity(&credentials()).unwrap();

    assert!(client.create_access_key(Some("bob")).await.is_err());
    assert_eq!(server.bodies().len(), 1);
}

#[tokio::test]
async fn failed_token_call_is_sent_once() {
    let server = StubServer::start("500 Internal Server Error", INTERNAL_FAILURE);
    let client = factory(&server).token(&credentials()).unwrap();

    let err = client.get_federation_token("bob", None).await.unwrap_err();

    assert!(!err.is_fatal());
    assert_eq!(server.bodies().len(), 1);
}

#[tokio::test]
async fn delete_access_key_without_user_omits_user_name() {
    let server = StubServer::start("200 OK", ACCESS_KEY_DELETED);
    let client = factory(&server).identity(&credentials()).unwrap();

    client.delete_access_key("AKIA1", None).await.unwrap();

    let bodies = server.bodies();
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].contains("Action=DeleteAccessKey"));
    assert!(bodies[0].contains("AccessKeyId=AKIA1"));
    assert!(!bodies[0].contains("UserName="));
}

#[tokio::test]
async fn delete_access_key_with_user_sends_user_name() {
    let server = StubServer::start("200 OK", ACCESS_KEY_DELETED);
    let client = factory(&server).identity(&credentials()).unwrap();

    client.delete_access_key("AKIA1", Some("bob")).await.unwrap();

    let bodies = server.bodies();
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].contains("AccessKeyId=AKIA1"));
    assert!(bodies[0].contains("UserName=bob"));
}
