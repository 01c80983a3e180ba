//! Unauthenticated account bootstrap.
//!
//! `CreateAccount` is the one call made without credentials: a plain
//! form-encoded POST whose XML answer is read positionally.

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::model::AccountBootstrapResult;

const ROOT_USER_NAME: &[u8] = b"RootUserName";

/// Account creation.
#[allow(async_fn_in_trait)]
pub trait AccountBootstrap {
    /// Creates an account and returns its root user credentials.
    async fn create_account(&self, account_name: &str) -> CliResult<AccountBootstrapResult>;
}

/// Form fields of the bootstrap request.
#[must_use]
pub fn create_account_form(account_name: &str) -> [(&'static str, &str); 2] {
    [("Action", "CreateAccount"), ("AccountName", account_name)]
}

/// HTTP client for the bootstrap call.
#[derive(Debug, Clone)]
pub struct AccountBootstrapClient {
    client: reqwest::Client,
    base_url: String,
}

impl AccountBootstrapClient {
    /// Creates a client posting to `base_url`.
    ///
    /// No request timeout is set beyond the transport defaults.
    pub fn new(base_url: &str) -> CliResult<Self> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }
}

impl AccountBootstrap for AccountBootstrapClient {
    async fn create_account(&self, account_name: &str) -> CliResult<AccountBootstrapResult> {
        debug!(endpoint = %self.base_url, account = %account_name, "posting CreateAccount");

        let response = self
            .client
            .post(&self.base_url)
            .form(&create_account_form(account_name))
            .send()
            .await
            .map_err(|e| CliError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CliError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(CliError::Transport(format!(
                "server returned {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }
        parse_create_account_response(&body)
    }
}

/// Parses a `CreateAccount` response.
///
/// The text of the first `RootUserName` element is the root user name. The
/// texts of the next three elements in document order are, whatever their
/// tag names, the access key id, the status and the secret key. Values keep
/// their surrounding whitespace.
pub fn parse_create_account_response(xml: &str) -> CliResult<AccountBootstrapResult> {
    let mut reader = Reader::from_str(xml);

    let root_user_name = loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == ROOT_USER_NAME => {
                break read_element_text(&mut reader)?;
            }
            Event::Empty(e) if e.local_name().as_ref() == ROOT_USER_NAME => break String::new(),
            Event::Eof => {
                return Err(CliError::ResponseParse(
                    "response has no RootUserName element".to_string(),
                ));
            }
            _ => {}
        }
    };

    let mut values = Vec::with_capacity(3);
    while values.len() < 3 {
        match reader.read_event()? {
            Event::Start(_) => values.push(read_element_text(&mut reader)?),
            Event::Empty(_) => values.push(String::new()),
            Event::Eof => {
                return Err(CliError::ResponseParse(format!(
                    "expected 3 elements after RootUserName, found {}",
                    values.len()
                )));
            }
            _ => {}
        }
    }

    let mut values = values.into_iter();
    let mut next = || values.next().unwrap_or_default();
    Ok(AccountBootstrapResult {
        root_user_name,
        access_key_id: next(),
        status: next(),
        secret_key: next(),
    })
}

/// Reads the text content of the element whose start tag was just consumed,
/// leaving the reader after its end tag.
fn read_element_text(reader: &mut Reader<&[u8]>) -> CliResult<String> {
    let mut text = String::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Ok(text),
            Event::End(_) => depth -= 1,
            Event::Eof => {
                return Err(CliError::ResponseParse(
                    "unexpected end of document inside an element".to_string(),
                ));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<CreateAccountResponse xmlns="https://iam.seagate.com/doc/2010-05-08/">
  <CreateAccountResult>
    <Account>
      <AccountId>123456789012</AccountId>
      <CanonicalId>C1</CanonicalId>
      <AccountName>acme</AccountName>
      <RootUserName>root</RootUserName>
      <AccessKeyId>AKIAROOT</AccessKeyId>
      <RootSecretKeyId>SECRETROOT</RootSecretKeyId>
      <Status>Active</Status>
    </Account>
  </CreateAccountResult>
  <ResponseMetadata><RequestId>0000</RequestId></ResponseMetadata>
</CreateAccountResponse>"#;

    #[test]
    fn fields_are_read_by_position() {
        let result = parse_create_account_response(RESPONSE).unwrap();

        // The server emits the secret key before the status.
        assert_eq!(
            result,
            AccountBootstrapResult {
                root_user_name: "root".to_string(),
                access_key_id: "AKIAROOT".to_string(),
                status: "SECRETROOT".to_string(),
                secret_key: "Active".to_string(),
            }
        );
    }

    #[test]
    fn tag_names_after_root_user_are_ignored() {
        let xml = "<R><RootUserName>alice</RootUserName><a>AKIA1</a><b>Active</b><c>SECRET1</c></R>";

        let result = parse_create_account_response(xml).unwrap();
        assert_eq!(result.root_user_name, "alice");
        assert_eq!(result.access_key_id, "AKIA1");
        assert_eq!(result.status, "Active");
        assert_eq!(result.secret_key, "SECRET1");
    }

    #[test]
    fn following_elements_may_sit_in_other_parents() {
        let xml = "<R><U><RootUserName>alice</RootUserName></U><K><a>AKIA1</a></K><b/><c>S&amp;1</c></R>";

        let result = parse_create_account_response(xml).unwrap();
        assert_eq!(result.access_key_id, "AKIA1");
        assert_eq!(result.status, "");
        assert_eq!(result.secret_key, "S&1");
    }

    #[test]
    fn values_are_not_trimmed() {
        let xml = "<R>\n  <RootUserName> alice </RootUserName>\n  <a>AKIA1\n</a>\n  <b>Active</b>\n  <c>\tSECRET1</c>\n</R>";

        let result = parse_create_account_response(xml).unwrap();
        assert_eq!(result.root_user_name, " alice ");
        assert_eq!(result.access_key_id, "AKIA1\n");
        assert_eq!(result.status, "Active");
        assert_eq!(result.secret_key, "\tSECRET1");
    }

    #[test]
    fn missing_root_user_name_is_a_parse_error() {
        let err = parse_create_account_response("<ErrorResponse><Code>X</Code></ErrorResponse>")
            .unwrap_err();
        assert!(matches!(err, CliError::ResponseParse(_)));
    }

    #[test]
    fn too_few_following_elements_is_a_parse_error() {
        let xml = "<R><RootUserName>alice</RootUserName><a>AKIA1</a></R>";

        let err = parse_create_account_response(xml).unwrap_err();
        assert!(matches!(err, CliError::ResponseParse(ref m) if m.contains("found 1")));
    }

    #[test]
    fn form_carries_action_and_account_name() {
        assert_eq!(
            create_account_form("acme"),
            [("Action", "CreateAccount"), ("AccountName", "acme")]
        );
    }
}
