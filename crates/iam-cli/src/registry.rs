//! Supported commands and their argument contracts.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CliError, CliResult};
use crate::model::AccessKeyStatus;

/// Argument slots a command can consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArgKey {
    /// `--user`.
    User,
    /// `--account`.
    Account,
    /// `--access-key`.
    AccessKeyId,
    /// `--status`.
    Status,
    /// `--name` (a name or an ARN, depending on the command).
    Name,
    /// `--path`.
    Path,
    /// `--file`.
    File,
    /// `--duration`.
    Duration,
    /// `--principal-arn`.
    PrincipalArn,
    /// `--role-arn`.
    RoleArn,
    /// `--saml-assertion`.
    SamlAssertion,
}

impl ArgKey {
    /// Command line flag for the slot.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::User => "-u <user name>",
            Self::Account => "-a <account name>",
            Self::AccessKeyId => "-k <access key id>",
            Self::Status => "-s <Active|Inactive>",
            Self::Name => "-n <name or ARN>",
            Self::Path => "-p <path>",
            Self::File => "-f <file>",
            Self::Duration => "-d <seconds>",
            Self::PrincipalArn => "--principal-arn <ARN>",
            Self::RoleArn => "--role-arn <ARN>",
            Self::SamlAssertion => "--saml-assertion <file>",
        }
    }

    const fn missing_message(self) -> &'static str {
        match self {
            Self::User => "User name missing.",
            Self::Account => "Account name missing.",
            Self::AccessKeyId => "Access key id missing.",
            Self::Status => "Status is missing.",
            Self::Name => "Name or ARN missing.",
            Self::Path => "Path missing.",
            Self::File => "Metadata file is required.",
            Self::Duration => "Duration missing.",
            Self::PrincipalArn => "SAML principal ARN missing.",
            Self::RoleArn => "Role ARN missing.",
            Self::SamlAssertion => "SAML assertion file missing.",
        }
    }
}

/// The closed set of supported commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Create an account (unauthenticated bootstrap).
    CreateAccount,
    /// Create a user.
    CreateUser,
    /// Create an access key.
    CreateAccessKey,
    /// Register a SAML provider.
    CreateSamlProvider,
    /// Delete a user.
    DeleteUser,
    /// Delete an access key.
    DeleteAccessKey,
    /// Delete a SAML provider.
    DeleteSamlProvider,
    /// Issue a federation token.
    GetFederationToken,
    /// List users.
    ListUsers,
    /// List access keys.
    ListAccessKeys,
    /// List SAML providers.
    ListSamlProviders,
    /// Rename or move a user.
    UpdateUser,
    /// Activate or deactivate an access key.
    UpdateAccessKey,
    /// Exchange a SAML assertion for role credentials.
    AssumeRoleWithSaml,
}

/// Required and optional arguments of one command.
#[derive(Debug)]
pub struct CommandSpec {
    /// The command.
    pub command: Command,
    /// Canonical name.
    pub name: &'static str,
    /// Arguments that must be present.
    pub required: &'static [ArgKey],
    /// Arguments that may be present.
    pub optional: &'static [ArgKey],
}

/// Static command table.
pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: Command::CreateAccount,
        name: "CreateAccount",
        required: &[ArgKey::Account],
        optional: &[],
    },
    CommandSpec {
        command: Command::CreateUser,
        name: "CreateUser",
        required: &[ArgKey::User],
        optional: &[ArgKey::Path],
    },
    CommandSpec {
        command: Command::CreateAccessKey,
        name: "CreateAccessKey",
        required: &[],
        optional: &[ArgKey::User],
    },
    CommandSpec {
        command: Command::CreateSamlProvider,
        name: "CreateSamlProvider",
        required: &[ArgKey::Name, ArgKey::File],
        optional: &[],
    },
    CommandSpec {
        command: Command::DeleteUser,
        name: "DeleteUser",
        required: &[ArgKey::User],
        optional: &[],
    },
    CommandSpec {
        command: Command::DeleteAccessKey,
        name: "DeleteAccessKey",
        required: &[ArgKey::AccessKeyId],
        optional: &[ArgKey::User],
    },
    CommandSpec {
        command: Command::DeleteSamlProvider,
        name: "DeleteSamlProvider",
        required: &[ArgKey::Name],
        optional: &[],
    },
    CommandSpec {
        command: Command::GetFederationToken,
        name: "GetFederationToken",
        required: &[ArgKey::User],
        optional: &[ArgKey::Duration],
    },
    CommandSpec {
        command: Command::ListUsers,
        name: "ListUsers",
        required: &[],
        optional: &[],
    },
    CommandSpec {
        command: Command::ListAccessKeys,
        name: "ListAccessKeys",
        required: &[],
        optional: &[ArgKey::User],
    },
    CommandSpec {
        command: Command::ListSamlProviders,
        name: "ListSamlProviders",
        required: &[],
        optional: &[],
    },
    CommandSpec {
        command: Command::UpdateUser,
        name: "UpdateUser",
        required: &[ArgKey::User],
        optional: &[ArgKey::Name, ArgKey::Path],
    },
    CommandSpec {
        command: Command::UpdateAccessKey,
        name: "UpdateAccessKey",
        required: &[ArgKey::AccessKeyId, ArgKey::Status],
        optional: &[ArgKey::User],
    },
    CommandSpec {
        command: Command::AssumeRoleWithSaml,
        name: "AssumeRoleWithSaml",
        required: &[ArgKey::PrincipalArn, ArgKey::RoleArn, ArgKey::SamlAssertion],
        optional: &[],
    },
];

impl Command {
    /// Looks a command up by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
            .map(|spec| spec.command)
    }

    /// Returns the command's table entry.
    #[must_use]
    pub fn spec(self) -> &'static CommandSpec {
        // Table rows are in declaration order.
        &COMMANDS[self as usize]
    }

    /// Canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Whether the command needs resolved credentials.
    #[must_use]
    pub const fn requires_credentials(self) -> bool {
        !matches!(self, Self::CreateAccount)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl CommandSpec {
    /// Checks the invocation against this contract.
    ///
    /// Value constraints (the access key status, the duration) are checked
    /// here as well so that no client is built for an invalid invocation.
    /// Arguments the command does not declare are ignored.
    pub fn validate(&self, invocation: &CommandInvocation) -> CliResult<()> {
        for key in self.required {
            if invocation.get(*key).is_none() {
                return Err(CliError::usage(key.missing_message()));
            }
        }
        if let Some(status) = self.declared(invocation, ArgKey::Status) {
            status.parse::<AccessKeyStatus>()?;
        }
        if let Some(duration) = self.declared(invocation, ArgKey::Duration) {
            parse_duration(duration)?;
        }
        Ok(())
    }

    /// Returns `true` if the command takes `key`.
    #[must_use]
    pub fn accepts(&self, key: ArgKey) -> bool {
        self.required.contains(&key) || self.optional.contains(&key)
    }

    fn declared<'a>(&self, invocation: &'a CommandInvocation, key: ArgKey) -> Option<&'a str> {
        invocation.get(key).filter(|_| self.accepts(key))
    }

    /// One usage line, e.g. `UpdateAccessKey -k <access key id> -s <Active|Inactive> [-u <user name>]`.
    #[must_use]
    pub fn usage_line(&self) -> String {
        let mut line = self.name.to_string();
        for key in self.required {
            line.push(' ');
            line.push_str(key.flag());
        }
        for key in self.optional {
            line.push_str(" [");
            line.push_str(key.flag());
            line.push(']');
        }
        line
    }
}

/// Parses a federation token duration in seconds. Bounds are left to the
/// service.
pub fn parse_duration(value: &str) -> CliResult<i32> {
    value
        .parse()
        .map_err(|_| CliError::usage(format!("Invalid duration '{value}'. Expected seconds.")))
}

/// Usage text listing every command.
#[must_use]
pub fn usage() -> String {
    let mut text = String::from("Usage:\n");
    for spec in COMMANDS {
        text.push_str("  ");
        text.push_str(&spec.usage_line());
        text.push('\n');
    }
    text
}

/// A command name plus the arguments supplied for it.
#[derive(Debug, Clone, Default)]
pub struct CommandInvocation {
    /// Command name as typed.
    pub name: String,
    /// Supplied arguments.
    pub args: BTreeMap<ArgKey, String>,
}

impl CommandInvocation {
    /// Creates an invocation without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: BTreeMap::new(),
        }
    }

    /// Adds an argument.
    #[must_use]
    pub fn with(mut self, key: ArgKey, value: impl Into<String>) -> Self {
        self.args.insert(key, value.into());
        self
    }

    /// Returns an argument value.
    pub fn get(&self, key: ArgKey) -> Option<&str> {
        self.args.get(&key).map(String::as_str)
    }

    /// Returns a required argument value.
    pub fn require(&self, key: ArgKey) -> CliResult<&str> {
        self.get(key)
            .ok_or_else(|| CliError::usage(key.missing_message()))
    }
}
