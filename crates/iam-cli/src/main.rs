//! # IAM CLI
//!
//! Command-line tools for IAM/STS compatible identity service administration.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![allow(clippy::uninlined_format_args)]

use clap::Parser;
use iam_cli::{
    cli::Cli, client::SdkClientFactory, commands::dispatch, config::CliConfig,
    credentials::CredentialResolver, output::error,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr so command output stays parseable
    let default_filter = if cli.verbose { "iam_cli=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = match CliConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {}", e));
            std::process::exit(1);
        }
    };

    let format = cli.output.unwrap_or(config.output_format);
    let endpoints = config.endpoints(
        cli.iam_endpoint.as_deref(),
        cli.sts_endpoint.as_deref(),
        cli.region.as_deref(),
    );
    tracing::debug!(?endpoints, "starting");

    let resolver = CredentialResolver::from_home();
    let factory = SdkClientFactory::new(endpoints);
    let result = dispatch(
        &cli.invocation(),
        &resolver,
        &cli.credential_overrides(),
        &factory,
        format,
    )
    .await;

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(1);
    }
}
