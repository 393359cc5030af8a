//! Report generation

use crate::cli::Cli;
use crate::credential::{prompt_stdin, resolve_token};
use anyhow::{Context, Result};
use orgaudit_core::{AuditConfig, CsvReportWriter};
use orgaudit_github::{AuthContext, Auditor, GitHubClient, TracingObserver};

pub fn run(cli: Cli) -> Result<()> {
    let config = AuditConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let token = resolve_token(cli.token, prompt_stdin)?;
    let client = GitHubClient::new(AuthContext::new(token)?, &config)?;
    let auditor = Auditor::new(&client, &config)?;

    let mut sink = CsvReportWriter::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;

    tracing::debug!(base_url = %client.base_url(), output = %cli.output.display(), "Starting audit");
    auditor.run(&cli.organizations, &mut sink, &mut TracingObserver)?;

    println!("Report generated successfully: {}", cli.output.display());
    Ok(())
}
