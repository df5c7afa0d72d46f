use anyhow::{Context, Result};
use clap::Args;
use jiraq_api::JiraClient;

use crate::{output, settings};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// JQL query.
    #[arg(long, required = true)]
    pub jql: String,

    /// Fields to retrieve (comma-separated).
    #[arg(long, default_value = "*all")]
    pub fields: String,
}

pub async fn run(args: ListArgs) -> Result<()> {
    let config = settings::load()?;
    let client = JiraClient::new(config)?;
    let fields = super::parse_fields(&args.fields);

    let issues = client
        .search_all(&args.jql, &fields)
        .await
        .context("failed to search")?;

    output::print_json(&issues)
}
