use anyhow::{Context, Result};
use clap::Args;
use jiraq_api::JiraClient;

use crate::{output, settings};

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Issue key, e.g. PROJ-123.
    pub key: String,

    /// Fields to retrieve (comma-separated).
    #[arg(long, default_value = "*all")]
    pub fields: String,
}

pub async fn run(args: GetArgs) -> Result<()> {
    let config = settings::load()?;
    let client = JiraClient::new(config)?;
    let fields = super::parse_fields(&args.fields);

    let issue = client
        .get_issue(&args.key, &fields)
        .await
        .context("failed to get issue")?;

    output::print_json(&issue)
}
