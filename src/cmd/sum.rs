use anyhow::{Context, Result};
use clap::Args;
use jiraq_api::JiraClient;

use crate::{output, settings, sum};

#[derive(Args, Debug)]
pub struct SumArgs {
    /// JQL query.
    #[arg(long, required = true)]
    pub jql: String,

    /// Custom fields to sum (comma-separated). With a single field the
    /// result also includes a per-status breakdown.
    #[arg(long, required = true, value_delimiter = ',')]
    pub fields: Vec<String>,
}

pub async fn run(args: SumArgs) -> Result<()> {
    let config = settings::load()?;
    let client = JiraClient::new(config)?;
    let field_names: Vec<String> = args.fields.iter().map(|f| f.trim().to_string()).collect();

    // Request the summed fields plus the attributes aggregation reads.
    let mut request_fields = vec!["summary".to_string(), "status".to_string()];
    request_fields.extend(field_names.iter().cloned());

    let issues = client
        .search_all(&args.jql, &request_fields)
        .await
        .context("failed to search issues")?;

    let result = sum::sum_fields(&args.jql, &issues, &field_names);
    output::print_json(&result)
}
