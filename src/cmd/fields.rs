use anyhow::{Context, Result};
use jiraq_api::JiraClient;

use crate::{output, settings};

pub async fn run() -> Result<()> {
    let config = settings::load()?;
    let client = JiraClient::new(config)?;

    let fields = client.get_fields().await.context("failed to get fields")?;

    output::print_json(&fields)
}
