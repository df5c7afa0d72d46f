//! Cursor-based search traversal over the Jira search endpoint.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::JiraClient;
use crate::error::Result;
use crate::models::Issue;

pub const DEFAULT_MAX_RESULTS: u32 = 50;
const SEARCH_PATH: &str = "search/jql";

#[derive(Clone, Debug)]
pub struct SearchOptions {
    pub fields: Vec<String>,
    pub max_results: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    jql: &'a str,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    fields: &'a [String],
    max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_page_token: Option<&'a str>,
}

/// One page of search results plus its continuation state.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub is_last: bool,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl JiraClient {
    /// Fetches a single search page, optionally continuing from a token
    /// returned by a previous page.
    pub async fn search_page(
        &self,
        jql: &str,
        options: &SearchOptions,
        next_page_token: Option<&str>,
    ) -> Result<SearchPage> {
        let max_results = if options.max_results == 0 {
            DEFAULT_MAX_RESULTS
        } else {
            options.max_results
        };
        let request = SearchRequest {
            jql,
            fields: &options.fields,
            max_results,
            next_page_token,
        };
        self.post(SEARCH_PATH, &request).await
    }

    /// Materializes the full result set for a query by walking the cursor
    /// until the server reports the last page or stops handing out a
    /// continuation token. Issues are appended in response order; a failure
    /// on any page aborts the whole traversal and discards partial results.
    pub async fn search_all(&self, jql: &str, fields: &[String]) -> Result<Vec<Issue>> {
        let options = SearchOptions {
            fields: fields.to_vec(),
            max_results: DEFAULT_MAX_RESULTS,
        };

        let mut all_issues = Vec::new();
        let mut next_page_token: Option<String> = None;

        loop {
            let page = self
                .search_page(jql, &options, next_page_token.as_deref())
                .await?;
            debug!(
                fetched = page.issues.len(),
                accumulated = all_issues.len() + page.issues.len(),
                is_last = page.is_last,
                "fetched search page"
            );
            all_issues.extend(page.issues);

            match page.next_page_token {
                Some(token) if !page.is_last && !token.is_empty() => {
                    next_page_token = Some(token);
                }
                _ => break,
            }
        }

        Ok(all_issues)
    }
}
