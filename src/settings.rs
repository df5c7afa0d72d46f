//! Environment-sourced client configuration.

use std::env;

use anyhow::{bail, Result};
use jiraq_api::JiraConfig;

const EMAIL_VAR: &str = "JIRA_EMAIL";
const TOKEN_VAR: &str = "JIRA_API_TOKEN";
const BASE_URL_VAR: &str = "JIRA_BASE_URL";

/// Builds the client configuration from the process environment. The email
/// and API token are required; the base URL falls back to the placeholder
/// Atlassian domain. `${VAR}` and `$VAR` references inside each value are
/// expanded before use.
pub fn load() -> Result<JiraConfig> {
    let email = required_env(EMAIL_VAR)?;
    let token = required_env(TOKEN_VAR)?;

    let mut config = JiraConfig::new(email, token);
    if let Ok(raw) = env::var(BASE_URL_VAR) {
        let base_url = expand_env(&raw);
        if !base_url.is_empty() {
            config = config.with_base_url(base_url);
        }
    }
    Ok(config)
}

fn required_env(name: &str) -> Result<String> {
    let value = env::var(name).map(|raw| expand_env(&raw)).unwrap_or_default();
    if value.is_empty() {
        bail!("{name} environment variable is required");
    }
    Ok(value)
}

/// Expands `${VAR}` and `$VAR` references against the process environment.
/// Unset variables expand to the empty string; a `$` not followed by a
/// variable name is kept literally.
fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    name.push(inner);
                }
                if closed && !name.is_empty() {
                    out.push_str(&env::var(&name).unwrap_or_default());
                } else {
                    // Unterminated or empty reference, keep it literally.
                    out.push_str("${");
                    out.push_str(&name);
                    if closed {
                        out.push('}');
                    }
                }
            }
            Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if !c.is_ascii_alphanumeric() && c != '_' {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                out.push_str(&env::var(&name).unwrap_or_default());
            }
            _ => out.push('$'),
        }
    }
    out
}
