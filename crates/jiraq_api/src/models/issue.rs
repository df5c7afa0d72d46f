use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::time::{self, JiraTime};

/// Field id Jira assigns to story points on this instance.
pub const STORY_POINTS_FIELD: &str = "customfield_12345";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Issue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub key: String,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default)]
    pub fields: Fields,
}

/// Represents the decoded field bag of an issue: the statically known
/// attributes plus a flattened map holding any requested field the schema
/// does not model, stored verbatim as raw JSON.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Fields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<AdfDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "issuetype", default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<User>,
    #[serde(
        default,
        deserialize_with = "time::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<JiraTime>,
    #[serde(
        default,
        deserialize_with = "time::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<JiraTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentLink>,
    #[serde(
        rename = "customfield_12345",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub story_points: Option<f64>,
    #[serde(
        rename = "customfield_10006",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub epic_link: Option<String>,
    #[serde(flatten)]
    pub custom_fields: HashMap<String, Value>,
}

impl Fields {
    /// Resolves a field by name to a numeric value. Integer and float JSON
    /// numbers normalize to `f64`; statically typed numeric custom fields
    /// resolve by their field id. Strings, booleans, objects, arrays, null
    /// and absent fields all classify as not numeric, which is an expected
    /// outcome rather than an error.
    pub fn numeric_value(&self, name: &str) -> Option<f64> {
        if name == STORY_POINTS_FIELD {
            return self.story_points;
        }
        match self.custom_fields.get(name) {
            Some(Value::Number(number)) => number.as_f64(),
            _ => None,
        }
    }

    /// Status name used for bucketed aggregation, if the issue carries one.
    pub fn status_name(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.name.as_deref())
    }
}

/// Atlassian Document Format body, kept structurally loose.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdfDocument {
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_category: Option<StatusCategory>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StatusCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IssueType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default)]
    pub subtask: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Priority {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParentLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub key: String,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<ParentFields>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParentFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "issuetype", default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> Issue {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_static_fields_and_custom_bag() {
        let issue = decode(json!({
            "id": "10001",
            "key": "PROJ-1",
            "self": "https://corp.atlassian.net/rest/api/3/issue/10001",
            "fields": {
                "summary": "Fix login flow",
                "status": {"id": "3", "name": "In Progress"},
                "updated": "2026-01-16T16:55:41.785+0900",
                "labels": ["auth"],
                "customfield_99001": 8,
                "customfield_99002": "not numeric"
            }
        }));

        assert_eq!(issue.key, "PROJ-1");
        assert_eq!(issue.fields.summary.as_deref(), Some("Fix login flow"));
        assert_eq!(issue.fields.status_name(), Some("In Progress"));
        assert!(issue.fields.updated.is_some());
        // Unmodeled fields land in the bag verbatim.
        assert_eq!(issue.fields.custom_fields["customfield_99001"], json!(8));
        assert_eq!(
            issue.fields.custom_fields["customfield_99002"],
            json!("not numeric")
        );
        // Statically modeled names stay out of the bag.
        assert!(!issue.fields.custom_fields.contains_key("summary"));
    }

    #[test]
    fn numeric_value_accepts_every_json_number_width() {
        let issue = decode(json!({
            "key": "PROJ-2",
            "fields": {
                "customfield_1": 5,
                "customfield_2": 2.5,
                "customfield_3": 9_223_372_036_854_775_807u64
            }
        }));
        assert_eq!(issue.fields.numeric_value("customfield_1"), Some(5.0));
        assert_eq!(issue.fields.numeric_value("customfield_2"), Some(2.5));
        assert!(issue.fields.numeric_value("customfield_3").is_some());
    }

    #[test]
    fn numeric_value_classifies_other_kinds_as_not_numeric() {
        let issue = decode(json!({
            "key": "PROJ-3",
            "fields": {
                "customfield_1": "abc",
                "customfield_2": true,
                "customfield_3": null,
                "customfield_4": {"nested": 1},
                "customfield_5": [1, 2]
            }
        }));
        for name in [
            "customfield_1",
            "customfield_2",
            "customfield_3",
            "customfield_4",
            "customfield_5",
            "customfield_missing",
        ] {
            assert_eq!(issue.fields.numeric_value(name), None, "field {name}");
        }
    }

    #[test]
    fn numeric_value_resolves_statically_typed_story_points() {
        let issue = decode(json!({
            "key": "PROJ-4",
            "fields": {"customfield_12345": 13.0}
        }));
        assert_eq!(issue.fields.story_points, Some(13.0));
        assert_eq!(issue.fields.numeric_value(STORY_POINTS_FIELD), Some(13.0));
        assert!(!issue.fields.custom_fields.contains_key(STORY_POINTS_FIELD));
    }

    #[test]
    fn null_and_empty_updated_decode_as_absent() {
        let issue = decode(json!({
            "key": "PROJ-5",
            "fields": {"updated": null, "created": ""}
        }));
        assert!(issue.fields.updated.is_none());
        assert!(issue.fields.created.is_none());
    }

    #[test]
    fn serializes_updated_as_rfc3339() {
        let issue = decode(json!({
            "key": "PROJ-6",
            "fields": {"updated": "2026-01-16T16:55:41.785+0900"}
        }));
        let out = serde_json::to_value(&issue).unwrap();
        assert_eq!(out["fields"]["updated"], json!("2026-01-16T16:55:41.785+09:00"));
    }
}
