//! Numeric aggregation over issue sets with per-field skip accounting.

use std::collections::BTreeMap;

use jiraq_api::Issue;
use serde::Serialize;
use tracing::warn;

/// Bucket label for issues without a status when a breakdown is requested.
const UNKNOWN_STATUS: &str = "Unknown";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSum {
    pub field: String,
    pub total_sum: f64,
    pub skip_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SumResult {
    pub jql: String,
    pub field_sums: Vec<FieldSum>,
    pub issue_count: usize,
    /// Status-name breakdown, present only when a single field was summed.
    /// Contributions of exactly zero count toward the total but are left
    /// out of the buckets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_sums: Option<BTreeMap<String, f64>>,
}

/// Sums the requested fields across all issues. Values the field model
/// classifies as non-numeric (absent, null, strings, booleans, objects,
/// arrays) increment the field's skip count instead of failing. A non-zero
/// skip count is reported on stderr as advisory output.
pub fn sum_fields(jql: &str, issues: &[Issue], field_names: &[String]) -> SumResult {
    let single_field = field_names.len() == 1;
    let mut result = SumResult {
        jql: jql.to_string(),
        field_sums: Vec::with_capacity(field_names.len()),
        issue_count: issues.len(),
        status_sums: None,
    };

    for field_name in field_names {
        let mut field_sum = FieldSum {
            field: field_name.clone(),
            total_sum: 0.0,
            skip_count: 0,
        };
        let mut buckets: BTreeMap<String, f64> = BTreeMap::new();

        for issue in issues {
            match issue.fields.numeric_value(field_name) {
                Some(value) => {
                    field_sum.total_sum += value;
                    if single_field && value != 0.0 {
                        let status = issue
                            .fields
                            .status_name()
                            .unwrap_or(UNKNOWN_STATUS)
                            .to_string();
                        *buckets.entry(status).or_insert(0.0) += value;
                    }
                }
                None => field_sum.skip_count += 1,
            }
        }

        if field_sum.skip_count > 0 {
            warn!(
                "{} issues skipped for field {} (non-numeric or null values)",
                field_sum.skip_count, field_name
            );
        }

        if single_field {
            result.status_sums = Some(buckets);
        }
        result.field_sums.push(field_sum);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue(status: Option<&str>, field_value: serde_json::Value) -> Issue {
        let mut fields = json!({"customfield_90001": field_value});
        if let Some(name) = status {
            fields["status"] = json!({"id": "1", "name": name});
        }
        serde_json::from_value(json!({"key": "X-1", "fields": fields})).unwrap()
    }

    #[test]
    fn sums_numeric_values_and_counts_skips() {
        let issues = vec![
            issue(None, json!(10)),
            issue(None, json!("abc")),
            issue(None, json!(null)),
            issue(None, json!(5)),
        ];
        let fields = vec!["customfield_90001".to_string()];

        let result = sum_fields("project = PROJ", &issues, &fields);

        assert_eq!(result.issue_count, 4);
        assert_eq!(result.field_sums.len(), 1);
        assert_eq!(result.field_sums[0].total_sum, 15.0);
        assert_eq!(result.field_sums[0].skip_count, 2);
    }

    #[test]
    fn single_field_breakdown_excludes_zero_contributions() {
        let issues = vec![
            issue(Some("Done"), json!(10)),
            issue(Some("Done"), json!(0)),
            issue(Some("InProgress"), json!(5)),
            issue(Some("Done"), json!(3)),
        ];
        let fields = vec!["customfield_90001".to_string()];

        let result = sum_fields("project = PROJ", &issues, &fields);

        assert_eq!(result.field_sums[0].total_sum, 18.0);
        assert_eq!(result.field_sums[0].skip_count, 0);
        let buckets = result.status_sums.unwrap();
        assert_eq!(buckets.get("Done"), Some(&13.0));
        assert_eq!(buckets.get("InProgress"), Some(&5.0));
        // The zero contributed to the total but created no bucket entry.
        assert_eq!(buckets.len(), 2);
    }

    #[test]
    fn missing_status_falls_back_to_unknown_bucket() {
        let issues = vec![issue(None, json!(7))];
        let fields = vec!["customfield_90001".to_string()];

        let result = sum_fields("project = PROJ", &issues, &fields);

        let buckets = result.status_sums.unwrap();
        assert_eq!(buckets.get("Unknown"), Some(&7.0));
    }

    #[test]
    fn multi_field_results_carry_no_breakdown() {
        let issues = vec![issue(Some("Done"), json!(4))];
        let fields = vec![
            "customfield_90001".to_string(),
            "customfield_90002".to_string(),
        ];

        let result = sum_fields("project = PROJ", &issues, &fields);

        assert!(result.status_sums.is_none());
        assert_eq!(result.field_sums.len(), 2);
        assert_eq!(result.field_sums[0].total_sum, 4.0);
        // Second field is absent on every issue, so everything skips.
        assert_eq!(result.field_sums[1].total_sum, 0.0);
        assert_eq!(result.field_sums[1].skip_count, 1);
    }

    #[test]
    fn statically_typed_story_points_participate() {
        let raw = json!({
            "key": "X-2",
            "fields": {"customfield_12345": 8.0, "status": {"name": "Done"}}
        });
        let issues = vec![serde_json::from_value(raw).unwrap()];
        let fields = vec!["customfield_12345".to_string()];

        let result = sum_fields("project = PROJ", &issues, &fields);

        assert_eq!(result.field_sums[0].total_sum, 8.0);
        assert_eq!(result.status_sums.unwrap().get("Done"), Some(&8.0));
    }
}
