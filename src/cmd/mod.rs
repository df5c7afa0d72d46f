pub mod fields;
pub mod get;
pub mod list;
pub mod merge;
pub mod sum;

/// Splits a comma-separated fields flag into individual names. The `*all`
/// and `*navigable` wildcards pass through as a single element.
pub fn parse_fields(fields_str: &str) -> Vec<String> {
    if fields_str == "*all" || fields_str == "*navigable" {
        return vec![fields_str.to_string()];
    }
    fields_str
        .split(',')
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}
