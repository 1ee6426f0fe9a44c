//! Record query and record payload models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A record as the server sends and accepts it: attnum (as string) to value
pub type RawRecord = Map<String, Value>;

/// Linked record summaries for one response: row index -> attnum -> summary
pub type LinkedSummaryIndex = HashMap<String, HashMap<String, String>>;

/// Sort direction for record queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("invalid sort direction '{other}', expected asc or desc")),
        }
    }
}

/// Ordering for record queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// Column attribute number to order by
    pub attnum: i64,
    pub direction: SortDirection,
}

/// Marker for the `"type": "attnum"` filter leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttnumTag {
    #[serde(rename = "attnum")]
    Attnum,
}

/// Marker for the `"type": "literal"` filter leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteralTag {
    #[serde(rename = "literal")]
    Literal,
}

/// Argument of a filter node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterArg {
    /// Column reference by attribute number
    Attnum {
        #[serde(rename = "type")]
        tag: AttnumTag,
        value: i64,
    },
    /// Literal value
    Literal {
        #[serde(rename = "type")]
        tag: LiteralTag,
        value: Value,
    },
    /// Nested filter
    Filter(Box<Filter>),
}

impl FilterArg {
    pub const fn attnum(attnum: i64) -> Self {
        Self::Attnum { tag: AttnumTag::Attnum, value: attnum }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal { tag: LiteralTag::Literal, value: value.into() }
    }
}

impl From<Filter> for FilterArg {
    fn from(filter: Filter) -> Self {
        Self::Filter(Box::new(filter))
    }
}

/// Recursive filter tree (e.g. `and`, `or`, `equal`, `contains`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Filter operation name
    #[serde(rename = "type")]
    pub op: String,
    pub args: Vec<FilterArg>,
}

impl Filter {
    pub fn new(op: impl Into<String>, args: Vec<FilterArg>) -> Self {
        Self { op: op.into(), args }
    }

    /// `attnum = value`
    pub fn equal(attnum: i64, value: impl Into<Value>) -> Self {
        Self::new("equal", vec![FilterArg::attnum(attnum), FilterArg::literal(value)])
    }

    pub fn and(filters: Vec<Self>) -> Self {
        Self::new("and", filters.into_iter().map(FilterArg::from).collect())
    }

    pub fn or(filters: Vec<Self>) -> Self {
        Self::new("or", filters.into_iter().map(FilterArg::from).collect())
    }
}

/// Grouping for record queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grouping {
    /// Column attribute numbers to group by
    pub columns: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preproc: Option<Vec<String>>,
}

/// One group in a grouped record response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub count: i64,
    pub results_eq: Vec<Map<String, Value>>,
    pub result_indices: Vec<i64>,
}

/// Grouping information in a record response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingResponse {
    pub columns: Vec<i64>,
    #[serde(default)]
    pub preproc: Option<Vec<String>>,
    pub groups: Vec<Group>,
}

/// One full-text search condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParam {
    pub attnum: i64,
    pub literal: Value,
}

/// Optional arguments of `records.list`, already expressed in attnums
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordListOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<OrderBy>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping: Option<Grouping>,
    /// Ask the server for linked record summaries
    #[serde(default)]
    pub return_record_summaries: bool,
}

/// Response of `records.list`, `records.get` and `records.search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordList {
    /// Total number of records matching the query
    pub count: i64,
    pub results: Vec<RawRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping: Option<GroupingResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_record_summaries: Option<LinkedSummaryIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_summaries: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_links: Option<Map<String, Value>>,
}

/// Response of `records.add` and `records.patch` (a single record)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordAdded {
    pub results: Vec<RawRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_record_summaries: Option<LinkedSummaryIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_summaries: Option<HashMap<String, String>>,
}

impl From<RecordAdded> for RecordList {
    /// View a single-record response as a page whose count is its length
    fn from(added: RecordAdded) -> Self {
        Self {
            count: added.results.len() as i64,
            results: added.results,
            grouping: None,
            linked_record_summaries: added.linked_record_summaries,
            record_summaries: added.record_summaries,
            download_links: None,
        }
    }
}

/// A key value paired with its human-readable summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizedRecordReference {
    pub key: Value,
    pub summary: String,
}

/// Response of `records.list_summaries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummaryList {
    pub count: i64,
    pub results: Vec<SummarizedRecordReference>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_serialization() {
        let filter = Filter::and(vec![
            Filter::equal(3, "Alice"),
            Filter::new("greater", vec![FilterArg::attnum(4), FilterArg::literal(18)]),
        ]);
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "type": "and",
                "args": [
                    {"type": "equal", "args": [{"type": "attnum", "value": 3}, {"type": "literal", "value": "Alice"}]},
                    {"type": "greater", "args": [{"type": "attnum", "value": 4}, {"type": "literal", "value": 18}]}
                ]
            })
        );
    }

    #[test]
    fn test_filter_deserialization_picks_leaf_kinds() {
        let filter: Filter = serde_json::from_value(json!({
            "type": "or",
            "args": [
                {"type": "attnum", "value": 2},
                {"type": "literal", "value": null},
                {"type": "null", "args": [{"type": "attnum", "value": 5}]}
            ]
        }))
        .unwrap();
        assert_eq!(filter.args[0], FilterArg::attnum(2));
        assert_eq!(filter.args[1], FilterArg::literal(Value::Null));
        assert!(matches!(&filter.args[2], FilterArg::Filter(f) if f.op == "null"));
    }

    #[test]
    fn test_record_list_optional_fields() {
        let list: RecordList = serde_json::from_value(json!({
            "count": 1,
            "results": [{"1": 10, "2": "x"}]
        }))
        .unwrap();
        assert_eq!(list.count, 1);
        assert!(list.linked_record_summaries.is_none());
        assert!(list.grouping.is_none());
    }

    #[test]
    fn test_record_list_rejects_missing_count() {
        let result = serde_json::from_value::<RecordList>(json!({"results": []}));
        assert!(result.is_err());
    }

    #[test]
    fn test_record_added_into_list() {
        let added: RecordAdded = serde_json::from_value(json!({
            "results": [{"5": 42}],
            "linked_record_summaries": {"0": {"5": "Alice"}}
        }))
        .unwrap();
        let list = RecordList::from(added);
        assert_eq!(list.count, 1);
        assert_eq!(list.results[0]["5"], json!(42));
        assert_eq!(list.linked_record_summaries.unwrap()["0"]["5"], "Alice");
    }

    #[test]
    fn test_sort_direction() {
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!(serde_json::to_value(SortDirection::Asc).unwrap(), json!("asc"));
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
