//! Column Resolution and Record Enrichment
//!
//! The server addresses columns by attnum (a stable, server-assigned
//! integer) and exchanges records keyed by attnum strings. This module
//! translates between that wire shape and name-keyed records.
//!
//! # Snapshots
//! A [`ColumnMap`] is an immutable snapshot built from one `columns.list`
//! response. Both directions (name to attnum, attnum to name) are built
//! together and never mutated afterwards. [`ColumnCache`] holds the current
//! snapshot behind an `Arc` and swaps it whole on refresh.
//!
//! # Staleness
//! The cache is never invalidated automatically. After renaming, adding or
//! dropping columns, callers must refresh explicitly. An unknown name is an
//! `UnknownColumn` fault; it does not trigger a refresh.
//!
//! # Lenient attnums
//! An attnum missing from the snapshot resolves to its decimal string when
//! converting to a name, so records from a newer server shape still come
//! back intact.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ClientError, Result};
use crate::models::{ColumnInfo, LinkedSummaryIndex, RawRecord, RecordList};

/// A column given either by name or by attnum
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnRef {
    Name(String),
    Attnum(i64),
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for ColumnRef {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<i64> for ColumnRef {
    fn from(attnum: i64) -> Self {
        Self::Attnum(attnum)
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Attnum(attnum) => write!(f, "{attnum}"),
        }
    }
}

/// A foreign key value together with the server's summary of the linked record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedRecordRef {
    /// The raw foreign key value
    pub key: Value,
    /// Human-readable summary of the referenced record
    pub summary: String,
}

/// One field of an enriched record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Foreign key value with a summary attached
    Linked(LinkedRecordRef),
    /// Value exactly as the server sent it
    Value(Value),
}

impl FieldValue {
    /// The underlying value; for linked fields, the foreign key
    #[must_use]
    pub const fn value(&self) -> &Value {
        match self {
            Self::Linked(linked) => &linked.key,
            Self::Value(value) => value,
        }
    }

    /// Summary text, if this field links to another record
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        match self {
            Self::Linked(linked) => Some(&linked.summary),
            Self::Value(_) => None,
        }
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Linked(linked) => linked.key,
            Self::Value(value) => value,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Record keyed by column name
pub type EnrichedRecord = BTreeMap<String, FieldValue>;

/// A page of name-keyed records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsPage {
    /// Total matching records as reported by the server
    pub count: i64,
    pub results: Vec<EnrichedRecord>,
}

/// Immutable snapshot of a table's columns with both lookup directions
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: Vec<ColumnInfo>,
    by_name: HashMap<String, i64>,
    by_attnum: HashMap<i64, String>,
}

impl ColumnMap {
    pub fn new(columns: Vec<ColumnInfo>) -> Self {
        let by_name = columns.iter().map(|c| (c.name.clone(), c.id)).collect();
        let by_attnum = columns.iter().map(|c| (c.id, c.name.clone())).collect();
        Self { columns, by_name, by_attnum }
    }

    /// Columns in server order
    #[must_use]
    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Attnum of a column name
    ///
    /// # Errors
    /// `UnknownColumn` if the name is not in this snapshot.
    pub fn name_to_attnum(&self, name: &str) -> Result<i64> {
        self.by_name.get(name).copied().ok_or_else(|| ClientError::unknown_column(name))
    }

    /// Name of an attnum, or the attnum's decimal string if unknown
    #[must_use]
    pub fn attnum_to_name(&self, attnum: i64) -> Cow<'_, str> {
        match self.by_attnum.get(&attnum) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(attnum.to_string()),
        }
    }

    /// Resolve a name or pass an attnum through
    pub fn resolve(&self, column: &ColumnRef) -> Result<i64> {
        match column {
            ColumnRef::Name(name) => self.name_to_attnum(name),
            ColumnRef::Attnum(attnum) => Ok(*attnum),
        }
    }

    /// Resolve every reference, failing on the first unknown name
    pub fn resolve_all<'a, I>(&self, columns: I) -> Result<Vec<i64>>
    where
        I: IntoIterator<Item = &'a ColumnRef>,
    {
        columns.into_iter().map(|c| self.resolve(c)).collect()
    }

    /// Rewrite a name-keyed record into the attnum-keyed wire shape
    ///
    /// All keys are resolved before anything is returned, so an unknown name
    /// yields no partial record.
    pub fn encode_record<'a, I>(&self, record: I) -> Result<RawRecord>
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        record
            .into_iter()
            .map(|(name, value)| {
                self.name_to_attnum(name).map(|attnum| (attnum.to_string(), value.clone()))
            })
            .collect()
    }

    /// Rewrite one attnum-keyed row into a name-keyed record
    ///
    /// `index` is the row's position in the response, used to find its
    /// linked record summaries.
    #[must_use]
    pub fn enrich_row(
        &self,
        index: usize,
        row: RawRecord,
        linked: Option<&LinkedSummaryIndex>,
    ) -> EnrichedRecord {
        // JSON object keys are always strings, so the row index is looked up in string form
        let row_summaries = linked.and_then(|l| l.get(&index.to_string()));
        let mut enriched = EnrichedRecord::new();

        for (key, value) in row {
            let Ok(attnum) = key.trim().parse::<i64>() else {
                trace!(key = %key, "keeping non-attnum key");
                enriched.insert(key, FieldValue::Value(value));
                continue;
            };

            let name = self.attnum_to_name(attnum).into_owned();
            let summary = row_summaries.and_then(|s| s.get(&attnum.to_string()));
            let field = match summary {
                // No reference is built around a missing key
                Some(summary) if !value.is_null() => {
                    FieldValue::Linked(LinkedRecordRef { key: value, summary: summary.clone() })
                }
                _ => FieldValue::Value(value),
            };
            enriched.insert(name, field);
        }

        enriched
    }

    /// Rewrite a whole response into a page, keeping the server's count
    #[must_use]
    pub fn enrich(&self, list: RecordList) -> RecordsPage {
        let linked = list.linked_record_summaries;
        let results = list
            .results
            .into_iter()
            .enumerate()
            .map(|(index, row)| self.enrich_row(index, row, linked.as_ref()))
            .collect();
        RecordsPage { count: list.count, results }
    }
}

/// Per-table column snapshot holder with opt-in refresh
#[derive(Debug, Clone, Default)]
pub struct ColumnCache {
    snapshot: Option<Arc<ColumnMap>>,
}

impl ColumnCache {
    pub const fn new() -> Self {
        Self { snapshot: None }
    }

    /// Current snapshot, if one has been loaded
    #[must_use]
    pub const fn snapshot(&self) -> Option<&Arc<ColumnMap>> {
        self.snapshot.as_ref()
    }

    /// Replace the snapshot with one built from `columns`
    pub fn replace(&mut self, columns: Vec<ColumnInfo>) -> Arc<ColumnMap> {
        let map = Arc::new(ColumnMap::new(columns));
        self.snapshot = Some(Arc::clone(&map));
        map
    }

    /// Drop the snapshot; the next load fetches
    pub fn clear(&mut self) {
        self.snapshot = None;
    }

    /// Return the cached snapshot, or fetch and install a new one
    ///
    /// With `use_cache` false the fetch always happens. A failed fetch leaves
    /// the previous snapshot in place.
    pub async fn load<F, Fut>(&mut self, use_cache: bool, fetch: F) -> Result<Arc<ColumnMap>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ColumnInfo>>>,
    {
        if use_cache {
            if let Some(map) = &self.snapshot {
                return Ok(Arc::clone(map));
            }
        }
        let columns = fetch().await?;
        debug!(columns = columns.len(), "refreshed column snapshot");
        Ok(self.replace(columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn column(id: i64, name: &str) -> ColumnInfo {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "type": "text",
            "nullable": true,
            "primary_key": id == 1,
            "has_dependents": false,
            "current_role_priv": ["SELECT"]
        }))
        .unwrap()
    }

    fn users_map() -> ColumnMap {
        ColumnMap::new(vec![column(1, "id"), column(5, "name"), column(12, "email")])
    }

    fn row(value: Value) -> RawRecord {
        value.as_object().unwrap().clone()
    }

    fn list(count: i64, rows: Vec<Value>, linked: Option<Value>) -> RecordList {
        RecordList {
            count,
            results: rows.into_iter().map(row).collect(),
            grouping: None,
            linked_record_summaries: linked.map(|l| serde_json::from_value(l).unwrap()),
            record_summaries: None,
            download_links: None,
        }
    }

    // Name <-> attnum mapping

    #[test]
    fn test_name_attnum_round_trip() {
        let map = users_map();
        for (attnum, name) in [(1, "id"), (5, "name"), (12, "email")] {
            assert_eq!(map.name_to_attnum(&map.attnum_to_name(attnum)).unwrap(), attnum);
            assert_eq!(map.attnum_to_name(map.name_to_attnum(name).unwrap()), name);
        }
    }

    #[test]
    fn test_unknown_name_is_fault() {
        let err = users_map().name_to_attnum("bogus").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_COLUMN");
        assert!(err.message().contains("bogus"));
    }

    #[test]
    fn test_unknown_attnum_falls_back_to_decimal() {
        assert_eq!(users_map().attnum_to_name(99), "99");
    }

    #[test]
    fn test_resolve_mixed_references() {
        let map = users_map();
        let refs = vec![ColumnRef::from("email"), ColumnRef::from(7), ColumnRef::from("id")];
        assert_eq!(map.resolve_all(&refs).unwrap(), vec![12, 7, 1]);
    }

    #[test]
    fn test_resolve_all_fails_on_any_unknown() {
        let refs = vec![ColumnRef::from("email"), ColumnRef::from("nope")];
        assert!(users_map().resolve_all(&refs).is_err());
    }

    // Outbound

    #[test]
    fn test_encode_record_uses_attnum_strings() {
        let record = row(json!({"email": "x@example.com"}));
        let encoded = users_map().encode_record(&record).unwrap();
        assert_eq!(Value::Object(encoded), json!({"12": "x@example.com"}));
    }

    #[test]
    fn test_encode_record_unknown_key_is_atomic() {
        let record = row(json!({"email": "x@example.com", "bogus": 1}));
        let err = users_map().encode_record(&record).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_COLUMN");
    }

    // Inbound

    #[test]
    fn test_enrich_wraps_linked_value() {
        let page = users_map().enrich(list(1, vec![json!({"5": 42})], Some(json!({"0": {"5": "Alice"}}))));
        assert_eq!(
            page.results[0]["name"],
            FieldValue::Linked(LinkedRecordRef { key: json!(42), summary: "Alice".to_string() })
        );
        assert_eq!(serde_json::to_value(&page.results[0]).unwrap(), json!({"name": {"key": 42, "summary": "Alice"}}));
    }

    #[test]
    fn test_enrich_without_summary_keeps_scalar() {
        let page = users_map().enrich(list(1, vec![json!({"5": 42})], None));
        assert_eq!(serde_json::to_value(&page.results[0]).unwrap(), json!({"name": 42}));
    }

    #[test]
    fn test_enrich_null_value_is_not_wrapped() {
        let page = users_map().enrich(list(1, vec![json!({"5": null})], Some(json!({"0": {"5": "Alice"}}))));
        assert_eq!(page.results[0]["name"], FieldValue::Value(Value::Null));
    }

    #[test]
    fn test_enrich_summary_belongs_to_its_row() {
        let page = users_map().enrich(list(
            2,
            vec![json!({"5": 1}), json!({"5": 2})],
            Some(json!({"1": {"5": "Bob"}})),
        ));
        assert_eq!(page.results[0]["name"].summary(), None);
        assert_eq!(page.results[1]["name"].summary(), Some("Bob"));
    }

    #[test]
    fn test_enrich_keeps_non_numeric_keys() {
        let page = users_map().enrich(list(1, vec![json!({"__meta": "x", "12": "a@b.c"})], None));
        assert_eq!(
            serde_json::to_value(&page.results[0]).unwrap(),
            json!({"__meta": "x", "email": "a@b.c"})
        );
    }

    #[test]
    fn test_enrich_unknown_attnum_uses_decimal_name() {
        let page = users_map().enrich(list(1, vec![json!({"40": true})], None));
        assert_eq!(page.results[0]["40"], FieldValue::Value(json!(true)));
    }

    #[test]
    fn test_enrich_preserves_server_count() {
        let page = users_map().enrich(list(250, vec![json!({"1": 1}), json!({"1": 2})], None));
        assert_eq!(page.count, 250);
        assert_eq!(page.results.len(), 2);
    }

    #[test]
    fn test_single_record_response_is_one_row_page() {
        let added: crate::models::RecordAdded = serde_json::from_value(json!({"results": [{"5": 42}]})).unwrap();
        let page = users_map().enrich(added.into());
        assert_eq!(page.count, 1);
        assert_eq!(serde_json::to_value(&page.results[0]).unwrap(), json!({"name": 42}));
    }

    // Cache

    #[tokio::test]
    async fn test_cache_load_fetches_once() {
        let calls = AtomicUsize::new(0);
        let mut cache = ColumnCache::new();
        for _ in 0..3 {
            let map = cache
                .load(true, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![column(1, "id")])
                })
                .await
                .unwrap();
            assert_eq!(map.len(), 1);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_refresh_swaps_snapshot() {
        let mut cache = ColumnCache::new();
        let before = cache.load(true, || async { Ok(vec![column(5, "name")]) }).await.unwrap();
        let after = cache.load(false, || async { Ok(vec![column(5, "full_name")]) }).await.unwrap();

        // The old snapshot is untouched by the refresh
        assert_eq!(before.attnum_to_name(5), "name");
        assert_eq!(after.attnum_to_name(5), "full_name");
        assert!(after.name_to_attnum("name").is_err());
    }

    #[tokio::test]
    async fn test_cache_failed_fetch_keeps_snapshot() {
        let mut cache = ColumnCache::new();
        cache.load(true, || async { Ok(vec![column(5, "name")]) }).await.unwrap();
        let err = cache
            .load(false, || async { Err(ClientError::transport("connection reset")) })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "TRANSPORT_FAULT");
        assert_eq!(cache.snapshot().unwrap().attnum_to_name(5), "name");
    }
}
