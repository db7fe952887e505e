//! Candidate sources: the collaborator seam plus Splitwise payload adapters.
//!
//! The HTTP client that talks to the remote API lives outside this crate. It
//! plugs in either as a [`SourceProvider`] returning candidates directly, or
//! as a [`PayloadFetcher`] returning raw JSON that [`PayloadSource`] turns
//! into candidates.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tally_core::{CandidateEntity, CollectionKey, Metadata};
use tally_error::{SourceError, TallyResult};
use tracing::{debug, warn};

/// Supplies a fresh candidate list for a collection.
///
/// Failures (network, auth, rate limit) are returned as-is; the resolver
/// propagates them without retrying. Timeouts are the implementor's job.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Fetches the current contents of `key`.
    async fn fetch(&self, key: CollectionKey) -> TallyResult<Vec<CandidateEntity>>;
}

/// Fetches the raw JSON body for a collection endpoint.
#[async_trait]
pub trait PayloadFetcher: Send + Sync {
    /// Fetches the response body for `key`, e.g. `{"friends": [...]}`.
    async fn fetch_payload(&self, key: CollectionKey) -> TallyResult<Value>;
}

/// Adapts a [`PayloadFetcher`] into a [`SourceProvider`].
#[derive(Debug, Clone)]
pub struct PayloadSource<P> {
    fetcher: P,
}

impl<P> PayloadSource<P> {
    /// Wraps `fetcher`.
    pub fn new(fetcher: P) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl<P: PayloadFetcher> SourceProvider for PayloadSource<P> {
    async fn fetch(&self, key: CollectionKey) -> TallyResult<Vec<CandidateEntity>> {
        let payload = self.fetcher.fetch_payload(key).await?;
        candidates_from_payload(key, &payload)
    }
}

/// Fixed candidate lists held in memory.
///
/// Counts fetches, which makes it handy for verifying cache behaviour.
#[derive(Debug, Default)]
pub struct InMemorySource {
    collections: HashMap<CollectionKey, Vec<CandidateEntity>>,
    fetches: AtomicUsize,
}

impl InMemorySource {
    /// Creates an empty source; unknown collections fetch as empty lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this source with `candidates` served for `key`.
    pub fn with_collection(mut self, key: CollectionKey, candidates: Vec<CandidateEntity>) -> Self {
        self.collections.insert(key, candidates);
        self
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceProvider for InMemorySource {
    async fn fetch(&self, key: CollectionKey) -> TallyResult<Vec<CandidateEntity>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.collections.get(&key).cloned().unwrap_or_default())
    }
}

/// Converts a Splitwise response body for `key` into candidates.
pub fn candidates_from_payload(
    key: CollectionKey,
    payload: &Value,
) -> TallyResult<Vec<CandidateEntity>> {
    match key {
        CollectionKey::Friends => friends_from_json(payload),
        CollectionKey::Groups => groups_from_json(payload),
        CollectionKey::Categories => categories_from_json(payload),
        CollectionKey::Currencies => currencies_from_json(payload),
    }
}

fn items(key: CollectionKey, payload: &Value) -> TallyResult<&Vec<Value>> {
    payload
        .get(key.as_str())
        .and_then(Value::as_array)
        .ok_or_else(|| {
            SourceError::malformed(key.as_str(), format!("missing '{}' array", key.as_str())).into()
        })
}

/// Every non-null field except the ones listed in `skip`.
fn metadata_without(item: &Value, skip: &[&str]) -> Metadata {
    item.as_object()
        .map(|object| {
            object
                .iter()
                .filter(|(k, v)| !v.is_null() && !skip.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default()
}

fn str_field<'a>(item: &'a Value, field: &str) -> &'a str {
    item.get(field).and_then(Value::as_str).unwrap_or_default().trim()
}

/// Builds a candidate, skipping items without an integer id or a label.
fn candidate(
    key: CollectionKey,
    item: &Value,
    label: String,
    metadata: Metadata,
) -> Option<CandidateEntity> {
    let Some(id) = item.get("id").and_then(Value::as_i64) else {
        warn!(collection = %key, "Skipping entry without integer id");
        return None;
    };
    if label.is_empty() {
        warn!(collection = %key, id, "Skipping entry without a usable name");
        return None;
    }
    Some(CandidateEntity::new(id, label).with_metadata(metadata))
}

/// Friends, labelled "first last", falling back to the email address.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tally_resolver::source::friends_from_json;
///
/// let payload = json!({"friends": [
///     {"id": 1, "first_name": "John", "last_name": "Smith", "email": "john@example.com"},
///     {"id": 2, "first_name": null, "last_name": null, "email": "anon@example.com"},
/// ]});
///
/// let friends = friends_from_json(&payload).unwrap();
/// assert_eq!(friends[0].display_name(), "John Smith");
/// assert_eq!(friends[1].display_name(), "anon@example.com");
/// ```
pub fn friends_from_json(payload: &Value) -> TallyResult<Vec<CandidateEntity>> {
    let key = CollectionKey::Friends;
    let candidates: Vec<_> = items(key, payload)?
        .iter()
        .filter_map(|friend| {
            let full_name = format!(
                "{} {}",
                str_field(friend, "first_name"),
                str_field(friend, "last_name")
            )
            .trim()
            .to_string();
            let label = if full_name.is_empty() {
                str_field(friend, "email").to_string()
            } else {
                full_name
            };
            candidate(key, friend, label, metadata_without(friend, &["id"]))
        })
        .collect();
    debug!(count = candidates.len(), "Parsed friends payload");
    Ok(candidates)
}

/// Groups, labelled by name.
pub fn groups_from_json(payload: &Value) -> TallyResult<Vec<CandidateEntity>> {
    let key = CollectionKey::Groups;
    let candidates: Vec<_> = items(key, payload)?
        .iter()
        .filter_map(|group| {
            let label = str_field(group, "name").to_string();
            candidate(key, group, label, metadata_without(group, &["id"]))
        })
        .collect();
    debug!(count = candidates.len(), "Parsed groups payload");
    Ok(candidates)
}

/// Categories flattened with their subcategories.
///
/// Subcategories are labelled `"Parent - Sub"` and carry `parent_id` and
/// `parent_name` metadata.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tally_resolver::source::categories_from_json;
///
/// let payload = json!({"categories": [
///     {"id": 1, "name": "Food and drink", "subcategories": [
///         {"id": 12, "name": "Groceries"},
///     ]},
/// ]});
///
/// let categories = categories_from_json(&payload).unwrap();
/// assert_eq!(categories.len(), 2);
/// assert_eq!(categories[1].display_name(), "Food and drink - Groceries");
/// ```
pub fn categories_from_json(payload: &Value) -> TallyResult<Vec<CandidateEntity>> {
    let key = CollectionKey::Categories;
    let mut candidates = Vec::new();

    for category in items(key, payload)? {
        let parent_name = str_field(category, "name");
        if let Some(parent) = candidate(
            key,
            category,
            parent_name.to_string(),
            metadata_without(category, &["id", "subcategories"]),
        ) {
            candidates.push(parent);
        }

        let subcategories = category
            .get("subcategories")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for sub in subcategories {
            let sub_name = str_field(sub, "name");
            let label = if sub_name.is_empty() {
                String::new()
            } else {
                format!("{parent_name} - {sub_name}")
            };
            let mut metadata = metadata_without(sub, &["id"]);
            if let Some(parent_id) = category.get("id").filter(|v| !v.is_null()) {
                metadata.insert("parent_id".to_string(), parent_id.clone());
            }
            metadata.insert("parent_name".to_string(), Value::from(parent_name));
            if let Some(sub) = candidate(key, sub, label, metadata) {
                candidates.push(sub);
            }
        }
    }

    debug!(count = candidates.len(), "Flattened categories payload");
    Ok(candidates)
}

/// Currencies, labelled by code.
///
/// The remote list has no numeric ids, so ids are 1-based positions in the
/// response and the code is kept as `currency_code` metadata.
pub fn currencies_from_json(payload: &Value) -> TallyResult<Vec<CandidateEntity>> {
    let key = CollectionKey::Currencies;
    let candidates: Vec<_> = items(key, payload)?
        .iter()
        .enumerate()
        .filter_map(|(index, currency)| {
            let code = str_field(currency, "currency_code");
            if code.is_empty() {
                warn!(collection = %key, index, "Skipping currency without a code");
                return None;
            }
            Some(
                CandidateEntity::new(index as i64 + 1, code)
                    .with_metadata(metadata_without(currency, &[])),
            )
        })
        .collect();
    debug!(count = candidates.len(), "Parsed currencies payload");
    Ok(candidates)
}
