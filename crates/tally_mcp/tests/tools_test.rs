//! Tests for the resolution and cache tools.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tally_cache::CacheStore;
use tally_core::{CandidateEntity, CollectionKey};
use tally_error::{SourceError, TallyResult};
use tally_mcp::{McpError, McpTool, ToolRegistry};
use tally_resolver::{EntityResolver, InMemorySource, ResolverConfig, SourceProvider};

fn source() -> Arc<InMemorySource> {
    Arc::new(
        InMemorySource::new()
            .with_collection(
                CollectionKey::Friends,
                vec![
                    CandidateEntity::new(1, "John Smith"),
                    CandidateEntity::new(2, "Jonathan Lee"),
                ],
            )
            .with_collection(CollectionKey::Groups, vec![CandidateEntity::new(10, "Roommates")])
            .with_collection(
                CollectionKey::Categories,
                vec![
                    CandidateEntity::new(12, "Food and drink - Groceries"),
                    CandidateEntity::new(8, "Utilities - Electricity"),
                ],
            ),
    )
}

fn registry_with(source: Arc<dyn SourceProvider>) -> (ToolRegistry, Arc<CacheStore>) {
    let cache = Arc::new(CacheStore::default());
    let resolver = Arc::new(EntityResolver::new(Arc::clone(&cache)));
    (ToolRegistry::for_resolver(resolver, source), cache)
}

struct FailingSource;

#[async_trait]
impl SourceProvider for FailingSource {
    async fn fetch(&self, key: CollectionKey) -> TallyResult<Vec<CandidateEntity>> {
        Err(SourceError::unavailable(key.as_str(), "HTTP 503 Service Unavailable"))?
    }
}

#[test]
fn registry_lists_all_tools_by_name() {
    let (registry, _) = registry_with(source());
    let names: Vec<String> = registry.list().iter().map(|t| t.name().to_string()).collect();
    assert_eq!(
        names,
        vec![
            "cache_stats",
            "invalidate_cache",
            "resolve_category",
            "resolve_friend",
            "resolve_group",
        ]
    );
    for tool in registry.list() {
        assert_eq!(tool.input_schema()["type"], "object");
        assert!(!tool.description().is_empty());
    }
}

#[tokio::test]
async fn resolve_friend_returns_matches_and_count() {
    let (registry, _) = registry_with(source());

    let output = registry
        .execute("resolve_friend", json!({ "query": "jon" }))
        .await
        .unwrap();

    assert_eq!(output["count"], 2);
    let matches = output["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    for m in matches {
        assert!(m["score"].as_f64().unwrap() >= 70.0);
        assert!(m["name"].is_string());
        assert!(m["metadata"].is_object());
    }
}

#[tokio::test]
async fn resolve_category_matches_subcategory() {
    let (registry, _) = registry_with(source());

    let output = registry
        .execute("resolve_category", json!({ "query": "groceries" }))
        .await
        .unwrap();

    assert_eq!(output["matches"][0]["id"], 12);
}

#[tokio::test]
async fn explicit_threshold_is_honoured() {
    let (registry, _) = registry_with(source());

    let output = registry
        .execute("resolve_friend", json!({ "query": "jon", "threshold": 95 }))
        .await
        .unwrap();
    assert_eq!(output["count"], 0);
    assert_eq!(output["matches"], json!([]));
}

#[tokio::test]
async fn bad_input_is_invalid_input() {
    let (registry, _) = registry_with(source());

    let cases: Vec<Value> = vec![
        json!({}),
        json!({ "query": 5 }),
        json!({ "query": "   " }),
        json!({ "query": "jon", "threshold": 150 }),
        json!({ "query": "jon", "threshold": "high" }),
    ];
    for input in cases {
        let err = registry.execute("resolve_group", input).await.unwrap_err();
        assert_eq!(err.error_type(), "invalid_input", "{err}");
    }
}

#[tokio::test]
async fn source_failure_is_backend_unavailable() {
    let (registry, _) = registry_with(Arc::new(FailingSource));

    let err = registry
        .execute("resolve_group", json!({ "query": "roommates" }))
        .await
        .unwrap_err();

    assert!(matches!(err, McpError::BackendUnavailable(_)));
    let json = err.to_json();
    assert_eq!(json["error_type"], "backend_unavailable");
    assert!(json["message"].as_str().unwrap().contains("HTTP 503"));
}

#[tokio::test]
async fn unknown_tool_is_reported() {
    let (registry, _) = registry_with(source());
    let err = registry.execute("resolve_expense", json!({})).await.unwrap_err();
    assert_eq!(err, McpError::ToolNotFound("resolve_expense".to_string()));
}

#[tokio::test]
async fn cache_stats_reflect_resolutions() {
    let (registry, _) = registry_with(source());

    let empty = registry.execute("cache_stats", json!({})).await.unwrap();
    assert_eq!(empty["total_entries"], 0);

    registry
        .execute("resolve_group", json!({ "query": "roommates" }))
        .await
        .unwrap();
    let stats = registry.execute("cache_stats", json!({})).await.unwrap();

    assert_eq!(stats["total_entries"], 1);
    assert_eq!(stats["entries"][0]["key"], "groups");
    assert_eq!(stats["entries"][0]["size"], 1);
    assert_eq!(stats["entries"][0]["ttl_secs"], 300);
    assert_eq!(stats["entries"][0]["expired"], false);
}

#[tokio::test]
async fn invalidate_one_collection_forces_refetch() {
    let source = source();
    let (registry, cache) = registry_with(Arc::clone(&source) as Arc<dyn SourceProvider>);

    registry.execute("resolve_friend", json!({ "query": "jon" })).await.unwrap();
    registry.execute("resolve_group", json!({ "query": "roommates" })).await.unwrap();
    assert_eq!(source.fetch_count(), 2);

    let output = registry
        .execute("invalidate_cache", json!({ "collection": "friends" }))
        .await
        .unwrap();
    assert_eq!(output["invalidated"], json!(["friends"]));
    assert!(cache.get(CollectionKey::Friends).is_none());
    assert!(cache.get(CollectionKey::Groups).is_some());

    registry.execute("resolve_friend", json!({ "query": "jon" })).await.unwrap();
    assert_eq!(source.fetch_count(), 3);
}

#[tokio::test]
async fn invalidate_without_collection_clears_everything() {
    let (registry, cache) = registry_with(source());

    registry.execute("resolve_friend", json!({ "query": "jon" })).await.unwrap();
    registry.execute("resolve_category", json!({ "query": "groceries" })).await.unwrap();

    let output = registry.execute("invalidate_cache", json!({})).await.unwrap();
    assert_eq!(output["invalidated"].as_array().unwrap().len(), 4);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn invalidate_unknown_collection_is_invalid_input() {
    let (registry, _) = registry_with(source());
    let err = registry
        .execute("invalidate_cache", json!({ "collection": "expenses" }))
        .await
        .unwrap_err();
    assert_eq!(err.error_type(), "invalid_input");
}

#[tokio::test]
async fn registry_from_config_uses_configured_threshold() {
    let config = ResolverConfig::from_toml_str("[resolver]\ndefault_threshold = 95").unwrap();
    let registry = ToolRegistry::from_config(&config, source()).unwrap();

    let output = registry
        .execute("resolve_friend", json!({ "query": "jon" }))
        .await
        .unwrap();
    assert_eq!(output["count"], 0);

    let output = registry
        .execute("resolve_friend", json!({ "query": "john smith" }))
        .await
        .unwrap();
    assert_eq!(output["count"], 1);
}

#[test]
fn registry_from_invalid_config_fails() {
    let config = ResolverConfig::default()
        .with_cache(tally_cache::CacheConfig::default().with_static_ttl_secs(0));

    let err = ToolRegistry::from_config(&config, source()).err().unwrap();
    assert_eq!(err.error_type(), "tool_execution_failed");
    assert!(err.message().starts_with("configuration"));
}
