//! Cache inspection and invalidation tools.

use crate::tools::McpTool;
use crate::{McpError, McpResult};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::str::FromStr;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tally_cache::CacheStore;
use tally_core::CollectionKey;
use tracing::{debug, info};

/// Reports what the cache holds.
pub struct CacheStatsTool {
    cache: Arc<CacheStore>,
}

impl CacheStatsTool {
    /// Creates the tool over `cache`.
    pub fn new(cache: Arc<CacheStore>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl McpTool for CacheStatsTool {
    fn name(&self) -> &str {
        "cache_stats"
    }

    fn description(&self) -> &str {
        "Returns cached collections with their age, TTL, size and expiry status."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _input: Value) -> McpResult<Value> {
        debug!("Cache stats tool called");

        serde_json::to_value(self.cache.stats())
            .map_err(|e| McpError::ToolExecutionFailed(format!("Failed to encode stats: {}", e)))
    }
}

/// Drops cached snapshots so the next lookup refetches.
pub struct InvalidateCacheTool {
    cache: Arc<CacheStore>,
}

impl InvalidateCacheTool {
    /// Creates the tool over `cache`.
    pub fn new(cache: Arc<CacheStore>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl McpTool for InvalidateCacheTool {
    fn name(&self) -> &str {
        "invalidate_cache"
    }

    fn description(&self) -> &str {
        "Clears the cached copy of one collection (friends, groups, categories, currencies), \
         or all of them when no collection is given."
    }

    fn input_schema(&self) -> Value {
        let collections: Vec<&'static str> = CollectionKey::iter().map(|k| k.as_str()).collect();
        json!({
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "enum": collections,
                    "description": "Collection to clear; omit to clear everything"
                }
            }
        })
    }

    async fn execute(&self, input: Value) -> McpResult<Value> {
        debug!(input = ?input, "Invalidate cache tool called");

        let invalidated: Vec<&'static str> = match input.get("collection") {
            None | Some(Value::Null) => {
                self.cache.invalidate_all();
                CollectionKey::iter().map(|k| k.as_str()).collect()
            }
            Some(v) => {
                let name = v.as_str().ok_or_else(|| {
                    McpError::InvalidInput("'collection' must be a string".to_string())
                })?;
                let key = CollectionKey::from_str(name)
                    .map_err(|_| McpError::InvalidInput(format!("Unknown collection '{}'", name)))?;
                self.cache.invalidate(key);
                vec![key.as_str()]
            }
        };

        info!(?invalidated, "Cache invalidated via tool");
        Ok(json!({ "invalidated": invalidated }))
    }
}
