//! Fuzzy resolution tools.

use crate::tools::McpTool;
use crate::{McpError, McpResult};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tally_core::CollectionKey;
use tally_resolver::{EntityResolver, SourceProvider};
use tracing::debug;

/// Resolves a free-text reference against one collection.
pub struct ResolveTool {
    name: &'static str,
    description: &'static str,
    key: CollectionKey,
    resolver: Arc<EntityResolver>,
    source: Arc<dyn SourceProvider>,
}

impl ResolveTool {
    /// `resolve_friend`: matches against friends' full names.
    pub fn friends(resolver: Arc<EntityResolver>, source: Arc<dyn SourceProvider>) -> Self {
        Self {
            name: "resolve_friend",
            description: "Finds friends whose name matches a possibly partial or misspelled query. \
                          Returns matching friend ids ranked by similarity score (0-100).",
            key: CollectionKey::Friends,
            resolver,
            source,
        }
    }

    /// `resolve_group`: matches against group names.
    pub fn groups(resolver: Arc<EntityResolver>, source: Arc<dyn SourceProvider>) -> Self {
        Self {
            name: "resolve_group",
            description: "Finds groups whose name matches a possibly partial or misspelled query. \
                          Returns matching group ids ranked by similarity score (0-100).",
            key: CollectionKey::Groups,
            resolver,
            source,
        }
    }

    /// `resolve_category`: matches against "Parent - Subcategory" labels.
    pub fn categories(resolver: Arc<EntityResolver>, source: Arc<dyn SourceProvider>) -> Self {
        Self {
            name: "resolve_category",
            description: "Finds expense categories matching a query such as 'groceries' or \
                          'utilities'. Labels look like 'Food and drink - Groceries'.",
            key: CollectionKey::Categories,
            resolver,
            source,
        }
    }

    /// Collection this tool searches.
    pub fn key(&self) -> CollectionKey {
        self.key
    }
}

#[async_trait]
impl McpTool for ResolveTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Name or partial name to look up"
                },
                "threshold": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": 100,
                    "description": "Minimum similarity score (default 70)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, input: Value) -> McpResult<Value> {
        debug!(tool = self.name, input = ?input, "Resolve tool called");

        let query = input
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::InvalidInput("Missing 'query' field".to_string()))?;

        let threshold = match input.get("threshold") {
            None | Some(Value::Null) => i64::from(self.resolver.default_threshold()),
            Some(v) => v.as_i64().ok_or_else(|| {
                McpError::InvalidInput(format!("'threshold' must be an integer, got {}", v))
            })?,
        };

        let matches = self
            .resolver
            .resolve_from(self.key, query, threshold, self.source.as_ref())
            .await?;

        let count = matches.len();
        let matches = serde_json::to_value(&matches).map_err(|e| {
            McpError::ToolExecutionFailed(format!("Failed to encode matches: {}", e))
        })?;

        Ok(json!({
            "matches": matches,
            "count": count,
        }))
    }
}
