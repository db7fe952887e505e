//! Tool implementations.

mod cache;
mod resolve;

pub use cache::{CacheStatsTool, InvalidateCacheTool};
pub use resolve::ResolveTool;

use crate::{McpError, McpResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tally_resolver::{EntityResolver, ResolverConfig, SourceProvider};

/// Trait for MCP tools.
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Returns the tool name.
    fn name(&self) -> &str;

    /// Returns the tool description for the LLM.
    fn description(&self) -> &str;

    /// Returns the input schema as JSON Schema.
    fn input_schema(&self) -> Value;

    /// Executes the tool with the given input.
    async fn execute(&self, input: Value) -> McpResult<Value>;
}

/// Registry for managing MCP tools.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn McpTool>>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every resolution and cache tool wired to
    /// `resolver`, fetching through `source`.
    pub fn for_resolver(resolver: Arc<EntityResolver>, source: Arc<dyn SourceProvider>) -> Self {
        let cache = Arc::clone(resolver.cache());
        let mut registry = Self::new();

        registry.register(Arc::new(ResolveTool::friends(
            Arc::clone(&resolver),
            Arc::clone(&source),
        )));
        registry.register(Arc::new(ResolveTool::groups(
            Arc::clone(&resolver),
            Arc::clone(&source),
        )));
        registry.register(Arc::new(ResolveTool::categories(resolver, source)));
        registry.register(Arc::new(CacheStatsTool::new(Arc::clone(&cache))));
        registry.register(Arc::new(InvalidateCacheTool::new(cache)));

        tracing::info!("ToolRegistry initialized with {} tools", registry.len());
        registry
    }

    /// Creates a registry over a resolver built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`McpError::ToolExecutionFailed`] if `config` is invalid.
    pub fn from_config(
        config: &ResolverConfig,
        source: Arc<dyn SourceProvider>,
    ) -> McpResult<Self> {
        let resolver = EntityResolver::from_config(config)?;
        Ok(Self::for_resolver(Arc::new(resolver), source))
    }

    /// Registers a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn McpTool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Gets a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn McpTool>> {
        self.tools.get(name).cloned()
    }

    /// Lists all registered tools, ordered by name.
    pub fn list(&self) -> Vec<Arc<dyn McpTool>> {
        let mut tools: Vec<_> = self.tools.values().cloned().collect();
        tools.sort_by(|a, b| a.name().cmp(b.name()));
        tools
    }

    /// Executes a tool by name.
    pub async fn execute(&self, name: &str, input: Value) -> McpResult<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))?;

        tool.execute(input).await
    }

    /// Gets the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
