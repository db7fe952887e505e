//! MCP tools for tally entity resolution.
//!
//! Exposes the resolver and its cache as tools an LLM can call:
//!
//! - `resolve_friend`, `resolve_group`, `resolve_category`: fuzzy lookups
//! - `cache_stats`: what is cached and how old it is
//! - `invalidate_cache`: drop one collection or all of them
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use tally_cache::CacheStore;
//! use tally_core::{CandidateEntity, CollectionKey};
//! use tally_mcp::ToolRegistry;
//! use tally_resolver::{EntityResolver, InMemorySource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let resolver = Arc::new(EntityResolver::new(Arc::new(CacheStore::default())));
//! let source = Arc::new(
//!     InMemorySource::new()
//!         .with_collection(CollectionKey::Groups, vec![CandidateEntity::new(7, "Roommates")]),
//! );
//! let registry = ToolRegistry::for_resolver(resolver, source);
//!
//! let output = registry
//!     .execute("resolve_group", json!({ "query": "roomates" }))
//!     .await
//!     .unwrap();
//! assert_eq!(output["count"], 1);
//! assert_eq!(output["matches"][0]["id"], 7);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod telemetry;
pub mod tools;

pub use error::{McpError, McpResult};
pub use telemetry::init_tracing;
pub use tools::{CacheStatsTool, InvalidateCacheTool, McpTool, ResolveTool, ToolRegistry};
