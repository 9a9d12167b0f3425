pub(crate) mod query_trace;
pub mod relation_cache;

pub use relation_cache::{RelationCache, RelationCacheStats};
