pub(crate) mod relation_queries;
pub(crate) mod subtype;
mod subtype_explain;
