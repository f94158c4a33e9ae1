//! Policy context retrieval: knowledge stores with keyword fallback

pub mod classifier;
pub mod http;
pub mod memory;
pub mod resolver;
pub mod store;

pub use classifier::classify;
pub use http::HttpKnowledgeStore;
pub use memory::MemoryKnowledgeStore;
pub use resolver::{DEFAULT_MAX_RESULTS, DEFAULT_TIMEOUT, PolicyContextResolver};
pub use store::KnowledgeStore;
