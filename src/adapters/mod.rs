// Adapters layer: concrete implementations of the domain ports and runtime event formats.

pub mod cache;
pub mod http;
pub mod lambda_event;

pub use self::cache::MemoryCacheStore;
pub use self::http::HttpUpstream;
