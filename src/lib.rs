pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{HttpUpstream, MemoryCacheStore};
pub use crate::config::{EnvIdentity, Settings, StaticIdentity};
pub use crate::core::{aggregate::AggregationPipeline, cache::ResponseCache, router::RequestRouter};
pub use crate::domain::model::{InboundRequest, OutboundResponse};
pub use crate::utils::error::{ProfileError, Result};
