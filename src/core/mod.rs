pub mod aggregate;
pub mod background;
pub mod cache;
pub mod cors;
pub mod feed;
pub mod orcid;
pub mod router;

pub use crate::domain::model::{AggregateResult, Envelope, EnvelopeResponse};
pub use crate::domain::ports::{CacheStore, Clock, IdentityProvider, UpstreamClient};
pub use crate::utils::error::Result;
