//! Authorization services

pub mod cache;
pub mod local;

pub use cache::{AuthorizationCache, SharedAuthorizationCache};
pub use local::{LocalAuthorizator, TokenEntry, TokenStatus};
