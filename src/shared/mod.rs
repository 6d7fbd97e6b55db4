//! Shared utilities used across layers

pub mod cancellation;
pub mod errors;

pub use cancellation::CancellationSignal;
pub use errors::{AppError, ConfigError, DomainError, DomainResult};
