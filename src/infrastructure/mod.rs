//! Infrastructure layer - concrete adapters behind the domain ports

pub mod push;

pub use push::{LoggingPushTarget, RecordingPushTarget};
