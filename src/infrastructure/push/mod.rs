//! Remote push targets

pub mod logging;
pub mod recording;

pub use logging::LoggingPushTarget;
pub use recording::RecordingPushTarget;
