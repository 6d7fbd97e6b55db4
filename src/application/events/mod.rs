//! Application events (pub/sub)
//!
//! Authorization results and push round-trips are announced here for
//! logging sinks, dashboards and tests.

pub mod event_bus;
pub mod types;

pub use event_bus::{create_event_bus, EventBus, EventFilter, EventSubscriber, SharedEventBus};
pub use types::*;
