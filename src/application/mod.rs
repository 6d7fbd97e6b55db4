pub mod authorization;
pub mod events;
pub mod navigation;

// Re-export key types for convenience
pub use authorization::{AuthorizationCache, LocalAuthorizator, TokenEntry, TokenStatus};
pub use events::{create_event_bus, Event, EventBus, EventSubscriber, SharedEventBus};
pub use navigation::{EvseFilter, NavigationProvider, StatusFilter};
