//! # WWCP authorization results and push fan-out
//!
//! Value objects and services for the e-mobility roaming exchange between
//! charging station operators, e-mobility providers and navigation providers.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: identifiers, authorization outcomes and results, charging
//!   location hierarchy, push requests and the ports at the remote seams
//! - **application**: local authorizator with result cache, navigation
//!   provider push fan-out, event bus
//! - **infrastructure**: concrete push targets
//! - **shared**: errors and the cancellation signal

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod telemetry;

pub use config::{default_config_path, AppConfig};
pub use telemetry::init_tracing;

pub use application::{
    create_event_bus, Event, EventBus, LocalAuthorizator, NavigationProvider, SharedEventBus,
};
pub use domain::{AuthStartResult, AuthStopResult, AuthorizationResult, DomainError, DomainResult};
