pub mod authorization;
pub mod i18n;
pub mod identifiers;
pub mod location;
pub mod push;

// Re-export commonly used types
pub use authorization::{
    AuthResultBuilder, AuthStartOutcome, AuthStartRequest, AuthStartResult, AuthStopOutcome,
    AuthStopRequest, AuthStopResult, AuthorizationResult, AuthorizeStartStop, ChargingTariff,
    LocationScope, Outcome, Provenance,
};
pub use i18n::I18nString;
pub use identifiers::*;
pub use location::{
    ChargingPool, ChargingStation, ChargingStationOperator, Evse, EvseHierarchy, EvseStatus,
    EvseStatusUpdate, OwnedEvse, RoamingNetwork,
};
pub use push::{
    PushAcknowledgement, PushAction, PushEvseDataRequest, PushEvseStatusRequest, PushOptions,
    PushOutcome, RemotePushTarget,
};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::{DomainError, DomainResult};
