//! Authorization results
//!
//! Contains the outcome enumerations, the generic result value object with
//! its per-outcome factories, the JSON adapter and the authorization port.

pub mod details;
pub mod json;
pub mod outcome;
pub mod port;
pub mod result;

pub use details::{ChargingTariff, StartDetails};
pub use json::JsonCustomizer;
pub use outcome::{AuthStartOutcome, AuthStopOutcome, Outcome};
pub use port::{AuthStartRequest, AuthStopRequest, AuthorizeStartStop};
pub use result::{
    AuthResultBuilder, AuthStartResult, AuthStopResult, AuthorizationResult, LocationScope,
    Provenance,
};
