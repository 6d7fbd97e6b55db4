//! Authorization port
//!
//! Implemented by whoever can decide on a start/stop request: a local token
//! list, an e-mobility provider backend, a roaming hub.

use async_trait::async_trait;

use super::result::{AuthStartResult, AuthStopResult, LocationScope, Provenance};
use crate::domain::identifiers::{AuthToken, AuthorizatorId, SessionId};
use crate::shared::errors::DomainResult;

/// Request to authorize the start of a charging session.
#[derive(Debug, Clone)]
pub struct AuthStartRequest {
    pub token: AuthToken,
    pub location: Option<LocationScope>,
    /// Session id proposed by the asking party, if any
    pub session_id: Option<SessionId>,
    /// The asking party
    pub caller: Provenance,
}

impl AuthStartRequest {
    pub fn new(token: impl Into<AuthToken>) -> Self {
        Self {
            token: token.into(),
            location: None,
            session_id: None,
            caller: Provenance::None,
        }
    }

    #[must_use]
    pub fn at(mut self, location: LocationScope) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    #[must_use]
    pub fn from_caller(mut self, caller: Provenance) -> Self {
        self.caller = caller;
        self
    }
}

/// Request to authorize the stop of a running session.
#[derive(Debug, Clone)]
pub struct AuthStopRequest {
    pub session_id: SessionId,
    pub token: AuthToken,
    pub location: Option<LocationScope>,
    pub caller: Provenance,
}

impl AuthStopRequest {
    pub fn new(session_id: impl Into<SessionId>, token: impl Into<AuthToken>) -> Self {
        Self {
            session_id: session_id.into(),
            token: token.into(),
            location: None,
            caller: Provenance::None,
        }
    }

    #[must_use]
    pub fn from_caller(mut self, caller: Provenance) -> Self {
        self.caller = caller;
        self
    }
}

/// Port for deciding authorize-start / authorize-stop requests.
///
/// Negative decisions are results, not errors; `Err` is reserved for
/// violated preconditions.
#[async_trait]
pub trait AuthorizeStartStop: Send + Sync {
    fn authorizator_id(&self) -> &AuthorizatorId;

    async fn authorize_start(&self, request: AuthStartRequest) -> DomainResult<AuthStartResult>;

    async fn authorize_stop(&self, request: AuthStopRequest) -> DomainResult<AuthStopResult>;
}
