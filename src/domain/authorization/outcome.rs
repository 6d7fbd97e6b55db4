//! Authorization outcome enumerations
//!
//! Variant names are wire identifiers: the `result` field of a serialized
//! result carries them verbatim, so they must never be renamed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::details::StartDetails;
use crate::shared::errors::DomainError;

/// Common contract of the start and stop outcome enumerations.
pub trait Outcome:
    Copy + Eq + fmt::Debug + fmt::Display + FromStr<Err = DomainError> + Send + Sync + 'static
{
    /// Fields only the results of this outcome family carry.
    type Details: Clone + Default + fmt::Debug + PartialEq + Send + Sync;

    /// Result family name used in logs, metrics and events.
    const KIND: &'static str;

    /// JSON-LD context of a standalone serialized result.
    const JSON_LD_CONTEXT: &'static str;

    /// Every tag of the enumeration, in declaration order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Canonical English description used when the producer supplies none.
    fn default_description(&self) -> &'static str;

    /// Transient failures must never be reused from a cache.
    fn is_cacheable(&self) -> bool;

    fn is_authorized(&self) -> bool;
}

/// Outcome of an authorize-start exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthStartOutcome {
    /// No usable answer; callers should ignore the result.
    Unspecified,
    /// The authorization service was disabled by its operator.
    AdminDown,
    UnknownLocation,
    InvalidToken,
    InvalidSessionId,
    /// The location is reserved for somebody else. Retryable later.
    Reserved,
    /// Retryable later.
    OutOfService,
    Authorized,
    NotAuthorized,
    Blocked,
    Expired,
    NoCredit,
    /// The backend hop timed out.
    CommunicationTimeout,
    /// The device hop timed out.
    StartChargingTimeout,
    RateLimitReached,
    Error,
}

impl Outcome for AuthStartOutcome {
    type Details = StartDetails;

    const KIND: &'static str = "AuthStartResult";
    const JSON_LD_CONTEXT: &'static str =
        "https://open.charging.cloud/contexts/wwcp+json/authStartResult";

    const ALL: &'static [Self] = &[
        Self::Unspecified,
        Self::AdminDown,
        Self::UnknownLocation,
        Self::InvalidToken,
        Self::InvalidSessionId,
        Self::Reserved,
        Self::OutOfService,
        Self::Authorized,
        Self::NotAuthorized,
        Self::Blocked,
        Self::Expired,
        Self::NoCredit,
        Self::CommunicationTimeout,
        Self::StartChargingTimeout,
        Self::RateLimitReached,
        Self::Error,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "Unspecified",
            Self::AdminDown => "AdminDown",
            Self::UnknownLocation => "UnknownLocation",
            Self::InvalidToken => "InvalidToken",
            Self::InvalidSessionId => "InvalidSessionId",
            Self::Reserved => "Reserved",
            Self::OutOfService => "OutOfService",
            Self::Authorized => "Authorized",
            Self::NotAuthorized => "NotAuthorized",
            Self::Blocked => "Blocked",
            Self::Expired => "Expired",
            Self::NoCredit => "NoCredit",
            Self::CommunicationTimeout => "CommunicationTimeout",
            Self::StartChargingTimeout => "StartChargingTimeout",
            Self::RateLimitReached => "RateLimitReached",
            Self::Error => "Error",
        }
    }

    fn default_description(&self) -> &'static str {
        match self {
            Self::Unspecified => UNSPECIFIED,
            Self::AdminDown => ADMIN_DOWN,
            Self::UnknownLocation => UNKNOWN_LOCATION,
            Self::InvalidToken => INVALID_TOKEN,
            Self::InvalidSessionId => INVALID_SESSION_ID,
            Self::Reserved => "The charging location is reserved!",
            Self::OutOfService => OUT_OF_SERVICE,
            Self::Authorized => AUTHORIZED,
            Self::NotAuthorized => NOT_AUTHORIZED,
            Self::Blocked => "Blocked!",
            Self::Expired => "Expired!",
            Self::NoCredit => "No credit!",
            Self::CommunicationTimeout => COMMUNICATION_TIMEOUT,
            Self::StartChargingTimeout => "Start charging timeout!",
            Self::RateLimitReached => RATE_LIMIT_REACHED,
            Self::Error => ERROR,
        }
    }

    fn is_cacheable(&self) -> bool {
        !matches!(
            self,
            Self::CommunicationTimeout
                | Self::StartChargingTimeout
                | Self::RateLimitReached
                | Self::Error
        )
    }

    fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// Outcome of an authorize-stop exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthStopOutcome {
    Unspecified,
    AdminDown,
    UnknownLocation,
    InvalidToken,
    InvalidSessionId,
    AlreadyStopped,
    OutOfService,
    Authorized,
    NotAuthorized,
    CommunicationTimeout,
    StopChargingTimeout,
    RateLimitReached,
    Error,
}

impl Outcome for AuthStopOutcome {
    type Details = ();

    const KIND: &'static str = "AuthStopResult";
    const JSON_LD_CONTEXT: &'static str =
        "https://open.charging.cloud/contexts/wwcp+json/authStopResult";

    const ALL: &'static [Self] = &[
        Self::Unspecified,
        Self::AdminDown,
        Self::UnknownLocation,
        Self::InvalidToken,
        Self::InvalidSessionId,
        Self::AlreadyStopped,
        Self::OutOfService,
        Self::Authorized,
        Self::NotAuthorized,
        Self::CommunicationTimeout,
        Self::StopChargingTimeout,
        Self::RateLimitReached,
        Self::Error,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "Unspecified",
            Self::AdminDown => "AdminDown",
            Self::UnknownLocation => "UnknownLocation",
            Self::InvalidToken => "InvalidToken",
            Self::InvalidSessionId => "InvalidSessionId",
            Self::AlreadyStopped => "AlreadyStopped",
            Self::OutOfService => "OutOfService",
            Self::Authorized => "Authorized",
            Self::NotAuthorized => "NotAuthorized",
            Self::CommunicationTimeout => "CommunicationTimeout",
            Self::StopChargingTimeout => "StopChargingTimeout",
            Self::RateLimitReached => "RateLimitReached",
            Self::Error => "Error",
        }
    }

    fn default_description(&self) -> &'static str {
        match self {
            Self::Unspecified => UNSPECIFIED,
            Self::AdminDown => ADMIN_DOWN,
            Self::UnknownLocation => UNKNOWN_LOCATION,
            Self::InvalidToken => INVALID_TOKEN,
            Self::InvalidSessionId => INVALID_SESSION_ID,
            Self::AlreadyStopped => "The charging session has already been stopped!",
            Self::OutOfService => OUT_OF_SERVICE,
            Self::Authorized => AUTHORIZED,
            Self::NotAuthorized => NOT_AUTHORIZED,
            Self::CommunicationTimeout => COMMUNICATION_TIMEOUT,
            Self::StopChargingTimeout => "Stop charging timeout!",
            Self::RateLimitReached => RATE_LIMIT_REACHED,
            Self::Error => ERROR,
        }
    }

    fn is_cacheable(&self) -> bool {
        !matches!(
            self,
            Self::CommunicationTimeout
                | Self::StopChargingTimeout
                | Self::RateLimitReached
                | Self::Error
        )
    }

    fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}

const UNSPECIFIED: &str = "Unspecified!";
const ADMIN_DOWN: &str = "The authorization service was disabled by the administrator!";
const UNKNOWN_LOCATION: &str = "The charging location is unknown!";
const INVALID_TOKEN: &str = "Invalid token!";
const INVALID_SESSION_ID: &str = "Invalid session identification!";
const OUT_OF_SERVICE: &str = "The charging location is out of service!";
const AUTHORIZED: &str = "Success!";
const NOT_AUTHORIZED: &str = "Not Authorized";
const COMMUNICATION_TIMEOUT: &str = "Communication timeout!";
const RATE_LIMIT_REACHED: &str = "Rate limit reached!";
const ERROR: &str = "Error!";

fn parse_outcome<O: Outcome>(s: &str) -> Result<O, DomainError> {
    O::ALL
        .iter()
        .copied()
        .find(|outcome| outcome.as_str() == s)
        .ok_or_else(|| DomainError::Validation(format!("Unknown {} outcome: {}", O::KIND, s)))
}

impl FromStr for AuthStartOutcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_outcome(s)
    }
}

impl FromStr for AuthStopOutcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_outcome(s)
    }
}

impl fmt::Display for AuthStartOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AuthStopOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_declared_variants() {
        for outcome in AuthStartOutcome::ALL {
            assert_eq!(outcome.as_str(), format!("{:?}", outcome));
            let json = serde_json::to_value(outcome).unwrap();
            assert_eq!(json, serde_json::json!(outcome.as_str()));
        }
        for outcome in AuthStopOutcome::ALL {
            assert_eq!(outcome.as_str(), format!("{:?}", outcome));
        }
    }

    #[test]
    fn parse_round_trips_every_tag() {
        for outcome in AuthStartOutcome::ALL {
            assert_eq!(outcome.as_str().parse::<AuthStartOutcome>(), Ok(*outcome));
        }
        for outcome in AuthStopOutcome::ALL {
            assert_eq!(outcome.as_str().parse::<AuthStopOutcome>(), Ok(*outcome));
        }
    }

    #[test]
    fn parse_rejects_unknown_and_wrong_family() {
        assert!("authorized".parse::<AuthStartOutcome>().is_err());
        assert!("AlreadyStopped".parse::<AuthStartOutcome>().is_err());
        assert!("Reserved".parse::<AuthStopOutcome>().is_err());
    }

    #[test]
    fn transient_outcomes_are_not_cacheable() {
        let start: Vec<_> = AuthStartOutcome::ALL
            .iter()
            .filter(|o| !o.is_cacheable())
            .collect();
        assert_eq!(
            start,
            [
                &AuthStartOutcome::CommunicationTimeout,
                &AuthStartOutcome::StartChargingTimeout,
                &AuthStartOutcome::RateLimitReached,
                &AuthStartOutcome::Error,
            ]
        );

        let stop: Vec<_> = AuthStopOutcome::ALL
            .iter()
            .filter(|o| !o.is_cacheable())
            .collect();
        assert_eq!(
            stop,
            [
                &AuthStopOutcome::CommunicationTimeout,
                &AuthStopOutcome::StopChargingTimeout,
                &AuthStopOutcome::RateLimitReached,
                &AuthStopOutcome::Error,
            ]
        );
    }

    #[test]
    fn every_outcome_has_a_distinct_default_description() {
        let mut seen = std::collections::HashSet::new();
        for outcome in AuthStartOutcome::ALL {
            assert!(seen.insert(outcome.default_description()));
        }
        assert!(AuthStopOutcome::ALL
            .iter()
            .all(|o| !o.default_description().is_empty()));
    }

    #[test]
    fn only_authorized_is_authorized() {
        assert!(AuthStartOutcome::Authorized.is_authorized());
        assert!(!AuthStartOutcome::Reserved.is_authorized());
        assert!(AuthStopOutcome::Authorized.is_authorized());
        assert!(!AuthStopOutcome::AlreadyStopped.is_authorized());
    }
}
