//! Opaque identifiers
//!
//! Every identifier is a plain string wrapper. Parsing the country-code and
//! suffix grammar of e-mobility identifiers is left to the caller; the
//! wrappers only keep the different kinds of ids apart at compile time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::errors::{DomainError, DomainResult};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identity of whoever computed an authorization result.
    AuthorizatorId
);
string_id!(
    /// Charging session correlation id.
    SessionId
);
string_id!(
    /// Session id assigned by the e-mobility provider's backend.
    EmpPartnerSessionId
);
string_id!(
    /// E-mobility (service) provider id, e.g. `DE-XYZ`.
    ProviderId
);
string_id!(ContractId);
string_id!(
    /// Authentication token presented by the EV driver (RFID uid, app token).
    AuthToken
);
string_id!(
    /// Asking or granting party of an authorization exchange.
    PartyId
);
string_id!(
    /// Charging station operator id, e.g. `DE*GEF`.
    OperatorId
);
string_id!(ChargingPoolId);
string_id!(ChargingStationId);
string_id!(EvseId);
string_id!(RoamingNetworkId);
string_id!(NavigationProviderId);
string_id!(ChargingTariffId);

impl AuthorizatorId {
    /// Validating constructor: empty or blank ids are a precondition violation.
    pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
        let id = Self::new(value);
        if id.is_empty() {
            return Err(DomainError::EmptyIdentifier {
                kind: "AuthorizatorId",
            });
        }
        Ok(id)
    }
}

impl SessionId {
    /// Fresh session id backed by a random UUID.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}
