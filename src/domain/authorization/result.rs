//! Authorization result value object
//!
//! One generic, immutable result type covers authorize-start and
//! authorize-stop at every location granularity. Results are only created
//! through the per-outcome factories below, which pin the outcome tag; the
//! returned [`AuthResultBuilder`] accepts the optional fields and validates
//! the authorizator id on [`build`](AuthResultBuilder::build).
//!
//! ```ignore
//! let result = AuthStartResult::authorized("DE*ABC", Provenance::Granter("DE-XYZ".into()))
//!     .session_id("S1")
//!     .provider_id("DE-XYZ")
//!     .build()?;
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use super::details::ChargingTariff;
use super::outcome::{AuthStartOutcome, AuthStopOutcome, Outcome};
use crate::domain::i18n::I18nString;
use crate::domain::identifiers::{
    AuthToken, AuthorizatorId, ChargingPoolId, ChargingStationId, ContractId,
    EmpPartnerSessionId, EvseId, OperatorId, PartyId, ProviderId, RoamingNetworkId, SessionId,
};
use crate::shared::errors::{DomainError, DomainResult};

/// Which side of the exchange produced the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Provenance {
    /// The party that requested the authorization
    Asker(PartyId),
    /// The party that granted or denied it
    Granter(PartyId),
    /// Results made up for caching or defaults
    #[default]
    None,
}

impl Provenance {
    pub fn party_id(&self) -> Option<&PartyId> {
        match self {
            Self::Asker(id) | Self::Granter(id) => Some(id),
            Self::None => None,
        }
    }
}

/// Granularity the authorization was requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationScope {
    RoamingNetwork(RoamingNetworkId),
    Operator(OperatorId),
    ChargingPool(ChargingPoolId),
    ChargingStation(ChargingStationId),
    Evse(EvseId),
}

impl LocationScope {
    pub fn granularity(&self) -> &'static str {
        match self {
            Self::RoamingNetwork(_) => "roaming_network",
            Self::Operator(_) => "operator",
            Self::ChargingPool(_) => "charging_pool",
            Self::ChargingStation(_) => "charging_station",
            Self::Evse(_) => "evse",
        }
    }
}

/// Terminal outcome of one authorize-start or authorize-stop exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationResult<O: Outcome> {
    authorizator_id: AuthorizatorId,
    outcome: O,
    provenance: Provenance,
    location: Option<LocationScope>,
    session_id: Option<SessionId>,
    emp_partner_session_id: Option<EmpPartnerSessionId>,
    provider_id: Option<ProviderId>,
    description: I18nString,
    additional_info: I18nString,
    cached_result_end_of_life: Option<DateTime<Utc>>,
    number_of_retries: u8,
    runtime: Option<Duration>,
    details: O::Details,
}

pub type AuthStartResult = AuthorizationResult<AuthStartOutcome>;
pub type AuthStopResult = AuthorizationResult<AuthStopOutcome>;

impl<O: Outcome> AuthorizationResult<O> {
    pub fn authorizator_id(&self) -> &AuthorizatorId {
        &self.authorizator_id
    }

    pub fn outcome(&self) -> O {
        self.outcome
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn location(&self) -> Option<&LocationScope> {
        self.location.as_ref()
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn emp_partner_session_id(&self) -> Option<&EmpPartnerSessionId> {
        self.emp_partner_session_id.as_ref()
    }

    pub fn provider_id(&self) -> Option<&ProviderId> {
        self.provider_id.as_ref()
    }

    pub fn description(&self) -> &I18nString {
        &self.description
    }

    pub fn additional_info(&self) -> &I18nString {
        &self.additional_info
    }

    pub fn cached_result_end_of_life(&self) -> Option<DateTime<Utc>> {
        self.cached_result_end_of_life
    }

    pub fn number_of_retries(&self) -> u8 {
        self.number_of_retries
    }

    pub fn runtime(&self) -> Option<Duration> {
        self.runtime
    }

    pub fn details(&self) -> &O::Details {
        &self.details
    }

    pub fn is_authorized(&self) -> bool {
        self.outcome.is_authorized()
    }

    /// `end_of_life - now`; negative once the end of life has passed.
    pub fn cached_result_remaining_lifetime_at(
        &self,
        now: DateTime<Utc>,
    ) -> Option<chrono::Duration> {
        self.cached_result_end_of_life.map(|eol| eol - now)
    }

    pub fn cached_result_remaining_lifetime(&self) -> Option<chrono::Duration> {
        self.cached_result_remaining_lifetime_at(Utc::now())
    }

    /// Whether the result may still be served from a cache at `now`.
    pub fn is_cache_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.cached_result_remaining_lifetime_at(now)
            .is_some_and(|remaining| remaining > chrono::Duration::zero())
    }
}

impl AuthStartResult {
    pub fn contract_id(&self) -> Option<&ContractId> {
        self.details.contract_id.as_ref()
    }

    pub fn charging_tariffs(&self) -> &[ChargingTariff] {
        &self.details.charging_tariffs
    }

    pub fn auth_stop_tokens(&self) -> &BTreeSet<AuthToken> {
        &self.details.auth_stop_tokens
    }

    pub fn auth_stop_pins(&self) -> &BTreeSet<u32> {
        &self.details.auth_stop_pins
    }
}

impl<O: Outcome> fmt::Display for AuthorizationResult<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} by {}", O::KIND, self.outcome, self.authorizator_id)?;
        if let Some(session_id) = &self.session_id {
            write!(f, " (session {})", session_id)?;
        }
        Ok(())
    }
}

// ── Builder ────────────────────────────────────────────────────

/// Collects the optional fields of a result whose outcome is already fixed.
#[derive(Debug, Clone)]
#[must_use]
pub struct AuthResultBuilder<O: Outcome> {
    authorizator_id: AuthorizatorId,
    outcome: O,
    provenance: Provenance,
    location: Option<LocationScope>,
    session_id: Option<SessionId>,
    emp_partner_session_id: Option<EmpPartnerSessionId>,
    provider_id: Option<ProviderId>,
    description: Option<I18nString>,
    additional_info: Option<I18nString>,
    cache_until: Option<DateTime<Utc>>,
    number_of_retries: u8,
    runtime: Option<Duration>,
    details: O::Details,
}

impl<O: Outcome> AuthResultBuilder<O> {
    fn new(outcome: O, authorizator_id: AuthorizatorId, provenance: Provenance) -> Self {
        Self {
            authorizator_id,
            outcome,
            provenance,
            location: None,
            session_id: None,
            emp_partner_session_id: None,
            provider_id: None,
            description: None,
            additional_info: None,
            cache_until: None,
            number_of_retries: 0,
            runtime: None,
            details: Default::default(),
        }
    }

    pub fn outcome(&self) -> O {
        self.outcome
    }

    pub fn location(mut self, location: LocationScope) -> Self {
        self.location = Some(location);
        self
    }

    pub fn session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn emp_partner_session_id(mut self, id: impl Into<EmpPartnerSessionId>) -> Self {
        self.emp_partner_session_id = Some(id.into());
        self
    }

    pub fn provider_id(mut self, provider_id: impl Into<ProviderId>) -> Self {
        self.provider_id = Some(provider_id.into());
        self
    }

    pub fn provider_id_opt(mut self, provider_id: Option<ProviderId>) -> Self {
        self.provider_id = provider_id;
        self
    }

    pub fn description(mut self, description: impl Into<I18nString>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn additional_info(mut self, info: impl Into<I18nString>) -> Self {
        self.additional_info = Some(info.into());
        self
    }

    /// Ignored for outcomes that must not be cached.
    pub fn cache_until(mut self, end_of_life: DateTime<Utc>) -> Self {
        self.cache_until = Some(end_of_life);
        self
    }

    pub fn number_of_retries(mut self, retries: u8) -> Self {
        self.number_of_retries = retries;
        self
    }

    pub fn runtime(mut self, runtime: Duration) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Finish the result.
    ///
    /// # Errors
    /// [`DomainError::EmptyIdentifier`] when the authorizator id is empty.
    pub fn build(self) -> DomainResult<AuthorizationResult<O>> {
        if self.authorizator_id.is_empty() {
            return Err(DomainError::EmptyIdentifier {
                kind: "AuthorizatorId",
            });
        }

        let description = match self.description {
            Some(description) if !description.is_empty() => description,
            _ => I18nString::en(self.outcome.default_description()),
        };

        let cached_result_end_of_life = if self.outcome.is_cacheable() {
            self.cache_until
        } else {
            if self.cache_until.is_some() {
                debug!(
                    kind = O::KIND,
                    outcome = self.outcome.as_str(),
                    "Dropping cache lifetime of non-cacheable result"
                );
            }
            None
        };

        Ok(AuthorizationResult {
            authorizator_id: self.authorizator_id,
            outcome: self.outcome,
            provenance: self.provenance,
            location: self.location,
            session_id: self.session_id,
            emp_partner_session_id: self.emp_partner_session_id,
            provider_id: self.provider_id,
            description,
            additional_info: self.additional_info.unwrap_or_default(),
            cached_result_end_of_life,
            number_of_retries: self.number_of_retries,
            runtime: self.runtime,
            details: self.details,
        })
    }
}

impl AuthResultBuilder<AuthStartOutcome> {
    pub fn contract_id(mut self, contract_id: impl Into<ContractId>) -> Self {
        self.details.contract_id = Some(contract_id.into());
        self
    }

    pub fn printed_number(mut self, printed_number: impl Into<String>) -> Self {
        self.details.printed_number = Some(printed_number.into());
        self
    }

    pub fn expiry_date(mut self, expiry_date: DateTime<Utc>) -> Self {
        self.details.expiry_date = Some(expiry_date);
        self
    }

    pub fn max_power_kw(mut self, max_power_kw: Decimal) -> Self {
        self.details.max_power_kw = Some(max_power_kw);
        self
    }

    pub fn max_energy_kwh(mut self, max_energy_kwh: Decimal) -> Self {
        self.details.max_energy_kwh = Some(max_energy_kwh);
        self
    }

    pub fn max_duration(mut self, max_duration: Duration) -> Self {
        self.details.max_duration = Some(max_duration);
        self
    }

    pub fn charging_tariffs(mut self, tariffs: impl IntoIterator<Item = ChargingTariff>) -> Self {
        self.details.charging_tariffs = tariffs.into_iter().collect();
        self
    }

    pub fn auth_stop_tokens<T: Into<AuthToken>>(
        mut self,
        tokens: impl IntoIterator<Item = T>,
    ) -> Self {
        self.details.auth_stop_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn auth_stop_pins(mut self, pins: impl IntoIterator<Item = u32>) -> Self {
        self.details.auth_stop_pins = pins.into_iter().collect();
        self
    }
}

// ── Factories ──────────────────────────────────────────────────

macro_rules! outcome_factories {
    ($outcome:ident { $( $(#[$doc:meta])* $name:ident => $variant:ident, )* }) => {
        impl AuthorizationResult<$outcome> {
            $(
                $(#[$doc])*
                pub fn $name(
                    authorizator_id: impl Into<AuthorizatorId>,
                    provenance: Provenance,
                ) -> AuthResultBuilder<$outcome> {
                    AuthResultBuilder::new($outcome::$variant, authorizator_id.into(), provenance)
                }
            )*
        }
    };
}

outcome_factories!(AuthStartOutcome {
    /// Treat as "ignore"; no provider or session guarantees.
    unspecified => Unspecified,
    admin_down => AdminDown,
    unknown_location => UnknownLocation,
    invalid_token => InvalidToken,
    invalid_session_id => InvalidSessionId,
    reserved => Reserved,
    out_of_service => OutOfService,
    /// The only start outcome expected to carry tariffs and stop tokens.
    authorized => Authorized,
    not_authorized => NotAuthorized,
    blocked => Blocked,
    expired => Expired,
    no_credit => NoCredit,
    communication_timeout => CommunicationTimeout,
    start_charging_timeout => StartChargingTimeout,
    rate_limit_reached => RateLimitReached,
    /// The description carries the error detail.
    error => Error,
});

outcome_factories!(AuthStopOutcome {
    unspecified => Unspecified,
    admin_down => AdminDown,
    unknown_location => UnknownLocation,
    invalid_token => InvalidToken,
    invalid_session_id => InvalidSessionId,
    already_stopped => AlreadyStopped,
    out_of_service => OutOfService,
    authorized => Authorized,
    not_authorized => NotAuthorized,
    communication_timeout => CommunicationTimeout,
    stop_charging_timeout => StopChargingTimeout,
    rate_limit_reached => RateLimitReached,
    error => Error,
});

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    type StartFactory = fn(AuthorizatorId, Provenance) -> AuthResultBuilder<AuthStartOutcome>;
    type StopFactory = fn(AuthorizatorId, Provenance) -> AuthResultBuilder<AuthStopOutcome>;

    fn start_factories() -> Vec<(AuthStartOutcome, StartFactory)> {
        vec![
            (AuthStartOutcome::Unspecified, AuthStartResult::unspecified),
            (AuthStartOutcome::AdminDown, AuthStartResult::admin_down),
            (AuthStartOutcome::UnknownLocation, AuthStartResult::unknown_location),
            (AuthStartOutcome::InvalidToken, AuthStartResult::invalid_token),
            (AuthStartOutcome::InvalidSessionId, AuthStartResult::invalid_session_id),
            (AuthStartOutcome::Reserved, AuthStartResult::reserved),
            (AuthStartOutcome::OutOfService, AuthStartResult::out_of_service),
            (AuthStartOutcome::Authorized, AuthStartResult::authorized),
            (AuthStartOutcome::NotAuthorized, AuthStartResult::not_authorized),
            (AuthStartOutcome::Blocked, AuthStartResult::blocked),
            (AuthStartOutcome::Expired, AuthStartResult::expired),
            (AuthStartOutcome::NoCredit, AuthStartResult::no_credit),
            (AuthStartOutcome::CommunicationTimeout, AuthStartResult::communication_timeout),
            (AuthStartOutcome::StartChargingTimeout, AuthStartResult::start_charging_timeout),
            (AuthStartOutcome::RateLimitReached, AuthStartResult::rate_limit_reached),
            (AuthStartOutcome::Error, AuthStartResult::error),
        ]
    }

    fn stop_factories() -> Vec<(AuthStopOutcome, StopFactory)> {
        vec![
            (AuthStopOutcome::Unspecified, AuthStopResult::unspecified),
            (AuthStopOutcome::AdminDown, AuthStopResult::admin_down),
            (AuthStopOutcome::UnknownLocation, AuthStopResult::unknown_location),
            (AuthStopOutcome::InvalidToken, AuthStopResult::invalid_token),
            (AuthStopOutcome::InvalidSessionId, AuthStopResult::invalid_session_id),
            (AuthStopOutcome::AlreadyStopped, AuthStopResult::already_stopped),
            (AuthStopOutcome::OutOfService, AuthStopResult::out_of_service),
            (AuthStopOutcome::Authorized, AuthStopResult::authorized),
            (AuthStopOutcome::NotAuthorized, AuthStopResult::not_authorized),
            (AuthStopOutcome::CommunicationTimeout, AuthStopResult::communication_timeout),
            (AuthStopOutcome::StopChargingTimeout, AuthStopResult::stop_charging_timeout),
            (AuthStopOutcome::RateLimitReached, AuthStopResult::rate_limit_reached),
            (AuthStopOutcome::Error, AuthStopResult::error),
        ]
    }

    fn asker() -> Provenance {
        Provenance::Asker(PartyId::from("CSO-1"))
    }

    #[test]
    fn factories_cover_every_outcome() {
        assert_eq!(start_factories().len(), AuthStartOutcome::ALL.len());
        assert_eq!(stop_factories().len(), AuthStopOutcome::ALL.len());
    }

    #[test]
    fn every_factory_pins_its_outcome_and_authorizator() {
        for (outcome, factory) in start_factories() {
            let result = factory("DE*ABC".into(), asker()).build().unwrap();
            assert_eq!(result.outcome(), outcome);
            assert_eq!(result.authorizator_id().as_str(), "DE*ABC");
            assert_eq!(result.provenance(), &asker());
        }
        for (outcome, factory) in stop_factories() {
            let result = factory("DE*ABC".into(), asker()).build().unwrap();
            assert_eq!(result.outcome(), outcome);
            assert_eq!(result.authorizator_id().as_str(), "DE*ABC");
        }
    }

    #[test]
    fn every_factory_rejects_empty_authorizator_id() {
        let expected = DomainError::EmptyIdentifier {
            kind: "AuthorizatorId",
        };
        for (_, factory) in start_factories() {
            assert_eq!(factory("".into(), asker()).build().unwrap_err(), expected);
            assert_eq!(factory(" ".into(), Provenance::None).build().unwrap_err(), expected);
        }
        for (_, factory) in stop_factories() {
            assert_eq!(factory("".into(), asker()).build().unwrap_err(), expected);
        }
    }

    #[test]
    fn non_cacheable_outcomes_drop_cache_lifetime() {
        let eol = Utc::now() + ChronoDuration::minutes(5);
        for (outcome, factory) in start_factories() {
            let result = factory("DE*ABC".into(), asker())
                .cache_until(eol)
                .build()
                .unwrap();
            if outcome.is_cacheable() {
                assert_eq!(result.cached_result_end_of_life(), Some(eol));
            } else {
                assert_eq!(result.cached_result_end_of_life(), None, "{}", outcome);
                assert_eq!(result.cached_result_remaining_lifetime(), None);
            }
        }
        for (outcome, factory) in stop_factories() {
            let result = factory("DE*ABC".into(), asker())
                .cache_until(eol)
                .build()
                .unwrap();
            assert_eq!(
                result.cached_result_end_of_life().is_some(),
                outcome.is_cacheable()
            );
        }
    }

    #[test]
    fn default_descriptions_are_exact() {
        let expected = [
            (AuthStartOutcome::Unspecified, "Unspecified!"),
            (
                AuthStartOutcome::AdminDown,
                "The authorization service was disabled by the administrator!",
            ),
            (AuthStartOutcome::UnknownLocation, "The charging location is unknown!"),
            (AuthStartOutcome::InvalidToken, "Invalid token!"),
            (AuthStartOutcome::InvalidSessionId, "Invalid session identification!"),
            (AuthStartOutcome::Reserved, "The charging location is reserved!"),
            (AuthStartOutcome::OutOfService, "The charging location is out of service!"),
            (AuthStartOutcome::Authorized, "Success!"),
            (AuthStartOutcome::NotAuthorized, "Not Authorized"),
            (AuthStartOutcome::Blocked, "Blocked!"),
            (AuthStartOutcome::Expired, "Expired!"),
            (AuthStartOutcome::NoCredit, "No credit!"),
            (AuthStartOutcome::CommunicationTimeout, "Communication timeout!"),
            (AuthStartOutcome::StartChargingTimeout, "Start charging timeout!"),
            (AuthStartOutcome::RateLimitReached, "Rate limit reached!"),
            (AuthStartOutcome::Error, "Error!"),
        ];
        let factories = start_factories();
        for (outcome, text) in expected {
            let (_, factory) = factories.iter().find(|(o, _)| *o == outcome).unwrap();
            let result = factory("DE*ABC".into(), asker()).build().unwrap();
            assert_eq!(result.description(), &I18nString::en(text));
        }

        let stopped = AuthStopResult::already_stopped("DE*ABC", asker()).build().unwrap();
        assert_eq!(
            stopped.description().first_text(),
            Some("The charging session has already been stopped!")
        );
        let timeout = AuthStopResult::stop_charging_timeout("DE*ABC", asker())
            .build()
            .unwrap();
        assert_eq!(timeout.description().first_text(), Some("Stop charging timeout!"));
    }

    #[test]
    fn caller_description_wins_and_blank_falls_back() {
        let error = AuthStartResult::error("DE*ABC", asker())
            .description("Backend returned HTTP 500")
            .build()
            .unwrap();
        assert_eq!(error.description().first_text(), Some("Backend returned HTTP 500"));

        let blank = AuthStartResult::blocked("DE*ABC", asker())
            .description("")
            .build()
            .unwrap();
        assert_eq!(blank.description().first_text(), Some("Blocked!"));
    }

    #[test]
    fn additional_info_defaults_to_empty() {
        let result = AuthStopResult::authorized("DE*ABC", asker()).build().unwrap();
        assert!(result.additional_info().is_empty());
    }

    #[test]
    fn authorized_example() {
        let result = AuthStartResult::authorized("DE*ABC", asker())
            .session_id("S1")
            .provider_id("DE-XYZ")
            .build()
            .unwrap();

        assert_eq!(result.outcome(), AuthStartOutcome::Authorized);
        assert_eq!(result.session_id(), Some(&SessionId::from("S1")));
        assert_eq!(result.provider_id(), Some(&ProviderId::from("DE-XYZ")));
        assert_eq!(result.description().first_text(), Some("Success!"));
        assert_eq!(result.cached_result_end_of_life(), None);
        assert!(result.charging_tariffs().is_empty());
        assert!(result.auth_stop_tokens().is_empty());
        assert!(result.auth_stop_pins().is_empty());
        assert!(result.is_authorized());
    }

    #[test]
    fn authorized_carries_start_details() {
        let tariff = ChargingTariff::per_kwh("T1", "EUR", Decimal::new(39, 2));
        let result = AuthStartResult::authorized("DE*ABC", Provenance::Granter("EMP".into()))
            .contract_id("DE-XYZ-C12345678-X")
            .printed_number("1234")
            .max_power_kw(Decimal::from(22))
            .max_energy_kwh(Decimal::from(40))
            .max_duration(Duration::from_secs(4 * 3600))
            .charging_tariffs(vec![tariff.clone()])
            .auth_stop_tokens(["AABBCCDD", "11223344"])
            .auth_stop_pins([1234, 9876])
            .build()
            .unwrap();

        assert_eq!(
            result.contract_id(),
            Some(&ContractId::from("DE-XYZ-C12345678-X"))
        );
        assert_eq!(result.details().max_power_kw, Some(Decimal::from(22)));
        assert_eq!(result.details().printed_number.as_deref(), Some("1234"));
        assert_eq!(result.charging_tariffs(), &[tariff]);
        assert!(result.auth_stop_tokens().contains(&AuthToken::from("AABBCCDD")));
        assert_eq!(result.auth_stop_pins().len(), 2);
    }

    #[test]
    fn looseness_is_not_validated() {
        // Optional fields outside the outcome's meaningful set are kept.
        let result = AuthStartResult::blocked("DE*ABC", asker())
            .charging_tariffs(vec![ChargingTariff::per_kwh("T1", "EUR", Decimal::ONE)])
            .session_id("S9")
            .build()
            .unwrap();
        assert_eq!(result.charging_tariffs().len(), 1);
        assert_eq!(result.session_id(), Some(&SessionId::from("S9")));
    }

    #[test]
    fn remaining_lifetime_is_end_of_life_minus_now() {
        let now = Utc::now();
        let eol = now + ChronoDuration::seconds(90);
        let result = AuthStartResult::authorized("DE*ABC", asker())
            .cache_until(eol)
            .build()
            .unwrap();
        assert_eq!(
            result.cached_result_remaining_lifetime_at(now),
            Some(ChronoDuration::seconds(90))
        );
        assert!(result.is_cache_valid_at(now));
    }

    #[test]
    fn remaining_lifetime_goes_negative_when_expired() {
        let now = Utc::now();
        let result = AuthStartResult::not_authorized("DE*ABC", asker())
            .cache_until(now - ChronoDuration::seconds(30))
            .build()
            .unwrap();
        assert_eq!(
            result.cached_result_remaining_lifetime_at(now),
            Some(ChronoDuration::seconds(-30))
        );
        assert!(!result.is_cache_valid_at(now));
    }

    #[test]
    fn remaining_lifetime_absent_without_end_of_life() {
        let result = AuthStartResult::reserved("DE*ABC", asker()).build().unwrap();
        assert_eq!(result.cached_result_remaining_lifetime(), None);
        assert!(!result.is_cache_valid_at(Utc::now()));
    }

    #[test]
    fn metadata_fields_are_kept() {
        let result = AuthStopResult::authorized("DE*ABC", Provenance::None)
            .location(LocationScope::Evse("DE*GEF*E1*1".into()))
            .emp_partner_session_id("EMP-S1")
            .number_of_retries(2)
            .runtime(Duration::from_millis(120))
            .additional_info(I18nString::create("de", "Gestoppt"))
            .build()
            .unwrap();

        assert_eq!(result.location().map(LocationScope::granularity), Some("evse"));
        assert_eq!(
            result.emp_partner_session_id(),
            Some(&EmpPartnerSessionId::from("EMP-S1"))
        );
        assert_eq!(result.number_of_retries(), 2);
        assert_eq!(result.runtime(), Some(Duration::from_millis(120)));
        assert_eq!(result.additional_info().get("de"), Some("Gestoppt"));
        assert_eq!(result.provenance().party_id(), None);
    }

    #[test]
    fn display_names_kind_outcome_and_session() {
        let result = AuthStopResult::already_stopped("DE*ABC", asker())
            .session_id("S1")
            .build()
            .unwrap();
        assert_eq!(
            result.to_string(),
            "AuthStopResult AlreadyStopped by DE*ABC (session S1)"
        );
    }
}
