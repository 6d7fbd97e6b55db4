//! Fields carried only by authorize-start results

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::identifiers::{AuthToken, ChargingTariffId, ContractId};

/// Tariff announced to the EV driver together with a successful start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargingTariff {
    pub id: ChargingTariffId,
    /// Currency code (ISO 4217)
    pub currency: String,
    pub price_per_kwh: Decimal,
    pub price_per_minute: Decimal,
    /// Flat session start fee
    pub session_fee: Decimal,
}

impl ChargingTariff {
    pub fn per_kwh(
        id: impl Into<ChargingTariffId>,
        currency: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            currency: currency.into(),
            price_per_kwh: price,
            price_per_minute: Decimal::ZERO,
            session_fee: Decimal::ZERO,
        }
    }
}

/// Start-only result fields. Collections default to empty, never absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartDetails {
    pub contract_id: Option<ContractId>,
    /// Number printed on the RFID card
    pub printed_number: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub max_power_kw: Option<Decimal>,
    pub max_energy_kwh: Option<Decimal>,
    pub max_duration: Option<Duration>,
    pub charging_tariffs: Vec<ChargingTariff>,
    /// Tokens the EV may present later to stop the session
    pub auth_stop_tokens: BTreeSet<AuthToken>,
    /// PINs usable to stop the session
    pub auth_stop_pins: BTreeSet<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_details_have_empty_collections() {
        let details = StartDetails::default();
        assert!(details.charging_tariffs.is_empty());
        assert!(details.auth_stop_tokens.is_empty());
        assert!(details.auth_stop_pins.is_empty());
        assert!(details.contract_id.is_none());
    }

    #[test]
    fn per_kwh_has_no_time_component() {
        let tariff = ChargingTariff::per_kwh("T2", "EUR", Decimal::new(39, 2));
        assert_eq!(tariff.price_per_kwh, Decimal::new(39, 2));
        assert_eq!(tariff.price_per_minute, Decimal::ZERO);
        assert_eq!(tariff.session_fee, Decimal::ZERO);
    }
}
