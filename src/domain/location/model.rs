//! Charging location entities
//!
//! Roaming network → operator → pool → station → EVSE. Only the fields the
//! push fan-out needs are modelled.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::identifiers::{
    ChargingPoolId, ChargingStationId, EvseId, OperatorId, RoamingNetworkId,
};

/// EVSE status as published towards navigation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvseStatus {
    Available,
    Reserved,
    Charging,
    OutOfService,
    Offline,
    #[default]
    Unknown,
}

impl std::fmt::Display for EvseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "Available"),
            Self::Reserved => write!(f, "Reserved"),
            Self::Charging => write!(f, "Charging"),
            Self::OutOfService => write!(f, "OutOfService"),
            Self::Offline => write!(f, "Offline"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

impl From<&str> for EvseStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "available" => Self::Available,
            "reserved" => Self::Reserved,
            "charging" => Self::Charging,
            "outofservice" => Self::OutOfService,
            "offline" => Self::Offline,
            _ => Self::Unknown,
        }
    }
}

/// Leaf unit: one charging point a vehicle can connect to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evse {
    pub id: EvseId,
    /// Owning operator. May be left out inside an operator hierarchy, where
    /// the enclosing operator is the owner.
    #[serde(default)]
    pub operator_id: OperatorId,
    #[serde(default)]
    pub status: EvseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_power_kw: Option<Decimal>,
}

impl Evse {
    pub fn new(id: impl Into<EvseId>, operator_id: impl Into<OperatorId>) -> Self {
        Self {
            id: id.into(),
            operator_id: operator_id.into(),
            status: EvseStatus::default(),
            max_power_kw: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: EvseStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_max_power_kw(mut self, max_power_kw: Decimal) -> Self {
        self.max_power_kw = Some(max_power_kw);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargingStation {
    pub id: ChargingStationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub evses: Vec<Evse>,
}

impl ChargingStation {
    pub fn new(id: impl Into<ChargingStationId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            evses: Vec::new(),
        }
    }

    /// Add an EVSE. Returns false if one with the same id already exists.
    pub fn add_evse(&mut self, evse: Evse) -> bool {
        if self.get_evse(&evse.id).is_some() {
            return false;
        }
        self.evses.push(evse);
        true
    }

    pub fn get_evse(&self, id: &EvseId) -> Option<&Evse> {
        self.evses.iter().find(|e| &e.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargingPool {
    pub id: ChargingPoolId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub stations: Vec<ChargingStation>,
}

impl ChargingPool {
    pub fn new(id: impl Into<ChargingPoolId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            stations: Vec::new(),
        }
    }

    pub fn add_station(&mut self, station: ChargingStation) {
        self.stations.push(station);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargingStationOperator {
    pub id: OperatorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub pools: Vec<ChargingPool>,
}

impl ChargingStationOperator {
    pub fn new(id: impl Into<OperatorId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            pools: Vec::new(),
        }
    }

    pub fn add_pool(&mut self, pool: ChargingPool) {
        self.pools.push(pool);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoamingNetwork {
    pub id: RoamingNetworkId,
    #[serde(default)]
    pub operators: Vec<ChargingStationOperator>,
}

impl RoamingNetwork {
    pub fn new(id: impl Into<RoamingNetworkId>) -> Self {
        Self {
            id: id.into(),
            operators: Vec::new(),
        }
    }

    pub fn add_operator(&mut self, operator: ChargingStationOperator) {
        self.operators.push(operator);
    }

    pub fn get_operator(&self, id: &OperatorId) -> Option<&ChargingStationOperator> {
        self.operators.iter().find(|o| &o.id == id)
    }
}

/// Status change of one EVSE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvseStatusUpdate {
    pub evse_id: EvseId,
    pub operator_id: OperatorId,
    pub old_status: EvseStatus,
    pub new_status: EvseStatus,
    pub timestamp: DateTime<Utc>,
}

impl EvseStatusUpdate {
    /// Update from the EVSE's current status to `new_status`.
    pub fn for_evse(evse: &Evse, new_status: EvseStatus) -> Self {
        Self {
            evse_id: evse.id.clone(),
            operator_id: evse.operator_id.clone(),
            old_status: evse.status,
            new_status,
            timestamp: Utc::now(),
        }
    }
}
