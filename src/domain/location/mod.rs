//! Charging location hierarchy

pub mod hierarchy;
pub mod model;

pub use hierarchy::{EvseHierarchy, OwnedEvse};
pub use model::{
    ChargingPool, ChargingStation, ChargingStationOperator, Evse, EvseStatus, EvseStatusUpdate,
    RoamingNetwork,
};
