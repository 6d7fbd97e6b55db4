//! Flattening of location hierarchies into leaf EVSEs

use super::model::{ChargingPool, ChargingStation, ChargingStationOperator, Evse, RoamingNetwork};
use crate::domain::identifiers::OperatorId;

/// Leaf EVSE together with the operator that owns it
pub type OwnedEvse<'a> = (&'a OperatorId, &'a Evse);

/// Anything that contains EVSEs at some depth.
///
/// `evses()` walks operator → pool → station → EVSE in declaration order.
pub trait EvseHierarchy {
    fn evses(&self) -> Box<dyn Iterator<Item = &Evse> + '_>;

    /// Same walk as [`evses`](Self::evses), paired with the owning operator.
    ///
    /// From the operator level upwards the owner is the enclosing operator;
    /// below it the EVSE's own `operator_id` is the only owner known.
    fn owned_evses(&self) -> Box<dyn Iterator<Item = OwnedEvse<'_>> + '_> {
        Box::new(self.evses().map(|evse| (&evse.operator_id, evse)))
    }

    /// Granularity name used in logs.
    fn granularity(&self) -> &'static str;
}

impl EvseHierarchy for Evse {
    fn evses(&self) -> Box<dyn Iterator<Item = &Evse> + '_> {
        Box::new(std::iter::once(self))
    }

    fn granularity(&self) -> &'static str {
        "evse"
    }
}

impl EvseHierarchy for ChargingStation {
    fn evses(&self) -> Box<dyn Iterator<Item = &Evse> + '_> {
        Box::new(self.evses.iter())
    }

    fn granularity(&self) -> &'static str {
        "charging_station"
    }
}

impl EvseHierarchy for ChargingPool {
    fn evses(&self) -> Box<dyn Iterator<Item = &Evse> + '_> {
        Box::new(self.stations.iter().flat_map(|s| s.evses.iter()))
    }

    fn granularity(&self) -> &'static str {
        "charging_pool"
    }
}

impl EvseHierarchy for ChargingStationOperator {
    fn evses(&self) -> Box<dyn Iterator<Item = &Evse> + '_> {
        Box::new(self.pools.iter().flat_map(EvseHierarchy::evses))
    }

    fn owned_evses(&self) -> Box<dyn Iterator<Item = OwnedEvse<'_>> + '_> {
        Box::new(self.evses().map(move |evse| (&self.id, evse)))
    }

    fn granularity(&self) -> &'static str {
        "operator"
    }
}

impl EvseHierarchy for RoamingNetwork {
    fn evses(&self) -> Box<dyn Iterator<Item = &Evse> + '_> {
        Box::new(self.operators.iter().flat_map(EvseHierarchy::evses))
    }

    fn owned_evses(&self) -> Box<dyn Iterator<Item = OwnedEvse<'_>> + '_> {
        Box::new(self.operators.iter().flat_map(EvseHierarchy::owned_evses))
    }

    fn granularity(&self) -> &'static str {
        "roaming_network"
    }
}

impl<T: EvseHierarchy> EvseHierarchy for [T] {
    fn evses(&self) -> Box<dyn Iterator<Item = &Evse> + '_> {
        Box::new(self.iter().flat_map(EvseHierarchy::evses))
    }

    fn owned_evses(&self) -> Box<dyn Iterator<Item = OwnedEvse<'_>> + '_> {
        Box::new(self.iter().flat_map(EvseHierarchy::owned_evses))
    }

    fn granularity(&self) -> &'static str {
        self.first().map_or("empty", EvseHierarchy::granularity)
    }
}

impl<T: EvseHierarchy> EvseHierarchy for Vec<T> {
    fn evses(&self) -> Box<dyn Iterator<Item = &Evse> + '_> {
        self.as_slice().evses()
    }

    fn owned_evses(&self) -> Box<dyn Iterator<Item = OwnedEvse<'_>> + '_> {
        self.as_slice().owned_evses()
    }

    fn granularity(&self) -> &'static str {
        self.as_slice().granularity()
    }
}
