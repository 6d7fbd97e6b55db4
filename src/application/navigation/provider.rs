//! Navigation provider: pushes charging location data and EVSE status to a
//! remote partner.
//!
//! Whatever granularity the caller hands in (a single EVSE up to a whole
//! roaming network) is flattened to leaf EVSEs, filtered, grouped by owning
//! operator and sent as one batched request.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::application::events::{Event, PushCompletedEvent, PushRequestedEvent, SharedEventBus};
use crate::config::NavigationProviderConfig;
use crate::domain::{
    ChargingPool, ChargingStation, ChargingStationOperator, Evse, EvseHierarchy,
    EvseStatusUpdate, NavigationProviderId, OperatorId, PushAcknowledgement, PushAction,
    PushEvseDataRequest, PushEvseStatusRequest, PushOptions, RemotePushTarget, RoamingNetwork,
};

/// Optional predicate deciding which EVSEs take part in a push.
pub type EvseFilter<'a> = &'a (dyn Fn(&Evse) -> bool + Send + Sync);

/// Optional predicate deciding which status updates take part in a push.
pub type StatusFilter<'a> = &'a (dyn Fn(&EvseStatusUpdate) -> bool + Send + Sync);

pub type SharedRemotePushTarget = Arc<dyn RemotePushTarget>;

/// Record push latency and outcome.
fn record_push(operation: &'static str, ack: &PushAcknowledgement, start: Instant) {
    let duration = start.elapsed().as_secs_f64();
    metrics::histogram!("wwcp_push_duration_seconds", "operation" => operation).record(duration);
    metrics::counter!(
        "wwcp_push_requests_total",
        "operation" => operation,
        "outcome" => ack.outcome.as_str()
    )
    .increment(1);
}

fn runtime_ms(runtime: Duration) -> u64 {
    u64::try_from(runtime.as_millis()).unwrap_or(u64::MAX)
}

pub struct NavigationProvider {
    id: NavigationProviderId,
    name: String,
    remote: Option<SharedRemotePushTarget>,
    disable_push_data: bool,
    disable_push_status: bool,
    request_timeout: Option<Duration>,
    event_bus: Option<SharedEventBus>,
}

impl NavigationProvider {
    pub fn new(id: impl Into<NavigationProviderId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            remote: None,
            disable_push_data: false,
            disable_push_status: false,
            request_timeout: None,
            event_bus: None,
        }
    }

    pub fn from_config(config: &NavigationProviderConfig) -> Self {
        let mut provider = Self::new(config.id.as_str(), config.name.as_str());
        provider.disable_push_data = config.disable_push_data;
        provider.disable_push_status = config.disable_push_status;
        provider.request_timeout = config.request_timeout_secs.map(Duration::from_secs);
        provider
    }

    #[must_use]
    pub fn with_remote(mut self, remote: SharedRemotePushTarget) -> Self {
        self.remote = Some(remote);
        self
    }

    #[must_use]
    pub fn with_event_bus(mut self, event_bus: SharedEventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    #[must_use]
    pub fn with_push_data_disabled(mut self, disabled: bool) -> Self {
        self.disable_push_data = disabled;
        self
    }

    #[must_use]
    pub fn with_push_status_disabled(mut self, disabled: bool) -> Self {
        self.disable_push_status = disabled;
        self
    }

    pub fn id(&self) -> &NavigationProviderId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    // ─── EVSE data ─────────────────────────────────────────────────────

    pub async fn push_evse(
        &self,
        evse: &Evse,
        action: PushAction,
        filter: Option<EvseFilter<'_>>,
        options: PushOptions,
    ) -> PushAcknowledgement {
        self.push_evse_data(evse, action, filter, options).await
    }

    pub async fn push_charging_station(
        &self,
        station: &ChargingStation,
        action: PushAction,
        filter: Option<EvseFilter<'_>>,
        options: PushOptions,
    ) -> PushAcknowledgement {
        self.push_evse_data(station, action, filter, options).await
    }

    pub async fn push_charging_pool(
        &self,
        pool: &ChargingPool,
        action: PushAction,
        filter: Option<EvseFilter<'_>>,
        options: PushOptions,
    ) -> PushAcknowledgement {
        self.push_evse_data(pool, action, filter, options).await
    }

    pub async fn push_operator(
        &self,
        operator: &ChargingStationOperator,
        action: PushAction,
        filter: Option<EvseFilter<'_>>,
        options: PushOptions,
    ) -> PushAcknowledgement {
        self.push_evse_data(operator, action, filter, options).await
    }

    pub async fn push_roaming_network(
        &self,
        network: &RoamingNetwork,
        action: PushAction,
        filter: Option<EvseFilter<'_>>,
        options: PushOptions,
    ) -> PushAcknowledgement {
        self.push_evse_data(network, action, filter, options).await
    }

    /// Flatten `locations` to EVSEs, keep those accepted by `filter`, group
    /// them by operator and send one request to the remote target.
    ///
    /// Returns `NoOperation` without calling the remote when there is no
    /// remote, pushing data is disabled, nothing survives the filter, or the
    /// cancellation signal has already fired.
    pub async fn push_evse_data<H: EvseHierarchy + ?Sized>(
        &self,
        locations: &H,
        action: PushAction,
        filter: Option<EvseFilter<'_>>,
        options: PushOptions,
    ) -> PushAcknowledgement {
        let start = Instant::now();
        let granularity = locations.granularity();

        let Some(remote) = self.remote.clone() else {
            return self.skip_data("No remote push target configured!", start);
        };
        if self.disable_push_data {
            return self.skip_data("Push of EVSE data disabled!", start);
        }

        let evses_by_operator = group_evses(locations, filter);
        let evse_count: usize = evses_by_operator.values().map(Vec::len).sum();
        if evse_count == 0 {
            debug!(provider_id = self.id.as_str(), granularity, "No EVSEs to push");
            return self.skip_data("No EVSEs to push!", start);
        }
        if options.cancellation.is_cancelled() {
            return self.skip_data("Push cancelled!", start);
        }

        info!(
            provider_id = self.id.as_str(),
            remote_id = remote.id(),
            granularity,
            %action,
            operators = evses_by_operator.len(),
            evses = evse_count,
            "Pushing EVSE data"
        );

        let options = self.apply_timeout(options);
        let event_tracking_id = options.event_tracking_id.clone();
        self.publish(Event::PushEvseDataRequested(PushRequestedEvent {
            navigation_provider_id: self.id.to_string(),
            event_tracking_id: event_tracking_id.clone(),
            action: Some(action.to_string()),
            operator_count: evses_by_operator.len(),
            item_count: evse_count,
            timestamp: Utc::now(),
        }));

        let request = PushEvseDataRequest {
            evses_by_operator,
            action,
            options,
        };
        let ack = remote.push_evse_data(request).await;
        let ack = match ack.runtime {
            Some(_) => ack,
            None => ack.with_runtime(start.elapsed()),
        };

        self.complete("push_evse_data", &event_tracking_id, &ack, start);
        ack
    }

    // ─── EVSE status ───────────────────────────────────────────────────

    /// Group `updates` by operator and send them in one request.
    ///
    /// Same no-op rules as [`push_evse_data`](Self::push_evse_data).
    pub async fn push_evse_status(
        &self,
        updates: &[EvseStatusUpdate],
        filter: Option<StatusFilter<'_>>,
        options: PushOptions,
    ) -> PushAcknowledgement {
        let start = Instant::now();

        let Some(remote) = self.remote.clone() else {
            return self.skip_status("No remote push target configured!", start);
        };
        if self.disable_push_status {
            return self.skip_status("Push of EVSE status disabled!", start);
        }

        let mut updates_by_operator: BTreeMap<OperatorId, Vec<EvseStatusUpdate>> = BTreeMap::new();
        for update in updates.iter().filter(|u| filter.map_or(true, |f| f(*u))) {
            updates_by_operator
                .entry(update.operator_id.clone())
                .or_default()
                .push(update.clone());
        }
        let update_count: usize = updates_by_operator.values().map(Vec::len).sum();
        if update_count == 0 {
            return self.skip_status("No EVSE status updates to push!", start);
        }
        if options.cancellation.is_cancelled() {
            return self.skip_status("Push cancelled!", start);
        }

        info!(
            provider_id = self.id.as_str(),
            remote_id = remote.id(),
            operators = updates_by_operator.len(),
            updates = update_count,
            "Pushing EVSE status"
        );

        let options = self.apply_timeout(options);
        let event_tracking_id = options.event_tracking_id.clone();
        self.publish(Event::PushEvseStatusRequested(PushRequestedEvent {
            navigation_provider_id: self.id.to_string(),
            event_tracking_id: event_tracking_id.clone(),
            action: None,
            operator_count: updates_by_operator.len(),
            item_count: update_count,
            timestamp: Utc::now(),
        }));

        let request = PushEvseStatusRequest {
            updates_by_operator,
            options,
        };
        let ack = remote.push_evse_status(request).await;
        let ack = match ack.runtime {
            Some(_) => ack,
            None => ack.with_runtime(start.elapsed()),
        };

        self.complete("push_evse_status", &event_tracking_id, &ack, start);
        ack
    }

    // ─── Helpers ───────────────────────────────────────────────────────

    fn apply_timeout(&self, options: PushOptions) -> PushOptions {
        match (options.request_timeout, self.request_timeout) {
            (None, Some(timeout)) => options.with_timeout(timeout),
            _ => options,
        }
    }

    fn skip_data(&self, reason: &str, start: Instant) -> PushAcknowledgement {
        self.skip("push_evse_data", reason, start)
    }

    fn skip_status(&self, reason: &str, start: Instant) -> PushAcknowledgement {
        self.skip("push_evse_status", reason, start)
    }

    fn skip(&self, operation: &'static str, reason: &str, start: Instant) -> PushAcknowledgement {
        debug!(provider_id = self.id.as_str(), operation, reason, "Push skipped");
        let ack = PushAcknowledgement::no_operation(self.id.as_str(), reason)
            .with_runtime(start.elapsed());
        record_push(operation, &ack, start);
        ack
    }

    fn complete(
        &self,
        operation: &'static str,
        event_tracking_id: &str,
        ack: &PushAcknowledgement,
        start: Instant,
    ) {
        record_push(operation, ack, start);

        if ack.outcome.is_success() {
            info!(
                provider_id = self.id.as_str(),
                operation,
                outcome = ack.outcome.as_str(),
                "Push completed"
            );
        } else {
            warn!(
                provider_id = self.id.as_str(),
                operation,
                outcome = ack.outcome.as_str(),
                description = ack.description.as_deref(),
                "Push failed"
            );
        }

        let completed = PushCompletedEvent {
            navigation_provider_id: self.id.to_string(),
            event_tracking_id: event_tracking_id.to_string(),
            outcome: ack.outcome.as_str().to_string(),
            description: ack.description.clone(),
            runtime_ms: ack.runtime.map(runtime_ms),
            timestamp: Utc::now(),
        };
        self.publish(match operation {
            "push_evse_status" => Event::PushEvseStatusCompleted(completed),
            _ => Event::PushEvseDataCompleted(completed),
        });
    }

    fn publish(&self, event: Event) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }
}

impl std::fmt::Debug for NavigationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationProvider")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("remote", &self.remote.as_ref().map(|r| r.id().to_string()))
            .field("disable_push_data", &self.disable_push_data)
            .field("disable_push_status", &self.disable_push_status)
            .finish()
    }
}

/// EVSEs of `locations` accepted by `filter`, keyed by operator, in
/// traversal order within each operator.
pub fn group_evses<H: EvseHierarchy + ?Sized>(
    locations: &H,
    filter: Option<EvseFilter<'_>>,
) -> BTreeMap<OperatorId, Vec<Evse>> {
    let mut grouped: BTreeMap<OperatorId, Vec<Evse>> = BTreeMap::new();
    for (owner, evse) in locations.owned_evses() {
        if !filter.map_or(true, |f| f(evse)) {
            continue;
        }
        let mut evse = evse.clone();
        evse.operator_id = owner.clone();
        grouped.entry(owner.clone()).or_default().push(evse);
    }
    grouped
}
