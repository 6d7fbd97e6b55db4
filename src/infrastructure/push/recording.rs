//! In-memory push target for tests and dry runs
//!
//! Keeps every request it receives and answers with a configurable
//! acknowledgement.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{
    PushAcknowledgement, PushEvseDataRequest, PushEvseStatusRequest, RemotePushTarget,
};

pub struct RecordingPushTarget {
    id: String,
    acknowledgement: Option<PushAcknowledgement>,
    data_requests: Mutex<Vec<PushEvseDataRequest>>,
    status_requests: Mutex<Vec<PushEvseStatusRequest>>,
}

impl RecordingPushTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            acknowledgement: None,
            data_requests: Mutex::new(Vec::new()),
            status_requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with `ack` instead of `Success`.
    #[must_use]
    pub fn with_acknowledgement(mut self, ack: PushAcknowledgement) -> Self {
        self.acknowledgement = Some(ack);
        self
    }

    pub fn data_requests(&self) -> Vec<PushEvseDataRequest> {
        self.data_requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn status_requests(&self) -> Vec<PushEvseStatusRequest> {
        self.status_requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn answer(&self) -> PushAcknowledgement {
        self.acknowledgement
            .clone()
            .unwrap_or_else(|| PushAcknowledgement::success(self.id.as_str()))
    }
}

#[async_trait]
impl RemotePushTarget for RecordingPushTarget {
    fn id(&self) -> &str {
        &self.id
    }

    async fn push_evse_data(&self, request: PushEvseDataRequest) -> PushAcknowledgement {
        if let Ok(mut requests) = self.data_requests.lock() {
            requests.push(request);
        }
        self.answer()
    }

    async fn push_evse_status(&self, request: PushEvseStatusRequest) -> PushAcknowledgement {
        if let Ok(mut requests) = self.status_requests.lock() {
            requests.push(request);
        }
        self.answer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Evse, EvseStatus, EvseStatusUpdate, PushOptions, PushOutcome};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn records_requests_and_returns_configured_ack() {
        let target = RecordingPushTarget::new("REC")
            .with_acknowledgement(PushAcknowledgement::new(PushOutcome::Enqueued, "REC"));

        let evse = Evse::new("DE*ABC*E1", "DE*ABC");
        let update = EvseStatusUpdate::for_evse(&evse, EvseStatus::Charging);
        let mut updates_by_operator = BTreeMap::new();
        updates_by_operator.insert(update.operator_id.clone(), vec![update]);

        let ack = target
            .push_evse_status(PushEvseStatusRequest {
                updates_by_operator,
                options: PushOptions::default(),
            })
            .await;

        assert_eq!(ack.outcome, PushOutcome::Enqueued);
        assert_eq!(target.status_requests().len(), 1);
        assert!(target.data_requests().is_empty());
    }
}
