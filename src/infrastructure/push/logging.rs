//! Push target that only logs what it receives.
//!
//! Used by the CLI when no real partner endpoint is configured.

use async_trait::async_trait;
use tracing::info;

use crate::domain::{
    PushAcknowledgement, PushEvseDataRequest, PushEvseStatusRequest, RemotePushTarget,
};

pub struct LoggingPushTarget {
    id: String,
}

impl LoggingPushTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl RemotePushTarget for LoggingPushTarget {
    fn id(&self) -> &str {
        &self.id
    }

    async fn push_evse_data(&self, request: PushEvseDataRequest) -> PushAcknowledgement {
        for (operator_id, evses) in &request.evses_by_operator {
            info!(
                target_id = self.id.as_str(),
                operator_id = operator_id.as_str(),
                action = request.action.as_str(),
                evses = evses.len(),
                event_tracking_id = request.options.event_tracking_id.as_str(),
                "EVSE data received"
            );
        }
        PushAcknowledgement::success(self.id.as_str())
    }

    async fn push_evse_status(&self, request: PushEvseStatusRequest) -> PushAcknowledgement {
        for (operator_id, updates) in &request.updates_by_operator {
            for update in updates {
                info!(
                    target_id = self.id.as_str(),
                    operator_id = operator_id.as_str(),
                    evse_id = update.evse_id.as_str(),
                    old_status = %update.old_status,
                    new_status = %update.new_status,
                    "EVSE status received"
                );
            }
        }
        PushAcknowledgement::success(self.id.as_str())
    }
}
