//! Events raised by authorizators and navigation providers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    AuthStartResult(AuthResultEvent),
    AuthStopResult(AuthResultEvent),
    PushEvseDataRequested(PushRequestedEvent),
    PushEvseDataCompleted(PushCompletedEvent),
    PushEvseStatusRequested(PushRequestedEvent),
    PushEvseStatusCompleted(PushCompletedEvent),
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::AuthStartResult(_) => "auth_start_result",
            Event::AuthStopResult(_) => "auth_stop_result",
            Event::PushEvseDataRequested(_) => "push_evse_data_requested",
            Event::PushEvseDataCompleted(_) => "push_evse_data_completed",
            Event::PushEvseStatusRequested(_) => "push_evse_status_requested",
            Event::PushEvseStatusCompleted(_) => "push_evse_status_completed",
        }
    }

    /// Authorizator or navigation provider that raised the event
    pub fn source_id(&self) -> &str {
        match self {
            Event::AuthStartResult(e) | Event::AuthStopResult(e) => &e.authorizator_id,
            Event::PushEvseDataRequested(e) | Event::PushEvseStatusRequested(e) => {
                &e.navigation_provider_id
            }
            Event::PushEvseDataCompleted(e) | Event::PushEvseStatusCompleted(e) => {
                &e.navigation_provider_id
            }
        }
    }
}

/// Authorization result event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResultEvent {
    pub authorizator_id: String,
    pub token: String,
    /// Outcome wire name, e.g. `Authorized`, `Blocked`
    pub outcome: String,
    pub session_id: Option<String>,
    /// Party that asked, when it identified itself
    pub caller: Option<String>,
    pub cached: bool,
    pub runtime_ms: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushRequestedEvent {
    pub navigation_provider_id: String,
    pub event_tracking_id: String,
    pub action: Option<String>,
    pub operator_count: usize,
    pub item_count: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushCompletedEvent {
    pub navigation_provider_id: String,
    pub event_tracking_id: String,
    pub outcome: String,
    pub description: Option<String>,
    pub runtime_ms: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

/// Event plus bus metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_message_serializes_tagged() {
        let message = EventMessage::new(Event::AuthStopResult(AuthResultEvent {
            authorizator_id: "DE*ABC".into(),
            token: "AABBCCDD".into(),
            outcome: "AlreadyStopped".into(),
            session_id: Some("S1".into()),
            caller: None,
            cached: false,
            runtime_ms: Some(3),
            timestamp: Utc::now(),
        }));
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "AuthStopResult");
        assert_eq!(json["data"]["outcome"], "AlreadyStopped");
        assert_eq!(message.event.source_id(), "DE*ABC");
        assert_eq!(message.event.event_type(), "auth_stop_result");
    }
}
