//! Push requests and acknowledgements

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::identifiers::OperatorId;
use crate::domain::location::{Evse, EvseStatusUpdate};
use crate::shared::cancellation::CancellationSignal;
use crate::shared::errors::DomainError;

/// What the receiver should do with the pushed EVSE data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushAction {
    /// Replace everything the receiver knows
    FullLoad,
    Update,
    Insert,
    Delete,
}

impl PushAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullLoad => "FullLoad",
            Self::Update => "Update",
            Self::Insert => "Insert",
            Self::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for PushAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PushAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fullload" | "full-load" | "full_load" => Ok(Self::FullLoad),
            "update" => Ok(Self::Update),
            "insert" => Ok(Self::Insert),
            "delete" => Ok(Self::Delete),
            other => Err(DomainError::Validation(format!("Unknown push action: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushOutcome {
    Success,
    /// Nothing was sent
    NoOperation,
    /// Accepted by the receiver for later processing
    Enqueued,
    Error,
    Timeout,
    AdminDown,
}

impl PushOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::NoOperation => "NoOperation",
            Self::Enqueued => "Enqueued",
            Self::Error => "Error",
            Self::Timeout => "Timeout",
            Self::AdminDown => "AdminDown",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success | Self::Enqueued | Self::NoOperation)
    }
}

/// Answer to one push call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushAcknowledgement {
    pub outcome: PushOutcome,
    /// Who produced the acknowledgement
    pub sender_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "duration_millis::serialize")]
    pub runtime: Option<Duration>,
}

impl PushAcknowledgement {
    pub fn new(outcome: PushOutcome, sender_id: impl Into<String>) -> Self {
        Self {
            outcome,
            sender_id: sender_id.into(),
            description: None,
            warnings: Vec::new(),
            runtime: None,
        }
    }

    pub fn success(sender_id: impl Into<String>) -> Self {
        Self::new(PushOutcome::Success, sender_id)
    }

    pub fn no_operation(sender_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(PushOutcome::NoOperation, sender_id).with_description(description)
    }

    pub fn error(sender_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(PushOutcome::Error, sender_id).with_description(description)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    #[must_use]
    pub fn with_runtime(mut self, runtime: Duration) -> Self {
        self.runtime = Some(runtime);
        self
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            None => s.serialize_none(),
        }
    }
}

/// Per-call options handed through to the remote target
#[derive(Debug, Clone)]
pub struct PushOptions {
    pub timestamp: DateTime<Utc>,
    /// Advisory only
    pub cancellation: CancellationSignal,
    pub event_tracking_id: String,
    /// Passed to the remote target; not enforced here
    pub request_timeout: Option<Duration>,
}

impl PushOptions {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationSignal) -> Self {
        self.cancellation = cancellation;
        self
    }
}

impl Default for PushOptions {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
            cancellation: CancellationSignal::new(),
            event_tracking_id: uuid::Uuid::new_v4().to_string(),
            request_timeout: None,
        }
    }
}

/// Batched EVSE data, grouped by owning operator
#[derive(Debug, Clone)]
pub struct PushEvseDataRequest {
    pub evses_by_operator: BTreeMap<OperatorId, Vec<Evse>>,
    pub action: PushAction,
    pub options: PushOptions,
}

impl PushEvseDataRequest {
    pub fn evse_count(&self) -> usize {
        self.evses_by_operator.values().map(Vec::len).sum()
    }
}

/// Batched EVSE status updates, grouped by owning operator
#[derive(Debug, Clone)]
pub struct PushEvseStatusRequest {
    pub updates_by_operator: BTreeMap<OperatorId, Vec<EvseStatusUpdate>>,
    pub options: PushOptions,
}

impl PushEvseStatusRequest {
    pub fn update_count(&self) -> usize {
        self.updates_by_operator.values().map(Vec::len).sum()
    }
}
