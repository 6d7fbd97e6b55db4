//! Outbound port towards a remote synchronization endpoint
//!
//! A navigation provider forwards batched location data and status through
//! this trait. Implementations own transport, retries and timeouts; whatever
//! they report comes back to the caller unchanged.

use async_trait::async_trait;

use super::model::{PushAcknowledgement, PushEvseDataRequest, PushEvseStatusRequest};

#[async_trait]
pub trait RemotePushTarget: Send + Sync {
    /// Identity reported in logs and acknowledgements.
    fn id(&self) -> &str;

    async fn push_evse_data(&self, request: PushEvseDataRequest) -> PushAcknowledgement;

    async fn push_evse_status(&self, request: PushEvseStatusRequest) -> PushAcknowledgement;
}
