//! Location data / status push

pub mod model;
pub mod port;

pub use model::{
    PushAcknowledgement, PushAction, PushEvseDataRequest, PushEvseStatusRequest, PushOptions,
    PushOutcome,
};
pub use port::RemotePushTarget;
