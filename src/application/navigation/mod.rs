//! Navigation providers and push fan-out

pub mod provider;

pub use provider::{
    group_evses, EvseFilter, NavigationProvider, SharedRemotePushTarget, StatusFilter,
};
