//! Event bus for authorization and push notifications
//!
//! A tokio broadcast channel. Publishing never fails and never blocks;
//! subscribers that fall behind lose the oldest events.

use std::sync::Arc;

use log::{debug, trace, warn};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use super::types::{Event, EventMessage};

const CHANNEL_CAPACITY: usize = 1024;

/// Which events a subscriber wants to see
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Authorizator or navigation provider id
    pub source_id: Option<String>,
    /// Event type names as returned by [`Event::event_type`]
    pub event_types: Vec<&'static str>,
}

impl EventFilter {
    fn accepts(&self, event: &Event) -> bool {
        let source_ok = self
            .source_id
            .as_deref()
            .map_or(true, |source| event.source_id() == source);
        let type_ok = self.event_types.is_empty() || self.event_types.contains(&event.event_type());
        source_ok && type_ok
    }
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventMessage>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event; returns how many subscribers it reached.
    pub fn publish(&self, event: Event) -> usize {
        let message = EventMessage::new(event);
        let event_type = message.event.event_type();
        let source = message.event.source_id().to_string();

        let delivered = self.sender.send(message).unwrap_or(0);
        trace!("{} from {} delivered to {} subscriber(s)", event_type, source, delivered);
        delivered
    }

    pub fn subscribe(&self) -> EventSubscriber {
        self.subscribe_with(EventFilter::default())
    }

    /// Subscribe to events raised by one authorizator or navigation provider.
    pub fn subscribe_to_source(&self, source_id: impl Into<String>) -> EventSubscriber {
        self.subscribe_with(EventFilter {
            source_id: Some(source_id.into()),
            event_types: Vec::new(),
        })
    }

    pub fn subscribe_with(&self, filter: EventFilter) -> EventSubscriber {
        debug!("Subscribing to events with {:?}", filter);
        EventSubscriber {
            receiver: self.sender.subscribe(),
            filter,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

pub struct EventSubscriber {
    receiver: broadcast::Receiver<EventMessage>,
    filter: EventFilter,
}

impl EventSubscriber {
    /// Wait for the next accepted event; `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(message) if self.filter.accepts(&message.event) => return Some(message),
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => {
                    warn!("Event subscriber skipped {} events", missed)
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next accepted event if one is already queued.
    pub fn try_recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.try_recv() {
                Ok(message) if self.filter.accepts(&message.event) => return Some(message),
                Ok(_) => {}
                Err(TryRecvError::Lagged(missed)) => {
                    warn!("Event subscriber skipped {} events", missed)
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}

pub type SharedEventBus = Arc<EventBus>;

pub fn create_event_bus() -> SharedEventBus {
    Arc::new(EventBus::new())
}
