//! In-process event bus
//!
//! Components that do not own each other (feed, map, atlas layers, panel)
//! signal through a broadcast channel of typed [`AppEvent`]s.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::types::{AtlasEntityKind, Pin};

/// Base map style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapStyle {
    #[default]
    Streets,
    Satellite,
    Dark,
}

impl MapStyle {
    pub fn next(self) -> Self {
        match self {
            MapStyle::Streets => MapStyle::Satellite,
            MapStyle::Satellite => MapStyle::Dark,
            MapStyle::Dark => MapStyle::Streets,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A pin was created and should appear on the map and in the feed.
    PinCreated { pin: Pin },
    /// Move the map to a location and show its details.
    ShowLocation { lat: f64, lng: f64, zoom: Option<f64> },
    /// Select a pin that may not be loaded yet.
    SelectPinById { pin_id: String },
    OpenPanel,
    AtlasEntityClicked {
        kind: AtlasEntityKind,
        id: String,
        name: String,
    },
    /// An atlas layer's data changed; reload it.
    AtlasRefresh { layer: AtlasEntityKind },
    MapStyleChanged { style: MapStyle },
    ThemeToggled,
}

/// Cloneable publisher handle.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Returns the number of subscribers that will see the event.
    /// Publishing with nobody listening is fine.
    pub fn publish(&self, event: AppEvent) -> usize {
        log::debug!("event: {event:?}");
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> EventSubscriber {
        EventSubscriber {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[derive(Debug)]
pub struct EventSubscriber {
    receiver: broadcast::Receiver<AppEvent>,
}

impl EventSubscriber {
    /// Everything received since the last drain. A lagging subscriber loses
    /// the oldest events and keeps going.
    pub fn drain(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    log::warn!("event subscriber lagged, {skipped} events dropped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        events
    }

    /// Wait for the next event; `None` once every publisher is gone.
    pub async fn recv(&mut self) -> Option<AppEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("event subscriber lagged, {skipped} events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
