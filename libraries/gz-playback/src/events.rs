//! Player events and subscriptions
//!
//! Every view surface (list, now-playing, mini bar) subscribes to the same
//! stream. Delivery is synchronous, in registration order, and nothing is
//! buffered: a subscriber added later only sees later events.

use std::fmt;

use gz_core::TrackId;
use serde::{Deserialize, Serialize};

use crate::progress::ProgressUpdate;
use crate::types::PlaybackState;

/// Events published by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerEvent {
    /// Any change to the playback state; carries a full snapshot
    StateChanged(PlaybackState),

    /// Playhead moved
    Progress(ProgressUpdate),

    /// Favorite membership changed
    FavoriteToggled {
        /// Toggled track
        id: TrackId,
        /// New membership
        favorite: bool,
    },
}

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&PlayerEvent)>;

/// Subscriber registry
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl Subscribers {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback
    pub fn subscribe(&mut self, callback: impl FnMut(&PlayerEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback, returning whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() != before
    }

    /// Deliver an event to every subscriber
    pub fn notify(&mut self, event: &PlayerEvent) {
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }

    /// Number of subscribers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nobody is subscribed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn favorite_event(id: &str) -> PlayerEvent {
        PlayerEvent::FavoriteToggled {
            id: TrackId::new(id),
            favorite: true,
        }
    }

    #[test]
    fn notify_reaches_every_subscriber_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::new();

        for name in ["list", "now-playing", "mini-bar"] {
            let log = log.clone();
            subscribers.subscribe(move |_| log.borrow_mut().push(name));
        }

        subscribers.notify(&favorite_event("a"));
        assert_eq!(*log.borrow(), vec!["list", "now-playing", "mini-bar"]);
    }

    #[test]
    fn unsubscribed_callback_stops_receiving() {
        let count = Rc::new(RefCell::new(0));
        let mut subscribers = Subscribers::new();

        let counter = count.clone();
        let id = subscribers.subscribe(move |_| *counter.borrow_mut() += 1);

        subscribers.notify(&favorite_event("a"));
        assert!(subscribers.unsubscribe(id));
        assert!(!subscribers.unsubscribe(id));
        subscribers.notify(&favorite_event("b"));

        assert_eq!(*count.borrow(), 1);
        assert!(subscribers.is_empty());
    }
}
