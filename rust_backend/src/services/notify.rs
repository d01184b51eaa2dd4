//! Display subscribers and their per-holder registry.
//!
//! Each explorer owns one [`SubscriberRegistry`]. A notification round calls
//! every subscriber in registration order with the whole [`ExplorerState`];
//! subscribers compare [`crate::api::DisplayMode`] themselves and decide
//! whether to redraw.

use log::{debug, warn};

use super::explorer::ExplorerState;
use crate::error::ExplorerResult;

/// Something that redraws from the explorer state.
pub trait Subscriber {
    /// Called once per notification round.
    ///
    /// An error stops the round; later subscribers are not called.
    fn update(&mut self, state: &ExplorerState) -> ExplorerResult<()>;
}

/// Handle returned by [`SubscriberRegistry::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Ordered subscriber collection owned by a single holder.
#[derive(Default)]
pub struct SubscriberRegistry {
    entries: Vec<(SubscriberId, Box<dyn Subscriber>)>,
    next_id: u64,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber at the end of the round.
    ///
    /// Attaching the same subscriber twice registers it twice.
    pub fn attach(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, subscriber));
        debug!("Attached subscriber {:?} ({} total)", id, self.entries.len());
        id
    }

    /// Remove a subscriber; returns it when the handle was registered.
    pub fn detach(&mut self, id: SubscriberId) -> Option<Box<dyn Subscriber>> {
        let position = self.entries.iter().position(|(entry, _)| *entry == id)?;
        debug!("Detached subscriber {:?}", id);
        Some(self.entries.remove(position).1)
    }

    /// Call every subscriber in registration order.
    pub fn notify_all(&mut self, state: &ExplorerState) -> ExplorerResult<()> {
        debug!(
            "Notifying {} subscriber(s) for {} mode",
            self.entries.len(),
            state.context.display_mode
        );
        for (id, subscriber) in self.entries.iter_mut() {
            if let Err(e) = subscriber.update(state) {
                warn!("Subscriber {:?} failed, aborting round: {}", id, e);
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("subscribers", &self.entries.len())
            .finish()
    }
}
