//! Outward notifications.
//!
//! A view reports user intent (for example, "add a card here") through a
//! [`Signal`]. Slots run synchronously on the emitting thread. No order
//! between slots is guaranteed.
//!
//! ```
//! use dashview_core::Signal;
//!
//! let create_card = Signal::<()>::new();
//! let id = create_card.connect(|_| println!("new card requested"));
//!
//! create_card.emit(());
//! assert!(create_card.disconnect(id));
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Handle to one connected slot, used with [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A notification with any number of listeners.
///
/// `Args` is what each slot receives; `()` for plain notifications.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
}

impl<Args: 'static> Signal<Args> {
    /// A signal nobody listens to yet.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Register `slot`; it runs on every later emission.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.slots.lock().insert(Arc::new(slot));
        tracing::trace!(target: targets::SIGNAL, ?id, "slot connected");
        id
    }

    /// Remove a slot. `false` if it was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// How many slots are connected.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Run every connected slot with `args`.
    ///
    /// The slot list is snapshotted first, so a slot may connect to or
    /// disconnect from this same signal.
    #[tracing::instrument(skip_all, target = "dashview_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let snapshot: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, slots = snapshot.len(), "emit");

        for slot in &snapshot {
            slot(&args);
        }
    }
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slots.lock().len())
            .finish()
    }
}
