//! # Input Queue
//!
//! Input callbacks (keyboard, touch, window resize) push `InputEvent`s; the
//! frame loop drains them at the top of each frame. The engine is therefore
//! only ever mutated between `advance` and the next `advance`.
//!
//! Uses a bounded crossbeam channel. A full queue drops the newest event
//! instead of blocking the callback.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::warn;

/// Something the user or the window did.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    Key(char),
    /// Horizontal swipe towards the left edge.
    SwipeLeft,
    /// Horizontal swipe towards the right edge.
    SwipeRight,
    /// The drawable area changed size.
    Resize {
        /// New width.
        width: f32,
        /// New height.
        height: f32,
    },
}

/// Channel pair for input events.
pub struct InputBus {
    /// Sender end - held by input callbacks.
    sender: Sender<InputEvent>,
    /// Receiver end - held by the frame loop.
    receiver: Receiver<InputEvent>,
}

impl InputBus {
    /// Creates a new input bus.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum events buffered between frames
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender for this bus.
    #[must_use]
    pub fn sender(&self) -> InputSender {
        InputSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver for this bus.
    #[must_use]
    pub fn receiver(&self) -> InputReceiver {
        InputReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Convenience: create a sender/receiver pair.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (InputSender, InputReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

/// Sender handle for input callbacks.
#[derive(Clone)]
pub struct InputSender {
    sender: Sender<InputEvent>,
}

impl InputSender {
    /// Queues an event without blocking.
    ///
    /// Returns false if the event was dropped (queue full or frame loop gone).
    pub fn send(&self, event: InputEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(?event, "input queue full, event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Receiver handle for the frame loop.
pub struct InputReceiver {
    receiver: Receiver<InputEvent>,
}

impl InputReceiver {
    /// Drains all pending events in arrival order.
    #[must_use]
    pub fn drain(&self) -> Vec<InputEvent> {
        self.receiver.try_iter().collect()
    }

    /// Number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let (tx, rx) = InputBus::create_pair(8);
        assert!(tx.send(InputEvent::Key('r')));
        assert!(tx.send(InputEvent::SwipeLeft));
        assert_eq!(rx.pending_count(), 2);

        assert_eq!(rx.drain(), vec![InputEvent::Key('r'), InputEvent::SwipeLeft]);
        assert_eq!(rx.pending_count(), 0);
    }

    #[test]
    fn test_full_queue_drops() {
        let (tx, rx) = InputBus::create_pair(1);
        assert!(tx.send(InputEvent::Key('s')));
        assert!(!tx.send(InputEvent::Key('f')));
        assert_eq!(rx.drain(), vec![InputEvent::Key('s')]);
    }
}
