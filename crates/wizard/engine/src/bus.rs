//! The in-process event bus.
//!
//! Cross-component signaling is fire-and-forget: a producer publishes and
//! moves on; the wizard drains the queue and routes each event to the
//! constructed handlers in step order, synchronously. A handler that
//! publishes during dispatch appends to the same queue and its event is
//! processed in the same pass, after the ones already queued.

use std::collections::VecDeque;
use wizard_types::WizardEvent;

/// FIFO queue of wizard events.
#[derive(Clone, Debug, Default)]
pub struct EventBus {
    queue: VecDeque<WizardEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event. Never blocks, never fails.
    pub fn publish(&mut self, event: WizardEvent) {
        tracing::trace!(event = event.name(), "publish");
        self.queue.push_back(event);
    }

    pub fn publish_all(&mut self, events: impl IntoIterator<Item = WizardEvent>) {
        for event in events {
            self.publish(event);
        }
    }

    /// Take the oldest queued event, if any.
    pub fn pop(&mut self) -> Option<WizardEvent> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut bus = EventBus::new();
        bus.publish(WizardEvent::RowDeleted);
        bus.publish(WizardEvent::NavigateToStep { index: 2 });

        assert_eq!(bus.pop(), Some(WizardEvent::RowDeleted));
        assert_eq!(bus.pop(), Some(WizardEvent::NavigateToStep { index: 2 }));
        assert_eq!(bus.pop(), None);
    }

    #[test]
    fn test_publish_all() {
        let mut bus = EventBus::new();
        bus.publish_all(vec![WizardEvent::RowDeleted, WizardEvent::RowDeleted]);
        assert_eq!(bus.len(), 2);
    }
}
