//! FIFO buffer for external trigger events raised while mutation is unsafe.

use std::collections::VecDeque;

#[derive(Debug, Default)]
pub(crate) struct TriggerQueue {
    events: VecDeque<String>,
}

impl TriggerQueue {
    pub(crate) fn enqueue(&mut self, event: &str) {
        self.events.push_back(event.to_owned());
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn pop(&mut self) -> Option<String> {
        self.events.pop_front()
    }
}
