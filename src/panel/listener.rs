//! Observer registry for state and slide notifications

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use super::PanelState;
use crate::host::ViewId;

/// Callback for monitoring panel events
pub trait SheetCallback {
    /// Called whenever the state setter runs, including repeats of the same state
    fn on_state_changed(&mut self, panel: ViewId, state: PanelState);

    /// Called on every accepted position change
    ///
    /// `offset` runs from 0 to 1 while moving up from the collapsed line and
    /// goes negative inside the peek band.
    fn on_slide(&mut self, panel: ViewId, offset: f32);
}

/// Append-only, insertion-ordered list of callbacks
#[derive(Default)]
pub struct ListenerRegistry {
    callbacks: Vec<Box<dyn SheetCallback>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, callback: Box<dyn SheetCallback>) {
        self.callbacks.push(callback);
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn notify_state_changed(&mut self, panel: ViewId, state: PanelState) {
        for callback in &mut self.callbacks {
            callback.on_state_changed(panel, state);
        }
    }

    pub fn notify_slide(&mut self, panel: ViewId, offset: f32) {
        for callback in &mut self.callbacks {
            callback.on_slide(panel, offset);
        }
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

/// A single recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PanelEvent {
    StateChanged { panel: ViewId, state: PanelState },
    Slide { panel: ViewId, offset: f32 },
}

/// Shared recording listener
///
/// Clones share the same buffer, so one clone can be registered while
/// another is kept for reading.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<PanelEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PanelEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&self) -> Vec<PanelEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn states(&self) -> Vec<PanelState> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                PanelEvent::StateChanged { state, .. } => Some(*state),
                PanelEvent::Slide { .. } => None,
            })
            .collect()
    }

    pub fn slides(&self) -> Vec<f32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                PanelEvent::Slide { offset, .. } => Some(*offset),
                PanelEvent::StateChanged { .. } => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl SheetCallback for EventLog {
    fn on_state_changed(&mut self, panel: ViewId, state: PanelState) {
        self.events
            .borrow_mut()
            .push(PanelEvent::StateChanged { panel, state });
    }

    fn on_slide(&mut self, panel: ViewId, offset: f32) {
        self.events
            .borrow_mut()
            .push(PanelEvent::Slide { panel, offset });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));

        struct Tagged(&'static str, Rc<RefCell<Vec<&'static str>>>);
        impl SheetCallback for Tagged {
            fn on_state_changed(&mut self, _: ViewId, _: PanelState) {
                self.1.borrow_mut().push(self.0);
            }
            fn on_slide(&mut self, _: ViewId, _: f32) {}
        }

        let mut registry = ListenerRegistry::new();
        registry.add(Box::new(Tagged("first", order.clone())));
        registry.add(Box::new(Tagged("second", order.clone())));
        registry.add(Box::new(Tagged("first", order.clone())));
        registry.notify_state_changed(ViewId(1), PanelState::Expanded);

        assert_eq!(*order.borrow(), vec!["first", "second", "first"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_event_log_shares_buffer() {
        let log = EventLog::new();
        let mut registry = ListenerRegistry::new();
        registry.add(Box::new(log.clone()));

        registry.notify_slide(ViewId(4), 0.5);
        registry.notify_state_changed(ViewId(4), PanelState::Collapsed);

        assert_eq!(log.slides(), vec![0.5]);
        assert_eq!(log.states(), vec![PanelState::Collapsed]);
        assert_eq!(log.drain().len(), 2);
        assert!(log.is_empty());
    }
}
