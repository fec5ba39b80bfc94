//! Event bus connecting systems to window/GUI actuators
//!
//! A named-event registry: subscribers register under an event name and
//! are invoked synchronously, in registration order, when that name is
//! published. The bus holds weak references only; it never manages
//! subscriber lifetime, and entries whose subscriber has been dropped are
//! pruned on the next dispatch. There is no queuing.
//!
//! The handler object fuses the subscriber (its state) with the actuator
//! (its [`EventHandler::on_event`] method): publishing an event invokes the
//! actuator with the subscriber as context.
//!
//! Event payloads are key-value arguments so argument order never matters.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::scene::components::DetachedComponent;
use crate::scene::entity::Entity;

/// Variant for type-safe event arguments
#[derive(Debug, Clone)]
pub enum EventArg {
    /// An entity handle
    Entity(Entity),
    /// A boolean flag
    Flag(bool),
    /// A scalar value
    Scalar(f32),
    /// A count or index
    Index(usize),
    /// Free-form text
    Text(String),
    /// Components severed from the scenegraph
    Detached(Vec<DetachedComponent>),
}

/// Event with a name and key-value arguments
#[derive(Debug, Clone)]
pub struct Event {
    name: String,
    args: HashMap<&'static str, EventArg>,
}

impl Event {
    /// Create a new event with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: HashMap::new(),
        }
    }

    /// The event name used for subscriber lookup
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an argument to the event (builder pattern)
    #[must_use]
    pub fn with_arg(mut self, key: &'static str, value: EventArg) -> Self {
        self.args.insert(key, value);
        self
    }

    /// Get an argument by key
    pub fn arg(&self, key: &str) -> Option<&EventArg> {
        self.args.get(key)
    }

    /// Get an entity argument if present
    pub fn entity(&self, key: &str) -> Option<Entity> {
        if let Some(EventArg::Entity(e)) = self.arg(key) {
            Some(*e)
        } else {
            None
        }
    }

    /// Get a detached-component argument if present
    pub fn detached(&self, key: &str) -> Option<&[DetachedComponent]> {
        if let Some(EventArg::Detached(list)) = self.arg(key) {
            Some(list)
        } else {
            None
        }
    }
}

/// Subscriber-side event callback
pub trait EventHandler {
    /// React to a published event
    fn on_event(&mut self, event: &Event);
}

/// Named-event registry with weak subscriber references
#[derive(Default)]
pub struct EventManager {
    subscribers: HashMap<String, Vec<Weak<RefCell<dyn EventHandler>>>>,
}

impl EventManager {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for an event name
    ///
    /// Only a weak reference is kept; the caller retains ownership and the
    /// entry disappears once the subscriber is dropped.
    pub fn subscribe<H: EventHandler + 'static>(
        &mut self,
        name: impl Into<String>,
        handler: &Rc<RefCell<H>>,
    ) {
        // Unsize the Rc before downgrading; the weak outlives this clone
        let handler: Rc<RefCell<dyn EventHandler>> = handler.clone();
        self.subscribers
            .entry(name.into())
            .or_default()
            .push(Rc::downgrade(&handler));
    }

    /// Number of live subscribers currently registered for a name
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.subscribers
            .get(name)
            .map_or(0, |subs| subs.iter().filter(|w| w.strong_count() > 0).count())
    }

    /// Publish an event: synchronous, immediate dispatch in registration order
    ///
    /// Dead entries are pruned. Returns the number of subscribers reached.
    pub fn notify(&mut self, event: &Event) -> usize {
        let Some(subs) = self.subscribers.get_mut(event.name()) else {
            log::trace!("event '{}' has no subscribers", event.name());
            return 0;
        };
        let mut delivered = 0;
        subs.retain(|weak| match weak.upgrade() {
            Some(handler) => {
                handler.borrow_mut().on_event(event);
                delivered += 1;
                true
            }
            None => false,
        });
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        id: u32,
        seen: Vec<(String, u32)>,
    }

    impl EventHandler for Recorder {
        fn on_event(&mut self, event: &Event) {
            self.seen.push((event.name().to_string(), self.id));
        }
    }

    #[test]
    fn dispatch_is_synchronous_and_in_registration_order() {
        let mut bus = EventManager::new();
        let first = Rc::new(RefCell::new(Recorder { id: 1, seen: Vec::new() }));
        let second = Rc::new(RefCell::new(Recorder { id: 2, seen: Vec::new() }));
        bus.subscribe("geometry_changed", &first);
        bus.subscribe("geometry_changed", &second);

        let reached = bus.notify(&Event::new("geometry_changed"));
        assert_eq!(reached, 2);
        assert_eq!(first.borrow().seen.len(), 1);
        assert_eq!(second.borrow().seen.len(), 1);
    }

    #[test]
    fn dropped_subscribers_are_skipped_and_pruned() {
        let mut bus = EventManager::new();
        let keeper = Rc::new(RefCell::new(Recorder { id: 1, seen: Vec::new() }));
        bus.subscribe("tick", &keeper);
        {
            let transient = Rc::new(RefCell::new(Recorder { id: 2, seen: Vec::new() }));
            bus.subscribe("tick", &transient);
            assert_eq!(bus.subscriber_count("tick"), 2);
        }

        let reached = bus.notify(&Event::new("tick"));
        assert_eq!(reached, 1);
        assert_eq!(bus.subscriber_count("tick"), 1);
    }

    #[test]
    fn handlers_of_different_types_share_one_event_name() {
        struct Counter {
            hits: usize,
        }
        impl EventHandler for Counter {
            fn on_event(&mut self, _event: &Event) {
                self.hits += 1;
            }
        }

        let mut bus = EventManager::new();
        let recorder = Rc::new(RefCell::new(Recorder { id: 1, seen: Vec::new() }));
        let counter = Rc::new(RefCell::new(Counter { hits: 0 }));
        bus.subscribe("tick", &recorder);
        bus.subscribe("tick", &counter);

        assert_eq!(bus.notify(&Event::new("tick")), 2);
        assert_eq!(recorder.borrow().seen.len(), 1);
        assert_eq!(counter.borrow().hits, 1);
    }

    #[test]
    fn unknown_event_name_reaches_nobody() {
        let mut bus = EventManager::new();
        assert_eq!(bus.notify(&Event::new("nobody_home")), 0);
    }

    #[test]
    fn key_value_args_are_order_independent() {
        let event = Event::new("resize")
            .with_arg("width", EventArg::Scalar(800.0))
            .with_arg("height", EventArg::Scalar(600.0));
        assert!(matches!(event.arg("width"), Some(EventArg::Scalar(w)) if *w == 800.0));
        assert!(event.arg("depth").is_none());
    }
}
