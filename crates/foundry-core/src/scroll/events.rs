//! Listener registries the host uses to feed scroll, resize and frame events
//! to mounted components.
//!
//! Registration hands back a [`Subscription`] guard; dropping it removes the
//! listener. Components keep their guards and drop them on unmount, so no
//! listener outlives the component that registered it.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::debug;

use crate::geometry::Viewport;
use crate::scene::Stage;

type Handler<E> = Rc<RefCell<dyn FnMut(&E, &mut dyn Stage)>>;

struct Slots<E> {
    next_id: u64,
    handlers: Vec<(u64, Handler<E>)>,
}

impl<E> Slots<E> {
    fn contains(&self, id: u64) -> bool {
        self.handlers.iter().any(|(h, _)| *h == id)
    }
}

/// Single-threaded listener list for one event type
pub struct EventRegistry<E> {
    slots: Rc<RefCell<Slots<E>>>,
}

impl<E> Clone for EventRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<E: 'static> Default for EventRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> EventRegistry<E> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Register a listener; it stays registered while the returned guard lives
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, handler: impl FnMut(&E, &mut dyn Stage) + 'static) -> Subscription {
        let handler: Handler<E> = Rc::new(RefCell::new(handler));
        let id = {
            let mut slots = self.slots.borrow_mut();
            slots.next_id += 1;
            let id = slots.next_id;
            slots.handlers.push((id, handler));
            id
        };

        let weak: Weak<RefCell<Slots<E>>> = Rc::downgrade(&self.slots);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(slots) = weak.upgrade() {
                    slots.borrow_mut().handlers.retain(|(h, _)| *h != id);
                }
            })),
        }
    }

    /// Deliver an event to every listener. Returns how many were called.
    ///
    /// Listeners removed by an earlier listener in the same dispatch are skipped.
    pub fn emit(&self, event: &E, stage: &mut dyn Stage) -> usize {
        let snapshot: Vec<(u64, Handler<E>)> = self.slots.borrow().handlers.clone();
        let mut called = 0;
        for (id, handler) in snapshot {
            if !self.slots.borrow().contains(id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    (&mut *handler)(event, &mut *stage);
                    called += 1;
                }
                Err(_) => debug!("Skipping re-entrant dispatch to listener {}", id),
            }
        }
        called
    }

    pub fn listener_count(&self) -> usize {
        self.slots.borrow().handlers.len()
    }
}

/// Guard for a registered listener
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// A settled scroll position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub offset: f64,
    /// Change since the previous event
    pub delta: f64,
}

/// The event sources a host exposes to mounted components
#[derive(Clone, Default)]
pub struct HostEvents {
    pub scroll: EventRegistry<ScrollEvent>,
    pub resize: EventRegistry<Viewport>,
    pub frame: EventRegistry<Duration>,
    offset: Rc<Cell<f64>>,
}

impl HostEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last published scroll offset
    pub fn offset(&self) -> f64 {
        self.offset.get()
    }

    pub fn publish_scroll(&self, offset: f64, stage: &mut dyn Stage) -> usize {
        let delta = offset - self.offset.replace(offset);
        self.scroll.emit(&ScrollEvent { offset, delta }, stage)
    }

    pub fn publish_resize(&self, viewport: Viewport, stage: &mut dyn Stage) -> usize {
        self.resize.emit(&viewport, stage)
    }

    pub fn publish_frame(&self, dt: Duration, stage: &mut dyn Stage) -> usize {
        self.frame.emit(&dt, stage)
    }

    /// Listeners across all sources
    pub fn listener_count(&self) -> usize {
        self.scroll.listener_count() + self.resize.listener_count() + self.frame.listener_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Property, Scene};

    #[test]
    fn test_subscription_drop_unregisters() {
        let registry: EventRegistry<f64> = EventRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let mut scene = Scene::new();

        let counter = Rc::clone(&hits);
        let sub = registry.subscribe(move |_, _| counter.set(counter.get() + 1));
        assert_eq!(registry.listener_count(), 1);
        assert_eq!(registry.emit(&1.0, &mut scene), 1);

        drop(sub);
        assert_eq!(registry.listener_count(), 0);
        assert_eq!(registry.emit(&2.0, &mut scene), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_handlers_write_to_stage() {
        let events = HostEvents::new();
        let mut scene = Scene::new();
        let fill = scene.add_block("fill");

        let _sub = events.scroll.subscribe(move |event, stage| {
            stage.set(fill, Property::ScaleX, event.offset / 100.0);
        });
        events.publish_scroll(50.0, &mut scene);
        assert_eq!(scene.get(fill, Property::ScaleX), Some(0.5));
        assert_eq!(events.offset(), 50.0);
    }

    #[test]
    fn test_listener_removed_mid_dispatch_is_skipped() {
        let registry: EventRegistry<()> = EventRegistry::new();
        let mut scene = Scene::new();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let slot = Rc::clone(&victim);
        let _first = registry.subscribe(move |_, _| {
            slot.borrow_mut().take();
        });
        *victim.borrow_mut() = Some(registry.subscribe(|_, _| panic!("listener ran after removal")));

        assert_eq!(registry.emit(&(), &mut scene), 1);
        assert_eq!(registry.listener_count(), 1);
    }

    #[test]
    fn test_guard_outliving_registry_is_harmless() {
        let registry: EventRegistry<()> = EventRegistry::new();
        let sub = registry.subscribe(|_, _| {});
        drop(registry);
        drop(sub);
    }
}
