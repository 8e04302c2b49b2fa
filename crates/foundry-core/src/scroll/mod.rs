//! Scroll collaborator for scroll-driven sections
//!
//! - `events` - Listener registries with RAII subscriptions
//! - `smoother` - Damped scrolling of raw wheel/key input
//! - `trigger` - Offset to progress mapping and pinning for one section
//!
//! # Usage
//!
//! ```ignore
//! let events = HostEvents::new();
//! let mut scroller = SmoothScroller::new(config.scroll.clone());
//!
//! // input
//! scroller.on_wheel(delta);
//!
//! // every frame
//! let before = scroller.current();
//! let offset = scroller.update(dt);
//! if offset != before {
//!     events.publish_scroll(offset, &mut scene);
//! }
//! events.publish_frame(dt, &mut scene);
//! ```

pub mod events;
pub mod smoother;
pub mod trigger;

pub use events::{EventRegistry, HostEvents, ScrollEvent, Subscription};
pub use smoother::SmoothScroller;
pub use trigger::ScrollTrigger;
