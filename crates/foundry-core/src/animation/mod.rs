//! Declarative tween scheduling
//!
//! # Layers
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing curves
//! - `timing` - Progress, interpolation and damping helpers
//!
//! ## L3 Molecular Layer
//! - `tween` - One `{target, property, from, to, start, duration, easing}` record
//! - `pulse` - Time-driven infinite yoyo
//!
//! ## L2 Organism Layer
//! - `builder` - Relative placement (`-=`, `<`, labels) and stagger expansion
//! - `timeline` - Stateless seeking and rendering onto a [`Stage`](crate::scene::Stage)
//!
//! # Usage
//!
//! ```ignore
//! let mut builder = TimelineBuilder::new();
//! builder
//!     .to(&[icon], &[(Property::Opacity, 1.0)], TweenVars::new(0.3), Placement::End)
//!     .to(&strokes, &[(Property::StrokeDashoffset, 0.0)],
//!         TweenVars::new(2.0).stagger(0.15).ease(EasingType::Power2InOut),
//!         "<0.1".parse()?);
//! let timeline = builder.build();
//! timeline.render_progress(&mut stage, 0.5);
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod pulse;
pub mod tween;

// L2 Organism Layer
pub mod builder;
pub mod timeline;

pub use builder::{Placement, TimelineBuilder, TweenVars};
pub use easing::EasingType;
pub use pulse::{Pulse, PulseState};
pub use timeline::{Label, Timeline};
pub use tween::Tween;
