use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEventKind};
use foundry_core::Deployment;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    /// Poll interval while something is animating
    animation_rate: Duration,
}

/// Result of a background deployment
#[derive(Debug)]
pub enum DeployResult {
    Success(Deployment),
    Failure { error: String },
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    pub fn with_animation_fps(tick_rate_ms: u64, animation_fps: u32) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_rate: Duration::from_millis(1000 / u64::from(animation_fps.max(1))),
        }
    }

    pub fn animation_rate(&self) -> Duration {
        self.animation_rate
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // crossterm reports key releases on some platforms
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(match mouse.kind {
                    MouseEventKind::ScrollDown => Some(AppEvent::Wheel(1)),
                    MouseEventKind::ScrollUp => Some(AppEvent::Wheel(-1)),
                    _ => None,
                }),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse wheel notches, positive downwards
    Wheel(i32),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_rate() {
        let handler = EventHandler::with_animation_fps(100, 50);
        assert_eq!(handler.animation_rate(), Duration::from_millis(20));
        assert_eq!(EventHandler::with_animation_fps(100, 0).animation_rate(), Duration::from_secs(1));
    }
}
