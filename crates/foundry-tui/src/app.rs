use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use foundry_core::geometry::{Position, Viewport};
use foundry_core::scroll::{HostEvents, SmoothScroller};
use foundry_core::section::{default_tiles, FeatureSection, SectionHandles, Tile};
use foundry_core::{AppConfig, Deployment, Route, Scene, Stage};
use tracing::{debug, info, warn};

use crate::input::Action;
use crate::page::{PageLayout, SectionLayout};
use crate::theme::Theme;

/// Offsets closer than this count as unchanged
const OFFSET_EPSILON: f64 = 1e-3;

/// Application mode
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    /// HTML preview overlay
    Preview,
    /// Popup notification, dismissed by any key
    Notice(Notice),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

/// Deployment of the previewed page
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DeployStatus {
    #[default]
    Idle,
    Deploying,
    Deployed(Deployment),
    Failed(String),
}

/// An HTML file shown as text; scripts never run
#[derive(Debug, Clone)]
pub struct Preview {
    pub path: PathBuf,
    pub html: String,
    pub scroll: u16,
    rendered: Option<(u16, String)>,
}

impl Preview {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::from_html(path.to_path_buf(), html))
    }

    pub fn from_html(path: PathBuf, html: String) -> Self {
        Self {
            path,
            html,
            scroll: 0,
            rendered: None,
        }
    }

    /// Text rendering of the page wrapped to `width` columns, cached per width
    pub fn text(&mut self, width: u16) -> &str {
        let width = width.max(10);
        if self.rendered.as_ref().map(|(w, _)| *w) != Some(width) {
            let text = html2text::from_read(self.html.as_bytes(), width as usize)
                .unwrap_or_else(|_| self.html.clone());
            self.rendered = Some((width, text));
        }
        self.rendered.as_ref().map(|(_, text)| text.as_str()).unwrap_or_default()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Work the run loop performs on the app's behalf
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Deploy { html: String },
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub route: Route,
    pub mode: Mode,
    pub scene: Scene,
    pub events: HostEvents,
    pub scroller: SmoothScroller,
    pub tiles: Vec<Tile>,
    pub handles: SectionHandles,
    pub page: PageLayout,
    section: Option<FeatureSection>,
    positions: Rc<RefCell<Vec<Position>>>,
    pub preview: Option<Preview>,
    pub deploy: DeployStatus,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    last_frame: Instant,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme, viewport: Viewport) -> Self {
        let tiles = default_tiles();
        let mut scene = Scene::new();
        scene.set_viewport(viewport);
        let handles = SectionHandles::build(&mut scene, &tiles);
        let page = PageLayout::new(viewport, &config.sequence, true);
        let mut scroller = SmoothScroller::new(config.scroll.clone());
        scroller.set_limit(page.scroll_limit());

        let mut app = Self {
            config,
            theme,
            route: Route::Home,
            mode: Mode::Normal,
            scene,
            events: HostEvents::new(),
            scroller,
            tiles,
            handles,
            page,
            section: None,
            positions: Rc::default(),
            preview: None,
            deploy: DeployStatus::Idle,
            should_quit: false,
            status_message: None,
            pending_key: None,
            last_frame: Instant::now(),
        };
        app.mount_section();
        app
    }

    pub fn with_preview(mut self, preview: Preview) -> Self {
        self.preview = Some(preview);
        self
    }

    pub fn section(&self) -> Option<&FeatureSection> {
        self.section.as_ref()
    }

    /// Tile positions last reported by the layout prober
    pub fn positions(&self) -> Vec<Position> {
        self.positions.borrow().clone()
    }

    pub fn viewport(&self) -> Viewport {
        self.scene.viewport()
    }

    pub fn offset(&self) -> f64 {
        self.events.offset()
    }

    /// How far the pinned section has been held back at the current offset
    pub fn pin_shift(&self) -> f64 {
        self.section
            .as_ref()
            .and_then(|s| s.sequencer().trigger())
            .map(|t| t.pin_shift(self.offset()))
            .unwrap_or(0.0)
    }

    pub fn is_pinned(&self) -> bool {
        self.section
            .as_ref()
            .and_then(|s| s.sequencer().trigger())
            .map(|t| t.is_pinned(self.offset()))
            .unwrap_or(false)
    }

    pub fn section_layout(&self) -> SectionLayout {
        let bounds = self.page.section_box(self.offset(), self.pin_shift());
        SectionLayout::new(bounds, self.handles.tiles.len())
    }

    /// Write the current layout into the scene
    fn place_section(&mut self) {
        let bounds = self.page.section_box(self.offset(), self.pin_shift());
        let layout = SectionLayout::new(bounds, self.handles.tiles.len());
        self.scene.set_box(self.handles.section, bounds);
        for (tile, card) in self.handles.tiles.iter().zip(layout.cards) {
            self.scene.set_box(tile.card, card);
        }
    }

    fn mount_section(&mut self) {
        self.place_section();
        let sink = Rc::clone(&self.positions);
        let section = FeatureSection::mount(
            &mut self.scene,
            &self.events,
            &self.handles,
            &self.config.sequence,
            move |positions| *sink.borrow_mut() = positions.to_vec(),
        );
        let animated = section.sequencer().is_animated();
        self.section = Some(section);
        self.relayout(self.viewport(), animated);
    }

    fn unmount_section(&mut self) {
        if let Some(mut section) = self.section.take() {
            section.unmount(&mut self.scene);
        }
    }

    fn relayout(&mut self, viewport: Viewport, animated: bool) {
        self.page = PageLayout::new(viewport, &self.config.sequence, animated);
        self.scroller.set_limit(self.page.scroll_limit());
    }

    /// Terminal resized; `height` excludes the status bar
    pub fn resize(&mut self, width: u16, height: u16) {
        let viewport = Viewport::new(f64::from(width), f64::from(height));
        if viewport == self.viewport() {
            return;
        }
        debug!("Viewport resized to {}x{}", width, height);
        self.scene.set_viewport(viewport);
        let animated = self
            .section
            .as_ref()
            .map(|s| s.sequencer().is_animated())
            .unwrap_or(false);
        self.relayout(viewport, animated);
        self.place_section();
        self.events.publish_resize(viewport, &mut self.scene);

        // The limit may have clamped the offset
        let offset = self.scroller.current();
        self.publish_offset(offset);
    }

    fn publish_offset(&mut self, offset: f64) {
        if (offset - self.events.offset()).abs() > OFFSET_EPSILON {
            self.events.publish_scroll(offset, &mut self.scene);
        }
    }

    /// Advance scrolling and frame-driven animation
    pub fn tick(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(dt);
    }

    pub fn advance(&mut self, dt: Duration) {
        let offset = self.scroller.update(dt);
        self.publish_offset(offset);
        self.events.publish_frame(dt, &mut self.scene);
    }

    /// Whether the next frame should come at the animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.scroller.needs_update()
            || self
                .section
                .as_ref()
                .map(|s| s.sequencer().pulse_running())
                .unwrap_or(false)
    }

    pub fn switch_route(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        info!("Switching page {} -> {}", self.route, route);
        if self.route == Route::Home {
            self.unmount_section();
        }
        self.route = route;
        self.scroller.set_scroll(0.0);
        self.publish_offset(0.0);
        if route == Route::Home {
            self.mount_section();
        }
    }

    pub fn on_wheel(&mut self, notches: i32) {
        if self.mode == Mode::Preview {
            let rows = notches.saturating_mul(self.config.scroll.lines_per_step as i32);
            self.scroll_preview(rows);
            return;
        }
        self.scroller
            .on_wheel(f64::from(notches) * f64::from(self.config.scroll.lines_per_step));
    }

    fn scroll_preview(&mut self, rows: i32) {
        if let Some(preview) = self.preview.as_mut() {
            let amount = u16::try_from(rows.unsigned_abs()).unwrap_or(u16::MAX);
            preview.scroll = if rows < 0 {
                preview.scroll.saturating_sub(amount)
            } else {
                preview.scroll.saturating_add(amount)
            };
        }
    }

    fn scroll_rows(&mut self, rows: f64) {
        if self.mode == Mode::Preview {
            self.scroll_preview(rows.round() as i32);
        } else {
            self.scroller.scroll_by(rows);
        }
    }

    /// Apply an input action; some actions need the run loop to do async work
    pub fn handle_action(&mut self, action: Action) -> Option<Command> {
        if action != Action::PendingG {
            self.pending_key = None;
        }
        let vh = self.viewport().height;
        let step = f64::from(self.config.scroll.lines_per_step);

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_rows(step),
            Action::ScrollUp => self.scroll_rows(-step),
            Action::ScrollHalfPageDown => self.scroll_rows((vh / 2.0).max(1.0)),
            Action::ScrollHalfPageUp => self.scroll_rows(-(vh / 2.0).max(1.0)),
            Action::ScrollPageDown => self.scroll_rows(vh.max(1.0)),
            Action::ScrollPageUp => self.scroll_rows(-vh.max(1.0)),
            Action::JumpToTop => {
                if self.mode == Mode::Preview {
                    self.scroll_preview(i32::MIN);
                } else {
                    self.scroller.scroll_to(0.0);
                }
            }
            Action::JumpToBottom => {
                if self.mode == Mode::Preview {
                    self.scroll_preview(i32::MAX);
                } else {
                    let limit = self.scroller.limit();
                    self.scroller.scroll_to(limit);
                }
            }
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextRoute => self.switch_route(self.route.next()),
            Action::PrevRoute => self.switch_route(self.route.prev()),
            Action::TogglePreview => match (&self.mode, &self.preview) {
                (Mode::Preview, _) => self.mode = Mode::Normal,
                (_, Some(_)) => self.mode = Mode::Preview,
                (_, None) => {
                    self.status_message = Some("No HTML to preview (start with --html <file>)".to_string());
                }
            },
            Action::Deploy => return self.start_deploy(),
            Action::OpenUrl => self.open_deployed_url(),
            Action::ExitMode => self.mode = Mode::Normal,
            Action::None => {}
        }
        None
    }

    fn start_deploy(&mut self) -> Option<Command> {
        if self.deploy == DeployStatus::Deploying {
            self.status_message = Some("Deployment already in progress".to_string());
            return None;
        }
        let Some(preview) = self.preview.as_ref() else {
            self.status_message = Some("Nothing to deploy".to_string());
            return None;
        };
        self.deploy = DeployStatus::Deploying;
        self.status_message = Some(format!("Deploying {}...", preview.file_name()));
        Some(Command::Deploy {
            html: preview.html.clone(),
        })
    }

    /// Record the outcome of a deployment and notify
    pub fn finish_deploy(&mut self, result: Result<Deployment, String>) {
        match result {
            Ok(deployment) => {
                self.status_message = Some(format!("Deployed: {}", deployment.url));
                self.mode = Mode::Notice(Notice {
                    title: "Deployed".to_string(),
                    message: format!("Successfully deployed!\n\nURL: {}", deployment.url),
                    is_error: false,
                });
                self.deploy = DeployStatus::Deployed(deployment);
            }
            Err(error) => {
                self.status_message = Some(format!("Deployment failed: {}", error));
                self.mode = Mode::Notice(Notice {
                    title: "Deployment failed".to_string(),
                    message: error.clone(),
                    is_error: true,
                });
                self.deploy = DeployStatus::Failed(error);
            }
        }
    }

    fn open_deployed_url(&mut self) {
        let DeployStatus::Deployed(deployment) = &self.deploy else {
            self.status_message = Some("Nothing deployed yet".to_string());
            return;
        };
        if let Err(e) = open::that(&deployment.url) {
            warn!("Failed to open {}: {}", deployment.url, e);
            self.status_message = Some(format!("Failed to open browser: {}", e));
        }
    }

    /// Release the section before the terminal is restored
    pub fn shutdown(&mut self) {
        self.unmount_section();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;
    use foundry_core::Property;

    fn app() -> App {
        App::new(
            Arc::new(AppConfig::default()),
            theme::dark(),
            Viewport::new(120.0, 40.0),
        )
    }

    fn settle(app: &mut App) {
        for _ in 0..600 {
            app.advance(Duration::from_millis(16));
        }
    }

    #[test]
    fn test_mount_on_start() {
        let app = app();
        let section = app.section().unwrap();
        assert!(section.sequencer().is_animated());
        assert_eq!(app.positions().len(), 3);
        assert_eq!(app.events.listener_count(), 4);
        assert!(app.needs_fast_update());
    }

    #[test]
    fn test_jump_to_bottom_completes_sequence() {
        let mut app = app();
        app.handle_action(Action::JumpToBottom);
        settle(&mut app);

        let sequencer = app.section().unwrap().sequencer();
        assert_eq!(sequencer.progress(), Some(1.0));
        assert!(!sequencer.pulse_running());
        let fill = app.handles.fill.unwrap();
        assert!((app.scene.value(fill, Property::ScaleX) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_route_switch_unmounts_and_remounts() {
        let mut app = app();
        app.handle_action(Action::NextRoute);
        assert_eq!(app.route, Route::Prompt);
        assert!(app.section().is_none());
        assert_eq!(app.events.listener_count(), 0);

        app.handle_action(Action::PrevRoute);
        assert_eq!(app.route, Route::Home);
        assert_eq!(app.events.listener_count(), 4);
        assert_eq!(app.offset(), 0.0);
    }

    #[test]
    fn test_resize_keeps_progress_bounded() {
        let mut app = app();
        app.handle_action(Action::ScrollPageDown);
        settle(&mut app);
        app.resize(80, 30);
        let progress = app.section().unwrap().sequencer().progress().unwrap();
        assert!((0.0..=1.0).contains(&progress));
        assert_eq!(app.positions().len(), 3);
        assert!(app.offset() <= app.page.scroll_limit());
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = app();
        app.handle_action(Action::PendingG);
        assert_eq!(app.pending_key, Some('g'));
        app.handle_action(Action::JumpToTop);
        assert_eq!(app.pending_key, None);
    }

    #[test]
    fn test_deploy_requires_preview() {
        let mut app = app();
        assert_eq!(app.handle_action(Action::Deploy), None);

        let mut app = app.with_preview(Preview::from_html(
            PathBuf::from("landing.html"),
            "<h1>Launch</h1>".to_string(),
        ));
        assert_eq!(
            app.handle_action(Action::Deploy),
            Some(Command::Deploy {
                html: "<h1>Launch</h1>".to_string()
            })
        );
        assert_eq!(app.deploy, DeployStatus::Deploying);
        assert_eq!(app.handle_action(Action::Deploy), None);

        app.finish_deploy(Err("quota exceeded".to_string()));
        assert!(matches!(app.mode, Mode::Notice(ref n) if n.is_error));
        assert_eq!(app.deploy, DeployStatus::Failed("quota exceeded".to_string()));
    }

    #[test]
    fn test_preview_toggle_and_scroll() {
        let mut app = app().with_preview(Preview::from_html(
            PathBuf::from("page.html"),
            "<p>one</p><p>two</p>".to_string(),
        ));
        app.handle_action(Action::TogglePreview);
        assert_eq!(app.mode, Mode::Preview);
        app.handle_action(Action::ScrollDown);
        assert_eq!(app.preview.as_ref().unwrap().scroll, 3);
        app.handle_action(Action::JumpToTop);
        assert_eq!(app.preview.as_ref().unwrap().scroll, 0);
        assert!(app.preview.as_mut().unwrap().text(40).contains("two"));
        app.handle_action(Action::ExitMode);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_shutdown_releases_listeners() {
        let mut app = app();
        app.shutdown();
        assert_eq!(app.events.listener_count(), 0);
    }
}
