//! The fixed page table of the site.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Home,
    Prompt,
    Workflow,
    WebEditor,
    Control,
    Research,
    Breakdown,
    Postmaker,
}

impl Route {
    /// Every page, in navigation order
    pub const ALL: [Route; 8] = [
        Route::Home,
        Route::Prompt,
        Route::Workflow,
        Route::WebEditor,
        Route::Control,
        Route::Research,
        Route::Breakdown,
        Route::Postmaker,
    ];

    /// Resolve a path; `/` and `/home` both lead home
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
        match path {
            "/" | "/home" => Some(Route::Home),
            "/prompt" => Some(Route::Prompt),
            "/workflow" => Some(Route::Workflow),
            "/web-editor" => Some(Route::WebEditor),
            "/control" => Some(Route::Control),
            "/research" => Some(Route::Research),
            "/breakdown" => Some(Route::Breakdown),
            "/postmaker" => Some(Route::Postmaker),
            _ => None,
        }
    }

    /// Canonical path
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Prompt => "/prompt",
            Route::Workflow => "/workflow",
            Route::WebEditor => "/web-editor",
            Route::Control => "/control",
            Route::Research => "/research",
            Route::Breakdown => "/breakdown",
            Route::Postmaker => "/postmaker",
        }
    }

    /// Every path that resolves to this route
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Route::Home => &["/", "/home"],
            Route::Prompt => &["/prompt"],
            Route::Workflow => &["/workflow"],
            Route::WebEditor => &["/web-editor"],
            Route::Control => &["/control"],
            Route::Research => &["/research"],
            Route::Breakdown => &["/breakdown"],
            Route::Postmaker => &["/postmaker"],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Prompt => "Prompt",
            Route::Workflow => "Workflow",
            Route::WebEditor => "Web Editor",
            Route::Control => "Control",
            Route::Research => "Research",
            Route::Breakdown => "Breakdown",
            Route::Postmaker => "Post Maker",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|r| r == self).unwrap_or(0)
    }

    pub fn next(&self) -> Route {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Route {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
