//! The page: document plus window, navigator and event-loop state.
//!
//! [`Page`] is the single mutable surface every controller works against. It
//! bundles what a browser splits across `document`, `window` and `navigator`:
//!
//! | Part | Holds |
//! |------|-------|
//! | [`Document`] | element tree, injected style rules |
//! | [`Environment`] | user agent, memory, processor count, observer support |
//! | window state | viewport, scroll offset, ready state, hidden flag |
//! | [`TimerQueue`] | virtual clock and deferred tasks |
//! | [`ListenerRegistry`] | listeners attached during wiring |
//! | opened links | URLs opened in a new browsing context |

use crate::dom::{Document, ElementId};
use crate::events::ListenerRegistry;
use crate::timers::TimerQueue;
use crate::types::Rect;
use serde::{Deserialize, Serialize};

/// Environment signals read at startup. Every field is best-effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Environment {
    pub user_agent: String,
    /// Reported device memory in GB.
    pub device_memory: Option<f64>,
    /// Reported logical processor count.
    pub hardware_concurrency: Option<u32>,
    /// Whether element visibility observation is available.
    pub visibility_observer: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            device_memory: None,
            hardware_concurrency: None,
            visibility_observer: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    Loading,
    #[default]
    Complete,
}

/// A URL opened in a new browsing context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenedLink {
    pub url: String,
    pub target: String,
    pub at_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub document: Document,
    pub env: Environment,
    pub viewport: Viewport,
    pub ready_state: ReadyState,
    pub hidden: bool,
    pub timers: TimerQueue,
    pub listeners: ListenerRegistry,
    scroll_y: f64,
    opened: Vec<OpenedLink>,
}

impl Page {
    pub fn new(document: Document, env: Environment) -> Self {
        Self {
            document,
            env,
            viewport: Viewport::default(),
            ready_state: ReadyState::Complete,
            hidden: false,
            timers: TimerQueue::new(),
            listeners: ListenerRegistry::new(),
            scroll_y: 0.0,
            opened: Vec::new(),
        }
    }

    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    pub fn with_ready_state(mut self, state: ReadyState) -> Self {
        self.ready_state = state;
        self
    }

    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Vertical scroll offset (`pageYOffset`).
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Move the scroll position; negative offsets clamp to the top.
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    /// Open a URL in a new browsing context (`window.open(url, "_blank")`).
    pub fn open(&mut self, url: &str) {
        let at_ms = self.now();
        self.opened.push(OpenedLink {
            url: url.to_string(),
            target: "_blank".to_string(),
            at_ms,
        });
    }

    pub fn opened_links(&self) -> &[OpenedLink] {
        &self.opened
    }

    /// Viewport rectangle in client coordinates.
    pub fn viewport_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height)
    }

    /// Element box relative to the viewport (`getBoundingClientRect`).
    pub fn client_rect(&self, id: ElementId) -> Rect {
        self.document.get(id).rect().translated(0.0, -self.scroll_y)
    }

    /// True when the element lies entirely inside the viewport.
    pub fn is_in_viewport(&self, id: ElementId) -> bool {
        self.viewport_rect().contains(&self.client_rect(id))
    }
}
