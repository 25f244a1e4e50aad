//! Visibility watching, reveal animations, and parallax.
//!
//! [`WatchList`] is the fire-once visibility primitive shared by the reveal
//! animator and the lazy image loader. It holds element ids, checks their
//! client boxes against a margin-adjusted viewport whenever the page asks
//! ([`WatchList::poll`]), and drops an element permanently the first time it
//! qualifies. Scrolling away and back never fires it again.
//!
//! [`VisibilityAnimator`] wires two behaviors:
//!
//! - **Reveal**: content blocks receive the reveal class when at least
//!   `reveal.threshold` of their area is visible. Skipped entirely when the
//!   environment cannot observe visibility.
//! - **Parallax**: on throttled scroll, every `.parallax-element` is shifted by
//!   `translateY(-scrollY × speed)`, with `speed` read from `data-speed`.

use crate::config::SiteConfig;
use crate::dom::ElementId;
use crate::events::{EventKind, Handler, Target};
use crate::page::Page;
use crate::timers::Throttle;
use crate::types::{Rect, px};
use std::collections::HashSet;
use tracing::debug;

/// Content blocks that fade in on first sight.
pub const REVEAL_SELECTOR: &str =
    ".description, .mystic-card, .testimonial, .testimonial2, .masonry-grid-item";

/// Class marking elements that follow the scroll offset.
pub const PARALLAX_CLASS: &str = "parallax-element";

/// Root margins in px; positive grows the viewport, negative shrinks it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub fn bottom(bottom: f64) -> Self {
        Self {
            bottom,
            ..Default::default()
        }
    }

    fn apply(&self, root: Rect) -> Rect {
        Rect::new(
            root.x - self.left,
            root.y - self.top,
            root.width + self.left + self.right,
            root.height + self.top + self.bottom,
        )
    }
}

/// Fraction of `target` inside `root`.
///
/// Zero-area targets report 1.0 when they touch the root at all.
pub fn intersection_ratio(target: Rect, root: Rect) -> f64 {
    match target.intersection(&root) {
        None => 0.0,
        Some(_) if target.area() == 0.0 => 1.0,
        Some(hit) => hit.area() / target.area(),
    }
}

/// Whether `target` counts as visible inside `root` at `threshold`.
///
/// A zero threshold accepts any contact, including edge-adjacent boxes.
pub fn is_visible(target: Rect, root: Rect, threshold: f64) -> bool {
    if target.intersection(&root).is_none() {
        return false;
    }
    threshold <= 0.0 || intersection_ratio(target, root) >= threshold
}

/// Fire-once set of watched elements.
#[derive(Debug, Clone)]
pub struct WatchList {
    threshold: f64,
    margins: Margins,
    watched: Vec<ElementId>,
    fired: HashSet<ElementId>,
}

impl WatchList {
    pub fn new(threshold: f64, margins: Margins) -> Self {
        Self {
            threshold,
            margins,
            watched: Vec::new(),
            fired: HashSet::new(),
        }
    }

    /// Start watching. Elements that already fired are never re-armed.
    pub fn watch(&mut self, id: ElementId) {
        if !self.fired.contains(&id) && !self.watched.contains(&id) {
            self.watched.push(id);
        }
    }

    pub fn unwatch(&mut self, id: ElementId) {
        self.watched.retain(|w| *w != id);
    }

    pub fn is_watching(&self, id: ElementId) -> bool {
        self.watched.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.watched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }

    /// Elements that became visible since the last poll, in watch order.
    /// Each is unwatched and will not be reported again.
    pub fn poll(&mut self, page: &Page) -> Vec<ElementId> {
        let root = self.margins.apply(page.viewport_rect());
        let mut entered = Vec::new();
        self.watched.retain(|id| {
            let visible = page.document.is_attached(*id)
                && is_visible(page.client_rect(*id), root, self.threshold);
            if visible {
                entered.push(*id);
            }
            !visible
        });
        self.fired.extend(entered.iter().copied());
        entered
    }
}

#[derive(Debug, Clone)]
pub struct VisibilityAnimator {
    /// `None` when the environment cannot observe visibility.
    reveal: Option<WatchList>,
    reveal_class: String,
    parallax: Throttle,
    default_speed: f64,
}

impl VisibilityAnimator {
    pub fn new(config: &SiteConfig, page: &mut Page) -> Self {
        let reveal = if page.env.visibility_observer {
            let mut watch = WatchList::new(
                config.reveal.threshold,
                Margins::bottom(config.reveal.root_margin_bottom),
            );
            for id in page.document.select(REVEAL_SELECTOR) {
                watch.watch(id);
            }
            debug!(watched = watch.len(), "reveal animations armed");
            Some(watch)
        } else {
            debug!("visibility observation unavailable; reveal animations disabled");
            None
        };
        page.listeners
            .add(Target::Window, EventKind::Scroll, Handler::Parallax);

        Self {
            reveal,
            reveal_class: config.reveal.class.clone(),
            parallax: Throttle::new(config.timing.scroll_throttle_ms),
            default_speed: config.parallax.default_speed,
        }
    }

    /// Whether reveal wiring is active.
    pub fn reveals_enabled(&self) -> bool {
        self.reveal.is_some()
    }

    /// Mark newly visible content blocks. Returns the revealed elements.
    pub fn check_visibility(&mut self, page: &mut Page) -> Vec<ElementId> {
        let Some(watch) = self.reveal.as_mut() else {
            return Vec::new();
        };
        let entered = watch.poll(page);
        for id in &entered {
            page.document.get_mut(*id).add_class(&self.reveal_class);
        }
        entered
    }

    /// Throttled scroll entry point. Returns whether the parallax pass ran.
    pub fn on_scroll(&mut self, page: &mut Page) -> bool {
        if !self.parallax.try_fire(page.now()) {
            return false;
        }
        apply_parallax(page, self.default_speed);
        true
    }
}

/// Offset every parallax element by `-scrollY × speed`.
pub fn apply_parallax(page: &mut Page, default_speed: f64) {
    let scrolled = page.scroll_y();
    for id in page.document.select(&format!(".{PARALLAX_CLASS}")) {
        let el = page.document.get_mut(id);
        let speed = el
            .data("speed")
            .and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(default_speed);
        el.set_style("transform", &format!("translateY({})", px(-(scrolled * speed))));
    }
}

/// Mark an element with the floating animation class.
pub fn add_floating_effect(page: &mut Page, id: ElementId) {
    page.document.get_mut(id).add_class("float-effect");
}

/// Mark an element with the glow animation class.
pub fn add_glow_effect(page: &mut Page, id: ElementId) {
    page.document.get_mut(id).add_class("glow-effect");
}
