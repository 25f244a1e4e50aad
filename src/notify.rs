//! Transient notification banners.
//!
//! A banner is appended to `<body>` immediately, stays fully visible for
//! `timing.notification_visible_ms`, then plays its fade-out animation and is
//! removed `timing.notification_fade_ms` later:
//!
//! ```text
//! t = 0            show: slideIn, attached
//! t = visible      FadeOutNotification task: fadeOut animation
//! t = visible+fade RemoveElement task: detached
//! ```

use crate::config::TimingConfig;
use crate::dom::ElementId;
use crate::page::Page;
use crate::timers::Task;
use crate::types::NotificationKind;

/// A banner that is currently on its way through the lifecycle above.
/// Entry animation; fixed regardless of the configured fade.
pub const SLIDE_IN_ANIMATION: &str = "slideIn 0.3s ease-out";

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub element: ElementId,
    pub text: String,
    pub kind: NotificationKind,
    pub created_at_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    visible_ms: u64,
    fade_ms: u64,
}

fn seconds(ms: u64) -> String {
    format!("{}s", ms as f64 / 1000.0)
}

impl Notifier {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            visible_ms: timing.notification_visible_ms,
            fade_ms: timing.notification_fade_ms,
        }
    }

    pub fn show(&self, page: &mut Page, text: &str, kind: NotificationKind) -> Notification {
        let id = page.document.create_element("div");
        let el = page.document.get_mut(id);
        el.add_class("notification");
        el.add_class(&format!("notification-{kind}"));
        el.set_text(text);
        for (property, value) in [
            ("position", "fixed"),
            ("top", "20px"),
            ("right", "20px"),
            ("padding", "1rem 2rem"),
            ("background", kind.background()),
            ("color", "white"),
            ("border-radius", "10px"),
            ("z-index", "10000"),
        ] {
            el.set_style(property, value);
        }
        el.set_style("animation", SLIDE_IN_ANIMATION);

        let body = page.document.body();
        page.document.append_child(body, id);
        page.timers
            .schedule(self.visible_ms, Task::FadeOutNotification(id));

        Notification {
            element: id,
            text: text.to_string(),
            kind,
            created_at_ms: page.now(),
        }
    }

    /// Start the fade-out and schedule removal. No-op for detached banners.
    pub fn begin_fade(&self, page: &mut Page, id: ElementId) {
        if !page.document.is_attached(id) {
            return;
        }
        page.document.get_mut(id).set_style(
            "animation",
            &format!("fadeOut {} ease-out", seconds(self.fade_ms)),
        );
        page.timers.schedule(self.fade_ms, Task::RemoveElement(id));
    }
}
