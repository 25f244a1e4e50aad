//! Event kinds, listener registration, and dispatch bookkeeping.
//!
//! Controllers register [`Handler`]s against a [`Target`] once, at wiring
//! time. Because registration queries the document at that moment, elements
//! added later never receive listeners; this mirrors how the page script binds
//! to whatever markup exists when it starts.

use crate::dom::ElementId;
use crate::types::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Click,
    MouseEnter,
    MouseLeave,
    Scroll,
    Resize,
    VisibilityChange,
    DomContentLoaded,
}

impl EventKind {
    /// Only clicks propagate to ancestors; hover and window events do not.
    pub fn bubbles(&self) -> bool {
        matches!(self, EventKind::Click)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Window,
    Document,
    Element(ElementId),
}

/// Identity of a registered listener; each maps to one controller action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Root initializer: document finished parsing.
    Ready,
    /// Contact form submit button.
    SubmitContactForm,
    /// Tagged contact control; honors a per-element `data-message`.
    OpenContactLink,
    /// Floating contact container; always uses the default message.
    OpenDefaultContact,
    ImageHoverIn,
    ImageHoverOut,
    ButtonHoverIn,
    ButtonHoverOut,
    Ripple,
    /// In-page `#anchor` navigation.
    SmoothScroll,
    /// `tel:` link; logged only.
    LogCall,
    /// Visibility animator parallax pass.
    Parallax,
    /// Floating contact cluster show/hide.
    FloatingButtons,
    /// Debounced resize notice.
    ResizeSettled,
    /// Page hidden/visible notice.
    VisibilityLog,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Listener {
    pub target: Target,
    pub kind: EventKind,
    pub handler: Handler,
}

#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target: Target, kind: EventKind, handler: Handler) {
        self.listeners.push(Listener {
            target,
            kind,
            handler,
        });
    }

    /// Handlers registered on `target` for `kind`, in registration order.
    pub fn handlers_for(&self, target: Target, kind: EventKind) -> Vec<Handler> {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .map(|l| l.handler)
            .collect()
    }

    /// Number of listeners using `handler`.
    pub fn count(&self, handler: Handler) -> usize {
        self.listeners.iter().filter(|l| l.handler == handler).count()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// An input event delivered to the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub target: Target,
    /// Client coordinates for pointer events.
    pub point: Option<Point>,
}

impl Event {
    pub fn new(kind: EventKind, target: Target) -> Self {
        Self {
            kind,
            target,
            point: None,
        }
    }

    pub fn click(element: ElementId, point: Point) -> Self {
        Self {
            kind: EventKind::Click,
            target: Target::Element(element),
            point: Some(point),
        }
    }
}

/// What happened while dispatching one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Number of handlers that ran.
    pub handled: usize,
    /// A handler suppressed the element's default action (link navigation).
    pub default_prevented: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn handlers_filtered_by_target_and_kind() {
        let mut doc = Document::new();
        let button = doc.create_element("button");
        let mut registry = ListenerRegistry::new();
        registry.add(Target::Element(button), EventKind::Click, Handler::Ripple);
        registry.add(
            Target::Element(button),
            EventKind::Click,
            Handler::OpenContactLink,
        );
        registry.add(
            Target::Element(button),
            EventKind::MouseEnter,
            Handler::ButtonHoverIn,
        );
        registry.add(Target::Window, EventKind::Click, Handler::Ripple);

        assert_eq!(
            registry.handlers_for(Target::Element(button), EventKind::Click),
            vec![Handler::Ripple, Handler::OpenContactLink]
        );
        assert_eq!(registry.count(Handler::Ripple), 2);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn only_clicks_bubble() {
        assert!(EventKind::Click.bubbles());
        assert!(!EventKind::MouseEnter.bubbles());
        assert!(!EventKind::Scroll.bubbles());
    }
}
