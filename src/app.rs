//! Root initializer: builds the controllers and routes page events to them.
//!
//! ## Startup
//!
//! Controllers are constructed in a fixed order, each wiring its listeners
//! against the markup present at that moment:
//!
//! 1. [`CapabilityDetector`] tags the body with the device tier
//! 2. [`PhraseSampler`]
//! 3. [`VisibilityAnimator`] arms reveal blocks and the parallax pass
//! 4. [`ContactForm`] binds the form, contact buttons, and floating container
//! 5. [`InteractionEffects`] binds hover/ripple and tags decorative parallax
//! 6. [`ImageLoader`] arms deferred images and rewrites sources
//!
//! Once the document is ready ([`App::on_ready`]) the phrase container is
//! filled, `tel:` and `#anchor` links are wired, the animation keyframes are
//! injected, and the window resize/scroll and visibility listeners attach.
//!
//! ## Time
//!
//! The page clock only moves through [`App::advance`], which runs scheduled
//! tasks (notification fades, element removals) and the resize debounce in
//! deadline order.

use crate::capability::{CapabilityDetector, DeviceCapabilities};
use crate::config::{PhrasesConfig, SiteConfig};
use crate::contact::{ContactForm, SubmitOutcome};
use crate::dom::ElementId;
use crate::effects::{self, InteractionEffects};
use crate::events::{DispatchOutcome, Event, EventKind, Handler, Target};
use crate::images::ImageLoader;
use crate::page::{Page, ReadyState};
use crate::phrases::PhraseSampler;
use crate::timers::{Debounce, Task, Throttle};
use crate::types::Point;
use crate::visibility::VisibilityAnimator;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

pub const FLOATING_CLUSTER_SELECTOR: &str = ".contenedor-botones-misticos";
pub const PHONE_LINK_SELECTOR: &str = "a[href^=\"tel:\"]";
pub const ANCHOR_LINK_SELECTOR: &str = "a[href^=\"#\"]";

/// Keyframes used by ripples and notification banners.
pub const ANIMATION_CSS: &str = "
      @keyframes ripple {
        to {
          transform: scale(4);
          opacity: 0;
        }
      }

      @keyframes fadeOut {
        from { opacity: 1; transform: translateX(0); }
        to { opacity: 0; transform: translateX(100%); }
      }

      .notification {
        animation: slideIn 0.3s ease-out;
      }
    ";

/// Console-level notices the page emits, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    Ready,
    CallStarted,
    ResizeSettled,
    PageHidden,
    PageVisible,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Ready => "landing page ready",
            Notice::CallStarted => "call started",
            Notice::ResizeSettled => "window resized",
            Notice::PageHidden => "page hidden",
            Notice::PageVisible => "page visible",
        }
    }
}

/// Elements that crossed into view during one visibility check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibilityChanges {
    pub revealed: Vec<ElementId>,
    pub loaded: Vec<ElementId>,
}

impl VisibilityChanges {
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty() && self.loaded.is_empty()
    }
}

pub struct App {
    config: SiteConfig,
    page: Page,
    capability: CapabilityDetector,
    phrases: PhraseSampler,
    animator: VisibilityAnimator,
    contact: ContactForm,
    effects: InteractionEffects,
    images: ImageLoader,
    floating: Throttle,
    resize: Debounce,
    ready: bool,
    notices: Vec<Notice>,
    last_submit: Option<SubmitOutcome>,
}

impl App {
    pub fn new(config: SiteConfig, page: Page) -> Self {
        Self::assemble(config, page, PhraseSampler::new)
    }

    /// Like [`App::new`] with a caller-supplied phrase RNG.
    pub fn with_rng(config: SiteConfig, page: Page, rng: StdRng) -> Self {
        Self::assemble(config, page, |phrases| PhraseSampler::with_rng(phrases, rng))
    }

    fn assemble(
        config: SiteConfig,
        mut page: Page,
        sampler: impl FnOnce(&PhrasesConfig) -> PhraseSampler,
    ) -> Self {
        let capability = CapabilityDetector::new(&config.performance, &mut page);
        let phrases = sampler(&config.phrases);
        let animator = VisibilityAnimator::new(&config, &mut page);
        let contact = ContactForm::new(&config, &mut page);
        let effects = InteractionEffects::new(&config, &mut page);
        let images = ImageLoader::new(&config, &mut page);

        let mut app = Self {
            floating: Throttle::new(config.timing.scroll_throttle_ms),
            resize: Debounce::new(config.timing.resize_debounce_ms),
            config,
            page,
            capability,
            phrases,
            animator,
            contact,
            effects,
            images,
            ready: false,
            notices: Vec::new(),
            last_submit: None,
        };

        if app.page.ready_state == ReadyState::Loading {
            app.page.listeners.add(
                Target::Document,
                EventKind::DomContentLoaded,
                Handler::Ready,
            );
        } else {
            app.on_ready();
        }
        app.check_visibility();
        app
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn capabilities(&self) -> DeviceCapabilities {
        self.capability.capabilities()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Result of the most recent contact form submit, if any.
    pub fn last_submit(&self) -> Option<&SubmitOutcome> {
        self.last_submit.as_ref()
    }

    /// Document-ready work. Runs at most once.
    pub fn on_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        self.notice(Notice::Ready);

        self.phrases.populate(&mut self.page);

        let phones = self.page.document.select(PHONE_LINK_SELECTOR);
        for link in &phones {
            self.page
                .listeners
                .add(Target::Element(*link), EventKind::Click, Handler::LogCall);
        }
        let anchors = self.page.document.select(ANCHOR_LINK_SELECTOR);
        for link in &anchors {
            self.page.listeners.add(
                Target::Element(*link),
                EventKind::Click,
                Handler::SmoothScroll,
            );
        }

        self.page.document.add_style_rules(ANIMATION_CSS);

        let listeners = &mut self.page.listeners;
        listeners.add(Target::Window, EventKind::Resize, Handler::ResizeSettled);
        listeners.add(Target::Window, EventKind::Scroll, Handler::FloatingButtons);
        listeners.add(
            Target::Document,
            EventKind::VisibilityChange,
            Handler::VisibilityLog,
        );
        debug!(phones = phones.len(), anchors = anchors.len(), "document wiring done");
    }

    /// Deliver an event. Clicks bubble from the target through its ancestors
    /// to the document and window; every other event stays on its target.
    pub fn dispatch(&mut self, event: Event) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        for current in self.propagation_path(event.target, event.kind) {
            for handler in self.page.listeners.handlers_for(current, event.kind) {
                outcome.handled += 1;
                if self.run(handler, &event, current) {
                    outcome.default_prevented = true;
                }
            }
        }
        outcome
    }

    fn propagation_path(&self, target: Target, kind: EventKind) -> Vec<Target> {
        let Target::Element(start) = target else {
            return vec![target];
        };
        if !kind.bubbles() {
            return vec![target];
        }
        let mut path = vec![target];
        let mut node = start;
        while let Some(parent) = self.page.document.parent(node) {
            path.push(Target::Element(parent));
            node = parent;
        }
        path.push(Target::Document);
        path.push(Target::Window);
        path
    }

    /// Run one handler. Returns true if it suppresses the default action.
    fn run(&mut self, handler: Handler, event: &Event, current: Target) -> bool {
        let current_el = match current {
            Target::Element(id) => Some(id),
            _ => None,
        };
        match (handler, current_el) {
            (Handler::Ready, _) => {
                self.on_ready();
                false
            }
            (Handler::SubmitContactForm, _) => {
                let outcome = self.contact.submit(&mut self.page);
                self.last_submit = Some(outcome);
                true
            }
            (Handler::OpenContactLink, Some(button)) => {
                let origin = match event.target {
                    Target::Element(id) => id,
                    _ => button,
                };
                self.contact.open_for(&mut self.page, origin, button);
                true
            }
            (Handler::OpenDefaultContact, _) => {
                self.contact.open_default(&mut self.page);
                false
            }
            (Handler::ImageHoverIn, Some(id)) => {
                effects::image_hover_in(&mut self.page, id);
                false
            }
            (Handler::ImageHoverOut, Some(id)) => {
                effects::image_hover_out(&mut self.page, id);
                false
            }
            (Handler::ButtonHoverIn, Some(id)) => {
                effects::button_hover_in(&mut self.page, id);
                false
            }
            (Handler::ButtonHoverOut, Some(id)) => {
                effects::button_hover_out(&mut self.page, id);
                false
            }
            (Handler::Ripple, Some(id)) => {
                self.effects.ripple(&mut self.page, id, event.point);
                false
            }
            (Handler::SmoothScroll, Some(link)) => {
                self.smooth_scroll(link);
                true
            }
            (Handler::LogCall, _) => {
                self.notice(Notice::CallStarted);
                false
            }
            (Handler::Parallax, _) => {
                self.animator.on_scroll(&mut self.page);
                false
            }
            (Handler::FloatingButtons, _) => {
                if self.floating.try_fire(self.page.now()) {
                    self.update_floating_buttons();
                }
                false
            }
            (Handler::ResizeSettled, _) => {
                self.resize.call(self.page.now());
                false
            }
            (Handler::VisibilityLog, _) => {
                let notice = if self.page.hidden {
                    Notice::PageHidden
                } else {
                    Notice::PageVisible
                };
                self.notice(notice);
                false
            }
            _ => false,
        }
    }

    fn notice(&mut self, notice: Notice) {
        info!("{}", notice.message());
        self.notices.push(notice);
    }

    /// Scroll so the anchor's target sits just below the fixed header.
    /// Targets that do not exist are ignored.
    fn smooth_scroll(&mut self, link: ElementId) {
        let Some(href) = self.page.document.get(link).attr("href") else {
            return;
        };
        let id = href.strip_prefix('#').unwrap_or(href).to_string();
        let Some(target) = self.page.document.element_by_id(&id) else {
            debug!(href = %href, "anchor target missing");
            return;
        };
        let top = self.page.document.get(target).rect().top();
        self.scroll_to(top - self.config.scroll.header_offset);
    }

    fn update_floating_buttons(&mut self) {
        let Some(cluster) = self.page.document.select_first(FLOATING_CLUSTER_SELECTOR) else {
            return;
        };
        let (opacity, transform) = if self.page.scroll_y() > self.config.scroll.threshold {
            ("1", "translateY(0)")
        } else {
            ("0.8", "translateY(10px)")
        };
        let el = self.page.document.get_mut(cluster);
        el.set_style("opacity", opacity);
        el.set_style("transform", transform);
    }

    /// Run the reveal and deferred-image watchers against the current layout.
    pub fn check_visibility(&mut self) -> VisibilityChanges {
        VisibilityChanges {
            revealed: self.animator.check_visibility(&mut self.page),
            loaded: self.images.check_visibility(&mut self.page),
        }
    }

    // ---------------------------------------------------------------------
    // Host actions
    // ---------------------------------------------------------------------

    pub fn dom_content_loaded(&mut self) -> DispatchOutcome {
        self.page.ready_state = ReadyState::Complete;
        self.dispatch(Event::new(EventKind::DomContentLoaded, Target::Document))
    }

    /// Click the center of an element.
    pub fn click(&mut self, id: ElementId) -> DispatchOutcome {
        let rect = self.page.client_rect(id);
        let point = Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
        self.dispatch(Event::click(id, point))
    }

    pub fn click_at(&mut self, id: ElementId, point: Point) -> DispatchOutcome {
        self.dispatch(Event::click(id, point))
    }

    pub fn hover(&mut self, id: ElementId) -> DispatchOutcome {
        self.dispatch(Event::new(EventKind::MouseEnter, Target::Element(id)))
    }

    pub fn unhover(&mut self, id: ElementId) -> DispatchOutcome {
        self.dispatch(Event::new(EventKind::MouseLeave, Target::Element(id)))
    }

    /// Move the scroll position, fire the window scroll handlers, then run
    /// the visibility watchers.
    pub fn scroll_to(&mut self, y: f64) -> DispatchOutcome {
        self.page.set_scroll_y(y);
        let outcome = self.dispatch(Event::new(EventKind::Scroll, Target::Window));
        self.check_visibility();
        outcome
    }

    pub fn resize(&mut self, width: f64, height: f64) -> DispatchOutcome {
        self.page.viewport.width = width;
        self.page.viewport.height = height;
        let outcome = self.dispatch(Event::new(EventKind::Resize, Target::Window));
        self.check_visibility();
        outcome
    }

    pub fn set_hidden(&mut self, hidden: bool) -> DispatchOutcome {
        self.page.hidden = hidden;
        self.dispatch(Event::new(EventKind::VisibilityChange, Target::Document))
    }

    /// Let `ms` milliseconds pass, running everything that falls due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.page.now().saturating_add(ms);
        loop {
            let timer = self.page.timers.next_due().filter(|due| *due <= until);
            let settle = self.resize.deadline().filter(|due| *due <= until);
            match (timer, settle) {
                (Some(t), Some(s)) if s < t => self.settle_resize(s),
                (Some(_), _) => {
                    if let Some(task) = self.page.timers.pop_due(until) {
                        self.run_task(task);
                    }
                }
                (None, Some(s)) => self.settle_resize(s),
                (None, None) => break,
            }
        }
        self.page.timers.set_now(until);
    }

    fn settle_resize(&mut self, at: u64) {
        self.page.timers.set_now(at);
        if self.resize.poll(at) {
            self.notice(Notice::ResizeSettled);
        }
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::FadeOutNotification(id) => {
                self.contact.notifier().begin_fade(&mut self.page, id);
            }
            Task::RemoveElement(id) => {
                self.page.document.remove(id);
            }
        }
    }
}
