//! Cosmetic interaction effects: hover transforms, click ripples, and
//! decorative parallax tagging. Nothing here affects navigation.

use crate::config::SiteConfig;
use crate::dom::ElementId;
use crate::events::{EventKind, Handler, Target};
use crate::page::Page;
use crate::timers::Task;
use crate::types::{Point, px};
use crate::visibility::PARALLAX_CLASS;
use tracing::debug;

pub const HOVER_IMAGE_SELECTOR: &str = ".mystic-image, .masonry-grid-item img";
pub const HOVER_BUTTON_SELECTOR: &str = ".mystic-button, .button, .whatsapp-button";
pub const RIPPLE_SELECTOR: &str = ".mystic-button, .button, .whatsapp-button, .boton-magico";
pub const DECORATIVE_SELECTOR: &str = ".arcane-emblem, .mystic-particles";

#[derive(Debug, Clone)]
pub struct InteractionEffects {
    ripple_ms: u64,
}

impl InteractionEffects {
    pub fn new(config: &SiteConfig, page: &mut Page) -> Self {
        let images = page.document.select(HOVER_IMAGE_SELECTOR);
        for img in &images {
            let target = Target::Element(*img);
            page.listeners
                .add(target, EventKind::MouseEnter, Handler::ImageHoverIn);
            page.listeners
                .add(target, EventKind::MouseLeave, Handler::ImageHoverOut);
        }

        let buttons = page.document.select(HOVER_BUTTON_SELECTOR);
        for button in &buttons {
            let target = Target::Element(*button);
            page.listeners
                .add(target, EventKind::MouseEnter, Handler::ButtonHoverIn);
            page.listeners
                .add(target, EventKind::MouseLeave, Handler::ButtonHoverOut);
        }

        let ripples = page.document.select(RIPPLE_SELECTOR);
        for button in &ripples {
            page.listeners
                .add(Target::Element(*button), EventKind::Click, Handler::Ripple);
        }

        let speed = config.parallax.decorative_speed.to_string();
        let decorative = page.document.select(DECORATIVE_SELECTOR);
        for id in &decorative {
            let el = page.document.get_mut(*id);
            el.add_class(PARALLAX_CLASS);
            el.set_data("speed", &speed);
        }

        debug!(
            images = images.len(),
            buttons = buttons.len(),
            ripples = ripples.len(),
            decorative = decorative.len(),
            "interaction effects wired"
        );
        Self {
            ripple_ms: config.timing.ripple_ms,
        }
    }

    /// Spawn a ripple inside `button`, centered on `point` (client
    /// coordinates; the button center when absent). Returns the ripple.
    pub fn ripple(&self, page: &mut Page, button: ElementId, point: Option<Point>) -> ElementId {
        let rect = page.client_rect(button);
        let size = rect.width.max(rect.height);
        let point = point.unwrap_or(Point::new(
            rect.left() + rect.width / 2.0,
            rect.top() + rect.height / 2.0,
        ));
        let x = point.x - rect.left() - size / 2.0;
        let y = point.y - rect.top() - size / 2.0;

        let ripple = page.document.create_element("span");
        let el = page.document.get_mut(ripple);
        for (property, value) in [
            ("position", "absolute".to_string()),
            ("width", px(size)),
            ("height", px(size)),
            ("left", px(x)),
            ("top", px(y)),
            ("background", "rgba(255, 255, 255, 0.3)".to_string()),
            ("border-radius", "50%".to_string()),
            ("transform", "scale(0)".to_string()),
            (
                "animation",
                format!("ripple {}s linear", self.ripple_ms as f64 / 1000.0),
            ),
            ("pointer-events", "none".to_string()),
        ] {
            el.set_style(property, &value);
        }

        let host = page.document.get_mut(button);
        host.set_style("position", "relative");
        host.set_style("overflow", "hidden");
        page.document.append_child(button, ripple);
        page.timers.schedule(self.ripple_ms, Task::RemoveElement(ripple));
        ripple
    }
}

pub fn image_hover_in(page: &mut Page, id: ElementId) {
    let el = page.document.get_mut(id);
    el.set_style("transform", "scale(1.05)");
    el.set_style("filter", "brightness(1.1)");
}

pub fn image_hover_out(page: &mut Page, id: ElementId) {
    let el = page.document.get_mut(id);
    el.set_style("transform", "scale(1)");
    el.set_style("filter", "brightness(0.8)");
}

pub fn button_hover_in(page: &mut Page, id: ElementId) {
    page.document
        .get_mut(id)
        .set_style("transform", "scale(1.05) translateY(-2px)");
}

pub fn button_hover_out(page: &mut Page, id: ElementId) {
    page.document
        .get_mut(id)
        .set_style("transform", "scale(1) translateY(0)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, ElementSpec};
    use crate::page::Environment;

    fn page(specs: Vec<ElementSpec>) -> Page {
        let mut doc = Document::new();
        let body = doc.body();
        for spec in &specs {
            doc.insert_spec(body, spec);
        }
        Page::new(doc, Environment::default())
    }

    #[test]
    fn wires_hover_and_ripple_sets() {
        let mut page = page(vec![
            ElementSpec::new("img").class("mystic-image"),
            ElementSpec::new("div")
                .class("masonry-grid-item")
                .child(ElementSpec::new("img")),
            ElementSpec::new("a").class("button"),
            ElementSpec::new("a").class("boton-magico"),
        ]);
        InteractionEffects::new(&SiteConfig::default(), &mut page);

        assert_eq!(page.listeners.count(Handler::ImageHoverIn), 2);
        assert_eq!(page.listeners.count(Handler::ImageHoverOut), 2);
        // .boton-magico ripples but has no hover transform.
        assert_eq!(page.listeners.count(Handler::ButtonHoverIn), 1);
        assert_eq!(page.listeners.count(Handler::Ripple), 2);
    }

    #[test]
    fn hover_toggles_image_styles() {
        let mut page = page(vec![ElementSpec::new("img").id("i").class("mystic-image")]);
        let img = page.document.element_by_id("i").unwrap();

        image_hover_in(&mut page, img);
        assert_eq!(page.document.get(img).style("transform"), Some("scale(1.05)"));
        assert_eq!(page.document.get(img).style("filter"), Some("brightness(1.1)"));

        image_hover_out(&mut page, img);
        assert_eq!(page.document.get(img).style("transform"), Some("scale(1)"));
        assert_eq!(page.document.get(img).style("filter"), Some("brightness(0.8)"));
    }

    #[test]
    fn hover_lifts_buttons() {
        let mut page = page(vec![ElementSpec::new("a").id("b").class("button")]);
        let button = page.document.element_by_id("b").unwrap();
        button_hover_in(&mut page, button);
        assert_eq!(
            page.document.get(button).style("transform"),
            Some("scale(1.05) translateY(-2px)")
        );
        button_hover_out(&mut page, button);
        assert_eq!(
            page.document.get(button).style("transform"),
            Some("scale(1) translateY(0)")
        );
    }

    #[test]
    fn ripple_is_sized_and_centered_on_click() {
        let mut page = page(vec![
            ElementSpec::new("a")
                .id("b")
                .class("mystic-button")
                .rect(100.0, 300.0, 200.0, 50.0),
        ]);
        page.set_scroll_y(100.0);
        let effects = InteractionEffects::new(&SiteConfig::default(), &mut page);
        let button = page.document.element_by_id("b").unwrap();

        // Button client box is (100, 200); click 20px right, 10px down.
        let ripple = effects.ripple(&mut page, button, Some(Point::new(120.0, 210.0)));

        let el = page.document.get(ripple);
        assert_eq!(el.tag(), "span");
        assert_eq!(el.style("width"), Some("200px"));
        assert_eq!(el.style("height"), Some("200px"));
        assert_eq!(el.style("left"), Some("-80px"));
        assert_eq!(el.style("top"), Some("-90px"));
        assert_eq!(el.style("animation"), Some("ripple 0.6s linear"));
        assert_eq!(page.document.parent(ripple), Some(button));

        let host = page.document.get(button);
        assert_eq!(host.style("position"), Some("relative"));
        assert_eq!(host.style("overflow"), Some("hidden"));

        assert_eq!(page.timers.next_due(), Some(600));
        assert_eq!(page.timers.pop_due(600), Some(Task::RemoveElement(ripple)));
    }

    #[test]
    fn ripple_without_point_centers_on_button() {
        let mut page = page(vec![
            ElementSpec::new("a")
                .id("b")
                .class("button")
                .rect(0.0, 0.0, 40.0, 40.0),
        ]);
        let effects = InteractionEffects::new(&SiteConfig::default(), &mut page);
        let button = page.document.element_by_id("b").unwrap();
        let ripple = effects.ripple(&mut page, button, None);
        assert_eq!(page.document.get(ripple).style("left"), Some("0px"));
        assert_eq!(page.document.get(ripple).style("top"), Some("0px"));
    }

    #[test]
    fn decorative_elements_become_parallax() {
        let mut page = page(vec![
            ElementSpec::new("div").id("emblem").class("arcane-emblem"),
            ElementSpec::new("div").id("dust").class("mystic-particles"),
        ]);
        InteractionEffects::new(&SiteConfig::default(), &mut page);
        for id in ["emblem", "dust"] {
            let el = page.document.element_by_id(id).unwrap();
            let el = page.document.get(el);
            assert!(el.has_class(PARALLAX_CLASS));
            assert_eq!(el.data("speed"), Some("0.3"));
        }
    }
}
