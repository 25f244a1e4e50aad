//! Shared test utilities for the landing-kit test suite.
//!
//! Provides a representative landing page (every control the controllers
//! look for, laid out on a 1280×800 viewport) plus lookup helpers.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let page = landing_page(Environment::default());
//! let card = by_id(&page, "card");
//! assert!(class_of(&page, "card").contains(&"mystic-card".to_string()));
//! ```
//!
//! Layout (document coordinates, px):
//!
//! | id | y | notes |
//! |---|---|---|
//! | `emblem`, `particles` | 0 | decorative |
//! | `wordsContainer` | 250 | phrase display |
//! | `intro` | 400 | reveal block, visible at load |
//! | `cta`, `mystic-wa`, `call` | 600 | contact/phone buttons |
//! | `servicios` / `card` | 900 / 950 | reveal block below the fold |
//! | `tile` / `tile-img` | 1600 | deferred image |
//! | `altar` | 2000 | old-host image |
//! | `contacto` | 3000 | contact form |

use crate::dom::{Document, ElementId, ElementSpec};
use crate::page::{Environment, Page};

pub const DESKTOP_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";
pub const PHONE_UA: &str =
    "Mozilla/5.0 (Linux; Android 13; SM-A135F) AppleWebKit/537.36 (KHTML, like Gecko) Mobile Safari/537.36";

// =========================================================================
// Fixture setup
// =========================================================================

/// Top-level body children of the landing page fixture.
pub fn landing_specs() -> Vec<ElementSpec> {
    vec![
        ElementSpec::new("nav")
            .rect(0.0, 0.0, 1280.0, 60.0)
            .child(
                ElementSpec::new("a")
                    .id("nav-servicios")
                    .attr("href", "#servicios")
                    .text("Servicios")
                    .rect(20.0, 10.0, 100.0, 40.0),
            )
            .child(
                ElementSpec::new("a")
                    .id("nav-contacto")
                    .attr("href", "#contacto")
                    .text("Contacto")
                    .rect(140.0, 10.0, 100.0, 40.0),
            )
            .child(
                ElementSpec::new("a")
                    .id("nav-missing")
                    .attr("href", "#nowhere")
                    .text("Perdido")
                    .rect(260.0, 10.0, 100.0, 40.0),
            ),
        ElementSpec::new("div")
            .id("emblem")
            .class("arcane-emblem")
            .rect(900.0, 0.0, 200.0, 200.0),
        ElementSpec::new("div")
            .id("particles")
            .class("mystic-particles")
            .rect(0.0, 0.0, 1280.0, 800.0),
        ElementSpec::new("div")
            .id("wordsContainer")
            .rect(0.0, 250.0, 1280.0, 100.0),
        ElementSpec::new("div")
            .id("intro")
            .class("description")
            .text("Trabajos espirituales")
            .rect(0.0, 400.0, 1280.0, 150.0),
        ElementSpec::new("a")
            .id("cta")
            .class("whatsapp-button")
            .attr("data-message", "Quiero una consulta")
            .text("Escríbeme")
            .rect(100.0, 600.0, 200.0, 50.0),
        ElementSpec::new("a")
            .id("mystic-wa")
            .class("mystic-button")
            .attr("href", "https://api.whatsapp.com/send?phone=13033068798")
            .text("WhatsApp")
            .rect(400.0, 600.0, 200.0, 50.0),
        ElementSpec::new("a")
            .id("call")
            .class("button")
            .attr("href", "tel:+13033068798")
            .text("Llamar")
            .rect(700.0, 600.0, 200.0, 50.0),
        ElementSpec::new("section")
            .id("servicios")
            .rect(0.0, 900.0, 1280.0, 600.0)
            .child(
                ElementSpec::new("div")
                    .id("card")
                    .class("mystic-card")
                    .rect(0.0, 950.0, 400.0, 300.0)
                    .child(
                        ElementSpec::new("img")
                            .id("card-img")
                            .class("mystic-image")
                            .attr("src", "images/vela.jpg")
                            .rect(0.0, 950.0, 400.0, 200.0),
                    ),
            ),
        ElementSpec::new("div")
            .id("tile")
            .class("masonry-grid-item")
            .rect(0.0, 1600.0, 300.0, 300.0)
            .child(
                ElementSpec::new("img")
                    .id("tile-img")
                    .class("lazy")
                    .attr("data-src", "images/tile.jpg")
                    .rect(0.0, 1600.0, 300.0, 300.0),
            ),
        ElementSpec::new("img")
            .id("altar")
            .attr("src", "../blogger.googleusercontent.com/img/b/altar.jpg")
            .rect(0.0, 2000.0, 600.0, 400.0),
        ElementSpec::new("div")
            .id("testimonial")
            .class("testimonial")
            .rect(0.0, 2500.0, 600.0, 200.0),
        ElementSpec::new("section")
            .id("contacto")
            .rect(0.0, 3000.0, 1280.0, 800.0)
            .child(ElementSpec::new("input").id("name").rect(0.0, 3100.0, 400.0, 40.0))
            .child(
                ElementSpec::new("textarea")
                    .id("message")
                    .rect(0.0, 3200.0, 400.0, 200.0),
            )
            .child(
                ElementSpec::new("button")
                    .id("sendMessage")
                    .text("Enviar")
                    .rect(0.0, 3450.0, 200.0, 50.0),
            ),
        ElementSpec::new("div")
            .id("floating")
            .class("contenedor-botones-misticos")
            .rect(1180.0, 700.0, 80.0, 80.0)
            .child(
                ElementSpec::new("div")
                    .id("whatsapp-container")
                    .rect(1180.0, 700.0, 80.0, 80.0),
            ),
    ]
}

pub fn landing_document() -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    for spec in &landing_specs() {
        doc.insert_spec(body, spec);
    }
    doc
}

/// The landing page fixture on a 1280×800 viewport.
pub fn landing_page(env: Environment) -> Page {
    Page::new(landing_document(), env).with_viewport(1280.0, 800.0)
}

pub fn desktop() -> Environment {
    Environment {
        user_agent: DESKTOP_UA.to_string(),
        device_memory: Some(8.0),
        hardware_concurrency: Some(8),
        ..Default::default()
    }
}

// =========================================================================
// Lookup helpers
// =========================================================================

/// Find an attached element by id. Panics with a clear message if missing.
pub fn by_id(page: &Page, id: &str) -> ElementId {
    page.document
        .element_by_id(id)
        .unwrap_or_else(|| panic!("element #{id} not found"))
}

pub fn style_of(page: &Page, id: &str, property: &str) -> Option<String> {
    page.document
        .get(by_id(page, id))
        .style(property)
        .map(str::to_string)
}

pub fn attr_of(page: &Page, id: &str, name: &str) -> Option<String> {
    page.document
        .get(by_id(page, id))
        .attr(name)
        .map(str::to_string)
}

pub fn class_of(page: &Page, id: &str) -> Vec<String> {
    page.document.get(by_id(page, id)).classes().to_vec()
}

pub fn set_value(page: &mut Page, id: &str, value: &str) {
    let el = by_id(page, id);
    page.document.get_mut(el).set_value(value);
}
