//! Outbound messaging links and the contact form.
//!
//! Links have the shape `{base_url}/{number}?text={message}`, with the
//! message escaped like `encodeURIComponent`. Three controls open them:
//!
//! | Control | Message |
//! |---------|---------|
//! | `#sendMessage` (form submit) | `Hola, soy {name}. {message}` from `#name` / `#message` |
//! | contact buttons ([`CONTACT_BUTTON_SELECTOR`]) | `data-message`, else the default |
//! | `#whatsapp-container` (floating) | the default |
//!
//! A submit with either field blank shows an error banner and opens nothing.

use crate::config::{ContactConfig, SiteConfig};
use crate::dom::ElementId;
use crate::events::{EventKind, Handler, Target};
use crate::notify::Notifier;
use crate::page::Page;
use crate::types::NotificationKind;
use tracing::debug;

pub const SUBMIT_BUTTON_ID: &str = "sendMessage";
pub const NAME_FIELD_ID: &str = "name";
pub const MESSAGE_FIELD_ID: &str = "message";
pub const FLOATING_CONTAINER_ID: &str = "whatsapp-container";
pub const CONTACT_BUTTON_SELECTOR: &str = ".whatsapp-button, .mystic-button[href*=\"whatsapp\"], .boton-magico[href*=\"whatsapp\"]";

pub const INCOMPLETE_FORM_TEXT: &str = "Por favor, completa todos los campos";
pub const REDIRECT_TEXT: &str = "Redirigiendo a WhatsApp...";

/// Escape a string the way `encodeURIComponent` does: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is percent-encoded as UTF-8.
pub fn encode_component(text: &str) -> String {
    urlencoding::encode(text)
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
}

/// Builds messaging deep links from configuration.
#[derive(Debug, Clone)]
pub struct ContactLinks {
    base_url: String,
    number: String,
    default_message: String,
}

impl ContactLinks {
    pub fn new(config: &ContactConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            number: config.number.clone(),
            default_message: config.default_message.clone(),
        }
    }

    /// Link carrying `message`, or the default message when `None`.
    pub fn build_link(&self, message: Option<&str>) -> String {
        let message = message.unwrap_or(&self.default_message);
        format!(
            "{}/{}?text={}",
            self.base_url,
            self.number,
            encode_component(message)
        )
    }

    pub fn default_message(&self) -> &str {
        &self.default_message
    }
}

/// Greeting sent from the contact form.
pub fn compose_message(name: &str, message: &str) -> String {
    format!("Hola, soy {name}. {message}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Name or message field is not on the page; nothing happened.
    FormMissing,
    /// A field was blank; an error banner was shown.
    Incomplete,
    /// The link was opened and the form cleared.
    Sent { url: String },
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    links: ContactLinks,
    notifier: Notifier,
}

impl ContactForm {
    pub fn new(config: &SiteConfig, page: &mut Page) -> Self {
        if let Some(button) = page.document.element_by_id(SUBMIT_BUTTON_ID) {
            page.listeners.add(
                Target::Element(button),
                EventKind::Click,
                Handler::SubmitContactForm,
            );
        }
        let buttons = page.document.select(CONTACT_BUTTON_SELECTOR);
        for button in &buttons {
            page.listeners.add(
                Target::Element(*button),
                EventKind::Click,
                Handler::OpenContactLink,
            );
        }
        if let Some(container) = page.document.element_by_id(FLOATING_CONTAINER_ID) {
            page.listeners.add(
                Target::Element(container),
                EventKind::Click,
                Handler::OpenDefaultContact,
            );
        }
        debug!(buttons = buttons.len(), "contact controls wired");

        Self {
            links: ContactLinks::new(&config.contact),
            notifier: Notifier::new(&config.timing),
        }
    }

    pub fn links(&self) -> &ContactLinks {
        &self.links
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn submit(&self, page: &mut Page) -> SubmitOutcome {
        let (Some(name_field), Some(message_field)) = (
            page.document.element_by_id(NAME_FIELD_ID),
            page.document.element_by_id(MESSAGE_FIELD_ID),
        ) else {
            return SubmitOutcome::FormMissing;
        };

        let name = page.document.get(name_field).value().trim().to_string();
        let message = page.document.get(message_field).value().trim().to_string();
        if name.is_empty() || message.is_empty() {
            self.notifier
                .show(page, INCOMPLETE_FORM_TEXT, NotificationKind::Error);
            return SubmitOutcome::Incomplete;
        }

        let url = self
            .links
            .build_link(Some(&compose_message(&name, &message)));
        page.open(&url);
        page.document.get_mut(name_field).set_value("");
        page.document.get_mut(message_field).set_value("");
        self.notifier
            .show(page, REDIRECT_TEXT, NotificationKind::Success);
        SubmitOutcome::Sent { url }
    }

    /// Open the link for a contact button click.
    ///
    /// The override is read from the clicked element first, then from the
    /// button the listener is attached to; an empty override counts as none.
    pub fn open_for(&self, page: &mut Page, target: ElementId, current: ElementId) -> String {
        let message = [target, current]
            .iter()
            .filter_map(|id| page.document.get(*id).data("message"))
            .find(|m| !m.is_empty())
            .map(str::to_string);
        let url = self.links.build_link(message.as_deref());
        page.open(&url);
        url
    }

    pub fn open_default(&self, page: &mut Page) -> String {
        let url = self.links.build_link(None);
        page.open(&url);
        url
    }
}
