//! # Landing Kit
//!
//! Client-side behavior for a single-page contact landing site, modeled
//! against an in-memory page so it can run and be tested without a browser.
//!
//! Six independent controllers share one [`page::Page`] and one immutable
//! [`config::SiteConfig`], and are composed by the root initializer in
//! [`app`]:
//!
//! ```text
//! SiteConfig ──┐
//!              ▼
//! App::new ─► capability ─► phrases ─► visibility ─► contact ─► effects ─► images
//!              │
//!              ▼ (document ready)
//!         populate phrases · wire tel:/#anchor links · inject keyframes
//!         · resize (debounced) · scroll (throttled) · visibility log
//! ```
//!
//! Events enter through [`app::App::dispatch`] and reach the handlers each
//! controller registered at wiring time. Time only moves through
//! [`app::App::advance`], which runs deferred work (notification fades,
//! ripple cleanup, the resize debounce) in deadline order.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Root initializer: startup order, event routing, virtual time |
//! | [`capability`] | Device tiering from user agent, memory and CPU signals |
//! | [`phrases`] | Random phrase sampling without replacement, phrase display |
//! | [`visibility`] | Fire-once watch lists, reveal animations, parallax |
//! | [`contact`] | Messaging deep links, contact form, contact buttons |
//! | [`notify`] | Transient notification banners |
//! | [`effects`] | Hover transforms, click ripples, decorative parallax tagging |
//! | [`images`] | Deferred image loading, source rewriting, loading hints |
//! | [`page`] | Window, navigator and document state the controllers act on |
//! | [`dom`] | Element arena, queries, declarative element specs |
//! | [`selector`] | CSS selector subset used for every query |
//! | [`events`] | Event kinds, listener registry, dispatch outcome |
//! | [`timers`] | Virtual clock, task queue, throttle and debounce |
//! | [`config`] | `landing.toml` loading, merging over stock defaults, validation |
//! | [`scenario`] | Scripted page sessions for the `simulate` command |
//! | [`render`] | HTML serialization of the document using Maud |
//! | [`output`] | CLI output formatting |
//! | [`types`] | Small shared value types (`Tier`, `Rect`, `Point`) |
//!
//! # Design Decisions
//!
//! ## Handlers Are Data
//!
//! Listeners are stored as `(target, event kind, Handler)` triples rather than
//! boxed closures. The page can then be inspected ("which elements got a
//! contact listener?") and dispatch stays a plain `match` with `&mut self`
//! access to every controller, with no shared ownership.
//!
//! ## Query Once
//!
//! Each controller queries the document when it wires itself. Elements added
//! later (notification banners, ripples) never receive listeners, which is
//! exactly how the page behaves in a browser.
//!
//! ## Silent Misses
//!
//! A missing container, field or target disables only the feature that needed
//! it. The only user-visible failure is the contact form's error banner.
//! Errors with `Result` types are limited to configuration, selector parsing,
//! and scenario files.

pub mod app;
pub mod capability;
pub mod config;
pub mod contact;
pub mod dom;
pub mod effects;
pub mod events;
pub mod images;
pub mod notify;
pub mod output;
pub mod page;
pub mod phrases;
pub mod render;
pub mod scenario;
pub mod selector;
pub mod timers;
pub mod types;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_helpers;
