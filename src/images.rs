//! Image loading adjustments.
//!
//! - Deferred images (`img[data-src]`) get their real source the first time
//!   they touch the viewport. Without visibility observation this never
//!   happens unless `images.load_without_observer` is set, in which case the
//!   sources are swapped in at startup.
//! - Sources pointing at the old external image host are rewritten to the
//!   local copy.
//! - Every image without explicit hints gets `loading="lazy"` and
//!   `decoding="async"`.

use crate::config::{ImagesConfig, SiteConfig};
use crate::dom::ElementId;
use crate::page::Page;
use crate::visibility::{Margins, WatchList};
use tracing::debug;

pub const DEFERRED_SELECTOR: &str = "img[data-src]";
pub const LAZY_CLASS: &str = "lazy";

#[derive(Debug, Clone)]
pub struct ImageLoader {
    deferred: Option<WatchList>,
}

impl ImageLoader {
    pub fn new(config: &SiteConfig, page: &mut Page) -> Self {
        let pending = page.document.select(DEFERRED_SELECTOR);
        let deferred = if page.env.visibility_observer {
            let mut watch = WatchList::new(0.0, Margins::default());
            for id in &pending {
                watch.watch(*id);
            }
            Some(watch)
        } else {
            if config.images.load_without_observer {
                for id in &pending {
                    load_deferred(page, *id);
                }
            }
            None
        };
        debug!(deferred = pending.len(), observed = deferred.is_some(), "deferred images");

        let rewritten = rewrite_sources(page, &config.images);
        add_loading_hints(page);
        if rewritten > 0 {
            debug!(rewritten, "image sources moved to local copies");
        }

        Self { deferred }
    }

    /// Load deferred images that have entered the viewport.
    pub fn check_visibility(&mut self, page: &mut Page) -> Vec<ElementId> {
        let Some(watch) = self.deferred.as_mut() else {
            return Vec::new();
        };
        let entered = watch.poll(page);
        entered
            .into_iter()
            .filter(|id| load_deferred(page, *id))
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.deferred.as_ref().map_or(0, WatchList::len)
    }
}

/// Copy `data-src` into `src` and drop the placeholder class.
/// Returns false when the element carries no deferred source.
fn load_deferred(page: &mut Page, id: ElementId) -> bool {
    let el = page.document.get_mut(id);
    let Some(source) = el.data("src").filter(|s| !s.is_empty()).map(str::to_string) else {
        return false;
    };
    el.set_attr("src", &source);
    el.remove_class(LAZY_CLASS);
    true
}

/// Point sources on the old image host at the local copy. Returns how many
/// images changed.
pub fn rewrite_sources(page: &mut Page, config: &ImagesConfig) -> usize {
    let mut changed = 0;
    for img in page.document.select("img") {
        let el = page.document.get_mut(img);
        let Some(src) = el.attr("src") else {
            continue;
        };
        if !src.contains(&config.bad_host) {
            continue;
        }
        let local = src.replacen(&config.bad_prefix, &config.local_prefix, 1);
        if local != src {
            el.set_attr("src", &local);
            changed += 1;
        }
    }
    changed
}

pub fn add_loading_hints(page: &mut Page) {
    for img in page.document.select("img") {
        let el = page.document.get_mut(img);
        if el.attr("loading").is_none() {
            el.set_attr("loading", "lazy");
        }
        if el.attr("decoding").is_none() {
            el.set_attr("decoding", "async");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, ElementSpec};
    use crate::page::Environment;

    fn page(specs: Vec<ElementSpec>, env: Environment) -> Page {
        let mut doc = Document::new();
        let body = doc.body();
        for spec in &specs {
            doc.insert_spec(body, spec);
        }
        Page::new(doc, env).with_viewport(800.0, 600.0)
    }

    fn deferred(id: &str, y: f64) -> ElementSpec {
        ElementSpec::new("img")
            .id(id)
            .class(LAZY_CLASS)
            .attr("data-src", &format!("images/{id}.jpg"))
            .rect(0.0, y, 100.0, 100.0)
    }

    fn attr(page: &Page, id: &str, name: &str) -> Option<String> {
        let el = page.document.element_by_id(id).unwrap();
        page.document.get(el).attr(name).map(str::to_string)
    }

    #[test]
    fn deferred_image_loads_once_on_entry() {
        let mut page = page(vec![deferred("near", 0.0), deferred("far", 2000.0)], Environment::default());
        let mut loader = ImageLoader::new(&SiteConfig::default(), &mut page);
        assert_eq!(loader.pending(), 2);

        let loaded = loader.check_visibility(&mut page);
        assert_eq!(loaded.len(), 1);
        assert_eq!(attr(&page, "near", "src").as_deref(), Some("images/near.jpg"));
        assert_eq!(attr(&page, "far", "src"), None);
        let near = page.document.element_by_id("near").unwrap();
        assert!(!page.document.get(near).has_class(LAZY_CLASS));

        page.set_scroll_y(1500.0);
        assert_eq!(loader.check_visibility(&mut page).len(), 1);
        assert_eq!(loader.pending(), 0);
        assert!(loader.check_visibility(&mut page).is_empty());
    }

    #[test]
    fn edge_contact_counts_as_entry() {
        // Top edge exactly on the viewport bottom.
        let mut page = page(vec![deferred("edge", 600.0)], Environment::default());
        let mut loader = ImageLoader::new(&SiteConfig::default(), &mut page);
        assert_eq!(loader.check_visibility(&mut page).len(), 1);
    }

    #[test]
    fn deferred_images_stay_unloaded_without_observer() {
        let env = Environment {
            visibility_observer: false,
            ..Default::default()
        };
        let mut page = page(vec![deferred("near", 0.0)], env);
        let mut loader = ImageLoader::new(&SiteConfig::default(), &mut page);
        assert!(loader.check_visibility(&mut page).is_empty());
        assert_eq!(attr(&page, "near", "src"), None);
    }

    #[test]
    fn direct_load_fallback_is_opt_in() {
        let env = Environment {
            visibility_observer: false,
            ..Default::default()
        };
        let mut page = page(vec![deferred("far", 5000.0)], env);
        let mut config = SiteConfig::default();
        config.images.load_without_observer = true;
        ImageLoader::new(&config, &mut page);
        assert_eq!(attr(&page, "far", "src").as_deref(), Some("images/far.jpg"));
    }

    #[test]
    fn external_host_sources_are_rewritten() {
        let mut page = page(
            vec![
                ElementSpec::new("img")
                    .id("old")
                    .attr("src", "../blogger.googleusercontent.com/img/b/R29v/altar.jpg"),
                ElementSpec::new("img")
                    .id("other")
                    .attr("src", "https://blogger.googleusercontent.com/img/b/x.jpg"),
                ElementSpec::new("img").id("local").attr("src", "images/vela.jpg"),
            ],
            Environment::default(),
        );
        let changed = rewrite_sources(&mut page, &ImagesConfig::default());
        assert_eq!(changed, 1);
        assert_eq!(attr(&page, "old", "src").as_deref(), Some("./images/b/R29v/altar.jpg"));
        assert_eq!(
            attr(&page, "other", "src").as_deref(),
            Some("https://blogger.googleusercontent.com/img/b/x.jpg")
        );
        assert_eq!(attr(&page, "local", "src").as_deref(), Some("images/vela.jpg"));
    }

    #[test]
    fn loading_hints_fill_only_missing_attributes() {
        let mut page = page(
            vec![
                ElementSpec::new("img").id("bare"),
                ElementSpec::new("img")
                    .id("eager")
                    .attr("loading", "eager")
                    .attr("decoding", "sync"),
            ],
            Environment::default(),
        );
        ImageLoader::new(&SiteConfig::default(), &mut page);
        assert_eq!(attr(&page, "bare", "loading").as_deref(), Some("lazy"));
        assert_eq!(attr(&page, "bare", "decoding").as_deref(), Some("async"));
        assert_eq!(attr(&page, "eager", "loading").as_deref(), Some("eager"));
        assert_eq!(attr(&page, "eager", "decoding").as_deref(), Some("sync"));
    }
}
