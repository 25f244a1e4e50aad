//! Rotating phrase display.
//!
//! [`PhraseSampler`] draws phrases uniformly at random without replacement
//! and remembers what it has shown. When fewer phrases remain than a call
//! asks for, the whole history is cleared before drawing: a full recycle, not
//! a partial top-up, so a phrase from the previous round can reappear right
//! after a reset.

use crate::config::PhrasesConfig;
use crate::page::Page;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use std::collections::HashSet;

/// Stagger between consecutive phrase reveals.
const REVEAL_STEP_SECONDS: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct PhraseSampler {
    pool: Vec<String>,
    /// Indices into `pool` shown since the last reset.
    used: HashSet<usize>,
    rng: StdRng,
    container_id: String,
    count: usize,
}

impl PhraseSampler {
    pub fn new(config: &PhrasesConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: &PhrasesConfig, rng: StdRng) -> Self {
        let mut seen = HashSet::new();
        let pool = config
            .pool
            .iter()
            .filter(|p| seen.insert(p.as_str()))
            .cloned()
            .collect();
        Self {
            pool,
            used: HashSet::new(),
            rng,
            container_id: config.container_id.clone(),
            count: config.count,
        }
    }

    /// Distinct phrases available for sampling.
    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    /// Phrases shown since the last reset.
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Draw `n` distinct phrases not shown since the last reset.
    ///
    /// Requests larger than the pool are clamped to the pool size.
    pub fn sample(&mut self, n: usize) -> Vec<String> {
        let n = n.min(self.pool.len());
        let mut available: Vec<usize> = (0..self.pool.len())
            .filter(|i| !self.used.contains(i))
            .collect();
        if available.len() < n {
            self.used.clear();
            available = (0..self.pool.len()).collect();
        }

        let picked: Vec<usize> = index::sample(&mut self.rng, available.len(), n)
            .into_iter()
            .map(|i| available[i])
            .collect();
        self.used.extend(picked.iter().copied());
        picked.into_iter().map(|i| self.pool[i].clone()).collect()
    }

    /// Replace the contents of the phrase container with a fresh sample.
    ///
    /// Each phrase becomes a `<strong>` whose reveal is delayed by its
    /// position. Does nothing when the container is absent.
    pub fn populate(&mut self, page: &mut Page) {
        let Some(container) = page.document.element_by_id(&self.container_id) else {
            return;
        };
        page.document.clear_children(container);
        for (index, phrase) in self.sample(self.count).iter().enumerate() {
            let strong = page.document.create_element("strong");
            let el = page.document.get_mut(strong);
            el.set_text(phrase);
            el.set_style("animation-delay", &reveal_delay(index));
            page.document.append_child(container, strong);
        }
    }
}

fn reveal_delay(index: usize) -> String {
    format!("{:.1}s", index as f64 * REVEAL_STEP_SECONDS)
}
