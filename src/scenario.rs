//! Scripted page sessions.
//!
//! A scenario file describes a page (environment, viewport, body markup) and
//! a list of steps to play against it. [`run`] builds the page, starts the
//! root initializer, plays each step, and reports what each one caused.
//!
//! ```json
//! {
//!   "environment": { "user_agent": "Mozilla/5.0 (iPhone)", "device_memory": 2 },
//!   "ready": "loading",
//!   "seed": 7,
//!   "body": [
//!     { "tag": "div", "id": "wordsContainer" },
//!     { "tag": "a", "classes": ["whatsapp-button"], "id": "cta",
//!       "attributes": { "data-message": "Quiero una cita" } }
//!   ],
//!   "steps": [
//!     { "action": "dom_content_loaded" },
//!     { "action": "click", "id": "cta" },
//!     { "action": "wait", "ms": 3300 }
//!   ]
//! }
//! ```

use crate::app::{App, Notice};
use crate::capability::DeviceCapabilities;
use crate::config::SiteConfig;
use crate::dom::{Document, ElementId, ElementSpec};
use crate::events::DispatchOutcome;
use crate::page::{Environment, Page, ReadyState, Viewport};
use crate::render::render_page;
use crate::types::Point;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error("step {step}: no element with id \"{id}\"")]
    UnknownElement { step: usize, id: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub environment: Environment,
    pub viewport: Viewport,
    pub ready: ReadyState,
    /// Seed for phrase sampling; random when absent.
    pub seed: Option<u64>,
    pub body: Vec<ElementSpec>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    DomContentLoaded,
    /// Click an element, at its center unless both `x` and `y` are given.
    Click {
        id: String,
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
    },
    Hover {
        id: String,
    },
    Unhover {
        id: String,
    },
    /// Set the value of a form field.
    Type {
        id: String,
        value: String,
    },
    Scroll {
        y: f64,
    },
    Resize {
        width: f64,
        height: f64,
    },
    Hide,
    Show,
    Wait {
        ms: u64,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::DomContentLoaded => write!(f, "DOMContentLoaded"),
            Step::Click {
                id,
                x: Some(x),
                y: Some(y),
            } => write!(f, "click #{id} at ({x}, {y})"),
            Step::Click { id, .. } => write!(f, "click #{id}"),
            Step::Hover { id } => write!(f, "hover #{id}"),
            Step::Unhover { id } => write!(f, "unhover #{id}"),
            Step::Type { id, value } => write!(f, "type {value:?} into #{id}"),
            Step::Scroll { y } => write!(f, "scroll to {y}"),
            Step::Resize { width, height } => write!(f, "resize to {width}x{height}"),
            Step::Hide => write!(f, "hide page"),
            Step::Show => write!(f, "show page"),
            Step::Wait { ms } => write!(f, "wait {ms}ms"),
        }
    }
}

/// What one step caused.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// 1-based position in the script.
    pub index: usize,
    pub step: String,
    pub handled: usize,
    pub default_prevented: bool,
    /// Links opened by this step.
    pub opened: Vec<String>,
    pub notices: Vec<Notice>,
    pub scroll_y: f64,
    pub now_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub capabilities: DeviceCapabilities,
    pub ready: bool,
    pub steps: Vec<StepReport>,
    /// Text of the phrases currently displayed.
    pub phrases: Vec<String>,
    /// Elements carrying the reveal class, by label.
    pub revealed: Vec<String>,
    pub opened: Vec<String>,
    pub notices: Vec<Notice>,
    pub html: String,
}

pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// `#id` when the element has one, else `tag@index`.
fn label(doc: &Document, id: ElementId) -> String {
    let el = doc.get(id);
    match el.id() {
        Some(html_id) => format!("#{html_id}"),
        None => format!("{}@{}", el.tag(), id.index()),
    }
}

fn lookup(app: &App, step: usize, id: &str) -> Result<ElementId, ScenarioError> {
    app.page()
        .document
        .element_by_id(id)
        .ok_or_else(|| ScenarioError::UnknownElement {
            step,
            id: id.to_string(),
        })
}

fn apply(app: &mut App, index: usize, step: &Step) -> Result<DispatchOutcome, ScenarioError> {
    let outcome = match step {
        Step::DomContentLoaded => app.dom_content_loaded(),
        Step::Click { id, x, y } => {
            let el = lookup(app, index, id)?;
            match (x, y) {
                (Some(x), Some(y)) => app.click_at(el, Point::new(*x, *y)),
                _ => app.click(el),
            }
        }
        Step::Hover { id } => {
            let el = lookup(app, index, id)?;
            app.hover(el)
        }
        Step::Unhover { id } => {
            let el = lookup(app, index, id)?;
            app.unhover(el)
        }
        Step::Type { id, value } => {
            let el = lookup(app, index, id)?;
            app.page_mut().document.get_mut(el).set_value(value);
            DispatchOutcome::default()
        }
        Step::Scroll { y } => app.scroll_to(*y),
        Step::Resize { width, height } => app.resize(*width, *height),
        Step::Hide => app.set_hidden(true),
        Step::Show => app.set_hidden(false),
        Step::Wait { ms } => {
            app.advance(*ms);
            DispatchOutcome::default()
        }
    };
    Ok(outcome)
}

pub fn run(scenario: &Scenario, config: &SiteConfig) -> Result<ScenarioReport, ScenarioError> {
    let mut doc = Document::new();
    let body = doc.body();
    for spec in &scenario.body {
        doc.insert_spec(body, spec);
    }
    let page = Page::new(doc, scenario.environment.clone())
        .with_viewport(scenario.viewport.width, scenario.viewport.height)
        .with_ready_state(scenario.ready);
    let mut app = match scenario.seed {
        Some(seed) => App::with_rng(config.clone(), page, StdRng::seed_from_u64(seed)),
        None => App::new(config.clone(), page),
    };

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for (i, step) in scenario.steps.iter().enumerate() {
        let index = i + 1;
        let opened_before = app.page().opened_links().len();
        let notices_before = app.notices().len();
        let outcome = apply(&mut app, index, step)?;
        steps.push(StepReport {
            index,
            step: step.to_string(),
            handled: outcome.handled,
            default_prevented: outcome.default_prevented,
            opened: app.page().opened_links()[opened_before..]
                .iter()
                .map(|l| l.url.clone())
                .collect(),
            notices: app.notices()[notices_before..].to_vec(),
            scroll_y: app.page().scroll_y(),
            now_ms: app.page().now(),
        });
    }

    let doc = &app.page().document;
    let phrases = doc
        .element_by_id(&config.phrases.container_id)
        .map(|container| {
            doc.children(container)
                .iter()
                .map(|c| doc.get(*c).text().to_string())
                .collect()
        })
        .unwrap_or_default();
    let revealed = doc
        .select(&format!(".{}", config.reveal.class))
        .into_iter()
        .map(|id| label(doc, id))
        .collect();

    Ok(ScenarioReport {
        capabilities: app.capabilities(),
        ready: app.is_ready(),
        steps,
        phrases,
        revealed,
        opened: app
            .page()
            .opened_links()
            .iter()
            .map(|l| l.url.clone())
            .collect(),
        notices: app.notices().to_vec(),
        html: render_page(doc).into_string(),
    })
}
