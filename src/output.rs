//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Tier
//!
//! ```text
//! Tier: low
//!     mobile: yes
//!     low memory: yes
//!     low cpu: no
//! ```
//!
//! ## Phrases
//!
//! ```text
//! Round 1
//!     001 amarres de amor
//!     002 limpias espirituales
//! ```
//!
//! ## Simulate
//!
//! ```text
//! Tier: high
//! 001 DOMContentLoaded
//!     notice: landing page ready
//! 002 click #cta (2 handlers, default prevented)
//!     opened: https://wa.me/13033068798?text=Quiero%20una%20cita
//! 003 wait 3300ms
//!
//! Phrases
//!     amarres de amor
//! Revealed
//!     #intro
//! ```

use crate::capability::DeviceCapabilities;
use crate::scenario::{ScenarioReport, StepReport};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

// ============================================================================
// tier
// ============================================================================

pub fn format_capabilities(caps: &DeviceCapabilities) -> Vec<String> {
    vec![
        format!("Tier: {}", caps.tier),
        format!("{}mobile: {}", indent(1), yes_no(caps.mobile)),
        format!("{}low memory: {}", indent(1), yes_no(caps.low_memory)),
        format!("{}low cpu: {}", indent(1), yes_no(caps.low_cpu)),
    ]
}

pub fn print_capabilities(caps: &DeviceCapabilities) {
    for line in format_capabilities(caps) {
        println!("{}", line);
    }
}

// ============================================================================
// phrases
// ============================================================================

pub fn format_phrase_rounds(rounds: &[Vec<String>]) -> Vec<String> {
    let mut lines = Vec::new();
    for (r, round) in rounds.iter().enumerate() {
        lines.push(format!("Round {}", r + 1));
        for (i, phrase) in round.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), phrase));
        }
    }
    lines
}

pub fn print_phrase_rounds(rounds: &[Vec<String>]) {
    for line in format_phrase_rounds(rounds) {
        println!("{}", line);
    }
}

// ============================================================================
// simulate
// ============================================================================

fn step_header(step: &StepReport) -> String {
    let mut header = format!("{} {}", format_index(step.index), step.step);
    match (step.handled, step.default_prevented) {
        (0, _) => {}
        (1, false) => header.push_str(" (1 handler)"),
        (n, false) => header.push_str(&format!(" ({n} handlers)")),
        (1, true) => header.push_str(" (1 handler, default prevented)"),
        (n, true) => header.push_str(&format!(" ({n} handlers, default prevented)")),
    }
    header
}

pub fn format_scenario_report(report: &ScenarioReport) -> Vec<String> {
    let mut lines = vec![format!("Tier: {}", report.capabilities.tier)];

    for step in &report.steps {
        lines.push(step_header(step));
        for url in &step.opened {
            lines.push(format!("{}opened: {}", indent(1), url));
        }
        for notice in &step.notices {
            lines.push(format!("{}notice: {}", indent(1), notice.message()));
        }
    }

    if !report.ready {
        lines.push(String::new());
        lines.push("Document never became ready".to_string());
    }
    for (title, items) in [("Phrases", &report.phrases), ("Revealed", &report.revealed)] {
        if items.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(title.to_string());
        for item in items {
            lines.push(format!("{}{}", indent(1), item));
        }
    }
    lines
}

pub fn print_scenario_report(report: &ScenarioReport) {
    for line in format_scenario_report(report) {
        println!("{}", line);
    }
}
