//! Device capability detection and the low-tier animation policy.
//!
//! Three environment signals feed a coarse tier:
//!
//! | Signal | Source | Low when |
//! |---|---|---|
//! | mobile | user-agent string | matches a known mobile token |
//! | low memory | reported device memory | below `performance.low_memory_gb` |
//! | low CPU | reported processor count | at or below `performance.low_cpu_cores` |
//!
//! Missing signals count as "not low". The tier is computed once and tagged on
//! `<body>` as `perf-{tier}`; the low tier additionally clamps animation and
//! transition durations and marks every image for lazy loading.

use crate::config::PerformanceConfig;
use crate::page::{Environment, Page};
use crate::types::Tier;
use serde::Serialize;
use tracing::debug;

/// User-agent tokens that identify a mobile device (case-insensitive).
const MOBILE_TOKENS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Rules injected for the low tier.
pub const LOW_TIER_CSS: &str = "
      .perf-low * {
        animation-duration: 0.3s !important;
        transition-duration: 0.2s !important;
      }
      .perf-low .heavy-animation {
        animation: none !important;
      }
    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceCapabilities {
    pub mobile: bool,
    pub low_memory: bool,
    pub low_cpu: bool,
    pub tier: Tier,
}

impl DeviceCapabilities {
    pub fn detect(env: &Environment, limits: &PerformanceConfig) -> Self {
        let mobile = is_mobile_agent(&env.user_agent);
        let low_memory = env
            .device_memory
            .is_some_and(|gb| gb < limits.low_memory_gb);
        let low_cpu = env
            .hardware_concurrency
            .is_some_and(|cores| cores <= limits.low_cpu_cores);
        Self::from_signals(mobile, low_memory, low_cpu)
    }

    pub fn from_signals(mobile: bool, low_memory: bool, low_cpu: bool) -> Self {
        Self {
            mobile,
            low_memory,
            low_cpu,
            tier: classify(mobile, low_memory, low_cpu),
        }
    }
}

/// Tier policy: a mobile device that is also short on memory or CPU is low;
/// any single constraint is medium; otherwise high.
pub fn classify(mobile: bool, low_memory: bool, low_cpu: bool) -> Tier {
    if mobile && (low_memory || low_cpu) {
        Tier::Low
    } else if mobile || low_memory || low_cpu {
        Tier::Medium
    } else {
        Tier::High
    }
}

pub fn is_mobile_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    MOBILE_TOKENS.iter().any(|token| ua.contains(token))
}

/// Detects the tier at construction and applies the matching page policy.
#[derive(Debug, Clone)]
pub struct CapabilityDetector {
    capabilities: DeviceCapabilities,
}

impl CapabilityDetector {
    pub fn new(limits: &PerformanceConfig, page: &mut Page) -> Self {
        let capabilities = DeviceCapabilities::detect(&page.env, limits);
        debug!(
            mobile = capabilities.mobile,
            low_memory = capabilities.low_memory,
            low_cpu = capabilities.low_cpu,
            tier = %capabilities.tier,
            "device classified"
        );
        apply_policy(&capabilities, page);
        Self { capabilities }
    }

    pub fn capabilities(&self) -> DeviceCapabilities {
        self.capabilities
    }

    pub fn tier(&self) -> Tier {
        self.capabilities.tier
    }
}

fn apply_policy(capabilities: &DeviceCapabilities, page: &mut Page) {
    let body = page.document.body();
    page.document
        .get_mut(body)
        .add_class(&capabilities.tier.class_name());

    if capabilities.tier == Tier::Low {
        page.document.add_style_rules(LOW_TIER_CSS);
        for img in page.document.select("img") {
            let el = page.document.get_mut(img);
            if el.attr("loading").is_none() {
                el.set_attr("loading", "lazy");
            }
        }
    }
}
