//! Site configuration.
//!
//! Every controller receives its settings from one immutable [`SiteConfig`]
//! value built at startup. Nothing reads global state, so tests can inject
//! their own endpoints, timings and phrase pools.
//!
//! ## Config File Location
//!
//! Place `landing.toml` in the directory passed with `--config` (the current
//! directory by default). The file is optional; stock defaults apply for every
//! key it leaves out.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [contact]
//! base_url = "https://wa.me"        # Messaging deep-link base
//! number = "13033068798"            # Numeric destination
//! default_message = "NECESITO AYUDA"
//!
//! [timing]
//! notification_visible_ms = 3000    # Banner stays fully visible
//! notification_fade_ms = 300        # Fade-out before removal
//! ripple_ms = 600                   # Ripple overlay lifetime
//! scroll_throttle_ms = 16           # ~60 Hz scroll handling
//! resize_debounce_ms = 250          # Quiet period after resizing
//!
//! [scroll]
//! threshold = 100.0                 # Floating buttons brighten past this offset
//! header_offset = 80.0              # Clearance for the fixed header on anchor jumps
//!
//! [reveal]
//! threshold = 0.1                   # Visible fraction that triggers the reveal
//! root_margin_bottom = -50.0        # Shrinks the viewport bottom edge
//! class = "fade-in"
//!
//! [parallax]
//! default_speed = 0.5               # Used when an element has no data-speed
//! decorative_speed = 0.3            # Assigned to decorative elements
//!
//! [phrases]
//! container_id = "wordsContainer"
//! count = 8
//! pool = ["...", "..."]
//!
//! [images]
//! bad_host = "blogger.googleusercontent.com"
//! bad_prefix = "../blogger.googleusercontent.com/img/"
//! local_prefix = "./images/"
//! load_without_observer = false     # Load deferred images directly when visibility observation is missing
//!
//! [performance]
//! low_memory_gb = 4.0               # Below this is low memory
//! low_cpu_cores = 4                 # At or below this is low CPU
//! ```
//!
//! Config files are sparse and unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the config directory.
pub const CONFIG_FILE: &str = "landing.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Complete landing page configuration.
///
/// All fields have defaults; user files override only what they name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Outbound messaging link settings.
    pub contact: ContactConfig,
    /// Notification, ripple and rate-limit durations.
    pub timing: TimingConfig,
    /// Scroll-driven behavior.
    pub scroll: ScrollConfig,
    /// One-shot reveal animation settings.
    pub reveal: RevealConfig,
    /// Parallax speeds.
    pub parallax: ParallaxConfig,
    /// Rotating phrase display.
    pub phrases: PhrasesConfig,
    /// Image source fixes and lazy-load fallback.
    pub images: ImagesConfig,
    /// Device tiering limits.
    pub performance: PerformanceConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Validation(msg.into()));

        if self.contact.number.is_empty()
            || !self.contact.number.chars().all(|c| c.is_ascii_digit())
        {
            return invalid("contact.number must be a non-empty string of digits");
        }
        if !(self.contact.base_url.starts_with("https://")
            || self.contact.base_url.starts_with("http://"))
        {
            return invalid("contact.base_url must be an http(s) URL");
        }
        let t = &self.timing;
        if [
            t.notification_visible_ms,
            t.notification_fade_ms,
            t.ripple_ms,
            t.scroll_throttle_ms,
            t.resize_debounce_ms,
        ]
        .contains(&0)
        {
            return invalid("timing values must be greater than zero");
        }
        if !self.scroll.threshold.is_finite() || !self.scroll.header_offset.is_finite() {
            return invalid("scroll.threshold and scroll.header_offset must be finite numbers");
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return invalid("reveal.threshold must be between 0 and 1");
        }
        if !self.reveal.root_margin_bottom.is_finite() {
            return invalid("reveal.root_margin_bottom must be a finite number");
        }
        if self.reveal.class.trim().is_empty() {
            return invalid("reveal.class must not be empty");
        }
        if !self.parallax.default_speed.is_finite() || !self.parallax.decorative_speed.is_finite()
        {
            return invalid("parallax speeds must be finite numbers");
        }
        let distinct = distinct_count(&self.phrases.pool);
        if distinct == 0 {
            return invalid("phrases.pool must not be empty");
        }
        if self.phrases.count == 0 || self.phrases.count > distinct {
            return Err(ConfigError::Validation(format!(
                "phrases.count must be between 1 and {distinct} (distinct pool size)"
            )));
        }
        if !self.performance.low_memory_gb.is_finite() || self.performance.low_memory_gb <= 0.0 {
            return invalid("performance.low_memory_gb must be positive");
        }
        Ok(())
    }
}

fn distinct_count(pool: &[String]) -> usize {
    pool.iter().collect::<HashSet<_>>().len()
}

/// Messaging deep-link settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Link base, e.g. `https://wa.me`.
    pub base_url: String,
    /// Destination phone number, digits only.
    pub number: String,
    /// Message used when a control carries no override.
    pub default_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wa.me".to_string(),
            number: "13033068798".to_string(),
            default_message: "NECESITO AYUDA".to_string(),
        }
    }
}

/// Durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub notification_visible_ms: u64,
    pub notification_fade_ms: u64,
    pub ripple_ms: u64,
    pub scroll_throttle_ms: u64,
    pub resize_debounce_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notification_visible_ms: 3000,
            notification_fade_ms: 300,
            ripple_ms: 600,
            scroll_throttle_ms: 16,
            resize_debounce_ms: 250,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Scroll offset (px) past which the floating buttons are fully shown.
    pub threshold: f64,
    /// Space left for the fixed header when jumping to an anchor (px).
    pub header_offset: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            header_offset: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// Bottom root margin in px; negative values shrink the viewport.
    pub root_margin_bottom: f64,
    /// Class added when an element is revealed.
    pub class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin_bottom: -50.0,
            class: "fade-in".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallaxConfig {
    pub default_speed: f64,
    pub decorative_speed: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            default_speed: 0.5,
            decorative_speed: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhrasesConfig {
    /// Id of the display container.
    pub container_id: String,
    /// Phrases shown per population.
    pub count: usize,
    /// Phrase pool. Duplicates are collapsed when sampling.
    pub pool: Vec<String>,
}

impl Default for PhrasesConfig {
    fn default() -> Self {
        Self {
            container_id: "wordsContainer".to_string(),
            count: 8,
            pool: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Stock phrase pool.
pub const DEFAULT_PHRASES: &[&str] = &[
    "los mejores brujos",
    "brujos de verdad",
    "brujos cerca de mi",
    "brujos y hechiceros",
    "brujos gratis en linea",
    "brujeria negra",
    "hechizos efectivos",
    "tarot brujo",
    "brujos en estados unidos",
    "vudu brujeria",
    "brujos consulta gratis",
    "bruja",
    "hechiceria",
    "hechizo de amor",
    "amarres de amor",
    "conjuro de amor",
    "un amarre",
    "amarres de amor brujeria",
    "amarres efectivos para el amor",
    "amarre a una persona",
    "amarre amor",
    "hechizo de endulzamiento",
    "endulzamiento de amor",
    "amarre de brujeria",
    "espiritismo y santeria",
    "espiritismo",
    "centro espiritista",
    "centro espiritista cerca de mi",
    "brujo amarres",
    "magia negra para el amor",
    "hechizo para que regrese",
    "como hacer un amarre de amor",
    "un amarre de amor",
    "hechizos para recuperar a tu pareja",
    "brujo para amarres",
    "que tan efectivo es un amarre de amor",
    "amarres de amor near me",
    "necesito un amarre de amor urgente",
    "necesito un amarre de amor",
    "los amarres son verdaderos",
    "amarre de amor cerca de mi",
    "brujeria",
    "brujos",
    "endulzamiento de pareja",
    "brujeria brujeria",
    "espiritista near me",
    "brujos amarres",
    "brujeria para el amor",
    "como hacer un amarre",
    "poderoso amarre de amor",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Host whose image URLs are rewritten to local copies.
    pub bad_host: String,
    /// Path fragment replaced in matching sources.
    pub bad_prefix: String,
    /// Local replacement for `bad_prefix`.
    pub local_prefix: String,
    /// Load deferred images immediately when visibility observation is
    /// unavailable. Off by default: such images then never load.
    pub load_without_observer: bool,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            bad_host: "blogger.googleusercontent.com".to_string(),
            bad_prefix: "../blogger.googleusercontent.com/img/".to_string(),
            local_prefix: "./images/".to_string(),
            load_without_observer: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Devices reporting less memory than this (GB) count as low memory.
    pub low_memory_gb: f64,
    /// Devices reporting this many logical processors or fewer count as low CPU.
    pub low_cpu_cores: u32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            low_memory_gb: 4.0,
            low_cpu_cores: 4,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock defaults as a `toml::Value::Table`, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `landing.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `landing.toml` in `dir`, layered over stock defaults.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// A fully commented stock `landing.toml`. Used by `gen-config`.
pub fn stock_config_toml() -> String {
    let pool = DEFAULT_PHRASES
        .iter()
        .map(|p| format!("    {},", toml::Value::String(p.to_string())))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r##"# Landing Kit Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Contact links
# ---------------------------------------------------------------------------
[contact]
# Messaging deep-link base; links look like {{base_url}}/{{number}}?text=...
base_url = "https://wa.me"
# Destination phone number, digits only.
number = "13033068798"
# Message sent by contact buttons that carry no data-message override.
default_message = "NECESITO AYUDA"

# ---------------------------------------------------------------------------
# Timing (milliseconds)
# ---------------------------------------------------------------------------
[timing]
notification_visible_ms = 3000
notification_fade_ms = 300
ripple_ms = 600
scroll_throttle_ms = 16
resize_debounce_ms = 250

# ---------------------------------------------------------------------------
# Scrolling
# ---------------------------------------------------------------------------
[scroll]
# Offset past which the floating contact buttons are fully shown.
threshold = 100.0
# Clearance for the fixed header when jumping to #anchors.
header_offset = 80.0

# ---------------------------------------------------------------------------
# Reveal animations
# ---------------------------------------------------------------------------
[reveal]
# Fraction of an element that must be visible before it fades in.
threshold = 0.1
# Negative values shrink the bottom edge of the viewport.
root_margin_bottom = -50.0
class = "fade-in"

# ---------------------------------------------------------------------------
# Parallax
# ---------------------------------------------------------------------------
[parallax]
# Speed for .parallax-element nodes without data-speed.
default_speed = 0.5
# Speed assigned to decorative emblems and particles.
decorative_speed = 0.3

# ---------------------------------------------------------------------------
# Rotating phrases
# ---------------------------------------------------------------------------
[phrases]
container_id = "wordsContainer"
# Phrases shown at once; at most the number of distinct pool entries.
count = 8
pool = [
{pool}
]

# ---------------------------------------------------------------------------
# Images
# ---------------------------------------------------------------------------
[images]
bad_host = "blogger.googleusercontent.com"
bad_prefix = "../blogger.googleusercontent.com/img/"
local_prefix = "./images/"
# Load data-src images right away when the browser cannot observe visibility.
load_without_observer = false

# ---------------------------------------------------------------------------
# Device tiering
# ---------------------------------------------------------------------------
[performance]
low_memory_gb = 4.0
low_cpu_cores = 4
"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_contact_endpoint() {
        let config = SiteConfig::default();
        assert_eq!(config.contact.base_url, "https://wa.me");
        assert_eq!(config.contact.number, "13033068798");
        assert_eq!(config.contact.default_message, "NECESITO AYUDA");
    }

    #[test]
    fn default_config_has_timings() {
        let config = SiteConfig::default();
        assert_eq!(config.timing.notification_visible_ms, 3000);
        assert_eq!(config.timing.notification_fade_ms, 300);
        assert_eq!(config.timing.ripple_ms, 600);
        assert_eq!(config.timing.scroll_throttle_ms, 16);
        assert_eq!(config.timing.resize_debounce_ms, 250);
    }

    #[test]
    fn default_phrase_pool_is_distinct() {
        let config = SiteConfig::default();
        assert_eq!(config.phrases.pool.len(), 50);
        assert_eq!(distinct_count(&config.phrases.pool), 50);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[contact]
number = "15551234567"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.contact.number, "15551234567");
        // Defaults preserved
        assert_eq!(config.contact.base_url, "https://wa.me");
        assert_eq!(config.scroll.threshold, 100.0);
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_numeric_destination() {
        let mut config = SiteConfig::default();
        config.contact.number = "+1 303".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("contact.number"));
    }

    #[test]
    fn validate_rejects_non_http_base() {
        let mut config = SiteConfig::default();
        config.contact.base_url = "wa.me".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timing() {
        let mut config = SiteConfig::default();
        config.timing.scroll_throttle_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_threshold_bounds() {
        let mut config = SiteConfig::default();
        config.reveal.threshold = 1.0;
        assert!(config.validate().is_ok());
        config.reveal.threshold = 0.0;
        assert!(config.validate().is_ok());
        config.reveal.threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_count_against_distinct_pool() {
        let mut config = SiteConfig::default();
        config.phrases.pool = vec!["a".into(), "b".into(), "a".into()];
        config.phrases.count = 2;
        assert!(config.validate().is_ok());
        config.phrases.count = 3;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("between 1 and 2"));
    }

    #[test]
    fn validate_rejects_non_finite_numbers() {
        let mut config = SiteConfig::default();
        config.scroll.threshold = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.scroll.header_offset = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.reveal.root_margin_bottom = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.performance.low_memory_gb = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("low_memory_gb"));
    }

    #[test]
    fn validate_rejects_empty_pool() {
        let mut config = SiteConfig::default();
        config.phrases.pool.clear();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[scroll]
threshold = 250.0

[phrases]
count = 2
pool = ["uno", "dos", "tres"]
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.scroll.threshold, 250.0);
        assert_eq!(config.scroll.header_offset, 80.0);
        assert_eq!(config.phrases.pool, vec!["uno", "dos", "tres"]);
        assert_eq!(config.phrases.container_id, "wordsContainer");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[reveal]
threshold = 2.0
"#,
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_rejects_nan_threshold() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[scroll]\nthreshold = nan\n").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[contact]
numbr = "1"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[contacts]\nnumber = \"1\"\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[scroll]
threshold = 100.0
header_offset = 80.0
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str("[scroll]\nthreshold = 40.0\n").unwrap();
        let merged = merge_toml(base, overlay);
        let scroll = merged.get("scroll").unwrap();
        assert_eq!(scroll.get("threshold").unwrap().as_float(), Some(40.0));
        assert_eq!(scroll.get("header_offset").unwrap().as_float(), Some(80.0));
    }

    #[test]
    fn merge_toml_arrays_replace_wholesale() {
        let base: toml::Value = toml::from_str("pool = [\"a\", \"b\"]").unwrap();
        let overlay: toml::Value = toml::from_str("pool = [\"c\"]").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("pool").unwrap().as_array().unwrap().len(), 1);
    }

    #[test]
    fn resolve_config_with_overlay() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[timing]\nripple_ms = 900\n").unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.timing.ripple_ms, 900);
        assert_eq!(config.timing.notification_visible_ms, 3000);
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(&stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in [
            "[contact]",
            "[timing]",
            "[scroll]",
            "[reveal]",
            "[parallax]",
            "[phrases]",
            "[images]",
            "[performance]",
        ] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        assert!(val.is_table());
        assert!(val.get("contact").is_some());
        assert!(val.get("phrases").is_some());
        assert!(val.get("performance").is_some());
    }
}
