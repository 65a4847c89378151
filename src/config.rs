use log::{warn, Level};
use serde::Deserialize;
use wasm_bindgen::JsValue;

/// Name of the page global that may override any of the defaults below.
pub const CONFIG_GLOBAL: &str = "landingBehaviorsConfig";

#[cfg(debug_assertions)]
fn default_log_level() -> String {
    "debug".to_string()  // Verbose console output while developing locally
}

#[cfg(not(debug_assertions))]
fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub log_level: String,
    pub navbar: NavbarConfig,
    pub smooth_scroll: SmoothScrollConfig,
    pub mobile_menu: MobileMenuConfig,
    pub carousel: CarouselConfig,
    pub reveal: RevealConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            navbar: NavbarConfig::default(),
            smooth_scroll: SmoothScrollConfig::default(),
            mobile_menu: MobileMenuConfig::default(),
            carousel: CarouselConfig::default(),
            reveal: RevealConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavbarConfig {
    pub selector: String,
    pub scrolled_class: String,
    pub threshold_px: f64,
    pub debounce_ms: u32,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            selector: ".navbar-wrapper".to_string(),
            scrolled_class: "scrolled".to_string(),
            threshold_px: 50.0,
            debounce_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmoothScrollConfig {
    pub anchor_selector: String,
    pub extra_padding_px: f64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            anchor_selector: "a[href^=\"#\"]".to_string(),
            extra_padding_px: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MobileMenuConfig {
    pub toggle_selector: String,
    pub nav_selector: String,
    pub close_selector: String,
    pub overlay_selector: String,
    pub links_selector: String,
    pub active_class: String,
    pub body_lock_class: String,
}

impl Default for MobileMenuConfig {
    fn default() -> Self {
        Self {
            toggle_selector: "#mobile-menu".to_string(),
            nav_selector: "#mobile-nav".to_string(),
            close_selector: "#close-menu".to_string(),
            overlay_selector: "#menu-overlay".to_string(),
            links_selector: "#mobile-nav .mobile-nav-links a".to_string(),
            active_class: "is-active".to_string(),
            body_lock_class: "no-scroll".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    pub track_selector: String,
    pub width_property: String,
    pub gap_property: String,
    pub duration_property: String,
    pub default_duration_secs: f64,
    /// Item count the base duration was tuned for.
    pub reference_item_count: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            track_selector: "#carouselTrack".to_string(),
            width_property: "--carousel-item-width".to_string(),
            gap_property: "--carousel-item-gap".to_string(),
            duration_property: "--carousel-animation-duration".to_string(),
            default_duration_secs: 50.0,
            reference_item_count: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    pub selector: String,
    pub visible_class: String,
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".scroll-animate".to_string(),
            visible_class: "is-visible".to_string(),
            threshold: 0.1,
        }
    }
}

impl SiteConfig {
    /// Reads `window.landingBehaviorsConfig` if the page defines it.
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let raw = match web_sys::js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
            Ok(value) if !value.is_undefined() && !value.is_null() => value,
            _ => return Self::default(),
        };
        match serde_wasm_bindgen::from_value::<SiteConfig>(raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed {}: {}", CONFIG_GLOBAL, e);
                Self::default()
            }
        }
    }

    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::Info)
    }
}
