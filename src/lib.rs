//! Interactive behaviors for the landing page: smooth anchor scrolling, the
//! navbar scroll style, the off-canvas mobile menu, the logo carousel and
//! scroll-reveal animations. Each feature looks up its elements once and
//! quietly stays off when they are missing.

use log::{info, warn, Level};
use wasm_bindgen::prelude::*;
use web_sys::AddEventListenerOptions;

pub mod carousel;
pub mod config;
pub mod dom;
pub mod error;
pub mod mobile_menu;
pub mod navbar;
pub mod reveal;
pub mod smooth_scroll;
pub mod timer;

use carousel::CarouselGeometry;
use config::SiteConfig;

/// What got wired up on this page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Enabled {
    pub mobile_menu: bool,
    pub smooth_scroll_anchors: usize,
    pub navbar: bool,
    pub carousel: Option<CarouselGeometry>,
    pub reveal_elements: usize,
}

fn report<T: Default>(feature: &str, result: error::Result<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!("{} disabled: {}", feature, e);
        T::default()
    })
}

/// Attaches every feature to the current document. Features are independent:
/// one failing does not stop the others.
pub fn attach(config: &SiteConfig) -> Enabled {
    let menu = report("Mobile menu", mobile_menu::init(&config.mobile_menu));
    let mobile_menu = menu.is_some();
    let smooth_scroll_anchors = report(
        "Smooth scroll",
        smooth_scroll::init(&config.smooth_scroll, &config.navbar.selector, menu),
    );
    let navbar = report("Navbar scroll style", navbar::init(&config.navbar));
    let carousel = report("Carousel", carousel::init(&config.carousel));
    let reveal_elements = report("Scroll reveal", reveal::init(&config.reveal));

    Enabled {
        mobile_menu,
        smooth_scroll_anchors,
        navbar,
        carousel,
        reveal_elements,
    }
}

fn init_logging() -> SiteConfig {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed by an earlier start().
    let _ = console_log::init_with_level(Level::Trace);
    let config = SiteConfig::load();
    log::set_max_level(config.level().to_level_filter());
    config
}

/// Entry point: runs once the document has been parsed.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    let config = init_logging();
    info!("Starting landing behaviors");
    let document = dom::document().map_err(|e| JsValue::from_str(&e.to_string()))?;

    if document.ready_state() != "loading" {
        let enabled = attach(&config);
        info!("Landing behaviors attached: {:?}", enabled);
        return Ok(());
    }

    let on_ready = Closure::once(move || {
        let enabled = attach(&config);
        info!("Landing behaviors attached: {:?}", enabled);
    });
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        on_ready.as_ref().unchecked_ref(),
        &options,
    )?;
    on_ready.forget();
    Ok(())
}
