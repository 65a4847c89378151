use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::RevealConfig;
use crate::dom::{self, ClassTarget};
use crate::error::Result;

// Browsers may report a ratio a hair under the threshold that fired the callback.
const RATIO_TOLERANCE: f64 = 1e-3;

pub fn should_reveal(is_intersecting: bool, ratio: f64, threshold: f64) -> bool {
    is_intersecting && ratio + RATIO_TOLERANCE >= threshold
}

/// Adds or removes the visible class. Leaving the viewport clears it, so the
/// animation plays again on the next entry.
pub fn update<E: ClassTarget + ?Sized>(
    element: &E,
    is_intersecting: bool,
    ratio: f64,
    config: &RevealConfig,
) -> Result<bool> {
    let visible = should_reveal(is_intersecting, ratio, config.threshold);
    element.toggle_class(&config.visible_class, visible)?;
    Ok(visible)
}

/// Observes every reveal element. Returns how many are observed.
pub fn init(config: &RevealConfig) -> Result<usize> {
    let elements = dom::query_all(&config.selector, None);
    if elements.is_empty() {
        info!("No {} elements, scroll reveal disabled", config.selector);
        return Ok(0);
    }

    let reveal = config.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target = entry.target();
                match update(&target, entry.is_intersecting(), entry.intersection_ratio(), &reveal) {
                    Ok(visible) => debug!("Reveal <{}> visible={}", target.tag_name(), visible),
                    Err(e) => warn!("Failed to update reveal class: {}", e),
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin("0px");
    options.set_threshold(&JsValue::from_f64(config.threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for element in &elements {
        observer.observe(element);
    }
    // Observer and callback stay alive for the page.
    callback.forget();

    info!("Scroll reveal observing {} elements", elements.len());
    Ok(elements.len())
}
