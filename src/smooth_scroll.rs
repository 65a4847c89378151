use log::{debug, info, warn};
use web_sys::{Element, MouseEvent, ScrollBehavior, ScrollToOptions};

use crate::config::SmoothScrollConfig;
use crate::dom;
use crate::error::Result;
use crate::mobile_menu::{self, SharedMenu};

/// Where to scroll so the target clears the fixed navbar.
pub fn scroll_offset(element_top: f64, navbar_height: f64, padding: f64) -> f64 {
    element_top - navbar_height - padding
}

/// `"#pricing"` -> `Some("pricing")`. A bare `#` has no target.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

fn navbar_height(selector: &str) -> f64 {
    dom::query(selector, None)
        .and_then(|navbar| dom::as_html_element(navbar).ok())
        .map(|navbar| f64::from(navbar.offset_height()))
        .unwrap_or(0.0)
}

/// Scroll position for `href`, measured now, or `None` when nothing on the
/// page has that id. A missing navbar counts as zero height.
pub fn target_offset(href: &str, padding: f64, navbar_selector: &str) -> Result<Option<f64>> {
    let document = dom::document()?;
    let Some(target) = fragment_id(href).and_then(|id| document.get_element_by_id(id)) else {
        return Ok(None);
    };
    let top = f64::from(dom::as_html_element(target)?.offset_top());
    Ok(Some(scroll_offset(top, navbar_height(navbar_selector), padding)))
}

fn scroll_to_fragment(
    href: &str,
    padding: f64,
    navbar_selector: &str,
    menu: Option<&SharedMenu>,
) -> Result<()> {
    let Some(offset) = target_offset(href, padding, navbar_selector)? else {
        debug!("No element for {}, ignoring click", href);
        return Ok(());
    };
    debug!("Scrolling to {} at {}", href, offset);

    let options = ScrollToOptions::new();
    options.set_top(offset);
    options.set_behavior(ScrollBehavior::Smooth);
    dom::window()?.scroll_to_with_scroll_to_options(&options);

    mobile_menu::close(menu);
    Ok(())
}

/// Intercepts same-page anchor clicks. Returns how many anchors were wired.
pub fn init(
    config: &SmoothScrollConfig,
    navbar_selector: &str,
    menu: Option<SharedMenu>,
) -> Result<usize> {
    let anchors = dom::query_all(&config.anchor_selector, None);
    for anchor in &anchors {
        let link: Element = anchor.clone();
        let menu = menu.clone();
        let padding = config.extra_padding_px;
        let navbar_selector = navbar_selector.to_string();
        dom::on_click(anchor, move |e: MouseEvent| {
            e.prevent_default();
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            if let Err(e) = scroll_to_fragment(&href, padding, &navbar_selector, menu.as_ref()) {
                warn!("Smooth scroll to {} failed: {}", href, e);
            }
        })?;
    }
    info!("Smooth scrolling enabled for {} anchors", anchors.len());
    Ok(anchors.len())
}
