use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element};

use crate::config::NavbarConfig;
use crate::dom::{self, ClassTarget};
use crate::error::Result;
use crate::timer::{BrowserScheduler, Debouncer, Scheduler};

pub fn is_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

/// Toggles the scrolled class on the navbar once scrolling settles.
pub struct ScrollStyle<E: ClassTarget, S: Scheduler> {
    navbar: Rc<E>,
    debouncer: Debouncer<S>,
    class: Rc<str>,
    threshold: f64,
}

impl<E: ClassTarget + 'static, S: Scheduler> ScrollStyle<E, S> {
    pub fn new(navbar: E, scheduler: S, config: &NavbarConfig) -> Self {
        Self {
            navbar: Rc::new(navbar),
            debouncer: Debouncer::new(scheduler, config.debounce_ms),
            class: Rc::from(config.scrolled_class.as_str()),
            threshold: config.threshold_px,
        }
    }

    /// Called for every scroll event. `read_offset` is evaluated when the
    /// debounce fires, so the final position of a burst wins.
    pub fn on_scroll(&mut self, read_offset: impl FnOnce() -> f64 + 'static) {
        let navbar = self.navbar.clone();
        let class = self.class.clone();
        let threshold = self.threshold;
        self.debouncer.call(move || {
            let scrolled = is_scrolled(read_offset(), threshold);
            if let Err(e) = navbar.toggle_class(&class, scrolled) {
                warn!("Failed to update navbar class: {}", e);
            }
        });
    }
}

/// Wires the window scroll listener. Returns `false` when the page has no navbar.
pub fn init(config: &NavbarConfig) -> Result<bool> {
    let Some(navbar) = dom::query(&config.selector, None) else {
        info!("No {} on page, navbar scroll styling disabled", config.selector);
        return Ok(false);
    };
    let window = dom::window()?;
    let style: Rc<RefCell<ScrollStyle<Element, BrowserScheduler>>> =
        Rc::new(RefCell::new(ScrollStyle::new(navbar, BrowserScheduler, config)));

    let window_clone = window.clone();
    let scroll_callback = Closure::<dyn FnMut()>::new(move || {
        let window = window_clone.clone();
        style.borrow_mut().on_scroll(move || {
            let offset = window.scroll_y().unwrap_or(0.0);
            debug!("Navbar debounce settled at scrollY={}", offset);
            offset
        });
    });

    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        scroll_callback.as_ref().unchecked_ref(),
        &options,
    )?;
    // Lives as long as the page.
    scroll_callback.forget();

    info!("Navbar scroll styling enabled");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::dom::fake::FakeElement;
    use crate::timer::fake::ManualScheduler;

    fn setup() -> (ScrollStyle<Rc<FakeElement>, ManualScheduler>, Rc<FakeElement>, ManualScheduler) {
        let navbar = Rc::new(FakeElement::default());
        let clock = ManualScheduler::default();
        let style = ScrollStyle::new(navbar.clone(), clock.clone(), &NavbarConfig::default());
        (style, navbar, clock)
    }

    fn scroll_to(style: &mut ScrollStyle<Rc<FakeElement>, ManualScheduler>, position: &Rc<Cell<f64>>, y: f64) {
        position.set(y);
        let position = position.clone();
        style.on_scroll(move || position.get());
    }

    #[test]
    fn threshold_is_exclusive() {
        assert!(!is_scrolled(0.0, 50.0));
        assert!(!is_scrolled(50.0, 50.0));
        assert!(is_scrolled(50.5, 50.0));
    }

    #[test]
    fn class_applies_only_after_debounce() {
        let (mut style, navbar, clock) = setup();
        let position = Rc::new(Cell::new(0.0));

        scroll_to(&mut style, &position, 300.0);
        clock.advance(99);
        assert!(!navbar.has_class("scrolled"));
        clock.advance(1);
        assert!(navbar.has_class("scrolled"));
    }

    #[test]
    fn burst_uses_final_offset() {
        let (mut style, navbar, clock) = setup();
        let position = Rc::new(Cell::new(0.0));

        for y in [80.0, 200.0, 400.0, 10.0] {
            scroll_to(&mut style, &position, y);
            clock.advance(20);
        }
        clock.advance(100);
        assert!(!navbar.has_class("scrolled"));
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn scrolling_back_up_removes_class() {
        let (mut style, navbar, clock) = setup();
        let position = Rc::new(Cell::new(0.0));

        scroll_to(&mut style, &position, 120.0);
        clock.advance(100);
        assert!(navbar.has_class("scrolled"));

        scroll_to(&mut style, &position, 50.0);
        clock.advance(100);
        assert!(!navbar.has_class("scrolled"));
    }
}
