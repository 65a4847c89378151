use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use web_sys::Element;

use crate::config::MobileMenuConfig;
use crate::dom::{self, ClassTarget};
use crate::error::Result;

const ARIA_HIDDEN: &str = "aria-hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Off-canvas menu. The state lives here; classes and `aria-hidden` are
/// always rewritten from it, never read back from the DOM.
pub struct MobileMenu<E: ClassTarget> {
    toggle: E,
    nav: E,
    overlay: E,
    body: Option<E>,
    state: MenuState,
    active_class: String,
    body_lock_class: String,
}

pub type SharedMenu = Rc<RefCell<MobileMenu<Element>>>;

impl<E: ClassTarget> MobileMenu<E> {
    pub fn new(toggle: E, nav: E, overlay: E, body: Option<E>, config: &MobileMenuConfig) -> Self {
        Self {
            toggle,
            nav,
            overlay,
            body,
            state: MenuState::Closed,
            active_class: config.active_class.clone(),
            body_lock_class: config.body_lock_class.clone(),
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn open(&mut self) -> Result<()> {
        self.transition(MenuState::Open)
    }

    pub fn close(&mut self) -> Result<()> {
        self.transition(MenuState::Closed)
    }

    fn transition(&mut self, next: MenuState) -> Result<()> {
        if self.state != next {
            debug!("Mobile menu {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        self.render()
    }

    /// Writes every class and attribute that represents the current state.
    pub fn render(&self) -> Result<()> {
        let open = self.state == MenuState::Open;
        for element in [&self.toggle, &self.nav, &self.overlay] {
            element.toggle_class(&self.active_class, open)?;
        }
        if let Some(body) = &self.body {
            body.toggle_class(&self.body_lock_class, open)?;
        }
        let hidden = if open { "false" } else { "true" };
        self.nav.write_attribute(ARIA_HIDDEN, hidden)?;
        self.overlay.write_attribute(ARIA_HIDDEN, hidden)?;
        Ok(())
    }
}

/// Closes the menu if there is one. Used by other features after navigation.
pub fn close(menu: Option<&SharedMenu>) {
    let Some(menu) = menu else {
        return;
    };
    if let Err(e) = menu.borrow_mut().close() {
        warn!("Failed to close mobile menu: {}", e);
    }
}

fn listen(target: &Element, menu: &SharedMenu, next: MenuState) -> Result<()> {
    let menu = menu.clone();
    dom::on_click(target, move |_| {
        let result = match next {
            MenuState::Open => menu.borrow_mut().open(),
            MenuState::Closed => menu.borrow_mut().close(),
        };
        if let Err(e) = result {
            warn!("Mobile menu transition failed: {}", e);
        }
    })
}

/// Builds the menu when toggle, nav and overlay exist. Listeners are only
/// attached when the close button is present too.
pub fn init(config: &MobileMenuConfig) -> Result<Option<SharedMenu>> {
    let toggle = dom::query(&config.toggle_selector, None);
    let nav = dom::query(&config.nav_selector, None);
    let overlay = dom::query(&config.overlay_selector, None);
    let (Some(toggle), Some(nav), Some(overlay)) = (toggle, nav, overlay) else {
        info!("Mobile menu elements missing, mobile menu disabled");
        return Ok(None);
    };
    let body = dom::document()?.body().map(Element::from);

    let menu: SharedMenu = Rc::new(RefCell::new(MobileMenu::new(
        toggle.clone(),
        nav,
        overlay.clone(),
        body,
        config,
    )));

    let Some(close_button) = dom::query(&config.close_selector, None) else {
        info!("No {} on page, mobile menu listeners not attached", config.close_selector);
        return Ok(Some(menu));
    };

    listen(&toggle, &menu, MenuState::Open)?;
    listen(&close_button, &menu, MenuState::Closed)?;
    listen(&overlay, &menu, MenuState::Closed)?;
    let links = dom::query_all(&config.links_selector, None);
    for link in &links {
        listen(link, &menu, MenuState::Closed)?;
    }
    menu.borrow().render()?;

    info!("Mobile menu enabled with {} links", links.len());
    Ok(Some(menu))
}
