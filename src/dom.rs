//! Thin helpers over `web_sys` DOM access, plus the `ClassTarget` seam the
//! controllers write through so they can be driven by fakes in tests.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, MouseEvent, Window};

use crate::error::{BehaviorError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(BehaviorError::MissingGlobal("window"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or(BehaviorError::MissingGlobal("document"))
}

/// `querySelector` scoped to `parent`, or to the whole document.
/// An invalid selector is treated the same as no match.
pub fn query(selector: &str, parent: Option<&Element>) -> Option<Element> {
    let found = match parent {
        Some(parent) => parent.query_selector(selector),
        None => document().ok()?.query_selector(selector),
    };
    found.ok().flatten()
}

/// `querySelectorAll` scoped to `parent`, or to the whole document.
pub fn query_all(selector: &str, parent: Option<&Element>) -> Vec<Element> {
    let list = match parent {
        Some(parent) => parent.query_selector_all(selector),
        None => match document() {
            Ok(document) => document.query_selector_all(selector),
            Err(_) => return Vec::new(),
        },
    };
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn as_html_element(element: Element) -> Result<HtmlElement> {
    let tag = element.tag_name();
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| BehaviorError::NotHtmlElement(tag))
}

/// Attaches a click listener for the lifetime of the page.
pub fn on_click(target: &EventTarget, handler: impl FnMut(MouseEvent) + 'static) -> Result<()> {
    let callback = Closure::<dyn FnMut(MouseEvent)>::new(handler);
    target.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Computed value of a custom property on `<html>`, e.g. `--carousel-item-width`.
pub fn root_custom_property(name: &str) -> Result<Option<String>> {
    let window = window()?;
    let Some(root) = document()?.document_element() else {
        return Ok(None);
    };
    let Some(style) = window.get_computed_style(&root)? else {
        return Ok(None);
    };
    let value = style.get_property_value(name)?;
    Ok(Some(value))
}

/// Parses the leading number of a CSS value the way `parseFloat` does:
/// `" 200px"` is 200, `"abc"` is `None`.
pub fn parse_css_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].parse().ok();
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Formats a number the way JavaScript string interpolation does for the
/// values we write into styles: `-1320`, `25`, `12.5`, `Infinity`.
/// Magnitudes JavaScript would print in exponent form stay plain decimals.
pub fn format_js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Something that carries presentation classes and attributes.
pub trait ClassTarget {
    fn toggle_class(&self, class: &str, on: bool) -> Result<()>;
    fn has_class(&self, class: &str) -> bool;
    fn write_attribute(&self, name: &str, value: &str) -> Result<()>;
}

impl ClassTarget for Element {
    fn toggle_class(&self, class: &str, on: bool) -> Result<()> {
        let list = self.class_list();
        if on {
            list.add_1(class)?;
        } else {
            list.remove_1(class)?;
        }
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn write_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.set_attribute(name, value)?;
        Ok(())
    }
}

impl<T: ClassTarget + ?Sized> ClassTarget for Rc<T> {
    fn toggle_class(&self, class: &str, on: bool) -> Result<()> {
        (**self).toggle_class(class, on)
    }

    fn has_class(&self, class: &str) -> bool {
        (**self).has_class(class)
    }

    fn write_attribute(&self, name: &str, value: &str) -> Result<()> {
        (**self).write_attribute(name, value)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;
    use std::collections::{BTreeSet, HashMap};

    use super::ClassTarget;
    use crate::error::Result;

    #[derive(Debug, Default)]
    pub struct FakeElement {
        classes: RefCell<BTreeSet<String>>,
        attributes: RefCell<HashMap<String, String>>,
    }

    impl FakeElement {
        pub fn attribute(&self, name: &str) -> Option<String> {
            self.attributes.borrow().get(name).cloned()
        }
    }

    impl ClassTarget for FakeElement {
        fn toggle_class(&self, class: &str, on: bool) -> Result<()> {
            let mut classes = self.classes.borrow_mut();
            if on {
                classes.insert(class.to_string());
            } else {
                classes.remove(class);
            }
            Ok(())
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.borrow().contains(class)
        }

        fn write_attribute(&self, name: &str, value: &str) -> Result<()> {
            self.attributes
                .borrow_mut()
                .insert(name.to_string(), value.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_leading_number_like_parse_float() {
        assert_eq!(parse_css_number("200px"), Some(200.0));
        assert_eq!(parse_css_number("  20px"), Some(20.0));
        assert_eq!(parse_css_number("-1.5rem"), Some(-1.5));
        assert_eq!(parse_css_number(".5"), Some(0.5));
        assert_eq!(parse_css_number("5."), Some(5.0));
        assert_eq!(parse_css_number("1e3s"), Some(1000.0));
        assert_eq!(parse_css_number("2e"), Some(2.0));
        assert_eq!(parse_css_number("Infinity"), Some(f64::INFINITY));
    }

    #[test]
    fn rejects_values_without_a_leading_number() {
        assert_eq!(parse_css_number(""), None);
        assert_eq!(parse_css_number("   "), None);
        assert_eq!(parse_css_number("px200"), None);
        assert_eq!(parse_css_number("-"), None);
        assert_eq!(parse_css_number("."), None);
    }

    #[test]
    fn formats_numbers_without_trailing_zero() {
        assert_eq!(format_js_number(-1320.0), "-1320");
        assert_eq!(format_js_number(25.0), "25");
        assert_eq!(format_js_number(12.5), "12.5");
        assert_eq!(format_js_number(-0.0), "0");
    }

    #[test]
    fn formats_non_finite_numbers_like_javascript() {
        assert_eq!(format_js_number(f64::INFINITY), "Infinity");
        assert_eq!(format_js_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_js_number(f64::NAN), "NaN");
    }
}
