use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::config::CarouselConfig;
use crate::dom;
use crate::error::{BehaviorError, Result};

pub const SCROLL_DISTANCE_PROPERTY: &str = "--scroll-distance";
pub const ANIMATION_DURATION_PROPERTY: &str = "animation-duration";

/// DOM operations the carousel needs, so the geometry can be exercised
/// without a browser.
pub trait CarouselTrack {
    type Item;

    fn items(&self) -> Vec<Self::Item>;
    fn clone_deep(&self, item: &Self::Item) -> Result<Self::Item>;
    fn append_all(&self, items: Vec<Self::Item>) -> Result<()>;
    fn set_style_property(&self, name: &str, value: &str) -> Result<()>;
}

/// Sizes read from the root custom properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselMetrics {
    pub item_width: f64,
    pub item_gap: f64,
    pub base_duration: f64,
}

impl CarouselMetrics {
    /// Zero or unparseable values take the default, like `parseFloat(v) || d`.
    pub fn from_raw(
        width: Option<&str>,
        gap: Option<&str>,
        duration: Option<&str>,
        default_duration: f64,
    ) -> Self {
        fn number_or(raw: Option<&str>, default: f64) -> f64 {
            raw.and_then(dom::parse_css_number)
                .filter(|v| *v != 0.0)
                .unwrap_or(default)
        }
        Self {
            item_width: number_or(width, 0.0),
            item_gap: number_or(gap, 0.0),
            base_duration: number_or(duration, default_duration),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselGeometry {
    pub item_count: usize,
    /// Negative: one full original set of items plus gaps.
    pub scroll_distance: f64,
    pub animation_duration: f64,
}

impl CarouselGeometry {
    pub fn compute(item_count: usize, metrics: &CarouselMetrics, reference_item_count: u32) -> Self {
        let count = item_count as f64;
        let reference = f64::from(reference_item_count.max(1));
        Self {
            item_count,
            scroll_distance: -(count * (metrics.item_width + metrics.item_gap)),
            animation_duration: metrics.base_duration * (count / reference),
        }
    }

    pub fn scroll_distance_css(&self) -> String {
        format!("{}px", dom::format_js_number(self.scroll_distance))
    }

    pub fn animation_duration_css(&self) -> String {
        format!("{}s", dom::format_js_number(self.animation_duration))
    }
}

/// Appends one deep copy of every item, then publishes the loop geometry.
pub fn duplicate_and_publish<T: CarouselTrack>(
    track: &T,
    metrics: &CarouselMetrics,
    reference_item_count: u32,
) -> Result<CarouselGeometry> {
    let originals = track.items();
    let clones = originals
        .iter()
        .map(|item| track.clone_deep(item))
        .collect::<Result<Vec<_>>>()?;
    track.append_all(clones)?;

    let geometry = CarouselGeometry::compute(originals.len(), metrics, reference_item_count);
    track.set_style_property(SCROLL_DISTANCE_PROPERTY, &geometry.scroll_distance_css())?;
    track.set_style_property(ANIMATION_DURATION_PROPERTY, &geometry.animation_duration_css())?;
    Ok(geometry)
}

pub struct DomTrack {
    element: HtmlElement,
}

impl DomTrack {
    pub fn new(element: Element) -> Result<Self> {
        Ok(Self {
            element: dom::as_html_element(element)?,
        })
    }
}

impl CarouselTrack for DomTrack {
    type Item = Element;

    fn items(&self) -> Vec<Element> {
        let children = self.element.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn clone_deep(&self, item: &Element) -> Result<Element> {
        item.clone_node_with_deep(true)?
            .dyn_into::<Element>()
            .map_err(|_| BehaviorError::Js("cloned carousel item is not an element".to_string()))
    }

    fn append_all(&self, items: Vec<Element>) -> Result<()> {
        let fragment = dom::document()?.create_document_fragment();
        for item in &items {
            fragment.append_child(item)?;
        }
        self.element.append_child(&fragment)?;
        Ok(())
    }

    fn set_style_property(&self, name: &str, value: &str) -> Result<()> {
        self.element.style().set_property(name, value)?;
        Ok(())
    }
}

pub fn init(config: &CarouselConfig) -> Result<Option<CarouselGeometry>> {
    let Some(element) = dom::query(&config.track_selector, None) else {
        info!("No {} on page, carousel disabled", config.track_selector);
        return Ok(None);
    };
    let track = DomTrack::new(element)?;

    let width = dom::root_custom_property(&config.width_property)?;
    let gap = dom::root_custom_property(&config.gap_property)?;
    let duration = dom::root_custom_property(&config.duration_property)?;
    let metrics = CarouselMetrics::from_raw(
        width.as_deref(),
        gap.as_deref(),
        duration.as_deref(),
        config.default_duration_secs,
    );
    debug!("Carousel metrics {:?}", metrics);

    let geometry = duplicate_and_publish(&track, &metrics, config.reference_item_count)?;
    info!(
        "Carousel looping {} items over {} ({})",
        geometry.item_count,
        geometry.scroll_distance_css(),
        geometry.animation_duration_css()
    );
    Ok(Some(geometry))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Card {
        label: String,
        copy: bool,
    }

    #[derive(Default)]
    struct FakeTrack {
        cards: RefCell<Vec<Card>>,
        styles: RefCell<HashMap<String, String>>,
    }

    impl FakeTrack {
        fn with_cards(n: usize) -> Self {
            let track = Self::default();
            *track.cards.borrow_mut() = (0..n)
                .map(|i| Card { label: format!("logo-{i}"), copy: false })
                .collect();
            track
        }

        fn style(&self, name: &str) -> Option<String> {
            self.styles.borrow().get(name).cloned()
        }
    }

    impl CarouselTrack for FakeTrack {
        type Item = Card;

        fn items(&self) -> Vec<Card> {
            self.cards.borrow().clone()
        }

        fn clone_deep(&self, item: &Card) -> Result<Card> {
            Ok(Card { label: item.label.clone(), copy: true })
        }

        fn append_all(&self, items: Vec<Card>) -> Result<()> {
            self.cards.borrow_mut().extend(items);
            Ok(())
        }

        fn set_style_property(&self, name: &str, value: &str) -> Result<()> {
            self.styles.borrow_mut().insert(name.to_string(), value.to_string());
            Ok(())
        }
    }

    fn metrics(width: f64, gap: f64, base: f64) -> CarouselMetrics {
        CarouselMetrics { item_width: width, item_gap: gap, base_duration: base }
    }

    #[test]
    fn six_items_loop_over_one_set() {
        let track = FakeTrack::with_cards(6);
        let geometry = duplicate_and_publish(&track, &metrics(200.0, 20.0, 50.0), 6).unwrap();

        assert_eq!(track.cards.borrow().len(), 12);
        assert_eq!(geometry.scroll_distance, -1320.0);
        assert_eq!(geometry.animation_duration, 50.0);
        assert_eq!(track.style("--scroll-distance").as_deref(), Some("-1320px"));
        assert_eq!(track.style("animation-duration").as_deref(), Some("50s"));
    }

    #[test]
    fn clones_follow_originals_in_order() {
        let track = FakeTrack::with_cards(3);
        duplicate_and_publish(&track, &metrics(100.0, 10.0, 50.0), 6).unwrap();

        let cards = track.cards.borrow();
        let (originals, copies) = cards.split_at(3);
        assert!(originals.iter().all(|c| !c.copy));
        assert!(copies.iter().all(|c| c.copy));
        let labels = |cs: &[Card]| cs.iter().map(|c| c.label.clone()).collect::<Vec<_>>();
        assert_eq!(labels(originals), labels(copies));
    }

    #[test]
    fn duration_scales_with_item_count() {
        let track = FakeTrack::with_cards(3);
        let geometry = duplicate_and_publish(&track, &metrics(200.0, 20.0, 50.0), 6).unwrap();
        assert_eq!(geometry.animation_duration, 25.0);
        assert_eq!(track.style("animation-duration").as_deref(), Some("25s"));

        let geometry = CarouselGeometry::compute(9, &metrics(200.0, 20.0, 40.0), 6);
        assert_eq!(geometry.animation_duration, 60.0);
    }

    #[test]
    fn empty_track_publishes_zero_geometry() {
        let track = FakeTrack::with_cards(0);
        let geometry = duplicate_and_publish(&track, &metrics(200.0, 20.0, 50.0), 6).unwrap();
        assert!(track.cards.borrow().is_empty());
        assert_eq!(track.style("--scroll-distance").as_deref(), Some("0px"));
        assert_eq!(geometry.animation_duration_css(), "0s");
    }

    #[test]
    fn metrics_fall_back_on_bad_values() {
        let parsed = CarouselMetrics::from_raw(Some(" 200px"), Some("20px"), Some("30s"), 50.0);
        assert_eq!(parsed, metrics(200.0, 20.0, 30.0));

        let fallback = CarouselMetrics::from_raw(Some("auto"), None, Some(""), 50.0);
        assert_eq!(fallback, metrics(0.0, 0.0, 50.0));

        let zero_duration = CarouselMetrics::from_raw(None, None, Some("0s"), 50.0);
        assert_eq!(zero_duration.base_duration, 50.0);
    }
}
