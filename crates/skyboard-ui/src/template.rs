//! Templates: named element fragments stamped out per report and per
//! forecast period.

use std::collections::HashMap;

use crate::dom::Element;
use crate::render::RenderError;

pub const WEATHER_TEMPLATE: &str = "weather-template";
pub const FORECAST_PERIOD_TEMPLATE: &str = "forecast-period-template";

/// Source of fresh element subtrees by template id.
pub trait TemplateProvider: Send + Sync {
    fn materialize(&self, template_id: &str) -> Result<Element, RenderError>;
}

/// Templates held in memory. Each is a `template` element whose first child
/// is the root that gets copied.
#[derive(Debug, Default)]
pub struct Templates {
    templates: HashMap<String, Element>,
}

impl Templates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, template_id: &str, fragment: Element) {
        self.templates.insert(template_id.to_string(), fragment);
    }

    /// The report and forecast period layouts the renderers expect.
    pub fn builtin() -> Self {
        let mut templates = Self::new();
        templates.register(WEATHER_TEMPLATE, weather_fragment());
        templates.register(FORECAST_PERIOD_TEMPLATE, forecast_period_fragment());
        templates
    }
}

impl TemplateProvider for Templates {
    fn materialize(&self, template_id: &str) -> Result<Element, RenderError> {
        let fragment = self
            .templates
            .get(template_id)
            .ok_or_else(|| RenderError::TemplateNotFound(template_id.to_string()))?;
        let root = fragment
            .first_child()
            .ok_or_else(|| RenderError::MissingRoot(template_id.to_string()))?;
        Ok(root.deep_clone())
    }
}

fn span(class: &str) -> Element {
    Element::new("span").with_class(class)
}

fn img(class: &str) -> Element {
    Element::new("img").with_class(class)
}

fn weather_fragment() -> Element {
    let current = Element::new("div")
        .with_class("current")
        .with_child(Element::new("h2").with_class("station-name"))
        .with_child(img("current-icon"))
        .with_child(span("description-text"))
        .with_child(span("current-temp-f"))
        .with_child(span("current-temp-c"))
        .with_child(span("humidity"))
        .with_child(span("wind-speed"))
        .with_child(span("pressure"))
        .with_child(span("dewpoint"))
        .with_child(span("visibility"))
        .with_child(span("last-update"));

    Element::new("template").with_id(WEATHER_TEMPLATE).with_child(
        Element::new("div")
            .with_class("weather-report")
            .with_child(Element::new("div").with_class("products"))
            .with_child(Element::new("div").with_class("alerts"))
            .with_child(current)
            .with_child(Element::new("div").with_class("forecast")),
    )
}

fn forecast_period_fragment() -> Element {
    Element::new("template")
        .with_id(FORECAST_PERIOD_TEMPLATE)
        .with_child(
            Element::new("div")
                .with_class("forecast-period")
                .with_child(img("period-icon"))
                .with_child(span("period-name"))
                .with_child(span("period-temp"))
                .with_child(span("period-short")),
        )
}

/// First descendant of `root` matching `selector`.
pub fn query(root: &Element, selector: &str) -> Result<Element, RenderError> {
    root.query(selector)
        .ok_or_else(|| RenderError::ElementNotFound(selector.to_string()))
}

/// Like [`query`], but the match must be an `img`.
pub fn query_image(root: &Element, selector: &str) -> Result<Element, RenderError> {
    match root.query(selector) {
        Some(element) if element.tag() == "img" => Ok(element),
        _ => Err(RenderError::ImageNotFound(selector.to_string())),
    }
}
