use std::sync::Arc;

use skyboard_nws::WeatherReport;

use super::{
    render_all, AlertsRender, ForecastRender, ObservationRender, ProductsRender, Render,
    RenderError,
};
use crate::dialog::DetailSurface;
use crate::dom::Element;
use crate::template::{TemplateProvider, WEATHER_TEMPLATE};

/// One location's panel: a stamped `weather-template` plus the renderers
/// that paint a report into it.
pub struct ReportView {
    root: Element,
    renderers: Vec<Box<dyn Render<WeatherReport>>>,
}

impl ReportView {
    /// Stamp the report template under `parent`.
    pub fn attach(
        parent: &Element,
        templates: Arc<dyn TemplateProvider>,
        dialog: Arc<dyn DetailSurface>,
    ) -> Result<Self, RenderError> {
        let root = templates.materialize(WEATHER_TEMPLATE)?;
        parent.append_child(root.clone());

        let renderers: Vec<Box<dyn Render<WeatherReport>>> = vec![
            Box::new(ProductsRender::new(dialog.clone())),
            Box::new(AlertsRender::new(dialog)),
            Box::new(ObservationRender::new()),
            Box::new(ForecastRender::new(templates)),
        ];

        Ok(Self { root, renderers })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn render(&self, report: &WeatherReport) -> Result<(), RenderError> {
        render_all(&self.renderers, &self.root, report)
    }
}
