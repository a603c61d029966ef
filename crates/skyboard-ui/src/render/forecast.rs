//! Forecast strip: one stamped template per period.

use std::sync::Arc;

use skyboard_nws::{Period, WeatherReport};

use super::format;
use super::{render_all, IconRender, IconSize, Render, RenderError, TextRender};
use crate::dom::Element;
use crate::template::{query, TemplateProvider, FORECAST_PERIOD_TEMPLATE};

const FORECAST_SELECTOR: &str = ".forecast";

/// Periods shown, about four and a half days.
pub const MAX_PERIODS: usize = 9;

pub struct ForecastRender {
    templates: Arc<dyn TemplateProvider>,
    period: Vec<Box<dyn Render<Period>>>,
}

impl ForecastRender {
    pub fn new(templates: Arc<dyn TemplateProvider>) -> Self {
        let period: Vec<Box<dyn Render<Period>>> = vec![
            Box::new(IconRender::new(
                ".period-icon",
                IconSize::Medium,
                |period: &Period| period.icon.clone(),
                |period: &Period| period.short_forecast.clone().unwrap_or_default(),
            )),
            Box::new(
                TextRender::new(".period-name", |period: &Period| {
                    Some(period.name.clone()).filter(|name| !name.is_empty())
                })
                .with_fallback("Missing"),
            ),
            Box::new(
                TextRender::number(".period-temp", Period::temperature_f, format::degrees_f)
                    .with_fallback("--°F"),
            ),
            Box::new(
                TextRender::new(".period-short", |period: &Period| {
                    period
                        .short_forecast
                        .as_deref()
                        .map(format::non_breaking_hyphens)
                })
                .with_fallback("Missing"),
            ),
        ];

        Self { templates, period }
    }
}

impl Render<WeatherReport> for ForecastRender {
    fn render(&self, root: &Element, report: &WeatherReport) -> Result<(), RenderError> {
        let forecast = query(root, FORECAST_SELECTOR)?;
        forecast.clear();

        for period in report.forecast().properties.periods.iter().take(MAX_PERIODS) {
            let element = self.templates.materialize(FORECAST_PERIOD_TEMPLATE)?;
            forecast.append_child(element.clone());
            render_all(&self.period, &element, period)?;
        }
        Ok(())
    }
}
