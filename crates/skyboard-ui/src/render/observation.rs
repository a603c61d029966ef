//! Current conditions panel.

use skyboard_nws::{units, ObservationProperties, WeatherReport};

use super::format::{self, TIMESTAMP_FORMAT};
use super::{render_all, IconRender, IconSize, Render, RenderError, TextRender};
use crate::dom::Element;

fn current(report: &WeatherReport) -> Option<&ObservationProperties> {
    report.observation().map(|observation| &observation.properties)
}

/// Renders station, icon, description and every measured value.
pub struct ObservationRender {
    fields: Vec<Box<dyn Render<WeatherReport>>>,
}

impl ObservationRender {
    pub fn new() -> Self {
        let fields: Vec<Box<dyn Render<WeatherReport>>> = vec![
            Box::new(TextRender::new(".station-name", |report: &WeatherReport| {
                report.station().map(|station| {
                    format!(
                        "{} ({})",
                        station.properties.name, station.properties.station_identifier
                    )
                })
            })),
            Box::new(IconRender::new(
                ".current-icon",
                IconSize::Large,
                |report: &WeatherReport| {
                    current(report).and_then(|c| c.icon.clone())
                },
                |report: &WeatherReport| {
                    current(report)
                        .and_then(|c| c.text_description.as_deref())
                        .map(str::trim)
                        .filter(|text| !text.is_empty())
                        .unwrap_or("No Data")
                        .to_string()
                },
            )),
            Box::new(TextRender::new(".description-text", |report: &WeatherReport| {
                current(report).and_then(|c| c.text_description.clone())
            })),
            Box::new(
                TextRender::number(
                    ".current-temp-f",
                    |report: &WeatherReport| {
                        current(report).and_then(|c| units::celsius(&c.temperature))
                    },
                    format::fahrenheit,
                )
                .with_fallback("--°F"),
            ),
            Box::new(
                TextRender::number(
                    ".current-temp-c",
                    |report: &WeatherReport| {
                        current(report).and_then(|c| units::celsius(&c.temperature))
                    },
                    format::celsius,
                )
                .with_fallback("--°C"),
            ),
            Box::new(
                TextRender::number(
                    ".humidity",
                    |report: &WeatherReport| {
                        current(report).and_then(|c| units::value(&c.relative_humidity))
                    },
                    format::percent,
                )
                .with_fallback("--%"),
            ),
            Box::new(TextRender::new(".wind-speed", |report: &WeatherReport| {
                let current = current(report);
                Some(format::wind(
                    current.and_then(|c| units::speed_mph(&c.wind_speed)),
                    current.and_then(|c| units::value(&c.wind_direction)),
                ))
            })),
            Box::new(
                TextRender::number(
                    ".pressure",
                    |report: &WeatherReport| {
                        current(report).and_then(|c| units::value(&c.barometric_pressure))
                    },
                    format::pressure,
                )
                .with_fallback("--.-- in (----.- mb)"),
            ),
            Box::new(
                TextRender::number(
                    ".dewpoint",
                    |report: &WeatherReport| {
                        current(report).and_then(|c| units::celsius(&c.dewpoint))
                    },
                    format::dewpoint,
                )
                .with_fallback("--°F (--°C)"),
            ),
            Box::new(
                TextRender::number(
                    ".visibility",
                    |report: &WeatherReport| {
                        current(report).and_then(|c| units::value(&c.visibility))
                    },
                    format::visibility,
                )
                .with_fallback("--.-- mi"),
            ),
            Box::new(TextRender::new(".last-update", |report: &WeatherReport| {
                current(report)
                    .and_then(|c| c.timestamp.as_ref())
                    .map(|timestamp| {
                        format::local_time(timestamp, report.time_zone(), TIMESTAMP_FORMAT)
                    })
            })),
        ];

        Self { fields }
    }
}

impl Default for ObservationRender {
    fn default() -> Self {
        Self::new()
    }
}

impl Render<WeatherReport> for ObservationRender {
    fn render(&self, root: &Element, report: &WeatherReport) -> Result<(), RenderError> {
        render_all(&self.fields, root, report)
    }
}
