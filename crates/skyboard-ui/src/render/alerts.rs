//! Active alert links.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use skyboard_nws::WeatherReport;

use super::format::alert_headline;
use super::{Render, RenderError};
use crate::dialog::DetailSurface;
use crate::dom::Element;
use crate::template::query;

const ALERTS_SELECTOR: &str = ".alerts";

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct AlertsRender {
    dialog: Arc<dyn DetailSurface>,
    clock: Clock,
}

impl AlertsRender {
    pub fn new(dialog: Arc<dyn DetailSurface>) -> Self {
        Self {
            dialog,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the wall clock used to decide whether an alert has started.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}

impl Render<WeatherReport> for AlertsRender {
    fn render(&self, root: &Element, report: &WeatherReport) -> Result<(), RenderError> {
        let alerts = query(root, ALERTS_SELECTOR)?;
        alerts.clear();

        let now = (self.clock)();
        for alert in report.alerts() {
            let alert = &alert.properties;
            let label = Element::new("div")
                .with_class("alert")
                .with_class(&alert.severity.to_lowercase())
                .with_text(&alert_headline(alert, report.time_zone(), now));

            let link = Element::new("a").with_child(label);
            let dialog = self.dialog.clone();
            let title = alert.event.clone();
            let text = alert.text();
            link.set_on_click(move || dialog.show(&title, &text));

            alerts.append_child(link);
        }
        Ok(())
    }
}
