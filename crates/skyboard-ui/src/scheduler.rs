//! Multi-location dashboard scheduler.
//!
//! All reports are created concurrently at startup, with progress reported as
//! each one settles. Failed locations are reported once and dropped.
//! Successful ones are rendered and then refreshed forever on a staggered
//! timer: location `i` first refreshes after `(i + 1)` intervals, then once
//! per interval after each attempt settles. A failed refresh is reported and
//! the previous render stays up.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use skyboard_nws::{Coordinate, NwsClient, NwsError, ReportOptions, WeatherReport};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::dialog::DetailSurface;
use crate::dom::Element;
use crate::error_mapping::{format_nws_error, log_nws_error, log_render_error};
use crate::message::MessageSurface;
use crate::progress::{LoadingIndicator, ProgressData, ProgressIndicator, DEFAULT_HOLD};
use crate::render::ReportView;
use crate::template::TemplateProvider;

/// Default base refresh interval.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Where reports come from.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn create(&self, coordinate: Coordinate) -> Result<WeatherReport, NwsError>;
    async fn refresh(&self, report: &mut WeatherReport) -> Result<(), NwsError>;
}

/// Reports fetched live from api.weather.gov.
pub struct NwsReportSource {
    client: NwsClient,
    options: ReportOptions,
}

impl NwsReportSource {
    pub fn new(client: NwsClient, options: ReportOptions) -> Self {
        Self { client, options }
    }
}

#[async_trait]
impl ReportSource for NwsReportSource {
    async fn create(&self, coordinate: Coordinate) -> Result<WeatherReport, NwsError> {
        WeatherReport::create(&self.client, coordinate, self.options.clone()).await
    }

    async fn refresh(&self, report: &mut WeatherReport) -> Result<(), NwsError> {
        report.refresh(&self.client).await
    }
}

/// A configured dashboard location.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub coordinate: Coordinate,
    pub name: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinate: Coordinate::new(latitude, longitude),
            name: None,
        }
    }

    pub fn named(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::new(latitude, longitude)
        }
    }

    /// Label used in messages and logs: the configured name, else the
    /// report's place or station, else `station-{index}`.
    pub fn label(&self, index: usize, report: Option<&WeatherReport>) -> String {
        self.name
            .clone()
            .or_else(|| report.and_then(WeatherReport::place_name))
            .unwrap_or_else(|| format!("station-{}", index))
    }
}

/// The collaborators the dashboard reports to.
#[derive(Clone)]
pub struct Surfaces {
    pub templates: Arc<dyn TemplateProvider>,
    pub dialog: Arc<dyn DetailSurface>,
    pub messages: Arc<dyn MessageSurface>,
    pub progress: Arc<dyn ProgressIndicator>,
    pub loading: Arc<dyn LoadingIndicator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub refresh_interval: Duration,
    pub progress_hold: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refresh_interval: REFRESH_INTERVAL,
            progress_hold: DEFAULT_HOLD,
        }
    }
}

pub struct Dashboard {
    source: Arc<dyn ReportSource>,
    parent: Element,
    surfaces: Surfaces,
    config: SchedulerConfig,
}

impl Dashboard {
    pub fn new(
        source: Arc<dyn ReportSource>,
        parent: Element,
        surfaces: Surfaces,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            source,
            parent,
            surfaces,
            config,
        }
    }

    /// Load every location, render the ones that succeed and arm their
    /// refresh loops. Returns the loop handles.
    pub async fn start(&self, locations: Vec<Location>) -> Vec<JoinHandle<()>> {
        let total = locations.len();
        info!(total, "Starting dashboard");
        self.surfaces.loading.start();

        if total == 0 {
            self.update_progress(0, 0);
            return Vec::new();
        }

        let completed = AtomicUsize::new(0);
        let results = join_all(locations.iter().map(|location| {
            let completed = &completed;
            async move {
                let result = self.source.create(location.coordinate).await;
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                self.update_progress(done, total);
                result
            }
        }))
        .await;

        let mut handles = Vec::new();
        for (index, (location, result)) in locations.into_iter().zip(results).enumerate() {
            match result {
                Ok(report) => {
                    let label = location.label(index, Some(&report));
                    if let Some(handle) = self.show(index, label, report) {
                        handles.push(handle);
                    }
                }
                Err(err) => {
                    let label = location.label(index, None);
                    log_nws_error(&label, &err);
                    self.surfaces
                        .messages
                        .show(&format!("{}: {}", label, format_nws_error(&err)));
                }
            }
        }

        info!(armed = handles.len(), failed = total - handles.len(), "Dashboard started");
        handles
    }

    fn update_progress(&self, done: usize, total: usize) {
        let data = ProgressData::calculate(done, total);
        self.surfaces.progress.set_percent(data.percent);
        if done >= total {
            self.surfaces.progress.complete(self.config.progress_hold);
            self.surfaces.loading.stop();
        }
    }

    /// Attach and render one report, then spawn its refresh loop.
    fn show(&self, index: usize, label: String, report: WeatherReport) -> Option<JoinHandle<()>> {
        let view = match ReportView::attach(
            &self.parent,
            self.surfaces.templates.clone(),
            self.surfaces.dialog.clone(),
        ) {
            Ok(view) => view,
            Err(err) => {
                log_render_error(&label, &err);
                self.surfaces.messages.show(&format!("{}: {}", label, err));
                return None;
            }
        };

        if let Err(err) = view.render(&report) {
            log_render_error(&label, &err);
            self.surfaces.messages.show(&format!("{}: {}", label, err));
        }

        let interval = self.config.refresh_interval;
        let task = RefreshTask {
            source: self.source.clone(),
            messages: self.surfaces.messages.clone(),
            report,
            view,
            label,
            first_delay: interval * (index as u32 + 1),
            interval,
        };
        Some(tokio::spawn(task.run()))
    }
}

struct RefreshTask {
    source: Arc<dyn ReportSource>,
    messages: Arc<dyn MessageSurface>,
    report: WeatherReport,
    view: ReportView,
    label: String,
    first_delay: Duration,
    interval: Duration,
}

impl RefreshTask {
    async fn run(mut self) {
        let mut delay = self.first_delay;
        loop {
            tokio::time::sleep(delay).await;
            delay = self.interval;

            info!(location = %self.label, "Refreshing");
            match self.source.refresh(&mut self.report).await {
                Ok(()) => {
                    if let Err(err) = self.view.render(&self.report) {
                        log_render_error(&self.label, &err);
                        self.messages
                            .show(&format!("Error refreshing {}: {}", self.label, err));
                    }
                }
                Err(err) => {
                    log_nws_error(&self.label, &err);
                    error!(location = %self.label, "Refresh failed, keeping previous report");
                    self.messages.show(&format!(
                        "Error refreshing {}: {}",
                        self.label,
                        format_nws_error(&err)
                    ));
                }
            }
        }
    }
}
