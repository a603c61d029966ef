//! Recording surfaces, canned reports and a scripted report source.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use skyboard_nws::{
    Coordinate, NwsError, ProblemDetails, ReportOptions, ReportSnapshot, WeatherReport,
};
use skyboard_ui::{
    DetailSurface, Element, LoadingIndicator, MessageSurface, ProgressIndicator, ReportSource,
    Surfaces, Templates,
};
use tokio::time::Instant;

// ===== Surfaces =====

#[derive(Default)]
pub struct RecordingMessages(pub Mutex<Vec<String>>);

impl MessageSurface for RecordingMessages {
    fn show(&self, text: &str) {
        self.0.lock().push(text.to_string());
    }
}

impl RecordingMessages {
    pub fn all(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    pub percents: Mutex<Vec<u8>>,
    pub completions: AtomicUsize,
}

impl ProgressIndicator for RecordingProgress {
    fn set_percent(&self, percent: u8) {
        self.percents.lock().push(percent);
    }

    fn complete(&self, _hold: Duration) {
        self.completions.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingLoading {
    pub started: AtomicBool,
    pub stopped: AtomicBool,
}

impl LoadingIndicator for RecordingLoading {
    fn start(&self) {
        self.started.store(true, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingDialog(pub Mutex<Vec<(String, String)>>);

impl DetailSurface for RecordingDialog {
    fn show(&self, title: &str, text: &str) {
        self.0.lock().push((title.to_string(), text.to_string()));
    }
}

pub struct Recorders {
    pub messages: Arc<RecordingMessages>,
    pub progress: Arc<RecordingProgress>,
    pub loading: Arc<RecordingLoading>,
    pub dialog: Arc<RecordingDialog>,
}

impl Recorders {
    pub fn new() -> Self {
        Self {
            messages: Arc::default(),
            progress: Arc::default(),
            loading: Arc::default(),
            dialog: Arc::default(),
        }
    }

    pub fn surfaces(&self) -> Surfaces {
        Surfaces {
            templates: Arc::new(Templates::builtin()),
            dialog: self.dialog.clone(),
            messages: self.messages.clone(),
            progress: self.progress.clone(),
            loading: self.loading.clone(),
        }
    }
}

pub fn grid() -> Element {
    Element::new("div").with_id("weather-grid")
}

// ===== Reports =====

pub fn point() -> Value {
    json!({
        "properties": {
            "gridId": "BGM",
            "gridX": 37,
            "gridY": 38,
            "cwa": "BGM",
            "timeZone": "America/New_York",
            "relativeLocation": { "properties": { "city": "Horseheads", "state": "NY" } }
        }
    })
}

pub fn stations() -> Value {
    json!({
        "features": [{
            "properties": {
                "stationIdentifier": "KELM",
                "name": "Elmira / Corning Regional Airport"
            }
        }]
    })
}

pub fn observation(temperature: Option<f64>) -> Value {
    json!({
        "properties": {
            "timestamp": "2025-07-29T14:53:00+00:00",
            "textDescription": "Mostly Cloudy",
            "icon": "https://api.weather.gov/icons/land/day/bkn?size=medium",
            "temperature": { "unitCode": "wmoUnit:degC", "value": temperature },
            "dewpoint": { "unitCode": "wmoUnit:degC", "value": 15.6 },
            "windDirection": { "unitCode": "wmoUnit:degree_(angle)", "value": 270 },
            "windSpeed": { "unitCode": "wmoUnit:km_h-1", "value": 16.56 },
            "barometricPressure": { "unitCode": "wmoUnit:Pa", "value": 101660 },
            "visibility": { "unitCode": "wmoUnit:m", "value": 16090 },
            "relativeHumidity": { "unitCode": "wmoUnit:percent", "value": 64.31 }
        }
    })
}

pub fn forecast(periods: usize) -> Value {
    let periods: Vec<Value> = (0..periods)
        .map(|i| {
            json!({
                "number": i + 1,
                "name": format!("Period {}", i + 1),
                "isDaytime": i % 2 == 0,
                "temperature": 80 - i as i64,
                "temperatureUnit": "F",
                "icon": "https://api.weather.gov/icons/land/day/tsra,40?size=small",
                "shortForecast": "Chance T-storms"
            })
        })
        .collect();
    json!({ "properties": { "periods": periods } })
}

pub fn alert() -> Value {
    json!({
        "properties": {
            "event": "Heat Advisory",
            "severity": "Moderate",
            "headline": "Heat Advisory issued July 29",
            "description": "Heat index values up to 105 expected.",
            "instruction": "Drink plenty of fluids.",
            "onset": "2025-07-29T12:00:00-04:00",
            "ends": "2025-07-29T20:00:00-04:00"
        }
    })
}

pub fn outlook() -> Value {
    json!({
        "id": "hwo-1",
        "productCode": "HWO",
        "productName": "Hazardous Weather Outlook",
        "productText": "HWOBGM\nHazardous Weather Outlook\n\n.DAY ONE...Today\n\nThunderstorms possible.\n\n$$\n\nSecond segment.\n\n$$\n"
    })
}

pub struct ReportParts {
    pub temperature: Option<f64>,
    pub with_station: bool,
    pub periods: usize,
    pub alerts: usize,
    pub products: Vec<Value>,
}

impl Default for ReportParts {
    fn default() -> Self {
        Self {
            temperature: Some(21.1),
            with_station: true,
            periods: 14,
            alerts: 1,
            products: vec![outlook()],
        }
    }
}

pub fn report_from(parts: ReportParts) -> WeatherReport {
    let coordinate = Coordinate::new(42.1762, -76.8358);
    let products = parts
        .products
        .into_iter()
        .filter_map(|body| {
            serde_json::from_value::<skyboard_nws::LatestProductBody>(body)
                .unwrap()
                .0
        })
        .collect();

    let (stations, observation) = if parts.with_station {
        (
            serde_json::from_value(stations()).unwrap(),
            Some(serde_json::from_value(observation(parts.temperature)).unwrap()),
        )
    } else {
        (serde_json::from_value(json!({ "features": [] })).unwrap(), None)
    };

    let snapshot = ReportSnapshot {
        point: serde_json::from_value(point()).unwrap(),
        stations,
        observation,
        forecast: serde_json::from_value(forecast(parts.periods)).unwrap(),
        alerts: (0..parts.alerts)
            .map(|_| serde_json::from_value(alert()).unwrap())
            .collect(),
        products,
    };
    WeatherReport::from_snapshot(coordinate, ReportOptions::default(), snapshot)
}

pub fn report() -> WeatherReport {
    report_from(ReportParts::default())
}

pub fn server_error(url: &str) -> NwsError {
    NwsError::Response {
        status: 500,
        url: url.to_string(),
        details: ProblemDetails {
            title: Some("Unexpected Problem".into()),
            status: Some(500),
            ..Default::default()
        },
    }
}

// ===== Scripted source =====

/// Creates reports instantly. Coordinates whose latitude is listed in
/// `failing` fail to load; refreshes fail while `refresh_fails` is set.
#[derive(Default)]
pub struct FakeSource {
    pub failing: Vec<f64>,
    pub refresh_fails: AtomicBool,
    /// How long each refresh takes to settle
    pub refresh_time: Duration,
    pub started: Mutex<Option<Instant>>,
    /// (latitude, time since start) at which each refresh attempt began
    pub refreshes: Mutex<Vec<(f64, Duration)>>,
}

impl FakeSource {
    pub fn failing(latitudes: &[f64]) -> Self {
        Self {
            failing: latitudes.to_vec(),
            ..Self::default()
        }
    }

    pub fn slow(refresh_time: Duration) -> Self {
        Self {
            refresh_time,
            ..Self::default()
        }
    }

    pub fn refreshes_of(&self, latitude: f64) -> Vec<Duration> {
        self.refreshes
            .lock()
            .iter()
            .filter(|(lat, _)| *lat == latitude)
            .map(|(_, at)| *at)
            .collect()
    }
}

#[async_trait]
impl ReportSource for FakeSource {
    async fn create(&self, coordinate: Coordinate) -> Result<WeatherReport, NwsError> {
        self.started.lock().get_or_insert_with(Instant::now);
        if self.failing.contains(&coordinate.latitude) {
            return Err(server_error(&format!(
                "https://api.weather.gov/points/{}",
                coordinate
            )));
        }
        let report = report();
        Ok(WeatherReport::from_snapshot(
            coordinate,
            ReportOptions::default(),
            report.snapshot().clone(),
        ))
    }

    async fn refresh(&self, report: &mut WeatherReport) -> Result<(), NwsError> {
        let started = (*self.started.lock()).unwrap_or_else(Instant::now);
        self.refreshes
            .lock()
            .push((report.coordinate().latitude, started.elapsed()));
        if !self.refresh_time.is_zero() {
            tokio::time::sleep(self.refresh_time).await;
        }

        if self.refresh_fails.load(Ordering::SeqCst) {
            return Err(server_error("https://api.weather.gov/gridpoints/BGM/37,38/forecast"));
        }
        Ok(())
    }
}
