//! Resource descriptors: pure mappings from parameters to an API path.
//!
//! A descriptor names where a document lives and what it deserializes into.
//! It performs no I/O; [`crate::NwsClient::get`] does the fetching.

use serde::de::DeserializeOwned;

use crate::types::{
    AlertCollection, Coordinate, Forecast, Gridpoint, GridLocation, LatestProductBody,
    Observation, StationCollection,
};

/// An API document addressable by path.
pub trait Resource {
    type Output: DeserializeOwned;

    /// Path and query relative to the API origin, starting with `/`.
    fn path(&self) -> String;

    /// Headers sent in addition to the client's defaults.
    fn headers(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }
}

/// Grid metadata for a coordinate.
#[derive(Debug, Clone, Copy)]
pub struct Points(pub Coordinate);

impl Resource for Points {
    type Output = Gridpoint;

    fn path(&self) -> String {
        format!("/points/{}", self.0)
    }
}

pub const DEFAULT_STATION_LIMIT: u32 = 1;

/// Observation stations near a grid cell, nearest first.
#[derive(Debug, Clone)]
pub struct Stations {
    pub grid: GridLocation,
    pub limit: u32,
}

impl Stations {
    pub fn new(grid: GridLocation) -> Self {
        Self {
            grid,
            limit: DEFAULT_STATION_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl Resource for Stations {
    type Output = StationCollection;

    fn path(&self) -> String {
        format!(
            "/gridpoints/{}/{},{}/stations?limit={}",
            self.grid.office, self.grid.x, self.grid.y, self.limit
        )
    }

    fn headers(&self) -> &'static [(&'static str, &'static str)] {
        &[("Feature-Flags", "obs_station_provider")]
    }
}

/// Most recent observation from a station.
#[derive(Debug, Clone)]
pub struct LatestObservation(pub String);

impl Resource for LatestObservation {
    type Output = Observation;

    fn path(&self) -> String {
        format!("/stations/{}/observations/latest", self.0)
    }
}

/// Twelve-hour forecast periods for a grid cell.
#[derive(Debug, Clone)]
pub struct DailyForecast(pub GridLocation);

impl Resource for DailyForecast {
    type Output = Forecast;

    fn path(&self) -> String {
        format!(
            "/gridpoints/{}/{},{}/forecast",
            self.0.office, self.0.x, self.0.y
        )
    }
}

/// Alerts currently in effect at a coordinate.
#[derive(Debug, Clone, Copy)]
pub struct ActiveAlerts(pub Coordinate);

impl Resource for ActiveAlerts {
    type Output = AlertCollection;

    fn path(&self) -> String {
        format!("/alerts/active?point={}", self.0)
    }
}

/// Latest text product of a type from an office.
#[derive(Debug, Clone)]
pub struct LatestProduct {
    pub product_type: String,
    pub office: String,
}

impl LatestProduct {
    pub fn new(product_type: &str, office: &str) -> Self {
        Self {
            product_type: product_type.to_string(),
            office: office.to_string(),
        }
    }
}

impl Resource for LatestProduct {
    type Output = LatestProductBody;

    fn path(&self) -> String {
        format!(
            "/products/types/{}/locations/{}/latest",
            self.product_type, self.office
        )
    }
}

/// Product type of the alerts administrative message.
pub const ADMIN_MESSAGE_TYPE: &str = "ADA";

/// The alerts administrative message, announcing service changes.
#[derive(Debug, Clone)]
pub struct AlertAdminMessage(pub String);

impl Resource for AlertAdminMessage {
    type Output = LatestProductBody;

    fn path(&self) -> String {
        LatestProduct::new(ADMIN_MESSAGE_TYPE, &self.0).path()
    }
}
