//! Wire types for the GeoJSON documents served by api.weather.gov.
//!
//! Only the fields the dashboard reads are modelled; everything else in the
//! payloads is ignored. Optional and nullable fields default rather than fail,
//! since the API omits fields freely depending on station and office.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::units;

/// A latitude/longitude pair identifying one dashboard location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// GeoJSON feature wrapper. Geometry is not used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature<P> {
    #[serde(default)]
    pub id: Option<String>,
    pub properties: P,
}

/// A measured value with its WMO unit code. `value` is null when the
/// quantity is not currently measured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuantitativeValue {
    pub unit_code: Option<String>,
    pub value: Option<f64>,
    pub quality_control: Option<String>,
}

impl QuantitativeValue {
    pub fn new(unit_code: &str, value: Option<f64>) -> Self {
        Self {
            unit_code: Some(unit_code.to_string()),
            value,
            quality_control: None,
        }
    }

    pub fn unit(&self) -> &str {
        self.unit_code.as_deref().unwrap_or_default()
    }
}

// ===== Points =====

pub type Gridpoint = Feature<PointProperties>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointProperties {
    pub grid_id: String,
    pub grid_x: i64,
    pub grid_y: i64,
    /// Forecast office identifier
    pub cwa: String,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub forecast_zone: Option<String>,
    #[serde(default)]
    pub relative_location: Option<Feature<RelativeLocation>>,
}

impl PointProperties {
    pub fn grid(&self) -> GridLocation {
        GridLocation {
            office: self.grid_id.clone(),
            x: self.grid_x,
            y: self.grid_y,
        }
    }

    /// "City, ST" of the nearest named place, when the API knows one.
    pub fn place_name(&self) -> Option<String> {
        let place = &self.relative_location.as_ref()?.properties;
        match (place.city.as_deref(), place.state.as_deref()) {
            (Some(city), Some(state)) => Some(format!("{}, {}", city, state)),
            (Some(city), None) => Some(city.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelativeLocation {
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Forecast grid cell addressed by office and coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLocation {
    pub office: String,
    pub x: i64,
    pub y: i64,
}

impl std::fmt::Display for GridLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{},{}", self.office, self.x, self.y)
    }
}

// ===== Stations =====

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationCollection {
    /// Ordered by distance from the grid point
    #[serde(default)]
    pub features: Vec<Station>,
}

impl StationCollection {
    pub fn nearest(&self) -> Option<&Station> {
        self.features.first()
    }
}

pub type Station = Feature<StationProperties>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationProperties {
    pub station_identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub time_zone: Option<String>,
}

// ===== Observations =====

pub type Observation = Feature<ObservationProperties>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObservationProperties {
    pub station: Option<String>,
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub text_description: Option<String>,
    pub icon: Option<String>,
    pub temperature: QuantitativeValue,
    pub dewpoint: QuantitativeValue,
    pub wind_direction: QuantitativeValue,
    pub wind_speed: QuantitativeValue,
    pub wind_gust: QuantitativeValue,
    pub barometric_pressure: QuantitativeValue,
    pub visibility: QuantitativeValue,
    pub relative_humidity: QuantitativeValue,
}

// ===== Forecast =====

pub type Forecast = Feature<ForecastProperties>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastProperties {
    pub generated_at: Option<DateTime<FixedOffset>>,
    pub update_time: Option<DateTime<FixedOffset>>,
    pub periods: Vec<Period>,
}

/// Forecast temperatures arrive as a bare number paired with
/// `temperatureUnit`, or as a quantitative value when requested that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Temperature {
    Number(f64),
    Quantity(QuantitativeValue),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Period {
    pub number: u32,
    pub name: String,
    pub start_time: Option<DateTime<FixedOffset>>,
    pub end_time: Option<DateTime<FixedOffset>>,
    pub is_daytime: bool,
    pub temperature: Option<Temperature>,
    pub temperature_unit: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub icon: Option<String>,
    pub short_forecast: Option<String>,
    pub detailed_forecast: Option<String>,
}

impl Period {
    /// Temperature in Fahrenheit regardless of how the API expressed it.
    pub fn temperature_f(&self) -> Option<f64> {
        match self.temperature.as_ref()? {
            Temperature::Number(value) => match self.temperature_unit.as_deref() {
                Some("C") => Some(units::c_to_f(*value)),
                _ => Some(*value),
            },
            Temperature::Quantity(quantity) => units::fahrenheit(quantity),
        }
    }
}

// ===== Alerts =====

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertCollection {
    #[serde(default)]
    pub features: Vec<Alert>,
}

pub type Alert = Feature<AlertProperties>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertProperties {
    pub id: Option<String>,
    pub event: String,
    pub severity: String,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub onset: Option<DateTime<FixedOffset>>,
    pub ends: Option<DateTime<FixedOffset>>,
}

impl AlertProperties {
    /// Headline, description and instruction separated by blank lines.
    pub fn text(&self) -> String {
        [&self.headline, &self.description, &self.instruction]
            .into_iter()
            .filter_map(|part| part.as_deref().map(str::trim))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// True once the onset time has passed (or there is none).
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.onset
            .map_or(true, |onset| onset.with_timezone(&Utc) <= now)
    }
}

// ===== Products =====

/// A text bulletin issued by a forecast office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(rename = "wmoCollectiveId", default)]
    pub wmo_collective_id: Option<String>,
    #[serde(default)]
    pub issuing_office: Option<String>,
    #[serde(default)]
    pub issuance_time: Option<DateTime<FixedOffset>>,
    pub product_code: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_text: String,
}

/// One `$$`-terminated block of a product's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSegment {
    pub body: String,
}

const SEGMENT_TERMINATOR: &str = "$$";
const QUIET_DAY_PHRASE: &str = "no hazardous weather is expected at this time";

impl Product {
    /// Transmission header: everything up to the first blank line.
    pub fn headline(&self) -> &str {
        let text = self.product_text.trim_start();
        text.split("\n\n").next().unwrap_or_default().trim_end()
    }

    /// The text split on `$$` terminators, with the headline removed from
    /// the first block and blank blocks dropped.
    pub fn segments(&self) -> Vec<ProductSegment> {
        let headline = self.headline();
        self.product_text
            .trim_start()
            .split(SEGMENT_TERMINATOR)
            .enumerate()
            .map(|(i, block)| {
                let block = if i == 0 {
                    block.strip_prefix(headline).unwrap_or(block)
                } else {
                    block
                };
                block.trim().to_string()
            })
            .filter(|body| !body.is_empty())
            .map(|body| ProductSegment { body })
            .collect()
    }

    /// For outlooks: false when the ".DAY ONE" section states that no
    /// hazardous weather is expected. Products without that section count
    /// as reporting hazards.
    pub fn reports_hazards(&self) -> bool {
        let text = &self.product_text;
        let Some(start) = text.find(".DAY ONE") else {
            return true;
        };
        let day_one = &text[start..];
        let end = [".DAYS TWO", ".DAY TWO"]
            .iter()
            .filter_map(|marker| day_one.find(marker))
            .min()
            .unwrap_or(day_one.len());

        !day_one[..end].to_lowercase().contains(QUIET_DAY_PHRASE)
    }
}

/// Body of a "latest product" response. The API answers with a mostly
/// empty object when an office has no product of the requested type, which
/// becomes `None` here rather than an empty product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawProduct")]
pub struct LatestProductBody(pub Option<Product>);

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "wmoCollectiveId", default)]
    wmo_collective_id: Option<String>,
    #[serde(default)]
    issuing_office: Option<String>,
    #[serde(default)]
    issuance_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    product_code: Option<String>,
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    product_text: Option<String>,
}

impl From<RawProduct> for LatestProductBody {
    fn from(raw: RawProduct) -> Self {
        let (Some(id), Some(product_code)) = (raw.id, raw.product_code) else {
            return Self(None);
        };
        if id.is_empty() || product_code.is_empty() {
            return Self(None);
        }
        Self(Some(Product {
            id,
            wmo_collective_id: raw.wmo_collective_id,
            issuing_office: raw.issuing_office,
            issuance_time: raw.issuance_time,
            product_code,
            product_name: raw.product_name.unwrap_or_default(),
            product_text: raw.product_text.unwrap_or_default(),
        }))
    }
}
