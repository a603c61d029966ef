//! Per-location weather report.
//!
//! A report resolves a coordinate's forecast grid cell, then gathers the
//! nearest station's latest observation, the forecast, active alerts and
//! office text products. Only the observation waits on another fetch (it
//! needs the station list); everything else runs concurrently.

use futures::future::try_join_all;
use tracing::{info, instrument};

use crate::client::NwsClient;
use crate::error::NwsError;
use crate::resources::{
    ActiveAlerts, DailyForecast, LatestObservation, LatestProduct, Points, Stations,
    DEFAULT_STATION_LIMIT,
};
use crate::types::{
    Alert, Coordinate, Forecast, Gridpoint, Observation, Product, Station, StationCollection,
};

/// Product code of the hazardous weather outlook.
pub const HAZARDOUS_WEATHER_OUTLOOK: &str = "HWO";

/// What a report fetches besides the point, station and forecast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub station_limit: u32,
    pub alerts: bool,
    pub product_types: Vec<String>,
    /// Drop outlooks whose first day is quiet
    pub hide_quiet_outlooks: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            station_limit: DEFAULT_STATION_LIMIT,
            alerts: true,
            product_types: vec![HAZARDOUS_WEATHER_OUTLOOK.to_string()],
            hide_quiet_outlooks: true,
        }
    }
}

/// Everything fetched for one location at one point in time.
#[derive(Debug, Clone)]
pub struct ReportSnapshot {
    pub point: Gridpoint,
    pub stations: StationCollection,
    pub observation: Option<Observation>,
    pub forecast: Forecast,
    pub alerts: Vec<Alert>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone)]
pub struct WeatherReport {
    coordinate: Coordinate,
    options: ReportOptions,
    snapshot: ReportSnapshot,
}

impl WeatherReport {
    /// Fetch a complete report. Any failed request fails the whole report.
    #[instrument(skip(client, coordinate, options), fields(%coordinate), level = "info")]
    pub async fn create(
        client: &NwsClient,
        coordinate: Coordinate,
        options: ReportOptions,
    ) -> Result<Self, NwsError> {
        let snapshot = fetch_snapshot(client, coordinate, &options).await?;
        Ok(Self::from_snapshot(coordinate, options, snapshot))
    }

    pub fn from_snapshot(
        coordinate: Coordinate,
        options: ReportOptions,
        snapshot: ReportSnapshot,
    ) -> Self {
        Self {
            coordinate,
            options,
            snapshot,
        }
    }

    /// Re-fetch everything. On failure the previous data is kept.
    #[instrument(skip(self, client), fields(coordinate = %self.coordinate), level = "info")]
    pub async fn refresh(&mut self, client: &NwsClient) -> Result<(), NwsError> {
        self.snapshot = fetch_snapshot(client, self.coordinate, &self.options).await?;
        Ok(())
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn snapshot(&self) -> &ReportSnapshot {
        &self.snapshot
    }

    pub fn point(&self) -> &Gridpoint {
        &self.snapshot.point
    }

    pub fn stations(&self) -> &StationCollection {
        &self.snapshot.stations
    }

    /// The station the observation came from.
    pub fn station(&self) -> Option<&Station> {
        self.snapshot.stations.nearest()
    }

    pub fn observation(&self) -> Option<&Observation> {
        self.snapshot.observation.as_ref()
    }

    pub fn forecast(&self) -> &Forecast {
        &self.snapshot.forecast
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.snapshot.alerts
    }

    pub fn products(&self) -> &[Product] {
        &self.snapshot.products
    }

    /// IANA zone of the grid point, used to display times.
    pub fn time_zone(&self) -> Option<&str> {
        self.snapshot.point.properties.time_zone.as_deref()
    }

    /// Nearest named place, else the station identifier.
    pub fn place_name(&self) -> Option<String> {
        self.snapshot.point.properties.place_name().or_else(|| {
            self.station()
                .map(|station| station.properties.station_identifier.clone())
        })
    }
}

async fn fetch_snapshot(
    client: &NwsClient,
    coordinate: Coordinate,
    options: &ReportOptions,
) -> Result<ReportSnapshot, NwsError> {
    let point = client.get(&Points(coordinate)).await?;
    let grid = point.properties.grid();
    let office = point.properties.cwa.clone();

    let stations_resource = Stations::new(grid.clone()).with_limit(options.station_limit);
    let current = async {
        let stations = client.get(&stations_resource).await?;
        let observation = match stations.nearest() {
            Some(station) => {
                let latest = LatestObservation(station.properties.station_identifier.clone());
                Some(client.get(&latest).await?)
            }
            None => None,
        };
        Ok::<_, NwsError>((stations, observation))
    };

    let forecast_resource = DailyForecast(grid);
    let forecast = client.get(&forecast_resource);

    let alerts_resource = ActiveAlerts(coordinate);
    let alerts = async {
        if options.alerts {
            Ok::<_, NwsError>(client.get(&alerts_resource).await?.features)
        } else {
            Ok::<_, NwsError>(Vec::new())
        }
    };

    let products = try_join_all(options.product_types.iter().map(|product_type| {
        let resource = LatestProduct::new(product_type, &office);
        async move { client.get(&resource).await }
    }));

    let ((stations, observation), forecast, alerts, products) =
        tokio::try_join!(current, forecast, alerts, products)?;

    let products: Vec<Product> = products
        .into_iter()
        .filter_map(|body| body.0)
        .filter(|product| !(options.hide_quiet_outlooks && is_quiet_outlook(product)))
        .collect();

    info!(
        office = %office,
        station = stations
            .nearest()
            .map(|s| s.properties.station_identifier.as_str())
            .unwrap_or("none"),
        periods = forecast.properties.periods.len(),
        alerts = alerts.len(),
        products = products.len(),
        "Report fetched"
    );

    Ok(ReportSnapshot {
        point,
        stations,
        observation,
        forecast,
        alerts,
        products,
    })
}

fn is_quiet_outlook(product: &Product) -> bool {
    product.product_code == HAZARDOUS_WEATHER_OUTLOOK && !product.reports_hazards()
}
