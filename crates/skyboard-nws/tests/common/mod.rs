//! Canned api.weather.gov documents for the Elmira, NY grid cell.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LATITUDE: f64 = 42.1762;
pub const LONGITUDE: f64 = -76.8358;

pub fn point() -> Value {
    json!({
        "id": "https://api.weather.gov/points/42.1762,-76.8358",
        "type": "Feature",
        "properties": {
            "gridId": "BGM",
            "gridX": 37,
            "gridY": 38,
            "cwa": "BGM",
            "forecastZone": "https://api.weather.gov/zones/forecast/NYZ024",
            "timeZone": "America/New_York",
            "relativeLocation": {
                "type": "Feature",
                "properties": { "city": "Horseheads", "state": "NY" }
            }
        }
    })
}

pub fn stations() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "id": "https://api.weather.gov/stations/KELM",
            "type": "Feature",
            "properties": {
                "stationIdentifier": "KELM",
                "name": "Elmira / Corning Regional Airport",
                "timeZone": "America/New_York"
            }
        }]
    })
}

pub fn observation(temperature: Option<f64>) -> Value {
    json!({
        "id": "https://api.weather.gov/stations/KELM/observations/2025-07-29T14:53:00+00:00",
        "type": "Feature",
        "properties": {
            "timestamp": "2025-07-29T14:53:00+00:00",
            "textDescription": "Mostly Cloudy",
            "icon": "https://api.weather.gov/icons/land/day/bkn?size=medium",
            "temperature": { "unitCode": "wmoUnit:degC", "value": temperature, "qualityControl": "V" },
            "dewpoint": { "unitCode": "wmoUnit:degC", "value": 15.6, "qualityControl": "V" },
            "windDirection": { "unitCode": "wmoUnit:degree_(angle)", "value": 270, "qualityControl": "V" },
            "windSpeed": { "unitCode": "wmoUnit:km_h-1", "value": 16.56, "qualityControl": "V" },
            "windGust": { "unitCode": "wmoUnit:km_h-1", "value": null, "qualityControl": "Z" },
            "barometricPressure": { "unitCode": "wmoUnit:Pa", "value": 101660, "qualityControl": "V" },
            "visibility": { "unitCode": "wmoUnit:m", "value": 16090, "qualityControl": "C" },
            "relativeHumidity": { "unitCode": "wmoUnit:percent", "value": 64.31, "qualityControl": "V" }
        }
    })
}

pub fn forecast(periods: usize) -> Value {
    let periods: Vec<Value> = (0..periods)
        .map(|i| {
            json!({
                "number": i + 1,
                "name": format!("Period {}", i + 1),
                "startTime": "2025-07-29T10:00:00-04:00",
                "endTime": "2025-07-29T18:00:00-04:00",
                "isDaytime": i % 2 == 0,
                "temperature": 80 - i as i64,
                "temperatureUnit": "F",
                "windSpeed": "5 to 10 mph",
                "windDirection": "W",
                "icon": "https://api.weather.gov/icons/land/day/tsra,40?size=medium",
                "shortForecast": "Chance Showers And Thunderstorms",
                "detailedForecast": "A chance of showers and thunderstorms."
            })
        })
        .collect();

    json!({
        "type": "Feature",
        "properties": {
            "generatedAt": "2025-07-29T14:00:00+00:00",
            "periods": periods
        }
    })
}

pub fn alerts() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "id": "urn:oid:2.49.0.1.840.0.1",
            "type": "Feature",
            "properties": {
                "id": "urn:oid:2.49.0.1.840.0.1",
                "event": "Heat Advisory",
                "severity": "Moderate",
                "headline": "Heat Advisory issued July 29 at 5:06AM EDT",
                "description": "Heat index values up to 105 expected.",
                "instruction": "Drink plenty of fluids.",
                "onset": "2025-07-29T12:00:00-04:00",
                "ends": "2025-07-29T20:00:00-04:00"
            }
        }]
    })
}

pub fn outlook(day_one: &str) -> Value {
    json!({
        "id": "hwo-1",
        "wmoCollectiveId": "FLUS41",
        "issuingOffice": "KBGM",
        "issuanceTime": "2025-07-29T09:06:00+00:00",
        "productCode": "HWO",
        "productName": "Hazardous Weather Outlook",
        "productText": format!(
            "000\nFLUS41 KBGM 290906\nHWOBGM\n\nHazardous Weather Outlook\n\n.DAY ONE...Today and Tonight\n\n{}\n\n.DAYS TWO THROUGH SEVEN...Wednesday through Monday\n\nNo hazardous weather is expected at this time.\n\n$$\n",
            day_one
        )
    })
}

pub async fn mount(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount every document a full report needs.
pub async fn mount_report(server: &MockServer, product: Value) {
    mount(server, "/points/42.1762,-76.8358", point()).await;
    mount(server, "/gridpoints/BGM/37,38/stations", stations()).await;
    mount(server, "/stations/KELM/observations/latest", observation(Some(21.1))).await;
    mount(server, "/gridpoints/BGM/37,38/forecast", forecast(14)).await;
    mount(server, "/alerts/active", alerts()).await;
    mount(server, "/products/types/HWO/locations/BGM/latest", product).await;
}
