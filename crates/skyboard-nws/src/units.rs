//! Unit conversions for observation values.
//!
//! The API reports SI units tagged with WMO unit codes (`wmoUnit:degC`,
//! `wmoUnit:km_h-1`, `wmoUnit:Pa`, ...). The unit-aware helpers read the code
//! so a station reporting in other units still converts correctly.

use crate::types::QuantitativeValue;

const CARDINALS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

pub fn c_to_f(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn f_to_c(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

pub fn meters_to_miles(meters: f64) -> f64 {
    meters / 1609.344
}

pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh * 0.621371
}

pub fn mps_to_mph(mps: f64) -> f64 {
    kmh_to_mph(mps * 3.6)
}

pub fn pascals_to_inches(pascals: f64) -> f64 {
    pascals * 0.0002953
}

pub fn pascals_to_mb(pascals: f64) -> f64 {
    pascals / 100.0
}

/// Eight-point compass direction for a bearing in degrees.
pub fn degrees_to_cardinal(degrees: f64) -> &'static str {
    let index = ((degrees.rem_euclid(360.0) / 45.0).round() as usize) % CARDINALS.len();
    CARDINALS[index]
}

/// The measured value, or `None` when the quantity is null.
pub fn value(quantity: &QuantitativeValue) -> Option<f64> {
    quantity.value.filter(|v| v.is_finite())
}

fn is_fahrenheit(quantity: &QuantitativeValue) -> bool {
    quantity.unit().ends_with("degF")
}

pub fn celsius(quantity: &QuantitativeValue) -> Option<f64> {
    let v = value(quantity)?;
    Some(if is_fahrenheit(quantity) { f_to_c(v) } else { v })
}

pub fn fahrenheit(quantity: &QuantitativeValue) -> Option<f64> {
    let v = value(quantity)?;
    Some(if is_fahrenheit(quantity) { v } else { c_to_f(v) })
}

/// Speed in miles per hour. Observations default to km/h.
pub fn speed_mph(quantity: &QuantitativeValue) -> Option<f64> {
    let v = value(quantity)?;
    let unit = quantity.unit().rsplit(':').next().unwrap_or_default();
    Some(match unit {
        "m_s-1" => mps_to_mph(v),
        "mi_h-1" => v,
        _ => kmh_to_mph(v),
    })
}
