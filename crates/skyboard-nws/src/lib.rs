//! Client for the National Weather Service API (api.weather.gov).
//!
//! Provides typed resource descriptors, a client that normalizes every
//! failure into [`NwsError`], and [`WeatherReport`], which aggregates the
//! documents a dashboard needs for one location.

pub mod client;
pub mod error;
pub mod report;
pub mod resources;
pub mod types;
pub mod units;

pub use client::{ClientConfig, NwsClient, NWS_API_ORIGIN};
pub use error::{NwsError, ParameterError, ProblemDetails};
pub use report::{ReportOptions, ReportSnapshot, WeatherReport, HAZARDOUS_WEATHER_OUTLOOK};
pub use resources::Resource;
pub use types::*;
