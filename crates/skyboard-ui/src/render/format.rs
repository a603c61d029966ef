//! Display formatting for report values.

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;

use skyboard_nws::units;
use skyboard_nws::AlertProperties;

/// e.g. "Jul 29, 10:53 AM EDT"
pub const TIMESTAMP_FORMAT: &str = "%b %-d, %-I:%M %p %Z";

/// e.g. "July 29, 08:00 PM EDT"
pub const ALERT_TIME_FORMAT: &str = "%B %-d, %I:%M %p %Z";

const NON_BREAKING_HYPHEN: char = '\u{2011}';

fn whole(value: f64) -> i64 {
    value.round() as i64
}

pub fn fahrenheit(celsius: f64) -> String {
    format!("{}°F", whole(units::c_to_f(celsius)))
}

pub fn celsius(celsius: f64) -> String {
    format!("{}°C", whole(celsius))
}

pub fn degrees_f(fahrenheit: f64) -> String {
    format!("{}°F", whole(fahrenheit))
}

pub fn percent(value: f64) -> String {
    format!("{}%", whole(value))
}

pub fn dewpoint(celsius: f64) -> String {
    format!(
        "{}°F ({}°C)",
        whole(units::c_to_f(celsius)),
        whole(celsius)
    )
}

pub fn pressure(pascals: f64) -> String {
    format!(
        "{:.2} in ({:.1} mb)",
        units::pascals_to_inches(pascals),
        units::pascals_to_mb(pascals)
    )
}

pub fn visibility(meters: f64) -> String {
    format!("{:.2} miles", units::meters_to_miles(meters))
}

/// "W 10 mph", or "Calm" without a nonzero speed.
pub fn wind(speed_mph: Option<f64>, direction_degrees: Option<f64>) -> String {
    match speed_mph {
        Some(speed) if speed != 0.0 => match direction_degrees {
            Some(degrees) => format!(
                "{} {} mph",
                units::degrees_to_cardinal(degrees),
                whole(speed)
            ),
            None => format!("{} mph", whole(speed)),
        },
        _ => "Calm".to_string(),
    }
}

/// Keeps hyphenated words like "T-storms" from wrapping.
pub fn non_breaking_hyphens(text: &str) -> String {
    text.replace('-', &NON_BREAKING_HYPHEN.to_string())
}

/// Formats `time` in the named IANA zone, or in its own offset when the
/// zone is missing or unknown.
pub fn local_time(time: &DateTime<FixedOffset>, time_zone: Option<&str>, format: &str) -> String {
    match time_zone.and_then(|name| name.parse::<Tz>().ok()) {
        Some(zone) => time.with_timezone(&zone).format(format).to_string(),
        None => time.format(format).to_string(),
    }
}

/// Alert label: the event, plus its end time and (if still upcoming) its
/// start time.
pub fn alert_headline(
    alert: &AlertProperties,
    time_zone: Option<&str>,
    now: DateTime<Utc>,
) -> String {
    let Some(ends) = alert.ends else {
        return alert.event.clone();
    };
    let end = local_time(&ends, time_zone, ALERT_TIME_FORMAT);

    match alert.onset {
        Some(onset) if !alert.has_started(now) => {
            let start = local_time(&onset, time_zone, ALERT_TIME_FORMAT);
            format!("{} in effect from {} until {}", alert.event, start, end)
        }
        _ => format!("{} until {}", alert.event, end),
    }
}
