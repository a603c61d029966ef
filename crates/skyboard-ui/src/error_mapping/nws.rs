use std::error::Error as _;

use skyboard_nws::NwsError;

/// Human-readable description of a weather API failure.
pub fn format_nws_error(err: &NwsError) -> String {
    match err {
        NwsError::Fetch { url, source } => {
            format!("Network error while fetching {} ({})", url, cause_chain(source))
        }
        NwsError::Response {
            status,
            url,
            details,
        } => format!(
            "Server returned {} for {}:\n{}",
            status,
            url,
            details.to_pretty_json()
        ),
        NwsError::Parse { url, text, .. } => format!("Invalid JSON from {}:\n{}", url, text),
    }
}

/// Log a weather API failure with its fields broken out.
pub fn log_nws_error(context: &str, err: &NwsError) {
    match err {
        NwsError::Fetch { url, source } => tracing::error!(
            context,
            url = %url,
            timeout = source.is_timeout(),
            connect = source.is_connect(),
            cause = %cause_chain(source),
            "Fetch failed"
        ),
        NwsError::Response {
            status,
            url,
            details,
        } => tracing::error!(
            context,
            url = %url,
            status,
            title = ?details.title,
            detail = ?details.detail,
            correlation_id = ?details.correlation_id,
            "Request rejected"
        ),
        NwsError::Parse { url, text, source } => tracing::error!(
            context,
            url = %url,
            error = %source,
            body_len = text.len(),
            "Unparseable response"
        ),
    }
}

/// The error and each of its sources, separated by ": ".
fn cause_chain(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
