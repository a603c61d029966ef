//! Turns library errors into the text shown on the message surface, and logs
//! them with full structured detail.
//! Each error source has its own module to keep mappings small and readable.

mod nws;
mod render;

pub use nws::{format_nws_error, log_nws_error};
pub use render::log_render_error;
