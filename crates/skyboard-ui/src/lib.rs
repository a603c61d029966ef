//! Dashboard front end: an in-memory element tree, the renderers that paint
//! weather reports into it, the surfaces that report progress and errors,
//! and the scheduler that keeps every location fresh.

pub mod dialog;
pub mod dom;
pub mod error_mapping;
pub mod message;
pub mod progress;
pub mod render;
pub mod scheduler;
pub mod template;

pub use dialog::{ConsoleDialog, DetailSurface};
pub use dom::Element;
pub use error_mapping::format_nws_error;
pub use message::{ConsoleMessages, MessageSurface};
pub use progress::{LoadingIndicator, Progress, ProgressData, ProgressIndicator, Spinner};
pub use render::{Render, RenderError, ReportView};
pub use scheduler::{
    Dashboard, Location, NwsReportSource, ReportSource, SchedulerConfig, Surfaces,
};
pub use template::{TemplateProvider, Templates};
