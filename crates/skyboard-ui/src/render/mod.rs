//! Render pipeline.
//!
//! A renderer paints one aspect of a source value into an element subtree.
//! Renderers are small values composed into ordered lists; every render is a
//! full repaint of the fields it owns, so rendering twice is harmless.

pub mod alerts;
pub mod format;
pub mod forecast;
pub mod icon;
pub mod observation;
pub mod products;
pub mod report;
pub mod text;

use thiserror::Error;

use crate::dom::Element;

pub use alerts::AlertsRender;
pub use forecast::ForecastRender;
pub use icon::{IconRender, IconSize, MISSING_ICON};
pub use observation::ObservationRender;
pub use products::ProductsRender;
pub use report::ReportView;
pub use text::TextRender;

/// The element tree did not have the shape a renderer needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Element with query selector {0} not found")]
    ElementNotFound(String),

    #[error("Image element with query selector {0} not found")]
    ImageNotFound(String),

    #[error("Template with id {0} not found")]
    TemplateNotFound(String),

    #[error("Template with id {0} missing root child")]
    MissingRoot(String),
}

pub trait Render<S: ?Sized>: Send + Sync {
    fn render(&self, root: &Element, source: &S) -> Result<(), RenderError>;
}

/// Runs renderers in order, stopping at the first failure.
pub fn render_all<S: ?Sized>(
    renderers: &[Box<dyn Render<S>>],
    root: &Element,
    source: &S,
) -> Result<(), RenderError> {
    renderers
        .iter()
        .try_for_each(|renderer| renderer.render(root, source))
}
