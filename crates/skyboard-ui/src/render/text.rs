use super::{Render, RenderError};
use crate::dom::Element;
use crate::template::query;

pub const DEFAULT_FALLBACK: &str = "?";

type Extract<S> = Box<dyn Fn(&S) -> Option<String> + Send + Sync>;

/// Writes a value's text into the element matching `selector`, or the
/// fallback when the value is absent.
pub struct TextRender<S: ?Sized> {
    selector: &'static str,
    fallback: &'static str,
    extract: Extract<S>,
}

impl<S: ?Sized> TextRender<S> {
    pub fn new(
        selector: &'static str,
        extract: impl Fn(&S) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            selector,
            fallback: DEFAULT_FALLBACK,
            extract: Box::new(extract),
        }
    }

    /// A numeric value run through `format`.
    pub fn number(
        selector: &'static str,
        value: impl Fn(&S) -> Option<f64> + Send + Sync + 'static,
        format: fn(f64) -> String,
    ) -> Self {
        Self::new(selector, move |source| value(source).map(format))
    }

    pub fn with_fallback(mut self, fallback: &'static str) -> Self {
        self.fallback = fallback;
        self
    }
}

impl<S: ?Sized> Render<S> for TextRender<S> {
    fn render(&self, root: &Element, source: &S) -> Result<(), RenderError> {
        let element = query(root, self.selector)?;
        let text = (self.extract)(source);
        element.set_text(text.as_deref().unwrap_or(self.fallback));
        Ok(())
    }
}
