use url::Url;

use super::{Render, RenderError};
use crate::dom::Element;
use crate::template::query_image;

/// Shown when a source has no usable icon URL.
pub const MISSING_ICON: &str = "img/missing.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    Small,
    Medium,
    Large,
}

impl IconSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

type IconFn<S> = Box<dyn Fn(&S) -> Option<String> + Send + Sync>;
type AltFn<S> = Box<dyn Fn(&S) -> String + Send + Sync>;

/// Points an `img` at an icon URL with the requested `size` parameter.
pub struct IconRender<S: ?Sized> {
    selector: &'static str,
    size: IconSize,
    icon: IconFn<S>,
    alt: AltFn<S>,
}

impl<S: ?Sized> IconRender<S> {
    pub fn new(
        selector: &'static str,
        size: IconSize,
        icon: impl Fn(&S) -> Option<String> + Send + Sync + 'static,
        alt: impl Fn(&S) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            selector,
            size,
            icon: Box::new(icon),
            alt: Box::new(alt),
        }
    }
}

impl<S: ?Sized> Render<S> for IconRender<S> {
    fn render(&self, root: &Element, source: &S) -> Result<(), RenderError> {
        let image = query_image(root, self.selector)?;
        image.set_attribute("alt", &(self.alt)(source));

        let src = (self.icon)(source)
            .and_then(|icon| sized_icon_url(&icon, self.size))
            .unwrap_or_else(|| MISSING_ICON.to_string());
        image.set_attribute("src", &src);
        Ok(())
    }
}

/// `icon` with its `size` query parameter set, or `None` if it is blank or
/// not an absolute URL.
pub fn sized_icon_url(icon: &str, size: IconSize) -> Option<String> {
    let icon = icon.trim();
    if icon.is_empty() {
        return None;
    }

    let mut url = Url::parse(icon).ok()?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| *key != "size")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("size", size.as_str());
    Some(url.to_string())
}
