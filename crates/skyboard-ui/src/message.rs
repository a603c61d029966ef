//! Message surface for user-visible errors.

use std::borrow::Cow;

pub trait MessageSurface: Send + Sync {
    fn show(&self, text: &str);
}

/// True when the text is (or embeds) an HTML document, as proxies and
/// gateways tend to send instead of JSON.
pub fn is_html(text: &str) -> bool {
    let trimmed = text.trim_start().to_lowercase();
    trimmed.starts_with("<!doctype html>") || trimmed.contains("<html")
}

/// Text suitable for display: HTML is reduced to its visible text.
pub fn display_text(text: &str) -> Cow<'_, str> {
    if !is_html(text) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(format!("Server returned HTML:\n{}", strip_tags(text)))
}

fn strip_tags(html: &str) -> String {
    let mut visible = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                visible.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => visible.push(c),
            _ => {}
        }
    }
    visible.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Writes messages to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMessages;

impl MessageSurface for ConsoleMessages {
    fn show(&self, text: &str) {
        eprintln!("error: {}", display_text(text));
    }
}
