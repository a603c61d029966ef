//! Detail surface: shows the full text behind an alert or product link.

/// Presents a titled block of text.
pub trait DetailSurface: Send + Sync {
    fn show(&self, title: &str, text: &str);
}

/// Prints details to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleDialog;

impl DetailSurface for ConsoleDialog {
    fn show(&self, title: &str, text: &str) {
        tracing::debug!(%title, "Showing detail");
        println!("==== {} ====\n{}\n", title, text);
    }
}
