use crate::render::RenderError;

pub fn log_render_error(context: &str, err: &RenderError) {
    let (kind, target) = match err {
        RenderError::ElementNotFound(selector) => ("element", selector),
        RenderError::ImageNotFound(selector) => ("image", selector),
        RenderError::TemplateNotFound(id) => ("template", id),
        RenderError::MissingRoot(id) => ("template root", id),
    };
    tracing::error!(context, kind, target = %target, "Render failed: {}", err);
}
