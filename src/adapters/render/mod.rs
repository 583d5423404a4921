//! Render adapters - turning screens into something a terminal can show.

mod text_renderer;

pub use text_renderer::TextRenderer;
