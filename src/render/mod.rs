//! Markup-to-text conversion for article bodies.
//!
//! The session only sees the [`Renderer`] trait, so the subprocess-based
//! [`LynxRenderer`] and the in-process [`BuiltinRenderer`] are interchangeable.

mod builtin;
mod config;
mod lynx;

use std::sync::Arc;

pub use builtin::BuiltinRenderer;
pub use config::{RendererConfig, RendererKind};
pub use lynx::LynxRenderer;

use crate::app::Result;

/// Converts raw article markup into plain text with explicit line breaks.
pub trait Renderer: Send + Sync {
    fn render(&self, markup: &str) -> Result<String>;
}

/// Build the renderer selected in the configuration.
pub fn from_config(config: &RendererConfig) -> Arc<dyn Renderer> {
    match config.kind {
        RendererKind::Lynx => Arc::new(LynxRenderer::new(config.command.clone())),
        RendererKind::Builtin => Arc::new(BuiltinRenderer::new(config.wrap_width)),
    }
}
