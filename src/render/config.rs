use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Pipe the markup through an external `lynx -dump`
    #[default]
    Lynx,
    /// Convert in-process
    Builtin,
}

/// `[renderer]` section of the config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub kind: RendererKind,
    /// Program invoked by the lynx renderer
    pub command: String,
    /// Target line width for the builtin renderer
    pub wrap_width: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            kind: RendererKind::default(),
            command: "lynx".to_string(),
            wrap_width: 80,
        }
    }
}
