use serde::{Deserialize, Serialize};

/// Rendering mode of a document, decided by the tree builder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuirksMode {
    #[default]
    NoQuirks,
    Quirks,
    LimitedQuirks,
}

/// Options used when creating a [`Document`](crate::Document)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// Address the document was loaded from
    pub url: Option<String>,

    /// Compatibility mode reported through `compat_mode`
    pub quirks_mode: QuirksMode,

    /// Whether scripting is enabled for the document
    pub scripting: bool,

    /// Whether the document is embedded through an iframe `srcdoc`
    pub embedded: bool,
}

impl DocumentOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the document URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builder method: set the quirks mode
    pub fn quirks_mode(mut self, mode: QuirksMode) -> Self {
        self.quirks_mode = mode;
        self
    }

    /// Builder method: enable or disable scripting
    pub fn scripting(mut self, enabled: bool) -> Self {
        self.scripting = enabled;
        self
    }

    /// Builder method: mark the document as embedded
    pub fn embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }
}
