//! Classifier configuration.
//!
//! Different download endpoints need different fallbacks: handover documents
//! are almost always PDFs, while attachment previews should not pretend an
//! unknown file is one. The same pipeline serves both through
//! [`ClassifierConfig`].
//!
//! TOML form (every key optional):
//!
//! ```toml
//! profile = "preview"               # preset the other keys override
//! default_content_type = "image/png" # "" disables the default
//! default_extension = "png"
//! fallback_file_name = "attachment"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mime_table::MIME_PDF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// PDF-biased handover document downloads.
    #[default]
    Handover,
    /// Attachment previews, no content type default.
    Preview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifierConfig {
    /// Used when neither bytes, upstream nor extension name a type, and in
    /// place of a JSON type declared for a binary payload.
    pub default_content_type: Option<String>,
    /// Appended when the final content type has no known extension.
    pub default_extension: String,
    /// Base filename when the caller supplies none.
    pub fallback_file_name: String,
}

impl ClassifierConfig {
    pub fn handover_documents() -> Self {
        Self {
            default_content_type: Some(MIME_PDF.to_string()),
            default_extension: "pdf".to_string(),
            fallback_file_name: "document".to_string(),
        }
    }

    pub fn attachment_preview() -> Self {
        Self {
            default_content_type: None,
            default_extension: "bin".to_string(),
            fallback_file_name: "attachment".to_string(),
        }
    }

    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Handover => Self::handover_documents(),
            Profile::Preview => Self::attachment_preview(),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        Ok(raw.into_config())
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn with_default_content_type(mut self, mime: Option<&str>) -> Self {
        self.default_content_type = mime.map(str::trim).filter(|m| !m.is_empty()).map(str::to_string);
        self
    }

    pub fn with_default_extension(mut self, ext: &str) -> Self {
        let ext = ext.trim().trim_start_matches('.');
        if !ext.is_empty() {
            self.default_extension = ext.to_string();
        }
        self
    }

    pub fn with_fallback_file_name(mut self, name: &str) -> Self {
        let name = name.trim();
        if !name.is_empty() {
            self.fallback_file_name = name.to_string();
        }
        self
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::handover_documents()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    profile: Profile,
    default_content_type: Option<String>,
    default_extension: Option<String>,
    fallback_file_name: Option<String>,
}

impl RawConfig {
    fn into_config(self) -> ClassifierConfig {
        let mut config = ClassifierConfig::for_profile(self.profile);
        if let Some(mime) = self.default_content_type.as_deref() {
            config = config.with_default_content_type(Some(mime));
        }
        if let Some(ext) = self.default_extension.as_deref() {
            config = config.with_default_extension(ext);
        }
        if let Some(name) = self.fallback_file_name.as_deref() {
            config = config.with_fallback_file_name(name);
        }
        config
    }
}
