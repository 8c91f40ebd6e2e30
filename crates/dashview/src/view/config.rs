//! View configuration.
//!
//! A view configuration is the declarative description of one dashboard
//! view: its metadata and the ordered list of card configurations. Only
//! `cards[i].view_layout.position` is interpreted by the layout controller;
//! every other field is preserved untouched.
//!
//! Configurations can be parsed from JSON or TOML:
//!
//! ```
//! use dashview::view::{Region, ViewConfig};
//!
//! let config = ViewConfig::from_toml_str(r#"
//!     title = "Home"
//!
//!     [[cards]]
//!     type = "weather"
//!
//!     [[cards]]
//!     type = "clock"
//!     view_layout = { position = "sidebar" }
//! "#).unwrap();
//!
//! assert_eq!(config.cards[0].region(), Region::Main);
//! assert_eq!(config.cards[1].region(), Region::Sidebar);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use dashview_core::logging::targets;

use super::regions::Region;
use crate::error::{ViewError, ViewResult};

/// Per-card layout hints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewLayout {
    /// Requested region; only `"sidebar"` is recognized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    /// Any other layout hints, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Configuration of a single card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Card type identifier.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,

    /// Layout hints for the view hosting this card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_layout: Option<ViewLayout>,

    /// Card-specific options, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CardConfig {
    /// A card config with the given `view_layout.position`.
    pub fn with_position(position: impl Into<String>) -> Self {
        Self {
            view_layout: Some(ViewLayout {
                position: Some(position.into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// The raw `view_layout.position` value, if any.
    pub fn position(&self) -> Option<&str> {
        self.view_layout.as_ref()?.position.as_deref()
    }

    /// The region this card is placed into.
    pub fn region(&self) -> Region {
        Region::from_position(self.position())
    }
}

/// Configuration of a dashboard view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// URL path segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// View type, e.g. `"sidebar"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub view_type: Option<String>,

    /// Card configurations, index-aligned with the view's cards.
    #[serde(default)]
    pub cards: Vec<CardConfig>,

    /// Any other view metadata, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON (`.json`).
    Json,
    /// TOML (`.toml`).
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else {
            None
        }
    }
}

impl ViewConfig {
    /// Parse a view configuration from JSON.
    pub fn from_json_str(json: &str) -> ViewResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a view configuration from TOML.
    pub fn from_toml_str(source: &str) -> ViewResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Parse a view configuration in the given format.
    pub fn parse(source: &str, format: ConfigFormat) -> ViewResult<Self> {
        match format {
            ConfigFormat::Json => Self::from_json_str(source),
            ConfigFormat::Toml => Self::from_toml_str(source),
        }
    }

    /// Load a view configuration from a file, picking the format from its
    /// extension.
    pub fn load(path: impl AsRef<Path>) -> ViewResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| ViewError::UnknownFormat {
            path: path.to_path_buf(),
        })?;
        let source = std::fs::read_to_string(path).map_err(|err| ViewError::io(path, err))?;
        tracing::debug!(
            target: targets::VIEW,
            path = %path.display(),
            ?format,
            "loading view config"
        );
        Self::parse(&source, format)
    }

    /// The config of the card at `index`, if present.
    pub fn card(&self, index: usize) -> Option<&CardConfig> {
        self.cards.get(index)
    }
}
