//! Shared contexts handed to a view.
//!
//! The dashboard context ([`LovelaceContext`]) is an immutable snapshot: a
//! new snapshot is passed to the view whenever the dashboard configuration
//! or the global edit mode changes. The view only reads two things from it,
//! the identity of the dashboard configuration and the edit-mode flag.

use dashview_core::Identity;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::config::ViewConfig;
use crate::error::ViewResult;

/// Configuration of a whole dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Dashboard title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Views of the dashboard, in order.
    #[serde(default)]
    pub views: Vec<ViewConfig>,

    /// Any other dashboard metadata, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DashboardConfig {
    /// Parse a dashboard configuration from JSON.
    pub fn from_json_str(json: &str) -> ViewResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Snapshot of the dashboard-wide state a view depends on.
///
/// Equality compares the configuration by identity and the edit-mode flag
/// by value.
#[derive(Debug, Clone, PartialEq)]
pub struct LovelaceContext {
    /// Current dashboard configuration.
    pub config: Identity<DashboardConfig>,
    /// Whether the dashboard is in edit mode.
    pub edit_mode: bool,
}

impl LovelaceContext {
    /// Create a snapshot.
    pub fn new(config: Identity<DashboardConfig>, edit_mode: bool) -> Self {
        Self { config, edit_mode }
    }

    /// A snapshot with the same configuration identity and a different
    /// edit-mode flag.
    pub fn with_edit_mode(&self, edit_mode: bool) -> Self {
        Self {
            config: self.config.clone(),
            edit_mode,
        }
    }
}

/// Home-automation connection state passed through to decorators.
///
/// Opaque to the layout controller apart from the text direction, which
/// the add-card action mirrors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hass {
    /// Active UI language.
    pub language: String,
    /// Whether the UI language is written right to left.
    pub rtl: bool,
}

/// Shared, identity-compared [`Hass`] handle.
pub type HassContext = Identity<Hass>;
