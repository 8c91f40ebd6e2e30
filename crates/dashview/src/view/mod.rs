//! Sidebar view controller.
//!
//! # Modules
//!
//! - [`config`]: view and card configuration (JSON/TOML)
//! - [`context`]: dashboard and hass context snapshots
//! - [`host`]: the [`ElementHost`] capability the view builds through
//! - [`regions`]: card placement and region building
//! - [`tracking`]: change tracking and the rebuild decision
//! - [`mount`]: attaching region containers to the render output
//! - [`editable`]: the lazily loaded editing capability
//! - [`sidebar`]: the [`SidebarView`] component tying them together
//!
//! # Element layout
//!
//! After an update the render output looks like this (edit mode shown):
//!
//! ```text
//! div#container
//! ├── div#main
//! │   ├── card-options { path: [view, 0] }
//! │   │   └── card
//! │   └── card-options { path: [view, 2] }
//! │       └── card
//! └── div#sidebar
//!     └── card-options { path: [view, 1] }
//!         └── card
//! fab { label, rtl }
//! ```

pub mod config;
pub mod context;
pub mod editable;
pub mod host;
pub mod mount;
pub mod regions;
pub mod sidebar;
pub mod tracking;

pub use config::{CardConfig, ConfigFormat, ViewConfig, ViewLayout};
pub use context::{DashboardConfig, Hass, HassContext, LovelaceContext};
pub use editable::{CapabilityLoader, LazyCapability, LoadError, LoadState, NoopLoader};
pub use host::{ADD_CARD_LABEL, ANCHOR_NAME, CardOptions, CardPath, ElementHost};
pub use mount::{MountManager, MountState};
pub use regions::{Region, RegionInputs, RegionPair, assign_regions, build_regions};
pub use sidebar::{SidebarView, UpdateOutcome};
pub use tracking::{ChangedInputs, RebuildReason, rebuild_reason};
