//! Prelude module for dashview.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use dashview::prelude::*;
//! ```
//!
//! This provides access to:
//! - Element tree (`ElementTree`, `ElementId`)
//! - Signal and property system (`Signal`, `Property`, `Identity`)
//! - View configuration and contexts (`ViewConfig`, `LovelaceContext`)
//! - The view component (`SidebarView`) and its host capability

// ============================================================================
// Element Tree
// ============================================================================

pub use crate::element::{ElementId, ElementTree, Ownership};
pub use crate::logging::ElementTreeDebug;

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::property::{Identity, Property};
pub use crate::signal::{ConnectionId, Signal};

// ============================================================================
// View
// ============================================================================

pub use crate::view::{
    CardConfig, CardPath, DashboardConfig, ElementHost, Hass, HassContext, LovelaceContext,
    RebuildReason, Region, RegionPair, SidebarView, UpdateOutcome, ViewConfig,
};

// ============================================================================
// Errors
// ============================================================================

pub use crate::{TreeError, TreeResult, ViewError, ViewResult};
