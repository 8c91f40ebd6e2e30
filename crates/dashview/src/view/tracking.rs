//! Input change tracking and the rebuild decision.

use std::fmt;

use dashview_core::Identity;

use super::context::{DashboardConfig, LovelaceContext};

/// Inputs changed since the last update cycle.
#[derive(Debug, Clone, Default)]
pub struct ChangedInputs {
    pub cards: bool,
    pub config: bool,
    pub index: bool,
    pub hass: bool,
    pub strategy: bool,
    /// Outer `Some` once the lovelace context changed; holds the value it
    /// had at the start of the cycle.
    lovelace: Option<Option<LovelaceContext>>,
}

impl ChangedInputs {
    /// The change set of a view that never updated: the card list counts as
    /// changed so the first update always builds regions.
    pub fn initial() -> Self {
        Self {
            cards: true,
            ..Default::default()
        }
    }

    /// Put back a change set that was taken for an update that failed.
    ///
    /// Flags are merged. For the lovelace context, the older recorded value
    /// (the one in `earlier`) wins.
    pub fn restore(&mut self, earlier: ChangedInputs) {
        self.cards |= earlier.cards;
        self.config |= earlier.config;
        self.index |= earlier.index;
        self.hass |= earlier.hass;
        self.strategy |= earlier.strategy;
        if earlier.lovelace.is_some() {
            self.lovelace = earlier.lovelace;
        }
    }

    /// Record a lovelace change. Only the first old value of a cycle is kept.
    pub fn record_lovelace(&mut self, old: Option<LovelaceContext>) {
        if self.lovelace.is_none() {
            self.lovelace = Some(old);
        }
    }

    /// Whether the lovelace context changed this cycle.
    pub fn lovelace_changed(&self) -> bool {
        self.lovelace.is_some()
    }

    /// The lovelace context at the start of the cycle, if it changed and
    /// was set before.
    pub fn previous_lovelace(&self) -> Option<&LovelaceContext> {
        self.lovelace.as_ref()?.as_ref()
    }

    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        !(self.cards
            || self.config
            || self.index
            || self.hass
            || self.strategy
            || self.lovelace_changed())
    }
}

/// Why the regions were rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildReason {
    /// The card list identity changed.
    CardsChanged,
    /// The dashboard configuration identity changed.
    DashboardConfigChanged,
    /// Global edit mode was switched on or off.
    EditModeToggled,
}

impl fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CardsChanged => "cards changed",
            Self::DashboardConfigChanged => "dashboard config changed",
            Self::EditModeToggled => "edit mode toggled",
        })
    }
}

/// Decide whether the regions must be rebuilt.
///
/// `current` is the lovelace context after the changes were applied.
pub fn rebuild_reason(
    changes: &ChangedInputs,
    current: Option<&LovelaceContext>,
) -> Option<RebuildReason> {
    if changes.cards {
        return Some(RebuildReason::CardsChanged);
    }
    if !changes.lovelace_changed() {
        return None;
    }

    let previous = changes.previous_lovelace();
    if dashboard_config(previous) != dashboard_config(current) {
        return Some(RebuildReason::DashboardConfigChanged);
    }
    let toggled = previous.is_some_and(|prev| {
        current.map(|c| c.edit_mode) != Some(prev.edit_mode)
    });
    toggled.then_some(RebuildReason::EditModeToggled)
}

fn dashboard_config(lovelace: Option<&LovelaceContext>) -> Option<&Identity<DashboardConfig>> {
    lovelace.map(|l| &l.config)
}
