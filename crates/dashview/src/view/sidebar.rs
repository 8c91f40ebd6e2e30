//! The sidebar view component.
//!
//! [`SidebarView`] arranges a dashboard view's cards into a main region and
//! a sidebar region. The owner sets inputs, then calls
//! [`update`](SidebarView::update) once per cycle:
//!
//! 1. If anything changed, the rebuild decision runs (see
//!    [`rebuild_reason`](super::tracking::rebuild_reason)). A rebuild
//!    creates a fresh pair of region containers and swaps it in.
//! 2. The render output is refreshed: the anchor is created on the first
//!    cycle, and the "add card" action follows edit mode.
//! 3. After the first cycle, region pairs built before the anchor existed
//!    are mounted.
//!
//! Cards are never created or destroyed by the view. A rebuild reparents
//! them into the new containers, and discarded containers and decorators
//! only detach them.

use std::fmt;

use dashview_core::logging::targets;
use dashview_core::{ElementId, Identity, PerfSpan, Property, Signal, TreeResult};

use super::config::ViewConfig;
use super::context::{HassContext, LovelaceContext};
use super::editable::{CapabilityLoader, LazyCapability, NoopLoader};
use super::host::ElementHost;
use super::mount::{MountManager, MountState};
use super::regions::{RegionInputs, RegionPair, build_regions};
use super::tracking::{ChangedInputs, RebuildReason, rebuild_reason};
use crate::error::ViewResult;

/// Result of one update cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Why the regions were rebuilt, if they were.
    pub rebuild: Option<RebuildReason>,
    /// Whether this cycle produced the first render.
    pub first_render: bool,
}

impl UpdateOutcome {
    /// Whether the regions were rebuilt.
    pub fn rebuilt(&self) -> bool {
        self.rebuild.is_some()
    }
}

/// Two-region dashboard view.
///
/// # Signals
///
/// - `create_card`: the user asked to add a card to this view.
pub struct SidebarView {
    cards: Property<Identity<Vec<ElementId>>>,
    config: Property<Identity<ViewConfig>>,
    lovelace: Property<Option<LovelaceContext>>,
    hass: Property<Option<HassContext>>,
    index: Property<Option<usize>>,
    is_strategy: Property<bool>,

    changes: ChangedInputs,
    has_updated: bool,
    anchor: Option<ElementId>,
    add_card_action: Option<ElementId>,
    mounts: MountManager,
    editable: LazyCapability,
    rebuild_count: usize,

    /// Emitted when the add-card action is activated.
    pub create_card: Signal<()>,
}

impl SidebarView {
    /// Create a view with no cards and an empty config.
    pub fn new() -> Self {
        Self {
            cards: Property::new(Identity::new(Vec::new())),
            config: Property::new(Identity::new(ViewConfig::default())),
            lovelace: Property::new(None),
            hass: Property::new(None),
            index: Property::new(None),
            is_strategy: Property::new(false),
            changes: ChangedInputs::initial(),
            has_updated: false,
            anchor: None,
            add_card_action: None,
            mounts: MountManager::new(),
            editable: LazyCapability::editable_view(NoopLoader),
            rebuild_count: 0,
            create_card: Signal::new(),
        }
    }

    /// Use `loader` to load the editing capability.
    pub fn with_editable_loader(mut self, loader: impl CapabilityLoader + 'static) -> Self {
        self.editable = LazyCapability::editable_view(loader);
        self
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// The card list.
    pub fn cards(&self) -> Identity<Vec<ElementId>> {
        self.cards.get()
    }

    /// Set the card list. Setting the same list handle again is not a change.
    pub fn set_cards(&mut self, cards: Identity<Vec<ElementId>>) {
        if self.cards.set(cards) {
            self.changes.cards = true;
        }
    }

    /// The view configuration.
    pub fn config(&self) -> Identity<ViewConfig> {
        self.config.get()
    }

    /// Set the view configuration.
    ///
    /// Positions take effect at the next rebuild; a config change alone
    /// does not rebuild.
    pub fn set_config(&mut self, config: ViewConfig) {
        self.config.set_silent(Identity::new(config));
        self.changes.config = true;
    }

    /// The dashboard context.
    pub fn lovelace(&self) -> Option<LovelaceContext> {
        self.lovelace.get()
    }

    /// Set the dashboard context.
    pub fn set_lovelace(&mut self, lovelace: Option<LovelaceContext>) {
        if let Some(old) = self.lovelace.replace(lovelace) {
            self.changes.record_lovelace(old);
        }
    }

    /// The hass context.
    pub fn hass(&self) -> Option<HassContext> {
        self.hass.get()
    }

    /// Set the hass context.
    pub fn set_hass(&mut self, hass: Option<HassContext>) {
        if self.hass.set(hass) {
            self.changes.hass = true;
        }
    }

    /// Index of this view in the dashboard.
    pub fn index(&self) -> Option<usize> {
        self.index.get()
    }

    /// Set the view index.
    pub fn set_index(&mut self, index: Option<usize>) {
        if self.index.set(index) {
            self.changes.index = true;
        }
    }

    /// Whether the view was generated by a strategy.
    pub fn is_strategy(&self) -> bool {
        self.is_strategy.get()
    }

    /// Mark the view as generated by a strategy. Strategy views are never
    /// decorated for editing.
    pub fn set_strategy(&mut self, is_strategy: bool) {
        if self.is_strategy.set(is_strategy) {
            self.changes.strategy = true;
        }
    }

    // =========================================================================
    // Update cycle
    // =========================================================================

    /// Run one update cycle against `host`.
    #[tracing::instrument(skip_all, target = "dashview::view", level = "debug")]
    pub fn update<H>(&mut self, host: &mut H) -> ViewResult<UpdateOutcome>
    where
        H: ElementHost + ?Sized,
    {
        if self.has_updated && self.changes.is_empty() {
            return Ok(UpdateOutcome::default());
        }
        let changes = std::mem::take(&mut self.changes);
        let lovelace = self.lovelace.get();
        let editing = lovelace.as_ref().is_some_and(|l| l.edit_mode);

        if editing {
            self.editable.ensure_loaded();
        }

        let rebuild = rebuild_reason(&changes, lovelace.as_ref());
        if let Some(reason) = rebuild {
            tracing::debug!(target: targets::VIEW, %reason, "rebuilding regions");
            if let Err(err) = self.create_regions(host, lovelace.as_ref()) {
                // Keep the changes so the next update retries the rebuild.
                self.changes.restore(changes);
                return Err(err.into());
            }
        }

        let first_render = !self.has_updated;
        let anchor = self.render(host, editing, first_render || changes.hass)?;
        if first_render {
            self.has_updated = true;
            self.mounts.render_complete(host, anchor)?;
        }

        Ok(UpdateOutcome {
            rebuild,
            first_render,
        })
    }

    fn create_regions<H>(
        &mut self,
        host: &mut H,
        lovelace: Option<&LovelaceContext>,
    ) -> TreeResult<()>
    where
        H: ElementHost + ?Sized,
    {
        let _perf = PerfSpan::new("create_regions");

        let cards = self.cards.get();
        let config = self.config.get();
        let hass = self.hass.get();
        let inputs = RegionInputs {
            cards: cards.as_slice(),
            card_configs: &config.cards,
            lovelace,
            hass: hass.as_ref(),
            is_strategy: self.is_strategy.get(),
            view_index: self.index.get(),
        };

        let pair = build_regions(host, &inputs)?;
        self.mounts.replace(host, pair)?;
        self.rebuild_count += 1;
        Ok(())
    }

    fn render<H>(
        &mut self,
        host: &mut H,
        editing: bool,
        hass_changed: bool,
    ) -> TreeResult<ElementId>
    where
        H: ElementHost + ?Sized,
    {
        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => {
                let anchor = host.create_anchor();
                self.anchor = Some(anchor);
                anchor
            }
        };

        let rtl = self.hass.with(|hass| hass.as_ref().is_some_and(|h| h.rtl));
        match (editing, self.add_card_action) {
            (true, None) => {
                self.add_card_action = Some(host.create_add_card_action(rtl));
            }
            (true, Some(action)) if hass_changed => host.set_rtl(action, rtl)?,
            (false, Some(action)) => {
                self.add_card_action = None;
                host.release(action)?;
            }
            _ => {}
        }
        Ok(anchor)
    }

    /// Activate the add-card action.
    ///
    /// Emits `create_card` and returns `true` when the action is rendered;
    /// outside edit mode nothing happens.
    pub fn activate_add_card(&self) -> bool {
        if self.add_card_action.is_none() {
            return false;
        }
        self.create_card.emit(());
        true
    }

    /// Release every element the view created and return to the initial
    /// state. Cards are detached, not destroyed.
    pub fn dispose<H>(&mut self, host: &mut H) -> ViewResult<()>
    where
        H: ElementHost + ?Sized,
    {
        self.mounts.clear(host)?;
        self.mounts = MountManager::new();
        if let Some(action) = self.add_card_action.take() {
            host.release(action)?;
        }
        if let Some(anchor) = self.anchor.take() {
            host.release(anchor)?;
        }
        self.has_updated = false;
        self.changes = ChangedInputs::initial();
        tracing::debug!(target: targets::VIEW, "view disposed");
        Ok(())
    }

    // =========================================================================
    // Render output
    // =========================================================================

    /// The render-output anchor, once the first update ran.
    pub fn anchor(&self) -> Option<ElementId> {
        self.anchor
    }

    /// The add-card action, rendered only in edit mode.
    pub fn add_card_action(&self) -> Option<ElementId> {
        self.add_card_action
    }

    /// The region containers currently attached to the anchor.
    pub fn mounted_regions(&self) -> Option<RegionPair> {
        self.mounts.mounted()
    }

    /// Mount lifecycle state.
    pub fn mount_state(&self) -> MountState {
        self.mounts.state()
    }

    /// Whether the first render completed.
    pub fn is_mounted(&self) -> bool {
        self.mounts.is_mounted()
    }

    /// Whether inputs changed since the last update.
    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Number of region rebuilds so far.
    pub fn rebuild_count(&self) -> usize {
        self.rebuild_count
    }

    /// The lazily loaded editing capability.
    pub fn editable(&self) -> &LazyCapability {
        &self.editable
    }
}

impl Default for SidebarView {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SidebarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SidebarView")
            .field("cards", &self.cards)
            .field("index", &self.index.get())
            .field("is_strategy", &self.is_strategy.get())
            .field("anchor", &self.anchor)
            .field("mount_state", &self.mounts.state())
            .field("rebuild_count", &self.rebuild_count)
            .finish_non_exhaustive()
    }
}
