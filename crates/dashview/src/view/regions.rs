//! Region builder.
//!
//! Splits the view's cards into a main region and a sidebar region. Each
//! card goes to exactly one region, chosen by its own config entry; within
//! a region, cards keep their relative order from the card list (a stable
//! partition, never a sort).
//!
//! In edit mode (and only outside strategy views) every card is wrapped in
//! a decorator that knows the card's `[view, card]` path, so downstream edit
//! actions can address it.

use dashview_core::logging::targets;
use dashview_core::{ElementId, TreeError, TreeResult};

use super::config::CardConfig;
use super::context::{HassContext, LovelaceContext};
use super::host::{CardOptions, CardPath, ElementHost};

/// One of the two placement targets of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// Primary, wide region.
    #[default]
    Main,
    /// Secondary, narrow region.
    Sidebar,
}

impl Region {
    /// The only `view_layout.position` value that selects the sidebar.
    pub const SIDEBAR_POSITION: &'static str = "sidebar";

    /// Region selected by a `view_layout.position` value. Anything other
    /// than exactly `"sidebar"` (including no value) selects the main region.
    pub fn from_position(position: Option<&str>) -> Self {
        match position {
            Some(Self::SIDEBAR_POSITION) => Self::Sidebar,
            _ => Self::Main,
        }
    }

    /// Name of the region's container element.
    pub fn name(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Sidebar => "sidebar",
        }
    }
}

/// The two containers produced by one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionPair {
    pub main: ElementId,
    pub sidebar: ElementId,
}

impl RegionPair {
    /// The container for `region`.
    pub fn get(self, region: Region) -> ElementId {
        match region {
            Region::Main => self.main,
            Region::Sidebar => self.sidebar,
        }
    }
}

/// Region of each of `card_count` cards.
///
/// Configs are index-aligned with cards; cards without a config entry go to
/// the main region.
pub fn assign_regions(card_count: usize, configs: &[CardConfig]) -> Vec<Region> {
    (0..card_count)
        .map(|i| configs.get(i).map_or(Region::Main, CardConfig::region))
        .collect()
}

/// Inputs of one region build.
#[derive(Debug, Clone, Copy)]
pub struct RegionInputs<'a> {
    /// Cards in view order.
    pub cards: &'a [ElementId],
    /// Per-card configs, index-aligned with `cards`.
    pub card_configs: &'a [CardConfig],
    pub lovelace: Option<&'a LovelaceContext>,
    pub hass: Option<&'a HassContext>,
    /// Strategy views never decorate.
    pub is_strategy: bool,
    /// Index of the view in the dashboard. Required when decorating.
    pub view_index: Option<usize>,
}

impl<'a> RegionInputs<'a> {
    /// The dashboard context to decorate with, if cards must be decorated.
    pub fn decorating(&self) -> Option<&'a LovelaceContext> {
        if self.is_strategy {
            return None;
        }
        self.lovelace.filter(|lovelace| lovelace.edit_mode)
    }
}

/// Build fresh main and sidebar containers holding the cards.
///
/// The returned containers are detached; mounting them is the caller's job.
/// Cards are reparented into the new containers (or their decorators), which
/// takes them out of whatever they were attached to before.
///
/// Every card is checked against the host first. If one is not live, the
/// build fails before any card is moved or flagged, so a mounted layout
/// holding the same cards is left intact.
pub fn build_regions<H>(host: &mut H, inputs: &RegionInputs<'_>) -> TreeResult<RegionPair>
where
    H: ElementHost + ?Sized,
{
    if let Some(&stale) = inputs.cards.iter().find(|&&card| !host.contains(card)) {
        tracing::warn!(target: targets::VIEW, ?stale, "card is not live, regions not rebuilt");
        return Err(TreeError::InvalidElement(stale));
    }

    let pair = RegionPair {
        main: host.create_container(Region::Main),
        sidebar: host.create_container(Region::Sidebar),
    };

    if let Err(err) = fill_regions(host, inputs, pair) {
        for container in [pair.main, pair.sidebar] {
            if let Err(release_err) = host.release(container) {
                tracing::warn!(
                    target: targets::VIEW,
                    ?container,
                    %release_err,
                    "failed to release partial region"
                );
            }
        }
        return Err(err);
    }
    Ok(pair)
}

fn fill_regions<H>(host: &mut H, inputs: &RegionInputs<'_>, pair: RegionPair) -> TreeResult<()>
where
    H: ElementHost + ?Sized,
{
    let decorating = inputs.decorating();
    if decorating.is_some() && inputs.view_index.is_none() {
        tracing::warn!(
            target: targets::VIEW,
            "edit mode requires a view index; decorator paths will have no view"
        );
    }

    let regions = assign_regions(inputs.cards.len(), inputs.card_configs);
    for (i, (&card, region)) in inputs.cards.iter().zip(regions).enumerate() {
        let element = match decorating {
            Some(lovelace) => {
                host.set_edit_mode(card, true)?;
                let options = CardOptions {
                    hass: inputs.hass.cloned(),
                    lovelace: lovelace.clone(),
                    path: CardPath::new(inputs.view_index, i),
                };
                host.create_decorator(card, options)?
            }
            None => {
                host.set_edit_mode(card, false)?;
                card
            }
        };
        host.append_child(pair.get(region), element)?;
    }

    tracing::trace!(
        target: targets::VIEW,
        cards = inputs.cards.len(),
        decorated = decorating.is_some(),
        "filled regions"
    );
    Ok(())
}
