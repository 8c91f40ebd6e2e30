//! Mount manager.
//!
//! Keeps exactly one main and one sidebar container attached to the view's
//! render-output anchor. Before the first render there is no anchor, so
//! region pairs are parked in a [`DeferredQueue`] and attached once the
//! first render completes.

use dashview_core::logging::targets;
use dashview_core::{DeferredId, DeferredQueue, ElementId, TreeResult};

use super::host::ElementHost;
use super::regions::RegionPair;

/// Mount lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountState {
    /// The first render has not completed yet.
    #[default]
    NotMounted,
    /// Region containers are attached to `anchor`.
    Mounted { anchor: ElementId },
}

/// Owns attachment of region containers into the anchor.
#[derive(Debug, Default)]
pub struct MountManager {
    state: MountState,
    current: Option<RegionPair>,
    pending: DeferredQueue<RegionPair>,
    pending_id: Option<DeferredId>,
}

impl MountManager {
    /// Create a manager in the `NotMounted` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MountState {
        self.state
    }

    /// Whether the first render has completed.
    pub fn is_mounted(&self) -> bool {
        matches!(self.state, MountState::Mounted { .. })
    }

    /// The attached pair, if any.
    pub fn mounted(&self) -> Option<RegionPair> {
        self.current
    }

    /// Number of pairs waiting for the first render.
    pub fn pending_count(&self) -> usize {
        self.pending.pending_count()
    }

    /// Replace the attached pair with `pair`.
    ///
    /// Before the first render the pair is deferred instead; a newer pair
    /// supersedes an older pending one, which is released.
    pub fn replace<H>(&mut self, host: &mut H, pair: RegionPair) -> TreeResult<()>
    where
        H: ElementHost + ?Sized,
    {
        match self.state {
            MountState::Mounted { anchor } => self.swap(host, anchor, pair),
            MountState::NotMounted => {
                let superseded = self.pending_id.take().and_then(|id| self.pending.cancel(id));
                if let Some(superseded) = superseded {
                    tracing::trace!(target: targets::MOUNT, "superseding pending regions");
                    release_pair(host, superseded)?;
                }
                self.pending_id = Some(self.pending.post(pair));
                tracing::debug!(target: targets::MOUNT, "anchor not rendered yet, mount deferred");
                Ok(())
            }
        }
    }

    /// Called once the first render produced `anchor`.
    ///
    /// Attaches the pending pair, if any. Calls after the first are no-ops.
    pub fn render_complete<H>(&mut self, host: &mut H, anchor: ElementId) -> TreeResult<()>
    where
        H: ElementHost + ?Sized,
    {
        if self.is_mounted() {
            return Ok(());
        }
        self.state = MountState::Mounted { anchor };
        self.pending_id = None;

        let pending: Vec<RegionPair> = self.pending.drain().collect();
        tracing::debug!(target: targets::MOUNT, pending = pending.len(), "first render complete");
        for pair in pending {
            self.swap(host, anchor, pair)?;
        }
        Ok(())
    }

    /// Detach and release everything this manager owns.
    pub fn clear<H>(&mut self, host: &mut H) -> TreeResult<()>
    where
        H: ElementHost + ?Sized,
    {
        self.pending_id = None;
        for pair in self.pending.drain() {
            release_pair(host, pair)?;
        }
        if let Some(old) = self.current.take() {
            if let MountState::Mounted { anchor } = self.state {
                unmount_pair(host, anchor, old)?;
            }
            release_pair(host, old)?;
        }
        Ok(())
    }

    fn swap<H>(&mut self, host: &mut H, anchor: ElementId, pair: RegionPair) -> TreeResult<()>
    where
        H: ElementHost + ?Sized,
    {
        if let Some(old) = self.current.take() {
            unmount_pair(host, anchor, old)?;
            release_pair(host, old)?;
        }
        host.mount(anchor, pair.main)?;
        host.mount(anchor, pair.sidebar)?;
        self.current = Some(pair);
        tracing::trace!(target: targets::MOUNT, ?pair, "regions mounted");
        Ok(())
    }
}

fn unmount_pair<H>(host: &mut H, anchor: ElementId, pair: RegionPair) -> TreeResult<()>
where
    H: ElementHost + ?Sized,
{
    host.unmount(anchor, pair.main)?;
    host.unmount(anchor, pair.sidebar)
}

fn release_pair<H>(host: &mut H, pair: RegionPair) -> TreeResult<()>
where
    H: ElementHost + ?Sized,
{
    host.release(pair.main)?;
    host.release(pair.sidebar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::regions::Region;
    use dashview_core::ElementTree;

    fn pair(tree: &mut ElementTree) -> RegionPair {
        RegionPair {
            main: tree.create_container(Region::Main),
            sidebar: tree.create_container(Region::Sidebar),
        }
    }

    #[test]
    fn test_deferred_until_render_complete() {
        let mut tree = ElementTree::new();
        let mut mounts = MountManager::new();
        let first = pair(&mut tree);

        mounts.replace(&mut tree, first).unwrap();
        assert_eq!(mounts.state(), MountState::NotMounted);
        assert_eq!(mounts.pending_count(), 1);
        assert_eq!(mounts.mounted(), None);

        let anchor = tree.create_anchor();
        mounts.render_complete(&mut tree, anchor).unwrap();

        assert_eq!(mounts.state(), MountState::Mounted { anchor });
        assert_eq!(mounts.pending_count(), 0);
        assert_eq!(tree.children(anchor).unwrap(), &[first.main, first.sidebar]);
    }

    #[test]
    fn test_newer_pending_pair_supersedes() {
        let mut tree = ElementTree::new();
        let mut mounts = MountManager::new();
        let first = pair(&mut tree);
        let second = pair(&mut tree);

        mounts.replace(&mut tree, first).unwrap();
        mounts.replace(&mut tree, second).unwrap();
        assert_eq!(mounts.pending_count(), 1);
        assert!(!tree.contains(first.main));
        assert!(!tree.contains(first.sidebar));

        let anchor = tree.create_anchor();
        mounts.render_complete(&mut tree, anchor).unwrap();
        assert_eq!(mounts.mounted(), Some(second));
        assert_eq!(tree.children(anchor).unwrap(), &[second.main, second.sidebar]);
    }

    #[test]
    fn test_render_complete_without_pending() {
        let mut tree = ElementTree::new();
        let mut mounts = MountManager::new();
        let anchor = tree.create_anchor();

        mounts.render_complete(&mut tree, anchor).unwrap();
        assert!(mounts.is_mounted());
        assert!(tree.children(anchor).unwrap().is_empty());
    }

    #[test]
    fn test_render_complete_runs_once() {
        let mut tree = ElementTree::new();
        let mut mounts = MountManager::new();
        let anchor = tree.create_anchor();
        mounts.render_complete(&mut tree, anchor).unwrap();

        let other = tree.create_anchor();
        mounts.render_complete(&mut tree, other).unwrap();
        assert_eq!(mounts.state(), MountState::Mounted { anchor });
    }

    #[test]
    fn test_replace_when_mounted_is_exclusive() {
        let mut tree = ElementTree::new();
        let mut mounts = MountManager::new();
        let anchor = tree.create_anchor();
        mounts.render_complete(&mut tree, anchor).unwrap();

        let card = tree.create_external("card");
        let mut last = None;
        for _ in 0..5 {
            let next = pair(&mut tree);
            tree.append_child(next.main, card).unwrap();
            mounts.replace(&mut tree, next).unwrap();
            last = Some(next);
        }

        let last = last.unwrap();
        assert_eq!(tree.children(anchor).unwrap(), &[last.main, last.sidebar]);
        assert_eq!(tree.children(last.main).unwrap(), &[card]);
        // Anchor, one pair, and the card.
        assert_eq!(tree.element_count(), 4);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut tree = ElementTree::new();
        let mut mounts = MountManager::new();
        let anchor = tree.create_anchor();
        mounts.render_complete(&mut tree, anchor).unwrap();
        let current = pair(&mut tree);
        mounts.replace(&mut tree, current).unwrap();

        mounts.clear(&mut tree).unwrap();
        assert_eq!(mounts.mounted(), None);
        assert!(tree.children(anchor).unwrap().is_empty());
        assert!(!tree.contains(current.main));
    }
}
