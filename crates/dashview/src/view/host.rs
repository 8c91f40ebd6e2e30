//! Element host capability.
//!
//! The view never touches a rendering substrate directly. Everything it
//! needs, creating containers and decorators, flagging cards, reparenting
//! and mounting, goes through [`ElementHost`]. [`ElementTree`] implements it
//! as an in-memory tree, which is what tests and headless embedders use.

use dashview_core::{ElementId, ElementTree, TreeError, TreeResult};

use super::context::{HassContext, LovelaceContext};
use super::regions::Region;

/// Element tags created by the view.
pub mod tags {
    /// Render-output anchor and region containers.
    pub const CONTAINER: &str = "div";
    /// Edit-mode decorator wrapping a card.
    pub const DECORATOR: &str = "card-options";
    /// Floating "add card" action.
    pub const ADD_CARD: &str = "fab";
}

/// Dynamic property names set on created elements.
pub mod props {
    /// `Option<HassContext>` on decorators.
    pub const HASS: &str = "hass";
    /// `LovelaceContext` on decorators.
    pub const LOVELACE: &str = "lovelace";
    /// `CardPath` on decorators.
    pub const PATH: &str = "path";
    /// `String` translation key on the add-card action.
    pub const LABEL: &str = "label";
    /// `bool` on the add-card action.
    pub const RTL: &str = "rtl";
}

/// Name given to the render-output anchor.
pub const ANCHOR_NAME: &str = "container";

/// Translation key of the add-card action label.
pub const ADD_CARD_LABEL: &str = "ui.panel.lovelace.editor.edit_card.add";

/// Position of a card in the dashboard: `[view, card]`.
///
/// `card` is the index in the view's card list, not the index within a
/// region. `view` is `None` only when the caller broke the "edit mode needs
/// a view index" precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardPath {
    pub view: Option<usize>,
    pub card: usize,
}

impl CardPath {
    /// Create a path.
    pub fn new(view: Option<usize>, card: usize) -> Self {
        Self { view, card }
    }
}

/// Everything a decorator carries besides the card itself.
#[derive(Debug, Clone, PartialEq)]
pub struct CardOptions {
    pub hass: Option<HassContext>,
    pub lovelace: LovelaceContext,
    pub path: CardPath,
}

/// Capability interface over the rendering substrate.
///
/// Implementations must give DOM-style reparenting semantics: appending an
/// element that already has a parent moves it.
pub trait ElementHost {
    /// Whether `element` is live in this host.
    fn contains(&self, element: ElementId) -> bool;

    /// Create the view's render-output anchor.
    fn create_anchor(&mut self) -> ElementId;

    /// Create an empty, detached container for `region`.
    fn create_container(&mut self, region: Region) -> ElementId;

    /// Create a decorator carrying `options` and move `card` into it as its
    /// sole child.
    fn create_decorator(&mut self, card: ElementId, options: CardOptions) -> TreeResult<ElementId>;

    /// Create the "add card" action element.
    fn create_add_card_action(&mut self, rtl: bool) -> ElementId;

    /// Update the text direction of an element.
    fn set_rtl(&mut self, element: ElementId, rtl: bool) -> TreeResult<()>;

    /// Set a card's own edit-mode flag.
    fn set_edit_mode(&mut self, card: ElementId, edit_mode: bool) -> TreeResult<()>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: ElementId, child: ElementId) -> TreeResult<()>;

    /// Attach a region container to the anchor.
    fn mount(&mut self, anchor: ElementId, container: ElementId) -> TreeResult<()> {
        self.append_child(anchor, container)
    }

    /// Detach a region container from the anchor. Detaching a container
    /// that is not attached there is a no-op.
    fn unmount(&mut self, anchor: ElementId, container: ElementId) -> TreeResult<()>;

    /// Discard an element created by the host. Cards inside it are detached,
    /// never destroyed.
    fn release(&mut self, element: ElementId) -> TreeResult<()>;
}

impl ElementHost for ElementTree {
    fn contains(&self, element: ElementId) -> bool {
        ElementTree::contains(self, element)
    }

    fn create_anchor(&mut self) -> ElementId {
        let anchor = self.create(tags::CONTAINER);
        named(self, anchor, ANCHOR_NAME)
    }

    fn create_container(&mut self, region: Region) -> ElementId {
        let container = self.create(tags::CONTAINER);
        named(self, container, region.name())
    }

    fn create_decorator(&mut self, card: ElementId, options: CardOptions) -> TreeResult<ElementId> {
        if !self.contains(card) {
            return Err(TreeError::InvalidElement(card));
        }

        let decorator = self.create(tags::DECORATOR);
        self.set_property(decorator, props::HASS, options.hass)?;
        self.set_property(decorator, props::LOVELACE, options.lovelace)?;
        self.set_property(decorator, props::PATH, options.path)?;
        ElementTree::append_child(self, decorator, card)?;
        Ok(decorator)
    }

    fn create_add_card_action(&mut self, rtl: bool) -> ElementId {
        let action = self.create(tags::ADD_CARD);
        // Freshly created, so property writes cannot fail.
        let _ = self.set_property(action, props::LABEL, ADD_CARD_LABEL.to_string());
        let _ = self.set_property(action, props::RTL, rtl);
        action
    }

    fn set_rtl(&mut self, element: ElementId, rtl: bool) -> TreeResult<()> {
        self.set_property(element, props::RTL, rtl)
    }

    fn set_edit_mode(&mut self, card: ElementId, edit_mode: bool) -> TreeResult<()> {
        ElementTree::set_edit_mode(self, card, edit_mode)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> TreeResult<()> {
        ElementTree::append_child(self, parent, child)
    }

    fn unmount(&mut self, anchor: ElementId, container: ElementId) -> TreeResult<()> {
        if self.parent(container)? == Some(anchor) {
            self.detach(container)?;
        }
        Ok(())
    }

    fn release(&mut self, element: ElementId) -> TreeResult<()> {
        ElementTree::release(self, element)
    }
}

fn named(tree: &mut ElementTree, id: ElementId, name: &str) -> ElementId {
    // Freshly created, so renaming cannot fail.
    let _ = tree.set_name(id, name);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::context::{DashboardConfig, Hass};
    use dashview_core::Identity;

    fn options(card: usize) -> CardOptions {
        CardOptions {
            hass: Some(Identity::new(Hass::default())),
            lovelace: LovelaceContext::new(Identity::new(DashboardConfig::default()), true),
            path: CardPath::new(Some(3), card),
        }
    }

    #[test]
    fn test_containers_are_named() {
        let mut tree = ElementTree::new();
        let anchor = tree.create_anchor();
        let main = tree.create_container(Region::Main);
        let sidebar = tree.create_container(Region::Sidebar);

        assert_eq!(tree.name(anchor).unwrap(), ANCHOR_NAME);
        assert_eq!(tree.name(main).unwrap(), "main");
        assert_eq!(tree.name(sidebar).unwrap(), "sidebar");
        assert_eq!(tree.tag(main).unwrap(), tags::CONTAINER);
    }

    #[test]
    fn test_decorator_wraps_card() {
        let mut tree = ElementTree::new();
        let container = tree.create_container(Region::Main);
        let card = tree.create_external("card");
        ElementHost::append_child(&mut tree, container, card).unwrap();

        let decorator = tree.create_decorator(card, options(4)).unwrap();

        assert_eq!(tree.tag(decorator).unwrap(), tags::DECORATOR);
        assert_eq!(tree.children(decorator).unwrap(), &[card]);
        assert!(tree.children(container).unwrap().is_empty());
        assert_eq!(
            tree.property::<CardPath>(decorator, props::PATH).unwrap(),
            Some(&CardPath::new(Some(3), 4))
        );
        assert!(
            tree.property::<LovelaceContext>(decorator, props::LOVELACE)
                .unwrap()
                .is_some_and(|l| l.edit_mode)
        );
        assert!(
            tree.property::<Option<HassContext>>(decorator, props::HASS)
                .unwrap()
                .is_some_and(Option::is_some)
        );
    }

    #[test]
    fn test_decorator_for_missing_card() {
        let mut tree = ElementTree::new();
        let stale = tree.create("div");
        tree.release(stale).unwrap();

        let before = tree.element_count();
        assert_eq!(
            tree.create_decorator(stale, options(0)),
            Err(TreeError::InvalidElement(stale))
        );
        assert_eq!(tree.element_count(), before);
    }

    #[test]
    fn test_unmount_is_tolerant() {
        let mut tree = ElementTree::new();
        let anchor = tree.create_anchor();
        let main = tree.create_container(Region::Main);

        tree.unmount(anchor, main).unwrap();
        tree.mount(anchor, main).unwrap();
        assert_eq!(tree.children(anchor).unwrap(), &[main]);

        tree.unmount(anchor, main).unwrap();
        assert!(tree.children(anchor).unwrap().is_empty());
    }

    #[test]
    fn test_add_card_action() {
        let mut tree = ElementTree::new();
        let action = tree.create_add_card_action(true);

        assert_eq!(
            tree.property::<String>(action, props::LABEL).unwrap().map(String::as_str),
            Some(ADD_CARD_LABEL)
        );
        assert_eq!(tree.property::<bool>(action, props::RTL).unwrap(), Some(&true));

        tree.set_rtl(action, false).unwrap();
        assert_eq!(tree.property::<bool>(action, props::RTL).unwrap(), Some(&false));
    }
}
