//! dashview - a sidebar dashboard-view layout controller.
//!
//! This is the umbrella crate: it re-exports the core systems from
//! `dashview-core` and adds the [`view`] module, which arranges externally
//! owned card elements into a main region and a sidebar region and keeps
//! that arrangement in sync with its inputs.
//!
//! # Example
//!
//! ```
//! use dashview::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tree = ElementTree::new();
//!     let weather = tree.create_external("card");
//!     let clock = tree.create_external("card");
//!
//!     let config = ViewConfig::from_json_str(
//!         r#"{ "cards": [ {}, { "view_layout": { "position": "sidebar" } } ] }"#,
//!     )?;
//!
//!     let mut view = SidebarView::new();
//!     view.set_config(config);
//!     view.set_cards(Identity::new(vec![weather, clock]));
//!     view.update(&mut tree)?;
//!
//!     let regions = view.mounted_regions().expect("mounted after first update");
//!     assert_eq!(tree.children(regions.main)?, &[weather]);
//!     assert_eq!(tree.children(regions.sidebar)?, &[clock]);
//!     Ok(())
//! }
//! ```

pub use dashview_core::*;

mod error;
pub mod prelude;
pub mod view;

pub use error::{ViewError, ViewResult};
