//! Core systems for dashview.
//!
//! This crate provides the foundational pieces the dashboard view controller
//! is built on:
//!
//! - **Element Tree**: Arena-backed parent-child element hierarchy with
//!   reparenting, naming, per-element edit-mode state and dynamic properties
//! - **Signal/Slot System**: Type-safe outward notifications
//! - **Property System**: Change-detecting properties and identity-compared
//!   shared values
//! - **Deferred Queue**: One-shot queue of pending work flushed once a
//!   lifecycle transition happens
//! - **Logging**: `tracing` targets, perf spans and element-tree dumps
//!
//! # Element Tree Example
//!
//! ```
//! use dashview_core::ElementTree;
//!
//! let mut tree = ElementTree::new();
//! let container = tree.create("div");
//! let card = tree.create_external("card");
//!
//! tree.append_child(container, card).unwrap();
//! assert_eq!(tree.children(container).unwrap(), &[card]);
//!
//! // Releasing an owned subtree detaches external elements instead of
//! // destroying them.
//! tree.release(container).unwrap();
//! assert!(tree.contains(card));
//! assert!(!tree.contains(container));
//! ```
//!
//! # Property Example
//!
//! ```
//! use dashview_core::{Identity, Property};
//!
//! let cards = Property::new(Identity::new(vec![1, 2, 3]));
//!
//! // Same allocation: no change
//! assert!(cards.replace(cards.get()).is_none());
//!
//! // Equal contents but a fresh allocation: changed
//! assert!(cards.replace(Identity::new(vec![1, 2, 3])).is_some());
//! ```

pub mod deferred;
pub mod element;
mod error;
pub mod logging;
pub mod property;
pub mod signal;

pub use deferred::{DeferredId, DeferredQueue};
pub use element::{ElementId, ElementState, ElementTree, Ownership};
pub use error::{TreeError, TreeResult};
pub use logging::{ElementTreeDebug, PerfSpan, TreeFormatOptions, TreeStyle};
pub use property::{Identity, Property};
pub use signal::{ConnectionId, Signal};
