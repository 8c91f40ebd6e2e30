//! Logging and debugging facilities for dashview.
//!
//! This module provides:
//! - Target names for filtering `tracing` output by subsystem
//! - Debug visualization for element trees
//! - Performance spans for profiling reconciliation passes
//!
//! # Tracing Integration
//!
//! dashview uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("dashview=debug,dashview_core=trace")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! ```
//! use dashview_core::{ElementTree, ElementTreeDebug};
//!
//! let mut tree = ElementTree::new();
//! let anchor = tree.create("div");
//! tree.set_name(anchor, "container").unwrap();
//!
//! let output = ElementTreeDebug::new().format_subtree(&tree, anchor).unwrap();
//! assert!(output.contains("container"));
//! ```

use std::fmt::Write as FmtWrite;

use crate::element::{ElementId, ElementTree, Ownership};
use crate::error::TreeResult;

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "dashview_core";
    /// Element tree target.
    pub const ELEMENT: &str = "dashview_core::element";
    /// Signal system target.
    pub const SIGNAL: &str = "dashview_core::signal";
    /// View controller target.
    pub const VIEW: &str = "dashview::view";
    /// Mount manager target.
    pub const MOUNT: &str = "dashview::view::mount";
    /// Performance spans target.
    pub const PERF: &str = "dashview::perf";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show element IDs.
    pub show_ids: bool,
    /// Whether to show the edit-mode flag and external ownership.
    pub show_state: bool,
    /// Whether to show dynamic property names.
    pub show_properties: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_state: true,
            show_properties: false,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_properties: true,
            ..Default::default()
        }
    }

    /// Options for minimal output: tags and names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_state: false,
            show_properties: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing element trees.
#[derive(Debug, Clone, Default)]
pub struct ElementTreeDebug {
    options: TreeFormatOptions,
}

impl ElementTreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format every root of the tree.
    pub fn format_all(&self, tree: &ElementTree) -> TreeResult<String> {
        let roots = tree.roots();
        let mut output = String::new();
        let _ = writeln!(output, "Element Tree ({} total elements):", tree.element_count());

        if roots.is_empty() {
            output.push_str("  (empty)\n");
        }
        for root in roots {
            self.format_into(tree, root, 0, true, &mut output)?;
        }
        Ok(output)
    }

    /// Format the subtree rooted at `root`.
    pub fn format_subtree(&self, tree: &ElementTree, root: ElementId) -> TreeResult<String> {
        let mut output = String::new();
        self.format_into(tree, root, 0, true, &mut output)?;
        Ok(output)
    }

    fn format_into(
        &self,
        tree: &ElementTree,
        id: ElementId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> TreeResult<()> {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(tree.tag(id)?);

        let name = tree.name(id)?;
        if !name.is_empty() {
            let _ = write!(output, "#{name}");
        }
        if self.options.show_ids {
            let _ = write!(output, " [{id:?}]");
        }
        if self.options.show_state {
            if tree.ownership(id)? == Ownership::External {
                output.push_str(" (external)");
            }
            if tree.edit_mode(id)? {
                output.push_str(" (edit)");
            }
        }
        if self.options.show_properties {
            let names = tree.property_names(id)?;
            if !names.is_empty() {
                let _ = write!(output, " {{{}}}", names.join(", "));
            }
        }
        output.push('\n');

        let children = tree.children(id)?;
        let count = children.len();
        for (i, &child) in children.iter().enumerate() {
            self.format_into(tree, child, depth + 1, i + 1 == count, output)?;
        }
        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|  ", "+-- ", "`-- "),
            TreeStyle::Unicode => (
                "\u{2502}  ",
                "\u{251c}\u{2500}\u{2500} ",
                "\u{2514}\u{2500}\u{2500} ",
            ),
        };

        let mut prefix = branch.repeat(depth - 1);
        prefix.push_str(if is_last { corner } else { tee });
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time reconciliation passes.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span for `name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "dashview::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (ElementTree, ElementId) {
        let mut tree = ElementTree::new();
        let anchor = tree.create("div");
        tree.set_name(anchor, "container").unwrap();
        let main = tree.create("div");
        tree.set_name(main, "main").unwrap();
        let sidebar = tree.create("div");
        tree.set_name(sidebar, "sidebar").unwrap();
        let card = tree.create_external("card");
        tree.set_edit_mode(card, true).unwrap();

        tree.append_child(anchor, main).unwrap();
        tree.append_child(anchor, sidebar).unwrap();
        tree.append_child(main, card).unwrap();
        (tree, anchor)
    }

    #[test]
    fn test_format_empty_tree() {
        let tree = ElementTree::new();
        let output = ElementTreeDebug::new().format_all(&tree).unwrap();
        assert!(output.contains("0 total elements"));
        assert!(output.contains("(empty)"));
    }

    #[test]
    fn test_format_hierarchy() {
        let (tree, anchor) = sample_tree();
        let output = ElementTreeDebug::new().format_subtree(&tree, anchor).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("div#container"));
        assert!(lines[1].contains("div#main"));
        assert!(lines[2].contains("card"));
        assert!(lines[2].contains("(external)"));
        assert!(lines[2].contains("(edit)"));
        assert!(lines[3].contains("div#sidebar"));
    }

    #[test]
    fn test_format_minimal() {
        let (tree, anchor) = sample_tree();
        let debug = ElementTreeDebug::with_options(TreeFormatOptions::minimal());
        let output = debug.format_subtree(&tree, anchor).unwrap();

        assert!(output.contains("div#main"));
        assert!(!output.contains('['));
        assert!(!output.contains("(edit)"));
    }

    #[test]
    fn test_format_max_depth() {
        let (tree, anchor) = sample_tree();
        let debug = ElementTreeDebug::with_options(TreeFormatOptions {
            max_depth: Some(1),
            ..TreeFormatOptions::minimal()
        });
        let output = debug.format_subtree(&tree, anchor).unwrap();
        assert!(!output.contains("card"));
    }

    #[test]
    fn test_format_ascii_properties() {
        let (mut tree, anchor) = sample_tree();
        tree.set_property(anchor, "rtl", false).unwrap();
        let debug = ElementTreeDebug::with_options(TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::detailed()
        });
        let output = debug.format_subtree(&tree, anchor).unwrap();

        assert!(output.contains("{rtl}"));
        assert!(output.contains("+-- "));
        assert!(output.contains("`-- "));
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }
}
