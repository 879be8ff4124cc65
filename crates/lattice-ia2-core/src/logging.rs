//! Logging and debugging facilities for accessible trees.
//!
//! Tree mutations are traced under the targets in [`targets`]. To see them,
//! install a `tracing` subscriber in the host application.
//!
//! [`TreeDebug`] renders any provider subtree as text, walking it only
//! through the [`AccessibleNode`] interface:
//!
//! ```
//! use lattice_ia2_core::{AccessibleTree, NodeSpec};
//! use lattice_ia2_core::logging::TreeDebug;
//! use accesskit::Role;
//!
//! let tree = AccessibleTree::new();
//! let window = tree.add_node(None, NodeSpec::new(Role::Window)).unwrap();
//! tree.add_node(Some(window), NodeSpec::new(Role::Button)).unwrap();
//!
//! let dump = TreeDebug::new().format(&*tree.handle(window).unwrap());
//! assert!(dump.contains("Button"));
//! ```

use std::fmt::Write as FmtWrite;

use crate::node::{AccessibleNode, Facet};

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "lattice_ia2_core";
    /// In-memory tree mutations.
    pub const TREE: &str = "lattice_ia2_core::tree";
    /// Grid installation.
    pub const GRID: &str = "lattice_ia2_core::grid";
    /// Built-in facet activity.
    pub const FACETS: &str = "lattice_ia2_core::facets";
}

/// Style of tree connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Renders a subtree of accessible nodes as indented text.
#[derive(Debug, Clone, Default)]
pub struct TreeDebug {
    style: TreeStyle,
    show_rects: bool,
    max_depth: Option<usize>,
}

impl TreeDebug {
    /// A renderer with Unicode connectors and no depth limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given connector style.
    pub fn style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Include each node's screen rectangle.
    pub fn show_rects(mut self) -> Self {
        self.show_rects = true;
        self
    }

    /// Stop descending below `depth`.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Format the subtree rooted at `root`.
    pub fn format(&self, root: &dyn AccessibleNode) -> String {
        let mut output = String::new();
        self.format_into(root, 0, true, &mut output);
        output
    }

    fn format_into(&self, node: &dyn AccessibleNode, depth: usize, is_last: bool, output: &mut String) {
        if self.max_depth.is_some_and(|max| depth > max) {
            return;
        }
        output.push_str(&self.prefix(depth, is_last));

        if !node.is_valid() {
            output.push_str("(defunct)\n");
            return;
        }
        let _ = write!(output, "{:?}", node.role());
        if self.show_rects {
            let rect = node.rect();
            let _ = write!(
                output,
                " @({}, {}) {}x{}",
                rect.origin.x,
                rect.origin.y,
                rect.width(),
                rect.height()
            );
        }
        let facets: Vec<&str> = Facet::ALL
            .into_iter()
            .filter(|&facet| node.capability(facet).is_some())
            .map(Facet::name)
            .collect();
        if !facets.is_empty() {
            let _ = write!(output, " [{}]", facets.join(", "));
        }
        output.push('\n');

        let count = node.child_count();
        for index in 0..count {
            if let Some(child) = node.child(index) {
                self.format_into(&*child, depth + 1, index + 1 == count, output);
            }
        }
    }

    fn prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }
        let (branch, tee, corner) = match self.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
        };
        let mut prefix = String::new();
        for _ in 0..depth - 1 {
            prefix.push_str(branch);
            prefix.push_str("  ");
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use accesskit::Role;

    use super::*;
    use crate::facets::RangeValue;
    use crate::geometry::Rect;
    use crate::node::Capability;
    use crate::tree::{AccessibleTree, NodeSpec};

    #[test]
    fn test_format_ascii_tree() {
        let tree = AccessibleTree::new();
        let window = tree.add_node(None, NodeSpec::new(Role::Window)).unwrap();
        tree.add_node(Some(window), NodeSpec::new(Role::Button)).unwrap();
        let slider = tree
            .add_node(Some(window), NodeSpec::new(Role::Slider).rect(Rect::new(1, 2, 30, 4)))
            .unwrap();
        tree.set_capability(slider, Capability::Value(Arc::new(RangeValue::new(1.0, 0.0, 5.0))))
            .unwrap();

        let dump = TreeDebug::new()
            .style(TreeStyle::Ascii)
            .show_rects()
            .format(&*tree.handle(window).unwrap());
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Window"));
        assert!(lines[1].starts_with("+-- Button"));
        assert_eq!(lines[2], "`-- Slider @(1, 2) 30x4 [value]");
        assert_eq!(tree.live_handles(), 0);
    }

    #[test]
    fn test_max_depth() {
        let tree = AccessibleTree::new();
        let window = tree.add_node(None, NodeSpec::new(Role::Window)).unwrap();
        let group = tree.add_node(Some(window), NodeSpec::new(Role::Group)).unwrap();
        tree.add_node(Some(group), NodeSpec::new(Role::Button)).unwrap();

        let dump = TreeDebug::new().max_depth(1).format(&*tree.handle(window).unwrap());
        assert_eq!(dump.lines().count(), 2);
    }
}
