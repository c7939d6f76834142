//! Tree display for recursive structures.

use std::fmt;

/// A node that can be rendered as part of a display tree.
pub trait TreeNode {
    /// One-line label summarizing this node.
    fn label(&self) -> String;

    /// Child nodes, in display order.
    fn tree_children(&self) -> Vec<&dyn TreeNode>;
}

/// Helper for displaying tree structures with box-drawing connectors.
pub struct DisplayTree<'a> {
    root: &'a dyn TreeNode,
}

impl<'a> DisplayTree<'a> {
    /// Create a new display tree rooted at `root`.
    pub fn new(root: &'a dyn TreeNode) -> Self {
        Self { root }
    }

    fn fmt_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: &dyn TreeNode,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let connector = if is_last { "└─ " } else { "├─ " };
        writeln!(f, "{prefix}{connector}{}", node.label())?;

        let children = node.tree_children();
        let child_prefix = format!("{prefix}{}", if is_last { "   " } else { "│  " });

        for (i, child) in children.iter().enumerate() {
            self.fmt_node(f, *child, &child_prefix, i == children.len() - 1)?;
        }

        Ok(())
    }
}

impl fmt::Display for DisplayTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.root.label())?;

        let children = self.root.tree_children();
        for (i, child) in children.iter().enumerate() {
            self.fmt_node(f, *child, "", i == children.len() - 1)?;
        }

        Ok(())
    }
}
