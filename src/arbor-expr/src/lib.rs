//! Symbolic expression-tree builder.
//!
//! `arbor-expr` lets a caller write ordinary-looking arithmetic,
//! comparison, bitwise, indexing, attribute-access, and call syntax
//! against placeholder values and, instead of evaluating anything,
//! records an immutable tree describing the computation. The tree is
//! later handed to an external translator (a query compiler, for
//! example) that walks it and emits a target representation.
//!
//! # Overview
//!
//! - **Operator vocabulary**: [`UnaryOp`] and [`BinaryOp`] with stable
//!   symbols and a fixed priority table.
//! - **Capability contracts**: the [`expr::support`] traits state which
//!   element types participate in which operator; violations are compile
//!   errors, not runtime checks.
//! - **Node hierarchy**: [`ExprNode`] is the untyped tree a translator
//!   pattern-matches; it serializes to JSON for hand-off.
//! - **Construction protocol**: [`Expr`] is the phantom-typed facade;
//!   raw operands are lifted into `Const` leaves exactly once, and
//!   `std::ops` overloads mirror the named methods.
//! - **Renderer**: `Display` gives a compact debug string,
//!   [`ExprNode::explain`] a multi-line tree dump.
//!
//! # Example
//!
//! ```rust
//! use arbor_expr::{typed_var, var};
//!
//! // (age + 1 >= 21) & (name == "ada")
//! let age = typed_var::<i64>("age");
//! let filter = (age + 1i64).ge(21i64) & var("name").eq("ada");
//!
//! assert_eq!(
//!     filter.to_string(),
//!     "<age of type Int64> + 1 >= 21 & <name> == \"ada\""
//! );
//!
//! // Trees are data: hand the node to a translator.
//! let tree = filter.into_node();
//! assert_eq!(tree.node_count(), 9);
//! ```

pub mod expr;

// Re-export the construction surface at the crate root.
pub use expr::{
    arg, cast, func, lit, typed_var, var, BinaryOp, CallArg, Dynamic, Expr, ExprNode, Func,
    FuncRef, IntoExpr, SliceSpec, UnaryOp,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_shaped_expression() {
        let filter = (typed_var::<i64>("age") + 1i64).ge(21i64) & var("name").eq("ada");

        let tree = filter.into_node();
        assert!(tree.contains(|n| matches!(
            n,
            ExprNode::Binary {
                op: BinaryOp::Ge,
                ..
            }
        )));
        assert!(tree.contains(|n| matches!(n, ExprNode::Const(_))));
    }

    #[test]
    fn test_projection_shaped_expression() {
        let net = var("price") * var("quantity") - var("discount");
        assert_eq!(net.to_string(), "<price> * <quantity> - <discount>");
    }
}
