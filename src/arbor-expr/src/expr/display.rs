//! Debug rendering for expression trees.
//!
//! Two forms are provided: the compact inline `Display` string used in
//! diagnostics and tests, and the multi-line `explain` tree dump.
//!
//! Inline rendering never inserts parentheses, whatever the relative
//! operator priorities; the string is a trace of construction order, not
//! re-parseable syntax. Node kinds without a symbolic rule render in
//! their structural `Debug` form.

use std::fmt;

use common_display::{truncate_string, DisplayTree, TreeNode};

use super::node::{CallArg, ExprNode, SliceSpec};
use super::typed::Expr;

fn bound(b: Option<i64>) -> String {
    b.map(|v| v.to_string()).unwrap_or_default()
}

impl fmt::Display for SliceSpec {
    /// `:` when all bounds are absent; `start:stop` while no step is
    /// present; a step forces all three positions, absent bounds render
    /// empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.stop, self.step) {
            (None, None, None) => write!(f, ":"),
            (start, stop, None) => write!(f, "{}:{}", bound(start), bound(stop)),
            (start, stop, Some(step)) => {
                write!(f, "{}:{}:{}", bound(start), bound(stop), step)
            }
        }
    }
}

impl fmt::Display for CallArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Expr(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(v) => write!(f, "{v}"),
            Self::Variable { name, ty: None } => write!(f, "<{name}>"),
            Self::Variable { name, ty: Some(ty) } => write!(f, "<{name} of type {ty}>"),
            Self::Unary { op, expr } => write!(f, "{op}{expr}"),
            Self::Binary { left, op, right } => write!(f, "{left} {op} {right}"),
            Self::GetItem { sequence, index } => write!(f, "{sequence}[{index}]"),
            Self::GetSlice { sequence, slice } => write!(f, "{sequence}[{slice}]"),
            Self::Call { func, args, kwargs } => {
                let mut parts: Vec<String> = args.iter().map(ToString::to_string).collect();
                parts.extend(kwargs.iter().map(|(name, value)| format!("{name}={value}")));
                write!(f, "{func}({})", parts.join(", "))
            }
            // No symbolic rule for the remaining kinds; fall back to the
            // structural form.
            other => write!(f, "{other:?}"),
        }
    }
}

impl<T> fmt::Display for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node())
    }
}

impl TreeNode for ExprNode {
    fn label(&self) -> String {
        match self {
            Self::Const(v) => format!("Const({})", truncate_string(&v.to_string(), 40)),
            Self::Variable { name, ty: None } => format!("Variable({name})"),
            Self::Variable { name, ty: Some(ty) } => format!("Variable({name}: {ty})"),
            Self::Function(fr) => format!("Function({})", fr.name),
            Self::Cast { target, .. } => format!("Cast({target})"),
            Self::Unary { op, .. } => format!("Unary({op})"),
            Self::Round { precision, .. } => format!("Round(precision={precision})"),
            Self::Binary { op, .. } => format!("Binary({op})"),
            Self::GetSlice { slice, .. } => format!("GetSlice({slice})"),
            Self::GetAttr { name, .. } => format!("GetAttr({name})"),
            Self::Call { args, kwargs, .. } => {
                format!("Call({} args, {} kwargs)", args.len(), kwargs.len())
            }
            Self::Abs { .. }
            | Self::Trunc { .. }
            | Self::Divmod { .. }
            | Self::ReverseDivmod { .. }
            | Self::GetItem { .. } => self.kind_name().to_string(),
        }
    }

    fn tree_children(&self) -> Vec<&dyn TreeNode> {
        self.children()
            .into_iter()
            .map(|c| c as &dyn TreeNode)
            .collect()
    }
}

impl ExprNode {
    /// Multi-line tree dump for debugging deep expressions.
    pub fn explain(&self) -> String {
        DisplayTree::new(self).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::super::node::arg;
    use super::super::typed::{func, lit, typed_var, var};
    use super::*;

    #[test]
    fn test_render_constants_and_variables() {
        assert_eq!(lit(5i64).to_string(), "5");
        assert_eq!(lit("name").to_string(), "\"name\"");
        assert_eq!(var("x").to_string(), "<x>");
        assert_eq!(typed_var::<i64>("x").to_string(), "<x of type Int64>");
    }

    #[test]
    fn test_render_unary_no_space() {
        assert_eq!((-var("x")).to_string(), "-<x>");
        assert_eq!(var("x").invert().to_string(), "~<x>");
        assert_eq!(var("x").pos().to_string(), "+<x>");
    }

    #[test]
    fn test_render_binary_without_parentheses() {
        // Construction order is not recoverable from the string.
        let expr = (var("x") + 1i64) * var("y");
        assert_eq!(expr.to_string(), "<x> + 1 * <y>");
    }

    #[test]
    fn test_render_reverse_orientation() {
        assert_eq!(var("a").rsub(5i64).to_string(), "5 - <a>");
        assert_eq!((5i64 - var("a")).to_string(), "5 - <a>");
    }

    #[test]
    fn test_render_comparison_chain() {
        let expr = var("age").ge(21i64) & var("active").eq(true);
        assert_eq!(expr.to_string(), "<age> >= 21 & <active> == true");
    }

    #[test]
    fn test_render_get_item() {
        assert_eq!(var("xs").get(0i64).to_string(), "<xs>[0]");
        assert_eq!(var("m").get("key").to_string(), "<m>[\"key\"]");
    }

    #[test]
    fn test_render_slices() {
        assert_eq!(var("xs").slice(1..3).to_string(), "<xs>[1:3]");
        assert_eq!(var("xs").slice(2..).to_string(), "<xs>[2:]");
        assert_eq!(var("xs").slice(..5).to_string(), "<xs>[:5]");
        assert_eq!(var("xs").slice(..).to_string(), "<xs>[:]");
        // A step forces all three positions.
        assert_eq!(
            var("xs").slice(SliceSpec::full().with_step(2)).to_string(),
            "<xs>[::2]"
        );
        assert_eq!(
            var("xs")
                .slice(SliceSpec::new(Some(1), None, Some(2)))
                .to_string(),
            "<xs>[1::2]"
        );
    }

    #[test]
    fn test_render_call() {
        let f = ExprNode::function("f");
        let expected = format!("{f}(1, 2, k=3)");

        let call = func::<f64>("f").call_with([arg(1i64), arg(2i64)], [("k", arg(3i64))]);
        assert_eq!(call.to_string(), expected);
    }

    #[test]
    fn test_render_call_no_args() {
        let f = ExprNode::function("f");
        assert_eq!(func::<f64>("f").call([]).to_string(), format!("{f}()"));
    }

    #[test]
    fn test_render_call_kwargs_only() {
        let f = ExprNode::function("f");
        let call = func::<f64>("f").call_with([], [("a", arg(1i64)), ("b", arg(2i64))]);
        assert_eq!(call.to_string(), format!("{f}(a=1, b=2)"));
    }

    #[test]
    fn test_structural_fallback_kinds() {
        // Kinds without a symbolic rule render their Debug form.
        let node = ExprNode::abs(ExprNode::variable("x"));
        assert_eq!(node.to_string(), format!("{node:?}"));

        let node = ExprNode::get_attr(ExprNode::variable("x"), "field").unwrap();
        assert_eq!(node.to_string(), format!("{node:?}"));
    }

    #[test]
    fn test_explain_tree_dump() {
        let expr = (var("x") + 1i64) * var("y");
        let dump = expr.node().explain();

        assert!(dump.starts_with("Binary(*)"));
        assert!(dump.contains("├─ Binary(+)"));
        assert!(dump.contains("│  ├─ Variable(x)"));
        assert!(dump.contains("│  └─ Const(1)"));
        assert!(dump.contains("└─ Variable(y)"));
    }
}
