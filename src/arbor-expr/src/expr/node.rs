//! Expression tree nodes.
//!
//! `ExprNode` is the untyped tree the external translator pattern-matches.
//! Nodes are immutable once built; every constructor allocates a fresh node
//! referencing existing subtrees.

use arbor_core::{DataType, Value};
use common_error::{ensure, ArborResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{BinaryOp, UnaryOp};

/// Named reference to an external callable.
///
/// Callables themselves are opaque to this layer; the translator resolves
/// the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncRef {
    /// Function name.
    pub name: String,
}

impl FuncRef {
    /// Create a new function reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Slice bounds for a `GetSlice` node.
///
/// Each bound is independently optional. Bounds are carried raw, not as
/// child nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SliceSpec {
    /// Inclusive start bound.
    pub start: Option<i64>,
    /// Exclusive stop bound.
    pub stop: Option<i64>,
    /// Step between elements.
    pub step: Option<i64>,
}

impl SliceSpec {
    /// Create a slice spec from explicit bounds.
    pub const fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// The full slice `:` with all bounds absent.
    pub const fn full() -> Self {
        Self::new(None, None, None)
    }

    /// Return the same bounds with a step.
    pub const fn with_step(self, step: i64) -> Self {
        Self {
            start: self.start,
            stop: self.stop,
            step: Some(step),
        }
    }
}

impl From<(Option<i64>, Option<i64>, Option<i64>)> for SliceSpec {
    fn from((start, stop, step): (Option<i64>, Option<i64>, Option<i64>)) -> Self {
        Self::new(start, stop, step)
    }
}

impl From<std::ops::Range<i64>> for SliceSpec {
    fn from(r: std::ops::Range<i64>) -> Self {
        Self::new(Some(r.start), Some(r.end), None)
    }
}

impl From<std::ops::RangeFrom<i64>> for SliceSpec {
    fn from(r: std::ops::RangeFrom<i64>) -> Self {
        Self::new(Some(r.start), None, None)
    }
}

impl From<std::ops::RangeTo<i64>> for SliceSpec {
    fn from(r: std::ops::RangeTo<i64>) -> Self {
        Self::new(None, Some(r.end), None)
    }
}

impl From<std::ops::RangeFull> for SliceSpec {
    fn from(_: std::ops::RangeFull) -> Self {
        Self::full()
    }
}

/// Argument of a `Call` node.
///
/// Arguments are carried as opaque raw values unless the caller already
/// passed a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallArg {
    /// Raw value argument.
    Value(Value),
    /// Expression argument.
    Expr(ExprNode),
}

impl From<Value> for CallArg {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<ExprNode> for CallArg {
    fn from(node: ExprNode) -> Self {
        Self::Expr(node)
    }
}

/// Lift a raw value into a call argument.
pub fn arg(value: impl Into<Value>) -> CallArg {
    CallArg::Value(value.into())
}

/// An expression tree node.
///
/// Children are exclusively owned; reusing a subtree in two places means
/// cloning it. Comparison operators build nodes like every other operator;
/// the derived `PartialEq` is plain structural equality for tests and
/// deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprNode {
    /// A constant value.
    Const(Value),

    /// A named placeholder, optionally with a declared type.
    Variable {
        /// Variable name.
        name: String,
        /// Declared type annotation, if any.
        ty: Option<DataType>,
    },

    /// A function literal, used as the callee of a `Call`.
    Function(FuncRef),

    /// A type annotation; no conversion is implied.
    Cast {
        /// Annotated expression.
        expr: Box<ExprNode>,
        /// Target type.
        target: DataType,
    },

    /// A unary operation.
    Unary {
        /// Unary operator.
        op: UnaryOp,
        /// Operand.
        expr: Box<ExprNode>,
    },

    /// Absolute value.
    Abs {
        /// Operand.
        expr: Box<ExprNode>,
    },

    /// Rounding to a digit precision.
    Round {
        /// Operand.
        expr: Box<ExprNode>,
        /// Digits after the decimal point; may be negative.
        precision: i32,
    },

    /// Truncation toward zero.
    Trunc {
        /// Operand.
        expr: Box<ExprNode>,
    },

    /// A binary operation.
    Binary {
        /// Left operand.
        left: Box<ExprNode>,
        /// Binary operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<ExprNode>,
    },

    /// Quotient/remainder pair of `left` by `right`.
    Divmod {
        /// Dividend.
        left: Box<ExprNode>,
        /// Divisor.
        right: Box<ExprNode>,
    },

    /// `Divmod` built from a raw left operand (`divmod(value, expr)`).
    ReverseDivmod {
        /// Dividend.
        left: Box<ExprNode>,
        /// Divisor.
        right: Box<ExprNode>,
    },

    /// Indexing with a single key.
    GetItem {
        /// Sequence being indexed.
        sequence: Box<ExprNode>,
        /// Index key; raw keys are lifted to `Const` at construction.
        index: Box<ExprNode>,
    },

    /// Slicing with independently optional bounds.
    GetSlice {
        /// Sequence being sliced.
        sequence: Box<ExprNode>,
        /// Slice bounds.
        slice: SliceSpec,
    },

    /// Attribute access.
    GetAttr {
        /// Object whose attribute is accessed.
        object: Box<ExprNode>,
        /// Attribute name; never starts with the reserved `_` prefix.
        name: String,
    },

    /// A call of a function-valued expression.
    Call {
        /// Callee.
        func: Box<ExprNode>,
        /// Positional arguments, in order.
        args: Vec<CallArg>,
        /// Keyword arguments, insertion order preserved.
        kwargs: IndexMap<String, CallArg>,
    },
}

impl ExprNode {
    /// Create a constant node.
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Const(value.into())
    }

    /// Create an untyped variable node.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable {
            name: name.into(),
            ty: None,
        }
    }

    /// Create a variable node with a declared type.
    pub fn typed_variable(name: impl Into<String>, ty: DataType) -> Self {
        Self::Variable {
            name: name.into(),
            ty: Some(ty),
        }
    }

    /// Create a function literal node.
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(FuncRef::new(name))
    }

    /// Create a cast annotation node.
    pub fn cast(expr: Self, target: DataType) -> Self {
        Self::Cast {
            expr: Box::new(expr),
            target,
        }
    }

    /// Create a unary operation node.
    pub fn unary(op: UnaryOp, expr: Self) -> Self {
        Self::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    /// Create an absolute value node.
    pub fn abs(expr: Self) -> Self {
        Self::Abs {
            expr: Box::new(expr),
        }
    }

    /// Create a rounding node.
    pub fn round(expr: Self, precision: i32) -> Self {
        Self::Round {
            expr: Box::new(expr),
            precision,
        }
    }

    /// Create a truncation node.
    pub fn trunc(expr: Self) -> Self {
        Self::Trunc {
            expr: Box::new(expr),
        }
    }

    /// Create a binary operation node.
    pub fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a divmod node.
    pub fn divmod(left: Self, right: Self) -> Self {
        Self::Divmod {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a divmod node built from a raw left operand.
    pub fn reverse_divmod(left: Self, right: Self) -> Self {
        Self::ReverseDivmod {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create an indexing node.
    pub fn get_item(sequence: Self, index: Self) -> Self {
        Self::GetItem {
            sequence: Box::new(sequence),
            index: Box::new(index),
        }
    }

    /// Create a slicing node.
    pub fn get_slice(sequence: Self, slice: impl Into<SliceSpec>) -> Self {
        Self::GetSlice {
            sequence: Box::new(sequence),
            slice: slice.into(),
        }
    }

    /// Create an attribute access node.
    ///
    /// Names starting with `_` are reserved for the expression type's own
    /// members and fail with `ReservedAttribute`.
    pub fn get_attr(object: Self, name: impl Into<String>) -> ArborResult<Self> {
        let name = name.into();
        ensure!(!name.starts_with('_'), ReservedAttribute: "{name}");
        Ok(Self::GetAttr {
            object: Box::new(object),
            name,
        })
    }

    /// Create a call node.
    pub fn call(func: Self, args: Vec<CallArg>, kwargs: IndexMap<String, CallArg>) -> Self {
        Self::Call {
            func: Box::new(func),
            args,
            kwargs,
        }
    }

    /// Short name of this node's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Const(_) => "Const",
            Self::Variable { .. } => "Variable",
            Self::Function(_) => "Function",
            Self::Cast { .. } => "Cast",
            Self::Unary { .. } => "Unary",
            Self::Abs { .. } => "Abs",
            Self::Round { .. } => "Round",
            Self::Trunc { .. } => "Trunc",
            Self::Binary { .. } => "Binary",
            Self::Divmod { .. } => "Divmod",
            Self::ReverseDivmod { .. } => "ReverseDivmod",
            Self::GetItem { .. } => "GetItem",
            Self::GetSlice { .. } => "GetSlice",
            Self::GetAttr { .. } => "GetAttr",
            Self::Call { .. } => "Call",
        }
    }

    /// Child nodes, in operand order.
    ///
    /// Call arguments contribute a child only when they are expressions;
    /// raw argument values and slice bounds are not nodes.
    pub fn children(&self) -> Vec<&ExprNode> {
        match self {
            Self::Const(_) | Self::Variable { .. } | Self::Function(_) => vec![],
            Self::Cast { expr, .. }
            | Self::Unary { expr, .. }
            | Self::Abs { expr }
            | Self::Round { expr, .. }
            | Self::Trunc { expr } => vec![expr.as_ref()],
            Self::Binary { left, right, .. }
            | Self::Divmod { left, right }
            | Self::ReverseDivmod { left, right } => vec![left.as_ref(), right.as_ref()],
            Self::GetItem { sequence, index } => vec![sequence.as_ref(), index.as_ref()],
            Self::GetSlice { sequence, .. } => vec![sequence.as_ref()],
            Self::GetAttr { object, .. } => vec![object.as_ref()],
            Self::Call { func, args, kwargs } => {
                let mut children: Vec<&ExprNode> = vec![func.as_ref()];
                children.extend(args.iter().filter_map(|a| match a {
                    CallArg::Expr(e) => Some(e),
                    CallArg::Value(_) => None,
                }));
                children.extend(kwargs.values().filter_map(|a| match a {
                    CallArg::Expr(e) => Some(e),
                    CallArg::Value(_) => None,
                }));
                children
            }
        }
    }

    /// Check whether any node in the tree satisfies the predicate.
    pub fn contains<F: Fn(&ExprNode) -> bool>(&self, pred: F) -> bool {
        fn walk<F: Fn(&ExprNode) -> bool>(node: &ExprNode, pred: &F) -> bool {
            pred(node) || node.children().into_iter().any(|c| walk(c, pred))
        }
        walk(self, &pred)
    }

    /// Total number of nodes in the tree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(ExprNode::node_count)
            .sum::<usize>()
    }

    /// Serialize the tree to JSON, the hand-off format for translators.
    pub fn to_json(&self) -> ArborResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a tree from JSON.
    pub fn from_json(json: &str) -> ArborResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_lifts_value() {
        assert_eq!(ExprNode::constant(5i64), ExprNode::Const(Value::Int64(5)));
        assert_eq!(
            ExprNode::constant("s"),
            ExprNode::Const(Value::String("s".to_string()))
        );
    }

    #[test]
    fn test_binary_construction() {
        let node = ExprNode::binary(
            ExprNode::variable("x"),
            BinaryOp::Add,
            ExprNode::constant(1i64),
        );

        assert!(matches!(
            node,
            ExprNode::Binary {
                op: BinaryOp::Add,
                ..
            }
        ));
        assert_eq!(node.children().len(), 2);
    }

    #[test]
    fn test_get_attr_reserved_prefix() {
        let ok = ExprNode::get_attr(ExprNode::variable("x"), "field");
        assert!(ok.is_ok());

        let err = ExprNode::get_attr(ExprNode::variable("x"), "_internal").unwrap_err();
        assert_eq!(err.to_string(), "ReservedAttribute: _internal");
    }

    #[test]
    fn test_call_children_skip_raw_args() {
        let mut kwargs = IndexMap::new();
        kwargs.insert("k".to_string(), arg(3i64));
        kwargs.insert("e".to_string(), CallArg::from(ExprNode::variable("y")));

        let node = ExprNode::call(
            ExprNode::function("f"),
            vec![arg(1i64), CallArg::from(ExprNode::variable("x"))],
            kwargs,
        );

        // func + the two expression arguments
        assert_eq!(node.children().len(), 3);
    }

    #[test]
    fn test_kwargs_preserve_insertion_order() {
        let mut kwargs = IndexMap::new();
        kwargs.insert("z".to_string(), arg(1i64));
        kwargs.insert("a".to_string(), arg(2i64));

        let node = ExprNode::call(ExprNode::function("f"), vec![], kwargs);
        if let ExprNode::Call { kwargs, .. } = &node {
            let keys: Vec<_> = kwargs.keys().cloned().collect();
            assert_eq!(keys, vec!["z", "a"]);
        } else {
            unreachable!();
        }
    }

    #[test]
    fn test_contains_and_node_count() {
        let tree = ExprNode::binary(
            ExprNode::unary(UnaryOp::Neg, ExprNode::variable("x")),
            BinaryOp::Mul,
            ExprNode::constant(2i64),
        );

        assert_eq!(tree.node_count(), 4);
        assert!(tree.contains(|n| matches!(n, ExprNode::Variable { name, .. } if name == "x")));
        assert!(!tree.contains(|n| matches!(n, ExprNode::Call { .. })));
    }

    #[test]
    fn test_slice_spec_conversions() {
        assert_eq!(SliceSpec::from(1..3), SliceSpec::new(Some(1), Some(3), None));
        assert_eq!(SliceSpec::from(2..), SliceSpec::new(Some(2), None, None));
        assert_eq!(SliceSpec::from(..5), SliceSpec::new(None, Some(5), None));
        assert_eq!(SliceSpec::from(..), SliceSpec::full());
        assert_eq!(
            SliceSpec::full().with_step(2),
            SliceSpec::new(None, None, Some(2))
        );
    }

    #[test]
    fn test_json_round_trip() {
        let tree = ExprNode::binary(
            ExprNode::typed_variable("x", arbor_core::DataType::Int64),
            BinaryOp::Le,
            ExprNode::constant(10i64),
        );

        let json = tree.to_json().unwrap();
        let back = ExprNode::from_json(&json).unwrap();
        assert_eq!(tree, back);
    }
}
