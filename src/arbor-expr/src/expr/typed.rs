//! Typed construction protocol.
//!
//! `Expr<T>` wraps an `ExprNode` with a phantom result element type so the
//! capability contracts can gate which constructions are well-typed. The
//! phantom has no runtime payload; stripping it with `into_node` yields the
//! tree handed to the external translator.
//!
//! Construction is stateless: every operation is a pure function from
//! existing subtrees and a new operand to a fresh node.

use std::marker::PhantomData;

use arbor_core::StaticType;
use common_error::ArborResult;
use indexmap::IndexMap;

use super::node::{CallArg, ExprNode, SliceSpec};
use super::support::{
    Dynamic, Indexable, Sliceable, SupportsAbs, SupportsAdd, SupportsBitAnd, SupportsBitOr,
    SupportsBitXor, SupportsDivmod, SupportsEq, SupportsFloorDiv, SupportsGe, SupportsGt,
    SupportsInvert, SupportsLe, SupportsLt, SupportsMatmul, SupportsMod, SupportsMul, SupportsNe,
    SupportsNeg, SupportsPos, SupportsPow, SupportsReverseAdd, SupportsReverseBitAnd,
    SupportsReverseBitOr, SupportsReverseBitXor, SupportsReverseDivmod, SupportsReverseFloorDiv,
    SupportsReverseMatmul, SupportsReverseMod, SupportsReverseMul, SupportsReversePow,
    SupportsReverseShl, SupportsReverseShr, SupportsReverseSub, SupportsReverseTrueDiv,
    SupportsRound, SupportsShl, SupportsShr, SupportsSub, SupportsTrueDiv, SupportsTrunc,
};
use super::{BinaryOp, UnaryOp};

/// A typed expression.
///
/// The parameter is the element type the expression evaluates to in the
/// translated representation; it exists only at compile time.
pub struct Expr<T> {
    node: ExprNode,
    _elem: PhantomData<T>,
}

// Manual impls: the phantom parameter must not pick up trait bounds.

impl<T> Clone for Expr<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            _elem: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.node, f)
    }
}

/// Conversion into a typed expression.
///
/// This is the lifting seam of the construction protocol: existing
/// expressions pass through unchanged, raw values are wrapped in exactly
/// one `Const` node.
pub trait IntoExpr {
    /// Element type of the resulting expression.
    type Elem;

    /// Convert into an expression, wrapping raw values once.
    fn into_expr(self) -> Expr<Self::Elem>;
}

impl<T> IntoExpr for Expr<T> {
    type Elem = T;

    fn into_expr(self) -> Expr<T> {
        self
    }
}

macro_rules! impl_into_expr_raw {
    ($( $t:ty => $elem:ty ),+ $(,)?) => { $(
        impl IntoExpr for $t {
            type Elem = $elem;

            fn into_expr(self) -> Expr<$elem> {
                Expr::from_node(ExprNode::constant(self))
            }
        }
    )+ };
}

impl_into_expr_raw!(
    i64 => i64,
    i32 => i64,
    f64 => f64,
    f32 => f64,
    bool => bool,
    String => String,
    Vec<i64> => Vec<i64>,
    Vec<f64> => Vec<f64>,
);

impl IntoExpr for &str {
    type Elem = String;

    fn into_expr(self) -> Expr<String> {
        Expr::from_node(ExprNode::constant(self))
    }
}

/// Marker element type for function literals returning `R`.
pub struct Func<R>(PhantomData<R>);

/// Create an untyped variable.
pub fn var(name: impl Into<String>) -> Expr<Dynamic> {
    Expr::from_node(ExprNode::variable(name))
}

/// Create a variable with a declared type annotation.
pub fn typed_var<T: StaticType>(name: impl Into<String>) -> Expr<T> {
    Expr::from_node(ExprNode::typed_variable(name, T::data_type()))
}

/// Lift a value or expression into an expression.
pub fn lit<V: IntoExpr>(value: V) -> Expr<V::Elem> {
    value.into_expr()
}

/// Create a function literal returning elements of type `R`.
pub fn func<R>(name: impl Into<String>) -> Expr<Func<R>> {
    Expr::from_node(ExprNode::function(name))
}

/// Annotate an expression with a target type.
///
/// Purely an annotation for the translator; no conversion is implied.
pub fn cast<U: StaticType, T>(expr: Expr<T>) -> Expr<U> {
    Expr::from_node(ExprNode::cast(expr.into_node(), U::data_type()))
}

impl<T> Expr<T> {
    pub(crate) fn from_node(node: ExprNode) -> Self {
        Self {
            node,
            _elem: PhantomData,
        }
    }

    /// Borrow the underlying tree node.
    pub fn node(&self) -> &ExprNode {
        &self.node
    }

    /// Strip the phantom type, yielding the tree for the translator.
    pub fn into_node(self) -> ExprNode {
        self.node
    }

    fn forward<R: IntoExpr, O>(self, op: BinaryOp, rhs: R) -> Expr<O> {
        Expr::from_node(ExprNode::binary(
            self.node,
            op,
            rhs.into_expr().into_node(),
        ))
    }

    fn reverse<L: IntoExpr, O>(self, op: BinaryOp, lhs: L) -> Expr<O> {
        Expr::from_node(ExprNode::binary(
            lhs.into_expr().into_node(),
            op,
            self.node,
        ))
    }

    // Forward binary constructions. Raw right operands are lifted to
    // `Const`; existing expressions are attached as-is.

    /// Addition.
    pub fn add<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsAdd<R::Elem>,
    {
        self.forward(BinaryOp::Add, rhs)
    }

    /// Subtraction.
    pub fn sub<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsSub<R::Elem>,
    {
        self.forward(BinaryOp::Sub, rhs)
    }

    /// Multiplication.
    pub fn mul<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsMul<R::Elem>,
    {
        self.forward(BinaryOp::Mul, rhs)
    }

    /// Exponentiation.
    pub fn pow<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsPow<R::Elem>,
    {
        self.forward(BinaryOp::Pow, rhs)
    }

    /// Matrix multiplication.
    pub fn matmul<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsMatmul<R::Elem>,
    {
        self.forward(BinaryOp::Matmul, rhs)
    }

    /// True division.
    pub fn div<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsTrueDiv<R::Elem>,
    {
        self.forward(BinaryOp::TrueDiv, rhs)
    }

    /// Floor division.
    pub fn floordiv<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsFloorDiv<R::Elem>,
    {
        self.forward(BinaryOp::FloorDiv, rhs)
    }

    /// Modulo.
    pub fn rem<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsMod<R::Elem>,
    {
        self.forward(BinaryOp::Mod, rhs)
    }

    /// Bitwise AND.
    pub fn bitand<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsBitAnd<R::Elem>,
    {
        self.forward(BinaryOp::BitAnd, rhs)
    }

    /// Bitwise OR.
    pub fn bitor<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsBitOr<R::Elem>,
    {
        self.forward(BinaryOp::BitOr, rhs)
    }

    /// Bitwise XOR.
    pub fn bitxor<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsBitXor<R::Elem>,
    {
        self.forward(BinaryOp::BitXor, rhs)
    }

    /// Left shift.
    pub fn shl<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsShl<R::Elem>,
    {
        self.forward(BinaryOp::Shl, rhs)
    }

    /// Right shift.
    pub fn shr<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsShr<R::Elem>,
    {
        self.forward(BinaryOp::Shr, rhs)
    }

    // Comparison constructions. These build nodes, never booleans.

    /// Equality comparison.
    pub fn eq<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsEq<R::Elem>,
    {
        self.forward(BinaryOp::Eq, rhs)
    }

    /// Inequality comparison.
    pub fn ne<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsNe<R::Elem>,
    {
        self.forward(BinaryOp::Ne, rhs)
    }

    /// Less-than comparison.
    pub fn lt<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsLt<R::Elem>,
    {
        self.forward(BinaryOp::Lt, rhs)
    }

    /// Less-or-equal comparison.
    pub fn le<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsLe<R::Elem>,
    {
        self.forward(BinaryOp::Le, rhs)
    }

    /// Greater-or-equal comparison.
    pub fn ge<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsGe<R::Elem>,
    {
        self.forward(BinaryOp::Ge, rhs)
    }

    /// Greater-than comparison.
    pub fn gt<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsGt<R::Elem>,
    {
        self.forward(BinaryOp::Gt, rhs)
    }

    // Reverse binary constructions: the raw value sits syntactically on
    // the left, so it is lifted and attached as the left child, under the
    // same operator tag.

    /// Addition with a raw left operand (`lhs + self`).
    pub fn radd<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReverseAdd<L::Elem>,
    {
        self.reverse(BinaryOp::Add, lhs)
    }

    /// Subtraction with a raw left operand (`lhs - self`).
    pub fn rsub<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReverseSub<L::Elem>,
    {
        self.reverse(BinaryOp::Sub, lhs)
    }

    /// Multiplication with a raw left operand (`lhs * self`).
    pub fn rmul<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReverseMul<L::Elem>,
    {
        self.reverse(BinaryOp::Mul, lhs)
    }

    /// Exponentiation with a raw left operand (`lhs ** self`).
    pub fn rpow<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReversePow<L::Elem>,
    {
        self.reverse(BinaryOp::Pow, lhs)
    }

    /// Matrix multiplication with a raw left operand (`lhs @ self`).
    pub fn rmatmul<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReverseMatmul<L::Elem>,
    {
        self.reverse(BinaryOp::Matmul, lhs)
    }

    /// True division with a raw left operand (`lhs / self`).
    pub fn rdiv<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReverseTrueDiv<L::Elem>,
    {
        self.reverse(BinaryOp::TrueDiv, lhs)
    }

    /// Floor division with a raw left operand (`lhs // self`).
    pub fn rfloordiv<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReverseFloorDiv<L::Elem>,
    {
        self.reverse(BinaryOp::FloorDiv, lhs)
    }

    /// Modulo with a raw left operand (`lhs % self`).
    pub fn rrem<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReverseMod<L::Elem>,
    {
        self.reverse(BinaryOp::Mod, lhs)
    }

    /// Bitwise AND with a raw left operand (`lhs & self`).
    pub fn rbitand<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReverseBitAnd<L::Elem>,
    {
        self.reverse(BinaryOp::BitAnd, lhs)
    }

    /// Bitwise OR with a raw left operand (`lhs | self`).
    pub fn rbitor<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReverseBitOr<L::Elem>,
    {
        self.reverse(BinaryOp::BitOr, lhs)
    }

    /// Bitwise XOR with a raw left operand (`lhs ^ self`).
    pub fn rbitxor<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReverseBitXor<L::Elem>,
    {
        self.reverse(BinaryOp::BitXor, lhs)
    }

    /// Left shift with a raw left operand (`lhs << self`).
    pub fn rshl<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReverseShl<L::Elem>,
    {
        self.reverse(BinaryOp::Shl, lhs)
    }

    /// Right shift with a raw left operand (`lhs >> self`).
    pub fn rshr<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReverseShr<L::Elem>,
    {
        self.reverse(BinaryOp::Shr, lhs)
    }

    // Unary and special constructions. Unary operations always receive an
    // existing expression; nothing is lifted.

    /// Unary identity (`+self`).
    pub fn pos(self) -> Expr<T::Output>
    where
        T: SupportsPos,
    {
        Expr::from_node(ExprNode::unary(UnaryOp::Pos, self.node))
    }

    /// Unary negation (`-self`).
    pub fn neg(self) -> Expr<T::Output>
    where
        T: SupportsNeg,
    {
        Expr::from_node(ExprNode::unary(UnaryOp::Neg, self.node))
    }

    /// Bitwise inversion (`~self`).
    pub fn invert(self) -> Expr<T::Output>
    where
        T: SupportsInvert,
    {
        Expr::from_node(ExprNode::unary(UnaryOp::Invert, self.node))
    }

    /// Absolute value.
    pub fn abs(self) -> Expr<T::Output>
    where
        T: SupportsAbs,
    {
        Expr::from_node(ExprNode::abs(self.node))
    }

    /// Round to `precision` digits.
    pub fn round(self, precision: i32) -> Expr<T::Output>
    where
        T: SupportsRound,
    {
        Expr::from_node(ExprNode::round(self.node, precision))
    }

    /// Truncate toward zero.
    pub fn trunc(self) -> Expr<T::Output>
    where
        T: SupportsTrunc,
    {
        Expr::from_node(ExprNode::trunc(self.node))
    }

    /// Quotient/remainder pair.
    pub fn divmod<R: IntoExpr>(self, rhs: R) -> Expr<T::Output>
    where
        T: SupportsDivmod<R::Elem>,
    {
        Expr::from_node(ExprNode::divmod(self.node, rhs.into_expr().into_node()))
    }

    /// Quotient/remainder pair with a raw left operand (`divmod(lhs, self)`).
    pub fn rdivmod<L: IntoExpr>(self, lhs: L) -> Expr<T::Output>
    where
        T: SupportsReverseDivmod<L::Elem>,
    {
        Expr::from_node(ExprNode::reverse_divmod(
            lhs.into_expr().into_node(),
            self.node,
        ))
    }

    // Access constructions.

    /// Index with a single key; raw keys are lifted to `Const`.
    pub fn get<I: IntoExpr>(self, index: I) -> Expr<T::Item>
    where
        T: Indexable<I::Elem>,
    {
        Expr::from_node(ExprNode::get_item(self.node, index.into_expr().into_node()))
    }

    /// Slice with independently optional bounds; bounds stay raw.
    pub fn slice(self, spec: impl Into<SliceSpec>) -> Expr<T::Item>
    where
        T: Sliceable,
    {
        Expr::from_node(ExprNode::get_slice(self.node, spec))
    }

    /// Access an attribute by name.
    ///
    /// This is the explicit substitute for member-access interception:
    /// any non-reserved name produces a `GetAttr` node, while names with
    /// the reserved `_` prefix fail with `ReservedAttribute` and must be
    /// resolved as ordinary members instead.
    pub fn attr(self, name: impl Into<String>) -> ArborResult<Expr<Dynamic>> {
        Ok(Expr::from_node(ExprNode::get_attr(self.node, name)?))
    }
}

impl<R> Expr<Func<R>> {
    /// Call with positional arguments only.
    pub fn call(self, args: impl IntoIterator<Item = CallArg>) -> Expr<R> {
        self.call_with(args, IndexMap::<String, CallArg>::new())
    }

    /// Call with positional and keyword arguments.
    ///
    /// Keyword insertion order is preserved in the node.
    pub fn call_with<K: Into<String>>(
        self,
        args: impl IntoIterator<Item = CallArg>,
        kwargs: impl IntoIterator<Item = (K, CallArg)>,
    ) -> Expr<R> {
        let args: Vec<CallArg> = args.into_iter().collect();
        let kwargs: IndexMap<String, CallArg> = kwargs
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        Expr::from_node(ExprNode::call(self.node, args, kwargs))
    }
}

impl<T> From<Expr<T>> for CallArg {
    fn from(expr: Expr<T>) -> Self {
        CallArg::Expr(expr.into_node())
    }
}
