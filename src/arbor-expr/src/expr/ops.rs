//! Operator-overload surface.
//!
//! Infix syntax is sugar over the same constructions as the named
//! methods: `a + b`, `a / 2`, `-a`, `5 - a` and friends all allocate the
//! identical nodes. Operators Rust has no token for (`**`, `@`, `//`,
//! comparisons) exist only as named methods. `!` stands in for `~`.

use super::node::ExprNode;
use super::support::{
    SupportsAdd, SupportsBitAnd, SupportsBitOr, SupportsBitXor, SupportsInvert, SupportsMod,
    SupportsMul, SupportsNeg, SupportsReverseAdd, SupportsReverseBitAnd, SupportsReverseBitOr,
    SupportsReverseBitXor, SupportsReverseMod, SupportsReverseMul, SupportsReverseShl,
    SupportsReverseShr, SupportsReverseSub, SupportsReverseTrueDiv, SupportsShl, SupportsShr,
    SupportsSub, SupportsTrueDiv,
};
use super::typed::{Expr, IntoExpr};
use super::{BinaryOp, UnaryOp};

macro_rules! impl_forward_binop {
    ($( $OpTrait:ident :: $method:ident => $cap:ident, $tag:ident; )+) => { $(
        impl<T, R> std::ops::$OpTrait<R> for Expr<T>
        where
            R: IntoExpr,
            T: $cap<R::Elem>,
        {
            type Output = Expr<<T as $cap<R::Elem>>::Output>;

            fn $method(self, rhs: R) -> Self::Output {
                Expr::from_node(ExprNode::binary(
                    self.into_node(),
                    BinaryOp::$tag,
                    rhs.into_expr().into_node(),
                ))
            }
        }
    )+ };
}

impl_forward_binop! {
    Add::add => SupportsAdd, Add;
    Sub::sub => SupportsSub, Sub;
    Mul::mul => SupportsMul, Mul;
    Div::div => SupportsTrueDiv, TrueDiv;
    Rem::rem => SupportsMod, Mod;
    BitAnd::bitand => SupportsBitAnd, BitAnd;
    BitOr::bitor => SupportsBitOr, BitOr;
    BitXor::bitxor => SupportsBitXor, BitXor;
    Shl::shl => SupportsShl, Shl;
    Shr::shr => SupportsShr, Shr;
}

impl<T: SupportsNeg> std::ops::Neg for Expr<T> {
    type Output = Expr<T::Output>;

    fn neg(self) -> Self::Output {
        Expr::from_node(ExprNode::unary(UnaryOp::Neg, self.into_node()))
    }
}

impl<T: SupportsInvert> std::ops::Not for Expr<T> {
    type Output = Expr<T::Output>;

    fn not(self) -> Self::Output {
        self.invert()
    }
}

// Reverse impls put a raw scalar on the left of the expression. The
// lifted value becomes the left child under the same operator tag.

macro_rules! impl_reverse_binop {
    ($t:ty; $( $OpTrait:ident :: $method:ident => $cap:ident, $tag:ident; )+) => { $(
        impl<T> std::ops::$OpTrait<Expr<T>> for $t
        where
            T: $cap<$t>,
        {
            type Output = Expr<<T as $cap<$t>>::Output>;

            fn $method(self, rhs: Expr<T>) -> Self::Output {
                Expr::from_node(ExprNode::binary(
                    ExprNode::constant(self),
                    BinaryOp::$tag,
                    rhs.into_node(),
                ))
            }
        }
    )+ };
}

impl_reverse_binop! { i64;
    Add::add => SupportsReverseAdd, Add;
    Sub::sub => SupportsReverseSub, Sub;
    Mul::mul => SupportsReverseMul, Mul;
    Div::div => SupportsReverseTrueDiv, TrueDiv;
    Rem::rem => SupportsReverseMod, Mod;
    BitAnd::bitand => SupportsReverseBitAnd, BitAnd;
    BitOr::bitor => SupportsReverseBitOr, BitOr;
    BitXor::bitxor => SupportsReverseBitXor, BitXor;
    Shl::shl => SupportsReverseShl, Shl;
    Shr::shr => SupportsReverseShr, Shr;
}

impl_reverse_binop! { f64;
    Add::add => SupportsReverseAdd, Add;
    Sub::sub => SupportsReverseSub, Sub;
    Mul::mul => SupportsReverseMul, Mul;
    Div::div => SupportsReverseTrueDiv, TrueDiv;
    Rem::rem => SupportsReverseMod, Mod;
}

impl_reverse_binop! { bool;
    BitAnd::bitand => SupportsReverseBitAnd, BitAnd;
    BitOr::bitor => SupportsReverseBitOr, BitOr;
    BitXor::bitxor => SupportsReverseBitXor, BitXor;
}

impl<T> std::ops::Add<Expr<T>> for String
where
    T: SupportsReverseAdd<String>,
{
    type Output = Expr<<T as SupportsReverseAdd<String>>::Output>;

    fn add(self, rhs: Expr<T>) -> Self::Output {
        Expr::from_node(ExprNode::binary(
            ExprNode::constant(self),
            BinaryOp::Add,
            rhs.into_node(),
        ))
    }
}

impl<T> std::ops::Add<Expr<T>> for &str
where
    T: SupportsReverseAdd<String>,
{
    type Output = Expr<<T as SupportsReverseAdd<String>>::Output>;

    fn add(self, rhs: Expr<T>) -> Self::Output {
        Expr::from_node(ExprNode::binary(
            ExprNode::constant(self),
            BinaryOp::Add,
            rhs.into_node(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::typed::{typed_var, var};
    use super::*;
    use arbor_core::Value;

    #[test]
    fn test_infix_matches_named_construction() {
        let infix = (typed_var::<i64>("a") + 1i64).into_node();
        let named = typed_var::<i64>("a").add(1i64).into_node();
        assert_eq!(infix, named);
    }

    #[test]
    fn test_infix_division_and_shift() {
        let node = (typed_var::<i64>("a") / 2i64).into_node();
        assert!(matches!(
            node,
            ExprNode::Binary {
                op: BinaryOp::TrueDiv,
                ..
            }
        ));

        let node = (typed_var::<i64>("a") << 3i64).into_node();
        assert!(matches!(
            node,
            ExprNode::Binary {
                op: BinaryOp::Shl,
                ..
            }
        ));
    }

    #[test]
    fn test_unary_operators() {
        let node = (-typed_var::<i64>("a")).into_node();
        assert!(matches!(
            node,
            ExprNode::Unary {
                op: super::super::UnaryOp::Neg,
                ..
            }
        ));

        let node = (!typed_var::<i64>("a")).into_node();
        assert!(matches!(
            node,
            ExprNode::Unary {
                op: super::super::UnaryOp::Invert,
                ..
            }
        ));
    }

    #[test]
    fn test_scalar_left_operand() {
        let node = (5i64 - typed_var::<i64>("a")).into_node();
        if let ExprNode::Binary { left, op, right } = node {
            assert_eq!(op, BinaryOp::Sub);
            assert_eq!(*left, ExprNode::Const(Value::Int64(5)));
            assert!(matches!(*right, ExprNode::Variable { .. }));
        } else {
            unreachable!();
        }
    }

    #[test]
    fn test_scalar_left_operand_on_dynamic() {
        let node = (2.0f64 * var("x")).into_node();
        assert!(matches!(
            node,
            ExprNode::Binary {
                op: BinaryOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn test_mixed_chain() {
        let expr = (var("x") + 1i64) & var("mask");
        assert_eq!(expr.node().node_count(), 5);
    }
}
