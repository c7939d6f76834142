//! Expression trees and their construction protocol.

mod binary;
mod display;
mod node;
mod ops;
pub mod support;
mod typed;
mod unary;

pub use binary::BinaryOp;
pub use node::{arg, CallArg, ExprNode, FuncRef, SliceSpec};
pub use support::Dynamic;
pub use typed::{cast, func, lit, typed_var, var, Expr, Func, IntoExpr};
pub use unary::UnaryOp;
