//! Unary operators for expression trees.

use serde::{Deserialize, Serialize};

/// Unary operators recognised by the construction protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Identity (+)
    Pos,
    /// Arithmetic negation (-)
    Neg,
    /// Bitwise inversion (~)
    Invert,
}

impl UnaryOp {
    /// Every unary operator, in declaration order.
    pub const ALL: [Self; 3] = [Self::Pos, Self::Neg, Self::Invert];

    /// Get the operator symbol for display.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Pos => "+",
            Self::Neg => "-",
            Self::Invert => "~",
        }
    }

    /// Binding priority; higher binds tighter.
    ///
    /// All unary operators bind between exponentiation and multiplication.
    pub const fn priority(self) -> u8 {
        match self {
            Self::Pos | Self::Neg | Self::Invert => 7,
        }
    }
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::BinaryOp;

    #[test]
    fn test_symbols() {
        assert_eq!(UnaryOp::Pos.symbol(), "+");
        assert_eq!(UnaryOp::Neg.symbol(), "-");
        assert_eq!(UnaryOp::Invert.to_string(), "~");
    }

    #[test]
    fn test_priority_between_pow_and_mul() {
        for op in UnaryOp::ALL {
            assert_eq!(op.priority(), 7);
            assert!(op.priority() < BinaryOp::Pow.priority());
            assert!(op.priority() > BinaryOp::Mul.priority());
        }
    }
}
