//! Binding powers for the Pratt expression parser.
//!
//! From loosest to tightest: `OR`, `AND`, prefix `NOT`, comparisons
//! (including `LIKE`, `NOT LIKE` and the `IS [NOT] NULL` postfix), additive,
//! multiplicative, prefix minus.

use crate::ast::{BinaryOperator, UnaryOperator};
use crate::lexer::{Keyword, TokenKind};

/// Binding power of prefix `NOT`. Its operand may contain comparisons but not
/// `AND`/`OR`.
pub const NOT_BINDING_POWER: u8 = 5;

/// Binding power of prefix `-`. Its operand is a single primary expression or
/// another prefix minus.
pub const NEG_BINDING_POWER: u8 = 13;

/// Left binding power of the comparison operators.
pub const COMPARISON_BINDING_POWER: u8 = 7;

/// Returns the prefix binding power for a token.
///
/// Returns `None` if the token is not a prefix operator.
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Keyword(Keyword::Not) => Some(NOT_BINDING_POWER),
        TokenKind::Minus => Some(NEG_BINDING_POWER),
        _ => None,
    }
}

/// Returns the infix binding power for a token as `(left_bp, right_bp)`.
///
/// All operators are left associative (`left_bp < right_bp`). `IS` and the
/// `NOT` of `NOT LIKE` are included so the caller can handle them at
/// comparison precedence.
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq
        | TokenKind::Keyword(Keyword::Like | Keyword::Not | Keyword::Is) => {
            Some((COMPARISON_BINDING_POWER, COMPARISON_BINDING_POWER + 1))
        }

        TokenKind::Plus | TokenKind::Minus => Some((9, 10)),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((11, 12)),

        _ => None,
    }
}

/// Converts a token to a binary operator.
///
/// `NOT` and `IS` return `None`: they need the following token to decide.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOperator::Or),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOperator::And),
        TokenKind::Keyword(Keyword::Like) => Some(BinaryOperator::Like),
        TokenKind::Eq => Some(BinaryOperator::Eq),
        TokenKind::NotEq => Some(BinaryOperator::NotEq),
        TokenKind::GtEq => Some(BinaryOperator::GtEq),
        TokenKind::Gt => Some(BinaryOperator::Gt),
        TokenKind::Lt => Some(BinaryOperator::Lt),
        TokenKind::LtEq => Some(BinaryOperator::LtEq),
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        _ => None,
    }
}

/// Converts a token to a prefix unary operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOperator> {
    match kind {
        TokenKind::Minus => Some(UnaryOperator::Neg),
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOperator::Not),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left(kind: TokenKind) -> u8 {
        infix_binding_power(&kind).unwrap().0
    }

    #[test]
    fn test_precedence_ordering() {
        let or = left(TokenKind::Keyword(Keyword::Or));
        let and = left(TokenKind::Keyword(Keyword::And));
        let eq = left(TokenKind::Eq);
        let add = left(TokenKind::Plus);
        let mul = left(TokenKind::Star);

        assert!(or < and);
        assert!(and < NOT_BINDING_POWER);
        assert!(NOT_BINDING_POWER < eq);
        assert!(eq < add);
        assert!(add < mul);
        assert!(mul < NEG_BINDING_POWER);
    }

    #[test]
    fn test_left_associativity() {
        for kind in [
            TokenKind::Keyword(Keyword::Or),
            TokenKind::Keyword(Keyword::And),
            TokenKind::Lt,
            TokenKind::Minus,
            TokenKind::Slash,
        ] {
            let (l, r) = infix_binding_power(&kind).unwrap();
            assert!(l < r, "{kind:?} should be left associative");
        }
    }

    #[test]
    fn test_comparison_keywords_share_precedence() {
        let eq = infix_binding_power(&TokenKind::Eq);
        assert_eq!(infix_binding_power(&TokenKind::Keyword(Keyword::Like)), eq);
        assert_eq!(infix_binding_power(&TokenKind::Keyword(Keyword::Not)), eq);
        assert_eq!(infix_binding_power(&TokenKind::Keyword(Keyword::Is)), eq);
    }

    #[test]
    fn test_operator_mapping() {
        assert_eq!(
            token_to_binary_op(&TokenKind::Percent),
            Some(BinaryOperator::Mod)
        );
        assert_eq!(token_to_binary_op(&TokenKind::Keyword(Keyword::Not)), None);
        assert_eq!(token_to_binary_op(&TokenKind::Comma), None);
        assert_eq!(
            token_to_unary_op(&TokenKind::Minus),
            Some(UnaryOperator::Neg)
        );
        assert_eq!(prefix_binding_power(&TokenKind::Plus), None);
    }
}
