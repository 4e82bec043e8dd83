//! Power-of-two token values.

use std::fmt;

/// A token: a positive power of two.
///
/// The constructor is the only way to build one, so every `Token` in the
/// system satisfies the power-of-two rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(u64);

impl Token {
    /// The smallest token.
    pub const ONE: Self = Self(1);

    /// Create a token, or `None` if `value` is zero or not a power of two.
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        if value.is_power_of_two() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The token formed by merging two of this token, or `None` on overflow.
    #[must_use]
    pub const fn doubled(self) -> Option<Self> {
        match self.0.checked_mul(2) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_powers_of_two() {
        for shift in 0..64 {
            assert_eq!(Token::new(1 << shift).map(Token::value), Some(1 << shift));
        }
    }

    #[test]
    fn test_new_rejects_others() {
        assert!(Token::new(0).is_none());
        assert!(Token::new(3).is_none());
        assert!(Token::new(12).is_none());
    }

    #[test]
    fn test_doubled() {
        assert_eq!(Token::ONE.doubled(), Token::new(2));
        assert!(Token::new(1 << 63).unwrap().doubled().is_none());
    }
}
