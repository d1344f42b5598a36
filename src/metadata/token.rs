//! Metadata token representation.
//!
//! Every type and member view carries a [`Token`] assigned by the module that
//! owns it. Tokens are the identity used for equality checks across the
//! engine - in particular for deciding whether a method equals its own base
//! definition and for marking accessor methods as consumed.

use std::fmt;

/// A metadata token identifying one entity within a module.
///
/// Tokens are opaque to the stripping engine; the host adapter (or the
/// builder API) allocates them monotonically per module. Two views refer to
/// the same entity iff their tokens are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(u32);

impl Token {
    /// Create a new token from a raw value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// The raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_display_and_identity() {
        let a = Token::new(0x0200_0001);
        let b = Token::from(0x0200_0001);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "0x02000001");
        assert_ne!(a, Token::new(0x0200_0002));
    }
}
