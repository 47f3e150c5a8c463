//! Edge colour channels.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor};

/// A set of output channels an edge contributes to.
///
/// Stored as three bits: red = 1, green = 2, blue = 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgeColor(u8);

impl EdgeColor {
    pub const BLACK: Self = Self(0);
    pub const RED: Self = Self(1);
    pub const GREEN: Self = Self(2);
    pub const YELLOW: Self = Self(3);
    pub const BLUE: Self = Self(4);
    pub const MAGENTA: Self = Self(5);
    pub const CYAN: Self = Self(6);
    pub const WHITE: Self = Self(7);

    /// Build a colour from its raw bits; bits above the RGB range are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 7)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if every channel of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check if this is exactly one primary channel.
    pub const fn is_primary(self) -> bool {
        matches!(self.0, 1 | 2 | 4)
    }

    /// Number of channels set.
    pub const fn channel_count(self) -> u32 {
        self.0.count_ones()
    }

    /// One-letter code, used in debug output and snapshots.
    pub const fn code(self) -> char {
        match self.0 {
            0 => 'K',
            1 => 'R',
            2 => 'G',
            3 => 'Y',
            4 => 'B',
            5 => 'M',
            6 => 'C',
            _ => 'W',
        }
    }
}

impl BitAnd for EdgeColor {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for EdgeColor {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitXor for EdgeColor {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl fmt::Display for EdgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
