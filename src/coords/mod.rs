//! Type-safe coordinate system wrappers
//!
//! Gene records arrive in 0-based half-open coordinates, while variant
//! positions and the gene index use 1-based positions. The newtypes here
//! make the basis explicit so the two are never mixed by accident.
//!
//! | Type | Basis | Use Cases |
//! |------|-------|-----------|
//! | [`ZeroBasedPos`] | 0-based | Gene record `min`/`max`, residue indexing |
//! | [`OneBasedPos`] | 1-based | Variant positions, gene index, `c.` numbering |
//!
//! # Examples
//!
//! ```
//! use ferro_ann::coords::{ZeroBasedPos, OneBasedPos};
//!
//! let zb = ZeroBasedPos::new(99);
//! let ob = zb.to_one_based();
//! assert_eq!(ob.value(), 100);
//! assert_eq!(ob.to_zero_based(), zb);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gene::Strand;

/// A 0-based position (array-style indexing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZeroBasedPos(u64);

/// A 1-based position (human-readable indexing)
///
/// # Invariant
///
/// Position must be >= 1. Position 0 is invalid in 1-based systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OneBasedPos(u64);

impl ZeroBasedPos {
    /// Create a new 0-based position
    #[inline]
    pub const fn new(pos: u64) -> Self {
        Self(pos)
    }

    /// Get the raw value
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Convert to 1-based position
    #[inline]
    pub const fn to_one_based(self) -> OneBasedPos {
        OneBasedPos(self.0 + 1)
    }

    /// Use as array index
    #[inline]
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }
}

impl OneBasedPos {
    /// Create a new 1-based position
    ///
    /// # Panics
    ///
    /// Panics if pos is 0, which is invalid in 1-based coordinate systems.
    #[inline]
    pub fn new(pos: u64) -> Self {
        assert!(pos > 0, "1-based position cannot be 0");
        Self(pos)
    }

    /// Create a new 1-based position, returning None for 0
    #[inline]
    pub const fn try_new(pos: u64) -> Option<Self> {
        if pos > 0 {
            Some(Self(pos))
        } else {
            None
        }
    }

    /// Get the raw value
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Convert to 0-based position
    #[inline]
    pub const fn to_zero_based(self) -> ZeroBasedPos {
        ZeroBasedPos(self.0 - 1)
    }
}

impl fmt::Display for ZeroBasedPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OneBasedPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ZeroBasedPos> for u64 {
    fn from(pos: ZeroBasedPos) -> Self {
        pos.0
    }
}

impl From<OneBasedPos> for u64 {
    fn from(pos: OneBasedPos) -> Self {
        pos.0
    }
}

/// Largest coordinate an index bound may take, so that offsets between
/// positions fit in an `i64`.
pub const MAX_COORDINATE: u64 = i64::MAX as u64;

/// Convert a gene record span to index bounds.
///
/// Both ends shift by one: `begin = min + 1`, `end = max + 1`, with `end`
/// exclusive. The span `[begin, end)` therefore covers the 1-based bases
/// `min + 1 ..= max`. Returns `None` when a bound would exceed
/// [`MAX_COORDINATE`].
///
/// ```
/// use ferro_ann::coords::{gene_span_to_index, ZeroBasedPos};
///
/// assert!(gene_span_to_index(ZeroBasedPos::new(0), ZeroBasedPos::new(u64::MAX)).is_none());
/// ```
#[inline]
pub const fn gene_span_to_index(
    min: ZeroBasedPos,
    max: ZeroBasedPos,
) -> Option<(OneBasedPos, u64)> {
    match (min.value().checked_add(1), max.value().checked_add(1)) {
        (Some(begin), Some(end)) if begin <= MAX_COORDINATE && end <= MAX_COORDINATE => {
            Some((OneBasedPos(begin), end))
        }
        _ => None,
    }
}

/// Offset of a 1-based position into a gene's residues, read 5'→3' in the
/// direction of transcription.
///
/// `begin`/`end` are the gene's index bounds (`end` exclusive). On the plus
/// strand the offset counts from `begin`; on the minus strand it counts
/// backwards from the last base, `end - 1`. Positions upstream of the gene
/// give negative offsets.
///
/// ```
/// use ferro_ann::coords::transcript_offset;
/// use ferro_ann::gene::Strand;
///
/// assert_eq!(transcript_offset(Strand::Plus, 2509490, 2509489, 2510257), 1);
/// assert_eq!(transcript_offset(Strand::Minus, 2510588, 2510351, 2510588), -1);
/// ```
#[inline]
pub const fn transcript_offset(strand: Strand, position: u64, begin: u64, end: u64) -> i64 {
    match strand {
        Strand::Plus => position as i64 - begin as i64,
        Strand::Minus => -(position as i64 - (end as i64 - 1)),
    }
}
