//! Source locations.
//!
//! A [`Location`] is a half-open byte range `[start, end)` into the source
//! buffer. It never owns bytes; the text is recovered by slicing the source.

use std::fmt;

/// Error when building a location from a range that exceeds `u32::MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// Start offset exceeds `u32::MAX`.
    StartTooLarge(u64),
    /// End offset exceeds `u32::MAX`.
    EndTooLarge(u64),
    /// Start offset is past the end offset.
    Inverted { start: u64, end: u64 },
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::StartTooLarge(v) => {
                write!(f, "location start {v} (0x{v:X}) exceeds u32::MAX")
            }
            LocationError::EndTooLarge(v) => {
                write!(f, "location end {v} (0x{v:X}) exceeds u32::MAX")
            }
            LocationError::Inverted { start, end } => {
                write!(f, "location start {start} is past its end {end}")
            }
        }
    }
}

impl std::error::Error for LocationError {}

/// Half-open byte range into the source buffer.
///
/// Layout: 8 bytes, `start` and `end` as `u32` byte offsets.
///
/// # Invariant
///
/// `start <= end <= source.len()`. The lexer and parser only build
/// locations from cursor positions, and the deserializer checks both bounds
/// before constructing one.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
#[repr(C)]
pub struct Location {
    pub start: u32,
    pub end: u32,
}

impl Location {
    /// Create a new location.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Location { start, end }
    }

    /// Zero-width location at `offset`. Used for synthesized and missing nodes.
    #[inline]
    pub const fn point(offset: u32) -> Self {
        Location {
            start: offset,
            end: offset,
        }
    }

    /// Build a location from wide offsets, checking the `u32` range and order.
    pub fn try_from_offsets(start: u64, end: u64) -> Result<Self, LocationError> {
        let s = u32::try_from(start).map_err(|_| LocationError::StartTooLarge(start))?;
        let e = u32::try_from(end).map_err(|_| LocationError::EndTooLarge(end))?;
        if s > e {
            return Err(LocationError::Inverted { start, end });
        }
        Ok(Location { start: s, end: e })
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if an offset is within this location.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check if another location is fully contained within this one.
    #[inline]
    pub fn contains_location(&self, other: Location) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest location covering both.
    #[inline]
    #[must_use]
    pub fn join(self, other: Location) -> Location {
        Location {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Extend the end of this location to `end` (never shrinks).
    #[inline]
    #[must_use]
    pub fn extend_to(self, end: u32) -> Location {
        Location {
            start: self.start,
            end: self.end.max(end),
        }
    }

    /// Byte range, for slicing the source.
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Slice `source` at this location, or `None` if it is out of bounds.
    #[inline]
    pub fn slice<'a>(&self, source: &'a [u8]) -> Option<&'a [u8]> {
        source.get(self.range())
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}...{})", self.start, self.end)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}...{}", self.start, self.end)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Location;
    crate::static_assert_size!(Location, 8);
}

#[cfg(test)]
mod tests;
