use std::fmt::{Debug, Display};
use std::ops::Range;

use crate::num::PrimInt;
use bitcode::{Decode, Encode};
use derive_getters::Dissolve;
use eyre::{eyre, Report, Result};

/// Interval is a half-open genomic region [start, end) in 0-based coordinates.
/// Empty intervals (start == end) and intervals with negative length (start > end) are prohibited.
#[derive(Encode, Decode, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Dissolve)]
pub struct Interval<Idx: PrimInt> {
    start: Idx,
    end: Idx,
}

impl<Idx: PrimInt> Interval<Idx> {
    pub fn new(start: Idx, end: Idx) -> Result<Self> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(eyre!("Invalid interval: start >= end"))
        }
    }

    /// Interval covering a single position.
    pub fn point(pos: Idx) -> Self {
        Self {
            start: pos,
            end: pos + Idx::one(),
        }
    }

    #[inline(always)]
    pub fn start(&self) -> Idx {
        self.start
    }

    #[inline(always)]
    pub fn end(&self) -> Idx {
        self.end
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> Idx {
        self.end - self.start
    }

    pub fn contains(&self, pos: Idx) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Strict overlap check, touching intervals don't intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Split the interval into consecutive chunks of at most `size` positions.
    pub fn chunks(&self, size: Idx) -> Result<Vec<Self>> {
        if size <= Idx::zero() {
            return Err(eyre!("Chunk size must be positive"));
        }

        let mut chunks = Vec::new();
        let mut start = self.start;
        while start < self.end {
            let end = if self.end - start > size {
                start + size
            } else {
                self.end
            };
            chunks.push(Self { start, end });
            start = end;
        }
        Ok(chunks)
    }

    pub fn cast<T: PrimInt>(&self) -> Option<Interval<T>> {
        match (T::from(self.start), T::from(self.end)) {
            (Some(start), Some(end)) => Some(Interval { start, end }),
            _ => None,
        }
    }
}

impl<Idx: PrimInt> Default for Interval<Idx> {
    fn default() -> Self {
        Self {
            start: Idx::zero(),
            end: Idx::one(),
        }
    }
}

impl<Idx: PrimInt + Display> Display for Interval<Idx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl<Idx: PrimInt> TryFrom<(Idx, Idx)> for Interval<Idx> {
    type Error = Report;

    fn try_from(value: (Idx, Idx)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1)
    }
}

impl<Idx: PrimInt> TryFrom<Range<Idx>> for Interval<Idx> {
    type Error = Report;

    fn try_from(value: Range<Idx>) -> Result<Self, Self::Error> {
        Self::new(value.start, value.end)
    }
}

impl<Idx: PrimInt> From<Interval<Idx>> for Range<Idx> {
    fn from(interval: Interval<Idx>) -> Self {
        interval.start..interval.end
    }
}

impl<Idx: PrimInt> PartialEq<(Idx, Idx)> for Interval<Idx> {
    fn eq(&self, other: &(Idx, Idx)) -> bool {
        self.start == other.0 && self.end == other.1
    }
}
