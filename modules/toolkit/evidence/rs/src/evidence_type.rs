use std::fmt::Display;

use bitcode::{Decode, Encode};

/// Kind of read evidence supporting a structural variant hypothesis.
#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EvidenceType {
    /// Anomalous read pair (unexpected orientation, distance or chromosome).
    Pair,
    /// Anomalous read pair with both mates close enough to be scanned together.
    LocalPair,
    /// Large indel inside the read alignment.
    Cigar,
    /// Soft-clipped read end.
    SoftClip,
    /// Poorly aligned read end that was not soft-clipped.
    SemiAligned,
    /// Unmapped read with a mapped mate.
    Shadow,
    /// Supplementary (split) alignment.
    SplitAlign,
    Unknown,
}

impl EvidenceType {
    pub const ALL: [EvidenceType; 8] = [
        EvidenceType::Pair,
        EvidenceType::LocalPair,
        EvidenceType::Cigar,
        EvidenceType::SoftClip,
        EvidenceType::SemiAligned,
        EvidenceType::Shadow,
        EvidenceType::SplitAlign,
        EvidenceType::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EvidenceType::Pair => "pair",
            EvidenceType::LocalPair => "local_pair",
            EvidenceType::Cigar => "cigar",
            EvidenceType::SoftClip => "softclip",
            EvidenceType::SemiAligned => "semialign",
            EvidenceType::Shadow => "shadow",
            EvidenceType::SplitAlign => "split_align",
            EvidenceType::Unknown => "unknown",
        }
    }
}

impl Display for EvidenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A struct that holds data for each evidence type. Adding an `EvidenceType` variant fails to
/// compile until a slot is added here.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct PerEvidenceType<T> {
    pub pair: T,
    pub local_pair: T,
    pub cigar: T,
    pub soft_clip: T,
    pub semi_aligned: T,
    pub shadow: T,
    pub split_align: T,
    pub unknown: T,
}

impl<T> PerEvidenceType<T> {
    pub fn get(&self, etype: EvidenceType) -> &T {
        match etype {
            EvidenceType::Pair => &self.pair,
            EvidenceType::LocalPair => &self.local_pair,
            EvidenceType::Cigar => &self.cigar,
            EvidenceType::SoftClip => &self.soft_clip,
            EvidenceType::SemiAligned => &self.semi_aligned,
            EvidenceType::Shadow => &self.shadow,
            EvidenceType::SplitAlign => &self.split_align,
            EvidenceType::Unknown => &self.unknown,
        }
    }

    pub fn get_mut(&mut self, etype: EvidenceType) -> &mut T {
        match etype {
            EvidenceType::Pair => &mut self.pair,
            EvidenceType::LocalPair => &mut self.local_pair,
            EvidenceType::Cigar => &mut self.cigar,
            EvidenceType::SoftClip => &mut self.soft_clip,
            EvidenceType::SemiAligned => &mut self.semi_aligned,
            EvidenceType::Shadow => &mut self.shadow,
            EvidenceType::SplitAlign => &mut self.split_align,
            EvidenceType::Unknown => &mut self.unknown,
        }
    }

    /// Iterate over the slots in `EvidenceType::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (EvidenceType, &T)> {
        EvidenceType::ALL.into_iter().map(|etype| (etype, self.get(etype)))
    }

    /// Combine two containers slot by slot.
    pub fn zip_apply<U>(&mut self, other: &PerEvidenceType<U>, mut f: impl FnMut(&mut T, &U)) {
        for etype in EvidenceType::ALL {
            f(self.get_mut(etype), other.get(etype));
        }
    }
}
