use bitcode::{Decode, Encode};

use crate::merge::Merge;

/// Classified reads of a sample as seen by the locus graph builder.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct EvidenceCount {
    /// Every read passing the mapping-quality filter.
    pub total: u64,
    /// Reads skipped for reasons other than mapping quality (duplicates, QC failures, ...).
    pub ignored: u64,
    /// Reads with any anomalous signal.
    pub anomalous: u64,
    pub split: u64,
    pub indel: u64,
    /// Reads contributing to at least one assembled contig.
    pub assembled: u64,
    /// Reads flagged as candidates for remote insertion recovery.
    pub remote_recovery: u64,
}

impl Merge for EvidenceCount {
    fn merge(&mut self, other: &Self) {
        self.total += other.total;
        self.ignored += other.ignored;
        self.anomalous += other.anomalous;
        self.split += other.split;
        self.indel += other.indel;
        self.assembled += other.assembled;
        self.remote_recovery += other.remote_recovery;
    }
}

/// Reads observed for a sample, including the ones dropped before classification.
///
/// Volumes are stored as `f64`: they can be very high and only relative magnitudes are used.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Debug, Default)]
pub struct ReadInputCounts {
    /// Reads filtered for mapping quality before any classification step.
    pub min_mapq: f64,
    pub evidence: EvidenceCount,
}

impl ReadInputCounts {
    pub fn total(&self) -> f64 {
        self.min_mapq + self.evidence.total as f64
    }
}

impl Merge for ReadInputCounts {
    fn merge(&mut self, other: &Self) {
        self.min_mapq += other.min_mapq;
        self.evidence.merge(&other.evidence);
    }
}
