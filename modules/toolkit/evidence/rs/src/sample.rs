use std::io::Write;

use bitcode::{Decode, Encode};
use eyre::Result;

use crate::evidence_type::{EvidenceType, PerEvidenceType};
use crate::input::ReadInputCounts;
use crate::merge::Merge;

/// Detailed evidence type counts of a sample.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct EvidenceTypeCounts {
    pub by_type: PerEvidenceType<u64>,
    /// Anomalous pairs close to the proper-pair threshold, down-weighted by the scorer.
    pub close: u64,
}

impl EvidenceTypeCounts {
    pub fn add(&mut self, etype: EvidenceType, count: u64) -> &mut Self {
        *self.by_type.get_mut(etype) += count;
        self
    }

    pub fn get(&self, etype: EvidenceType) -> u64 {
        *self.by_type.get(etype)
    }
}

impl Merge for EvidenceTypeCounts {
    fn merge(&mut self, other: &Self) {
        self.by_type.zip_apply(&other.by_type, |x, y| *x += *y);
        self.close += other.close;
    }
}

/// All bookkeeping of one sample within one processing partition.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Debug, Default)]
pub struct SampleCounts {
    pub input: ReadInputCounts,
    pub evidence: EvidenceTypeCounts,
}

impl Merge for SampleCounts {
    fn merge(&mut self, other: &Self) {
        self.input.merge(&other.input);
        self.evidence.merge(&other.evidence);
    }
}

impl SampleCounts {
    /// Write a `label<TAB>statistic<TAB>value` line per statistic.
    pub fn write(&self, out: &mut impl Write, label: &str) -> Result<()> {
        let ev = &self.input.evidence;
        writeln!(out, "{label}\tinput_total\t{}", self.input.total())?;
        writeln!(out, "{label}\tinput_min_mapq\t{}", self.input.min_mapq)?;
        for (key, value) in [
            ("input_evidence_total", ev.total),
            ("input_ignored", ev.ignored),
            ("input_anomalous", ev.anomalous),
            ("input_split", ev.split),
            ("input_indel", ev.indel),
            ("input_assembled", ev.assembled),
            ("input_remote_recovery", ev.remote_recovery),
        ] {
            writeln!(out, "{label}\t{key}\t{value}")?;
        }

        for (etype, value) in self.evidence.by_type.iter() {
            writeln!(out, "{label}\tevidence_{etype}\t{value}")?;
        }
        writeln!(out, "{label}\tevidence_close_pair\t{}", self.evidence.close)?;
        Ok(())
    }
}
