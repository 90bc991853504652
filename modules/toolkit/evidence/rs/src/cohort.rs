use std::io::Write;

use bitcode::{Decode, Encode};
use eyre::Result;
use svbit_core_rs::sample::{PerSample, SampleRole};

use crate::merge::Merge;
use crate::sample::SampleCounts;

/// Counts of the normal and tumor samples of a run.
///
/// Germline runs populate only the normal slot, tumor-only runs only the tumor slot.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Debug, Default)]
pub struct CohortCounts {
    samples: PerSample<SampleCounts>,
}

impl CohortCounts {
    pub fn get(&self, role: SampleRole) -> &SampleCounts {
        self.samples.get(role)
    }

    pub fn get_mut(&mut self, role: SampleRole) -> &mut SampleCounts {
        self.samples.get_mut(role)
    }

    /// Counts selected by the "is tumor" flag of an alignment input.
    pub fn select(&mut self, is_tumor: bool) -> &mut SampleCounts {
        self.get_mut(SampleRole::from_tumor_flag(is_tumor))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SampleRole, &SampleCounts)> {
        self.samples.iter()
    }

    /// Report both samples, each line labelled with the sample role.
    pub fn write(&self, out: &mut impl Write) -> Result<()> {
        for (role, counts) in self.samples.iter() {
            counts.write(out, role.label())?;
        }
        Ok(())
    }
}

impl Merge for CohortCounts {
    fn merge(&mut self, other: &Self) {
        self.samples
            .zip_apply(&other.samples, |lhs, rhs| lhs.merge(rhs));
    }
}
