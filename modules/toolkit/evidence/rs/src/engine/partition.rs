use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use svbit_core_rs::loc::Interval;

/// Unit of independent work: a half-open interval on a single contig.
#[derive(
    Encode, Decode, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Constructor, Dissolve, Getters,
)]
pub struct Partition {
    // Index of the contig in the alignment header
    contig: usize,
    interval: Interval<u64>,
}
