use dyn_clone::DynClone;
use eyre::Result;

use super::partition::Partition;
use crate::cohort::CohortCounts;

/// Gathers the evidence statistics of a single genomic partition.
///
/// Each worker thread owns a private clone, and every partition is handed a fresh zeroed
/// `CohortCounts` that nobody else can observe until the partition is finished.
pub trait Collector: DynClone + Send + Sync {
    fn collect(&mut self, partition: &Partition, counts: &mut CohortCounts) -> Result<()>;
}

dyn_clone::clone_trait_object!(Collector);
