use ahash::HashMap;
use eyre::Result;

use super::collector::Collector;
use super::partition::Partition;
use crate::cohort::CohortCounts;
use crate::merge::Merge;

pub struct Worker {
    // Partition id -> counts collected by this worker
    accumulator: HashMap<usize, CohortCounts>,
    collector: Box<dyn Collector>,
}

impl Worker {
    pub fn new(collector: Box<dyn Collector>) -> Self {
        Self {
            accumulator: HashMap::default(),
            collector,
        }
    }

    pub fn reset(&mut self, collector: Box<dyn Collector>) {
        self.accumulator.clear();
        self.collector = collector;
    }

    pub fn process(&mut self, prtind: usize, partition: &Partition) -> Result<()> {
        let launched_at = std::time::Instant::now();

        let mut counts = CohortCounts::default();
        self.collector.collect(partition, &mut counts)?;

        log::debug!(
            "Partition {:?} processed in {:.3}s",
            partition,
            launched_at.elapsed().as_secs_f64()
        );
        if self.accumulator.insert(prtind, counts).is_some() {
            eyre::bail!("Partition {prtind} was processed twice");
        }
        Ok(())
    }

    /// Move per-partition results of all workers into a vector indexed by partition id.
    pub fn aggregate<'a>(
        partitions: usize,
        workers: impl Iterator<Item = &'a mut Self>,
    ) -> Result<Vec<CohortCounts>> {
        let mut collected: Vec<Option<CohortCounts>> = vec![None; partitions];
        for worker in workers {
            for (prtind, counts) in worker.accumulator.drain() {
                collected[prtind] = Some(counts);
            }
        }

        collected
            .into_iter()
            .enumerate()
            .map(|(prtind, counts)| {
                counts.ok_or_else(|| eyre::eyre!("Partition {prtind} produced no counts"))
            })
            .collect()
    }

    /// Sequential reduction of the per-partition counters.
    pub fn reduce(partials: &[CohortCounts]) -> CohortCounts {
        partials
            .iter()
            .fold(CohortCounts::default(), |total, partial| total.merged(partial))
    }
}
