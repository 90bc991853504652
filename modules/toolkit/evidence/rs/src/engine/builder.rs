use eyre::{ensure, Result};
use rayon::ThreadPool;
use svbit_io_rs::bam::ContigTable;
use thread_local::ThreadLocal;

use super::engine::Engine;
use super::partition::Partition;

#[derive(Default)]
pub struct EngineBuilder {
    partitions: Vec<Partition>,
    thread_pool: Option<ThreadPool>,
}

impl EngineBuilder {
    pub fn add_partitions(mut self, partitions: impl Iterator<Item = Partition>) -> Self {
        self.partitions.extend(partitions);
        self
    }

    /// Tile every contig of the header with partitions of at most `chunk` positions.
    pub fn add_contigs(mut self, header: &ContigTable, chunk: u64) -> Result<Self> {
        for (ind, contig) in header.iter().enumerate() {
            if *contig.length() == 0 {
                log::warn!("Contig {} has zero length and is skipped", contig.name());
                continue;
            }
            let span = svbit_core_rs::loc::Interval::new(0, *contig.length())?;
            for interval in span.chunks(chunk)? {
                self.partitions.push(Partition::new(ind, interval));
            }
        }
        Ok(self)
    }

    pub fn set_thread_pool(mut self, pool: ThreadPool) -> Self {
        self.thread_pool = Some(pool);
        self
    }

    pub fn build(mut self) -> Result<Engine> {
        // Overlapping partitions would count the same reads twice
        self.partitions.sort();
        self.partitions.dedup();
        for window in self.partitions.windows(2) {
            let (prev, next) = (&window[0], &window[1]);
            ensure!(
                prev.contig() != next.contig() || !prev.interval().intersects(next.interval()),
                "Overlapping partitions: {:?} and {:?}",
                prev,
                next
            );
        }

        if self.partitions.is_empty() {
            log::warn!("Evidence engine was built without any partitions");
        }
        Ok(Engine::new(
            self.thread_pool,
            self.partitions,
            ThreadLocal::new(),
        ))
    }
}
