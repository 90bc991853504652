use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use eyre::{eyre, Result};
use rayon::ThreadPool;
use svbit_core_rs::sample::SampleRole;
use thread_local::ThreadLocal;

use super::builder::EngineBuilder;
use super::collector::Collector;
use super::partition::Partition;
use super::Worker;
use crate::cohort::CohortCounts;

/// Outcome of a run: the reduced totals and every partial counter they were reduced from.
#[derive(Clone, PartialEq, Debug, Dissolve, Getters)]
pub struct Harvest {
    total: CohortCounts,
    partitions: Vec<(Partition, CohortCounts)>,
}

impl Harvest {
    /// Rebuild a harvest from checkpointed partial counters.
    pub fn from_partials(partitions: Vec<(Partition, CohortCounts)>) -> Self {
        let partials: Vec<_> = partitions.iter().map(|(_, counts)| *counts).collect();
        Self {
            total: Worker::reduce(&partials),
            partitions,
        }
    }
}

/// Runs a collector over independent partitions in parallel and merges the partial counters.
#[derive(Constructor)]
pub struct Engine {
    thread_pool: Option<ThreadPool>,
    partitions: Vec<Partition>,
    workers: ThreadLocal<RefCell<Worker>>,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn run(&mut self, collector: Box<dyn Collector>) -> Result<Harvest> {
        match self.thread_pool.take() {
            Some(pool) => {
                let result = pool.install(|| self._run(collector));
                self.thread_pool = Some(pool);
                result
            }
            None => self._run(collector),
        }
    }

    fn _run(&mut self, collector: Box<dyn Collector>) -> Result<Harvest> {
        // Soft-reset all workers
        for w in self.workers.iter_mut() {
            w.get_mut().reset(dyn_clone::clone_box(&*collector));
        }

        let has_failed = AtomicBool::new(false);
        let errors = Mutex::new(Vec::new());
        {
            let (workers, partitions) = (&self.workers, &self.partitions);
            let (has_failed, errors, collector) = (&has_failed, &errors, &*collector);

            rayon::scope(|s| {
                for (prtind, partition) in partitions.iter().enumerate() {
                    // Terminate the loop if an error has occurred in any of the threads
                    if has_failed.load(Ordering::Relaxed) {
                        return;
                    }

                    s.spawn(move |_| {
                        if has_failed.load(Ordering::Relaxed) {
                            return;
                        }

                        let mut worker = workers
                            .get_or(|| RefCell::new(Worker::new(dyn_clone::clone_box(collector))))
                            .borrow_mut();

                        if let Err(err) = worker.process(prtind, partition) {
                            has_failed.store(true, Ordering::Relaxed);
                            log::error!("Evidence collection failed for {:?}: {:?}", partition, err);
                            if let Ok(mut errors) = errors.lock() {
                                errors.push(err);
                            }
                        }
                    });
                }
            });
        }

        if has_failed.into_inner() {
            let errors = errors
                .into_inner()
                .map_err(|_| eyre!("Evidence engine error log is poisoned"))?;
            return Err(eyre!(
                "Evidence collection failed in {} partition(s): {:?}",
                errors.len(),
                errors
            ));
        }

        let partials = Worker::aggregate(
            self.partitions.len(),
            self.workers.iter_mut().map(|x| x.get_mut()),
        )?;
        let total = Worker::reduce(&partials);
        log::info!(
            "Evidence collected over {} partitions: {:.0} normal / {:.0} tumor input reads",
            self.partitions.len(),
            total.get(SampleRole::Normal).input.total(),
            total.get(SampleRole::Tumor).input.total(),
        );

        Ok(Harvest {
            total,
            partitions: self.partitions.iter().copied().zip(partials).collect(),
        })
    }
}
