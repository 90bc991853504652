use std::io::Write;
use std::sync::Arc;

use derive_getters::Getters;
use eyre::{ensure, eyre, Result, WrapErr};
use svbit_io_rs::bam::ContigTable;

use crate::candidate::{JunctionFilter, SvCandidate};
use crate::config::{Config, Outputs};
use crate::id::{JunctionId, JunctionIdGenerator};
use crate::model::{GenotypeModel, OutputKind, PerModel};
use crate::record::{Filter, SvRecord};
use crate::score::{Call, Scorer, ScoringInput};
use crate::streams::Streams;

/// Bookkeeping of a writer run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Getters)]
pub struct WriterStats {
    candidates: u64,
    junctions: u64,
    filtered: u64,
    /// Candidates that arrived before the previous one in genomic order.
    unordered: u64,
    candidate_records: u64,
    records: PerModel<u64>,
    low_quality: PerModel<u64>,
    unscored: PerModel<u64>,
}

impl WriterStats {
    /// Write a `writer<TAB>statistic<TAB>value` line per statistic.
    pub fn write(&self, out: &mut impl Write) -> Result<()> {
        for (key, value) in [
            ("candidates", self.candidates),
            ("junctions", self.junctions),
            ("junctions_filtered", self.filtered),
            ("candidates_unordered", self.unordered),
            ("records_candidates", self.candidate_records),
        ] {
            writeln!(out, "writer\t{key}\t{value}")?;
        }
        for (model, records) in self.records.iter() {
            writeln!(out, "writer\trecords_{model}\t{records}")?;
            writeln!(out, "writer\tlow_quality_{model}\t{}", self.low_quality.get(model))?;
            writeln!(out, "writer\tunscored_{model}\t{}", self.unscored.get(model))?;
        }
        Ok(())
    }
}

/// Scores candidate junctions and dispatches them to the output streams of the run.
///
/// Candidates are written in the order they are received, which is expected to be
/// non-decreasing genomic position. Every record of the same junction shares one identifier.
pub struct SvWriter {
    config: Config,
    contigs: Arc<ContigTable>,
    scorer: Box<dyn Scorer>,
    streams: Streams,
    ids: JunctionIdGenerator,
    stats: WriterStats,
    last: Option<(usize, u64)>,
}

impl SvWriter {
    /// Open all configured outputs. The writer is not created if any of them fails to open.
    pub fn new(
        config: Config,
        outputs: &Outputs,
        contigs: ContigTable,
        scorer: Box<dyn Scorer>,
    ) -> Result<Self> {
        let contigs = Arc::new(contigs);
        let streams = Streams::open(&config, outputs, contigs.clone())?;
        Self::with_streams(config, contigs, scorer, streams)
    }

    /// Writer over already opened streams, which must cover every active output.
    pub fn with_streams(
        config: Config,
        contigs: Arc<ContigTable>,
        scorer: Box<dyn Scorer>,
        streams: Streams,
    ) -> Result<Self> {
        for kind in config.active_outputs() {
            ensure!(streams.contains(kind), "The {kind} stream is not open");
        }

        let ids = JunctionIdGenerator::new(config.id_prefix().as_str());
        Ok(Self {
            config,
            contigs,
            scorer,
            streams,
            ids,
            stats: WriterStats::default(),
            last: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &WriterStats {
        &self.stats
    }

    /// Score and write every junction of the candidate that is not filtered.
    ///
    /// Returns the identifier of each junction, `None` for the filtered ones. Invalid input
    /// is rejected before anything is written; I/O failures are returned as errors.
    pub fn write_sv(
        &mut self,
        candidate: &SvCandidate,
        filter: &JunctionFilter,
    ) -> Result<Vec<Option<JunctionId>>> {
        filter.validate(candidate)?;
        for junction in candidate.junctions() {
            for bnd in [junction.bp1(), junction.bp2()] {
                ensure!(
                    *bnd.contig() < self.contigs.len(),
                    "SV candidate {} refers to unknown contig index {}",
                    candidate.index(),
                    bnd.contig()
                );
            }
        }

        let position = candidate.position();
        if self.last.is_some_and(|last| position < last) {
            self.stats.unordered += 1;
            log::warn!(
                "SV candidate {} is out of genomic order, output will not be sorted",
                candidate.index()
            );
        }
        self.last = Some(position);
        self.stats.candidates += 1;

        let mut assigned = Vec::with_capacity(candidate.junctions().len());
        for (index, junction) in candidate.junctions().iter().enumerate() {
            self.stats.junctions += 1;
            if filter.is_filtered(index) {
                self.stats.filtered += 1;
                assigned.push(None);
                continue;
            }

            let input = ScoringInput {
                candidate,
                index,
                junction,
            };
            let models = self.config.mode().models();
            let calls: Vec<_> = models
                .iter()
                .map(|&model| (model, self.score(&input, model)))
                .collect();

            let id = self.ids.next(*junction.sv_type());
            let mut record = SvRecord {
                id: id.clone(),
                candidate: *candidate.index(),
                junction: index,
                sv_type: *junction.sv_type(),
                bp1: *junction.bp1(),
                bp2: *junction.bp2(),
                kind: OutputKind::Candidates,
                call: None,
                filter: None,
                support: *junction.support(),
            };

            if *self.config.report_candidates()
                && junction.total_support() >= *self.config.min_candidate_support()
            {
                self.emit(&record)?;
                self.stats.candidate_records += 1;
            }

            for (model, call) in calls {
                let marker = match call {
                    None => Filter::Unscored,
                    Some(call) if call.quality < *self.config.min_quality().get(model) => {
                        Filter::LowQuality
                    }
                    Some(_) => Filter::Pass,
                };
                match marker {
                    Filter::Unscored => *self.stats.unscored.get_mut(model) += 1,
                    Filter::LowQuality => *self.stats.low_quality.get_mut(model) += 1,
                    Filter::Pass => {}
                }

                record.kind = OutputKind::Model(model);
                record.call = call;
                record.filter = Some(marker);
                self.emit(&record)?;
                *self.stats.records.get_mut(model) += 1;
            }

            log::debug!(
                "SV candidate {} junction {} written as {}",
                candidate.index(),
                index,
                id
            );
            assigned.push(Some(id));
        }
        Ok(assigned)
    }

    /// Flush every stream and report the run statistics. Streams are closed on return.
    pub fn finish(mut self) -> Result<WriterStats> {
        self.streams.flush()?;
        let stats = self.stats;
        log::info!(
            "SV writer finished: {} candidates, {} junctions ({} filtered), {} identifiers issued",
            stats.candidates,
            stats.junctions,
            stats.filtered,
            self.ids.issued()
        );
        for model in self.config.mode().models() {
            log::info!(
                "{} stream: {} records, {} low quality, {} unscored",
                model,
                stats.records.get(*model),
                stats.low_quality.get(*model),
                stats.unscored.get(*model)
            );
        }
        Ok(stats)
    }

    fn score(&mut self, input: &ScoringInput, model: GenotypeModel) -> Option<Call> {
        match self.scorer.score(input, model) {
            Ok(call) if call.quality.is_finite() => Some(call),
            Ok(call) => {
                log::warn!(
                    "SV candidate {} junction {}: {} model returned a non-finite quality {}",
                    input.candidate.index(),
                    input.index,
                    model,
                    call.quality
                );
                None
            }
            Err(err) => {
                log::warn!(
                    "SV candidate {} junction {}: {} scoring failed: {:?}",
                    input.candidate.index(),
                    input.index,
                    model,
                    err
                );
                None
            }
        }
    }

    fn emit(&mut self, record: &SvRecord) -> Result<()> {
        let kind = record.kind;
        let sink = self
            .streams
            .get_mut(kind)
            .ok_or_else(|| eyre!("The {kind} stream is not open"))?;
        sink.write_record(record)
            .wrap_err_with(|| format!("Failed to write to the {kind} stream"))
    }
}
