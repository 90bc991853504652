use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use eyre::{eyre, Result};
use svbit_core_rs::loc::{Direction, Interval};
use svbit_core_rs::sample::PerSample;
use svbit_io_rs::bam::ContigTable;
use svbit_io_rs::WriteRecord;
use svbit_svwriter_rs::{
    Breakend, Call, Config, Filter, Genotype, GenotypeModel, Junction, JunctionFilter, JunctionId,
    Mode, OutputKind, Outputs, Scorer, ScoringInput, Streams, Support, SvCandidate, SvRecord,
    SvWriter,
};

#[derive(Clone, Default)]
struct Collected(Arc<Mutex<Vec<SvRecord>>>);

impl Collected {
    fn records(&self) -> Vec<SvRecord> {
        self.0.lock().unwrap().clone()
    }
}

impl WriteRecord for Collected {
    type Record = SvRecord;

    fn write_record(&mut self, record: &Self::Record) -> Result<()> {
        self.0
            .lock()
            .map_err(|_| eyre!("Poisoned"))?
            .push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Constant quality for every junction, failing for the selected (junction, model) pairs.
#[derive(Default)]
struct StubScorer {
    quality: f64,
    failing: Vec<(usize, GenotypeModel)>,
    calls: Arc<Mutex<Vec<(u64, usize, GenotypeModel)>>>,
}

impl Scorer for StubScorer {
    fn score(&mut self, input: &ScoringInput, model: GenotypeModel) -> Result<Call> {
        self.calls
            .lock()
            .map_err(|_| eyre!("Poisoned"))?
            .push((*input.candidate.index(), input.index, model));
        if self.failing.contains(&(input.index, model)) {
            return Err(eyre!("Likelihood did not converge"));
        }
        Ok(Call::new(self.quality, Genotype::Het))
    }
}

fn contigs() -> Result<ContigTable> {
    ContigTable::new([("chr1", 1_000_000), ("chr2", 500_000)])
}

fn candidate(index: u64, pos: u64, junctions: usize, support: u64) -> Result<SvCandidate> {
    let junctions = (0..junctions as u64)
        .map(|ind| {
            let start = pos + ind * 10;
            Junction::new(
                Breakend::new(0, Interval::point(start), Direction::Left),
                Breakend::new(0, Interval::point(start + 5_000), Direction::Right),
                Vec::new(),
            )
            .with_support(PerSample::new(Support::new(support, 0), Support::default()))
        })
        .collect();
    SvCandidate::new(index, junctions)
}

fn writer(config: Config, scorer: StubScorer) -> Result<(SvWriter, HashMap<OutputKind, Collected>)> {
    let mut streams = Streams::new();
    let mut sinks = HashMap::new();
    for kind in config.active_outputs() {
        let sink = Collected::default();
        streams.insert(kind, Box::new(sink.clone()));
        sinks.insert(kind, sink);
    }
    let writer = SvWriter::with_streams(config, Arc::new(contigs()?), Box::new(scorer), streams)?;
    Ok((writer, sinks))
}

fn scorer(quality: f64) -> StubScorer {
    StubScorer {
        quality,
        ..Default::default()
    }
}

#[test]
fn test_identifier_is_shared_across_streams() -> Result<()> {
    let mut config = Config::new(Mode::Somatic);
    config.set_report_candidates(true);
    let (mut writer, sinks) = writer(config, scorer(50.0))?;

    let ids = writer.write_sv(&candidate(0, 100, 2, 10)?, &JunctionFilter::new())?;
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);

    for (kind, sink) in &sinks {
        let records = sink.records();
        assert_eq!(records.len(), 2, "{kind}");
        for record in records {
            assert_eq!(record.kind, *kind);
            assert_eq!(Some(record.id), ids[record.junction].clone());
        }
    }
    Ok(())
}

#[test]
fn test_distinct_candidates_never_share_identifiers() -> Result<()> {
    let (mut writer, sinks) = writer(Config::new(Mode::Germline), scorer(50.0))?;

    let mut issued = HashSet::new();
    for index in 0..50 {
        let ids = writer.write_sv(&candidate(index, 1_000 * index, 3, 5)?, &JunctionFilter::new())?;
        issued.extend(ids.into_iter().flatten());
    }
    assert_eq!(issued.len(), 150);

    let written: HashSet<JunctionId> = sinks[&OutputKind::Model(GenotypeModel::Diploid)]
        .records()
        .into_iter()
        .map(|x| x.id)
        .collect();
    assert_eq!(written, issued);
    Ok(())
}

#[test]
fn test_filtered_junctions_are_skipped() -> Result<()> {
    let mut config = Config::new(Mode::Germline);
    config.set_report_candidates(true);
    let calls = Arc::new(Mutex::new(Vec::new()));
    let stub = StubScorer {
        quality: 50.0,
        calls: calls.clone(),
        ..Default::default()
    };
    let (mut writer, sinks) = writer(config, stub)?;

    let ids = writer.write_sv(
        &candidate(0, 100, 3, 10)?,
        &JunctionFilter::from_flags([true, false, true]),
    )?;
    assert!(ids[0].is_none() && ids[2].is_none());
    assert_eq!(
        ids[1].as_ref().map(|x| x.to_string()),
        Some("SvbitDEL:0".to_string())
    );

    // Filtered junctions are never scored nor written
    assert_eq!(*calls.lock().unwrap(), vec![(0, 1, GenotypeModel::Diploid)]);
    for sink in sinks.values() {
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].junction, 1);
    }

    let stats = writer.finish()?;
    assert_eq!(*stats.junctions(), 3);
    assert_eq!(*stats.filtered(), 2);
    Ok(())
}

#[test]
fn test_scoring_failure_marks_junction_unscored() -> Result<()> {
    let stub = StubScorer {
        quality: 50.0,
        failing: vec![(0, GenotypeModel::Somatic)],
        ..Default::default()
    };
    let (mut writer, sinks) = writer(Config::new(Mode::Somatic), stub)?;
    writer.write_sv(&candidate(0, 100, 2, 10)?, &JunctionFilter::new())?;

    let somatic = sinks[&OutputKind::Model(GenotypeModel::Somatic)].records();
    assert_eq!(somatic.len(), 2);
    assert_eq!(somatic[0].filter, Some(Filter::Unscored));
    assert_eq!(somatic[0].call, None);
    assert_eq!(somatic[1].filter, Some(Filter::Pass));

    let diploid = sinks[&OutputKind::Model(GenotypeModel::Diploid)].records();
    assert!(diploid.iter().all(|x| x.filter == Some(Filter::Pass)));
    assert_eq!(diploid[0].id, somatic[0].id);

    let stats = writer.finish()?;
    assert_eq!(*stats.unscored().get(GenotypeModel::Somatic), 1);
    assert_eq!(*stats.unscored().get(GenotypeModel::Diploid), 0);
    assert_eq!(*stats.records().get(GenotypeModel::Somatic), 2);
    Ok(())
}

#[test]
fn test_low_quality_marker_is_model_specific() -> Result<()> {
    let mut config = Config::new(Mode::Somatic);
    config
        .set_min_quality(GenotypeModel::Diploid, 10.0)?
        .set_min_quality(GenotypeModel::Somatic, 40.0)?;
    let (mut writer, sinks) = writer(config, scorer(25.0))?;
    writer.write_sv(&candidate(0, 100, 1, 10)?, &JunctionFilter::new())?;

    let diploid = sinks[&OutputKind::Model(GenotypeModel::Diploid)].records();
    let somatic = sinks[&OutputKind::Model(GenotypeModel::Somatic)].records();
    assert_eq!(diploid[0].filter, Some(Filter::Pass));
    assert_eq!(somatic[0].filter, Some(Filter::LowQuality));
    assert_eq!(somatic[0].call, Some(Call::new(25.0, Genotype::Het)));
    Ok(())
}

#[test]
fn test_candidate_stream_requires_min_support() -> Result<()> {
    let mut config = Config::new(Mode::TumorOnly);
    config.set_report_candidates(true).set_min_candidate_support(4);
    let (mut writer, sinks) = writer(config, scorer(50.0))?;

    writer.write_sv(&candidate(0, 100, 1, 3)?, &JunctionFilter::new())?;
    writer.write_sv(&candidate(1, 200, 1, 4)?, &JunctionFilter::new())?;

    let candidates = sinks[&OutputKind::Candidates].records();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].candidate, 1);
    assert_eq!(candidates[0].filter, None);
    assert_eq!(candidates[0].call, None);

    // Model streams are independent of the candidate threshold
    let tumor = sinks[&OutputKind::Model(GenotypeModel::TumorOnly)].records();
    assert_eq!(tumor.len(), 2);

    let stats = writer.finish()?;
    assert_eq!(*stats.candidate_records(), 1);
    Ok(())
}

#[test]
fn test_invalid_candidates_are_rejected_before_writing() -> Result<()> {
    let (mut writer, sinks) = writer(Config::new(Mode::Germline), scorer(50.0))?;

    let mut filter = JunctionFilter::new();
    filter.set(3, true);
    assert!(writer.write_sv(&candidate(0, 100, 2, 10)?, &filter).is_err());

    let foreign = SvCandidate::new(
        1,
        vec![Junction::new(
            Breakend::new(0, Interval::point(10), Direction::Left),
            Breakend::new(7, Interval::point(10), Direction::Left),
            Vec::new(),
        )],
    )?;
    assert!(writer.write_sv(&foreign, &JunctionFilter::new()).is_err());

    assert!(sinks.values().all(|x| x.records().is_empty()));
    assert_eq!(*writer.stats().candidates(), 0);

    // The writer stays usable and identifiers start from the beginning
    let ids = writer.write_sv(&candidate(2, 100, 1, 10)?, &JunctionFilter::new())?;
    assert_eq!(ids[0].as_ref().map(|x| x.as_str()), Some("SvbitDEL:0"));
    Ok(())
}

#[test]
fn test_out_of_order_candidates_are_written_as_is() -> Result<()> {
    let (mut writer, sinks) = writer(Config::new(Mode::Germline), scorer(50.0))?;
    for (index, pos) in [(0, 500), (1, 100), (2, 900)] {
        writer.write_sv(&candidate(index, pos, 1, 10)?, &JunctionFilter::new())?;
    }

    let order: Vec<_> = sinks[&OutputKind::Model(GenotypeModel::Diploid)]
        .records()
        .iter()
        .map(|x| x.candidate)
        .collect();
    assert_eq!(order, vec![0, 1, 2]);
    assert_eq!(*writer.finish()?.unordered(), 1);
    Ok(())
}

#[test]
fn test_missing_streams_are_rejected() -> Result<()> {
    let mut streams = Streams::new();
    streams.insert(
        OutputKind::Model(GenotypeModel::Diploid),
        Box::new(Collected::default()),
    );
    let result = SvWriter::with_streams(
        Config::new(Mode::Somatic),
        Arc::new(contigs()?),
        Box::new(scorer(50.0)),
        streams,
    );
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_construction_fails_on_unusable_outputs() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut config = Config::new(Mode::Germline);
    config.set_report_candidates(true);

    // No destination for the candidate stream
    let mut outputs = Outputs::new();
    outputs.set(GenotypeModel::Diploid.into(), dir.path().join("diploid.tsv"));
    assert!(SvWriter::new(config.clone(), &outputs, contigs()?, Box::new(scorer(1.0))).is_err());

    // Unwritable destination
    outputs.set(
        OutputKind::Candidates,
        dir.path().join("missing").join("candidates.tsv"),
    );
    let err = SvWriter::new(config, &outputs, contigs()?, Box::new(scorer(1.0)));
    assert!(err.is_err());
    Ok(())
}

#[test]
fn test_writes_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut config = Config::new(Mode::Somatic);
    config.set_report_candidates(true).set_id_prefix("Run")?;

    let mut outputs = Outputs::new();
    outputs
        .set(OutputKind::Candidates, dir.path().join("candidates.tsv"))
        .set(GenotypeModel::Diploid.into(), dir.path().join("diploid.tsv"))
        .set(GenotypeModel::Somatic.into(), dir.path().join("somatic.tsv"))
        // Not active in a somatic run
        .set(GenotypeModel::Rna.into(), dir.path().join("rna.tsv"));

    let mut writer = SvWriter::new(config, &outputs, contigs()?, Box::new(scorer(50.0)))?;
    for index in 0..3 {
        writer.write_sv(&candidate(index, 100 + index * 1_000, 2, 10)?, &JunctionFilter::new())?;
    }
    let stats = writer.finish()?;
    assert_eq!(*stats.candidates(), 3);
    assert!(!dir.path().join("rna.tsv").exists());

    let mut ids = Vec::new();
    for name in ["candidates.tsv", "diploid.tsv", "somatic.tsv"] {
        let text = std::fs::read_to_string(dir.path().join(name))?;
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 6, "{name}");
        assert!(lines[0].starts_with("#ID\t"));
        ids.push(
            lines[1..]
                .iter()
                .map(|x| x.split('\t').next().unwrap_or_default().to_string())
                .collect::<Vec<_>>(),
        );
    }
    assert_eq!(ids[0], ids[1]);
    assert_eq!(ids[1], ids[2]);
    assert_eq!(ids[0][0], "RunDEL:0");
    assert_eq!(ids[0][5], "RunDEL:5");
    Ok(())
}

#[test]
fn test_failed_construction_leaves_no_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let diploid = dir.path().join("diploid.tsv");

    // Second stream cannot be created
    let mut outputs = Outputs::new();
    outputs
        .set(GenotypeModel::Diploid.into(), &diploid)
        .set(
            GenotypeModel::Somatic.into(),
            dir.path().join("missing").join("somatic.tsv"),
        );
    let result = SvWriter::new(
        Config::new(Mode::Somatic),
        &outputs,
        contigs()?,
        Box::new(scorer(1.0)),
    );
    assert!(result.is_err());
    assert!(!diploid.exists());

    // Second stream has no destination
    let mut outputs = Outputs::new();
    outputs.set(GenotypeModel::Diploid.into(), &diploid);
    let result = SvWriter::new(
        Config::new(Mode::Somatic),
        &outputs,
        contigs()?,
        Box::new(scorer(1.0)),
    );
    assert!(result.is_err());
    assert!(!diploid.exists());
    Ok(())
}

#[test]
fn test_candidate_stream_ignores_model_outcomes() -> Result<()> {
    let mut config = Config::new(Mode::Somatic);
    config.set_report_candidates(true);
    let stub = StubScorer {
        quality: 50.0,
        failing: vec![(0, GenotypeModel::Diploid), (0, GenotypeModel::Somatic)],
        ..Default::default()
    };
    let (mut writer, sinks) = writer(config, stub)?;
    let ids = writer.write_sv(&candidate(0, 100, 1, 10)?, &JunctionFilter::new())?;

    let candidates = sinks[&OutputKind::Candidates].records();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].filter, None);
    assert_eq!(Some(candidates[0].id.clone()), ids[0]);

    for model in [GenotypeModel::Diploid, GenotypeModel::Somatic] {
        let records = sinks[&OutputKind::Model(model)].records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].filter, Some(Filter::Unscored));
        assert_eq!(records[0].id, candidates[0].id);
    }
    Ok(())
}
