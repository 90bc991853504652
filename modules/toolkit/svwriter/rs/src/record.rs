use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use eyre::{eyre, Result};
use itertools::Itertools;
use svbit_core_rs::sample::PerSample;
use svbit_io_rs::bam::ContigTable;
use svbit_io_rs::compression::encode;
use svbit_io_rs::WriteRecord;

use crate::candidate::{Breakend, Support, SvType};
use crate::id::JunctionId;
use crate::model::OutputKind;
use crate::score::Call;

/// Model-specific filter marker of a scored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Pass,
    LowQuality,
    Unscored,
}

impl Filter {
    pub fn label(&self) -> &'static str {
        match self {
            Filter::Pass => "PASS",
            Filter::LowQuality => "LowQual",
            Filter::Unscored => "Unscored",
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One output line: a junction as seen by one stream.
#[derive(Debug, Clone, PartialEq)]
pub struct SvRecord {
    pub id: JunctionId,
    pub candidate: u64,
    pub junction: usize,
    pub sv_type: SvType,
    pub bp1: Breakend,
    pub bp2: Breakend,
    pub kind: OutputKind,
    /// Absent for unscored candidates and scoring failures.
    pub call: Option<Call>,
    /// Absent on the candidate stream.
    pub filter: Option<Filter>,
    pub support: PerSample<Support>,
}

pub const COLUMNS: [&str; 14] = [
    "#ID", "CHROM1", "POS1", "DIR1", "CHROM2", "POS2", "DIR2", "SVTYPE", "MODEL", "QUAL", "GT",
    "FILTER", "NORMAL_SR_PR", "TUMOR_SR_PR",
];

pub type Sink = Box<dyn WriteRecord<Record = SvRecord> + Send + Sync + 'static>;

/// Tab-delimited record writer. Positions are reported 1-based.
pub struct Writer<W: Write> {
    writer: W,
    contigs: Arc<ContigTable>,
}

impl Writer<File> {
    pub fn from_path(
        path: impl AsRef<Path>,
        compression: &encode::Config,
        contigs: Arc<ContigTable>,
    ) -> Result<Sink> {
        let sink: Sink = match encode::Stream::from_path(path, compression)? {
            encode::Stream::Raw(x) => Box::new(Writer::new(x, contigs)?),
            encode::Stream::Gzip(x) => Box::new(Writer::new(x, contigs)?),
            encode::Stream::Bgzf(x) => Box::new(Writer::new(x, contigs)?),
            encode::Stream::MultithreadedBgzf(x) => Box::new(Writer::new(x, contigs)?),
        };
        Ok(sink)
    }
}

impl<W: Write> Writer<W> {
    /// Wrap the output and write the column header line.
    pub fn new(mut writer: W, contigs: Arc<ContigTable>) -> Result<Self> {
        writeln!(writer, "{}", COLUMNS.iter().join("\t"))?;
        Ok(Self { writer, contigs })
    }

    fn contig<'a>(contigs: &'a ContigTable, bnd: &Breakend) -> Result<&'a str> {
        contigs
            .get(*bnd.contig())
            .map(|x| x.name().as_str())
            .ok_or_else(|| eyre!("Unknown contig index {} in the SV record", bnd.contig()))
    }
}

impl<W: Write> WriteRecord for Writer<W> {
    type Record = SvRecord;

    fn write_record(&mut self, record: &Self::Record) -> Result<()> {
        let contigs = &self.contigs;
        let (chrom1, chrom2) = (
            Self::contig(contigs, &record.bp1)?,
            Self::contig(contigs, &record.bp2)?,
        );
        let (quality, genotype) = match &record.call {
            Some(call) => (format!("{:.0}", call.quality), call.genotype.symbol()),
            None => (".".to_string(), "."),
        };
        let filter = record.filter.map(|x| x.label()).unwrap_or(".");
        let (normal, tumor) = (&record.support.normal, &record.support.tumor);

        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{},{}\t{},{}",
            record.id,
            chrom1,
            record.bp1.interval().start() + 1,
            record.bp1.direction(),
            chrom2,
            record.bp2.interval().start() + 1,
            record.bp2.direction(),
            record.sv_type,
            record.kind,
            quality,
            genotype,
            filter,
            normal.split,
            normal.pair,
            tumor.split,
            tumor.pair,
        )?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::JunctionIdGenerator;
    use crate::model::GenotypeModel;
    use crate::score::Genotype;
    use svbit_core_rs::loc::{Direction, Interval};

    fn record(kind: OutputKind, call: Option<Call>, filter: Option<Filter>) -> SvRecord {
        SvRecord {
            id: JunctionIdGenerator::new("Test").next(SvType::Translocation),
            candidate: 0,
            junction: 0,
            sv_type: SvType::Translocation,
            bp1: Breakend::new(0, Interval::point(99), Direction::Left),
            bp2: Breakend::new(1, Interval::point(0), Direction::Right),
            kind,
            call,
            filter,
            support: PerSample::new(Support::new(1, 2), Support::new(3, 4)),
        }
    }

    #[test]
    fn test_writes_header_and_records() -> Result<()> {
        let contigs = Arc::new(ContigTable::new([("chr1", 1000), ("chr2", 500)])?);
        let mut buffer = Vec::new();
        {
            let mut writer = Writer::new(&mut buffer, contigs)?;
            writer.write_records(&[
                record(OutputKind::Candidates, None, None),
                record(
                    GenotypeModel::Diploid.into(),
                    Some(Call::new(42.4, Genotype::Het)),
                    Some(Filter::Pass),
                ),
                record(GenotypeModel::Somatic.into(), None, Some(Filter::Unscored)),
            ])?;
            writer.flush()?;
        }

        let text = String::from_utf8(buffer)?;
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("#ID\tCHROM1"));
        assert_eq!(
            lines[1],
            "TestBND:0\tchr1\t100\t<\tchr2\t1\t>\tBND\tcandidates\t.\t.\t.\t1,2\t3,4"
        );
        assert_eq!(
            lines[2],
            "TestBND:0\tchr1\t100\t<\tchr2\t1\t>\tBND\tdiploid\t42\t0/1\tPASS\t1,2\t3,4"
        );
        assert!(lines[3].contains("\tsomatic\t.\t.\tUnscored\t"));
        Ok(())
    }

    #[test]
    fn test_unknown_contig_is_an_error() -> Result<()> {
        let contigs = Arc::new(ContigTable::new([("chr1", 1000)])?);
        let mut writer = Writer::new(Vec::new(), contigs)?;
        assert!(writer
            .write_record(&record(OutputKind::Candidates, None, None))
            .is_err());
        Ok(())
    }
}
