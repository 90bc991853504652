use std::collections::BTreeMap;
use std::fmt::Display;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use eyre::{ensure, Result};
use svbit_core_rs::loc::{Direction, Interval};
use svbit_core_rs::sample::PerSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SvType {
    Deletion,
    Insertion,
    Duplication,
    Inversion,
    Translocation,
}

impl SvType {
    pub fn label(&self) -> &'static str {
        match self {
            SvType::Deletion => "DEL",
            SvType::Insertion => "INS",
            SvType::Duplication => "DUP",
            SvType::Inversion => "INV",
            SvType::Translocation => "BND",
        }
    }

    /// Type of the rearrangement joining two ordered breakends.
    pub fn classify(bp1: &Breakend, bp2: &Breakend, inserted: usize) -> Self {
        if bp1.contig != bp2.contig {
            return SvType::Translocation;
        }
        match (bp1.direction, bp2.direction) {
            (Direction::Left, Direction::Right) => {
                let deleted = bp2.interval.start().saturating_sub(bp1.interval.start());
                if inserted as u64 > deleted {
                    SvType::Insertion
                } else {
                    SvType::Deletion
                }
            }
            (Direction::Right, Direction::Left) => SvType::Duplication,
            _ => SvType::Inversion,
        }
    }
}

impl Display for SvType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One side of a junction. The interval is the 0-based uncertainty range of the break position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Constructor, Getters, Dissolve)]
pub struct Breakend {
    contig: usize,
    interval: Interval<u64>,
    direction: Direction,
}

impl Breakend {
    fn sort_key(&self) -> (usize, u64, u64) {
        (self.contig, self.interval.start(), self.interval.end())
    }
}

/// Reads supporting a junction in one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Constructor)]
pub struct Support {
    pub split: u64,
    pub pair: u64,
}

impl Support {
    pub fn total(&self) -> u64 {
        self.split + self.pair
    }
}

/// Contig assembled across a junction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Constructor, Getters)]
pub struct AssemblyData {
    sequence: Vec<u8>,
    /// Offset of the junction within the contig sequence.
    breakpoint: usize,
}

/// Novel adjacency between two breakends, with its evidence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Dissolve)]
pub struct Junction {
    bp1: Breakend,
    bp2: Breakend,
    sv_type: SvType,
    insert_seq: Vec<u8>,
    support: PerSample<Support>,
    assembly: Option<AssemblyData>,
}

impl Junction {
    /// Breakends are stored in genomic order, `bp1` first.
    pub fn new(bp1: Breakend, bp2: Breakend, insert_seq: Vec<u8>) -> Self {
        let (bp1, bp2) = if bp2.sort_key() < bp1.sort_key() {
            (bp2, bp1)
        } else {
            (bp1, bp2)
        };
        Self {
            sv_type: SvType::classify(&bp1, &bp2, insert_seq.len()),
            bp1,
            bp2,
            insert_seq,
            support: PerSample::default(),
            assembly: None,
        }
    }

    pub fn with_support(mut self, support: PerSample<Support>) -> Self {
        self.support = support;
        self
    }

    pub fn with_assembly(mut self, assembly: AssemblyData) -> Self {
        self.assembly = Some(assembly);
        self
    }

    pub fn total_support(&self) -> u64 {
        self.support.iter().map(|(_, x)| x.total()).sum()
    }
}

/// Candidate structural variant: one or more junctions discovered together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Dissolve)]
pub struct SvCandidate {
    index: u64,
    junctions: Vec<Junction>,
}

impl SvCandidate {
    pub fn new(index: u64, junctions: Vec<Junction>) -> Result<Self> {
        ensure!(
            !junctions.is_empty(),
            "SV candidate {index} must have at least one junction"
        );
        Ok(Self { index, junctions })
    }

    /// Leftmost breakend of the candidate.
    pub fn position(&self) -> (usize, u64) {
        self.junctions
            .iter()
            .map(|x| (x.bp1.contig, x.bp1.interval.start()))
            .min()
            .unwrap_or((usize::MAX, u64::MAX))
    }
}

/// Junctions of a candidate excluded upstream, keyed by junction index.
///
/// Junctions without an entry are not filtered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JunctionFilter {
    flags: BTreeMap<usize, bool>,
}

impl JunctionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter built from one flag per junction.
    pub fn from_flags(flags: impl IntoIterator<Item = bool>) -> Self {
        Self {
            flags: flags.into_iter().enumerate().collect(),
        }
    }

    pub fn set(&mut self, junction: usize, filtered: bool) -> &mut Self {
        self.flags.insert(junction, filtered);
        self
    }

    pub fn is_filtered(&self, junction: usize) -> bool {
        self.flags.get(&junction).copied().unwrap_or(false)
    }

    /// Ensure every key refers to a junction of the candidate.
    pub fn validate(&self, candidate: &SvCandidate) -> Result<()> {
        if let Some((&key, _)) = self.flags.last_key_value() {
            ensure!(
                key < candidate.junctions.len(),
                "Junction filter refers to junction {key}, but SV candidate {} has only {} junction(s)",
                candidate.index,
                candidate.junctions.len()
            );
        }
        Ok(())
    }
}
