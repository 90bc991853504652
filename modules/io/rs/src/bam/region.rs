use std::fmt;

use derive_getters::{Dissolve, Getters};
use svbit_core_rs::loc::Interval;
use thiserror::Error;

use super::contigs::ContigTable;

/// Failure to resolve a `CONTIG[:START[-END]]` region string. Every message echoes the region.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("can't parse region '{region}': contig name is missing")]
    MissingContig { region: String },

    #[error("can't parse region '{region}': too many ':' separated fields")]
    TooManyColonFields { region: String },

    #[error("can't parse region '{region}': contig '{contig}' not found in header")]
    ContigNotFound { region: String, contig: String },

    #[error("can't parse region '{region}': too many '-' separated fields")]
    TooManyDashFields { region: String },

    #[error("can't parse region '{region}': invalid coordinate '{value}'")]
    InvalidCoordinate { region: String, value: String },
}

impl RegionError {
    /// Structural problems with the region string, as opposed to bad numbers.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, RegionError::InvalidCoordinate { .. })
    }
}

/// Resolved genomic region: contig index in the header, 0-based start and the end as supplied.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Dissolve, Getters)]
pub struct Region {
    contig: usize,
    start: u64,
    end: u64,
}

impl Region {
    pub fn new(contig: usize, start: u64, end: u64) -> Self {
        Self { contig, start, end }
    }

    /// Half-open interval view. None if the region is empty.
    pub fn interval(&self) -> Option<Interval<u64>> {
        Interval::new(self.start, self.end).ok()
    }

    /// Render the region back to 1-based `CONTIG:START-END` text.
    pub fn display<'a>(&'a self, header: &'a ContigTable) -> impl fmt::Display + 'a {
        RegionDisplay {
            region: self,
            header,
        }
    }
}

struct RegionDisplay<'a> {
    region: &'a Region,
    header: &'a ContigTable,
}

impl fmt::Display for RegionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .header
            .get(self.region.contig)
            .map(|x| x.name().as_str())
            .unwrap_or("?");
        write!(f, "{}:{}-{}", name, self.region.start + 1, self.region.end)
    }
}

fn coordinate(region: &str, value: &str) -> Result<u64, RegionError> {
    value
        .parse::<u64>()
        .map_err(|_| RegionError::InvalidCoordinate {
            region: region.to_string(),
            value: value.to_string(),
        })
}

/// Parse `CONTIG[:START[-END]]` against the header contigs.
///
/// START is 1-based and converted to 0-based, END is returned as supplied. Missing START/END
/// default to the whole contig `[0, length)`.
pub fn parse_region(header: &ContigTable, region: &str) -> Result<Region, RegionError> {
    let words: Vec<&str> = region.split(':').collect();
    if words.len() > 2 {
        return Err(RegionError::TooManyColonFields {
            region: region.to_string(),
        });
    }
    if words[0].is_empty() {
        return Err(RegionError::MissingContig {
            region: region.to_string(),
        });
    }

    let contig = header
        .index_of(words[0])
        .ok_or_else(|| RegionError::ContigNotFound {
            region: region.to_string(),
            contig: words[0].to_string(),
        })?;
    let length = header.get(contig).map(|x| *x.length()).unwrap_or_default();

    let mut resolved = Region::new(contig, 0, length);
    if words.len() == 1 {
        return Ok(resolved);
    }

    let coords: Vec<&str> = words[1].split('-').collect();
    if coords.len() > 2 {
        return Err(RegionError::TooManyDashFields {
            region: region.to_string(),
        });
    }

    let start = coordinate(region, coords[0])?;
    resolved.start = start
        .checked_sub(1)
        .ok_or_else(|| RegionError::InvalidCoordinate {
            region: region.to_string(),
            value: coords[0].to_string(),
        })?;

    if coords.len() == 2 {
        resolved.end = coordinate(region, coords[1])?;
    }
    Ok(resolved)
}
